//! Utility functions for the installer.

use crate::Result;

/// Collapse the results of a settled batch.
///
/// Every result is inspected; the successes are returned in order when all
/// of them succeeded, otherwise the first error (in batch order) is returned.
///
/// # Examples
///
/// ```
/// use comet_pm::util::settle;
/// use comet_pm::ComponentError;
///
/// assert_eq!(settle(vec![Ok(1), Ok(2)]).unwrap(), vec![1, 2]);
///
/// let failed = settle(vec![
///     Ok(1),
///     Err(ComponentError::Config("first".into())),
///     Err(ComponentError::Config("second".into())),
/// ]);
/// assert_eq!(failed.unwrap_err().to_string(), "Configuration error: first");
/// ```
pub fn settle<T>(results: impl IntoIterator<Item = Result<T>>) -> Result<Vec<T>> {
    let mut values = Vec::new();
    let mut first_error = None;

    for result in results {
        match result {
            Ok(value) => values.push(value),
            Err(e) => {
                if first_error.is_none() {
                    first_error = Some(e);
                } else {
                    log::trace!("Suppressed additional failure: {}", e);
                }
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(values),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ComponentError;

    #[test]
    fn test_settle_all_ok() {
        let values = settle(vec![Ok("a"), Ok("b")]).unwrap();
        assert_eq!(values, vec!["a", "b"]);
    }

    #[test]
    fn test_settle_empty() {
        let values: Vec<u8> = settle(Vec::new()).unwrap();
        assert!(values.is_empty());
    }

    #[test]
    fn test_settle_reports_first_error() {
        let result: Result<Vec<u8>> = settle(vec![
            Ok(1),
            Err(ComponentError::InvalidPackageName { name: "first".into() }),
            Ok(2),
            Err(ComponentError::InvalidPackageName { name: "second".into() }),
        ]);

        match result {
            Err(ComponentError::InvalidPackageName { name }) => assert_eq!(name, "first"),
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }
}
