use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::PackageName;

/// Remote package descriptor (`component.json`).
///
/// Only the members the installer acts on are modelled. The fetched document
/// is kept as well so the persisted copy matches what was fetched, key order
/// included.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub scripts: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub styles: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub templates: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "IndexMap::is_empty")]
    pub dependencies: IndexMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,

    #[serde(skip)]
    document: Map<String, Value>,
}

/// Treat an explicit `null` like a missing member.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Manifest {
    /// Parse a manifest from JSON text.
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        let document: Map<String, Value> = serde_json::from_str(content)?;
        let mut manifest: Manifest = serde_json::from_value(Value::Object(document.clone()))?;
        manifest.document = document;
        Ok(manifest)
    }

    /// A member of the fetched document, modelled or not.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.document.get(key)
    }

    /// Pretty-printed JSON, as written to disk.
    ///
    /// Fetched members are written verbatim and in their original order;
    /// modelled values the document lacks (such as a derived `repo`) follow.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        let mut output = self.document.clone();
        if let Value::Object(fields) = serde_json::to_value(self)? {
            for (key, value) in fields {
                if matches!(output.get(&key), None | Some(Value::Null)) {
                    output.insert(key, value);
                }
            }
        }
        serde_json::to_string_pretty(&output)
    }

    /// All files to fetch: scripts, then styles, then templates.
    ///
    /// Order is preserved and duplicates are kept.
    pub fn files(&self) -> Vec<String> {
        self.scripts
            .iter()
            .chain(&self.styles)
            .chain(&self.templates)
            .cloned()
            .collect()
    }

    pub fn has_dependencies(&self) -> bool {
        !self.dependencies.is_empty()
    }

    /// Fill in `repo` from the package name when the manifest omits it.
    pub fn ensure_repo(&mut self, name: &PackageName) {
        if self.repo.is_none() {
            self.repo = Some(format!("https://github.com/{}", name));
        }
    }
}
