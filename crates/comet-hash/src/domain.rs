//! Site identifier normalization

use std::collections::HashSet;
use std::net::IpAddr;

use lazy_static::lazy_static;
use url::Url;

lazy_static! {
    /// Second-level labels that, under a two-letter country code, form part of
    /// the public suffix (`com.au`, `co.uk`, `ne.jp`, ...).
    static ref COUNTRY_SECOND_LEVEL: HashSet<&'static str> = [
        "ac", "co", "com", "edu", "go", "gov", "gob", "govt", "gv", "ltd", "me", "mil",
        "ne", "net", "nhs", "nic", "nom", "or", "org", "plc", "sch", "info", "biz",
    ]
    .into_iter()
    .collect();
}

/// Reduce a site identifier to its registrable label.
///
/// Scheme, user info, port, path, query, subdomains and the public suffix are
/// stripped, so `https://user@mail.google.com:443/x`, `accounts.google.com`
/// and `www.google.com.au` all become `google`. Single-label hosts and IP
/// addresses are returned as they are. Input with no host yields an empty
/// string.
pub fn normalize_domain(site: &str) -> String {
    let host = extract_host(site);
    if host.is_empty() || host.parse::<IpAddr>().is_ok() {
        return host;
    }

    let labels: Vec<&str> = host.split('.').filter(|label| !label.is_empty()).collect();
    let n = labels.len();
    match n {
        0 => String::new(),
        1 | 2 => labels[0].to_string(),
        _ => {
            let suffix_len = if is_country_suffix(labels[n - 2], labels[n - 1]) { 2 } else { 1 };
            labels[n - 1 - suffix_len].to_string()
        }
    }
}

fn is_country_suffix(second_level: &str, tld: &str) -> bool {
    tld.len() == 2 && tld.chars().all(|c| c.is_ascii_alphabetic()) && COUNTRY_SECOND_LEVEL.contains(second_level)
}

/// Lowercased host part of a URL or bare host string.
fn extract_host(site: &str) -> String {
    let site = site.trim().to_ascii_lowercase();

    if site.contains("://") {
        if let Ok(url) = Url::parse(&site) {
            if let Some(host) = url.host_str() {
                return host.trim_start_matches('[').trim_end_matches(']').to_string();
            }
        }
    }

    let rest = match site.find("://") {
        Some(idx) => &site[idx + 3..],
        None => site.as_str(),
    };

    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host_port = match authority.rfind('@') {
        Some(idx) => &authority[idx + 1..],
        None => authority,
    };

    if let Some(bracketed) = host_port.strip_prefix('[') {
        return bracketed.split(']').next().unwrap_or_default().to_string();
    }
    if host_port.parse::<IpAddr>().is_ok() {
        return host_port.to_string();
    }

    host_port.split(':').next().unwrap_or_default().trim_end_matches('.').to_string()
}
