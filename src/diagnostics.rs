//! Log deduplication.
//!
//! Malformed modules tend to repeat the same problem on every verse of every
//! chapter. Recoverable problems are therefore reported once per distinct key
//! for the lifetime of the process.

use std::collections::HashSet;
use std::sync::Mutex;

lazy_static::lazy_static! {
    static ref REPORTED: Mutex<HashSet<String>> = Mutex::new(HashSet::new());
}

/// Returns true the first time `key` is seen in this process.
pub(crate) fn first_report(key: &str) -> bool {
    let mut reported = REPORTED.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if reported.contains(key) {
        false
    } else {
        reported.insert(key.to_string());
        true
    }
}

/// Log an unsupported element name, once per name.
pub(crate) fn unknown_element(name: &str, verse: u32) {
    if first_report(&format!("element:{name}")) {
        tracing::info!(element = name, verse, "unsupported OSIS element");
    }
}

/// Log a missing or unusable attribute value, once per element/attribute/value.
pub(crate) fn malformed_attribute(element: &str, attribute: &str, value: Option<&str>) {
    let value = value.unwrap_or("");
    if first_report(&format!("attr:{element}@{attribute}={value}")) {
        tracing::warn!(element, attribute, value, "unusable OSIS attribute, decoration skipped");
    }
}
