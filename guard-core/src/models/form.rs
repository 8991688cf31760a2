//! Form Data Model
//!
//! Raw field values as a host page collects them: every field is either a
//! single string or a list of strings (multi-selects, checkbox groups).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One field value (`string | string[]` on the wire)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    /// Flatten to a single string; list values are joined with one space
    pub fn joined(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::List(items) => items.join(" "),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

/// Field name -> value. Ordered so the normalized corpus is deterministic.
pub type FormData = BTreeMap<String, FieldValue>;

/// Build a `FormData` from `(name, value)` pairs
pub fn form_data<I, K, V>(pairs: I) -> FormData
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<FieldValue>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}
