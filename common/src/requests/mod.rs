//! Raw form payloads as posted by the HTML screens.
//!
//! Numeric fields arrive as strings so the server can answer with a readable
//! validation message instead of a generic deserialization failure.

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

impl SearchQuery {
    /// The trimmed search term, or `None` when the box was left empty.
    pub fn term(&self) -> Option<&str> {
        let term = self.q.trim();
        (!term.is_empty()).then_some(term)
    }
}

#[derive(Debug, Deserialize)]
pub struct MachineForm {
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub last_maintenance: String,
}

#[derive(Debug, Deserialize)]
pub struct SpareForm {
    pub name: String,
    pub stock: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub machine_id: String,
}

#[derive(Debug, Deserialize)]
pub struct SupplierForm {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct LogForm {
    pub machine_id: String,
    pub description: String,
    pub date: String,
}
