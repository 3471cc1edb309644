use serde::{Deserialize, Serialize};

/// An inventory item kept in stock for repairs.
///
/// `stock` is read back exactly as stored. Write paths only accept
/// non-negative values, but rows written by other tools are not re-checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spare {
    pub id: i64,
    pub name: String,
    pub stock: i64,
    pub location: String,
    pub machine_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSpare {
    pub name: String,
    pub stock: i64,
    pub location: String,
    pub machine_id: Option<i64>,
}
