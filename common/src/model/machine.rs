use serde::{Deserialize, Serialize};

/// A piece of factory equipment under maintenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Machine {
    pub id: i64,
    pub name: String,
    pub location: Option<String>,
    /// Free-form date of the last service, usually `YYYY-MM-DD`.
    pub last_maintenance: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMachine {
    pub name: String,
    pub location: Option<String>,
    pub last_maintenance: Option<String>,
}
