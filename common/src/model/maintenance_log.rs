use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceLog {
    pub id: i64,
    pub machine_id: i64,
    pub description: String,
    pub date: String,
}

/// Payload accepted by both the JSON endpoint and the dashboard form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMaintenanceLog {
    pub machine_id: i64,
    pub description: String,
    pub date: String,
}

/// A log entry joined with the name of its machine, as shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentLog {
    pub id: i64,
    pub machine_name: String,
    pub description: String,
    pub date: String,
}
