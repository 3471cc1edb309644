use serde::{Deserialize, Serialize};

/// A vendor able to deliver one spare. Several suppliers may share a spare.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: i64,
    pub spare_id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSupplier {
    pub spare_id: i64,
    pub name: String,
    pub email: String,
}
