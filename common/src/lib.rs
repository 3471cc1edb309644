//! Data shared between the maintenance server and anything that talks to it:
//! persisted records, form payloads and the purchase-request row model.

pub mod model;
pub mod purchase;
pub mod requests;
