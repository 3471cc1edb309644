pub mod machine;
pub mod maintenance_log;
pub mod spare;
pub mod supplier;
