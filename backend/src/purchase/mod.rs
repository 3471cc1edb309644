//! # Low-stock purchase requests
//!
//! The pipeline that turns low inventory into supplier mail:
//!
//! - `selector`: finds spares whose stock is under the threshold.
//! - `document`: renders them as a PDF page, an XLSX workbook or a CSV file.
//! - `notifier`: mails a rendered document to supplier addresses over SMTP.
//! - `pipeline`: runs the three in order and reports one outcome.

pub mod document;
pub mod notifier;
pub mod pipeline;
pub mod selector;
