//! Row model of a purchase request, shared by every document encoding.

use crate::model::spare::Spare;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stock level below which a spare is reordered, unless configured otherwise.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

/// First row of every tabular purchase request.
pub const TABULAR_HEADER: [&str; 5] = ["ID", "Name", "Stock", "Location", "Suggested Qty"];

/// Reorder-up-to-double-threshold heuristic: `2 × threshold − stock`.
///
/// The result is not clamped. A spare already stocked above twice the
/// threshold yields a negative quantity and is reported as such.
pub fn suggested_quantity(threshold: i64, stock: i64) -> i64 {
    threshold.saturating_mul(2).saturating_sub(stock)
}

/// One spare as it appears on a purchase request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRequestLine {
    pub spare_id: i64,
    pub name: String,
    pub stock: i64,
    pub location: String,
    pub suggested_quantity: i64,
}

impl PurchaseRequestLine {
    pub fn from_spare(spare: &Spare, threshold: i64) -> Self {
        Self {
            spare_id: spare.id,
            name: spare.name.clone(),
            stock: spare.stock,
            location: spare.location.clone(),
            suggested_quantity: suggested_quantity(threshold, spare.stock),
        }
    }

    /// Cells in `TABULAR_HEADER` order.
    pub fn record(&self) -> [String; 5] {
        [
            self.spare_id.to_string(),
            self.name.clone(),
            self.stock.to_string(),
            self.location.clone(),
            self.suggested_quantity.to_string(),
        ]
    }
}

/// Output format of a generated purchase request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentEncoding {
    /// Fixed page layout.
    Pdf,
    /// XLSX workbook.
    Excel,
    Csv,
}

impl DocumentEncoding {
    pub fn extension(self) -> &'static str {
        match self {
            DocumentEncoding::Pdf => "pdf",
            DocumentEncoding::Excel => "xlsx",
            DocumentEncoding::Csv => "csv",
        }
    }

    /// Human label used in mail subjects.
    pub fn label(self) -> &'static str {
        match self {
            DocumentEncoding::Pdf => "PDF",
            DocumentEncoding::Excel => "Excel",
            DocumentEncoding::Csv => "CSV",
        }
    }
}

impl fmt::Display for DocumentEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEncoding(pub String);

impl fmt::Display for UnknownEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown document encoding `{}` (expected pdf, excel or csv)", self.0)
    }
}

impl std::error::Error for UnknownEncoding {}

impl FromStr for DocumentEncoding {
    type Err = UnknownEncoding;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(DocumentEncoding::Pdf),
            "excel" | "xlsx" => Ok(DocumentEncoding::Excel),
            "csv" => Ok(DocumentEncoding::Csv),
            _ => Err(UnknownEncoding(s.to_string())),
        }
    }
}
