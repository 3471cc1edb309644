//! # Purchase Request Documents
//!
//! Renders a low-stock selection into a file in one of three encodings:
//!
//! - `page_layout`: a single A4 PDF page with fixed column positions.
//! - `spreadsheet`: an XLSX workbook, one row per spare under a header row.
//! - `csv_export`: the same table as comma-separated text.
//!
//! Every call writes a new file named `purchase_request_<uuid>.<ext>` into the
//! output directory, so concurrent requests never overwrite each other's
//! documents. Files are left on disk after the request.

mod csv_export;
pub mod page_layout;
mod spreadsheet;

use crate::error::AppError;
use chrono::NaiveDate;
use log::info;
use mms_common::model::spare::Spare;
use mms_common::purchase::{DocumentEncoding, PurchaseRequestLine};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Where documents go and which font family the PDF encoding uses.
#[derive(Debug, Clone)]
pub struct DocumentOutput {
    pub output_dir: PathBuf,
    pub fonts_dir: PathBuf,
    pub font_family: String,
}

/// Contents of a purchase request, independent of its encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseRequest {
    pub date: NaiveDate,
    pub lines: Vec<PurchaseRequestLine>,
}

impl PurchaseRequest {
    pub fn from_spares(spares: &[Spare], threshold: i64, date: NaiveDate) -> Self {
        Self {
            date,
            lines: spares
                .iter()
                .map(|spare| PurchaseRequestLine::from_spare(spare, threshold))
                .collect(),
        }
    }
}

/// A rendered document on local disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocument {
    pub path: PathBuf,
    pub encoding: DocumentEncoding,
}

impl GeneratedDocument {
    /// Base name of the file on disk, used for mail attachments.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Stable name offered to browsers on download.
    pub fn download_name(&self) -> String {
        format!("purchase_request.{}", self.encoding.extension())
    }
}

fn unique_path(dir: &Path, encoding: DocumentEncoding) -> PathBuf {
    dir.join(format!(
        "purchase_request_{}.{}",
        Uuid::new_v4(),
        encoding.extension()
    ))
}

/// Writes `request` in the requested encoding and returns the new file.
pub fn write_document(
    request: &PurchaseRequest,
    encoding: DocumentEncoding,
    output: &DocumentOutput,
) -> Result<GeneratedDocument, AppError> {
    fs::create_dir_all(&output.output_dir)?;
    let path = unique_path(&output.output_dir, encoding);

    match encoding {
        DocumentEncoding::Pdf => {
            page_layout::write(request, &output.fonts_dir, &output.font_family, &path)?
        }
        DocumentEncoding::Excel => spreadsheet::write(request, &path)?,
        DocumentEncoding::Csv => csv_export::write(request, &path)?,
    }

    info!(
        "Purchase request with {} line(s) written to {}",
        request.lines.len(),
        path.display()
    );
    Ok(GeneratedDocument { path, encoding })
}
