use super::PurchaseRequest;
use mms_common::purchase::TABULAR_HEADER;
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::path::Path;

const SHEET_NAME: &str = "Purchase Request";

/// One worksheet: the header row, then one row per spare.
/// Numbers are written as numeric cells so the sheet can be summed.
pub(super) fn write(request: &PurchaseRequest, path: &Path) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, title) in TABULAR_HEADER.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *title, &bold)?;
    }

    for (index, line) in request.lines.iter().enumerate() {
        let row = index as u32 + 1;
        worksheet.write_number(row, 0, line.spare_id as f64)?;
        worksheet.write_string(row, 1, line.name.as_str())?;
        worksheet.write_number(row, 2, line.stock as f64)?;
        worksheet.write_string(row, 3, line.location.as_str())?;
        worksheet.write_number(row, 4, line.suggested_quantity as f64)?;
    }

    workbook.save(path)
}
