//! Single-page PDF purchase request.
//!
//! Positions are given in PostScript points measured from the bottom-left
//! corner of an A4 page and converted to genpdf's top-left millimetre space
//! when rendering. The layout is planned first (`plan`) and then drawn, so
//! the geometry can be checked without fonts.
//!
//! Rows advance 20pt per spare and no second page is started: rows that would
//! fall off the bottom of the page are left out and counted as clipped.

use super::PurchaseRequest;
use genpdf::error::Error;
use genpdf::fonts::{FontData, FontFamily};
use genpdf::render::Area;
use genpdf::style::Style;
use genpdf::{Context, Document, Element, Mm, PaperSize, Position, RenderResult};
use log::warn;
use std::fs::File;
use std::path::Path;

const PAGE_HEIGHT_PT: f64 = 842.0;
const PT_TO_MM: f64 = 25.4 / 72.0;

const TITLE: &str = "PURCHASE REQUEST";
const TITLE_POS: (f64, f64) = (200.0, 800.0);
const TITLE_SIZE: u8 = 14;

const DATE_POS: (f64, f64) = (50.0, 780.0);
const BODY_SIZE: u8 = 10;

const FIRST_ROW_Y: f64 = 750.0;
const ROW_STEP: f64 = 20.0;
/// Lowest baseline that still fits on the page.
const MIN_BASELINE_Y: f64 = 10.0;

/// x positions of id, name, stock, location and suggested quantity.
const COLUMN_X: [f64; 5] = [50.0, 100.0, 250.0, 300.0, 450.0];

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    pub x: f64,
    /// Baseline, measured up from the bottom edge.
    pub y: f64,
    pub text: String,
    pub size: u8,
    pub bold: bool,
}

impl PlacedText {
    fn body(x: f64, y: f64, text: impl Into<String>) -> Self {
        Self {
            x,
            y,
            text: text.into(),
            size: BODY_SIZE,
            bold: false,
        }
    }

    /// Top-left corner of the text line in renderer coordinates.
    fn position(&self) -> Position {
        let top = PAGE_HEIGHT_PT - self.y - f64::from(self.size);
        Position::new(Mm::from(self.x * PT_TO_MM), Mm::from(top * PT_TO_MM))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub items: Vec<PlacedText>,
    /// Rows that did not fit on the page.
    pub clipped_rows: usize,
}

pub fn plan(request: &PurchaseRequest) -> PageLayout {
    let mut items = vec![
        PlacedText {
            x: TITLE_POS.0,
            y: TITLE_POS.1,
            text: TITLE.to_string(),
            size: TITLE_SIZE,
            bold: true,
        },
        PlacedText::body(DATE_POS.0, DATE_POS.1, format!("Date: {}", request.date)),
    ];

    let mut clipped_rows = 0;
    let mut y = FIRST_ROW_Y;
    for line in &request.lines {
        if y < MIN_BASELINE_Y {
            clipped_rows += 1;
        } else {
            for (x, cell) in COLUMN_X.iter().zip(line.record()) {
                items.push(PlacedText::body(*x, y, cell));
            }
        }
        y -= ROW_STEP;
    }

    PageLayout {
        items,
        clipped_rows,
    }
}

/// Draws every planned string at its absolute position on one page.
struct FixedPage {
    items: Vec<PlacedText>,
}

impl Element for FixedPage {
    fn render(
        &mut self,
        context: &Context,
        area: Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        for item in &self.items {
            let mut item_style = style;
            item_style.set_font_size(item.size);
            if item.bold {
                item_style.set_bold();
            }
            area.print_str(&context.font_cache, item.position(), item_style, &item.text)?;
        }
        Ok(RenderResult {
            size: area.size(),
            has_more: false,
        })
    }
}

/// Falls back to LiberationSans when the configured family is missing.
fn load_font(fonts_dir: &Path, family: &str) -> Result<FontFamily<FontData>, Error> {
    match genpdf::fonts::from_files(fonts_dir, family, None) {
        Ok(fonts) => Ok(fonts),
        Err(e) if family == "LiberationSans" => Err(e),
        Err(e) => {
            warn!("Font family {} unavailable ({}), trying LiberationSans", family, e);
            genpdf::fonts::from_files(fonts_dir, "LiberationSans", None)
        }
    }
}

pub(super) fn write(
    request: &PurchaseRequest,
    fonts_dir: &Path,
    font_family: &str,
    path: &Path,
) -> Result<(), Error> {
    let layout = plan(request);
    if layout.clipped_rows > 0 {
        warn!(
            "Purchase request page is full: {} of {} row(s) not drawn",
            layout.clipped_rows,
            request.lines.len()
        );
    }

    let mut doc = Document::new(load_font(fonts_dir, font_family)?);
    doc.set_title("Purchase Request");
    doc.set_paper_size(PaperSize::A4);
    doc.set_font_size(BODY_SIZE);
    doc.push(FixedPage {
        items: layout.items,
    });

    let mut out_file = File::create(path)
        .map_err(|e| Error::new(format!("Failed to create {}", path.display()), e))?;
    doc.render(&mut out_file)
}
