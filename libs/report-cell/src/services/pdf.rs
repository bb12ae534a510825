// libs/report-cell/src/services/pdf.rs
use std::io::BufWriter;

use chrono::{DateTime, Utc};
use printpdf::*;

use crate::models::{ReportError, ReportRow};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const LEFT_MARGIN: f32 = 20.0;
const TOP: f32 = 280.0;
const BOTTOM_MARGIN: f32 = 20.0;
const LINE_HEIGHT: f32 = 6.0;
const ROW_GAP: f32 = 5.0;
const FIRST_ROW_TOP: f32 = TOP - 24.0;

/// Where a row starts: page index (0-based) and the y position of its first line.
#[derive(Debug, Clone, Copy, PartialEq)]
struct RowPlacement {
    page: usize,
    top: f32,
}

/// Lays out `count` rows below the header, breaking to a new page whenever the
/// next row would cross the bottom margin.
fn layout_rows(count: usize) -> Vec<RowPlacement> {
    let row_height = LINE_HEIGHT * 5.0 + ROW_GAP;
    let mut page = 0;
    let mut y = FIRST_ROW_TOP;

    (0..count)
        .map(|_| {
            if y - row_height < BOTTOM_MARGIN {
                page += 1;
                y = TOP;
            }
            let placement = RowPlacement { page, top: y };
            y -= row_height;
            placement
        })
        .collect()
}

/// Renders the appointments report as an A4 PDF and returns its bytes.
pub fn render_appointments_pdf(
    rows: &[ReportRow],
    generated_at: DateTime<Utc>,
) -> Result<Vec<u8>, ReportError> {
    let (doc, page1, layer1) = PdfDocument::new(
        "Clinic Appointments Report", Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1",
    );
    let mut layer = doc.get_page(page1).get_layer(layer1);
    let font = doc.add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ReportError::Render(format!("PDF font error: {e}")))?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ReportError::Render(format!("PDF font error: {e}")))?;

    // Header
    layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.467, 0.714, None)));
    layer.use_text("HealthCare Clinic", 24.0, Mm(LEFT_MARGIN), Mm(TOP), &bold);
    layer.set_fill_color(Color::Rgb(Rgb::new(0.267, 0.267, 0.267, None)));
    layer.use_text("Clinic Appointments Report", 14.0, Mm(LEFT_MARGIN), Mm(TOP - 10.0), &font);
    layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));

    let mut current_page = 0;
    for (index, (row, placement)) in rows.iter().zip(layout_rows(rows.len())).enumerate() {
        if placement.page != current_page {
            let (page, page_layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            layer = doc.get_page(page).get_layer(page_layer);
            layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
            current_page = placement.page;
        }

        let mut y = Mm(placement.top);
        for line in row.lines(index + 1) {
            layer.use_text(line, 12.0, Mm(LEFT_MARGIN), y, &font);
            y -= Mm(LINE_HEIGHT);
        }
    }

    // Footer on the last page, below the bottom margin
    layer.set_fill_color(Color::Rgb(Rgb::new(0.333, 0.333, 0.333, None)));
    layer.use_text(
        format!("Generated on {}", generated_at.format("%Y-%m-%d %H:%M:%S UTC")),
        10.0,
        Mm(LEFT_MARGIN),
        Mm(12.0),
        &font,
    );

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| ReportError::Render(format!("PDF save error: {e}")))?;
    buf.into_inner()
        .map_err(|e| ReportError::Render(format!("PDF buffer error: {e}")))
}
