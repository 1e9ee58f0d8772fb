use crate::{encode::CsvDocument, table};

/// Renders the first `limit` data rows of `document` as an aligned table.
///
/// Cells come from the projected rows rather than the encoded text, so quoted
/// commas stay inside their cell and rows whose cells are all empty still show.
pub fn render_preview(document: &CsvDocument, limit: Option<usize>) -> String {
    let cells = document.cells();
    let shown = limit.map_or(cells.len(), |limit| limit.min(cells.len()));
    table::render_table(document.columns(), &cells[..shown])
}
