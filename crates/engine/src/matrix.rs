// Pricing-matrix scanner
//
// Recovers a relational table (block x distance x item -> price) from a grid
// whose layout carries meaning positionally: section header rows introduce an
// installation block plus its distance columns, "Item ..." rows below carry
// one price per distance column, and a fully blank row terminates the block.

use std::fmt;

use regex::Regex;
use serde::Serialize;

use crate::grid::{CellValue, Grid};

/// Column holding section titles and item labels (column B of the template).
const LABEL_COL: usize = 1;

/// Case-folded prefix that marks a section header row.
const SECTION_PREFIX: &str = "installazione";

/// One normalized price entry recovered from the matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceRow {
    /// Installation-type section label, e.g. "Installazione Wallbox 7,4 kW monofase".
    pub block: String,
    /// Distance-from-meter column label, e.g. "2 mt. dal contatore".
    pub distance: String,
    /// Dotted alphanumeric id: decimal integer, optional ".letter" suffix.
    pub item_id: String,
    /// Free text after the item label.
    pub item_desc: String,
    /// Original trimmed label-cell text, kept for display and audit.
    pub full_activity: String,
    pub price: f64,
}

#[derive(Debug)]
pub enum MatrixError {
    /// The grid produced zero recognizable item rows.
    NoRecognizedRows,
}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoRecognizedRows => write!(
                f,
                "no price rows recognized: the sheet does not match the pricing template \
                 (section rows starting with 'Installazione', item rows in column B)"
            ),
        }
    }
}

impl std::error::Error for MatrixError {}

/// Scan state threaded through the row fold. Both fields set together by a
/// section header, cleared together by a blank separator row.
#[derive(Debug, Default)]
struct ScanState {
    block: Option<String>,
    /// (column index, distance label) in encounter order.
    distances: Vec<(usize, String)>,
}

impl ScanState {
    fn activate(&mut self, block: String, distances: Vec<(usize, String)>) {
        self.block = Some(block);
        self.distances = distances;
    }

    fn reset(&mut self) {
        self.block = None;
        self.distances.clear();
    }
}

/// Parse the full grid in one forward scan.
///
/// Non-numeric price cells and rows matching neither pattern are skipped
/// silently; a grid yielding zero rows is a structural error.
pub fn parse(grid: &Grid) -> Result<Vec<PriceRow>, MatrixError> {
    let item_re = Regex::new(r"^\s*Item\s*([0-9]+(?:\.[a-zA-Z])?)\s*[:\-]?\s*(.*)$").unwrap();

    let mut out = Vec::new();
    let mut state = ScanState::default();

    for r in 0..grid.n_rows() {
        let label = grid.value(r, LABEL_COL);

        if let Some(text) = label.as_text() {
            let trimmed = text.trim();
            if trimmed.to_lowercase().starts_with(SECTION_PREFIX) {
                // Header row: distances sit on the same row, right of the label.
                let distances = collect_distances(grid.row(r));
                state.activate(trimmed.to_string(), distances);
                continue;
            }

            if state.block.is_some() {
                emit_item_rows(&item_re, &state, trimmed, grid.row(r), &mut out);
            }
        }

        // A fully blank separator row closes the active section. Checked after
        // item handling; header rows never reach here.
        if state.block.is_some() && grid.row_is_blank(r) {
            state.reset();
        }
    }

    if out.is_empty() {
        return Err(MatrixError::NoRecognizedRows);
    }
    Ok(out)
}

fn collect_distances(row: &[CellValue]) -> Vec<(usize, String)> {
    row.iter()
        .enumerate()
        .skip(LABEL_COL + 1)
        .filter_map(|(ci, cell)| {
            let text = cell.as_text()?.trim();
            (!text.is_empty()).then(|| (ci, text.to_string()))
        })
        .collect()
}

/// Emit one `PriceRow` per distance column that holds a coercible number.
fn emit_item_rows(
    item_re: &Regex,
    state: &ScanState,
    activity: &str,
    row: &[CellValue],
    out: &mut Vec<PriceRow>,
) {
    let Some(caps) = item_re.captures(activity) else {
        return;
    };
    let item_id = caps[1].trim().to_string();
    let item_desc = caps.get(2).map(|m| m.as_str().trim()).unwrap_or("").to_string();
    let block = state.block.as_deref().unwrap_or_default();

    for (ci, dist_label) in &state.distances {
        let Some(price) = row.get(*ci).and_then(CellValue::to_number) else {
            continue;
        };
        out.push(PriceRow {
            block: block.to_string(),
            distance: dist_label.clone(),
            item_id: item_id.clone(),
            item_desc: item_desc.clone(),
            full_activity: activity.to_string(),
            price,
        });
    }
}
