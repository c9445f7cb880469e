use serde::{Deserialize, Serialize};

/// A single scalar cell from an imported worksheet.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
}

impl CellValue {
    /// The cell's text content, if it holds a string.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Empty, or text that trims to nothing.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) => false,
        }
    }

    /// Coerce to a finite number. Text is trimmed and parsed; anything
    /// non-numeric or non-finite yields `None`.
    pub fn to_number(&self) -> Option<f64> {
        let n = match self {
            CellValue::Number(n) => *n,
            CellValue::Text(s) => s.trim().parse::<f64>().ok()?,
            CellValue::Empty => return None,
        };
        n.is_finite().then_some(n)
    }
}

/// Read-only snapshot of one worksheet: row-major cells, 0-based indices.
///
/// Rows may have different widths; out-of-range reads are `Empty`.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    rows: Vec<Vec<CellValue>>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<CellValue>>) -> Self {
        Self { rows }
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn value(&self, row: usize, col: usize) -> &CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }

    pub fn row(&self, row: usize) -> &[CellValue] {
        self.rows.get(row).map(|r| r.as_slice()).unwrap_or(&[])
    }

    /// True when every cell of the row is empty or whitespace-only.
    pub fn row_is_blank(&self, row: usize) -> bool {
        self.row(row).iter().all(CellValue::is_blank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> CellValue {
        CellValue::Text(s.into())
    }

    #[test]
    fn blank_detection() {
        assert!(CellValue::Empty.is_blank());
        assert!(t("   ").is_blank());
        assert!(!t("x").is_blank());
        assert!(!CellValue::Number(0.0).is_blank());
    }

    #[test]
    fn numeric_coercion() {
        assert_eq!(CellValue::Number(12.5).to_number(), Some(12.5));
        assert_eq!(t(" 100 ").to_number(), Some(100.0));
        assert_eq!(t("abc").to_number(), None);
        assert_eq!(t("inf").to_number(), None);
        assert_eq!(CellValue::Empty.to_number(), None);
    }

    #[test]
    fn out_of_range_reads_are_empty() {
        let grid = Grid::new(vec![vec![t("a")]]);
        assert_eq!(*grid.value(0, 5), CellValue::Empty);
        assert_eq!(*grid.value(3, 0), CellValue::Empty);
    }

    #[test]
    fn blank_row() {
        let grid = Grid::new(vec![
            vec![CellValue::Empty, t("  "), CellValue::Empty],
            vec![CellValue::Empty, t("x")],
        ]);
        assert!(grid.row_is_blank(0));
        assert!(!grid.row_is_blank(1));
        // A row past the end has no cells, hence no non-blank ones
        assert!(grid.row_is_blank(9));
    }
}
