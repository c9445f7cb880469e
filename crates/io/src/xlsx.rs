// Excel price-list import (xlsx, xls, xlsb, ods)
//
// One-way conversion of the first worksheet into the engine's cell grid.
// The matrix parser downstream decides what the cells mean.

use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Range, Reader};
use listino_engine::{CellValue, Grid};

pub fn import_grid(path: &Path) -> Result<Grid, String> {
    let mut workbook = open_workbook_auto(path).map_err(|e| e.to_string())?;
    first_sheet_grid(
        workbook
            .worksheet_range_at(0)
            .ok_or_else(|| "workbook has no sheets".to_string())?
            .map_err(|e| e.to_string())?,
    )
}

pub fn import_grid_bytes(bytes: &[u8]) -> Result<Grid, String> {
    let cursor = Cursor::new(bytes.to_vec());
    let mut workbook = open_workbook_auto_from_rs(cursor).map_err(|e| e.to_string())?;
    first_sheet_grid(
        workbook
            .worksheet_range_at(0)
            .ok_or_else(|| "workbook has no sheets".to_string())?
            .map_err(|e| e.to_string())?,
    )
}

fn first_sheet_grid(range: Range<Data>) -> Result<Grid, String> {
    // calamine ranges start at the first used cell, not at A1; re-anchor so
    // absolute column positions (the label column) survive the import.
    let Some((start_row, start_col)) = range.start() else {
        return Ok(Grid::default());
    };
    let mut rows: Vec<Vec<CellValue>> = vec![Vec::new(); start_row as usize];
    for row in range.rows() {
        let mut cells = vec![CellValue::Empty; start_col as usize];
        cells.extend(row.iter().map(convert_cell));
        rows.push(cells);
    }
    Ok(Grid::new(rows))
}

fn convert_cell(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        // Serial date numbers are meaningless to the matrix parser but keep
        // the cell numeric rather than silently blank.
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(_) => CellValue::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    /// Canonical template fixture written with the export stack, so import
    /// and export stay agreed on what the template looks like.
    fn template_bytes() -> Vec<u8> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet
            .write_string(0, 1, "Installazione Wallbox 7,4 kW monofase")
            .unwrap();
        sheet.write_string(0, 2, "2 mt. dal contatore").unwrap();
        sheet.write_string(0, 3, "4 mt. dal contatore").unwrap();
        sheet.write_string(1, 1, "Item 1: posa cavo").unwrap();
        sheet.write_number(1, 2, 100.0).unwrap();
        sheet.write_number(1, 3, 120.0).unwrap();
        sheet.write_string(2, 1, "Item 1.a: scavo").unwrap();
        sheet.write_number(2, 2, 30.0).unwrap();
        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn import_first_sheet_as_grid() {
        let grid = import_grid_bytes(&template_bytes()).unwrap();
        assert_eq!(
            grid.value(0, 1).as_text(),
            Some("Installazione Wallbox 7,4 kW monofase")
        );
        assert_eq!(grid.value(1, 2).to_number(), Some(100.0));
    }

    #[test]
    fn fixture_round_trip_reproduces_tuples() {
        let grid = import_grid_bytes(&template_bytes()).unwrap();
        let rows = listino_engine::parse(&grid).unwrap();
        let tuples: Vec<(&str, &str, &str, f64)> = rows
            .iter()
            .map(|r| (r.block.as_str(), r.distance.as_str(), r.item_id.as_str(), r.price))
            .collect();
        assert_eq!(
            tuples,
            vec![
                (
                    "Installazione Wallbox 7,4 kW monofase",
                    "2 mt. dal contatore",
                    "1",
                    100.0
                ),
                (
                    "Installazione Wallbox 7,4 kW monofase",
                    "4 mt. dal contatore",
                    "1",
                    120.0
                ),
                (
                    "Installazione Wallbox 7,4 kW monofase",
                    "2 mt. dal contatore",
                    "1.a",
                    30.0
                ),
            ]
        );
    }

    #[test]
    fn import_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("template.xlsx");
        std::fs::write(&path, template_bytes()).unwrap();
        let grid = import_grid(&path).unwrap();
        assert!(grid.n_rows() >= 3);
    }

    #[test]
    fn garbage_bytes_rejected() {
        assert!(import_grid_bytes(b"not a workbook").is_err());
    }
}
