// Content-addressed parse memoization
//
// Parsing is a pure function of the raw bytes; the cache is an optional
// wrapper keyed on the blake3 hash of the input. Same bytes, same rows.
// Parse failures are never cached.

use std::collections::HashMap;
use std::sync::Arc;

use listino_engine::PriceRow;

use crate::xlsx;

/// Pure function: workbook bytes -> normalized price rows.
pub fn parse_bytes(bytes: &[u8]) -> Result<Vec<PriceRow>, String> {
    let grid = xlsx::import_grid_bytes(bytes)?;
    listino_engine::parse(&grid).map_err(|e| e.to_string())
}

#[derive(Debug, Default)]
pub struct ParseCache {
    entries: HashMap<[u8; 32], Arc<Vec<PriceRow>>>,
}

impl ParseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parsed rows for these bytes, reusing any previous identical input.
    pub fn rows(&mut self, bytes: &[u8]) -> Result<Arc<Vec<PriceRow>>, String> {
        let key = *blake3::hash(bytes).as_bytes();
        if let Some(rows) = self.entries.get(&key) {
            return Ok(Arc::clone(rows));
        }
        let rows = Arc::new(parse_bytes(bytes)?);
        self.entries.insert(key, Arc::clone(&rows));
        Ok(rows)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
