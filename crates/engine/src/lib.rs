//! `listino-engine` — Pricing-matrix engine.
//!
//! Pure crate: receives a cell grid snapshot, returns normalized price rows.
//! No file or CLI dependencies.

pub mod grid;
pub mod matrix;

pub use grid::{CellValue, Grid};
pub use matrix::{parse, MatrixError, PriceRow};
