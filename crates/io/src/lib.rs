//! `listino-io` — File I/O for the pricing pipeline.
//!
//! XLSX price-list import (calamine), XLSX report export (rust_xlsxwriter),
//! encoding-tolerant text loading, the per-region partner store, and the
//! content-addressed parse cache.

pub mod cache;
pub mod report;
pub mod store;
pub mod text;
pub mod xlsx;
