//! `listino-recon` — Client/partner price reconciliation and margin engine.
//!
//! Pure engine crate: receives parsed price tables, returns a reconciled
//! table plus margin totals. No CLI or IO dependencies.

pub mod config;
pub mod engine;
pub mod error;
pub mod join;
pub mod margin;
pub mod model;
pub mod overrides;

pub use config::ComputeConfig;
pub use engine::{packages, run, ReconInput};
pub use error::ReconError;
pub use model::{MarginReport, ReconResult, ReconRow};
pub use overrides::OverrideSource;
