//! `nvtable-recon` — Multi-source identifier table reconciliation engine.
//!
//! Pure engine crate: receives source bytes tagged with a dialect, returns the
//! merged table. No CLI or filesystem dependencies.

pub mod config;
pub mod dedup;
pub mod engine;
pub mod error;
pub mod extract;
pub mod group;
pub mod merge;
pub mod model;
pub mod render;
pub mod source;

pub use config::MergeConfig;
pub use engine::run;
pub use error::ReconError;
pub use extract::Dialect;
pub use model::{IdentifierGroup, MergeInput, MergeResult, RawRecord, SourceInput, Table};
