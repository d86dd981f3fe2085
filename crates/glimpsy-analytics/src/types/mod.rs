//! Shared pipeline types.

mod column;
mod config;

pub use column::{ColumnClassification, ColumnKind, ColumnTypes};
pub use config::{DateMatch, PipelineConfig};
