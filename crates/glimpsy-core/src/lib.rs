//! # Glimpsy Core
//!
//! Core data model for the Glimpsy dataset exploration toolkit.
//!
//! A dataset is an ordered sequence of rows sharing one column set. Each
//! row maps a column name to a scalar [`Value`]. Everything downstream
//! (classification, filtering, aggregation, comparison) is a pure function
//! over these types.
//!
//! - [`Value`]: a single cell (null, bool, number or text)
//! - [`Row`]: one record, keyed by column name
//! - [`Dataset`]: ordered rows plus ordered column names
//! - [`DatasetRecord`]: the JSON shape served by the dataset API
//!
//! ## Example
//!
//! ```rust
//! use glimpsy_core::prelude::*;
//!
//! let rows = vec![
//!     Row::new().with("status", "Active").with("rate", 2.0),
//!     Row::new().with("status", "Matured").with("rate", 1.5),
//! ];
//! let dataset = Dataset::new(vec!["status".into(), "rate".into()], rows).unwrap();
//!
//! assert_eq!(dataset.row_count(), 2);
//! assert_eq!(dataset.numeric_values("rate"), vec![2.0, 1.5]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

pub mod dataset;
pub mod error;
pub mod row;
pub mod value;

pub use dataset::{Dataset, DatasetRecord};
pub use error::{CoreError, CoreResult};
pub use row::Row;
pub use value::{parse_date, parse_leading_number, parse_number, Value};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::dataset::{Dataset, DatasetRecord};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::row::Row;
    pub use crate::value::{parse_date, parse_leading_number, parse_number, Value};
}
