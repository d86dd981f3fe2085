//! Filtering: descriptors, templates, the engine and wire-form requests.
//!
//! - [`templates`] turns a classified dataset into the controls a UI offers
//! - [`descriptor`] holds the constraints those controls produce
//! - [`engine`] evaluates a [`FilterSet`] against rows
//! - [`request`] converts the dataset service's JSON filter object

pub mod descriptor;
pub mod engine;
pub mod request;
pub mod templates;

pub use descriptor::{
    Constraint, DateRange, FilterDescriptor, NumericBounds, Selection, ALL_SENTINEL,
};
pub use engine::{apply_filters, filter_dataset, FilterSet};
pub use request::FilterRequest;
pub use templates::{
    build_templates, categorical_template, date_range_template, numerical_template,
    CategoricalTemplate, DateRangeTemplate, FilterTemplates, NumericalTemplate,
};
