mod attribute_filter;
mod config;
pub mod delta;
pub mod error;
mod fragment;
pub mod literal;
mod query;
mod type_filter;

pub use attribute_filter::AttributeFilter;
pub use config::{SparqlConfig, DEFAULT_RESOURCE_VARIABLE, DEFAULT_TYPE_VARIABLE_SUFFIX};
pub use fragment::SparqlFragment;
pub use query::InstanceQuery;
pub use type_filter::{embedded_type_for, TypeFilter};

pub type Result<T> = std::result::Result<T, error::SparqlCompileError>;

#[cfg(test)]
mod test_utils;
