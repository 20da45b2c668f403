//! Core contracts shared by the exemplar crates.
//!
//! This crate defines attribute values, type descriptors with explicit
//! ancestry, and the construction and persistence contracts a type must
//! satisfy before instances of it can be synthesized.

pub mod attributes;
pub mod error;
pub mod model;
pub mod types;
pub mod validation;
pub mod value;

pub use attributes::{AttributeName, Attributes};
pub use error::{Error, Result};
pub use model::{Model, Persist};
pub use types::{ClassMethodFn, TypeInfo, TypeKey};
pub use validation::validate_type_info;
pub use value::{RecordSnapshot, Value};
