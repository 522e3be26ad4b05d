//! Shared vocabulary types.

mod field_value;

pub use field_value::{FieldMap, FieldValue};
