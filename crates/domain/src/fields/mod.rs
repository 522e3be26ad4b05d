//! Generic sheet field resolution.
//!
//! - `store`: the [`FieldStore`] seam and its writers
//! - `resolve`: text/number/select/boolean resolvers
//! - `list`: list fields and item-scoped stores

mod list;
mod resolve;
mod store;

pub use list::{resolve_list_field, ListItemContext, ResolvedListField};
pub use resolve::{
    resolve_boolean_field, resolve_number_field, resolve_select_field, resolve_text_field,
    BooleanFieldOptions, NumberFieldOptions, ResolvedBooleanField, ResolvedField,
    ResolvedNumberField, ResolvedSelectField, ResolvedTextField, SelectFieldOptions, StoreHandle,
    TextFieldOptions,
};
pub use store::{DiscardWrites, FieldContext, FieldPatch, FieldStore, FieldWriter, PatchBuffer};
