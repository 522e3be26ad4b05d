//! Aspects of Nature sheet domain.
//!
//! Typed field resolution over loosely-typed character documents, and the
//! game rules that turn those fields into scores. Everything here is pure
//! and synchronous; persistence lives in the engine.

pub mod character;
pub mod character_sheet;
pub mod error;
pub mod fields;
pub mod game_systems;
pub mod ids;
pub mod types;

pub use character::CharacterRecord;
pub use error::DomainError;

// Re-export field resolution
pub use fields::{
    resolve_boolean_field, resolve_list_field, resolve_number_field, resolve_select_field,
    resolve_text_field, BooleanFieldOptions, DiscardWrites, FieldContext, FieldPatch, FieldStore,
    FieldWriter, ListItemContext, NumberFieldOptions, PatchBuffer, ResolvedBooleanField,
    ResolvedField, ResolvedListField, ResolvedNumberField, ResolvedSelectField, ResolvedTextField,
    SelectFieldOptions, TextFieldOptions,
};

// Re-export game system traits and types
pub use game_systems::{
    AspectsOfNatureSystem, CharacterSheetProvider, GameSystem, GameSystemRegistry,
    CLASSIC_SYSTEM_ID, STANDARD_SYSTEM_ID,
};
pub use game_systems::aspects::model::{CharacterModel, DerivedStats};
pub use game_systems::aspects::stress::SheetLayout;

// Re-export character sheet schema types
pub use character_sheet::{
    CharacterSheetSchema, FieldDefinition, SchemaFieldType, SchemaSection, SchemaSelectOption,
    SectionType,
};

// Re-export ID types
pub use ids::{CharacterId, RoomId};

pub use types::{FieldMap, FieldValue};
