//! Game system traits.
//!
//! A game system names its stats and skills and hands out a sheet provider;
//! the provider describes the sheet layout and computes derived values from
//! a stored document. Callers never need to know which system they hold.

use crate::types::FieldMap;

// Re-export character sheet schema types for game system implementations
pub use crate::character_sheet::{
    CharacterSheetSchema, FieldDefinition, SchemaFieldType, SchemaSection, SchemaSelectOption,
    SectionType,
};

/// Core trait all game systems must implement.
pub trait GameSystem: Send + Sync {
    /// Unique identifier for this game system (e.g., "aspects").
    fn system_id(&self) -> &str;

    /// Human-readable display name (e.g., "Aspects of Nature").
    fn display_name(&self) -> &str;

    /// List of stat names used by this system.
    fn stat_names(&self) -> &[&str];

    /// List of skill names used by this system.
    fn skill_names(&self) -> &[&str];

    /// The sheet layout and derivation rules.
    fn sheet(&self) -> &dyn CharacterSheetProvider;
}

/// Sheet layout and derived values for a game system.
pub trait CharacterSheetProvider: Send + Sync {
    /// Generate the character sheet schema for this game system.
    fn character_sheet_schema(&self) -> CharacterSheetSchema;

    /// Calculate derived values from a stored document.
    ///
    /// Must be pure: the same document always yields the same values, and
    /// nothing is written back.
    fn calculate_derived_values(&self, values: &FieldMap) -> FieldMap;

    /// Values a brand-new sheet starts with.
    fn default_values(&self) -> FieldMap {
        self.character_sheet_schema().default_values()
    }
}
