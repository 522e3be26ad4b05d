//! Character Sheet Schema Types
//!
//! A schema describes a sheet layout as sections of typed field definitions.
//! Presentation renders it without game knowledge, and the same definitions
//! resolve against a [`FieldStore`] through the generic resolvers, so one set
//! of resolvers backs any layout.

use serde::{Deserialize, Serialize};

use crate::fields::{
    resolve_boolean_field, resolve_list_field, resolve_number_field, resolve_select_field,
    resolve_text_field, BooleanFieldOptions, FieldStore, NumberFieldOptions, ResolvedField,
    ResolvedListField, SelectFieldOptions, TextFieldOptions,
};
use crate::types::{FieldMap, FieldValue};

// =============================================================================
// Character Sheet Schema
// =============================================================================

/// Complete schema for rendering a character sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterSheetSchema {
    /// Game system ID (e.g., "aspects")
    pub system_id: String,
    /// Human-readable system name
    pub system_name: String,
    /// Ordered list of sections to display
    pub sections: Vec<SchemaSection>,
}

impl CharacterSheetSchema {
    /// Every top-level field definition, in display order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.sections.iter().flat_map(|section| section.fields.iter())
    }

    pub fn field(&self, id: &str) -> Option<&FieldDefinition> {
        self.fields().find(|field| field.id == id)
    }

    /// Defaults for every field that declares one.
    pub fn default_values(&self) -> FieldMap {
        self.fields()
            .filter_map(|field| {
                field
                    .field_type
                    .default_value()
                    .map(|value| (field.id.clone(), value))
            })
            .collect()
    }
}

/// A section of the character sheet (e.g., "Attributes", "Bonds").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaSection {
    /// Unique section identifier
    pub id: String,
    /// Display label for the section header
    pub label: String,
    /// Type of section (affects layout)
    pub section_type: SectionType,
    /// Fields within this section
    pub fields: Vec<FieldDefinition>,
    /// Help text for the section
    #[serde(default)]
    pub description: Option<String>,
}

/// Type of section, affects rendering layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionType {
    /// Character info (name, persona, lineage)
    Identity,
    /// Attribute scores (grid layout)
    Attributes,
    /// Elemental aspect scores
    Aspects,
    /// Skill point allocation
    Skills,
    /// Stress pools and conditions
    Resources,
    /// Milestones and other advancement
    Advancement,
    /// Bonds with other characters
    Relationships,
    /// Free-form section
    Custom,
    /// Unknown for forward compatibility
    #[serde(other)]
    Unknown,
}

// =============================================================================
// Field Definitions
// =============================================================================

/// Definition of a single field in the character sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    /// Field id in the stored document (or item key inside a list)
    pub id: String,
    /// Display label
    pub label: String,
    /// Field data type and rendering hints
    pub field_type: SchemaFieldType,
    /// Whether this field can be edited by players
    #[serde(default = "default_true")]
    pub editable: bool,
    /// Help text / tooltip
    #[serde(default)]
    pub description: Option<String>,
}

fn default_true() -> bool {
    true
}

impl FieldDefinition {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        field_type: SchemaFieldType,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            field_type,
            editable: true,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn read_only(mut self) -> Self {
        self.editable = false;
        self
    }

    /// Resolve a scalar definition against `store`.
    ///
    /// Returns `None` for list and unknown field types.
    pub fn resolve<'a>(&self, store: &'a dyn FieldStore) -> Option<ResolvedField<'a>> {
        let resolved = match &self.field_type {
            SchemaFieldType::Text { default, .. } => {
                let mut options = TextFieldOptions::new(&self.id);
                options.default_value = default.clone();
                resolve_text_field(store, &options).into()
            }
            SchemaFieldType::Number { min, max, default } => {
                let mut options = NumberFieldOptions::new(&self.id);
                options.default_value = *default;
                if let Some(min) = min {
                    options.min = *min;
                }
                if let Some(max) = max {
                    options.max = *max;
                }
                resolve_number_field(store, &options).into()
            }
            SchemaFieldType::Select { options: choices, default } => {
                let mut options = SelectFieldOptions::new(&self.id, choices.clone());
                options.default_value = default.clone();
                resolve_select_field(store, &options).into()
            }
            SchemaFieldType::Boolean { default } => {
                let options = BooleanFieldOptions::new(&self.id).default_value(*default);
                resolve_boolean_field(store, &options).into()
            }
            SchemaFieldType::List { .. } | SchemaFieldType::Unknown => return None,
        };
        Some(resolved)
    }

    /// Resolve a list definition against `store`.
    pub fn resolve_list<'a>(&self, store: &'a dyn FieldStore) -> Option<ResolvedListField<'a>> {
        match self.field_type {
            SchemaFieldType::List { .. } => Some(resolve_list_field(store, &self.id)),
            _ => None,
        }
    }
}

/// Type of field data and how to render it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum SchemaFieldType {
    /// Plain text input
    Text {
        #[serde(default)]
        multiline: bool,
        #[serde(default)]
        default: Option<String>,
    },
    /// Number input; unbounded sides are `None`
    Number {
        #[serde(default)]
        min: Option<f64>,
        #[serde(default)]
        max: Option<f64>,
        #[serde(default)]
        default: Option<f64>,
    },
    /// Selection from options
    Select {
        options: Vec<SchemaSelectOption>,
        #[serde(default)]
        default: Option<String>,
    },
    /// Boolean checkbox
    Boolean {
        #[serde(default)]
        default: bool,
    },
    /// Ordered list of items, each with its own fields
    List { item_fields: Vec<FieldDefinition> },
    /// Unknown for forward compatibility
    #[serde(other)]
    Unknown,
}

impl SchemaFieldType {
    pub fn text() -> Self {
        Self::Text {
            multiline: false,
            default: None,
        }
    }

    pub fn multiline_text() -> Self {
        Self::Text {
            multiline: true,
            default: None,
        }
    }

    pub fn number(min: Option<f64>, max: Option<f64>) -> Self {
        Self::Number {
            min,
            max,
            default: None,
        }
    }

    pub fn select(options: Vec<SchemaSelectOption>) -> Self {
        Self::Select {
            options,
            default: None,
        }
    }

    /// Value a new sheet starts with, when the type declares one.
    pub fn default_value(&self) -> Option<FieldValue> {
        match self {
            Self::Text { default, .. } => default.clone().map(FieldValue::String),
            Self::Number { default, min, .. } => default.or(*min).map(FieldValue::Number),
            Self::Select { default, .. } => default.clone().map(FieldValue::String),
            Self::Boolean { default } => Some(FieldValue::Bool(*default)),
            Self::List { .. } => Some(FieldValue::List(Vec::new())),
            Self::Unknown => None,
        }
    }
}

/// Option for select fields; also the choice type the select resolver uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaSelectOption {
    /// Internal value
    pub value: String,
    /// Display label
    pub label: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
}

impl SchemaSelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

// =============================================================================
// Tests
// =============================================================================
