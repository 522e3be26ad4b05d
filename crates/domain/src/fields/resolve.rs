//! Typed field resolution over a [`FieldStore`].
//!
//! Every resolver is a pure read: it never writes, never fails and always
//! produces a value. Stored data of the wrong shape falls back to the field's
//! default (and, for numbers, is clamped into range). Writing happens only
//! when a caller uses the handle on the resolved field.

use std::fmt;

use crate::character_sheet::SchemaSelectOption;
use crate::fields::store::FieldStore;
use crate::types::FieldValue;

/// Borrowed write handle carried by resolved fields.
///
/// Two handles always compare equal, so resolved fields compare on their
/// resolved data alone.
#[derive(Clone, Copy)]
pub struct StoreHandle<'a>(&'a dyn FieldStore);

impl<'a> StoreHandle<'a> {
    pub fn new(store: &'a dyn FieldStore) -> Self {
        Self(store)
    }

    pub fn store(&self) -> &'a dyn FieldStore {
        self.0
    }

    fn write(&self, id: &str, value: FieldValue) {
        self.0.update_value(id, value);
    }
}

impl fmt::Debug for StoreHandle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StoreHandle")
    }
}

impl PartialEq for StoreHandle<'_> {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

/// Stored value for `id`, treating `Null` as missing.
fn stored<'s>(store: &'s dyn FieldStore, id: &str) -> Option<&'s FieldValue> {
    store.value(id).filter(|value| !value.is_null())
}

/// Clamp without panicking on inverted bounds.
pub(crate) fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

// =============================================================================
// Options
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct TextFieldOptions {
    pub id: String,
    pub default_value: Option<String>,
}

impl TextFieldOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            default_value: None,
        }
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumberFieldOptions {
    pub id: String,
    pub default_value: Option<f64>,
    pub min: f64,
    pub max: f64,
}

impl NumberFieldOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            default_value: None,
            min: 0.0,
            max: f64::INFINITY,
        }
    }

    pub fn default_value(mut self, value: f64) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = min;
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = max;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectFieldOptions {
    pub id: String,
    pub default_value: Option<String>,
    pub choices: Vec<SchemaSelectOption>,
}

impl SelectFieldOptions {
    pub fn new(id: impl Into<String>, choices: Vec<SchemaSelectOption>) -> Self {
        Self {
            id: id.into(),
            default_value: None,
            choices,
        }
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BooleanFieldOptions {
    pub id: String,
    pub default_value: bool,
}

impl BooleanFieldOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            default_value: false,
        }
    }

    pub fn default_value(mut self, value: bool) -> Self {
        self.default_value = value;
        self
    }
}

// =============================================================================
// Resolved fields
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTextField<'a> {
    id: String,
    value: String,
    handle: StoreHandle<'a>,
}

impl ResolvedTextField<'_> {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set(&self, value: impl Into<String>) {
        self.handle.write(&self.id, FieldValue::String(value.into()));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedNumberField<'a> {
    id: String,
    value: f64,
    min: f64,
    max: f64,
    handle: StoreHandle<'a>,
}

impl ResolvedNumberField<'_> {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Always within `[min, max]`.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Value floored to an integer score (saturating at the `i32` range).
    pub fn as_int(&self) -> i32 {
        self.value.floor() as i32
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Write `value`, clamped into this field's range.
    pub fn set(&self, value: f64) {
        let value = if value.is_nan() { self.min } else { value };
        self.handle.write(
            &self.id,
            FieldValue::Number(clamp(value, self.min, self.max)),
        );
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSelectField<'a> {
    id: String,
    value: String,
    choices: Vec<SchemaSelectOption>,
    handle: StoreHandle<'a>,
}

impl ResolvedSelectField<'_> {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn choices(&self) -> &[SchemaSelectOption] {
        &self.choices
    }

    /// The choice matching the stored value.
    ///
    /// `None` when nothing is selected or when the stored value no longer
    /// appears in the choice list; callers show the raw value in that case.
    pub fn current_option(&self) -> Option<&SchemaSelectOption> {
        self.choices.iter().find(|choice| choice.value == self.value)
    }

    pub fn set(&self, value: impl Into<String>) {
        self.handle.write(&self.id, FieldValue::String(value.into()));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedBooleanField<'a> {
    id: String,
    value: bool,
    handle: StoreHandle<'a>,
}

impl ResolvedBooleanField<'_> {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn value(&self) -> bool {
        self.value
    }

    pub fn set(&self, value: bool) {
        self.handle.write(&self.id, FieldValue::Bool(value));
    }
}

/// Any scalar resolved field.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedField<'a> {
    Text(ResolvedTextField<'a>),
    Number(ResolvedNumberField<'a>),
    Select(ResolvedSelectField<'a>),
    Boolean(ResolvedBooleanField<'a>),
}

impl ResolvedField<'_> {
    pub fn id(&self) -> &str {
        match self {
            ResolvedField::Text(field) => field.id(),
            ResolvedField::Number(field) => field.id(),
            ResolvedField::Select(field) => field.id(),
            ResolvedField::Boolean(field) => field.id(),
        }
    }

    pub fn value(&self) -> FieldValue {
        match self {
            ResolvedField::Text(field) => FieldValue::from(field.value()),
            ResolvedField::Number(field) => FieldValue::Number(field.value()),
            ResolvedField::Select(field) => FieldValue::from(field.value()),
            ResolvedField::Boolean(field) => FieldValue::Bool(field.value()),
        }
    }

    /// Write a loosely-typed value through the field's own setter, so the
    /// kind's coercion (clamping, stringification) applies.
    pub fn write(&self, value: &FieldValue) {
        match self {
            ResolvedField::Text(field) => field.set(value.to_text()),
            ResolvedField::Number(field) => {
                field.set(value.as_number().unwrap_or(field.min()))
            }
            ResolvedField::Select(field) => field.set(value.to_text()),
            ResolvedField::Boolean(field) => field.set(value.is_truthy()),
        }
    }
}

impl<'a> From<ResolvedTextField<'a>> for ResolvedField<'a> {
    fn from(field: ResolvedTextField<'a>) -> Self {
        ResolvedField::Text(field)
    }
}

impl<'a> From<ResolvedNumberField<'a>> for ResolvedField<'a> {
    fn from(field: ResolvedNumberField<'a>) -> Self {
        ResolvedField::Number(field)
    }
}

impl<'a> From<ResolvedSelectField<'a>> for ResolvedField<'a> {
    fn from(field: ResolvedSelectField<'a>) -> Self {
        ResolvedField::Select(field)
    }
}

impl<'a> From<ResolvedBooleanField<'a>> for ResolvedField<'a> {
    fn from(field: ResolvedBooleanField<'a>) -> Self {
        ResolvedField::Boolean(field)
    }
}

// =============================================================================
// Resolvers
// =============================================================================

pub fn resolve_text_field<'a>(
    context: &'a dyn FieldStore,
    options: &TextFieldOptions,
) -> ResolvedTextField<'a> {
    let value = match stored(context, &options.id) {
        Some(value) => value.to_text(),
        None => options.default_value.clone().unwrap_or_default(),
    };
    ResolvedTextField {
        id: options.id.clone(),
        value,
        handle: StoreHandle::new(context),
    }
}

pub fn resolve_number_field<'a>(
    context: &'a dyn FieldStore,
    options: &NumberFieldOptions,
) -> ResolvedNumberField<'a> {
    let parsed = stored(context, &options.id).and_then(FieldValue::as_number);
    let value = parsed.or(options.default_value).unwrap_or(0.0);
    ResolvedNumberField {
        id: options.id.clone(),
        value: clamp(value, options.min, options.max),
        min: options.min,
        max: options.max,
        handle: StoreHandle::new(context),
    }
}

pub fn resolve_select_field<'a>(
    context: &'a dyn FieldStore,
    options: &SelectFieldOptions,
) -> ResolvedSelectField<'a> {
    let value = match stored(context, &options.id) {
        Some(value) => value.to_text(),
        None => options.default_value.clone().unwrap_or_default(),
    };
    ResolvedSelectField {
        id: options.id.clone(),
        value,
        choices: options.choices.clone(),
        handle: StoreHandle::new(context),
    }
}

pub fn resolve_boolean_field<'a>(
    context: &'a dyn FieldStore,
    options: &BooleanFieldOptions,
) -> ResolvedBooleanField<'a> {
    let value = stored(context, &options.id)
        .map(FieldValue::is_truthy)
        .unwrap_or(options.default_value);
    ResolvedBooleanField {
        id: options.id.clone(),
        value,
        handle: StoreHandle::new(context),
    }
}
