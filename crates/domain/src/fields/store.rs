//! The read/write seam between stored sheet data and typed field access.

use std::cell::RefCell;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{FieldMap, FieldValue};

/// A flat key/value store that resolvers read from and write through.
///
/// Reads observe a fixed snapshot. `update_value` always receives the
/// complete new value for `id` and never changes what `value` returns during
/// the same pass.
pub trait FieldStore {
    fn value(&self, id: &str) -> Option<&FieldValue>;

    fn update_value(&self, id: &str, value: FieldValue);
}

/// Destination for writes issued through a [`FieldContext`].
pub trait FieldWriter {
    fn write(&self, id: &str, value: FieldValue);
}

/// Root store over a character's document.
pub struct FieldContext<'a> {
    values: &'a FieldMap,
    writer: &'a dyn FieldWriter,
}

impl<'a> FieldContext<'a> {
    pub fn new(values: &'a FieldMap, writer: &'a dyn FieldWriter) -> Self {
        Self { values, writer }
    }

    pub fn values(&self) -> &'a FieldMap {
        self.values
    }
}

impl FieldStore for FieldContext<'_> {
    fn value(&self, id: &str) -> Option<&FieldValue> {
        self.values.get(id)
    }

    fn update_value(&self, id: &str, value: FieldValue) {
        tracing::trace!(field_id = %id, "Field write issued");
        self.writer.write(id, value);
    }
}

impl fmt::Debug for FieldContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldContext")
            .field("values", &self.values)
            .finish_non_exhaustive()
    }
}

/// A single recorded write: the full new value for one field id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldPatch {
    pub field_id: String,
    pub value: FieldValue,
}

impl FieldPatch {
    /// The patch as a partial document, `{ field_id: value }`.
    pub fn into_partial(self) -> FieldMap {
        FieldMap::from([(self.field_id, self.value)])
    }
}

/// Writer that records every write in call order.
///
/// Used for one edit pass; the recorded patches are handed to persistence
/// afterwards.
#[derive(Debug, Default)]
pub struct PatchBuffer {
    patches: RefCell<Vec<FieldPatch>>,
}

impl PatchBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.patches.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.patches.borrow().is_empty()
    }

    /// Drain the recorded patches, leaving the buffer empty.
    pub fn take(&self) -> Vec<FieldPatch> {
        self.patches.take()
    }

    pub fn into_patches(self) -> Vec<FieldPatch> {
        self.patches.into_inner()
    }
}

impl FieldWriter for PatchBuffer {
    fn write(&self, id: &str, value: FieldValue) {
        self.patches.borrow_mut().push(FieldPatch {
            field_id: id.to_string(),
            value,
        });
    }
}

/// Writer for read-only derivation passes.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardWrites;

impl FieldWriter for DiscardWrites {
    fn write(&self, id: &str, _value: FieldValue) {
        tracing::debug!(field_id = %id, "Discarding write in read-only pass");
    }
}
