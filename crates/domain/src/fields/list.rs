//! List-valued fields and item-scoped stores.
//!
//! A list field holds an ordered array of flat item documents. Each item can
//! be addressed through a [`ListItemContext`], itself a [`FieldStore`], so the
//! ordinary resolvers work unchanged inside list items. Every structural
//! change is expressed as a whole-array replacement written to the parent.
//! Entries that are not objects read as empty items but are written back
//! as stored.

use crate::fields::store::FieldStore;
use crate::types::{FieldMap, FieldValue};

static EMPTY_ITEM: FieldMap = FieldMap::new();

/// An array-valued field resolved into item documents.
pub struct ResolvedListField<'a> {
    id: String,
    entries: Vec<FieldValue>,
    items: Vec<FieldMap>,
    context: &'a dyn FieldStore,
}

/// Resolve `id` as a list. Missing or non-list values resolve to an empty
/// list; non-object entries resolve as empty items.
pub fn resolve_list_field<'a>(context: &'a dyn FieldStore, id: &str) -> ResolvedListField<'a> {
    let entries: Vec<FieldValue> = context
        .value(id)
        .and_then(FieldValue::as_list)
        .map(<[FieldValue]>::to_vec)
        .unwrap_or_default();
    let items = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| match entry.as_object() {
            Some(item) => item.clone(),
            None => {
                tracing::debug!(list_id = %id, index, "Reading non-object entry as empty item");
                FieldMap::new()
            }
        })
        .collect();

    ResolvedListField {
        id: id.to_string(),
        entries,
        items,
        context,
    }
}

impl<'a> ResolvedListField<'a> {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn items(&self) -> &[FieldMap] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Replace the whole list.
    pub fn set_items(&self, items: Vec<FieldMap>) {
        self.write_entries(items.into_iter().map(FieldValue::Object).collect());
    }

    fn write_entries(&self, entries: Vec<FieldValue>) {
        self.context.update_value(&self.id, FieldValue::List(entries));
    }

    /// Store scoped to the item at `index`. An index past the end resolves
    /// against an empty item.
    pub fn item_context(&self, index: usize) -> ListItemContext<'_> {
        ListItemContext {
            item: self.items.get(index).unwrap_or(&EMPTY_ITEM),
            list: self,
            index,
        }
    }

    /// Scoped stores for every item, in display order.
    pub fn item_contexts(&self) -> impl Iterator<Item = ListItemContext<'_>> + '_ {
        (0..self.items.len()).map(move |index| self.item_context(index))
    }

    /// Append a fresh empty item.
    pub fn add_item(&self) {
        let mut entries = self.entries.clone();
        entries.push(FieldValue::Object(FieldMap::new()));
        self.write_entries(entries);
    }

    pub fn remove_item(&self, index: usize) {
        if index >= self.items.len() {
            tracing::debug!(list_id = %self.id, index, "Ignoring removal past end of list");
            return;
        }
        let mut entries = self.entries.clone();
        entries.remove(index);
        self.write_entries(entries);
    }

    /// Insert a shallow copy of the item at `index` right after it.
    pub fn duplicate_item(&self, index: usize) {
        let Some(entry) = self.entries.get(index) else {
            tracing::debug!(list_id = %self.id, index, "Ignoring duplicate past end of list");
            return;
        };
        let mut entries = self.entries.clone();
        entries.insert(index + 1, entry.clone());
        self.write_entries(entries);
    }
}

/// A [`FieldStore`] over one list item.
///
/// Writes rebuild the item and the list around it and hand the new array to
/// the parent list; neither the original item nor the original array is
/// touched. Sibling entries are copied as stored.
pub struct ListItemContext<'a> {
    item: &'a FieldMap,
    list: &'a ResolvedListField<'a>,
    index: usize,
}

impl ListItemContext<'_> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn item(&self) -> &FieldMap {
        self.item
    }
}

impl FieldStore for ListItemContext<'_> {
    fn value(&self, id: &str) -> Option<&FieldValue> {
        self.item.get(id)
    }

    fn update_value(&self, id: &str, value: FieldValue) {
        if self.index >= self.list.items.len() {
            tracing::warn!(
                list_id = %self.list.id,
                index = self.index,
                field_id = %id,
                "Dropping write to list item past end of list"
            );
            return;
        }
        let mut item = self.item.clone();
        item.insert(id.to_string(), value);

        let mut entries = self.list.entries.clone();
        entries[self.index] = FieldValue::Object(item);
        self.list.write_entries(entries);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::resolve::{
        resolve_number_field, resolve_text_field, NumberFieldOptions, TextFieldOptions,
    };
    use crate::fields::store::{FieldContext, PatchBuffer};

    fn item(entries: &[(&str, FieldValue)]) -> FieldValue {
        FieldValue::Object(
            entries
                .iter()
                .map(|(key, value)| (key.to_string(), value.clone()))
                .collect(),
        )
    }

    fn bonds_doc() -> FieldMap {
        FieldMap::from([(
            "bonds".to_string(),
            FieldValue::List(vec![
                item(&[("name", FieldValue::from("Mira")), ("strength", FieldValue::from(2))]),
                item(&[("name", FieldValue::from("Oren")), ("strength", FieldValue::from(-1))]),
            ]),
        )])
    }

    fn written_items(buffer: &PatchBuffer) -> Vec<FieldValue> {
        let patches = buffer.take();
        assert_eq!(patches.len(), 1);
        assert_eq!(patches[0].field_id, "bonds");
        patches[0].value.as_list().map(<[FieldValue]>::to_vec).unwrap_or_default()
    }

    #[test]
    fn missing_or_malformed_lists_are_empty() {
        let values = FieldMap::from([
            ("text".to_string(), FieldValue::from("nope")),
            ("mixed".to_string(), FieldValue::List(vec![FieldValue::from(3)])),
        ]);
        let buffer = PatchBuffer::new();
        let ctx = FieldContext::new(&values, &buffer);

        assert!(resolve_list_field(&ctx, "missing").is_empty());
        assert!(resolve_list_field(&ctx, "text").is_empty());

        let mixed = resolve_list_field(&ctx, "mixed");
        assert_eq!(mixed.len(), 1);
        assert!(mixed.items()[0].is_empty());
    }

    #[test]
    fn non_object_entries_survive_sibling_writes() {
        let values = FieldMap::from([(
            "bonds".to_string(),
            FieldValue::List(vec![
                item(&[("name", FieldValue::from("Mira"))]),
                FieldValue::from("loose note"),
            ]),
        )]);
        let buffer = PatchBuffer::new();
        let ctx = FieldContext::new(&values, &buffer);
        let bonds = resolve_list_field(&ctx, "bonds");

        resolve_number_field(&bonds.item_context(0), &NumberFieldOptions::new("strength"))
            .set(2.0);
        let items = written_items(&buffer);
        assert_eq!(items[1], FieldValue::from("loose note"));
        assert_eq!(
            items[0].as_object().and_then(|i| i.get("strength")),
            Some(&FieldValue::from(2))
        );

        bonds.add_item();
        let added = written_items(&buffer);
        assert_eq!(added.len(), 3);
        assert_eq!(added[1], FieldValue::from("loose note"));
    }

    #[test]
    fn item_write_replaces_only_that_item() {
        let values = bonds_doc();
        let buffer = PatchBuffer::new();
        let ctx = FieldContext::new(&values, &buffer);
        let bonds = resolve_list_field(&ctx, "bonds");

        let second = bonds.item_context(1);
        resolve_text_field(&second, &TextFieldOptions::new("name")).set("Oren the Bold");

        let items = written_items(&buffer);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], bonds_doc()["bonds"].as_list().unwrap()[0]);
        assert_eq!(
            items[1].as_object().and_then(|i| i.get("name")),
            Some(&FieldValue::from("Oren the Bold"))
        );
        assert_eq!(
            items[1].as_object().and_then(|i| i.get("strength")),
            Some(&FieldValue::from(-1))
        );
        // Snapshot untouched.
        assert_eq!(bonds.items()[1].get("name"), Some(&FieldValue::from("Oren")));
    }

    #[test]
    fn out_of_range_item_reads_empty_and_drops_writes() {
        let values = bonds_doc();
        let buffer = PatchBuffer::new();
        let ctx = FieldContext::new(&values, &buffer);
        let bonds = resolve_list_field(&ctx, "bonds");

        let ghost = bonds.item_context(7);
        let strength = resolve_number_field(&ghost, &NumberFieldOptions::new("strength").min(-3.0));
        assert_eq!(strength.value(), 0.0);

        strength.set(2.0);
        assert!(buffer.is_empty());
    }

    #[test]
    fn structural_operations_preserve_order() {
        let values = bonds_doc();
        let buffer = PatchBuffer::new();
        let ctx = FieldContext::new(&values, &buffer);
        let bonds = resolve_list_field(&ctx, "bonds");

        bonds.add_item();
        let added = written_items(&buffer);
        assert_eq!(added.len(), 3);
        assert_eq!(added[2], FieldValue::Object(FieldMap::new()));

        bonds.duplicate_item(0);
        let duplicated = written_items(&buffer);
        assert_eq!(duplicated.len(), 3);
        assert_eq!(duplicated[0], duplicated[1]);
        assert_eq!(
            duplicated[2].as_object().and_then(|i| i.get("name")),
            Some(&FieldValue::from("Oren"))
        );

        bonds.remove_item(0);
        let removed = written_items(&buffer);
        assert_eq!(removed.len(), 1);
        assert_eq!(
            removed[0].as_object().and_then(|i| i.get("name")),
            Some(&FieldValue::from("Oren"))
        );
    }

    #[test]
    fn out_of_range_structural_operations_do_not_write() {
        let values = bonds_doc();
        let buffer = PatchBuffer::new();
        let ctx = FieldContext::new(&values, &buffer);
        let bonds = resolve_list_field(&ctx, "bonds");

        bonds.remove_item(2);
        bonds.duplicate_item(5);
        assert!(buffer.is_empty());
    }

    #[test]
    fn item_contexts_follow_display_order() {
        let values = bonds_doc();
        let buffer = PatchBuffer::new();
        let ctx = FieldContext::new(&values, &buffer);
        let bonds = resolve_list_field(&ctx, "bonds");

        let names: Vec<String> = bonds
            .item_contexts()
            .map(|item| {
                resolve_text_field(&item, &TextFieldOptions::new("name"))
                    .value()
                    .to_string()
            })
            .collect();
        assert_eq!(names, vec!["Mira", "Oren"]);
    }
}
