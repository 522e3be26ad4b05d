//! Character sheet use cases.
//!
//! Every edit follows the same path: load the record, resolve the target
//! field against a snapshot of its document, let the field's own setter
//! coerce the value, then persist each recorded write as a partial update.
//! Derived values are recalculated from the stored result and returned,
//! never written back.

mod error;

pub use error::CharacterSheetError;

use std::sync::Arc;

use aspects_domain::game_systems::aspects::stress::UNCONSCIOUS_FIELD;
use aspects_domain::{
    resolve_boolean_field, BooleanFieldOptions, CharacterId, CharacterRecord,
    CharacterSheetSchema, DomainError, FieldContext, FieldDefinition, FieldMap, FieldPatch,
    FieldStore, FieldValue, GameSystem, PatchBuffer, ResolvedListField, RoomId, SchemaFieldType,
};

use crate::infrastructure::ports::CharacterRepo;

// =============================================================================
// Result Types
// =============================================================================

/// Result of getting a character sheet.
#[derive(Debug, Clone)]
pub struct GetSheetResult {
    /// The stored character.
    pub character: CharacterRecord,
    /// The system the sheet was resolved against.
    pub system_id: String,
    /// The character sheet schema.
    pub schema: CharacterSheetSchema,
    /// Calculated/derived values.
    pub calculated: FieldMap,
}

/// Result of any sheet edit.
#[derive(Debug, Clone)]
pub struct SheetEditResult {
    /// The character after every patch was stored.
    pub character: CharacterRecord,
    /// Writes issued by the edit, in the order they were persisted.
    pub patches: Vec<FieldPatch>,
    /// Calculated/derived values for the updated document.
    pub calculated: FieldMap,
}

// =============================================================================
// Use Cases
// =============================================================================

/// Container for character sheet use cases.
pub struct CharacterSheetUseCases {
    character_repo: Arc<dyn CharacterRepo>,
    system: Arc<dyn GameSystem>,
}

impl CharacterSheetUseCases {
    pub fn new(character_repo: Arc<dyn CharacterRepo>, system: Arc<dyn GameSystem>) -> Self {
        Self {
            character_repo,
            system,
        }
    }

    pub fn system(&self) -> &Arc<dyn GameSystem> {
        &self.system
    }

    pub fn schema(&self) -> CharacterSheetSchema {
        self.system.sheet().character_sheet_schema()
    }

    /// Derived values for an arbitrary document, with no record involved.
    pub fn calculate(&self, values: &FieldMap) -> FieldMap {
        self.system.sheet().calculate_derived_values(values)
    }

    /// Create a character whose sheet starts at the system defaults.
    pub async fn create_character(
        &self,
        room_id: RoomId,
        name: &str,
        is_public: bool,
    ) -> Result<GetSheetResult, CharacterSheetError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("Character name cannot be empty").into());
        }

        let character = CharacterRecord::new(room_id, name)
            .public(is_public)
            .with_data(self.system.sheet().default_values());
        self.character_repo.save(&character).await?;

        tracing::info!(
            character_id = %character.id,
            room_id = %room_id,
            system_id = %self.system.system_id(),
            "Created character"
        );

        Ok(self.sheet_for(character))
    }

    /// Get the character, its schema and its calculated values.
    pub async fn get_sheet(
        &self,
        character_id: CharacterId,
    ) -> Result<GetSheetResult, CharacterSheetError> {
        let character = self.load(character_id).await?;

        tracing::debug!(character_id = %character_id, "Retrieved character sheet");

        Ok(self.sheet_for(character))
    }

    /// Every sheet in a room, ordered by character name.
    pub async fn list_room_sheets(
        &self,
        room_id: RoomId,
    ) -> Result<Vec<GetSheetResult>, CharacterSheetError> {
        let characters = self.character_repo.list_in_room(room_id).await?;
        Ok(characters
            .into_iter()
            .map(|character| self.sheet_for(character))
            .collect())
    }

    /// Set one top-level field.
    ///
    /// Schema fields are written through their resolver, so numbers are
    /// clamped and selects stringified. List fields take a whole list.
    /// Ids the schema does not know are stored as given.
    pub async fn update_field(
        &self,
        character_id: CharacterId,
        field_id: &str,
        value: FieldValue,
    ) -> Result<SheetEditResult, CharacterSheetError> {
        let schema = self.schema();
        self.edit(character_id, |sheet| match schema.field(field_id) {
            Some(definition) => write_definition(sheet, definition, value),
            None => {
                tracing::debug!(field_id = %field_id, "Writing field outside the schema");
                sheet.update_value(field_id, value);
                Ok(())
            }
        })
        .await
    }

    pub async fn set_unconscious(
        &self,
        character_id: CharacterId,
        unconscious: bool,
    ) -> Result<SheetEditResult, CharacterSheetError> {
        self.edit(character_id, |sheet| {
            resolve_boolean_field(sheet, &BooleanFieldOptions::new(UNCONSCIOUS_FIELD))
                .set(unconscious);
            Ok(())
        })
        .await
    }

    /// Append an empty item to a list field.
    pub async fn add_list_item(
        &self,
        character_id: CharacterId,
        list_id: &str,
    ) -> Result<SheetEditResult, CharacterSheetError> {
        let schema = self.schema();
        let definition = list_definition(&schema, list_id)?;
        self.edit(character_id, |sheet| {
            resolve_list(sheet, definition)?.add_item();
            Ok(())
        })
        .await
    }

    pub async fn remove_list_item(
        &self,
        character_id: CharacterId,
        list_id: &str,
        index: usize,
    ) -> Result<SheetEditResult, CharacterSheetError> {
        let schema = self.schema();
        let definition = list_definition(&schema, list_id)?;
        self.edit(character_id, |sheet| {
            let list = resolve_list(sheet, definition)?;
            ensure_item(&list, index)?;
            list.remove_item(index);
            Ok(())
        })
        .await
    }

    /// Insert a copy of an item directly after it.
    pub async fn duplicate_list_item(
        &self,
        character_id: CharacterId,
        list_id: &str,
        index: usize,
    ) -> Result<SheetEditResult, CharacterSheetError> {
        let schema = self.schema();
        let definition = list_definition(&schema, list_id)?;
        self.edit(character_id, |sheet| {
            let list = resolve_list(sheet, definition)?;
            ensure_item(&list, index)?;
            list.duplicate_item(index);
            Ok(())
        })
        .await
    }

    /// Set one field inside one list item; the whole list is written back.
    pub async fn update_list_item_field(
        &self,
        character_id: CharacterId,
        list_id: &str,
        index: usize,
        field_id: &str,
        value: FieldValue,
    ) -> Result<SheetEditResult, CharacterSheetError> {
        let schema = self.schema();
        let definition = list_definition(&schema, list_id)?;
        let item_definition = match &definition.field_type {
            SchemaFieldType::List { item_fields } => {
                item_fields.iter().find(|field| field.id == field_id)
            }
            _ => None,
        };

        self.edit(character_id, |sheet| {
            let list = resolve_list(sheet, definition)?;
            ensure_item(&list, index)?;
            let item = list.item_context(index);
            match item_definition {
                Some(field) => write_definition(&item, field, value),
                None => {
                    item.update_value(field_id, value);
                    Ok(())
                }
            }
        })
        .await
    }

    pub async fn delete_character(
        &self,
        character_id: CharacterId,
    ) -> Result<(), CharacterSheetError> {
        if !self.character_repo.delete(character_id).await? {
            return Err(CharacterSheetError::CharacterNotFound(character_id));
        }

        tracing::info!(character_id = %character_id, "Deleted character");
        Ok(())
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    async fn load(
        &self,
        character_id: CharacterId,
    ) -> Result<CharacterRecord, CharacterSheetError> {
        self.character_repo
            .get(character_id)
            .await?
            .ok_or(CharacterSheetError::CharacterNotFound(character_id))
    }

    fn sheet_for(&self, character: CharacterRecord) -> GetSheetResult {
        let calculated = self.calculate(&character.data);
        GetSheetResult {
            character,
            system_id: self.system.system_id().to_string(),
            schema: self.schema(),
            calculated,
        }
    }

    async fn edit<F>(
        &self,
        character_id: CharacterId,
        edit: F,
    ) -> Result<SheetEditResult, CharacterSheetError>
    where
        F: FnOnce(&FieldContext<'_>) -> Result<(), CharacterSheetError> + Send,
    {
        let mut character = self.load(character_id).await?;
        let patches = record_edit(&character.data, edit)?;

        for patch in &patches {
            tracing::debug!(
                character_id = %character_id,
                field_id = %patch.field_id,
                "Persisting field patch"
            );
            character = self
                .character_repo
                .patch_data(character_id, patch.clone().into_partial())
                .await?;
        }

        let calculated = self.calculate(&character.data);
        Ok(SheetEditResult {
            character,
            patches,
            calculated,
        })
    }
}

/// Run `edit` against a snapshot of `values`, collecting its writes.
///
/// Kept synchronous so the buffer never lives across an await.
fn record_edit<F>(values: &FieldMap, edit: F) -> Result<Vec<FieldPatch>, CharacterSheetError>
where
    F: FnOnce(&FieldContext<'_>) -> Result<(), CharacterSheetError>,
{
    let buffer = PatchBuffer::new();
    let sheet = FieldContext::new(values, &buffer);
    edit(&sheet)?;
    Ok(buffer.take())
}

fn write_definition(
    store: &dyn FieldStore,
    definition: &FieldDefinition,
    value: FieldValue,
) -> Result<(), CharacterSheetError> {
    if !definition.editable {
        return Err(CharacterSheetError::field(&definition.id, "field is read-only"));
    }

    if let Some(field) = definition.resolve(store) {
        field.write(&value);
        return Ok(());
    }

    match definition.resolve_list(store) {
        Some(list) => {
            let items = value
                .as_list()
                .ok_or_else(|| CharacterSheetError::field(&definition.id, "expected a list"))?;
            list.set_items(
                items
                    .iter()
                    .map(|item| item.as_object().cloned().unwrap_or_default())
                    .collect(),
            );
            Ok(())
        }
        None => Err(CharacterSheetError::field(
            &definition.id,
            "field type cannot be edited",
        )),
    }
}

fn list_definition<'s>(
    schema: &'s CharacterSheetSchema,
    list_id: &str,
) -> Result<&'s FieldDefinition, CharacterSheetError> {
    schema
        .field(list_id)
        .filter(|field| matches!(field.field_type, SchemaFieldType::List { .. }))
        .ok_or_else(|| CharacterSheetError::NotAList(list_id.to_string()))
}

fn resolve_list<'a>(
    store: &'a dyn FieldStore,
    definition: &FieldDefinition,
) -> Result<ResolvedListField<'a>, CharacterSheetError> {
    if !definition.editable {
        return Err(CharacterSheetError::field(&definition.id, "field is read-only"));
    }
    definition
        .resolve_list(store)
        .ok_or_else(|| CharacterSheetError::NotAList(definition.id.clone()))
}

fn ensure_item(list: &ResolvedListField<'_>, index: usize) -> Result<(), CharacterSheetError> {
    if index < list.len() {
        Ok(())
    } else {
        Err(CharacterSheetError::ItemOutOfRange {
            list_id: list.id().to_string(),
            index,
            len: list.len(),
        })
    }
}

#[cfg(test)]
mod tests;
