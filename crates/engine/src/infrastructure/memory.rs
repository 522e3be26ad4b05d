//! In-memory character storage for development and tests.

use std::sync::Arc;

use async_trait::async_trait;
use aspects_domain::{CharacterId, CharacterRecord, FieldMap, RoomId};
use dashmap::DashMap;

use crate::infrastructure::ports::{CharacterRepo, ClockPort, RepoError};

/// [`CharacterRepo`] backed by a concurrent map.
///
/// Patches are applied under the entry lock, so concurrent edits to
/// different fields of one character never lose each other's keys.
pub struct InMemoryCharacterRepo {
    characters: DashMap<CharacterId, CharacterRecord>,
    clock: Arc<dyn ClockPort>,
}

impl InMemoryCharacterRepo {
    pub fn new(clock: Arc<dyn ClockPort>) -> Self {
        Self {
            characters: DashMap::new(),
            clock,
        }
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}

#[async_trait]
impl CharacterRepo for InMemoryCharacterRepo {
    async fn get(&self, id: CharacterId) -> Result<Option<CharacterRecord>, RepoError> {
        Ok(self.characters.get(&id).map(|entry| entry.value().clone()))
    }

    async fn list_in_room(&self, room_id: RoomId) -> Result<Vec<CharacterRecord>, RepoError> {
        let mut characters: Vec<CharacterRecord> = self
            .characters
            .iter()
            .filter(|entry| entry.room_id == room_id)
            .map(|entry| entry.value().clone())
            .collect();
        characters.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(characters)
    }

    async fn save(&self, character: &CharacterRecord) -> Result<(), RepoError> {
        let mut record = character.clone();
        record.updated_at = Some(self.clock.now());
        self.characters.insert(record.id, record);
        Ok(())
    }

    async fn patch_data(
        &self,
        id: CharacterId,
        partial: FieldMap,
    ) -> Result<CharacterRecord, RepoError> {
        let mut entry = self
            .characters
            .get_mut(&id)
            .ok_or_else(|| RepoError::not_found("Character", id))?;
        entry.apply_patch(partial, self.clock.now());
        Ok(entry.value().clone())
    }

    async fn delete(&self, id: CharacterId) -> Result<bool, RepoError> {
        Ok(self.characters.remove(&id).is_some())
    }
}
