//! Repository port traits.

use async_trait::async_trait;
use aspects_domain::{CharacterId, CharacterRecord, FieldMap, RoomId};

use super::error::RepoError;

/// Character document storage.
///
/// `patch_data` is the only way sheet edits reach storage: every key in the
/// partial document replaces the stored value for that key, last write wins.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterRepo: Send + Sync {
    async fn get(&self, id: CharacterId) -> Result<Option<CharacterRecord>, RepoError>;

    /// Characters in a room, ordered by name.
    async fn list_in_room(&self, room_id: RoomId) -> Result<Vec<CharacterRecord>, RepoError>;

    async fn save(&self, character: &CharacterRecord) -> Result<(), RepoError>;

    /// Merge `partial` into the stored document and return the updated record.
    async fn patch_data(
        &self,
        id: CharacterId,
        partial: FieldMap,
    ) -> Result<CharacterRecord, RepoError>;

    /// Returns whether a record was removed.
    async fn delete(&self, id: CharacterId) -> Result<bool, RepoError>;
}
