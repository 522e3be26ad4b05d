//! Stored character records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{CharacterId, RoomId};
use crate::types::FieldMap;

/// A character as persistence holds it.
///
/// `data` is the sheet document; nothing here knows which fields it holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterRecord {
    pub id: CharacterId,
    pub room_id: RoomId,
    pub name: String,
    pub is_public: bool,
    #[serde(default)]
    pub data: FieldMap,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl CharacterRecord {
    pub fn new(room_id: RoomId, name: impl Into<String>) -> Self {
        Self {
            id: CharacterId::new(),
            room_id,
            name: name.into(),
            is_public: false,
            data: FieldMap::new(),
            updated_at: None,
        }
    }

    pub fn with_data(mut self, data: FieldMap) -> Self {
        self.data = data;
        self
    }

    pub fn public(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }

    /// Merge a partial document: every key in `partial` replaces the stored
    /// value wholesale, other keys are kept.
    pub fn apply_patch(&mut self, partial: FieldMap, at: DateTime<Utc>) {
        self.data.extend(partial);
        self.updated_at = Some(at);
    }
}
