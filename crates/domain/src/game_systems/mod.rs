//! Game system implementations.
//!
//! Each system implements the traits defined in `traits.rs`.
//!
//! # Supported Systems
//!
//! - Aspects of Nature (`aspects`)
//! - Aspects of Nature, classic sheet (`aspects_classic`)

pub mod aspects;
mod traits;

pub use aspects::{AspectsOfNatureSystem, CLASSIC_SYSTEM_ID, STANDARD_SYSTEM_ID};

// Core traits
pub use traits::{CharacterSheetProvider, GameSystem};

use std::sync::Arc;

use crate::error::DomainError;

/// Registry of available game systems.
pub struct GameSystemRegistry {
    systems: Vec<Arc<dyn GameSystem>>,
}

impl Default for GameSystemRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSystemRegistry {
    /// Create a new registry with all built-in game systems.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(Arc::new(AspectsOfNatureSystem::standard()));
        registry.register(Arc::new(AspectsOfNatureSystem::classic()));
        registry
    }

    /// Create an empty registry without built-in systems.
    pub fn empty() -> Self {
        Self {
            systems: Vec::new(),
        }
    }

    /// Register a game system.
    pub fn register(&mut self, system: Arc<dyn GameSystem>) {
        self.systems.push(system);
    }

    /// Get a game system by its ID.
    pub fn get(&self, system_id: &str) -> Option<Arc<dyn GameSystem>> {
        self.systems
            .iter()
            .find(|s| s.system_id() == system_id)
            .cloned()
    }

    /// Like [`get`](Self::get), but unknown ids are an error.
    pub fn require(&self, system_id: &str) -> Result<Arc<dyn GameSystem>, DomainError> {
        self.get(system_id)
            .ok_or_else(|| DomainError::not_found("GameSystem", system_id))
    }

    /// List all registered system IDs.
    pub fn list_systems(&self) -> Vec<&str> {
        self.systems.iter().map(|s| s.system_id()).collect()
    }

    /// List all registered systems with their display names.
    pub fn list_systems_with_names(&self) -> Vec<(&str, &str)> {
        self.systems
            .iter()
            .map(|s| (s.system_id(), s.display_name()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_includes_both_layouts() {
        let registry = GameSystemRegistry::new();
        let systems = registry.list_systems();
        assert_eq!(systems, vec!["aspects", "aspects_classic"]);
    }

    #[test]
    fn empty_registry_has_no_systems() {
        let registry = GameSystemRegistry::empty();
        assert!(registry.list_systems().is_empty());
        assert!(registry.require("aspects").is_err());
    }

    #[test]
    fn registry_list_with_names() {
        let registry = GameSystemRegistry::new();
        let systems = registry.list_systems_with_names();
        assert!(systems
            .iter()
            .any(|(id, name)| *id == "aspects_classic" && *name == "Aspects of Nature (Classic)"));
    }

    #[test]
    fn unknown_system_is_not_found() {
        let registry = GameSystemRegistry::new();
        let err = registry.require("dnd5e").err().unwrap();
        assert!(matches!(err, DomainError::NotFound { entity_type: "GameSystem", .. }));
        assert!(registry.require("aspects").is_ok());
    }
}
