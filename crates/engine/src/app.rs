//! Application state and composition.

use std::sync::Arc;

use anyhow::Context;
use aspects_domain::{GameSystem, GameSystemRegistry};

use crate::infrastructure::config::AppConfig;
use crate::infrastructure::ports::CharacterRepo;
use crate::use_cases::CharacterSheetUseCases;

/// Main application state.
///
/// Holds the repositories and use cases, wired to the configured system.
pub struct App {
    pub config: AppConfig,
    pub system: Arc<dyn GameSystem>,
    pub repositories: Repositories,
    pub use_cases: UseCases,
}

/// Container for repository ports.
pub struct Repositories {
    pub character: Arc<dyn CharacterRepo>,
}

/// Container for use cases.
pub struct UseCases {
    pub character_sheet: Arc<CharacterSheetUseCases>,
}

impl App {
    /// Wire the application. Fails if the configured sheet system is not
    /// registered.
    pub fn new(config: AppConfig, character_repo: Arc<dyn CharacterRepo>) -> anyhow::Result<Self> {
        let registry = GameSystemRegistry::new();
        let system = registry.require(&config.sheet_system).with_context(|| {
            format!(
                "unknown sheet system {:?}; available: {}",
                config.sheet_system,
                registry.list_systems().join(", ")
            )
        })?;

        tracing::info!(
            system_id = %system.system_id(),
            system_name = %system.display_name(),
            "Sheet system selected"
        );

        let character_sheet = Arc::new(CharacterSheetUseCases::new(
            character_repo.clone(),
            system.clone(),
        ));

        Ok(Self {
            config,
            system,
            repositories: Repositories {
                character: character_repo,
            },
            use_cases: UseCases { character_sheet },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::SystemClock;
    use crate::infrastructure::memory::InMemoryCharacterRepo;

    fn repo() -> Arc<dyn CharacterRepo> {
        Arc::new(InMemoryCharacterRepo::new(Arc::new(SystemClock::new())))
    }

    #[test]
    fn wires_the_configured_system() {
        let config = AppConfig {
            sheet_system: "aspects_classic".to_string(),
            ..AppConfig::default()
        };

        let app = App::new(config, repo()).unwrap();

        assert_eq!(app.system.system_id(), "aspects_classic");
        assert_eq!(app.use_cases.character_sheet.system().system_id(), "aspects_classic");
    }

    #[test]
    fn rejects_unknown_system() {
        let config = AppConfig {
            sheet_system: "dnd5e".to_string(),
            ..AppConfig::default()
        };

        let err = App::new(config, repo()).err().map(|e| format!("{:#}", e));

        assert!(err.is_some_and(|message| message.contains("dnd5e")));
    }
}
