//! Environment-driven configuration.

use std::path::Path;

use anyhow::Context;
use aspects_domain::STANDARD_SYSTEM_ID;

pub const SHEET_SYSTEM_VAR: &str = "ASPECTS_SHEET_SYSTEM";
pub const LOG_FILTER_VAR: &str = "ASPECTS_LOG";

const DEFAULT_LOG_FILTER: &str = "aspects_engine=debug,aspects_domain=info";

/// Engine settings resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Game system every sheet in this engine is resolved against.
    pub sheet_system: String,
    /// `tracing_subscriber::EnvFilter` directives.
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sheet_system: STANDARD_SYSTEM_ID.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    /// Load `.env.local` / `.env` from the workspace root if present, then
    /// read the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        load_dotenv_from_repo_root();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let sheet_system = match lookup(SHEET_SYSTEM_VAR) {
            Some(value) => {
                let value = value.trim().to_string();
                anyhow::ensure!(!value.is_empty(), "{} is set but empty", SHEET_SYSTEM_VAR);
                value
            }
            None => defaults.sheet_system,
        };

        let log_filter = lookup(LOG_FILTER_VAR)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or(defaults.log_filter);

        Ok(Self {
            sheet_system,
            log_filter,
        })
    }
}

fn load_dotenv_from_repo_root() {
    let repo_root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            if let Err(err) = dotenvy::from_path(&path).context("reading dotenv file") {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "Ignoring unreadable env file"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_to_standard_sheet() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.sheet_system, "aspects");
    }

    #[test]
    fn reads_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            (SHEET_SYSTEM_VAR, " aspects_classic "),
            (LOG_FILTER_VAR, "trace"),
        ]))
        .unwrap();
        assert_eq!(config.sheet_system, "aspects_classic");
        assert_eq!(config.log_filter, "trace");
    }

    #[test]
    fn rejects_blank_sheet_system() {
        assert!(AppConfig::from_lookup(lookup(&[(SHEET_SYSTEM_VAR, "  ")])).is_err());
    }

    #[test]
    fn blank_log_filter_falls_back() {
        let config = AppConfig::from_lookup(lookup(&[(LOG_FILTER_VAR, "")])).unwrap();
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }
}
