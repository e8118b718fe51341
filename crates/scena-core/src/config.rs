//! Runner configuration.
//!
//! Loaded from YAML, optionally overridden from the environment, and
//! installed once at load time. The default child kind is process-wide and
//! cannot change after installation.

use crate::error::{Result, ScenaError};
use crate::factory::TableKind;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

/// Kind used for scenario bodies when the caller's kind cannot run them
pub const DEFAULT_CHILD_KIND: &str = "script";

/// Environment variable overriding `default_child_kind`
pub const CHILD_KIND_ENV: &str = "SCENA_DEFAULT_CHILD_KIND";

/// Environment variable overriding `log_level`
pub const LOG_LEVEL_ENV: &str = "SCENA_LOG";

static INSTALLED_CHILD_KIND: OnceCell<TableKind> = OnceCell::new();

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerConfig {
    #[serde(default = "default_kind")]
    pub default_child_kind: TableKind,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_kind() -> TableKind {
    TableKind::new(DEFAULT_CHILD_KIND)
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            default_child_kind: default_kind(),
            log_level: default_log_level(),
        }
    }
}

impl RunnerConfig {
    /// Load a config from a YAML file
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ScenaError::Config(format!("Failed to read config file: {}", e)))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| ScenaError::Config(format!("Failed to parse config YAML: {}", e)))
    }

    /// Apply `SCENA_DEFAULT_CHILD_KIND` and `SCENA_LOG` if set
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(kind) = lookup(CHILD_KIND_ENV).filter(|k| !k.trim().is_empty()) {
            self.default_child_kind = TableKind::new(kind.trim());
        }
        if let Some(level) = lookup(LOG_LEVEL_ENV).filter(|l| !l.trim().is_empty()) {
            self.log_level = level.trim().to_string();
        }
        self
    }

    /// Initialise logging and the process-wide default child kind
    pub fn install(&self) -> Result<()> {
        crate::logging::init(&self.log_level);
        install_default_child_kind(self.default_child_kind.clone())
    }
}

/// Set the process-wide default child kind. Only the first call succeeds.
pub fn install_default_child_kind(kind: TableKind) -> Result<()> {
    INSTALLED_CHILD_KIND.set(kind).map_err(|rejected| {
        ScenaError::Config(format!(
            "default child kind already installed; refusing '{}'",
            rejected
        ))
    })
}

pub fn default_child_kind() -> TableKind {
    INSTALLED_CHILD_KIND
        .get()
        .cloned()
        .unwrap_or_else(default_kind)
}
