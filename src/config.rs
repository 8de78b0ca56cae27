// src/config.rs
//! Environment-backed configuration: the API token and the IDs of the
//! three study databases.

use crate::error::AppError;
use crate::types::{ApiKey, DatabaseId};

/// Runtime configuration resolved from the environment.
///
/// The knowledge database is the primary deck; vocab and notes are
/// optional features that degrade to empty listings when unconfigured,
/// matching how the viewer front end treats missing sections.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: ApiKey,
    pub knowledge_db: Option<DatabaseId>,
    pub vocab_db: Option<DatabaseId>,
    pub notes_db: Option<DatabaseId>,
}

impl AppConfig {
    /// Loads configuration from `NOTION_TOKEN`, `DB_KNOWLEDGE`, `DB_VOCAB`
    /// and `DB_NOTES`.
    pub fn from_env() -> Result<Self, AppError> {
        let token = std::env::var("NOTION_TOKEN")
            .map_err(|_| AppError::MissingConfiguration("NOTION_TOKEN".to_string()))?;
        let api_key = ApiKey::new(token)?;

        Ok(Self {
            api_key,
            knowledge_db: optional_database("DB_KNOWLEDGE")?,
            vocab_db: optional_database("DB_VOCAB")?,
            notes_db: optional_database("DB_NOTES")?,
        })
    }

    /// The knowledge database, required for the knowledge endpoints.
    pub fn require_knowledge_db(&self) -> Result<&DatabaseId, AppError> {
        self.knowledge_db
            .as_ref()
            .ok_or_else(|| AppError::MissingConfiguration("DB_KNOWLEDGE".to_string()))
    }
}

/// Reads an optional database ID variable; set-but-invalid is an error,
/// unset (or empty, a common .env placeholder) is `None`.
fn optional_database(var: &str) -> Result<Option<DatabaseId>, AppError> {
    match std::env::var(var) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(DatabaseId::parse(&value).map_err(|e| {
            AppError::MissingConfiguration(format!("{}: {}", var, e))
        })?)),
        Err(_) => Ok(None),
    }
}
