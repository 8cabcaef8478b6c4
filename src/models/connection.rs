// Connection configuration models

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::helpers::REDACTED_PASSWORD;

/// ClickHouse HTTP connection parameters.
///
/// The port stays a string because it travels to the backend unparsed; the
/// backend owns the numeric interpretation.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: String,
    pub database: String,
    pub username: String,
    pub password: String,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: "8123".to_string(),
            database: "default".to_string(),
            username: "default".to_string(),
            password: String::new(),
        }
    }
}

impl ConnectionConfig {
    /// Pure pre-connect check: every field except the password must be
    /// non-empty. Reports the first missing field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required: [(&'static str, &str); 4] = [
            ("host", &self.host),
            ("port", &self.port),
            ("database", &self.database),
            ("username", &self.username),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ValidationError::MissingConnectionField(field));
            }
        }
        Ok(())
    }
}

// Manual Debug so the password never ends up in logs.
impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let password = if self.password.is_empty() { "" } else { REDACTED_PASSWORD };
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &password)
            .finish()
    }
}

/// A saved connection profile (persisted to disk, password stripped on save)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedProfile {
    pub id: Uuid,
    pub name: String,
    pub config: ConnectionConfig,
    pub last_connected: Option<DateTime<Utc>>,
}

impl SavedProfile {
    pub fn new(name: String, config: ConnectionConfig) -> Self {
        Self { id: Uuid::new_v4(), name, config, last_connected: None }
    }
}
