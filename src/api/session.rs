use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to read session file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse session: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Credentials handed explicitly to every backend client.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    access_token: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_token(access_token: impl Into<String>) -> Self {
        Self {
            access_token: Some(access_token.into()),
        }
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredToken {
    pub access_token: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl StoredToken {
    pub fn new(access_token: String, expires_in_seconds: Option<i64>) -> Self {
        Self {
            access_token,
            expires_at: expires_in_seconds.map(|seconds| Utc::now() + chrono::Duration::seconds(seconds)),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.expires_at.is_none_or(|at| at > Utc::now())
    }
}

/// Token persisted between runs.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn save_token(&self, token: &StoredToken) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(token)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    pub fn load_token(&self) -> Result<StoredToken, SessionError> {
        let content = std::fs::read_to_string(&self.path)?;
        let token: StoredToken = serde_json::from_str(&content)?;
        Ok(token)
    }

    /// A missing, unreadable or expired token yields an anonymous session.
    pub fn load_session(&self) -> Session {
        match self.load_token() {
            Ok(token) if token.is_valid() => Session::with_token(token.access_token),
            Ok(_) => {
                tracing::warn!("Stored token at {} has expired", self.path.display());
                Session::anonymous()
            }
            Err(e) => {
                tracing::info!("No usable session at {}: {}", self.path.display(), e);
                Session::anonymous()
            }
        }
    }
}
