use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Session file name in the data directory
const SESSION_FILE: &str = "session.json";

/// Persisted token pair. The field names are the fixed storage keys this
/// client has always used; keep them stable across versions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoredTokens {
    #[serde(rename = "accessToken")]
    access: Option<String>,
    #[serde(rename = "refreshToken")]
    refresh: Option<String>,
}

impl StoredTokens {
    fn is_empty(&self) -> bool {
        self.access.is_none() && self.refresh.is_none()
    }
}

/// Shared handle to the bearer token pair.
///
/// Cloning is cheap and every clone observes the same tokens — the session
/// is the single owned object all request-issuing components share. Each
/// mutation is written through to the session file when the session was
/// opened with a storage directory.
#[derive(Clone)]
pub struct Session {
    tokens: Arc<RwLock<StoredTokens>>,
    path: Option<PathBuf>,
}

impl Session {
    /// Session without persistence. Tokens live only as long as the handle.
    pub fn in_memory() -> Self {
        Self {
            tokens: Arc::new(RwLock::new(StoredTokens::default())),
            path: None,
        }
    }

    /// Open the session persisted under `data_dir`, loading any stored
    /// token pair. An unreadable session file is treated as logged out.
    pub fn open(data_dir: PathBuf) -> Result<Self> {
        let path = data_dir.join(SESSION_FILE);
        let tokens = if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .context("Failed to read session file")?;
            match serde_json::from_str(&contents) {
                Ok(tokens) => tokens,
                Err(e) => {
                    warn!(error = %e, "Discarding unparseable session file");
                    StoredTokens::default()
                }
            }
        } else {
            StoredTokens::default()
        };

        Ok(Self {
            tokens: Arc::new(RwLock::new(tokens)),
            path: Some(path),
        })
    }

    pub fn access_token(&self) -> Option<String> {
        self.tokens.read().expect("session lock poisoned").access.clone()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.tokens.read().expect("session lock poisoned").refresh.clone()
    }

    /// An access token is present. Says nothing about whether the server
    /// still accepts it.
    pub fn is_authenticated(&self) -> bool {
        self.tokens.read().expect("session lock poisoned").access.is_some()
    }

    /// Store a fresh token pair (login).
    pub fn set_pair(&self, access: String, refresh: String) {
        {
            let mut tokens = self.tokens.write().expect("session lock poisoned");
            tokens.access = Some(access);
            tokens.refresh = Some(refresh);
        }
        self.persist();
    }

    /// Substitute the access token after a refresh, optionally rotating
    /// the refresh token when the server returned a new one.
    pub fn set_access(&self, access: String, rotated_refresh: Option<String>) {
        {
            let mut tokens = self.tokens.write().expect("session lock poisoned");
            tokens.access = Some(access);
            if let Some(refresh) = rotated_refresh {
                tokens.refresh = Some(refresh);
            }
        }
        self.persist();
    }

    /// Drop both tokens, in memory and on disk.
    pub fn clear(&self) {
        {
            let mut tokens = self.tokens.write().expect("session lock poisoned");
            *tokens = StoredTokens::default();
        }
        if let Some(ref path) = self.path {
            if path.exists() {
                if let Err(e) = std::fs::remove_file(path) {
                    warn!(error = %e, "Failed to remove session file");
                }
            }
        }
    }

    fn persist(&self) {
        let Some(ref path) = self.path else { return };
        let snapshot = self.tokens.read().expect("session lock poisoned").clone();
        if snapshot.is_empty() {
            return;
        }
        let result = (|| -> Result<()> {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let contents = serde_json::to_string_pretty(&snapshot)?;
            std::fs::write(path, contents)?;
            Ok(())
        })();
        if let Err(e) = result {
            warn!(error = %e, "Failed to persist session");
        } else {
            debug!("Session persisted");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_roundtrip_through_the_session_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let session = Session::open(dir.path().to_path_buf()).expect("open");
        session.set_pair("acc-1".into(), "ref-1".into());

        let reopened = Session::open(dir.path().to_path_buf()).expect("reopen");
        assert_eq!(reopened.access_token().as_deref(), Some("acc-1"));
        assert_eq!(reopened.refresh_token().as_deref(), Some("ref-1"));
    }

    #[test]
    fn session_file_uses_fixed_storage_keys() {
        let dir = tempfile::tempdir().expect("tempdir");
        let session = Session::open(dir.path().to_path_buf()).expect("open");
        session.set_pair("acc".into(), "ref".into());

        let contents =
            std::fs::read_to_string(dir.path().join(SESSION_FILE)).expect("session file");
        let value: serde_json::Value = serde_json::from_str(&contents).expect("json");
        assert_eq!(value["accessToken"], "acc");
        assert_eq!(value["refreshToken"], "ref");
    }

    #[test]
    fn clear_removes_tokens_and_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let session = Session::open(dir.path().to_path_buf()).expect("open");
        session.set_pair("acc".into(), "ref".into());
        session.clear();

        assert!(!session.is_authenticated());
        assert!(session.refresh_token().is_none());
        assert!(!dir.path().join(SESSION_FILE).exists());
    }

    #[test]
    fn rotated_refresh_token_is_persisted_only_when_present() {
        let session = Session::in_memory();
        session.set_pair("acc-1".into(), "ref-1".into());

        session.set_access("acc-2".into(), None);
        assert_eq!(session.refresh_token().as_deref(), Some("ref-1"));

        session.set_access("acc-3".into(), Some("ref-2".into()));
        assert_eq!(session.refresh_token().as_deref(), Some("ref-2"));
    }

    #[test]
    fn clones_share_state() {
        let session = Session::in_memory();
        let other = session.clone();
        session.set_pair("acc".into(), "ref".into());
        assert_eq!(other.access_token().as_deref(), Some("acc"));
    }
}
