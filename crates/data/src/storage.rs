//! Session token storage.
//!
//! [`FileTokenStorage`] keeps the session in a JSON file so the CLI stays
//! signed in between runs; [`InMemoryTokenStorage`] forgets it on exit.

use std::{
    fs,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use domain::{StorageError, TokenStorage};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct Session {
    token: Option<String>,
    user: Option<String>,
}

#[derive(Debug, Default)]
pub struct InMemoryTokenStorage {
    inner: Mutex<Session>,
}

impl InMemoryTokenStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStorage for InMemoryTokenStorage {
    async fn save_token(&self, token: &str) -> Result<(), StorageError> {
        self.inner.lock().await.token = Some(token.to_string());
        Ok(())
    }

    async fn token(&self) -> Result<Option<String>, StorageError> {
        Ok(self.inner.lock().await.token.clone())
    }

    async fn clear_token(&self) -> Result<(), StorageError> {
        self.inner.lock().await.token = None;
        Ok(())
    }

    async fn save_user(&self, user_json: &str) -> Result<(), StorageError> {
        self.inner.lock().await.user = Some(user_json.to_string());
        Ok(())
    }

    async fn user(&self) -> Result<Option<String>, StorageError> {
        Ok(self.inner.lock().await.user.clone())
    }

    async fn clear_user(&self) -> Result<(), StorageError> {
        self.inner.lock().await.user = None;
        Ok(())
    }
}

#[derive(Debug)]
pub struct FileTokenStorage {
    path: PathBuf,
    inner: Mutex<Session>,
}

impl FileTokenStorage {
    /// Opens the session file; a missing or unreadable file is an empty
    /// session.
    pub fn load_or_empty(path: PathBuf) -> Self {
        let session = read_json_file(&path).unwrap_or_default();
        Self {
            path,
            inner: Mutex::new(session),
        }
    }

    async fn update<F>(&self, f: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut Session),
    {
        let mut guard = self.inner.lock().await;
        f(&mut *guard);
        write_json_file(&self.path, &*guard)?;
        Ok(())
    }
}

#[async_trait]
impl TokenStorage for FileTokenStorage {
    async fn save_token(&self, token: &str) -> Result<(), StorageError> {
        self.update(|s| s.token = Some(token.to_string())).await
    }

    async fn token(&self) -> Result<Option<String>, StorageError> {
        Ok(self.inner.lock().await.token.clone())
    }

    async fn clear_token(&self) -> Result<(), StorageError> {
        self.update(|s| s.token = None).await
    }

    async fn save_user(&self, user_json: &str) -> Result<(), StorageError> {
        self.update(|s| s.user = Some(user_json.to_string())).await
    }

    async fn user(&self) -> Result<Option<String>, StorageError> {
        Ok(self.inner.lock().await.user.clone())
    }

    async fn clear_user(&self) -> Result<(), StorageError> {
        self.update(|s| s.user = None).await
    }
}

fn read_json_file(path: &Path) -> Option<Session> {
    let raw = fs::read_to_string(path).ok()?;
    serde_json::from_str(&raw).ok()
}

fn write_json_file(path: &Path, session: &Session) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(session)
        .map_err(|err| StorageError::Corrupt(err.to_string()))?;

    let tmp = path.with_extension("tmp");
    fs::write(&tmp, json)?;
    match fs::rename(&tmp, path) {
        Ok(()) => Ok(()),
        Err(_) => {
            fs::copy(&tmp, path)?;
            let _ = fs::remove_file(&tmp);
            Ok(())
        }
    }
}
