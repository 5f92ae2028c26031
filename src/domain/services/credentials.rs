#[cfg(test)]
#[path = "credentials_test.rs"]
mod tests;

use std::env;
use std::path;

use anyhow::Result;
use chrono::Local;
use chrono::SecondsFormat;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::models::Credentials;

/// Bearer token persisted on this device between runs.
#[derive(Clone, Debug)]
pub struct CredentialStore {
    pub cache_dir: path::PathBuf,
}

impl Default for CredentialStore {
    fn default() -> CredentialStore {
        let cache_dir = dirs::cache_dir()
            .unwrap_or_else(env::temp_dir)
            .join("coachbot");

        return CredentialStore::new(cache_dir);
    }
}

impl CredentialStore {
    pub fn new(cache_dir: path::PathBuf) -> CredentialStore {
        return CredentialStore { cache_dir };
    }

    pub fn file_path(&self) -> path::PathBuf {
        return self.cache_dir.join("credentials.yaml");
    }

    pub async fn load(&self) -> Result<Option<Credentials>> {
        let file_path = self.file_path();
        if !file_path.exists() {
            return Ok(None);
        }

        let payload = fs::read_to_string(file_path).await?;
        let credentials: Credentials = serde_yaml::from_str(&payload)?;

        return Ok(Some(credentials));
    }

    /// The stored token, if any. Blank tokens count as logged out.
    pub async fn token(&self) -> Result<Option<String>> {
        let credentials = self.load().await?;
        return Ok(credentials
            .map(|e| return e.token)
            .filter(|token| return !token.trim().is_empty()));
    }

    pub async fn save(&self, token: &str) -> Result<()> {
        let credentials = Credentials {
            token: token.trim().to_string(),
            saved_at: Local::now().to_rfc3339_opts(SecondsFormat::Secs, false),
        };
        let payload = serde_yaml::to_string(&credentials)?;

        if !self.cache_dir.exists() {
            fs::create_dir_all(&self.cache_dir).await?;
        }

        let mut file = fs::File::create(self.file_path()).await?;
        file.write_all(payload.as_bytes()).await?;

        return Ok(());
    }

    pub async fn delete(&self) -> Result<()> {
        let file_path = self.file_path();
        if !file_path.exists() {
            return Ok(());
        }

        fs::remove_file(file_path).await?;
        return Ok(());
    }
}
