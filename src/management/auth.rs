use std::path::{Path, PathBuf};

use crate::{config, error::Result, types::Token};

/// Keeps the last obtained access token on disk.
///
/// The cache is a plain JSON file; there is no expiry or refresh handling,
/// a stale token simply makes the next API call fail.
pub struct TokenManager {
    token: Token,
    path: PathBuf,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        Self::with_path(token, Self::token_path())
    }

    pub fn with_path(token: Token, path: PathBuf) -> Self {
        TokenManager { token, path }
    }

    pub async fn load() -> Result<Self> {
        Self::load_from(&Self::token_path()).await
    }

    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = async_fs::read_to_string(path).await?;
        let token: Token = serde_json::from_str(&content)?;
        Ok(Self {
            token,
            path: path.to_path_buf(),
        })
    }

    pub async fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.token)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    pub fn token_path() -> PathBuf {
        config::data_dir().join("cache").join("token.json")
    }

    pub fn access_token(&self) -> &str {
        &self.token.access_token
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }
}
