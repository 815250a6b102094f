// TOML file backed token store
use crate::application::token_store::{StoreError, TokenStore, TOKEN_KEY};
use crate::domain::session::SessionToken;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Stores the token as `spaceguard_token = "..."`, leaving any other keys intact.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[cfg(test)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A file that does not parse is treated as empty so the next save replaces it.
    async fn read_table(&self) -> Result<toml::Table, StoreError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(toml::Table::new()),
            Err(e) => return Err(e.into()),
        };

        match contents.parse::<toml::Table>() {
            Ok(table) => Ok(table),
            Err(e) => {
                tracing::warn!(
                    "Token store {} is corrupt, starting fresh: {}",
                    self.path.display(),
                    e
                );
                Ok(toml::Table::new())
            }
        }
    }

    /// Write to a sibling temp file, then rename over the store.
    async fn write_table(&self, table: &toml::Table) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let contents = toml::to_string(table)?;
        let temp_file = temp_path(&self.path);
        tokio::fs::write(&temp_file, contents).await?;
        tokio::fs::rename(&temp_file, &self.path).await?;
        Ok(())
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> Result<Option<SessionToken>, StoreError> {
        let table = self.read_table().await?;
        Ok(table
            .get(TOKEN_KEY)
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .map(SessionToken::new))
    }

    async fn save(&self, token: &SessionToken) -> Result<(), StoreError> {
        let mut table = self.read_table().await?;
        table.insert(
            TOKEN_KEY.to_string(),
            toml::Value::String(token.as_str().to_string()),
        );
        self.write_table(&table).await?;
        tracing::debug!("Session token written to {}", self.path.display());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let mut table = self.read_table().await?;
        if table.remove(TOKEN_KEY).is_some() {
            self.write_table(&table).await?;
        }
        Ok(())
    }
}
