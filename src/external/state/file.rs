use super::{parse_saved_value, StateStore, StateStoreError};
use crate::external::brightness::BrightnessValue;
use async_trait::async_trait;
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tokio::fs;

/// A [StateStore] keeping the value as plain decimal text in a single file.
#[derive(Debug, Clone)]
pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    pub fn new(path: impl Into<PathBuf>) -> FileStateStore {
        FileStateStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl StateStore for FileStateStore {
    async fn load(&self) -> Result<BrightnessValue, StateStoreError> {
        let contents = fs::read_to_string(&self.path)
            .await
            .map_err(|source| match source.kind() {
                ErrorKind::NotFound => StateStoreError::NotFound(self.path.clone()),
                // Non-UTF-8 garbage is as good as any other unparsable content
                ErrorKind::InvalidData => StateStoreError::Corrupt {
                    contents: String::new(),
                },
                _ => StateStoreError::Unreadable {
                    path: self.path.clone(),
                    source,
                },
            })?;
        parse_saved_value(&contents)
    }

    async fn save(&self, value: BrightnessValue) -> Result<(), StateStoreError> {
        let write_error = |source| StateStoreError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(write_error)?;
            }
        }
        fs::write(&self.path, value.to_string())
            .await
            .map_err(write_error)?;
        log::debug!("Saved brightness {} to {}", value, self.path.display());
        Ok(())
    }
}
