use crate::external::brightness::BrightnessValue;
use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StateStoreError {
    #[error("no saved brightness at {}", .0.display())]
    NotFound(PathBuf),

    #[error("saved brightness {contents:?} is not a percentage")]
    Corrupt { contents: String },

    #[error("couldn't read saved brightness from {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("couldn't save brightness to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Durable storage for a single [BrightnessValue].
///
/// Load failures are expected (first run, garbage left in the file) and
/// should be recovered from by the caller. A failed save means the next
/// invocation will start from a stale value.
#[async_trait]
pub trait StateStore: Send + Sync {
    async fn load(&self) -> Result<BrightnessValue, StateStoreError>;
    async fn save(&self, value: BrightnessValue) -> Result<(), StateStoreError>;
}

/// Parse the persisted representation of a value: a decimal integer,
/// optionally surrounded by whitespace.
pub fn parse_saved_value(contents: &str) -> Result<BrightnessValue, StateStoreError> {
    let corrupt = || StateStoreError::Corrupt {
        contents: contents.to_owned(),
    };
    let raw: u8 = contents.trim().parse().map_err(|_| corrupt())?;
    BrightnessValue::new(raw).map_err(|_| corrupt())
}
