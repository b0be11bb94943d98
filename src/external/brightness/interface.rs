use crate::external::command::CommandError;
use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// A display brightness percentage, always within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "u8")]
pub struct BrightnessValue(u8);

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("brightness {0} is outside of the 0-100 range")]
pub struct BrightnessOutOfRange(pub i64);

impl BrightnessValue {
    pub const MIN: BrightnessValue = BrightnessValue(0);
    pub const MAX: BrightnessValue = BrightnessValue(100);

    pub fn new(percentage: u8) -> Result<BrightnessValue, BrightnessOutOfRange> {
        if percentage > Self::MAX.0 {
            Err(BrightnessOutOfRange(percentage.into()))
        } else {
            Ok(BrightnessValue(percentage))
        }
    }

    /// Create a value from an arbitrary integer, saturating at the range bounds.
    pub fn clamped(value: i32) -> BrightnessValue {
        BrightnessValue(value.clamp(Self::MIN.0.into(), Self::MAX.0.into()) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn is_min(self) -> bool {
        self == Self::MIN
    }

    pub fn is_max(self) -> bool {
        self == Self::MAX
    }
}

impl TryFrom<u8> for BrightnessValue {
    type Error = BrightnessOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        BrightnessValue::new(value)
    }
}

impl fmt::Display for BrightnessValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A failure to talk to the display over its control protocol.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("no {0} field in the display's response")]
    MissingField(String),

    #[error("couldn't read a brightness value from {line:?}")]
    InvalidValue { line: String },
}

/// A trait allowing to get and set display brightness
#[async_trait]
pub trait BrightnessController: Send + Sync {
    /// Query the display for its current brightness.
    async fn get_brightness(&self) -> Result<BrightnessValue, ProtocolError>;

    /// Set the display's brightness. On error, the display may or may not have
    /// changed its brightness.
    async fn set_brightness(&self, value: BrightnessValue) -> Result<(), ProtocolError>;
}
