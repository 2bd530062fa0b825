use std::io;

use crate::plural::PluralError;

/// Load-time error for a single message catalog.
///
/// Query-time operations never surface this; a catalog that fails to load is
/// simply absent from the layered lookup.
#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum MoError {
    #[error("IO Error: {0}")]
    Io(String),
    #[error("Invalid Format: {0}")]
    InvalidFormat(String),
    #[error("Wrong magic: {0:#010x}")]
    WrongMagic(u32),
    #[error("Unsupported version: {major}.{minor}")]
    UnsupportedVersion { major: u32, minor: u32 },
    #[error("Out of bounds: {0}")]
    OutOfBounds(String),
    #[error("Corrupt hash table: slot {slot} holds {value}")]
    CorruptHashTable { slot: u32, value: u32 },
    #[error("Invalid plural forms: {0}")]
    PluralForms(String),
}

impl From<io::Error> for MoError {
    fn from(e: io::Error) -> Self {
        MoError::Io(e.to_string())
    }
}

impl From<binrw::Error> for MoError {
    fn from(e: binrw::Error) -> Self {
        MoError::InvalidFormat(e.to_string())
    }
}

impl From<PluralError> for MoError {
    fn from(e: PluralError) -> Self {
        MoError::PluralForms(e.to_string())
    }
}

impl From<&'static str> for MoError {
    fn from(s: &'static str) -> Self {
        MoError::InvalidFormat(s.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MoError>;
