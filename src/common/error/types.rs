//! Error variants produced while decoding a Data stream.
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for blipkit operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A read would cross the end of the buffer or of the current region
    #[error("Truncated input: needed {needed} bytes at offset {offset}, {available} available")]
    TruncatedInput {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// Picture descriptor header size is not 0x44
    #[error("Unsupported picture header size: 0x{0:04X}")]
    UnsupportedHeaderSize(u16),

    /// Mapping mode is neither MM_SHAPE (0x64) nor MM_SHAPEFILE (0x66)
    #[error("Unsupported mapping mode: 0x{0:04X}")]
    UnsupportedMappingMode(u16),

    /// Picture descriptor declares extended properties
    #[error("Unsupported extended property count: {0}")]
    UnsupportedExtendedProperties(u16),

    /// The record following an FBSE is not a known BLIP type
    #[error("Unknown BLIP record type: 0x{0:04X}")]
    UnknownBlipType(u16),

    /// Declared BLIP length leaves no room for a payload
    #[error("BLIP record length {declared} leaves {remaining} payload bytes")]
    NegativeOrZeroPayload { declared: u32, remaining: i64 },

    /// A record field violates its structural constraints
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// Writing an extracted payload failed
    #[error("Failed to persist image to {}: {source}", path.display())]
    PersistFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The host option string could not be understood
    #[error("Invalid plugin options: {0}")]
    InvalidOptions(String),
}

impl Error {
    /// Whether the failure only affects the element being decoded.
    ///
    /// Recoverable errors mean "no image for this element"; the scan moves
    /// on to the next element. Everything else aborts the analysis call.
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::PersistFailure { .. } | Self::InvalidOptions(_))
    }
}

/// Result type for blipkit operations.
pub type Result<T> = std::result::Result<T, Error>;
