//! Pickle error types

use thiserror::Error;

/// Pickle codec errors
#[derive(Error, Debug)]
pub enum Error {
    /// The buffer does not start with the pickle signature
    #[error("not a pickle: expected signature \"PCKL\", got {found:02x?}")]
    NotAPickle {
        /// Leading channel-bytes found in place of the signature
        found: Vec<u8>,
    },

    /// Declared payload length exceeds the buffer's channel capacity
    #[error("truncated data: header declares {declared} payload bytes, only {available} available")]
    TruncatedData {
        /// Payload length read from the header
        declared: u64,
        /// Channel-bytes available after the header
        available: u64,
    },

    /// Signature present but the length field is cut off
    #[error("truncated header: need {needed} channel-bytes, got {got}")]
    TruncatedHeader {
        /// Channel-bytes the header occupies
        needed: usize,
        /// Channel-bytes available
        got: usize,
    },

    /// Payload bytes were recovered but are not a valid document
    #[error("payload corrupt: {0}")]
    PayloadCorrupt(#[from] PayloadError),

    /// Payload cannot be described by the 32-bit length field
    #[error("payload too large: {size} bytes (max {max})")]
    PayloadTooLarge {
        /// Payload size
        size: u64,
        /// Maximum allowed
        max: u64,
    },

    /// RGBA storage does not match the declared dimensions
    #[error("pixel buffer shape mismatch: {width}x{height} needs {expected} bytes, got {len}")]
    BufferShape {
        /// Declared width
        width: u32,
        /// Declared height
        height: u32,
        /// Required storage length
        expected: u64,
        /// Actual storage length
        len: usize,
    },

    /// Decoded image exceeds the configured pixel cap
    #[error("image too large: {pixels} pixels (max {max})")]
    ImageTooLarge {
        /// Pixel count of the image
        pixels: u64,
        /// Maximum allowed
        max: u64,
    },

    /// Raster codec failure
    #[error("raster codec error: {0}")]
    Raster(String),
}

/// Reasons a recovered payload is rejected at the document layer
#[derive(Error, Debug)]
pub enum PayloadError {
    /// Invalid UTF-8
    #[error("invalid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Invalid JSON
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Check if this error only means the image carries no pickle
    #[must_use]
    pub const fn is_not_a_pickle(&self) -> bool {
        matches!(self, Self::NotAPickle { .. })
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
