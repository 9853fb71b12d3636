//! Pickle codec (encode/decode)
//!
//! This module moves a frame in and out of RGBA pixels.
//!
//! # Format
//!
//! ```text
//! [SIGNATURE "PCKL" (4)] [LENGTH BE (4)] [PAYLOAD 255-b (LENGTH)] [PADDING]
//! ```
//!
//! The stream is packed row-major, three channel-bytes per pixel into R, G
//! and B. Alpha is always 255 and never carries data.

use bytes::Bytes;
use serde_json::Value;
use tracing::{debug, instrument, trace};

use super::{
    CHANNELS_PER_PIXEL, Error, FrameHeader, HEADER_SIZE, MAX_PAYLOAD_SIZE, PayloadError,
    PixelBuffer, Result, invert, solve,
};

/// Encoder options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CodecConfig {
    /// Filler written after the payload to complete the last rows
    pub padding_byte: u8,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self { padding_byte: 0 }
    }
}

/// Frame encoder
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    config: CodecConfig,
}

impl Encoder {
    /// Create an encoder with default options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an encoder with explicit options
    #[must_use]
    pub const fn with_config(config: CodecConfig) -> Self {
        Self { config }
    }

    /// Get encoder options
    #[must_use]
    pub const fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encode a payload into a pixel buffer
    ///
    /// # Errors
    ///
    /// Returns [`Error::PayloadTooLarge`] if the payload does not fit the
    /// 32-bit length field.
    #[instrument(level = "trace", skip(self, payload), fields(len = payload.len()))]
    pub fn encode(&self, payload: &[u8]) -> Result<PixelBuffer> {
        let header = FrameHeader::for_len(payload.len())?;
        let frame_len = header.frame_len();
        let grid = solve(frame_len.div_ceil(CHANNELS_PER_PIXEL as u64)).ok_or(
            Error::PayloadTooLarge {
                size: payload.len() as u64,
                max: MAX_PAYLOAD_SIZE,
            },
        )?;
        let capacity = usize::try_from(grid.capacity()).map_err(|_| Error::PayloadTooLarge {
            size: payload.len() as u64,
            max: usize::MAX as u64,
        })?;

        let mut channels = Vec::with_capacity(capacity);
        channels.extend_from_slice(&header.to_bytes());
        channels.extend(payload.iter().copied().map(invert));
        channels.resize(capacity, self.config.padding_byte);

        trace!(
            %grid,
            frame_len,
            padding = capacity as u64 - frame_len,
            "packing frame"
        );

        Ok(PixelBuffer::pack(grid, &channels))
    }

    /// Serialize a JSON document and encode it
    pub fn encode_document(&self, document: &Value) -> Result<PixelBuffer> {
        let payload = serde_json::to_vec(document).map_err(PayloadError::from)?;
        self.encode(&payload)
    }
}

/// Encode a payload with default options
///
/// # Errors
///
/// Returns [`Error::PayloadTooLarge`] if the payload is 2^32 bytes or more.
pub fn encode(payload: &[u8]) -> Result<PixelBuffer> {
    Encoder::new().encode(payload)
}

/// Serialize a JSON document and encode it with default options
pub fn encode_document(document: &Value) -> Result<PixelBuffer> {
    Encoder::new().encode_document(document)
}

/// Extract the raw payload bytes from a pixel buffer
///
/// Only the first `8 + length` channel-bytes are read; padding is never
/// touched.
///
/// # Errors
///
/// Returns an error if:
/// - The signature is missing ([`Error::NotAPickle`])
/// - The length field is cut off ([`Error::TruncatedHeader`])
/// - The declared length exceeds the buffer ([`Error::TruncatedData`])
#[instrument(level = "trace", skip(buffer), fields(grid = %buffer.grid()))]
pub fn extract(buffer: &PixelBuffer) -> Result<Bytes> {
    let mut channels = buffer.channels();

    let head: Vec<u8> = channels.by_ref().take(HEADER_SIZE).collect();
    let header = FrameHeader::from_bytes(&head).inspect_err(|err| {
        debug!(error = %err, "rejecting buffer header");
    })?;

    let capacity = buffer.channel_capacity();
    if header.frame_len() > capacity {
        let err = Error::TruncatedData {
            declared: u64::from(header.payload_len()),
            available: capacity.saturating_sub(HEADER_SIZE as u64),
        };
        debug!(error = %err, "rejecting buffer header");
        return Err(err);
    }

    // Bounded by the capacity check above.
    let len = header.payload_len() as usize;
    let mut payload = Vec::with_capacity(len);
    payload.extend(channels.take(len).map(invert));

    trace!(len, "extracted payload");
    Ok(Bytes::from(payload))
}

/// Decode the JSON document carried by a pixel buffer
///
/// # Errors
///
/// Returns everything [`extract`] does, plus [`Error::PayloadCorrupt`] when
/// the payload is not UTF-8 or not JSON. An empty payload is not JSON.
pub fn decode(buffer: &PixelBuffer) -> Result<Value> {
    let payload = extract(buffer)?;
    let text = std::str::from_utf8(&payload).map_err(PayloadError::from)?;
    let document = serde_json::from_str(text).map_err(PayloadError::from)?;
    Ok(document)
}
