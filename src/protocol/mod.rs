//! Pickle frame core implementation
//!
//! This module provides the wire format, the dimension solver, the pixel
//! buffer and the codec that moves a frame in and out of RGBA pixels.

mod codec;
mod error;
mod grid;
mod header;
mod pixels;
mod transform;

pub use codec::{CodecConfig, Encoder, decode, encode, encode_document, extract};
pub use error::{Error, PayloadError, Result};
pub use grid::{GridSize, solve};
pub use header::FrameHeader;
pub use pixels::PixelBuffer;
pub use transform::{invert, invert_in_place};

/// Pickle signature: "PCKL" in ASCII
pub const SIGNATURE: [u8; 4] = *b"PCKL";

/// Header size in channel-bytes (signature + big-endian length)
pub const HEADER_SIZE: usize = 8;

/// Channel-bytes carried by one pixel (R, G, B)
pub const CHANNELS_PER_PIXEL: usize = 3;

/// Bytes of backing storage per pixel (R, G, B, A)
pub const BYTES_PER_PIXEL: usize = 4;

/// Alpha value written to every pixel
pub const OPAQUE_ALPHA: u8 = 0xFF;

/// Largest payload the 32-bit length field can describe
pub const MAX_PAYLOAD_SIZE: u64 = u32::MAX as u64;
