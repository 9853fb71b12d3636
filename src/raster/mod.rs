//! Raster codec boundary.
//!
//! The frame codec only ever sees decoded RGBA buffers. Turning those into
//! image files and back is the job of a [`RasterCodec`]; [`PngCodec`] is the
//! lossless implementation shipped with the crate.

mod png_codec;

pub use png_codec::{Compression, PngCodec, PngConfig};

use crate::protocol::{PixelBuffer, Result};

/// Lossless conversion between image files and RGBA pixel buffers
///
/// Implementations must be channel-exact: every R, G and B value written by
/// [`encode_image`](Self::encode_image) has to come back unchanged from
/// [`decode_image`](Self::decode_image).
pub trait RasterCodec {
    /// Decode an image file into an RGBA buffer
    fn decode_image(&self, bytes: &[u8]) -> Result<PixelBuffer>;

    /// Encode an RGBA buffer into an image file
    fn encode_image(&self, buffer: &PixelBuffer) -> Result<Vec<u8>>;

    /// File extension for encoded images, without the dot
    fn extension(&self) -> &'static str;
}
