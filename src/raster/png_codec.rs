//! PNG raster codec.

use std::io::Cursor;

use png::{BitDepth, ColorType, Transformations};
use tracing::{debug, instrument, trace};

use super::RasterCodec;
use crate::protocol::{
    BYTES_PER_PIXEL, CHANNELS_PER_PIXEL, Error, HEADER_SIZE, MAX_PAYLOAD_SIZE, OPAQUE_ALPHA,
    PixelBuffer, Result, solve,
};

/// Deflate effort used when writing PNG files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Compression {
    /// Fastest encode, larger files
    Fast,
    /// Balanced
    #[default]
    Default,
    /// Smallest files, slowest encode
    Best,
}

impl Compression {
    const fn to_png(self) -> png::Compression {
        match self {
            Self::Fast => png::Compression::Fast,
            Self::Default => png::Compression::Default,
            Self::Best => png::Compression::Best,
        }
    }
}

/// PNG codec options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PngConfig {
    /// Deflate effort for encoded files.
    pub compression: Compression,
    /// Largest image, in pixels, accepted on decode.
    ///
    /// Defaults to the grid of the largest frame a 32-bit length can
    /// describe, so every pickle decodes. Lower it to bound memory when
    /// reading untrusted files.
    pub max_image_pixels: u64,
}

impl Default for PngConfig {
    fn default() -> Self {
        Self {
            compression: Compression::Default,
            max_image_pixels: largest_frame_pixels(),
        }
    }
}

/// Pixels in the grid of a frame carrying a [`MAX_PAYLOAD_SIZE`] payload
fn largest_frame_pixels() -> u64 {
    let cells = (MAX_PAYLOAD_SIZE + HEADER_SIZE as u64).div_ceil(CHANNELS_PER_PIXEL as u64);
    solve(cells).map_or(u64::MAX, |grid| grid.cells())
}

/// Lossless PNG implementation of [`RasterCodec`]
#[derive(Debug, Clone, Default)]
pub struct PngCodec {
    config: PngConfig,
}

impl PngCodec {
    /// Create a codec with default options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a codec with explicit options
    #[must_use]
    pub const fn with_config(config: PngConfig) -> Self {
        Self { config }
    }

    /// Get codec options
    #[must_use]
    pub const fn config(&self) -> &PngConfig {
        &self.config
    }
}

fn raster_err(context: &str, err: impl std::fmt::Display) -> Error {
    Error::Raster(format!("{context}: {err}"))
}

impl RasterCodec for PngCodec {
    #[instrument(level = "trace", skip(self, bytes), fields(len = bytes.len()))]
    fn decode_image(&self, bytes: &[u8]) -> Result<PixelBuffer> {
        let mut decoder = png::Decoder::new(Cursor::new(bytes));
        decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
        let mut reader = decoder
            .read_info()
            .map_err(|e| raster_err("png decode header failed", e))?;

        let (width, height) = {
            let info = reader.info();
            (info.width, info.height)
        };
        let pixels = u64::from(width) * u64::from(height);
        if pixels > self.config.max_image_pixels {
            debug!(width, height, "refusing oversized png");
            return Err(Error::ImageTooLarge {
                pixels,
                max: self.config.max_image_pixels,
            });
        }

        let mut buf = vec![0u8; reader.output_buffer_size()];
        let frame = reader
            .next_frame(&mut buf)
            .map_err(|e| raster_err("png decode frame failed", e))?;
        let samples = &buf[..frame.buffer_size()];

        let rgba_len = usize::try_from(pixels)
            .ok()
            .and_then(|p| p.checked_mul(BYTES_PER_PIXEL))
            .ok_or_else(|| Error::Raster("png dimensions overflow".to_string()))?;
        let mut rgba = Vec::with_capacity(rgba_len);

        match (frame.color_type, frame.bit_depth) {
            (ColorType::Rgba, BitDepth::Eight) => rgba.extend_from_slice(samples),
            (ColorType::Rgb, BitDepth::Eight) => {
                for rgb in samples.chunks_exact(3) {
                    rgba.extend_from_slice(&[rgb[0], rgb[1], rgb[2], OPAQUE_ALPHA]);
                }
            }
            (ColorType::Grayscale, BitDepth::Eight) => {
                for &g in samples {
                    rgba.extend_from_slice(&[g, g, g, OPAQUE_ALPHA]);
                }
            }
            (ColorType::GrayscaleAlpha, BitDepth::Eight) => {
                for ga in samples.chunks_exact(2) {
                    rgba.extend_from_slice(&[ga[0], ga[0], ga[0], ga[1]]);
                }
            }
            (ct, bd) => {
                return Err(Error::Raster(format!(
                    "unsupported png output format: color={ct:?} depth={bd:?}"
                )));
            }
        }

        trace!(width, height, color = ?frame.color_type, "decoded png");
        PixelBuffer::from_rgba(width, height, rgba)
    }

    #[instrument(level = "trace", skip(self, buffer), fields(grid = %buffer.grid()))]
    fn encode_image(&self, buffer: &PixelBuffer) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, buffer.width(), buffer.height());
            encoder.set_color(ColorType::Rgba);
            encoder.set_depth(BitDepth::Eight);
            encoder.set_compression(self.config.compression.to_png());
            let mut writer = encoder
                .write_header()
                .map_err(|e| raster_err("png encode header failed", e))?;
            writer
                .write_image_data(buffer.as_rgba())
                .map_err(|e| raster_err("png encode data failed", e))?;
        }

        trace!(len = out.len(), "encoded png");
        Ok(out)
    }

    fn extension(&self) -> &'static str {
        "png"
    }
}
