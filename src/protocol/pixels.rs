//! RGBA pixel buffer
//!
//! Row-major 8-bit RGBA storage. Only R, G and B carry frame data; alpha is
//! forced opaque when packing and skipped when linearizing.

use super::{BYTES_PER_PIXEL, CHANNELS_PER_PIXEL, Error, GridSize, OPAQUE_ALPHA, Result};

/// Rectangular RGBA pixel buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw RGBA storage, checking it matches `width * height * 4`
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = u64::from(width) * u64::from(height) * BYTES_PER_PIXEL as u64;
        if data.len() as u64 != expected {
            return Err(Error::BufferShape {
                width,
                height,
                expected,
                len: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Pack channel-bytes into a grid, three per pixel, alpha opaque
    ///
    /// Channel-bytes beyond the grid's capacity are dropped and missing ones
    /// are left at zero; callers pad the stream to exactly
    /// [`GridSize::capacity`].
    #[must_use]
    pub fn pack(grid: GridSize, channels: &[u8]) -> Self {
        let cells = usize::try_from(grid.cells()).unwrap_or(usize::MAX);
        let mut data = vec![0u8; cells * BYTES_PER_PIXEL];

        for (pixel, rgb) in data
            .chunks_exact_mut(BYTES_PER_PIXEL)
            .zip(channels.chunks(CHANNELS_PER_PIXEL))
        {
            pixel[..rgb.len()].copy_from_slice(rgb);
        }
        for pixel in data.chunks_exact_mut(BYTES_PER_PIXEL) {
            pixel[CHANNELS_PER_PIXEL] = OPAQUE_ALPHA;
        }

        Self {
            width: grid.width,
            height: grid.height,
            data,
        }
    }

    /// Get width in pixels
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Get height in pixels
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Get grid dimensions
    #[must_use]
    pub const fn grid(&self) -> GridSize {
        GridSize::new(self.width, self.height)
    }

    /// Channel-bytes the buffer carries (`width * height * 3`)
    #[must_use]
    pub const fn channel_capacity(&self) -> u64 {
        self.grid().capacity()
    }

    /// Raw RGBA storage
    #[must_use]
    pub fn as_rgba(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw RGBA storage
    pub fn as_rgba_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the buffer, returning raw RGBA storage
    #[must_use]
    pub fn into_rgba(self) -> Vec<u8> {
        self.data
    }

    /// Iterate R, G, B channel-bytes in row-major order, skipping alpha
    pub fn channels(&self) -> impl Iterator<Item = u8> + '_ {
        self.data
            .chunks_exact(BYTES_PER_PIXEL)
            .flat_map(|pixel| pixel[..CHANNELS_PER_PIXEL].iter().copied())
    }

    /// Collect the first `count` channel-bytes
    ///
    /// Stops early if the buffer holds fewer.
    #[must_use]
    pub fn read_channels(&self, count: usize) -> Vec<u8> {
        let mut out = Vec::with_capacity(count.min(self.data.len()));
        out.extend(self.channels().take(count));
        out
    }

    /// Linearize the whole buffer into `width * height * 3` channel-bytes
    #[must_use]
    pub fn to_channels(&self) -> Vec<u8> {
        self.read_channels(usize::MAX)
    }
}
