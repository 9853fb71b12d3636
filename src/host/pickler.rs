//! Save/load session over a host and a raster codec.

use tracing::{debug, instrument};

use super::{HostState, fill_missing_viewport};
use crate::protocol::{CodecConfig, Encoder, GridSize, Result, decode};
use crate::raster::{PngCodec, RasterCodec};

/// Session options
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PicklerConfig {
    /// Frame encoder options.
    pub codec: CodecConfig,
    /// Title used when the host has none.
    pub default_title: String,
    /// Insert the host variant's default viewport into restored documents
    /// that lack one. Off by default, so a restored document is exactly the
    /// saved one.
    pub fill_missing_viewport: bool,
}

impl Default for PicklerConfig {
    fn default() -> Self {
        Self {
            codec: CodecConfig::default(),
            default_title: "untitled".to_string(),
            fill_missing_viewport: false,
        }
    }
}

/// Image file produced by [`Pickler::save`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedPickle {
    /// Suggested file name, extension included
    pub file_name: String,
    /// Encoded image file
    pub bytes: Vec<u8>,
    /// Pixel grid the document was packed into
    pub grid: GridSize,
}

/// Result of [`Pickler::load`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The document was applied to the host
    Restored {
        /// Title applied from the file name, if any
        title: Option<String>,
    },
    /// The image carries no pickle; the host was not touched
    Ignored,
}

/// Pickles host documents into images and restores them
///
/// Image files larger than the raster codec's pixel cap are refused on load;
/// see [`PngConfig::max_image_pixels`](crate::raster::PngConfig::max_image_pixels).
#[derive(Debug, Clone)]
pub struct Pickler<C = PngCodec> {
    raster: C,
    encoder: Encoder,
    config: PicklerConfig,
}

impl Pickler<PngCodec> {
    /// Create a PNG session with default options
    #[must_use]
    pub fn new() -> Self {
        Self::with_codec(PngCodec::new(), PicklerConfig::default())
    }
}

impl Default for Pickler<PngCodec> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: RasterCodec> Pickler<C> {
    /// Create a session over an explicit raster codec
    pub fn with_codec(raster: C, config: PicklerConfig) -> Self {
        Self {
            raster,
            encoder: Encoder::with_config(config.codec),
            config,
        }
    }

    /// Get session options
    #[must_use]
    pub const fn config(&self) -> &PicklerConfig {
        &self.config
    }

    /// Get the raster codec
    #[must_use]
    pub const fn raster(&self) -> &C {
        &self.raster
    }

    /// Title the host's document is saved under
    #[must_use]
    pub fn resolve_title<H: HostState + ?Sized>(&self, host: &H) -> String {
        host.title()
            .map(|title| title.trim().to_string())
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| self.config.default_title.clone())
    }

    /// Pickle the host's current document into an image file
    #[instrument(level = "trace", skip_all)]
    pub fn save<H: HostState + ?Sized>(&self, host: &H) -> Result<SavedPickle> {
        let buffer = self.encoder.encode_document(&host.state())?;
        let bytes = self.raster.encode_image(&buffer)?;
        let file_name = file_name_for(
            &self.resolve_title(host),
            &self.config.default_title,
            self.raster.extension(),
        );

        debug!(%file_name, grid = %buffer.grid(), len = bytes.len(), "saved pickle");
        Ok(SavedPickle {
            file_name,
            bytes,
            grid: buffer.grid(),
        })
    }

    /// Restore a document from an image file
    ///
    /// Images without a pickle are [`LoadOutcome::Ignored`]. On any error the
    /// host is left untouched.
    #[instrument(level = "trace", skip(self, host, file), fields(len = file.len()))]
    pub fn load<H: HostState + ?Sized>(
        &self,
        host: &mut H,
        file: &[u8],
        file_name: Option<&str>,
    ) -> Result<LoadOutcome> {
        let buffer = self.raster.decode_image(file)?;
        let mut state = match decode(&buffer) {
            Ok(state) => state,
            Err(err) if err.is_not_a_pickle() => {
                debug!("image carries no pickle; ignoring");
                return Ok(LoadOutcome::Ignored);
            }
            Err(err) => return Err(err),
        };

        if self.config.fill_missing_viewport {
            let kind = host.kind();
            if fill_missing_viewport(&mut state, &kind) {
                debug!(%kind, "filled default viewport");
            }
        }

        let title = file_name.and_then(title_from_file_name);
        host.set_state(state);
        if let Some(title) = &title {
            host.set_title(title);
        }

        debug!(?title, "restored pickle");
        Ok(LoadOutcome::Restored { title })
    }
}

/// File name for a title, with characters unsafe in paths replaced
fn file_name_for(title: &str, fallback: &str, extension: &str) -> String {
    let sanitized: String = title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let stem = sanitized.trim().trim_matches('.');
    let stem = if stem.is_empty() { fallback } else { stem };
    format!("{stem}.{extension}")
}

/// Document title carried by a file name: the last path component without
/// its extension
fn title_from_file_name(file_name: &str) -> Option<String> {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or_default();
    let stem = match base.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => base,
    };
    let stem = stem.trim();
    (!stem.is_empty()).then(|| stem.to_string())
}
