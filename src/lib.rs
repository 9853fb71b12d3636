//! Pixel Pickle - store a JSON document inside the pixels of a PNG image
//!
//! The document's UTF-8 bytes are framed with a `"PCKL"` signature and a
//! big-endian length, packed three bytes per pixel into the R, G and B
//! channels of a near-square grid, and written out with a lossless raster
//! codec. Loading the image gives back the exact bytes.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pixel_pickle::{decode, encode_document};
//! use serde_json::json;
//!
//! let document = json!({ "expressions": { "list": [] } });
//!
//! // Pack into pixels
//! let pixels = encode_document(&document)?;
//!
//! // Recover from pixels
//! let restored = decode(&pixels)?;
//! assert_eq!(restored, document);
//! # Ok::<(), pixel_pickle::Error>(())
//! ```
//!
//! # Features
//!
//! - **Lossless framing** - signature, length header, row-major RGB packing
//! - **Near-square grids** - the smallest grid within one row of minimal
//! - **PNG adapter** - [`PngCodec`] turns pixel buffers into files and back
//! - **Host sessions** - [`Pickler`] saves and restores a [`HostState`]

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod host;
pub mod protocol;
pub mod raster;

pub use host::{CalculatorKind, HostState, LoadOutcome, Pickler, PicklerConfig, SavedPickle};
pub use protocol::{
    CodecConfig, Encoder, Error, GridSize, HEADER_SIZE, MAX_PAYLOAD_SIZE, PayloadError,
    PixelBuffer, Result, SIGNATURE, decode, encode, encode_document, extract,
};
pub use raster::{PngCodec, RasterCodec};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
