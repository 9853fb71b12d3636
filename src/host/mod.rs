//! Host application glue.
//!
//! A host owns the document being pickled. [`Pickler`] pulls the document out
//! of a [`HostState`], runs it through the frame codec and a
//! [`RasterCodec`](crate::raster::RasterCodec), and hands restored documents
//! back all-or-nothing.

mod calculator;
mod pickler;

pub use calculator::{CalculatorDefaults, CalculatorKind, Viewport, fill_missing_viewport};
pub use pickler::{LoadOutcome, Pickler, PicklerConfig, SavedPickle};

use serde_json::Value;

/// Application state provider consumed by [`Pickler`]
pub trait HostState {
    /// Current document
    fn state(&self) -> Value;

    /// Replace the current document
    fn set_state(&mut self, state: Value);

    /// Display title of the current document, if it has one
    fn title(&self) -> Option<String> {
        None
    }

    /// Rename the current document
    ///
    /// Hosts without titles can ignore this.
    fn set_title(&mut self, _title: &str) {}

    /// Calculator variant the host is running
    fn kind(&self) -> CalculatorKind {
        CalculatorKind::Graphing
    }
}
