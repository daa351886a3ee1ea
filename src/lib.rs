//! Histogram bookkeeping for the samples of a thin-slice cross-section fit.
//!
//! A [`ThinSliceSample`] owns fine histograms for each selection channel plus
//! incident-energy histograms, can mirror them in a coarser binning, and keeps
//! track of the normalization factors applied to them.

pub mod config;
pub mod error;
pub mod hist;
pub mod incident;
pub mod rebin;
pub mod sample;
pub mod utils;

/// Identifier of a selection channel.
pub type ChannelId = i32;

pub use binning::Edges;
pub use error::SampleError;
pub use hist::{Coords, Hist1D, Hist2D, Hist3D, SelectionHist};
pub use rebin::RebinScheme;
pub use sample::{SignalRange, ThinSliceSample};
