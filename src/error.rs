use thiserror::Error;

use binning::EdgesError;

use crate::ChannelId;

/// Everything that can go wrong while building, filling, scaling or rebinning
/// a [`ThinSliceSample`](crate::ThinSliceSample).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SampleError {
    /// Only 1-, 2- and 3-dimensional histograms are supported.
    #[error("histograms must have between 1 and 3 axes, got {0}")]
    InvalidDimension(usize),

    /// Returned by accessors only: filling an unknown channel is a no-op.
    #[error("no selection channel with id {0}")]
    UnknownChannel(ChannelId),

    #[error("rebinned histograms have not been made yet")]
    NotInitialized,

    #[error("cannot invert a normalization factor of zero")]
    DivisionByZeroFactor,

    #[error("selection {id} has {expected} axes but was given {got} values")]
    DimensionMismatch { id: ChannelId, expected: usize, got: usize },

    #[error("bad bin edges for {context}: {source}")]
    Edges { context: String, #[source] source: EdgesError },

    #[error("selection {id}: beam energy bin {index} requested, but only {available} edge sets given")]
    BeamEnergyBin { id: ChannelId, index: usize, available: usize },

    #[error("selection id {0} appears more than once")]
    DuplicateChannel(ChannelId),

    #[error("no coarse binning supplied for selection {0}")]
    MissingRebinning(ChannelId),

    #[error("coarse binning for selection {id} has {got} axes, expected {expected}")]
    RebinDimension { id: ChannelId, expected: usize, got: usize },
}

impl SampleError {
    pub(crate) fn edges(context: impl Into<String>) -> impl FnOnce(EdgesError) -> Self {
        let context = context.into();
        move |source| Self::Edges { context, source }
    }
}

pub type Result<T, E = SampleError> = std::result::Result<T, E>;
