//! Moving the content of fine histograms into coarser binnings.
//!
//! Every fine bin is represented by its centre (or by `-inf`/`+inf` for the
//! underflow/overflow bins) and its whole content is added to the coarse bin
//! that contains that coordinate. Axis lookup is lower-edge inclusive and
//! upper-edge exclusive, so the total content is preserved exactly, whatever
//! the relation between fine and coarse edges.

use std::collections::BTreeMap;

use ndhistogram::Histogram;

use binning::{representative, Edges};

use crate::error::{Result, SampleError};
use crate::hist::{clear_1d, Hist1D, Hist2D, Hist3D, SelectionHist};
use crate::ChannelId;

/// Coarse edges for every selection channel (one `Edges` per axis) and for the
/// incident-energy histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct RebinScheme {
    selections: BTreeMap<ChannelId, Vec<Edges>>,
    incident: Edges,
}

impl RebinScheme {

    pub fn new(incident: Edges) -> Self {
        Self { selections: BTreeMap::new(), incident }
    }

    pub fn with_selection(mut self, id: ChannelId, axes: Vec<Edges>) -> Self {
        self.insert(id, axes);
        self
    }

    /// Set the coarse edges of channel `id`, replacing any earlier ones.
    pub fn insert(&mut self, id: ChannelId, axes: Vec<Edges>) {
        self.selections.insert(id, axes);
    }

    pub fn selection(&self, id: ChannelId) -> Option<&[Edges]> {
        self.selections.get(&id).map(Vec::as_slice)
    }

    pub fn incident(&self) -> &Edges { &self.incident }
}

/// Recompute `coarse` from `fine`, dispatching on their common dimensionality.
pub fn rebin_selection(id: ChannelId, fine: &SelectionHist, coarse: &mut SelectionHist) -> Result<()> {
    use SelectionHist::*;
    match (fine, coarse) {
        (OneD  (f), OneD  (c)) => rebin_1d(f, c),
        (TwoD  (f), TwoD  (c)) => rebin_2d(f, c),
        (ThreeD(f), ThreeD(c)) => rebin_3d(f, c),
        (f, c) => return Err(SampleError::RebinDimension { id, expected: f.dimension(), got: c.dimension() }),
    }
    Ok(())
}

pub fn rebin_1d(fine: &Hist1D, coarse: &mut Hist1D) {
    clear_1d(coarse);
    for item in fine.iter() {
        if *item.value == 0.0 { continue }
        coarse.fill_with(&representative(&item.bin), *item.value);
    }
}

pub fn rebin_2d(fine: &Hist2D, coarse: &mut Hist2D) {
    coarse.values_mut().for_each(|v| *v = 0.0);
    for item in fine.iter() {
        if *item.value == 0.0 { continue }
        let (x, y) = &item.bin;
        coarse.fill_with(&(representative(x), representative(y)), *item.value);
    }
}

pub fn rebin_3d(fine: &Hist3D, coarse: &mut Hist3D) {
    coarse.values_mut().for_each(|v| *v = 0.0);
    for item in fine.iter() {
        if *item.value == 0.0 { continue }
        let (x, y, z) = &item.bin;
        coarse.fill_with(&(representative(x), representative(y), representative(z)), *item.value);
    }
}
