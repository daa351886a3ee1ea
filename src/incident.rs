use crate::hist::{fill_1d, Hist1D};

/// Unbinned incident energies, kept in insertion order, each with a weight.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IncidentEnergies {
    entries: Vec<(f64, f64)>,
}

impl IncidentEnergies {

    pub fn new() -> Self { Self::default() }

    /// Append every value with a weight of `1.0`.
    pub fn extend(&mut self, values: &[f64]) {
        self.entries.extend(values.iter().map(|&v| (v, 1.0)));
    }

    /// Multiply every stored weight by `k`.
    pub fn scale(&mut self, k: f64) {
        for (_, weight) in self.entries.iter_mut() { *weight *= k }
    }

    /// Fill `hist` with every stored energy, each with weight `weight`, and
    /// return how many NaN energies were left out.
    ///
    /// The stored per-entry weights are deliberately not used here.
    pub fn fill_uniform(&self, hist: &mut Hist1D, weight: f64) -> usize {
        fill_1d(hist, self.entries.iter().map(|&(energy, _)| energy), weight)
    }

    pub fn entries(&self) -> &[(f64, f64)] { &self.entries }
}
