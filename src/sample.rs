use std::collections::BTreeMap;

use ndhistogram::Histogram;
use tracing::{debug, trace, warn};

use binning::Edges;

use crate::config::SelectionConfig;
use crate::error::{Result, SampleError};
use crate::hist::{fill_1d, hist_1d, scale_1d, Coords, Hist1D, SelectionHist};
use crate::incident::IncidentEnergies;
use crate::rebin::{rebin_1d, rebin_selection, RebinScheme};
use crate::utils::precise_to_string;
use crate::ChannelId;

/// Half-open interval `(low, high]` of the variable that defines a signal
/// sample.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SignalRange {
    pub low: f64,
    pub high: f64,
}

impl SignalRange {
    pub fn new(low: f64, high: f64) -> Self { Self { low, high } }

    /// `low` itself is excluded, `high` itself is included.
    pub fn contains(&self, val: f64) -> bool { self.low < val && val <= self.high }
}

#[derive(Debug, Clone)]
struct Rebinned {
    selections: BTreeMap<ChannelId, SelectionHist>,
    incident: Hist1D,
}

/// Histograms of one sample (flux type / interaction category) in a thin-slice
/// analysis, together with its normalization bookkeeping.
#[derive(Debug, Clone)]
pub struct ThinSliceSample {
    name: String,
    flux_type: i32,
    is_signal: bool,
    range: SignalRange,

    nominal_flux: f64,
    factor: f64,
    data_mc_scale: f64,

    selection_names: BTreeMap<ChannelId, String>,
    selection_hists: BTreeMap<ChannelId, SelectionHist>,
    incident_hist: Hist1D,
    true_incident_hist: Hist1D,
    incident_energies: IncidentEnergies,

    // `None` until `make_rebinned_hists`
    rebinned: Option<Rebinned>,
}

impl ThinSliceSample {

    /// One histogram per entry in `selections`, with the edges of
    /// `beam_energy_bin` wherever an axis depends on the beam energy.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        flux_type: i32,
        selections: &[SelectionConfig],
        incident_bins: &Edges,
        true_incident_bins: &Edges,
        beam_energy_bin: usize,
        is_signal: bool,
        range: SignalRange,
    ) -> Result<Self> {
        let name = name.into();
        let mut selection_names = BTreeMap::new();
        let mut selection_hists = BTreeMap::new();
        for selection in selections {
            let id = selection.id;
            if selection_hists.contains_key(&id) { return Err(SampleError::DuplicateChannel(id)) }
            let axes = selection.axis_edges(beam_energy_bin)?;
            selection_hists.insert(id, SelectionHist::new(&axes)?);
            selection_names.insert(id, selection.name.clone());
        }
        debug!(sample = %name, flux_type, channels = selection_hists.len(), is_signal, "made sample");
        Ok(Self {
            name,
            flux_type,
            is_signal,
            range,
            nominal_flux: 0.0,
            factor: 1.0,
            data_mc_scale: 1.0,
            selection_names,
            selection_hists,
            incident_hist: hist_1d(incident_bins),
            true_incident_hist: hist_1d(true_incident_bins),
            incident_energies: IncidentEnergies::new(),
            rebinned: None,
        })
    }

    // ----- Identity -------------------------------------------------------------------
    pub fn name(&self) -> &str { &self.name }
    pub fn flux_type(&self) -> i32 { self.flux_type }

    /// Name, followed by the signal range for signal samples: `"Abs 400-500"`.
    pub fn title(&self) -> String {
        if self.is_signal {
            format!("{} {}-{}", self.name,
                    precise_to_string(self.range.low, 0),
                    precise_to_string(self.range.high, 0))
        } else {
            self.name.clone()
        }
    }

    pub fn check_is_signal(&self) -> bool { self.is_signal }
    pub fn check_in_signal_range(&self, val: f64) -> bool { self.range.contains(val) }
    pub fn range(&self) -> &SignalRange { &self.range }
    pub fn range_low_end (&self) -> f64 { self.range.low  }
    pub fn range_high_end(&self) -> f64 { self.range.high }

    // ----- Flux and normalization -----------------------------------------------------
    pub fn nominal_flux(&self) -> f64 { self.nominal_flux }
    pub fn factor(&self) -> f64 { self.factor }
    pub fn data_mc_scale(&self) -> f64 { self.data_mc_scale }

    pub fn add_flux(&mut self, val: f64) { self.nominal_flux += val }

    /// Count one more generated event of this flux type.
    pub fn add_unit_flux(&mut self) { self.add_flux(1.0) }

    /// Store `f` as the current factor without rescaling anything.
    pub fn set_factor(&mut self, f: f64) {
        if f == 0.0 { warn!(sample = %self.name, "normalization factor set to zero") }
        self.factor = f;
    }

    /// Multiply the fine histograms (and rebinned ones, if made) by `k`.
    ///
    /// Neither the factor nor the nominal flux change.
    pub fn scale_hists(&mut self, k: f64) {
        scale_1d(&mut self.incident_hist, k);
        for hist in self.selection_hists.values_mut() { hist.scale(k) }
        scale_1d(&mut self.true_incident_hist, k);
        if let Some(rebinned) = self.rebinned.as_mut() {
            scale_1d(&mut rebinned.incident, k);
            for hist in rebinned.selections.values_mut() { hist.scale(k) }
        }
    }

    /// Multiply the stored weight of every incident energy by `k`.
    pub fn scale_incident_energies(&mut self, k: f64) { self.incident_energies.scale(k) }

    pub fn set_data_mc_scale(&mut self, k: f64) {
        self.data_mc_scale = k;
        self.scale_hists(k);
        self.nominal_flux *= k;
    }

    /// Replace the current factor with `k`: histograms and nominal flux end up
    /// at `k` times their unscaled values, however many times this is called.
    pub fn set_factor_and_scale(&mut self, k: f64) -> Result<()> {
        if k == 0.0 { return Err(SampleError::DivisionByZeroFactor) }
        self.reset_factor()?;
        self.factor = k;
        self.nominal_flux *= k;
        self.scale_hists(k);
        debug!(sample = %self.name, factor = k, "applied factor");
        Ok(())
    }

    /// Undo the current factor and set it back to `1.0`.
    pub fn reset_factor(&mut self) -> Result<()> {
        if self.factor == 0.0 { return Err(SampleError::DivisionByZeroFactor) }
        let inverse = 1.0 / self.factor;
        self.scale_hists(inverse);
        self.nominal_flux *= inverse;
        self.factor = 1.0;
        Ok(())
    }

    // ----- Filling --------------------------------------------------------------------

    /// Add one entry to the histogram of channel `id`. Unknown channels, and
    /// entries with a NaN coordinate, are ignored.
    pub fn fill_selection_hist(&mut self, id: ChannelId, coords: impl Into<Coords>) -> Result<()> {
        let coords = coords.into();
        let Some(hist) = self.selection_hists.get_mut(&id) else {
            trace!(sample = %self.name, id, "fill for unknown channel ignored");
            return Ok(())
        };
        if coords.has_nan() && coords.dimension() == hist.dimension() {
            trace!(sample = %self.name, id, "fill with NaN coordinate ignored");
        }
        if hist.fill(&coords) { Ok(()) }
        else {
            Err(SampleError::DimensionMismatch { id, expected: hist.dimension(), got: coords.dimension() })
        }
    }

    /// As [`fill_selection_hist`](Self::fill_selection_hist), with 1 to 3
    /// coordinates in a slice.
    pub fn fill_selection_hist_values(&mut self, id: ChannelId, values: &[f64]) -> Result<()> {
        let coords = Coords::try_from(values)?;
        self.fill_selection_hist(id, coords)
    }

    /// One entry per value; NaNs are ignored.
    pub fn fill_incident_hist(&mut self, vals: &[f64]) {
        let dropped = fill_1d(&mut self.incident_hist, vals.iter().copied(), 1.0);
        if dropped > 0 { trace!(sample = %self.name, dropped, "NaN incident energies ignored") }
    }

    pub fn fill_true_incident_hist(&mut self, vals: &[f64]) {
        let dropped = fill_1d(&mut self.true_incident_hist, vals.iter().copied(), 1.0);
        if dropped > 0 { trace!(sample = %self.name, dropped, "NaN true incident energies ignored") }
    }

    /// Keep `vals` unbinned, each with weight `1.0`.
    pub fn add_incident_energies(&mut self, vals: &[f64]) { self.incident_energies.extend(vals) }

    /// Fill `hist` with every stored incident energy, weighted by the current
    /// factor. The per-entry weights are not used, and NaN energies are
    /// skipped.
    pub fn fill_hist_from_incident_energies(&self, hist: &mut Hist1D) {
        let dropped = self.incident_energies.fill_uniform(hist, self.factor);
        trace!(sample = %self.name, entries = self.incident_energies.entries().len(), dropped,
               "filled histogram from incident energies");
    }

    // ----- Fine histograms ------------------------------------------------------------
    pub fn selection_hists(&self) -> &BTreeMap<ChannelId, SelectionHist> { &self.selection_hists }

    pub fn selection_hist(&self, id: ChannelId) -> Result<&SelectionHist> {
        self.selection_hists.get(&id).ok_or(SampleError::UnknownChannel(id))
    }

    pub fn selection_name(&self, id: ChannelId) -> Option<&str> {
        self.selection_names.get(&id).map(String::as_str)
    }

    pub fn incident_hist(&self) -> &Hist1D { &self.incident_hist }
    pub fn true_incident_hist(&self) -> &Hist1D { &self.true_incident_hist }
    pub fn incident_energies(&self) -> &IncidentEnergies { &self.incident_energies }

    // ----- Rebinned histograms --------------------------------------------------------

    /// Allocate empty coarse histograms for every channel and for the incident
    /// energy, replacing any made earlier.
    pub fn make_rebinned_hists(&mut self, scheme: &RebinScheme) -> Result<()> {
        let mut selections = BTreeMap::new();
        for (&id, fine) in &self.selection_hists {
            let axes = scheme.selection(id).ok_or(SampleError::MissingRebinning(id))?;
            if axes.len() != fine.dimension() {
                return Err(SampleError::RebinDimension { id, expected: fine.dimension(), got: axes.len() });
            }
            selections.insert(id, SelectionHist::new(axes)?);
        }
        let incident = hist_1d(scheme.incident());
        debug!(sample = %self.name, channels = selections.len(), "made rebinned histograms");
        self.rebinned = Some(Rebinned { selections, incident });
        Ok(())
    }

    pub fn made_rebinned(&self) -> bool { self.rebinned.is_some() }

    /// Recompute every rebinned histogram from its fine counterpart.
    pub fn refill_rebinned_hists(&mut self) -> Result<()> {
        let rebinned = self.rebinned.as_mut().ok_or(SampleError::NotInitialized)?;
        for (&id, coarse) in rebinned.selections.iter_mut() {
            let fine = self.selection_hists.get(&id).ok_or(SampleError::UnknownChannel(id))?;
            rebin_selection(id, fine, coarse)?;
        }
        rebin_1d(&self.incident_hist, &mut rebinned.incident);
        trace!(sample = %self.name, "refilled rebinned histograms");
        Ok(())
    }

    pub fn rebinned_selection_hist(&self, id: ChannelId) -> Result<&SelectionHist> {
        let rebinned = self.rebinned.as_ref().ok_or(SampleError::NotInitialized)?;
        rebinned.selections.get(&id).ok_or(SampleError::UnknownChannel(id))
    }

    pub fn rebinned_incident_hist(&self) -> Result<&Hist1D> {
        Ok(&self.rebinned.as_ref().ok_or(SampleError::NotInitialized)?.incident)
    }
}
