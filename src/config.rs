//! Configuration of selections, binnings and samples
//!
//! A whole thin-slice setup can be written as TOML:
//!
//! ```toml
//! incident_bins      = [0.0, 200.0, 400.0, 600.0]
//! true_incident_bins = [0.0, 300.0, 600.0]
//! beam_energy_bin    = 1
//!
//! [[selections]]
//! id   = 1
//! name = "Abs"
//! bins = [[0.0, 100.0, 200.0, 300.0]]
//!
//! [[selections]]
//! id   = 2
//! name = "Cex"
//! # one edge set per beam energy bin
//! bins = [[[0.0, 50.0, 100.0], [0.0, 100.0, 200.0]]]
//!
//! [rebinned]
//! incident = [0.0, 600.0]
//! selections = [ { id = 1, bins = [[0.0, 300.0]] },
//!                { id = 2, bins = [[0.0, 200.0]] } ]
//!
//! [[samples]]
//! name         = "Abs"
//! flux_type    = 2
//! is_signal    = true
//! signal_range = "400..500"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{de, Deserialize, Deserializer};
use thiserror::Error;

use binning::Edges;

use crate::error::SampleError;
use crate::rebin::RebinScheme;
use crate::sample::{SignalRange, ThinSliceSample};
use crate::utils::parse_signal_range;
use crate::ChannelId;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("couldn't read config file `{path:?}`: {source}")]
    Io { path: PathBuf, #[source] source: std::io::Error },

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Sample(#[from] SampleError),
}

fn deserialize_range_opt<'d, D>(deserializer: D) -> Result<Option<SignalRange>, D::Error>
where
    D: Deserializer<'d>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|s| parse_signal_range(&s))
        .transpose()
        .map_err(de::Error::custom)
}

/// Edges of one histogram axis.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum AxisBins {
    /// The same edges whatever the beam energy
    Fixed(Vec<f64>),
    /// One edge set per beam energy bin
    PerBeamEnergy(Vec<Vec<f64>>),
}

/// Description of one selection channel.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SelectionConfig {
    pub id: ChannelId,
    pub name: String,
    /// One entry per histogram axis
    pub bins: Vec<AxisBins>,
}

impl SelectionConfig {

    pub fn new(id: ChannelId, name: impl Into<String>, bins: Vec<AxisBins>) -> Self {
        Self { id, name: name.into(), bins }
    }

    /// Validated edges of every axis, taking the edge set of `beam_energy_bin`
    /// for axes whose binning depends on the beam energy.
    pub fn axis_edges(&self, beam_energy_bin: usize) -> Result<Vec<Edges>, SampleError> {
        let id = self.id;
        if !(1..=3).contains(&self.bins.len()) {
            return Err(SampleError::InvalidDimension(self.bins.len()));
        }
        self.bins.iter().enumerate().map(|(axis, bins)| {
            let edges = match bins {
                AxisBins::Fixed(edges) => edges,
                AxisBins::PerBeamEnergy(sets) => sets.get(beam_energy_bin).ok_or(
                    SampleError::BeamEnergyBin { id, index: beam_energy_bin, available: sets.len() }
                )?,
            };
            Edges::try_from(edges.as_slice())
                .map_err(SampleError::edges(format!("selection {id} axis {axis}")))
        }).collect()
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RebinSelection {
    pub id: ChannelId,
    pub bins: Vec<Vec<f64>>,
}

/// Coarse binning used by [`ThinSliceSample::make_rebinned_hists`].
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RebinConfig {
    pub incident: Vec<f64>,
    #[serde(default)]
    pub selections: Vec<RebinSelection>,
}

impl RebinConfig {
    pub fn scheme(&self) -> Result<RebinScheme, SampleError> {
        let incident = Edges::try_from(self.incident.as_slice())
            .map_err(SampleError::edges("rebinned incident histogram"))?;
        let mut scheme = RebinScheme::new(incident);
        for RebinSelection { id, bins } in &self.selections {
            let axes = bins.iter().enumerate()
                .map(|(axis, e)| Edges::try_from(e.as_slice())
                     .map_err(SampleError::edges(format!("rebinned selection {id} axis {axis}"))))
                .collect::<Result<Vec<_>, _>>()?;
            scheme.insert(*id, axes);
        }
        Ok(scheme)
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SampleDef {
    pub name: String,
    pub flux_type: i32,
    #[serde(default)]
    pub is_signal: bool,
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_range_opt")]
    pub signal_range: Option<SignalRange>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ThinSliceConfig {
    pub incident_bins: Vec<f64>,
    pub true_incident_bins: Vec<f64>,

    /// Which edge set to use for beam-energy-dependent axes
    #[serde(default)]
    pub beam_energy_bin: usize,

    pub selections: Vec<SelectionConfig>,

    pub rebinned: RebinConfig,

    #[serde(default)]
    pub samples: Vec<SampleDef>,
}

impl ThinSliceConfig {

    /// One empty sample per entry in `samples`.
    pub fn build_samples(&self) -> Result<Vec<ThinSliceSample>, SampleError> {
        let incident = Edges::try_from(self.incident_bins.as_slice())
            .map_err(SampleError::edges("incident histogram"))?;
        let true_incident = Edges::try_from(self.true_incident_bins.as_slice())
            .map_err(SampleError::edges("true incident histogram"))?;
        self.samples.iter().map(|def| ThinSliceSample::new(
            def.name.clone(),
            def.flux_type,
            &self.selections,
            &incident,
            &true_incident,
            self.beam_energy_bin,
            def.is_signal,
            def.signal_range.unwrap_or_default(),
        )).collect()
    }

    pub fn rebin_scheme(&self) -> Result<RebinScheme, SampleError> { self.rebinned.scheme() }
}

pub fn parse_config(input: &str) -> Result<ThinSliceConfig, ConfigError> {
    Ok(toml::from_str(input)?)
}

pub fn read_config_file(path: impl AsRef<Path>) -> Result<ThinSliceConfig, ConfigError> {
    let path = path.as_ref();
    let config = fs::read_to_string(path)
        .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
    parse_config(&config)
}
