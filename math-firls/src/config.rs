//! Filter design configuration, loadable from JSON

use crate::bands::{NormalizedBands, validate};
use crate::error::{FirlsError, SpecFileError};
use crate::firls::firls;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_weight() -> f64 {
    1.0
}

/// One band of a piecewise-linear desired response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    /// Start edge in Hz
    pub start: f64,
    /// End edge in Hz
    pub end: f64,
    /// Desired gain at `start`
    pub desired_begin: f64,
    /// Desired gain at `end`
    pub desired_end: f64,
    /// Relative weight of the squared error in this band
    #[serde(default = "default_weight")]
    pub weight: f64,
}

impl Band {
    /// Band with a constant desired gain and unit weight.
    pub fn constant(start: f64, end: f64, gain: f64) -> Self {
        Self::linear(start, end, gain, gain)
    }

    /// Band whose desired gain ramps linearly from `begin` to `end_gain`, unit weight.
    pub fn linear(start: f64, end: f64, begin: f64, end_gain: f64) -> Self {
        Band {
            start,
            end,
            desired_begin: begin,
            desired_end: end_gain,
            weight: 1.0,
        }
    }

    /// Returns this band with the given weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}

/// Complete description of a least-squares FIR design.
///
/// # Example
///
/// ```rust
/// use math_audio_firls::{Band, FilterSpec};
///
/// let spec = FilterSpec::new(9, 2.0)
///     .with_band(Band::constant(0.0, 0.5, 1.0))
///     .with_band(Band::constant(0.55, 1.0, 0.0).with_weight(2.0));
/// let taps = spec.design().unwrap();
/// assert_eq!(taps.len(), 9);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Filter length
    pub num_taps: usize,
    /// Sample rate in Hz
    pub sample_rate: f64,
    /// Bands in increasing frequency order
    #[serde(default)]
    pub bands: Vec<Band>,
}

impl FilterSpec {
    /// Design with no bands yet, for the given length and sample rate.
    pub fn new(num_taps: usize, sample_rate: f64) -> Self {
        FilterSpec {
            num_taps,
            sample_rate,
            bands: Vec::new(),
        }
    }

    /// Returns this design with `band` appended.
    pub fn with_band(mut self, band: Band) -> Self {
        self.bands.push(band);
        self
    }

    /// Band edges and per-band arrays in the flat layout used by [`firls`].
    fn flatten(&self) -> (Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>) {
        let edges = self.bands.iter().flat_map(|b| [b.start, b.end]).collect();
        let begin = self.bands.iter().map(|b| b.desired_begin).collect();
        let end = self.bands.iter().map(|b| b.desired_end).collect();
        let weight = self.bands.iter().map(|b| b.weight).collect();
        (edges, begin, end, weight)
    }

    /// Check the bands and sample rate without designing the filter.
    pub fn validate(&self) -> Result<NormalizedBands, FirlsError> {
        let (edges, begin, end, weight) = self.flatten();
        validate(self.num_taps, &edges, &begin, &end, &weight, self.sample_rate)
    }

    /// Design the filter, returning `num_taps` coefficients.
    pub fn design(&self) -> Result<Vec<f64>, FirlsError> {
        let (edges, begin, end, weight) = self.flatten();
        firls(self.num_taps, &edges, &begin, &end, &weight, self.sample_rate)
    }

    /// Parse from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SpecFileError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, SpecFileError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SpecFileError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Save as a JSON file.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SpecFileError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
