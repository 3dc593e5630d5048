//! `SineGenerator`: noisy sine waves on a numeric index, handy as quick test data.

use rand_distr::{Distribution, Normal};
use serde::Deserialize;
use serde_json::{json, Value};

use super::{parse_config, plugin_rng, GeneratorPlugin};
use crate::data::series::Series;
use crate::error::{InspectorError, Result};

pub const NAME: &str = "SineGenerator";

const MAX_TOTAL_SAMPLES: usize = 50_000_000;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SineConfig {
    pub n_samples: usize,
    /// First X value; samples are spaced by 1.
    pub start: f64,
    /// Period in X units.
    pub period: f64,
    /// Standard deviation of the added gaussian noise.
    pub noise: f64,
    /// One series per entry, each scaled by that factor.
    pub scales: Vec<f64>,
    pub seed: Option<u64>,
}

impl Default for SineConfig {
    fn default() -> Self {
        Self {
            n_samples: 48_005,
            start: 1000.0,
            period: 600.0,
            noise: 0.5,
            scales: vec![1.0, 2.0],
            seed: None,
        }
    }
}

pub struct SineGenerator;

impl SineGenerator {
    pub fn generate_with(&self, cfg: &SineConfig) -> Result<Vec<Series>> {
        if !(cfg.period.is_finite() && cfg.period > 0.0) {
            return Err(InspectorError::plugin(NAME, "period must be a positive number"));
        }
        if !(cfg.noise.is_finite() && cfg.noise >= 0.0) {
            return Err(InspectorError::plugin(NAME, "noise must be a non-negative number"));
        }
        if cfg.scales.is_empty() {
            return Err(InspectorError::plugin(NAME, "scales must not be empty"));
        }
        if cfg.n_samples.saturating_mul(cfg.scales.len()) > MAX_TOTAL_SAMPLES {
            return Err(InspectorError::plugin(NAME, "too many samples requested"));
        }

        let noise = Normal::new(0.0, cfg.noise)
            .map_err(|e| InspectorError::plugin(NAME, format!("invalid noise: {e}")))?;
        let mut rng = plugin_rng(cfg.seed);
        let base: Vec<[f64; 2]> = (0..cfg.n_samples)
            .map(|i| {
                let x = cfg.start + i as f64;
                let y = (2.0 * std::f64::consts::PI * x / cfg.period).sin()
                    + noise.sample(&mut rng);
                [x, y]
            })
            .collect();

        let seria: Vec<Series> = cfg
            .scales
            .iter()
            .enumerate()
            .map(|(i, &k)| {
                let pts = base.iter().map(|&[x, y]| [x, y * k]).collect();
                Series::from_points(pts).with_name(format!("sine {} (x{})", i + 1, k))
            })
            .collect();
        // extreme period, noise or scale values overflow
        for s in seria.iter() {
            s.validate().map_err(|e| {
                InspectorError::plugin(NAME, format!("configuration yields unusable data: {e}"))
            })?;
        }
        Ok(seria)
    }
}

impl GeneratorPlugin for SineGenerator {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Noisy sine waves, one per scale factor"
    }

    fn example_config(&self) -> Value {
        json!({"n_samples": 5000, "period": 600, "noise": 0.5})
    }

    fn generate(&self, config: &Value) -> Result<Vec<Series>> {
        let cfg: SineConfig = parse_config(NAME, config)?;
        self.generate_with(&cfg)
    }
}
