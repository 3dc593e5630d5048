//! `RandomGenerator`: some days worth of random data.
//!
//! Command line example:
//!
//! ```text
//! inspector --RandomGenerator generate '{"days": 2, "n_series": 3}'
//! ```

use chrono::{DateTime, Duration, Utc};
use rand_distr::{Distribution, Normal};
use serde::Deserialize;
use serde_json::{json, Value};

use super::{parse_config, plugin_rng, GeneratorPlugin};
use crate::data::series::{Metadata, Series};
use crate::error::{InspectorError, Result};

pub const NAME: &str = "RandomGenerator";

const MAX_TOTAL_SAMPLES: usize = 50_000_000;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RandomConfig {
    /// Length of the generated span.
    pub days: u32,
    /// Number of independent series.
    pub n_series: u32,
    /// Sample spacing.
    pub interval_minutes: u32,
    /// End of the span; defaults to now.
    pub end: Option<DateTime<Utc>>,
    pub seed: Option<u64>,
}

impl Default for RandomConfig {
    fn default() -> Self {
        Self {
            days: 20,
            n_series: 1,
            interval_minutes: 1,
            end: None,
            seed: None,
        }
    }
}

impl RandomConfig {
    /// Number of samples per series: both ends of the span are included.
    pub fn samples_per_series(&self) -> usize {
        (self.days as usize * 24 * 60) / self.interval_minutes as usize + 1
    }
}

/// Values are drawn from `N(100, 100²)`.
pub struct RandomGenerator;

impl RandomGenerator {
    pub fn generate_with(&self, cfg: &RandomConfig) -> Result<Vec<Series>> {
        if cfg.interval_minutes == 0 {
            return Err(InspectorError::plugin(NAME, "interval_minutes must be positive"));
        }
        let n = cfg.samples_per_series();
        let total = n.saturating_mul(cfg.n_series as usize);
        if total > MAX_TOTAL_SAMPLES {
            return Err(InspectorError::plugin(
                NAME,
                format!("refusing to generate {total} samples"),
            ));
        }
        let now = Utc::now();
        let end = cfg.end.unwrap_or(now);
        let start = end
            .checked_sub_signed(Duration::days(cfg.days as i64))
            .ok_or_else(|| InspectorError::plugin(NAME, "days reaches outside the supported time range"))?;
        let step = cfg.interval_minutes as f64 * 60.0;
        let t0 = start.timestamp() as f64 + start.timestamp_subsec_nanos() as f64 * 1e-9;

        let normal = Normal::new(100.0, 100.0)
            .map_err(|e| InspectorError::plugin(NAME, format!("bad value distribution: {e}")))?;
        let mut rng = plugin_rng(cfg.seed);
        let seria = (0..cfg.n_series)
            .map(|_| {
                let points = (0..n)
                    .map(|i| [t0 + i as f64 * step, normal.sample(&mut rng)])
                    .collect::<Vec<_>>();
                let mut metadata = Metadata::new();
                metadata.insert("time_generated".into(), json!(now.to_rfc3339()));
                metadata.insert("length".into(), json!(points.len()));
                Series::from_time_points(points)
                    .with_name(format!("Random {} days", cfg.days))
                    .with_metadata(metadata)
            })
            .collect();
        Ok(seria)
    }
}

impl GeneratorPlugin for RandomGenerator {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Generates some days worth of random data with 1 minute frequency"
    }

    fn example_config(&self) -> Value {
        json!({"days": 2, "n_series": 3})
    }

    fn generate(&self, config: &Value) -> Result<Vec<Series>> {
        let cfg: RandomConfig = parse_config(NAME, config)?;
        self.generate_with(&cfg)
    }
}
