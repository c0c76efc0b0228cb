use log::warn;

use crate::{
    components::{sampler::Grid, Metadata},
    errors::{RasterGridError, Result},
};

// Metadata keys a unit declaration may arrive under.
const METADATA_KEYS: [&str; 3] = ["units", "unit_type", "UNITS"];

/// Declared measurement unit of the sampled quantity.
///
/// Units are declared, never guessed from value magnitude. A plausible
/// range turns magnitude anomalies into warnings instead of silent
/// rescaling.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct UnitSpec {
    quantity: String,
    unit: String,
    plausible_range: Option<(f64, f64)>,
}

impl UnitSpec {
    pub fn new(quantity: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            quantity: quantity.into(),
            unit: unit.into(),
            plausible_range: None,
        }
    }

    pub fn with_plausible_range(mut self, min: f64, max: f64) -> Self {
        self.plausible_range = Some((min, max));
        self
    }

    pub fn quantity(&self) -> &str {
        &self.quantity
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Caller declaration wins; raster metadata is the fallback.
    pub fn resolve(declared: Option<UnitSpec>, metadata: &Metadata) -> Result<UnitSpec> {
        if let Some(spec) = declared {
            return Ok(spec);
        }
        METADATA_KEYS
            .iter()
            .find_map(|key| metadata.get(*key))
            .filter(|unit| !unit.is_empty())
            .map(|unit| UnitSpec::new("value", unit.clone()))
            .ok_or(RasterGridError::UndeclaredUnits)
    }

    /// Flags samples outside the plausible range; returns how many.
    pub fn validate(&self, grid: &Grid) -> usize {
        let Some((min, max)) = self.plausible_range else {
            return 0;
        };
        let flagged = grid
            .iter()
            .filter(|sample| sample.value < min || sample.value > max)
            .count();
        if flagged > 0 {
            warn!(
                "{flagged}/{} samples outside plausible {} range {min}..{max} {}",
                grid.len(),
                self.quantity,
                self.unit,
            );
        }
        flagged
    }
}
