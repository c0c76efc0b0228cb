use std::{collections::BTreeMap, path::Path};

use crate::{
    components::{
        bbox::BoundingBox,
        file::File,
        raster::Raster,
        sampler::{sample, Grid},
        units::UnitSpec,
    },
    errors::Result,
};

/// Everything one extraction run needs, passed explicitly.
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    /// Dataset attribution, e.g. `"NREL NSRDB v3"`.
    pub source: String,
    pub bounds: BoundingBox,
    pub grid_size: usize,
    /// Required unless the raster metadata declares a unit itself.
    pub units: Option<UnitSpec>,
}

/// JSON envelope for one sampled grid.
///
/// Field order matches the serialized schema; derived per-domain fields
/// (irradiance scaling, wind power density, ...) are computed downstream
/// from the raw `value`s.
#[derive(Debug, Clone, serde::Serialize)]
pub struct GridArtifact {
    pub source: String,
    pub bounds: BoundingBox,
    pub units: BTreeMap<String, String>,
    pub grid_size: usize,
    pub data: Grid,
}

impl GridArtifact {
    pub fn new(
        source: impl Into<String>,
        bounds: BoundingBox,
        units: &UnitSpec,
        grid_size: usize,
        data: Grid,
    ) -> Self {
        Self {
            source: source.into(),
            bounds,
            units: BTreeMap::from([(units.quantity().to_string(), units.unit().to_string())]),
            grid_size,
            data,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Loads a raster, resolves units, samples and assembles the envelope.
pub fn extract<F: File, P: AsRef<Path>>(
    path: P,
    config: &ExtractionConfig,
) -> Result<GridArtifact> {
    let file = F::open(path)?;
    let units = UnitSpec::resolve(config.units.clone(), &file.metadata())?;
    let raster = Raster::from_file(&file)?;
    let grid = sample(&raster, &config.bounds, config.grid_size)?;
    units.validate(&grid);
    Ok(GridArtifact::new(
        config.source.clone(),
        config.bounds,
        &units,
        config.grid_size,
        grid,
    ))
}
