//! Sample georeferenced rasters onto regular lat/lng grids.
//!
//! A [Raster] is read once from a georeferenced file (any single-band format
//! GDAL understands), [sample]d onto an evenly spaced nearest-pixel grid
//! inside a WGS84 [BoundingBox], and assembled into a [GridArtifact] ready
//! for JSON serialization.

mod components;
mod errors;

pub use components::{
    artifact::{extract, ExtractionConfig, GridArtifact},
    backends::gdal_backend::GdalFile,
    bbox::{BoundingBox, WGS84},
    file::File,
    raster::Raster,
    sampler::{sample, sample_many, Grid, GridSample},
    units::UnitSpec,
    window::Window,
    Metadata,
};
pub use errors::{RasterGridError, Result};
