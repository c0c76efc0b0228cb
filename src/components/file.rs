use std::{fmt::Debug, path::Path};

use geo::AffineTransform;

use crate::{components::Metadata, errors::Result};

/// Source of georeferenced raster data.
///
/// One implementation per backend; see
/// [gdal_backend](crate::components::backends::gdal_backend).
pub trait File: Debug + Sized {
    fn open<P: AsRef<Path>>(path: P) -> Result<Self>;
    fn description(&self) -> Result<String>;
    /// (width, height)
    fn size(&self) -> (usize, usize);
    /// `"AUTHORITY:CODE"` when known, WKT otherwise.
    fn crs(&self) -> Result<String>;
    fn transform(&self) -> Result<AffineTransform>;
    fn nodata(&self) -> Result<Option<f64>>;
    /// Full band read, row-major, 1-based band index.
    fn read_band(&self, index: usize) -> Result<Box<[f64]>>;
    fn metadata(&self) -> Metadata;
}
