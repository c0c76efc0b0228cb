use geo::{proj::Proj, Coord};
use itertools::iproduct;
use log::warn;
use rayon::prelude::*;

use crate::{
    components::{
        bbox::{BoundingBox, WGS84},
        raster::Raster,
        window::Window,
    },
    errors::{RasterGridError, Result},
};

/// One grid cell, always in WGS84.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct GridSample {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lng")]
    pub longitude: f64,
    pub value: f64,
}

/// Row-major sequence of at most `grid_size²` samples.
///
/// Nodata pixels are omitted, not padded; order is never changed after
/// sampling.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct Grid(Vec<GridSample>);

impl Grid {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GridSample> {
        self.0.iter()
    }

    pub fn samples(&self) -> &[GridSample] {
        &self.0
    }
}

impl IntoIterator for Grid {
    type Item = GridSample;
    type IntoIter = std::vec::IntoIter<GridSample>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Samples `raster` onto a `grid_size` x `grid_size` grid inside `bounds`.
///
/// Evenly spaced nearest-pixel sampling over the covering sub-window,
/// both edges included, no interpolation. A box disjoint from the raster
/// yields an empty grid, not an error.
pub fn sample(raster: &Raster, bounds: &BoundingBox, grid_size: usize) -> Result<Grid> {
    if grid_size == 0 {
        return Err(RasterGridError::InvalidGridSize);
    }

    let native_rect = bounds.projected_rect(raster.crs())?;
    let Some(window) = Window::from_bounds(raster, &native_rect)? else {
        warn!("no coverage: {bounds:?} lies outside {raster:?}");
        return Ok(Grid::default());
    };

    let to_native = window.transform(raster.transform());
    let to_wgs84 = if raster.crs().eq(WGS84) {
        None
    } else {
        Some(Proj::new_known_crs(raster.crs(), WGS84, None)?)
    };

    let mut samples = Vec::with_capacity(grid_size * grid_size);
    for (i, j) in iproduct!(0..grid_size, 0..grid_size) {
        let row = spread(i, grid_size, window.height);
        let col = spread(j, grid_size, window.width);
        let value = raster.value(window.row_off + row, window.col_off + col);
        if raster.is_nodata(value) {
            continue;
        }
        let center = to_native.apply(Coord {
            x: col as f64 + 0.5,
            y: row as f64 + 0.5,
        });
        let Coord {
            x: longitude,
            y: latitude,
        } = match &to_wgs84 {
            Some(proj) => proj.convert(center)?,
            None => center,
        };
        samples.push(GridSample {
            latitude,
            longitude,
            value,
        });
    }
    Ok(Grid(samples))
}

/// [sample] fanned out over independent rasters.
pub fn sample_many(rasters: &[Raster], bounds: &BoundingBox, grid_size: usize) -> Result<Vec<Grid>> {
    rasters
        .par_iter()
        .map(|raster| sample(raster, bounds, grid_size))
        .collect()
}

/// Pixel index of grid step `step`, spanning `extent` pixels edge to edge.
pub(crate) fn spread(step: usize, grid_size: usize, extent: usize) -> usize {
    if grid_size == 1 {
        return 0;
    }
    ((step as f64 / (grid_size - 1) as f64) * (extent - 1) as f64).round() as usize
}
