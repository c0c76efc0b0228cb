use geo::{AffineTransform, Coord, Rect};
use log::info;

use crate::{
    components::raster::Raster,
    errors::{RasterGridError, Result},
};

// Keeps exactly-aligned box edges from spilling into a neighbouring pixel.
const EDGE_EPS: f64 = 1e-9;

/// Pixel sub-window of a raster.
///
/// `offset` is the top left pixel, `shape` is (H, W); always at least one
/// pixel and always inside the raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub row_off: usize,
    pub col_off: usize,
    pub height: usize,
    pub width: usize,
}

impl Window {
    /// Smallest window covering `rect` (given in the raster's native crs),
    /// clipped to the raster extent.
    ///
    /// `None` when `rect` and the raster are disjoint. A sliver thinner
    /// than one pixel that still overlaps resolves to a single pixel.
    pub fn from_bounds(raster: &Raster, rect: &Rect) -> Result<Option<Window>> {
        let inverse = raster
            .transform()
            .inverse()
            .ok_or(RasterGridError::NonInvertibleTransform)?;
        // All four corners: rotation terms may skew the box in pixel space.
        let corners = [
            rect.min(),
            rect.max(),
            Coord {
                x: rect.min().x,
                y: rect.max().y,
            },
            Coord {
                x: rect.max().x,
                y: rect.min().y,
            },
        ]
        .map(|corner| inverse.apply(corner));

        let (mut col_min, mut col_max) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut row_min, mut row_max) = (f64::INFINITY, f64::NEG_INFINITY);
        for Coord { x, y } in corners {
            (col_min, col_max) = (col_min.min(x), col_max.max(x));
            (row_min, row_max) = (row_min.min(y), row_max.max(y));
        }

        let (height, width) = raster.shape();
        if col_max <= 0.0
            || row_max <= 0.0
            || col_min >= width as f64
            || row_min >= height as f64
        {
            return Ok(None);
        }

        let col_off = ((col_min + EDGE_EPS).floor().max(0.0) as usize).min(width - 1);
        let row_off = ((row_min + EDGE_EPS).floor().max(0.0) as usize).min(height - 1);
        let col_end = (((col_max - EDGE_EPS).ceil()).min(width as f64) as usize).max(col_off + 1);
        let row_end = (((row_max - EDGE_EPS).ceil()).min(height as f64) as usize).max(row_off + 1);

        let window = Window {
            row_off,
            col_off,
            height: row_end - row_off,
            width: col_end - col_off,
        };
        info!("resolved {rect:?} as {window:?}");
        Ok(Some(window))
    }

    /// Transform from window pixel space to the raster's native crs.
    pub fn transform(&self, raster_transform: &AffineTransform) -> AffineTransform {
        let origin = raster_transform.apply(Coord {
            x: self.col_off as f64,
            y: self.row_off as f64,
        });
        AffineTransform::new(
            raster_transform.a(),
            raster_transform.b(),
            origin.x,
            raster_transform.d(),
            raster_transform.e(),
            origin.y,
        )
    }

    /// (H, W)
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }
}
