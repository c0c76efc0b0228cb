use geo::{proj::Proj, Coord, Rect};

use crate::errors::{RasterGridError, Result};

/// CRS of every bounding box and every emitted sample coordinate.
pub const WGS84: &str = "EPSG:4326";

/// Geographic bounding box in WGS84 degrees.
///
/// Always well formed: `lat_min < lat_max` and `lng_min < lng_max`.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct BoundingBox {
    lat_min: f64,
    lat_max: f64,
    lng_min: f64,
    lng_max: f64,
}

impl BoundingBox {
    pub fn new(lat_min: f64, lat_max: f64, lng_min: f64, lng_max: f64) -> Result<Self> {
        // NaN fails both comparisons.
        if !(lat_min < lat_max) || !(lng_min < lng_max) {
            return Err(RasterGridError::InvalidBoundingBox {
                lat_min,
                lat_max,
                lng_min,
                lng_max,
            });
        }
        Ok(Self {
            lat_min,
            lat_max,
            lng_min,
            lng_max,
        })
    }

    pub fn lat_min(&self) -> f64 {
        self.lat_min
    }

    pub fn lat_max(&self) -> f64 {
        self.lat_max
    }

    pub fn lng_min(&self) -> f64 {
        self.lng_min
    }

    pub fn lng_max(&self) -> f64 {
        self.lng_max
    }

    /// As a rect in 'geospace', `x` is longitude and `y` latitude.
    pub fn rect(&self) -> Rect {
        Rect::new(
            Coord {
                x: self.lng_min,
                y: self.lat_min,
            },
            Coord {
                x: self.lng_max,
                y: self.lat_max,
            },
        )
    }

    /// Rect in `crs`, by corner reprojection.
    ///
    /// Corners only, not per-pixel: good enough for boxes small relative
    /// to projection distortion.
    pub fn projected_rect(&self, crs: &str) -> Result<Rect> {
        if crs.eq(WGS84) {
            return Ok(self.rect());
        }
        let proj = Proj::new_known_crs(WGS84, crs, None)?;
        let min = proj.convert(Coord {
            x: self.lng_min,
            y: self.lat_min,
        })?;
        let max = proj.convert(Coord {
            x: self.lng_max,
            y: self.lat_max,
        })?;
        // Rect::new reorders corners, so an axis flip in `crs` is fine.
        Ok(Rect::new(min, max))
    }

    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        self.lat_min <= latitude
            && latitude <= self.lat_max
            && self.lng_min <= longitude
            && longitude <= self.lng_max
    }
}
