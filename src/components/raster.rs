use std::{fmt::Debug, path::Path};

use geo::{AffineTransform, Coord, Rect};
use log::info;

use crate::{
    components::file::File,
    errors::{RasterGridError, Result},
};

/// Single band of gridded values with an affine pixel-to-geo mapping.
///
/// Read once from a [File], never mutated.
pub struct Raster {
    /// Row-major, `height * width` cells.
    data: Box<[f64]>,
    /// (H, W)
    shape: (usize, usize),
    /// Pixel space `(x: col, y: row)` to native crs `(x, y)`.
    transform: AffineTransform,
    crs: String,
    nodata: Option<f64>,
}

impl Debug for Raster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Raster")
            .field("shape", &self.shape)
            .field("crs", &self.crs)
            .field("nodata", &self.nodata)
            .field("extent", &self.extent())
            .finish()
    }
}

impl Raster {
    pub fn new(
        data: Vec<f64>,
        shape: (usize, usize),
        transform: AffineTransform,
        crs: impl Into<String>,
        nodata: Option<f64>,
    ) -> Result<Self> {
        let (height, width) = shape;
        if height == 0 || width == 0 {
            return Err(RasterGridError::InvalidRaster(format!(
                "empty shape {height}x{width}"
            )));
        }
        if data.len() != height * width {
            return Err(RasterGridError::InvalidRaster(format!(
                "{} cells for shape {height}x{width}",
                data.len()
            )));
        }
        Ok(Self {
            data: data.into_boxed_slice(),
            shape,
            transform,
            crs: crs.into(),
            nodata,
        })
    }

    /// Reads band 1 of `file` into memory.
    pub fn from_file<F: File>(file: &F) -> Result<Self> {
        let (width, height) = file.size();
        let data = file.read_band(1)?;
        let raster = Self::new(
            data.into_vec(),
            (height, width),
            file.transform()?,
            file.crs()?,
            file.nodata()?,
        )?;
        info!("loaded {raster:?}");
        Ok(raster)
    }

    pub fn open<F: File, P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_file(&F::open(path)?)
    }

    /// (H, W)
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    pub fn height(&self) -> usize {
        self.shape.0
    }

    pub fn width(&self) -> usize {
        self.shape.1
    }

    pub fn transform(&self) -> &AffineTransform {
        &self.transform
    }

    pub fn crs(&self) -> &str {
        &self.crs
    }

    pub fn nodata(&self) -> Option<f64> {
        self.nodata
    }

    pub fn value(&self, row: usize, col: usize) -> f64 {
        debug_assert!(row < self.height() && col < self.width());
        self.data[row * self.width() + col]
    }

    pub fn is_nodata(&self, value: f64) -> bool {
        value.is_nan() || self.nodata.is_some_and(|sentinel| value == sentinel)
    }

    /// Bounds of the full raster in its native crs.
    pub fn extent(&self) -> Rect {
        let (height, width) = self.shape;
        let corners = [
            (0.0, 0.0),
            (width as f64, 0.0),
            (0.0, height as f64),
            (width as f64, height as f64),
        ]
        .map(|(x, y)| self.transform.apply(Coord { x, y }));
        let min = corners
            .iter()
            .fold(corners[0], |acc, c| Coord {
                x: acc.x.min(c.x),
                y: acc.y.min(c.y),
            });
        let max = corners
            .iter()
            .fold(corners[0], |acc, c| Coord {
                x: acc.x.max(c.x),
                y: acc.y.max(c.y),
            });
        Rect::new(min, max)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// North-up raster with square pixels of size `res`, top left corner at
    /// `(min_x, max_y)`, cell values from `f(row, col)`.
    pub fn north_up(
        shape: (usize, usize),
        (min_x, max_y): (f64, f64),
        res: f64,
        crs: &str,
        nodata: Option<f64>,
        f: impl Fn(usize, usize) -> f64,
    ) -> Raster {
        let (height, width) = shape;
        let data = (0..height)
            .flat_map(|row| (0..width).map(move |col| (row, col)))
            .map(|(row, col)| f(row, col))
            .collect();
        let transform = AffineTransform::new(res, 0.0, min_x, 0.0, -res, max_y);
        Raster::new(data, shape, transform, crs, nodata).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::{testing::north_up, *};
    use crate::components::bbox::WGS84;
    use rstest::rstest;

    #[rstest]
    #[case((0, 10))]
    #[case((10, 0))]
    fn empty_raster_is_invalid(#[case] shape: (usize, usize)) {
        let err = Raster::new(vec![], shape, AffineTransform::identity(), WGS84, None)
            .unwrap_err();
        assert!(matches!(err, RasterGridError::InvalidRaster(_)));
    }

    #[rstest]
    fn shape_mismatch_is_invalid() {
        let err = Raster::new(
            vec![0.0; 9],
            (2, 5),
            AffineTransform::identity(),
            WGS84,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, RasterGridError::InvalidRaster(_)));
    }

    #[rstest]
    fn values_are_row_major() {
        let raster = north_up((3, 4), (0.0, 3.0), 1.0, WGS84, None, |row, col| {
            (row * 10 + col) as f64
        });
        assert_eq!(raster.value(0, 0), 0.0);
        assert_eq!(raster.value(0, 3), 3.0);
        assert_eq!(raster.value(2, 1), 21.0);
    }

    #[rstest]
    fn nodata_matches_sentinel_and_nan() {
        let raster = north_up((2, 2), (0.0, 2.0), 1.0, WGS84, Some(-9999.0), |_, _| 1.0);
        assert!(raster.is_nodata(-9999.0));
        assert!(raster.is_nodata(f64::NAN));
        assert!(!raster.is_nodata(1.0));

        let bare = north_up((2, 2), (0.0, 2.0), 1.0, WGS84, None, |_, _| 1.0);
        assert!(!bare.is_nodata(-9999.0));
        assert!(bare.is_nodata(f64::NAN));
    }

    #[rstest]
    fn extent_covers_north_up_grid() {
        let raster = north_up((10, 20), (5.0, 8.0), 0.5, WGS84, None, |_, _| 0.0);
        let extent = raster.extent();
        assert_eq!(extent.min(), Coord { x: 5.0, y: 3.0 });
        assert_eq!(extent.max(), Coord { x: 15.0, y: 8.0 });
    }
}
