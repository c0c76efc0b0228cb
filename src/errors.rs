pub type Result<T> = std::result::Result<T, RasterGridError>;

#[derive(thiserror::Error, Debug)]
pub enum RasterGridError {
    #[error(transparent)]
    ProjError(#[from] geo::proj::ProjError),
    #[error(transparent)]
    ProjCreateError(#[from] geo::proj::ProjCreateError),
    #[error(transparent)]
    GdalError(#[from] gdal::errors::GdalError),
    #[error(transparent)]
    JsonError(#[from] serde_json::Error),
    #[error("invalid raster: {0}")]
    InvalidRaster(String),
    #[error("invalid bounding box: lat {lat_min}..{lat_max}, lng {lng_min}..{lng_max}")]
    InvalidBoundingBox {
        lat_min: f64,
        lat_max: f64,
        lng_min: f64,
        lng_max: f64,
    },
    #[error("grid size must be at least 1")]
    InvalidGridSize,
    #[error("raster transform is not invertible")]
    NonInvertibleTransform,
    #[error("no unit declared by caller or raster metadata")]
    UndeclaredUnits,
}
