pub mod artifact;
pub mod backends;
pub mod bbox;
pub mod file;
pub mod raster;
pub mod sampler;
pub mod units;
pub mod window;

pub use bbox::BoundingBox;
pub use file::File;
pub use raster::Raster;
pub use sampler::{Grid, GridSample};

use std::collections::HashMap;
pub type Metadata = HashMap<String, String>;
