use geo::AffineTransform;
use std::{collections::HashMap, path::Path};

use crate::{
    components::{file::File, Metadata},
    errors::Result,
};

/// Implementations for gdal
pub mod gdal_backend {
    use super::*;
    use gdal::{
        Dataset as GdalDataset, Metadata as GdalMetadata, MetadataEntry as GdalMetadataEntry,
    };
    use std::path::PathBuf;

    fn affine_from_gdal(gdal_transform: [f64; 6]) -> AffineTransform {
        AffineTransform::new(
            gdal_transform[1],
            gdal_transform[2],
            gdal_transform[0],
            gdal_transform[4],
            gdal_transform[5],
            gdal_transform[3],
        )
    }

    fn filter_metadata_gdal(metadata: &impl GdalMetadata) -> HashMap<String, String> {
        GdalMetadata::metadata(metadata)
            .filter_map(|GdalMetadataEntry { domain, key, value }| {
                if domain.eq("") {
                    Some((key, value))
                } else {
                    None
                }
            })
            .collect()
    }

    #[derive(Debug)]
    pub struct GdalFile {
        path: PathBuf,
        dataset: GdalDataset,
    }

    impl File for GdalFile {
        fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
            Ok(GdalFile {
                path: path.as_ref().to_path_buf(),
                dataset: GdalDataset::open(&path)?,
            })
        }

        fn description(&self) -> Result<String> {
            Ok(GdalMetadata::description(&self.dataset)?)
        }

        fn size(&self) -> (usize, usize) {
            self.dataset.raster_size()
        }

        fn crs(&self) -> Result<String> {
            let srs = self.dataset.spatial_ref()?;
            match (srs.auth_name(), srs.auth_code()) {
                (Some(name), Ok(code)) => Ok(format!("{name}:{code}")),
                _ => Ok(self.dataset.projection()),
            }
        }

        fn transform(&self) -> Result<AffineTransform> {
            Ok(affine_from_gdal(self.dataset.geo_transform()?))
        }

        fn nodata(&self) -> Result<Option<f64>> {
            Ok(self.dataset.rasterband(1)?.no_data_value())
        }

        fn read_band(&self, index: usize) -> Result<Box<[f64]>> {
            let band = self.dataset.rasterband(index)?;
            let size = self.dataset.raster_size();
            let buffer = band.read_as::<f64>((0, 0), size, size, None)?;
            Ok(buffer.data().to_vec().into_boxed_slice())
        }

        /// Dataset metadata, then band 1 metadata on key conflicts.
        fn metadata(&self) -> Metadata {
            let mut metadata = filter_metadata_gdal(&self.dataset);
            if let Ok(band) = self.dataset.rasterband(1) {
                metadata.extend(filter_metadata_gdal(&band));
            }
            metadata
        }
    }

    impl GdalFile {
        pub fn path(&self) -> &Path {
            &self.path
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use gdal::{raster::Buffer as GdalBuffer, spatial_ref::SpatialRef, DriverManager};

    /// Writes a single-band float64 GeoTIFF into gdal's in-memory
    /// filesystem and returns its /vsimem path.
    pub fn write_vsimem_tiff(
        name: &str,
        shape: (usize, usize),
        geo_transform: [f64; 6],
        epsg: u32,
        nodata: Option<f64>,
        data: Vec<f64>,
    ) -> String {
        let path = format!("/vsimem/{name}.tif");
        let (height, width) = shape;
        let driver = DriverManager::get_driver_by_name("GTiff").unwrap();
        let mut dataset = driver
            .create_with_band_type::<f64, _>(&path, width, height, 1)
            .unwrap();
        dataset.set_geo_transform(&geo_transform).unwrap();
        dataset
            .set_spatial_ref(&SpatialRef::from_epsg(epsg).unwrap())
            .unwrap();
        let mut band = dataset.rasterband(1).unwrap();
        if let Some(sentinel) = nodata {
            band.set_no_data_value(Some(sentinel)).unwrap();
        }
        let mut buffer = GdalBuffer::new((width, height), data);
        band.write((0, 0), (width, height), &mut buffer).unwrap();
        drop(band);
        dataset.flush_cache().unwrap();
        path
    }
}
