//! Raster data structures

mod bands;
mod element;
mod geotransform;
mod grid;

pub use bands::MultiBandRaster;
pub use element::RasterElement;
pub use geotransform::GeoTransform;
pub use grid::{Raster, RasterStatistics};
