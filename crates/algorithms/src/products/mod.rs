//! Terrain products: smoothing, region bounding, analysis and band selection
//!
//! A [`TerrainConfig`] names the dataset, the region of interest, the
//! elevation band, the bands to return and the smoothing to apply;
//! [`compute_terrain_products`] runs the pipeline against any
//! [`TerrainAnalyzer`](crate::terrain::TerrainAnalyzer).

mod assembler;
mod config;

pub use assembler::compute_terrain_products;
pub use config::{TerrainConfig, DEFAULT_ELEVATION_BAND, DIFFUSION_OUTPUT_BANDS, GAUSSIAN_OUTPUT_BANDS};
