//! # terrasmooth algorithms
//!
//! DEM noise suppression ahead of terrain analysis.
//!
//! ## Modules
//!
//! - **filter**: Kernels and the replicate-border convolution engine
//! - **smoothing**: Gaussian and Perona–Malik smoothers, the `Smoothing` selector
//! - **terrain**: Evans-Young derivatives and the built-in terrain analyzer
//! - **products**: Terrain product configuration and assembly
//!
//! ## Example
//!
//! ```
//! use geo_types::polygon;
//! use terrasmooth_algorithms::prelude::*;
//!
//! let dem: Raster<f64> = Raster::filled(16, 16, 100.0);
//! let dataset = MultiBandRaster::new().with_band("elevation", dem)?;
//! let region = polygon![(x: 2.0, y: -2.0), (x: 12.0, y: -2.0), (x: 12.0, y: -12.0)];
//!
//! let products = TerrainConfig::gaussian(dataset, region).compute(&LocalTerrainAnalysis::default())?;
//! assert_eq!(products.band_names(), vec!["Elevation", "Slope", "GaussianCurvature"]);
//! # Ok::<(), terrasmooth_core::Error>(())
//! ```

pub mod filter;
pub(crate) mod maybe_rayon;
pub mod products;
pub mod smoothing;
pub mod terrain;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::filter::{convolve, Direction, GaussianKernelParams, Kernel, KernelUnits};
    pub use crate::products::{
        compute_terrain_products, TerrainConfig, DEFAULT_ELEVATION_BAND, DIFFUSION_OUTPUT_BANDS,
        GAUSSIAN_OUTPUT_BANDS,
    };
    pub use crate::smoothing::{
        gaussian_smoothing, perona_malik, AnisotropicDiffusion, Conductance, DiffusionParams,
        GaussianParams, GaussianSmoothing, Smoothing,
    };
    pub use crate::terrain::{LocalTerrainAnalysis, TerrainAnalyzer, TerrainBand};
    pub use terrasmooth_core::prelude::*;
}
