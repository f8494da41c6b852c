//! Gaussian DEM smoothing
//!
//! Single pass of an isotropic Gaussian kernel:
//! G(x,y) = exp(-(x²+y²)/(2σ²)), normalized to unit sum by default.

use terrasmooth_core::raster::Raster;
use terrasmooth_core::{Algorithm, Error, Result};
use tracing::debug;

use crate::filter::{convolve, GaussianKernelParams, Kernel};

/// Parameters for Gaussian smoothing (radius 3, sigma 2, pixels, normalized)
pub type GaussianParams = GaussianKernelParams;

/// Gaussian smoothing algorithm
#[derive(Debug, Clone, Default)]
pub struct GaussianSmoothing;

impl Algorithm for GaussianSmoothing {
    type Input = Raster<f64>;
    type Output = Raster<f64>;
    type Params = GaussianParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "GaussianSmoothing"
    }

    fn description(&self) -> &'static str {
        "Smooth a DEM with a single isotropic Gaussian convolution"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        gaussian_smoothing(&input, &params)
    }
}

/// Apply Gaussian smoothing to a DEM.
///
/// Parameters are validated before the kernel is built. Borders follow the
/// replicate policy of [`convolve`].
///
/// # Arguments
/// * `dem` - Input DEM
/// * `params` - Kernel parameters
///
/// # Returns
/// Smoothed DEM with the input's shape and transform
pub fn gaussian_smoothing(dem: &Raster<f64>, params: &GaussianParams) -> Result<Raster<f64>> {
    let kernel = Kernel::gaussian(params, dem.cell_size())?;

    debug!(
        radius = params.radius,
        sigma = params.sigma,
        units = ?params.units,
        kernel_size = kernel.rows(),
        rows = dem.rows(),
        cols = dem.cols(),
        "gaussian smoothing"
    );

    convolve(dem, &kernel)
}
