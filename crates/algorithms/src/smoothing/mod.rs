//! DEM noise suppression ahead of terrain analysis
//!
//! - Gaussian: single isotropic convolution
//! - Perona–Malik: iterative edge-preserving anisotropic diffusion
//!
//! [`Smoothing`] pairs either method with its parameters, so callers can
//! store the choice in a configuration and apply it to a grid or a whole
//! multi-band dataset.

mod diffusion;
mod gaussian;

pub use diffusion::{perona_malik, AnisotropicDiffusion, Conductance, DiffusionParams, DIFFUSION_RATE};
pub use gaussian::{gaussian_smoothing, GaussianParams, GaussianSmoothing};

use serde::{Deserialize, Serialize};
use terrasmooth_core::raster::{MultiBandRaster, Raster};
use terrasmooth_core::Result;

/// Smoothing strategy: a grid → grid function with its parameters.
///
/// Serialized with an internal `method` tag:
///
/// ```json
/// { "method": "diffusion", "k": 3.5, "iterations": 10, "conductance": "rational" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum Smoothing {
    Gaussian(GaussianParams),
    Diffusion(DiffusionParams),
}

impl Smoothing {
    /// Gaussian smoothing, validating the parameters now
    pub fn gaussian(params: GaussianParams) -> Result<Self> {
        params.validate()?;
        Ok(Smoothing::Gaussian(params))
    }

    /// Perona–Malik diffusion, validating the parameters now
    pub fn diffusion(params: DiffusionParams) -> Result<Self> {
        params.validate()?;
        Ok(Smoothing::Diffusion(params))
    }

    /// Gaussian with radius 3, sigma 2, pixels, normalized, magnitude 1
    pub fn default_gaussian() -> Self {
        Smoothing::Gaussian(GaussianParams::default())
    }

    /// Diffusion with K = 3.5, 10 iterations, rational conductance
    pub fn default_diffusion() -> Self {
        Smoothing::Diffusion(DiffusionParams::default())
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            Smoothing::Gaussian(p) => p.validate(),
            Smoothing::Diffusion(p) => p.validate(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Smoothing::Gaussian(_) => "gaussian",
            Smoothing::Diffusion(_) => "perona-malik",
        }
    }

    /// Smooth one grid
    pub fn apply_grid(&self, grid: &Raster<f64>) -> Result<Raster<f64>> {
        match self {
            Smoothing::Gaussian(p) => gaussian_smoothing(grid, p),
            Smoothing::Diffusion(p) => perona_malik(grid, p),
        }
    }

    /// Smooth every band of a dataset, keeping band names and order
    pub fn apply(&self, dataset: &MultiBandRaster) -> Result<MultiBandRaster> {
        self.validate()?;
        dataset.try_map_bands(|band| self.apply_grid(band))
    }
}

impl Default for Smoothing {
    fn default() -> Self {
        Self::default_gaussian()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use terrasmooth_core::Error;

    fn dataset() -> MultiBandRaster {
        let mut spike: Raster<f64> = Raster::filled(9, 9, 10.0);
        spike.set(4, 4, 50.0).unwrap();
        MultiBandRaster::from_bands([
            ("elevation", spike),
            ("quality", Raster::filled(9, 9, 1.0)),
        ])
        .unwrap()
    }

    #[test]
    fn test_constructors_validate_eagerly() {
        let bad_gaussian = GaussianParams {
            radius: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            Smoothing::gaussian(bad_gaussian),
            Err(Error::InvalidParameter { name: "radius", .. })
        ));

        let bad_diffusion = DiffusionParams {
            k: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            Smoothing::diffusion(bad_diffusion),
            Err(Error::InvalidParameter { name: "k", .. })
        ));
    }

    #[test]
    fn test_apply_smooths_every_band() {
        let data = dataset();
        for smoothing in [Smoothing::default_gaussian(), Smoothing::default_diffusion()] {
            let out = smoothing.apply(&data).unwrap();
            assert_eq!(out.band_names(), vec!["elevation", "quality"]);
            assert!(out.band("elevation").unwrap().get(4, 4).unwrap() < 50.0);
            for &v in out.band("quality").unwrap().data().iter() {
                assert!((v - 1.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_apply_grid_matches_free_functions() {
        let grid = dataset().band("elevation").unwrap().clone();
        let via_enum = Smoothing::default_diffusion().apply_grid(&grid).unwrap();
        let direct = perona_malik(&grid, &DiffusionParams::default()).unwrap();
        assert_eq!(via_enum.data(), direct.data());
    }

    #[test]
    fn test_serde_tagged_representation() {
        let json = r#"{"method": "diffusion", "k": 2.0, "conductance": "exponential"}"#;
        let smoothing: Smoothing = serde_json::from_str(json).unwrap();
        assert_eq!(
            smoothing,
            Smoothing::Diffusion(DiffusionParams {
                k: 2.0,
                iterations: 10,
                conductance: Conductance::Exponential,
            })
        );

        let gaussian: Smoothing = serde_json::from_str(r#"{"method": "gaussian", "sigma": 1.5}"#).unwrap();
        match &gaussian {
            Smoothing::Gaussian(p) => {
                assert_eq!(p.sigma, 1.5);
                assert_eq!(p.radius, 3.0);
                assert!(p.normalize);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(gaussian.name(), "gaussian");

        let text = serde_json::to_string(&Smoothing::default_diffusion()).unwrap();
        assert!(text.contains(r#""method":"diffusion""#));
    }

    #[test]
    fn test_deserialized_invalid_params_fail_on_apply() {
        let smoothing: Smoothing = serde_json::from_str(r#"{"method": "diffusion", "k": 0.0}"#).unwrap();
        assert!(smoothing.validate().is_err());
        assert!(smoothing.apply(&dataset()).is_err());
    }
}
