//! Terrain product configuration

use terrasmooth_core::raster::MultiBandRaster;
use terrasmooth_core::vector::{BoundingRectangle, Region};
use terrasmooth_core::Result;

use crate::smoothing::Smoothing;
use crate::terrain::{TerrainAnalyzer, TerrainBand};

use super::compute_terrain_products;

/// Band read from the smoothed dataset and handed to the analyzer
pub const DEFAULT_ELEVATION_BAND: &str = "elevation";

/// Output of the Gaussian preset
pub const GAUSSIAN_OUTPUT_BANDS: [TerrainBand; 3] = [
    TerrainBand::Elevation,
    TerrainBand::Slope,
    TerrainBand::GaussianCurvature,
];

/// Output of the Perona–Malik preset
pub const DIFFUSION_OUTPUT_BANDS: [TerrainBand; 3] = [
    TerrainBand::HorizontalCurvature,
    TerrainBand::VerticalCurvature,
    TerrainBand::MeanCurvature,
];

/// Everything one terrain product computation needs.
///
/// Built once, consumed by [`compute_terrain_products`]. The smoothing is
/// always valid: presets use defaults and [`TerrainConfig::with_smoothing`]
/// validates its argument.
#[derive(Debug, Clone)]
pub struct TerrainConfig {
    pub dataset: MultiBandRaster,
    pub region: Region,
    pub elevation_band: String,
    pub output_bands: Vec<String>,
    pub(crate) smoothing: Smoothing,
}

impl TerrainConfig {
    /// Gaussian smoothing, then elevation, slope and Gaussian curvature
    pub fn gaussian(dataset: MultiBandRaster, region: impl Into<Region>) -> Self {
        Self::preset(dataset, region.into(), Smoothing::default_gaussian(), &GAUSSIAN_OUTPUT_BANDS)
    }

    /// Perona–Malik diffusion, then horizontal, vertical and mean curvature
    pub fn perona_malik(dataset: MultiBandRaster, region: impl Into<Region>) -> Self {
        Self::preset(dataset, region.into(), Smoothing::default_diffusion(), &DIFFUSION_OUTPUT_BANDS)
    }

    fn preset(dataset: MultiBandRaster, region: Region, smoothing: Smoothing, bands: &[TerrainBand]) -> Self {
        Self {
            dataset,
            region,
            elevation_band: DEFAULT_ELEVATION_BAND.to_string(),
            output_bands: bands.iter().map(|b| b.as_str().to_string()).collect(),
            smoothing,
        }
    }

    pub fn with_elevation_band(mut self, name: impl Into<String>) -> Self {
        self.elevation_band = name.into();
        self
    }

    pub fn with_output_bands<I, S>(mut self, bands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.output_bands = bands.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the smoothing strategy; fails on invalid parameters
    pub fn with_smoothing(mut self, smoothing: Smoothing) -> Result<Self> {
        smoothing.validate()?;
        self.smoothing = smoothing;
        Ok(self)
    }

    pub fn smoothing(&self) -> &Smoothing {
        &self.smoothing
    }

    pub fn bounding_rectangle(&self) -> BoundingRectangle {
        self.region.bounding_rectangle()
    }

    /// Shorthand for [`compute_terrain_products`]
    pub fn compute<A>(&self, analyzer: &A) -> Result<MultiBandRaster>
    where
        A: TerrainAnalyzer + ?Sized,
    {
        compute_terrain_products(self, analyzer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smoothing::DiffusionParams;
    use geo_types::{point, Geometry};
    use terrasmooth_core::raster::Raster;
    use terrasmooth_core::Error;

    fn dataset() -> MultiBandRaster {
        MultiBandRaster::new()
            .with_band("elevation", Raster::filled(4, 4, 1.0))
            .unwrap()
    }

    fn region() -> Geometry<f64> {
        Geometry::Point(point!(x: 1.0, y: 2.0))
    }

    #[test]
    fn test_gaussian_preset() {
        let config = TerrainConfig::gaussian(dataset(), region());
        assert_eq!(config.elevation_band, DEFAULT_ELEVATION_BAND);
        assert_eq!(config.output_bands, vec!["Elevation", "Slope", "GaussianCurvature"]);
        assert_eq!(config.smoothing().name(), "gaussian");
    }

    #[test]
    fn test_perona_malik_preset() {
        let config = TerrainConfig::perona_malik(dataset(), region());
        assert_eq!(
            config.output_bands,
            vec!["HorizontalCurvature", "VerticalCurvature", "MeanCurvature"]
        );
        assert_eq!(config.smoothing(), &Smoothing::default_diffusion());
    }

    #[test]
    fn test_builders() {
        let config = TerrainConfig::gaussian(dataset(), region())
            .with_elevation_band("dem")
            .with_output_bands(["C", "A"]);
        assert_eq!(config.elevation_band, "dem");
        assert_eq!(config.output_bands, vec!["C", "A"]);
    }

    #[test]
    fn test_with_smoothing_validates() {
        let bad = Smoothing::Diffusion(DiffusionParams {
            k: 0.0,
            ..Default::default()
        });
        let err = TerrainConfig::gaussian(dataset(), region()).with_smoothing(bad).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "k", .. }));

        let config = TerrainConfig::gaussian(dataset(), region())
            .with_smoothing(Smoothing::default_diffusion())
            .unwrap();
        assert_eq!(config.smoothing().name(), "perona-malik");
    }

    #[test]
    fn test_point_region_rectangle() {
        let rect = TerrainConfig::gaussian(dataset(), region()).bounding_rectangle();
        assert_eq!(rect, BoundingRectangle::new(1.0, 2.0, 1.0, 2.0));
        assert!(rect.is_degenerate());
    }
}
