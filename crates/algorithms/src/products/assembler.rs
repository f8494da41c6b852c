use terrasmooth_core::raster::MultiBandRaster;
use terrasmooth_core::Result;
use tracing::{debug, warn};

use crate::terrain::TerrainAnalyzer;

use super::TerrainConfig;

/// Compute the configured terrain products.
///
/// 1. Bound the region with an axis-aligned rectangle
/// 2. Smooth every band of the dataset
/// 3. Analyze the smoothed elevation band inside the rectangle
/// 4. Keep `output_bands`, in the order given
///
/// An empty region yields the zero-area rectangle at the origin, which is
/// passed to the analyzer as is. Any missing band aborts the computation.
pub fn compute_terrain_products<A>(config: &TerrainConfig, analyzer: &A) -> Result<MultiBandRaster>
where
    A: TerrainAnalyzer + ?Sized,
{
    let bounds = config.bounding_rectangle();
    debug!(
        x_min = bounds.x_min,
        y_min = bounds.y_min,
        x_max = bounds.x_max,
        y_max = bounds.y_max,
        "region bounding rectangle"
    );
    if bounds.is_degenerate() {
        warn!(?bounds, "bounding rectangle has zero area");
    }

    let smoothed = config.smoothing.apply(&config.dataset)?;
    let elevation = smoothed.band(&config.elevation_band)?;

    let analysis = analyzer.analyze(elevation, &bounds)?;

    debug!(
        smoothing = config.smoothing.name(),
        bands = ?config.output_bands,
        "selecting terrain products"
    );
    analysis.select(&config.output_bands)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smoothing::{DiffusionParams, Smoothing};
    use geo_types::{polygon, Geometry, LineString, Polygon};
    use std::cell::RefCell;
    use terrasmooth_core::raster::Raster;
    use terrasmooth_core::vector::{BoundingRectangle, Feature, FeatureCollection};
    use terrasmooth_core::Error;

    fn spike_dataset() -> MultiBandRaster {
        let mut dem: Raster<f64> = Raster::filled(9, 9, 10.0);
        dem.set(4, 4, 50.0).unwrap();
        MultiBandRaster::from_bands([("elevation", dem), ("other", Raster::filled(9, 9, 3.0))]).unwrap()
    }

    fn rectangle() -> Polygon<f64> {
        polygon![(x: 0.0, y: 0.0), (x: 4.0, y: 0.0), (x: 4.0, y: 3.0), (x: 0.0, y: 3.0)]
    }

    /// Returns bands A..D, each filled with its index
    fn abcd(dem: &Raster<f64>, _: &BoundingRectangle) -> Result<MultiBandRaster> {
        let mut out = MultiBandRaster::new();
        for (i, name) in ["A", "B", "C", "D"].iter().enumerate() {
            out.push_band(*name, dem.like(i as f64))?;
        }
        Ok(out)
    }

    #[test]
    fn test_selects_bands_in_requested_order() {
        let config = TerrainConfig::gaussian(spike_dataset(), rectangle()).with_output_bands(["C", "A"]);
        let out = compute_terrain_products(&config, &abcd).unwrap();
        assert_eq!(out.band_names(), vec!["C", "A"]);
        assert_eq!(out.band("C").unwrap().get(0, 0).unwrap(), 2.0);
        assert_eq!(out.band("A").unwrap().get(0, 0).unwrap(), 0.0);
    }

    #[test]
    fn test_missing_output_band_fails() {
        let config = TerrainConfig::gaussian(spike_dataset(), rectangle()).with_output_bands(["A", "Z"]);
        let err = compute_terrain_products(&config, &abcd).unwrap_err();
        assert_eq!(err, Error::MissingBand("Z".to_string()));
    }

    #[test]
    fn test_missing_elevation_band_fails() {
        let config = TerrainConfig::gaussian(spike_dataset(), rectangle()).with_elevation_band("dem");
        let err = compute_terrain_products(&config, &abcd).unwrap_err();
        assert_eq!(err, Error::MissingBand("dem".to_string()));
    }

    #[test]
    fn test_analyzer_receives_bounding_rectangle() {
        let seen = RefCell::new(None);
        let analyzer = |dem: &Raster<f64>, bounds: &BoundingRectangle| {
            *seen.borrow_mut() = Some(*bounds);
            abcd(dem, bounds)
        };
        let config = TerrainConfig::gaussian(spike_dataset(), rectangle()).with_output_bands(["A"]);
        compute_terrain_products(&config, &analyzer).unwrap();
        assert_eq!(seen.into_inner(), Some(BoundingRectangle::new(0.0, 0.0, 4.0, 3.0)));
    }

    #[test]
    fn test_collection_region_spans_all_features() {
        let features: FeatureCollection = [
            Feature::new(polygon![(x: -2.0, y: 1.0), (x: 0.0, y: 1.0), (x: 0.0, y: 2.0)]),
            Feature::new(polygon![(x: 3.0, y: 5.0), (x: 6.0, y: 5.0), (x: 6.0, y: 8.0)]),
        ]
        .into_iter()
        .collect();
        let seen = RefCell::new(None);
        let analyzer = |dem: &Raster<f64>, bounds: &BoundingRectangle| {
            *seen.borrow_mut() = Some(*bounds);
            abcd(dem, bounds)
        };
        let config = TerrainConfig::gaussian(spike_dataset(), features).with_output_bands(["B"]);
        compute_terrain_products(&config, &analyzer).unwrap();
        assert_eq!(seen.into_inner(), Some(BoundingRectangle::new(-2.0, 1.0, 6.0, 8.0)));
    }

    #[test]
    fn test_empty_region_collapses_to_origin() {
        let empty = Geometry::LineString(LineString::new(vec![]));
        let seen = RefCell::new(None);
        let analyzer = |dem: &Raster<f64>, bounds: &BoundingRectangle| {
            *seen.borrow_mut() = Some(*bounds);
            abcd(dem, bounds)
        };
        let config = TerrainConfig::gaussian(spike_dataset(), empty).with_output_bands(["A"]);
        assert!(compute_terrain_products(&config, &analyzer).is_ok());
        assert_eq!(seen.into_inner(), Some(BoundingRectangle::default()));
    }

    #[test]
    fn test_analyzer_sees_smoothed_elevation() {
        let peak = RefCell::new(f64::NAN);
        let analyzer = |dem: &Raster<f64>, _: &BoundingRectangle| {
            *peak.borrow_mut() = dem.get(4, 4)?;
            MultiBandRaster::new().with_band("elevation", dem.clone())
        };

        for smoothing in [
            Smoothing::default_gaussian(),
            Smoothing::diffusion(DiffusionParams::default()).unwrap(),
        ] {
            let config = TerrainConfig::gaussian(spike_dataset(), rectangle())
                .with_smoothing(smoothing)
                .unwrap()
                .with_output_bands(["elevation"]);
            let out = compute_terrain_products(&config, &analyzer).unwrap();
            assert!(*peak.borrow() < 50.0);
            assert_eq!(out.band("elevation").unwrap().get(4, 4).unwrap(), *peak.borrow());
        }
    }

    #[test]
    fn test_compute_shorthand() {
        let config = TerrainConfig::perona_malik(spike_dataset(), rectangle()).with_output_bands(["D"]);
        let a = config.compute(&abcd).unwrap();
        let b = compute_terrain_products(&config, &abcd).unwrap();
        assert_eq!(a, b);
    }
}
