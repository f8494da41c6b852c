//! Region-of-interest geometry
//!
//! The pipeline only needs the axis-aligned [`BoundingRectangle`] of the
//! region's boundary; geometries themselves are `geo-types` values.

mod bounds;
mod region;

pub use bounds::BoundingRectangle;
pub use region::Region;

use geo_types::Geometry;

/// A feature of a region collection; its geometry may be missing
#[derive(Debug, Clone, Default)]
pub struct Feature {
    pub geometry: Option<Geometry<f64>>,
}

impl Feature {
    pub fn new(geometry: impl Into<Geometry<f64>>) -> Self {
        Self {
            geometry: Some(geometry.into()),
        }
    }

    /// Feature without geometry; contributes nothing to a region's bounds
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Ordered features making up one region of interest
#[derive(Debug, Clone, Default)]
pub struct FeatureCollection {
    features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Geometries of all features that carry one
    pub fn geometries(&self) -> impl Iterator<Item = &Geometry<f64>> {
        self.features.iter().filter_map(|f| f.geometry.as_ref())
    }
}

impl FromIterator<Feature> for FeatureCollection {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        Self {
            features: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::point;

    #[test]
    fn test_geometries_skips_empty_features() {
        let fc: FeatureCollection = vec![Feature::new(point!(x: 1.0, y: 2.0)), Feature::empty()]
            .into_iter()
            .collect();
        assert_eq!(fc.len(), 2);
        assert!(!fc.is_empty());
        assert_eq!(fc.geometries().count(), 1);
        assert!(FeatureCollection::new().is_empty());
    }
}
