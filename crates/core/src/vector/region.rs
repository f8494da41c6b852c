//! Region of interest

use geo::CoordsIter;
use geo_types::{Geometry, Polygon, Rect};

use super::{BoundingRectangle, FeatureCollection};

/// Region of interest: a single geometry or a collection of features.
///
/// Coordinates are expected in the coordinate system of the elevation grid.
#[derive(Debug, Clone)]
pub enum Region {
    Geometry(Geometry<f64>),
    Collection(FeatureCollection),
}

impl Region {
    /// Vertices of the region's boundary, in order.
    ///
    /// A collection contributes the exterior vertices of every feature
    /// geometry, feature by feature; holes never widen the bounds and are
    /// left out.
    pub fn boundary_coords(&self) -> Vec<(f64, f64)> {
        match self {
            Region::Geometry(geometry) => exterior_coords(geometry).collect(),
            Region::Collection(collection) => collection
                .geometries()
                .flat_map(exterior_coords)
                .collect(),
        }
    }

    /// Axis-aligned bounding rectangle of the boundary.
    ///
    /// An empty boundary gives the degenerate rectangle at the origin.
    pub fn bounding_rectangle(&self) -> BoundingRectangle {
        BoundingRectangle::from_coords(self.boundary_coords())
    }
}

fn exterior_coords(geometry: &Geometry<f64>) -> impl Iterator<Item = (f64, f64)> + '_ {
    geometry.exterior_coords_iter().map(|c| (c.x, c.y))
}

impl From<Geometry<f64>> for Region {
    fn from(geometry: Geometry<f64>) -> Self {
        Region::Geometry(geometry)
    }
}

impl From<Polygon<f64>> for Region {
    fn from(polygon: Polygon<f64>) -> Self {
        Region::Geometry(Geometry::Polygon(polygon))
    }
}

impl From<Rect<f64>> for Region {
    fn from(rect: Rect<f64>) -> Self {
        Region::Geometry(Geometry::Rect(rect))
    }
}

impl From<FeatureCollection> for Region {
    fn from(collection: FeatureCollection) -> Self {
        Region::Collection(collection)
    }
}
