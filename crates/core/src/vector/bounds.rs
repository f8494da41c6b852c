//! Axis-aligned bounding rectangles

use geo_types::{coord, Polygon, Rect};
use serde::{Deserialize, Serialize};

/// Smallest axis-aligned rectangle containing a set of vertices.
///
/// `x_min <= x_max` and `y_min <= y_max` always hold. Zero-area rectangles
/// (a single vertex, collinear vertices) are valid values; what they mean to
/// a terrain analysis is that analysis' contract.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingRectangle {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl BoundingRectangle {
    /// Build from two opposite corners, in any order
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            x_min: x0.min(x1),
            x_max: x0.max(x1),
            y_min: y0.min(y1),
            y_max: y0.max(y1),
        }
    }

    /// Min/max of the x and y sequences, or `None` for an empty sequence
    pub fn try_from_coords<I>(coords: I) -> Option<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut iter = coords.into_iter();
        let (x, y) = iter.next()?;
        let init = Self {
            x_min: x,
            x_max: x,
            y_min: y,
            y_max: y,
        };
        Some(iter.fold(init, |acc, (x, y)| Self {
            x_min: acc.x_min.min(x),
            x_max: acc.x_max.max(x),
            y_min: acc.y_min.min(y),
            y_max: acc.y_max.max(y),
        }))
    }

    /// Like [`try_from_coords`](Self::try_from_coords), but an empty
    /// sequence yields the degenerate rectangle at the origin
    pub fn from_coords<I>(coords: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        Self::try_from_coords(coords).unwrap_or_default()
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Zero width or zero height
    pub fn is_degenerate(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Inclusive point-in-rectangle test
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }

    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            coord! { x: self.x_min, y: self.y_min },
            coord! { x: self.x_max, y: self.y_max },
        )
    }

    pub fn to_polygon(&self) -> Polygon<f64> {
        self.to_rect().to_polygon()
    }
}

impl From<Rect<f64>> for BoundingRectangle {
    fn from(rect: Rect<f64>) -> Self {
        Self::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y)
    }
}
