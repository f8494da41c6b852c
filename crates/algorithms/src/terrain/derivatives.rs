//! Partial derivatives and curvatures from 3×3 DEM windows
//!
//! ```text
//! 3×3 window indexing:
//!
//!   z1 z2 z3      (NW) (N) (NE)
//!   z4 z5 z6  →   (W)  (C) (E)
//!   z7 z8 z9      (SW) (S) (SE)
//! ```
//!
//! Derivatives follow Evans-Young weighted least squares over all 9 cells;
//! curvature formulas follow Florinsky (2025). Positive `q` points north, so
//! the grid is assumed north-up.
//!
//! Reference:
//! Evans, I.S. (1979). An integrated system of terrain analysis.
//! Florinsky, I.V. (2025). Digital Terrain Analysis, §2 and §4.1.

use ndarray::Array2;
use std::f64::consts::PI;

/// Below this `p² + q²` a cell counts as flat
const FLAT_EPSILON: f64 = 1e-20;

/// First- and second-order partial derivatives of a surface.
///
/// - p = ∂z/∂x, q = ∂z/∂y
/// - r = ∂²z/∂x², s = ∂²z/∂x∂y, t = ∂²z/∂y²
#[derive(Debug, Clone, Copy)]
pub struct Derivatives {
    pub p: f64,
    pub q: f64,
    pub r: f64,
    pub s: f64,
    pub t: f64,
}

impl Derivatives {
    /// Evans-Young estimate; `z` is [z1..z9] in row-major order
    #[inline]
    pub fn evans_young(z: [f64; 9], cellsize: f64) -> Self {
        let [z1, z2, z3, z4, z5, z6, z7, z8, z9] = z;

        let cs6 = 6.0 * cellsize;
        let cs2_3 = 3.0 * cellsize * cellsize;
        let cs2_4 = 4.0 * cellsize * cellsize;

        Self {
            p: (z3 + z6 + z9 - z1 - z4 - z7) / cs6,
            q: (z1 + z2 + z3 - z7 - z8 - z9) / cs6,
            r: (z1 + z3 + z4 + z6 + z7 + z9 - 2.0 * (z2 + z5 + z8)) / cs2_3,
            s: (z3 + z7 - z1 - z9) / cs2_4,
            t: (z1 + z2 + z3 + z7 + z8 + z9 - 2.0 * (z4 + z5 + z6)) / cs2_3,
        }
    }

    #[inline]
    fn p2_plus_q2(&self) -> f64 {
        self.p * self.p + self.q * self.q
    }

    #[inline]
    pub fn is_flat(&self) -> bool {
        self.p2_plus_q2() < FLAT_EPSILON
    }

    /// Slope angle in radians
    #[inline]
    pub fn slope(&self) -> f64 {
        self.p2_plus_q2().sqrt().atan()
    }

    /// Downslope direction in radians clockwise from north, NaN when flat
    #[inline]
    pub fn aspect(&self) -> f64 {
        if self.is_flat() {
            return f64::NAN;
        }
        let a = (-self.p).atan2(-self.q);
        if a < 0.0 {
            a + 2.0 * PI
        } else {
            a
        }
    }

    /// Mean curvature H
    #[inline]
    pub fn mean_curvature(&self) -> f64 {
        let p2 = self.p * self.p;
        let q2 = self.q * self.q;
        let w = 1.0 + p2 + q2;
        -((1.0 + q2) * self.r - 2.0 * self.p * self.q * self.s + (1.0 + p2) * self.t)
            / (2.0 * w * w.sqrt())
    }

    /// Gaussian curvature K
    #[inline]
    pub fn gaussian_curvature(&self) -> f64 {
        let w = 1.0 + self.p2_plus_q2();
        (self.r * self.t - self.s * self.s) / (w * w)
    }

    /// Horizontal (plan) curvature kh; 0 on flat cells
    #[inline]
    pub fn horizontal_curvature(&self) -> f64 {
        let p2q2 = self.p2_plus_q2();
        if p2q2 < FLAT_EPSILON {
            return 0.0;
        }
        let (p2, q2) = (self.p * self.p, self.q * self.q);
        -(q2 * self.r - 2.0 * self.p * self.q * self.s + p2 * self.t) / (p2q2 * (1.0 + p2q2).sqrt())
    }

    /// Vertical (profile) curvature kv; 0 on flat cells
    #[inline]
    pub fn vertical_curvature(&self) -> f64 {
        let p2q2 = self.p2_plus_q2();
        if p2q2 < FLAT_EPSILON {
            return 0.0;
        }
        let (p2, q2) = (self.p * self.p, self.q * self.q);
        let w = 1.0 + p2q2;
        -(p2 * self.r + 2.0 * self.p * self.q * self.s + q2 * self.t) / (p2q2 * w * w.sqrt())
    }

    /// Unsphericity M = √(H² − K)
    #[inline]
    fn unsphericity(&self) -> f64 {
        let h = self.mean_curvature();
        let disc = h * h - self.gaussian_curvature();
        if disc > 0.0 {
            disc.sqrt()
        } else {
            0.0
        }
    }

    /// Minimal principal curvature kmin = H − M
    #[inline]
    pub fn minimal_curvature(&self) -> f64 {
        self.mean_curvature() - self.unsphericity()
    }

    /// Maximal principal curvature kmax = H + M
    #[inline]
    pub fn maximal_curvature(&self) -> f64 {
        self.mean_curvature() + self.unsphericity()
    }

    /// Shape index in [-1, 1]; NaN on planar cells
    #[inline]
    pub fn shape_index(&self) -> f64 {
        let kmax = self.maximal_curvature();
        let kmin = self.minimal_curvature();
        let diff = kmax - kmin;
        if diff.abs() < FLAT_EPSILON {
            if kmax.abs() < FLAT_EPSILON {
                return f64::NAN;
            }
            return kmax.signum();
        }
        (2.0 / PI) * ((kmax + kmin) / diff).atan()
    }
}

/// 3×3 window around an interior cell, or `None` if any cell is NaN
#[inline]
pub fn extract_window(data: &Array2<f64>, row: usize, col: usize) -> Option<[f64; 9]> {
    let window = [
        data[[row - 1, col - 1]],
        data[[row - 1, col]],
        data[[row - 1, col + 1]],
        data[[row, col - 1]],
        data[[row, col]],
        data[[row, col + 1]],
        data[[row + 1, col - 1]],
        data[[row + 1, col]],
        data[[row + 1, col + 1]],
    ];
    if window.iter().any(|z| z.is_nan()) {
        return None;
    }
    Some(window)
}
