//! Convolution kernels
//!
//! Two kinds of kernel exist:
//!
//! - the four fixed 3×3 first-difference stencils used by anisotropic
//!   diffusion ([`Direction::stencil`])
//! - a parametric Gaussian ([`Kernel::gaussian`])
//!
//! ```text
//!   West         East         North        South
//!   0  0  0      0  0  0      0  1  0      0  0  0
//!   1 -1  0      0 -1  1      0 -1  0      0 -1  0
//!   0  0  0      0  0  0      0  0  0      0  1  0
//! ```

use ndarray::{arr2, Array2};
use serde::{Deserialize, Serialize};
use terrasmooth_core::{Error, Result};

/// Unit in which Gaussian radius and sigma are expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KernelUnits {
    /// Grid cells
    #[default]
    Pixels,
    /// Map units; converted to cells with the grid's cell size
    Meters,
}

/// Parameters of a Gaussian kernel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaussianKernelParams {
    /// Half-width of the kernel (default 3)
    pub radius: f64,
    /// Standard deviation (default 2)
    pub sigma: f64,
    /// Unit of `radius` and `sigma` (default pixels)
    pub units: KernelUnits,
    /// Scale weights to sum to 1 (default true)
    pub normalize: bool,
    /// Multiplier applied to every weight after normalization (default 1)
    pub magnitude: f64,
}

impl Default for GaussianKernelParams {
    fn default() -> Self {
        Self {
            radius: 3.0,
            sigma: 2.0,
            units: KernelUnits::Pixels,
            normalize: true,
            magnitude: 1.0,
        }
    }
}

/// Largest Gaussian half width in cells; the kernel side is at most 2049
pub const MAX_KERNEL_HALF_WIDTH: usize = 1024;

impl GaussianKernelParams {
    /// Reject non-positive radius or sigma, non-finite values and pixel radii
    /// beyond [`MAX_KERNEL_HALF_WIDTH`]
    pub fn validate(&self) -> Result<()> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(Error::invalid_parameter("radius", self.radius, "must be finite and > 0"));
        }
        if self.units == KernelUnits::Pixels && self.radius > MAX_KERNEL_HALF_WIDTH as f64 {
            return Err(Error::invalid_parameter(
                "radius",
                self.radius,
                format!("must be at most {} cells", MAX_KERNEL_HALF_WIDTH),
            ));
        }
        if !self.sigma.is_finite() || self.sigma <= 0.0 {
            return Err(Error::invalid_parameter("sigma", self.sigma, "must be finite and > 0"));
        }
        if !self.magnitude.is_finite() {
            return Err(Error::invalid_parameter("magnitude", self.magnitude, "must be finite"));
        }
        Ok(())
    }
}

/// Direction of a first-difference stencil
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    West,
    East,
    North,
    South,
}

impl Direction {
    /// All four directions, in the order W, E, N, S
    pub const ALL: [Direction; 4] = [
        Direction::West,
        Direction::East,
        Direction::North,
        Direction::South,
    ];

    /// Fixed 3×3 stencil giving `neighbour - centre` in this direction
    pub fn stencil(self) -> Kernel {
        let weights = match self {
            Direction::West => arr2(&[[0.0, 0.0, 0.0], [1.0, -1.0, 0.0], [0.0, 0.0, 0.0]]),
            Direction::East => arr2(&[[0.0, 0.0, 0.0], [0.0, -1.0, 1.0], [0.0, 0.0, 0.0]]),
            Direction::North => arr2(&[[0.0, 1.0, 0.0], [0.0, -1.0, 0.0], [0.0, 0.0, 0.0]]),
            Direction::South => arr2(&[[0.0, 0.0, 0.0], [0.0, -1.0, 0.0], [0.0, 1.0, 0.0]]),
        };
        Kernel { weights }
    }
}

/// Odd-sized weight matrix anchored at its centre cell
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    weights: Array2<f64>,
}

impl Kernel {
    /// Custom kernel from a weight matrix.
    ///
    /// Both dimensions must be odd so the kernel has a centre cell.
    pub fn fixed(weights: Array2<f64>) -> Result<Self> {
        let (rows, cols) = weights.dim();
        if rows % 2 == 0 || cols % 2 == 0 {
            return Err(Error::invalid_parameter(
                "kernel",
                format!("{}x{}", rows, cols),
                "dimensions must be odd",
            ));
        }
        if weights.iter().any(|w| !w.is_finite()) {
            return Err(Error::invalid_parameter(
                "kernel",
                format!("{}x{}", rows, cols),
                "weights must be finite",
            ));
        }
        Ok(Self { weights })
    }

    /// Gaussian kernel.
    ///
    /// `cell_size` converts metric radius/sigma to cells and is ignored for
    /// [`KernelUnits::Pixels`]. The kernel side is `2 * ceil(radius) + 1`
    /// cells; weights are `exp(-(dx² + dy²) / 2σ²)`, optionally normalized to
    /// sum to 1, then multiplied by `magnitude`.
    pub fn gaussian(params: &GaussianKernelParams, cell_size: f64) -> Result<Self> {
        params.validate()?;

        let (radius, sigma) = match params.units {
            KernelUnits::Pixels => (params.radius, params.sigma),
            KernelUnits::Meters => {
                if !cell_size.is_finite() || cell_size <= 0.0 {
                    return Err(Error::invalid_parameter(
                        "cell_size",
                        cell_size,
                        "metric kernels need a positive cell size",
                    ));
                }
                (params.radius / cell_size, params.sigma / cell_size)
            }
        };

        let half_cells = radius.ceil();
        if half_cells > MAX_KERNEL_HALF_WIDTH as f64 {
            return Err(Error::invalid_parameter(
                "radius",
                params.radius,
                format!("spans more than {} cells", MAX_KERNEL_HALF_WIDTH),
            ));
        }
        let half = half_cells as usize;
        let size = half
            .checked_mul(2)
            .and_then(|s| s.checked_add(1))
            .ok_or_else(|| Error::invalid_parameter("radius", params.radius, "kernel size overflows"))?;
        let half = half as isize;
        let two_sigma_sq = 2.0 * sigma * sigma;

        let mut weights = Array2::from_shape_fn((size, size), |(i, j)| {
            let dr = i as isize - half;
            let dc = j as isize - half;
            let dist_sq = (dr * dr + dc * dc) as f64;
            (-dist_sq / two_sigma_sq).exp()
        });

        if params.normalize {
            let sum = weights.sum();
            weights /= sum;
        }
        weights *= params.magnitude;

        Ok(Self { weights })
    }

    pub fn weights(&self) -> &Array2<f64> {
        &self.weights
    }

    pub fn rows(&self) -> usize {
        self.weights.nrows()
    }

    pub fn cols(&self) -> usize {
        self.weights.ncols()
    }

    /// Offset of the centre row
    pub fn half_rows(&self) -> usize {
        self.rows() / 2
    }

    /// Offset of the centre column
    pub fn half_cols(&self) -> usize {
        self.cols() / 2
    }

    /// Sum of all weights
    pub fn sum(&self) -> f64 {
        self.weights.sum()
    }
}
