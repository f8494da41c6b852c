//! 2D convolution with replicated borders
//!
//! Every kernel pass in the crate goes through [`convolve`], so all of them
//! share one border policy: samples outside the grid take the value of the
//! nearest edge cell (replicate / clamp-to-edge).
//!
//! ```text
//!   a a | a b c d | d d
//! ```
//!
//! The kernel is applied without flipping (correlation): weight (i, j)
//! multiplies the sample at `(row + i - half_rows, col + j - half_cols)`.

use crate::maybe_rayon::*;
use ndarray::Array2;
use terrasmooth_core::raster::Raster;
use terrasmooth_core::{Error, Result};

use super::Kernel;

/// Convolve a grid with a kernel.
///
/// No-data cells (NaN or the grid's no-data value) poison every output cell
/// whose window reaches them through a non-zero weight; zero weights never
/// read their sample. The output has the input's shape and transform.
pub fn convolve(grid: &Raster<f64>, kernel: &Kernel) -> Result<Raster<f64>> {
    let (rows, cols) = grid.shape();
    let data = grid.data();
    let nodata = grid.nodata();

    let half_r = kernel.half_rows() as isize;
    let half_c = kernel.half_cols() as isize;
    let taps: Vec<(isize, isize, f64)> = kernel
        .weights()
        .indexed_iter()
        .filter(|(_, w)| **w != 0.0)
        .map(|((i, j), &w)| (i as isize - half_r, j as isize - half_c, w))
        .collect();

    let output_data: Vec<f64> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = vec![f64::NAN; cols];

            for (col, out) in row_data.iter_mut().enumerate() {
                let mut sum = 0.0;
                for &(dr, dc, w) in &taps {
                    let r = clamp_index(row as isize + dr, rows);
                    let c = clamp_index(col as isize + dc, cols);
                    let z = data[(r, c)];
                    if grid.is_nodata(z) {
                        sum = f64::NAN;
                        break;
                    }
                    sum += w * z;
                }
                *out = sum;
            }

            row_data
        })
        .collect();

    let array = Array2::from_shape_vec((rows, cols), output_data)
        .map_err(|e| Error::Other(e.to_string()))?;
    let mut output = grid.with_data(array)?;
    output.set_nodata(nodata.map(|_| f64::NAN));

    Ok(output)
}

#[inline]
fn clamp_index(i: isize, len: usize) -> usize {
    i.clamp(0, len as isize - 1) as usize
}
