//! Kernels and the convolution engine shared by the smoothers

mod convolve;
mod kernel;

pub use convolve::convolve;
pub use kernel::{Direction, GaussianKernelParams, Kernel, KernelUnits, MAX_KERNEL_HALF_WIDTH};
