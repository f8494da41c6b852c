//! Terrain analysis on smoothed elevation
//!
//! - derivatives: Evans-Young partial derivatives and curvature formulas
//! - analysis: the [`TerrainAnalyzer`] seam and its built-in implementation

mod analysis;
mod derivatives;

pub use analysis::{LocalTerrainAnalysis, TerrainAnalyzer, TerrainBand};
pub use derivatives::Derivatives;
