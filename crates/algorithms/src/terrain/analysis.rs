//! Local terrain analysis over a bounding rectangle
//!
//! [`TerrainAnalyzer`] is the seam between the product assembler and
//! whatever derives terrain bands from an elevation grid. Closures with the
//! right signature implement it; [`LocalTerrainAnalysis`] is the built-in
//! implementation based on 3×3 Evans-Young derivatives.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::maybe_rayon::*;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use terrasmooth_core::raster::{MultiBandRaster, Raster};
use terrasmooth_core::vector::BoundingRectangle;
use terrasmooth_core::{Error, Result};
use tracing::debug;

use super::derivatives::{extract_window, Derivatives};

/// Derives terrain bands from an elevation grid restricted to a rectangle
pub trait TerrainAnalyzer {
    fn analyze(&self, elevation: &Raster<f64>, bounds: &BoundingRectangle) -> Result<MultiBandRaster>;
}

impl<F> TerrainAnalyzer for F
where
    F: Fn(&Raster<f64>, &BoundingRectangle) -> Result<MultiBandRaster>,
{
    fn analyze(&self, elevation: &Raster<f64>, bounds: &BoundingRectangle) -> Result<MultiBandRaster> {
        self(elevation, bounds)
    }
}

/// Bands produced by [`LocalTerrainAnalysis`].
///
/// The string names returned by [`TerrainBand::as_str`] are the band names in
/// the output dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum TerrainBand {
    Elevation,
    Slope,
    Aspect,
    Hillshade,
    Northness,
    Eastness,
    HorizontalCurvature,
    VerticalCurvature,
    MeanCurvature,
    GaussianCurvature,
    MinimalCurvature,
    MaximalCurvature,
    ShapeIndex,
}

const BAND_COUNT: usize = 13;

impl TerrainBand {
    /// Every band, in output order
    pub const ALL: [TerrainBand; BAND_COUNT] = [
        TerrainBand::Elevation,
        TerrainBand::Slope,
        TerrainBand::Aspect,
        TerrainBand::Hillshade,
        TerrainBand::Northness,
        TerrainBand::Eastness,
        TerrainBand::HorizontalCurvature,
        TerrainBand::VerticalCurvature,
        TerrainBand::MeanCurvature,
        TerrainBand::GaussianCurvature,
        TerrainBand::MinimalCurvature,
        TerrainBand::MaximalCurvature,
        TerrainBand::ShapeIndex,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TerrainBand::Elevation => "Elevation",
            TerrainBand::Slope => "Slope",
            TerrainBand::Aspect => "Aspect",
            TerrainBand::Hillshade => "Hillshade",
            TerrainBand::Northness => "Northness",
            TerrainBand::Eastness => "Eastness",
            TerrainBand::HorizontalCurvature => "HorizontalCurvature",
            TerrainBand::VerticalCurvature => "VerticalCurvature",
            TerrainBand::MeanCurvature => "MeanCurvature",
            TerrainBand::GaussianCurvature => "GaussianCurvature",
            TerrainBand::MinimalCurvature => "MinimalCurvature",
            TerrainBand::MaximalCurvature => "MaximalCurvature",
            TerrainBand::ShapeIndex => "ShapeIndex",
        }
    }
}

impl fmt::Display for TerrainBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TerrainBand {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        TerrainBand::ALL
            .into_iter()
            .find(|band| band.as_str() == s)
            .ok_or_else(|| Error::MissingBand(s.to_string()))
    }
}

impl AsRef<str> for TerrainBand {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Built-in terrain analyzer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalTerrainAnalysis {
    /// Multiplies the cell size, e.g. ~111320 for geographic DEMs in metres
    pub z_factor: f64,
    /// Sun azimuth in degrees (0 = North, clockwise)
    pub azimuth: f64,
    /// Sun altitude in degrees above horizon
    pub altitude: f64,
}

impl Default for LocalTerrainAnalysis {
    fn default() -> Self {
        Self {
            z_factor: 1.0,
            azimuth: 315.0,
            altitude: 45.0,
        }
    }
}

impl LocalTerrainAnalysis {
    pub fn validate(&self) -> Result<()> {
        if !self.z_factor.is_finite() || self.z_factor <= 0.0 {
            return Err(Error::invalid_parameter(
                "z_factor",
                self.z_factor,
                "must be a positive finite number",
            ));
        }
        if !(0.0..=90.0).contains(&self.altitude) {
            return Err(Error::invalid_parameter(
                "altitude",
                self.altitude,
                "must be between 0 and 90 degrees",
            ));
        }
        if !self.azimuth.is_finite() {
            return Err(Error::invalid_parameter("azimuth", self.azimuth, "must be finite"));
        }
        Ok(())
    }

    fn cell_values(&self, d: &Derivatives, z: f64, cos_zenith: f64, sin_zenith: f64) -> [f64; BAND_COUNT] {
        let slope = d.slope();
        let aspect = d.aspect();

        let shade = if d.is_flat() {
            cos_zenith
        } else {
            cos_zenith * slope.cos()
                + sin_zenith * slope.sin() * (self.azimuth.to_radians() - aspect).cos()
        };

        [
            z,
            slope.to_degrees(),
            aspect.to_degrees(),
            (shade.clamp(0.0, 1.0) * 255.0).round(),
            aspect.cos(),
            aspect.sin(),
            d.horizontal_curvature(),
            d.vertical_curvature(),
            d.mean_curvature(),
            d.gaussian_curvature(),
            d.minimal_curvature(),
            d.maximal_curvature(),
            d.shape_index(),
        ]
    }
}

impl TerrainAnalyzer for LocalTerrainAnalysis {
    /// Cells whose centre falls outside `bounds`, edge cells and cells with
    /// an incomplete window are NaN in every band.
    fn analyze(&self, elevation: &Raster<f64>, bounds: &BoundingRectangle) -> Result<MultiBandRaster> {
        self.validate()?;

        let (rows, cols) = elevation.shape();
        // Windows test for NaN only, so a numeric no-data value is mapped first
        let dem: Cow<'_, Raster<f64>> = match elevation.nodata() {
            Some(nd) if !nd.is_nan() => Cow::Owned(elevation.to_f64()),
            _ => Cow::Borrowed(elevation),
        };
        let data = dem.data();
        let cell_size = dem.cell_size() * self.z_factor;

        let zenith = (90.0 - self.altitude).to_radians();
        let (cos_zenith, sin_zenith) = (zenith.cos(), zenith.sin());

        debug!(rows, cols, ?bounds, "local terrain analysis");

        let cells: Vec<[f64; BAND_COUNT]> = (0..rows)
            .into_par_iter()
            .flat_map(|row| {
                let mut row_data = vec![[f64::NAN; BAND_COUNT]; cols];

                if row == 0 || row + 1 >= rows || cols < 3 {
                    return row_data;
                }

                for (col, out) in row_data.iter_mut().enumerate().take(cols - 1).skip(1) {
                    let (x, y) = dem.pixel_to_geo(col, row);
                    if !bounds.contains(x, y) {
                        continue;
                    }
                    let Some(window) = extract_window(data, row, col) else {
                        continue;
                    };
                    let d = Derivatives::evans_young(window, cell_size);
                    *out = self.cell_values(&d, window[4], cos_zenith, sin_zenith);
                }

                row_data
            })
            .collect();

        let mut output = MultiBandRaster::new();
        for (i, band) in TerrainBand::ALL.iter().enumerate() {
            let values: Vec<f64> = cells.iter().map(|cell| cell[i]).collect();
            let array = Array2::from_shape_vec((rows, cols), values)
                .map_err(|e| Error::Other(e.to_string()))?;
            let mut raster = elevation.with_data(array)?;
            raster.set_nodata(Some(f64::NAN));
            output.push_band(band.as_str(), raster)?;
        }

        Ok(output)
    }
}
