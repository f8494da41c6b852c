//! Named multi-band rasters
//!
//! A [`MultiBandRaster`] is the dataset handed through the smoothing
//! pipeline: an ordered list of uniquely named `f64` bands ("elevation",
//! "Slope", ...) that share one shape and one transform.

use crate::error::{Error, Result};
use crate::raster::Raster;

/// Ordered collection of named bands sharing one grid
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultiBandRaster {
    bands: Vec<(String, Raster<f64>)>,
}

impl MultiBandRaster {
    /// Create an empty multi-band raster
    pub fn new() -> Self {
        Self { bands: Vec::new() }
    }

    /// Build from `(name, raster)` pairs, keeping their order
    pub fn from_bands<I, S>(bands: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Raster<f64>)>,
        S: Into<String>,
    {
        let mut out = Self::new();
        for (name, raster) in bands {
            out.push_band(name, raster)?;
        }
        Ok(out)
    }

    /// Builder-style [`push_band`](Self::push_band)
    pub fn with_band(mut self, name: impl Into<String>, raster: Raster<f64>) -> Result<Self> {
        self.push_band(name, raster)?;
        Ok(self)
    }

    /// Append a band.
    ///
    /// Fails if the name is already taken or the shape differs from the
    /// bands already present.
    pub fn push_band(&mut self, name: impl Into<String>, raster: Raster<f64>) -> Result<()> {
        let name = name.into();
        if self.contains(&name) {
            return Err(Error::DuplicateBand(name));
        }
        if let Some((er, ec)) = self.shape() {
            let (ar, ac) = raster.shape();
            if (er, ec) != (ar, ac) {
                return Err(Error::SizeMismatch { er, ec, ar, ac });
            }
        }
        self.bands.push((name, raster));
        Ok(())
    }

    /// Look up a band by name
    pub fn band(&self, name: &str) -> Result<&Raster<f64>> {
        self.bands
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, r)| r)
            .ok_or_else(|| Error::MissingBand(name.to_string()))
    }

    /// Whether a band with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.bands.iter().any(|(n, _)| n == name)
    }

    /// The named bands, in the order requested.
    ///
    /// Fails on the first name that is not present; nothing is returned in
    /// that case. Band names stay unique, so naming a band twice fails with
    /// [`Error::DuplicateBand`].
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Self> {
        let mut out = Self::new();
        for name in names {
            let name = name.as_ref();
            let raster = self.band(name)?;
            out.push_band(name, raster.clone())?;
        }
        Ok(out)
    }

    /// Apply a fallible grid function to every band, keeping names and order
    pub fn try_map_bands<F>(&self, mut f: F) -> Result<Self>
    where
        F: FnMut(&Raster<f64>) -> Result<Raster<f64>>,
    {
        let mut out = Self::new();
        for (name, raster) in &self.bands {
            out.push_band(name.clone(), f(raster)?)?;
        }
        Ok(out)
    }

    /// Band names in order
    pub fn band_names(&self) -> Vec<&str> {
        self.bands.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Shared (rows, cols), or `None` when there are no bands
    pub fn shape(&self) -> Option<(usize, usize)> {
        self.bands.first().map(|(_, r)| r.shape())
    }

    /// Number of bands
    pub fn len(&self) -> usize {
        self.bands.len()
    }

    /// Whether there are no bands
    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// Iterate over `(name, raster)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Raster<f64>)> {
        self.bands.iter().map(|(n, r)| (n.as_str(), r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abcd() -> MultiBandRaster {
        MultiBandRaster::from_bands([
            ("A", Raster::filled(2, 2, 1.0)),
            ("B", Raster::filled(2, 2, 2.0)),
            ("C", Raster::filled(2, 2, 3.0)),
            ("D", Raster::filled(2, 2, 4.0)),
        ])
        .unwrap()
    }

    #[test]
    fn test_select_keeps_requested_order() {
        let selected = abcd().select(&["C", "A"]).unwrap();
        assert_eq!(selected.band_names(), vec!["C", "A"]);
        assert_eq!(selected.band("C").unwrap().get(0, 0).unwrap(), 3.0);
        assert_eq!(selected.band("A").unwrap().get(1, 1).unwrap(), 1.0);
    }

    #[test]
    fn test_select_missing_band() {
        let err = abcd().select(&["A", "Z"]).unwrap_err();
        assert_eq!(err, Error::MissingBand("Z".into()));
    }

    #[test]
    fn test_select_same_band_twice() {
        let err = abcd().select(&["B", "C", "B"]).unwrap_err();
        assert_eq!(err, Error::DuplicateBand("B".into()));
    }

    #[test]
    fn test_push_rejects_duplicates_and_shape_mismatch() {
        let mut bands = abcd();
        assert_eq!(
            bands.push_band("A", Raster::new(2, 2)).unwrap_err(),
            Error::DuplicateBand("A".into())
        );
        assert_eq!(
            bands.push_band("E", Raster::new(3, 2)).unwrap_err(),
            Error::SizeMismatch { er: 2, ec: 2, ar: 3, ac: 2 }
        );
        assert_eq!(bands.len(), 4);
    }

    #[test]
    fn test_try_map_bands() {
        let doubled = abcd()
            .try_map_bands(|r| r.with_data(r.data().mapv(|v| v * 2.0)))
            .unwrap();
        assert_eq!(doubled.band_names(), vec!["A", "B", "C", "D"]);
        assert_eq!(doubled.band("D").unwrap().get(0, 1).unwrap(), 8.0);
    }

    #[test]
    fn test_empty() {
        let empty = MultiBandRaster::new();
        assert!(empty.is_empty());
        assert_eq!(empty.shape(), None);
        assert!(empty.band("elevation").is_err());
    }
}
