//! The geospatial constraint oracle.
//!
//! Owns the immutable sea mask and bathymetry field. Construction is the
//! only fallible step; every query on a constructed oracle is infallible.
//! The oracle is shared read-only (typically behind an `Arc`) across all
//! concurrent optimizations.

// Sampling density uses intentional float-to-count casts
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]

use crate::error::DataError;
use crate::geo::bathymetry::BathymetryField;
use crate::geo::seamask::SeaMask;
use crate::geo::Coordinate;
use std::path::Path;

/// Minimum samples per segment, regardless of length.
const MIN_LEG_SAMPLES: usize = 8;

/// Cap on samples per segment so degenerate legs stay cheap to score.
const MAX_LEG_SAMPLES: usize = 1024;

/// Sea/land/depth query facade over the loaded grid artifacts.
#[derive(Debug, Clone)]
pub struct ConstraintOracle {
    mask: SeaMask,
    bathymetry: BathymetryField,
}

impl ConstraintOracle {
    /// Load both grid artifacts and construct the oracle.
    ///
    /// # Errors
    ///
    /// Returns a [`DataError`] when either artifact is missing or corrupt.
    /// This is fatal and never retried internally.
    pub fn load(mask_path: &Path, bathymetry_path: &Path) -> Result<Self, DataError> {
        let mask = SeaMask::from_file(mask_path)?;
        let bathymetry = BathymetryField::from_file(bathymetry_path)?;
        Ok(Self::new(mask, bathymetry))
    }

    /// Construct from already-loaded grids.
    #[must_use]
    pub const fn new(mask: SeaMask, bathymetry: BathymetryField) -> Self {
        Self { mask, bathymetry }
    }

    /// The loaded sea mask.
    #[must_use]
    pub const fn mask(&self) -> &SeaMask {
        &self.mask
    }

    /// Whether the cell covering a coordinate is sea.
    #[must_use]
    pub fn is_sea(&self, lat: f64, lon: f64) -> bool {
        self.mask.is_sea(lat, lon)
    }

    /// Whether any cell within `tolerance_deg` of the coordinate is land.
    #[must_use]
    pub fn is_near_land(&self, lat: f64, lon: f64, tolerance_deg: f64) -> bool {
        self.mask.is_near_land(lat, lon, tolerance_deg)
    }

    /// Whether a straight segment between `a` and `b` touches land, sampled
    /// at `sample_count` points including the endpoints.
    #[must_use]
    pub fn segment_crosses_land(&self, a: Coordinate, b: Coordinate, sample_count: usize) -> bool {
        self.mask.segment_crosses_land(a, b, sample_count)
    }

    /// Water depth in meters at a coordinate; 0 for land or uncovered
    /// points.
    #[must_use]
    pub fn depth_at(&self, lat: f64, lon: f64) -> f64 {
        self.bathymetry.depth_at(lat, lon)
    }

    /// Sample count for a leg at roughly two samples per mask cell.
    ///
    /// The density is fixed by the mask resolution; the count scales with
    /// the leg's angular length.
    #[must_use]
    pub fn leg_samples(&self, a: Coordinate, b: Coordinate) -> usize {
        let dlat = (b.lat - a.lat).abs();
        let dlon = (b.lon - a.lon).abs();
        let span = dlat.max(dlon);
        let cells = (span / self.mask.spec().resolution).ceil() as usize;
        (cells * 2).clamp(MIN_LEG_SAMPLES, MAX_LEG_SAMPLES)
    }

    /// Minimum sampled depth along a segment, using the same planar
    /// sampling as [`Self::segment_crosses_land`].
    #[must_use]
    pub fn min_depth_along(&self, a: Coordinate, b: Coordinate, sample_count: usize) -> f64 {
        let n = sample_count.max(2);
        (0..n)
            .map(|i| {
                let t = i as f64 / (n - 1) as f64;
                let p = a.lerp(&b, t);
                self.depth_at(p.lat, p.lon)
            })
            .fold(f64::INFINITY, f64::min)
    }
}
