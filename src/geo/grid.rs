//! Shared grid index arithmetic.
//!
//! Every grid artifact (sea mask, all bathymetry tiers) uses the same
//! coordinate-to-index conversion: row 0 is the northernmost band, column 0
//! is the grid's origin longitude, and longitude indexing wraps modulo the
//! grid width. Latitude never wraps; out-of-range latitudes are simply not
//! covered.

// Grid arithmetic uses intentional float-to-index casts
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]

use serde::{Deserialize, Serialize};

/// Geometry of a row-major lat/lon grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSpec {
    /// Latitude of the northern edge of row 0, in degrees.
    pub origin_lat: f64,
    /// Longitude of the western edge of column 0, in degrees.
    pub origin_lon: f64,
    /// Cell size in degrees.
    pub resolution: f64,
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
}

impl GridSpec {
    /// A grid covering the whole globe at `resolution` degrees per cell.
    #[must_use]
    pub fn global(resolution: f64) -> Self {
        Self {
            origin_lat: 90.0,
            origin_lon: -180.0,
            resolution,
            width: (360.0 / resolution).round() as usize,
            height: (180.0 / resolution).round() as usize,
        }
    }

    /// Total number of cells.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Row index for a latitude, or `None` when the latitude falls outside
    /// the grid's band.
    #[must_use]
    pub fn row(&self, lat: f64) -> Option<usize> {
        let r = ((self.origin_lat - lat) / self.resolution).floor();
        if r < 0.0 || r >= self.height as f64 {
            None
        } else {
            Some(r as usize)
        }
    }

    /// Column index for a longitude, wrapping modulo the grid width.
    ///
    /// Returns `None` when the wrapped longitude falls outside a regional
    /// (non-global) grid's span.
    #[must_use]
    pub fn col(&self, lon: f64) -> Option<usize> {
        let offset = (lon - self.origin_lon).rem_euclid(360.0);
        let c = (offset / self.resolution).floor() as usize;
        (c < self.width).then_some(c)
    }

    /// Row-major cell index for a coordinate, or `None` when uncovered.
    #[must_use]
    pub fn index(&self, lat: f64, lon: f64) -> Option<usize> {
        let row = self.row(lat)?;
        let col = self.col(lon)?;
        Some(row * self.width + col)
    }

    /// Wrap a possibly-negative column offset modulo the grid width.
    ///
    /// Only meaningful for global grids, where crossing the antimeridian
    /// lands in the opposite edge column.
    #[must_use]
    pub fn wrap_col(&self, col: i64) -> usize {
        col.rem_euclid(self.width as i64) as usize
    }
}
