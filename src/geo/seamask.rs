//! The global sea/land mask.
//!
//! One bit of information per cell: 0 is sea, 1 is land. The mask is loaded
//! once, validated, and then treated as immutable shared state for the
//! lifetime of the process.

// Neighborhood scans use intentional float-to-cell-count casts
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]

use crate::error::DataError;
use crate::geo::grid::GridSpec;
use crate::geo::Coordinate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// On-disk record for the sea mask artifact.
///
/// Matches the generator's output: `originLat`, `originLon`, `resolution`,
/// `width`, `height` and a row-major `cells` array valued 0 (sea) or
/// 1 (land).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SeaMaskFile {
    /// Latitude of the northern edge of row 0.
    pub origin_lat: f64,
    /// Longitude of the western edge of column 0.
    pub origin_lon: f64,
    /// Cell size in degrees.
    pub resolution: f64,
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    /// Row-major cell rows; each row has `width` entries.
    pub cells: Vec<Vec<u8>>,
}

/// Global land/sea classification grid.
#[derive(Debug, Clone)]
pub struct SeaMask {
    spec: GridSpec,
    /// Flattened row-major cells, 0 = sea, 1 = land.
    cells: Vec<u8>,
}

impl SeaMask {
    /// Load and validate a sea mask artifact.
    ///
    /// # Errors
    ///
    /// Returns a [`DataError`] when the file is missing, not valid JSON, or
    /// its cell rows do not match the declared dimensions.
    pub fn from_file(path: &Path) -> Result<Self, DataError> {
        let reader = BufReader::new(File::open(path)?);
        let record: SeaMaskFile = serde_json::from_reader(reader)?;
        Self::try_from_record(record)
    }

    pub(crate) fn try_from_record(record: SeaMaskFile) -> Result<Self, DataError> {
        if record.width == 0 || record.height == 0 {
            return Err(DataError::Invalid("mask has zero dimension".to_string()));
        }
        if record.resolution <= 0.0 {
            return Err(DataError::Invalid(format!(
                "mask resolution must be positive, got {}",
                record.resolution
            )));
        }
        if record.cells.len() != record.height {
            return Err(DataError::Invalid(format!(
                "mask has {} rows, header says {}",
                record.cells.len(),
                record.height
            )));
        }
        let mut cells = Vec::with_capacity(record.width * record.height);
        for (i, row) in record.cells.iter().enumerate() {
            if row.len() != record.width {
                return Err(DataError::Invalid(format!(
                    "mask row {i} has {} cells, header says {}",
                    row.len(),
                    record.width
                )));
            }
            cells.extend_from_slice(row);
        }
        Ok(Self {
            spec: GridSpec {
                origin_lat: record.origin_lat,
                origin_lon: record.origin_lon,
                resolution: record.resolution,
                width: record.width,
                height: record.height,
            },
            cells,
        })
    }

    /// Build a mask from a grid spec and flattened row-major cells.
    ///
    /// # Errors
    ///
    /// Returns a [`DataError`] when `cells` does not match the spec's cell
    /// count.
    pub fn from_parts(spec: GridSpec, cells: Vec<u8>) -> Result<Self, DataError> {
        if cells.len() != spec.cell_count() {
            return Err(DataError::Invalid(format!(
                "mask has {} cells, spec says {}",
                cells.len(),
                spec.cell_count()
            )));
        }
        Ok(Self { spec, cells })
    }

    /// Internal constructor for cells already sized to the spec.
    pub(crate) fn from_raw(spec: GridSpec, cells: Vec<u8>) -> Self {
        debug_assert_eq!(cells.len(), spec.cell_count());
        Self { spec, cells }
    }

    /// The mask's grid geometry.
    #[must_use]
    pub const fn spec(&self) -> &GridSpec {
        &self.spec
    }

    /// Raw flattened cells, row-major, 0 = sea, 1 = land.
    #[must_use]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Whether the cell covering a coordinate is sea.
    ///
    /// Longitude wraps; a latitude outside the grid band is not sea.
    #[must_use]
    pub fn is_sea(&self, lat: f64, lon: f64) -> bool {
        self.spec
            .index(lat, lon)
            .is_some_and(|idx| self.cells[idx] == 0)
    }

    /// Whether any cell within a square neighborhood of `tolerance_deg`
    /// around the coordinate is flagged land.
    ///
    /// Used to keep waypoints a safety margin away from coastlines; a point
    /// off the grid counts as near land.
    #[must_use]
    pub fn is_near_land(&self, lat: f64, lon: f64, tolerance_deg: f64) -> bool {
        let Some(row) = self.spec.row(lat) else {
            return true;
        };
        let Some(col) = self.spec.col(lon) else {
            return true;
        };
        let radius = (tolerance_deg / self.spec.resolution).ceil().max(0.0) as i64;
        for dr in -radius..=radius {
            let r = row as i64 + dr;
            if r < 0 || r >= self.spec.height as i64 {
                continue;
            }
            let row_base = (r as usize) * self.spec.width;
            for dc in -radius..=radius {
                let c = self.spec.wrap_col(col as i64 + dc);
                if self.cells[row_base + c] != 0 {
                    return true;
                }
            }
        }
        false
    }

    /// Whether a straight segment between `a` and `b` touches land.
    ///
    /// Samples `sample_count` points (endpoints included) along a planar
    /// lat/lon interpolation and reports true if any sample is not sea.
    #[must_use]
    pub fn segment_crosses_land(&self, a: Coordinate, b: Coordinate, sample_count: usize) -> bool {
        let n = sample_count.max(2);
        (0..n).any(|i| {
            let t = i as f64 / (n - 1) as f64;
            let p = a.lerp(&b, t);
            !self.is_sea(p.lat, p.lon)
        })
    }

    /// Write the mask out in the artifact format.
    ///
    /// # Errors
    ///
    /// Returns a [`DataError`] when the file cannot be created or written.
    pub fn save(&self, path: &Path) -> Result<(), DataError> {
        let writer = std::io::BufWriter::new(File::create(path)?);
        serde_json::to_writer(writer, &self.to_record())?;
        Ok(())
    }

    /// Convert back to the on-disk record shape.
    pub(crate) fn to_record(&self) -> SeaMaskFile {
        SeaMaskFile {
            origin_lat: self.spec.origin_lat,
            origin_lon: self.spec.origin_lon,
            resolution: self.spec.resolution,
            width: self.spec.width,
            height: self.spec.height,
            cells: self
                .cells
                .chunks(self.spec.width)
                .map(<[u8]>::to_vec)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 10x10 one-degree world centered on the equator/prime meridian with a
    /// single land cell in the middle.
    fn island_world() -> SeaMask {
        let spec = GridSpec {
            origin_lat: 5.0,
            origin_lon: -5.0,
            resolution: 1.0,
            width: 10,
            height: 10,
        };
        let mut cells = vec![0u8; spec.cell_count()];
        // row 5 covers lat (-1, 0], col 5 covers lon [0, 1)
        cells[5 * 10 + 5] = 1;
        SeaMask::from_parts(spec, cells).unwrap()
    }

    #[test]
    fn test_is_sea_and_land() {
        let mask = island_world();
        assert!(mask.is_sea(3.5, -3.5));
        assert!(!mask.is_sea(-0.5, 0.5));
        // out-of-range latitude is not sea
        assert!(!mask.is_sea(50.0, 0.0));
    }

    #[test]
    fn test_is_near_land_margin() {
        let mask = island_world();
        // adjacent cell: within one degree of the island
        assert!(mask.is_near_land(-0.5, 1.5, 1.0));
        // far corner: clear of the island
        assert!(!mask.is_near_land(4.5, -4.5, 1.0));
        // zero tolerance degenerates to the point's own cell
        assert!(mask.is_near_land(-0.5, 0.5, 0.0));
        assert!(!mask.is_near_land(4.5, -4.5, 0.0));
    }

    #[test]
    fn test_segment_crossing() {
        let mask = island_world();
        // straight across the island
        let a = Coordinate::new(-0.5, -4.5);
        let b = Coordinate::new(-0.5, 4.5);
        assert!(mask.segment_crosses_land(a, b, 64));
        // parallel track two degrees north misses it
        let c = Coordinate::new(2.5, -4.5);
        let d = Coordinate::new(2.5, 4.5);
        assert!(!mask.segment_crosses_land(c, d, 64));
    }

    #[test]
    fn test_record_round_trip() {
        let mask = island_world();
        let rebuilt = SeaMask::try_from_record(mask.to_record()).unwrap();
        assert_eq!(rebuilt.cells(), mask.cells());
        assert_eq!(rebuilt.spec(), mask.spec());
    }

    #[test]
    fn test_save_and_reload() {
        let mask = island_world();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mask.json");
        mask.save(&path).unwrap();
        let reloaded = SeaMask::from_file(&path).unwrap();
        assert_eq!(reloaded.cells(), mask.cells());
        assert_eq!(reloaded.spec(), mask.spec());
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let record = SeaMaskFile {
            origin_lat: 5.0,
            origin_lon: -5.0,
            resolution: 1.0,
            width: 10,
            height: 10,
            cells: vec![vec![0u8; 10]; 9],
        };
        assert!(SeaMask::try_from_record(record).is_err());
    }
}
