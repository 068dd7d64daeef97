//! Multi-resolution water depth grids.
//!
//! Three independent tiers: ultra-high-resolution grids for named straits
//! and canals, high-resolution grids for named coastal seas, and one
//! standard-resolution global grid. A depth lookup probes the finest tier
//! whose bounding box contains the query point, first match wins in
//! registration order. Depth 0 denotes land.

use crate::error::DataError;
use crate::geo::grid::GridSpec;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// On-disk record for one regional depth grid.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegionFile {
    name: String,
    origin_lat: f64,
    origin_lon: f64,
    width: usize,
    height: usize,
    depths: Vec<Vec<f64>>,
}

/// On-disk record for a tier of regional grids sharing one resolution.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TierFile {
    resolution: f64,
    regions: Vec<RegionFile>,
}

/// On-disk record for the standard-resolution global grid.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GlobalFile {
    resolution: f64,
    origin_lat: f64,
    origin_lon: f64,
    width: usize,
    height: usize,
    depths: Vec<Vec<f64>>,
}

/// On-disk record for the whole bathymetry artifact.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BathymetryFile {
    ultra_high_res: TierFile,
    high_res: TierFile,
    standard_res: GlobalFile,
}

/// One named depth grid with its own origin and resolution.
#[derive(Debug, Clone)]
pub struct DepthRegion {
    name: String,
    spec: GridSpec,
    /// Flattened row-major depths in meters; 0 = land.
    depths: Vec<f64>,
}

impl DepthRegion {
    /// Build a region from a grid spec and flattened row-major depths.
    ///
    /// # Errors
    ///
    /// Returns a [`DataError`] when `depths` does not match the spec's cell
    /// count.
    pub fn from_parts(
        name: impl Into<String>,
        spec: GridSpec,
        depths: Vec<f64>,
    ) -> Result<Self, DataError> {
        let name = name.into();
        if depths.len() != spec.cell_count() {
            return Err(DataError::Invalid(format!(
                "region {name} has {} depth cells, spec says {}",
                depths.len(),
                spec.cell_count()
            )));
        }
        Ok(Self { name, spec, depths })
    }

    fn from_record(resolution: f64, record: RegionFile) -> Result<Self, DataError> {
        let spec = GridSpec {
            origin_lat: record.origin_lat,
            origin_lon: record.origin_lon,
            resolution,
            width: record.width,
            height: record.height,
        };
        let depths = flatten(&record.name, record.width, record.height, record.depths)?;
        Self::from_parts(record.name, spec, depths)
    }

    /// The region's name, as registered in the artifact.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The region's grid geometry.
    #[must_use]
    pub const fn spec(&self) -> &GridSpec {
        &self.spec
    }

    /// Depth in meters at a coordinate, or `None` when this region does not
    /// cover it.
    #[must_use]
    pub fn depth_at(&self, lat: f64, lon: f64) -> Option<f64> {
        self.spec.index(lat, lon).map(|idx| self.depths[idx])
    }
}

fn flatten(
    name: &str,
    width: usize,
    height: usize,
    rows: Vec<Vec<f64>>,
) -> Result<Vec<f64>, DataError> {
    if rows.len() != height {
        return Err(DataError::Invalid(format!(
            "region {name} has {} rows, header says {height}",
            rows.len()
        )));
    }
    let mut flat = Vec::with_capacity(width * height);
    for (i, row) in rows.iter().enumerate() {
        if row.len() != width {
            return Err(DataError::Invalid(format!(
                "region {name} row {i} has {} cells, header says {width}",
                row.len()
            )));
        }
        flat.extend_from_slice(row);
    }
    Ok(flat)
}

/// Three-tier bathymetry lookup.
#[derive(Debug, Clone)]
pub struct BathymetryField {
    ultra_high: Vec<DepthRegion>,
    high: Vec<DepthRegion>,
    standard: DepthRegion,
}

impl BathymetryField {
    /// Load and validate a bathymetry artifact.
    ///
    /// # Errors
    ///
    /// Returns a [`DataError`] when the file is missing, not valid JSON, or
    /// any grid's rows do not match its declared dimensions.
    pub fn from_file(path: &Path) -> Result<Self, DataError> {
        let reader = BufReader::new(File::open(path)?);
        let BathymetryFile {
            ultra_high_res,
            high_res,
            standard_res: global,
        } = serde_json::from_reader(reader)?;

        let ultra_resolution = ultra_high_res.resolution;
        let ultra_high = ultra_high_res
            .regions
            .into_iter()
            .map(|r| DepthRegion::from_record(ultra_resolution, r))
            .collect::<Result<Vec<_>, _>>()?;
        let high_resolution = high_res.resolution;
        let high = high_res
            .regions
            .into_iter()
            .map(|r| DepthRegion::from_record(high_resolution, r))
            .collect::<Result<Vec<_>, _>>()?;

        let spec = GridSpec {
            origin_lat: global.origin_lat,
            origin_lon: global.origin_lon,
            resolution: global.resolution,
            width: global.width,
            height: global.height,
        };
        let depths = flatten("standardRes", global.width, global.height, global.depths)?;
        let standard = DepthRegion::from_parts("standardRes", spec, depths)?;

        Ok(Self {
            ultra_high,
            high,
            standard,
        })
    }

    /// Assemble a field from already-built regions.
    #[must_use]
    pub fn from_parts(
        ultra_high: Vec<DepthRegion>,
        high: Vec<DepthRegion>,
        standard: DepthRegion,
    ) -> Self {
        Self {
            ultra_high,
            high,
            standard,
        }
    }

    /// Water depth in meters at a coordinate.
    ///
    /// Probes ultra-high-resolution regions first (registration order),
    /// then high-resolution regions, then the standard global grid. Returns
    /// 0 when no tier covers the point or the covering cell is land.
    #[must_use]
    pub fn depth_at(&self, lat: f64, lon: f64) -> f64 {
        for region in &self.ultra_high {
            if let Some(depth) = region.depth_at(lat, lon) {
                return depth;
            }
        }
        for region in &self.high {
            if let Some(depth) = region.depth_at(lat, lon) {
                return depth;
            }
        }
        self.standard.depth_at(lat, lon).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global_region(depth: f64) -> DepthRegion {
        let spec = GridSpec::global(1.0);
        DepthRegion::from_parts("standardRes", spec, vec![depth; spec.cell_count()]).unwrap()
    }

    fn bosphorus_region(depth: f64) -> DepthRegion {
        // 28E..30E, 42N..40N
        let spec = GridSpec {
            origin_lat: 42.0,
            origin_lon: 28.0,
            resolution: 0.01,
            width: 200,
            height: 200,
        };
        DepthRegion::from_parts("Bosphorus", spec, vec![depth; spec.cell_count()]).unwrap()
    }

    #[test]
    fn test_tier_precedence() {
        let field = BathymetryField::from_parts(
            vec![bosphorus_region(35.0)],
            Vec::new(),
            global_region(4000.0),
        );
        // inside the Bosphorus box the ultra tier wins even though the
        // global grid also covers the point
        assert_eq!(field.depth_at(41.1, 29.05), 35.0);
        // outside it, the global grid answers
        assert_eq!(field.depth_at(36.0, 5.0), 4000.0);
    }

    #[test]
    fn test_registration_order_wins() {
        let first = bosphorus_region(35.0);
        let second = bosphorus_region(90.0);
        let field = BathymetryField::from_parts(vec![first, second], Vec::new(), global_region(1.0));
        assert_eq!(field.depth_at(41.1, 29.05), 35.0);
    }

    #[test]
    fn test_uncovered_point_is_land() {
        // a standard grid that stops short of the poles
        let spec = GridSpec {
            origin_lat: 80.0,
            origin_lon: -180.0,
            resolution: 1.0,
            width: 360,
            height: 160,
        };
        let standard =
            DepthRegion::from_parts("standardRes", spec, vec![100.0; spec.cell_count()]).unwrap();
        let field = BathymetryField::from_parts(Vec::new(), Vec::new(), standard);
        assert_eq!(field.depth_at(85.0, 0.0), 0.0);
        assert_eq!(field.depth_at(0.0, 0.0), 100.0);
    }

    #[test]
    fn test_region_dimension_mismatch() {
        let spec = GridSpec {
            origin_lat: 1.0,
            origin_lon: 0.0,
            resolution: 1.0,
            width: 4,
            height: 4,
        };
        assert!(DepthRegion::from_parts("bad", spec, vec![0.0; 5]).is_err());
    }
}
