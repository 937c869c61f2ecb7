//! PIP service for looking up the region containing a point.

use std::sync::Arc;

use geo::Coord;
use serde::Serialize;
use tracing::debug;

use super::geometry::round_coord;
use super::{RegionCatalog, NOT_FOUND};

/// Result of a single lookup, with the coordinates actually tested
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupResult {
    pub state: Option<String>,
    pub found: bool,
    pub longitude: f64,
    pub latitude: f64,
}

impl LookupResult {
    /// Region name, or the not-found sentinel
    pub fn name(&self) -> &str {
        self.state.as_deref().unwrap_or(NOT_FOUND)
    }
}

/// Point-in-Polygon lookup service
#[derive(Clone)]
pub struct PipService {
    catalog: Arc<RegionCatalog>,
}

impl PipService {
    /// Create a new PIP service over a loaded catalog
    pub fn new(catalog: impl Into<Arc<RegionCatalog>>) -> Self {
        Self {
            catalog: catalog.into(),
        }
    }

    /// Find the region containing (lon, lat)
    pub fn lookup(&self, lon: f64, lat: f64) -> LookupResult {
        let point = round_coord(Coord { x: lon, y: lat });
        let state = self.catalog.find(point).map(|region| region.name.clone());

        debug!(
            "PIP lookup at ({}, {}): {}",
            point.x,
            point.y,
            state.as_deref().unwrap_or(NOT_FOUND)
        );

        LookupResult {
            found: state.is_some(),
            state,
            longitude: point.x,
            latitude: point.y,
        }
    }

    /// Region name for (lon, lat), or the not-found sentinel
    pub fn lookup_name(&self, lon: f64, lat: f64) -> String {
        self.lookup(lon, lat).name().to_string()
    }

    /// Look up a batch of (lon, lat) pairs, preserving input order
    pub fn lookup_batch(&self, points: &[[f64; 2]]) -> Vec<String> {
        let coords: Vec<Coord<f64>> = points
            .iter()
            .map(|&[x, y]| Coord { x, y })
            .collect();

        let names: Vec<String> = self
            .catalog
            .find_many(&coords)
            .into_iter()
            .map(|region| {
                region
                    .map(|r| r.name.clone())
                    .unwrap_or_else(|| NOT_FOUND.to_string())
            })
            .collect();

        debug!("PIP batch lookup of {} points", names.len());

        names
    }

    /// Get the catalog (for listings and health checks)
    pub fn catalog(&self) -> &RegionCatalog {
        &self.catalog
    }
}
