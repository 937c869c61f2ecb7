//! Ordered, immutable collection of region boundaries.

use geo::Coord;
use rayon::prelude::*;
use tracing::{info, warn};

use crate::models::Region;
use crate::pip::geometry::round_coord;

/// Name returned when no region contains the queried point
pub const NOT_FOUND: &str = "Not Found";

/// All known regions in lookup priority order.
///
/// Built once at startup and never modified afterwards. Lookups scan the
/// regions in stored order, so when boundaries overlap or touch the earlier
/// region wins.
#[derive(Debug, Clone, Default)]
pub struct RegionCatalog {
    regions: Vec<Region>,
}

impl RegionCatalog {
    /// Build a catalog, dropping any region without a name
    pub fn new(regions: Vec<Region>) -> Self {
        let total = regions.len();
        let regions: Vec<Region> = regions
            .into_iter()
            .filter(|region| {
                if region.name.is_empty() {
                    warn!(
                        "Dropping unnamed region with {} vertices",
                        region.boundary.len()
                    );
                    false
                } else {
                    true
                }
            })
            .collect();

        let degenerate = regions
            .iter()
            .filter(|r| r.boundary.is_degenerate())
            .count();

        info!(
            "Region catalog built with {} of {} regions ({} degenerate)",
            regions.len(),
            total,
            degenerate
        );

        Self { regions }
    }

    /// First region whose boundary contains the point.
    ///
    /// The point is rounded to the catalog precision before testing.
    pub fn find(&self, point: Coord<f64>) -> Option<&Region> {
        let point = round_coord(point);
        self.regions
            .iter()
            .find(|region| region.boundary.contains(point))
    }

    /// Name of the containing region, or [`NOT_FOUND`]
    pub fn find_name(&self, point: Coord<f64>) -> &str {
        self.find(point)
            .map(|region| region.name.as_str())
            .unwrap_or(NOT_FOUND)
    }

    /// Look up many points in parallel; results keep the input order
    pub fn find_many(&self, points: &[Coord<f64>]) -> Vec<Option<&Region>> {
        points.par_iter().map(|point| self.find(*point)).collect()
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl From<Vec<Region>> for RegionCatalog {
    fn from(regions: Vec<Region>) -> Self {
        Self::new(regions)
    }
}
