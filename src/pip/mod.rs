//! Point-in-Polygon (PIP) region lookup.
//!
//! Geometry primitives, the ray-casting containment test and a linear scan
//! over an ordered catalog of region boundaries.

mod boundary;
mod catalog;
pub mod geometry;
mod service;

pub use boundary::Boundary;
pub use catalog::{RegionCatalog, NOT_FOUND};
pub use geometry::{round, round_coord, Orientation, COORD_PRECISION};
pub use service::{LookupResult, PipService};
