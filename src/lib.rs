//! State Server - point-in-polygon lookup of the region containing a coordinate
//!
//! This library provides the geometry engine, catalog loading and HTTP API
//! used by the `state-server` binary.

pub mod api;
pub mod config;
pub mod loader;
pub mod models;
pub mod pip;

pub use models::Region;
pub use pip::{Boundary, PipService, RegionCatalog, NOT_FOUND};
