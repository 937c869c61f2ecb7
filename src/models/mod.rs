//! Core data models for the region lookup service.

pub mod region;

pub use region::{GeoBbox, Region, RegionSummary};
