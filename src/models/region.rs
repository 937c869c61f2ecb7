//! Named regions and their serialized views.

use serde::{Deserialize, Serialize};

use crate::pip::Boundary;

/// A named administrative region (a US state in the shipped dataset)
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub name: String,
    pub boundary: Boundary,
}

impl Region {
    pub fn new(name: impl Into<String>, boundary: impl Into<Boundary>) -> Self {
        Self {
            name: name.into(),
            boundary: boundary.into(),
        }
    }

    pub fn summary(&self) -> RegionSummary {
        RegionSummary {
            name: self.name.clone(),
            vertices: self.boundary.len(),
            bbox: self
                .boundary
                .bbox()
                .map(|(min_lon, min_lat, max_lon, max_lat)| {
                    GeoBbox::new(min_lon, min_lat, max_lon, max_lat)
                }),
        }
    }
}

/// Bounding box envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoBbox {
    #[serde(rename = "type")]
    pub geo_type: String,
    pub coordinates: [[f64; 2]; 2], // [[minLon, maxLat], [maxLon, minLat]]
}

impl GeoBbox {
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            geo_type: "envelope".to_string(),
            coordinates: [[min_lon, max_lat], [max_lon, min_lat]],
        }
    }
}

/// Catalog listing entry returned by the regions endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionSummary {
    pub name: String,
    pub vertices: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox: Option<GeoBbox>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Coord;

    #[test]
    fn test_summary_envelope() {
        let region = Region::new(
            "Colorado",
            vec![
                Coord { x: -109.05, y: 37.0 },
                Coord { x: -102.04, y: 37.0 },
                Coord { x: -102.04, y: 41.0 },
                Coord { x: -109.05, y: 41.0 },
            ],
        );

        let summary = region.summary();
        assert_eq!(summary.name, "Colorado");
        assert_eq!(summary.vertices, 4);
        assert_eq!(
            summary.bbox.map(|b| b.coordinates),
            Some([[-109.05, 41.0], [-102.04, 37.0]])
        );
    }

    #[test]
    fn test_summary_without_vertices_has_no_bbox() {
        let summary = Region::new("Nowhere", Vec::<Coord<f64>>::new()).summary();
        assert_eq!(summary.vertices, 0);
        assert!(summary.bbox.is_none());

        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("bbox").is_none());
    }
}
