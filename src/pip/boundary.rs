//! Region boundary polygons and the ray-casting containment test.

use geo::{BoundingRect, Coord, LineString};

use crate::pip::geometry::{on_segment, orientation, segments_intersect, Orientation};

/// A closed ring of vertices.
///
/// The ring is closed implicitly: edge `i` joins vertex `i` to vertex
/// `(i + 1) % n`, so the first vertex is never repeated at the end.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Boundary {
    vertices: Vec<Coord<f64>>,
}

impl Boundary {
    pub fn new(vertices: Vec<Coord<f64>>) -> Self {
        Self { vertices }
    }

    pub fn vertices(&self) -> &[Coord<f64>] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// A ring needs at least three vertices to enclose anything
    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3
    }

    /// Edges in ring order, including the closing edge back to vertex 0
    pub fn edges(&self) -> impl Iterator<Item = (Coord<f64>, Coord<f64>)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Get the bounding box of this boundary as (min_lon, min_lat, max_lon, max_lat)
    pub fn bbox(&self) -> Option<(f64, f64, f64, f64)> {
        LineString::new(self.vertices.clone())
            .bounding_rect()
            .map(|rect| (rect.min().x, rect.min().y, rect.max().x, rect.max().y))
    }

    /// Ray-casting point-in-polygon test.
    ///
    /// Casts a horizontal ray from `point` towards increasing longitude and
    /// counts edge crossings; an odd count means inside. A point lying on an
    /// edge is reported as contained. Degenerate rings never contain anything.
    pub fn contains(&self, point: Coord<f64>) -> bool {
        if self.is_degenerate() {
            return false;
        }

        let extreme = Coord {
            x: self.ray_end_x(point),
            y: point.y,
        };

        let mut crossings = 0usize;

        for (start, end) in self.edges() {
            if !segments_intersect(start, end, point, extreme) {
                continue;
            }

            // The point sits on the line through this edge
            if orientation(start, point, end) == Orientation::Collinear {
                return on_segment(start, point, end);
            }

            crossings += 1;
        }

        crossings % 2 == 1
    }

    /// X coordinate of the ray's far end: strictly east of every vertex.
    ///
    /// The end must stay finite. With an infinite end the cross products in
    /// `orientation` evaluate `0 * inf` and turn into NaN.
    fn ray_end_x(&self, point: Coord<f64>) -> f64 {
        let max_x = self
            .vertices
            .iter()
            .fold(point.x, |acc, vertex| acc.max(vertex.x));
        max_x + 1.0
    }
}

impl From<Vec<Coord<f64>>> for Boundary {
    fn from(vertices: Vec<Coord<f64>>) -> Self {
        Self::new(vertices)
    }
}
