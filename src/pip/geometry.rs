//! Planar geometry primitives used by the containment test.
//!
//! All comparisons are exact, so callers are expected to round coordinates
//! with [`round_coord`] first. Two vertices that came from the same source
//! point then compare equal instead of differing in the last few bits.

use geo::Coord;

/// Number of decimal places every coordinate is rounded to.
pub const COORD_PRECISION: i32 = 6;

/// Rotational direction of an ordered triplet of points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Collinear,
    Clockwise,
    CounterClockwise,
}

/// Round a single value to [`COORD_PRECISION`] decimal places (half up).
pub fn round(value: f64) -> f64 {
    let shift = 10f64.powi(COORD_PRECISION);
    (value * shift + 0.5).floor() / shift
}

/// Round both components of a coordinate
pub fn round_coord(coord: Coord<f64>) -> Coord<f64> {
    Coord {
        x: round(coord.x),
        y: round(coord.y),
    }
}

/// Orientation of the triplet (a, b, point).
///
/// Sign of the cross product of `b - a` and `point - b`: zero is collinear,
/// positive is clockwise, anything else counter-clockwise.
pub fn orientation(a: Coord<f64>, b: Coord<f64>, point: Coord<f64>) -> Orientation {
    let val = (b.y - a.y) * (point.x - b.x) - (b.x - a.x) * (point.y - b.y);

    if val == 0.0 {
        Orientation::Collinear
    } else if val > 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::CounterClockwise
    }
}

/// Whether `end` lies inside the bounding box spanned by `start` and `point`.
///
/// Only meaningful once the three points are known to be collinear.
pub fn on_segment(start: Coord<f64>, end: Coord<f64>, point: Coord<f64>) -> bool {
    end.x <= start.x.max(point.x)
        && end.x >= start.x.min(point.x)
        && end.y <= start.y.max(point.y)
        && end.y >= start.y.min(point.y)
}

/// Whether segment p1-q1 intersects segment p2-q2
pub fn segments_intersect(
    p1: Coord<f64>,
    q1: Coord<f64>,
    p2: Coord<f64>,
    q2: Coord<f64>,
) -> bool {
    let o1 = orientation(p1, q1, p2);
    let o2 = orientation(p1, q1, q2);
    let o3 = orientation(p2, q2, p1);
    let o4 = orientation(p2, q2, q1);

    // General case
    if o1 != o2 && o3 != o4 {
        return true;
    }

    // Collinear cases
    if o1 == Orientation::Collinear && on_segment(p1, p2, q1) {
        return true;
    }
    if o2 == Orientation::Collinear && on_segment(p1, q2, q1) {
        return true;
    }
    if o3 == Orientation::Collinear && on_segment(p2, p1, q2) {
        return true;
    }
    if o4 == Orientation::Collinear && on_segment(p2, q1, q2) {
        return true;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: f64, y: f64) -> Coord<f64> {
        Coord { x, y }
    }

    #[test]
    fn test_round_to_precision() {
        assert_eq!(round(1.23456789), 1.234568);
        assert_eq!(round(-73.9857121), -73.985712);
        assert_eq!(round(10.0), 10.0);
    }

    #[test]
    fn test_round_is_idempotent() {
        for value in [0.1234565, -122.4194155, 47.6062095, 1e-7, -0.0000004, 179.9999999] {
            let once = round(value);
            assert_eq!(round(once), once, "rounding {} twice changed it", value);
        }
    }

    #[test]
    fn test_round_coord() {
        let rounded = round_coord(c(-104.99025119, 39.73915391));
        assert_eq!(rounded, c(-104.990251, 39.739154));
    }

    #[test]
    fn test_orientation_classification() {
        assert_eq!(
            orientation(c(0.0, 0.0), c(1.0, 1.0), c(2.0, 2.0)),
            Orientation::Collinear
        );
        assert_eq!(
            orientation(c(0.0, 0.0), c(0.0, 10.0), c(5.0, 5.0)),
            Orientation::Clockwise
        );
        assert_eq!(
            orientation(c(0.0, 0.0), c(0.0, 10.0), c(-5.0, 5.0)),
            Orientation::CounterClockwise
        );
    }

    #[test]
    fn test_orientation_is_deterministic() {
        let triplets = [
            (c(0.1, 0.2), c(0.3, 0.4), c(0.5, 0.6)),
            (c(-71.057083, 42.361145), c(-71.06, 42.36), c(-70.9, 42.4)),
            (c(3.0, 3.0), c(3.0, 3.0), c(3.0, 3.0)),
        ];

        for (a, b, p) in triplets {
            let first = orientation(a, b, p);
            for _ in 0..16 {
                assert_eq!(orientation(a, b, p), first);
            }
        }
    }

    #[test]
    fn test_on_segment_bounding_box() {
        assert!(on_segment(c(0.0, 0.0), c(5.0, 5.0), c(10.0, 10.0)));
        assert!(on_segment(c(10.0, 10.0), c(10.0, 10.0), c(0.0, 0.0)));
        assert!(!on_segment(c(0.0, 0.0), c(11.0, 11.0), c(10.0, 10.0)));
    }

    #[test]
    fn test_crossing_segments_intersect() {
        assert!(segments_intersect(
            c(0.0, 0.0),
            c(10.0, 10.0),
            c(0.0, 10.0),
            c(10.0, 0.0)
        ));
    }

    #[test]
    fn test_parallel_segments_do_not_intersect() {
        assert!(!segments_intersect(
            c(0.0, 0.0),
            c(10.0, 0.0),
            c(0.0, 1.0),
            c(10.0, 1.0)
        ));
    }

    #[test]
    fn test_collinear_overlap_intersects() {
        assert!(segments_intersect(
            c(0.0, 0.0),
            c(10.0, 0.0),
            c(5.0, 0.0),
            c(15.0, 0.0)
        ));
    }

    #[test]
    fn test_collinear_disjoint_does_not_intersect() {
        assert!(!segments_intersect(
            c(0.0, 0.0),
            c(4.0, 0.0),
            c(5.0, 0.0),
            c(15.0, 0.0)
        ));
    }

    #[test]
    fn test_touching_endpoint_intersects() {
        assert!(segments_intersect(
            c(0.0, 0.0),
            c(5.0, 5.0),
            c(5.0, 5.0),
            c(10.0, 0.0)
        ));
    }
}
