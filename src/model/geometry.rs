use geo::{coord, Coord};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// a planar point in meters, ENU-projected. altitude is not represented.
///
/// wraps `geo::Coord` for storage and its `Add`/`Sub`/`Mul` arithmetic; the
/// dot product, norm, and foot-of-perpendicular projection below aren't
/// part of `Coord`'s own API and stay hand-written here.
#[derive(Copy, Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct Point2D(pub Coord<f64>);

impl Point2D {
    pub const ZERO_LEN_EPS: f64 = 1e-3;

    pub fn new(x: f64, y: f64) -> Self {
        Point2D(coord! { x: x, y: y })
    }

    pub fn x(&self) -> f64 {
        self.0.x
    }

    pub fn y(&self) -> f64 {
        self.0.y
    }

    pub fn sub(&self, other: &Point2D) -> Point2D {
        Point2D(self.0 - other.0)
    }

    pub fn add(&self, other: &Point2D) -> Point2D {
        Point2D(self.0 + other.0)
    }

    pub fn scale(&self, s: f64) -> Point2D {
        Point2D(self.0 * s)
    }

    pub fn dot(&self, other: &Point2D) -> f64 {
        self.0.x * other.0.x + self.0.y * other.0.y
    }

    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }
}

impl Display for Point2D {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.0.x, self.0.y)
    }
}

/// result of projecting a query point onto a directed segment.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Projection {
    /// segment length below [`Point2D::ZERO_LEN_EPS`]; caller treats as zero probability.
    Degenerate,
    Ok {
        vertical_distance: f64,
        along_track_distance: f64,
    },
}

/// projects `query` onto the directed segment `(start, end)`.
///
/// `vertical_distance` is the perpendicular distance to the infinite line
/// through the segment; `along_track_distance` is how far the closest point
/// on the bounded segment had to move from the unbounded line projection
/// (zero when the foot of the perpendicular lands within the segment).
pub fn project(start: &Point2D, end: &Point2D, query: &Point2D) -> Projection {
    let u = end.sub(start);
    let u_norm = u.norm();
    if u_norm < Point2D::ZERO_LEN_EPS {
        return Projection::Degenerate;
    }

    let v = query.sub(start);
    if v.norm() < Point2D::ZERO_LEN_EPS {
        return Projection::Ok {
            vertical_distance: 0.0,
            along_track_distance: 0.0,
        };
    }

    let r = u.dot(&v) / (u_norm * u_norm);
    let foot = start.add(&u.scale(r));
    let vertical_distance = query.sub(&foot).norm();

    let along_track_distance = if r < 0.0 {
        start.sub(&foot).norm()
    } else if r > 1.0 {
        end.sub(&foot).norm()
    } else {
        0.0
    };

    Projection::Ok {
        vertical_distance,
        along_track_distance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn projects_onto_interior_of_segment() {
        let start = Point2D::new(0.0, 0.0);
        let end = Point2D::new(100.0, 0.0);
        let q = Point2D::new(50.0, 3.0);
        match project(&start, &end, &q) {
            Projection::Ok {
                vertical_distance,
                along_track_distance,
            } => {
                assert_relative_eq!(vertical_distance, 3.0);
                assert_relative_eq!(along_track_distance, 0.0);
            }
            Projection::Degenerate => panic!("expected Ok"),
        }
    }

    #[test]
    fn overshoot_past_end_reports_along_track_distance() {
        let start = Point2D::new(0.0, 0.0);
        let end = Point2D::new(100.0, 0.0);
        let q = Point2D::new(110.0, 0.0);
        match project(&start, &end, &q) {
            Projection::Ok {
                vertical_distance,
                along_track_distance,
            } => {
                assert_relative_eq!(vertical_distance, 0.0);
                assert_relative_eq!(along_track_distance, 10.0);
            }
            Projection::Degenerate => panic!("expected Ok"),
        }
    }

    #[test]
    fn overshoot_before_start_reports_along_track_distance() {
        let start = Point2D::new(0.0, 0.0);
        let end = Point2D::new(100.0, 0.0);
        let q = Point2D::new(-5.0, 0.0);
        match project(&start, &end, &q) {
            Projection::Ok {
                vertical_distance,
                along_track_distance,
            } => {
                assert_relative_eq!(vertical_distance, 0.0);
                assert_relative_eq!(along_track_distance, 5.0);
            }
            Projection::Degenerate => panic!("expected Ok"),
        }
    }

    #[test]
    fn degenerate_segment_reports_degenerate() {
        let start = Point2D::new(5.0, 5.0);
        let end = Point2D::new(5.0, 5.0);
        let q = Point2D::new(5.0, 5.0);
        assert_eq!(project(&start, &end, &q), Projection::Degenerate);
    }

    #[test]
    fn query_at_start_has_zero_distances() {
        let start = Point2D::new(0.0, 0.0);
        let end = Point2D::new(100.0, 0.0);
        match project(&start, &end, &start) {
            Projection::Ok {
                vertical_distance,
                along_track_distance,
            } => {
                assert_relative_eq!(vertical_distance, 0.0);
                assert_relative_eq!(along_track_distance, 0.0);
            }
            Projection::Degenerate => panic!("expected Ok"),
        }
    }
}
