use crate::Float;

use super::{Point, Segment};

#[derive(Clone, Copy, Debug)]
pub struct Circle<T> {
    pub center: Point<T>,
    pub radius: T,
}

/// One tangent family, split by the direction the chord winds off the source
/// circle.
#[derive(Clone, Copy, Debug)]
pub struct DirectedPair<T> {
    pub clockwise: Segment<T>,
    pub anticlockwise: Segment<T>,
}

/// The four common tangents between two non-overlapping circles.
#[derive(Clone, Copy, Debug)]
pub struct TangentSet<T> {
    pub external: DirectedPair<T>,
    pub internal: DirectedPair<T>,
}

impl<T: Float> Circle<T> {
    /// Computes the four common tangent segments towards `other`, or `None`
    /// when the circles coincide, one contains the other, or they intersect
    /// so that a tangent family has no real solution.
    ///
    /// For each family `sign1` (+1 external, -1 internal) the half-chord
    /// offset is `c = (r1 - sign1 * r2) / d`; the two members of the family
    /// come from rotating the center-to-center unit vector by `(c, ±h)` with
    /// `h = sqrt(1 - c²)` and projecting the resulting normal onto both radii.
    pub fn tangent_set(self, other: Self) -> Option<TangentSet<T>> {
        let sq_dist = self.center.sq_distance(&other.center);
        let radius_diff = self.radius - other.radius;
        if sq_dist <= radius_diff * radius_diff {
            return None;
        }
        let dist = num_traits::Float::sqrt(sq_dist);
        let v = (other.center - self.center) / dist;

        let family = |sign1: T| {
            let c = (self.radius - sign1 * other.radius) / dist;
            if c * c > T::ONE {
                return None;
            }
            let h = num_traits::Float::sqrt((T::ONE - c * c).max(T::ZERO));
            Some([T::ONE, -T::ONE].map(|sign2| {
                let n = Point {
                    x: v.x * c - sign2 * h * v.y,
                    y: v.y * c + sign2 * h * v.x,
                };
                Segment::new(
                    self.center + n * self.radius,
                    other.center + n * (sign1 * other.radius),
                )
            }))
        };

        // Derivation order fixes the slot labels: the first external member
        // winds anticlockwise, the first internal member clockwise.
        let [ext_anti, ext_clock] = family(T::ONE)?;
        let [int_clock, int_anti] = family(-T::ONE)?;
        Some(TangentSet {
            external: DirectedPair {
                clockwise: ext_clock,
                anticlockwise: ext_anti,
            },
            internal: DirectedPair {
                clockwise: int_clock,
                anticlockwise: int_anti,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on_circle(point: Point<f64>, circle: Circle<f64>) -> bool {
        (point.distance(&circle.center) - circle.radius).abs() < 1e-9
    }

    fn pair() -> (Circle<f64>, Circle<f64>) {
        (
            Circle {
                center: Point { x: 0.0, y: 0.0 },
                radius: 5.0,
            },
            Circle {
                center: Point { x: 40.0, y: 10.0 },
                radius: 3.0,
            },
        )
    }

    #[test]
    fn endpoints_lie_on_their_circles() {
        let (a, b) = pair();
        let set = a.tangent_set(b).unwrap();
        for seg in [
            set.external.clockwise,
            set.external.anticlockwise,
            set.internal.clockwise,
            set.internal.anticlockwise,
        ] {
            assert!(on_circle(seg.start, a), "start off source circle: {seg}");
            assert!(on_circle(seg.end, b), "end off target circle: {seg}");
        }
    }

    #[test]
    fn external_tangents_do_not_cross_the_center_line() {
        let (a, b) = pair();
        let set = a.tangent_set(b).unwrap();
        // An external tangent keeps both endpoints on the same side of the
        // center-to-center line; the signed cross products agree.
        for seg in [set.external.clockwise, set.external.anticlockwise] {
            let axis = b.center - a.center;
            let s = seg.start - a.center;
            let e = seg.end - a.center;
            let cross_s = axis.x * s.y - axis.y * s.x;
            let cross_e = axis.x * e.y - axis.y * e.x;
            assert!(cross_s * cross_e > 0.0);
        }
        for seg in [set.internal.clockwise, set.internal.anticlockwise] {
            let axis = b.center - a.center;
            let s = seg.start - a.center;
            let e = seg.end - a.center;
            let cross_s = axis.x * s.y - axis.y * s.x;
            let cross_e = axis.x * e.y - axis.y * e.x;
            assert!(cross_s * cross_e < 0.0);
        }
    }

    #[test]
    fn contained_circles_have_no_tangents() {
        let a = Circle {
            center: Point { x: 0.0, y: 0.0 },
            radius: 10.0,
        };
        let b = Circle {
            center: Point { x: 1.0, y: 0.0 },
            radius: 2.0,
        };
        assert!(a.tangent_set(b).is_none());
    }

    #[test]
    fn intersecting_circles_have_no_full_set() {
        let a = Circle {
            center: Point { x: 0.0, y: 0.0 },
            radius: 5.0,
        };
        let b = Circle {
            center: Point { x: 7.0, y: 0.0 },
            radius: 5.0,
        };
        assert!(a.tangent_set(b).is_none());
    }
}
