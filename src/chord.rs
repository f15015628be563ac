use std::cell::OnceCell;

use crate::{
    geometry::Segment,
    raster::{self, Pixel},
    Float,
};

/// A tangent segment between two pegs, tagged with the winding sense in which
/// it leaves the source peg and whether it belongs to the internal family.
///
/// Pixels and length are derived lazily and memoized; a chord is shared
/// read-only once its tangent set has been computed.
#[derive(Debug)]
pub struct Chord<T> {
    segment: Segment<T>,
    from: usize,
    to: usize,
    clockwise: bool,
    internal: bool,
    pixels: OnceCell<Vec<Pixel<T>>>,
    length: OnceCell<T>,
}

impl<T: Float> Chord<T> {
    pub(crate) fn new(
        segment: Segment<T>,
        from: usize,
        to: usize,
        clockwise: bool,
        internal: bool,
    ) -> Self {
        Self {
            segment,
            from,
            to,
            clockwise,
            internal,
            pixels: OnceCell::new(),
            length: OnceCell::new(),
        }
    }

    pub fn segment(&self) -> &Segment<T> {
        &self.segment
    }

    /// Index of the peg the chord leaves.
    pub fn from_peg(&self) -> usize {
        self.from
    }

    /// Index of the peg the chord lands on.
    pub fn to_peg(&self) -> usize {
        self.to
    }

    pub fn is_clockwise(&self) -> bool {
        self.clockwise
    }

    pub fn is_internal(&self) -> bool {
        self.internal
    }

    /// Winding sense with which a path continuing through this chord enters
    /// the destination peg. Internal tangents cross the center-to-center
    /// line and flip the apparent rotation.
    pub fn exit_winding(&self) -> bool {
        self.clockwise != self.internal
    }

    /// Antialiased pixel samples of the chord, rasterized on first access.
    pub fn pixels(&self) -> &[Pixel<T>] {
        self.pixels
            .get_or_init(|| raster::line_pixels(&self.segment).collect())
    }

    /// Euclidean distance between the chord endpoints, computed on first
    /// access.
    pub fn length(&self) -> T {
        *self.length.get_or_init(|| self.segment.length())
    }
}

/// One tangent family of a peg pair, split by winding sense.
#[derive(Debug)]
pub struct TangentPair<T> {
    pub clockwise: Chord<T>,
    pub anticlockwise: Chord<T>,
}

impl<T> TangentPair<T> {
    pub fn get(&self, clockwise: bool) -> &Chord<T> {
        if clockwise {
            &self.clockwise
        } else {
            &self.anticlockwise
        }
    }
}

/// The four tangent chords between an ordered peg pair.
#[derive(Debug)]
pub struct Tangents<T> {
    pub external: TangentPair<T>,
    pub internal: TangentPair<T>,
}

impl<T> Tangents<T> {
    pub fn get(&self, external: bool, clockwise: bool) -> &Chord<T> {
        if external {
            self.external.get(clockwise)
        } else {
            self.internal.get(clockwise)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn chord() -> Chord<f64> {
        Chord::new(
            Segment::new(Point { x: 0.0, y: 0.0 }, Point { x: 30.0, y: 40.0 }),
            0,
            1,
            true,
            false,
        )
    }

    #[test]
    fn length_is_the_endpoint_distance() {
        assert_eq!(chord().length(), 50.0);
    }

    #[test]
    fn pixels_and_length_are_memoized() {
        let chord = chord();
        let first = chord.pixels() as *const _;
        let second = chord.pixels() as *const _;
        assert_eq!(first, second);
        assert_eq!(chord.length(), chord.length());
    }

    #[test]
    fn internal_chords_flip_the_exit_winding() {
        let external = chord();
        assert!(external.exit_winding());
        let internal = Chord::new(*external.segment(), 0, 1, true, true);
        assert!(!internal.exit_winding());
    }
}
