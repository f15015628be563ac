use crate::{
    chord::{Chord, TangentPair, Tangents},
    geometry::{Circle, Point},
    Float,
};

/// A circular anchor on the ring. The index is its stable, 0-based position
/// within the ring's layout order.
#[derive(Clone, Copy, Debug)]
pub struct Peg<T> {
    center: Point<T>,
    radius: T,
    index: usize,
}

#[derive(Debug, thiserror::Error)]
#[error("the peg circles overlap, no tangent chord exists between them")]
pub struct OverlappingPegsError;

impl<T: Float> Peg<T> {
    pub(crate) fn new(center: Point<T>, radius: T, index: usize) -> Self {
        Self {
            center,
            radius,
            index,
        }
    }

    pub fn center(&self) -> Point<T> {
        self.center
    }

    pub fn radius(&self) -> T {
        self.radius
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn circle(&self) -> Circle<T> {
        Circle {
            center: self.center,
            radius: self.radius,
        }
    }

    /// Computes the four tangent chords towards `other`, each tagged with the
    /// family and winding slot it was classified into.
    pub fn tangents(&self, other: &Peg<T>) -> Result<Tangents<T>, OverlappingPegsError> {
        let set = self
            .circle()
            .tangent_set(other.circle())
            .ok_or(OverlappingPegsError)?;
        let chord = |segment, clockwise, internal| {
            Chord::new(segment, self.index, other.index, clockwise, internal)
        };
        Ok(Tangents {
            external: TangentPair {
                clockwise: chord(set.external.clockwise, true, false),
                anticlockwise: chord(set.external.anticlockwise, false, false),
            },
            internal: TangentPair {
                clockwise: chord(set.internal.clockwise, true, true),
                anticlockwise: chord(set.internal.anticlockwise, false, true),
            },
        })
    }
}
