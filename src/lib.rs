pub mod geometry {
    pub mod circle;
    pub mod point;
    pub mod segment;

    pub use circle::Circle;
    pub use point::Point;
    pub use segment::Segment;
}

mod chord;
pub mod darkness;
mod float;
mod peg;
pub mod raster;
mod ring;
pub mod scoring;
pub mod verboser;

pub use chord::{Chord, TangentPair, Tangents};
pub use darkness::Darkness;
pub use float::Float;
pub use peg::{OverlappingPegsError, Peg};
pub use raster::Pixel;
pub use ring::*;
pub use scoring::ScoredChord;
