use std::fmt;

use super::Point;
use crate::Float;

#[derive(Clone, Copy, Debug)]
pub struct Segment<T> {
    pub start: Point<T>,
    pub end: Point<T>,
}

impl<T> Segment<T> {
    pub fn new(start: Point<T>, end: Point<T>) -> Self {
        Self { start, end }
    }
}

impl<T: Float> Segment<T> {
    pub fn length(&self) -> T {
        self.start.distance(&self.end)
    }

    /// Direction angle of the segment from start to end, in radians.
    pub fn angle(&self) -> T {
        (self.end.y - self.start.y).atan2(self.end.x - self.start.x)
    }
}

impl<T: fmt::Display> fmt::Display for Segment<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:2}, {:2}]", self.start, self.end)
    }
}
