use std::iter::FusedIterator;

use num_traits::AsPrimitive;

use crate::{geometry::Segment, Float};

/// One antialiased sample of a rasterized line: integer position plus the
/// coverage weight contributed by the line at that position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pixel<T> {
    pub x: isize,
    pub y: isize,
    pub coverage: T,
}

/// Antialiased samples of a segment, in major-axis order.
///
/// Simplified Wu rasterization: the major axis is whichever spans more, the
/// walk covers the unit steps between the rounded endpoints exclusive of the
/// first and last one, and every step emits two samples whose coverages sum
/// to one. Endpoint pixels are never emitted, so a segment spanning `n`
/// integer steps yields exactly `2 * (n - 2)` samples.
pub fn line_pixels<T: Float>(segment: &Segment<T>) -> LinePixels<T> {
    LinePixels::new(segment)
}

#[derive(Clone, Debug)]
pub struct LinePixels<T> {
    steep: bool,
    major: isize,
    end: isize,
    intercept: T,
    gradient: T,
    pending: Option<Pixel<T>>,
}

impl<T: Float> LinePixels<T> {
    fn new(segment: &Segment<T>) -> Self {
        let (mut start, mut end) = (segment.start, segment.end);
        let steep = (end.y - start.y).abs() > (end.x - start.x).abs();
        if steep {
            core::mem::swap(&mut start.x, &mut start.y);
            core::mem::swap(&mut end.x, &mut end.y);
        }
        if start.x > end.x {
            core::mem::swap(&mut start, &mut end);
        }
        let first = start.x.round();
        let last = end.x.round();
        let dx = end.x - start.x;
        let gradient = if dx == T::ZERO {
            T::ONE
        } else {
            (end.y - start.y) / dx
        };
        Self {
            steep,
            major: (first + T::ONE).as_(),
            end: last.as_() - 1,
            intercept: start.y + gradient * (first + T::ONE - start.x),
            gradient,
            pending: None,
        }
    }
}

impl<T: Float> Iterator for LinePixels<T> {
    type Item = Pixel<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(pixel) = self.pending.take() {
            return Some(pixel);
        }
        if self.major >= self.end {
            return None;
        }
        let floor = self.intercept.floor();
        let frac = self.intercept - floor;
        let minor: isize = floor.as_();
        let (x, y) = if self.steep {
            (minor, self.major)
        } else {
            (self.major, minor)
        };
        let below = Pixel {
            x,
            y,
            coverage: T::ONE - frac,
        };
        self.pending = Some(if self.steep {
            Pixel {
                x: minor + 1,
                y: self.major,
                coverage: frac,
            }
        } else {
            Pixel {
                x: self.major,
                y: minor + 1,
                coverage: frac,
            }
        });
        self.major += 1;
        self.intercept = self.intercept + self.gradient;
        Some(below)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let steps = (self.end - self.major).max(0) as usize;
        let len = 2 * steps + usize::from(self.pending.is_some());
        (len, Some(len))
    }
}

impl<T: Float> ExactSizeIterator for LinePixels<T> {}

impl<T: Float> FusedIterator for LinePixels<T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn segment(x0: f64, y0: f64, x1: f64, y1: f64) -> Segment<f64> {
        Segment::new(Point { x: x0, y: y0 }, Point { x: x1, y: y1 })
    }

    #[test]
    fn horizontal_span_yields_two_samples_per_interior_step() {
        let span = 10.0;
        let pixels: Vec<_> = line_pixels(&segment(0.0, 5.0, span, 5.0)).collect();
        assert_eq!(pixels.len(), 2 * (span as usize - 2));
        for pair in pixels.chunks(2) {
            assert!((pair[0].coverage + pair[1].coverage - 1.0).abs() < 1e-12);
            assert_eq!(pair[0].x, pair[1].x);
            assert_eq!(pair[0].y + 1, pair[1].y);
            assert_eq!(pair[0].y, 5);
        }
    }

    #[test]
    fn vertical_span_walks_the_y_axis() {
        let pixels: Vec<_> = line_pixels(&segment(3.0, 0.0, 3.0, 8.0)).collect();
        assert_eq!(pixels.len(), 2 * (8 - 2));
        for pair in pixels.chunks(2) {
            assert_eq!(pair[0].y, pair[1].y);
            assert_eq!(pair[0].x + 1, pair[1].x);
            assert!((pair[0].coverage + pair[1].coverage - 1.0).abs() < 1e-12);
        }
        let ys: Vec<_> = pixels.iter().step_by(2).map(|p| p.y).collect();
        assert_eq!(ys, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn diagonal_coverage_tracks_the_intercept() {
        let pixels: Vec<_> = line_pixels(&segment(0.0, 0.0, 10.0, 5.0)).collect();
        assert_eq!(pixels.len(), 16);
        for (i, pair) in pixels.chunks(2).enumerate() {
            let intercept = 0.5 * (i as f64 + 1.0);
            let frac = intercept - intercept.floor();
            assert!((pair[1].coverage - frac).abs() < 1e-12);
            assert!((pair[0].coverage - (1.0 - frac)).abs() < 1e-12);
        }
    }

    #[test]
    fn short_spans_yield_nothing() {
        assert_eq!(line_pixels(&segment(0.0, 0.0, 2.0, 0.0)).count(), 0);
        assert_eq!(line_pixels(&segment(0.0, 0.0, 0.0, 0.0)).count(), 0);
    }

    #[test]
    fn sequence_is_restartable_and_exact() {
        let seg = segment(2.0, 7.0, 20.0, 3.0);
        let first: Vec<_> = line_pixels(&seg).collect();
        let second: Vec<_> = line_pixels(&seg).collect();
        assert_eq!(first, second);
        assert_eq!(line_pixels(&seg).len(), first.len());
    }
}
