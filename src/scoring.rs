use image::RgbaImage;
use num_traits::AsPrimitive;

use crate::{chord::Chord, darkness::Darkness, Float};

/// A candidate chord with its strategy-specific score.
#[derive(Clone, Copy, Debug)]
pub struct ScoredChord<'a, T> {
    pub chord: &'a Chord<T>,
    pub score: T,
}

/// Normalized darkness of one raster sample: 0 for opaque white, 1 for opaque
/// black, scaled down by transparency. `None` outside the raster.
pub fn sample_darkness<T: Float>(raster: &RgbaImage, x: isize, y: isize) -> Option<T>
where
    u8: AsPrimitive<T>,
{
    if x < 0 || y < 0 {
        return None;
    }
    let [r, g, b, a] = raster.get_pixel_checked(x as u32, y as u32)?.0;
    let brightness = (r.as_() + g.as_() + b.as_()) / T::SEVEN_SIX_FIVE;
    Some((T::ONE - brightness) * (a.as_() / T::TWO_FIVE_FIVE))
}

/// Coverage-weighted darkness deficit of a chord: how much darker the target
/// is, averaged along the chord, than the output would be after one more
/// thread pass. Positive scores mean the chord still closes a deficit.
///
/// Samples falling outside either raster contribute nothing to the sum but
/// stay in the normalization count.
pub fn darkness_deficit<T: Float>(
    chord: &Chord<T>,
    current: &RgbaImage,
    target: &RgbaImage,
    darkness: &impl Darkness<T>,
) -> T
where
    u8: AsPrimitive<T>,
    usize: AsPrimitive<T>,
{
    let pixels = chord.pixels();
    if pixels.is_empty() {
        return T::ZERO;
    }
    let mut sum = T::ZERO;
    for pixel in pixels {
        let (Some(want), Some(have)) = (
            sample_darkness::<T>(target, pixel.x, pixel.y),
            sample_darkness::<T>(current, pixel.x, pixel.y),
        ) else {
            continue;
        };
        sum += (want - darkness.compute(have)) * pixel.coverage;
    }
    sum / pixels.len().as_()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        darkness::FlatDarkness,
        geometry::{Point, Segment},
    };
    use image::Rgba;

    fn flat(color: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(64, 64, Rgba(color))
    }

    #[test]
    fn darkness_of_plain_samples() {
        assert_eq!(
            sample_darkness::<f64>(&flat([255, 255, 255, 255]), 3, 3),
            Some(0.0)
        );
        assert_eq!(
            sample_darkness::<f64>(&flat([0, 0, 0, 255]), 3, 3),
            Some(1.0)
        );
        // Transparency scales the darkness down.
        assert_eq!(
            sample_darkness::<f64>(&flat([0, 0, 0, 0]), 3, 3),
            Some(0.0)
        );
        assert_eq!(sample_darkness::<f64>(&flat([0, 0, 0, 255]), -1, 3), None);
        assert_eq!(sample_darkness::<f64>(&flat([0, 0, 0, 255]), 64, 3), None);
    }

    #[test]
    fn dark_targets_score_positive_over_blank_output() {
        let chord = Chord::new(
            Segment::new(Point { x: 4.0, y: 10.0 }, Point { x: 60.0, y: 10.0 }),
            0,
            1,
            true,
            false,
        );
        let score: f64 = darkness_deficit(
            &chord,
            &flat([255, 255, 255, 255]),
            &flat([0, 0, 0, 255]),
            &FlatDarkness(0.5),
        );
        // want 1.0, simulated output darkness 0.5, coverage pairs sum to 1.
        assert!((score - 0.25).abs() < 1e-9);
    }

    #[test]
    fn blank_targets_score_the_flat_penalty() {
        let chord = Chord::new(
            Segment::new(Point { x: 4.0, y: 10.0 }, Point { x: 60.0, y: 10.0 }),
            0,
            1,
            true,
            false,
        );
        let score: f64 = darkness_deficit(
            &chord,
            &flat([255, 255, 255, 255]),
            &flat([255, 255, 255, 255]),
            &FlatDarkness(0.5),
        );
        assert!((score + 0.25).abs() < 1e-9);
    }
}
