use crate::Float;

/// Simulated effect of laying one thread pass over a pixel: maps the pixel's
/// current darkness to the darkness it would have after the draw.
pub trait Darkness<S> {
    fn compute(&self, darkness: S) -> S;
}

/// Darkens by a flat step, saturating at full black.
#[derive(Clone, Copy)]
pub struct FlatDarkness<S>(pub S);

impl<T: Float> Darkness<T> for FlatDarkness<T> {
    fn compute(&self, darkness: T) -> T {
        (darkness + self.0).min(T::ONE)
    }
}

/// Closes a fixed fraction of the remaining gap to full black.
#[derive(Clone, Copy)]
pub struct PercentageDarkness<S>(pub S);

impl<S: Float> Darkness<S> for PercentageDarkness<S> {
    fn compute(&self, darkness: S) -> S {
        darkness + self.0 * (S::ONE - darkness)
    }
}
