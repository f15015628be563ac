use std::cell::OnceCell;

use image::RgbaImage;
use num_traits::AsPrimitive;
use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::{
    chord::{Chord, Tangents},
    darkness::FlatDarkness,
    geometry::Point,
    peg::{OverlappingPegsError, Peg},
    scoring::{self, ScoredChord},
    verboser::{Message, Verboser},
    Float,
};

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("a ring needs at least 2 pegs")]
    MinPegCount,
    #[error("the ring diameter must be positive")]
    RingDiameter,
    #[error("the peg diameter must be positive")]
    PegDiameter,
}

#[derive(Debug, thiserror::Error)]
#[error("no reachable peg remains after skip filtering")]
pub struct EmptyCandidateSetError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    OverlappingPegs(#[from] OverlappingPegsError),
    #[error(transparent)]
    EmptyCandidateSet(#[from] EmptyCandidateSetError),
}

/// Immutable ring geometry, waiting for its peg layout.
pub struct RingBuilder<T> {
    diameter: T,
    center: Point<T>,
}

impl<T: Float> RingBuilder<T> {
    pub fn new(diameter: T, center: Point<T>) -> Self {
        Self { diameter, center }
    }

    /// Lays `count` pegs of the given diameter evenly on the ring circle and
    /// returns the finished ring. Topology is fixed from here on.
    pub fn add_pegs(
        self,
        count: usize,
        peg_diameter: T,
        verboser: &mut impl Verboser,
    ) -> Result<Ring<T>, LayoutError>
    where
        usize: AsPrimitive<T>,
    {
        if count < 2 {
            return Err(LayoutError::MinPegCount);
        }
        if self.diameter <= T::ZERO {
            return Err(LayoutError::RingDiameter);
        }
        if peg_diameter <= T::ZERO {
            return Err(LayoutError::PegDiameter);
        }
        let layout_radius = self.diameter * T::HALF;
        let pegs = (0..count)
            .map(|index| {
                verboser.verbose(Message::CreatingPeg(index));
                let theta = T::TWO * T::PI * index.as_() / count.as_();
                Peg::new(
                    Point {
                        x: self.center.x + layout_radius * theta.cos(),
                        y: self.center.y + layout_radius * theta.sin(),
                    },
                    peg_diameter * T::HALF,
                    index,
                )
            })
            .collect();
        Ok(Ring {
            diameter: self.diameter,
            center: self.center,
            pegs,
            tangents: (0..count * count).map(|_| OnceCell::new()).collect(),
            skip_count: OnceCell::new(),
        })
    }
}

/// An ordered circle of pegs plus the derived state shared by every path
/// strategy: the per-pair tangent table and the neighbor skip count.
pub struct Ring<T> {
    diameter: T,
    center: Point<T>,
    pegs: Vec<Peg<T>>,
    // Arena-style memoization keyed by (source, destination) peg index.
    // Both orderings get their own entry since chord orientation depends on
    // the direction of travel.
    tangents: Vec<OnceCell<Tangents<T>>>,
    skip_count: OnceCell<usize>,
}

impl<T: Float> Ring<T> {
    pub fn diameter(&self) -> T {
        self.diameter
    }

    pub fn center(&self) -> Point<T> {
        self.center
    }

    pub fn pegs(&self) -> &[Peg<T>] {
        &self.pegs
    }

    /// The four tangent chords from peg `from` towards peg `to`, computed at
    /// most once per ordered pair.
    pub fn tangents(&self, from: usize, to: usize) -> Result<&Tangents<T>, OverlappingPegsError> {
        let cell = &self.tangents[from * self.pegs.len() + to];
        if let Some(tangents) = cell.get() {
            return Ok(tangents);
        }
        let computed = self.pegs[from].tangents(&self.pegs[to])?;
        Ok(cell.get_or_init(|| computed))
    }

    /// Minimum index distance below which a chord towards a neighbor would
    /// graze the pegs in between. Computed once per ring.
    pub fn skip_count(&self) -> Result<usize, OverlappingPegsError> {
        if let Some(&skip) = self.skip_count.get() {
            return Ok(skip);
        }
        let skip = self.compute_skip_count()?;
        Ok(*self.skip_count.get_or_init(|| skip))
    }

    fn compute_skip_count(&self) -> Result<usize, OverlappingPegsError> {
        let baseline = self.tangents(0, 1)?.external.clockwise.segment().angle();
        for target in 2..self.pegs.len() {
            let angle = self
                .tangents(0, target)?
                .external
                .clockwise
                .segment()
                .angle();
            if angle > baseline {
                let step = target - 1;
                // A first step already past the baseline means neighbor
                // chords never actually overlap; the ring is degenerate and
                // nothing needs skipping.
                return Ok(if step == 1 { 0 } else { step });
            }
        }
        Ok(0)
    }

    /// One full loop of pegs reachable from `peg`, excluding the skip zone on
    /// both sides, walking the ring forward or backward. Restartable and
    /// finite.
    pub fn candidate_pegs(
        &self,
        peg: usize,
        clockwise: bool,
    ) -> Result<CandidatePegs<'_, T>, OverlappingPegsError> {
        let skip = self.skip_count()?;
        Ok(CandidatePegs::new(self, peg, skip, clockwise))
    }

    /// The two chord variants towards each reachable peg that keep the
    /// thread's winding sense consistent. An undetermined sense counts as
    /// clockwise.
    pub fn candidate_chords(
        &self,
        peg: usize,
        entering_clockwise: Option<bool>,
    ) -> Result<Vec<&Chord<T>>, OverlappingPegsError> {
        let mut chords = Vec::new();
        for candidate in self.candidate_pegs(peg, false)? {
            let tangents = self.tangents(peg, candidate.index())?;
            if entering_clockwise == Some(false) {
                chords.push(&tangents.internal.clockwise);
                chords.push(&tangents.external.anticlockwise);
            } else {
                chords.push(&tangents.external.clockwise);
                chords.push(&tangents.internal.anticlockwise);
            }
        }
        Ok(chords)
    }

    /// Scores every candidate chord by its remaining darkness deficit
    /// between the target and the host's current output.
    pub fn scored_candidates<'a>(
        &'a self,
        peg: usize,
        current: &RgbaImage,
        target: &RgbaImage,
        entering_clockwise: Option<bool>,
    ) -> Result<Vec<ScoredChord<'a, T>>, OverlappingPegsError>
    where
        u8: AsPrimitive<T>,
        usize: AsPrimitive<T>,
    {
        let darkness = FlatDarkness(T::HALF);
        Ok(self
            .candidate_chords(peg, entering_clockwise)?
            .into_iter()
            .map(|chord| ScoredChord {
                score: scoring::darkness_deficit(chord, current, target, &darkness),
                chord,
            })
            .collect())
    }

    /// The maximum-score candidate from `peg`. Exact ties are broken by a
    /// one-ply lookahead: each tied chord is ranked by the best score
    /// reachable from its destination peg.
    ///
    /// The lookahead deliberately reuses this peg's entering sense for the
    /// destination's candidate set rather than the sense the tied chord
    /// would establish; the behavior is kept as the reference implementation
    /// defined it.
    pub fn best_chord<'a>(
        &'a self,
        peg: usize,
        current: &RgbaImage,
        target: &RgbaImage,
        entering_clockwise: Option<bool>,
    ) -> Result<&'a Chord<T>, Error>
    where
        u8: AsPrimitive<T>,
        usize: AsPrimitive<T>,
    {
        let scored = self.scored_candidates(peg, current, target, entering_clockwise)?;
        let best_score = scored
            .iter()
            .map(|candidate| candidate.score)
            .fold(-T::INFINITY, T::max);
        let mut tied = scored
            .iter()
            .filter(|candidate| candidate.score == best_score);
        let first = tied.next().ok_or(EmptyCandidateSetError)?;
        if tied.clone().next().is_none() {
            return Ok(first.chord);
        }

        let mut winner = first.chord;
        let mut winner_continuation = -T::INFINITY;
        for candidate in core::iter::once(first).chain(tied) {
            let continuation = self
                .scored_candidates(
                    candidate.chord.to_peg(),
                    current,
                    target,
                    entering_clockwise,
                )?
                .into_iter()
                .map(|next| next.score)
                .fold(-T::INFINITY, T::max);
            if continuation > winner_continuation {
                winner_continuation = continuation;
                winner = candidate.chord;
            }
        }
        Ok(winner)
    }

    /// Diagnostic walk: uniformly random reachable peg and winding toggle at
    /// every step, no scoring involved.
    pub fn random_walk(&self) -> RandomWalk<'_, T> {
        RandomWalk::new(self, SmallRng::from_entropy())
    }

    /// Reproducible variant of [`Ring::random_walk`].
    pub fn random_walk_from_seed(&self, seed: [u8; 32]) -> RandomWalk<'_, T> {
        RandomWalk::new(self, SmallRng::from_seed(seed))
    }

    /// Greedy winding path against `target`, starting at peg 0 with an
    /// undetermined winding sense. The host draws each returned chord into
    /// its output raster and hands the latest raster to every pull.
    pub fn greedy_winding<'a>(&'a self, target: &'a RgbaImage) -> GreedyWinding<'a, T> {
        GreedyWinding {
            ring: self,
            target,
            peg: 0,
            entering_clockwise: None,
        }
    }
}

pub struct CandidatePegs<'a, T> {
    ring: &'a Ring<T>,
    cursor: usize,
    stop: usize,
    clockwise: bool,
    done: bool,
}

impl<'a, T> CandidatePegs<'a, T> {
    fn new(ring: &'a Ring<T>, origin: usize, skip: usize, clockwise: bool) -> Self {
        let count = ring.pegs.len();
        let skip = skip % count;
        let ahead = (origin + skip) % count;
        let behind = (origin + count - skip) % count;
        let (cursor, stop) = if clockwise {
            (ahead, behind)
        } else {
            (behind, ahead)
        };
        Self {
            ring,
            cursor,
            stop,
            clockwise,
            done: false,
        }
    }
}

impl<'a, T> Iterator for CandidatePegs<'a, T> {
    type Item = &'a Peg<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let count = self.ring.pegs.len();
        self.cursor = if self.clockwise {
            (self.cursor + 1) % count
        } else {
            (self.cursor + count - 1) % count
        };
        if self.cursor == self.stop {
            self.done = true;
            return None;
        }
        Some(&self.ring.pegs[self.cursor])
    }
}

impl<'a, T> std::iter::FusedIterator for CandidatePegs<'a, T> {}

/// Pull-driven random-walk state machine. Infinite; the host cancels by
/// dropping it.
pub struct RandomWalk<'a, T> {
    ring: &'a Ring<T>,
    rng: SmallRng,
    peg: usize,
    clockwise: bool,
}

impl<'a, T: Float> RandomWalk<'a, T> {
    fn new(ring: &'a Ring<T>, mut rng: SmallRng) -> Self {
        let peg = rng.gen_range(0..ring.pegs.len());
        Self {
            ring,
            rng,
            peg,
            clockwise: true,
        }
    }

    pub fn next_chord(&mut self) -> Result<&'a Chord<T>, Error> {
        let candidates: Vec<usize> = self
            .ring
            .candidate_pegs(self.peg, true)?
            .map(Peg::index)
            .collect();
        if candidates.is_empty() {
            return Err(EmptyCandidateSetError.into());
        }
        let next = candidates[self.rng.gen_range(0..candidates.len())];
        let external: bool = self.rng.gen();
        if !external {
            self.clockwise = !self.clockwise;
        }
        let chord = self.ring.tangents(self.peg, next)?.get(external, self.clockwise);
        self.peg = next;
        Ok(chord)
    }
}

impl<'a, T: Float> Iterator for RandomWalk<'a, T> {
    type Item = Result<&'a Chord<T>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_chord())
    }
}

/// Pull-driven greedy-winding state machine. Holds the current peg and the
/// winding sense the thread entered it with; never mutates the rasters.
pub struct GreedyWinding<'a, T> {
    ring: &'a Ring<T>,
    target: &'a RgbaImage,
    peg: usize,
    entering_clockwise: Option<bool>,
}

impl<'a, T: Float> GreedyWinding<'a, T>
where
    u8: AsPrimitive<T>,
    usize: AsPrimitive<T>,
{
    /// Picks the next chord against the host's latest output raster and
    /// advances to its destination peg.
    pub fn next_chord(&mut self, current: &RgbaImage) -> Result<&'a Chord<T>, Error> {
        let chord = self
            .ring
            .best_chord(self.peg, current, self.target, self.entering_clockwise)?;
        self.peg = chord.to_peg();
        self.entering_clockwise = Some(chord.exit_winding());
        Ok(chord)
    }

    /// Peg the next chord will leave from.
    pub fn current_peg(&self) -> usize {
        self.peg
    }
}
