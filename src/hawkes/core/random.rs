//! Random sources for simulation and mark sampling.
//!
//! Purpose
//! -------
//! Thread an explicit, seedable random source through every call that needs
//! randomness, instead of relying on global RNG state. The engines only need
//! two primitives: a uniform draw on `[0, 1)` and an exponential draw with a
//! given rate.
//!
//! Key behaviors
//! -------------
//! - [`RandomSource`] is the capability consumed by the engines.
//! - [`RngSource`] adapts any `rand::Rng`; [`RngSource::seeded`] builds a
//!   reproducible `StdRng`-backed source from an optional seed.
//! - [`ReplaySource`] replays recorded draws in order (cycling when
//!   exhausted), which makes engine behavior fully scriptable in tests.
//!
//! Conventions
//! -----------
//! - `uniform()` returns values in `[0, 1)`; callers that invert a CDF use
//!   `1 − u`, which lies in `(0, 1]`.
//! - `exponential(rate)` returns a draw with mean `1 / rate`.
use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::Exp1;

/// Source of the two random primitives used by the Hawkes engines.
pub trait RandomSource {
    /// Uniform draw on `[0, 1)`.
    fn uniform(&mut self) -> f64;

    /// Exponential draw with the given `rate` (mean `1 / rate`).
    fn exponential(&mut self, rate: f64) -> f64;
}

/// [`RandomSource`] backed by a `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R: Rng> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        RngSource { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl RngSource<StdRng> {
    /// Reproducible source for `Some(seed)`; entropy-seeded for `None`.
    pub fn seeded(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        RngSource { rng }
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn exponential(&mut self, rate: f64) -> f64 {
        let unit: f64 = self.rng.sample(Exp1);
        unit / rate
    }
}

/// [`RandomSource`] that replays recorded draws.
///
/// Uniform draws come from `uniforms` and unit-rate exponential draws from
/// `exponentials`; each stream cycles back to its start when exhausted.
/// `exponential(rate)` returns the recorded unit draw divided by `rate`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaySource {
    uniforms: Vec<f64>,
    exponentials: Vec<f64>,
    next_uniform: usize,
    next_exponential: usize,
}

impl ReplaySource {
    /// Build a replay source. Empty streams replay `0.5` (uniform) and `1.0`
    /// (unit exponential).
    pub fn new(uniforms: Vec<f64>, exponentials: Vec<f64>) -> Self {
        let uniforms = if uniforms.is_empty() { vec![0.5] } else { uniforms };
        let exponentials = if exponentials.is_empty() { vec![1.0] } else { exponentials };
        ReplaySource { uniforms, exponentials, next_uniform: 0, next_exponential: 0 }
    }

    /// Number of uniform draws consumed so far.
    pub fn uniforms_drawn(&self) -> usize {
        self.next_uniform
    }

    /// Number of exponential draws consumed so far.
    pub fn exponentials_drawn(&self) -> usize {
        self.next_exponential
    }
}

impl RandomSource for ReplaySource {
    fn uniform(&mut self) -> f64 {
        let value = self.uniforms[self.next_uniform % self.uniforms.len()];
        self.next_uniform += 1;
        value
    }

    fn exponential(&mut self, rate: f64) -> f64 {
        let value = self.exponentials[self.next_exponential % self.exponentials.len()];
        self.next_exponential += 1;
        value / rate
    }
}
