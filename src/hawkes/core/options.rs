//! Simulation options for marked Hawkes processes.
//!
//! Purpose
//! -------
//! Collect the knobs of the thinning simulator in one plain data carrier so
//! call sites pass explicit options instead of ad-hoc arguments.
//!
//! Key behaviors
//! -------------
//! - [`SimOpts::seed`] selects a reproducible `StdRng` stream (`Some`) or an
//!   entropy-seeded one (`None`). The default seed is `Some(42)`.
//! - [`SimOpts::max_rejections`] optionally caps the number of consecutive
//!   rejected proposals per component and candidate; `None` means no cap.
//!
//! Conventions
//! -----------
//! - Options describe intent only; the simulation engine enforces them.
//! - Engines that accept a caller-provided [`RandomSource`] ignore `seed`.
//!
//! [`RandomSource`]: crate::hawkes::core::random::RandomSource

/// SimOpts — configuration for Ogata-thinning simulation.
///
/// Fields
/// ------
/// - `seed`: `Option<u64>`
///   RNG seed for reproducibility; `None` seeds from entropy.
/// - `max_rejections`: `Option<usize>`
///   Cap on consecutive rejections while proposing one component's
///   candidate; exceeding it yields `HawkesError::ThinningStalled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimOpts {
    pub seed: Option<u64>,
    pub max_rejections: Option<usize>,
}

impl SimOpts {
    pub fn new(seed: Option<u64>, max_rejections: Option<usize>) -> Self {
        SimOpts { seed, max_rejections }
    }
}

impl Default for SimOpts {
    fn default() -> Self {
        SimOpts { seed: Some(42), max_rejections: None }
    }
}
