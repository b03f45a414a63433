//! hawkes — marked multivariate Hawkes processes: leaves, engines, errors.
//!
//! Purpose
//! -------
//! Provide a cohesive layer for marked multivariate Hawkes self-exciting
//! point processes: building blocks in [`core`], the process aggregate and
//! its engines in [`models`], and shared error types in [`errors`].
//!
//! Key behaviors
//! -------------
//! - Evaluate the conditional intensity `λ_j(t | history)` of any component.
//! - Simulate event histories with Ogata's modified thinning, driven by an
//!   explicit, seedable random source.
//! - Compute the exact log-likelihood of an observed history with the
//!   analytic compensator.
//! - Expose a flat parameter vector with bounds for an external maximum
//!   likelihood fitter (no optimizer is bundled).
//!
//! Invariants & assumptions
//! ------------------------
//! - Histories are strictly increasing in time; scoring validates this and
//!   reports violations instead of re-sorting.
//! - Kernel and mark leaves may be shared between components; the flat
//!   parameter vector carries one block per distinct leaf.
//! - Domain violations (non-positive intensity or mark density where a log
//!   is needed, non-terminating thinning) are errors, never clamped.
//!
//! Downstream usage
//! ----------------
//! 1. Build an [`ImmigrationBranching`], decay kernels ([`DecayKernel`]) and
//!    mark laws ([`MarkDistribution`]) wrapped in [`SharedLeaves`].
//! 2. Assemble a [`HawkesProcess`] with `HawkesProcess::new`.
//! 3. Call `simulate(n, &SimOpts::default())` to generate an
//!    [`EventHistory`], or `log_likelihood(&history)` to score one.
//! 4. A fitter reads `params()` / `param_bounds()` and writes candidates
//!    back with `set_params`.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`core`] cover leaf closed forms, normalizations, and
//!   validation; unit tests in [`models`] cover the engines on hand-built
//!   histories and replayed randomness.
//! - `tests/integration_hawkes_pipeline.rs` runs the simulate → score
//!   pipeline on a two-component Pareto-marked process.

pub mod core;
pub mod errors;
pub mod models;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::{
    DecayKernel, Event, EventHistory, ImmigrationBranching, ImpactFunction, MarkDistribution,
    ParamBound, ParetoImpactForm, RandomSource, ReplaySource, RngSource, SharedLeaves, SimOpts,
};

pub use self::errors::{HawkesError, HawkesResult, ParamError, ParamResult};

pub use self::models::{HawkesProcess, LikelihoodTerms, ParamBlock, ParamBlockKind};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_hawkes::hawkes::prelude::*;
//
// to import the main Hawkes surface in a single line.

pub mod prelude {
    pub use super::{
        DecayKernel, Event, EventHistory, HawkesError, HawkesProcess, HawkesResult,
        ImmigrationBranching, ImpactFunction, LikelihoodTerms, MarkDistribution, ParamBound,
        ParamError, ParamResult, RandomSource, RngSource, SharedLeaves, SimOpts,
    };
}
