//! core — building blocks of marked multivariate Hawkes processes.
//!
//! Purpose
//! -------
//! Collect the leaf components a Hawkes process is assembled from: event
//! containers, decay kernels, mark distributions with their impact
//! functions, immigration/branching parameters, shared-leaf storage,
//! random sources, simulation options, and validation helpers. The engines
//! in `hawkes::models` are built on top of these primitives.
//!
//! Key behaviors
//! -------------
//! - Events and histories ([`Event`], [`EventHistory`]) with validated,
//!   strictly increasing times.
//! - Decay kernels ([`DecayKernel`]) exposing `w`, `W̄`, and the
//!   effective-support quantile `Q`.
//! - Mark laws ([`MarkDistribution`]) with density, CDF, sampling, and an
//!   impact function; the Pareto law selects a [`ParetoImpactForm`] and the
//!   exponential law takes an injected [`ImpactFunction`].
//! - Baseline intensities and branching matrix ([`ImmigrationBranching`]).
//! - Deduplicated per-component leaves ([`SharedLeaves`]).
//! - Explicit randomness ([`RandomSource`], [`RngSource`], [`ReplaySource`])
//!   and simulation configuration ([`SimOpts`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - Every leaf validates its parameters on construction and on
//!   `set_params`, so queries (`w`, `density`, `impact`, …) are infallible.
//! - Each leaf publishes its fitted parameters as a flat block with matching
//!   [`ParamBound`]s; non-fitted settings (such as the kernel ε) are not part
//!   of the block.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based; components are `0..n`.
//! - This module performs no I/O and no logging.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each submodule and cover closed forms, impact
//!   normalization, flat-parameter round trips, lower bounds, and validation
//!   paths.

pub mod arena;
pub mod bounds;
pub mod decay;
pub mod events;
pub mod impact;
pub mod marks;
pub mod options;
pub mod params;
pub mod random;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::arena::SharedLeaves;
pub use self::bounds::{POSITIVE_FLOOR, ParamBound};
pub use self::decay::{DEFAULT_EPSILON, DecayKernel};
pub use self::events::{Event, EventHistory};
pub use self::impact::ImpactFunction;
pub use self::marks::{ExponentialMarks, MarkDistribution, ParetoImpactForm, ParetoMarks};
pub use self::options::SimOpts;
pub use self::params::ImmigrationBranching;
pub use self::random::{RandomSource, ReplaySource, RngSource};
pub use self::validation::{validate_component, validate_history};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_hawkes::hawkes::core::prelude::*;
//
// to import the leaf types in a single line.

pub mod prelude {
    pub use super::arena::SharedLeaves;
    pub use super::bounds::ParamBound;
    pub use super::decay::DecayKernel;
    pub use super::events::{Event, EventHistory};
    pub use super::impact::ImpactFunction;
    pub use super::marks::MarkDistribution;
    pub use super::options::SimOpts;
    pub use super::params::ImmigrationBranching;
    pub use super::random::{RandomSource, RngSource};
}
