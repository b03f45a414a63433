//! models — the Hawkes process aggregate and its engines.
//!
//! Purpose
//! -------
//! Provide [`HawkesProcess`] together with the engines that operate on it:
//! conditional intensity, Ogata-thinning simulation, exact log-likelihood
//! with the analytic compensator, and the flat-parameter surface used by an
//! external fitter.
//!
//! Key behaviors
//! -------------
//! - `process`: construction and leaf accessors.
//! - `intensity`: `λ_j(t | history)` with kernel-quantile truncation.
//! - `simulation`: `simulate` / `simulate_from` with explicit randomness.
//! - `likelihood`: `log_likelihood`, `log_likelihood_terms`, `compensator`.
//! - `parameters`: `num_params`, `param_blocks`, `param_bounds`, `params`,
//!   `set_params`, `initial_random_params`.
//!
//! Conventions
//! -----------
//! - Engines borrow the history as `&[Event]`; an
//!   [`EventHistory`](crate::hawkes::core::EventHistory) can be passed
//!   directly through deref coercion.
//! - Simulation and likelihood emit `tracing` events at `debug` / `trace`
//!   level; no subscriber is installed by the library.

pub mod intensity;
pub mod likelihood;
pub mod parameters;
pub mod process;
pub mod simulation;

pub use self::likelihood::LikelihoodTerms;
pub use self::parameters::{ParamBlock, ParamBlockKind};
pub use self::process::HawkesProcess;
