//! Errors for marked Hawkes processes (history validation, engine domain
//! violations, and parameter configuration).
//!
//! This module defines a process error type, [`HawkesError`], and a parameter
//! error type, [`ParamError`], used across the Python-facing API and the
//! internal Rust core. Both implement `Display`/`Error` and convert to `PyErr`
//! when the `python-bindings` feature is enabled.
//!
//! ## Conventions
//! - **Indices are 0-based** (components, events, flat parameter slots).
//! - Event times must be **finite and non-negative** and strictly increasing.
//! - Configuration problems (bad rates, shapes, flat-vector lengths) are
//!   [`ParamError`]s; problems discovered while evaluating a history
//!   (empty/unsorted input, λ ≤ 0 where a logarithm is needed, thinning that
//!   cannot make progress) are [`HawkesError`]s.
//! - Nothing here is retried or clamped; every variant is surfaced to the
//!   caller as-is.
#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*};
use statrs::distribution::{ExpError, ParetoError};

/// Crate-wide result alias for process operations that may produce
/// [`HawkesError`].
pub type HawkesResult<T> = Result<T, HawkesError>;

/// Result alias for parameter-construction/mapping paths that may produce
/// [`ParamError`].
pub type ParamResult<T> = Result<T, ParamError>;

/// Unified error type for intensity evaluation, simulation, and likelihood
/// scoring.
///
/// Covers event-history validation, causal-ordering preconditions, and
/// arithmetic domain violations found by the engines. Implements
/// `Display`/`Error` and converts to a Python `ValueError` at PyO3
/// boundaries.
#[derive(Debug, Clone, PartialEq)]
pub enum HawkesError {
    // ---- History validation ----
    /// History is empty where at least one event is required.
    EmptyHistory,

    /// Event time is NaN/±inf.
    NonFiniteEventTime { index: usize, value: f64 },

    /// Event time is < 0.
    NegativeEventTime { index: usize, value: f64 },

    /// Event mark is NaN/±inf.
    NonFiniteMark { index: usize, value: f64 },

    /// Event times are not strictly increasing.
    UnsortedHistory { index: usize, previous: f64, current: f64 },

    /// Column inputs for a history have different lengths.
    ColumnLengthMismatch { times: usize, components: usize, marks: usize },

    /// Component index is outside `[0, num_components)`.
    ComponentOutOfRange { component: usize, num_components: usize },

    // ---- Engine domain violations ----
    /// Conditional intensity is ≤ 0 or non-finite where it must be positive.
    NonPositiveIntensity { component: usize, time: f64, value: f64 },

    /// Mark density is ≤ 0 or non-finite at an observed mark.
    NonPositiveMarkDensity { component: usize, mark: f64, value: f64 },

    /// Thinning rejected more candidates than the configured cap.
    ThinningStalled { component: usize, rejections: usize },

    /// Simulation produced a time that does not advance the clock.
    NonIncreasingTime { previous: f64, candidate: f64 },

    // ---- Parameters ----
    /// Wrapper for parameter/configuration failures.
    Param(ParamError),
}

impl std::error::Error for HawkesError {}

impl std::fmt::Display for HawkesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- History validation ----
            HawkesError::EmptyHistory => {
                write!(f, "Event history is empty.")
            }
            HawkesError::NonFiniteEventTime { index, value } => {
                write!(f, "Event time at index {index} is non-finite: {value}")
            }
            HawkesError::NegativeEventTime { index, value } => {
                write!(f, "Event time at index {index} is negative: {value}")
            }
            HawkesError::NonFiniteMark { index, value } => {
                write!(f, "Event mark at index {index} is non-finite: {value}")
            }
            HawkesError::UnsortedHistory { index, previous, current } => {
                write!(
                    f,
                    "Event times must be strictly increasing; index {index} has time {current} after {previous}"
                )
            }
            HawkesError::ColumnLengthMismatch { times, components, marks } => {
                write!(
                    f,
                    "History columns must have equal length; got times {times}, components {components}, marks {marks}"
                )
            }
            HawkesError::ComponentOutOfRange { component, num_components } => {
                write!(
                    f,
                    "Component index {component} is out of range for a process with {num_components} components"
                )
            }
            // ---- Engine domain violations ----
            HawkesError::NonPositiveIntensity { component, time, value } => {
                write!(
                    f,
                    "Intensity of component {component} at time {time} must be finite and > 0; got: {value}"
                )
            }
            HawkesError::NonPositiveMarkDensity { component, mark, value } => {
                write!(
                    f,
                    "Mark density of component {component} at mark {mark} must be finite and > 0; got: {value}"
                )
            }
            HawkesError::ThinningStalled { component, rejections } => {
                write!(
                    f,
                    "Thinning for component {component} exceeded {rejections} rejections without accepting a candidate"
                )
            }
            HawkesError::NonIncreasingTime { previous, candidate } => {
                write!(
                    f,
                    "Simulated event time {candidate} does not advance the clock past {previous}"
                )
            }
            // ---- Parameters ----
            HawkesError::Param(err) => {
                write!(f, "Invalid process parameters: {err}")
            }
        }
    }
}

/// Convert a [`HawkesError`] into a Python `ValueError` with the error message.
///
/// This is used at the Rust↔Python boundary to surface domain errors cleanly.
#[cfg(feature = "python-bindings")]
impl std::convert::From<HawkesError> for PyErr {
    fn from(err: HawkesError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

impl From<ParamError> for HawkesError {
    fn from(err: ParamError) -> HawkesError {
        HawkesError::Param(err)
    }
}

/// Errors specific to parameter construction, validation, and flat-vector
/// mapping.
///
/// Typical causes include non-positive decay rates, negative branching
/// weights, malformed mark-law shapes, and flat vectors of the wrong length.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamError {
    /// A process needs at least one component.
    EmptyProcess,

    /// Immigration vector / branching matrix / wiring disagree on `n`.
    ComponentCountMismatch { expected: usize, actual: usize },

    /// Immigration intensity must be finite and ≥ 0.
    InvalidImmigration { index: usize, value: f64 },

    /// Branching weight must be finite and ≥ 0.
    InvalidBranching { row: usize, col: usize, value: f64 },

    /// Decay rate must be finite and > 0.
    InvalidDecayRate { value: f64 },

    /// Quantile threshold must lie in (0, 1).
    InvalidEpsilon { value: f64 },

    /// A mark-law or impact-function coordinate is outside its domain.
    InvalidMarkParam { family: &'static str, name: &'static str, value: f64, reason: &'static str },

    /// The impact normalizing constant is not finite.
    InvalidImpactNormalization { family: &'static str, value: f64 },

    /// Flat parameter slice has the wrong length for its target.
    LengthMismatch { expected: usize, actual: usize },

    /// Flat parameter entries must be finite.
    NonFiniteParam { index: usize, value: f64 },

    /// A component points at a leaf that does not exist.
    LeafIndexOutOfRange { kind: &'static str, component: usize, index: usize, len: usize },

    /// A leaf instance is not referenced by any component.
    UnusedLeaf { kind: &'static str, index: usize },

    /// Wrapper for statrs distribution constructor errors.
    DistributionRejected { family: &'static str, reason: String },
}

impl std::error::Error for ParamError {}

impl std::fmt::Display for ParamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamError::EmptyProcess => {
                write!(f, "A Hawkes process needs at least one component.")
            }
            ParamError::ComponentCountMismatch { expected, actual } => {
                write!(f, "Component count mismatch: expected {expected}, got {actual}")
            }
            ParamError::InvalidImmigration { index, value } => {
                write!(
                    f,
                    "Immigration intensity at index {index} must be finite and >= 0, got {value}"
                )
            }
            ParamError::InvalidBranching { row, col, value } => {
                write!(
                    f,
                    "Branching weight at ({row}, {col}) must be finite and >= 0, got {value}"
                )
            }
            ParamError::InvalidDecayRate { value } => {
                write!(f, "Decay rate must be finite and > 0, got {value}")
            }
            ParamError::InvalidEpsilon { value } => {
                write!(f, "Quantile threshold epsilon must lie in (0, 1), got {value}")
            }
            ParamError::InvalidMarkParam { family, name, value, reason } => {
                write!(f, "{family} parameter `{name}` is invalid; got: {value}. {reason}")
            }
            ParamError::InvalidImpactNormalization { family, value } => {
                write!(
                    f,
                    "{family} impact normalization must be finite, got {value}"
                )
            }
            ParamError::LengthMismatch { expected, actual } => {
                write!(f, "Parameter length mismatch: expected {expected}, got {actual}")
            }
            ParamError::NonFiniteParam { index, value } => {
                write!(f, "Parameter at index {index} must be finite, got {value}")
            }
            ParamError::LeafIndexOutOfRange { kind, component, index, len } => {
                write!(
                    f,
                    "Component {component} references {kind} {index}, but only {len} are defined"
                )
            }
            ParamError::UnusedLeaf { kind, index } => {
                write!(f, "{kind} {index} is not referenced by any component")
            }
            ParamError::DistributionRejected { family, reason } => {
                write!(f, "{family} distribution rejected its parameters: {reason}")
            }
        }
    }
}

/// Convert a [`ParamError`] into a Python `ValueError` with the error message.
#[cfg(feature = "python-bindings")]
impl std::convert::From<ParamError> for PyErr {
    fn from(err: ParamError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

impl From<ParetoError> for ParamError {
    fn from(err: ParetoError) -> ParamError {
        ParamError::DistributionRejected { family: "Pareto", reason: err.to_string() }
    }
}

impl From<ExpError> for ParamError {
    fn from(err: ExpError) -> ParamError {
        ParamError::DistributionRejected { family: "Exponential", reason: err.to_string() }
    }
}
