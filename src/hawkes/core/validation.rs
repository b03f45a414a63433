//! Hawkes validation helpers — reusable checks for parameters, flat vectors,
//! and event histories.
//!
//! Purpose
//! -------
//! Centralize small, reusable validation routines used across the Hawkes
//! stack. These helpers enforce basic sanity checks for decay rates, mark-law
//! coordinates, immigration/branching entries, flat parameter slices, and
//! event histories, so constructors and engines can fail fast with
//! structured errors.
//!
//! Key behaviors
//! -------------
//! - Validate scalar leaf parameters (strict positivity / non-negativity,
//!   finiteness) and return the value on success.
//! - Validate immigration vectors and branching matrices elementwise.
//! - Validate flat parameter slices (length and finiteness) before they are
//!   split across leaves.
//! - Validate event histories: finite non-negative strictly increasing times,
//!   finite marks, and component indices within range.
//!
//! Invariants & assumptions
//! ------------------------
//! - Decay rates are finite and strictly positive; the quantile threshold
//!   lies in (0, 1).
//! - Immigration intensities and branching weights are finite and ≥ 0.
//! - Histories are time-sorted with no ties.
//!
//! Conventions
//! -----------
//! - Indices are 0-based. Validation functions return [`ParamResult`] or
//!   [`HawkesResult`] and never panic on invalid *inputs*.
//! - This module contains no I/O and no logging.
//!
//! Testing notes
//! -------------
//! - Unit tests exercise each helper on representative valid and invalid
//!   inputs, including zeros, NaNs, infinities, and off-by-one lengths.
use crate::hawkes::{
    core::events::Event,
    errors::{HawkesError, HawkesResult, ParamError, ParamResult},
};
use ndarray::{ArrayView1, ArrayView2};

/// Validate an exponential decay rate `α`.
///
/// Returns `Ok(alpha)` when `alpha` is finite and strictly positive, and
/// `Err(ParamError::InvalidDecayRate)` otherwise (α = 0 would divide by zero
/// in the quantile).
pub fn validate_decay_rate(alpha: f64) -> ParamResult<f64> {
    if !alpha.is_finite() || alpha <= 0.0 {
        return Err(ParamError::InvalidDecayRate { value: alpha });
    }
    Ok(alpha)
}

/// Validate the negligibility threshold `ε` used by the decay quantile.
///
/// Returns `Ok(epsilon)` when `0 < epsilon < 1`, and
/// `Err(ParamError::InvalidEpsilon)` otherwise.
pub fn validate_epsilon(epsilon: f64) -> ParamResult<f64> {
    if !epsilon.is_finite() || epsilon <= 0.0 || epsilon >= 1.0 {
        return Err(ParamError::InvalidEpsilon { value: epsilon });
    }
    Ok(epsilon)
}

/// Validate a mark-law coordinate that must be finite and strictly positive.
///
/// Parameters
/// ----------
/// - `family`: `&'static str`
///   Human-readable family name used in the error (e.g. `"Pareto"`).
/// - `name`: `&'static str`
///   Coordinate name (e.g. `"mu"`).
/// - `value`: `f64`
///   Candidate value.
///
/// Returns
/// -------
/// `ParamResult<f64>`
///   - `Ok(value)` if finite and > 0.
///   - `Err(ParamError::InvalidMarkParam)` with a reason otherwise.
pub fn validate_positive_param(
    family: &'static str, name: &'static str, value: f64,
) -> ParamResult<f64> {
    if !value.is_finite() {
        return Err(ParamError::InvalidMarkParam {
            family,
            name,
            value,
            reason: "Parameter must be finite.",
        });
    }
    if value <= 0.0 {
        return Err(ParamError::InvalidMarkParam {
            family,
            name,
            value,
            reason: "Parameter must be strictly positive.",
        });
    }
    Ok(value)
}

/// Validate a mark-law coordinate that must be finite and non-negative.
///
/// Same contract as [`validate_positive_param`] with `0.0` admitted.
pub fn validate_non_negative_param(
    family: &'static str, name: &'static str, value: f64,
) -> ParamResult<f64> {
    if !value.is_finite() {
        return Err(ParamError::InvalidMarkParam {
            family,
            name,
            value,
            reason: "Parameter must be finite.",
        });
    }
    if value < 0.0 {
        return Err(ParamError::InvalidMarkParam {
            family,
            name,
            value,
            reason: "Parameter must be non-negative.",
        });
    }
    Ok(value)
}

/// Validate a flat parameter slice against the expected length.
///
/// Returns `Err(ParamError::LengthMismatch)` if `params.len() != expected`
/// and `Err(ParamError::NonFiniteParam)` for the first NaN/±inf entry.
pub fn validate_flat_params(params: &[f64], expected: usize) -> ParamResult<()> {
    if params.len() != expected {
        return Err(ParamError::LengthMismatch { expected, actual: params.len() });
    }
    for (index, &value) in params.iter().enumerate() {
        if !value.is_finite() {
            return Err(ParamError::NonFiniteParam { index, value });
        }
    }
    Ok(())
}

/// Validate immigration intensities `ν` (finite, ≥ 0 elementwise).
pub fn validate_immigration(nu: ArrayView1<f64>) -> ParamResult<()> {
    for (index, &value) in nu.iter().enumerate() {
        if !value.is_finite() || value < 0.0 {
            return Err(ParamError::InvalidImmigration { index, value });
        }
    }
    Ok(())
}

/// Validate a branching matrix `Q` for `n` components.
///
/// Checks that `Q` is `n × n` and that each entry is finite and ≥ 0.
pub fn validate_branching(q: ArrayView2<f64>, n: usize) -> ParamResult<()> {
    let (rows, cols) = q.dim();
    if rows != n {
        return Err(ParamError::ComponentCountMismatch { expected: n, actual: rows });
    }
    if cols != n {
        return Err(ParamError::ComponentCountMismatch { expected: n, actual: cols });
    }
    for ((row, col), &value) in q.indexed_iter() {
        if !value.is_finite() || value < 0.0 {
            return Err(ParamError::InvalidBranching { row, col, value });
        }
    }
    Ok(())
}

/// Validate the structure of an event sequence.
///
/// Checks, in a single pass, that every time is finite and ≥ 0, every mark
/// is finite, and times are strictly increasing. Component indices are not
/// checked here because the sequence does not know the process size; see
/// [`validate_components`].
///
/// Errors
/// ------
/// - `HawkesError::NonFiniteEventTime`, `HawkesError::NegativeEventTime`,
///   `HawkesError::NonFiniteMark`, `HawkesError::UnsortedHistory`.
pub fn validate_events(events: &[Event]) -> HawkesResult<()> {
    let mut previous: Option<f64> = None;
    for (index, event) in events.iter().enumerate() {
        if !event.time.is_finite() {
            return Err(HawkesError::NonFiniteEventTime { index, value: event.time });
        }
        if event.time < 0.0 {
            return Err(HawkesError::NegativeEventTime { index, value: event.time });
        }
        if !event.mark.is_finite() {
            return Err(HawkesError::NonFiniteMark { index, value: event.mark });
        }
        if let Some(prev) = previous {
            if event.time <= prev {
                return Err(HawkesError::UnsortedHistory {
                    index,
                    previous: prev,
                    current: event.time,
                });
            }
        }
        previous = Some(event.time);
    }
    Ok(())
}

/// Validate that every event's component index lies in `[0, n)`.
pub fn validate_components(events: &[Event], n: usize) -> HawkesResult<()> {
    match events.iter().find(|e| e.component >= n) {
        Some(event) => {
            Err(HawkesError::ComponentOutOfRange { component: event.component, num_components: n })
        }
        None => Ok(()),
    }
}

/// Validate a history that is about to be scored.
///
/// Requires at least one event, the structural checks of
/// [`validate_events`], and component indices below `n`.
pub fn validate_history(events: &[Event], n: usize) -> HawkesResult<()> {
    if events.is_empty() {
        return Err(HawkesError::EmptyHistory);
    }
    validate_events(events)?;
    validate_components(events, n)
}

/// Validate a single component index against `n`.
pub fn validate_component(component: usize, n: usize) -> HawkesResult<usize> {
    if component >= n {
        return Err(HawkesError::ComponentOutOfRange { component, num_components: n });
    }
    Ok(component)
}
