//! Decay kernels for Hawkes excitation.
//!
//! This module defines [`DecayKernel`], the time-domain weighting `w(t)` that
//! describes how an event's excitatory influence fades, together with its
//! cumulative form `W̄(t) = ∫₀ᵗ w(s) ds` and an effective-support quantile
//! `Q` beyond which `w` is treated as negligible.
//!
//! ## Supported kernels
//! - [`DecayKernel::Exponential`]: `w(t) = α e^{−αt}`, a probability density
//!   on `[0, ∞)` so that `W̄(t) → 1`.
//!
//! ## Numerics
//! - `Q = −ln(ε)/α` with `ε = 1e-5` by default; history scans skip events
//!   older than `Q`. This truncation is part of the intensity definition and
//!   is kept identical across evaluations.
//! - `W̄` is evaluated as `−expm1(−αt)` to avoid cancellation for small `t`.
use crate::hawkes::{
    core::{
        bounds::ParamBound,
        validation::{validate_decay_rate, validate_epsilon, validate_flat_params},
    },
    errors::ParamResult,
};

/// Default negligibility threshold for the kernel quantile.
pub const DEFAULT_EPSILON: f64 = 1e-5;

/// Decay kernel family.
///
/// All variants are densities on `[0, ∞)`; parameters are validated on
/// construction and on every `set_params`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DecayKernel {
    /// Exponential decay with rate α > 0 and quantile threshold ε ∈ (0, 1).
    Exponential {
        alpha: f64,
        epsilon: f64, // not a fitted parameter
    },
}

impl DecayKernel {
    /// Exponential kernel with the default threshold `ε = 1e-5`.
    ///
    /// # Errors
    /// Returns [`ParamError::InvalidDecayRate`](crate::hawkes::errors::ParamError::InvalidDecayRate)
    /// if `alpha` is not finite or ≤ 0.
    pub fn exponential(alpha: f64) -> ParamResult<Self> {
        DecayKernel::exponential_with_epsilon(alpha, DEFAULT_EPSILON)
    }

    /// Exponential kernel with an explicit quantile threshold.
    ///
    /// # Errors
    /// - `InvalidDecayRate` if `alpha` is not finite or ≤ 0.
    /// - `InvalidEpsilon` if `epsilon ∉ (0, 1)`.
    pub fn exponential_with_epsilon(alpha: f64, epsilon: f64) -> ParamResult<Self> {
        let alpha = validate_decay_rate(alpha)?;
        let epsilon = validate_epsilon(epsilon)?;
        Ok(DecayKernel::Exponential { alpha, epsilon })
    }

    /// Decay weight `w(t)`.
    #[inline]
    pub fn w(&self, t: f64) -> f64 {
        match self {
            DecayKernel::Exponential { alpha, .. } => alpha * (-alpha * t).exp(),
        }
    }

    /// Cumulative decay `W̄(t) = ∫₀ᵗ w(s) ds`.
    #[inline]
    pub fn w_bar(&self, t: f64) -> f64 {
        match self {
            DecayKernel::Exponential { alpha, .. } => -(-alpha * t).exp_m1(),
        }
    }

    /// Effective support `Q`: lags beyond this are ignored by history scans.
    #[inline]
    pub fn quantile(&self) -> f64 {
        match self {
            DecayKernel::Exponential { alpha, epsilon } => -epsilon.ln() / alpha,
        }
    }

    /// Number of fitted parameters.
    pub fn num_params(&self) -> usize {
        match self {
            DecayKernel::Exponential { .. } => 1,
        }
    }

    /// Optimizer bounds for the fitted parameters, in flat order.
    pub fn param_bounds(&self) -> Vec<ParamBound> {
        match self {
            DecayKernel::Exponential { .. } => vec![ParamBound::positive()],
        }
    }

    /// Append the fitted parameters to `out`, in flat order.
    pub fn write_params(&self, out: &mut Vec<f64>) {
        match self {
            DecayKernel::Exponential { alpha, .. } => out.push(*alpha),
        }
    }

    /// Overwrite the fitted parameters from a flat slice.
    ///
    /// The kernel is left unchanged when validation fails.
    ///
    /// # Errors
    /// - `LengthMismatch` / `NonFiniteParam` for a malformed slice.
    /// - `InvalidDecayRate` if the new rate is ≤ 0.
    pub fn set_params(&mut self, params: &[f64]) -> ParamResult<()> {
        validate_flat_params(params, self.num_params())?;
        match self {
            DecayKernel::Exponential { alpha, .. } => {
                *alpha = validate_decay_rate(params[0])?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hawkes::errors::ParamError;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Closed forms of w, W̄, and Q for the exponential kernel.
    // - Limits W̄(0) = 0, W̄(∞) → 1, and w ≥ 0.
    // - Flat-parameter get/set and validation.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // W̄(0) = 0, W̄(t) → 1 for large t, and w(t) ≥ 0 on a grid.
    //
    // Given
    // -----
    // - α = 0.015.
    //
    // Expect
    // ------
    // - Exact zero at 0, within 1e-12 of one at t = 1e4, w ≥ 0 everywhere.
    fn cumulative_limits_and_non_negative_weight() {
        // Arrange
        let kernel = DecayKernel::exponential(0.015).unwrap();

        // Act & Assert
        assert_eq!(kernel.w_bar(0.0), 0.0);
        assert_relative_eq!(kernel.w_bar(1e4), 1.0, epsilon = 1e-12);
        for i in 0..200 {
            let t = i as f64 * 10.0;
            assert!(kernel.w(t) >= 0.0);
        }
    }

    #[test]
    // Purpose
    // -------
    // Closed forms match α e^{−αt}, 1 − e^{−αt}, and −ln(ε)/α.
    //
    // Given
    // -----
    // - α = 0.5, t = 2.0, ε = 1e-5.
    //
    // Expect
    // ------
    // - Values within 1e-14 relative error.
    fn exponential_closed_forms() {
        // Arrange
        let alpha = 0.5;
        let kernel = DecayKernel::exponential(alpha).unwrap();

        // Act & Assert
        assert_relative_eq!(kernel.w(2.0), alpha * (-1.0_f64).exp(), max_relative = 1e-14);
        assert_relative_eq!(kernel.w_bar(2.0), 1.0 - (-1.0_f64).exp(), max_relative = 1e-14);
        assert_relative_eq!(kernel.quantile(), -(1e-5_f64).ln() / alpha, max_relative = 1e-14);
    }

    #[test]
    // Purpose
    // -------
    // W̄ is the integral of w: a midpoint rule over [0, 10] agrees with W̄(10).
    //
    // Given
    // -----
    // - α = 0.3 and 10_000 midpoint cells.
    //
    // Expect
    // ------
    // - Agreement to 1e-8.
    fn cumulative_is_integral_of_weight() {
        // Arrange
        let kernel = DecayKernel::exponential(0.3).unwrap();
        let cells = 10_000;
        let h = 10.0 / cells as f64;

        // Act
        let integral: f64 = (0..cells).map(|i| kernel.w((i as f64 + 0.5) * h) * h).sum();

        // Assert
        assert_relative_eq!(integral, kernel.w_bar(10.0), epsilon = 1e-8);
    }

    #[test]
    // Purpose
    // -------
    // Zero decay rate is a configuration error, both at construction and on set.
    //
    // Given
    // -----
    // - α = 0.0 at construction; a valid kernel updated with [0.0].
    //
    // Expect
    // ------
    // - `InvalidDecayRate` in both cases; the kernel keeps its old rate.
    fn zero_rate_is_rejected() {
        // Arrange
        let mut kernel = DecayKernel::exponential(1.0).unwrap();

        // Act
        let ctor = DecayKernel::exponential(0.0);
        let set = kernel.set_params(&[0.0]);

        // Assert
        assert_eq!(ctor, Err(ParamError::InvalidDecayRate { value: 0.0 }));
        assert_eq!(set, Err(ParamError::InvalidDecayRate { value: 0.0 }));
        assert_eq!(kernel, DecayKernel::exponential(1.0).unwrap());
    }

    #[test]
    // Purpose
    // -------
    // Flat parameters round-trip through `write_params` / `set_params`.
    //
    // Given
    // -----
    // - A kernel with α = 0.015 updated to α = 0.2.
    //
    // Expect
    // ------
    // - `write_params` yields [0.2]; ε is untouched.
    fn set_params_round_trips() {
        // Arrange
        let mut kernel = DecayKernel::exponential_with_epsilon(0.015, 1e-6).unwrap();

        // Act
        kernel.set_params(&[0.2]).unwrap();
        let mut out = Vec::new();
        kernel.write_params(&mut out);

        // Assert
        assert_eq!(out, vec![0.2]);
        assert_eq!(kernel.num_params(), 1);
        assert_eq!(kernel.param_bounds().len(), 1);
        assert_eq!(kernel, DecayKernel::Exponential { alpha: 0.2, epsilon: 1e-6 });
    }

    #[test]
    // Purpose
    // -------
    // The published lower bound of α is itself an accepted rate.
    //
    // Given
    // -----
    // - An exponential kernel set to its own lower bound.
    //
    // Expect
    // ------
    // - The bound is strictly positive and `set_params` accepts it; zero is
    //   still rejected.
    fn lower_bound_is_accepted_by_setter() {
        // Arrange
        let mut kernel = DecayKernel::exponential(1.0).unwrap();
        let lower = kernel.param_bounds()[0].lower.unwrap();

        // Act
        let at_bound = kernel.set_params(&[lower]);
        let at_zero = kernel.set_params(&[0.0]);

        // Assert
        assert!(lower > 0.0);
        assert_eq!(at_bound, Ok(()));
        assert_eq!(at_zero, Err(ParamError::InvalidDecayRate { value: 0.0 }));
        assert_eq!(kernel, DecayKernel::exponential(lower).unwrap());
    }
}
