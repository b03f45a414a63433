//! Immigration and branching parameters for multivariate Hawkes processes.
//!
//! Purpose
//! -------
//! Hold the baseline (immigration) intensities `ν ∈ ℝⁿ` and the branching
//! matrix `Q ∈ ℝⁿˣⁿ`, where `Q[j, k]` is the expected number of direct
//! offspring in component `j` triggered by one event of component `k`.
//!
//! Key behaviors
//! -------------
//! - [`ImmigrationBranching::new`] validates shapes and non-negativity.
//! - Flat get/set uses the layout `[ν₀, …, ν_{n−1}, Q₀₀, Q₀₁, …, Q_{n−1,n−1}]`
//!   (ν first, then `Q` row-major), which is the prefix of every process'
//!   flat parameter vector.
//!
//! Invariants & assumptions
//! ------------------------
//! - `n ≥ 1`; `ν` has length `n`; `Q` is `n × n`.
//! - All entries are finite and ≥ 0. Stationarity (spectral radius of `Q`
//!   below one) is *not* enforced; supercritical configurations are legal
//!   and simply explode under simulation.
use crate::hawkes::{
    core::{
        bounds::ParamBound,
        validation::{validate_branching, validate_flat_params, validate_immigration},
    },
    errors::{ParamError, ParamResult},
};
use ndarray::{Array1, Array2};

/// Baseline intensities `ν` and branching matrix `Q`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImmigrationBranching {
    nu: Array1<f64>,
    q: Array2<f64>,
}

impl ImmigrationBranching {
    /// Validate and store `ν` and `Q`.
    ///
    /// # Errors
    /// - `EmptyProcess` if `ν` is empty.
    /// - `ComponentCountMismatch` if `Q` is not `n × n`.
    /// - `InvalidImmigration` / `InvalidBranching` for negative or
    ///   non-finite entries.
    pub fn new(nu: Array1<f64>, q: Array2<f64>) -> ParamResult<Self> {
        let n = nu.len();
        if n == 0 {
            return Err(ParamError::EmptyProcess);
        }
        validate_immigration(nu.view())?;
        validate_branching(q.view(), n)?;
        Ok(ImmigrationBranching { nu, q })
    }

    /// Build from a flat slice of length `n + n²` in `[ν, vec_row(Q)]` order.
    pub fn from_flat(n: usize, params: &[f64]) -> ParamResult<Self> {
        if n == 0 {
            return Err(ParamError::EmptyProcess);
        }
        validate_flat_params(params, Self::num_params_for(n))?;
        let nu = Array1::from(params[..n].to_vec());
        let q = Array2::from_shape_vec((n, n), params[n..].to_vec())
            .map_err(|_| ParamError::LengthMismatch { expected: n * n, actual: params.len() - n })?;
        ImmigrationBranching::new(nu, q)
    }

    /// Flat parameter count `n + n²` for `n` components.
    pub const fn num_params_for(n: usize) -> usize {
        n + n * n
    }

    pub fn num_components(&self) -> usize {
        self.nu.len()
    }

    pub fn num_params(&self) -> usize {
        Self::num_params_for(self.num_components())
    }

    /// Immigration intensities `ν`.
    pub fn nu(&self) -> &Array1<f64> {
        &self.nu
    }

    /// Branching matrix `Q` (`Q[j, k]`: offspring in `j` per event in `k`).
    pub fn q(&self) -> &Array2<f64> {
        &self.q
    }

    /// Every coordinate is bounded below by zero.
    pub fn param_bounds(&self) -> Vec<ParamBound> {
        vec![ParamBound::non_negative(); self.num_params()]
    }

    /// Append `[ν, vec_row(Q)]` to `out`.
    pub fn write_params(&self, out: &mut Vec<f64>) {
        out.extend(self.nu.iter().copied());
        out.extend(self.q.iter().copied());
    }

    /// Overwrite `ν` and `Q` from a flat slice; unchanged on error.
    pub fn set_params(&mut self, params: &[f64]) -> ParamResult<()> {
        *self = ImmigrationBranching::from_flat(self.num_components(), params)?;
        Ok(())
    }
}
