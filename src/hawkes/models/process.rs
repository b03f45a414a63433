//! HawkesProcess — the marked multivariate Hawkes aggregate.
//!
//! Purpose
//! -------
//! Wire the leaves of a Hawkes process together: one
//! [`ImmigrationBranching`] (ν, Q), one decay kernel per component, and one
//! mark distribution per component, with kernels and mark laws stored in
//! [`SharedLeaves`] so components may alias a single instance.
//!
//! Key behaviors
//! -------------
//! - [`HawkesProcess::new`] checks that every leaf collection agrees on the
//!   component count `n`.
//! - The engines are implemented as inherent methods in sibling modules:
//!   `intensity` (conditional intensity), `simulation` (Ogata thinning),
//!   `likelihood` (log-likelihood and compensator), and `parameters` (flat
//!   parameter surface for an external fitter).
//!
//! Invariants & assumptions
//! ------------------------
//! - `n ≥ 1` and the wiring (count, sharing) is fixed at construction.
//! - Parameters change only through [`HawkesProcess::set_params`], which
//!   needs `&mut self`; engine calls borrow `&self`, so a process cannot be
//!   mutated while a simulation or likelihood evaluation is in flight.
use crate::hawkes::{
    core::{
        arena::SharedLeaves, decay::DecayKernel, marks::MarkDistribution,
        params::ImmigrationBranching,
    },
    errors::{ParamError, ParamResult},
};

/// Marked multivariate Hawkes process with `n` components.
#[derive(Debug, Clone, PartialEq)]
pub struct HawkesProcess {
    pub(crate) params: ImmigrationBranching,
    pub(crate) kernels: SharedLeaves<DecayKernel>,
    pub(crate) marks: SharedLeaves<MarkDistribution>,
}

impl HawkesProcess {
    /// Assemble a process from validated leaves.
    ///
    /// # Errors
    /// `ComponentCountMismatch` if the kernel or mark assignment does not
    /// cover exactly `params.num_components()` components.
    pub fn new(
        params: ImmigrationBranching, kernels: SharedLeaves<DecayKernel>,
        marks: SharedLeaves<MarkDistribution>,
    ) -> ParamResult<Self> {
        let n = params.num_components();
        for actual in [kernels.num_components(), marks.num_components()] {
            if actual != n {
                return Err(ParamError::ComponentCountMismatch { expected: n, actual });
            }
        }
        Ok(HawkesProcess { params, kernels, marks })
    }

    /// Number of components `n`.
    pub fn num_components(&self) -> usize {
        self.params.num_components()
    }

    pub fn immigration_branching(&self) -> &ImmigrationBranching {
        &self.params
    }

    pub fn kernels(&self) -> &SharedLeaves<DecayKernel> {
        &self.kernels
    }

    pub fn marks(&self) -> &SharedLeaves<MarkDistribution> {
        &self.marks
    }

    /// Decay kernel of component `j`.
    #[inline]
    pub fn kernel(&self, j: usize) -> &DecayKernel {
        self.kernels.for_component(j)
    }

    /// Mark distribution of component `j`.
    #[inline]
    pub fn mark(&self, j: usize) -> &MarkDistribution {
        self.marks.for_component(j)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use ndarray::array;

    /// Two-component process with a shared exponential kernel (α = 0.015)
    /// and two Pareto mark laws.
    pub(crate) fn two_component_process() -> HawkesProcess {
        let params =
            ImmigrationBranching::new(array![0.021, 0.029], array![[0.61, 0.16], [0.60, 0.06]])
                .unwrap();
        let kernels = SharedLeaves::shared(DecayKernel::exponential(0.015).unwrap(), 2);
        let marks = SharedLeaves::per_component(vec![
            MarkDistribution::pareto(3.6, 5.6, 0.47, 0.22, 0.0).unwrap(),
            MarkDistribution::pareto(4.2, 7.2, 1.1, 0.0, 0.0).unwrap(),
        ]);
        HawkesProcess::new(params, kernels, marks).unwrap()
    }

    /// One-component process with void marks.
    pub(crate) fn univariate_process(nu: f64, q: f64, alpha: f64) -> HawkesProcess {
        HawkesProcess::new(
            ImmigrationBranching::new(array![nu], array![[q]]).unwrap(),
            SharedLeaves::shared(DecayKernel::exponential(alpha).unwrap(), 1),
            SharedLeaves::shared(MarkDistribution::void(), 1),
        )
        .unwrap()
    }
}
