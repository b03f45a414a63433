//! Flat-parameter surface of a Hawkes process for an external fitter.
//!
//! Purpose
//! -------
//! Expose every fitted parameter of a [`HawkesProcess`] as one flat vector
//! with per-coordinate bounds, so a box-constrained optimizer can read,
//! perturb, and write parameters without knowing the leaf types.
//!
//! Layout
//! ------
//! Blocks appear in this order:
//! 1. immigration/branching: `ν` (n values), then `Q` row-major (n² values);
//! 2. one block per *distinct* decay kernel, in pool order;
//! 3. one block per *distinct* mark distribution, in pool order.
//!
//! A kernel or mark law shared by several components appears once, and
//! writing its block updates every component that uses it.
//! [`HawkesProcess::param_blocks`] reports the offsets.
//!
//! Invariants
//! ----------
//! - `params().len() == num_params() == param_bounds().len()`.
//! - [`HawkesProcess::set_params`] is transactional: the candidate is applied
//!   to a copy and swapped in only when every block validates.
use crate::hawkes::{
    core::{bounds::ParamBound, params::ImmigrationBranching, random::RandomSource},
    errors::{ParamError, ParamResult},
    models::process::HawkesProcess,
};
use ndarray::Array1;

/// Which leaf a flat parameter block belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamBlockKind {
    /// `ν` followed by `Q` row-major.
    ImmigrationBranching,
    /// Distinct decay kernel with the given pool index.
    Kernel(usize),
    /// Distinct mark distribution with the given pool index.
    Marks(usize),
}

/// Contiguous block `offset..offset + len` of the flat vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamBlock {
    pub kind: ParamBlockKind,
    pub offset: usize,
    pub len: usize,
}

impl ParamBlock {
    pub fn range(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.len
    }
}

impl HawkesProcess {
    /// Length of the flat parameter vector.
    pub fn num_params(&self) -> usize {
        self.param_blocks().iter().map(|block| block.len).sum()
    }

    /// Block layout of the flat parameter vector.
    pub fn param_blocks(&self) -> Vec<ParamBlock> {
        let mut blocks = Vec::new();
        let mut offset = 0;
        let mut push = |kind, len| {
            blocks.push(ParamBlock { kind, offset, len });
            offset += len;
        };
        push(ParamBlockKind::ImmigrationBranching, self.params.num_params());
        for (i, kernel) in self.kernels.distinct().iter().enumerate() {
            push(ParamBlockKind::Kernel(i), kernel.num_params());
        }
        for (i, marks) in self.marks.distinct().iter().enumerate() {
            push(ParamBlockKind::Marks(i), marks.num_params());
        }
        blocks
    }

    /// Per-coordinate optimizer bounds, aligned with [`HawkesProcess::params`].
    pub fn param_bounds(&self) -> Vec<ParamBound> {
        let mut bounds = self.params.param_bounds();
        for kernel in self.kernels.distinct() {
            bounds.extend(kernel.param_bounds());
        }
        for marks in self.marks.distinct() {
            bounds.extend(marks.param_bounds());
        }
        bounds
    }

    /// Current flat parameter vector.
    pub fn params(&self) -> Array1<f64> {
        let mut out = Vec::with_capacity(self.num_params());
        self.params.write_params(&mut out);
        for kernel in self.kernels.distinct() {
            kernel.write_params(&mut out);
        }
        for marks in self.marks.distinct() {
            marks.write_params(&mut out);
        }
        Array1::from(out)
    }

    /// Overwrite all fitted parameters from a flat vector.
    ///
    /// # Errors
    /// - `LengthMismatch` if `params.len() != num_params()`.
    /// - Any leaf validation error. The process is unchanged on error.
    pub fn set_params(&mut self, params: &[f64]) -> ParamResult<()> {
        let expected = self.num_params();
        if params.len() != expected {
            return Err(ParamError::LengthMismatch { expected, actual: params.len() });
        }
        let mut candidate = self.clone();
        for block in self.param_blocks() {
            let slice = &params[block.range()];
            match block.kind {
                ParamBlockKind::ImmigrationBranching => {
                    candidate.params =
                        ImmigrationBranching::from_flat(self.num_components(), slice)?;
                }
                ParamBlockKind::Kernel(i) => candidate.kernels.distinct_mut()[i].set_params(slice)?,
                ParamBlockKind::Marks(i) => candidate.marks.distinct_mut()[i].set_params(slice)?,
            }
        }
        *self = candidate;
        Ok(())
    }

    /// Random starting point for a fitter.
    ///
    /// Each coordinate is drawn uniformly from `(lower, lower + 1]`, with
    /// `lower = 0` for coordinates unbounded below. One uniform is drawn per
    /// coordinate, in flat order.
    pub fn initial_random_params<S: RandomSource + ?Sized>(&self, source: &mut S) -> Array1<f64> {
        self.param_bounds()
            .iter()
            .map(|bound| bound.lower.unwrap_or(0.0) + (1.0 - source.uniform()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hawkes::{
        core::{
            arena::SharedLeaves,
            bounds::POSITIVE_FLOOR,
            decay::DecayKernel,
            events::Event,
            impact::ImpactFunction,
            marks::MarkDistribution,
            random::{ReplaySource, RngSource},
        },
        models::process::test_support::two_component_process,
    };
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Block layout and parameter count with shared leaves.
    // - Get/set round trips that leave intensities and likelihoods unchanged.
    // - Propagation of shared-leaf updates and transactional failure.
    // - Random initial vectors respecting bounds.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // A shared kernel contributes one block; layout offsets are contiguous.
    //
    // Given
    // -----
    // - The two-component fixture (shared kernel, two Pareto laws).
    //
    // Expect
    // ------
    // - Blocks (IB, 6), (Kernel 0, 1), (Marks 0, 5), (Marks 1, 5); 17 params;
    //   the flat vector starts with ν, Q and the shared α.
    fn layout_deduplicates_shared_kernel() {
        // Arrange
        let process = two_component_process();

        // Act
        let blocks = process.param_blocks();
        let params = process.params();

        // Assert
        assert_eq!(
            blocks,
            vec![
                ParamBlock { kind: ParamBlockKind::ImmigrationBranching, offset: 0, len: 6 },
                ParamBlock { kind: ParamBlockKind::Kernel(0), offset: 6, len: 1 },
                ParamBlock { kind: ParamBlockKind::Marks(0), offset: 7, len: 5 },
                ParamBlock { kind: ParamBlockKind::Marks(1), offset: 12, len: 5 },
            ]
        );
        assert_eq!(process.num_params(), 17);
        assert_eq!(process.param_bounds().len(), 17);
        assert_eq!(
            params.slice(ndarray::s![..12]).to_vec(),
            vec![0.021, 0.029, 0.61, 0.16, 0.60, 0.06, 0.015, 3.6, 5.6, 0.47, 0.22, 0.0]
        );
        assert_eq!(process.param_bounds()[8], ParamBound::at_least(2.0 + POSITIVE_FLOOR));
    }

    #[test]
    // Purpose
    // -------
    // Writing back the current vector is a no-op for every engine output.
    //
    // Given
    // -----
    // - The two-component fixture and a 3-event history.
    //
    // Expect
    // ------
    // - Same flat vector, identical intensity and log-likelihood.
    fn round_trip_preserves_outputs() {
        // Arrange
        let mut process = two_component_process();
        let events = [Event::new(1.0, 0, 2.0), Event::new(4.0, 1, 0.5), Event::new(9.0, 0, 1.0)];
        let before = process.params();
        let lambda_before = process.intensity(1, &events, 12.0, false).unwrap();
        let loglik_before = process.log_likelihood(&events).unwrap();

        // Act
        process.set_params(before.as_slice().unwrap()).unwrap();

        // Assert
        assert_eq!(process.params(), before);
        assert_eq!(process.intensity(1, &events, 12.0, false).unwrap(), lambda_before);
        assert_eq!(process.log_likelihood(&events).unwrap(), loglik_before);
    }

    #[test]
    // Purpose
    // -------
    // Updating a shared kernel's block changes every component using it.
    //
    // Given
    // -----
    // - The two-component fixture with the α coordinate (offset 6) set to 0.3.
    //
    // Expect
    // ------
    // - Both components' kernels report α = 0.3.
    fn shared_kernel_update_propagates() {
        // Arrange
        let mut process = two_component_process();
        let mut params = process.params();
        params[6] = 0.3;

        // Act
        process.set_params(params.as_slice().unwrap()).unwrap();

        // Assert
        let expected = DecayKernel::exponential(0.3).unwrap();
        assert_eq!(*process.kernel(0), expected);
        assert_eq!(*process.kernel(1), expected);
    }

    #[test]
    // Purpose
    // -------
    // Invalid vectors leave the whole process unchanged.
    //
    // Given
    // -----
    // - The fixture updated with a short vector, and with a valid ν/Q block
    //   but a zero decay rate.
    //
    // Expect
    // ------
    // - `LengthMismatch` and `InvalidDecayRate`; the process equals the
    //   original, including its ν/Q block.
    fn set_params_is_transactional() {
        // Arrange
        let mut process = two_component_process();
        let original = process.clone();
        let mut params = process.params();
        params[0] = 0.5;
        params[6] = 0.0;

        // Act
        let short = process.set_params(&[0.1; 3]);
        let bad_rate = process.set_params(params.as_slice().unwrap());

        // Assert
        assert_eq!(short, Err(ParamError::LengthMismatch { expected: 17, actual: 3 }));
        assert_eq!(bad_rate, Err(ParamError::InvalidDecayRate { value: 0.0 }));
        assert_eq!(process, original);
    }

    #[test]
    // Purpose
    // -------
    // Per-component leaves and exponential marks extend the layout in pool
    // order.
    //
    // Given
    // -----
    // - 2 components, two kernels, one shared exponential law with a
    //   GammaPower impact.
    //
    // Expect
    // ------
    // - 6 + 1 + 1 + 2 = 10 params; setting the mark block updates the law.
    fn per_component_kernels_and_exponential_marks() {
        // Arrange
        let mut process = HawkesProcess::new(
            ImmigrationBranching::new(array![0.1, 0.2], array![[0.1, 0.0], [0.0, 0.1]]).unwrap(),
            SharedLeaves::per_component(vec![
                DecayKernel::exponential(1.0).unwrap(),
                DecayKernel::exponential(2.0).unwrap(),
            ]),
            SharedLeaves::shared(
                MarkDistribution::exponential(1.5, ImpactFunction::gamma_power(0.5).unwrap())
                    .unwrap(),
                2,
            ),
        )
        .unwrap();
        let mut params = process.params();

        // Act
        params[8] = 3.0;
        params[9] = 1.0;
        process.set_params(params.as_slice().unwrap()).unwrap();

        // Assert
        assert_eq!(process.num_params(), 10);
        assert_eq!(process.params().slice(ndarray::s![6..]).to_vec(), vec![1.0, 2.0, 3.0, 1.0]);
        assert_eq!(
            *process.mark(1),
            MarkDistribution::exponential(3.0, ImpactFunction::gamma_power(1.0).unwrap()).unwrap()
        );
    }

    #[test]
    // Purpose
    // -------
    // Random initial vectors lie in (lower, lower + 1] and are accepted by
    // `set_params`.
    //
    // Given
    // -----
    // - The two-component fixture and a seeded source; a replay source of
    //   uniform 0.0.
    //
    // Expect
    // ------
    // - Every coordinate within its window; the Pareto ρ coordinate above
    //   2; the replayed vector equals lower + 1 everywhere.
    fn initial_random_params_respect_bounds() {
        // Arrange
        let mut process = two_component_process();
        let bounds = process.param_bounds();
        let mut source = RngSource::seeded(Some(3));

        // Act
        let init = process.initial_random_params(&mut source);
        let ones = process.initial_random_params(&mut ReplaySource::new(vec![0.0], vec![]));

        // Assert
        for (value, bound) in init.iter().zip(&bounds) {
            let lower = bound.lower.unwrap_or(0.0);
            assert!(*value > lower && *value <= lower + 1.0);
        }
        assert!(init[8] > 2.0);
        assert_eq!(ones[8], 2.0 + POSITIVE_FLOOR + 1.0);
        assert_eq!(ones[0], 1.0);
        assert!(process.set_params(init.as_slice().unwrap()).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // A box-constrained fitter can sit on any lower bound: the vector of all
    // lower bounds is accepted.
    //
    // Given
    // -----
    // - The two-component fixture, and a process with per-component kernels,
    //   a polynomial exponential law, and a Liniger Pareto law.
    //
    // Expect
    // ------
    // - `set_params(lower)` succeeds and `params()` returns the bounds.
    fn lower_bound_vector_is_accepted() {
        // Arrange
        let mixed = HawkesProcess::new(
            ImmigrationBranching::new(array![0.1, 0.2], array![[0.1, 0.2], [0.3, 0.1]]).unwrap(),
            SharedLeaves::per_component(vec![
                DecayKernel::exponential(1.0).unwrap(),
                DecayKernel::exponential(2.0).unwrap(),
            ]),
            SharedLeaves::per_component(vec![
                MarkDistribution::exponential(1.5, ImpactFunction::constant()).unwrap(),
                MarkDistribution::pareto_liniger(3.6, 5.6, 0.47, 0.22, 0.1).unwrap(),
            ]),
        )
        .unwrap();

        for mut process in [two_component_process(), mixed] {
            let lower: Vec<f64> =
                process.param_bounds().iter().map(|b| b.lower.unwrap()).collect();

            // Act
            let result = process.set_params(&lower);

            // Assert
            assert_eq!(result, Ok(()));
            assert_eq!(process.params().to_vec(), lower);
        }
    }
}
