//! Shared-leaf storage for per-component kernels and mark laws.
//!
//! Several components may share one decay kernel or one mark distribution.
//! [`SharedLeaves`] stores each distinct leaf once in a pool and maps every
//! component to a pool index, so that:
//! - updating a shared leaf is visible to every component assigned to it;
//! - the flat parameter vector contains one block per *distinct* leaf, in
//!   pool order, which is what deduplication means for an external fitter.
//!
//! Invariants
//! ----------
//! - `assignment.len() == n` (one entry per component).
//! - Every assignment indexes into the pool.
//! - Every pool entry is used by at least one component, so no parameter
//!   block is exposed that cannot affect the model.
use crate::hawkes::errors::{ParamError, ParamResult};

/// Pool of distinct leaves plus a component → pool-index assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct SharedLeaves<T> {
    pool: Vec<T>,
    assignment: Vec<usize>,
}

impl<T> SharedLeaves<T> {
    /// Validate a pool/assignment pair for `n` components.
    ///
    /// `kind` names the leaf type in error messages (e.g. `"kernel"`).
    ///
    /// # Errors
    /// - `ComponentCountMismatch` if `assignment.len() != n`.
    /// - `LeafIndexOutOfRange` for an assignment past the pool.
    /// - `UnusedLeaf` if some pool entry is never assigned.
    pub fn new(
        pool: Vec<T>, assignment: Vec<usize>, n: usize, kind: &'static str,
    ) -> ParamResult<Self> {
        if assignment.len() != n {
            let actual = assignment.len();
            return Err(ParamError::ComponentCountMismatch { expected: n, actual });
        }
        let mut used = vec![false; pool.len()];
        for (component, &index) in assignment.iter().enumerate() {
            match used.get_mut(index) {
                Some(flag) => *flag = true,
                None => {
                    return Err(ParamError::LeafIndexOutOfRange {
                        kind,
                        component,
                        index,
                        len: pool.len(),
                    });
                }
            }
        }
        if let Some(index) = used.iter().position(|&flag| !flag) {
            return Err(ParamError::UnusedLeaf { kind, index });
        }
        Ok(SharedLeaves { pool, assignment })
    }

    /// One private leaf per component.
    pub fn per_component(leaves: Vec<T>) -> Self {
        let assignment = (0..leaves.len()).collect();
        SharedLeaves { pool: leaves, assignment }
    }

    /// A single leaf shared by all `n` components.
    pub fn shared(leaf: T, n: usize) -> Self {
        SharedLeaves { pool: vec![leaf], assignment: vec![0; n] }
    }

    /// Leaf used by component `j`.
    ///
    /// # Panics
    /// Panics if `j` is not a valid component index.
    #[inline]
    pub fn for_component(&self, j: usize) -> &T {
        &self.pool[self.assignment[j]]
    }

    /// Distinct leaves in pool (flat-parameter) order.
    pub fn distinct(&self) -> &[T] {
        &self.pool
    }

    pub(crate) fn distinct_mut(&mut self) -> &mut [T] {
        &mut self.pool
    }

    /// Pool index per component.
    pub fn assignment(&self) -> &[usize] {
        &self.assignment
    }

    pub fn num_components(&self) -> usize {
        self.assignment.len()
    }
}
