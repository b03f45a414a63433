//! Conditional intensity of a marked Hawkes process.
//!
//! For component `j` at time `t`,
//!
//! ```text
//! λ_j(t) = ν_j + Σ_{(s, k, x) : 0 ≤ t − s ≤ Q_j} Q[j, k] · w_j(t − s) · g_k(x)
//! ```
//!
//! where `Q_j` is the effective support of component `j`'s kernel. Events at
//! exactly `t` contribute only when `include_simultaneous` is set; the
//! likelihood and the thinning acceptance test score a time without its own
//! event, while the thinning envelope at the current clock includes it.
//!
//! The history is assumed sorted by time. The scan starts at the last event
//! with `s ≤ t` and walks backward, stopping at the first event older than
//! `Q_j`; on a sorted history this visits exactly the events inside the
//! truncation window.
use crate::hawkes::{
    core::{events::Event, validation::validate_component},
    errors::HawkesResult,
    models::process::HawkesProcess,
};

impl HawkesProcess {
    /// Conditional intensity `λ_j(t | history)`.
    ///
    /// # Errors
    /// `ComponentOutOfRange` if `j` or the component of any event inside the
    /// truncation window is `≥ n`.
    pub fn intensity(
        &self, j: usize, events: &[Event], t: f64, include_simultaneous: bool,
    ) -> HawkesResult<f64> {
        let n = self.num_components();
        validate_component(j, n)?;
        let kernel = self.kernel(j);
        let support = kernel.quantile();
        let q = self.params.q();

        let end = events.partition_point(|e| e.time <= t);
        let mut lambda = self.params.nu()[j];
        for event in events[..end].iter().rev() {
            let lag = t - event.time;
            if lag > support {
                break;
            }
            if lag < 0.0 || (lag == 0.0 && !include_simultaneous) {
                continue;
            }
            let k = validate_component(event.component, n)?;
            lambda += q[[j, k]] * kernel.w(lag) * self.mark(k).impact(event.mark);
        }
        Ok(lambda)
    }
}
