//! Exact log-likelihood and compensator of a marked Hawkes process.
//!
//! Purpose
//! -------
//! Score an observed history under a [`HawkesProcess`]:
//!
//! ```text
//! ℓ = Σ_i log λ_{d_i}(t_i) + Σ_i log f_{d_i}(x_i) − Σ_j Λ_j
//! ```
//!
//! where `λ_d(t_i)` excludes the event at `t_i` itself, `f_d` is the mark
//! density, and the compensator of component `j` over `[t_first, t_last]` is
//!
//! ```text
//! Λ_j = ν_j (t_last − t_first) + Σ_{(s, k, x)} Q[j, k] · W̄_j(t_last − s) · g_k(x).
//! ```
//!
//! Key behaviors
//! -------------
//! - The observation window is implied by the history's first and last
//!   event times; there is no separate window argument.
//! - [`HawkesProcess::log_likelihood_terms`] returns the three sums
//!   separately as [`LikelihoodTerms`] and logs them at `debug` level.
//! - Domain violations are surfaced, never clamped: an intensity or mark
//!   density that is ≤ 0 (or not finite) at an observed event is an error.
//!
//! Invariants & assumptions
//! ------------------------
//! - Histories are validated before scoring: non-empty, finite, strictly
//!   increasing times, finite marks, components in range.
//! - The compensator uses the full cumulative kernel `W̄` for every event,
//!   while intensities use the truncated scan of `hawkes::models::intensity`.
use crate::hawkes::{
    core::{
        events::Event,
        validation::{validate_component, validate_history},
    },
    errors::{HawkesError, HawkesResult},
    models::process::HawkesProcess,
};
use tracing::debug;

/// The three additive pieces of a log-likelihood.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LikelihoodTerms {
    /// `Σ log λ_d(t)` over events.
    pub log_intensity: f64,
    /// `Σ log f_d(x)` over events.
    pub log_mark_density: f64,
    /// `Σ_j Λ_j` over components.
    pub compensator: f64,
}

impl LikelihoodTerms {
    /// `log_intensity + log_mark_density − compensator`.
    pub fn total(&self) -> f64 {
        self.log_intensity + self.log_mark_density - self.compensator
    }
}

impl HawkesProcess {
    /// Log-likelihood of `events`.
    ///
    /// # Errors
    /// See [`HawkesProcess::log_likelihood_terms`].
    pub fn log_likelihood(&self, events: &[Event]) -> HawkesResult<f64> {
        Ok(self.log_likelihood_terms(events)?.total())
    }

    /// Log-likelihood of `events`, split into its three sums.
    ///
    /// # Errors
    /// - `EmptyHistory`, `UnsortedHistory`, `NonFiniteEventTime`,
    ///   `NegativeEventTime`, `NonFiniteMark`, `ComponentOutOfRange` for an
    ///   invalid history.
    /// - `NonPositiveIntensity` if some `λ_d(t_i)` is ≤ 0 or not finite.
    /// - `NonPositiveMarkDensity` if some `f_d(x_i)` is ≤ 0 or not finite.
    pub fn log_likelihood_terms(&self, events: &[Event]) -> HawkesResult<LikelihoodTerms> {
        let n = self.num_components();
        validate_history(events, n)?;

        let mut log_intensity = 0.0;
        let mut log_mark_density = 0.0;
        for event in events {
            let d = event.component;
            let lambda = self.intensity(d, events, event.time, false)?;
            if !lambda.is_finite() || lambda <= 0.0 {
                return Err(HawkesError::NonPositiveIntensity {
                    component: d,
                    time: event.time,
                    value: lambda,
                });
            }
            log_intensity += lambda.ln();

            let density = self.mark(d).density(event.mark);
            if !density.is_finite() || density <= 0.0 {
                return Err(HawkesError::NonPositiveMarkDensity {
                    component: d,
                    mark: event.mark,
                    value: density,
                });
            }
            log_mark_density += density.ln();
        }
        let compensator = (0..n).map(|j| self.compensator_unchecked(j, events)).sum();

        let terms = LikelihoodTerms { log_intensity, log_mark_density, compensator };
        debug!(
            num_events = events.len(),
            log_intensity,
            log_mark_density,
            compensator,
            log_likelihood = terms.total(),
            "Hawkes log-likelihood"
        );
        Ok(terms)
    }

    /// Compensator `Λ_j` of component `j` over the history's own window.
    ///
    /// # Errors
    /// `ComponentOutOfRange` for `j ≥ n`, plus the history errors of
    /// [`HawkesProcess::log_likelihood_terms`].
    pub fn compensator(&self, j: usize, events: &[Event]) -> HawkesResult<f64> {
        let n = self.num_components();
        validate_component(j, n)?;
        validate_history(events, n)?;
        Ok(self.compensator_unchecked(j, events))
    }

    /// Requires a validated, non-empty history and `j < n`.
    fn compensator_unchecked(&self, j: usize, events: &[Event]) -> f64 {
        let (Some(first), Some(last)) = (events.first(), events.last()) else {
            return 0.0;
        };
        let kernel = self.kernel(j);
        let q = self.params.q();
        let excitation: f64 = events
            .iter()
            .map(|e| {
                let impact = self.mark(e.component).impact(e.mark);
                q[[j, e.component]] * kernel.w_bar(last.time - e.time) * impact
            })
            .sum();
        self.params.nu()[j] * (last.time - first.time) + excitation
    }
}
