//! Simulation of marked Hawkes processes by Ogata's modified thinning.
//!
//! Purpose
//! -------
//! Generate a synthetic [`EventHistory`] of a requested length from a
//! [`HawkesProcess`], threading an explicit [`RandomSource`] through every
//! draw so runs are reproducible and replayable.
//!
//! Key behaviors
//! -------------
//! - Each step proposes one candidate time per component by thinning:
//!   starting from the current clock τ with envelope
//!   `λ = λ_j(τ, include_simultaneous = true)`, repeatedly draw `E ~ Exp(1)`,
//!   advance `τ += E / λ`, evaluate `λ_new = λ_j(τ, include_simultaneous =
//!   false)`, draw `U ~ U(0, 1)`, and accept when `U · λ ≤ λ_new`; otherwise
//!   the envelope becomes `λ_new`.
//! - The earliest candidate wins (lowest component index on ties); its mark
//!   is drawn from the winner's mark law and the event is appended.
//!
//! Invariants & assumptions
//! ------------------------
//! - Draw order is fixed: components in index order, `E` then `U` per
//!   proposal, then the winner's mark. A [`ReplaySource`] therefore replays
//!   a simulation bit for bit.
//! - An envelope that is not finite and positive is a configuration error
//!   (`NonPositiveIntensity`), never an infinite loop. This covers a
//!   component with `ν_j = 0` and no live excitation.
//! - With `SimOpts::max_rejections = Some(m)`, more than `m` rejections for
//!   a single candidate yield `ThinningStalled`.
//! - Appended times strictly increase; a winning time that does not advance
//!   the clock yields `NonIncreasingTime`.
//!
//! Conventions
//! -----------
//! - The clock starts at `0.0` with an empty history.
//! - Candidates are computed sequentially against the frozen history of the
//!   current step.
//!
//! [`ReplaySource`]: crate::hawkes::core::random::ReplaySource
use crate::hawkes::{
    core::{
        events::{Event, EventHistory},
        options::SimOpts,
        random::{RandomSource, RngSource},
    },
    errors::{HawkesError, HawkesResult},
    models::process::HawkesProcess,
};
use tracing::{debug, trace};

impl HawkesProcess {
    /// Simulate `num_events` events with a `StdRng` seeded from `opts.seed`.
    ///
    /// # Errors
    /// See [`HawkesProcess::simulate_from`].
    pub fn simulate(&self, num_events: usize, opts: &SimOpts) -> HawkesResult<EventHistory> {
        let mut source = RngSource::seeded(opts.seed);
        self.simulate_from(num_events, &mut source, opts)
    }

    /// Simulate `num_events` events drawing from a caller-supplied source.
    ///
    /// `opts.seed` is ignored; `opts.max_rejections` applies.
    ///
    /// # Errors
    /// - `NonPositiveIntensity` if a thinning envelope is ≤ 0 or not finite.
    /// - `ThinningStalled` if the rejection cap is exceeded.
    /// - `NonIncreasingTime` if the winning time does not advance the clock.
    pub fn simulate_from<S: RandomSource + ?Sized>(
        &self, num_events: usize, source: &mut S, opts: &SimOpts,
    ) -> HawkesResult<EventHistory> {
        let n = self.num_components();
        let mut history = EventHistory::with_capacity(num_events);
        let mut clock = 0.0;

        for _ in 0..num_events {
            let mut winner = (0, self.candidate_time(0, &history, clock, source, opts)?);
            for j in 1..n {
                let candidate = self.candidate_time(j, &history, clock, source, opts)?;
                if candidate < winner.1 {
                    winner = (j, candidate);
                }
            }
            let (component, time) = winner;
            if time <= clock {
                return Err(HawkesError::NonIncreasingTime { previous: clock, candidate: time });
            }
            let mark = self.mark(component).sample(source);
            history.push(Event::new(time, component, mark))?;
            trace!(time, component, mark, "accepted event");
            clock = time;
        }

        debug!(
            num_events = history.len(),
            num_components = n,
            last_time = history.last_time(),
            "simulated Hawkes history"
        );
        Ok(history)
    }

    /// Thinning proposal for component `j` starting at `clock`.
    fn candidate_time<S: RandomSource + ?Sized>(
        &self, j: usize, history: &EventHistory, clock: f64, source: &mut S, opts: &SimOpts,
    ) -> HawkesResult<f64> {
        let mut tau = clock;
        let mut envelope = self.intensity(j, history, tau, true)?;
        let mut rejections = 0usize;
        loop {
            if !envelope.is_finite() || envelope <= 0.0 {
                return Err(HawkesError::NonPositiveIntensity {
                    component: j,
                    time: tau,
                    value: envelope,
                });
            }
            tau += source.exponential(1.0) / envelope;
            let lambda = self.intensity(j, history, tau, false)?;
            if source.uniform() * envelope <= lambda {
                return Ok(tau);
            }
            rejections += 1;
            if opts.max_rejections.is_some_and(|cap| rejections > cap) {
                return Err(HawkesError::ThinningStalled { component: j, rejections });
            }
            envelope = lambda;
        }
    }
}
