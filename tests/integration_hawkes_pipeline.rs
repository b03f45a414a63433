//! Integration tests for the marked Hawkes simulate → score pipeline.
//!
//! Purpose
//! -------
//! - Validate the end-to-end flow on a realistic two-component process with
//!   a shared slow-decaying kernel and Pareto-distributed marks: build the
//!   leaves, simulate a long history, score a sub-window, and compare with a
//!   mismatched process.
//! - Exercise the flat-parameter surface the way an external fitter would.
//!
//! Coverage
//! --------
//! - `hawkes::core`: leaf construction, `SharedLeaves`, `EventHistory::window`.
//! - `hawkes::models`: `simulate`, `log_likelihood`, `log_likelihood_terms`,
//!   `compensator`, `params` / `set_params` / `initial_random_params`.
//!
//! Exclusions
//! ----------
//! - Closed-form checks of individual leaves and engines; those are covered
//!   by unit tests.
//! - Python bindings.
use ndarray::array;
use rust_hawkes::hawkes::{
    core::{
        arena::SharedLeaves, decay::DecayKernel, marks::MarkDistribution, options::SimOpts,
        params::ImmigrationBranching, random::RngSource,
    },
    models::process::HawkesProcess,
};

/// Two-component process with shared exponential decay α = 0.015 and
/// Pareto marks (3.6, 5.6, 0.47, 0.22, 0.0) and (4.2, 7.2, 1.1, 0.0, 0.0).
fn generating_process() -> HawkesProcess {
    HawkesProcess::new(
        ImmigrationBranching::new(array![0.021, 0.029], array![[0.61, 0.16], [0.60, 0.06]])
            .unwrap(),
        SharedLeaves::shared(DecayKernel::exponential(0.015).unwrap(), 2),
        pareto_marks(),
    )
    .unwrap()
}

/// Same mark laws, unrelated immigration, branching, and decay.
fn mismatched_process() -> HawkesProcess {
    HawkesProcess::new(
        ImmigrationBranching::new(array![0.5, 0.5], array![[0.01, 0.01], [0.01, 0.01]]).unwrap(),
        SharedLeaves::shared(DecayKernel::exponential(1.5).unwrap(), 2),
        pareto_marks(),
    )
    .unwrap()
}

fn pareto_marks() -> SharedLeaves<MarkDistribution> {
    SharedLeaves::per_component(vec![
        MarkDistribution::pareto(3.6, 5.6, 0.47, 0.22, 0.0).unwrap(),
        MarkDistribution::pareto(4.2, 7.2, 1.1, 0.0, 0.0).unwrap(),
    ])
}

#[test]
// Purpose
// -------
// Simulating 1000 events and scoring events 500..1000 gives a finite
// log-likelihood that beats a mismatched process.
//
// Given
// -----
// - The generating process, default `SimOpts` (seed 42).
// - A mismatched process with ν = [0.5, 0.5], Q ≡ 0.01, α = 1.5.
//
// Expect
// ------
// - 1000 strictly increasing events using both components.
// - Finite log-likelihood of the 500-event window.
// - The mismatched process scores the same window strictly lower.
fn simulated_window_scores_finite_and_beats_mismatched_process() {
    // Arrange
    let process = generating_process();
    let history = process.simulate(1000, &SimOpts::default()).unwrap();
    let window = history.window(500..1000);

    // Act
    let loglik = process.log_likelihood(&window).unwrap();
    let mismatched = mismatched_process().log_likelihood(&window).unwrap();

    // Assert
    assert_eq!(history.len(), 1000);
    assert!(history.windows(2).all(|pair| pair[0].time < pair[1].time));
    assert!(history.iter().any(|e| e.component == 0));
    assert!(history.iter().any(|e| e.component == 1));
    assert!(loglik.is_finite());
    assert!(mismatched.is_finite());
    assert!(loglik > mismatched, "generating {loglik} <= mismatched {mismatched}");
}

#[test]
// Purpose
// -------
// The likelihood decomposes into its three terms and the compensator term
// is the sum of per-component compensators.
//
// Given
// -----
// - A 400-event simulation with seed 11.
//
// Expect
// ------
// - `terms.total()` equals `log_likelihood`; compensator equals
//   `compensator(0) + compensator(1)`; all terms finite.
fn likelihood_terms_are_consistent() {
    // Arrange
    let process = generating_process();
    let history = process.simulate(400, &SimOpts::new(Some(11), None)).unwrap();

    // Act
    let terms = process.log_likelihood_terms(&history).unwrap();
    let total = process.log_likelihood(&history).unwrap();
    let per_component =
        process.compensator(0, &history).unwrap() + process.compensator(1, &history).unwrap();

    // Assert
    assert_eq!(terms.total(), total);
    assert!(terms.log_intensity.is_finite() && terms.log_mark_density.is_finite());
    assert!(terms.compensator > 0.0);
    assert!((terms.compensator - per_component).abs() <= 1e-9 * per_component);
}

#[test]
// Purpose
// -------
// A fitter-style loop over the flat vector behaves consistently: a random
// start is accepted, changes the likelihood, and restoring the original
// vector restores the original likelihood bit for bit.
//
// Given
// -----
// - A 300-event simulated history and a seeded random start.
//
// Expect
// ------
// - 17 parameters; a different likelihood at the random start; identical
//   likelihood and vector after restoring.
fn fitter_round_trip_restores_likelihood() {
    // Arrange
    let mut process = generating_process();
    let history = process.simulate(300, &SimOpts::new(Some(5), None)).unwrap();
    let original = process.params();
    let baseline = process.log_likelihood(&history).unwrap();
    let start = process.initial_random_params(&mut RngSource::seeded(Some(9)));

    // Act
    process.set_params(start.as_slice().unwrap()).unwrap();
    let perturbed = process.log_likelihood(&history).unwrap();
    process.set_params(original.as_slice().unwrap()).unwrap();
    let restored = process.log_likelihood(&history).unwrap();

    // Assert
    assert_eq!(process.num_params(), 17);
    assert_ne!(perturbed, baseline);
    assert_eq!(restored, baseline);
    assert_eq!(process.params(), original);
}
