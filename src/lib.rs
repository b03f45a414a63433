//! rust_hawkes — marked multivariate Hawkes processes with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the Hawkes engines to Python via the `_rust_hawkes` extension
//! module. When the `python-bindings` feature is enabled, this module defines
//! the Python-facing class and submodule used by the `rust_hawkes` package.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust module ([`hawkes`]) as the public crate surface.
//! - Define the `#[pyclass]` wrapper [`MarkedHawkesProcess`] and the
//!   `#[pymodule]` initializer for the `_rust_hawkes` Python extension.
//! - Register the `models` submodule under `rust_hawkes` so that dotted
//!   imports work as expected.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work is implemented in [`hawkes`]; this file performs
//!   only FFI glue, input conversion, and error mapping.
//! - Histories crossing the boundary are parallel `times`, `components`,
//!   `marks` columns and are validated into an
//!   [`EventHistory`](crate::hawkes::EventHistory) before use.
//!
//! Conventions
//! -----------
//! - Errors from the core (`HawkesError`, `ParamError`) are converted to
//!   Python `ValueError`s at the PyO3 boundary.
//! - Mark laws are described from Python as `(family, params)` pairs; see
//!   [`utils::build_mark_distribution`].
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend on [`hawkes`] (or `hawkes::prelude`) and
//!   can ignore the items guarded by the `python-bindings` feature.

pub mod hawkes;
pub mod utils;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray1};

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    hawkes::{
        core::{
            arena::SharedLeaves, decay::DecayKernel, options::SimOpts,
            params::ImmigrationBranching, random::RngSource,
        },
        errors::ParamError,
        models::process::HawkesProcess,
    },
    utils::{
        build_mark_distribution, default_assignment, extract_f64_matrix, extract_f64_vec,
        extract_history,
    },
};

/// Simulated history returned to Python as `(times, components, marks)`.
#[cfg(feature = "python-bindings")]
type PyHistoryColumns<'py> =
    (Bound<'py, PyArray1<f64>>, Bound<'py, PyArray1<usize>>, Bound<'py, PyArray1<f64>>);

/// MarkedHawkesProcess — Python-facing wrapper for [`HawkesProcess`].
///
/// Purpose
/// -------
/// Expose intensity evaluation, simulation, likelihood scoring, and the flat
/// parameter surface to Python while keeping the Rust invariants intact.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `MarkedHawkesProcess(nu, q, decay_rates, marks, kernel_assignment=None,
/// mark_assignment=None)`:
/// - `nu`: 1-D array-like of `n` immigration intensities.
/// - `q`: `n × n` branching matrix (numpy array or nested sequence).
/// - `decay_rates`: 1-D array-like of *distinct* exponential decay rates.
/// - `marks`: list of `(family, params)` pairs, one per distinct mark law.
/// - `kernel_assignment`, `mark_assignment`: optional component → pool
///   indices. When omitted, a pool of size `n` is private per component and
///   a pool of size 1 is shared.
///
/// Notes
/// -----
/// - Native Rust callers should use [`HawkesProcess`] directly.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_hawkes.models")]
pub struct MarkedHawkesProcess {
    pub inner: HawkesProcess,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl MarkedHawkesProcess {
    #[new]
    #[pyo3(
        signature = (nu, q, decay_rates, marks, kernel_assignment = None, mark_assignment = None),
        text_signature = "(nu, q, decay_rates, marks, /, kernel_assignment=None, \
                          mark_assignment=None)"
    )]
    pub fn new<'py>(
        py: Python<'py>, nu: &Bound<'py, PyAny>, q: &Bound<'py, PyAny>,
        decay_rates: &Bound<'py, PyAny>, marks: Vec<(String, Vec<f64>)>,
        kernel_assignment: Option<Vec<usize>>, mark_assignment: Option<Vec<usize>>,
    ) -> PyResult<Self> {
        let nu = extract_f64_vec(py, nu, "nu")?;
        let q = extract_f64_matrix(q, "q")?;
        let params = ImmigrationBranching::new(nu.into(), q)?;
        let n = params.num_components();

        let kernel_pool = extract_f64_vec(py, decay_rates, "decay_rates")?
            .into_iter()
            .map(DecayKernel::exponential)
            .collect::<Result<Vec<_>, ParamError>>()?;
        let kernel_assignment = match kernel_assignment {
            Some(assignment) => assignment,
            None => default_assignment(kernel_pool.len(), n)?,
        };
        let kernels = SharedLeaves::new(kernel_pool, kernel_assignment, n, "kernel")?;

        let mark_pool = marks
            .iter()
            .map(|(family, params)| build_mark_distribution(family, params))
            .collect::<Result<Vec<_>, ParamError>>()?;
        let mark_assignment = match mark_assignment {
            Some(assignment) => assignment,
            None => default_assignment(mark_pool.len(), n)?,
        };
        let marks = SharedLeaves::new(mark_pool, mark_assignment, n, "mark")?;

        Ok(MarkedHawkesProcess { inner: HawkesProcess::new(params, kernels, marks)? })
    }

    /// Number of components.
    #[getter]
    pub fn num_components(&self) -> usize {
        self.inner.num_components()
    }

    /// Conditional intensity of `component` at time `t` given a history.
    #[pyo3(signature = (component, t, times, components, marks, include_simultaneous = false))]
    pub fn intensity<'py>(
        &self, py: Python<'py>, component: usize, t: f64, times: &Bound<'py, PyAny>,
        components: &Bound<'py, PyAny>, marks: &Bound<'py, PyAny>, include_simultaneous: bool,
    ) -> PyResult<f64> {
        let history = extract_history(py, times, components, marks)?;
        Ok(self.inner.intensity(component, &history, t, include_simultaneous)?)
    }

    /// Compensator of `component` over the history's own time window.
    pub fn compensator<'py>(
        &self, py: Python<'py>, component: usize, times: &Bound<'py, PyAny>,
        components: &Bound<'py, PyAny>, marks: &Bound<'py, PyAny>,
    ) -> PyResult<f64> {
        let history = extract_history(py, times, components, marks)?;
        Ok(self.inner.compensator(component, &history)?)
    }

    /// Exact log-likelihood of a history.
    pub fn log_likelihood<'py>(
        &self, py: Python<'py>, times: &Bound<'py, PyAny>, components: &Bound<'py, PyAny>,
        marks: &Bound<'py, PyAny>,
    ) -> PyResult<f64> {
        let history = extract_history(py, times, components, marks)?;
        Ok(self.inner.log_likelihood(&history)?)
    }

    /// Simulate `num_events` events; returns `(times, components, marks)`.
    #[pyo3(signature = (num_events, seed = Some(42), max_rejections = None))]
    pub fn simulate<'py>(
        &self, py: Python<'py>, num_events: usize, seed: Option<u64>,
        max_rejections: Option<usize>,
    ) -> PyResult<PyHistoryColumns<'py>> {
        let opts = SimOpts::new(seed, max_rejections);
        let history = self.inner.simulate(num_events, &opts)?;
        Ok((
            history.times().into_pyarray(py),
            history.components().into_pyarray(py),
            history.marks().into_pyarray(py),
        ))
    }

    pub fn num_params(&self) -> usize {
        self.inner.num_params()
    }

    /// `(lower, upper)` per flat coordinate; `None` means unbounded.
    pub fn param_bounds(&self) -> Vec<(Option<f64>, Option<f64>)> {
        self.inner.param_bounds().iter().map(|b| (b.lower, b.upper)).collect()
    }

    pub fn params<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.inner.params().into_pyarray(py)
    }

    /// Overwrite every fitted parameter; unchanged on error.
    pub fn set_params<'py>(&mut self, py: Python<'py>, values: &Bound<'py, PyAny>) -> PyResult<()> {
        let values = extract_f64_vec(py, values, "values")?;
        Ok(self.inner.set_params(&values)?)
    }

    /// Random starting vector for a fitter.
    #[pyo3(signature = (seed = None))]
    pub fn initial_random_params<'py>(
        &self, py: Python<'py>, seed: Option<u64>,
    ) -> Bound<'py, PyArray1<f64>> {
        let mut source = RngSource::seeded(seed);
        self.inner.initial_random_params(&mut source).into_pyarray(py)
    }
}

/// _rust_hawkes — PyO3 module initializer for the Python extension.
///
/// Creates the `models` submodule, attaches it to `_rust_hawkes`, and
/// registers it in `sys.modules` as `rust_hawkes.models` so it is importable
/// via dotted paths.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_hawkes<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let models_mod = PyModule::new(_py, "models")?;
    models(_py, m, &models_mod)?;

    // Manually add submodules into sys.modules to allow for dot notation.
    _py.import("sys")?.getattr("modules")?.set_item("rust_hawkes.models", models_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn models<'py>(
    _py: Python, rust_hawkes: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<MarkedHawkesProcess>()?;
    rust_hawkes.add_submodule(m)?;
    Ok(())
}
