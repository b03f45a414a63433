//! Argument conversion shared by the Python bindings.
//!
//! The mark-family parser and default leaf assignment are plain Rust so the
//! binding layer stays thin; the array extractors are compiled only with the
//! `python-bindings` feature.
use crate::hawkes::{
    core::{impact::ImpactFunction, marks::MarkDistribution},
    errors::{ParamError, ParamResult},
};

#[cfg(feature = "python-bindings")]
use ndarray::Array2;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::hawkes::core::events::EventHistory;

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1, PyReadonlyArray2,
};

/// Build a mark distribution from a family name and its flat parameters.
///
/// Families:
/// - `"pareto"`: `[mu, rho, alpha, beta, gamma]`, interaction impact
/// - `"pareto_liniger"`: same parameters, unit-mean Liniger impact
/// - `"void"`: `[]`
/// - `"exponential"` / `"exponential_poly"`: `[rate, alpha, beta, gamma]`
/// - `"exponential_gamma"`: `[rate, power]`
///
/// # Errors
/// - `LengthMismatch` for a wrong parameter count.
/// - `DistributionRejected` for an unknown family.
/// - Any construction error of the chosen family.
pub fn build_mark_distribution(family: &str, params: &[f64]) -> ParamResult<MarkDistribution> {
    let expect = |len: usize| {
        if params.len() == len {
            Ok(())
        } else {
            Err(ParamError::LengthMismatch { expected: len, actual: params.len() })
        }
    };
    match family.to_lowercase().as_str() {
        "pareto" => {
            expect(5)?;
            MarkDistribution::pareto(params[0], params[1], params[2], params[3], params[4])
        }
        "pareto_liniger" => {
            expect(5)?;
            MarkDistribution::pareto_liniger(params[0], params[1], params[2], params[3], params[4])
        }
        "void" => {
            expect(0)?;
            Ok(MarkDistribution::void())
        }
        "exponential" | "exponential_poly" => {
            expect(4)?;
            let impact = ImpactFunction::polynomial(params[1], params[2], params[3])?;
            MarkDistribution::exponential(params[0], impact)
        }
        "exponential_gamma" => {
            expect(2)?;
            MarkDistribution::exponential(params[0], ImpactFunction::gamma_power(params[1])?)
        }
        other => Err(ParamError::DistributionRejected {
            family: "mark",
            reason: format!(
                "unknown family {other:?} (expected 'pareto', 'pareto_liniger', 'void', \
                 'exponential_poly', or 'exponential_gamma')"
            ),
        }),
    }
}

/// Default component → pool assignment when the caller gives none.
///
/// A pool of `n` leaves is private per component; a pool of one leaf is
/// shared by all components.
///
/// # Errors
/// `ComponentCountMismatch` for any other pool size.
pub fn default_assignment(pool_len: usize, n: usize) -> ParamResult<Vec<usize>> {
    if pool_len == n {
        Ok((0..n).collect())
    } else if pool_len == 1 {
        Ok(vec![0; n])
    } else {
        Err(ParamError::ComponentCountMismatch { expected: n, actual: pool_len })
    }
}

#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64",
        )
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Copy a 1-D float input into a `Vec<f64>`.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_vec<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>, name: &str,
) -> PyResult<Vec<f64>> {
    let arr = extract_f64_array(py, raw_data)?;
    let slice = arr.as_slice().map_err(|_| {
        PyValueError::new_err(format!("{name} must be a 1-D contiguous float64 array or sequence"))
    })?;
    Ok(slice.to_vec())
}

/// Extract a 2-D float matrix from a numpy array or a nested
/// sequence.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_matrix<'py>(raw_data: &Bound<'py, PyAny>, name: &str) -> PyResult<Array2<f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray2<f64>>() {
        return Ok(arr_ro.as_array().to_owned());
    }

    let rows: Vec<Vec<f64>> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(format!(
            "{name} must be a 2-D numpy.ndarray or a sequence of float64 rows"
        ))
    })?;
    let n_cols = rows.first().map_or(0, Vec::len);
    if rows.iter().any(|row| row.len() != n_cols) {
        return Err(PyValueError::new_err(format!("{name} rows must all have the same length")));
    }
    let n_rows = rows.len();
    Array2::from_shape_vec((n_rows, n_cols), rows.into_iter().flatten().collect())
        .map_err(|e| PyValueError::new_err(format!("{name}: {e}")))
}

/// Build a validated [`EventHistory`] from Python time/component/mark
/// columns.
#[cfg(feature = "python-bindings")]
pub fn extract_history<'py>(
    py: Python<'py>, times: &Bound<'py, PyAny>, components: &Bound<'py, PyAny>,
    marks: &Bound<'py, PyAny>,
) -> PyResult<EventHistory> {
    let times = extract_f64_vec(py, times, "times")?;
    let marks = extract_f64_vec(py, marks, "marks")?;
    let components: Vec<usize> = components.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "components must be a 1-D array or sequence of non-negative integers",
        )
    })?;
    Ok(EventHistory::from_columns(&times, &components, &marks)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Every supported family name builds the matching distribution.
    //
    // Given
    // -----
    // - "pareto", "pareto_liniger", "void", "exponential_poly",
    //   "exponential_gamma" specs.
    //
    // Expect
    // ------
    // - The flat vectors written back; the two Pareto families differ only
    //   in their impact form.
    fn families_build_expected_distributions() {
        let cases: [(&str, &[f64]); 5] = [
            ("pareto", &[3.6, 5.6, 0.47, 0.22, 0.0]),
            ("pareto_liniger", &[4.2, 7.2, 1.1, 0.0, 0.0]),
            ("void", &[]),
            ("exponential_poly", &[2.0, 1.0, 0.5, 0.0]),
            ("Exponential_Gamma", &[2.0, 1.5]),
        ];
        for (family, params) in cases {
            let marks = build_mark_distribution(family, params).unwrap();
            let mut out = Vec::new();
            marks.write_params(&mut out);
            assert_eq!(out, params.to_vec(), "family {family}");
        }
        let liniger = build_mark_distribution("pareto_liniger", &[4.2, 7.2, 1.1, 0.0, 0.0]);
        assert!((liniger.unwrap().impact(2.0) - 1.0).abs() < 1e-12);
        let interaction = build_mark_distribution("pareto", &[4.2, 7.2, 1.1, 0.0, 0.0]);
        assert_eq!(interaction.unwrap().impact(2.0), 0.0);
    }

    #[test]
    // Purpose
    // -------
    // Unknown families and wrong parameter counts are rejected.
    //
    // Given
    // -----
    // - "lognormal" and a 4-parameter "pareto".
    //
    // Expect
    // ------
    // - `DistributionRejected` and `LengthMismatch { expected: 5, actual: 4 }`.
    fn invalid_specs_are_rejected() {
        assert!(matches!(
            build_mark_distribution("lognormal", &[1.0]),
            Err(ParamError::DistributionRejected { family: "mark", .. })
        ));
        assert_eq!(
            build_mark_distribution("pareto", &[1.0, 3.0, 1.0, 0.0]),
            Err(ParamError::LengthMismatch { expected: 5, actual: 4 })
        );
    }

    #[test]
    // Purpose
    // -------
    // Default assignments cover the private and fully shared cases only.
    //
    // Given
    // -----
    // - Pools of 3 and 1 leaves for 3 components, and a pool of 2.
    //
    // Expect
    // ------
    // - [0, 1, 2], [0, 0, 0], and `ComponentCountMismatch`.
    fn default_assignment_handles_private_and_shared_pools() {
        assert_eq!(default_assignment(3, 3), Ok(vec![0, 1, 2]));
        assert_eq!(default_assignment(1, 3), Ok(vec![0, 0, 0]));
        assert_eq!(
            default_assignment(2, 3),
            Err(ParamError::ComponentCountMismatch { expected: 3, actual: 2 })
        );
    }
}
