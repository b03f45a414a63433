//! Optimizer-facing box bounds for flat parameter coordinates.
//!
//! - [`ParamBound`] describes the admissible interval of one coordinate in
//!   the flat parameter vector exposed to an external fitter.
//!
//! Notes
//! -----
//! - Bounds are advisory metadata for the fitter; leaf setters still
//!   validate their own domains.
//! - A missing side (`None`) means unbounded on that side, matching the
//!   `(lower, None)` convention of box-constrained optimizers.
//! - Every published bound is closed and its endpoint is accepted by the
//!   leaf setter. Coordinates that must be strictly positive are floored at
//!   [`POSITIVE_FLOOR`].

/// Smallest value published as the lower bound of a strictly positive
/// coordinate (rates, locations).
pub const POSITIVE_FLOOR: f64 = 1e-8;

/// Closed box bound `[lower, upper]` for a single flat parameter.
///
/// Either side may be `None` (unbounded).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamBound {
    pub lower: Option<f64>,
    pub upper: Option<f64>,
}

impl ParamBound {
    /// Bound `[lower, ∞)`.
    pub const fn at_least(lower: f64) -> Self {
        ParamBound { lower: Some(lower), upper: None }
    }

    /// Bound `[0, ∞)`, used for intensities, weights, and impact
    /// coefficients.
    pub const fn non_negative() -> Self {
        ParamBound::at_least(0.0)
    }

    /// Bound `[POSITIVE_FLOOR, ∞)` for coordinates that must be > 0.
    pub const fn positive() -> Self {
        ParamBound::at_least(POSITIVE_FLOOR)
    }

    /// Whether `value` lies inside the bound (inclusive on both sides).
    pub fn contains(&self, value: f64) -> bool {
        self.lower.map_or(true, |lo| value >= lo) && self.upper.map_or(true, |hi| value <= hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // `contains` honours present sides and ignores absent ones.
    //
    // Given
    // -----
    // - `[2, ∞)` and `[0, ∞)`.
    //
    // Expect
    // ------
    // - Values below the lower side are rejected; large values accepted.
    fn contains_respects_lower_side_only() {
        // Arrange
        let shape = ParamBound::at_least(2.0);
        let rate = ParamBound::non_negative();

        // Act & Assert
        assert!(!shape.contains(1.5));
        assert!(shape.contains(2.0));
        assert!(shape.contains(1e9));
        assert!(rate.contains(0.0));
        assert!(!rate.contains(-1e-12));
        assert!(!ParamBound::positive().contains(0.0));
        assert!(ParamBound::positive().contains(POSITIVE_FLOOR));
    }
}
