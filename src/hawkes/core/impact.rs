//! Impact-function strategies for the exponential mark law.
//!
//! An impact function `g(x)` rescales the excitation contributed by an event
//! with mark `x`. [`ImpactFunction`] is injected into
//! [`ExponentialMarks`](crate::hawkes::core::marks::ExponentialMarks) at
//! construction and can be swapped independently of the outer law.
//!
//! Both strategies are normalized so that `E[g(X)] = 1` when
//! `X ~ Exp(rate)`, which keeps the branching matrix interpretable as
//! expected offspring counts:
//! - [`ImpactFunction::Polynomial`]:
//!   `g(x) = (α + βx + γx²) / (α + β/λ + 2γ/λ²)`; all-zero coefficients
//!   give `g ≡ 0`.
//! - [`ImpactFunction::GammaPower`]:
//!   `g(x) = (λx)^p / Γ(1 + p)`, using `E[X^p] = Γ(1 + p) / λ^p`.
use crate::hawkes::{
    core::{
        bounds::ParamBound,
        validation::{validate_flat_params, validate_non_negative_param},
    },
    errors::{ParamError, ParamResult},
};
use statrs::function::gamma;

/// Impact-function family for exponentially distributed marks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImpactFunction {
    /// Quadratic polynomial with three free, non-negative coefficients.
    Polynomial { alpha: f64, beta: f64, gamma: f64 },
    /// Power law `x^p` with a Gamma-function normalization, `p ≥ 0`.
    GammaPower { power: f64 },
}

impl ImpactFunction {
    /// Polynomial impact `α + βx + γx²` (coefficients validated ≥ 0).
    pub fn polynomial(alpha: f64, beta: f64, gamma: f64) -> ParamResult<Self> {
        Ok(ImpactFunction::Polynomial {
            alpha: validate_non_negative_param("Polynomial impact", "alpha", alpha)?,
            beta: validate_non_negative_param("Polynomial impact", "beta", beta)?,
            gamma: validate_non_negative_param("Polynomial impact", "gamma", gamma)?,
        })
    }

    /// Gamma-normalized power impact `x^p` (power validated ≥ 0).
    pub fn gamma_power(power: f64) -> ParamResult<Self> {
        Ok(ImpactFunction::GammaPower {
            power: validate_non_negative_param("Gamma-power impact", "power", power)?,
        })
    }

    /// Mark-independent impact (`g ≡ 1`): the polynomial with α = 1.
    pub const fn constant() -> Self {
        ImpactFunction::Polynomial { alpha: 1.0, beta: 0.0, gamma: 0.0 }
    }

    /// Normalizing constant `c` such that `g(x) = c · shape(x)` has unit
    /// mean under `Exp(rate)`.
    ///
    /// All-zero polynomial coefficients have an identically zero shape; the
    /// constant is then `0.0` and `g ≡ 0`.
    ///
    /// # Errors
    /// [`ParamError::InvalidImpactNormalization`] when the constant is not
    /// finite (e.g. a vanishing mean shape from underflowing coefficients).
    pub fn normalizer(&self, rate: f64) -> ParamResult<f64> {
        let (family, value) = match self {
            ImpactFunction::Polynomial { alpha, beta, gamma }
                if *alpha == 0.0 && *beta == 0.0 && *gamma == 0.0 =>
            {
                return Ok(0.0);
            }
            ImpactFunction::Polynomial { alpha, beta, gamma } => {
                let mean_shape = alpha + beta / rate + 2.0 * gamma / (rate * rate);
                ("Polynomial impact", 1.0 / mean_shape)
            }
            ImpactFunction::GammaPower { power } => {
                ("Gamma-power impact", (-gamma::ln_gamma(1.0 + power)).exp())
            }
        };
        if !value.is_finite() {
            return Err(ParamError::InvalidImpactNormalization { family, value });
        }
        Ok(value)
    }

    /// Unnormalized impact shape at mark `x` for the given `rate`.
    #[inline]
    pub fn shape(&self, x: f64, rate: f64) -> f64 {
        match self {
            ImpactFunction::Polynomial { alpha, beta, gamma } => alpha + beta * x + gamma * x * x,
            ImpactFunction::GammaPower { power } => (rate * x).powf(*power),
        }
    }

    pub fn num_params(&self) -> usize {
        match self {
            ImpactFunction::Polynomial { .. } => 3,
            ImpactFunction::GammaPower { .. } => 1,
        }
    }

    pub fn param_bounds(&self) -> Vec<ParamBound> {
        vec![ParamBound::non_negative(); self.num_params()]
    }

    pub fn write_params(&self, out: &mut Vec<f64>) {
        match self {
            ImpactFunction::Polynomial { alpha, beta, gamma } => {
                out.extend_from_slice(&[*alpha, *beta, *gamma])
            }
            ImpactFunction::GammaPower { power } => out.push(*power),
        }
    }

    /// Build the same strategy with new coefficients from a flat slice.
    pub fn with_params(&self, params: &[f64]) -> ParamResult<Self> {
        validate_flat_params(params, self.num_params())?;
        match self {
            ImpactFunction::Polynomial { .. } => {
                ImpactFunction::polynomial(params[0], params[1], params[2])
            }
            ImpactFunction::GammaPower { .. } => ImpactFunction::gamma_power(params[0]),
        }
    }
}
