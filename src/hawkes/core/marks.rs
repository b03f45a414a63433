//! Mark distributions for marked Hawkes processes.
//!
//! This module defines [`MarkDistribution`], the law of the mark attached to
//! each event of a component, together with the component's impact function
//! `g(x)` that rescales the excitation an event contributes to other
//! components.
//!
//! ## Supported distributions
//! - [`MarkDistribution::Pareto`]: shifted Pareto (Lomax) marks on `[0, ∞)`
//!   with location μ, shape ρ, and a quadratic impact scaled by the Liniger
//!   constant. The default [`ParetoImpactForm::Interaction`] polynomial is
//!   `αβx + γx²`; [`ParetoImpactForm::Liniger`] uses `α + βx + γx²`, which
//!   has unit mean. Finite mean/variance require ρ > 2; this is published as
//!   a parameter bound, not enforced at construction.
//! - [`MarkDistribution::Void`]: degenerate law for components whose marks
//!   carry no information; every query returns `1.0`.
//! - [`MarkDistribution::Exponential`]: exponential marks with rate λ and an
//!   injected [`ImpactFunction`] strategy.
//!
//! ## Numerics
//! - Densities and CDFs delegate to `statrs` (`Pareto` on the shifted
//!   variable `x + μ`, `Exp` directly); the `statrs` law is rebuilt whenever
//!   parameters change, so queries are infallible.
//! - Impact normalizing constants are computed once per parameter update and
//!   validated finite. An identically zero impact polynomial gives `g ≡ 0`.
//! - Sampling uses a single uniform draw through the inverse CDF.
use crate::hawkes::{
    core::{
        bounds::{POSITIVE_FLOOR, ParamBound},
        impact::ImpactFunction,
        random::RandomSource,
        validation::{validate_flat_params, validate_non_negative_param, validate_positive_param},
    },
    errors::{ParamError, ParamResult},
};
use statrs::distribution::{Continuous, ContinuousCDF, Exp, Pareto};

const PARETO: &str = "Pareto";
const EXPONENTIAL: &str = "Exponential";

/// Polynomial in the mark used by the Pareto impact function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParetoImpactForm {
    /// `αβx + γx²`.
    #[default]
    Interaction,
    /// `α + βx + γx²`; the impact then has unit mean for ρ > 2.
    Liniger,
}

impl ParetoImpactForm {
    fn polynomial(self, alpha: f64, beta: f64, gamma: f64, x: f64) -> f64 {
        match self {
            ParetoImpactForm::Interaction => alpha * beta * x + gamma * x * x,
            ParetoImpactForm::Liniger => alpha + beta * x + gamma * x * x,
        }
    }

    fn vanishes(self, alpha: f64, beta: f64, gamma: f64) -> bool {
        gamma == 0.0
            && match self {
                ParetoImpactForm::Interaction => alpha == 0.0 || beta == 0.0,
                ParetoImpactForm::Liniger => alpha == 0.0 && beta == 0.0,
            }
    }
}

/// Shifted-Pareto mark law with a scaled quadratic impact function.
///
/// Density `f(x) = ρ μ^ρ / (x + μ)^{ρ+1}` and CDF
/// `F(x) = 1 − (μ / (x + μ))^ρ` on `x ≥ 0`. The impact function is
///
/// ```text
/// g(x) = (ρ−1)(ρ−2) / (α(ρ−1)(ρ−2) + βμ(ρ−2) + 2γμ²) · p(x)
/// ```
///
/// with `p(x) = αβx + γx²` for [`ParetoImpactForm::Interaction`] and
/// `p(x) = α + βx + γx²` for [`ParetoImpactForm::Liniger`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParetoMarks {
    mu: f64,
    rho: f64,
    alpha: f64,
    beta: f64,
    gamma: f64,
    form: ParetoImpactForm,
    law: Pareto,
    impact_scale: f64,
}

impl ParetoMarks {
    /// Construct a validated shifted-Pareto law with the interaction impact.
    ///
    /// # Errors
    /// See [`ParetoMarks::with_form`].
    pub fn new(mu: f64, rho: f64, alpha: f64, beta: f64, gamma: f64) -> ParamResult<Self> {
        ParetoMarks::with_form(ParetoImpactForm::Interaction, mu, rho, alpha, beta, gamma)
    }

    /// Construct a validated shifted-Pareto law with an explicit impact form.
    ///
    /// # Errors
    /// - `InvalidMarkParam` if μ or ρ is not finite and > 0, or if any impact
    ///   coefficient is negative or non-finite.
    /// - `InvalidImpactNormalization` if the impact constant is not finite
    ///   (e.g. ρ = 2 with γ = 0 and a non-vanishing polynomial).
    pub fn with_form(
        form: ParetoImpactForm, mu: f64, rho: f64, alpha: f64, beta: f64, gamma: f64,
    ) -> ParamResult<Self> {
        let mu = validate_positive_param(PARETO, "mu", mu)?;
        let rho = validate_positive_param(PARETO, "rho", rho)?;
        let alpha = validate_non_negative_param(PARETO, "alpha", alpha)?;
        let beta = validate_non_negative_param(PARETO, "beta", beta)?;
        let gamma = validate_non_negative_param(PARETO, "gamma", gamma)?;
        let law = Pareto::new(mu, rho)?;
        let impact_scale = if form.vanishes(alpha, beta, gamma) {
            0.0
        } else {
            pareto_impact_scale(mu, rho, alpha, beta, gamma)?
        };
        Ok(ParetoMarks { mu, rho, alpha, beta, gamma, form, law, impact_scale })
    }

    pub fn form(&self) -> ParetoImpactForm {
        self.form
    }

    pub fn mu(&self) -> f64 {
        self.mu
    }

    pub fn rho(&self) -> f64 {
        self.rho
    }

    /// Impact coefficients `(α, β, γ)`.
    pub fn impact_coefficients(&self) -> (f64, f64, f64) {
        (self.alpha, self.beta, self.gamma)
    }

    fn density(&self, x: f64) -> f64 {
        self.law.pdf(x + self.mu)
    }

    fn cdf(&self, x: f64) -> f64 {
        self.law.cdf(x + self.mu)
    }

    fn inverse_cdf(&self, u: f64) -> f64 {
        self.mu * ((1.0 - u).powf(-1.0 / self.rho) - 1.0)
    }

    fn impact(&self, x: f64) -> f64 {
        self.impact_scale * self.form.polynomial(self.alpha, self.beta, self.gamma, x)
    }
}

fn pareto_impact_scale(mu: f64, rho: f64, alpha: f64, beta: f64, gamma: f64) -> ParamResult<f64> {
    let numerator = (rho - 1.0) * (rho - 2.0);
    let denominator = alpha * numerator + beta * mu * (rho - 2.0) + 2.0 * gamma * mu * mu;
    let value = numerator / denominator;
    if !value.is_finite() {
        return Err(ParamError::InvalidImpactNormalization { family: PARETO, value });
    }
    Ok(value)
}

/// Exponential mark law with a pluggable impact strategy.
///
/// Density `f(x) = λ e^{−λx}`, CDF `F(x) = 1 − e^{−λx}`; the impact function
/// is `c · shape(x)` where `shape` and the unit-mean constant `c` come from
/// the injected [`ImpactFunction`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialMarks {
    law: Exp,
    impact: ImpactFunction,
    impact_scale: f64,
}

impl ExponentialMarks {
    /// Construct a validated exponential law with the given impact strategy.
    ///
    /// # Errors
    /// - `InvalidMarkParam` if `rate` is not finite and > 0.
    /// - `InvalidImpactNormalization` if the impact cannot be normalized.
    pub fn new(rate: f64, impact: ImpactFunction) -> ParamResult<Self> {
        let rate = validate_positive_param(EXPONENTIAL, "rate", rate)?;
        let law = Exp::new(rate)?;
        let impact_scale = impact.normalizer(rate)?;
        Ok(ExponentialMarks { law, impact, impact_scale })
    }

    pub fn rate(&self) -> f64 {
        self.law.rate()
    }

    pub fn impact_function(&self) -> &ImpactFunction {
        &self.impact
    }

    /// Same rate with a different impact strategy.
    pub fn with_impact(&self, impact: ImpactFunction) -> ParamResult<Self> {
        ExponentialMarks::new(self.rate(), impact)
    }

    fn inverse_cdf(&self, u: f64) -> f64 {
        -(-u).ln_1p() / self.rate()
    }

    fn impact(&self, x: f64) -> f64 {
        self.impact_scale * self.impact.shape(x, self.rate())
    }
}

/// Mark distribution family attached to each component.
///
/// Queries (`density`, `cdf`, `impact`, `sample`) are infallible because
/// parameters are validated on construction and on every `set_params`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarkDistribution {
    /// Shifted-Pareto marks (5 parameters: μ, ρ, α, β, γ).
    Pareto(ParetoMarks),
    /// Uninformative marks (0 parameters); every query returns 1.0.
    Void,
    /// Exponential marks (1 + impact parameters).
    Exponential(ExponentialMarks),
}

impl MarkDistribution {
    /// Shifted-Pareto marks with the interaction impact; see
    /// [`ParetoMarks::new`].
    pub fn pareto(mu: f64, rho: f64, alpha: f64, beta: f64, gamma: f64) -> ParamResult<Self> {
        Ok(MarkDistribution::Pareto(ParetoMarks::new(mu, rho, alpha, beta, gamma)?))
    }

    /// Shifted-Pareto marks with the unit-mean Liniger impact.
    pub fn pareto_liniger(
        mu: f64, rho: f64, alpha: f64, beta: f64, gamma: f64,
    ) -> ParamResult<Self> {
        let form = ParetoImpactForm::Liniger;
        Ok(MarkDistribution::Pareto(ParetoMarks::with_form(form, mu, rho, alpha, beta, gamma)?))
    }

    /// Uninformative marks.
    pub const fn void() -> Self {
        MarkDistribution::Void
    }

    /// Exponential marks; see [`ExponentialMarks::new`].
    pub fn exponential(rate: f64, impact: ImpactFunction) -> ParamResult<Self> {
        Ok(MarkDistribution::Exponential(ExponentialMarks::new(rate, impact)?))
    }

    /// Draw a mark using one uniform draw (none for `Void`).
    pub fn sample<S: RandomSource + ?Sized>(&self, source: &mut S) -> f64 {
        match self {
            MarkDistribution::Void => 1.0,
            _ => self.inverse_cdf(source.uniform()),
        }
    }

    /// Inverse CDF at `u ∈ [0, 1)`.
    pub fn inverse_cdf(&self, u: f64) -> f64 {
        match self {
            MarkDistribution::Pareto(p) => p.inverse_cdf(u),
            MarkDistribution::Void => 1.0,
            MarkDistribution::Exponential(e) => e.inverse_cdf(u),
        }
    }

    /// Mark density `f(x)`.
    pub fn density(&self, x: f64) -> f64 {
        match self {
            MarkDistribution::Pareto(p) => p.density(x),
            MarkDistribution::Void => 1.0,
            MarkDistribution::Exponential(e) => e.law.pdf(x),
        }
    }

    /// Mark CDF `F(x)`.
    pub fn cdf(&self, x: f64) -> f64 {
        match self {
            MarkDistribution::Pareto(p) => p.cdf(x),
            MarkDistribution::Void => 1.0,
            MarkDistribution::Exponential(e) => e.law.cdf(x),
        }
    }

    /// Impact function `g(x)`.
    #[inline]
    pub fn impact(&self, x: f64) -> f64 {
        match self {
            MarkDistribution::Pareto(p) => p.impact(x),
            MarkDistribution::Void => 1.0,
            MarkDistribution::Exponential(e) => e.impact(x),
        }
    }

    /// Number of fitted parameters.
    pub fn num_params(&self) -> usize {
        match self {
            MarkDistribution::Pareto(_) => 5,
            MarkDistribution::Void => 0,
            MarkDistribution::Exponential(e) => 1 + e.impact.num_params(),
        }
    }

    /// Optimizer bounds in flat order.
    ///
    /// Pareto: `μ ≥ POSITIVE_FLOOR`, `ρ ≥ 2 + POSITIVE_FLOOR`,
    /// `α, β, γ ≥ 0`. Exponential: `λ ≥ POSITIVE_FLOOR` followed by the
    /// impact strategy's bounds. Every lower endpoint is accepted by
    /// `set_params`.
    pub fn param_bounds(&self) -> Vec<ParamBound> {
        match self {
            MarkDistribution::Pareto(_) => vec![
                ParamBound::positive(),
                ParamBound::at_least(2.0 + POSITIVE_FLOOR),
                ParamBound::non_negative(),
                ParamBound::non_negative(),
                ParamBound::non_negative(),
            ],
            MarkDistribution::Void => Vec::new(),
            MarkDistribution::Exponential(e) => {
                let mut bounds = vec![ParamBound::positive()];
                bounds.extend(e.impact.param_bounds());
                bounds
            }
        }
    }

    /// Append fitted parameters to `out` in flat order.
    pub fn write_params(&self, out: &mut Vec<f64>) {
        match self {
            MarkDistribution::Pareto(p) => {
                out.extend_from_slice(&[p.mu, p.rho, p.alpha, p.beta, p.gamma])
            }
            MarkDistribution::Void => {}
            MarkDistribution::Exponential(e) => {
                out.push(e.rate());
                e.impact.write_params(out);
            }
        }
    }

    /// Overwrite fitted parameters from a flat slice.
    ///
    /// The distribution is left unchanged when validation fails.
    pub fn set_params(&mut self, params: &[f64]) -> ParamResult<()> {
        validate_flat_params(params, self.num_params())?;
        let updated = match self {
            MarkDistribution::Pareto(p) => MarkDistribution::Pareto(ParetoMarks::with_form(
                p.form, params[0], params[1], params[2], params[3], params[4],
            )?),
            MarkDistribution::Void => MarkDistribution::Void,
            MarkDistribution::Exponential(e) => {
                let impact = e.impact.with_params(&params[1..])?;
                MarkDistribution::Exponential(ExponentialMarks::new(params[0], impact)?)
            }
        };
        *self = updated;
        Ok(())
    }
}
