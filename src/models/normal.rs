use crate::errors::PricerError;
use crate::models::NormalDistribution;
use statrs::distribution::{Continuous, ContinuousCDF, Normal};
use statrs::function::erf::erf;
use std::f64::consts::{PI, SQRT_2};
use std::str::FromStr;

/// Standard normal backed by statrs.
pub struct StandardNormal {
    /// Standard normal distribution (created once, reused)
    normal: Normal,
}

impl StandardNormal {
    pub fn new() -> Self {
        Self { normal: Normal::standard() }
    }
}

impl Default for StandardNormal {
    fn default() -> Self {
        Self::new()
    }
}

impl NormalDistribution for StandardNormal {
    #[inline]
    fn name(&self) -> &'static str {
        "statrs"
    }

    #[inline]
    fn cdf(&self, x: f64) -> f64 {
        self.normal.cdf(x)
    }

    #[inline]
    fn pdf(&self, x: f64) -> f64 {
        self.normal.pdf(x)
    }
}

/// Closed-form standard normal through the error function.
///
/// Phi(x) = 0.5 * (1 + erf(x / sqrt(2)))
/// phi(x) = exp(-x^2 / 2) / sqrt(2 * pi)
#[derive(Debug, Clone, Copy, Default)]
pub struct ErfNormal;

impl NormalDistribution for ErfNormal {
    #[inline]
    fn name(&self) -> &'static str {
        "erf"
    }

    #[inline]
    fn cdf(&self, x: f64) -> f64 {
        0.5 * (1.0 + erf(x / SQRT_2))
    }

    #[inline]
    fn pdf(&self, x: f64) -> f64 {
        (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
    }
}

/// Selects a normal distribution implementation at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalProvider {
    Statrs,
    Erf,
}

impl NormalProvider {
    pub fn build(self) -> Box<dyn NormalDistribution> {
        match self {
            Self::Statrs => Box::new(StandardNormal::new()),
            Self::Erf => Box::new(ErfNormal),
        }
    }
}

impl FromStr for NormalProvider {
    type Err = PricerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "statrs" => Ok(Self::Statrs),
            "erf" => Ok(Self::Erf),
            other => Err(PricerError::InvalidArgument(format!(
                "unknown normal provider '{other}' (expected 'statrs' or 'erf')"
            ))),
        }
    }
}
