pub mod black_scholes;
pub mod grid;
pub mod normal;

use crate::errors::PricerError;
use std::str::FromStr;

/// Standard normal distribution capability consumed by the pricer.
/// Both methods must be pure functions of `x`.
/// Send + Sync required for sharing across tokio tasks.
pub trait NormalDistribution: Send + Sync {
    fn name(&self) -> &'static str;

    /// Cumulative distribution function, Phi(x).
    fn cdf(&self, x: f64) -> f64;

    /// Probability density function, phi(x).
    fn pdf(&self, x: f64) -> f64;
}

impl<N: NormalDistribution + ?Sized> NormalDistribution for Box<N> {
    #[inline]
    fn name(&self) -> &'static str {
        (**self).name()
    }

    #[inline]
    fn cdf(&self, x: f64) -> f64 {
        (**self).cdf(x)
    }

    #[inline]
    fn pdf(&self, x: f64) -> f64 {
        (**self).pdf(x)
    }
}

/// European option kind. Closed set; anything else is rejected when parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum OptionKind {
    Call,
    Put,
}

impl std::fmt::Display for OptionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "Call"),
            Self::Put => write!(f, "Put"),
        }
    }
}

impl FromStr for OptionKind {
    type Err = PricerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Call" | "call" => Ok(Self::Call),
            "Put" | "put" => Ok(Self::Put),
            other => Err(PricerError::InvalidArgument(format!(
                "option kind must be 'Call' or 'Put', got '{other}'"
            ))),
        }
    }
}

/// Scalar contract parameters. Stack-allocated, Copy.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct OptionContract {
    /// Underlying spot price S
    pub spot: f64,
    /// Strike K
    pub strike: f64,
    /// Time to expiry T in years
    pub expiry: f64,
    /// Annualized risk-free rate r
    pub rate: f64,
    /// Annualized volatility sigma
    pub vol: f64,
}

impl Default for OptionContract {
    fn default() -> Self {
        Self {
            spot: 100.0,
            strike: 100.0,
            expiry: 1.0,
            rate: 0.05,
            vol: 0.2,
        }
    }
}
