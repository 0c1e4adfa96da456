use crate::errors::PricerResult;
use crate::models::grid::ContractGrid;
use crate::models::normal::StandardNormal;
use crate::models::{NormalDistribution, OptionContract, OptionKind};
use ndarray::{ArrayD, Zip};

/// Substituted for a zero sigma or T before the sensitivity engine divides.
pub const DEGENERATE_EPSILON: f64 = 1e-10;

/// Black-Scholes European option pricing and Greeks.
///
/// d1 = (ln(S/K) + (r + sigma^2/2)*T) / (sigma * sqrt(T))
/// d2 = d1 - sigma * sqrt(T)
///
/// Every operation evaluates one scalar kernel over the broadcast
/// inputs, so a single point and a full grid share the same code path.
pub struct BlackScholes<N: NormalDistribution = StandardNormal> {
    normal: N,
}

/// The four Greeks at a single point. Theta is annualized.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Greeks {
    pub delta: f64,
    pub gamma: f64,
    pub theta: f64,
    pub vega: f64,
}

/// Greeks over a broadcast grid, one array per sensitivity.
#[derive(Debug, Clone, PartialEq)]
pub struct GreeksGrid {
    pub delta: ArrayD<f64>,
    pub gamma: ArrayD<f64>,
    pub theta: ArrayD<f64>,
    pub vega: ArrayD<f64>,
}

impl BlackScholes<StandardNormal> {
    pub fn new() -> Self {
        Self::with_normal(StandardNormal::new())
    }
}

impl Default for BlackScholes<StandardNormal> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NormalDistribution> BlackScholes<N> {
    pub fn with_normal(normal: N) -> Self {
        Self { normal }
    }

    pub fn normal(&self) -> &N {
        &self.normal
    }

    /// Fair value over the broadcast shape of `grid`.
    ///
    /// No degenerate-input guard: a zero sigma or T yields NaN/inf.
    pub fn price(&self, grid: &ContractGrid, kind: OptionKind) -> PricerResult<ArrayD<f64>> {
        let (s, k, t, r, v) = grid.broadcast()?;
        Ok(Zip::from(&s)
            .and(&k)
            .and(&t)
            .and(&r)
            .and(&v)
            .map_collect(|&s, &k, &t, &r, &v| self.price_kernel(s, k, t, r, v, kind)))
    }

    /// Delta, gamma, theta and vega over the broadcast shape of `grid`.
    ///
    /// Zero sigma or T is replaced with `DEGENERATE_EPSILON` first.
    pub fn greeks(&self, grid: &ContractGrid, kind: OptionKind) -> PricerResult<GreeksGrid> {
        let (s, k, t, r, v) = grid.broadcast()?;
        let points = Zip::from(&s)
            .and(&k)
            .and(&t)
            .and(&r)
            .and(&v)
            .map_collect(|&s, &k, &t, &r, &v| self.greeks_kernel(s, k, t, r, v, kind));

        Ok(GreeksGrid {
            delta: points.mapv(|g| g.delta),
            gamma: points.mapv(|g| g.gamma),
            theta: points.mapv(|g| g.theta),
            vega: points.mapv(|g| g.vega),
        })
    }

    #[inline]
    pub fn price_one(&self, c: &OptionContract, kind: OptionKind) -> f64 {
        self.price_kernel(c.spot, c.strike, c.expiry, c.rate, c.vol, kind)
    }

    #[inline]
    pub fn greeks_one(&self, c: &OptionContract, kind: OptionKind) -> Greeks {
        self.greeks_kernel(c.spot, c.strike, c.expiry, c.rate, c.vol, kind)
    }

    #[inline]
    fn price_kernel(&self, s: f64, k: f64, t: f64, r: f64, v: f64, kind: OptionKind) -> f64 {
        let (d1, d2) = d1_d2(s, k, t, r, v);
        let discounted_strike = k * (-r * t).exp();

        match kind {
            OptionKind::Call => s * self.normal.cdf(d1) - discounted_strike * self.normal.cdf(d2),
            OptionKind::Put => discounted_strike * self.normal.cdf(-d2) - s * self.normal.cdf(-d1),
        }
    }

    #[inline]
    fn greeks_kernel(&self, s: f64, k: f64, t: f64, r: f64, v: f64, kind: OptionKind) -> Greeks {
        let v = guard_zero(v);
        let t = guard_zero(t);

        let (d1, d2) = d1_d2(s, k, t, r, v);
        let sqrt_t = t.sqrt();
        let pdf_d1 = self.normal.pdf(d1);
        let cdf_d1 = self.normal.cdf(d1);
        let discounted_strike = k * (-r * t).exp();
        let decay = -s * pdf_d1 * v / (2.0 * sqrt_t);

        let (delta, theta) = match kind {
            OptionKind::Call => (cdf_d1, decay - r * discounted_strike * self.normal.cdf(d2)),
            OptionKind::Put => (cdf_d1 - 1.0, decay + r * discounted_strike * self.normal.cdf(-d2)),
        };

        Greeks {
            delta,
            gamma: pdf_d1 / (s * v * sqrt_t),
            theta,
            vega: s * pdf_d1 * sqrt_t,
        }
    }
}

/// Standardized log-moneyness terms (d1, d2). Unguarded.
#[inline]
pub fn d1_d2(spot: f64, strike: f64, expiry: f64, rate: f64, vol: f64) -> (f64, f64) {
    let vol_sqrt_t = vol * expiry.sqrt();
    let d1 = ((spot / strike).ln() + (rate + 0.5 * vol * vol) * expiry) / vol_sqrt_t;
    (d1, d1 - vol_sqrt_t)
}

#[inline]
fn guard_zero(x: f64) -> f64 {
    if x == 0.0 {
        DEGENERATE_EPSILON
    } else {
        x
    }
}
