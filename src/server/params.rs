use crate::analysis::AnalysisRanges;
use crate::config::AppConfig;
use crate::errors::{PricerError, PricerResult};
use crate::models::{OptionContract, OptionKind};

fn default_spot() -> f64 {
    OptionContract::default().spot
}
fn default_strike() -> f64 {
    OptionContract::default().strike
}
fn default_expiry() -> f64 {
    OptionContract::default().expiry
}
fn default_rate() -> f64 {
    OptionContract::default().rate
}
fn default_vol() -> f64 {
    OptionContract::default().vol
}
fn default_kind() -> String {
    "Call".into()
}

/// Lowest accepted spot, strike and expiry.
const MIN_POSITIVE: f64 = 0.01;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct QuoteQuery {
    #[serde(default = "default_spot")]
    pub spot: f64,
    #[serde(default = "default_strike")]
    pub strike: f64,
    #[serde(default = "default_expiry")]
    pub expiry: f64,
    #[serde(default = "default_rate")]
    pub rate: f64,
    #[serde(default = "default_vol")]
    pub vol: f64,
    #[serde(default = "default_kind")]
    pub kind: String,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct HeatmapQuery {
    #[serde(default = "default_spot")]
    pub spot: f64,
    #[serde(default = "default_strike")]
    pub strike: f64,
    #[serde(default = "default_expiry")]
    pub expiry: f64,
    #[serde(default = "default_rate")]
    pub rate: f64,
    #[serde(default = "default_vol")]
    pub vol: f64,
    #[serde(default = "default_kind")]
    pub kind: String,
    pub spot_min: Option<f64>,
    pub spot_max: Option<f64>,
    pub vol_min: Option<f64>,
    pub vol_max: Option<f64>,
    pub steps: Option<usize>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct CurvesQuery {
    #[serde(default = "default_spot")]
    pub spot: f64,
    #[serde(default = "default_strike")]
    pub strike: f64,
    #[serde(default = "default_expiry")]
    pub expiry: f64,
    #[serde(default = "default_rate")]
    pub rate: f64,
    #[serde(default = "default_vol")]
    pub vol: f64,
    #[serde(default = "default_kind")]
    pub kind: String,
    pub spot_min: Option<f64>,
    pub spot_max: Option<f64>,
    pub points: Option<usize>,
}

impl QuoteQuery {
    pub fn contract(&self) -> PricerResult<(OptionContract, OptionKind)> {
        checked_contract(self.spot, self.strike, self.expiry, self.rate, self.vol, &self.kind)
    }
}

impl HeatmapQuery {
    pub fn contract(&self) -> PricerResult<(OptionContract, OptionKind)> {
        checked_contract(self.spot, self.strike, self.expiry, self.rate, self.vol, &self.kind)
    }

    pub fn ranges(&self, base: &OptionContract) -> PricerResult<AnalysisRanges> {
        let defaults = AnalysisRanges::around(base);
        let ranges = AnalysisRanges {
            spot_min: self.spot_min.unwrap_or(defaults.spot_min),
            spot_max: self.spot_max.unwrap_or(defaults.spot_max),
            vol_min: self.vol_min.unwrap_or(defaults.vol_min),
            vol_max: self.vol_max.unwrap_or(defaults.vol_max),
        };
        check_range_bounds(&ranges)?;
        Ok(ranges)
    }

    /// Grid side length; the full grid is `steps * steps` cells.
    pub fn steps(&self, cfg: &AppConfig) -> PricerResult<usize> {
        let steps = self.steps.unwrap_or(cfg.heatmap_steps);
        if steps < 2 || steps.saturating_mul(steps) > cfg.max_grid_points {
            return Err(PricerError::InvalidArgument(format!(
                "steps must be at least 2 and steps^2 at most {}, got {steps}",
                cfg.max_grid_points
            )));
        }
        Ok(steps)
    }
}

impl CurvesQuery {
    pub fn contract(&self) -> PricerResult<(OptionContract, OptionKind)> {
        checked_contract(self.spot, self.strike, self.expiry, self.rate, self.vol, &self.kind)
    }

    /// Only the spot bounds matter for a curve sweep.
    pub fn ranges(&self, base: &OptionContract) -> PricerResult<AnalysisRanges> {
        let defaults = AnalysisRanges::around(base);
        let ranges = AnalysisRanges {
            spot_min: self.spot_min.unwrap_or(defaults.spot_min),
            spot_max: self.spot_max.unwrap_or(defaults.spot_max),
            ..defaults
        };
        check_range_bounds(&ranges)?;
        Ok(ranges)
    }

    pub fn points(&self, cfg: &AppConfig) -> PricerResult<usize> {
        let points = self.points.unwrap_or(cfg.curve_points);
        if points < 2 || points > cfg.max_grid_points {
            return Err(PricerError::InvalidArgument(format!(
                "points must be between 2 and {}, got {points}",
                cfg.max_grid_points
            )));
        }
        Ok(points)
    }
}

fn checked_contract(
    spot: f64,
    strike: f64,
    expiry: f64,
    rate: f64,
    vol: f64,
    kind: &str,
) -> PricerResult<(OptionContract, OptionKind)> {
    let kind = kind.parse::<OptionKind>()?;
    at_least("spot", spot, MIN_POSITIVE)?;
    at_least("strike", strike, MIN_POSITIVE)?;
    at_least("expiry", expiry, MIN_POSITIVE)?;
    within("rate", rate, 0.0, 1.0)?;
    within("vol", vol, 0.0, 1.0)?;
    Ok((OptionContract { spot, strike, expiry, rate, vol }, kind))
}

fn check_range_bounds(r: &AnalysisRanges) -> PricerResult<()> {
    at_least("spot_min", r.spot_min, MIN_POSITIVE)?;
    at_least("spot_max", r.spot_max, MIN_POSITIVE)?;
    within("vol_min", r.vol_min, 0.0, 1.0)?;
    within("vol_max", r.vol_max, 0.0, 1.0)?;
    r.validate()
}

// Negated comparisons so NaN fails too.
fn at_least(name: &str, x: f64, min: f64) -> PricerResult<()> {
    if !(x >= min) || x.is_infinite() {
        return Err(PricerError::InvalidArgument(format!("{name} must be a finite value >= {min}, got {x}")));
    }
    Ok(())
}

fn within(name: &str, x: f64, min: f64, max: f64) -> PricerResult<()> {
    if !(x >= min && x <= max) {
        return Err(PricerError::InvalidArgument(format!("{name} must be in [{min}, {max}], got {x}")));
    }
    Ok(())
}
