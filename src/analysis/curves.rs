use crate::analysis::{linspace, AnalysisRanges};
use crate::errors::PricerResult;
use crate::models::black_scholes::BlackScholes;
use crate::models::grid::ContractGrid;
use crate::models::{NormalDistribution, OptionContract, OptionKind};
use ndarray::Array1;

/// Each Greek sampled along a spot sweep. All vectors share `spot`'s length.
#[derive(Debug, Clone, serde::Serialize)]
pub struct GreekCurves {
    pub kind: OptionKind,
    pub spot: Vec<f64>,
    pub delta: Vec<f64>,
    pub gamma: Vec<f64>,
    pub theta: Vec<f64>,
    pub vega: Vec<f64>,
}

/// Greeks of `base` at `points` spots between the range's spot bounds,
/// evaluated in one broadcast call. Volatility stays at `base.vol`.
pub fn greek_curves<N: NormalDistribution>(
    engine: &BlackScholes<N>,
    base: &OptionContract,
    ranges: &AnalysisRanges,
    points: usize,
    kind: OptionKind,
) -> PricerResult<GreekCurves> {
    ranges.validate()?;

    let spot = linspace(ranges.spot_min, ranges.spot_max, points);
    let grid = ContractGrid::from(base).with_spot(Array1::from(spot.clone()).into_dyn());
    let greeks = engine.greeks(&grid, kind)?;

    tracing::debug!(kind = %kind, points, "greek curves computed");

    Ok(GreekCurves {
        kind,
        spot,
        delta: greeks.delta.iter().copied().collect(),
        gamma: greeks.gamma.iter().copied().collect(),
        theta: greeks.theta.iter().copied().collect(),
        vega: greeks.vega.iter().copied().collect(),
    })
}
