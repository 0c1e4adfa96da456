use crate::analysis::{linspace, AnalysisRanges};
use crate::errors::{PricerError, PricerResult};
use crate::models::black_scholes::BlackScholes;
use crate::models::grid::ContractGrid;
use crate::models::{NormalDistribution, OptionContract, OptionKind};
use ndarray::{Array2, Axis};

/// Option price over a volatility x spot grid.
/// `prices[i][j]` is the price at `vol_axis[i]`, `spot_axis[j]`.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PriceHeatmap {
    pub kind: OptionKind,
    pub spot_axis: Vec<f64>,
    pub vol_axis: Vec<f64>,
    pub prices: Vec<Vec<f64>>,
}

/// Price `base` across `steps` spots and `steps` vols in one broadcast call.
///
/// Spot runs along a `[1, n]` row and vol down a `[n, 1]` column; strike,
/// expiry and rate stay scalar. `base.spot` and `base.vol` are ignored.
pub fn price_heatmap<N: NormalDistribution>(
    pricer: &BlackScholes<N>,
    base: &OptionContract,
    ranges: &AnalysisRanges,
    steps: usize,
    kind: OptionKind,
) -> PricerResult<PriceHeatmap> {
    ranges.validate()?;

    let spot_axis = linspace(ranges.spot_min, ranges.spot_max, steps);
    let vol_axis = linspace(ranges.vol_min, ranges.vol_max, steps);

    let spot_row = Array2::from_shape_vec((1, spot_axis.len()), spot_axis.clone())
        .map_err(|e| PricerError::InvalidArgument(e.to_string()))?;
    let vol_col = Array2::from_shape_vec((vol_axis.len(), 1), vol_axis.clone())
        .map_err(|e| PricerError::InvalidArgument(e.to_string()))?;

    let grid = ContractGrid::from(base)
        .with_spot(spot_row.into_dyn())
        .with_vol(vol_col.into_dyn());

    let surface = pricer.price(&grid, kind)?;
    let prices: Vec<Vec<f64>> = surface
        .axis_iter(Axis(0))
        .map(|row| row.iter().copied().collect())
        .collect();

    tracing::debug!(kind = %kind, steps, "price heatmap computed");

    Ok(PriceHeatmap { kind, spot_axis, vol_axis, prices })
}
