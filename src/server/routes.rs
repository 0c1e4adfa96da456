use crate::analysis::curves::{greek_curves, GreekCurves};
use crate::analysis::heatmap::{price_heatmap, PriceHeatmap};
use crate::errors::{PricerError, PricerResult};
use crate::models::black_scholes::Greeks;
use crate::models::{OptionContract, OptionKind};
use crate::server::params::{CurvesQuery, HeatmapQuery, QuoteQuery};
use crate::state::{AppState, PerfCounters};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use std::sync::Arc;

#[derive(Debug, Clone, serde::Serialize)]
pub struct QuoteResponse {
    pub kind: OptionKind,
    pub contract: OptionContract,
    pub price: f64,
    pub greeks: Greeks,
}

impl IntoResponse for PricerError {
    fn into_response(self) -> Response {
        let status = match &self {
            PricerError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            PricerError::Config(_) | PricerError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

/// GET /api/quote -- headline price and Greeks for one contract
pub async fn get_quote(
    State(state): State<Arc<AppState>>,
    Query(params): Query<QuoteQuery>,
) -> Result<Json<QuoteResponse>, PricerError> {
    let quote = build_quote(&state, &params).map_err(|e| rejected(&state, "quote", e))?;

    PerfCounters::bump(&state.counters.quotes_served);
    tracing::debug!(kind = %quote.kind, price = quote.price, "quote served");
    Ok(Json(quote))
}

/// GET /api/heatmap -- price over a vol x spot grid
pub async fn get_heatmap(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HeatmapQuery>,
) -> Result<Json<PriceHeatmap>, PricerError> {
    let map = build_heatmap(&state, &params).map_err(|e| rejected(&state, "heatmap", e))?;

    PerfCounters::bump(&state.counters.heatmaps_served);
    Ok(Json(map))
}

/// GET /api/curves -- Greeks along a spot sweep
pub async fn get_curves(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CurvesQuery>,
) -> Result<Json<GreekCurves>, PricerError> {
    let curves = build_curves(&state, &params).map_err(|e| rejected(&state, "curves", e))?;

    PerfCounters::bump(&state.counters.curves_served);
    Ok(Json(curves))
}

/// GET /api/counters -- request counters (lock-free reads)
pub async fn get_counters(
    State(state): State<Arc<AppState>>,
) -> Json<serde_json::Value> {
    use portable_atomic::Ordering::Relaxed;
    Json(serde_json::json!({
        "normal_provider": state.pricer.normal().name(),
        "quotes_served": state.counters.quotes_served.load(Relaxed),
        "heatmaps_served": state.counters.heatmaps_served.load(Relaxed),
        "curves_served": state.counters.curves_served.load(Relaxed),
        "requests_rejected": state.counters.requests_rejected.load(Relaxed),
    }))
}

fn build_quote(state: &AppState, params: &QuoteQuery) -> PricerResult<QuoteResponse> {
    let (contract, kind) = params.contract()?;
    Ok(QuoteResponse {
        kind,
        contract,
        price: state.pricer.price_one(&contract, kind),
        greeks: state.pricer.greeks_one(&contract, kind),
    })
}

fn build_heatmap(state: &AppState, params: &HeatmapQuery) -> PricerResult<PriceHeatmap> {
    let (base, kind) = params.contract()?;
    let ranges = params.ranges(&base)?;
    let steps = params.steps(&state.config)?;
    price_heatmap(&state.pricer, &base, &ranges, steps, kind)
}

fn build_curves(state: &AppState, params: &CurvesQuery) -> PricerResult<GreekCurves> {
    let (base, kind) = params.contract()?;
    let ranges = params.ranges(&base)?;
    let points = params.points(&state.config)?;
    greek_curves(&state.pricer, &base, &ranges, points, kind)
}

fn rejected(state: &AppState, endpoint: &'static str, e: PricerError) -> PricerError {
    PerfCounters::bump(&state.counters.requests_rejected);
    tracing::warn!(endpoint, error = %e, "request rejected");
    e
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use approx::assert_abs_diff_eq;
    use portable_atomic::Ordering::Relaxed;

    fn quote_query(kind: &str) -> QuoteQuery {
        QuoteQuery {
            spot: 100.0,
            strike: 100.0,
            expiry: 1.0,
            rate: 0.05,
            vol: 0.2,
            kind: kind.into(),
        }
    }

    #[tokio::test]
    async fn test_quote_reference_point() {
        let state = AppState::new(AppConfig::default());
        let Json(q) = get_quote(State(state.clone()), Query(quote_query("Call"))).await.unwrap();
        assert_abs_diff_eq!(q.price, 10.4506, epsilon = 1e-4);
        assert_abs_diff_eq!(q.greeks.delta, 0.6368, epsilon = 1e-4);
        assert_eq!(state.counters.quotes_served.load(Relaxed), 1);
    }

    #[tokio::test]
    async fn test_bad_kind_is_400() {
        let state = AppState::new(AppConfig::default());
        let err = get_quote(State(state.clone()), Query(quote_query("Straddle"))).await.unwrap_err();
        assert!(matches!(err, PricerError::InvalidArgument(_)));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(state.counters.requests_rejected.load(Relaxed), 1);
        assert_eq!(state.counters.quotes_served.load(Relaxed), 0);
    }

    #[tokio::test]
    async fn test_heatmap_uses_configured_steps() {
        let cfg = AppConfig { heatmap_steps: 6, ..AppConfig::default() };
        let state = AppState::new(cfg);
        let params = HeatmapQuery {
            spot: 100.0,
            strike: 100.0,
            expiry: 1.0,
            rate: 0.05,
            vol: 0.2,
            kind: "Put".into(),
            spot_min: None,
            spot_max: None,
            vol_min: None,
            vol_max: None,
            steps: None,
        };
        let Json(map) = get_heatmap(State(state.clone()), Query(params)).await.unwrap();
        assert_eq!(map.prices.len(), 6);
        assert_eq!(map.spot_axis.len(), 6);
        assert_eq!(state.counters.heatmaps_served.load(Relaxed), 1);
    }

    #[tokio::test]
    async fn test_curves_reject_inverted_range() {
        let state = AppState::new(AppConfig::default());
        let params = CurvesQuery {
            spot: 100.0,
            strike: 100.0,
            expiry: 1.0,
            rate: 0.05,
            vol: 0.2,
            kind: "Call".into(),
            spot_min: Some(120.0),
            spot_max: Some(80.0),
            points: None,
        };
        assert!(get_curves(State(state.clone()), Query(params)).await.is_err());
        assert_eq!(state.counters.requests_rejected.load(Relaxed), 1);
    }

    #[tokio::test]
    async fn test_counters_report_provider() {
        let cfg = AppConfig {
            normal_provider: crate::models::normal::NormalProvider::Erf,
            ..AppConfig::default()
        };
        let state = AppState::new(cfg);
        let Json(v) = get_counters(State(state)).await;
        assert_eq!(v["normal_provider"], "erf");
        assert_eq!(v["quotes_served"], 0);
    }
}
