use crate::config::AppConfig;
use crate::models::black_scholes::BlackScholes;
use crate::models::NormalDistribution;
use portable_atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Pricer with the normal provider chosen at startup.
pub type SharedPricer = BlackScholes<Box<dyn NormalDistribution>>;

// ── Request Counters (lock-free) ──

pub struct PerfCounters {
    pub quotes_served: AtomicU64,
    pub heatmaps_served: AtomicU64,
    pub curves_served: AtomicU64,
    pub requests_rejected: AtomicU64,
}

impl PerfCounters {
    pub fn new() -> Self {
        Self {
            quotes_served: AtomicU64::new(0),
            heatmaps_served: AtomicU64::new(0),
            curves_served: AtomicU64::new(0),
            requests_rejected: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

impl Default for PerfCounters {
    fn default() -> Self {
        Self::new()
    }
}

// ── Shared State ──

/// Immutable after construction apart from the counters.
pub struct AppState {
    pub config: AppConfig,
    pub pricer: SharedPricer,
    pub counters: PerfCounters,
}

impl AppState {
    pub fn new(config: AppConfig) -> Arc<Self> {
        let pricer = BlackScholes::with_normal(config.normal_provider.build());
        Arc::new(Self {
            config,
            pricer,
            counters: PerfCounters::new(),
        })
    }
}
