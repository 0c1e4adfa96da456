//! Black-Scholes European option pricer with Greeks and sensitivity grids.
//!
//! `models` holds the closed-form core, `analysis` builds heatmaps and
//! Greek curves on top of it, and `server` exposes both over HTTP.

pub mod analysis;
pub mod config;
pub mod errors;
pub mod models;
pub mod server;
pub mod state;
