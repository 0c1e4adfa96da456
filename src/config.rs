use crate::errors::{PricerError, PricerResult};
use crate::models::normal::NormalProvider;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_port: u16,
    pub heatmap_steps: usize,
    pub curve_points: usize,
    pub max_grid_points: usize,
    pub normal_provider: NormalProvider,
}

impl AppConfig {
    pub fn from_env() -> PricerResult<Self> {
        dotenvy::dotenv().ok();

        let server_port = env_var_or("SERVER_PORT", "3001")
            .parse::<u16>()
            .map_err(|e| PricerError::Config(format!("SERVER_PORT: {e}")))?;

        let heatmap_steps = parse_resolution("HEATMAP_STEPS", "10")?;
        let curve_points = parse_resolution("CURVE_POINTS", "100")?;

        let max_grid_points = env_var_or("MAX_GRID_POINTS", "10000")
            .parse::<usize>()
            .map_err(|e| PricerError::Config(format!("MAX_GRID_POINTS: {e}")))?;

        let normal_provider = env_var_or("NORMAL_PROVIDER", "statrs")
            .parse::<NormalProvider>()
            .map_err(|e| PricerError::Config(format!("NORMAL_PROVIDER: {e}")))?;

        let cfg = Self {
            server_port,
            heatmap_steps,
            curve_points,
            max_grid_points,
            normal_provider,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Defaults still have to fit under the request cap.
    fn validate(&self) -> PricerResult<()> {
        if self.heatmap_steps.saturating_mul(self.heatmap_steps) > self.max_grid_points {
            return Err(PricerError::Config(format!(
                "HEATMAP_STEPS={} exceeds MAX_GRID_POINTS={}",
                self.heatmap_steps, self.max_grid_points
            )));
        }
        if self.curve_points > self.max_grid_points {
            return Err(PricerError::Config(format!(
                "CURVE_POINTS={} exceeds MAX_GRID_POINTS={}",
                self.curve_points, self.max_grid_points
            )));
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_port: 3001,
            heatmap_steps: 10,
            curve_points: 100,
            max_grid_points: 10_000,
            normal_provider: NormalProvider::Statrs,
        }
    }
}

fn parse_resolution(key: &str, default: &str) -> PricerResult<usize> {
    let n = env_var_or(key, default)
        .parse::<usize>()
        .map_err(|e| PricerError::Config(format!("{key}: {e}")))?;
    if n < 2 {
        return Err(PricerError::Config(format!("{key}: must be at least 2, got {n}")));
    }
    Ok(n)
}

fn env_var_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_pass_validation() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_oversized_heatmap_rejected() {
        let cfg = AppConfig { heatmap_steps: 200, ..AppConfig::default() };
        assert!(matches!(cfg.validate(), Err(PricerError::Config(_))));
    }

    #[test]
    fn test_huge_heatmap_steps_rejected_without_overflow() {
        let cfg = AppConfig { heatmap_steps: usize::MAX, ..AppConfig::default() };
        assert!(matches!(cfg.validate(), Err(PricerError::Config(_))));

        let cfg = AppConfig { heatmap_steps: usize::MAX / 2, max_grid_points: usize::MAX - 1, ..AppConfig::default() };
        assert!(cfg.validate().is_err());
    }
}
