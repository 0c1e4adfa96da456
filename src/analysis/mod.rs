pub mod curves;
pub mod heatmap;

use crate::errors::{PricerError, PricerResult};
use crate::models::OptionContract;

/// Sweep bounds for the sensitivity analyses.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct AnalysisRanges {
    pub spot_min: f64,
    pub spot_max: f64,
    pub vol_min: f64,
    pub vol_max: f64,
}

impl AnalysisRanges {
    /// Half to one-and-a-half times spot, 10% to 50% vol.
    pub fn around(base: &OptionContract) -> Self {
        Self {
            spot_min: base.spot * 0.5,
            spot_max: base.spot * 1.5,
            vol_min: 0.1,
            vol_max: 0.5,
        }
    }

    pub fn validate(&self) -> PricerResult<()> {
        if !(self.spot_min < self.spot_max) || !(self.vol_min < self.vol_max) {
            return Err(PricerError::InvalidArgument(
                "minimum values must be less than maximum values".into(),
            ));
        }
        Ok(())
    }
}

/// `n` evenly spaced values from `min` to `max`, both ends included.
pub fn linspace(min: f64, max: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![min],
        _ => {
            let step = (max - min) / (n - 1) as f64;
            let mut out: Vec<f64> = (0..n).map(|i| min + step * i as f64).collect();
            // Pin the endpoint against accumulated rounding
            out[n - 1] = max;
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_endpoints() {
        let xs = linspace(50.0, 150.0, 10);
        assert_eq!(xs.len(), 10);
        assert_eq!(xs[0], 50.0);
        assert_eq!(xs[9], 150.0);
        assert!((xs[1] - 61.111_111_111).abs() < 1e-8);
    }

    #[test]
    fn test_linspace_small_counts() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(0.3, 1.0, 1), vec![0.3]);
        assert_eq!(linspace(0.0, 1.0, 2), vec![0.0, 1.0]);
    }

    #[test]
    fn test_default_ranges() {
        let r = AnalysisRanges::around(&OptionContract::default());
        assert_eq!((r.spot_min, r.spot_max), (50.0, 150.0));
        assert_eq!((r.vol_min, r.vol_max), (0.1, 0.5));
        assert!(r.validate().is_ok());
    }

    #[test]
    fn test_inverted_ranges_rejected() {
        let base = AnalysisRanges::around(&OptionContract::default());
        let flat_spot = AnalysisRanges { spot_max: base.spot_min, ..base };
        let inverted_vol = AnalysisRanges { vol_min: 0.6, ..base };
        assert!(matches!(flat_spot.validate(), Err(PricerError::InvalidArgument(_))));
        assert!(inverted_vol.validate().is_err());
    }

    #[test]
    fn test_nan_range_rejected() {
        let r = AnalysisRanges { spot_min: f64::NAN, ..AnalysisRanges::around(&OptionContract::default()) };
        assert!(r.validate().is_err());
    }
}
