//! Colour distance tests against a background key.

use std::fmt;
use std::str::FromStr;

use crate::error::{MatteError, Result};
use crate::types::Colour;

/// How the distance between a pixel and the key is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Metric {
    /// Straight-line distance in RGB space.
    #[default]
    Euclidean,
    /// Largest single-channel difference. Looser at the cube corners, which
    /// suits near-white and near-magenta keys.
    PerChannel,
}

impl FromStr for Metric {
    type Err = MatteError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "euclidean" => Ok(Metric::Euclidean),
            "per-channel" | "per_channel" | "channel" => Ok(Metric::PerChannel),
            other => Err(MatteError::Configuration {
                message: format!("Unknown metric '{}'", other),
                help: Some("Use 'euclidean' or 'per-channel'".to_string()),
            }),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Euclidean => write!(f, "euclidean"),
            Metric::PerChannel => write!(f, "per-channel"),
        }
    }
}

/// Tests pixels against a reference colour. Alpha is ignored here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorMatcher {
    pub reference: Colour,
    pub metric: Metric,
    pub tolerance: u32,
}

impl ColorMatcher {
    pub fn new(reference: Colour, metric: Metric, tolerance: u32) -> Self {
        Self {
            reference,
            metric,
            tolerance,
        }
    }

    /// True when `pixel` is strictly within tolerance of the reference.
    pub fn matches(&self, pixel: Colour) -> bool {
        let [r, g, b] = self.reference.channels();
        let diffs = [
            pixel.r.abs_diff(r) as u32,
            pixel.g.abs_diff(g) as u32,
            pixel.b.abs_diff(b) as u32,
        ];

        match self.metric {
            Metric::Euclidean => {
                let dist_sq: u64 = diffs.iter().map(|&d| (d * d) as u64).sum();
                let tol = self.tolerance as u64;
                dist_sq < tol * tol
            }
            Metric::PerChannel => diffs.iter().all(|&d| d < self.tolerance),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_from_str() {
        assert_eq!("euclidean".parse::<Metric>().unwrap(), Metric::Euclidean);
        assert_eq!("Per-Channel".parse::<Metric>().unwrap(), Metric::PerChannel);
        assert!(matches!(
            "manhattan".parse::<Metric>(),
            Err(MatteError::Configuration { .. })
        ));
    }

    #[test]
    fn test_euclidean_strict_bound() {
        // Distance from white to (252, 251, 255) is exactly 5.
        let m = ColorMatcher::new(Colour::WHITE, Metric::Euclidean, 5);
        assert!(!m.matches(Colour::rgb(252, 251, 255)));
        let m = ColorMatcher::new(Colour::WHITE, Metric::Euclidean, 6);
        assert!(m.matches(Colour::rgb(252, 251, 255)));
    }

    #[test]
    fn test_per_channel_strict_bound() {
        let m = ColorMatcher::new(Colour::WHITE, Metric::PerChannel, 15);
        assert!(m.matches(Colour::rgb(241, 250, 255)));
        assert!(!m.matches(Colour::rgb(240, 255, 255)));
    }

    #[test]
    fn test_per_channel_looser_than_euclidean() {
        // Every channel off by 40: per-channel distance 40, euclidean ~69.
        let pixel = Colour::rgb(215, 40, 215);
        let per = ColorMatcher::new(Colour::MAGENTA, Metric::PerChannel, 65);
        let euc = ColorMatcher::new(Colour::MAGENTA, Metric::Euclidean, 65);
        assert!(per.matches(pixel));
        assert!(!euc.matches(pixel));
    }

    #[test]
    fn test_alpha_ignored() {
        let m = ColorMatcher::new(Colour::WHITE, Metric::Euclidean, 1);
        assert!(m.matches(Colour::new(255, 255, 255, 0)));
    }

    #[test]
    fn test_zero_tolerance_matches_nothing() {
        let m = ColorMatcher::new(Colour::WHITE, Metric::PerChannel, 0);
        assert!(!m.matches(Colour::WHITE));
    }
}
