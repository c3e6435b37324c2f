//! Segmentation settings and named presets.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{MatteError, Result};
use crate::types::{Colour, Coord, PixelGrid};

use super::Metric;

/// Where the background key comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferenceColor {
    /// Read the RGB of the top-left pixel.
    #[default]
    SampleTopLeft,
    /// Pure white.
    White,
    /// An explicit key.
    Fixed(Colour),
}

impl ReferenceColor {
    /// Resolve the key for a grid. `None` only for an empty grid.
    pub fn resolve(self, grid: &PixelGrid) -> Option<Colour> {
        match self {
            ReferenceColor::SampleTopLeft => grid
                .get(Coord::new(0, 0))
                .map(|p| Colour::rgb(p.r, p.g, p.b)),
            ReferenceColor::White => Some(Colour::WHITE),
            ReferenceColor::Fixed(c) => Some(c.with_alpha(255)),
        }
    }
}

impl FromStr for ReferenceColor {
    type Err = MatteError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top-left" | "sample-top-left" | "sample" => Ok(ReferenceColor::SampleTopLeft),
            "white" | "fixed-white" => Ok(ReferenceColor::White),
            other => Colour::from_hex(other)
                .map(ReferenceColor::Fixed)
                .map_err(|_| MatteError::Configuration {
                    message: format!("Unknown reference colour '{}'", s.trim()),
                    help: Some("Use 'top-left', 'white' or a hex colour like #FF00FF".to_string()),
                }),
        }
    }
}

impl fmt::Display for ReferenceColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceColor::SampleTopLeft => write!(f, "top-left"),
            ReferenceColor::White => write!(f, "white"),
            ReferenceColor::Fixed(c) => write!(f, "{}", c),
        }
    }
}

/// Which border pixels seed the border pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedStrategy {
    /// The four image corners.
    #[default]
    Corners,
    /// Every pixel on the outer border.
    Border,
}

impl SeedStrategy {
    pub fn seeds(self, grid: &PixelGrid) -> Vec<Coord> {
        match self {
            SeedStrategy::Corners => grid.corners(),
            SeedStrategy::Border => grid.border(),
        }
    }
}

impl FromStr for SeedStrategy {
    type Err = MatteError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "corners" => Ok(SeedStrategy::Corners),
            "border" | "edges" => Ok(SeedStrategy::Border),
            other => Err(MatteError::Configuration {
                message: format!("Unknown seed strategy '{}'", other),
                help: Some("Use 'corners' or 'border'".to_string()),
            }),
        }
    }
}

impl fmt::Display for SeedStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedStrategy::Corners => write!(f, "corners"),
            SeedStrategy::Border => write!(f, "border"),
        }
    }
}

/// Named starting points for [`SegmentConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Preset {
    /// Sampled key, euclidean 80, both passes. For sprites on a dirty magenta key.
    #[default]
    Sprite,
    /// White key, channels above 240, interior scan only with a 5% blob limit.
    Portrait,
    /// White key, euclidean 60, every matching region removed. Final cleanup on
    /// stitched sheets, where transparent gaps split the background per cell.
    Sheet,
    /// Every matching pixel is removed regardless of where it sits.
    Global,
}

impl FromStr for Preset {
    type Err = MatteError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sprite" => Ok(Preset::Sprite),
            "portrait" => Ok(Preset::Portrait),
            "sheet" => Ok(Preset::Sheet),
            "global" => Ok(Preset::Global),
            other => Err(MatteError::Configuration {
                message: format!("Unknown preset '{}'", other),
                help: Some("Use one of: sprite, portrait, sheet, global".to_string()),
            }),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Preset::Sprite => "sprite",
            Preset::Portrait => "portrait",
            Preset::Sheet => "sheet",
            Preset::Global => "global",
        };
        write!(f, "{}", name)
    }
}

/// Everything the segmenter needs to classify a grid.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentConfig {
    pub reference: ReferenceColor,
    pub metric: Metric,
    /// Must be non-negative. Signed so bad input can be reported instead of wrapping.
    pub tolerance: i64,
    /// Interior blobs larger than this fraction of the image are removed.
    pub area_ratio: f64,
    /// Asset-specific tuning: interior blobs of exactly these sizes are
    /// always removed. Meant for one-off cleanup of a known stray artifact,
    /// not as a general rule; leave empty unless an image needs it.
    pub size_overrides: BTreeSet<usize>,
    pub seeds: SeedStrategy,
    pub border_pass: bool,
    pub interior_pass: bool,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self::preset(Preset::Sprite)
    }
}

impl SegmentConfig {
    pub fn preset(preset: Preset) -> Self {
        let base = Self {
            reference: ReferenceColor::SampleTopLeft,
            metric: Metric::Euclidean,
            tolerance: 80,
            area_ratio: 0.002,
            size_overrides: BTreeSet::new(),
            seeds: SeedStrategy::Corners,
            border_pass: true,
            interior_pass: true,
        };

        match preset {
            Preset::Sprite => base,
            Preset::Portrait => Self {
                reference: ReferenceColor::White,
                metric: Metric::PerChannel,
                tolerance: 15,
                area_ratio: 0.05,
                border_pass: false,
                ..base
            },
            Preset::Sheet => Self {
                reference: ReferenceColor::White,
                tolerance: 60,
                area_ratio: 0.0,
                border_pass: false,
                ..base
            },
            Preset::Global => Self {
                area_ratio: 0.0,
                border_pass: false,
                ..base
            },
        }
    }

    pub fn with_reference(mut self, reference: ReferenceColor) -> Self {
        self.reference = reference;
        self
    }

    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    pub fn with_tolerance(mut self, tolerance: i64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_area_ratio(mut self, area_ratio: f64) -> Self {
        self.area_ratio = area_ratio;
        self
    }

    pub fn with_size_overrides(mut self, sizes: impl IntoIterator<Item = usize>) -> Self {
        self.size_overrides = sizes.into_iter().collect();
        self
    }

    pub fn with_seeds(mut self, seeds: SeedStrategy) -> Self {
        self.seeds = seeds;
        self
    }

    pub fn with_border_pass(mut self, enabled: bool) -> Self {
        self.border_pass = enabled;
        self
    }

    pub fn with_interior_pass(mut self, enabled: bool) -> Self {
        self.interior_pass = enabled;
        self
    }

    /// Reject settings that cannot produce a meaningful run.
    pub fn validate(&self) -> Result<()> {
        if self.tolerance < 0 {
            return Err(MatteError::Configuration {
                message: format!("Tolerance must be non-negative, got {}", self.tolerance),
                help: None,
            });
        }
        if self.tolerance > u32::MAX as i64 {
            return Err(MatteError::config(format!(
                "Tolerance {} is out of range",
                self.tolerance
            )));
        }
        if !self.area_ratio.is_finite() || !(0.0..=1.0).contains(&self.area_ratio) {
            return Err(MatteError::Configuration {
                message: format!("Area ratio must be between 0 and 1, got {}", self.area_ratio),
                help: Some("Typical values are 0.002 for sprites and 0.05 for portraits".to_string()),
            });
        }
        Ok(())
    }
}
