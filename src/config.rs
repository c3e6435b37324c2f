//! Project manifest (matte.yaml) parsing.
//!
//! The manifest holds per-project defaults for cleaning and sheet assembly.
//! Every field is optional; anything left out falls back to the preset.
//! Command-line flags override the manifest.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::compose::{CellSize, SheetConfig};
use crate::error::{MatteError, Result};
use crate::segment::{Preset, SegmentConfig};

/// Default manifest filename, looked up in the working directory.
pub const MANIFEST_FILENAME: &str = "matte.yaml";

/// Optional segmentation settings layered on top of a preset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SegmentOverrides {
    pub preset: Option<String>,
    pub reference: Option<String>,
    pub metric: Option<String>,
    pub tolerance: Option<i64>,
    pub area_ratio: Option<f64>,
    pub size_overrides: Option<Vec<usize>>,
    pub seeds: Option<String>,
    pub border_pass: Option<bool>,
    pub interior_pass: Option<bool>,
}

impl SegmentOverrides {
    /// Merge two layers; fields set on `self` win.
    pub fn or(self, under: SegmentOverrides) -> SegmentOverrides {
        SegmentOverrides {
            preset: self.preset.or(under.preset),
            reference: self.reference.or(under.reference),
            metric: self.metric.or(under.metric),
            tolerance: self.tolerance.or(under.tolerance),
            area_ratio: self.area_ratio.or(under.area_ratio),
            size_overrides: self.size_overrides.or(under.size_overrides),
            seeds: self.seeds.or(under.seeds),
            border_pass: self.border_pass.or(under.border_pass),
            interior_pass: self.interior_pass.or(under.interior_pass),
        }
    }

    /// Resolve into a validated config, starting from `fallback` when no
    /// preset is named.
    pub fn resolve(&self, fallback: Preset) -> Result<SegmentConfig> {
        let preset = match &self.preset {
            Some(name) => name.parse()?,
            None => fallback,
        };

        let mut config = SegmentConfig::preset(preset);
        if let Some(reference) = &self.reference {
            config.reference = reference.parse()?;
        }
        if let Some(metric) = &self.metric {
            config.metric = metric.parse()?;
        }
        if let Some(tolerance) = self.tolerance {
            config.tolerance = tolerance;
        }
        if let Some(area_ratio) = self.area_ratio {
            config.area_ratio = area_ratio;
        }
        if let Some(sizes) = &self.size_overrides {
            config.size_overrides = sizes.iter().copied().collect();
        }
        if let Some(seeds) = &self.seeds {
            config.seeds = seeds.parse()?;
        }
        if let Some(enabled) = self.border_pass {
            config.border_pass = enabled;
        }
        if let Some(enabled) = self.interior_pass {
            config.interior_pass = enabled;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Sheet settings from the manifest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SheetOverrides {
    /// Cell size as "WxH".
    pub cell: Option<String>,
    pub gap: Option<u32>,
    /// Presence enables a cleanup pass on the stitched sheet.
    pub cleanup: Option<SegmentOverrides>,
}

impl SheetOverrides {
    pub fn or(self, under: SheetOverrides) -> SheetOverrides {
        SheetOverrides {
            cell: self.cell.or(under.cell),
            gap: self.gap.or(under.gap),
            cleanup: match (self.cleanup, under.cleanup) {
                (Some(over), Some(under)) => Some(over.or(under)),
                (over, under) => over.or(under),
            },
        }
    }

    pub fn resolve(&self) -> Result<SheetConfig> {
        let defaults = SheetConfig::default();
        let cell = match &self.cell {
            Some(cell) => cell.parse::<CellSize>()?,
            None => defaults.cell,
        };
        let cleanup = self
            .cleanup
            .as_ref()
            .map(|c| c.resolve(Preset::Sheet))
            .transpose()?;

        Ok(SheetConfig {
            cell,
            gap: self.gap.unwrap_or(defaults.gap),
            cleanup,
        })
    }
}

/// Project manifest loaded from matte.yaml.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Manifest {
    /// Settings for `matte clean`.
    pub clean: SegmentOverrides,
    /// Settings for `matte sheet`.
    pub sheet: SheetOverrides,
}

impl Manifest {
    /// Load manifest from a matte.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| MatteError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| MatteError::Parse {
            message: format!("Invalid manifest: {}", e),
            help: Some(format!("Check {} syntax", MANIFEST_FILENAME)),
        })
    }

    /// Load `explicit` if given, else `matte.yaml` in `dir` if present,
    /// else the defaults. Returns the path that was read, if any.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }
        let candidate = dir.join(MANIFEST_FILENAME);
        if candidate.is_file() {
            Ok((Self::load(&candidate)?, Some(candidate)))
        } else {
            Ok((Self::default(), None))
        }
    }
}
