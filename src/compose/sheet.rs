//! Sprite sheet compositor.
//!
//! Resizes frames to a fixed cell with nearest-neighbour sampling and lays
//! them out left to right in a single row, separated by a fixed gap.

use std::fmt;
use std::str::FromStr;

use crate::error::{MatteError, Result};
use crate::segment::{SegmentConfig, SegmentReport, Segmenter};
use crate::types::PixelGrid;

/// Width and height of one sheet cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSize {
    pub width: u32,
    pub height: u32,
}

impl CellSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for CellSize {
    fn default() -> Self {
        Self::new(96, 96)
    }
}

impl FromStr for CellSize {
    type Err = MatteError;

    /// Parse a "WxH" dimension string.
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.trim().splitn(2, |c| c == 'x' || c == 'X').collect();
        if parts.len() != 2 {
            return Err(MatteError::Parse {
                message: format!("Invalid dimensions '{}': expected WxH (e.g. 96x96)", s),
                help: Some("Use the format WxH, for example: 96x96, 32x48".to_string()),
            });
        }

        let w: u32 = parts[0].parse().map_err(|_| MatteError::Parse {
            message: format!("Invalid width '{}' in dimensions '{}'", parts[0], s),
            help: Some("Width must be a positive integer".to_string()),
        })?;

        let h: u32 = parts[1].parse().map_err(|_| MatteError::Parse {
            message: format!("Invalid height '{}' in dimensions '{}'", parts[1], s),
            help: Some("Height must be a positive integer".to_string()),
        })?;

        Ok(Self::new(w, h))
    }
}

impl fmt::Display for CellSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Layout and cleanup settings for a sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetConfig {
    pub cell: CellSize,
    pub gap: u32,
    /// Segment the stitched sheet once more before returning it.
    pub cleanup: Option<SegmentConfig>,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            cell: CellSize::default(),
            gap: 4,
            cleanup: None,
        }
    }
}

/// Where one frame landed on the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// The stitched sheet plus its layout.
#[derive(Debug, Clone)]
pub struct ComposedSheet {
    pub grid: PixelGrid,
    pub placements: Vec<Placement>,
    pub cleanup: Option<SegmentReport>,
}

/// Stitches frames into a single-row sheet.
#[derive(Debug, Clone)]
pub struct SheetCompositor {
    cell: CellSize,
    gap: u32,
    cleanup: Option<Segmenter>,
}

impl SheetCompositor {
    pub fn new(config: SheetConfig) -> Result<Self> {
        if config.cell.width == 0 || config.cell.height == 0 {
            return Err(MatteError::Configuration {
                message: format!("Cell size must be non-zero, got {}", config.cell),
                help: Some("Both width and height must be at least 1".to_string()),
            });
        }
        let cleanup = config.cleanup.map(Segmenter::new).transpose()?;
        Ok(Self {
            cell: config.cell,
            gap: config.gap,
            cleanup,
        })
    }

    /// Canvas size for `count` frames, or `None` if the width does not fit in a `u32`.
    pub fn canvas_size(&self, count: u32) -> Option<(u32, u32)> {
        if count == 0 {
            return Some((0, 0));
        }
        let frames = count.checked_mul(self.cell.width)?;
        let gaps = (count - 1).checked_mul(self.gap)?;
        Some((frames.checked_add(gaps)?, self.cell.height))
    }

    /// Left edge of frame `i`.
    pub fn frame_x(&self, i: u32) -> Option<u32> {
        if i == 0 {
            return Some(0);
        }
        self.cell.width.checked_add(self.gap)?.checked_mul(i)
    }

    pub fn compose(&self, frames: &[PixelGrid]) -> Result<ComposedSheet> {
        if frames.is_empty() {
            return Err(MatteError::Configuration {
                message: "No frames to stitch".to_string(),
                help: Some("Pass at least one frame".to_string()),
            });
        }

        let count = u32::try_from(frames.len()).map_err(|_| self.too_wide(frames.len()))?;
        let (width, height) = self
            .canvas_size(count)
            .ok_or_else(|| self.too_wide(frames.len()))?;
        let mut grid = PixelGrid::new(width, height);
        let mut placements = Vec::with_capacity(frames.len());

        for (i, frame) in frames.iter().enumerate() {
            let cell = frame.resize_nearest(self.cell.width, self.cell.height);
            let x = self
                .frame_x(i as u32)
                .ok_or_else(|| self.too_wide(frames.len()))?;
            grid.paste(&cell, x, 0);
            placements.push(Placement {
                x,
                y: 0,
                w: self.cell.width,
                h: self.cell.height,
            });
        }

        let cleanup = self
            .cleanup
            .as_ref()
            .map(|segmenter| segmenter.segment(&mut grid));

        Ok(ComposedSheet {
            grid,
            placements,
            cleanup,
        })
    }

    fn too_wide(&self, count: usize) -> MatteError {
        MatteError::Configuration {
            message: format!(
                "A sheet of {} frames at {} with a {}px gap is too wide",
                count, self.cell, self.gap
            ),
            help: Some("Use a smaller cell size or gap, or fewer frames".to_string()),
        }
    }
}
