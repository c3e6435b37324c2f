//! Background segmenter.
//!
//! Runs in two phases over one grid:
//!
//! 1. **Border pass** - flood from the corners (or every border pixel) and
//!    clear all background reachable from outside the sprite.
//! 2. **Interior scan** - raster-scan what is left, collect each remaining
//!    background-coloured component, and clear it if it touches the edge,
//!    is large relative to the image, or matches a configured exact size.
//!
//! Small enclosed components (eyes, highlights, buckles) survive phase 2.

use crate::error::Result;
use crate::types::{Coord, PixelGrid};

use super::blob::Blob;
use super::fill::{flood_fill, FillMode, VisitedSet};
use super::{ColorMatcher, SegmentConfig};

/// Why an interior blob was cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalReason {
    TouchesEdge,
    Large,
    SizeOverride,
}

/// Outcome for one interior blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Kept,
    Removed(RemovalReason),
}

/// An interior blob and what happened to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobVerdict {
    pub origin: Coord,
    pub size: usize,
    pub touches_edge: bool,
    pub verdict: Verdict,
}

impl BlobVerdict {
    pub fn removed(&self) -> bool {
        matches!(self.verdict, Verdict::Removed(_))
    }
}

/// Summary of one segmentation run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentReport {
    /// Pixels cleared by the border pass.
    pub border_removed: usize,
    /// Interior blobs in discovery order.
    pub blobs: Vec<BlobVerdict>,
}

impl SegmentReport {
    /// Total pixels made transparent.
    pub fn removed_pixels(&self) -> usize {
        self.border_removed
            + self
                .blobs
                .iter()
                .filter(|b| b.removed())
                .map(|b| b.size)
                .sum::<usize>()
    }

    pub fn removed_count(&self) -> usize {
        self.blobs.iter().filter(|b| b.removed()).count()
    }

    pub fn kept_count(&self) -> usize {
        self.blobs.len() - self.removed_count()
    }
}

/// A validated segmenter, reusable across grids.
#[derive(Debug, Clone)]
pub struct Segmenter {
    config: SegmentConfig,
}

impl Segmenter {
    /// Validate `config` up front so a run never fails half way.
    pub fn new(config: SegmentConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SegmentConfig {
        &self.config
    }

    /// Clear the background of `grid` in place.
    pub fn segment(&self, grid: &mut PixelGrid) -> SegmentReport {
        let mut report = SegmentReport::default();
        let Some(reference) = self.config.reference.resolve(grid) else {
            return report;
        };

        // validate() bounds tolerance to u32.
        let tolerance = self.config.tolerance.clamp(0, u32::MAX as i64) as u32;
        let matcher = ColorMatcher::new(reference, self.config.metric, tolerance);
        let mut visited = VisitedSet::for_grid(grid);

        if self.config.border_pass {
            let seeds = self.config.seeds.seeds(grid);
            report.border_removed = flood_fill(
                grid,
                &seeds,
                |p| matcher.matches(p),
                &mut visited,
                FillMode::Border,
                |g, c| g.set_alpha(c, 0),
            )
            .len();
        }

        if self.config.interior_pass {
            self.scan_interior(grid, &matcher, &mut visited, &mut report);
        }

        report
    }

    fn scan_interior(
        &self,
        grid: &mut PixelGrid,
        matcher: &ColorMatcher,
        visited: &mut VisitedSet,
        report: &mut SegmentReport,
    ) {
        let limit = self.config.area_ratio * grid.area() as f64;

        for index in 0..grid.area() {
            let start = grid.coord(index);
            if visited.contains(start) {
                continue;
            }
            match grid.get(start) {
                Some(p) if !p.is_transparent() && matcher.matches(p) => {}
                _ => continue,
            }

            let members = flood_fill(
                grid,
                &[start],
                |p| matcher.matches(p),
                visited,
                FillMode::Component,
                |_, _| {},
            );
            let blob = Blob::new(grid, members);
            let verdict = self.judge(&blob, limit);

            if let Verdict::Removed(_) = verdict {
                for &c in blob.members() {
                    grid.set_alpha(c, 0);
                }
            }

            report.blobs.push(BlobVerdict {
                origin: blob.origin().unwrap_or(start),
                size: blob.size(),
                touches_edge: blob.touches_edge(),
                verdict,
            });
        }
    }

    fn judge(&self, blob: &Blob, limit: f64) -> Verdict {
        if blob.touches_edge() {
            Verdict::Removed(RemovalReason::TouchesEdge)
        } else if blob.size() as f64 > limit {
            Verdict::Removed(RemovalReason::Large)
        } else if self.config.size_overrides.contains(&blob.size()) {
            Verdict::Removed(RemovalReason::SizeOverride)
        } else {
            Verdict::Kept
        }
    }
}

/// Validate `config` and segment `grid` in one call.
pub fn segment(grid: &mut PixelGrid, config: &SegmentConfig) -> Result<SegmentReport> {
    let segmenter = Segmenter::new(config.clone())?;
    Ok(segmenter.segment(grid))
}
