//! Sheet command implementation.
//!
//! Loads frames in the order given, optionally cleans and mirrors each one,
//! stitches them into a single row and writes the sheet.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::compose::{write_sheet_json, SheetCompositor, SheetMeta};
use crate::config::{SegmentOverrides, SheetOverrides};
use crate::error::Result;
use crate::io::{load_grid, save_png};
use crate::output::{display_path, plural};
use crate::segment::{Preset, Segmenter};
use crate::types::PixelGrid;

use super::{Context, SegmentArgs};

/// Stitch frames into a single-row sprite sheet
#[derive(Args, Debug)]
pub struct SheetArgs {
    /// Sheet image to write
    pub output: PathBuf,

    /// Frame images, left to right
    #[arg(required = true)]
    pub frames: Vec<PathBuf>,

    /// Cell size as WxH (default 96x96)
    #[arg(long)]
    pub cell: Option<String>,

    /// Gap between cells in pixels (default 4)
    #[arg(long)]
    pub gap: Option<u32>,

    /// Mirror every frame left to right before stitching
    #[arg(long)]
    pub flip: bool,

    /// Clean each frame before stitching, using the clean settings
    #[arg(long)]
    pub clean_frames: bool,

    /// Run a white-key cleanup over the finished sheet
    #[arg(long, conflicts_with = "no_cleanup")]
    pub cleanup: bool,

    /// Skip the cleanup pass even if matte.yaml enables it
    #[arg(long)]
    pub no_cleanup: bool,

    /// Also write TexturePacker JSON frame metadata
    #[arg(long)]
    pub json: Option<PathBuf>,

    #[command(flatten)]
    pub segment: SegmentArgs,
}

pub fn run(args: SheetArgs, ctx: &Context) -> Result<()> {
    let printer = &ctx.printer;

    let mut sheet = SheetOverrides {
        cell: args.cell.clone(),
        gap: args.gap,
        cleanup: args.cleanup.then(SegmentOverrides::default),
    }
    .or(ctx.manifest.sheet.clone());
    if args.no_cleanup {
        sheet.cleanup = None;
    }
    let sheet_config = sheet.resolve()?;
    let compositor = SheetCompositor::new(sheet_config.clone())?;

    let frame_cleaner = if args.clean_frames {
        let config = args
            .segment
            .overrides()
            .or(ctx.manifest.clean.clone())
            .resolve(Preset::Sprite)?;
        Some(Segmenter::new(config)?)
    } else {
        None
    };

    printer.status(
        "Stitching",
        &format!(
            "{} into {} ({} cells, {}px gap)",
            plural(args.frames.len(), "frame", "frames"),
            display_path(&args.output),
            sheet_config.cell,
            sheet_config.gap
        ),
    );

    let mut frames: Vec<PixelGrid> = Vec::with_capacity(args.frames.len());
    for path in &args.frames {
        let mut grid = load_grid(path)?;
        if args.flip {
            grid.flip_horizontal();
        }
        if let Some(cleaner) = &frame_cleaner {
            let report = cleaner.segment(&mut grid);
            printer.report(&display_path(path), &report);
        }
        frames.push(grid);
    }

    let composed = compositor.compose(&frames)?;
    if let Some(report) = &composed.cleanup {
        printer.report("sheet", report);
    }

    save_png(&composed.grid, &args.output)?;

    if let Some(json_path) = &args.json {
        let names: Vec<String> = args.frames.iter().map(|p| frame_name(p)).collect();
        let image = args
            .output
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "sheet.png".to_string());
        let meta = SheetMeta::from_sheet(&composed, &names, image);
        write_sheet_json(&meta, json_path)?;
        printer.verbose("Wrote", &display_path(json_path));
    }

    let (w, h) = composed.grid.size();
    printer.info(
        "Finished",
        &format!("{} ({}x{})", display_path(&args.output), w, h),
    );
    Ok(())
}

/// Frame name for metadata: the file stem.
fn frame_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("frame")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_name() {
        assert_eq!(frame_name(Path::new("assets/knight_frame1.png")), "knight_frame1");
        assert_eq!(frame_name(Path::new("")), "frame");
    }
}
