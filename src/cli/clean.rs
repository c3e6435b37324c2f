//! Clean command implementation.
//!
//! Loads each image, segments it, and writes the result.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::error::{MatteError, Result};
use crate::io::{collect_pngs, load_grid, save_png};
use crate::output::{display_path, plural};
use crate::segment::{Preset, Segmenter};

use super::{Context, SegmentArgs};

/// Make the background of sprites or portraits transparent
#[derive(Args, Debug)]
pub struct CleanArgs {
    /// Images or directories of PNGs to clean
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output file (single input only; default: overwrite the input)
    #[arg(long, short, conflicts_with = "out_dir")]
    pub output: Option<PathBuf>,

    /// Write cleaned images into this directory instead of in place
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Segment and report without writing anything
    #[arg(long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub segment: SegmentArgs,
}

pub fn run(args: CleanArgs, ctx: &Context) -> Result<()> {
    let printer = &ctx.printer;
    let config = args
        .segment
        .overrides()
        .or(ctx.manifest.clean.clone())
        .resolve(Preset::Sprite)?;
    let segmenter = Segmenter::new(config)?;

    let files = collect_pngs(&args.inputs)?;
    if files.is_empty() {
        printer.warning("Warning", "No PNG files found");
        return Ok(());
    }
    if args.output.is_some() && files.len() > 1 {
        return Err(MatteError::Configuration {
            message: format!("--output given with {}", plural(files.len(), "input", "inputs")),
            help: Some("Use --out-dir to clean several images at once".to_string()),
        });
    }

    let cfg = segmenter.config();
    printer.verbose(
        "Using",
        &format!(
            "key {}, {} < {}, area ratio {}",
            cfg.reference, cfg.metric, cfg.tolerance, cfg.area_ratio
        ),
    );

    for file in &files {
        let mut grid = load_grid(file)?;
        let (w, h) = grid.size();
        printer.status("Cleaning", &format!("{} ({}x{})", display_path(file), w, h));

        let report = segmenter.segment(&mut grid);
        printer.report(&display_path(file), &report);

        if args.dry_run {
            continue;
        }
        let target = target_path(file, args.output.as_deref(), args.out_dir.as_deref());
        save_png(&grid, &target)?;
        printer.verbose("Wrote", &display_path(&target));
    }

    printer.info("Finished", &plural(files.len(), "image", "images"));
    Ok(())
}

/// Where a cleaned image goes: explicit output, into `out_dir`, or in place.
fn target_path(input: &Path, output: Option<&Path>, out_dir: Option<&Path>) -> PathBuf {
    match (output, out_dir) {
        (Some(output), _) => output.to_path_buf(),
        (None, Some(dir)) => dir.join(input.file_name().unwrap_or(input.as_os_str())),
        (None, None) => input.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_path() {
        let input = Path::new("assets/knight.png");
        assert_eq!(target_path(input, None, None), PathBuf::from("assets/knight.png"));
        assert_eq!(
            target_path(input, Some(Path::new("out.png")), None),
            PathBuf::from("out.png")
        );
        assert_eq!(
            target_path(input, None, Some(Path::new("dist"))),
            PathBuf::from("dist/knight.png")
        );
    }
}
