//! Flip command implementation.

use std::path::PathBuf;

use clap::Args;

use crate::error::{MatteError, Result};
use crate::io::{load_grid, save_png};
use crate::output::{display_path, plural};

use super::Context;

/// Mirror images left to right
#[derive(Args, Debug)]
pub struct FlipArgs {
    /// Images to flip (overwritten unless --output is given)
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output file (single input only)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

pub fn run(args: FlipArgs, ctx: &Context) -> Result<()> {
    if args.output.is_some() && args.inputs.len() > 1 {
        return Err(MatteError::Configuration {
            message: "--output needs exactly one input".to_string(),
            help: Some("Omit --output to flip several images in place".to_string()),
        });
    }

    for input in &args.inputs {
        let mut grid = load_grid(input)?;
        grid.flip_horizontal();
        let target = args.output.as_ref().unwrap_or(input);
        save_png(&grid, target)?;
        ctx.printer.status(
            "Flipped",
            &format!("{} -> {}", display_path(input), display_path(target)),
        );
    }

    ctx.printer
        .info("Finished", &plural(args.inputs.len(), "image", "images"));
    Ok(())
}
