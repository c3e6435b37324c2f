pub mod clean;
pub mod completions;
pub mod flip;
pub mod init;
pub mod sheet;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{Manifest, SegmentOverrides};
use crate::error::Result;
use crate::output::{display_path, Printer, Verbosity};
use crate::segment::Preset;

/// matte - strip flat backgrounds from pixel-art sprites and stitch sheets
#[derive(Parser, Debug)]
#[command(name = "matte")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Manifest to read instead of ./matte.yaml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print every blob decision
    #[arg(long, short, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print warnings and errors
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Make the background of sprites or portraits transparent
    Clean(clean::CleanArgs),

    /// Stitch frames into a single-row sprite sheet
    Sheet(sheet::SheetArgs),

    /// Mirror images left to right
    Flip(flip::FlipArgs),

    /// Write a starter matte.yaml
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

impl Cli {
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else if self.verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }
}

/// Shared state handed to every command.
pub struct Context {
    pub printer: Printer,
    pub manifest: Manifest,
}

impl Context {
    /// Build the printer and load the manifest (explicit path, or ./matte.yaml).
    pub fn load(cli: &Cli) -> Result<Self> {
        let printer = Printer::new(cli.verbosity());
        let cwd = std::env::current_dir()?;
        let (manifest, source) = Manifest::discover(cli.config.as_deref(), &cwd)?;
        if let Some(path) = source {
            printer.verbose("Manifest", &display_path(&path));
        }
        Ok(Self { printer, manifest })
    }
}

/// Segmentation flags shared by `clean` and `sheet`.
#[derive(Args, Debug, Default, Clone)]
pub struct SegmentArgs {
    /// Starting configuration
    #[arg(long, value_enum)]
    pub preset: Option<Preset>,

    /// Background key: top-left, white, or a hex colour
    #[arg(long)]
    pub reference: Option<String>,

    /// Colour distance: euclidean or per-channel
    #[arg(long)]
    pub metric: Option<String>,

    /// Distance below which a pixel counts as background
    #[arg(long, allow_negative_numbers = true)]
    pub tolerance: Option<i64>,

    /// Interior blobs above this fraction of the image are removed
    #[arg(long)]
    pub area_ratio: Option<f64>,

    /// Always remove interior blobs of exactly this many pixels (asset-specific)
    #[arg(long = "size-override", value_delimiter = ',')]
    pub size_overrides: Vec<usize>,

    /// Border pass seeds: corners or border
    #[arg(long)]
    pub seeds: Option<String>,

    /// Skip the flood from the image border
    #[arg(long)]
    pub no_border_pass: bool,

    /// Skip the interior blob scan
    #[arg(long)]
    pub no_interior_pass: bool,
}

impl SegmentArgs {
    pub fn overrides(&self) -> SegmentOverrides {
        SegmentOverrides {
            preset: self.preset.map(|p| p.to_string()),
            reference: self.reference.clone(),
            metric: self.metric.clone(),
            tolerance: self.tolerance,
            area_ratio: self.area_ratio,
            size_overrides: (!self.size_overrides.is_empty()).then(|| self.size_overrides.clone()),
            seeds: self.seeds.clone(),
            border_pass: self.no_border_pass.then_some(false),
            interior_pass: self.no_interior_pass.then_some(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_clean_flags() {
        let cli = Cli::try_parse_from([
            "matte",
            "clean",
            "knight.png",
            "--preset",
            "portrait",
            "--tolerance",
            "-4",
            "--size-override",
            "162,7",
            "--no-border-pass",
        ])
        .unwrap();

        let Commands::Clean(args) = cli.command else {
            panic!("expected clean");
        };
        let overrides = args.segment.overrides();
        assert_eq!(overrides.preset.as_deref(), Some("portrait"));
        assert_eq!(overrides.tolerance, Some(-4));
        assert_eq!(overrides.size_overrides, Some(vec![162, 7]));
        assert_eq!(overrides.border_pass, Some(false));
        assert_eq!(overrides.interior_pass, None);
    }

    #[test]
    fn test_verbosity() {
        let cli = Cli::try_parse_from(["matte", "-q", "flip", "a.png"]).unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Quiet);
        assert!(Cli::try_parse_from(["matte", "-q", "-v", "flip", "a.png"]).is_err());
    }
}
