//! Init command implementation.
//!
//! Writes a commented `matte.yaml` seeded from a preset.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::config::MANIFEST_FILENAME;
use crate::error::{MatteError, Result};
use crate::output::display_path;
use crate::segment::{Preset, SegmentConfig};

use super::Context;

/// Write a starter matte.yaml
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to write into (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Preset whose values seed the clean section
    #[arg(long, value_enum, default_value_t = Preset::Sprite)]
    pub preset: Preset,

    /// Overwrite existing matte.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, ctx: &Context) -> Result<()> {
    let manifest_path = args.path.join(MANIFEST_FILENAME);

    if manifest_path.exists() && !args.force {
        return Err(MatteError::Configuration {
            message: format!("{} already exists", MANIFEST_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    let yaml = render_manifest(args.preset);
    fs::create_dir_all(&args.path).map_err(|e| MatteError::Io {
        path: args.path.clone(),
        message: format!("Failed to create directory: {}", e),
    })?;
    fs::write(&manifest_path, yaml).map_err(|e| MatteError::Io {
        path: manifest_path.clone(),
        message: format!("Failed to write manifest: {}", e),
    })?;

    ctx.printer.status("Created", &display_path(&manifest_path));
    Ok(())
}

/// Build the YAML by hand so the comments survive.
fn render_manifest(preset: Preset) -> String {
    let config = SegmentConfig::preset(preset);
    let sizes: Vec<String> = config.size_overrides.iter().map(|s| s.to_string()).collect();

    let mut yaml = String::new();
    yaml.push_str("# matte project settings. Command-line flags take precedence.\n\n");
    yaml.push_str("clean:\n");
    yaml.push_str(&format!("  preset: {}\n", preset));
    yaml.push_str("  # top-left, white, or a quoted hex colour such as \"#FF00FF\"\n");
    yaml.push_str(&format!("  reference: \"{}\"\n", config.reference));
    yaml.push_str("  # euclidean or per-channel\n");
    yaml.push_str(&format!("  metric: {}\n", config.metric));
    yaml.push_str(&format!("  tolerance: {}\n", config.tolerance));
    yaml.push_str("  # interior blobs larger than this fraction of the image are removed\n");
    yaml.push_str(&format!("  area_ratio: {}\n", config.area_ratio));
    yaml.push_str("  # asset-specific: exact blob sizes to always remove\n");
    yaml.push_str(&format!("  size_overrides: [{}]\n", sizes.join(", ")));
    yaml.push_str("  # corners or border\n");
    yaml.push_str(&format!("  seeds: {}\n", config.seeds));
    yaml.push_str(&format!("  border_pass: {}\n", config.border_pass));
    yaml.push_str(&format!("  interior_pass: {}\n", config.interior_pass));
    yaml.push('\n');
    yaml.push_str("sheet:\n");
    yaml.push_str("  cell: 96x96\n");
    yaml.push_str("  gap: 4\n");
    yaml.push_str("  # remove to skip the final cleanup of stitched sheets\n");
    yaml.push_str("  cleanup:\n");
    yaml.push_str("    preset: sheet\n");
    yaml
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Manifest;

    #[test]
    fn test_rendered_manifest_round_trips() {
        for preset in [Preset::Sprite, Preset::Portrait, Preset::Sheet, Preset::Global] {
            let yaml = render_manifest(preset);
            let manifest = Manifest::parse(&yaml).unwrap();
            let config = manifest.clean.resolve(Preset::Sprite).unwrap();
            assert_eq!(config, SegmentConfig::preset(preset));
            assert!(manifest.sheet.resolve().unwrap().cleanup.is_some());
        }
    }
}
