//! Reading and writing pixel grids as image files.

use std::fs;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use walkdir::WalkDir;

use crate::error::{MatteError, Result};
use crate::types::PixelGrid;

/// Decode an image file into an RGBA grid.
pub fn load_grid(path: &Path) -> Result<PixelGrid> {
    if !path.exists() {
        return Err(MatteError::Io {
            path: path.to_path_buf(),
            message: "File not found".to_string(),
        });
    }

    let img = image::open(path)
        .map_err(|e| MatteError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to load image: {}", e),
        })?
        .to_rgba8();

    if img.width() == 0 || img.height() == 0 {
        return Err(MatteError::InvalidGrid {
            message: format!(
                "{} has zero dimensions ({}x{})",
                path.display(),
                img.width(),
                img.height()
            ),
            help: Some("Input image must have non-zero width and height".to_string()),
        });
    }

    Ok(PixelGrid::from(&img))
}

/// Write a grid as an RGBA PNG, creating parent directories as needed.
pub fn save_png(grid: &PixelGrid, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| MatteError::Io {
            path: parent.to_path_buf(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    let img = RgbaImage::from(grid);
    img.save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| MatteError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to write PNG: {}", e),
        })
}

/// Expand inputs into image files: files pass through, directories are
/// walked for `.png` files in sorted order.
pub fn collect_pngs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if !input.is_dir() {
            files.push(input.clone());
            continue;
        }
        for entry in WalkDir::new(input).sort_by_file_name() {
            let entry = entry.map_err(|e| MatteError::Io {
                path: input.clone(),
                message: format!("Failed to read directory: {}", e),
            })?;
            if entry.file_type().is_file() && is_png(entry.path()) {
                files.push(entry.into_path());
            }
        }
    }
    Ok(files)
}

fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Colour, Coord};
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load_keeps_alpha() {
        let mut grid = PixelGrid::filled(2, 2, Colour::MAGENTA);
        grid.set_alpha(Coord::new(0, 0), 0);

        let dir = tempdir().unwrap();
        let path = dir.path().join("out").join("sprite.png");
        save_png(&grid, &path).unwrap();

        let loaded = load_grid(&path).unwrap();
        assert_eq!(loaded, grid);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_grid(&dir.path().join("nope.png")).unwrap_err();
        assert!(matches!(err, MatteError::Io { .. }));
    }

    #[test]
    fn test_load_not_an_image() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fake.png");
        fs::write(&path, b"not a png").unwrap();
        assert!(load_grid(&path).is_err());
    }

    #[test]
    fn test_collect_pngs_walks_directories() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("portraits");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("b.png"), b"").unwrap();
        fs::write(nested.join("a.PNG"), b"").unwrap();
        fs::write(nested.join("notes.txt"), b"").unwrap();
        let single = dir.path().join("single.png");

        let files = collect_pngs(&[dir.path().to_path_buf(), single.clone()]).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.PNG", "b.png", "single.png"]);
    }
}
