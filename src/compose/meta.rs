//! Sheet metadata in TexturePacker's JSON Hash format, for game engine interop.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::{MatteError, Result};

use super::ComposedSheet;

/// A named frame rectangle on the sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameMeta {
    pub name: String,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// Everything needed to describe a written sheet.
#[derive(Debug, Clone)]
pub struct SheetMeta {
    pub frames: Vec<FrameMeta>,
    pub image: String,
    pub size: (u32, u32),
}

impl SheetMeta {
    /// Pair each placement with a frame name. Extra names are ignored and
    /// missing ones fall back to `frame-N`.
    pub fn from_sheet(sheet: &ComposedSheet, names: &[String], image: impl Into<String>) -> Self {
        let frames = sheet
            .placements
            .iter()
            .enumerate()
            .map(|(i, p)| FrameMeta {
                name: names
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| format!("frame-{}", i)),
                x: p.x,
                y: p.y,
                w: p.w,
                h: p.h,
            })
            .collect();

        Self {
            frames,
            image: image.into(),
            size: sheet.grid.size(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&TexturePackerJson::from_meta(self)).map_err(|e| {
            MatteError::Parse {
                message: format!("Failed to serialize sheet metadata: {}", e),
                help: None,
            }
        })
    }
}

/// Write sheet metadata as JSON next to the sheet image.
pub fn write_sheet_json(meta: &SheetMeta, path: &Path) -> Result<()> {
    let json = meta.to_json()?;
    fs::write(path, json).map_err(|e| MatteError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write sheet metadata: {}", e),
    })
}

#[derive(Serialize)]
struct TexturePackerJson {
    frames: BTreeMap<String, TPFrame>,
    meta: TPMeta,
}

#[derive(Serialize)]
struct TPFrame {
    frame: TPRect,
    rotated: bool,
    trimmed: bool,
    #[serde(rename = "spriteSourceSize")]
    sprite_source_size: TPRect,
    #[serde(rename = "sourceSize")]
    source_size: TPSize,
}

#[derive(Serialize)]
struct TPRect {
    x: u32,
    y: u32,
    w: u32,
    h: u32,
}

#[derive(Serialize)]
struct TPSize {
    w: u32,
    h: u32,
}

#[derive(Serialize)]
struct TPMeta {
    app: String,
    version: String,
    image: String,
    size: TPSize,
    scale: String,
}

impl TexturePackerJson {
    fn from_meta(meta: &SheetMeta) -> Self {
        let frames = meta
            .frames
            .iter()
            .map(|f| {
                let frame = TPFrame {
                    frame: TPRect {
                        x: f.x,
                        y: f.y,
                        w: f.w,
                        h: f.h,
                    },
                    rotated: false,
                    trimmed: false,
                    sprite_source_size: TPRect {
                        x: 0,
                        y: 0,
                        w: f.w,
                        h: f.h,
                    },
                    source_size: TPSize { w: f.w, h: f.h },
                };
                (f.name.clone(), frame)
            })
            .collect();

        TexturePackerJson {
            frames,
            meta: TPMeta {
                app: "matte".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                image: meta.image.clone(),
                size: TPSize {
                    w: meta.size.0,
                    h: meta.size.1,
                },
                scale: "1".to_string(),
            },
        }
    }
}
