//! matte - background removal for pixel-art sprites
//!
//! A library for making flat backgrounds transparent in sprite and portrait
//! images and stitching the cleaned frames into sprite sheets.

pub mod cli;
pub mod compose;
pub mod config;
pub mod error;
pub mod io;
pub mod output;
pub mod segment;
pub mod types;

pub use compose::{
    write_sheet_json, CellSize, ComposedSheet, SheetCompositor, SheetConfig, SheetMeta,
};
pub use config::{Manifest, SegmentOverrides, SheetOverrides};
pub use error::{MatteError, Result};
pub use io::{load_grid, save_png};
pub use segment::{
    flood_fill, segment, Blob, ColorMatcher, FillMode, Metric, Preset, ReferenceColor,
    SeedStrategy, SegmentConfig, SegmentReport, Segmenter, Verdict, VisitedSet,
};
pub use types::{Colour, Coord, PixelGrid};
