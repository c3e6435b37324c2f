//! Sheet assembly: stitching cleaned frames and describing the result.

mod meta;
mod sheet;

pub use meta::{write_sheet_json, FrameMeta, SheetMeta};
pub use sheet::{CellSize, ComposedSheet, Placement, SheetCompositor, SheetConfig};
