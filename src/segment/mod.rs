//! Background/foreground segmentation.
//!
//! [`ColorMatcher`] decides whether a pixel looks like the background key,
//! [`flood_fill`] grows 4-connected regions under that test, and
//! [`Segmenter`] combines them into the border pass and interior scan.

mod blob;
mod config;
mod engine;
mod fill;
mod matcher;

pub use blob::Blob;
pub use config::{Preset, ReferenceColor, SeedStrategy, SegmentConfig};
pub use engine::{segment, BlobVerdict, RemovalReason, SegmentReport, Segmenter, Verdict};
pub use fill::{flood_fill, FillMode, VisitedSet};
pub use matcher::{ColorMatcher, Metric};
