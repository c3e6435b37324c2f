//! Core pixel types.

mod colour;
mod grid;

pub use colour::Colour;
pub use grid::{Coord, PixelGrid};
