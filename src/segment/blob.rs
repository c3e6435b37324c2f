//! Connected components found by the interior scan.

use crate::types::{Coord, PixelGrid};

/// One 4-connected component of background-coloured pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    members: Vec<Coord>,
    touches_edge: bool,
}

impl Blob {
    /// Wrap the pixels reached by a component fill.
    pub fn new(grid: &PixelGrid, members: Vec<Coord>) -> Self {
        let touches_edge = members.iter().any(|&c| grid.on_edge(c));
        Self {
            members,
            touches_edge,
        }
    }

    pub fn size(&self) -> usize {
        self.members.len()
    }

    pub fn touches_edge(&self) -> bool {
        self.touches_edge
    }

    /// First pixel reached, i.e. the scan position that discovered the blob.
    pub fn origin(&self) -> Option<Coord> {
        self.members.first().copied()
    }

    pub fn members(&self) -> &[Coord] {
        &self.members
    }
}
