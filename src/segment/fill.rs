//! Breadth-first region growing over 4-connected pixels.
//!
//! Both segmentation passes share this traversal. They differ only in what
//! happens on acceptance (the `on_accept` hook) and in whether a rejected
//! pixel counts as decided ([`FillMode`]).

use std::collections::{HashSet, VecDeque};

use crate::types::{Colour, Coord, PixelGrid};

/// Pixels already decided during one segmentation run.
#[derive(Debug, Clone)]
pub struct VisitedSet {
    width: u32,
    height: u32,
    bits: Vec<bool>,
    count: usize,
}

impl VisitedSet {
    /// An empty set sized for `grid`.
    pub fn for_grid(grid: &PixelGrid) -> Self {
        Self {
            width: grid.width(),
            height: grid.height(),
            bits: vec![false; grid.area()],
            count: 0,
        }
    }

    fn index(&self, c: Coord) -> Option<usize> {
        (c.x < self.width && c.y < self.height)
            .then(|| c.y as usize * self.width as usize + c.x as usize)
    }

    pub fn contains(&self, c: Coord) -> bool {
        self.index(c).is_some_and(|i| self.bits[i])
    }

    /// Mark `c` as visited. Returns false if it already was, or is out of bounds.
    pub fn insert(&mut self, c: Coord) -> bool {
        match self.index(c) {
            Some(i) if !self.bits[i] => {
                self.bits[i] = true;
                self.count += 1;
                true
            }
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// What a fill does with a dequeued pixel that fails the predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillMode {
    /// Rejected pixels are marked visited: growth from the border stops at
    /// foreground, and that foreground is settled.
    Border,
    /// Rejected pixels are left for later scans.
    Component,
}

/// Grow a region from `seeds`.
///
/// A pixel is accepted when it is opaque enough to matter (alpha != 0) and
/// satisfies `predicate`. Accepted pixels are marked in `visited`, handed to
/// `on_accept`, and returned in visit order. Out-of-bounds, already-visited
/// and transparent seeds are dropped.
pub fn flood_fill<P, F>(
    grid: &mut PixelGrid,
    seeds: &[Coord],
    predicate: P,
    visited: &mut VisitedSet,
    mode: FillMode,
    mut on_accept: F,
) -> Vec<Coord>
where
    P: Fn(Colour) -> bool,
    F: FnMut(&mut PixelGrid, Coord),
{
    let mut reached = Vec::new();
    let mut queue = VecDeque::new();
    let mut queued = HashSet::new();

    for &seed in seeds {
        if grid.contains(seed) && !visited.contains(seed) && queued.insert(seed) {
            queue.push_back(seed);
        }
    }

    while let Some(c) = queue.pop_front() {
        let accepted = grid
            .get(c)
            .is_some_and(|p| !p.is_transparent() && predicate(p));

        if !accepted {
            if mode == FillMode::Border {
                visited.insert(c);
            }
            continue;
        }

        visited.insert(c);
        on_accept(grid, c);
        reached.push(c);

        for n in c.neighbours() {
            if grid.contains(n) && !visited.contains(n) && queued.insert(n) {
                queue.push_back(n);
            }
        }
    }

    reached
}
