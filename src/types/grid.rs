//! Pixel grid - the RGBA raster every pipeline stage works on.

use image::{Rgba, RgbaImage};

use crate::error::{MatteError, Result};

use super::Colour;

/// A pixel position. `x` grows right, `y` grows down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub x: u32,
    pub y: u32,
}

impl Coord {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// The four edge-sharing neighbours, skipping any that would underflow.
    ///
    /// Neighbours past the right/bottom edge are still returned; callers
    /// bounds-check against the grid.
    pub fn neighbours(self) -> impl Iterator<Item = Coord> {
        let Coord { x, y } = self;
        [
            x.checked_add(1).map(|x| Coord::new(x, y)),
            x.checked_sub(1).map(|x| Coord::new(x, y)),
            y.checked_add(1).map(|y| Coord::new(x, y)),
            y.checked_sub(1).map(|y| Coord::new(x, y)),
        ]
        .into_iter()
        .flatten()
    }
}

/// A width x height grid of RGBA pixels (row-major).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<Colour>,
}

impl PixelGrid {
    /// Create a grid filled with a single colour.
    pub fn filled(width: u32, height: u32, colour: Colour) -> Self {
        Self {
            width,
            height,
            pixels: vec![colour; width as usize * height as usize],
        }
    }

    /// Create a fully transparent grid.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Colour::TRANSPARENT)
    }

    /// Wrap a row-major pixel buffer.
    ///
    /// Fails when the buffer length does not match `width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Colour>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(MatteError::InvalidGrid {
                message: format!(
                    "{}x{} grid needs {} pixels, got {}",
                    width,
                    height,
                    expected,
                    pixels.len()
                ),
                help: None,
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build a grid from rows of colours (`rows[y][x]`).
    pub fn from_rows(rows: Vec<Vec<Colour>>) -> Result<Self> {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.len()) as u32;
        if rows.iter().any(|r| r.len() as u32 != width) {
            return Err(MatteError::InvalidGrid {
                message: "rows have differing lengths".to_string(),
                help: Some("Every row must contain the same number of pixels".to_string()),
            });
        }
        Self::from_pixels(width, height, rows.into_iter().flatten().collect())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the dimensions as (width, height).
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Total number of pixels.
    pub fn area(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn contains(&self, c: Coord) -> bool {
        c.x < self.width && c.y < self.height
    }

    /// Whether `c` lies on the outer border.
    pub fn on_edge(&self, c: Coord) -> bool {
        c.x == 0 || c.y == 0 || c.x + 1 == self.width || c.y + 1 == self.height
    }

    /// Row-major index of an in-bounds coordinate.
    pub fn index(&self, c: Coord) -> Option<usize> {
        self.contains(c)
            .then(|| c.y as usize * self.width as usize + c.x as usize)
    }

    /// Coordinate of a row-major index.
    pub fn coord(&self, index: usize) -> Coord {
        let w = self.width.max(1) as usize;
        Coord::new((index % w) as u32, (index / w) as u32)
    }

    pub fn get(&self, c: Coord) -> Option<Colour> {
        self.index(c).map(|i| self.pixels[i])
    }

    /// Overwrite a pixel. Out-of-bounds writes are ignored.
    pub fn set(&mut self, c: Coord, colour: Colour) {
        if let Some(i) = self.index(c) {
            self.pixels[i] = colour;
        }
    }

    /// Rewrite only the alpha channel of a pixel.
    pub fn set_alpha(&mut self, c: Coord, alpha: u8) {
        if let Some(i) = self.index(c) {
            self.pixels[i].a = alpha;
        }
    }

    pub fn pixels(&self) -> &[Colour] {
        &self.pixels
    }

    /// All coordinates in raster order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Coord::new(x, y)))
    }

    /// The four corners, deduplicated for 1-pixel-wide or tall grids.
    pub fn corners(&self) -> Vec<Coord> {
        if self.is_empty() {
            return vec![];
        }
        let (r, b) = (self.width - 1, self.height - 1);
        let mut corners = vec![
            Coord::new(0, 0),
            Coord::new(r, 0),
            Coord::new(0, b),
            Coord::new(r, b),
        ];
        corners.sort();
        corners.dedup();
        corners
    }

    /// Every border pixel, clockwise from the top-left, without repeats.
    pub fn border(&self) -> Vec<Coord> {
        if self.is_empty() {
            return vec![];
        }
        let (w, h) = self.size();
        let mut border: Vec<Coord> = (0..w).map(|x| Coord::new(x, 0)).collect();
        border.extend((1..h).map(|y| Coord::new(w - 1, y)));
        if h > 1 {
            border.extend((0..w - 1).rev().map(|x| Coord::new(x, h - 1)));
        }
        if w > 1 {
            border.extend((1..h - 1).rev().map(|y| Coord::new(0, y)));
        }
        border
    }

    /// Number of fully transparent pixels.
    pub fn transparent_count(&self) -> usize {
        self.pixels.iter().filter(|p| p.is_transparent()).count()
    }

    /// Mirror the grid left-to-right in place.
    pub fn flip_horizontal(&mut self) {
        let w = self.width as usize;
        if w == 0 {
            return;
        }
        for row in self.pixels.chunks_mut(w) {
            row.reverse();
        }
    }

    /// Copy `src` onto this grid with its top-left at (x, y), clipping at the edges.
    pub fn paste(&mut self, src: &PixelGrid, x: u32, y: u32) {
        for c in src.coords() {
            let (Some(dx), Some(dy)) = (x.checked_add(c.x), y.checked_add(c.y)) else {
                continue;
            };
            if let Some(colour) = src.get(c) {
                self.set(Coord::new(dx, dy), colour);
            }
        }
    }

    /// Nearest-neighbour resample to a new size.
    ///
    /// Each destination pixel takes the source pixel under its centre, so
    /// hard pixel-art edges never get blended.
    pub fn resize_nearest(&self, width: u32, height: u32) -> PixelGrid {
        if self.size() == (width, height) {
            return self.clone();
        }
        if self.is_empty() {
            return PixelGrid::new(width, height);
        }

        let (sw, sh) = (self.width as u64, self.height as u64);
        let (dw, dh) = (width as u64, height as u64);
        let mut out = PixelGrid::new(width, height);
        for dy in 0..height {
            let sy = ((2 * dy as u64 + 1) * sh / (2 * dh)).min(sh - 1) as u32;
            for dx in 0..width {
                let sx = ((2 * dx as u64 + 1) * sw / (2 * dw)).min(sw - 1) as u32;
                if let Some(colour) = self.get(Coord::new(sx, sy)) {
                    out.set(Coord::new(dx, dy), colour);
                }
            }
        }
        out
    }
}

impl From<&RgbaImage> for PixelGrid {
    fn from(img: &RgbaImage) -> Self {
        Self {
            width: img.width(),
            height: img.height(),
            pixels: img.pixels().map(|p| Colour::from(p.0)).collect(),
        }
    }
}

impl From<&PixelGrid> for RgbaImage {
    fn from(grid: &PixelGrid) -> Self {
        RgbaImage::from_fn(grid.width, grid.height, |x, y| {
            Rgba(grid.get(Coord::new(x, y)).unwrap_or_default().to_rgba())
        })
    }
}
