//! Tile geometry

use crate::correction_pipeline::common::error::{CorrectionError, Result};

/// One rectangle of the output image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Tile {
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }
}

/// Row-major partition of a `width x height` output into tiles of at most
/// `tile_size x tile_size`; edge tiles are clipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tile_size: usize,
}

impl TileGrid {
    pub fn new(width: usize, height: usize, tile_size: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(CorrectionError::InvalidDimensions(width, height));
        }
        if tile_size == 0 {
            return Err(CorrectionError::InvalidInput("tile size must be positive".to_string()));
        }
        Ok(Self {
            width,
            height,
            tile_size,
        })
    }

    pub fn columns(&self) -> usize {
        self.width.div_ceil(self.tile_size)
    }

    pub fn rows(&self) -> usize {
        self.height.div_ceil(self.tile_size)
    }

    pub fn len(&self) -> usize {
        self.columns() * self.rows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn tile_size(&self) -> usize {
        self.tile_size
    }

    /// Tiles left to right, top to bottom.
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        let columns = self.columns();
        (0..self.len()).map(move |i| {
            let x = (i % columns) * self.tile_size;
            let y = (i / columns) * self.tile_size;
            Tile {
                x,
                y,
                width: self.tile_size.min(self.width - x),
                height: self.tile_size.min(self.height - y),
            }
        })
    }
}
