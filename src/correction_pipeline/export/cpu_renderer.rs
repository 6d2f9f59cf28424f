//! CPU implementation of the tile renderer.
//!
//! Applies the color matrix the same way the preview filter does: channels
//! are normalized to `[0, 1]`, transformed, clamped and rounded back.

use rayon::prelude::*;
use tracing::trace;

use crate::correction_pipeline::common::error::{CorrectionError, Result};
use crate::correction_pipeline::export::renderer::{RenderedTile, TileRenderer};
use crate::correction_pipeline::export::tile::Tile;
use crate::correction_pipeline::matrix::ColorMatrix;
use crate::correction_pipeline::pixels::{BYTES_PER_PIXEL, PixelBuffer};

/// Tile pixel count above which rows are rendered in parallel.
const PARALLEL_THRESHOLD: usize = 1 << 16;

#[derive(Debug, Clone, Copy, Default)]
pub struct CpuTileRenderer {
    max_surface_pixels: Option<usize>,
}

impl CpuTileRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse to allocate surfaces larger than `max_pixels`, like a device
    /// with a texture size limit.
    pub fn with_max_surface_pixels(mut self, max_pixels: usize) -> Self {
        self.max_surface_pixels = Some(max_pixels);
        self
    }
}

#[derive(Debug)]
pub struct CpuTileSurface {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RenderedTile for CpuTileSurface {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn pixels(&self) -> &[u8] {
        &self.data
    }
}

impl TileRenderer for CpuTileRenderer {
    type Surface = CpuTileSurface;

    fn render_tile(
        &self,
        source: &PixelBuffer,
        tile: &Tile,
        output_size: (usize, usize),
        matrix: &ColorMatrix,
    ) -> Result<CpuTileSurface> {
        let pixel_count = tile.pixel_count();
        if let Some(max) = self.max_surface_pixels {
            if pixel_count > max {
                return Err(CorrectionError::ExportFailed(format!(
                    "tile surface {}x{} exceeds the {} pixel limit",
                    tile.width, tile.height, max
                )));
            }
        }

        let stride = tile.width * BYTES_PER_PIXEL;
        let mut data = Vec::new();
        data.try_reserve_exact(pixel_count * BYTES_PER_PIXEL).map_err(|e| {
            CorrectionError::ExportFailed(format!(
                "cannot allocate {}x{} tile surface: {}",
                tile.width, tile.height, e
            ))
        })?;
        data.resize(pixel_count * BYTES_PER_PIXEL, 0);

        trace!(x = tile.x, y = tile.y, "Rendering {}x{} tile", tile.width, tile.height);

        let (out_w, out_h) = output_size;
        let render_row = |(row, line): (usize, &mut [u8])| {
            let sy = source_coordinate(tile.y + row, out_h, source.height());
            let src_row = source.row(sy);
            for (col, px) in line.chunks_exact_mut(BYTES_PER_PIXEL).enumerate() {
                let sx = source_coordinate(tile.x + col, out_w, source.width());
                let offset = sx * BYTES_PER_PIXEL;
                let input = [
                    src_row[offset],
                    src_row[offset + 1],
                    src_row[offset + 2],
                    src_row[offset + 3],
                ];
                px.copy_from_slice(&matrix.transform_rgba8(input));
            }
        };

        if pixel_count >= PARALLEL_THRESHOLD {
            data.par_chunks_exact_mut(stride).enumerate().for_each(render_row);
        } else {
            data.chunks_exact_mut(stride).enumerate().for_each(render_row);
        }

        Ok(CpuTileSurface {
            width: tile.width,
            height: tile.height,
            data,
        })
    }
}

/// Nearest source pixel for output coordinate `out` when the output spans
/// `out_len` pixels and the source `src_len`.
fn source_coordinate(out: usize, out_len: usize, src_len: usize) -> usize {
    if out_len == src_len {
        out
    } else {
        ((out * src_len) / out_len).min(src_len - 1)
    }
}
