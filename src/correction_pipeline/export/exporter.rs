use tracing::{debug, info, instrument};

use crate::correction_pipeline::common::cancel::CancellationToken;
use crate::correction_pipeline::common::error::{CorrectionError, Result};
use crate::correction_pipeline::export::cpu_renderer::CpuTileRenderer;
use crate::correction_pipeline::export::renderer::{RenderedTile, TileRenderer};
use crate::correction_pipeline::export::tile::{Tile, TileGrid};
use crate::correction_pipeline::matrix::ColorMatrix;
use crate::correction_pipeline::pixels::{BYTES_PER_PIXEL, ImageBuffer, PixelBuffer};

/// Largest tile edge, in pixels, rendered in one pass.
pub const DEFAULT_TILE_SIZE: usize = 2048;

pub struct TiledExporter<R: TileRenderer> {
    renderer: R,
    tile_size: usize,
}

impl TiledExporter<CpuTileRenderer> {
    pub fn new(tile_size: usize) -> Self {
        Self::with_renderer(CpuTileRenderer::new(), tile_size)
    }
}

impl<R: TileRenderer> TiledExporter<R> {
    pub fn with_renderer(renderer: R, tile_size: usize) -> Self {
        Self { renderer, tile_size }
    }

    pub fn tile_size(&self) -> usize {
        self.tile_size
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Renders `source` at `output_width x output_height` with `matrix`
    /// applied, one tile at a time.
    ///
    /// Each tile surface is dropped right after it is copied into the output,
    /// including when a later step fails. On any error the partial output is
    /// discarded.
    #[instrument(skip(self, source, matrix, cancel), fields(tile_size = self.tile_size))]
    pub fn export(
        &self,
        source: &PixelBuffer,
        matrix: &ColorMatrix,
        output_width: usize,
        output_height: usize,
        cancel: &CancellationToken,
    ) -> Result<ImageBuffer> {
        matrix.validate()?;
        let grid = TileGrid::new(output_width, output_height, self.tile_size)?;

        let output_len = output_width
            .checked_mul(output_height)
            .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
            .ok_or(CorrectionError::InvalidDimensions(output_width, output_height))?;
        let mut output = Vec::new();
        output.try_reserve_exact(output_len).map_err(|e| {
            CorrectionError::ExportFailed(format!(
                "cannot allocate {}x{} output: {}",
                output_width, output_height, e
            ))
        })?;
        output.resize(output_len, 0);

        info!(
            width = output_width,
            height = output_height,
            tiles = grid.len(),
            "Starting tiled export"
        );

        for tile in grid.tiles() {
            cancel.check()?;
            let surface = self
                .renderer
                .render_tile(source, &tile, (output_width, output_height), matrix)
                .map_err(|e| match e {
                    CorrectionError::Cancelled | CorrectionError::ExportFailed(_) => e,
                    other => CorrectionError::ExportFailed(format!(
                        "tile at ({}, {}): {}",
                        tile.x, tile.y, other
                    )),
                })?;
            blit(&mut output, output_width, &tile, &surface)?;
            debug!(x = tile.x, y = tile.y, "Composited {}x{} tile", tile.width, tile.height);
        }

        PixelBuffer::new(output_width, output_height, output)
    }
}

/// Copies `surface` into `output` at the tile's position.
fn blit<S: RenderedTile>(output: &mut [u8], output_width: usize, tile: &Tile, surface: &S) -> Result<()> {
    if surface.width() != tile.width
        || surface.height() != tile.height
        || surface.pixels().len() != tile.pixel_count() * BYTES_PER_PIXEL
    {
        return Err(CorrectionError::ExportFailed(format!(
            "renderer returned a {}x{} surface for a {}x{} tile",
            surface.width(),
            surface.height(),
            tile.width,
            tile.height
        )));
    }

    let stride = output_width * BYTES_PER_PIXEL;
    let tile_stride = tile.width * BYTES_PER_PIXEL;
    for (row, line) in surface.pixels().chunks_exact(tile_stride).enumerate() {
        let start = (tile.y + row) * stride + tile.x * BYTES_PER_PIXEL;
        output[start..start + tile_stride].copy_from_slice(line);
    }
    Ok(())
}
