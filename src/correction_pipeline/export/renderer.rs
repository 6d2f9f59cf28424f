use crate::correction_pipeline::common::error::Result;
use crate::correction_pipeline::export::tile::Tile;
use crate::correction_pipeline::matrix::ColorMatrix;
use crate::correction_pipeline::pixels::PixelBuffer;

/// An offscreen surface holding one rendered tile as RGBA8.
///
/// The surface is released when dropped.
pub trait RenderedTile {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn pixels(&self) -> &[u8];
}

/// Renders the part of `source` that falls into `tile` of an output of
/// `output_size`, with `matrix` applied as a color transform.
pub trait TileRenderer {
    type Surface: RenderedTile;

    fn render_tile(
        &self,
        source: &PixelBuffer,
        tile: &Tile,
        output_size: (usize, usize),
        matrix: &ColorMatrix,
    ) -> Result<Self::Surface>;
}
