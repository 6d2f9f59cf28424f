//! Tiled export module
//!
//! Renders the full-resolution result tile by tile so only one tile-sized
//! surface is alive at a time, then composites the tiles into the output.

mod cpu_renderer;
mod exporter;
mod renderer;
pub mod tile;


pub use cpu_renderer::{CpuTileRenderer, CpuTileSurface};
pub use exporter::{DEFAULT_TILE_SIZE, TiledExporter};
pub use renderer::{RenderedTile, TileRenderer};
pub use tile::{Tile, TileGrid};
