#![cfg_attr(not(test), no_std)]

mod ansi;
mod display;
mod utils;

pub use ansi::render_ansi;
pub use display::{DisplayBlock, DisplayView};
pub use utils::{decode_color, Rgb};

/* Blocks per display row */
pub const DISPLAY_COLS: usize = 32;

/* Block rows. One block per video memory byte */
pub const DISPLAY_ROWS: usize = bankcpu_core::consts::display::VRAM_NUM_BYTES / DISPLAY_COLS;

/* Edge length of a block in pixels */
pub const BLOCK_NUM_PIXELS: usize = 16;

pub const RASTER_WIDTH: usize = DISPLAY_COLS * BLOCK_NUM_PIXELS;
pub const RASTER_HEIGHT: usize = DISPLAY_ROWS * BLOCK_NUM_PIXELS;

/* Size of an RGB888 frame produced by `DisplayView::rasterize` */
pub const RASTER_NUM_BYTES: usize = RASTER_WIDTH * RASTER_HEIGHT * 3;
