use bankcpu_core::consts::display::{VRAM_FIRST_BANK, VRAM_NUM_BYTES};
use bankcpu_core::consts::MEM_BANK_NUM_BYTES;
use bankcpu_core::mem::BcpuMemoryMap;
use log::warn;

use crate::utils::{decode_color, Rgb};
use crate::{BLOCK_NUM_PIXELS, DISPLAY_COLS, RASTER_NUM_BYTES, RASTER_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayBlock {
    pub col: usize,
    pub row: usize,
    pub value: u8,
    pub color: Rgb,
}

///
/// ## DisplayView Module
///
/// Read-only window over the four video banks. Nothing here writes to memory
/// and the core never calls into it. A host builds a view whenever it wants
/// to redraw and pulls the current block colours out of it.
///
pub struct DisplayView<'a> {
    mem: &'a BcpuMemoryMap,
}

impl<'a> DisplayView<'a> {
    pub fn new(mem: &'a BcpuMemoryMap) -> Self {
        DisplayView { mem }
    }

    /// Raw video byte for block `idx`, counting row-major from the top left.
    pub fn value(&self, idx: usize) -> u8 {
        let idx = idx % VRAM_NUM_BYTES;
        let bank = VRAM_FIRST_BANK + (idx / MEM_BANK_NUM_BYTES) as u8;
        self.mem.read_byte(bank, (idx % MEM_BANK_NUM_BYTES) as u8)
    }

    pub fn block(&self, col: usize, row: usize) -> DisplayBlock {
        let value = self.value(row * DISPLAY_COLS + col);
        DisplayBlock {
            col,
            row,
            value,
            color: decode_color(value),
        }
    }

    pub fn blocks(&self) -> impl Iterator<Item = DisplayBlock> + '_ {
        (0..VRAM_NUM_BYTES).map(move |idx| self.block(idx % DISPLAY_COLS, idx / DISPLAY_COLS))
    }

    ///
    /// # Description
    ///
    /// Paints every block into an RGB888 frame, `RASTER_WIDTH` pixels per
    /// line, three bytes per pixel.
    ///
    /// # Return Value
    ///
    ///  - `false` when `frame` is shorter than `RASTER_NUM_BYTES`. The frame
    ///    is left untouched in that case.
    ///
    pub fn rasterize(&self, frame: &mut [u8]) -> bool {
        if frame.len() < RASTER_NUM_BYTES {
            warn!(
                "Raster frame too small: {} bytes, need {}",
                frame.len(),
                RASTER_NUM_BYTES
            );
            return false;
        }

        for block in self.blocks() {
            let c = block.color;
            for y in 0..BLOCK_NUM_PIXELS {
                let line = block.row * BLOCK_NUM_PIXELS + y;
                let start = (line * RASTER_WIDTH + block.col * BLOCK_NUM_PIXELS) * 3;
                for px in frame[start..start + BLOCK_NUM_PIXELS * 3].chunks_mut(3) {
                    px[0] = c.r;
                    px[1] = c.g;
                    px[2] = c.b;
                }
            }
        }
        true
    }
}
