use core::fmt;

use bankcpu_core::mem::BcpuMemoryMap;

use crate::display::DisplayView;
use crate::utils::Rgb;
use crate::{DISPLAY_COLS, DISPLAY_ROWS};

const UPPER_HALF_BLOCK: char = '\u{2580}';

///
/// Draws the display with 24-bit ANSI colours. Every character cell holds two
/// vertically stacked blocks: the upper one as foreground of the half-block
/// glyph, the lower one as background.
///
pub fn render_ansi<W: fmt::Write>(w: &mut W, mem: &BcpuMemoryMap) -> fmt::Result {
    let view = DisplayView::new(mem);

    for pair in 0..DISPLAY_ROWS / 2 {
        for col in 0..DISPLAY_COLS {
            let top = view.block(col, pair * 2).color;
            let bottom = view.block(col, pair * 2 + 1).color;
            write_cell(w, top, bottom)?;
        }
        writeln!(w, "\x1b[0m")?;
    }
    Ok(())
}

fn write_cell<W: fmt::Write>(w: &mut W, top: Rgb, bottom: Rgb) -> fmt::Result {
    write!(
        w,
        "\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m{}",
        top.r, top.g, top.b, bottom.r, bottom.g, bottom.b, UPPER_HALF_BLOCK
    )
}
