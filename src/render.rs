//! Render Module — paint the recorded frame into the grid and serialize it.
//!
//! Paint order is fixed:
//! 1. Cell borders and header titles
//! 2. Non-active commands
//! 3. Active commands, so overlays win wherever they overlap other glyphs

use crate::layout::Layout;
use crate::style::StyleTable;
use crate::text_utils::glyph_width;
use crate::types::{DrawCommand, Grid, LayoutCell, Style, WIDE_CONTINUATION};

const TOP_LEFT: char = '┌';
const TOP_RIGHT: char = '┐';
const BOTTOM_LEFT: char = '└';
const BOTTOM_RIGHT: char = '┘';
const HORIZONTAL: char = '─';
const VERTICAL: char = '│';

/// Paint borders and both command passes into `grid`.
pub(crate) fn compose(layout: &Layout, grid: &mut Grid) {
    for cell in layout.cells() {
        paint_border(grid, cell);
        if !cell.title.is_empty() {
            paint_text(grid, cell.x, cell.y - 1, &cell.title, Style::Header);
        }
    }

    let (active, passive): (Vec<&DrawCommand>, Vec<&DrawCommand>) =
        layout.commands().iter().partition(|cmd| cmd.active);
    for cmd in passive.into_iter().chain(active) {
        paint_text(grid, cmd.x, cmd.y, &cmd.text, cmd.style);
    }
}

fn paint_border(grid: &mut Grid, cell: &LayoutCell) {
    let (left, right) = (cell.x - 1, cell.right());
    let (top, bottom) = (cell.y - 1, cell.bottom());

    for x in cell.x..right {
        put(grid, x, top, HORIZONTAL, Style::Border);
        put(grid, x, bottom, HORIZONTAL, Style::Border);
    }
    for y in cell.y..bottom {
        put(grid, left, y, VERTICAL, Style::Border);
        put(grid, right, y, VERTICAL, Style::Border);
    }
    put(grid, left, top, TOP_LEFT, Style::Border);
    put(grid, right, top, TOP_RIGHT, Style::Border);
    put(grid, left, bottom, BOTTOM_LEFT, Style::Border);
    put(grid, right, bottom, BOTTOM_RIGHT, Style::Border);
}

/// Write `text` glyph by glyph. Wide glyphs blank their trailing columns;
/// zero-width glyphs are dropped.
fn paint_text(grid: &mut Grid, x: i32, y: i32, text: &str, style: Style) {
    let mut col = x;
    for ch in text.chars() {
        let w = glyph_width(ch) as i32;
        if w == 0 {
            continue;
        }
        if w > 1 && col + w > grid.width as i32 {
            // no room for the trailing half at the right edge
            put(grid, col, y, ' ', style);
            col += w;
            continue;
        }
        put(grid, col, y, ch, style);
        for i in 1..w {
            put(grid, col + i, y, WIDE_CONTINUATION, style);
        }
        col += w;
    }
}

/// Set one column, blanking whatever is left of a wide glyph it cuts through.
fn put(grid: &mut Grid, x: i32, y: i32, ch: char, style: Style) {
    let (old, old_style) = grid.at(x, y);
    if old == WIDE_CONTINUATION {
        let (lead, lead_style) = grid.at(x - 1, y);
        if glyph_width(lead) > 1 {
            grid.set(x - 1, y, ' ', lead_style);
        }
    } else {
        for i in 1..glyph_width(old) as i32 {
            if grid.at(x + i, y).0 == WIDE_CONTINUATION {
                grid.set(x + i, y, ' ', old_style);
            }
        }
    }
    grid.set(x, y, ch, style);
}

/// One line per grid row except the last, each glyph encoded through its style.
pub(crate) fn serialize(grid: &Grid, styles: &StyleTable) -> String {
    let mut out = String::with_capacity(grid.width as usize * grid.height as usize);
    let mut glyph = [0u8; 4];
    for y in 0..grid.height.saturating_sub(1) {
        for (ch, style) in grid.row(y) {
            if ch == WIDE_CONTINUATION {
                continue;
            }
            let text: &str = ch.encode_utf8(&mut glyph);
            match style {
                Style::None => out.push(ch),
                _ => out.push_str(&styles.encode(text, style)),
            }
        }
        out.push('\n');
    }
    out
}
