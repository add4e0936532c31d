//! Bitmap fonts
//!
//! Glyphs are pre-rasterized 8x8 cells from the `font8x8` tables, optionally scaled
//! by an integer factor. They are blitted pixel by pixel, never as outlines.

use font8x8::{UnicodeFonts, BASIC_FONTS, BLOCK_FONTS, BOX_FONTS, GREEK_FONTS, LATIN_FONTS};

/// Width and height of an unscaled glyph cell
pub const GLYPH_CELL: u32 = 8;

/// Fixed-cell bitmap font
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapFont {
    scale: u32,
}

impl Default for BitmapFont {
    fn default() -> Self {
        Self::FIXED_8X8
    }
}

impl BitmapFont {
    /// 8x8 pixel cells
    pub const FIXED_8X8: Self = Self { scale: 1 };
    /// 16x16 pixel cells (8x8 glyphs doubled)
    pub const FIXED_16X16: Self = Self { scale: 2 };

    /// Font with cells `8 * scale` pixels wide; a zero scale is treated as 1
    pub fn with_scale(scale: u32) -> Self {
        Self { scale: scale.max(1) }
    }

    /// Integer pixel scale
    pub const fn scale(self) -> u32 {
        self.scale
    }

    /// Look up the bitmap for `ch`
    ///
    /// Returns `None` for characters outside the Basic Latin, Latin-1, Greek,
    /// box-drawing and block-element tables.
    pub fn glyph(self, ch: char) -> Option<Glyph> {
        BASIC_FONTS
            .get(ch)
            .or_else(|| LATIN_FONTS.get(ch))
            .or_else(|| GREEK_FONTS.get(ch))
            .or_else(|| BOX_FONTS.get(ch))
            .or_else(|| BLOCK_FONTS.get(ch))
            .map(|rows| Glyph { rows, scale: self.scale })
    }

    /// Horizontal advance of `text` in pixels; characters without a glyph add nothing
    pub fn text_width(self, text: &str) -> u32 {
        text.chars()
            .filter_map(|ch| self.glyph(ch))
            .map(Glyph::advance)
            .sum()
    }
}

/// One rasterized character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    /// Rows top to bottom; bit 0 is the leftmost pixel
    rows: [u8; 8],
    scale: u32,
}

impl Glyph {
    /// Width in pixels
    pub const fn width(self) -> u32 {
        GLYPH_CELL * self.scale
    }

    /// Raster advance after drawing this glyph
    pub const fn advance(self) -> u32 {
        self.width()
    }

    /// Whether the unscaled cell pixel at (`column`, `row` from the top) is set
    pub fn is_set(self, column: u32, row: u32) -> bool {
        if column >= GLYPH_CELL || row >= GLYPH_CELL {
            return false;
        }
        self.rows[row as usize] & (1 << column) != 0
    }

    /// Lit pixels as `(dx, dy)` offsets from the glyph origin, `dy` growing upwards
    ///
    /// The origin is the bottom-left corner of the cell, matching how bitmaps are
    /// placed at a window-space raster position.
    pub fn lit_pixels(self) -> impl Iterator<Item = (u32, u32)> {
        let scale = self.scale;
        (0..GLYPH_CELL)
            .flat_map(move |row| (0..GLYPH_CELL).map(move |column| (column, row)))
            .filter(move |&(column, row)| self.is_set(column, row))
            .flat_map(move |(column, row)| {
                let base_x = column * scale;
                let base_y = (GLYPH_CELL - 1 - row) * scale;
                (0..scale).flat_map(move |sy| (0..scale).map(move |sx| (base_x + sx, base_y + sy)))
            })
    }

    /// Number of lit pixels after scaling
    pub fn coverage(self) -> u32 {
        self.rows.iter().map(|row| row.count_ones()).sum::<u32>() * self.scale * self.scale
    }
}
