//! The empty inventory frame: the background chrome of a Minecraft GUI.

use image::Rgba;

use super::{ElementDefinition, GlyphPalette, decode_glyph};
use crate::{
    ElementError,
    geometry::{Point, Rect, Size},
    schema::ConfigValues,
    surface::{Pixel, PixelBuffer, PixelSurface},
};

const BLACK: Pixel = Rgba([0x00, 0x00, 0x00, 0xff]);
const WHITE: Pixel = Rgba([0xff, 0xff, 0xff, 0xff]);
const GRAY: Pixel = Rgba([0xc6, 0xc6, 0xc6, 0xff]);
const DARK_GRAY: Pixel = Rgba([0x55, 0x55, 0x55, 0xff]);

const PALETTE: &GlyphPalette = &[('b', BLACK), ('w', WHITE), ('g', GRAY), ('d', DARK_GRAY)];

/// Corner blocks are `CORNER` x `CORNER` pixels.
const CORNER: i32 = 4;

// Rows are spelled out with explicit newlines so trailing spaces survive.
const TOP_LEFT: &str = concat!("  bb\n", " bww\n", "bwww\n", "bwww\n");
const TOP_RIGHT: &str = concat!("b   \n", "wb  \n", "wgb \n", "gddb\n");
const BOTTOM_LEFT: &str = concat!("bwwg\n", " bgd\n", "  bd\n", "   b\n");
const BOTTOM_RIGHT: &str = concat!("dddb\n", "dddb\n", "ddb \n", "bb  \n");

/// The beveled frame every inventory texture starts from.
///
/// Four 4x4 corner glyphs, a 1px black outline, a 2px white highlight on
/// the top and left, a 2px dark gray shadow on the bottom and right, a 1px
/// gray inner bevel and a flat gray center. The border keeps its thickness
/// at any size.
#[derive(Debug, Clone)]
pub struct EmptyInventoryElement {
    top_left: PixelBuffer,
    top_right: PixelBuffer,
    bottom_left: PixelBuffer,
    bottom_right: PixelBuffer,
}

impl EmptyInventoryElement {
    /// Decodes the corner glyphs.
    ///
    /// # Errors
    ///
    /// Returns an [`ElementError`] if a corner glyph is malformed.
    pub fn new() -> Result<Self, ElementError> {
        let corner = |text| decode_glyph(text, CORNER as u32, CORNER as u32, PALETTE);
        Ok(Self {
            top_left: corner(TOP_LEFT)?,
            top_right: corner(TOP_RIGHT)?,
            bottom_left: corner(BOTTOM_LEFT)?,
            bottom_right: corner(BOTTOM_RIGHT)?,
        })
    }

    /// The decoded top-left corner glyph.
    pub fn top_left_corner(&self) -> &PixelBuffer {
        &self.top_left
    }
}

impl ElementDefinition for EmptyInventoryElement {
    fn min_size(&self) -> Size {
        Size::new(8, 8)
    }

    fn render(&self, surface: &mut dyn PixelSurface, rect: Rect, _config: &ConfigValues) {
        let (x, y) = (rect.x(), rect.y());
        let (width, height) = (rect.width(), rect.height());
        let right = x + width;
        let bottom = y + height;

        surface.blit(Point::new(x, y), &self.top_left);
        surface.blit(Point::new(right - CORNER, y), &self.top_right);
        surface.blit(Point::new(x, bottom - CORNER), &self.bottom_left);
        surface.blit(Point::new(right - CORNER, bottom - CORNER), &self.bottom_right);

        let bar_width = width - 2 * CORNER;
        let bar_height = height - 2 * CORNER;

        // Outline
        surface.fill_rect(Rect::new(x + CORNER, y, bar_width, 1), BLACK);
        surface.fill_rect(Rect::new(x + CORNER, bottom - 1, bar_width, 1), BLACK);
        surface.fill_rect(Rect::new(x, y + CORNER, 1, bar_height), BLACK);
        surface.fill_rect(Rect::new(right - 1, y + CORNER, 1, bar_height), BLACK);

        // Highlight
        surface.fill_rect(Rect::new(x + CORNER, y + 1, bar_width, 2), WHITE);
        surface.fill_rect(Rect::new(x + 1, y + CORNER, 2, bar_height), WHITE);

        // Shadow
        surface.fill_rect(Rect::new(x + CORNER, bottom - 3, bar_width, 2), DARK_GRAY);
        surface.fill_rect(Rect::new(right - 3, y + CORNER, 2, bar_height), DARK_GRAY);

        // Inner bevel
        surface.fill_rect(Rect::new(x + CORNER, y + 3, bar_width, 1), GRAY);
        surface.fill_rect(Rect::new(x + CORNER, bottom - CORNER, bar_width, 1), GRAY);
        surface.fill_rect(Rect::new(x + 3, y + CORNER, 1, bar_height), GRAY);
        surface.fill_rect(Rect::new(right - CORNER, y + CORNER, 1, bar_height), GRAY);

        // Center
        surface.fill_rect(Rect::new(x + CORNER, y + CORNER, bar_width, bar_height), GRAY);
    }
}
