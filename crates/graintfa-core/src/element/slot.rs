//! A single inventory slot.

use image::Rgba;

use super::ElementDefinition;
use crate::{
    geometry::{Rect, Size},
    schema::ConfigValues,
    surface::{Pixel, PixelSurface},
};

const GRAY: Pixel = Rgba([0x8b, 0x8b, 0x8b, 0xff]);
const DARK_GRAY: Pixel = Rgba([0x37, 0x37, 0x37, 0xff]);
const WHITE: Pixel = Rgba([0xff, 0xff, 0xff, 0xff]);

/// An inset slot: dark shadow on the top and left, white highlight on the
/// bottom and right, gray center and gray 1x1 corners where the two meet.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlotElement;

impl SlotElement {
    pub fn new() -> Self {
        Self
    }
}

impl ElementDefinition for SlotElement {
    fn min_size(&self) -> Size {
        Size::new(2, 2)
    }

    /// Vanilla item slots are 18x18 including the bevel.
    fn default_size(&self) -> Size {
        Size::new(18, 18)
    }

    fn render(&self, surface: &mut dyn PixelSurface, rect: Rect, _config: &ConfigValues) {
        let (x, y) = (rect.x(), rect.y());
        let (width, height) = (rect.width(), rect.height());

        // Shadow; each bar stops one short to leave room for the gray corner.
        surface.fill_rect(Rect::new(x, y, 1, height - 1), DARK_GRAY);
        surface.fill_rect(Rect::new(x, y, width - 1, 1), DARK_GRAY);

        surface.fill_rect(Rect::new(x + width - 1, y, 1, 1), GRAY);
        surface.fill_rect(Rect::new(x, y + height - 1, 1, 1), GRAY);
        surface.fill_rect(Rect::new(x + 1, y + 1, width - 2, height - 2), GRAY);

        // Highlight
        surface.fill_rect(Rect::new(x + 1, y + height - 1, width - 1, 1), WHITE);
        surface.fill_rect(Rect::new(x + width - 1, y + 1, 1, height - 1), WHITE);
    }
}
