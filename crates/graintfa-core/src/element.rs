//! The element contract and the built-in elements.
//!
//! An element is an immutable, stateless description of something that can
//! be placed on a GUI texture: how it draws itself, how small it may get,
//! and which settings it exposes. Placed copies ("instances") live in the
//! scene and only refer to their element by [`ElementId`](crate::identifier::ElementId).
//!
//! Two authoring styles are available to element code:
//!
//! - **Procedural**: a sequence of [`PixelSurface::fill_rect`] calls whose
//!   offsets are derived from the target rectangle.
//! - **Glyphs**: small fixed-size bitmaps written as text rows and decoded
//!   once with [`decode_glyph`], then copied with [`PixelSurface::blit`].

use std::fmt;

use crate::{
    geometry::{Rect, Size},
    schema::{ConfigSchema, ConfigValues},
    surface::PixelSurface,
};

mod empty_inventory;
mod glyph;
mod slot;

pub use empty_inventory::EmptyInventoryElement;
pub use glyph::{GlyphPalette, decode_glyph};
pub use slot::SlotElement;

/// A drawable element type.
///
/// Implementations hold no per-instance state; everything that varies per
/// placed copy arrives through the `rect` and `config` arguments.
pub trait ElementDefinition: fmt::Debug {
    /// The smallest size an instance may have.
    fn min_size(&self) -> Size;

    /// The size of a freshly placed instance. Defaults to [`Self::min_size`].
    fn default_size(&self) -> Size {
        self.min_size()
    }

    /// Corrects a candidate rectangle so it satisfies this element's
    /// minimum size. Never fails.
    fn validate_dimensions(&self, rect: Rect) -> Rect {
        validate_min_size(self.min_size(), rect)
    }

    /// Draws the element into `surface`, confined to `rect`.
    ///
    /// Must be deterministic: identical arguments always produce identical
    /// pixels. The compositor only passes rectangles for which
    /// [`Rect::is_bounded`] holds.
    fn render(&self, surface: &mut dyn PixelSurface, rect: Rect, config: &ConfigValues);

    /// The settings this element exposes. Defaults to none.
    fn config_schema(&self) -> ConfigSchema {
        ConfigSchema::new()
    }
}

/// Enlarges `rect` to at least `min` on both axes, keeping its origin.
///
/// # Examples
///
/// ```
/// # use graintfa_core::element::validate_min_size;
/// # use graintfa_core::geometry::{Rect, Size};
/// let rect = validate_min_size(Size::new(2, 2), Rect::new(3, 3, 1, 5));
/// assert_eq!(rect, Rect::new(3, 3, 2, 5));
/// ```
pub fn validate_min_size(min: Size, rect: Rect) -> Rect {
    rect.with_min_size(min)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn builtins() -> Vec<Box<dyn ElementDefinition>> {
        vec![
            Box::new(EmptyInventoryElement::new().expect("built-in glyphs are well formed")),
            Box::new(SlotElement::new()),
        ]
    }

    proptest! {
        #[test]
        fn validated_rect_meets_minimum(
            x in -200i32..200,
            y in -200i32..200,
            width in -20i32..300,
            height in -20i32..300,
        ) {
            for element in builtins() {
                let min = element.min_size();
                let rect = element.validate_dimensions(Rect::new(x, y, width, height));

                prop_assert!(rect.width() >= min.width());
                prop_assert!(rect.height() >= min.height());
                prop_assert_eq!(rect.origin(), Rect::new(x, y, width, height).origin());
            }
        }

        #[test]
        fn large_enough_rect_is_unchanged(
            x in -200i32..200,
            y in -200i32..200,
            width in 8i32..300,
            height in 8i32..300,
        ) {
            for element in builtins() {
                let rect = Rect::new(x, y, width, height);
                prop_assert_eq!(element.validate_dimensions(rect), rect);
            }
        }
    }
}
