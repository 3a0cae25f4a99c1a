//! Text-row bitmap glyphs.
//!
//! A glyph is written as one line of text per pixel row, one character per
//! pixel. Characters are looked up in a [`GlyphPalette`]; a space is always
//! transparent.
//!
//! ```text
//!   bb
//!  bww
//! bwww
//! bwww
//! ```

use crate::{
    ElementError,
    surface::{Pixel, PixelBuffer, TRANSPARENT},
};

/// Maps glyph characters to pixel colors.
pub type GlyphPalette = [(char, Pixel)];

/// Decodes glyph text into a `width` x `height` pixel buffer.
///
/// Empty lines are skipped, so glyphs may be written with a leading and a
/// trailing newline. Every remaining line is one pixel row.
///
/// # Errors
///
/// Returns [`ElementError::MalformedGlyph`] if the text does not have
/// exactly `height` rows of exactly `width` characters, and
/// [`ElementError::UnknownGlyphColor`] for characters missing from `palette`.
///
/// # Examples
///
/// ```
/// # use graintfa_core::element::decode_glyph;
/// # use image::Rgba;
/// let black = Rgba([0, 0, 0, 0xff]);
/// let glyph = decode_glyph(" b\nbb", 2, 2, &[('b', black)]).unwrap();
/// assert_eq!(glyph.pixel(0, 0).unwrap().0[3], 0);
/// assert_eq!(glyph.pixel(1, 0), Some(black));
/// ```
pub fn decode_glyph(
    text: &str,
    width: u32,
    height: u32,
    palette: &GlyphPalette,
) -> Result<PixelBuffer, ElementError> {
    let malformed = |reason: String| ElementError::MalformedGlyph {
        width,
        height,
        reason,
    };

    let rows: Vec<&str> = text
        .split('\n')
        .map(|row| row.trim_end_matches('\r'))
        .filter(|row| !row.is_empty())
        .collect();

    if rows.len() != height as usize {
        return Err(malformed(format!("found {} rows", rows.len())));
    }

    let mut pixels = Vec::with_capacity((width as usize) * (height as usize));
    for (y, row) in rows.iter().enumerate() {
        let columns = row.chars().count();
        if columns != width as usize {
            return Err(malformed(format!("row {y} has {columns} pixels")));
        }

        for (x, symbol) in row.chars().enumerate() {
            let pixel = match symbol {
                ' ' => TRANSPARENT,
                _ => palette
                    .iter()
                    .find(|(key, _)| *key == symbol)
                    .map(|(_, pixel)| *pixel)
                    .ok_or(ElementError::UnknownGlyphColor {
                        symbol,
                        x: x as u32,
                        y: y as u32,
                    })?,
            };
            pixels.push(pixel);
        }
    }

    PixelBuffer::from_pixels(width, height, pixels)
        .ok_or_else(|| malformed("pixel count mismatch".to_string()))
}
