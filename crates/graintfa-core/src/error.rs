//! Authoring errors for element definitions.
//!
//! These errors describe mistakes in element code itself (a duplicated
//! registration, a glyph whose text does not match its declared size). They
//! surface at startup or in unit tests and are never produced by scene data.

use thiserror::Error;

use crate::identifier::ElementId;

/// An error in how an element is defined or registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ElementError {
    /// An element with this identifier is already registered.
    #[error("double registration of element `{id}` (attempted by {registerer})")]
    DuplicateElement { id: ElementId, registerer: String },

    /// Glyph text does not have `height` rows of `width` pixels.
    #[error("malformed {width}x{height} glyph: {reason}")]
    MalformedGlyph {
        width: u32,
        height: u32,
        reason: String,
    },

    /// Glyph text uses a character the palette does not define.
    #[error("glyph uses `{symbol}` at ({x}, {y}), which is not in its palette")]
    UnknownGlyphColor { symbol: char, x: u32, y: u32 },
}
