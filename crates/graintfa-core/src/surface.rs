//! The pixel surface elements draw into.
//!
//! Elements never talk to a concrete canvas. They receive a
//! `&mut dyn PixelSurface`, which can be backed by an in-memory image (the
//! [`ImageSurface`] used for headless rendering and export) or by whatever
//! native 2D surface a host application provides.
//!
//! # Overview
//!
//! - [`Pixel`] - An 8-bit straight-alpha RGBA pixel
//! - [`PixelBuffer`] - A small decoded RGBA bitmap, blitted verbatim
//! - [`PixelSurface`] - The drawing interface (`set_pixel`, `fill_rect`, `blit`)
//! - [`ImageSurface`] - A [`PixelSurface`] backed by an [`RgbaImage`]

use image::{Rgba, RgbaImage};

use crate::geometry::{Point, Rect};

/// An 8-bit RGBA pixel with straight (non-premultiplied) alpha.
pub type Pixel = Rgba<u8>;

/// The fully transparent pixel a cleared surface is filled with.
pub const TRANSPARENT: Pixel = Rgba([0, 0, 0, 0]);

/// A decoded RGBA bitmap with explicit per-pixel values.
///
/// Rows are stored top to bottom, pixels left to right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl PixelBuffer {
    /// Creates a buffer from row-major pixels.
    ///
    /// Returns `None` if `pixels.len()` is not `width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Pixel>) -> Option<Self> {
        (pixels.len() == (width as usize) * (height as usize)).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get((y as usize) * (self.width as usize) + x as usize)
            .copied()
    }

    /// Iterates `(x, y, pixel)` in row-major order.
    pub fn enumerate(&self) -> impl Iterator<Item = (u32, u32, Pixel)> + '_ {
        let width = self.width.max(1);
        self.pixels
            .iter()
            .enumerate()
            .map(move |(i, pixel)| ((i as u32) % width, (i as u32) / width, *pixel))
    }
}

/// Composites `src` over `dst` using straight alpha.
fn blend(dst: Pixel, src: Pixel) -> Pixel {
    match src.0[3] {
        0xff => src,
        0 => dst,
        src_a => {
            let sa = u32::from(src_a);
            let da = u32::from(dst.0[3]);
            let out_a = sa * 255 + da * (255 - sa);
            if out_a == 0 {
                return TRANSPARENT;
            }
            let mut out = [0u8; 4];
            for channel in 0..3 {
                let s = u32::from(src.0[channel]) * sa * 255;
                let d = u32::from(dst.0[channel]) * da * (255 - sa);
                out[channel] = ((s + d + out_a / 2) / out_a) as u8;
            }
            out[3] = ((out_a + 127) / 255) as u8;
            Rgba(out)
        }
    }
}

/// A minimal 2D pixel target.
///
/// Coordinates are signed: drawing partly or entirely off the surface is
/// allowed and simply clipped. No operation ever resamples; every write
/// lands on exactly one pixel.
pub trait PixelSurface {
    /// Width of the surface in pixels.
    fn width(&self) -> u32;

    /// Height of the surface in pixels.
    fn height(&self) -> u32;

    /// Returns the pixel at `(x, y)`, or `None` when out of bounds.
    fn pixel(&self, x: i32, y: i32) -> Option<Pixel>;

    /// Overwrites the pixel at `(x, y)`. Out-of-bounds writes are ignored.
    fn set_pixel(&mut self, x: i32, y: i32, pixel: Pixel);

    /// Enables or disables interpolation for surfaces that support it.
    ///
    /// Pixel art must never be filtered, so the compositor always calls
    /// this with `false` before drawing. In-memory surfaces never filter
    /// and ignore the call.
    fn set_smoothing(&mut self, _enabled: bool) {}

    /// Returns the full surface area as a rectangle at the origin.
    fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width() as i32, self.height() as i32)
    }

    /// Resets every pixel to [`TRANSPARENT`].
    fn clear(&mut self) {
        let bounds = self.bounds();
        for y in bounds.y()..bounds.bottom() {
            for x in bounds.x()..bounds.right() {
                self.set_pixel(x, y, TRANSPARENT);
            }
        }
    }

    /// Fills `rect` with a solid color, compositing it over existing pixels.
    ///
    /// Empty or negative-sized rectangles draw nothing.
    fn fill_rect(&mut self, rect: Rect, pixel: Pixel) {
        let Some(clipped) = rect.intersect(self.bounds()) else {
            return;
        };
        for y in clipped.y()..clipped.bottom() {
            for x in clipped.x()..clipped.right() {
                let dst = self.pixel(x, y).unwrap_or(TRANSPARENT);
                self.set_pixel(x, y, blend(dst, pixel));
            }
        }
    }

    /// Copies `buffer` to the surface with its top-left corner at `origin`.
    ///
    /// Pixels are replaced verbatim, including transparent ones; nothing
    /// is composited.
    fn blit(&mut self, origin: Point, buffer: &PixelBuffer) {
        for (x, y, pixel) in buffer.enumerate() {
            self.set_pixel(
                origin.x().saturating_add_unsigned(x),
                origin.y().saturating_add_unsigned(y),
                pixel,
            );
        }
    }
}

/// A [`PixelSurface`] backed by an in-memory [`RgbaImage`].
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSurface {
    image: RgbaImage,
}

impl ImageSurface {
    /// Creates a fully transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    /// Returns the backing image.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Consumes the surface, returning the backing image.
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Returns the raw RGBA bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        self.image.as_raw()
    }

    fn index(&self, x: i32, y: i32) -> Option<(u32, u32)> {
        let x = u32::try_from(x).ok()?;
        let y = u32::try_from(y).ok()?;
        (x < self.image.width() && y < self.image.height()).then_some((x, y))
    }
}

impl PixelSurface for ImageSurface {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn pixel(&self, x: i32, y: i32) -> Option<Pixel> {
        self.index(x, y).map(|(x, y)| *self.image.get_pixel(x, y))
    }

    fn set_pixel(&mut self, x: i32, y: i32, pixel: Pixel) {
        if let Some((x, y)) = self.index(x, y) {
            self.image.put_pixel(x, y, pixel);
        }
    }

    fn clear(&mut self) {
        self.image.pixels_mut().for_each(|pixel| *pixel = TRANSPARENT);
    }
}
