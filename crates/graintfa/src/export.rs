//! Rasterizes scenes into finished textures.
//!
//! Exported images cover GUI space only: the compositor margin is cropped
//! and no selection is drawn.

use std::{io::Cursor, path::Path};

use image::{ImageBuffer, ImageFormat, RgbaImage, imageops};
use log::info;

use graintfa_core::{registry::ElementRegistry, surface::TRANSPARENT};

use crate::{
    GraintfaError,
    compositor::{Compositor, MARGIN},
    scene::Scene,
};

/// Largest number of pixels an exported image may hold.
pub const MAX_EXPORT_PIXELS: u64 = 1 << 28;

/// Renders `scene` and upscales it by the integer factor `scale` with
/// nearest-neighbour sampling.
///
/// # Errors
///
/// Returns [`GraintfaError::Config`] when `scale` is zero or the scaled
/// image would exceed [`MAX_EXPORT_PIXELS`], and
/// [`GraintfaError::Document`] when the background covers no pixels.
pub fn render_image(
    registry: &ElementRegistry,
    scene: &Scene,
    scale: u32,
) -> Result<RgbaImage, GraintfaError> {
    if scale == 0 {
        return Err(GraintfaError::Config(
            "export scale must be at least 1".to_string(),
        ));
    }

    let gui = scene.gui_size();
    if gui.width() == 0 || gui.height() == 0 {
        return Err(GraintfaError::Document(format!(
            "scene background covers no pixels ({}x{})",
            gui.width(),
            gui.height()
        )));
    }

    let (width, height) = (gui.width() as u32, gui.height() as u32);
    let (scaled_width, scaled_height) = scaled_size(width, height, scale)?;

    let compositor = Compositor::new(registry, TRANSPARENT);
    let mut surface = Compositor::new_surface(scene);
    compositor.render(&mut surface, scene, &None);

    let image = surface.into_image();
    let cropped = imageops::crop_imm(&image, MARGIN as u32, MARGIN as u32, width, height).to_image();

    info!(width, height, scale; "Rendered scene");
    if scale == 1 {
        return Ok(cropped);
    }
    Ok(ImageBuffer::from_fn(scaled_width, scaled_height, |x, y| {
        *cropped.get_pixel(x / scale, y / scale)
    }))
}

fn scaled_size(width: u32, height: u32, scale: u32) -> Result<(u32, u32), GraintfaError> {
    let too_large = || {
        GraintfaError::Config(format!(
            "export scale {scale} is too large for a {width}x{height} scene"
        ))
    };
    let scaled_width = width.checked_mul(scale).ok_or_else(too_large)?;
    let scaled_height = height.checked_mul(scale).ok_or_else(too_large)?;
    if u64::from(scaled_width) * u64::from(scaled_height) > MAX_EXPORT_PIXELS {
        return Err(too_large());
    }
    Ok((scaled_width, scaled_height))
}

/// Encodes `image` as PNG bytes.
///
/// # Errors
///
/// Returns [`GraintfaError::Export`] if encoding fails.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, GraintfaError> {
    let mut bytes = Cursor::new(Vec::new());
    image.write_to(&mut bytes, ImageFormat::Png)?;
    Ok(bytes.into_inner())
}

/// Writes `image` to `path` as a PNG file.
///
/// # Errors
///
/// Returns [`GraintfaError::Export`] if encoding or writing fails.
pub fn write_png(path: impl AsRef<Path>, image: &RgbaImage) -> Result<(), GraintfaError> {
    let path = path.as_ref();
    image.save_with_format(path, ImageFormat::Png)?;
    info!(path:? = path; "Wrote PNG");
    Ok(())
}
