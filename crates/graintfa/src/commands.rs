//! Scene editing commands.
//!
//! Every command takes the current [`Scene`] by reference and returns the
//! edited copy. Commands addressing an instance that does not exist return
//! an unchanged copy.

use log::{debug, info};

use graintfa_core::{
    element::validate_min_size,
    geometry::{COORDINATE_LIMIT, Point, Rect, Size},
    identifier::ElementId,
    registry::ElementRegistry,
};

use crate::{
    GraintfaError,
    scene::{ElementInstance, Scene, SceneTarget},
};

/// Direction for [`nudge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

fn next_name(scene: &mut Scene) -> String {
    format!("field {}", scene.next_index())
}

/// Appends a new instance of `element_id` with its top-left corner at
/// `position`, clamped into the GUI coordinate range. Returns the new scene
/// and the index of the added instance.
///
/// The instance gets the element's default size, corrected by
/// `validate_dimensions`, and the defaults of its config schema.
///
/// # Errors
///
/// Returns [`GraintfaError::UnknownElement`] if `element_id` is not registered.
pub fn add_element(
    scene: &Scene,
    registry: &ElementRegistry,
    element_id: ElementId,
    position: Point,
) -> Result<(Scene, usize), GraintfaError> {
    let element = registry
        .get(element_id)
        .ok_or(GraintfaError::UnknownElement(element_id))?;

    let origin = position.clamp_to_limit();
    let rect = element.validate_dimensions(Rect::from_origin_size(origin, element.default_size()));
    let mut scene = scene.clone();
    let name = next_name(&mut scene);
    info!(element_id:%, name = name.as_str(), rect:?; "Adding element");

    let instance = ElementInstance::new(element_id, rect)
        .with_data(element.config_schema().defaults())
        .with_name(name);
    let foreground = scene.foreground_mut();
    foreground.push(instance);
    let index = foreground.len() - 1;
    Ok((scene, index))
}

/// Appends a copy of the foreground instance at `index` on top, with the
/// same rect and data and a fresh name.
pub fn duplicate(scene: &Scene, index: usize) -> Scene {
    let Some(source) = scene.foreground().get(index).cloned() else {
        debug!(index; "Nothing to duplicate");
        return scene.clone();
    };

    let mut scene = scene.clone();
    let name = next_name(&mut scene);
    scene.foreground_mut().push(source.with_name(name));
    scene
}

/// Deletes the foreground instance at `index`.
pub fn remove(scene: &Scene, index: usize) -> Scene {
    let mut scene = scene.clone();
    if index < scene.foreground().len() {
        let removed = scene.foreground_mut().remove(index);
        debug!(index, element_id:% = removed.element_id(); "Removed instance");
    } else {
        debug!(index; "Nothing to remove");
    }
    scene
}

/// Moves the foreground instance at `index` by `step` pixels, keeping it
/// inside the background rect.
///
/// An instance larger than the background is pinned to the background's
/// left or top edge.
pub fn nudge(scene: &Scene, index: usize, direction: Direction, step: i32) -> Scene {
    let bounds = scene.background().dimensions();
    let Some(rect) = scene.foreground().get(index).map(ElementInstance::dimensions) else {
        debug!(index; "Nothing to nudge");
        return scene.clone();
    };

    let (dx, dy) = match direction {
        Direction::Left => (step.saturating_neg(), 0),
        Direction::Right => (step, 0),
        Direction::Up => (0, step.saturating_neg()),
        Direction::Down => (0, step),
    };
    let clamp = |value: i32, low: i32, high: i32| value.clamp(low, high.max(low));
    let origin = Point::new(
        clamp(
            rect.x().saturating_add(dx),
            bounds.x(),
            bounds.right().saturating_sub(rect.width()),
        ),
        clamp(
            rect.y().saturating_add(dy),
            bounds.y(),
            bounds.bottom().saturating_sub(rect.height()),
        ),
    );

    scene
        .with_instance_moved(index, origin)
        .unwrap_or_else(|| scene.clone())
}

/// Sets the size of the targeted instance, corrected by its element's
/// `validate_dimensions`. Unregistered elements are only clamped to 1×1.
/// Sizes beyond the GUI coordinate range are capped first.
pub fn resize(scene: &Scene, registry: &ElementRegistry, target: SceneTarget, size: Size) -> Scene {
    let mut scene = scene.clone();
    let Some(instance) = scene.instance_mut(target) else {
        debug!(selected:? = target; "Nothing to resize");
        return scene;
    };

    let size = Size::new(
        size.width().min(COORDINATE_LIMIT),
        size.height().min(COORDINATE_LIMIT),
    );
    let candidate = instance.dimensions().with_size(size);
    let rect = match registry.get(instance.element_id()) {
        Some(element) => element.validate_dimensions(candidate),
        None => validate_min_size(Size::new(1, 1), candidate),
    };
    instance.set_dimensions(rect);
    scene
}

/// Renames the targeted instance.
pub fn rename(scene: &Scene, target: SceneTarget, name: impl Into<String>) -> Scene {
    let mut scene = scene.clone();
    match scene.instance_mut(target) {
        Some(instance) => instance.set_name(name.into()),
        None => debug!(selected:? = target; "Nothing to rename"),
    }
    scene
}
