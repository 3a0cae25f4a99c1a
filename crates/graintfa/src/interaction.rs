//! Pointer-driven selection and dragging.
//!
//! The controller is a set of pure transitions: each pointer event takes
//! the current [`Scene`] and [`SelectionState`] and yields a new selection,
//! plus a new scene when an instance moved. Nothing is mutated in place.
//!
//! Pointer positions arrive in display coordinates. A [`ViewTransform`]
//! maps them to surface pixels and then to GUI space by removing the
//! compositor margin.

use log::debug;

use graintfa_core::{
    geometry::{Point, Rect},
    registry::ElementRegistry,
};

use crate::{
    compositor::MARGIN,
    scene::{Scene, SceneTarget},
};

/// Bit set in [`PointerEvent::buttons`] while the primary button is held.
pub const PRIMARY_BUTTON: u32 = 1;

/// The selected instance, and the drag offset while a drag is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    target: SceneTarget,
    drag_offset: Option<Point>,
}

impl Selection {
    /// A selection with no drag in progress.
    pub fn new(target: SceneTarget) -> Self {
        Self {
            target,
            drag_offset: None,
        }
    }

    /// A selection being dragged. `offset` is the instance origin minus the
    /// pointer position at the moment the drag began.
    pub fn dragging(target: SceneTarget, offset: Point) -> Self {
        Self {
            target,
            drag_offset: Some(offset),
        }
    }

    pub fn target(&self) -> SceneTarget {
        self.target
    }

    pub fn drag_offset(&self) -> Option<Point> {
        self.drag_offset
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_offset.is_some()
    }
}

/// `None` means nothing is selected.
pub type SelectionState = Option<Selection>;

/// Maps display coordinates onto the native surface.
///
/// The surface may be shown scaled and offset; `display` is the size it
/// occupies on screen and `native` its pixel dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    offset: (f32, f32),
    display: (f32, f32),
    native: (u32, u32),
}

impl ViewTransform {
    pub fn new(offset: (f32, f32), display: (f32, f32), native: (u32, u32)) -> Self {
        Self {
            offset,
            display,
            native,
        }
    }

    /// A transform where one display unit is one surface pixel.
    pub fn identity(native: (u32, u32)) -> Self {
        Self::scaled(native, 1.0)
    }

    /// A transform for a surface shown at `scale` times its native size.
    pub fn scaled(native: (u32, u32), scale: f32) -> Self {
        let display = (native.0 as f32 * scale, native.1 as f32 * scale);
        Self::new((0.0, 0.0), display, native)
    }

    pub fn native(&self) -> (u32, u32) {
        self.native
    }

    /// Converts a display position to a surface pixel.
    pub fn to_surface(&self, x: f32, y: f32) -> Point {
        let ratio = |native: u32, display: f32| {
            if display > 0.0 {
                native as f32 / display
            } else {
                1.0
            }
        };
        let sx = (x - self.offset.0) * ratio(self.native.0, self.display.0);
        let sy = (y - self.offset.1) * ratio(self.native.1, self.display.1);
        Point::new(sx.floor() as i32, sy.floor() as i32)
    }

    /// Converts a display position to GUI space. Far-off positions
    /// saturate at the `i32` range.
    pub fn to_gui(&self, x: f32, y: f32) -> Point {
        self.to_surface(x, y).sub_point(Point::new(MARGIN, MARGIN))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
}

/// A pointer event in display coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    kind: PointerEventKind,
    x: f32,
    y: f32,
    buttons: u32,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, x: f32, y: f32, buttons: u32) -> Self {
        Self {
            kind,
            x,
            y,
            buttons,
        }
    }

    pub fn down(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Down, x, y, PRIMARY_BUTTON)
    }

    pub fn moved(x: f32, y: f32, buttons: u32) -> Self {
        Self::new(PointerEventKind::Move, x, y, buttons)
    }

    pub fn up(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Up, x, y, 0)
    }

    pub fn kind(&self) -> PointerEventKind {
        self.kind
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn buttons(&self) -> u32 {
        self.buttons
    }
}

/// Result of a pointer transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// The edited scene, or `None` when the scene did not change.
    pub scene: Option<Scene>,
    pub selection: SelectionState,
}

impl Transition {
    fn selection(selection: SelectionState) -> Self {
        Self {
            scene: None,
            selection,
        }
    }
}

/// Hit testing and drag handling against a registry.
///
/// Instances whose element is not registered are invisible to the
/// controller, matching what the compositor draws.
#[derive(Debug, Clone, Copy)]
pub struct InteractionController<'a> {
    registry: &'a ElementRegistry,
}

impl<'a> InteractionController<'a> {
    pub fn new(registry: &'a ElementRegistry) -> Self {
        Self { registry }
    }

    /// Finds the topmost resolved instance containing `point` (GUI space).
    ///
    /// Foreground instances are searched last to first; the background is
    /// only hit when no foreground instance is.
    pub fn hit_test(&self, scene: &Scene, point: Point) -> Option<SceneTarget> {
        let foreground = scene
            .foreground()
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, instance)| self.registry.contains(instance.element_id()))
            .find(|(_, instance)| instance.dimensions().contains(point))
            .map(|(index, _)| SceneTarget::Foreground(index));

        foreground.or_else(|| {
            let background = scene.background();
            (self.registry.contains(background.element_id())
                && background.dimensions().contains(point))
            .then_some(SceneTarget::Background)
        })
    }

    /// Selects whatever is under `point` and starts a drag on foreground
    /// hits. Points in the margin or outside the surface clear the selection.
    pub fn pointer_down(&self, scene: &Scene, point: Point) -> SelectionState {
        let gui_area = Rect::from_origin_size(Point::default(), scene.gui_size());
        if !gui_area.contains(point) {
            debug!(point:?; "Pointer down outside GUI area");
            return None;
        }

        let selection = match self.hit_test(scene, point)? {
            SceneTarget::Foreground(index) => {
                let origin = scene.foreground()[index].dimensions().origin();
                Selection::dragging(SceneTarget::Foreground(index), origin.sub_point(point))
            }
            SceneTarget::Background => Selection::new(SceneTarget::Background),
        };
        debug!(selected:? = selection.target(), point:?; "Selected instance");
        Some(selection)
    }

    /// Moves the dragged instance so its origin is `point` plus the drag
    /// offset. Only applies while the primary button is held.
    pub fn pointer_move(
        &self,
        scene: &Scene,
        selection: &SelectionState,
        point: Point,
        buttons: u32,
    ) -> Transition {
        let Some(current) = *selection else {
            return Transition::selection(None);
        };
        let (SceneTarget::Foreground(index), Some(offset)) = (current.target(), current.drag_offset())
        else {
            return Transition::selection(*selection);
        };
        if buttons & PRIMARY_BUTTON == 0 {
            return Transition::selection(*selection);
        }

        let Some(instance) = scene.foreground().get(index) else {
            debug!(index; "Dragged instance no longer exists");
            return Transition::selection(None);
        };

        let origin = offset.add_point(point).clamp_to_limit();
        if instance.dimensions().origin() == origin {
            return Transition::selection(*selection);
        }

        Transition {
            scene: scene.with_instance_moved(index, origin),
            selection: *selection,
        }
    }

    /// Ends any drag, keeping the selection if its target still exists.
    pub fn pointer_up(&self, scene: &Scene, selection: &SelectionState) -> SelectionState {
        selection
            .filter(|selection| scene.instance(selection.target()).is_some())
            .map(|selection| Selection::new(selection.target()))
    }

    /// Dispatches a display-space event through `view`.
    pub fn handle(
        &self,
        scene: &Scene,
        selection: &SelectionState,
        view: &ViewTransform,
        event: &PointerEvent,
    ) -> Transition {
        let (x, y) = event.position();
        let point = view.to_gui(x, y);
        match event.kind() {
            PointerEventKind::Down => Transition::selection(self.pointer_down(scene, point)),
            PointerEventKind::Move => self.pointer_move(scene, selection, point, event.buttons()),
            PointerEventKind::Up => Transition::selection(self.pointer_up(scene, selection)),
        }
    }
}
