//! Interactive manipulation of a picture overlay.
//!
//! A gesture controller owns the `Idle → Dragging → Idle` state machine. While
//! dragging it holds exactly one [`InteractionMode`], which carries only the
//! snapshot taken at pointer-down. New positions leave through the update
//! callback; nothing here writes to the overlay directly.

mod drag;
mod hit_detection;


pub use drag::DragStart;
pub use hit_detection::{Handle, handle_at, handle_cursor, rotate_handle_position};

use bevy::log::{debug, warn};
use bevy::math::DVec2;
use serde::{Deserialize, Serialize};

use crate::common::Cursor;
use crate::constants::{
    DEFAULT_HANDLE_RADIUS, DEFAULT_ROTATE_HANDLE_OFFSET, DEFAULT_ROTATION_SNAP,
};
use crate::error::GeometryError;
use crate::geometry::{next_corner, opposite_corner};
use crate::picture::{PictureOverlay, PicturePosition};
use crate::projection::MapProjection;

/// How corner resizing treats the picture's proportions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResizePolicy {
    /// Sides scale independently; Shift locks the image aspect ratio
    #[default]
    Free,
    /// Always keep the image aspect ratio
    KeepAspect,
}

/// Tunables for hit testing and gestures (screen pixels / degrees).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    pub handle_radius: f64,
    pub rotate_handle_offset: f64,
    pub rotation_snap_degrees: f64,
    pub resize_policy: ResizePolicy,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            handle_radius: DEFAULT_HANDLE_RADIUS,
            rotate_handle_offset: DEFAULT_ROTATE_HANDLE_OFFSET,
            rotation_snap_degrees: DEFAULT_ROTATION_SNAP,
            resize_policy: ResizePolicy::Free,
        }
    }
}

/// Modifier keys held during a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoveDrag {
    pub start: DragStart,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResizeCornerDrag {
    pub start: DragStart,
    pub corner: usize,
    pub cursor: Cursor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResizeEdgeDrag {
    pub start: DragStart,
    pub edge: usize,
    pub cursor: Cursor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RotateDrag {
    pub start: DragStart,
    /// Screen position of the overlay centroid at pointer-down
    pub pivot: DVec2,
    pub start_angle: f64,
}

/// One active gesture and its transient state.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionMode {
    Move(MoveDrag),
    ResizeCorner(ResizeCornerDrag),
    ResizeEdge(ResizeEdgeDrag),
    Rotate(RotateDrag),
}

impl InteractionMode {
    /// Start the mode matching `handle`.
    pub fn begin(
        handle: Handle,
        map: &impl MapProjection,
        picture: &PictureOverlay,
        pointer: DVec2,
    ) -> Result<Self, GeometryError> {
        let start = DragStart::capture(map, *picture.position(), pointer);
        let mode = match handle {
            Handle::Body => InteractionMode::Move(MoveDrag { start }),
            Handle::Corner(corner) => {
                picture.opposite_point_to(corner)?;
                InteractionMode::ResizeCorner(ResizeCornerDrag {
                    cursor: handle_cursor(handle, &start.corners),
                    start,
                    corner,
                })
            }
            Handle::Edge(edge) => {
                opposite_corner(edge)?;
                InteractionMode::ResizeEdge(ResizeEdgeDrag {
                    cursor: handle_cursor(handle, &start.corners),
                    start,
                    edge,
                })
            }
            Handle::Rotate => {
                let pivot = map.project(picture.centroid());
                InteractionMode::Rotate(RotateDrag {
                    start_angle: (pointer - pivot).to_angle(),
                    pivot,
                    start,
                })
            }
        };
        Ok(mode)
    }

    pub fn cursor(&self) -> Cursor {
        match self {
            InteractionMode::Move(_) | InteractionMode::Rotate(_) => Cursor::Grabbing,
            InteractionMode::ResizeCorner(drag) => drag.cursor,
            InteractionMode::ResizeEdge(drag) => drag.cursor,
        }
    }

    /// Position for the pointer at `pointer`.
    ///
    /// `Ok(None)` means this frame is frozen (degenerate or flipped geometry);
    /// the overlay should stay where it was.
    pub fn drag_to(
        &self,
        map: &impl MapProjection,
        picture: &PictureOverlay,
        pointer: DVec2,
        modifiers: Modifiers,
        settings: &InteractionSettings,
    ) -> Result<Option<PicturePosition>, GeometryError> {
        match self {
            InteractionMode::Move(drag) => {
                Ok(drag.start.commit(map, drag::translate(&drag.start, pointer), &[]))
            }
            InteractionMode::ResizeCorner(drag) => {
                let anchor = picture.opposite_point_to(drag.corner)?;
                let keep_aspect =
                    settings.resize_policy == ResizePolicy::KeepAspect || modifiers.shift;
                let aspect = keep_aspect
                    .then(|| (f64::from(picture.width()), f64::from(picture.height())));
                let points = match drag::resize_corner(&drag.start, drag.corner, pointer, aspect) {
                    Ok(points) => points,
                    Err(GeometryError::DegenerateSegment) => return Ok(None),
                    Err(e) => return Err(e),
                };
                if !drag.start.keeps_orientation(&points) {
                    return Ok(None);
                }
                Ok(drag.start.commit(map, points, &[anchor]))
            }
            InteractionMode::ResizeEdge(drag) => {
                let points = match drag::resize_edge(&drag.start, drag.edge, pointer) {
                    Ok(points) => points,
                    Err(GeometryError::DegenerateSegment) => return Ok(None),
                    Err(e) => return Err(e),
                };
                if !drag.start.keeps_orientation(&points) {
                    return Ok(None);
                }
                let fixed = opposite_corner(drag.edge)?;
                Ok(drag.start.commit(map, points, &[fixed, next_corner(fixed)]))
            }
            InteractionMode::Rotate(drag) => {
                let snap = modifiers
                    .shift
                    .then(|| settings.rotation_snap_degrees.to_radians());
                let Some(angle) = drag::swept_angle(drag.start_angle, drag.pivot, pointer, snap)
                else {
                    return Ok(None);
                };
                Ok(drag
                    .start
                    .commit(map, drag::rotate(&drag.start, drag.pivot, angle), &[]))
            }
        }
    }
}

/// Whether a gesture is in progress.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging(InteractionMode),
}

/// Gesture controller for one overlay at a time.
#[derive(Debug, Clone, Default)]
pub struct OverlayInteraction {
    state: GestureState,
    settings: InteractionSettings,
}

impl OverlayInteraction {
    pub fn new(settings: InteractionSettings) -> Self {
        Self {
            state: GestureState::Idle,
            settings,
        }
    }

    pub fn settings(&self) -> &InteractionSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: InteractionSettings) {
        self.settings = settings;
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging(_))
    }

    /// Handle under `pointer`, if any.
    pub fn handle_at(
        &self,
        map: &impl MapProjection,
        picture: &PictureOverlay,
        pointer: DVec2,
    ) -> Option<Handle> {
        handle_at(&picture.position().project(map), pointer, &self.settings)
    }

    /// Begin a drag. `target` is a handle the host already resolved (e.g. from
    /// a corner feature's index); otherwise the pointer is hit-tested.
    ///
    /// Returns whether a drag started. Locked overlays never start one.
    pub fn pointer_down(
        &mut self,
        map: &impl MapProjection,
        picture: &PictureOverlay,
        pointer: DVec2,
        target: Option<Handle>,
    ) -> Result<bool, GeometryError> {
        if self.is_dragging() {
            return Ok(false);
        }
        if picture.is_locked() {
            debug!("Ignoring pointer-down on locked picture {}", picture.id());
            return Ok(false);
        }
        let Some(handle) = target.or_else(|| self.handle_at(map, picture, pointer)) else {
            return Ok(false);
        };

        match InteractionMode::begin(handle, map, picture, pointer) {
            Ok(mode) => {
                debug!("Started {:?} drag on picture {}", handle, picture.id());
                self.state = GestureState::Dragging(mode);
                Ok(true)
            }
            Err(e) => {
                self.state = GestureState::Idle;
                Err(e)
            }
        }
    }

    /// Continue the drag. Emits at most one position through `on_update` and
    /// returns whether it did.
    pub fn pointer_move(
        &mut self,
        map: &impl MapProjection,
        picture: &PictureOverlay,
        pointer: DVec2,
        modifiers: Modifiers,
        on_update: &mut impl FnMut(PicturePosition),
    ) -> Result<bool, GeometryError> {
        let GestureState::Dragging(mode) = &self.state else {
            return Ok(false);
        };

        match mode.drag_to(map, picture, pointer, modifiers, &self.settings) {
            Ok(Some(position)) => {
                on_update(position);
                Ok(true)
            }
            Ok(None) => Ok(false),
            Err(e) => {
                warn!("Aborting drag on picture {}: {}", picture.id(), e);
                self.state = GestureState::Idle;
                Err(e)
            }
        }
    }

    /// Finish the drag. The last emitted position stands.
    pub fn pointer_up(&mut self) {
        self.state = GestureState::Idle;
    }

    /// Abandon the drag without emitting anything.
    pub fn pointer_cancel(&mut self) {
        if self.is_dragging() {
            debug!("Drag cancelled");
        }
        self.state = GestureState::Idle;
    }

    /// Cursor for the active drag, or the hover cursor when idle.
    pub fn cursor(
        &self,
        map: &impl MapProjection,
        picture: &PictureOverlay,
        pointer: DVec2,
    ) -> Cursor {
        match &self.state {
            GestureState::Dragging(mode) => mode.cursor(),
            GestureState::Idle if picture.is_locked() => Cursor::Default,
            GestureState::Idle => {
                let corners = picture.position().project(map);
                handle_at(&corners, pointer, &self.settings)
                    .map(|handle| handle_cursor(handle, &corners))
                    .unwrap_or_default()
            }
        }
    }
}
