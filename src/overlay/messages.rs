//! Message types exchanged with the host map.

use bevy::math::DVec2;
use bevy::prelude::*;

use crate::common::Cursor;
use crate::image_input::ImageInfo;
use crate::interaction::{Handle, Modifiers};
use crate::picture::{PicturePosition, RenderBundle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// Pointer event from the host, in screen pixels.
#[derive(Message, Debug, Clone, Copy)]
pub struct OverlayPointer {
    pub phase: PointerPhase,
    pub position: DVec2,
    /// Overlay the host already resolved under the pointer, if any
    pub entity: Option<Entity>,
    /// Handle the host already resolved (e.g. a corner feature's index)
    pub handle: Option<Handle>,
    pub modifiers: Modifiers,
}

impl OverlayPointer {
    pub fn new(phase: PointerPhase, position: DVec2) -> Self {
        Self {
            phase,
            position,
            entity: None,
            handle: None,
            modifiers: Modifiers::default(),
        }
    }

    pub fn on(mut self, entity: Entity, handle: Option<Handle>) -> Self {
        self.entity = Some(entity);
        self.handle = handle;
        self
    }

    pub fn with_shift(mut self, shift: bool) -> Self {
        self.modifiers.shift = shift;
        self
    }
}

/// New position produced by a gesture; applied wholesale.
#[derive(Message, Debug, Clone, Copy)]
pub struct OverlayPositionUpdated {
    pub entity: Entity,
    pub position: PicturePosition,
}

/// Message to lock or unlock an overlay
#[derive(Message)]
pub struct SetOverlayLocked {
    pub entity: Entity,
    pub locked: bool,
}

/// Message to remove an overlay
#[derive(Message)]
pub struct RemoveOverlay {
    pub entity: Entity,
}

/// Message to add one overlay per picked image
#[derive(Message)]
pub struct AddPictures {
    pub images: Vec<ImageInfo>,
}

/// Outgoing: sources and layers to (re)draw for an overlay
#[derive(Message, Debug, Clone)]
pub struct RenderOverlay {
    pub entity: Entity,
    pub bundle: RenderBundle,
}

/// Outgoing: sources and layers the host should drop
#[derive(Message, Debug, Clone)]
pub struct OverlayRemoved {
    pub entity: Entity,
    pub source_ids: Vec<String>,
    pub layer_ids: Vec<String>,
}

/// Outgoing: the cursor the host should show
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayCursorChanged {
    pub cursor: Cursor,
}
