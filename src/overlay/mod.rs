//! Bevy integration: picture overlays as components, driven by host messages.
//!
//! The host sends [`OverlayPointer`] events in screen pixels and receives
//! [`RenderOverlay`] bundles back. Only one gesture runs at a time, owned by
//! the [`ActiveInteraction`] resource.

mod messages;
mod systems;

#[cfg(test)]
mod tests;

pub use messages::{
    AddPictures, OverlayCursorChanged, OverlayPointer, OverlayPositionUpdated, OverlayRemoved,
    PointerPhase, RemoveOverlay, RenderOverlay, SetOverlayLocked,
};

use bevy::prelude::*;

use crate::common::Cursor;
use crate::config::ConfigLoaded;
use crate::interaction::OverlayInteraction;
use crate::projection::WebMercatorView;

/// Current camera of the host map
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Deref, DerefMut)]
pub struct MapView(pub WebMercatorView);

/// The single gesture controller and the overlay it is working on
#[derive(Resource, Default)]
pub struct ActiveInteraction {
    pub entity: Option<Entity>,
    pub interaction: OverlayInteraction,
    /// Last cursor reported to the host
    pub cursor: Cursor,
}

pub struct PictureOverlayPlugin;

impl Plugin for PictureOverlayPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MapView>()
            .init_resource::<ActiveInteraction>()
            .add_message::<OverlayPointer>()
            .add_message::<OverlayPositionUpdated>()
            .add_message::<SetOverlayLocked>()
            .add_message::<RemoveOverlay>()
            .add_message::<AddPictures>()
            .add_message::<RenderOverlay>()
            .add_message::<OverlayRemoved>()
            .add_message::<OverlayCursorChanged>()
            .add_systems(Startup, systems::init_map_view.after(ConfigLoaded))
            .add_systems(
                Update,
                (
                    systems::sync_interaction_settings,
                    systems::add_pictures_system.run_if(on_message::<AddPictures>),
                    systems::set_locked_system.run_if(on_message::<SetOverlayLocked>),
                    systems::handle_pointer_input.run_if(on_message::<OverlayPointer>),
                    systems::apply_position_updates.run_if(on_message::<OverlayPositionUpdated>),
                    systems::remove_overlay_system.run_if(on_message::<RemoveOverlay>),
                    systems::emit_render_bundles,
                )
                    .chain(),
            );
    }
}
