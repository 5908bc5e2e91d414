//! Systems driving overlays from host messages.

use bevy::prelude::*;

use crate::common::{Cursor, Visibility};
use crate::config::OverlayConfig;
use crate::constants::DEFAULT_FILL_FRACTION;
use crate::picture::PictureOverlay;

use super::messages::{
    AddPictures, OverlayCursorChanged, OverlayPointer, OverlayPositionUpdated, OverlayRemoved,
    PointerPhase, RemoveOverlay, RenderOverlay, SetOverlayLocked,
};
use super::{ActiveInteraction, MapView};

/// Startup system to take the initial view from config
pub fn init_map_view(config: Option<Res<OverlayConfig>>, mut view: ResMut<MapView>) {
    if let Some(config) = config {
        view.0 = config.data.initial_view;
    }
}

/// Keep gesture settings in step with config
pub fn sync_interaction_settings(
    config: Option<Res<OverlayConfig>>,
    mut active: ResMut<ActiveInteraction>,
) {
    if let Some(config) = config
        && config.is_changed()
    {
        active.interaction.set_settings(config.data.interaction);
    }
}

/// Spawn an overlay for every picked image, centred in the current view
pub fn add_pictures_system(
    mut commands: Commands,
    mut events: MessageReader<AddPictures>,
    view: Res<MapView>,
    config: Option<Res<OverlayConfig>>,
) {
    let fraction = config
        .map(|c| c.data.fill_fraction)
        .unwrap_or(DEFAULT_FILL_FRACTION);

    for event in events.read() {
        for info in &event.images {
            let picture = PictureOverlay::from_image(info, &view.0, fraction);
            info!("Adding picture {} from {}", picture.id(), picture.url());
            commands.spawn(picture);
        }
    }
}

pub fn set_locked_system(
    mut events: MessageReader<SetOverlayLocked>,
    mut overlays: Query<&mut PictureOverlay>,
) {
    for event in events.read() {
        if let Ok(mut picture) = overlays.get_mut(event.entity) {
            picture.set_locked(event.locked);
            debug!("Picture {} locked: {}", picture.id(), event.locked);
        }
    }
}

/// Feed pointer messages through the active gesture, in arrival order
pub fn handle_pointer_input(
    mut events: MessageReader<OverlayPointer>,
    view: Res<MapView>,
    mut active: ResMut<ActiveInteraction>,
    overlays: Query<(Entity, &PictureOverlay)>,
    mut updates: MessageWriter<OverlayPositionUpdated>,
    mut cursor_events: MessageWriter<OverlayCursorChanged>,
) {
    let active = &mut *active;

    for event in events.read() {
        match event.phase {
            PointerPhase::Down => {
                let target = match event.entity {
                    Some(entity) => overlays.get(entity).ok(),
                    None => overlays.iter().find(|(_, picture)| {
                        active
                            .interaction
                            .handle_at(&view.0, picture, event.position)
                            .is_some()
                    }),
                };
                let Some((entity, picture)) = target else {
                    continue;
                };

                match active
                    .interaction
                    .pointer_down(&view.0, picture, event.position, event.handle)
                {
                    Ok(true) => active.entity = Some(entity),
                    Ok(false) => {}
                    Err(e) => {
                        warn!("Rejected pointer-down on picture {}: {}", picture.id(), e);
                        active.entity = None;
                    }
                }
            }
            PointerPhase::Move => {
                if let Some(entity) = active.entity {
                    let Ok((_, picture)) = overlays.get(entity) else {
                        active.interaction.pointer_cancel();
                        active.entity = None;
                        continue;
                    };
                    let result = active.interaction.pointer_move(
                        &view.0,
                        picture,
                        event.position,
                        event.modifiers,
                        &mut |position| {
                            updates.write(OverlayPositionUpdated { entity, position });
                        },
                    );
                    if result.is_err() {
                        active.entity = None;
                    }
                }
            }
            PointerPhase::Up => {
                active.interaction.pointer_up();
                active.entity = None;
            }
            PointerPhase::Cancel => {
                active.interaction.pointer_cancel();
                active.entity = None;
            }
        }

        let cursor = current_cursor(active, &view, &overlays, event);
        if cursor != active.cursor {
            active.cursor = cursor;
            debug!("Cursor now {:?} ({:?})", cursor, cursor.css_name());
            cursor_events.write(OverlayCursorChanged { cursor });
        }
    }
}

/// Cursor of the active drag, or of whatever overlay handle is hovered
fn current_cursor(
    active: &ActiveInteraction,
    view: &MapView,
    overlays: &Query<(Entity, &PictureOverlay)>,
    event: &OverlayPointer,
) -> Cursor {
    if let Some(entity) = active.entity
        && let Ok((_, picture)) = overlays.get(entity)
    {
        return active.interaction.cursor(&view.0, picture, event.position);
    }

    overlays
        .iter()
        .map(|(_, picture)| active.interaction.cursor(&view.0, picture, event.position))
        .find(|cursor| *cursor != Cursor::Default)
        .unwrap_or_default()
}

/// Replace positions with the ones gestures produced
pub fn apply_position_updates(
    mut events: MessageReader<OverlayPositionUpdated>,
    mut overlays: Query<&mut PictureOverlay>,
) {
    for event in events.read() {
        if let Ok(mut picture) = overlays.get_mut(event.entity) {
            picture.set_position(event.position);
        }
    }
}

pub fn remove_overlay_system(
    mut commands: Commands,
    mut events: MessageReader<RemoveOverlay>,
    mut active: ResMut<ActiveInteraction>,
    overlays: Query<&PictureOverlay>,
    mut removed: MessageWriter<OverlayRemoved>,
) {
    for event in events.read() {
        let Ok(picture) = overlays.get(event.entity) else {
            continue;
        };

        if active.entity == Some(event.entity) {
            active.interaction.pointer_cancel();
            active.entity = None;
        }

        let bundle = picture.render_bundle();
        removed.write(OverlayRemoved {
            entity: event.entity,
            source_ids: bundle.source_ids().map(String::from).to_vec(),
            layer_ids: bundle.layer_ids().map(String::from).to_vec(),
        });
        info!("Removed picture {}", picture.id());
        commands.entity(event.entity).despawn();
    }
}

/// Hand fresh descriptors to the host whenever an overlay changes
pub fn emit_render_bundles(
    overlays: Query<(Entity, &PictureOverlay), Changed<PictureOverlay>>,
    mut render: MessageWriter<RenderOverlay>,
) {
    for (entity, picture) in overlays.iter() {
        let mut bundle = picture.render_bundle();
        if picture.is_locked() {
            bundle.set_handles_visibility(Visibility::None);
        }
        render.write(RenderOverlay { entity, bundle });
    }
}
