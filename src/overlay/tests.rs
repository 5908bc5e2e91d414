//! Plugin tests driving a headless app.

use bevy::ecs::message::Messages;
use bevy::math::DVec2;
use bevy::prelude::*;

use super::*;
use crate::common::Visibility;
use crate::image_input::ImageInfo;
use crate::interaction::Handle;
use crate::picture::{LngLat, PictureOptions, PictureOverlay, PicturePosition};
use crate::projection::MapProjection;

fn view() -> WebMercatorView {
    WebMercatorView {
        center: LngLat::new(-73.98, 40.75),
        zoom: 15.0,
        viewport: [1000.0, 800.0],
    }
}

fn test_app() -> App {
    let mut app = App::new();
    app.add_plugins(PictureOverlayPlugin);
    app.insert_resource(MapView(view()));
    app
}

fn spawn_picture(app: &mut App) -> Entity {
    let picture = PictureOverlay::new(PictureOptions {
        id: "survey".to_string(),
        url: "survey.png".to_string(),
        width: 300,
        height: 200,
        position: PicturePosition::centered(&view(), 300, 200, 0.5),
    });
    app.world_mut().spawn(picture).id()
}

fn picture(app: &App, entity: Entity) -> PictureOverlay {
    app.world()
        .get::<PictureOverlay>(entity)
        .cloned()
        .expect("picture should exist")
}

fn pointer(app: &mut App, event: OverlayPointer) {
    app.world_mut().write_message(event);
}

fn read_messages<M: Message + Clone>(app: &App) -> Vec<M> {
    let messages = app.world().resource::<Messages<M>>();
    let mut cursor = messages.get_cursor();
    cursor.read(messages).cloned().collect()
}

#[test]
fn test_spawned_picture_is_rendered() {
    let mut app = test_app();
    let entity = spawn_picture(&mut app);
    app.update();

    let rendered = read_messages::<RenderOverlay>(&app);
    assert_eq!(rendered.len(), 1);
    assert_eq!(rendered[0].entity, entity);
    assert_eq!(rendered[0].bundle.image_source.id, "survey-raster");
    assert_eq!(rendered[0].bundle.polygon_source.id, "survey-polygon");
}

#[test]
fn test_drag_moves_picture() {
    let mut app = test_app();
    let entity = spawn_picture(&mut app);
    app.update();

    let before = picture(&app, entity);
    let center = DVec2::new(500.0, 400.0);
    pointer(&mut app, OverlayPointer::new(PointerPhase::Down, center));
    pointer(&mut app, OverlayPointer::new(PointerPhase::Move, center + DVec2::new(30.0, 0.0)));
    app.update();

    let after = picture(&app, entity);
    let view = view();
    for (old, new) in before.position().0.iter().zip(after.position().0.iter()) {
        let shift = view.project(*new) - view.project(*old);
        assert!(shift.distance(DVec2::new(30.0, 0.0)) < 1e-6);
    }
    assert_eq!(app.world().resource::<ActiveInteraction>().entity, Some(entity));

    pointer(&mut app, OverlayPointer::new(PointerPhase::Up, center + DVec2::new(30.0, 0.0)));
    app.update();
    let active = app.world().resource::<ActiveInteraction>();
    assert!(active.entity.is_none());
    assert!(!active.interaction.is_dragging());
}

#[test]
fn test_locked_picture_ignores_drag() {
    let mut app = test_app();
    let entity = spawn_picture(&mut app);
    app.world_mut().write_message(SetOverlayLocked {
        entity,
        locked: true,
    });
    app.update();

    let rendered = read_messages::<RenderOverlay>(&app);
    let last = rendered.last().expect("render bundle");
    assert_eq!(last.bundle.circle.layout.visibility, Visibility::None);
    assert_eq!(last.bundle.raster.layout.visibility, Visibility::Visible);

    let before = *picture(&app, entity).position();
    let center = DVec2::new(500.0, 400.0);
    pointer(&mut app, OverlayPointer::new(PointerPhase::Down, center).on(entity, None));
    pointer(&mut app, OverlayPointer::new(PointerPhase::Move, center + DVec2::new(50.0, 50.0)));
    app.update();

    assert_eq!(*picture(&app, entity).position(), before);
    assert!(app.world().resource::<ActiveInteraction>().entity.is_none());
}

#[test]
fn test_invalid_corner_handle_leaves_picture_untouched() {
    let mut app = test_app();
    let entity = spawn_picture(&mut app);
    app.update();

    let before = *picture(&app, entity).position();
    let at = DVec2::new(500.0, 400.0);
    pointer(
        &mut app,
        OverlayPointer::new(PointerPhase::Down, at).on(entity, Some(Handle::Corner(5))),
    );
    pointer(&mut app, OverlayPointer::new(PointerPhase::Move, at + DVec2::new(10.0, 10.0)));
    app.update();

    assert_eq!(*picture(&app, entity).position(), before);
    let active = app.world().resource::<ActiveInteraction>();
    assert!(active.entity.is_none());
    assert!(!active.interaction.is_dragging());
}

#[test]
fn test_resize_from_corner_feature_keeps_anchor() {
    let mut app = test_app();
    let entity = spawn_picture(&mut app);
    app.update();

    let before = *picture(&app, entity).position();
    let corner = view().project(before.0[0]);
    pointer(
        &mut app,
        OverlayPointer::new(PointerPhase::Down, corner).on(entity, Some(Handle::Corner(0))),
    );
    pointer(&mut app, OverlayPointer::new(PointerPhase::Move, corner - DVec2::new(20.0, 20.0)));
    app.update();

    let after = *picture(&app, entity).position();
    assert_eq!(after.0[2], before.0[2]);
    assert_ne!(after.0[0], before.0[0]);
}

#[test]
fn test_cancel_stops_drag() {
    let mut app = test_app();
    let entity = spawn_picture(&mut app);
    app.update();

    let center = DVec2::new(500.0, 400.0);
    pointer(&mut app, OverlayPointer::new(PointerPhase::Down, center));
    pointer(&mut app, OverlayPointer::new(PointerPhase::Cancel, center));
    pointer(&mut app, OverlayPointer::new(PointerPhase::Move, center + DVec2::new(40.0, 0.0)));
    let before = *picture(&app, entity).position();
    app.update();

    assert_eq!(*picture(&app, entity).position(), before);
}

#[test]
fn test_remove_overlay_during_drag() {
    let mut app = test_app();
    let entity = spawn_picture(&mut app);
    app.update();

    let center = DVec2::new(500.0, 400.0);
    pointer(&mut app, OverlayPointer::new(PointerPhase::Down, center));
    app.update();
    assert_eq!(app.world().resource::<ActiveInteraction>().entity, Some(entity));

    app.world_mut().write_message(RemoveOverlay { entity });
    app.update();

    assert!(app.world().get_entity(entity).is_err());
    let active = app.world().resource::<ActiveInteraction>();
    assert!(active.entity.is_none());
    assert!(!active.interaction.is_dragging());

    let removed = read_messages::<OverlayRemoved>(&app);
    assert_eq!(removed.len(), 1);
    assert_eq!(removed[0].source_ids, vec!["survey-raster", "survey-polygon"]);
    assert_eq!(removed[0].layer_ids.len(), 4);
}

#[test]
fn test_add_pictures_spawns_centered_overlays() {
    let mut app = test_app();
    app.world_mut().write_message(AddPictures {
        images: vec![
            ImageInfo {
                url: "a.png".to_string(),
                width: 100,
                height: 100,
            },
            ImageInfo {
                url: "b.jpg".to_string(),
                width: 400,
                height: 100,
            },
        ],
    });
    app.update();

    let mut query = app.world_mut().query::<&PictureOverlay>();
    let pictures: Vec<PictureOverlay> = query.iter(app.world()).cloned().collect();
    assert_eq!(pictures.len(), 2);

    let view = view();
    for picture in &pictures {
        let corners = picture.position().project(&view);
        let center = corners.iter().sum::<DVec2>() / 4.0;
        assert!(center.distance(DVec2::new(500.0, 400.0)) < 1e-6);
    }
    assert_eq!(read_messages::<RenderOverlay>(&app).len(), 2);
}

#[test]
fn test_hover_reports_cursor() {
    let mut app = test_app();
    spawn_picture(&mut app);
    app.update();

    pointer(&mut app, OverlayPointer::new(PointerPhase::Move, DVec2::new(500.0, 400.0)));
    app.update();

    let cursors = read_messages::<OverlayCursorChanged>(&app);
    assert_eq!(cursors.last().map(|c| c.cursor), Some(Cursor::Move));
}
