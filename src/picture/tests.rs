//! Unit tests for the picture overlay model.

use bevy::math::DVec2;

use super::*;
use crate::common::Visibility;
use crate::constants::DEFAULT_FILL_FRACTION;
use crate::projection::WebMercatorView;

fn unit_square() -> PicturePosition {
    PicturePosition::new([
        LngLat::new(0.0, 0.0),
        LngLat::new(1.0, 0.0),
        LngLat::new(1.0, 1.0),
        LngLat::new(0.0, 1.0),
    ])
}

fn picture(position: PicturePosition) -> PictureOverlay {
    PictureOverlay::new(PictureOptions {
        id: "plan".to_string(),
        url: "file:///tmp/plan.png".to_string(),
        width: 400,
        height: 300,
        position,
    })
}

#[test]
fn test_new_picture_is_unlocked() {
    let picture = picture(unit_square());
    assert!(!picture.is_locked());
    assert_eq!(picture.id(), "plan");
    assert_eq!(picture.url(), "file:///tmp/plan.png");
    assert_eq!((picture.width(), picture.height()), (400, 300));
}

#[test]
fn test_coordinates_follow_corner_order() {
    let picture = picture(unit_square());
    assert_eq!(
        picture.coordinates(),
        [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]
    );
}

#[test]
fn test_polygon_ring_is_closed() {
    let picture = picture(unit_square());
    let polygon = picture.as_polygon();
    assert_eq!(polygon.properties.id, "plan");
    assert_eq!(
        *polygon.geometry.ring(),
        [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]
    );
}

#[test]
fn test_polygon_keeps_order_for_self_intersecting_position() {
    // A bow-tie must not be re-sorted into a hull
    let bow_tie = PicturePosition::new([
        LngLat::new(0.0, 0.0),
        LngLat::new(1.0, 1.0),
        LngLat::new(1.0, 0.0),
        LngLat::new(0.0, 1.0),
    ]);
    let ring = *picture(bow_tie).as_polygon().geometry.ring();
    assert_eq!(ring[1], [1.0, 1.0]);
    assert_eq!(ring[2], [1.0, 0.0]);
    assert_eq!(ring[0], ring[4]);
}

#[test]
fn test_points_carry_corner_index() {
    let position = PicturePosition::new([
        LngLat::new(5.0, 2.0),
        LngLat::new(-3.0, 7.5),
        LngLat::new(12.0, -1.0),
        LngLat::new(0.25, 0.75),
    ]);
    let points = picture(position).as_points();
    assert_eq!(points.features.len(), 4);
    for (i, feature) in points.features.iter().enumerate() {
        assert_eq!(feature.properties.index, i);
        assert_eq!(feature.geometry.coordinates, position.0[i].to_array());
    }
}

#[test]
fn test_derived_shapes_track_position_updates() {
    let mut picture = picture(unit_square());
    let moved = PicturePosition::new(unit_square().0.map(|c| LngLat::new(c.lng + 2.0, c.lat)));
    picture.set_position(moved);

    assert_eq!(picture.coordinates()[0], [2.0, 0.0]);
    assert_eq!(picture.as_polygon().geometry.ring()[4], [2.0, 0.0]);
    assert_eq!(picture.image_source().source.coordinates[2], [3.0, 1.0]);
}

#[test]
fn test_source_ids() {
    let picture = picture(unit_square());
    let image = picture.image_source();
    assert_eq!(image.id, "plan-raster");
    assert_eq!(image.source.url, "file:///tmp/plan.png");
    assert_eq!(image.source.coordinates, picture.coordinates());

    let polygon = picture.polygon_source();
    assert_eq!(polygon.id, "plan-polygon");
    assert_eq!(polygon.source.data, picture.as_polygon());
}

#[test]
fn test_layers_reference_sources() {
    let picture = picture(unit_square());
    assert_eq!(picture.as_raster_layer().source, "plan-raster");
    assert_eq!(picture.as_fill_layer().source, "plan-polygon");
    assert_eq!(picture.as_line_layer().source, "plan-polygon");
    assert_eq!(picture.as_circle_layer().source, "plan-polygon");

    let bundle = picture.render_bundle();
    assert_eq!(bundle.source_ids(), ["plan-raster", "plan-polygon"]);
    assert_eq!(
        bundle.layer_ids(),
        ["plan-raster", "plan-fill", "plan-contour", "plan-circle"]
    );
}

#[test]
fn test_layers_are_reproducible() {
    let a = picture(unit_square());
    let mut b = picture(unit_square());
    b.set_locked(true);
    assert_eq!(a.as_line_layer(), b.as_line_layer());
    assert_eq!(a.as_circle_layer(), b.as_circle_layer());
    assert_eq!(a.as_raster_layer(), b.as_raster_layer());
}

#[test]
fn test_layer_style_json() {
    let picture = picture(unit_square());

    let raster = serde_json::to_value(picture.as_raster_layer()).unwrap();
    assert_eq!(raster["type"], "raster");
    assert_eq!(raster["paint"]["raster-opacity"], 0.5);
    assert_eq!(raster["paint"]["raster-fade-duration"], 0);

    let fill = serde_json::to_value(picture.as_fill_layer()).unwrap();
    assert_eq!(fill["type"], "fill");
    assert_eq!(fill["paint"]["fill-opacity"], 0.0);

    let line = serde_json::to_value(picture.as_line_layer()).unwrap();
    assert_eq!(line["type"], "line");
    assert_eq!(line["layout"]["line-cap"], "round");
    assert_eq!(line["layout"]["line-join"], "round");
    assert_eq!(line["paint"]["line-dasharray"], serde_json::json!([0.2, 2.0]));
    assert_eq!(line["paint"]["line-color"], "rgb(61, 90, 254)");

    let circle = serde_json::to_value(picture.as_circle_layer()).unwrap();
    assert_eq!(circle["type"], "circle");
    assert_eq!(circle["paint"]["circle-radius"], 5.0);
    assert_eq!(circle["paint"]["circle-stroke-color"], "#fff");
    assert_eq!(circle["layout"]["visibility"], "visible");
}

#[test]
fn test_source_json_shape() {
    let picture = picture(unit_square());

    let image = serde_json::to_value(picture.image_source()).unwrap();
    assert_eq!(image["id"], "plan-raster");
    assert_eq!(image["source"]["type"], "image");
    assert_eq!(image["source"]["coordinates"][1], serde_json::json!([1.0, 0.0]));

    let polygon = serde_json::to_value(picture.polygon_source()).unwrap();
    assert_eq!(polygon["source"]["type"], "geojson");
    assert_eq!(polygon["source"]["data"]["type"], "Feature");
    assert_eq!(polygon["source"]["data"]["properties"]["id"], "plan");
    assert_eq!(polygon["source"]["data"]["geometry"]["type"], "Polygon");
    assert_eq!(
        polygon["source"]["data"]["geometry"]["coordinates"][0]
            .as_array()
            .map(Vec::len),
        Some(5)
    );

    let points = serde_json::to_value(picture.as_points()).unwrap();
    assert_eq!(points["type"], "FeatureCollection");
    assert_eq!(points["features"][3]["properties"]["index"], 3);
    assert_eq!(points["features"][3]["geometry"]["type"], "Point");
}

#[test]
fn test_handle_visibility() {
    let mut bundle = picture(unit_square()).render_bundle();
    bundle.set_handles_visibility(Visibility::None);
    assert_eq!(bundle.line.layout.visibility, Visibility::None);
    assert_eq!(bundle.circle.layout.visibility, Visibility::None);
    assert_eq!(bundle.raster.layout.visibility, Visibility::Visible);

    let mut raster = picture(unit_square()).as_raster_layer();
    raster.set_visibility(Visibility::None);
    assert_eq!(raster.layout.visibility, Visibility::None);
}

#[test]
fn test_centroid_of_unit_square() {
    assert_eq!(picture(unit_square()).centroid(), LngLat::new(0.5, 0.5));
}

#[test]
fn test_opposite_point_to() {
    let picture = picture(unit_square());
    assert_eq!(picture.opposite_point_to(0), Ok(2));
    assert_eq!(picture.opposite_point_to(3), Ok(1));
    assert_eq!(
        picture.opposite_point_to(7),
        Err(GeometryError::InvalidCornerIndex(7))
    );
}

#[test]
fn test_centered_position_keeps_aspect_ratio() {
    let view = WebMercatorView {
        center: LngLat::new(2.35, 48.85),
        zoom: 14.0,
        viewport: [1000.0, 800.0],
    };
    let position = PicturePosition::centered(&view, 400, 200, 0.5);
    let [tl, tr, br, bl] = position.project(&view);

    // Width limits: 0.5 * min(1000/400, 800/200) = 1.25 -> 500 x 250 px
    assert!((tr.x - tl.x - 500.0).abs() < 1e-6);
    assert!((bl.y - tl.y - 250.0).abs() < 1e-6);
    assert!((br - tl - DVec2::new(500.0, 250.0)).length() < 1e-6);
    assert!(tl.y < bl.y, "top-left must be above bottom-left on screen");

    let center = (tl + br) / 2.0;
    assert!(center.distance(DVec2::new(500.0, 400.0)) < 1e-6);
}

#[test]
fn test_centered_position_ignores_invalid_fraction() {
    let view = WebMercatorView {
        center: LngLat::new(2.35, 48.85),
        zoom: 14.0,
        viewport: [1000.0, 800.0],
    };
    let fallback = PicturePosition::centered(&view, 400, 200, DEFAULT_FILL_FRACTION);
    for bad in [-0.5, 0.0, f64::NAN, 3.0] {
        let position = PicturePosition::centered(&view, 400, 200, bad);
        assert_eq!(position, fallback);

        let [tl, _, br, _] = position.project(&view);
        assert!(tl.x < br.x && tl.y < br.y, "corner 0 must stay top-left");
    }
}

#[test]
fn test_from_image_generates_unique_ids() {
    let info = ImageInfo {
        url: "plan.png".to_string(),
        width: 640,
        height: 480,
    };
    let view = WebMercatorView::default();
    let a = PictureOverlay::from_image(&info, &view, 0.5);
    let b = PictureOverlay::from_image(&info, &view, 0.5);
    assert_ne!(a.id(), b.id());
    assert_eq!(a.url(), "plan.png");
    assert_eq!(a.position(), b.position());
}
