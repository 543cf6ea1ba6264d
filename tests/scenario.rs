//! End-to-end editing sessions driven through the public engine API.
#![allow(clippy::float_cmp)]

use std::f64::consts::FRAC_PI_4;

use battlemap::asset::{AssetKind, DecodedImage};
use battlemap::camera::Point;
use battlemap::engine::{Action, EngineCore};
use battlemap::geometry::local_to_world;
use battlemap::grid::{GridSettingsPatch, GridType};
use battlemap::input::{Button, Key, Modifiers, Tool, WheelDelta};
use battlemap::render::{self, DrawOp, RecordingSurface};
use battlemap::sprite::SpriteId;

/// Route engine logs to the test harness; repeated calls are no-ops.
fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).with_test_writer().try_init();
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn down(core: &mut EngineCore, p: Point) -> Vec<Action> {
    core.on_pointer_down(p, Button::Primary, Modifiers::default())
}

fn drag(core: &mut EngineCore, from: Point, to: Point) -> Vec<Action> {
    let mut actions = down(core, from);
    actions.extend(core.on_pointer_move(to, Modifiers::default()));
    actions.extend(core.on_pointer_up(to, Button::Primary, Modifiers::default()));
    actions
}

fn import(core: &mut EngineCore, name: &str, w: u32, h: u32, kind: AssetKind) -> battlemap::asset::Asset {
    let ticket = core.scene.begin_import();
    let decoded = DecodedImage { width: w, height: h, image_ref: format!("data:image/png;base64,{name}") };
    core.scene.finish_import(ticket, name, decoded, kind).unwrap()
}

fn token(core: &mut EngineCore) -> SpriteId {
    let asset = import(core, "goblin.png", 100, 80, AssetKind::Sprite);
    core.scene.place_sprite(asset.id, 0.0, 0.0).unwrap().id
}

#[test]
fn rotate_then_resize_snaps_rotated_sprite() {
    init_tracing();
    let mut core = EngineCore::new();
    let id = token(&mut core);
    drag(&mut core, pt(50.0, 40.0), pt(50.0, 40.0));

    // Drag the rotate handle (30px above the top edge) to the upper right.
    drag(&mut core, pt(50.0, -30.0), pt(150.0, -60.0));
    let sprite = core.scene.sprite(id).unwrap();
    assert_eq!(sprite.rotation, FRAC_PI_4);

    // The se handle has rotated with the sprite.
    let se = local_to_world(pt(50.0, 40.0), sprite.center(), sprite.rotation);
    let actions = drag(&mut core, se, pt(se.x + 20.0, se.y + 10.0));
    assert!(actions.iter().any(|a| matches!(a, Action::SpriteTransformed { .. })));

    let sprite = core.scene.sprite(id).unwrap();
    assert_eq!((sprite.x, sprite.y, sprite.width, sprite.height), (0.0, 0.0, 100.0, 100.0));
    assert_eq!(sprite.rotation, FRAC_PI_4);
}

#[test]
fn edited_scene_survives_snapshot_round_trip() {
    init_tracing();
    let mut core = EngineCore::new();
    let map = import(&mut core, "cave.jpg", 1000, 800, AssetKind::Map);
    core.scene.place_sprite(map.id, 0.0, 0.0).unwrap();
    let id = token(&mut core);
    core.scene.update_grid_settings(&GridSettingsPatch { grid_type: Some(GridType::HexH), ..Default::default() });

    drag(&mut core, pt(50.0, 40.0), pt(150.0, 140.0));
    core.set_tool(Tool::Terrain);
    drag(&mut core, pt(10.0, 10.0), pt(60.0, 10.0));
    core.set_tool(Tool::Wall);
    drag(&mut core, pt(0.0, 200.0), pt(150.0, 200.0));

    let json = core.scene.to_json().unwrap();
    let mut restored = EngineCore::new();
    restored.scene.load_json(&json).unwrap();

    assert_eq!(restored.scene.save_snapshot(), core.scene.save_snapshot());
    assert_eq!(restored.scene.sprite(id).unwrap().x, 100.0);
    assert_eq!(restored.scene.terrain().len(), 2);
    assert_eq!(restored.scene.walls().len(), 1);
    assert!(restored.scene.selected_sprite_id().is_none());
}

#[test]
fn rejected_snapshot_keeps_current_scene() {
    init_tracing();
    let mut core = EngineCore::new();
    let id = token(&mut core);
    let err = core.scene.load_json(r#"{"version": 1, "assets": []}"#).unwrap_err();
    assert_eq!(err.error_code(), "E_INVALID_FORMAT");
    assert!(core.scene.sprite(id).is_some());
}

#[test]
fn removing_asset_drops_its_sprites_and_selection() {
    let mut core = EngineCore::new();
    let id = token(&mut core);
    let asset = core.scene.sprite(id).unwrap().asset_id;
    drag(&mut core, pt(50.0, 40.0), pt(50.0, 40.0));
    assert_eq!(core.scene.selected_sprite_id(), Some(id));

    assert_eq!(core.scene.remove_asset(asset).unwrap(), 1);
    assert!(core.scene.sprites().is_empty());
    assert!(core.scene.selected_sprite_id().is_none());
    assert!(core.on_key_down(Key("Delete".into()), Modifiers::default()).is_empty());
}

#[test]
fn import_finishing_after_load_is_discarded() {
    let mut core = EngineCore::new();
    let ticket = core.scene.begin_import();
    core.scene.load_json(r#"{"version": 1, "assets": [], "sprites": []}"#).unwrap();
    let decoded = DecodedImage { width: 10, height: 10, image_ref: String::new() };
    assert!(core.scene.finish_import(ticket, "late.png", decoded, AssetKind::Sprite).is_none());
    assert!(core.scene.assets().is_empty());
}

#[test]
fn zoom_keeps_world_point_under_cursor() {
    let mut core = EngineCore::new();
    let cursor = pt(320.0, 240.0);
    let before = core.camera.screen_to_world(cursor);
    for _ in 0..5 {
        core.on_wheel(cursor, WheelDelta { dx: 0.0, dy: -100.0 }, Modifiers::default());
    }
    for _ in 0..2 {
        core.on_wheel(cursor, WheelDelta { dx: 0.0, dy: 100.0 }, Modifiers::default());
    }
    let after = core.camera.screen_to_world(cursor);
    assert!((after.x - before.x).abs() < 1e-9 && (after.y - before.y).abs() < 1e-9);
    assert_eq!(core.zoom_percent(), 130);
}

#[test]
fn rendered_frame_draws_each_visible_sprite() {
    let mut core = EngineCore::new();
    let map = import(&mut core, "cave.jpg", 1000, 800, AssetKind::Map);
    core.scene.place_sprite(map.id, 0.0, 0.0).unwrap();
    token(&mut core);
    core.set_viewport(800.0, 600.0, 1.0);

    let surface = RecordingSurface::new();
    render::draw(&surface, &core.frame()).unwrap();
    assert_eq!(surface.count(|op| matches!(op, DrawOp::DrawImage { .. })), 2);

    core.ui.layers.background = false;
    let surface = RecordingSurface::new();
    render::draw(&surface, &core.frame()).unwrap();
    assert_eq!(surface.count(|op| matches!(op, DrawOp::DrawImage { .. })), 1);
}
