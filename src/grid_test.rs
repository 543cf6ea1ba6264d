#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn defaults() {
    let g = GridSettings::default();
    assert!(g.enabled);
    assert_eq!(g.grid_type, GridType::Square);
    assert_eq!(g.line_style, LineStyle::Solid);
    assert_eq!(g.cell_size, 50.0);
    assert_eq!(g.color, "#ffffff");
    assert_eq!(g.opacity, 0.15);
}

#[test]
fn grid_type_serde_names() {
    let cases = [
        (GridType::Square, "\"square\""),
        (GridType::HexH, "\"hex-h\""),
        (GridType::HexV, "\"hex-v\""),
        (GridType::Isometric, "\"isometric\""),
    ];
    for (t, expected) in cases {
        assert_eq!(serde_json::to_string(&t).unwrap(), expected);
        let back: GridType = serde_json::from_str(expected).unwrap();
        assert_eq!(back, t);
    }
}

#[test]
fn settings_serialize_with_snapshot_keys() {
    let v = serde_json::to_value(GridSettings::default()).unwrap();
    assert_eq!(v["type"], "square");
    assert_eq!(v["lineStyle"], "solid");
    assert_eq!(v["cellSize"], 50.0);
}

#[test]
fn apply_patch_updates_present_fields_only() {
    let mut g = GridSettings::default();
    let changed = g.apply(&GridSettingsPatch {
        grid_type: Some(GridType::HexV),
        cell_size: Some(70.0),
        ..Default::default()
    });
    assert!(changed);
    assert_eq!(g.grid_type, GridType::HexV);
    assert_eq!(g.cell_size, 70.0);
    assert_eq!(g.line_style, LineStyle::Solid);
}

#[test]
fn apply_patch_rejects_non_positive_cell_size() {
    let mut g = GridSettings::default();
    assert!(!g.apply(&GridSettingsPatch { cell_size: Some(0.0), ..Default::default() }));
    assert!(!g.apply(&GridSettingsPatch { cell_size: Some(-10.0), ..Default::default() }));
    assert_eq!(g.cell_size, 50.0);
}

#[test]
fn apply_patch_clamps_opacity() {
    let mut g = GridSettings::default();
    g.apply(&GridSettingsPatch { opacity: Some(3.0), ..Default::default() });
    assert_eq!(g.opacity, 1.0);
    g.apply(&GridSettingsPatch { opacity: Some(-1.0), ..Default::default() });
    assert_eq!(g.opacity, 0.0);
}

#[test]
fn empty_patch_changes_nothing() {
    let mut g = GridSettings::default();
    assert!(!g.apply(&GridSettingsPatch::default()));
}
