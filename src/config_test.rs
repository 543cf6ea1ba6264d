#![allow(clippy::float_cmp)]

use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_match_interactive_behavior() {
    let c = EditorConfig::default();
    assert_eq!(c.duplicate_offset, 30.0);
    assert_eq!(c.rotate_step_deg, 15.0);
    assert_eq!(c.wall_hit_tolerance, 10.0);
    assert_eq!(c.wall_tolerance_space, ToleranceSpace::Screen);
    assert_eq!(c.min_zoom, 0.1);
    assert_eq!(c.max_zoom, 5.0);
    assert_eq!(c.grid_extent, 5000.0);
}

#[test]
fn empty_lookup_yields_defaults() {
    let c = EditorConfig::from_lookup(|_| None).unwrap();
    assert_eq!(c, EditorConfig::default());
}

#[test]
fn lookup_overrides_values() {
    let c = EditorConfig::from_lookup(lookup_from(&[
        ("BATTLEMAP_DUPLICATE_OFFSET", "50"),
        ("BATTLEMAP_WALL_TOLERANCE_SPACE", "world"),
        ("BATTLEMAP_MAX_ZOOM", " 8 "),
    ]))
    .unwrap();
    assert_eq!(c.duplicate_offset, 50.0);
    assert_eq!(c.wall_tolerance_space, ToleranceSpace::World);
    assert_eq!(c.max_zoom, 8.0);
}

#[test]
fn unparseable_number_is_rejected() {
    let err = EditorConfig::from_lookup(lookup_from(&[("BATTLEMAP_ROTATE_STEP_DEG", "fifteen")])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "BATTLEMAP_ROTATE_STEP_DEG"));
}

#[test]
fn unknown_tolerance_space_is_rejected() {
    let err = EditorConfig::from_lookup(lookup_from(&[("BATTLEMAP_WALL_TOLERANCE_SPACE", "galaxy")])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
}

#[test]
fn inverted_zoom_range_is_rejected() {
    let err = EditorConfig::from_lookup(lookup_from(&[("BATTLEMAP_MIN_ZOOM", "3"), ("BATTLEMAP_MAX_ZOOM", "2")]))
        .unwrap_err();
    assert_eq!(err, ConfigError::ZoomRange { min: 3.0, max: 2.0 });
}

#[test]
fn json_partial_object_fills_defaults() {
    let c = EditorConfig::from_json(r#"{"wall_tolerance_space":"world","grid_extent":2000}"#).unwrap();
    assert_eq!(c.wall_tolerance_space, ToleranceSpace::World);
    assert_eq!(c.grid_extent, 2000.0);
    assert_eq!(c.duplicate_offset, 30.0);
}

#[test]
fn json_malformed_is_rejected() {
    assert!(matches!(EditorConfig::from_json("{not json"), Err(ConfigError::Json(_))));
}

#[test]
fn screen_tolerance_scales_with_zoom() {
    let c = EditorConfig::default();
    assert_eq!(c.wall_tolerance_world(1.0), 10.0);
    assert_eq!(c.wall_tolerance_world(2.0), 5.0);
    assert_eq!(c.wall_tolerance_world(0.5), 20.0);
}

#[test]
fn world_tolerance_ignores_zoom() {
    let c = EditorConfig { wall_tolerance_space: ToleranceSpace::World, ..EditorConfig::default() };
    assert_eq!(c.wall_tolerance_world(4.0), 10.0);
}

#[test]
fn env_value_distinguishes_unset_from_non_unicode() {
    assert_eq!(env_value("BATTLEMAP_MIN_ZOOM", Ok("0.5".into())), Ok(Some("0.5".into())));
    assert_eq!(env_value("BATTLEMAP_MIN_ZOOM", Err(VarError::NotPresent)), Ok(None));
    let err = env_value("BATTLEMAP_MIN_ZOOM", Err(VarError::NotUnicode("0.5\u{fffd}".into()))).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "BATTLEMAP_MIN_ZOOM"));
}

#[test]
fn env_keys_cover_every_lookup() {
    let seen = std::cell::RefCell::new(Vec::new());
    EditorConfig::from_lookup(|key| {
        seen.borrow_mut().push(key.to_owned());
        None
    })
    .unwrap();
    let mut seen = seen.into_inner();
    seen.sort();
    let mut keys: Vec<String> = ENV_KEYS.iter().map(|k| (*k).to_owned()).collect();
    keys.sort();
    assert_eq!(seen, keys);
}
