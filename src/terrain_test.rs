use super::*;

fn brush(size: u32, shape: BrushShape) -> TerrainBrush {
    TerrainBrush { size, elevation: 5, kind: BrushKind::Paint(TerrainType::Normal), shape }
}

fn origin() -> CellCoord {
    CellCoord::new(0, 0)
}

// =============================================================
// CellCoord
// =============================================================

#[test]
fn cell_coord_string_form() {
    assert_eq!(CellCoord::new(-3, 7).to_string(), "-3,7");
    assert_eq!("4,-2".parse::<CellCoord>().unwrap(), CellCoord::new(4, -2));
}

#[test]
fn cell_coord_rejects_malformed_keys() {
    assert!("4".parse::<CellCoord>().is_err());
    assert!("a,1".parse::<CellCoord>().is_err());
    assert!("1,b".parse::<CellCoord>().is_err());
}

// =============================================================
// Brush footprint
// =============================================================

#[test]
fn size_one_touches_only_center() {
    for shape in [BrushShape::Circle, BrushShape::Square, BrushShape::Rectangle] {
        assert_eq!(brush(1, shape).footprint(CellCoord::new(2, 3)), vec![CellCoord::new(2, 3)]);
    }
}

#[test]
fn size_zero_behaves_like_size_one() {
    assert_eq!(brush(0, BrushShape::Rectangle).footprint(origin()), vec![origin()]);
}

#[test]
fn rectangle_size_three_covers_nine_cells() {
    assert_eq!(brush(3, BrushShape::Rectangle).footprint(origin()).len(), 9);
}

#[test]
fn square_is_an_outline() {
    let cells = brush(5, BrushShape::Square).footprint(origin());
    // 5x5 block minus the 3x3 interior
    assert_eq!(cells.len(), 16);
    assert!(!cells.contains(&origin()));
    assert!(cells.contains(&CellCoord::new(2, 0)));
}

#[test]
fn circle_uses_squared_radius() {
    let cells = brush(3, BrushShape::Circle).footprint(origin());
    // r = 1: center plus four neighbors
    assert_eq!(cells.len(), 5);
    assert!(!cells.contains(&CellCoord::new(1, 1)));

    let cells = brush(4, BrushShape::Circle).footprint(origin());
    // r = 2
    assert_eq!(cells.len(), 13);
}

#[test]
fn even_sizes_floor_the_radius() {
    assert_eq!(brush(2, BrushShape::Rectangle).footprint(origin()).len(), 9);
}

#[test]
fn oversized_brush_paints_as_largest() {
    for shape in [BrushShape::Circle, BrushShape::Square, BrushShape::Rectangle] {
        let huge = brush(200_000, shape).footprint(origin());
        assert_eq!(huge, brush(MAX_BRUSH_SIZE, shape).footprint(origin()));
    }
    assert_eq!(brush(u32::MAX, BrushShape::Rectangle).footprint(origin()).len(), 121);
}

#[test]
fn footprint_at_coordinate_limit_skips_overflowing_cells() {
    let corner = CellCoord::new(i32::MAX, i32::MIN);
    let cells = brush(3, BrushShape::Rectangle).footprint(corner);
    assert_eq!(cells.len(), 4);
    assert!(cells.contains(&corner));
}

// =============================================================
// TerrainGrid
// =============================================================

#[test]
fn absent_cell_is_ground() {
    let grid = TerrainGrid::new();
    assert!(grid.get(origin()).is_none());
    assert!(grid.is_empty());
    assert_eq!(TerrainCell::default(), TerrainCell { elevation: 0, terrain_type: TerrainType::Normal });
}

#[test]
fn paint_overwrites_last_write_wins() {
    let mut grid = TerrainGrid::new();
    grid.paint_area(origin(), &brush(1, BrushShape::Circle));
    let mut water = brush(1, BrushShape::Circle);
    water.elevation = -5;
    water.kind = BrushKind::Paint(TerrainType::Water);
    grid.paint_area(origin(), &water);
    assert_eq!(grid.get(origin()), Some(&TerrainCell { elevation: -5, terrain_type: TerrainType::Water }));
    assert_eq!(grid.len(), 1);
}

#[test]
fn eraser_removes_exactly_the_footprint() {
    let mut grid = TerrainGrid::new();
    grid.paint_area(origin(), &brush(5, BrushShape::Rectangle));
    assert_eq!(grid.len(), 25);

    let mut eraser = brush(3, BrushShape::Rectangle);
    eraser.kind = BrushKind::Eraser;
    let touched = grid.paint_area(origin(), &eraser);
    assert_eq!(touched.len(), 9);
    assert_eq!(grid.len(), 16);
    for cell in touched {
        assert!(grid.get(cell).is_none());
    }
    assert!(grid.get(CellCoord::new(2, 2)).is_some());
}

#[test]
fn set_and_clear_cells() {
    let mut grid = TerrainGrid::new();
    grid.set(CellCoord::new(1, 1), TerrainCell { elevation: 10, terrain_type: TerrainType::Hazard });
    assert!(grid.clear_cell(CellCoord::new(1, 1)));
    assert!(!grid.clear_cell(CellCoord::new(1, 1)));
    grid.paint_area(origin(), &brush(3, BrushShape::Rectangle));
    grid.clear_all();
    assert!(grid.is_empty());
}

#[test]
fn grid_serializes_with_string_keys() {
    let mut grid = TerrainGrid::new();
    grid.set(CellCoord::new(-1, 2), TerrainCell { elevation: -10, terrain_type: TerrainType::Difficult });
    let v = serde_json::to_value(&grid).unwrap();
    assert_eq!(v["-1,2"]["elevation"], -10);
    assert_eq!(v["-1,2"]["type"], "difficult");

    let back: TerrainGrid = serde_json::from_value(v).unwrap();
    assert_eq!(back, grid);
}

#[test]
fn grid_rejects_bad_keys() {
    let v = serde_json::json!({ "nope": { "elevation": 0, "type": "normal" } });
    assert!(serde_json::from_value::<TerrainGrid>(v).is_err());
}
