use arena_shooter::entities::*;
use arena_shooter::error::MapError;
use arena_shooter::map::{TileMap, ARENA_LAYOUT};

// ── Rect ──────────────────────────────────────────────────────────────────────

#[test]
fn rect_overlap_is_strict() {
    let a = Rect::new(0, 0, 40, 40);
    assert!(a.intersects(&Rect::new(39, 39, 40, 40)));
    // Sharing an edge is not an overlap
    assert!(!a.intersects(&Rect::new(40, 0, 40, 40)));
    assert!(!a.intersects(&Rect::new(0, 40, 40, 40)));
}

#[test]
fn rect_containment_intersects() {
    let outer = Rect::new(0, 0, 100, 100);
    let inner = Rect::new(10, 10, 5, 5);
    assert!(outer.intersects(&inner));
    assert!(inner.intersects(&outer));
}

// ── Player ────────────────────────────────────────────────────────────────────

#[test]
fn spawned_player_is_still() {
    let p = Player::spawn(80, 80);
    assert!(!p.is_moving());
}

#[test]
fn aim_origin_is_box_centre() {
    let p = Player::spawn(80, 80);
    assert_eq!(p.aim_origin(), (100.0, 100.0));
    assert_eq!(p.bounds(), Rect::new(80, 80, PLAYER_SIZE, PLAYER_SIZE));
}

// ── TileMap ───────────────────────────────────────────────────────────────────

#[test]
fn bordered_map_walls_only_the_edge() {
    let map = TileMap::bordered(5, 4);
    assert_eq!((map.cols(), map.rows()), (5, 4));
    assert!(map.get(0, 0).unwrap().is_wall());
    assert!(map.get(4, 3).unwrap().is_wall());
    assert!(!map.get(2, 1).unwrap().is_wall());
    // 5*4 tiles minus 3*2 floor
    assert_eq!(map.walls().count(), 14);
}

#[test]
fn tiles_sit_on_the_pixel_grid() {
    let map = TileMap::bordered(5, 4);
    let t = map.get(3, 2).unwrap();
    assert_eq!((t.x, t.y), (3 * TILE_SIZE, 2 * TILE_SIZE));
    assert_eq!(t.bounds(), Rect::new(120, 80, TILE_SIZE, TILE_SIZE));
}

#[test]
fn get_out_of_range_is_none() {
    let map = TileMap::bordered(5, 4);
    assert!(map.get(5, 0).is_none());
    assert!(map.get(0, 4).is_none());
}

#[test]
fn arena_fills_the_playfield() {
    let map = TileMap::arena().unwrap();
    assert_eq!((map.cols(), map.rows()), TileMap::field_dimensions());
    assert_eq!(map.tiles().count(), 20 * 15);
}

#[test]
fn arena_spawn_point_is_clear() {
    let map = TileMap::arena().unwrap();
    let (x, y) = PLAYER_SPAWN;
    assert!(!map.hits_wall(&Rect::new(x, y, PLAYER_SIZE, PLAYER_SIZE)));
}

#[test]
fn layout_parses_walls_and_floor() {
    let map = TileMap::from_layout("###\n#.#\n###").unwrap();
    assert_eq!(map.walls().count(), 8);
    assert_eq!(map.get(1, 1).unwrap().kind, TileKind::Floor);
}

#[test]
fn layout_skips_blank_lines() {
    let map = TileMap::from_layout("\n##\n\n##\n").unwrap();
    assert_eq!((map.cols(), map.rows()), (2, 2));
}

#[test]
fn empty_layout_is_rejected() {
    assert_eq!(TileMap::from_layout("").unwrap_err(), MapError::Empty);
    assert_eq!(TileMap::from_layout("\n\n").unwrap_err(), MapError::Empty);
}

#[test]
fn ragged_layout_is_rejected() {
    let err = TileMap::from_layout("###\n##\n###").unwrap_err();
    assert_eq!(err, MapError::RaggedRow { row: 1, expected: 3, found: 2 });
}

#[test]
fn unknown_glyph_is_rejected() {
    let err = TileMap::from_layout("###\n#x#\n###").unwrap_err();
    assert_eq!(err, MapError::UnknownTile { row: 1, col: 1, ch: 'x' });
}

#[test]
fn stock_layout_is_walled_in() {
    let map = TileMap::from_layout(ARENA_LAYOUT).unwrap();
    for col in 0..map.cols() {
        assert!(map.get(col, 0).unwrap().is_wall());
        assert!(map.get(col, map.rows() - 1).unwrap().is_wall());
    }
    for row in 0..map.rows() {
        assert!(map.get(0, row).unwrap().is_wall());
        assert!(map.get(map.cols() - 1, row).unwrap().is_wall());
    }
}

// ── Menu ──────────────────────────────────────────────────────────────────────

#[test]
fn menu_items_in_order() {
    let labels: Vec<_> = MenuItem::ALL.iter().map(|i| i.label()).collect();
    assert_eq!(labels, ["Play", "Options", "Exit"]);
}
