#![allow(clippy::float_cmp)]

use super::*;

fn make_stroke(n: usize) -> Stroke {
    #[allow(clippy::cast_precision_loss)]
    let points = (0..n).map(|i| Point::new(i as f64, 0.0)).collect();
    Stroke::new(StrokeId::new_local(), points, "#000000", 2.0, 0)
}

fn ids(store: &StrokeStore) -> Vec<StrokeId> {
    store.iter().map(|s| s.id.clone()).collect()
}

// =============================================================
// StrokeId
// =============================================================

#[test]
fn local_ids_are_unique() {
    assert_ne!(StrokeId::new_local(), StrokeId::new_local());
}

#[test]
fn local_and_remote_spaces_are_disjoint() {
    let uuid = Uuid::new_v4();
    assert_ne!(StrokeId::Local(uuid), StrokeId::remote(uuid.to_string()));
    assert!(StrokeId::remote("7").is_remote());
    assert!(!StrokeId::new_local().is_remote());
}

#[test]
fn stroke_id_display_names_origin() {
    assert_eq!(StrokeId::remote("abc:1").to_string(), "remote:abc:1");
    assert!(StrokeId::new_local().to_string().starts_with("local:"));
}

#[test]
fn stroke_id_serde_shape() {
    let json = serde_json::to_value(StrokeId::remote("9")).unwrap();
    assert_eq!(json, serde_json::json!({ "origin": "remote", "id": "9" }));
    let back: StrokeId = serde_json::from_value(json).unwrap();
    assert_eq!(back, StrokeId::remote("9"));
}

// =============================================================
// Pen
// =============================================================

#[test]
fn pen_defaults() {
    let pen = Pen::default();
    assert_eq!(pen.color(), DEFAULT_PEN_COLOR);
    assert_eq!(pen.thickness(), DEFAULT_PEN_THICKNESS);
}

#[test]
fn pen_accepts_hex_color() {
    let mut pen = Pen::default();
    assert!(pen.set_color("#FF00aa"));
    assert_eq!(pen.color(), "#FF00aa");
}

#[test]
fn pen_ignores_invalid_color() {
    let mut pen = Pen::default();
    for bad in ["red", "#fff", "#12345g", "123456", "#1234567", ""] {
        assert!(!pen.set_color(bad), "{bad:?} accepted");
        assert_eq!(pen.color(), DEFAULT_PEN_COLOR);
    }
}

#[test]
fn pen_thickness_clamps() {
    let mut pen = Pen::default();
    pen.set_thickness(0.0);
    assert_eq!(pen.thickness(), 1.0);
    pen.set_thickness(500.0);
    assert_eq!(pen.thickness(), 50.0);
    pen.set_thickness(f64::NAN);
    assert_eq!(pen.thickness(), 50.0);
    pen.set_thickness(12.5);
    assert_eq!(pen.thickness(), 12.5);
}

// =============================================================
// StrokeStore
// =============================================================

#[test]
fn new_store_is_empty() {
    let store = StrokeStore::new();
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
}

#[test]
fn push_preserves_draw_order() {
    let mut store = StrokeStore::new();
    let a = make_stroke(2);
    let b = make_stroke(3);
    let expected = vec![a.id.clone(), b.id.clone()];
    store.push(a);
    store.push(b);
    assert_eq!(ids(&store), expected);
}

#[test]
fn remove_returns_position() {
    let mut store = StrokeStore::new();
    let a = make_stroke(2);
    let b = make_stroke(2);
    let b_id = b.id.clone();
    store.push(a);
    store.push(b);

    let (index, removed) = store.remove(&b_id).unwrap();
    assert_eq!(index, 1);
    assert_eq!(removed.id, b_id);
    assert!(store.remove(&b_id).is_none());
}

#[test]
fn insert_at_clamps_index() {
    let mut store = StrokeStore::new();
    store.push(make_stroke(2));
    let late = make_stroke(2);
    let late_id = late.id.clone();
    store.insert_at(99, late);
    assert_eq!(store.position(&late_id), Some(1));
}

#[test]
fn remove_where_reports_original_positions() {
    let mut store = StrokeStore::new();
    for n in [2, 5, 3, 5] {
        store.push(make_stroke(n));
    }
    let removed = store.remove_where(|s| s.points.len() == 5);
    let positions: Vec<usize> = removed.iter().map(|(i, _)| *i).collect();
    assert_eq!(positions, vec![1, 3]);
    assert_eq!(store.len(), 2);
}

#[test]
fn reinserting_removed_in_ascending_order_restores_layout() {
    let mut store = StrokeStore::new();
    for n in [2, 5, 3, 5, 4] {
        store.push(make_stroke(n));
    }
    let before = ids(&store);
    let removed = store.remove_where(|s| s.points.len() == 5);
    for (index, stroke) in removed {
        store.insert_at(index, stroke);
    }
    assert_eq!(ids(&store), before);
}

#[test]
fn take_all_empties_store() {
    let mut store = StrokeStore::new();
    store.push(make_stroke(2));
    store.push(make_stroke(2));
    assert_eq!(store.take_all().len(), 2);
    assert!(store.is_empty());
}

#[test]
fn get_mut_edits_in_place() {
    let mut store = StrokeStore::new();
    let s = make_stroke(2);
    let id = s.id.clone();
    store.push(s);
    store.get_mut(&id).unwrap().points.push(Point::new(9.0, 9.0));
    assert_eq!(store.get(&id).unwrap().last_point(), Some(Point::new(9.0, 9.0)));
}

#[test]
fn is_hex_color_cases() {
    assert!(is_hex_color("#000000"));
    assert!(is_hex_color("#abcDEF"));
    assert!(!is_hex_color("#abcde"));
    assert!(!is_hex_color("abcdef0"));
}
