#![allow(clippy::float_cmp)]

use super::*;

// --- Templates ---

#[test]
fn webcam_visible_by_default() {
    let layer = TemplateLayer::default();
    assert_eq!(layer.visible(), Some(Template::Webcam));
}

#[test]
fn selecting_hides_every_other_template() {
    let all = [Template::Webcam, Template::Blank, Template::Grid, Template::DotGrid, Template::Lined];
    let mut layer = TemplateLayer::default();
    for chosen in all {
        layer.select(chosen);
        let visible: Vec<Template> = all.into_iter().filter(|t| layer.is_visible(*t)).collect();
        assert_eq!(visible, vec![chosen]);
    }
}

#[test]
fn hide_all_leaves_nothing_visible() {
    let mut layer = TemplateLayer::default();
    layer.select(Template::Grid);
    layer.hide_all();
    assert_eq!(layer.visible(), None);
    assert!(!layer.is_visible(Template::Grid));
}

#[test]
fn template_serde_names() {
    assert_eq!(serde_json::to_string(&Template::DotGrid).unwrap(), "\"dot_grid\"");
    let t: Template = serde_json::from_str("\"lined\"").unwrap();
    assert_eq!(t, Template::Lined);
}

// --- Images ---

fn store_with_one() -> (ImageStore, Uuid) {
    let mut store = ImageStore::new();
    let id = store.add("data:image/png;base64,AAAA", Point::new(10.0, 20.0), 300.0, 200.0, 0.8);
    (store, id)
}

#[test]
fn add_records_fields() {
    let (store, id) = store_with_one();
    let img = store.get(&id).unwrap();
    assert_eq!(img.position, Point::new(10.0, 20.0));
    assert_eq!((img.width, img.height), (300.0, 200.0));
    assert_eq!(img.opacity, 0.8);
}

#[test]
fn add_clamps_size_and_opacity() {
    let mut store = ImageStore::new();
    let id = store.add("a.png", Point::default(), 0.0, -5.0, 3.0);
    let img = store.get(&id).unwrap();
    assert_eq!((img.width, img.height), (1.0, 1.0));
    assert_eq!(img.opacity, 1.0);
}

#[test]
fn move_and_resize() {
    let (mut store, id) = store_with_one();
    assert!(store.move_to(&id, Point::new(-4.0, 4.0)));
    assert!(store.resize(&id, 0.2, 50.0));
    let img = store.get(&id).unwrap();
    assert_eq!(img.position, Point::new(-4.0, 4.0));
    assert_eq!((img.width, img.height), (1.0, 50.0));
}

#[test]
fn opacity_clamps_and_keeps_on_nan() {
    let (mut store, id) = store_with_one();
    assert!(store.set_opacity(&id, -1.0));
    assert_eq!(store.get(&id).unwrap().opacity, 0.0);
    assert!(store.set_opacity(&id, f64::NAN));
    assert_eq!(store.get(&id).unwrap().opacity, 0.0);
}

#[test]
fn operations_on_unknown_image_report_false() {
    let (mut store, _) = store_with_one();
    let ghost = Uuid::new_v4();
    assert!(!store.move_to(&ghost, Point::default()));
    assert!(!store.resize(&ghost, 5.0, 5.0));
    assert!(!store.set_opacity(&ghost, 0.5));
    assert!(store.remove(&ghost).is_none());
    assert_eq!(store.len(), 1);
}

#[test]
fn remove_keeps_insertion_order_of_rest() {
    let mut store = ImageStore::new();
    let a = store.add("a", Point::default(), 1.0, 1.0, 1.0);
    let b = store.add("b", Point::default(), 1.0, 1.0, 1.0);
    let c = store.add("c", Point::default(), 1.0, 1.0, 1.0);
    assert!(store.remove(&b).is_some());
    let order: Vec<Uuid> = store.as_slice().iter().map(|img| img.id).collect();
    assert_eq!(order, vec![a, c]);
}
