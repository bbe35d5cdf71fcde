mod support;

use egui::Key;
use glam::{IVec2, Vec2, Vec3};
use support::Headless;
use variant_inspector::property::{layer_bit_set, set_layer_bit, EnumHint, RangeHint};
use variant_inspector::variant::{Aabb, Basis, Color, CompositeFields, Rect2, Transform3D};
use variant_inspector::{edit_value, Dictionary, InspectorConfig, PropertyHint, Variant, VariantEditor, VariantKind};

/// Runs one headless egui frame with a central panel.
fn run_frame(mut add: impl FnMut(&mut egui::Ui)) {
    let ctx = egui::Context::default();
    let _ = ctx.run(egui::RawInput::default(), |ctx| {
        egui::CentralPanel::default().show(ctx, |ui| add(ui));
    });
}

/// Panel body editing one labeled value; `changed` collects the edit results.
fn editor_ui<'a>(
    config: &'a InspectorConfig,
    label: &'a str,
    value: &'a mut Variant,
    changed: &'a mut bool,
) -> impl FnMut(&mut egui::Ui) + 'a {
    move |ui: &mut egui::Ui| {
        let mut editor = VariantEditor::new(config);
        *changed |= editor.edit(ui, label, value, PropertyHint::None, "");
    }
}

fn sample_values() -> Vec<Variant> {
    let mut values: Vec<Variant> = VariantKind::ALL.iter().map(|kind| Variant::default_for(*kind)).collect();
    let mut dict = Dictionary::new();
    dict.insert(Variant::from("speed"), Variant::Float(3.5));
    dict.insert(Variant::Int(7), Variant::Vector2(Vec2::new(1.0, 2.0)));
    values.push(Variant::Dictionary(dict));
    values.push(Variant::Array((0..500).map(Variant::Int).collect()));
    values.push(Variant::PackedByteArray(vec![0, 127, 255]));
    values.push(Variant::Rect2(Rect2::new(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0))));
    values
}

#[test]
fn untouched_frame_reports_no_change_for_every_kind() {
    let config = InspectorConfig::default();
    let originals = sample_values();
    let mut edited = originals.clone();
    let mut reported = Vec::new();
    run_frame(|ui| {
        let mut editor = VariantEditor::new(&config);
        reported.clear();
        for (index, value) in edited.iter_mut().enumerate() {
            reported.push(editor.edit(ui, &format!("value {index}"), value, PropertyHint::None, ""));
        }
        assert_eq!(editor.depth(), 0, "scope stack unwinds after each edit");
    });
    assert!(reported.iter().all(|changed| !changed), "no input means no change");
    assert_eq!(edited, originals, "values are untouched when nothing changed");
}

#[test]
fn hinted_edits_without_input_leave_values_alone() {
    let config = InspectorConfig::default();
    let mut layers = Variant::Int(0b1010);
    let mut choice = Variant::Int(1);
    let mut angle = Variant::Float(std::f64::consts::FRAC_PI_2);
    let mut broken = Variant::Int(5);
    let mut changed = false;
    run_frame(|ui| {
        let mut editor = VariantEditor::new(&config);
        changed |= editor.edit(ui, "layers", &mut layers, PropertyHint::Layers2DPhysics, "");
        changed |= editor.edit(ui, "choice", &mut choice, PropertyHint::Enum, "A,B,C");
        changed |= editor.edit(ui, "angle", &mut angle, PropertyHint::Range, "-360,360,0.1,radians_as_degrees");
        changed |= editor.edit(ui, "broken", &mut broken, PropertyHint::Range, "low,high");
    });
    assert!(!changed);
    assert_eq!(layers, Variant::Int(0b1010));
    assert_eq!(choice, Variant::Int(1));
    assert_eq!(angle, Variant::Float(std::f64::consts::FRAC_PI_2));
    assert_eq!(broken, Variant::Int(5), "malformed range hint falls back without touching the value");
}

#[test]
fn typed_edit_helper_keeps_plain_values() {
    let config = InspectorConfig::default();
    let mut health: i32 = 75;
    let mut offset = IVec2::new(-3, 9);
    let mut name = String::from("player");
    let mut changed = false;
    run_frame(|ui| {
        let mut editor = VariantEditor::new(&config);
        changed |= edit_value(&mut editor, ui, "health", &mut health, PropertyHint::Range, "0,100");
        changed |= edit_value(&mut editor, ui, "offset", &mut offset, PropertyHint::None, "");
        changed |= edit_value(&mut editor, ui, "name", &mut name, PropertyHint::None, "");
    });
    assert!(!changed);
    assert_eq!(health, 75);
    assert_eq!(offset, IVec2::new(-3, 9));
    assert_eq!(name, "player");
}

#[test]
fn composite_field_edit_preserves_siblings() {
    let mut rect = Rect2::new(Vec2::new(10.0, 20.0), Vec2::new(5.0, 5.0));
    assert!(rect.set_field(1, &Variant::Vector2(Vec2::new(30.0, 40.0))), "end is writable");
    assert_eq!(rect.position, Vec2::new(10.0, 20.0), "position is untouched");
    assert_eq!(rect.size, Vec2::new(20.0, 20.0), "moving end resizes");

    let mut xform = Transform3D { basis: Basis::IDENTITY, origin: Vec3::ZERO };
    assert!(xform.set_field(1, &Variant::Vector3(Vec3::new(1.0, 2.0, 3.0))));
    assert_eq!(xform.basis, Basis::IDENTITY, "basis survives an origin edit");

    let mut aabb = Aabb::new(Vec3::ONE, Vec3::splat(2.0));
    assert!(!aabb.set_field(0, &Variant::Float(1.0)), "wrong kind is rejected");
    assert_eq!(aabb, Aabb::new(Vec3::ONE, Vec3::splat(2.0)));

    let mut color = Color::WHITE;
    color.a = 0.5;
    assert_eq!(Color::from_array(color.to_array()), color);
}

#[test]
fn range_results_stay_within_bounds() {
    let range = RangeHint::parse("0,10,0.5").expect("valid range");
    for candidate in [-100.0, -0.1, 0.0, 4.25, 10.0, 10.5, 1e9] {
        let result = range.clamp(candidate);
        assert!((0.0..=10.0).contains(&result), "{candidate} clamped to {result}");
    }
    for candidate in [i64::MIN, -1, 3, 11, i64::MAX] {
        let result = range.clamp_int(candidate);
        assert!((0..=10).contains(&result), "{candidate} clamped to {result}");
    }
}

#[test]
fn enum_choice_one_reads_back_as_b() {
    let choices = EnumHint::parse("A,B,C").expect("valid enum");
    assert_eq!(choices.len(), 3);
    let value = choices.value_at(1).expect("index 1 exists");
    assert_eq!(choices.index_of(value), Some(1));
    assert_eq!(choices.name_at(1), Some("B"));
    assert!(choices.value_at(3).is_none(), "only indices 0..3 are produced");
}

#[test]
fn layer_bit_five_toggles_to_thirty_two_and_back() {
    let on = set_layer_bit(0, 5, true);
    assert_eq!(on, 32);
    assert!(layer_bit_set(on, 5));
    assert_eq!(set_layer_bit(on, 5, false), 0);
}

#[test]
fn json_objects_become_ordered_dictionaries() {
    let value = Variant::parse_json(r#"{"zeta": 1, "alpha": 2.5, "list": [true, null]}"#).expect("valid json");
    let dict = value.as_dictionary().expect("object maps to a dictionary");
    let keys: Vec<String> = dict.keys().map(|key| key.to_string()).collect();
    assert_eq!(keys, ["zeta", "alpha", "list"], "insertion order is kept");
    assert_eq!(dict.get(&Variant::from("zeta")), Some(&Variant::Int(1)));
    assert_eq!(dict.get(&Variant::from("alpha")), Some(&Variant::Float(2.5)));
    assert!(Variant::parse_json("{ not json").is_err());
}

#[test]
fn text_commits_on_enter_not_per_keystroke() {
    let config = InspectorConfig::default();
    let mut value = Variant::from("abc");
    let mut changed = false;
    let mut screen = Headless::new();
    screen.settle(editor_ui(&config, "title", &mut value, &mut changed));

    screen.click_after_text("abc", editor_ui(&config, "title", &mut value, &mut changed));
    screen.type_text("X", editor_ui(&config, "title", &mut value, &mut changed));
    assert!(!changed, "typing alone does not commit");
    assert_eq!(value, Variant::from("abc"));

    screen.press_key(Key::Enter, editor_ui(&config, "title", &mut value, &mut changed));
    assert!(changed);
    assert_eq!(value, Variant::from("abcX"));
}

#[test]
fn dictionary_edit_writes_back_under_the_original_key() {
    let config = InspectorConfig::default();
    let mut dict = Dictionary::new();
    dict.insert(Variant::from("name"), Variant::from("abc"));
    dict.insert(Variant::Int(7), Variant::from("zzz"));
    dict.insert(Variant::from("count"), Variant::Int(5));
    let mut value = Variant::Dictionary(dict);
    let mut changed = false;
    let mut screen = Headless::new();
    screen.settle(editor_ui(&config, "entries", &mut value, &mut changed));

    screen.click_after_text("abc", editor_ui(&config, "entries", &mut value, &mut changed));
    screen.type_text("X", editor_ui(&config, "entries", &mut value, &mut changed));
    screen.press_key(Key::Enter, editor_ui(&config, "entries", &mut value, &mut changed));
    assert!(changed, "an entry edit marks the dictionary changed");

    let dict = value.as_dictionary().expect("still a dictionary");
    assert_eq!(dict.len(), 3);
    assert_eq!(dict.get(&Variant::from("name")), Some(&Variant::from("abcX")));
    assert_eq!(dict.get(&Variant::Int(7)), Some(&Variant::from("zzz")));
    assert_eq!(dict.get(&Variant::from("count")), Some(&Variant::Int(5)));
    let keys: Vec<Variant> = dict.keys().cloned().collect();
    assert_eq!(keys, [Variant::from("name"), Variant::Int(7), Variant::from("count")], "order is kept");
}

#[test]
fn array_edit_writes_back_by_index() {
    let config = InspectorConfig::default();
    let mut value = Variant::Array(vec![Variant::from("a0"), Variant::from("b1"), Variant::from("c2")]);
    let mut changed = false;
    let mut screen = Headless::new();
    screen.settle(editor_ui(&config, "items", &mut value, &mut changed));
    assert!(!screen.is_visible("b1"), "arrays start collapsed");

    screen.click_text("[3] items", editor_ui(&config, "items", &mut value, &mut changed));
    assert!(!changed, "opening the table is not an edit");
    screen.click_after_text("b1", editor_ui(&config, "items", &mut value, &mut changed));
    screen.type_text("X", editor_ui(&config, "items", &mut value, &mut changed));
    screen.press_key(Key::Enter, editor_ui(&config, "items", &mut value, &mut changed));

    assert!(changed);
    assert_eq!(value, Variant::Array(vec![Variant::from("a0"), Variant::from("b1X"), Variant::from("c2")]));
}

#[test]
fn composite_drag_writes_back_only_the_dragged_field() {
    let config = InspectorConfig::default();
    let mut value = Variant::Rect2(Rect2::new(Vec2::new(1.5, 2.5), Vec2::new(30.0, 40.0)));
    let mut changed = false;
    let mut screen = Headless::new();
    screen.settle(editor_ui(&config, "bounds", &mut value, &mut changed));

    screen.click_text("bounds", editor_ui(&config, "bounds", &mut value, &mut changed));
    assert!(!changed);
    screen.drag_text("1.5", 40.0, editor_ui(&config, "bounds", &mut value, &mut changed));

    assert!(changed, "dragging a field is an edit");
    let Variant::Rect2(rect) = &value else {
        panic!("kind is preserved, got {value:?}");
    };
    assert!(rect.position.x > 1.5, "dragging right increases x, got {}", rect.position.x);
    assert_eq!(rect.position.y, 2.5);
    assert_eq!(rect.size, Vec2::new(30.0, 40.0), "moving the position keeps the size");
}
