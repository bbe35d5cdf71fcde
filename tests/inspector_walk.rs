use variant_inspector::inspector::{group_descriptors, resolve_chain, show_inspector, LevelSource};
use variant_inspector::property::{PropertyDescriptor, PropertyUsage};
use variant_inspector::reflection::{BoundObject, ClassDb, InspectedObject, ObjectHost, PropertyStore};
use variant_inspector::scene::ClassRegistry;
use variant_inspector::{InspectorConfig, InspectorReport, PropertyCache, SceneWorld, Variant, VariantKind};

fn derived_base_world() -> SceneWorld {
    let mut classes = ClassRegistry::new();
    classes.register("Base", "", vec![PropertyDescriptor::new("health", VariantKind::Int)]);
    classes.register(
        "Derived",
        "Base",
        vec![
            PropertyDescriptor::new("speed", VariantKind::Float),
            PropertyDescriptor::new("target", VariantKind::Object),
        ],
    );
    SceneWorld::new(classes)
}

fn inspect_frames(
    world: &mut SceneWorld,
    cache: &mut PropertyCache,
    target: &mut Option<variant_inspector::ObjectId>,
    frames: usize,
) -> InspectorReport {
    let config = InspectorConfig::default();
    let ctx = egui::Context::default();
    let mut report = InspectorReport::default();
    for _ in 0..frames {
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                report = show_inspector(ui, world, cache, &config, target);
            });
        });
    }
    report
}

#[test]
fn derived_base_chain_visits_exactly_two_sections() {
    let mut world = derived_base_world();
    let object = world.spawn_object("Derived");
    let levels = resolve_chain(&world, object, 10);
    let names: Vec<&str> = levels.iter().map(|level| level.display_name.as_str()).collect();
    assert_eq!(names, ["Derived", "Base"]);

    let mut cache = PropertyCache::default();
    let mut target = Some(object);
    let report = inspect_frames(&mut world, &mut cache, &mut target, 1);
    assert_eq!(report.sections, ["Derived", "Base"], "one collapsible section per level");
    assert_eq!(report.writes, 0);
    assert_eq!(target, Some(object), "no navigation without input");
}

#[test]
fn script_levels_come_before_native_classes() {
    let mut world = derived_base_world();
    let actor = world.register_script("Actor", None, vec![PropertyDescriptor::new("team", VariantKind::Int)]);
    let player = world.register_script("Player", Some(actor), vec![PropertyDescriptor::new("score", VariantKind::Int)]);
    let object = world.spawn_object("Derived");
    assert!(world.attach_script(object, player));

    let levels = resolve_chain(&world, object, 10);
    let names: Vec<&str> = levels.iter().map(|level| level.display_name.as_str()).collect();
    assert_eq!(names, ["Player", "Actor", "Derived", "Base"]);
    assert!(levels[0].is_script() && levels[1].is_script());
    assert_eq!(levels[2].source, LevelSource::Native("Derived".to_string()));

    let script_list = world.script_property_list(player);
    assert_eq!(script_list[0].usage, PropertyUsage::Category, "first entry names the script class");
    assert_eq!(world.get_property(object, "team"), Variant::Int(0), "base script defaults are seeded");
}

#[test]
fn cyclic_class_metadata_stops_at_depth_cap() {
    let mut classes = ClassRegistry::new();
    classes.register("Ping", "Pong", Vec::new());
    classes.register("Pong", "Ping", Vec::new());
    let mut world = SceneWorld::new(classes);
    let object = world.spawn_object("Ping");
    assert_eq!(resolve_chain(&world, object, 10).len(), 10);
    assert_eq!(resolve_chain(&world, object, 3).len(), 3);
}

#[test]
fn stale_target_renders_placeholder_only() {
    let mut world = derived_base_world();
    let object = world.spawn_object("Derived");
    assert!(world.despawn(object));

    let mut cache = PropertyCache::default();
    let mut target = Some(object);
    let report = inspect_frames(&mut world, &mut cache, &mut target, 1);
    assert!(report.sections.is_empty(), "stale handles are never walked");
    assert!(resolve_chain(&world, object, 10).is_empty());

    let inspected = InspectedObject::new(Some(object));
    assert_eq!(inspected.get(&world), None, "stale slot reads as empty");
    assert_eq!(inspected.raw(), Some(object));
}

#[test]
fn descriptor_lists_are_cached_per_class() {
    let mut world = derived_base_world();
    let first = world.spawn_object("Derived");
    let second = world.spawn_object("Derived");
    let mut cache = PropertyCache::default();

    let mut target = Some(first);
    inspect_frames(&mut world, &mut cache, &mut target, 2);
    assert!(cache.contains("Derived"), "the open first section resolves its list");
    assert_eq!(cache.misses(), 1);
    assert!(cache.hits() >= 1, "the second frame reuses the list");

    let mut target = Some(second);
    inspect_frames(&mut world, &mut cache, &mut target, 1);
    assert_eq!(cache.misses(), 1, "another object of the same class reuses the cached list");
}

#[test]
fn group_markers_partition_the_sheet() {
    let classes = ClassRegistry::builtin();
    let list = classes.property_list("CanvasItem", false);
    let groups = group_descriptors(&list);
    let headers: Vec<&str> = groups.iter().filter_map(|g| g.header.map(|h| h.name.as_str())).collect();
    assert_eq!(headers, ["Visibility", "Ordering", "Rendering"]);
    let total: usize = groups.iter().map(|g| g.entries.len()).sum();
    assert_eq!(total, 5, "every value entry lands in exactly one scope");

    let node2d = classes.property_list("Node2D", false);
    let shown: Vec<&str> = group_descriptors(&node2d)
        .iter()
        .flat_map(|g| g.entries.iter().map(|d| d.name.as_str()))
        .collect();
    assert!(!shown.contains(&"transform"), "storage-only properties stay hidden");
}

#[test]
fn property_store_writes_reach_the_live_object() {
    let mut world = derived_base_world();
    let object = world.spawn_object("Derived");
    let other = world.spawn_object("Base");
    {
        let mut bound = BoundObject::bind(&mut world, object).expect("live object binds");
        bound.set("speed", Variant::Float(4.0));
        bound.set("target", Variant::Object(Some(other)));
        assert_eq!(bound.get("speed"), Variant::Float(4.0));
    }
    assert_eq!(world.get_property(object, "target").as_object(), Some(other));
    assert!(world.describe(other).starts_with("Base#"), "unnamed objects are described by class");

    world.despawn(object);
    assert!(BoundObject::bind(&mut world, object).is_none(), "stale handles never bind");
}
