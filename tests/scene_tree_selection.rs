mod support;

use support::Headless;
use variant_inspector::scene_tree::draw_tree;
use variant_inspector::{NodePath, SceneTree, SceneWorld, SelectionSet};

fn path(text: &str) -> NodePath {
    NodePath::new(text)
}

fn sample_world() -> SceneWorld {
    let mut world = SceneWorld::default();
    let root = world.spawn_root("Node", "root");
    let level = world.spawn_child(root, "Node2D", "Level").expect("root is live");
    world.spawn_child(level, "Area2D", "Pickup").expect("level is live");
    world.spawn_child(root, "Node2D", "Player").expect("root is live");
    world
}

/// Panel body drawing the whole tree; `changed` collects the draw results.
fn tree_ui<'a>(
    world: &'a SceneWorld,
    selection: &'a mut SelectionSet,
    changed: &'a mut bool,
) -> impl FnMut(&mut egui::Ui) + 'a {
    let root = world.root().expect("root exists");
    move |ui: &mut egui::Ui| *changed |= draw_tree(ui, world, root, selection)
}

#[test]
fn ctrl_click_appends_and_plain_click_replaces() {
    let mut selection = SelectionSet::new();
    selection.apply_click(&path("/root/A"), false);
    selection.apply_click(&path("/root/B"), true);
    assert_eq!(selection.as_slice(), [path("/root/A"), path("/root/B")]);
    assert_eq!(selection.primary(), Some(&path("/root/B")), "primary is the last added");
    assert_eq!(selection.to_string(), "/root/A,/root/B");

    selection.apply_click(&path("/root/C"), false);
    assert_eq!(selection.as_slice(), [path("/root/C")]);
}

#[test]
fn ctrl_click_on_member_removes_it() {
    let mut selection = SelectionSet::new();
    for node in ["/root/A", "/root/B", "/root/C"] {
        selection.apply_click(&path(node), true);
    }
    selection.apply_click(&path("/root/B"), true);
    assert_eq!(selection.as_slice(), [path("/root/A"), path("/root/C")]);
    selection.apply_click(&path("/root/B"), true);
    assert_eq!(selection.primary(), Some(&path("/root/B")), "re-added member becomes primary");
    assert_eq!(selection.len(), 3, "no duplicates");
}

#[test]
fn paths_resolve_through_the_live_tree() {
    let world = sample_world();
    let pickup = world.get_node(&path("/root/Level/Pickup")).expect("nested node resolves");
    assert_eq!(world.node_path(pickup), path("/root/Level/Pickup"));
    assert_eq!(world.node_class(pickup), "Area2D");
    assert!(world.get_node(&path("/root/Missing")).is_none());
    assert!(world.get_node(&path("/other/Level")).is_none());
}

#[test]
fn duplicate_sibling_names_get_unique_paths() {
    let mut world = sample_world();
    let root = world.root().expect("root exists");
    let second = world.spawn_child(root, "Node2D", "Player").expect("root is live");
    assert_eq!(world.node_path(second), path("/root/Player2"));
}

#[test]
fn disclosure_arrow_opens_without_selecting() {
    let world = sample_world();
    let mut selection = SelectionSet::new();
    let mut changed = false;
    let mut screen = Headless::new();
    screen.settle(tree_ui(&world, &mut selection, &mut changed));
    assert!(screen.is_visible("root"));
    assert!(!screen.is_visible("Level"), "nodes start closed");

    screen.click_arrow_of("root", tree_ui(&world, &mut selection, &mut changed));
    assert!(screen.is_visible("Level"), "arrow opened the root");
    assert!(screen.is_visible("Player"));
    assert!(!changed, "the arrow never selects");
    assert!(selection.is_empty());
}

#[test]
fn row_clicks_select_with_ctrl_semantics() {
    let world = sample_world();
    let mut selection = SelectionSet::new();
    let mut changed = false;
    let mut screen = Headless::new();
    screen.settle(tree_ui(&world, &mut selection, &mut changed));
    screen.click_arrow_of("root", tree_ui(&world, &mut selection, &mut changed));

    screen.click_text("Level", tree_ui(&world, &mut selection, &mut changed));
    assert!(changed, "clicking a row label selects it");
    assert_eq!(selection.as_slice(), [path("/root/Level")]);
    assert!(!screen.is_visible("Pickup"), "selecting a row does not open it");

    screen.hold_command(true);
    screen.click_text("Player", tree_ui(&world, &mut selection, &mut changed));
    assert_eq!(selection.as_slice(), [path("/root/Level"), path("/root/Player")]);
    assert_eq!(selection.primary(), Some(&path("/root/Player")));

    screen.click_text("Level", tree_ui(&world, &mut selection, &mut changed));
    assert_eq!(selection.as_slice(), [path("/root/Player")], "ctrl-click on a member removes it");

    screen.hold_command(false);
    screen.click_arrow_of("Level", tree_ui(&world, &mut selection, &mut changed));
    screen.click_text("Pickup", tree_ui(&world, &mut selection, &mut changed));
    assert_eq!(selection.as_slice(), [path("/root/Level/Pickup")], "plain click replaces");
}

#[test]
fn closing_a_node_keeps_descendant_selection() {
    let world = sample_world();
    let mut selection = SelectionSet::new();
    let mut changed = false;
    let mut screen = Headless::new();
    screen.settle(tree_ui(&world, &mut selection, &mut changed));
    screen.click_arrow_of("root", tree_ui(&world, &mut selection, &mut changed));
    screen.click_arrow_of("Level", tree_ui(&world, &mut selection, &mut changed));
    screen.click_text("Pickup", tree_ui(&world, &mut selection, &mut changed));
    assert_eq!(selection.as_slice(), [path("/root/Level/Pickup")]);

    changed = false;
    screen.click_arrow_of("Level", tree_ui(&world, &mut selection, &mut changed));
    assert!(!screen.is_visible("Pickup"), "Level closed");
    assert!(!changed);
    assert!(selection.contains(&path("/root/Level/Pickup")), "hidden descendants stay selected");

    screen.click_arrow_of("Level", tree_ui(&world, &mut selection, &mut changed));
    assert!(screen.is_visible("Pickup"));
    assert_eq!(selection.as_slice(), [path("/root/Level/Pickup")]);
}

#[test]
fn removed_nodes_stay_selected_but_never_resolve() {
    let mut world = sample_world();
    let mut selection = SelectionSet::new();
    selection.apply_click(&path("/root/Player"), true);
    selection.apply_click(&path("/root/Level/Pickup"), true);

    let level = world.get_node(&path("/root/Level")).expect("level exists");
    assert!(world.despawn(level));
    assert_eq!(selection.resolve_primary(&world), None, "dangling primary resolves to nothing");
    assert_eq!(selection.len(), 2, "removal does not touch the selection");

    selection.apply_click(&path("/root/Level/Pickup"), true);
    let player = selection.resolve_primary(&world).expect("player is live");
    assert_eq!(world.node_name(player), "Player");
}

#[test]
fn reserved_characters_in_names_keep_paths_resolvable() {
    let mut world = sample_world();
    let root = world.root().expect("root exists");
    let odd = world.spawn_child(root, "Node2D", "a/b").expect("root is live");
    let node_path = world.node_path(odd);
    assert_eq!(node_path, path("/root/a_b"));
    assert_eq!(world.get_node(&node_path), Some(odd));

    let mut selection = SelectionSet::new();
    selection.apply_click(&node_path, false);
    assert_eq!(selection.resolve_primary(&world), Some(odd));
}

#[test]
fn unnamed_siblings_keep_generated_segments() {
    let mut world = sample_world();
    let root = world.root().expect("root exists");
    let first = world.spawn_child(root, "Node2D", "").expect("root is live");
    let second = world.spawn_child(root, "Node2D", "").expect("root is live");
    assert_eq!(world.node_name(second), "", "no counter for unnamed nodes");
    assert_ne!(world.node_path(first), world.node_path(second));
    assert!(world.node_path(second).as_str().starts_with("/root/@Node2D@"));
    assert_eq!(world.get_node(&world.node_path(second)), Some(second));
}
