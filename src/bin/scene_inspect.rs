use anyhow::{anyhow, Result};
use std::env;
use std::process;
use variant_inspector::inspector::{group_descriptors, resolve_chain, LevelSource};
use variant_inspector::reflection::{ClassDb, ObjectHost};
use variant_inspector::{InspectorConfig, NodePath, SceneTree, SceneWorld};

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:?}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut args = env::args().skip(1);
    let Some(command) = args.next() else {
        print_usage();
        return Ok(());
    };
    match command.as_str() {
        "tree" => {
            let scene_path =
                args.next().ok_or_else(|| anyhow!("tree requires a path: scene_inspect tree <scene>"))?;
            cmd_tree(&scene_path)
        }
        "sheet" => {
            let scene_path = args
                .next()
                .ok_or_else(|| anyhow!("sheet requires arguments: scene_inspect sheet <scene> <node_path>"))?;
            let node_path = args.next().ok_or_else(|| anyhow!("sheet missing node path argument"))?;
            let config_path = args.next();
            cmd_sheet(&scene_path, &node_path, config_path.as_deref())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => Err(anyhow!("unknown command '{other}'")),
    }
}

fn print_usage() {
    eprintln!(
        "Scene Inspect

Usage:
  scene_inspect tree <scene_path>                       Print every node path with its class
  scene_inspect sheet <scene_path> <node_path> [config] Print the property sheet of one node
  scene_inspect help                                    Show this message
"
    );
}

fn load(scene_path: &str) -> Result<SceneWorld> {
    let mut world = SceneWorld::default();
    world.load_scene(scene_path)?;
    Ok(world)
}

fn cmd_tree(scene_path: &str) -> Result<()> {
    let world = load(scene_path)?;
    let Some(root) = world.root() else {
        return Err(anyhow!("scene '{scene_path}' has no root"));
    };
    let mut stack = vec![(root, 0usize)];
    while let Some((node, depth)) = stack.pop() {
        println!("{}{:<40} {}", "  ".repeat(depth), world.node_path(node).as_str(), world.node_class(node));
        for child in world.children(node).into_iter().rev() {
            stack.push((child, depth + 1));
        }
    }
    Ok(())
}

fn cmd_sheet(scene_path: &str, node_path: &str, config_path: Option<&str>) -> Result<()> {
    let config = match config_path {
        Some(path) => InspectorConfig::load(path)?,
        None => InspectorConfig::default(),
    };
    let world = load(scene_path)?;
    let node = world
        .get_node(&NodePath::new(node_path))
        .ok_or_else(|| anyhow!("no node at '{node_path}' in '{scene_path}'"))?;
    for level in resolve_chain(&world, node, config.max_inheritance_depth) {
        println!("[{}]", level.display_name);
        let descriptors = match &level.source {
            LevelSource::Native(class) => world.class_property_list(class, false),
            LevelSource::Script(script) => world.script_property_list(*script),
        };
        for group in group_descriptors(&descriptors) {
            let indent = match group.header {
                Some(header) => {
                    println!("  {}", header.name);
                    "    "
                }
                None => "  ",
            };
            for desc in group.entries {
                println!("{indent}{:<24} {}", desc.name, world.get_property(node, &desc.name));
            }
        }
    }
    Ok(())
}
