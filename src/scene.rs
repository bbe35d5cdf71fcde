//! `bevy_ecs`-backed live object graph.
//!
//! Objects are entities carrying an [`ObjectClass`] and a [`Properties`] bag.
//! Nodes additionally carry a [`NodeName`] and sit in a `Parent`/`Children`
//! hierarchy. Class and script metadata come from a [`ClassRegistry`] and the
//! registered scripts. [`SceneWorld`] implements the reflective host and tree
//! traits consumed by the inspector and the tree browser.

use crate::property::{PropertyDescriptor, PropertyHint, PropertyUsage};
use crate::reflection::{ClassDb, ObjectHost, ObjectId, ScriptId};
use crate::scene_tree::{NodePath, SceneTree};
use crate::variant::{Variant, VariantKind};
use anyhow::{anyhow, Context, Result};
use bevy_ecs::prelude::*;
use glam::{IVec2, IVec3, Vec2, Vec3, Vec4};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

/// Guards parent walks against cyclic class metadata.
const MAX_CLASS_DEPTH: usize = 64;

/// Characters a node name may not contain. `/` separates path segments and `@`
/// marks generated segments of unnamed nodes.
const INVALID_NAME_CHARS: &[char] = &['.', ':', '@', '/', '"', '%'];

#[derive(Component, Clone, Debug)]
pub struct ObjectClass(pub String);

#[derive(Component, Clone, Debug, Default)]
pub struct Properties(pub BTreeMap<String, Variant>);

#[derive(Component, Clone, Debug)]
pub struct NodeName(pub String);

#[derive(Component, Clone, Copy, Debug)]
pub struct ScriptAttachment(pub ScriptId);

#[derive(Component, Clone, Copy, Debug)]
pub struct Parent(pub Entity);

#[derive(Component, Clone, Debug, Default)]
pub struct Children(pub Vec<Entity>);

#[derive(Debug, Clone, Default)]
pub struct ClassInfo {
    pub parent: String,
    pub properties: Vec<PropertyDescriptor>,
}

/// Native class metadata: a parent link and the class's own descriptors.
#[derive(Debug, Clone, Default)]
pub struct ClassRegistry {
    classes: HashMap<String, ClassInfo>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A small node hierarchy covering every hint family.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("Object", "", Vec::new());
        registry.register(
            "Resource",
            "Object",
            vec![
                PropertyDescriptor::new("resource_name", VariantKind::String),
                PropertyDescriptor::new("resource_path", VariantKind::String),
            ],
        );
        registry.register(
            "Node",
            "Object",
            vec![
                PropertyDescriptor::group("Process"),
                PropertyDescriptor::new("process_mode", VariantKind::Int)
                    .with_hint(PropertyHint::Enum, "Inherit,Pausable,When Paused,Always,Disabled"),
                PropertyDescriptor::new("process_priority", VariantKind::Int),
                PropertyDescriptor::group("Editor Description"),
                PropertyDescriptor::new("editor_description", VariantKind::String)
                    .with_hint(PropertyHint::MultilineText, ""),
            ],
        );
        registry.register(
            "CanvasItem",
            "Node",
            vec![
                PropertyDescriptor::group("Visibility"),
                PropertyDescriptor::new("visible", VariantKind::Bool),
                PropertyDescriptor::new("modulate", VariantKind::Color),
                PropertyDescriptor::group("Ordering"),
                PropertyDescriptor::new("z_index", VariantKind::Int).with_hint(PropertyHint::Range, "-4096,4096,1"),
                PropertyDescriptor::group("Rendering"),
                PropertyDescriptor::new("light_mask", VariantKind::Int).with_hint(PropertyHint::Layers2DRender, ""),
                PropertyDescriptor::new("material", VariantKind::Object),
            ],
        );
        registry.register(
            "Node2D",
            "CanvasItem",
            vec![
                PropertyDescriptor::group("Transform"),
                PropertyDescriptor::new("position", VariantKind::Vector2),
                PropertyDescriptor::new("rotation", VariantKind::Float)
                    .with_hint(PropertyHint::Range, "-360,360,0.1,radians_as_degrees"),
                PropertyDescriptor::new("scale", VariantKind::Vector2),
                PropertyDescriptor::new("skew", VariantKind::Float)
                    .with_hint(PropertyHint::Range, "-89.9,89.9,0.1,radians_as_degrees"),
                PropertyDescriptor::new("transform", VariantKind::Transform2D).with_usage(PropertyUsage::Storage),
            ],
        );
        registry.register(
            "CollisionObject2D",
            "Node2D",
            vec![
                PropertyDescriptor::group("Collision"),
                PropertyDescriptor::new("collision_layer", VariantKind::Int)
                    .with_hint(PropertyHint::Layers2DPhysics, ""),
                PropertyDescriptor::new("collision_mask", VariantKind::Int)
                    .with_hint(PropertyHint::Layers2DPhysics, ""),
                PropertyDescriptor::new("collision_priority", VariantKind::Float)
                    .with_hint(PropertyHint::Range, "0,100000,0.01,exp"),
            ],
        );
        registry.register(
            "Area2D",
            "CollisionObject2D",
            vec![
                PropertyDescriptor::new("monitoring", VariantKind::Bool),
                PropertyDescriptor::new("monitorable", VariantKind::Bool),
                PropertyDescriptor::new("gravity", VariantKind::Float)
                    .with_hint(PropertyHint::Range, "-4096,4096,0.001,suffix:px/s²"),
            ],
        );
        registry
    }

    /// Registers or replaces `name`. An empty `parent` marks a root class.
    pub fn register(&mut self, name: impl Into<String>, parent: impl Into<String>, properties: Vec<PropertyDescriptor>) {
        self.classes.insert(name.into(), ClassInfo { parent: parent.into(), properties });
    }

    pub fn contains(&self, class: &str) -> bool {
        self.classes.contains_key(class)
    }

    pub fn parent_of(&self, class: &str) -> String {
        self.classes.get(class).map(|info| info.parent.clone()).unwrap_or_default()
    }

    /// Own descriptors of `class`, or those of it and every ancestor (root first)
    /// with `include_inherited`.
    pub fn property_list(&self, class: &str, include_inherited: bool) -> Vec<PropertyDescriptor> {
        if !include_inherited {
            return self.classes.get(class).map(|info| info.properties.clone()).unwrap_or_default();
        }
        let mut chain = Vec::new();
        let mut current = class.to_string();
        while !current.is_empty() && chain.len() < MAX_CLASS_DEPTH {
            let Some(info) = self.classes.get(&current) else {
                break;
            };
            chain.push(info);
            current = info.parent.clone();
        }
        chain.iter().rev().flat_map(|info| info.properties.iter().cloned()).collect()
    }
}

#[derive(Debug, Clone)]
pub struct ScriptInfo {
    pub class_name: String,
    pub base: Option<ScriptId>,
    pub properties: Vec<PropertyDescriptor>,
}

/// One node of a JSON scene description.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeDescription {
    pub name: String,
    pub class: String,
    #[serde(default)]
    pub properties: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub children: Vec<NodeDescription>,
}

pub struct SceneWorld {
    world: World,
    classes: ClassRegistry,
    scripts: Vec<ScriptInfo>,
    root: Option<Entity>,
}

impl Default for SceneWorld {
    fn default() -> Self {
        Self::new(ClassRegistry::builtin())
    }
}

impl SceneWorld {
    pub fn new(classes: ClassRegistry) -> Self {
        Self { world: World::new(), classes, scripts: Vec::new(), root: None }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn classes(&self) -> &ClassRegistry {
        &self.classes
    }

    pub fn classes_mut(&mut self) -> &mut ClassRegistry {
        &mut self.classes
    }

    pub fn entity_exists(&self, entity: Entity) -> bool {
        self.world.get_entity(entity).is_ok()
    }

    /// Spawns a free-standing object (not part of the tree) with every declared
    /// property set to its kind's default.
    pub fn spawn_object(&mut self, class: &str) -> Entity {
        let properties = self.default_properties(&self.classes.property_list(class, true));
        self.world.spawn((ObjectClass(class.to_string()), Properties(properties))).id()
    }

    /// Replaces the tree root. Any previous root subtree is despawned.
    pub fn spawn_root(&mut self, class: &str, name: &str) -> Entity {
        if let Some(old) = self.root.take() {
            self.despawn(old);
        }
        let entity = self.spawn_object(class);
        self.world.entity_mut(entity).insert((NodeName(validate_node_name(name)), Children::default()));
        self.root = Some(entity);
        entity
    }

    /// Adds a child node. Names are validated like [`validate_node_name`] and kept
    /// unique among named siblings by appending a counter.
    pub fn spawn_child(&mut self, parent: Entity, class: &str, name: &str) -> Option<Entity> {
        if !self.entity_exists(parent) {
            return None;
        }
        let unique = self.unique_child_name(parent, &validate_node_name(name));
        let entity = self.spawn_object(class);
        self.world.entity_mut(entity).insert((NodeName(unique), Parent(parent), Children::default()));
        if let Some(mut children) = self.world.get_mut::<Children>(parent) {
            children.0.push(entity);
        } else {
            self.world.entity_mut(parent).insert(Children(vec![entity]));
        }
        Some(entity)
    }

    /// Removes `entity` and its whole subtree. Returns `false` for stale handles.
    pub fn despawn(&mut self, entity: Entity) -> bool {
        if !self.entity_exists(entity) {
            return false;
        }
        if let Some(parent) = self.world.get::<Parent>(entity).copied() {
            if let Some(mut siblings) = self.world.get_mut::<Children>(parent.0) {
                siblings.0.retain(|&child| child != entity);
            }
        }
        let child_ids = self.world.get::<Children>(entity).map(|c| c.0.clone()).unwrap_or_default();
        for child in child_ids {
            self.despawn(child);
        }
        if self.root == Some(entity) {
            self.root = None;
        }
        self.world.despawn(entity)
    }

    pub fn register_script(
        &mut self,
        class_name: &str,
        base: Option<ScriptId>,
        properties: Vec<PropertyDescriptor>,
    ) -> ScriptId {
        let id = ScriptId(self.scripts.len() as u32);
        self.scripts.push(ScriptInfo { class_name: class_name.to_string(), base, properties });
        id
    }

    /// Attaches `script` and seeds defaults for the script chain's properties.
    pub fn attach_script(&mut self, entity: Entity, script: ScriptId) -> bool {
        if !self.entity_exists(entity) || self.script(script).is_none() {
            return false;
        }
        let mut declared = Vec::new();
        let mut current = Some(script);
        let mut depth = 0;
        while let Some(id) = current.filter(|_| depth < MAX_CLASS_DEPTH) {
            let Some(info) = self.script(id) else {
                break;
            };
            declared.extend(info.properties.iter().cloned());
            current = info.base;
            depth += 1;
        }
        let defaults = self.default_properties(&declared);
        let mut entity_mut = self.world.entity_mut(entity);
        entity_mut.insert(ScriptAttachment(script));
        if let Some(mut bag) = entity_mut.get_mut::<Properties>() {
            for (name, value) in defaults {
                bag.0.entry(name).or_insert(value);
            }
        }
        true
    }

    /// Builds a subtree under `parent` (or as the new root) from a description.
    pub fn spawn_description(&mut self, parent: Option<Entity>, desc: &NodeDescription) -> Result<Entity> {
        if !self.classes.contains(&desc.class) {
            return Err(anyhow!("Unknown class '{}' for node '{}'", desc.class, desc.name));
        }
        let entity = match parent {
            Some(parent) => self
                .spawn_child(parent, &desc.class, &desc.name)
                .ok_or_else(|| anyhow!("Parent of node '{}' no longer exists", desc.name))?,
            None => self.spawn_root(&desc.class, &desc.name),
        };
        let declared = self.classes.property_list(&desc.class, true);
        for (name, json) in &desc.properties {
            let Some(kind) = declared.iter().find(|d| &d.name == name).map(|d| d.kind) else {
                log::warn!("[scene] node '{}' sets undeclared property '{name}'", desc.name);
                continue;
            };
            match coerce(kind, Variant::from_json(json)) {
                Some(value) => self.set_property(entity, name, value),
                None => log::warn!("[scene] property '{name}' on '{}' is not a {kind}", desc.name),
            }
        }
        for child in &desc.children {
            self.spawn_description(Some(entity), child)
                .with_context(|| format!("Failed to build child of '{}'", desc.name))?;
        }
        Ok(entity)
    }

    /// Replaces the tree with the JSON scene at `path` and returns the new root.
    pub fn load_scene(&mut self, path: impl AsRef<Path>) -> Result<Entity> {
        let path = path.as_ref();
        let bytes = fs::read(path).with_context(|| format!("Failed to read scene {}", path.display()))?;
        let desc: NodeDescription =
            serde_json::from_slice(&bytes).with_context(|| format!("Failed to parse scene {}", path.display()))?;
        self.spawn_description(None, &desc).with_context(|| format!("Failed to build scene {}", path.display()))
    }

    fn script(&self, id: ScriptId) -> Option<&ScriptInfo> {
        self.scripts.get(id.0 as usize)
    }

    fn default_properties(&self, declared: &[PropertyDescriptor]) -> BTreeMap<String, Variant> {
        declared
            .iter()
            .filter(|desc| !desc.usage.opens_scope() && desc.kind != VariantKind::Nil)
            .map(|desc| (desc.name.clone(), Variant::default_for(desc.kind)))
            .collect()
    }

    fn unique_child_name(&self, parent: Entity, name: &str) -> String {
        // Unnamed nodes are told apart by their generated segment.
        if name.is_empty() {
            return String::new();
        }
        let taken = |candidate: &str| self.children(parent).into_iter().any(|child| self.node_name(child) == candidate);
        if !taken(name) {
            return name.to_string();
        }
        let mut counter = 2;
        loop {
            let candidate = format!("{name}{counter}");
            if !taken(&candidate) {
                return candidate;
            }
            counter += 1;
        }
    }

    /// Path segment of a node; unnamed nodes use their class and index.
    fn segment(&self, node: Entity) -> String {
        let name = self.node_name(node);
        if name.is_empty() {
            format!("@{}@{}", self.class_of(node), node.index())
        } else {
            name
        }
    }
}

/// Replaces characters that would break path resolution with `_`.
pub fn validate_node_name(name: &str) -> String {
    if !name.contains(INVALID_NAME_CHARS) {
        return name.to_string();
    }
    let valid: String = name.chars().map(|c| if INVALID_NAME_CHARS.contains(&c) { '_' } else { c }).collect();
    log::debug!("[scene] node name '{name}' contains reserved characters, using '{valid}'");
    valid
}

/// Converts JSON-loaded values to the declared kind where the shape allows it.
fn coerce(kind: VariantKind, value: Variant) -> Option<Variant> {
    if value.kind() == kind {
        return Some(value);
    }
    match (kind, &value) {
        (VariantKind::Float, Variant::Int(int)) => Some(Variant::Float(*int as f64)),
        (VariantKind::StringName, Variant::String(text)) => Some(Variant::StringName(text.clone())),
        (VariantKind::NodePath, Variant::String(text)) => Some(Variant::NodePath(NodePath::new(text.as_str()))),
        (VariantKind::Vector2, Variant::Array(items)) => match floats(items)?.as_slice() {
            [x, y] => Some(Variant::Vector2(Vec2::new(*x, *y))),
            _ => None,
        },
        (VariantKind::Vector3, Variant::Array(items)) => match floats(items)?.as_slice() {
            [x, y, z] => Some(Variant::Vector3(Vec3::new(*x, *y, *z))),
            _ => None,
        },
        (VariantKind::Vector4, Variant::Array(items)) => match floats(items)?.as_slice() {
            [x, y, z, w] => Some(Variant::Vector4(Vec4::new(*x, *y, *z, *w))),
            _ => None,
        },
        (VariantKind::Vector2i, Variant::Array(items)) => match ints(items)?.as_slice() {
            [x, y] => Some(Variant::Vector2i(IVec2::new(*x, *y))),
            _ => None,
        },
        (VariantKind::Vector3i, Variant::Array(items)) => match ints(items)?.as_slice() {
            [x, y, z] => Some(Variant::Vector3i(IVec3::new(*x, *y, *z))),
            _ => None,
        },
        (VariantKind::Color, Variant::Array(items)) => match floats(items)?.as_slice() {
            [r, g, b] => Some(Variant::Color(crate::variant::Color::new(*r, *g, *b, 1.0))),
            [r, g, b, a] => Some(Variant::Color(crate::variant::Color::new(*r, *g, *b, *a))),
            _ => None,
        },
        _ => None,
    }
}

fn floats(items: &[Variant]) -> Option<Vec<f32>> {
    items.iter().map(|v| v.as_float().map(|f| f as f32)).collect()
}

fn ints(items: &[Variant]) -> Option<Vec<i32>> {
    items.iter().map(|v| v.as_int().and_then(|i| i32::try_from(i).ok())).collect()
}

impl ClassDb for SceneWorld {
    fn parent_class(&self, class: &str) -> String {
        self.classes.parent_of(class)
    }

    fn class_property_list(&self, class: &str, include_inherited: bool) -> Vec<PropertyDescriptor> {
        self.classes.property_list(class, include_inherited)
    }

    fn script_property_list(&self, script: ScriptId) -> Vec<PropertyDescriptor> {
        let Some(info) = self.script(script) else {
            return Vec::new();
        };
        let mut list = Vec::with_capacity(info.properties.len() + 1);
        list.push(PropertyDescriptor::category(info.class_name.as_str()));
        list.extend(info.properties.iter().cloned());
        list
    }

    fn base_script(&self, script: ScriptId) -> Option<ScriptId> {
        self.script(script).and_then(|info| info.base)
    }
}

impl ObjectHost for SceneWorld {
    fn is_instance_valid(&self, object: ObjectId) -> bool {
        self.entity_exists(object)
    }

    fn class_of(&self, object: ObjectId) -> String {
        self.world.get::<ObjectClass>(object).map(|class| class.0.clone()).unwrap_or_default()
    }

    fn script_of(&self, object: ObjectId) -> Option<ScriptId> {
        self.world.get::<ScriptAttachment>(object).map(|attached| attached.0)
    }

    fn get_property(&self, object: ObjectId, name: &str) -> Variant {
        self.world
            .get::<Properties>(object)
            .and_then(|bag| bag.0.get(name).cloned())
            .unwrap_or_default()
    }

    /// Unknown names are ignored, like writes to stale objects.
    fn set_property(&mut self, object: ObjectId, name: &str, value: Variant) {
        let Some(mut bag) = self.world.get_mut::<Properties>(object) else {
            return;
        };
        match bag.0.get_mut(name) {
            Some(slot) => *slot = value,
            None => log::debug!("[scene] ignoring write to undeclared property '{name}'"),
        }
    }

    fn describe(&self, object: ObjectId) -> String {
        let name = self.node_name(object);
        if name.is_empty() {
            format!("{}#{}", self.class_of(object), object.index())
        } else {
            format!("{name} ({})", self.class_of(object))
        }
    }
}

impl SceneTree for SceneWorld {
    fn root(&self) -> Option<ObjectId> {
        self.root.filter(|root| self.entity_exists(*root))
    }

    fn children(&self, node: ObjectId) -> Vec<ObjectId> {
        self.world
            .get::<Children>(node)
            .map(|children| children.0.iter().copied().filter(|child| self.entity_exists(*child)).collect())
            .unwrap_or_default()
    }

    fn node_name(&self, node: ObjectId) -> String {
        self.world.get::<NodeName>(node).map(|name| name.0.clone()).unwrap_or_default()
    }

    fn node_class(&self, node: ObjectId) -> String {
        self.class_of(node)
    }

    fn node_path(&self, node: ObjectId) -> NodePath {
        let mut segments = Vec::new();
        let mut current = Some(node);
        while let Some(entity) = current {
            if !self.entity_exists(entity) {
                break;
            }
            segments.push(self.segment(entity));
            current = self.world.get::<Parent>(entity).map(|parent| parent.0);
        }
        segments.reverse();
        NodePath::new(format!("/{}", segments.join("/")))
    }

    fn get_node(&self, path: &NodePath) -> Option<ObjectId> {
        let mut segments = path.segments();
        let root = self.root()?;
        if segments.next()? != self.segment(root) {
            return None;
        }
        segments.try_fold(root, |node, segment| {
            self.children(node).into_iter().find(|child| self.segment(*child) == segment)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inherited_lists_are_root_first() {
        let registry = ClassRegistry::builtin();
        let list = registry.property_list("Node2D", true);
        let process = list.iter().position(|d| d.name == "process_mode");
        let position = list.iter().position(|d| d.name == "position");
        assert!(process < position, "ancestor properties precede derived ones");
        assert!(registry.property_list("Node2D", false).iter().all(|d| d.name != "process_mode"));
    }

    #[test]
    fn cyclic_class_metadata_terminates() {
        let mut registry = ClassRegistry::new();
        registry.register("A", "B", vec![PropertyDescriptor::new("a", VariantKind::Int)]);
        registry.register("B", "A", vec![PropertyDescriptor::new("b", VariantKind::Int)]);
        assert_eq!(registry.property_list("A", true).len(), MAX_CLASS_DEPTH);
    }

    #[test]
    fn reserved_characters_are_replaced() {
        assert_eq!(validate_node_name("a/b"), "a_b");
        assert_eq!(validate_node_name("@Node2D@3"), "_Node2D_3");
        assert_eq!(validate_node_name("Player 2"), "Player 2");
    }

    #[test]
    fn coerce_fills_declared_shapes() {
        let array = Variant::Array(vec![Variant::Int(1), Variant::Float(2.5)]);
        assert_eq!(coerce(VariantKind::Vector2, array), Some(Variant::Vector2(Vec2::new(1.0, 2.5))));
        assert_eq!(coerce(VariantKind::Float, Variant::Int(3)), Some(Variant::Float(3.0)));
        assert_eq!(coerce(VariantKind::Bool, Variant::Int(1)), None);
    }
}
