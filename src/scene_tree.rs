//! Scene tree browser with ctrl-multiselect.
//!
//! Nodes are identified by their [`NodePath`]. The selection is an ordered,
//! duplicate-free sequence whose last element is the primary selection. Only
//! clicks change it; paths of removed nodes stay until clicked away and simply
//! fail to resolve.

use crate::reflection::ObjectId;
use egui::Ui;
use std::fmt;

/// Path-like identity of a node in the live tree, e.g. `/root/World/Player`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct NodePath(String);

impl NodePath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_absolute(&self) -> bool {
        self.0.starts_with('/')
    }

    /// Non-empty path segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|segment| !segment.is_empty())
    }

    pub fn child(&self, name: &str) -> NodePath {
        if self.0.ends_with('/') {
            NodePath(format!("{}{name}", self.0))
        } else {
            NodePath(format!("{}/{name}", self.0))
        }
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for NodePath {
    fn from(path: String) -> Self {
        Self(path)
    }
}

impl From<&str> for NodePath {
    fn from(path: &str) -> Self {
        Self(path.to_string())
    }
}

/// Live tree queries needed by the browser.
pub trait SceneTree {
    fn root(&self) -> Option<ObjectId>;
    fn children(&self, node: ObjectId) -> Vec<ObjectId>;
    /// Node name; may be empty.
    fn node_name(&self, node: ObjectId) -> String;
    fn node_class(&self, node: ObjectId) -> String;
    fn node_path(&self, node: ObjectId) -> NodePath;
    /// Resolves a path back to a live node. `None` once the node has been removed.
    fn get_node(&self, path: &NodePath) -> Option<ObjectId>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    items: Vec<NodePath>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, path: &NodePath) -> bool {
        self.items.contains(path)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[NodePath] {
        &self.items
    }

    /// Most recently added member.
    pub fn primary(&self) -> Option<&NodePath> {
        self.items.last()
    }

    /// Applies a click on `path`. With `additive` (ctrl held) membership is toggled;
    /// otherwise the selection is replaced by `path` alone.
    pub fn apply_click(&mut self, path: &NodePath, additive: bool) {
        if additive {
            if let Some(pos) = self.items.iter().position(|p| p == path) {
                self.items.remove(pos);
            } else {
                self.items.push(path.clone());
            }
        } else {
            self.items.clear();
            self.items.push(path.clone());
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Primary selection resolved to a live node; `None` when empty or dangling.
    pub fn resolve_primary<T: SceneTree + ?Sized>(&self, tree: &T) -> Option<ObjectId> {
        self.primary().and_then(|path| tree.get_node(path))
    }
}

impl fmt::Display for SelectionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self.items.iter().map(NodePath::as_str).collect::<Vec<_>>().join(",");
        f.write_str(&joined)
    }
}

/// Draws `root` and its open descendants. Returns `true` when the selection
/// changed during this call.
pub fn draw_tree<T: SceneTree + ?Sized>(ui: &mut Ui, tree: &T, root: ObjectId, selection: &mut SelectionSet) -> bool {
    let additive = ui.input(|i| i.modifiers.command);
    draw_node(ui, tree, root, selection, additive)
}

fn draw_node<T: SceneTree + ?Sized>(
    ui: &mut Ui,
    tree: &T,
    node: ObjectId,
    selection: &mut SelectionSet,
    additive: bool,
) -> bool {
    let path = tree.node_path(node);
    let in_selection = selection.contains(&path);
    let mut name = tree.node_name(node);
    if name.is_empty() {
        name = tree.node_class(node);
    }
    let children = tree.children(node);

    if children.is_empty() {
        let clicked = ui.push_id(&path, |ui| ui.selectable_label(in_selection, name.as_str()).clicked()).inner;
        if clicked {
            selection.apply_click(&path, additive);
        }
        return clicked;
    }

    let id = ui.make_persistent_id(&path);
    let mut changed = false;
    let (_toggle, header, _body) = egui::collapsing_header::CollapsingState::load_with_default_open(ui.ctx(), id, false)
        .show_header(ui, |ui| ui.selectable_label(in_selection, name.as_str()))
        .body(|ui| {
            for child in children {
                changed |= draw_node(ui, tree, child, selection, additive);
            }
        });
    // Toggling the disclosure arrow is a separate widget and never selects.
    if header.inner.clicked() {
        selection.apply_click(&path, additive);
        changed = true;
    }
    changed
}

/// Window wrapper: the comma-joined selection followed by the tree.
pub fn show_tree_window<T: SceneTree + ?Sized>(
    ctx: &egui::Context,
    title: &str,
    tree: &T,
    selection: &mut SelectionSet,
) -> bool {
    let mut changed = false;
    egui::Window::new(title).show(ctx, |ui| {
        ui.label(selection.to_string());
        ui.separator();
        match tree.root() {
            Some(root) => {
                egui::ScrollArea::vertical().id_salt("scene_tree").show(ui, |ui| {
                    changed = draw_tree(ui, tree, root, selection);
                });
            }
            None => {
                ui.weak("No scene loaded");
            }
        }
    });
    changed
}
