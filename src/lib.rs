//! Immediate-mode debug overlay for live object graphs: a recursive editor for
//! dynamically typed values, a reflective property sheet that walks inheritance
//! and script chains, and a scene tree browser with multi-selection.

pub mod config;
pub mod editor;
pub mod inspector;
pub mod overlay;
pub mod property;
pub mod property_cache;
pub mod reflection;
pub mod scene;
pub mod scene_tree;
pub mod variant;

pub use config::InspectorConfig;
pub use editor::{edit_value, ScopeKey, VariantEditor};
pub use inspector::{resolve_chain, show_inspector, InspectorReport};
pub use overlay::{InspectorOverlay, OverlayFrame};
pub use property::{PropertyDescriptor, PropertyHint, PropertyUsage};
pub use property_cache::PropertyCache;
pub use reflection::{InspectedObject, ObjectHost, ObjectId, PropertyStore};
pub use scene::SceneWorld;
pub use scene_tree::{NodePath, SceneTree, SelectionSet};
pub use variant::{Dictionary, Variant, VariantKind};
