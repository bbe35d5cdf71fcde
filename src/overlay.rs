//! Per-frame composition of the tree browser and the inspector.

use crate::config::InspectorConfig;
use crate::inspector::{show_inspector_window, InspectorReport};
use crate::property_cache::PropertyCache;
use crate::reflection::{InspectedObject, ObjectHost};
use crate::scene_tree::{show_tree_window, SceneTree, SelectionSet};

/// Outcome of one [`InspectorOverlay::show`] call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayFrame {
    pub selection_changed: bool,
    pub inspector: InspectorReport,
}

/// Debug overlay state retained between frames.
///
/// The tree browser and the inspector share nothing but [`InspectedObject`]:
/// a selection change retargets it to the primary selection, and inspector
/// navigation retargets it without touching the selection.
pub struct InspectorOverlay {
    pub selection: SelectionSet,
    pub inspected: InspectedObject,
    pub cache: PropertyCache,
    pub config: InspectorConfig,
}

impl Default for InspectorOverlay {
    fn default() -> Self {
        Self::new(InspectorConfig::default())
    }
}

impl InspectorOverlay {
    pub fn new(config: InspectorConfig) -> Self {
        Self {
            selection: SelectionSet::new(),
            inspected: InspectedObject::default(),
            cache: PropertyCache::new(config.property_cache_limit),
            config,
        }
    }

    /// Draws both windows for this frame.
    pub fn show<W>(&mut self, ctx: &egui::Context, world: &mut W) -> OverlayFrame
    where
        W: ObjectHost + SceneTree,
    {
        let selection_changed = show_tree_window(ctx, &self.config.windows.tree, &*world, &mut self.selection);
        if selection_changed {
            let primary = self.selection.resolve_primary(&*world);
            log::debug!("[inspector] selection now '{}'", self.selection);
            self.inspected.set(primary);
        }
        let inspector = show_inspector_window(
            ctx,
            &self.config.windows.inspector,
            world,
            &mut self.cache,
            &self.config,
            &mut self.inspected,
        );
        OverlayFrame { selection_changed, inspector }
    }
}
