//! Object property walker.
//!
//! Resolves the inheritance chain of the inspected object (script levels first,
//! then native classes), renders one collapsible section per level, and edits
//! each property through [`VariantEditor`]. Object-valued properties become
//! navigation buttons that retarget the inspector.

use crate::config::InspectorConfig;
use crate::editor::{ScopeKey, VariantEditor};
use crate::property::{PropertyDescriptor, PropertyUsage};
use crate::property_cache::PropertyCache;
use crate::reflection::{BoundObject, InspectedObject, ObjectHost, ObjectId, PropertyStore, ScriptId};
use crate::variant::VariantKind;
use egui::Ui;

/// Where a level's descriptor list comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelSource {
    Native(String),
    Script(ScriptId),
}

/// One section of the inspector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainLevel {
    pub display_name: String,
    pub source: LevelSource,
}

impl ChainLevel {
    pub fn is_script(&self) -> bool {
        matches!(self.source, LevelSource::Script(_))
    }
}

/// Levels to render for `object`, most derived first.
///
/// Attached scripts contribute one level each (named by the first entry of the
/// script's property list) before the native chain is walked through
/// `parent_class`. The walk stops on an empty class name or after `max_depth`
/// levels, whichever comes first. Stale handles yield no levels.
pub fn resolve_chain<H: ObjectHost + ?Sized>(host: &H, object: ObjectId, max_depth: usize) -> Vec<ChainLevel> {
    let mut levels = Vec::new();
    if !host.is_instance_valid(object) {
        return levels;
    }
    let mut class = host.class_of(object);
    let mut script = host.script_of(object);
    while !class.is_empty() && levels.len() < max_depth {
        if let Some(current) = script {
            let list = host.script_property_list(current);
            if let Some(first) = list.first() {
                levels.push(ChainLevel { display_name: first.name.clone(), source: LevelSource::Script(current) });
                script = host.base_script(current);
                continue;
            }
            script = None;
        }
        let parent = host.parent_class(&class);
        levels.push(ChainLevel { display_name: class.clone(), source: LevelSource::Native(class) });
        class = parent;
    }
    levels
}

/// A disclosure scope within a section. `header` is `None` for entries that
/// precede the first group marker.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyGroup<'a> {
    pub header: Option<&'a PropertyDescriptor>,
    pub entries: Vec<&'a PropertyDescriptor>,
}

/// Partitions a descriptor list into disclosure scopes.
///
/// Group, subgroup and category markers each start a new scope, so a scope
/// always ends where the next begins. Markers are classified before the `Nil`
/// skip because they usually carry no value kind. Storage-only and `Nil`
/// entries are dropped.
pub fn group_descriptors(descriptors: &[PropertyDescriptor]) -> Vec<PropertyGroup<'_>> {
    let mut groups: Vec<PropertyGroup<'_>> = Vec::new();
    for desc in descriptors {
        if desc.usage.opens_scope() {
            groups.push(PropertyGroup { header: Some(desc), entries: Vec::new() });
            continue;
        }
        if desc.usage == PropertyUsage::Storage || desc.kind == VariantKind::Nil {
            continue;
        }
        match groups.last_mut() {
            Some(group) => group.entries.push(desc),
            None => groups.push(PropertyGroup { header: None, entries: vec![desc] }),
        }
    }
    groups
}

/// What happened during one inspector frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InspectorReport {
    /// Section titles in render order.
    pub sections: Vec<String>,
    /// Set when a navigation button retargeted the inspector.
    pub navigated_to: Option<ObjectId>,
    /// Property writes applied to the live object.
    pub writes: usize,
}

/// Draws the property sheet for `target`. A navigation click replaces `target`
/// after the frame's sections have been drawn. Stale targets draw a placeholder.
pub fn show_inspector<H: ObjectHost + ?Sized>(
    ui: &mut Ui,
    host: &mut H,
    cache: &mut PropertyCache,
    config: &InspectorConfig,
    target: &mut Option<ObjectId>,
) -> InspectorReport {
    let mut report = InspectorReport::default();
    let Some(object) = target.filter(|object| host.is_instance_valid(*object)) else {
        ui.weak("No object inspected");
        return report;
    };

    let mut editor = VariantEditor::new(config);
    let mut navigation = None;
    for (index, level) in resolve_chain(host, object, config.max_inheritance_depth).into_iter().enumerate() {
        report.sections.push(level.display_name.clone());
        egui::CollapsingHeader::new(level.display_name.as_str())
            .id_salt(("inspector_level", index))
            .default_open(index == 0)
            .show(ui, |ui| {
                let descriptors = cache.get_or_insert_with(&level.display_name, || match &level.source {
                    LevelSource::Native(class) => host.class_property_list(class, false),
                    LevelSource::Script(script) => host.script_property_list(*script),
                });
                for (group_index, group) in group_descriptors(&descriptors).iter().enumerate() {
                    ui.push_id(group_index, |ui| match group.header {
                        Some(header) => {
                            ui.separator();
                            egui::CollapsingHeader::new(header.name.as_str()).id_salt("group").show(ui, |ui| {
                                draw_rows(ui, host, object, &group.entries, &mut editor, &mut report, &mut navigation)
                            });
                        }
                        None => draw_rows(ui, host, object, &group.entries, &mut editor, &mut report, &mut navigation),
                    });
                }
            });
    }

    if let Some(next) = navigation {
        log::debug!("[inspector] navigating from {} to {}", host.describe(object), host.describe(next));
        *target = Some(next);
        report.navigated_to = Some(next);
    }
    report
}

fn draw_rows<H: ObjectHost + ?Sized>(
    ui: &mut Ui,
    host: &mut H,
    object: ObjectId,
    entries: &[&PropertyDescriptor],
    editor: &mut VariantEditor<'_>,
    report: &mut InspectorReport,
    navigation: &mut Option<ObjectId>,
) {
    egui::Grid::new("properties").num_columns(2).striped(true).show(ui, |ui| {
        for desc in entries {
            ui.label(desc.name.as_str()).on_hover_text(desc.tooltip());
            let value = host.get_property(object, &desc.name);
            if desc.kind == VariantKind::Object {
                match value.as_object().filter(|other| host.is_instance_valid(*other)) {
                    Some(other) => {
                        let clicked = ui.push_id(desc.name.as_str(), |ui| ui.button(host.describe(other)).clicked()).inner;
                        if clicked {
                            *navigation = Some(other);
                        }
                    }
                    None => {
                        ui.weak("NULL");
                    }
                }
            } else {
                let mut value = value;
                let key = ScopeKey::Property(desc.name.clone());
                if editor.edit_keyed(ui, key, &mut value, desc.hint, &desc.hint_args) {
                    if let Some(mut bound) = BoundObject::bind(&mut *host, object) {
                        bound.set(&desc.name, value);
                        report.writes += 1;
                    }
                }
            }
            ui.end_row();
        }
    });
}

/// Inspector window over the shared inspected-object slot.
pub fn show_inspector_window<H: ObjectHost + ?Sized>(
    ctx: &egui::Context,
    title: &str,
    host: &mut H,
    cache: &mut PropertyCache,
    config: &InspectorConfig,
    inspected: &mut InspectedObject,
) -> InspectorReport {
    egui::Window::new(title)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("inspector_scroll")
                .show(ui, |ui| show_inspector(ui, host, cache, config, inspected.slot_mut()))
                .inner
        })
        .and_then(|response| response.inner)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_entries_form_an_unnamed_group() {
        let list = vec![
            PropertyDescriptor::new("visible", VariantKind::Bool),
            PropertyDescriptor::group("Transform"),
            PropertyDescriptor::new("position", VariantKind::Vector2),
        ];
        let groups = group_descriptors(&list);
        assert_eq!(groups.len(), 2);
        assert!(groups[0].header.is_none());
        assert_eq!(groups[1].header.map(|h| h.name.as_str()), Some("Transform"));
        assert_eq!(groups[1].entries.len(), 1);
    }

    #[test]
    fn storage_and_nil_entries_are_dropped() {
        let list = vec![
            PropertyDescriptor::new("marker", VariantKind::Nil),
            PropertyDescriptor::new("hidden", VariantKind::Int).with_usage(PropertyUsage::Storage),
            PropertyDescriptor::new("speed", VariantKind::Float),
        ];
        let groups = group_descriptors(&list);
        assert_eq!(groups.len(), 1);
        let names: Vec<&str> = groups[0].entries.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["speed"]);
    }
}
