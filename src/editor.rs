//! Recursive immediate-mode editor for [`Variant`] values.
//!
//! Every kind maps to exactly one widget strategy; composite kinds recurse. Widget
//! identity comes from an explicit stack of structural [`ScopeKey`]s (field name,
//! index, dictionary entry) pushed as egui id scopes, never from label text, so
//! siblings with equal labels cannot collide.

use crate::config::InspectorConfig;
use crate::property::{HintError, PropertyHint};
use crate::variant::{FromVariant, ToVariant, Variant};
use egui::Ui;
use smallvec::SmallVec;
use std::fmt;

mod collection;
mod composite;
mod numeric;

pub use collection::PackedElement;

/// One structural step in a widget identity path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScopeKey {
    /// Top-level labeled edit.
    Label(String),
    /// Property of an inspected object.
    Property(String),
    /// Named sub-field of a composite value.
    Field(&'static str),
    /// Array or packed-array element.
    Index(usize),
    /// Dictionary entry. Both parts are needed: indices shift when entries are
    /// reordered, and display keys can repeat.
    Entry { index: usize, key: String },
}

impl fmt::Display for ScopeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeKey::Label(label) | ScopeKey::Property(label) => f.write_str(label),
            ScopeKey::Field(name) => f.write_str(name),
            ScopeKey::Index(index) => write!(f, "[{index}]"),
            ScopeKey::Entry { index, key } => write!(f, "{{{index}:{key}}}"),
        }
    }
}

/// Bounds applied to unbounded numeric edits, derived from the underlying
/// storage width of the value being edited.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericBounds {
    pub int_min: i64,
    pub int_max: i64,
    pub float_min: f64,
    pub float_max: f64,
}

impl NumericBounds {
    pub const WIDE: NumericBounds =
        NumericBounds { int_min: i64::MIN, int_max: i64::MAX, float_min: f64::MIN, float_max: f64::MAX };
    pub const F32: NumericBounds =
        NumericBounds { float_min: f32::MIN as f64, float_max: f32::MAX as f64, ..NumericBounds::WIDE };

    pub const fn int(min: i64, max: i64) -> Self {
        NumericBounds { int_min: min, int_max: max, ..NumericBounds::WIDE }
    }

    pub fn clamp_int(&self, value: i64) -> i64 {
        value.clamp(self.int_min, self.int_max)
    }

    pub fn clamp_float(&self, value: f64) -> f64 {
        value.clamp(self.float_min, self.float_max)
    }
}

impl Default for NumericBounds {
    fn default() -> Self {
        Self::WIDE
    }
}

pub struct VariantEditor<'a> {
    config: &'a InspectorConfig,
    path: SmallVec<[ScopeKey; 8]>,
}

impl<'a> VariantEditor<'a> {
    pub fn new(config: &'a InspectorConfig) -> Self {
        Self { config, path: SmallVec::new() }
    }

    /// Labeled edit. Returns `true` and replaces `value` only when the user changed it.
    pub fn edit(
        &mut self,
        ui: &mut Ui,
        label: &str,
        value: &mut Variant,
        hint: PropertyHint,
        hint_args: &str,
    ) -> bool {
        self.scoped(ui, ScopeKey::Label(label.to_string()), |this, ui| {
            this.show(ui, Some(label), value, hint, hint_args, NumericBounds::WIDE)
        })
    }

    /// Edit without a visible label, identified by `key`. Used by the property sheet,
    /// which draws names in its own column.
    pub fn edit_keyed(
        &mut self,
        ui: &mut Ui,
        key: ScopeKey,
        value: &mut Variant,
        hint: PropertyHint,
        hint_args: &str,
    ) -> bool {
        self.scoped(ui, key, |this, ui| this.show(ui, None, value, hint, hint_args, NumericBounds::WIDE))
    }

    /// Current identity path, e.g. `inventory/[3]/position`.
    pub fn path_string(&self) -> String {
        self.path.iter().map(ToString::to_string).collect::<Vec<_>>().join("/")
    }

    pub fn depth(&self) -> usize {
        self.path.len()
    }

    pub(crate) fn scoped<R>(&mut self, ui: &mut Ui, key: ScopeKey, add: impl FnOnce(&mut Self, &mut Ui) -> R) -> R {
        let id_salt = key.clone();
        self.path.push(key);
        let inner = ui.push_id(id_salt, |ui| add(self, ui)).inner;
        self.path.pop();
        inner
    }

    pub(crate) fn show(
        &mut self,
        ui: &mut Ui,
        label: Option<&str>,
        value: &mut Variant,
        hint: PropertyHint,
        hint_args: &str,
        bounds: NumericBounds,
    ) -> bool {
        match value {
            Variant::Nil => false,
            Variant::Bool(flag) => edit_bool(ui, label, flag),
            Variant::Int(int) => self.edit_int(ui, label, int, hint, hint_args, bounds),
            Variant::Float(float) => self.edit_float(ui, label, float, hint, hint_args, bounds),
            Variant::String(text) | Variant::StringName(text) => {
                match self.edit_text(ui, label, text, hint == PropertyHint::MultilineText) {
                    Some(new_text) => {
                        *text = new_text;
                        true
                    }
                    None => false,
                }
            }
            Variant::NodePath(path) => match self.edit_text(ui, label, path.as_str(), false) {
                Some(new_path) => {
                    *path = new_path.into();
                    true
                }
                None => false,
            },
            Variant::Vector2(v) => self.edit_vector(ui, label, v, glam::Vec2::to_array, glam::Vec2::from_array),
            Variant::Vector3(v) => self.edit_vector(ui, label, v, glam::Vec3::to_array, glam::Vec3::from_array),
            Variant::Vector4(v) => self.edit_vector(ui, label, v, glam::Vec4::to_array, glam::Vec4::from_array),
            Variant::Vector2i(v) => self.edit_vector(ui, label, v, glam::IVec2::to_array, glam::IVec2::from_array),
            Variant::Vector3i(v) => self.edit_vector(ui, label, v, glam::IVec3::to_array, glam::IVec3::from_array),
            Variant::Vector4i(v) => self.edit_vector(ui, label, v, glam::IVec4::to_array, glam::IVec4::from_array),
            Variant::Color(color) => edit_color(ui, label, color),
            Variant::Rect2(rect) => self.edit_composite(ui, label, "Rect2", rect),
            Variant::Rect2i(rect) => self.edit_composite(ui, label, "Rect2i", rect),
            Variant::Transform2D(xform) => self.edit_composite(ui, label, "Transform2D", xform),
            Variant::Plane(plane) => self.edit_composite(ui, label, "Plane", plane),
            Variant::Quaternion(quat) => self.edit_composite(ui, label, "Quaternion", quat),
            Variant::Aabb(aabb) => self.edit_composite(ui, label, "AABB", aabb),
            Variant::Basis(basis) => self.edit_composite(ui, label, "Basis", basis),
            Variant::Transform3D(xform) => self.edit_composite(ui, label, "Transform3D", xform),
            Variant::Projection(projection) => self.edit_composite(ui, label, "Projection", projection),
            Variant::Dictionary(dict) => self.edit_dictionary(ui, label, dict),
            Variant::Array(items) => self.edit_array(ui, label, items),
            Variant::PackedByteArray(items) => self.edit_array(ui, label, items),
            Variant::PackedInt32Array(items) => self.edit_array(ui, label, items),
            Variant::PackedInt64Array(items) => self.edit_array(ui, label, items),
            Variant::PackedFloat32Array(items) => self.edit_array(ui, label, items),
            Variant::PackedFloat64Array(items) => self.edit_array(ui, label, items),
            Variant::PackedStringArray(items) => self.edit_array(ui, label, items),
            Variant::PackedVector2Array(items) => self.edit_array(ui, label, items),
            Variant::PackedVector3Array(items) => self.edit_array(ui, label, items),
            Variant::PackedVector4Array(items) => self.edit_array(ui, label, items),
            Variant::PackedColorArray(items) => self.edit_array(ui, label, items),
            Variant::Rid(_) | Variant::Object(_) | Variant::Callable(_) | Variant::Signal(_) => {
                show_read_only(ui, label, value);
                false
            }
        }
    }

    /// Single-line text that commits only when confirmed with Enter. The in-progress
    /// buffer lives in egui temp memory while the field has focus.
    fn edit_text(&mut self, ui: &mut Ui, label: Option<&str>, current: &str, multiline: bool) -> Option<String> {
        let max_len = self.config.text_field_max_len;
        with_label(ui, label, |ui| {
            let id = ui.make_persistent_id("text");
            let mut buffer =
                ui.data_mut(|d| d.get_temp::<String>(id)).unwrap_or_else(|| current.to_string());
            let response = if multiline {
                ui.add(egui::TextEdit::multiline(&mut buffer).id(id).desired_rows(3))
            } else {
                ui.add(egui::TextEdit::singleline(&mut buffer).id(id).char_limit(max_len))
            };
            let confirmed =
                response.lost_focus() && (multiline || ui.input(|i| i.key_pressed(egui::Key::Enter)));
            if response.has_focus() {
                ui.data_mut(|d| d.insert_temp(id, buffer.clone()));
            } else {
                ui.data_mut(|d| d.remove::<String>(id));
            }
            (confirmed && buffer != current).then_some(buffer)
        })
    }

    fn edit_vector<V, T, const N: usize>(
        &mut self,
        ui: &mut Ui,
        label: Option<&str>,
        value: &mut V,
        to_array: fn(&V) -> [T; N],
        from_array: fn([T; N]) -> V,
    ) -> bool
    where
        V: PartialEq,
        T: egui::emath::Numeric,
    {
        let speed = if T::INTEGRAL { self.config.int_drag_speed } else { self.config.float_drag_speed };
        let mut components = to_array(value);
        let dragged = with_label(ui, label, |ui| {
            let mut dragged = false;
            for component in components.iter_mut() {
                dragged |= ui.add(egui::DragValue::new(component).speed(speed)).changed();
            }
            dragged
        });
        let updated = from_array(components);
        if dragged && updated != *value {
            *value = updated;
            return true;
        }
        false
    }

    /// Logs a malformed hint once per widget identity instead of every frame.
    fn report_hint_error(&self, ui: &Ui, err: &HintError) {
        let id = ui.make_persistent_id("hint_error");
        let already_reported = ui.data_mut(|d| {
            let seen = d.get_temp::<bool>(id).unwrap_or(false);
            d.insert_temp(id, true);
            seen
        });
        if !already_reported {
            log::warn!("[inspector] {} at '{}', using an unbounded editor", err, self.path_string());
        }
    }
}

/// Edits a plain Rust value through its variant form. `value` is written only on change.
pub fn edit_value<T>(
    editor: &mut VariantEditor<'_>,
    ui: &mut Ui,
    label: &str,
    value: &mut T,
    hint: PropertyHint,
    hint_args: &str,
) -> bool
where
    T: ToVariant + FromVariant + PartialEq,
{
    let mut variant = value.to_variant();
    if !editor.edit(ui, label, &mut variant, hint, hint_args) {
        return false;
    }
    match T::from_variant(&variant) {
        Some(updated) if updated != *value => {
            *value = updated;
            true
        }
        _ => false,
    }
}

/// Draws `add` followed by `label` on one line, or just `add` when unlabeled.
pub(crate) fn with_label<R>(ui: &mut Ui, label: Option<&str>, add: impl FnOnce(&mut Ui) -> R) -> R {
    match label {
        Some(text) if !text.is_empty() => {
            ui.horizontal(|ui| {
                let inner = add(ui);
                ui.label(text);
                inner
            })
            .inner
        }
        _ => add(ui),
    }
}

fn edit_bool(ui: &mut Ui, label: Option<&str>, flag: &mut bool) -> bool {
    let mut checked = *flag;
    let response = ui.checkbox(&mut checked, label.unwrap_or_default());
    if response.changed() && checked != *flag {
        *flag = checked;
        return true;
    }
    false
}

fn edit_color(ui: &mut Ui, label: Option<&str>, color: &mut crate::variant::Color) -> bool {
    let mut rgba = color.to_array();
    let edited = with_label(ui, label, |ui| ui.color_edit_button_rgba_unmultiplied(&mut rgba).changed());
    let updated = crate::variant::Color::from_array(rgba);
    if edited && updated != *color {
        *color = updated;
        return true;
    }
    false
}

fn show_read_only(ui: &mut Ui, label: Option<&str>, value: &Variant) {
    match label {
        Some(text) if !text.is_empty() => {
            ui.horizontal(|ui| {
                ui.label(text);
                ui.monospace(value.to_string());
            });
        }
        _ => {
            ui.monospace(value.to_string());
        }
    }
}
