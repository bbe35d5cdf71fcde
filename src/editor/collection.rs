use super::{NumericBounds, ScopeKey, VariantEditor};
use crate::property::PropertyHint;
use crate::variant::{Color, Dictionary, FromVariant, ToVariant, Variant};
use egui::Ui;
use glam::{Vec2, Vec3, Vec4};

/// Element type of an editable array. `BOUNDS` limits numeric edits to what the
/// element can store.
pub trait PackedElement: ToVariant + FromVariant + PartialEq {
    const BOUNDS: NumericBounds = NumericBounds::WIDE;
}

impl PackedElement for Variant {}
impl PackedElement for u8 {
    const BOUNDS: NumericBounds = NumericBounds::int(u8::MIN as i64, u8::MAX as i64);
}
impl PackedElement for i32 {
    const BOUNDS: NumericBounds = NumericBounds::int(i32::MIN as i64, i32::MAX as i64);
}
impl PackedElement for i64 {}
impl PackedElement for f32 {
    const BOUNDS: NumericBounds = NumericBounds::F32;
}
impl PackedElement for f64 {}
impl PackedElement for String {}
impl PackedElement for Vec2 {}
impl PackedElement for Vec3 {}
impl PackedElement for Vec4 {}
impl PackedElement for Color {}

impl VariantEditor<'_> {
    /// Entries render in iteration order; an edited value is written back under its
    /// original key and marks the whole dictionary changed.
    pub(super) fn edit_dictionary(&mut self, ui: &mut Ui, label: Option<&str>, dict: &mut Dictionary) -> bool {
        let mut edit_entries = |this: &mut Self, ui: &mut Ui| {
            let mut changed = false;
            for (index, (key, value)) in dict.iter_mut().enumerate() {
                let key_text = key.to_string();
                let scope = ScopeKey::Entry { index, key: key_text.clone() };
                changed |= this.scoped(ui, scope, |this, ui| {
                    this.show(ui, Some(&key_text), value, PropertyHint::None, "", NumericBounds::WIDE)
                });
            }
            changed
        };
        match label {
            Some(text) if !text.is_empty() => {
                ui.label(text);
                ui.indent("entries", |ui| edit_entries(self, ui)).inner
            }
            _ => edit_entries(self, ui),
        }
    }

    /// Windowed two-column table: only rows inside the visible scroll range are
    /// built each frame. Edits are written back in place by index.
    pub(super) fn edit_array<T: PackedElement>(&mut self, ui: &mut Ui, label: Option<&str>, items: &mut [T]) -> bool {
        let row_height = self.config.array_row_height;
        let view_height = self.config.array_view_height;
        let total_rows = items.len();
        let header = format!("[{total_rows}] {}", label.unwrap_or_default());
        egui::CollapsingHeader::new(header)
            .id_salt("array")
            .show(ui, |ui| {
                egui::Grid::new("array_header").num_columns(2).min_col_width(32.0).show(ui, |ui| {
                    ui.strong("IDX");
                    ui.strong("VALUE");
                    ui.end_row();
                });
                let mut changed = false;
                egui::ScrollArea::vertical()
                    .id_salt("array_rows")
                    .max_height(view_height)
                    .auto_shrink([false, true])
                    .show_rows(ui, row_height, total_rows, |ui, visible| {
                        egui::Grid::new("array_body").num_columns(2).min_col_width(32.0).striped(true).show(
                            ui,
                            |ui| {
                                for row in visible {
                                    let Some(item) = items.get_mut(row) else {
                                        continue;
                                    };
                                    ui.label(row.to_string());
                                    changed |= self.edit_element(ui, row, item);
                                    ui.end_row();
                                }
                            },
                        );
                    });
                changed
            })
            .body_returned
            .unwrap_or(false)
    }

    fn edit_element<T: PackedElement>(&mut self, ui: &mut Ui, row: usize, item: &mut T) -> bool {
        let mut element = item.to_variant();
        let edited = self.scoped(ui, ScopeKey::Index(row), |this, ui| {
            this.show(ui, None, &mut element, PropertyHint::None, "", T::BOUNDS)
        });
        if !edited {
            return false;
        }
        match T::from_variant(&element) {
            Some(updated) if updated != *item => {
                *item = updated;
                true
            }
            _ => false,
        }
    }
}
