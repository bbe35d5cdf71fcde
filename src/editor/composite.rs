use super::{NumericBounds, ScopeKey, VariantEditor};
use crate::property::PropertyHint;
use crate::variant::CompositeFields;
use egui::Ui;

impl VariantEditor<'_> {
    /// Collapsible group with one nested edit per named sub-field. Edited fields are
    /// written back into `value`; untouched fields keep their exact values.
    pub(super) fn edit_composite<T: CompositeFields>(
        &mut self,
        ui: &mut Ui,
        label: Option<&str>,
        kind_label: &str,
        value: &mut T,
    ) -> bool {
        let title = match label {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => kind_label.to_string(),
        };
        egui::CollapsingHeader::new(title)
            .id_salt("composite")
            .show(ui, |ui| {
                let mut changed = false;
                for (index, &name) in T::FIELDS.iter().enumerate() {
                    let mut field = value.field(index);
                    let field_changed = self.scoped(ui, ScopeKey::Field(name), |this, ui| {
                        this.show(ui, Some(name), &mut field, PropertyHint::None, "", NumericBounds::F32)
                    });
                    if field_changed {
                        changed |= value.set_field(index, &field);
                    }
                }
                changed
            })
            .body_returned
            .unwrap_or(false)
    }
}
