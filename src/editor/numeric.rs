use super::{with_label, NumericBounds, VariantEditor};
use crate::property::{layer_bit_set, set_layer_bit, wants_degrees, EnumHint, PropertyHint, RangeHint};
use egui::Ui;

const ANGLE_DEFAULT_MIN_DEG: f64 = -360.0;
const ANGLE_DEFAULT_MAX_DEG: f64 = 360.0;
const MAX_FLAG_BITS: usize = 32;

impl VariantEditor<'_> {
    pub(super) fn edit_int(
        &mut self,
        ui: &mut Ui,
        label: Option<&str>,
        value: &mut i64,
        hint: PropertyHint,
        hint_args: &str,
        bounds: NumericBounds,
    ) -> bool {
        let updated = match hint {
            PropertyHint::Enum => match EnumHint::parse(hint_args) {
                Ok(choices) => enum_combo(ui, label, *value, &choices),
                Err(err) => {
                    self.report_hint_error(ui, &err);
                    self.drag_int(ui, label, *value, bounds, Some(err.to_string()))
                }
            },
            PropertyHint::Flags => flag_toggles(ui, label, *value, hint_args),
            PropertyHint::Range => match RangeHint::parse(hint_args) {
                Ok(range) => slider_int(ui, label, *value, &range, bounds),
                Err(err) => {
                    self.report_hint_error(ui, &err);
                    self.drag_int(ui, label, *value, bounds, Some(err.to_string()))
                }
            },
            _ => match hint.layer_bits() {
                Some(bits) => self.layer_strip(ui, label, *value, bits),
                None => self.drag_int(ui, label, *value, bounds, None),
            },
        };
        match updated.map(|new_value| bounds.clamp_int(new_value)) {
            Some(new_value) if new_value != *value => {
                *value = new_value;
                true
            }
            _ => false,
        }
    }

    pub(super) fn edit_float(
        &mut self,
        ui: &mut Ui,
        label: Option<&str>,
        value: &mut f64,
        hint: PropertyHint,
        hint_args: &str,
        bounds: NumericBounds,
    ) -> bool {
        let range = match hint {
            PropertyHint::Range => match RangeHint::parse(hint_args) {
                Ok(range) => Some(range),
                Err(err) => {
                    self.report_hint_error(ui, &err);
                    None
                }
            },
            _ => None,
        };
        let updated = if wants_degrees(hint_args) {
            angle_slider(ui, label, *value, range.as_ref())
        } else if let Some(range) = &range {
            slider_float(ui, label, *value, range)
        } else {
            self.drag_float(ui, label, *value, bounds)
        };
        match updated.filter(|v| !v.is_nan()).map(|new_value| bounds.clamp_float(new_value)) {
            Some(new_value) if new_value != *value => {
                *value = new_value;
                true
            }
            _ => false,
        }
    }

    fn drag_int(
        &self,
        ui: &mut Ui,
        label: Option<&str>,
        value: i64,
        bounds: NumericBounds,
        problem: Option<String>,
    ) -> Option<i64> {
        let speed = self.config.int_drag_speed;
        let mut edited = value;
        let response = with_label(ui, label, |ui| {
            ui.add(egui::DragValue::new(&mut edited).speed(speed).range(bounds.int_min..=bounds.int_max))
        });
        let response = match problem {
            Some(text) => response.on_hover_text(text),
            None => response,
        };
        response.changed().then_some(edited)
    }

    fn drag_float(&self, ui: &mut Ui, label: Option<&str>, value: f64, bounds: NumericBounds) -> Option<f64> {
        let speed = self.config.float_drag_speed;
        let mut edited = value;
        let response = with_label(ui, label, |ui| {
            ui.add(egui::DragValue::new(&mut edited).speed(speed).range(bounds.float_min..=bounds.float_max))
        });
        response.changed().then_some(edited)
    }

    /// One toggle per bit in a fixed-height scrollable strip, eight bits per row.
    fn layer_strip(&self, ui: &mut Ui, label: Option<&str>, value: i64, bits: u32) -> Option<i64> {
        let row_height = ui.spacing().interact_size.y;
        let strip_height = row_height * self.config.layer_strip_rows as f32;
        let mut mask = value;
        let mut changed = false;
        if let Some(text) = label {
            ui.label(text);
        }
        egui::ScrollArea::vertical().id_salt("layer_strip").max_height(strip_height).show(ui, |ui| {
            egui::Grid::new("layer_bits").spacing([2.0, 2.0]).show(ui, |ui| {
                for bit in 0..bits {
                    ui.push_id(bit, |ui| {
                        let mut enabled = layer_bit_set(mask, bit);
                        let toggled = ui
                            .checkbox(&mut enabled, format!("{}", bit + 1))
                            .on_hover_text(format!("Layer {}", bit + 1))
                            .changed();
                        if toggled {
                            mask = set_layer_bit(mask, bit, enabled);
                            changed = true;
                        }
                    });
                    if bit % 8 == 7 {
                        ui.end_row();
                    }
                }
            });
        });
        changed.then_some(mask)
    }
}

/// Closed choice among the enum entries; returns the chosen entry's value.
fn enum_combo(ui: &mut Ui, label: Option<&str>, value: i64, choices: &EnumHint) -> Option<i64> {
    let current = choices.index_of(value);
    let selected_text = match current.and_then(|index| choices.name_at(index)) {
        Some(name) => name.to_string(),
        None => value.to_string(),
    };
    let mut chosen = None;
    with_label(ui, label, |ui| {
        egui::ComboBox::from_id_salt("enum").selected_text(selected_text).show_ui(ui, |ui| {
            for (index, option) in choices.options.iter().enumerate() {
                if ui.selectable_label(current == Some(index), option.name.as_str()).clicked() {
                    chosen = Some(index);
                }
            }
        });
    });
    chosen.and_then(|index| choices.value_at(index))
}

fn flag_toggles(ui: &mut Ui, label: Option<&str>, value: i64, hint_args: &str) -> Option<i64> {
    let mut mask = value;
    let mut changed = false;
    if let Some(text) = label {
        ui.label(text);
    }
    ui.horizontal_wrapped(|ui| {
        let names = hint_args.split(',').map(str::trim).filter(|name| !name.is_empty());
        for (bit, name) in names.take(MAX_FLAG_BITS).enumerate() {
            let bit = bit as u32;
            let mut enabled = layer_bit_set(mask, bit);
            if ui.push_id(bit, |ui| ui.checkbox(&mut enabled, name).changed()).inner {
                mask = set_layer_bit(mask, bit, enabled);
                changed = true;
            }
        }
    });
    changed.then_some(mask)
}

fn slider_int(ui: &mut Ui, label: Option<&str>, value: i64, range: &RangeHint, bounds: NumericBounds) -> Option<i64> {
    let min = bounds.clamp_int(range.clamp_int(i64::MIN));
    let max = bounds.clamp_int(range.clamp_int(i64::MAX)).max(min);
    let mut edited = value;
    let response = with_label(ui, label, |ui| {
        let mut slider = egui::Slider::new(&mut edited, min..=max).logarithmic(range.exp);
        if let Some(step) = range.step {
            slider = slider.step_by(step.max(1.0));
        }
        if let Some(suffix) = &range.suffix {
            slider = slider.suffix(suffix.as_str());
        }
        ui.add(slider)
    });
    response.changed().then(|| edited.clamp(min, max))
}

fn slider_float(ui: &mut Ui, label: Option<&str>, value: f64, range: &RangeHint) -> Option<f64> {
    let mut edited = value;
    let response = with_label(ui, label, |ui| {
        let mut slider = egui::Slider::new(&mut edited, range.min..=range.max).logarithmic(range.exp);
        if let Some(step) = range.step {
            slider = slider.step_by(step);
        }
        if let Some(suffix) = &range.suffix {
            slider = slider.suffix(suffix.as_str());
        }
        ui.add(slider)
    });
    response.changed().then(|| range.clamp(edited))
}

/// Stores radians, shows degrees. Range bounds, when present, are given in degrees.
fn angle_slider(ui: &mut Ui, label: Option<&str>, radians: f64, range: Option<&RangeHint>) -> Option<f64> {
    let (min_deg, max_deg) = range.map_or((ANGLE_DEFAULT_MIN_DEG, ANGLE_DEFAULT_MAX_DEG), |r| (r.min, r.max));
    let mut degrees = radians.to_degrees();
    let response = with_label(ui, label, |ui| {
        let mut slider = egui::Slider::new(&mut degrees, min_deg..=max_deg).suffix("°");
        if let Some(step) = range.and_then(|r| r.step) {
            slider = slider.step_by(step);
        }
        ui.add(slider)
    });
    response.changed().then(|| degrees.clamp(min_deg, max_deg).to_radians())
}
