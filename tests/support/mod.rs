//! Headless egui driver that feeds pointer and keyboard events into a panel and
//! finds widgets by the text they painted.

#![allow(dead_code)]

use egui::{Event, Key, Modifiers, PointerButton, Pos2, Rect, Shape, Ui};

pub struct Headless {
    ctx: egui::Context,
    modifiers: Modifiers,
    shapes: Vec<egui::epaint::ClippedShape>,
}

impl Headless {
    pub fn new() -> Self {
        Self { ctx: egui::Context::default(), modifiers: Modifiers::NONE, shapes: Vec::new() }
    }

    /// Holds ctrl (the command modifier) for the following gestures.
    pub fn hold_command(&mut self, held: bool) {
        self.modifiers = if held { Modifiers { ctrl: true, command: true, ..Modifiers::NONE } } else { Modifiers::NONE };
    }

    /// Runs one frame with `events`.
    pub fn step(&mut self, events: Vec<Event>, add: &mut dyn FnMut(&mut Ui)) {
        let input = egui::RawInput {
            screen_rect: Some(Rect::from_min_size(Pos2::ZERO, egui::vec2(1024.0, 768.0))),
            modifiers: self.modifiers,
            events,
            ..Default::default()
        };
        let output = self.ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| add(ui));
        });
        self.shapes = output.shapes;
    }

    /// Runs frames without input so layout and open/close animations settle.
    pub fn settle(&mut self, mut add: impl FnMut(&mut Ui)) {
        for _ in 0..12 {
            self.step(Vec::new(), &mut add);
        }
    }

    /// Screen rect of the first painted text that starts with `prefix`.
    pub fn text_rect(&self, prefix: &str) -> Option<Rect> {
        self.shapes.iter().find_map(|clipped| find_text(&clipped.shape, prefix))
    }

    pub fn is_visible(&self, prefix: &str) -> bool {
        self.text_rect(prefix).is_some()
    }

    /// Press and release the primary button at `pos` over two frames.
    pub fn click_at(&mut self, pos: Pos2, mut add: impl FnMut(&mut Ui)) {
        let modifiers = self.modifiers;
        self.step(
            vec![
                Event::PointerMoved(pos),
                Event::PointerButton { pos, button: PointerButton::Primary, pressed: true, modifiers },
            ],
            &mut add,
        );
        self.step(
            vec![Event::PointerButton { pos, button: PointerButton::Primary, pressed: false, modifiers }],
            &mut add,
        );
        self.settle(add);
    }

    /// Clicks the centre of the text starting with `prefix`.
    pub fn click_text(&mut self, prefix: &str, add: impl FnMut(&mut Ui)) {
        let rect = self.text_rect(prefix).unwrap_or_else(|| panic!("'{prefix}' is not on screen"));
        self.click_at(rect.center(), add);
    }

    /// Clicks just past the end of the text starting with `prefix`, which puts a
    /// text field's cursor at the end.
    pub fn click_after_text(&mut self, prefix: &str, add: impl FnMut(&mut Ui)) {
        let rect = self.text_rect(prefix).unwrap_or_else(|| panic!("'{prefix}' is not on screen"));
        self.click_at(Pos2::new(rect.right() + 20.0, rect.center().y), add);
    }

    /// Clicks the disclosure arrow drawn in the indent column left of a
    /// collapsing header's label.
    pub fn click_arrow_of(&mut self, prefix: &str, add: impl FnMut(&mut Ui)) {
        let rect = self.text_rect(prefix).unwrap_or_else(|| panic!("'{prefix}' is not on screen"));
        self.click_at(Pos2::new(rect.left() - 13.0, rect.center().y), add);
    }

    /// Presses on the text starting with `prefix`, moves right by `dx` in two
    /// steps and releases.
    pub fn drag_text(&mut self, prefix: &str, dx: f32, mut add: impl FnMut(&mut Ui)) {
        let rect = self.text_rect(prefix).unwrap_or_else(|| panic!("'{prefix}' is not on screen"));
        let start = rect.center();
        let modifiers = self.modifiers;
        self.step(
            vec![
                Event::PointerMoved(start),
                Event::PointerButton { pos: start, button: PointerButton::Primary, pressed: true, modifiers },
            ],
            &mut add,
        );
        let middle = start + egui::vec2(dx / 2.0, 0.0);
        let end = start + egui::vec2(dx, 0.0);
        self.step(vec![Event::PointerMoved(middle)], &mut add);
        self.step(vec![Event::PointerMoved(end)], &mut add);
        self.step(
            vec![Event::PointerButton { pos: end, button: PointerButton::Primary, pressed: false, modifiers }],
            &mut add,
        );
    }

    pub fn type_text(&mut self, text: &str, mut add: impl FnMut(&mut Ui)) {
        self.step(vec![Event::Text(text.to_string())], &mut add);
    }

    pub fn press_key(&mut self, key: Key, mut add: impl FnMut(&mut Ui)) {
        let modifiers = self.modifiers;
        self.step(
            vec![
                Event::Key { key, physical_key: None, pressed: true, repeat: false, modifiers },
                Event::Key { key, physical_key: None, pressed: false, repeat: false, modifiers },
            ],
            &mut add,
        );
    }
}

fn find_text(shape: &Shape, prefix: &str) -> Option<Rect> {
    match shape {
        Shape::Text(text) if text.galley.text().starts_with(prefix) => {
            Some(text.galley.rect.translate(text.pos.to_vec2()))
        }
        Shape::Vec(shapes) => shapes.iter().find_map(|shape| find_text(shape, prefix)),
        _ => None,
    }
}
