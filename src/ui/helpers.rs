// src/ui/helpers.rs
use egui::{Button, Color32, RichText, Ui, Vec2};

use crate::form::Control;

pub fn big_list_button(ui: &mut Ui, label: String, width: f32, height: f32, enabled: bool) -> bool {
    ui.add_enabled(enabled, Button::new(label).min_size(Vec2::new(width, height))).clicked()
}

pub fn message_label(ui: &mut Ui, message: &str) {
    if message.is_empty() {
        return;
    }
    ui.add_space(8.0);
    ui.label(
        RichText::new(message)
            .color(Color32::YELLOW)
            .strong(),
    );
    ui.add_space(8.0);
}

/// Imitación (no editable) de los campos de envío de una hoja
pub fn submission_control(ui: &mut Ui, control: &Control) {
    match control {
        Control::Hidden { name, value } => {
            let value = if value.is_empty() { "(vacío)" } else { value.as_str() };
            ui.label(RichText::new(format!("{name} = {value}")).monospace().weak());
        }
        Control::Label { text, .. } => {
            ui.label(text);
        }
        Control::FileInput { accept, multiple, .. } => {
            let mut text = String::from("📂 Examinar…");
            if *multiple {
                text.push_str(" (varios)");
            }
            if !accept.is_empty() {
                text.push_str(&format!(" {}", accept.join(",")));
            }
            ui.add_enabled(false, Button::new(text));
        }
        Control::TextInput { name } => {
            let mut empty = String::new();
            ui.add_enabled(false, egui::TextEdit::singleline(&mut empty).hint_text(name));
        }
        Control::ExercisePicker { multiple, options, .. } => {
            let kind = if *multiple { "selección múltiple" } else { "selección única" };
            ui.label(RichText::new(format!("Ejercicios ({kind})")).italics());
            for option in options {
                ui.label(format!("  • {} ({})", option.label, option.key));
            }
        }
        Control::Submit { text } => {
            ui.add_enabled(false, Button::new(text).min_size(Vec2::new(120.0, 32.0)));
        }
        Control::Dropdown { .. } => {}
    }
}
