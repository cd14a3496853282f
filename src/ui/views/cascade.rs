use egui::{CentralPanel, ComboBox, Context, RichText, ScrollArea};
use crate::PreviewApp;
use crate::ui::helpers::{message_label, submission_control};
use crate::ui::layout::html_block;

pub fn ui_cascade(app: &mut PreviewApp, ctx: &Context) {
    // Precomputar para no mantener el borrow de app mientras se pinta
    let levels = app.level_views();
    let fields = app.submission_controls();
    let html = app.preview_html();
    let decoded = app.decoded_preview();
    let (title, breadcrumb) = match &app.selector {
        Some(s) => (s.tree().name.clone(), s.breadcrumb().join(" › ")),
        None => (String::new(), String::new()),
    };

    let mut chosen: Option<(usize, String)> = None;

    CentralPanel::default().show(ctx, |ui| {
        ScrollArea::vertical().auto_shrink([false; 2]).show(ui, |ui| {
            ui.heading(&title);
            if !breadcrumb.is_empty() {
                ui.label(RichText::new(&breadcrumb).weak());
            }
            ui.add_space(12.0);

            // 1) Un ComboBox por nivel
            for level in &levels {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(&level.name).monospace());
                    ComboBox::from_id_salt(("level", level.level))
                        .selected_text(level.selected_text())
                        .width(320.0)
                        .show_ui(ui, |ui| {
                            for option in &level.options {
                                let is_sel = level.selected.as_deref() == Some(option.key.as_str());
                                if ui.selectable_label(is_sel, &option.label).clicked() && !is_sel {
                                    chosen = Some((level.level, option.key.clone()));
                                }
                            }
                        });
                });
                ui.add_space(4.0);
            }

            // 2) Campos de envío de la hoja
            if !fields.is_empty() {
                ui.separator();
                for control in &fields {
                    submission_control(ui, control);
                }
            }

            message_label(ui, &app.message);

            // 3) HTML generado y lo que recibiría el servidor
            ui.separator();
            ui.label(RichText::new("HTML").strong());
            html_block(ui, "html_preview", &html, 260.0);
            if let Some(decoded) = &decoded {
                ui.add_space(8.0);
                ui.label(RichText::new("Servidor").strong());
                ui.label(RichText::new(decoded).monospace());
            }
        });
    });

    if let Some((level, key)) = chosen {
        app.choose(level, &key);
        ctx.request_repaint();
    }
}
