use egui::{Context, Ui};
use crate::PreviewApp;

pub fn top_panel(app: &mut PreviewApp, ctx: &Context) {
    egui::TopBottomPanel::top("menu_panel").show(ctx, |ui| {
        ui.horizontal_centered(|ui| {
            if ui.button("Cambiar menú").clicked() {
                app.change_menu();
                ctx.request_repaint();
            }
            if ui.button("⬅ Atrás").clicked() {
                app.back();
            }
            if ui.button("🔄 Reiniciar selección").clicked() {
                app.reset_selection();
            }
            ui.separator();
            ui.checkbox(&mut app.show_form_wrapper, "Con <form>");
        });
    });
}

/// Bloque de sólo lectura con el HTML generado
pub fn html_block(ui: &mut Ui, id: &str, html: &str, max_height: f32) {
    let mut buf = html.to_owned();
    egui::ScrollArea::vertical()
        .id_salt(id)
        .max_height(max_height)
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            ui.add(
                egui::TextEdit::multiline(&mut buf)
                    .code_editor()
                    .interactive(false)
                    .desired_width(f32::INFINITY),
            );
        });
}
