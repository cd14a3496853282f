use egui::{CentralPanel, Context, RichText, ScrollArea};
use crate::PreviewApp;
use crate::ui::helpers::{big_list_button, message_label};

pub fn ui_deployment_select(app: &mut PreviewApp, ctx: &Context) {
    let infos = PreviewApp::deployment_infos();
    let mut chosen = None;

    CentralPanel::default().show(ctx, |ui| {
        ScrollArea::vertical().auto_shrink([false; 2]).show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(24.0);
                ui.heading("Formulario de entregas");
                ui.label("Selecciona un menú");
                ui.add_space(18.0);

                let button_width = ui.available_width().clamp(200.0, 460.0);
                for info in &infos {
                    if big_list_button(ui, info.label(), button_width, 40.0, info.is_ok()) {
                        chosen = Some(info.deployment);
                    }
                    if let Some(err) = &info.error {
                        ui.label(RichText::new(err).small().color(egui::Color32::LIGHT_RED));
                    }
                    ui.add_space(5.0);
                }

                #[cfg(not(target_arch = "wasm32"))]
                {
                    ui.add_space(10.0);
                    if ui.add_sized([button_width, 40.0], egui::Button::new("Salir")).clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                }

                message_label(ui, &app.message);
            });
        });
    });

    if let Some(deployment) = chosen {
        app.open_deployment(deployment);
        ctx.request_repaint();
    }
}
