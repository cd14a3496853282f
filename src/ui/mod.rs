mod helpers;
pub mod layout;
pub mod views;

use crate::app::{AppState, PreviewApp};
use eframe::{APP_KEY, App, Frame, set_value};
use egui::Context;
use layout::top_panel;

impl App for PreviewApp {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        // BARRA SUPERIOR (solo con un menú abierto)
        if self.state == AppState::Cascade {
            top_panel(self, ctx);
        }

        // Dispatch por estado
        match self.state {
            AppState::DeploymentSelect => views::deployment::ui_deployment_select(self, ctx),
            AppState::Cascade => views::cascade::ui_cascade(self, ctx),
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.sync_for_save();
        set_value(storage, APP_KEY, self);
    }
}
