use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::data::Deployment;
use crate::selector::CascadingSelector;

// Submódulos
pub mod actions;
pub mod view_models;

// Re-export de view models
pub use crate::view_models::{DeploymentInfo, LevelView};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum AppState {
    #[default]
    DeploymentSelect, // lista de menús embebidos
    Cascade,          // desplegables + vista previa del formulario
}

/// De dónde sale el menú que se está previsualizando
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum MenuSource {
    Embedded(Deployment),
    File(PathBuf),
}

#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewApp {
    pub source: Option<MenuSource>,
    pub saved_selection: Vec<String>, // se reproduce con select_path al arrancar
    pub show_form_wrapper: bool,      // envolver el HTML en <form id='form'>
    pub message: String,
    #[serde(skip)]
    pub state: AppState,
    #[serde(skip)]
    pub selector: Option<CascadingSelector>,
}

impl Default for PreviewApp {
    fn default() -> Self {
        Self {
            source: None,
            saved_selection: Vec::new(),
            show_form_wrapper: false,
            message: String::new(),
            state: AppState::DeploymentSelect,
            selector: None,
        }
    }
}

impl PreviewApp {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recupera la app guardada por eframe (si la hay) y vuelve a abrir su menú
    pub fn from_storage(storage: Option<&dyn eframe::Storage>) -> Self {
        let mut app: PreviewApp = storage
            .and_then(|s| eframe::get_value(s, eframe::APP_KEY))
            .unwrap_or_default();
        app.restore();
        app
    }

    /// Selección actual, o la guardada si todavía no hay selector
    pub fn current_selection(&self) -> Vec<String> {
        match &self.selector {
            Some(selector) => selector.selection().to_vec(),
            None => self.saved_selection.clone(),
        }
    }
}
