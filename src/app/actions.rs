use std::path::Path;
use std::sync::Arc;

use super::*;
use crate::data::read_menu_for;
use crate::loader::load_menu_file;
use crate::model::MenuTree;

impl PreviewApp {
    pub fn open_deployment(&mut self, deployment: Deployment) {
        match read_menu_for(deployment) {
            Ok(tree) => self.open_tree(tree, MenuSource::Embedded(deployment)),
            Err(e) => self.fail(format!("No se pudo abrir {deployment}: {e}")),
        }
    }

    pub fn open_menu_file(&mut self, path: &Path) {
        match load_menu_file(path) {
            Ok(tree) => self.open_tree(tree, MenuSource::File(path.to_path_buf())),
            Err(e) => self.fail(format!("No se pudo abrir {}: {e}", path.display())),
        }
    }

    fn open_tree(&mut self, tree: MenuTree, source: MenuSource) {
        match CascadingSelector::new(Arc::new(tree)) {
            Ok(mut selector) => {
                selector.initialize();
                log::info!("preview opened {source:?}");
                self.selector = Some(selector);
                self.source = Some(source);
                self.saved_selection.clear();
                self.message.clear();
                self.state = AppState::Cascade;
            }
            Err(e) => self.fail(e.to_string()),
        }
    }

    fn fail(&mut self, message: String) {
        log::error!("{message}");
        self.message = message;
        self.selector = None;
        self.state = AppState::DeploymentSelect;
    }

    /// Vuelve a abrir el menú guardado y reproduce la selección guardada.
    /// Si el menú cambió y la ruta ya no existe, se queda en el último nivel válido.
    pub fn restore(&mut self) {
        let saved = std::mem::take(&mut self.saved_selection);
        match self.source.clone() {
            Some(MenuSource::Embedded(d)) => self.open_deployment(d),
            Some(MenuSource::File(path)) => self.open_menu_file(&path),
            None => return,
        }
        if let Some(selector) = self.selector.as_mut() {
            if let Err(e) = selector.select_path(&saved) {
                log::warn!("saved selection {saved:?} no longer applies: {e}");
                self.message = format!("La selección guardada ya no es válida: {e}");
            }
        }
    }

    pub fn choose(&mut self, level: usize, key: &str) {
        let Some(selector) = self.selector.as_mut() else {
            return;
        };
        match selector.select(level, key) {
            Ok(_) => self.message.clear(),
            Err(e) => self.message = e.to_string(),
        }
    }

    pub fn back(&mut self) {
        if let Some(selector) = self.selector.as_mut() {
            if let Err(e) = selector.back() {
                self.message = e.to_string();
            }
        }
    }

    /// Deja solo el desplegable raíz
    pub fn reset_selection(&mut self) {
        if let Some(selector) = self.selector.as_mut() {
            selector.initialize();
        }
        self.message.clear();
    }

    /// Cierra el menú y vuelve a la lista de despliegues
    pub fn change_menu(&mut self) {
        if let Some(selector) = self.selector.as_mut() {
            selector.teardown();
        }
        self.selector = None;
        self.source = None;
        self.saved_selection.clear();
        self.message.clear();
        self.state = AppState::DeploymentSelect;
    }

    /// Copia la selección viva a la parte persistente antes de guardar
    pub fn sync_for_save(&mut self) {
        self.saved_selection = self.current_selection();
    }
}
