use super::*;

impl CascadingSelector {
    /// Vuelve a dejar el desplegable del nivel `level` sin elegir, borrando todo
    /// lo que colgaba de él. Sirve para el botón "atrás" de la vista previa.
    pub fn reset_to(&mut self, level: usize) -> Result<(), SelectionError> {
        self.node_for_level(level)?;
        self.selection.truncate(level);
        self.levels.truncate(level + 1);
        if let Some(Control::Dropdown { selected, .. }) = self.levels[level].controls.first_mut() {
            *selected = None;
        }
        log::debug!("reset to level {level}");
        Ok(())
    }

    /// Deshace la última selección
    pub fn back(&mut self) -> Result<(), SelectionError> {
        match self.selection.len() {
            0 => Ok(()),
            n => self.reset_to(n - 1),
        }
    }
}
