use std::sync::Arc;

use crate::error::{ConfigError, SelectionError};
use crate::form::{Control, controls_for};
use crate::loader::ensure_valid;
use crate::model::{MenuNode, MenuTree};

// Submódulos
pub mod navigation;
pub mod queries;
pub mod resets;

/// Controles pintados para un nivel de la cascada.
///
/// El nivel `i` pertenece al nodo alcanzado con las `i` primeras selecciones;
/// el nivel 0 es el desplegable de la raíz.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedLevel {
    pub depth: usize,
    pub node_key: String,
    pub controls: Vec<Control>,
}

impl RenderedLevel {
    pub fn is_dropdown(&self) -> bool {
        self.controls.first().is_some_and(Control::is_dropdown)
    }

    pub fn is_submission(&self) -> bool {
        self.controls.iter().any(Control::is_submit)
    }
}

/// Motor genérico de desplegables en cascada.
///
/// Posee su árbol (compartido, inmutable) y la vista pintada. Invariante una vez
/// inicializado: `levels.len() == selection.len() + 1`.
#[derive(Clone, Debug)]
pub struct CascadingSelector {
    tree: Arc<MenuTree>,
    selection: Vec<String>,
    levels: Vec<RenderedLevel>,
}

impl CascadingSelector {
    /// Valida el árbol antes de aceptarlo: un menú mal escrito falla aquí, no en pantalla.
    pub fn new(tree: Arc<MenuTree>) -> Result<Self, ConfigError> {
        ensure_valid(&tree)?;
        Ok(Self {
            tree,
            selection: Vec::new(),
            levels: Vec::new(),
        })
    }

    /// Pinta el desplegable raíz, descartando cualquier estado anterior
    pub fn initialize(&mut self) -> &[RenderedLevel] {
        self.teardown();
        self.render(0);
        &self.levels
    }

    pub fn teardown(&mut self) {
        self.selection.clear();
        self.levels.clear();
    }

    pub fn is_initialized(&self) -> bool {
        !self.levels.is_empty()
    }

    /// Pinta el nodo alcanzado con `selection[..depth]`, quitando antes todo lo
    /// que haya a partir de `depth`.
    fn render(&mut self, depth: usize) {
        self.levels.truncate(depth);
        let tree = Arc::clone(&self.tree);
        let Some(node) = tree.node_at(&self.selection[..depth]) else {
            // Solo posible si la selección no sale del árbol, cosa que `select` impide
            log::error!("selection {:?} left the menu tree", &self.selection[..depth]);
            return;
        };
        let controls = controls_for(node, &tree.labels);
        log::debug!(
            "render level {depth} for `{}` ({} control(s))",
            node.key,
            controls.len()
        );
        self.levels.push(RenderedLevel {
            depth,
            node_key: node.key.clone(),
            controls,
        });
    }

    fn node_for_level(&self, level: usize) -> Result<&MenuNode, SelectionError> {
        if !self.is_initialized() {
            return Err(SelectionError::NotInitialized);
        }
        if level >= self.levels.len() {
            return Err(SelectionError::UnknownLevel {
                level,
                rendered: self.levels.len(),
            });
        }
        let node = self
            .tree
            .node_at(&self.selection[..level])
            .ok_or(SelectionError::UnknownLevel {
                level,
                rendered: self.levels.len(),
            })?;
        if node.is_leaf() {
            return Err(SelectionError::LeafLevel { level });
        }
        Ok(node)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::fixtures::{branch, small_tree};

    pub fn selector() -> CascadingSelector {
        let mut s = CascadingSelector::new(Arc::new(small_tree())).expect("árbol válido");
        s.initialize();
        s
    }

    #[test]
    fn new_rejects_invalid_trees() {
        let mut tree = small_tree();
        tree.root.children.push(branch("Broken", "Broken", "exercise", vec![]));
        let err = CascadingSelector::new(Arc::new(tree)).expect_err("árbol inválido");
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn initialize_renders_only_the_root_dropdown() {
        let s = selector();
        assert_eq!(s.levels().len(), 1);
        let level = &s.levels()[0];
        assert_eq!(level.depth, 0);
        assert_eq!(level.node_key, "Course");
        assert!(level.is_dropdown());
        assert!(!level.is_submission());
    }

    #[test]
    fn teardown_drops_everything() {
        let mut s = selector();
        s.select(0, "Algo").expect("Algo");
        s.teardown();
        assert!(!s.is_initialized());
        assert!(s.selection().is_empty());
        assert_eq!(s.select(0, "Algo"), Err(SelectionError::NotInitialized));
    }
}
