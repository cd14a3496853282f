use super::*;
use crate::model::SubmissionDescriptor;

impl CascadingSelector {
    pub fn tree(&self) -> &Arc<MenuTree> {
        &self.tree
    }

    pub fn levels(&self) -> &[RenderedLevel] {
        &self.levels
    }

    /// Claves elegidas desde la raíz
    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    /// Nodo frontera: el último alcanzado por la selección (la raíz al principio)
    pub fn frontier(&self) -> &MenuNode {
        self.tree
            .node_at(self.selection.as_slice())
            .unwrap_or(&self.tree.root)
    }

    /// Descriptor de envío, solo cuando la frontera es una hoja
    pub fn submission(&self) -> Option<&SubmissionDescriptor> {
        let node = self.frontier();
        if node.is_leaf() { node.submission.as_ref() } else { None }
    }

    pub fn is_complete(&self) -> bool {
        self.submission().is_some()
    }

    /// Etiquetas de la ruta elegida, para cabeceras y resúmenes
    pub fn breadcrumb(&self) -> Vec<&str> {
        let mut node = &self.tree.root;
        let mut out = Vec::with_capacity(self.selection.len());
        for key in &self.selection {
            match node.child(key) {
                Some(child) => {
                    out.push(child.label.as_str());
                    node = child;
                }
                None => break,
            }
        }
        out
    }

    /// Todos los controles pintados, en orden de aparición en el formulario
    pub fn controls(&self) -> impl Iterator<Item = &Control> {
        self.levels.iter().flat_map(|l| l.controls.iter())
    }

    pub fn html(&self) -> String {
        self.levels
            .iter()
            .map(|l| crate::html::controls_html(&l.controls))
            .collect()
    }
}
