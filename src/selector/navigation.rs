use super::*;

impl CascadingSelector {
    /// Elige `key` en el desplegable del nivel `level`.
    ///
    /// Descarta todo lo pintado por debajo de `level` y pinta el nivel siguiente:
    /// otro desplegable o, si se llega a una hoja, los campos de envío. Si la clave
    /// no es una opción de ese desplegable la vista queda intacta.
    pub fn select(&mut self, level: usize, key: &str) -> Result<&RenderedLevel, SelectionError> {
        let node = self.node_for_level(level)?;
        if node.child(key).is_none() {
            log::warn!("rejected selection `{key}` at level {level} (`{}`)", node.key);
            return Err(SelectionError::InvalidSelection {
                parent: node.key.clone(),
                key: key.to_string(),
            });
        }

        // 1) Reset de todo lo que cuelga de este nivel
        self.selection.truncate(level);
        self.levels.truncate(level + 1);

        // 2) Marcar la opción elegida en el desplegable actual
        if let Some(Control::Dropdown { selected, .. }) = self.levels[level].controls.first_mut() {
            *selected = Some(key.to_string());
        }
        self.selection.push(key.to_string());
        log::debug!("selected {:?}", self.selection);

        // 3) Pintar el nivel siguiente
        self.render(level + 1);
        self.levels
            .last()
            .ok_or(SelectionError::UnknownLevel { level: level + 1, rendered: 0 })
    }

    /// Reproduce una secuencia de selecciones desde la raíz.
    ///
    /// Si alguna clave falla, el selector queda en la última selección válida.
    pub fn select_path<S: AsRef<str>>(&mut self, keys: &[S]) -> Result<(), SelectionError> {
        self.initialize();
        for (level, key) in keys.iter().enumerate() {
            self.select(level, key.as_ref())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::error::SelectionError;
    use crate::form::Control;
    use crate::selector::tests::selector;

    fn dropdown_keys(control: &Control) -> Vec<String> {
        match control {
            Control::Dropdown { options, .. } => options.iter().map(|o| o.key.clone()).collect(),
            other => panic!("expected dropdown, got {other:?}"),
        }
    }

    #[test]
    fn selecting_a_branch_renders_its_children_in_order() {
        let mut s = selector();
        let level = s.select(0, "Algo").expect("Algo").clone();
        assert_eq!(level.depth, 1);
        assert_eq!(dropdown_keys(&level.controls[0]), vec!["Ex1", "Ex2"]);
        assert_eq!(s.selection(), ["Algo"]);
        assert!(matches!(
            &s.levels()[0].controls[0],
            Control::Dropdown { selected: Some(k), .. } if k == "Algo"
        ));
    }

    #[test]
    fn reaching_a_leaf_renders_submission_fields_and_no_dropdown() {
        let mut s = selector();
        s.select_path(&["Algo", "Ex2", "Q1"]).expect("ruta válida");
        let last = s.levels().last().expect("nivel final");
        assert!(last.is_submission());
        assert!(!last.controls.iter().any(Control::is_dropdown));
        assert_eq!(s.submission().map(|d| d.path.as_str()), Some("algo/ex2-1.bad"));
        assert_eq!(s.levels().len(), s.selection().len() + 1);
    }

    #[test]
    fn changing_a_level_drops_everything_deeper() {
        let mut s = selector();
        s.select_path(&["Algo", "Ex2", "Q2"]).expect("ruta válida");
        assert_eq!(s.levels().len(), 4);

        s.select(0, "Unix").expect("Unix");
        assert_eq!(s.selection(), ["Unix"]);
        assert_eq!(s.levels().len(), 2);
        assert_eq!(s.levels()[1].node_key, "Unix");
        assert!(s.submission().is_none());
    }

    #[test]
    fn reselecting_the_same_value_is_idempotent() {
        let mut s = selector();
        s.select_path(&["Algo", "Ex2"]).expect("ruta válida");
        let before = s.levels().to_vec();
        s.select(1, "Ex2").expect("Ex2 otra vez");
        assert_eq!(s.levels(), before.as_slice());
        s.select(1, "Ex2").expect("y otra");
        assert_eq!(s.levels().len(), before.len());
    }

    #[test]
    fn out_of_tree_key_fails_closed() {
        let mut s = selector();
        s.select(0, "Algo").expect("Algo");
        let before = s.levels().to_vec();

        let err = s.select(1, "Ex99").expect_err("clave fuera del árbol");
        assert_eq!(
            err,
            SelectionError::InvalidSelection {
                parent: "Algo".into(),
                key: "Ex99".into()
            }
        );
        assert_eq!(s.levels(), before.as_slice());
        assert!(s.submission().is_none());
    }

    #[test]
    fn selecting_on_missing_or_leaf_levels_is_rejected() {
        let mut s = selector();
        assert_eq!(
            s.select(3, "x"),
            Err(SelectionError::UnknownLevel { level: 3, rendered: 1 })
        );
        s.select_path(&["Algo", "Ex1"]).expect("hoja");
        assert_eq!(s.select(2, "x"), Err(SelectionError::LeafLevel { level: 2 }));
    }

    #[test]
    fn select_path_stops_at_last_valid_selection() {
        let mut s = selector();
        let err = s.select_path(&["Algo", "Nope", "Q1"]).expect_err("ruta inválida");
        assert!(matches!(err, SelectionError::InvalidSelection { .. }));
        assert_eq!(s.selection(), ["Algo"]);
        assert_eq!(s.levels().len(), 2);
    }
}
