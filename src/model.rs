use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Fr,
    En,
}

/// Par clave/etiqueta de una opción (`<option value='key'>label</option>`)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Choice {
    pub key: String,
    pub label: String,
}

/// Textos fijos del formulario para un idioma
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Labels {
    pub submit: String,
    pub source_files: String,
    pub function_name: String,
}

/// Lo que el formulario final recoge cuando se llega a una hoja.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmissionDescriptor {
    pub path: String,
    pub collects_files: bool,
    pub accepted_file_extensions: Vec<String>, // vacío = sin restricción
    pub allow_multiple_files: bool,
    pub requires_function_name: bool,
    pub allow_multiple_exercises: bool,
    pub exercises: Vec<Choice>, // vacío = sin selector de ejercicios
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_label: Option<String>,
}

impl SubmissionDescriptor {
    pub fn has_exercise_picker(&self) -> bool {
        !self.exercises.is_empty()
    }

    pub fn exercise(&self, key: &str) -> Option<&Choice> {
        self.exercises.iter().find(|c| c.key == key)
    }

    /// Etiqueta del selector de ficheros: la propia de la hoja o la del menú
    pub fn source_label_text<'a>(&'a self, labels: &'a Labels) -> &'a str {
        self.source_label.as_deref().unwrap_or(&labels.source_files)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MenuNode {
    pub key: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>, // placeholder del desplegable ("-- prompt --")
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission: Option<SubmissionDescriptor>,
}

impl MenuNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn child(&self, key: &str) -> Option<&MenuNode> {
        self.children.iter().find(|c| c.key == key)
    }

    pub fn child_keys(&self) -> Vec<&str> {
        self.children.iter().map(|c| c.key.as_str()).collect()
    }

    pub fn choices(&self) -> Vec<Choice> {
        self.children
            .iter()
            .map(|c| Choice {
                key: c.key.clone(),
                label: c.label.clone(),
            })
            .collect()
    }

    /// Baja por el árbol siguiendo `keys`, empezando por los hijos de `self`
    pub fn descend<S: AsRef<str>>(&self, keys: &[S]) -> Option<&MenuNode> {
        keys.iter()
            .try_fold(self, |node, key| node.child(key.as_ref()))
    }

    fn collect_leaves<'a>(&'a self, prefix: &mut Vec<String>, out: &mut Vec<(Vec<String>, &'a MenuNode)>) {
        for child in &self.children {
            prefix.push(child.key.clone());
            if child.is_leaf() {
                out.push((prefix.clone(), child));
            } else {
                child.collect_leaves(prefix, out);
            }
            prefix.pop();
        }
    }

    fn height(&self) -> usize {
        self.children.iter().map(|c| c.height() + 1).max().unwrap_or(0)
    }
}

/// Un menú completo: una tabla por despliegue (rol + idioma)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MenuTree {
    pub name: String,
    pub role: Role,
    pub locale: Locale,
    pub labels: Labels,
    pub root: MenuNode,
}

impl MenuTree {
    pub fn node_at<S: AsRef<str>>(&self, selection: &[S]) -> Option<&MenuNode> {
        self.root.descend(selection)
    }

    /// Todas las hojas con la ruta de claves (sin la raíz) que lleva a cada una
    pub fn leaves(&self) -> Vec<(Vec<String>, &MenuNode)> {
        let mut out = Vec::new();
        self.root.collect_leaves(&mut Vec::new(), &mut out);
        out
    }

    /// Número máximo de selecciones hasta llegar a una hoja
    pub fn height(&self) -> usize {
        self.root.height()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn leaf(key: &str, label: &str, path: &str) -> MenuNode {
        MenuNode {
            key: key.into(),
            label: label.into(),
            prompt: None,
            children: vec![],
            submission: Some(SubmissionDescriptor {
                path: path.into(),
                collects_files: true,
                accepted_file_extensions: vec![".c".into(), ".h".into()],
                allow_multiple_files: true,
                ..Default::default()
            }),
        }
    }

    pub fn branch(key: &str, label: &str, prompt: &str, children: Vec<MenuNode>) -> MenuNode {
        MenuNode {
            key: key.into(),
            label: label.into(),
            prompt: Some(prompt.into()),
            children,
            submission: None,
        }
    }

    /// Árbol pequeño: Course -> {Algo -> {Ex1, Ex2 -> {Q1, Q2}}, Unix -> {Ex1}}
    pub fn small_tree() -> MenuTree {
        MenuTree {
            name: "small".into(),
            role: Role::Student,
            locale: Locale::En,
            labels: Labels {
                submit: "Submit".into(),
                source_files: "Source file(s)".into(),
                function_name: "Function name".into(),
            },
            root: branch(
                "Course",
                "Course",
                "course",
                vec![
                    branch(
                        "Algo",
                        "Algorithms",
                        "exercise",
                        vec![
                            leaf("Ex1", "Exercise 1", "algo/ex1.bad"),
                            branch(
                                "Ex2",
                                "Exercise 2",
                                "question",
                                vec![
                                    leaf("Q1", "Question 1", "algo/ex2-1.bad"),
                                    leaf("Q2", "Question 2", "algo/ex2-2.bad"),
                                ],
                            ),
                        ],
                    ),
                    branch("Unix", "Unix", "exercise", vec![leaf("Ex1", "Exercise 1", "unix/ex1.bad")]),
                ],
            ),
        }
    }
}
