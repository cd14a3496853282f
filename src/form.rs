// src/form.rs

use serde::Serialize;

use crate::model::{Choice, Labels, MenuNode, SubmissionDescriptor};

pub const PATH_FIELD: &str = "path";
pub const SOURCE_FIELD: &str = "source";
pub const FUNCTION_FIELD: &str = "FUN";
pub const EXERCISE_FIELD: &str = "exercise";

/// Nombres de campo que el backend lee directamente (los del formulario y los
/// de la página de acceso); ninguna clave del menú puede usarlos
pub const RESERVED_FIELDS: &[&str] = &[
    PATH_FIELD,
    SOURCE_FIELD,
    FUNCTION_FIELD,
    EXERCISE_FIELD,
    "student",
    "consent",
    "login",
    "password",
];

/// Un control del formulario, independiente de cómo se pinte (HTML, egui, DOM)
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Control {
    Dropdown {
        name: String,
        placeholder: String,
        options: Vec<Choice>,
        selected: Option<String>,
    },
    Hidden {
        name: String,
        value: String,
    },
    Label {
        target: String,
        text: String,
    },
    FileInput {
        name: String,
        accept: Vec<String>,
        multiple: bool,
    },
    TextInput {
        name: String,
    },
    ExercisePicker {
        name: String,
        multiple: bool,
        options: Vec<Choice>,
    },
    Submit {
        text: String,
    },
}

impl Control {
    pub fn is_dropdown(&self) -> bool {
        matches!(self, Control::Dropdown { .. })
    }

    pub fn is_submit(&self) -> bool {
        matches!(self, Control::Submit { .. })
    }
}

/// Controles de un nodo: un desplegable si tiene hijos, los campos de envío si es hoja.
pub fn controls_for(node: &MenuNode, labels: &Labels) -> Vec<Control> {
    if !node.is_leaf() {
        return vec![dropdown_for(node)];
    }
    match &node.submission {
        Some(desc) => submission_controls(desc, labels),
        None => {
            // Un árbol validado nunca llega aquí; no se pinta botón de envío
            log::error!("leaf `{}` has no submission descriptor", node.key);
            Vec::new()
        }
    }
}

pub fn dropdown_for(node: &MenuNode) -> Control {
    Control::Dropdown {
        name: node.key.clone(),
        placeholder: format!("-- {} --", node.prompt.as_deref().unwrap_or_default()),
        options: node.choices(),
        selected: None,
    }
}

pub fn submission_controls(desc: &SubmissionDescriptor, labels: &Labels) -> Vec<Control> {
    let mut controls = vec![Control::Hidden {
        name: PATH_FIELD.into(),
        value: desc.path.clone(),
    }];

    if desc.collects_files {
        controls.push(Control::Label {
            target: SOURCE_FIELD.into(),
            text: desc.source_label_text(labels).to_string(),
        });
        controls.push(Control::FileInput {
            name: SOURCE_FIELD.into(),
            accept: desc.accepted_file_extensions.clone(),
            multiple: desc.allow_multiple_files,
        });
    }

    if desc.requires_function_name {
        controls.push(Control::Label {
            target: FUNCTION_FIELD.into(),
            text: labels.function_name.clone(),
        });
        controls.push(Control::TextInput {
            name: FUNCTION_FIELD.into(),
        });
    }

    if desc.has_exercise_picker() {
        controls.push(Control::ExercisePicker {
            name: EXERCISE_FIELD.into(),
            multiple: desc.allow_multiple_exercises,
            options: desc.exercises.clone(),
        });
    }

    controls.push(Control::Submit {
        text: labels.submit.clone(),
    });
    controls
}
