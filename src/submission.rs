// src/submission.rs
//
// Lado servidor del mismo contrato: a partir de los campos que llegan por POST
// se reconstruye la selección (Course -> form[Course] -> ...) y se comprueba
// contra el árbol. Cualquier incoherencia se rechaza; nunca se adivina.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::SubmissionError;
use crate::form::{Control, EXERCISE_FIELD, FUNCTION_FIELD, PATH_FIELD};
use crate::model::{MenuNode, MenuTree, Role, SubmissionDescriptor};
use crate::selector::CascadingSelector;

/// Campos de texto de un formulario enviado (un nombre puede repetirse)
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PostedForm {
    fields: BTreeMap<String, Vec<String>>,
}

impl PostedForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut form = Self::new();
        for (name, value) in pairs {
            form.push(name, value);
        }
        form
    }

    /// Lo que el navegador enviaría con la vista actual del selector
    /// (sin ficheros ni campos que rellena el usuario).
    pub fn from_selector(selector: &CascadingSelector) -> Self {
        let mut form = Self::new();
        for control in selector.controls() {
            match control {
                Control::Dropdown {
                    name,
                    selected: Some(key),
                    ..
                } => form.push(name.as_str(), key.as_str()),
                Control::Hidden { name, value } => form.push(name.as_str(), value.as_str()),
                _ => {}
            }
        }
        form
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.entry(name.into()).or_default().push(value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(|v| v.first()).map(String::as_str)
    }

    pub fn get_all(&self, name: &str) -> &[String] {
        self.fields.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StudentSubmission {
    pub selection: Vec<String>,
    pub path: String,
    pub function_name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TeacherQuery {
    pub course: String,
    pub group: String,
    pub selection: Vec<String>,
    pub exercises: Vec<String>,
}

impl TeacherQuery {
    /// Una ruta de entregas por ejercicio: la selección sin el grupo, más el ejercicio
    pub fn report_bases(&self) -> Vec<Vec<String>> {
        let prefix = &self.selection[..self.selection.len().saturating_sub(1)];
        self.exercises
            .iter()
            .map(|exercise| {
                let mut base = prefix.to_vec();
                base.push(exercise.clone());
                base
            })
            .collect()
    }
}

/// Recorre el árbol leyendo en cada desplegable el valor enviado con su nombre.
/// Devuelve las claves elegidas y la hoja a la que llevan.
pub fn selection_chain<'t>(
    tree: &'t MenuTree,
    form: &PostedForm,
) -> Result<(Vec<String>, &'t MenuNode), SubmissionError> {
    let mut node = &tree.root;
    let mut chain = Vec::new();
    while !node.is_leaf() {
        let value = form
            .get(&node.key)
            .ok_or_else(|| SubmissionError::MissingField(node.key.clone()))?;
        node = node.child(value).ok_or_else(|| SubmissionError::UnknownOption {
            field: node.key.clone(),
            value: value.to_string(),
        })?;
        chain.push(node.key.clone());
    }
    // El servidor sigue encadenando mientras el valor sea otro campo: un campo
    // con el nombre de la hoja alargaría la ruta fuera del árbol
    if let Some(extra) = form.get(&node.key) {
        return Err(SubmissionError::UnknownOption {
            field: node.key.clone(),
            value: extra.to_string(),
        });
    }
    Ok((chain, node))
}

fn leaf_descriptor<'t>(
    tree: &'t MenuTree,
    form: &PostedForm,
) -> Result<(Vec<String>, &'t SubmissionDescriptor), SubmissionError> {
    let (chain, leaf) = selection_chain(tree, form)?;
    let desc = leaf
        .submission
        .as_ref()
        .ok_or_else(|| SubmissionError::MissingField(PATH_FIELD.into()))?;
    let posted = form
        .get(PATH_FIELD)
        .ok_or_else(|| SubmissionError::MissingField(PATH_FIELD.into()))?;
    if posted != desc.path {
        return Err(SubmissionError::PathMismatch {
            posted: posted.to_string(),
            expected: desc.path.clone(),
        });
    }
    Ok((chain, desc))
}

pub fn decode_student(tree: &MenuTree, form: &PostedForm) -> Result<StudentSubmission, SubmissionError> {
    if tree.role != Role::Student {
        return Err(SubmissionError::WrongRole { expected: tree.role });
    }
    let (selection, desc) = leaf_descriptor(tree, form).inspect_err(|e| {
        log::warn!("rejected submission for `{}`: {e}", tree.name);
    })?;

    let function_name = if desc.requires_function_name {
        let name = form
            .get(FUNCTION_FIELD)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| SubmissionError::MissingField(FUNCTION_FIELD.into()))?;
        Some(name.to_string())
    } else {
        None
    };

    Ok(StudentSubmission {
        selection,
        path: desc.path.clone(),
        function_name,
    })
}

pub fn decode_teacher(tree: &MenuTree, form: &PostedForm) -> Result<TeacherQuery, SubmissionError> {
    if tree.role != Role::Teacher {
        return Err(SubmissionError::WrongRole { expected: tree.role });
    }
    let (selection, desc) = leaf_descriptor(tree, form).inspect_err(|e| {
        log::warn!("rejected teacher query for `{}`: {e}", tree.name);
    })?;

    let exercises: Vec<String> = form
        .get_all(EXERCISE_FIELD)
        .iter()
        .filter(|e| !e.is_empty())
        .cloned()
        .collect();

    if desc.has_exercise_picker() {
        if exercises.is_empty() {
            return Err(SubmissionError::MissingField(EXERCISE_FIELD.into()));
        }
        if let Some(unknown) = exercises.iter().find(|e| desc.exercise(e).is_none()) {
            return Err(SubmissionError::UnknownExercise(unknown.clone()));
        }
        if !desc.allow_multiple_exercises && exercises.len() > 1 {
            return Err(SubmissionError::TooManyExercises(exercises.len()));
        }
    }

    // La selección siempre tiene al menos un elemento: la raíz no es hoja
    let course = selection.first().cloned().unwrap_or_default();
    let group = selection.last().cloned().unwrap_or_default();
    Ok(TeacherQuery {
        course,
        group,
        exercises: if desc.has_exercise_picker() { exercises } else { Vec::new() },
        selection,
    })
}
