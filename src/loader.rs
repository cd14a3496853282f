// src/loader.rs
//
// Lee un menú en YAML. Cada nodo puede llevar un segmento de `path` y un bloque
// `submission` parcial; las hojas heredan ambos de sus antepasados (el más
// cercano gana), de modo que las listas repetidas se escriben una sola vez.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::model::{Choice, Labels, Locale, MenuNode, MenuTree, Role, SubmissionDescriptor};
use crate::validate::validate;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawMenu {
    name: String,
    role: Role,
    locale: Locale,
    labels: Labels,
    root: RawNode,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawNode {
    key: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    prompt: Option<String>,
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    submission: RawSubmission,
    #[serde(default)]
    children: Vec<RawNode>,
}

#[derive(Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)]
struct RawSubmission {
    files: Option<bool>,
    accept: Option<Vec<String>>,
    multiple_files: Option<bool>,
    function_name: Option<bool>,
    multiple_exercises: Option<bool>,
    exercises: Option<Vec<Choice>>,
    source_label: Option<String>,
}

impl RawSubmission {
    /// `self` manda sobre lo heredado de `parent`
    fn over(&self, parent: &RawSubmission) -> RawSubmission {
        RawSubmission {
            files: self.files.or(parent.files),
            accept: self.accept.clone().or_else(|| parent.accept.clone()),
            multiple_files: self.multiple_files.or(parent.multiple_files),
            function_name: self.function_name.or(parent.function_name),
            multiple_exercises: self.multiple_exercises.or(parent.multiple_exercises),
            exercises: self.exercises.clone().or_else(|| parent.exercises.clone()),
            source_label: self.source_label.clone().or_else(|| parent.source_label.clone()),
        }
    }

    fn into_descriptor(self, path: String) -> SubmissionDescriptor {
        let mut accepted = Vec::new();
        for ext in self.accept.unwrap_or_default() {
            if !accepted.contains(&ext) {
                accepted.push(ext);
            }
        }
        SubmissionDescriptor {
            path,
            collects_files: self.files.unwrap_or(true),
            accepted_file_extensions: accepted,
            allow_multiple_files: self.multiple_files.unwrap_or(true),
            requires_function_name: self.function_name.unwrap_or(false),
            allow_multiple_exercises: self.multiple_exercises.unwrap_or(false),
            exercises: self.exercises.unwrap_or_default(),
            source_label: self.source_label,
        }
    }
}

fn join_path(segments: &[String]) -> String {
    segments
        .iter()
        .map(|s| s.trim_matches('/'))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

fn build_node(raw: RawNode, inherited: &RawSubmission, path: &mut Vec<String>) -> MenuNode {
    let settings = raw.submission.over(inherited);
    let pushed = raw.path.is_some();
    if let Some(segment) = raw.path {
        path.push(segment);
    }

    let node = if raw.children.is_empty() {
        MenuNode {
            label: raw.label.unwrap_or_else(|| raw.key.clone()),
            key: raw.key,
            prompt: raw.prompt,
            children: Vec::new(),
            submission: Some(settings.into_descriptor(join_path(path))),
        }
    } else {
        let children = raw
            .children
            .into_iter()
            .map(|child| build_node(child, &settings, path))
            .collect();
        MenuNode {
            label: raw.label.unwrap_or_else(|| raw.key.clone()),
            key: raw.key,
            prompt: raw.prompt,
            children,
            submission: None,
        }
    };

    if pushed {
        path.pop();
    }
    node
}

/// Convierte el YAML en árbol sin validar (útil para `genform check`, que
/// quiere la lista completa de problemas).
pub fn parse_unchecked(yaml: &str, origin: &str) -> Result<MenuTree, ConfigError> {
    let raw: RawMenu = serde_yaml::from_str(yaml).map_err(|source| ConfigError::Yaml {
        origin: origin.to_string(),
        source,
    })?;
    let root = build_node(raw.root, &RawSubmission::default(), &mut Vec::new());
    Ok(MenuTree {
        name: raw.name,
        role: raw.role,
        locale: raw.locale,
        labels: raw.labels,
        root,
    })
}

/// Carga y valida. Un menú con defectos no llega nunca a un selector.
pub fn parse_menu(yaml: &str, origin: &str) -> Result<MenuTree, ConfigError> {
    let tree = parse_unchecked(yaml, origin)?;
    ensure_valid(&tree)?;
    log::info!(
        "loaded menu `{}` ({:?}/{:?}, {} leaves) from {origin}",
        tree.name,
        tree.role,
        tree.locale,
        tree.leaves().len()
    );
    Ok(tree)
}

pub fn ensure_valid(tree: &MenuTree) -> Result<(), ConfigError> {
    let issues = validate(tree);
    if issues.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            name: tree.name.clone(),
            issues,
        })
    }
}

pub fn load_menu_file(path: &Path) -> Result<MenuTree, ConfigError> {
    let yaml = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_menu(&yaml, &path.display().to_string())
}
