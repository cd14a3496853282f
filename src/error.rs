use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Defecto de autoría encontrado al validar un menú
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigIssue {
    pub at: String, // ruta de claves desde la raíz, p.ej. "Course/AlgoL1/Exo13"
    pub kind: IssueKind,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum IssueKind {
    #[error("the menu has no entries")]
    EmptyMenu,
    #[error("empty key")]
    EmptyKey,
    #[error("key `{0}` contains whitespace")]
    KeyWithWhitespace(String),
    #[error("key `{0}` collides with a reserved form field")]
    ReservedKey(String),
    #[error("duplicate sibling key `{0}`")]
    DuplicateSibling(String),
    #[error("key `{0}` already used by an ancestor")]
    KeyRepeatsAncestor(String),
    #[error("dropdown without prompt")]
    MissingPrompt,
    #[error("prompt set but no children to choose from")]
    MissingChildren,
    #[error("leaf without submission descriptor")]
    MissingSubmission,
    #[error("submission descriptor on a node with children")]
    UnexpectedSubmission,
    #[error("template path `{0}` must be relative and stay inside the scripts tree")]
    EscapingPath(String),
    #[error("duplicate exercise `{0}` in picker")]
    DuplicateExercise(String),
    #[error("multiple exercises allowed but no exercise configured")]
    EmptyExercisePicker,
    #[error("file extension `{0}` must start with a dot")]
    BadExtension(String),
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.at, self.kind)
    }
}

fn list_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(|i| format!("  - {i}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read menu {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid YAML in {origin}: {source}")]
    Yaml {
        origin: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("menu `{name}` has {} problem(s):\n{}", .issues.len(), list_issues(.issues))]
    Invalid {
        name: String,
        issues: Vec<ConfigIssue>,
    },
    #[error("unknown deployment `{0}`")]
    UnknownDeployment(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("selector is not initialized")]
    NotInitialized,
    #[error("level {level} is not rendered ({rendered} level(s) on screen)")]
    UnknownLevel { level: usize, rendered: usize },
    #[error("level {level} shows the submission fields, not a dropdown")]
    LeafLevel { level: usize },
    #[error("`{key}` is not an option of `{parent}`")]
    InvalidSelection { parent: String, key: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("missing field `{0}`")]
    MissingField(String),
    #[error("`{value}` is not an option of `{field}`")]
    UnknownOption { field: String, value: String },
    #[error("posted path `{posted}` does not match the selected exercise (`{expected}`)")]
    PathMismatch { posted: String, expected: String },
    #[error("exercise `{0}` is not offered for this selection")]
    UnknownExercise(String),
    #[error("only one exercise can be chosen here, got {0}")]
    TooManyExercises(usize),
    #[error("this menu is for {expected:?} submissions")]
    WrongRole { expected: crate::model::Role },
}
