// src/validate.rs
//
// Pasada de validación sobre un menú ya construido. Recoge *todos* los
// problemas en vez de parar en el primero, para que quien edita el YAML
// los vea de una vez.

use std::collections::HashSet;

use crate::error::{ConfigIssue, IssueKind};
use crate::form::RESERVED_FIELDS;
use crate::model::{MenuNode, MenuTree};

pub fn validate(tree: &MenuTree) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();
    if tree.root.children.is_empty() {
        issues.push(ConfigIssue {
            at: tree.root.key.clone(),
            kind: IssueKind::EmptyMenu,
        });
        return issues;
    }
    let mut ancestors = Vec::new();
    check_node(&tree.root, &mut ancestors, &mut issues);
    issues
}

fn check_node<'a>(node: &'a MenuNode, ancestors: &mut Vec<&'a str>, issues: &mut Vec<ConfigIssue>) {
    ancestors.push(node.key.as_str());
    let at = ancestors.join("/");
    let mut push = |kind: IssueKind| {
        issues.push(ConfigIssue {
            at: at.clone(),
            kind,
        })
    };

    // Clave
    if node.key.is_empty() {
        push(IssueKind::EmptyKey);
    } else if node.key.chars().any(char::is_whitespace) {
        push(IssueKind::KeyWithWhitespace(node.key.clone()));
    }
    if RESERVED_FIELDS.contains(&node.key.as_str()) {
        push(IssueKind::ReservedKey(node.key.clone()));
    }
    if ancestors[..ancestors.len() - 1].contains(&node.key.as_str()) {
        push(IssueKind::KeyRepeatsAncestor(node.key.clone()));
    }

    if node.is_leaf() {
        if node.prompt.is_some() {
            push(IssueKind::MissingChildren);
        }
        match &node.submission {
            None => push(IssueKind::MissingSubmission),
            Some(desc) => {
                if escapes_scripts_tree(&desc.path) {
                    push(IssueKind::EscapingPath(desc.path.clone()));
                }
                for ext in &desc.accepted_file_extensions {
                    if !ext.starts_with('.') || ext.len() < 2 {
                        push(IssueKind::BadExtension(ext.clone()));
                    }
                }
                let mut seen = HashSet::new();
                for ex in &desc.exercises {
                    if !seen.insert(ex.key.as_str()) {
                        push(IssueKind::DuplicateExercise(ex.key.clone()));
                    }
                }
                if desc.allow_multiple_exercises && desc.exercises.is_empty() {
                    push(IssueKind::EmptyExercisePicker);
                }
            }
        }
    } else {
        if node.prompt.as_deref().map_or(true, |p| p.trim().is_empty()) {
            push(IssueKind::MissingPrompt);
        }
        if node.submission.is_some() {
            push(IssueKind::UnexpectedSubmission);
        }
        let mut seen = HashSet::new();
        for key in node.child_keys() {
            if !seen.insert(key) {
                push(IssueKind::DuplicateSibling(key.to_string()));
            }
        }
    }

    for child in &node.children {
        check_node(child, ancestors, issues);
    }
    ancestors.pop();
}

fn escapes_scripts_tree(path: &str) -> bool {
    path.starts_with('/') || path.contains('\\') || path.split('/').any(|seg| seg == "..")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::{branch, leaf, small_tree};
    use crate::model::Choice;

    fn kinds(tree: &MenuTree) -> Vec<(String, IssueKind)> {
        validate(tree).into_iter().map(|i| (i.at, i.kind)).collect()
    }

    #[test]
    fn small_tree_is_clean() {
        assert!(validate(&small_tree()).is_empty());
    }

    #[test]
    fn duplicate_siblings_and_repeated_ancestor_keys_are_reported() {
        let mut tree = small_tree();
        tree.root.children[1].children.push(leaf("Ex1", "again", "unix/again.bad"));
        tree.root.children[0].children[1].children[0].key = "Algo".into();

        let found = kinds(&tree);
        assert!(found.contains(&("Course/Unix".into(), IssueKind::DuplicateSibling("Ex1".into()))));
        assert!(found.contains(&(
            "Course/Algo/Ex2/Algo".into(),
            IssueKind::KeyRepeatsAncestor("Algo".into())
        )));
    }

    #[test]
    fn prompt_without_children_is_a_missing_child_tree() {
        let mut tree = small_tree();
        tree.root.children[1] = branch("Unix", "Unix", "exercise", vec![]);
        let found = kinds(&tree);
        assert!(found.contains(&("Course/Unix".into(), IssueKind::MissingChildren)));
        assert!(found.contains(&("Course/Unix".into(), IssueKind::MissingSubmission)));
    }

    #[test]
    fn reserved_keys_and_bad_descriptors_are_reported() {
        let mut tree = small_tree();
        let mut bad = leaf("path", "Path", "../etc/passwd");
        if let Some(desc) = bad.submission.as_mut() {
            desc.accepted_file_extensions = vec!["c".into()];
            desc.allow_multiple_exercises = true;
        }
        tree.root.children[1].children.push(bad);

        let found: Vec<IssueKind> = validate(&tree).into_iter().map(|i| i.kind).collect();
        assert!(found.contains(&IssueKind::ReservedKey("path".into())));
        assert!(found.contains(&IssueKind::EscapingPath("../etc/passwd".into())));
        assert!(found.contains(&IssueKind::BadExtension("c".into())));
        assert!(found.contains(&IssueKind::EmptyExercisePicker));
    }

    #[test]
    fn login_page_field_names_are_reserved_too() {
        let mut tree = small_tree();
        for name in ["student", "consent", "login", "password"] {
            tree.root.children[1].children.push(leaf(name, name, "unix/x.bad"));
        }
        let found: Vec<IssueKind> = validate(&tree).into_iter().map(|i| i.kind).collect();
        for name in ["student", "consent", "login", "password"] {
            assert!(found.contains(&IssueKind::ReservedKey(name.into())), "{name}");
        }
    }

    #[test]
    fn duplicate_exercises_in_picker() {
        let mut tree = small_tree();
        if let Some(desc) = tree.root.children[0].children[0].submission.as_mut() {
            let exo = Choice {
                key: "Exo1".into(),
                label: "Exercise 1".into(),
            };
            desc.exercises = vec![exo.clone(), exo];
        }
        assert_eq!(
            kinds(&tree),
            vec![("Course/Algo/Ex1".into(), IssueKind::DuplicateExercise("Exo1".into()))]
        );
    }

    #[test]
    fn empty_menu_stops_early() {
        let mut tree = small_tree();
        tree.root.children.clear();
        assert_eq!(kinds(&tree), vec![("Course".into(), IssueKind::EmptyMenu)]);
    }
}
