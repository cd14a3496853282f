// src/data.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::loader::parse_menu;
use crate::model::MenuTree;

/// Menús embebidos en el binario, uno por despliegue
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Deployment {
    OnlineStudent,
    OnlineTeacher,
    DemoStudent,
    DemoTeacher,
}

impl Deployment {
    pub const ALL: [Deployment; 4] = [
        Deployment::OnlineStudent,
        Deployment::OnlineTeacher,
        Deployment::DemoStudent,
        Deployment::DemoTeacher,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Deployment::OnlineStudent => "online-student",
            Deployment::OnlineTeacher => "online-teacher",
            Deployment::DemoStudent => "demo-student",
            Deployment::DemoTeacher => "demo-teacher",
        }
    }

    /// YAML embebido tal cual
    pub fn source(self) -> &'static str {
        match self {
            Deployment::OnlineStudent => include_str!("data/online_student.yaml"),
            Deployment::OnlineTeacher => include_str!("data/online_teacher.yaml"),
            Deployment::DemoStudent => include_str!("data/demo_student.yaml"),
            Deployment::DemoTeacher => include_str!("data/demo_teacher.yaml"),
        }
    }
}

impl fmt::Display for Deployment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Deployment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Deployment::ALL
            .into_iter()
            .find(|d| d.name() == s)
            .ok_or_else(|| ConfigError::UnknownDeployment(s.to_string()))
    }
}

/// Carga el menú embebido de un despliegue
pub fn read_menu_for(deployment: Deployment) -> Result<MenuTree, ConfigError> {
    parse_menu(deployment.source(), deployment.name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{Control, controls_for};
    use crate::model::{MenuNode, Role};
    use crate::selector::CascadingSelector;
    use std::sync::Arc;

    fn open(deployment: Deployment) -> CascadingSelector {
        let tree = read_menu_for(deployment).expect("menú embebido válido");
        let mut s = CascadingSelector::new(Arc::new(tree)).expect("selector");
        s.initialize();
        s
    }

    #[test]
    fn every_embedded_menu_loads_and_validates() {
        for d in Deployment::ALL {
            let tree = read_menu_for(d).unwrap_or_else(|e| panic!("{d}: {e}"));
            assert_eq!(tree.name, d.name());
            assert!(!tree.leaves().is_empty());
        }
    }

    #[test]
    fn names_round_trip() {
        for d in Deployment::ALL {
            assert_eq!(d.name().parse::<Deployment>().expect("nombre conocido"), d);
        }
        assert!(matches!(
            "nope".parse::<Deployment>(),
            Err(ConfigError::UnknownDeployment(_))
        ));
    }

    #[test]
    fn teacher_group_shows_multi_exercise_picker_with_empty_path() {
        let mut s = open(Deployment::OnlineTeacher);
        assert_eq!(s.tree().role, Role::Teacher);
        s.select(0, "AlgoL1").expect("AlgoL1");
        let level = s.select(1, "L1_info_G1").expect("grupo").clone();

        let expected: Vec<String> = (1..=13).map(|i| format!("Exo{i}")).collect();
        let mut saw_picker = false;
        for control in &level.controls {
            match control {
                Control::Hidden { name, value } => {
                    assert_eq!(name, "path");
                    assert!(value.is_empty());
                }
                Control::ExercisePicker {
                    multiple, options, ..
                } => {
                    assert!(*multiple);
                    let keys: Vec<String> = options.iter().map(|o| o.key.clone()).collect();
                    assert_eq!(keys, expected);
                    saw_picker = true;
                }
                Control::Submit { text } => assert_eq!(text, "Envoyer"),
                other => panic!("unexpected control {other:?}"),
            }
        }
        assert!(saw_picker);
        assert!(level.controls.last().is_some_and(Control::is_submit));
    }

    #[test]
    fn student_exo13_question_asks_for_function_name() {
        let mut s = open(Deployment::OnlineStudent);
        s.select_path(&["AlgoL1", "Exo13", "Q1"]).expect("ruta válida");
        let html = crate::html::controls_html(&s.levels().last().expect("hoja").controls);
        assert_eq!(
            html,
            "<input type='hidden' name='path' value='L1/algo/exo13-1.bad'>\
             <label for='source'>Fichier(s) source(s)</label>\
             <input type='file' name='source' multiple='' accept='.c,.h'>\
             <label for='FUN'>Nom de la fonction</label>\
             <input name='FUN' type='text'>\
             <input type='submit' value='Envoyer'>"
        );
    }

    #[test]
    fn student_menu_matches_portal_layout() {
        let mut s = open(Deployment::OnlineStudent);
        let level = s.select(0, "AlgoL1").expect("AlgoL1").clone();
        match &level.controls[0] {
            Control::Dropdown {
                placeholder, options, ..
            } => {
                assert_eq!(placeholder, "-- exercice --");
                assert_eq!(options.len(), 13);
                assert_eq!(options[0].key, "Exo1");
                assert_eq!(options[12].key, "Exo13");
            }
            other => panic!("expected dropdown, got {other:?}"),
        }

        s.select(1, "Exo7").expect("Exo7");
        assert_eq!(s.submission().map(|d| d.path.as_str()), Some("L1/algo/exo07.bad"));

        s.select_path(&["UnixL2", "Exo1"]).expect("Unix");
        let desc = s.submission().expect("hoja");
        assert_eq!(desc.path, "L2/Unix/exo01.bad");
        assert!(desc.accepted_file_extensions.is_empty());
    }

    #[test]
    fn demo_teacher_picker_is_single_select_with_factorial_first() {
        let mut s = open(Deployment::DemoTeacher);
        s.select_path(&["AlgoL1", "L1_DLME"]).expect("ruta válida");
        let desc = s.submission().expect("hoja");
        assert!(!desc.allow_multiple_exercises);
        assert!(!desc.collects_files);
        assert_eq!(desc.exercises[0].key, "Test");
        assert_eq!(desc.exercises.len(), 14);

        s.select_path(&["UnixL2", "G2"]).expect("Unix G2");
        let controls = &s.levels().last().expect("hoja").controls;
        assert_eq!(controls.len(), 2);
        assert!(controls[1].is_submit());
    }

    #[test]
    fn demo_student_reaches_factorial_template() {
        let mut s = open(Deployment::DemoStudent);
        s.select_path(&["MyCourse", "Test"]).expect("ruta válida");
        assert_eq!(s.submission().map(|d| d.path.as_str()), Some("scripts/cprog/fact.bad"));
    }

    fn check_rendering(node: &MenuNode, labels: &crate::model::Labels, at: &str) {
        let controls = controls_for(node, labels);
        if node.is_leaf() {
            assert!(!controls.iter().any(Control::is_dropdown), "{at}");
            assert!(controls.last().is_some_and(Control::is_submit), "{at}");
            assert_eq!(controls.iter().filter(|c| c.is_submit()).count(), 1, "{at}");
        } else {
            match controls.as_slice() {
                [Control::Dropdown { options, selected, .. }] => {
                    let keys: Vec<&str> = options.iter().map(|o| o.key.as_str()).collect();
                    assert_eq!(keys, node.child_keys(), "{at}");
                    assert!(selected.is_none(), "{at}");
                }
                other => panic!("{at}: expected a single dropdown, got {other:?}"),
            }
        }
        for child in &node.children {
            check_rendering(child, labels, &format!("{at}/{}", child.key));
        }
    }

    #[test]
    fn every_node_of_every_menu_renders_per_its_kind() {
        for d in Deployment::ALL {
            let tree = read_menu_for(d).expect("menú embebido válido");
            check_rendering(&tree.root, &tree.labels, &format!("{d}:{}", tree.root.key));
        }
    }
}
