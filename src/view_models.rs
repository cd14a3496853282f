// src/view_models.rs

use crate::data::Deployment;
use crate::model::{Choice, Locale, Role};

/// Un desplegable de la cascada, listo para pintarse con un ComboBox
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelView {
    pub level: usize,
    pub name: String,        // nombre del campo (clave del nodo)
    pub placeholder: String, // "-- prompt --"
    pub options: Vec<Choice>,
    pub selected: Option<String>,
}

/// Resumen de un menú embebido para la pantalla inicial
#[derive(Clone, Debug)]
pub struct DeploymentInfo {
    pub deployment: Deployment,
    pub role: Option<Role>,
    pub locale: Option<Locale>,
    pub leaves: usize,
    pub error: Option<String>,
}

impl LevelView {
    pub fn selected_text(&self) -> String {
        self.selected
            .as_deref()
            .and_then(|key| self.options.iter().find(|o| o.key == key))
            .map(|o| o.label.clone())
            .unwrap_or_else(|| self.placeholder.clone())
    }
}

impl DeploymentInfo {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn label(&self) -> String {
        match (self.role, self.locale) {
            (Some(role), Some(locale)) => {
                let role = match role {
                    Role::Student => "alumnos",
                    Role::Teacher => "profesores",
                };
                let locale = match locale {
                    Locale::Fr => "fr",
                    Locale::En => "en",
                };
                format!("{} ({role}, {locale}) · {} hojas", self.deployment, self.leaves)
            }
            _ => format!("{} ⚠", self.deployment),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selected_text_falls_back_to_placeholder() {
        let mut view = LevelView {
            level: 0,
            name: "Course".into(),
            placeholder: "-- cours --".into(),
            options: vec![Choice {
                key: "AlgoL1".into(),
                label: "L1 / Algorithmique en C".into(),
            }],
            selected: None,
        };
        assert_eq!(view.selected_text(), "-- cours --");
        view.selected = Some("AlgoL1".into());
        assert_eq!(view.selected_text(), "L1 / Algorithmique en C");
    }

    #[test]
    fn broken_deployment_is_flagged_in_label() {
        let info = DeploymentInfo {
            deployment: Deployment::DemoStudent,
            role: None,
            locale: None,
            leaves: 0,
            error: Some("boom".into()),
        };
        assert!(!info.is_ok());
        assert_eq!(info.label(), "demo-student ⚠");
    }
}
