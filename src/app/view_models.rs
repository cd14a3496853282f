use super::*;
use crate::data::read_menu_for;
use crate::form::{Control, EXERCISE_FIELD, FUNCTION_FIELD};
use crate::html::{controls_html, form_html};
use crate::model::Role;
use crate::submission::{PostedForm, decode_student, decode_teacher};

impl PreviewApp {
    pub fn deployment_infos() -> Vec<DeploymentInfo> {
        Deployment::ALL
            .into_iter()
            .map(|deployment| match read_menu_for(deployment) {
                Ok(tree) => DeploymentInfo {
                    deployment,
                    role: Some(tree.role),
                    locale: Some(tree.locale),
                    leaves: tree.leaves().len(),
                    error: None,
                },
                Err(e) => DeploymentInfo {
                    deployment,
                    role: None,
                    locale: None,
                    leaves: 0,
                    error: Some(e.to_string()),
                },
            })
            .collect()
    }

    /// Un LevelView por desplegable pintado (los campos de envío no cuentan)
    pub fn level_views(&self) -> Vec<LevelView> {
        let Some(selector) = &self.selector else {
            return Vec::new();
        };
        selector
            .levels()
            .iter()
            .filter_map(|level| match level.controls.first() {
                Some(Control::Dropdown {
                    name,
                    placeholder,
                    options,
                    selected,
                }) => Some(LevelView {
                    level: level.depth,
                    name: name.clone(),
                    placeholder: placeholder.clone(),
                    options: options.clone(),
                    selected: selected.clone(),
                }),
                _ => None,
            })
            .collect()
    }

    /// Controles de envío de la hoja, si se llegó a una
    pub fn submission_controls(&self) -> Vec<Control> {
        self.selector
            .as_ref()
            .and_then(|s| s.levels().last())
            .filter(|l| l.is_submission())
            .map(|l| l.controls.clone())
            .unwrap_or_default()
    }

    pub fn preview_html(&self) -> String {
        let Some(selector) = &self.selector else {
            return String::new();
        };
        let body = selector
            .levels()
            .iter()
            .map(|l| controls_html(&l.controls))
            .collect::<Vec<_>>()
            .join("\n");
        if self.show_form_wrapper {
            form_html("form", "/", &format!("\n{body}\n"))
        } else {
            body
        }
    }

    /// Simula el POST de la vista actual y lo decodifica como lo haría el servidor.
    /// Rellena FUN y exercise con valores de ejemplo para que la ruta completa cuente.
    pub fn decoded_preview(&self) -> Option<String> {
        let selector = self.selector.as_ref()?;
        let desc = selector.submission()?;
        let mut form = PostedForm::from_selector(selector);
        if desc.requires_function_name {
            form.push(FUNCTION_FIELD, "main");
        }
        if let Some(first) = desc.exercises.first() {
            form.push(EXERCISE_FIELD, first.key.as_str());
        }
        let tree = selector.tree();
        let decoded = match tree.role {
            Role::Student => decode_student(tree, &form).map(|s| format!("{s:?}")),
            Role::Teacher => decode_teacher(tree, &form).map(|q| format!("{q:?}")),
        };
        Some(decoded.unwrap_or_else(|e| format!("⚠ {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_embedded_deployment_is_listed_and_ok() {
        let infos = PreviewApp::deployment_infos();
        assert_eq!(infos.len(), Deployment::ALL.len());
        assert!(infos.iter().all(DeploymentInfo::is_ok));
    }

    #[test]
    fn level_views_follow_the_cascade() {
        let mut app = PreviewApp::new();
        app.open_deployment(Deployment::OnlineStudent);
        app.choose(0, "UnixL2");
        let views = app.level_views();
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].selected.as_deref(), Some("UnixL2"));
        assert_eq!(views[1].name, "UnixL2");
        assert!(app.submission_controls().is_empty());

        app.choose(1, "Exo1");
        assert_eq!(app.level_views().len(), 2);
        assert!(app.submission_controls().last().is_some_and(Control::is_submit));
    }

    #[test]
    fn decoded_preview_round_trips_the_leaf() {
        let mut app = PreviewApp::new();
        app.open_deployment(Deployment::OnlineTeacher);
        assert!(app.decoded_preview().is_none());
        app.choose(0, "AlgoL1");
        app.choose(1, "L1_info_G1");
        let decoded = app.decoded_preview().expect("hoja alcanzada");
        assert!(decoded.contains("L1_info_G1"), "{decoded}");
        assert!(!decoded.starts_with('⚠'), "{decoded}");
    }

    #[test]
    fn preview_html_can_be_wrapped_in_form() {
        let mut app = PreviewApp::new();
        app.open_deployment(Deployment::DemoStudent);
        app.show_form_wrapper = true;
        let html = app.preview_html();
        assert!(html.starts_with("<form id='form'"));
        assert!(html.contains("<select id='Course' name='Course'>"));
    }
}
