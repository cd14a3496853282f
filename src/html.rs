// src/html.rs
//
// Marcado HTML de los controles, con la misma forma que los formularios
// que ya sirve el portal (atributos entre comillas simples).

use crate::form::Control;
use crate::model::Choice;

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn options_html(options: &[Choice], selected: Option<&str>) -> String {
    options
        .iter()
        .map(|o| {
            let sel = if selected == Some(o.key.as_str()) { " selected" } else { "" };
            format!("<option value='{}'{sel}>{}</option>", escape(&o.key), escape(&o.label))
        })
        .collect()
}

pub fn control_html(control: &Control) -> String {
    match control {
        Control::Dropdown {
            name,
            placeholder,
            options,
            selected,
        } => {
            let name = escape(name);
            let placeholder_sel = if selected.is_none() { " selected" } else { "" };
            format!(
                "<select id='{name}' name='{name}'><option disabled{placeholder_sel} value>{}</option>{}</select>",
                escape(placeholder),
                options_html(options, selected.as_deref()),
            )
        }
        Control::Hidden { name, value } => {
            format!("<input type='hidden' name='{}' value='{}'>", escape(name), escape(value))
        }
        Control::Label { target, text } => {
            format!("<label for='{}'>{}</label>", escape(target), escape(text))
        }
        Control::FileInput {
            name,
            accept,
            multiple,
        } => {
            let mut html = format!("<input type='file' name='{}'", escape(name));
            if *multiple {
                html.push_str(" multiple=''");
            }
            if !accept.is_empty() {
                html.push_str(&format!(" accept='{}'", escape(&accept.join(","))));
            }
            html.push('>');
            html
        }
        Control::TextInput { name } => format!("<input name='{}' type='text'>", escape(name)),
        Control::ExercisePicker {
            name,
            multiple,
            options,
        } => {
            let multiple = if *multiple { "multiple='' " } else { "" };
            format!(
                "<select {multiple}name='{}'>{}</select>",
                escape(name),
                options_html(options, None)
            )
        }
        Control::Submit { text } => format!("<input type='submit' value='{}'>", escape(text)),
    }
}

pub fn controls_html(controls: &[Control]) -> String {
    controls.iter().map(control_html).collect()
}

/// Formulario completo listo para enviarse por POST multipart
pub fn form_html(id: &str, action: &str, body: &str) -> String {
    format!(
        "<form id='{}' action='{}' method='post' enctype='multipart/form-data'>{body}</form>",
        escape(id),
        escape(action)
    )
}
