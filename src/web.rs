// src/web.rs
//
// Componente de navegador: se monta sobre un <form> existente y mantiene un
// <div data-level='i'> por nivel de la cascada. Cambiar un desplegable borra
// los divs siguientes (y sus listeners) y añade el del nivel nuevo.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, HtmlSelectElement};

use crate::data::{Deployment, read_menu_for};
use crate::html::controls_html;
use crate::selector::CascadingSelector;

type ChangeHandler = Closure<dyn FnMut(Event)>;

struct Mounted {
    selector: CascadingSelector,
    document: Document,
    form: Element,
    containers: Vec<Element>,
    handlers: Vec<Option<ChangeHandler>>, // uno por nivel; None en la hoja
}

#[wasm_bindgen]
pub struct FormMount {
    inner: Rc<RefCell<Mounted>>,
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
impl FormMount {
    /// Monta el menú `deployment` (p.ej. "online-student") en el formulario `form_id`
    pub fn mount(form_id: &str, deployment: &str) -> Result<FormMount, JsValue> {
        let deployment: Deployment = deployment.parse().map_err(js_err)?;
        let tree = read_menu_for(deployment).map_err(js_err)?;
        let selector = CascadingSelector::new(Arc::new(tree)).map_err(js_err)?;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let form = document
            .get_element_by_id(form_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element #{form_id}")))?;

        let inner = Rc::new(RefCell::new(Mounted {
            selector,
            document,
            form,
            containers: Vec::new(),
            handlers: Vec::new(),
        }));

        let mount = FormMount { inner };
        mount.initialize()?;
        log::info!("mounted `{deployment}` on #{form_id}");
        Ok(mount)
    }

    /// Pinta de nuevo solo el desplegable raíz (también tras `teardown`)
    pub fn initialize(&self) -> Result<(), JsValue> {
        let mut mounted = self.inner.borrow_mut();
        mounted.selector.initialize();
        mounted.render_from(0, Rc::downgrade(&self.inner))
    }

    /// Quita todos los niveles del DOM y suelta los listeners
    pub fn teardown(&self) {
        let mut mounted = self.inner.borrow_mut();
        mounted.clear_from(0);
        mounted.selector.teardown();
    }

    /// Claves elegidas, separadas por '/'
    pub fn selection(&self) -> String {
        self.inner.borrow().selector.selection().join("/")
    }
}

// Si JS suelta el handle sin llamar a `teardown`, los listeners no pueden
// sobrevivir a sus closures
impl Drop for Mounted {
    fn drop(&mut self) {
        self.clear_from(0);
    }
}

impl Mounted {
    fn clear_from(&mut self, level: usize) {
        for container in self.containers.drain(level.min(self.containers.len())..) {
            container.remove();
        }
        self.handlers.truncate(level);
    }

    /// Pinta en el DOM los niveles del selector a partir de `from`
    fn render_from(&mut self, from: usize, this: Weak<RefCell<Mounted>>) -> Result<(), JsValue> {
        self.clear_from(from);
        for level in &self.selector.levels()[from..] {
            let div = self.document.create_element("div")?;
            div.set_attribute("data-level", &level.depth.to_string())?;
            div.set_inner_html(&controls_html(&level.controls));
            self.form.append_child(&div)?;

            let handler = if level.is_dropdown() {
                let select = div
                    .query_selector("select")?
                    .ok_or_else(|| JsValue::from_str("dropdown without <select>"))?;
                Some(on_change(&select, level.depth, this.clone())?)
            } else {
                None
            };
            self.containers.push(div);
            self.handlers.push(handler);
        }
        Ok(())
    }
}

fn on_change(
    select: &Element,
    level: usize,
    weak: Weak<RefCell<Mounted>>,
) -> Result<ChangeHandler, JsValue> {
    let handler = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        let Some(select) = event
            .target()
            .and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())
        else {
            return;
        };
        let key = select.value();
        let mut mounted = inner.borrow_mut();
        let result = mounted.selector.select(level, &key).map(|_| ());
        match result {
            Ok(()) => {
                if let Err(e) = mounted.render_from(level + 1, weak.clone()) {
                    log::error!("render failed after selecting `{key}`: {e:?}");
                }
            }
            Err(e) => {
                // La vista no cambia: se deshace también el valor del <select>
                log::warn!("{e}");
                let previous = mounted.selector.selection().get(level).cloned().unwrap_or_default();
                select.set_value(&previous);
            }
        }
    });
    select.add_event_listener_with_callback("change", handler.as_ref().unchecked_ref())?;
    Ok(handler)
}
