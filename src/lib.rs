pub mod app;
pub mod data;
pub mod error;
pub mod form;
pub mod html;
pub mod loader;
pub mod model;
pub mod selector;
pub mod submission;
pub mod ui;
pub mod validate;
pub mod view_models;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use app::PreviewApp;
pub use data::{Deployment, read_menu_for};
pub use selector::CascadingSelector;
