use std::path::PathBuf;

use badass_form::{Deployment, PreviewApp};
use clap::Parser;

/// Vista previa de los menús de entrega
#[derive(Parser, Debug)]
#[command(name = "badass_form_preview", version, about = "Preview cascading submission menus")]
struct Args {
    /// Embedded menu to open (online-student, online-teacher, demo-student, demo-teacher)
    #[arg(short, long, env = "BADASS_FORM_DEPLOYMENT")]
    deployment: Option<Deployment>,

    /// YAML menu file to open instead of an embedded one
    #[arg(short, long, env = "BADASS_FORM_MENU", conflicts_with = "deployment")]
    menu: Option<PathBuf>,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "BADASS · formulario de entregas",
        options,
        Box::new(move |cc| {
            let mut app = PreviewApp::from_storage(cc.storage);
            // Lo pedido por línea de comandos manda sobre lo guardado
            if let Some(path) = &args.menu {
                app.open_menu_file(path);
            } else if let Some(deployment) = args.deployment {
                app.open_deployment(deployment);
            }
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("preview window failed: {e}"))
}

#[cfg(target_arch = "wasm32")]
fn main() {}
