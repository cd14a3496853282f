// Herramienta de línea de comandos para los menús de entrega:
// valida tablas YAML, genera el HTML de una selección y exporta el árbol.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use badass_form::data::Deployment;
use badass_form::html::form_html;
use badass_form::loader::{load_menu_file, parse_unchecked};
use badass_form::model::{MenuTree, Role};
use badass_form::selector::CascadingSelector;
use badass_form::submission::{PostedForm, decode_student, decode_teacher};
use badass_form::validate::validate;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "genform")]
#[command(about = "Check, render and export cascading submission menus")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate menu files and/or embedded deployments (all embedded ones by default)
    Check {
        /// YAML menu files
        files: Vec<PathBuf>,
        /// Embedded deployments to check
        #[arg(short, long)]
        deployment: Vec<Deployment>,
    },
    /// Print the form HTML for a selection path
    Render {
        #[command(flatten)]
        menu: MenuArgs,
        /// Keys to select from the root, e.g. `AlgoL1,Exo13,Q1`
        #[arg(short, long, value_delimiter = ',')]
        select: Vec<String>,
        /// Wrap the controls in `<form id='form'>`
        #[arg(long)]
        form: bool,
        /// Form action when `--form` is given
        #[arg(long, default_value = "/")]
        action: String,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the normalized menu tree
    Export {
        #[command(flatten)]
        menu: MenuArgs,
        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
    /// Decode posted fields (`name=value`, repeatable) the way the grading server does
    Decode {
        #[command(flatten)]
        menu: MenuArgs,
        fields: Vec<String>,
    },
}

#[derive(Args)]
struct MenuArgs {
    /// Embedded deployment
    #[arg(short, long, env = "BADASS_FORM_DEPLOYMENT")]
    deployment: Option<Deployment>,
    /// YAML menu file (takes precedence over the deployment)
    #[arg(short, long, env = "BADASS_FORM_MENU")]
    menu: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Yaml,
}

impl MenuArgs {
    fn load(&self) -> anyhow::Result<MenuTree> {
        if let Some(path) = &self.menu {
            return Ok(load_menu_file(path)?);
        }
        match self.deployment {
            Some(d) => Ok(badass_form::read_menu_for(d)?),
            None => bail!("pass --deployment or --menu (or set BADASS_FORM_DEPLOYMENT / BADASS_FORM_MENU)"),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { files, deployment } => handle_check(files, deployment)?,
        Commands::Render {
            menu,
            select,
            form,
            action,
            output,
        } => handle_render(&menu, &select, form.then_some(action.as_str()), output)?,
        Commands::Export { menu, format } => handle_export(&menu, format)?,
        Commands::Decode { menu, fields } => handle_decode(&menu, &fields)?,
    }

    Ok(())
}

fn handle_check(files: Vec<PathBuf>, mut deployments: Vec<Deployment>) -> anyhow::Result<()> {
    if files.is_empty() && deployments.is_empty() {
        deployments = Deployment::ALL.to_vec();
    }

    let mut sources = Vec::new();
    for d in deployments {
        sources.push((d.name().to_string(), d.source().to_string()));
    }
    for path in files {
        let yaml = fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        sources.push((path.display().to_string(), yaml));
    }

    let mut failed = 0;
    for (origin, yaml) in &sources {
        let tree = match parse_unchecked(yaml, origin) {
            Ok(tree) => tree,
            Err(e) => {
                println!("✗ {e}");
                failed += 1;
                continue;
            }
        };
        let issues = validate(&tree);
        if issues.is_empty() {
            println!(
                "✓ {origin}: `{}` ({} leaves, up to {} dropdowns)",
                tree.name,
                tree.leaves().len(),
                tree.height()
            );
        } else {
            println!("✗ {origin}: {} problem(s)", issues.len());
            for issue in &issues {
                println!("    {issue}");
            }
            failed += 1;
        }
    }

    if failed > 0 {
        bail!("{failed} of {} menu(s) failed validation", sources.len());
    }
    Ok(())
}

fn handle_render(
    menu: &MenuArgs,
    select: &[String],
    form_action: Option<&str>,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let tree = menu.load()?;
    let mut selector = CascadingSelector::new(Arc::new(tree))?;
    selector
        .select_path(select)
        .with_context(|| format!("cannot select {select:?}"))?;

    let body = selector.html();
    let html = match form_action {
        Some(action) => form_html("form", action, &body),
        None => body,
    };

    match output {
        Some(path) => {
            fs::write(&path, format!("{html}\n"))
                .with_context(|| format!("cannot write {}", path.display()))?;
            log::info!("wrote {}", path.display());
        }
        None => println!("{html}"),
    }
    Ok(())
}

fn handle_export(menu: &MenuArgs, format: Format) -> anyhow::Result<()> {
    let tree = menu.load()?;
    let text = match format {
        Format::Json => serde_json::to_string_pretty(&tree)?,
        Format::Yaml => serde_yaml::to_string(&tree)?,
    };
    println!("{text}");
    Ok(())
}

fn handle_decode(menu: &MenuArgs, fields: &[String]) -> anyhow::Result<()> {
    let tree = menu.load()?;
    let mut form = PostedForm::new();
    for field in fields {
        let Some((name, value)) = field.split_once('=') else {
            bail!("field `{field}` is not `name=value`");
        };
        form.push(name, value);
    }

    let json = match tree.role {
        Role::Student => serde_json::to_string_pretty(&decode_student(&tree, &form)?)?,
        Role::Teacher => serde_json::to_string_pretty(&decode_teacher(&tree, &form)?)?,
    };
    println!("{json}");
    Ok(())
}
