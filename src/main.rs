use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use polekit::{init_logging, Config, Editor, Session, BUILD_DATE, VERSION};
use serde::Serialize;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "polekit")]
#[command(about = "Replay a pole placement session and print the resulting poles")]
struct Cli {
    /// Config file (.json or .toml); defaults to the platform config directory
    #[arg(long)]
    config: Option<PathBuf>,

    /// Session script to replay
    session: PathBuf,

    /// Also write the final 2D view as a PNG
    #[arg(long)]
    png: Option<PathBuf>,

    /// Approve destructive steps (delete, clear all) instead of declining them
    #[arg(long)]
    yes: bool,
}

#[derive(Serialize)]
struct Output {
    poles: Vec<polekit::PoleInfo>,
    events: Vec<polekit::PlacementEvent>,
    rejected: usize,
}

fn main() -> Result<()> {
    init_logging()?;
    let cli = Cli::parse();
    info!(version = VERSION, built = BUILD_DATE, "Starting polekit");

    let config = Config::load_or_default(cli.config.as_deref()).context("Failed to load config")?;
    let options = config.editor_options().context("Invalid config")?;
    let mut editor = Editor::new(options);

    let session = Session::load(&cli.session)?;
    let approve = cli.yes;
    let mut confirm = |prompt: &str| {
        if !approve {
            warn!(prompt, "Declined (pass --yes to approve)");
        }
        approve
    };
    let report = session.replay(&mut editor, &mut confirm);

    let poles = editor
        .poles()
        .iter()
        .filter_map(|pole| editor.pole_info(pole.id))
        .collect();
    let output = Output {
        poles,
        events: report.events,
        rejected: report.rejected,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    if let Some(path) = cli.png {
        let image = editor.render().context("Cannot render the 2D view")?;
        polekit::designer::export_png(&image, &path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), "Wrote PNG");
    }

    Ok(())
}
