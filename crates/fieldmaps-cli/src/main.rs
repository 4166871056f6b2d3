//! Field Maps CLI Application
//!
//! Command-line interface for marking map locations and exporting them as a
//! printable multi-page PDF.

mod args;
mod cli;
mod renderer;

use std::time::Duration;

use anyhow::{Context, Result};
use args::Args;
use clap::Parser;
use cli::Cli;
use fieldmaps_core::{
    capture::SchematicRasterizer, map::HeadlessMap, FieldMapsBuilder, Session, Settings,
};
use log::info;
use renderer::TerminalRenderer;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        session_file,
        no_color,
        settle_ms,
        viewport,
        command,
    } = Args::parse();

    let session_path = match session_file {
        Some(path) => path,
        None => Session::default_path().context("Failed to resolve session file path")?,
    };
    let session = Session::load(&session_path).with_context(|| {
        format!("Failed to load session from {}", session_path.display())
    })?;

    let mut settings = Settings::default();
    if let Some(ms) = settle_ms {
        settings = settings.with_settle_delay(Duration::from_millis(ms));
    }

    let map = HeadlessMap::new(session.view, viewport.into());
    let app = FieldMapsBuilder::new(map, SchematicRasterizer)
        .with_settings(settings)
        .with_session(session)
        .build()
        .context("Failed to initialize field maps")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!(
        "Field maps started with session {} ({viewport} viewport)",
        session_path.display()
    );

    Cli::new(app, renderer, session_path).run(command).await
}
