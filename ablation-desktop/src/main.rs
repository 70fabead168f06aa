//! # Stacked Ablation Desktop
//!
//! Native desktop application and headless script runner.

use std::path::Path;

use ablation_desktop::{load_script, run_script, AblationDesktopApp, CliArgs, DesktopConfig};
use ablation_renderer::export::save_png;
use ablation_renderer::Renderer;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "ablation_desktop=debug,ablation_core=info,ablation_renderer=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse CLI arguments
    let args = CliArgs::parse();
    let config = DesktopConfig::from(args);

    tracing::info!(
        size = config.surface_size,
        mode = ?config.mode,
        incremental = config.incremental,
        "Starting Stacked Ablation"
    );

    if let Some(script) = config.script.clone() {
        return run_headless(&config, &script);
    }

    let mut app = AblationDesktopApp::new(config)?;
    app.run()?;

    tracing::info!("Stacked Ablation exited");
    Ok(())
}

/// Replay a script against the start mode's engine and optionally export
/// the final frame.
fn run_headless(config: &DesktopConfig, script: &Path) -> anyhow::Result<()> {
    let intents = load_script(script)?;
    let mut session = config.session()?;
    let engine = session.current_mut();

    let report = run_script(engine, &intents);
    tracing::info!(
        applied = report.applied,
        changed = report.changed,
        skipped = report.skipped,
        shapes = engine.shapes().len(),
        "Script finished"
    );

    let mut renderer = Renderer::new(config.renderer_config(), config.surface_size);
    renderer.render(engine)?;

    let stats = engine.cache_stats();
    tracing::info!(
        full = stats.full_recomputes,
        incremental = stats.incremental_updates,
        backgrounds = stats.background_builds,
        hits = stats.cache_hits,
        lit = engine.region().lit_count(),
        "Final frame"
    );

    match &config.export {
        Some(path) => save_png(renderer.surface(), path)?,
        None => tracing::info!("No --export path given, frame not saved"),
    }
    Ok(())
}
