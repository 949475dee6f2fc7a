use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use movie_recs::{
    app::{App, Timing},
    config::Config,
    db::{FileStore, ThemeStore},
    services::{BackendProvider, SynthesizedDetailProvider},
    ui::{self, Input},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so the rendered view owns stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("movie_recs=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    tracing::info!(backend = %config.backend_base_url, "Configuration loaded");

    let backend = BackendProvider::from_config(&config)?;
    match backend.health().await {
        Ok(health) => tracing::info!(
            status = %health.status,
            movies = health.movies_count,
            "Recommendation backend reachable"
        ),
        Err(e) => tracing::warn!(error = %e, "Recommendation backend health check failed"),
    }

    let themes = ThemeStore::new(Arc::new(FileStore::new(config.preferences_path.clone())));
    let app = App::new(
        Arc::new(backend),
        Arc::new(SynthesizedDetailProvider::new(config.detail_latency())),
        themes,
        Timing::from(&config),
    );
    let (handle, app_task) = app.start();

    // Redraw on every view change
    let mut view = handle.subscribe();
    let renderer = tokio::spawn(async move {
        println!("{}", ui::render(&view.borrow_and_update()));
        while view.changed().await.is_ok() {
            let frame = ui::render(&view.borrow_and_update());
            println!("{}", frame);
        }
    });

    println!("{}", ui::HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match ui::parse_input(&line) {
            Input::Command(command) => handle.send(command)?,
            Input::Help => println!("{}", ui::HELP),
            Input::Quit => break,
            Input::Unknown(text) => println!("Unknown command: {} (try /help)", text),
        }
    }

    drop(handle);
    app_task.await?;
    renderer.abort();

    Ok(())
}
