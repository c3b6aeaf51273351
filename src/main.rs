use std::io::IsTerminal;

use anyhow::Result;
use sys_open::OpenOptions;
#[allow(unused)]
use tracing::{debug, error, info, trace, warn};

mod config;

fn setup_logging(config: &config::Config) {
    use tracing_subscriber::prelude::*;
    let filter = tracing_subscriber::filter::targets::Targets::default()
        .with_targets(vec![
            ("tokio", tracing::Level::WARN),
            ("runtime", tracing::Level::WARN),
        ])
        .with_default(config.log_level);

    let ansi_colors_enabled = !cfg!(windows) && std::io::stdout().is_terminal();
    let format = tracing_subscriber::fmt::layer()
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .with_ansi(ansi_colors_enabled);

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = config::parse_args();
    let config = config::app_config();

    setup_logging(config);

    let mut options = OpenOptions::new()
        .wait(config.wait)
        .background(config.background)
        .url(config.url);
    if let Some(app) = &config.app {
        options = options
            .app(app.as_str())
            .app_args(config.app_args.iter().cloned());
    }

    let child = options.open(&config.target).await?;
    if let Some(pid) = child.id() {
        debug!("opener running with pid {pid}");
    }
    Ok(())
}
