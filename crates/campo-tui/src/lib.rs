//! campo TUI: ratatui dashboard shell.

pub mod app;
pub mod commands;
pub mod event;
pub mod theme;
pub mod widgets;

use std::path::PathBuf;

use campo_core::{config::Config, Store};

pub use app::App;

/// Start the dashboard, optionally loading `file` first with the configured
/// load policy.
pub fn run(config: Config, file: Option<PathBuf>) -> anyhow::Result<()> {
    let theme = theme::Theme::by_name(&config.ui.theme).unwrap_or_else(|| {
        tracing::warn!(theme = %config.ui.theme, "unknown theme, using default");
        theme::Theme::load_default()
    });
    let policy = config.ingest.load_policy;

    let mut app = App::new(Store::new(), config, theme);
    if let Some(path) = file {
        app.state_mut().load(&path, policy);
    }
    app.run()
}
