use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use income_eda::dashboard::Dashboard;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering. The dashboard itself is
/// computed once before the window opens and never changes.
pub struct AppState {
    pub dashboard: Dashboard,

    /// File the dashboard was built from.
    pub source: PathBuf,

    /// Show text tables as raw Markdown instead of a grid.
    pub tables_as_markdown: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dashboard: Dashboard, source: PathBuf) -> Self {
        Self {
            dashboard,
            source,
            tables_as_markdown: false,
            status_message: None,
        }
    }

    /// Write the dashboard's Markdown tables and Plotly figures as JSON.
    pub fn export_figures(&mut self, path: &Path) {
        match write_figures(&self.dashboard, path) {
            Ok(()) => {
                log::info!("Exported figures to {}", path.display());
                self.status_message = Some(format!("Exported to {}", path.display()));
            }
            Err(e) => {
                log::error!("Failed to export figures: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

pub fn write_figures(dashboard: &Dashboard, path: &Path) -> Result<()> {
    let text = serde_json::to_string_pretty(&dashboard.to_figures_json())
        .context("serializing figures")?;
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))
}
