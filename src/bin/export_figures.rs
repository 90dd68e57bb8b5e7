//! Headless export of the dashboard as Markdown tables and Plotly figures.
//!
//! Usage: `export-figures [DATA] [OUT]`. Without `OUT` the JSON goes to stdout.

use std::path::PathBuf;

use anyhow::{Context, Result};
use income_eda::config::DashboardConfig;
use income_eda::dashboard;

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args_os().skip(1);
    let data_path = args.next().map(PathBuf::from);
    let out_path = args.next().map(PathBuf::from);

    let config = DashboardConfig::resolve(data_path).context("resolving configuration")?;
    let dashboard = dashboard::startup(&config)
        .inspect_err(|e| log::error!("Startup failed: {e}"))
        .with_context(|| format!("building dashboard from {}", config.data_path.display()))?;

    let text = serde_json::to_string_pretty(&dashboard.to_figures_json())
        .context("serializing figures")?;
    match out_path {
        Some(path) => {
            std::fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
            log::info!(
                "Wrote {} sections to {}",
                dashboard.sections.len(),
                path.display()
            );
        }
        None => println!("{text}"),
    }
    Ok(())
}
