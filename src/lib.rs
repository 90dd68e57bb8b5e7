//! Exploratory data analysis of an income-demographics table.
//!
//! The pipeline is load → summarize → shape-for-chart:
//!
//! ```no_run
//! use income_eda::{config::DashboardConfig, dashboard};
//!
//! let config = DashboardConfig::default();
//! let dashboard = dashboard::startup(&config)?;
//! println!("{}", serde_json::to_string_pretty(&dashboard.to_figures_json())?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod charts;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod error;

pub use error::{EdaError, LoadError, Result};
