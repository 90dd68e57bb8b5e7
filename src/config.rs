//! Dashboard configuration.
//!
//! Every field has a default, so an absent or partial JSON file is fine:
//!
//! ```json
//! {
//!   "data_path": "income_demographics.csv",
//!   "load": { "delimiter": ",", "trim_whitespace": false, "extra_na_values": ["?"] },
//!   "summary": { "preview_rows": 5, "percentile": "linear" },
//!   "charts": { "missing": "as_category" }
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{EdaError, Result};

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV: &str = "INCOME_EDA_CONFIG";
/// Environment variable naming the dataset file.
pub const DATA_ENV: &str = "INCOME_EDA_DATA";

pub const DEFAULT_DATA_PATH: &str = "income_demographics.csv";
pub const DEFAULT_TITLE: &str = "Income Demographics Exploratory Data Analysis (EDA) Dashboard";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub title: String,
    pub load: LoadOptions,
    pub summary: SummaryOptions,
    pub charts: ChartOptions,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            title: DEFAULT_TITLE.to_string(),
            load: LoadOptions::default(),
            summary: SummaryOptions::default(),
            charts: ChartOptions::default(),
        }
    }
}

/// How delimited text is parsed into cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Field delimiter; `None` picks tab for `.tsv` and comma otherwise.
    pub delimiter: Option<char>,
    pub trim_whitespace: bool,
    /// Tokens read as missing on top of the built-in NA tokens.
    pub extra_na_values: Vec<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: None,
            trim_whitespace: false,
            extra_na_values: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryOptions {
    pub preview_rows: usize,
    pub percentile: PercentileMethod,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            preview_rows: 5,
            percentile: PercentileMethod::Linear,
        }
    }
}

/// Interpolation used when a quantile falls between two observations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PercentileMethod {
    /// `q·(n−1)` with linear interpolation between neighbours.
    #[default]
    Linear,
    Lower,
    Higher,
    /// Nearest observation, ties to the even index.
    Nearest,
    Midpoint,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartOptions {
    pub missing: MissingPolicy,
}

/// Treatment of missing categorical values in counts and groupings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPolicy {
    /// Missing values form their own `<null>` category.
    #[default]
    AsCategory,
    Exclude,
}

impl DashboardConfig {
    /// Read a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| EdaError::Config(format!("reading {}: {e}", path.display())))?;
        let config: DashboardConfig = serde_json::from_str(&text)
            .map_err(|e| EdaError::Config(format!("parsing {}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the effective config: the file named by `INCOME_EDA_CONFIG`
    /// (if set), then `INCOME_EDA_DATA`, then the command-line path.
    pub fn resolve(cli_path: Option<PathBuf>) -> Result<Self> {
        let mut config = match std::env::var_os(CONFIG_ENV) {
            Some(path) => {
                log::info!("Reading config from {}", Path::new(&path).display());
                Self::from_file(Path::new(&path))?
            }
            None => Self::default(),
        };
        if let Some(data) = std::env::var_os(DATA_ENV) {
            config.data_path = PathBuf::from(data);
        }
        if let Some(path) = cli_path {
            config.data_path = path;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.summary.preview_rows == 0 {
            return Err(EdaError::Config("summary.preview_rows must be at least 1".into()));
        }
        if let Some(d) = self.load.delimiter {
            if !d.is_ascii() {
                return Err(EdaError::Config(format!(
                    "load.delimiter must be a single ASCII character, got {d:?}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: DashboardConfig = serde_json::from_str(
            r#"{ "summary": { "percentile": "midpoint" }, "charts": { "missing": "exclude" } }"#,
        )
        .unwrap();
        assert_eq!(config.summary.preview_rows, 5);
        assert_eq!(config.summary.percentile, PercentileMethod::Midpoint);
        assert_eq!(config.charts.missing, MissingPolicy::Exclude);
        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(config.title, DEFAULT_TITLE);
    }

    #[test]
    fn zero_preview_rows_is_rejected() {
        let mut config = DashboardConfig::default();
        config.summary.preview_rows = 0;
        assert!(matches!(config.validate(), Err(EdaError::Config(_))));
    }

    #[test]
    fn from_file_reads_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("eda.json");
        std::fs::write(
            &path,
            r#"{ "data_path": "adult.csv", "load": { "extra_na_values": ["?"] } }"#,
        )
        .unwrap();
        let config = DashboardConfig::from_file(&path).unwrap();
        assert_eq!(config.data_path, PathBuf::from("adult.csv"));
        assert_eq!(config.load.extra_na_values, vec!["?".to_string()]);
    }
}
