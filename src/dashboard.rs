//! Dashboard assembly: the startup sequence that turns a dataset file into
//! an ordered list of text tables and chart specifications.

use serde::Serialize;
use serde_json::{json, Value as JsonValue};

use crate::charts::{self, ChartSpec};
use crate::config::{ChartOptions, DashboardConfig};
use crate::data::loader::load_file;
use crate::data::model::Dataset;
use crate::data::summary::{summarize, ColumnStats, Describe, Preview, SummaryReport};
use crate::error::Result;

// ---------------------------------------------------------------------------
// TextTable – a display-ready grid of strings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TextTable {
    /// Render as a pipe-style Markdown table. Columns whose cells are all
    /// numbers are right-aligned.
    pub fn to_markdown(&self) -> String {
        let align: Vec<&str> = (0..self.header.len())
            .map(|col| {
                let numeric = !self.rows.is_empty()
                    && self.rows.iter().all(|row| {
                        row.get(col)
                            .is_some_and(|cell| cell == "NaN" || cell.parse::<f64>().is_ok())
                    });
                if numeric {
                    "---:"
                } else {
                    ":---"
                }
            })
            .collect();

        let mut out = String::new();
        out.push_str(&markdown_row(&self.header));
        out.push_str(&format!("|{}|\n", align.join("|")));
        for row in &self.rows {
            out.push_str(&markdown_row(row));
        }
        out
    }
}

fn markdown_row(cells: &[String]) -> String {
    let cells: Vec<String> = cells.iter().map(|c| c.replace('|', "\\|")).collect();
    format!("| {} |\n", cells.join(" | "))
}

impl From<&Preview> for TextTable {
    fn from(preview: &Preview) -> Self {
        let mut header = vec![String::new()];
        header.extend(preview.columns.iter().cloned());
        let rows = preview
            .rows
            .iter()
            .map(|(idx, cells)| {
                let mut row = vec![idx.to_string()];
                row.extend(cells.iter().cloned());
                row
            })
            .collect();
        TextTable { header, rows }
    }
}

/// Statistics laid out one column per numeric column, one row per measure.
impl From<&Describe> for TextTable {
    fn from(stats: &Describe) -> Self {
        let mut header = vec![String::new()];
        header.extend(stats.iter().map(|s| s.column.clone()));

        let rows = vec![
            measure("count", stats, |s| s.count.to_string()),
            measure("mean", stats, |s| format_number(s.mean)),
            measure("std", stats, |s| format_number(s.std.unwrap_or(f64::NAN))),
            measure("min", stats, |s| format_number(s.min)),
            measure("25%", stats, |s| format_number(s.q25)),
            measure("50%", stats, |s| format_number(s.q50)),
            measure("75%", stats, |s| format_number(s.q75)),
            measure("max", stats, |s| format_number(s.max)),
        ];
        TextTable { header, rows }
    }
}

fn measure(label: &str, stats: &Describe, f: impl Fn(&ColumnStats) -> String) -> Vec<String> {
    let mut row = vec![label.to_string()];
    row.extend(stats.iter().map(f));
    row
}

/// `%g`-style formatting: six significant digits, trailing zeros trimmed.
pub fn format_number(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if v == 0.0 {
        return "0".to_string();
    }

    // The exponent is the one after rounding to six significant digits.
    let sci = format!("{v:.5e}");
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return v.to_string();
    };
    let exp: i32 = exp.parse().unwrap_or(0);
    if !(-4..6).contains(&exp) {
        let sign = if exp < 0 { '-' } else { '+' };
        return format!("{}e{sign}{:02}", trim_zeros(mantissa), exp.abs());
    }

    let decimals = (5 - exp).max(0) as usize;
    trim_zeros(&format!("{v:.decimals$}")).to_string()
}

fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionBody {
    Table(TextTable),
    Chart(ChartSpec),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub heading: String,
    pub body: SectionBody,
}

/// Everything the presentation layer needs, computed once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub title: String,
    pub summary: SummaryReport,
    pub sections: Vec<Section>,
}

type ViewBuilder = fn(&Dataset, &ChartOptions) -> Result<ChartSpec>;

const VIEWS: [ViewBuilder; 5] = [
    charts::age_histogram,
    charts::hours_by_occupation,
    charts::gender_pie,
    charts::marital_bar,
    charts::education_bar,
];

/// Summarize the dataset and build every view. All-or-nothing.
pub fn build_dashboard(dataset: &Dataset, config: &DashboardConfig) -> Result<Dashboard> {
    let summary = summarize(dataset, &config.summary)?;

    let mut sections = vec![
        Section {
            heading: "Dataset Preview".to_string(),
            body: SectionBody::Table(TextTable::from(&summary.preview)),
        },
        Section {
            heading: "Summary Statistics".to_string(),
            body: SectionBody::Table(TextTable::from(&summary.statistics)),
        },
    ];
    for build in VIEWS {
        let chart = build(dataset, &config.charts)?;
        log::debug!("Built chart '{}' with {} series", chart.title, chart.series.len());
        sections.push(Section {
            heading: chart.title.clone(),
            body: SectionBody::Chart(chart),
        });
    }

    log::info!("Dashboard ready: {} sections", sections.len());
    Ok(Dashboard {
        title: config.title.clone(),
        summary,
        sections,
    })
}

/// Load the configured dataset and build the dashboard from it.
pub fn startup(config: &DashboardConfig) -> Result<Dashboard> {
    let dataset = load_file(&config.data_path, &config.load)?;
    build_dashboard(&dataset, config)
}

impl Dashboard {
    pub fn charts(&self) -> impl Iterator<Item = &ChartSpec> + '_ {
        self.sections.iter().filter_map(|s| match &s.body {
            SectionBody::Chart(chart) => Some(chart),
            SectionBody::Table(_) => None,
        })
    }

    /// Markdown tables and Plotly figures, section by section.
    pub fn to_figures_json(&self) -> JsonValue {
        let sections: Vec<JsonValue> = self
            .sections
            .iter()
            .map(|section| match &section.body {
                SectionBody::Table(table) => json!({
                    "heading": section.heading,
                    "markdown": table.to_markdown(),
                }),
                SectionBody::Chart(chart) => json!({
                    "heading": section.heading,
                    "figure": chart.to_plotly(),
                }),
            })
            .collect();
        json!({ "title": self.title, "sections": sections })
    }
}
