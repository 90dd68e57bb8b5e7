use std::collections::HashMap;

use super::spec::{
    BarMode, ChartKind, ChartLayout, ChartSpec, HoverMode, Series, TextInfo, TextOrientation,
};
use crate::config::{ChartOptions, MissingPolicy};
use crate::data::counts::{unique_in_order, value_counts};
use crate::data::model::{CellValue, Dataset};
use crate::error::{EdaError, Result};

pub const AGE: &str = "age";
pub const OCCUPATION: &str = "occupation";
pub const HOURS_PER_WEEK: &str = "hours-per-week";
pub const GENDER: &str = "gender";
pub const MARITAL_STATUS: &str = "marital-status";
pub const EDUCATION: &str = "education";

// ---------------------------------------------------------------------------
// Histograms
// ---------------------------------------------------------------------------

/// Distribution of `age` as raw samples.
pub fn age_histogram(dataset: &Dataset, _options: &ChartOptions) -> Result<ChartSpec> {
    let values = numeric_values(dataset, AGE)?;
    Ok(ChartSpec {
        title: "Age Distribution".to_string(),
        kind: ChartKind::Histogram,
        series: vec![Series::Samples { name: None, values }],
        layout: axis_layout("Age", "Count"),
    })
}

/// One overlayed `hours-per-week` histogram per occupation, in the order
/// occupations first appear.
pub fn hours_by_occupation(dataset: &Dataset, options: &ChartOptions) -> Result<ChartSpec> {
    let hours_idx = dataset.column_index(HOURS_PER_WEEK)?;
    let occupation_idx = dataset.column_index(OCCUPATION)?;

    let occupations = unique_in_order(dataset, OCCUPATION, options.missing)?;
    let slot: HashMap<CellValue, usize> = occupations
        .iter()
        .enumerate()
        .map(|(i, occ)| (occ.category_key(), i))
        .collect();

    let mut groups: Vec<Vec<f64>> = vec![Vec::new(); occupations.len()];
    for (row_no, row) in dataset.rows().iter().enumerate() {
        let Some(&i) = slot.get(&row[occupation_idx].category_key()) else {
            continue;
        };
        if let Some(hours) = numeric_cell(&row[hours_idx], HOURS_PER_WEEK, row_no)? {
            groups[i].push(hours);
        }
    }

    let series = occupations
        .iter()
        .zip(groups)
        .map(|(occ, values)| Series::Samples {
            name: Some(occ.to_string()),
            values,
        })
        .collect::<Vec<_>>();
    log::debug!("hours_by_occupation: {} occupation groups", series.len());

    let mut layout = axis_layout("Hours-per-Week", "Count");
    layout.bar_mode = Some(BarMode::Overlay);
    Ok(ChartSpec {
        title: "Hours-per-Week Distribution by Occupation".to_string(),
        kind: ChartKind::Histogram,
        series,
        layout,
    })
}

// ---------------------------------------------------------------------------
// Category charts
// ---------------------------------------------------------------------------

/// Share of each `gender` value.
pub fn gender_pie(dataset: &Dataset, options: &ChartOptions) -> Result<ChartSpec> {
    let series = category_series(dataset, GENDER, options.missing)?;
    Ok(ChartSpec {
        title: "Gender Distribution".to_string(),
        kind: ChartKind::Pie,
        series: vec![series],
        layout: ChartLayout {
            hover_mode: HoverMode::Closest,
            text_info: Some(TextInfo::LabelPercent),
            inside_text_orientation: Some(TextOrientation::Radial),
            ..Default::default()
        },
    })
}

pub fn marital_bar(dataset: &Dataset, options: &ChartOptions) -> Result<ChartSpec> {
    category_bar(
        dataset,
        MARITAL_STATUS,
        "Marital Status Distribution",
        "Marital Status",
        options.missing,
    )
}

pub fn education_bar(dataset: &Dataset, options: &ChartOptions) -> Result<ChartSpec> {
    category_bar(
        dataset,
        EDUCATION,
        "Education Level Distribution",
        "Education Level",
        options.missing,
    )
}

fn category_bar(
    dataset: &Dataset,
    column: &str,
    title: &str,
    x_title: &str,
    missing: MissingPolicy,
) -> Result<ChartSpec> {
    let series = category_series(dataset, column, missing)?;
    Ok(ChartSpec {
        title: title.to_string(),
        kind: ChartKind::Bar,
        series: vec![series],
        layout: axis_layout(x_title, "Count"),
    })
}

fn category_series(dataset: &Dataset, column: &str, missing: MissingPolicy) -> Result<Series> {
    let counts = value_counts(dataset, column, missing)?;
    Ok(Series::Categories {
        name: None,
        labels: counts.labels(),
        values: counts.counts(),
    })
}

// -- helpers --

fn axis_layout(x_title: &str, y_title: &str) -> ChartLayout {
    ChartLayout {
        x_title: Some(x_title.to_string()),
        y_title: Some(y_title.to_string()),
        hover_mode: HoverMode::Closest,
        ..Default::default()
    }
}

/// Non-null values of a numeric column, in row order.
fn numeric_values(dataset: &Dataset, column: &str) -> Result<Vec<f64>> {
    let mut values = Vec::with_capacity(dataset.len());
    for (row_no, cell) in dataset.column(column)?.enumerate() {
        if let Some(v) = numeric_cell(cell, column, row_no)? {
            values.push(v);
        }
    }
    Ok(values)
}

fn numeric_cell(cell: &CellValue, column: &str, row: usize) -> Result<Option<f64>> {
    match cell {
        CellValue::Null => Ok(None),
        other => other.as_f64().map(Some).ok_or_else(|| EdaError::NonNumericColumn {
            column: column.to_string(),
            row,
            value: other.to_string(),
        }),
    }
}
