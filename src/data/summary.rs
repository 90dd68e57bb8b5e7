use serde::Serialize;

use super::model::Dataset;
use crate::config::{PercentileMethod, SummaryOptions};
use crate::error::{EdaError, Result};

// ---------------------------------------------------------------------------
// Preview – the head of the table in display form
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preview {
    pub columns: Vec<String>,
    /// `(row index, displayed cells)` for each previewed row.
    pub rows: Vec<(usize, Vec<String>)>,
}

/// First `n` rows of the dataset. Fewer rows than `n` is not an error.
pub fn preview(dataset: &Dataset, n: usize) -> Result<Preview> {
    if dataset.is_empty() {
        return Err(EdaError::EmptyDataset);
    }
    let rows = dataset
        .rows()
        .iter()
        .take(n)
        .enumerate()
        .map(|(i, row)| (i, row.iter().map(|cell| cell.to_string()).collect()))
        .collect();
    Ok(Preview {
        columns: dataset.column_names().to_vec(),
        rows,
    })
}

// ---------------------------------------------------------------------------
// Describe – descriptive statistics of the numeric columns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStats {
    pub column: String,
    /// Number of non-null values.
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (N−1); undefined below two values.
    pub std: Option<f64>,
    pub min: f64,
    pub q25: f64,
    pub q50: f64,
    pub q75: f64,
    pub max: f64,
}

/// One entry per numeric column, in header order.
pub type Describe = Vec<ColumnStats>;

pub fn describe(dataset: &Dataset, method: PercentileMethod) -> Result<Describe> {
    if dataset.is_empty() {
        return Err(EdaError::EmptyDataset);
    }

    let mut stats = Vec::new();
    for name in dataset.numeric_columns() {
        let mut values: Vec<f64> = dataset
            .column(name)?
            .filter_map(|cell| cell.as_f64())
            .filter(|v| !v.is_nan())
            .collect();
        // NaN is missing, so a column may have nothing left to describe.
        if values.is_empty() {
            continue;
        }
        values.sort_by(|a, b| a.total_cmp(b));
        stats.push(column_stats(name, &values, method));
    }
    log::debug!("describe: {} numeric columns", stats.len());
    Ok(stats)
}

/// Statistics over already-sorted, non-empty values.
fn column_stats(column: &str, sorted: &[f64], method: PercentileMethod) -> ColumnStats {
    let count = sorted.len();
    let n = count as f64;
    let mean = sorted.iter().sum::<f64>() / n;
    let std = (count > 1).then(|| {
        let ss: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
        (ss / (n - 1.0)).sqrt()
    });
    ColumnStats {
        column: column.to_string(),
        count,
        mean,
        std,
        min: sorted[0],
        q25: percentile(sorted, 0.25, method),
        q50: percentile(sorted, 0.50, method),
        q75: percentile(sorted, 0.75, method),
        max: sorted[count - 1],
    }
}

/// Quantile `q` (0..=1) of ascending `sorted` values; NaN when empty.
pub fn percentile(sorted: &[f64], q: f64, method: PercentileMethod) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    match method {
        PercentileMethod::Linear => sorted[lo] + (sorted[hi] - sorted[lo]) * frac,
        PercentileMethod::Lower => sorted[lo],
        PercentileMethod::Higher => sorted[hi],
        PercentileMethod::Nearest => {
            let idx = if frac < 0.5 || (frac == 0.5 && lo % 2 == 0) { lo } else { hi };
            sorted[idx]
        }
        PercentileMethod::Midpoint => (sorted[lo] + sorted[hi]) / 2.0,
    }
}

// ---------------------------------------------------------------------------
// SummaryReport
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryReport {
    pub preview: Preview,
    pub statistics: Describe,
}

pub fn summarize(dataset: &Dataset, options: &SummaryOptions) -> Result<SummaryReport> {
    Ok(SummaryReport {
        preview: preview(dataset, options.preview_rows)?,
        statistics: describe(dataset, options.percentile)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    fn ints(values: &[i64]) -> Vec<CellValue> {
        values.iter().map(|v| CellValue::Integer(*v)).collect()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn preview_returns_available_rows() {
        let ds = Dataset::from_columns(vec![("age", ints(&[1, 2, 3]))]);
        let p = preview(&ds, 5).unwrap();
        assert_eq!(p.rows.len(), 3);
        assert_eq!(p.rows[2], (2, vec!["3".to_string()]));
    }

    #[test]
    fn empty_dataset_fails() {
        let ds = Dataset::new(vec!["age".into()], Vec::new());
        assert!(matches!(preview(&ds, 5), Err(EdaError::EmptyDataset)));
        assert!(matches!(
            describe(&ds, PercentileMethod::Linear),
            Err(EdaError::EmptyDataset)
        ));
    }

    #[test]
    fn describe_matches_conventional_definitions() {
        let ds = Dataset::from_columns(vec![
            ("age", ints(&[1, 2, 3, 4])),
            ("gender", vec!["F".into(), "M".into(), "F".into(), "M".into()]),
        ]);
        let stats = describe(&ds, PercentileMethod::Linear).unwrap();
        assert_eq!(stats.len(), 1);
        let age = &stats[0];
        assert_eq!(age.column, "age");
        assert_eq!(age.count, 4);
        assert!(close(age.mean, 2.5));
        // sqrt(5/3)
        assert!(close(age.std.unwrap(), 1.2909944487358056));
        assert!(close(age.min, 1.0));
        assert!(close(age.q25, 1.75));
        assert!(close(age.q50, 2.5));
        assert!(close(age.q75, 3.25));
        assert!(close(age.max, 4.0));
    }

    #[test]
    fn count_excludes_nulls() {
        let ds = Dataset::from_columns(vec![(
            "hours-per-week",
            vec![CellValue::Integer(40), CellValue::Null, CellValue::Float(35.5)],
        )]);
        let stats = describe(&ds, PercentileMethod::Linear).unwrap();
        assert_eq!(stats[0].count, 2);
        assert!(close(stats[0].mean, 37.75));
    }

    #[test]
    fn nan_spellings_are_not_counted() {
        let ds = crate::data::loader::read_delimited(
            "age,gender\n30,M\nNAN,F\n40,M\n+nan,F\n".as_bytes(),
            std::path::Path::new("inline.csv"),
            b',',
            &Default::default(),
        )
        .unwrap();
        let stats = describe(&ds, PercentileMethod::Linear).unwrap();
        assert_eq!(stats[0].count, 2);
        assert!(close(stats[0].mean, 35.0));
        assert!(close(stats[0].max, 40.0));

        let built = Dataset::from_columns(vec![(
            "age",
            vec![CellValue::Float(f64::NAN), CellValue::Integer(30)],
        )]);
        let stats = describe(&built, PercentileMethod::Linear).unwrap();
        assert_eq!(stats[0].count, 1);
    }

    #[test]
    fn single_value_has_no_std() {
        let ds = Dataset::from_columns(vec![("age", ints(&[42]))]);
        let stats = describe(&ds, PercentileMethod::Linear).unwrap();
        assert_eq!(stats[0].std, None);
        assert!(close(stats[0].q75, 42.0));
    }

    #[test]
    fn percentile_methods() {
        let v = [1.0, 2.0, 3.0, 4.0];
        // position 0.75 for q = 0.25
        assert!(close(percentile(&v, 0.25, PercentileMethod::Linear), 1.75));
        assert!(close(percentile(&v, 0.25, PercentileMethod::Lower), 1.0));
        assert!(close(percentile(&v, 0.25, PercentileMethod::Higher), 2.0));
        assert!(close(percentile(&v, 0.25, PercentileMethod::Nearest), 2.0));
        assert!(close(percentile(&v, 0.25, PercentileMethod::Midpoint), 1.5));
        // position 1.5: ties go to the even index
        assert!(close(percentile(&v, 0.5, PercentileMethod::Nearest), 3.0));
        assert!(percentile(&[], 0.5, PercentileMethod::Linear).is_nan());
    }
}
