use std::collections::HashMap;

use serde::Serialize;

use super::model::{CellValue, Dataset};
use crate::config::MissingPolicy;
use crate::error::Result;

// ---------------------------------------------------------------------------
// CategoryCount – value_counts for one column
// ---------------------------------------------------------------------------

/// Occurrence counts of the distinct values of one column, most frequent
/// first. Equal counts keep the order in which values first appeared.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    pub column: String,
    pub entries: Vec<(CellValue, u64)>,
}

impl CategoryCount {
    /// Display labels in count order.
    pub fn labels(&self) -> Vec<String> {
        self.entries.iter().map(|(v, _)| v.to_string()).collect()
    }

    pub fn counts(&self) -> Vec<u64> {
        self.entries.iter().map(|(_, n)| *n).collect()
    }
}

/// Count distinct values of `column`.
pub fn value_counts(dataset: &Dataset, column: &str, missing: MissingPolicy) -> Result<CategoryCount> {
    let values = dataset.column(column)?;
    let entries = count_in_order(values, missing);
    log::debug!("value_counts({column}): {} categories", entries.len());
    Ok(CategoryCount {
        column: column.to_string(),
        entries,
    })
}

fn count_in_order<'a>(
    values: impl Iterator<Item = &'a CellValue>,
    missing: MissingPolicy,
) -> Vec<(CellValue, u64)> {
    let mut index: HashMap<CellValue, usize> = HashMap::new();
    let mut entries: Vec<(CellValue, u64)> = Vec::new();
    for value in values {
        if value.is_null() && missing == MissingPolicy::Exclude {
            continue;
        }
        let key = value.category_key();
        match index.get(&key) {
            Some(&i) => entries[i].1 += 1,
            None => {
                index.insert(key, entries.len());
                entries.push((value.clone(), 1));
            }
        }
    }
    // A column mixing integers and floats is a float column.
    if entries.iter().any(|(v, _)| matches!(v, CellValue::Float(_))) {
        for (value, _) in &mut entries {
            if let CellValue::Integer(i) = value {
                *value = CellValue::Float(*i as f64);
            }
        }
    }
    // `sort_by` is stable, so ties stay in first-seen order.
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries
}

/// Distinct values of `column` in first-seen order, one per category key.
pub fn unique_in_order(dataset: &Dataset, column: &str, missing: MissingPolicy) -> Result<Vec<CellValue>> {
    let mut seen = std::collections::HashSet::new();
    Ok(dataset
        .column(column)?
        .filter(|v| !(v.is_null() && missing == MissingPolicy::Exclude))
        .filter(|v| seen.insert(v.category_key()))
        .cloned()
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EdaError;

    fn strings(values: &[&str]) -> Vec<CellValue> {
        values.iter().map(|v| CellValue::from(*v)).collect()
    }

    #[test]
    fn orders_by_descending_count() {
        let ds = Dataset::from_columns(vec![("gender", strings(&["M", "F", "M", "F", "F"]))]);
        let counts = value_counts(&ds, "gender", MissingPolicy::AsCategory).unwrap();
        assert_eq!(counts.labels(), vec!["F", "M"]);
        assert_eq!(counts.counts(), vec![3, 2]);
    }

    #[test]
    fn ties_keep_first_occurrence() {
        let ds = Dataset::from_columns(vec![(
            "education",
            strings(&["HS-grad", "Bachelors", "Masters", "Bachelors", "HS-grad", "Masters"]),
        )]);
        let counts = value_counts(&ds, "education", MissingPolicy::AsCategory).unwrap();
        assert_eq!(counts.labels(), vec!["HS-grad", "Bachelors", "Masters"]);
    }

    #[test]
    fn missing_policy_controls_null_category() {
        let ds = Dataset::from_columns(vec![(
            "gender",
            vec!["F".into(), CellValue::Null, "F".into(), CellValue::Null, CellValue::Null],
        )]);
        let kept = value_counts(&ds, "gender", MissingPolicy::AsCategory).unwrap();
        assert_eq!(kept.labels(), vec!["<null>", "F"]);
        assert_eq!(kept.entries[0], (CellValue::Null, 3));

        let dropped = value_counts(&ds, "gender", MissingPolicy::Exclude).unwrap();
        assert_eq!(dropped.labels(), vec!["F"]);
        assert_eq!(dropped.counts(), vec![2]);
    }

    fn parse_column(text: &str) -> Dataset {
        crate::data::loader::read_delimited(
            text.as_bytes(),
            std::path::Path::new("inline.csv"),
            b',',
            &Default::default(),
        )
        .unwrap()
    }

    #[test]
    fn nan_cells_are_one_missing_category() {
        let ds = parse_column("x\nNAN\nNAN\nfoo\n");
        let counts = value_counts(&ds, "x", MissingPolicy::AsCategory).unwrap();
        assert_eq!(counts.labels(), vec!["<null>", "foo"]);
        assert_eq!(counts.counts(), vec![2, 1]);

        let built = Dataset::from_columns(vec![(
            "x",
            vec![CellValue::Float(f64::NAN), CellValue::Float(f64::NAN)],
        )]);
        let counts = value_counts(&built, "x", MissingPolicy::AsCategory).unwrap();
        assert_eq!(counts.counts(), vec![2]);
    }

    #[test]
    fn whole_numbers_share_a_category() {
        let ds = parse_column("x\n1\n1.0\n2\n");
        let counts = value_counts(&ds, "x", MissingPolicy::AsCategory).unwrap();
        assert_eq!(counts.labels(), vec!["1.0", "2.0"]);
        assert_eq!(counts.counts(), vec![2, 1]);

        let unique = unique_in_order(&ds, "x", MissingPolicy::AsCategory).unwrap();
        assert_eq!(unique, vec![CellValue::Integer(1), CellValue::Integer(2)]);
    }

    #[test]
    fn unknown_column_is_missing() {
        let ds = Dataset::from_columns(vec![("gender", strings(&["F"]))]);
        let err = value_counts(&ds, "education", MissingPolicy::AsCategory).unwrap_err();
        assert!(matches!(err, EdaError::MissingColumn(c) if c == "education"));
    }

    #[test]
    fn unique_values_in_first_seen_order() {
        let ds = Dataset::from_columns(vec![("occupation", strings(&["B", "A", "B", "C"]))]);
        let unique = unique_in_order(&ds, "occupation", MissingPolicy::AsCategory).unwrap();
        assert_eq!(unique, strings(&["B", "A", "C"]));
    }
}
