//! Write a deterministic synthetic income-demographics table as CSV and
//! Parquet. Usage: `generate-sample [ROWS] [OUT.csv]`.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use parquet::arrow::ArrowWriter;

/// SplitMix64: small, seedable and reproducible across platforms.
struct Rng(u64);

impl Rng {
    /// Uniform in `[0, 1)`.
    fn uniform(&mut self) -> f64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        ((z ^ (z >> 31)) >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Normal sample (Box-Muller).
    fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        let radius = (-2.0 * (1.0 - self.uniform()).ln()).sqrt();
        let angle = std::f64::consts::TAU * self.uniform();
        mean + std_dev * radius * angle.cos()
    }

    /// Pick from `(item, weight)` pairs.
    fn choose<'a>(&mut self, items: &[(&'a str, f64)]) -> &'a str {
        let total: f64 = items.iter().map(|(_, w)| w).sum();
        let mut target = self.uniform() * total;
        for (item, weight) in items {
            if target < *weight {
                return *item;
            }
            target -= weight;
        }
        items.last().map(|(item, _)| *item).unwrap_or_default()
    }
}

const WORKCLASS: &[(&str, f64)] = &[
    ("Private", 0.70),
    ("Self-emp-not-inc", 0.08),
    ("Local-gov", 0.06),
    ("State-gov", 0.04),
    ("Self-emp-inc", 0.03),
    ("Federal-gov", 0.03),
];

const EDUCATION: &[(&str, f64)] = &[
    ("HS-grad", 0.32),
    ("Some-college", 0.22),
    ("Bachelors", 0.16),
    ("Masters", 0.05),
    ("Assoc-voc", 0.04),
    ("11th", 0.04),
    ("Assoc-acdm", 0.03),
    ("10th", 0.03),
    ("Prof-school", 0.02),
    ("Doctorate", 0.01),
];

const MARITAL_STATUS: &[(&str, f64)] = &[
    ("Married-civ-spouse", 0.46),
    ("Never-married", 0.33),
    ("Divorced", 0.14),
    ("Separated", 0.03),
    ("Widowed", 0.03),
    ("Married-spouse-absent", 0.01),
];

/// Occupation with its typical weekly hours.
const OCCUPATION: &[(&str, f64, f64)] = &[
    ("Prof-specialty", 0.13, 43.0),
    ("Craft-repair", 0.13, 42.0),
    ("Exec-managerial", 0.13, 45.0),
    ("Adm-clerical", 0.12, 38.0),
    ("Sales", 0.11, 40.0),
    ("Other-service", 0.10, 34.0),
    ("Machine-op-inspct", 0.06, 41.0),
    ("Transport-moving", 0.05, 45.0),
    ("Handlers-cleaners", 0.04, 38.0),
    ("Farming-fishing", 0.03, 47.0),
    ("Tech-support", 0.03, 40.0),
];

const GENDER: &[(&str, f64)] = &[("Male", 0.67), ("Female", 0.33)];

struct Columns {
    age: Vec<i64>,
    workclass: Vec<String>,
    education: Vec<String>,
    marital_status: Vec<String>,
    occupation: Vec<Option<String>>,
    gender: Vec<String>,
    hours: Vec<i64>,
    income: Vec<String>,
}

fn generate(rows: usize, rng: &mut Rng) -> Columns {
    let occupation_weights: Vec<(&str, f64)> =
        OCCUPATION.iter().map(|(name, w, _)| (*name, *w)).collect();

    let mut cols = Columns {
        age: Vec::with_capacity(rows),
        workclass: Vec::with_capacity(rows),
        education: Vec::with_capacity(rows),
        marital_status: Vec::with_capacity(rows),
        occupation: Vec::with_capacity(rows),
        gender: Vec::with_capacity(rows),
        hours: Vec::with_capacity(rows),
        income: Vec::with_capacity(rows),
    };

    for _ in 0..rows {
        let age = rng.normal(38.6, 13.6).round().clamp(17.0, 90.0) as i64;
        let education = rng.choose(EDUCATION);
        let occupation = rng.choose(&occupation_weights);
        let typical_hours = OCCUPATION
            .iter()
            .find(|(name, _, _)| *name == occupation)
            .map(|(_, _, h)| *h)
            .unwrap_or(40.0);
        let hours = rng.normal(typical_hours, 10.0).round().clamp(1.0, 99.0) as i64;

        let well_paid = matches!(education, "Bachelors" | "Masters" | "Prof-school" | "Doctorate")
            && age > 28;
        let income = if (well_paid && rng.uniform() < 0.55) || rng.uniform() < 0.12 {
            ">50K"
        } else {
            "<=50K"
        };

        cols.age.push(age);
        cols.workclass.push(rng.choose(WORKCLASS).to_string());
        cols.education.push(education.to_string());
        cols.marital_status.push(rng.choose(MARITAL_STATUS).to_string());
        // About 5% of occupations are unknown.
        cols.occupation
            .push((rng.uniform() >= 0.05).then(|| occupation.to_string()));
        cols.gender.push(rng.choose(GENDER).to_string());
        cols.hours.push(hours);
        cols.income.push(income.to_string());
    }
    cols
}

fn to_batch(cols: &Columns) -> Result<RecordBatch> {
    let strings = |values: &[String]| -> ArrayRef {
        Arc::new(StringArray::from(
            values.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
        ))
    };

    let schema = Arc::new(Schema::new(vec![
        Field::new("age", DataType::Int64, false),
        Field::new("workclass", DataType::Utf8, false),
        Field::new("education", DataType::Utf8, false),
        Field::new("marital-status", DataType::Utf8, false),
        Field::new("occupation", DataType::Utf8, true),
        Field::new("gender", DataType::Utf8, false),
        Field::new("hours-per-week", DataType::Int64, false),
        Field::new("income", DataType::Utf8, false),
    ]));

    let occupation: ArrayRef = Arc::new(StringArray::from(
        cols.occupation
            .iter()
            .map(|o| o.as_deref())
            .collect::<Vec<_>>(),
    ));

    RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Int64Array::from(cols.age.clone())) as ArrayRef,
            strings(&cols.workclass),
            strings(&cols.education),
            strings(&cols.marital_status),
            occupation,
            strings(&cols.gender),
            Arc::new(Int64Array::from(cols.hours.clone())) as ArrayRef,
            strings(&cols.income),
        ],
    )
    .context("building record batch")
}

fn write_csv(cols: &Columns, path: &std::path::Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record([
        "age",
        "workclass",
        "education",
        "marital-status",
        "occupation",
        "gender",
        "hours-per-week",
        "income",
    ])?;
    for i in 0..cols.age.len() {
        writer.write_record([
            cols.age[i].to_string().as_str(),
            cols.workclass[i].as_str(),
            cols.education[i].as_str(),
            cols.marital_status[i].as_str(),
            cols.occupation[i].as_deref().unwrap_or(""),
            cols.gender[i].as_str(),
            cols.hours[i].to_string().as_str(),
            cols.income[i].as_str(),
        ])?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let rows: usize = match args.next() {
        Some(n) => n.parse().with_context(|| format!("invalid row count '{n}'"))?,
        None => 1000,
    };
    let csv_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(income_eda::config::DEFAULT_DATA_PATH));
    let parquet_path = csv_path.with_extension("parquet");

    let mut rng = Rng(42);
    let cols = generate(rows, &mut rng);

    write_csv(&cols, &csv_path)?;

    let batch = to_batch(&cols)?;
    let file = std::fs::File::create(&parquet_path)
        .with_context(|| format!("creating {}", parquet_path.display()))?;
    let mut writer =
        ArrowWriter::try_new(file, batch.schema(), None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;

    let head = batch.slice(0, batch.num_rows().min(5));
    println!("{}", pretty_format_batches(&[head]).context("formatting preview")?);
    println!(
        "Wrote {rows} rows to {} and {}",
        csv_path.display(),
        parquet_path.display()
    );
    Ok(())
}
