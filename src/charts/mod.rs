//! Chart specifications and the five dashboard view builders.
//!
//! Each builder is a pure function of the dataset; it never mutates it and
//! fails with `MissingColumn` when a required column is absent.

pub mod builders;
pub mod spec;

pub use builders::{age_histogram, education_bar, gender_pie, hours_by_occupation, marital_bar};
pub use spec::{ChartKind, ChartLayout, ChartSpec, Series};
