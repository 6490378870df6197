//! The dirtying battery applied to a pristine table.
//!
//! Each rule is an independent, seeded mutation over its own row sample. Rules
//! overwrite cells in place or append rows, never delete. A numeric column that a
//! rule writes text into becomes a string column for the rest of the run.

use crate::config::CorruptionConfig;
use crate::math::format::{float_text, parse_numeric_text};
use crate::GeneratorError;
use getset::Getters;
use polars::prelude::*;
use serde::Serialize;
use tracing::info;

mod category_text;
mod duplicates;
mod hidden_nulls;
mod logical_errors;
mod mixed_types;

pub use category_text::CategoryText;
pub use duplicates::DuplicateRows;
pub use hidden_nulls::HiddenNulls;
pub use logical_errors::LogicalErrors;
pub use mixed_types::MixedTypes;

/// What a single rule did to the table.
#[derive(Debug, Clone, PartialEq, Getters, Serialize)]
#[getset(get = "pub")]
pub struct RuleOutcome {
    rule: String,
    column: String,
    rows_affected: usize,
    detail: String,
}

impl RuleOutcome {
    pub fn new(rule: &str, column: &str, rows_affected: usize, detail: impl Into<String>) -> Self {
        Self {
            rule: rule.to_string(),
            column: column.to_string(),
            rows_affected,
            detail: detail.into(),
        }
    }
}

/// A mutation simulating one real-world data quality issue.
pub trait CorruptionRule {
    fn name(&self) -> &'static str;

    /// Mutates `df` and reports what changed, one outcome per touched column.
    fn apply(&self, df: &mut DataFrame) -> Result<Vec<RuleOutcome>, GeneratorError>;

    /// Rules that copy rows must see every other rule's output.
    fn runs_last(&self) -> bool {
        false
    }
}

/// Applies an ordered list of rules to a table.
pub struct Corruptor {
    rules: Vec<Box<dyn CorruptionRule>>,
}

impl Corruptor {
    /// The full battery in its fixed order: hidden nulls, mixed types, category
    /// text, logical errors, duplicate rows.
    pub fn new(config: &CorruptionConfig) -> Self {
        Self {
            rules: vec![
                Box::new(HiddenNulls::from_config(config)),
                Box::new(MixedTypes::from_config(config)),
                Box::new(CategoryText::from_config(config)),
                Box::new(LogicalErrors::from_config(config)),
                Box::new(DuplicateRows::from_config(config)),
            ],
        }
    }

    /// A custom battery.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::InvalidConfig`] if a rule that must run last is
    /// followed by another rule.
    pub fn with_rules(rules: Vec<Box<dyn CorruptionRule>>) -> Result<Self, GeneratorError> {
        if let Some(pos) = rules.iter().position(|r| r.runs_last()) {
            if pos + 1 != rules.len() {
                return Err(GeneratorError::InvalidConfig(format!(
                    "rule '{}' must be the last corruption rule",
                    rules[pos].name()
                )));
            }
        }
        Ok(Self { rules })
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Runs every rule in order over `df`.
    pub fn run(&self, mut df: DataFrame) -> Result<(DataFrame, Vec<RuleOutcome>), GeneratorError> {
        let mut outcomes = Vec::new();
        for rule in &self.rules {
            let rule_outcomes = rule.apply(&mut df)?;
            for outcome in &rule_outcomes {
                info!(
                    rule = rule.name(),
                    column = outcome.column.as_str(),
                    rows = outcome.rows_affected,
                    "{}",
                    outcome.detail
                );
            }
            outcomes.extend(rule_outcomes);
        }
        Ok((df, outcomes))
    }
}

/// The column's cells as text; untouched numbers render via [`float_text`].
pub(crate) fn column_as_text(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, GeneratorError> {
    let column = df.column(name)?;
    let cells = match column.dtype() {
        DataType::String => column
            .str()?
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect(),
        DataType::Float64 => column
            .f64()?
            .into_iter()
            .map(|v| v.map(float_text))
            .collect(),
        DataType::Int64 => column
            .i64()?
            .into_iter()
            .map(|v| v.map(|x| x.to_string()))
            .collect(),
        other => {
            return Err(GeneratorError::UnsupportedColumn(format!(
                "column '{}' has type {} and cannot hold text",
                name, other
            )))
        }
    };
    Ok(cells)
}

/// The column's cells as numbers; text cells are parsed, sentinels become `None`.
pub(crate) fn column_as_numbers(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, GeneratorError> {
    let column = df.column(name)?;
    let cells = match column.dtype() {
        DataType::Float64 => column.f64()?.into_iter().collect(),
        DataType::Int64 => column.i64()?.into_iter().map(|v| v.map(|x| x as f64)).collect(),
        DataType::String => column
            .str()?
            .into_iter()
            .map(|v| v.and_then(parse_numeric_text))
            .collect(),
        other => {
            return Err(GeneratorError::UnsupportedColumn(format!(
                "column '{}' has type {} and is not numeric",
                name, other
            )))
        }
    };
    Ok(cells)
}

/// Writes `values` into `rows` of `name`, turning the column into text.
/// An empty `rows` leaves the column and its type untouched.
pub(crate) fn overwrite_text(
    df: &mut DataFrame,
    name: &str,
    rows: &[usize],
    values: Vec<Option<String>>,
) -> Result<(), GeneratorError> {
    if rows.is_empty() {
        return Ok(());
    }
    let mut cells = column_as_text(df, name)?;
    for (&row, value) in rows.iter().zip(values) {
        cells[row] = value;
    }
    df.with_column(Series::new(name.into(), cells))?;
    Ok(())
}

/// Writes numbers into `rows` of `name`. A float column stays numeric; a column
/// already holding text receives the numbers' text form.
pub(crate) fn overwrite_numbers(
    df: &mut DataFrame,
    name: &str,
    rows: &[usize],
    values: Vec<f64>,
) -> Result<(), GeneratorError> {
    if df.column(name)?.dtype() == &DataType::Float64 {
        let mut cells: Vec<Option<f64>> = df.column(name)?.f64()?.into_iter().collect();
        for (&row, value) in rows.iter().zip(values) {
            cells[row] = Some(value);
        }
        df.with_column(Series::new(name.into(), cells))?;
        Ok(())
    } else {
        let text = values.into_iter().map(|v| Some(float_text(v))).collect();
        overwrite_text(df, name, rows, text)
    }
}
