//! Synthesizes a reproducible, realistically messy e-commerce transaction dataset.
//!
//! Generation happens in two phases. A pristine transaction table is sampled from a
//! fixed product catalog, with a holiday-season bias on order dates, cheaper products
//! sold more often, category-driven discounts and price-driven quantities. A fixed
//! battery of corruption rules then dirties a copy of that table: hidden nulls,
//! numbers stored as formatted text, inconsistent category labels, logically
//! impossible values and duplicate rows. The result is written to a single CSV file
//! meant as input for data-cleaning exercises.
//!
//! # Example
//!
//! ```no_run
//! use messy_transactions::DatasetBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut dataset = DatasetBuilder::new()?.transactions(10_000).run()?;
//!
//!     dataset.write_csv("transactions_data.csv")?;
//!     dataset.report().summary();
//!     Ok(())
//! }
//! ```

use getset::Getters;
use polars::prelude::*;
use std::path::Path;
use thiserror::Error;
use tracing::info;

pub mod catalog;
pub mod config;
pub mod corruption;
pub mod math;
pub mod report;
pub mod sampler;
pub mod writer;

pub use crate::catalog::{Catalog, Product};
pub use crate::config::{CorruptionConfig, GenerationConfig};
pub use crate::corruption::{CorruptionRule, Corruptor, RuleOutcome};
pub use crate::report::DirtyingReport;
pub use crate::sampler::{TransactionSampler, TRANSACTION_COLUMNS};
pub use crate::writer::write_csv;

/// Error type for the `messy_transactions` library.
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Data error: {0}")]
    Polars(#[from] PolarsError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Unsupported column: {0}")]
    UnsupportedColumn(String),
}

/// The entry point for generating the pristine and dirty tables in one pass.
///
/// Defaults reproduce the delivered dataset: the standard catalog, 2,000,000
/// transactions between 2022-01-01 and 2023-12-31, seed 69 and the full
/// corruption battery.
#[derive(Debug, Clone)]
pub struct DatasetBuilder {
    catalog: Catalog,
    generation: GenerationConfig,
    corruption: CorruptionConfig,
}

impl DatasetBuilder {
    /// Creates a builder over the standard catalog.
    pub fn new() -> Result<Self, GeneratorError> {
        let catalog = Catalog::standard()?;
        info!(products = catalog.len(), "product catalog created");
        Ok(Self::with_catalog(catalog))
    }

    /// Creates a builder over a custom catalog.
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            catalog,
            generation: GenerationConfig::default(),
            corruption: CorruptionConfig::default(),
        }
    }

    /// Sets the number of pristine transactions.
    pub fn transactions(&mut self, n: usize) -> &mut Self {
        self.generation.transactions = n;
        self
    }

    /// Sets the order-date range (`end` exclusive, before seasonal shifting).
    pub fn date_range(&mut self, start: chrono::NaiveDate, end: chrono::NaiveDate) -> &mut Self {
        self.generation.start_date = start;
        self.generation.end_date = end;
        self
    }

    /// Sets the seed of the sampler's random stream. Corruption rules keep their
    /// own fixed seeds.
    pub fn seed(&mut self, seed: u64) -> &mut Self {
        self.generation.seed = seed;
        self
    }

    /// Replaces the corruption parameters.
    pub fn corruption(&mut self, config: CorruptionConfig) -> &mut Self {
        self.corruption = config;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn generation_config(&self) -> &GenerationConfig {
        &self.generation
    }

    /// Samples the pristine table and runs the corruption battery over a copy.
    pub fn run(&self) -> Result<Dataset, GeneratorError> {
        let pristine =
            TransactionSampler::with_config(&self.catalog, self.generation.clone()).run()?;
        info!("starting the dirtying process");
        let (dirty, outcomes) = Corruptor::new(&self.corruption).run(pristine.clone())?;
        info!(rows = dirty.height(), "dirtying process complete");
        let report = DirtyingReport::new(pristine.height(), dirty.height(), outcomes);
        Ok(Dataset {
            pristine,
            dirty,
            report,
        })
    }
}

/// The generated tables and the run report.
#[derive(Debug, Getters)]
#[getset(get = "pub")]
pub struct Dataset {
    /// The table before any corruption rule ran.
    pristine: DataFrame,
    /// The delivered table.
    dirty: DataFrame,
    report: DirtyingReport,
}

impl Dataset {
    /// Writes the dirty table to `path` as CSV.
    pub fn write_csv(&mut self, path: impl AsRef<Path>) -> Result<(), GeneratorError> {
        write_csv(&mut self.dirty, path)
    }

    pub fn into_parts(self) -> (DataFrame, DataFrame, DirtyingReport) {
        (self.pristine, self.dirty, self.report)
    }
}
