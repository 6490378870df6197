use super::{overwrite_numbers, CorruptionRule, RuleOutcome};
use crate::config::CorruptionConfig;
use crate::math::sampling::sample_rows;
use crate::GeneratorError;
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Values that parse fine but break business logic: a final price above the list
/// price, and a negative discount.
///
/// Both samples have fixed sizes; on a table smaller than a sample every row is hit.
#[derive(Debug, Clone)]
pub struct LogicalErrors {
    inflated_rows: usize,
    inflated_factor: f64,
    inflated_seed: u64,
    negative_rows: usize,
    negative_value: f64,
    negative_seed: u64,
}

impl LogicalErrors {
    pub fn from_config(config: &CorruptionConfig) -> Self {
        Self {
            inflated_rows: config.inflated_price_rows,
            inflated_factor: config.inflated_price_factor,
            inflated_seed: config.inflated_price_seed,
            negative_rows: config.negative_discount_rows,
            negative_value: config.negative_discount_value,
            negative_seed: config.negative_discount_seed,
        }
    }
}

impl CorruptionRule for LogicalErrors {
    fn name(&self) -> &'static str {
        "logical_errors"
    }

    fn apply(&self, df: &mut DataFrame) -> Result<Vec<RuleOutcome>, GeneratorError> {
        let height = df.height();

        let mut rng = StdRng::seed_from_u64(self.inflated_seed);
        let inflated = sample_rows(&mut rng, height, self.inflated_rows);
        let list_price = df.column("list_price")?.f64()?;
        let mut prices = Vec::with_capacity(inflated.len());
        for &row in &inflated {
            let list = list_price.get(row).ok_or_else(|| {
                GeneratorError::InvalidConfig(format!("list_price is empty at row {}", row))
            })?;
            prices.push(list * self.inflated_factor);
        }
        overwrite_numbers(df, "final_price", &inflated, prices)?;

        let mut rng = StdRng::seed_from_u64(self.negative_seed);
        let negative = sample_rows(&mut rng, height, self.negative_rows);
        overwrite_numbers(
            df,
            "discount_applied",
            &negative,
            vec![self.negative_value; negative.len()],
        )?;

        Ok(vec![
            RuleOutcome::new(
                self.name(),
                "final_price",
                inflated.len(),
                format!("final price set to {} x list price", self.inflated_factor),
            ),
            RuleOutcome::new(
                self.name(),
                "discount_applied",
                negative.len(),
                format!("discount set to {}", self.negative_value),
            ),
        ])
    }
}
