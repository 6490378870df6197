use super::{column_as_numbers, column_as_text, overwrite_text, CorruptionRule, RuleOutcome};
use crate::config::CorruptionConfig;
use crate::math::format::currency_text;
use crate::math::sampling::{fraction_count, sample_rows};
use crate::GeneratorError;
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Numbers stored as formatted text: `final_price` as `$ 1,234.57` and
/// `quantity` as `2 units`.
#[derive(Debug, Clone)]
pub struct MixedTypes {
    price_fraction: f64,
    price_seed: u64,
    quantity_fraction: f64,
    quantity_seed: u64,
}

impl MixedTypes {
    pub fn from_config(config: &CorruptionConfig) -> Self {
        Self {
            price_fraction: config.currency_price_fraction,
            price_seed: config.currency_price_seed,
            quantity_fraction: config.unit_quantity_fraction,
            quantity_seed: config.unit_quantity_seed,
        }
    }
}

impl CorruptionRule for MixedTypes {
    fn name(&self) -> &'static str {
        "mixed_types"
    }

    fn apply(&self, df: &mut DataFrame) -> Result<Vec<RuleOutcome>, GeneratorError> {
        let height = df.height();

        let mut rng = StdRng::seed_from_u64(self.price_seed);
        let price_rows = sample_rows(&mut rng, height, fraction_count(self.price_fraction, height));
        let prices = column_as_numbers(df, "final_price")?;
        let current = column_as_text(df, "final_price")?;
        // Cells that no longer hold a number keep their text.
        let formatted = price_rows
            .iter()
            .map(|&row| match prices[row] {
                Some(price) => Some(currency_text(price)),
                None => current[row].clone(),
            })
            .collect();
        overwrite_text(df, "final_price", &price_rows, formatted)?;

        let mut rng = StdRng::seed_from_u64(self.quantity_seed);
        let quantity_rows =
            sample_rows(&mut rng, height, fraction_count(self.quantity_fraction, height));
        let quantities = column_as_text(df, "quantity")?;
        let with_units = quantity_rows
            .iter()
            .map(|&row| quantities[row].as_ref().map(|q| format!("{} units", q)))
            .collect();
        overwrite_text(df, "quantity", &quantity_rows, with_units)?;

        Ok(vec![
            RuleOutcome::new(
                self.name(),
                "final_price",
                price_rows.len(),
                "price stored as currency text",
            ),
            RuleOutcome::new(
                self.name(),
                "quantity",
                quantity_rows.len(),
                "quantity stored with a unit suffix",
            ),
        ])
    }
}
