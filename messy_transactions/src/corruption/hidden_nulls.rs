use super::{overwrite_text, CorruptionRule, RuleOutcome};
use crate::config::CorruptionConfig;
use crate::math::sampling::{choose_uniform, fraction_count, sample_rows};
use crate::GeneratorError;
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Missing values hidden behind placeholder text instead of real nulls.
///
/// A fraction of `product_cost` cells get a sentinel drawn per row (the absent-value
/// marker among them); a separate fraction of `competitor_price` cells get a fixed
/// phrase.
#[derive(Debug, Clone)]
pub struct HiddenNulls {
    cost_fraction: f64,
    cost_seed: u64,
    sentinels: Vec<Option<String>>,
    competitor_fraction: f64,
    competitor_seed: u64,
    competitor_text: String,
}

impl HiddenNulls {
    pub fn from_config(config: &CorruptionConfig) -> Self {
        Self {
            cost_fraction: config.missing_cost_fraction,
            cost_seed: config.missing_cost_seed,
            sentinels: config.missing_cost_sentinels.clone(),
            competitor_fraction: config.missing_competitor_fraction,
            competitor_seed: config.missing_competitor_seed,
            competitor_text: config.missing_competitor_text.clone(),
        }
    }
}

impl CorruptionRule for HiddenNulls {
    fn name(&self) -> &'static str {
        "hidden_nulls"
    }

    fn apply(&self, df: &mut DataFrame) -> Result<Vec<RuleOutcome>, GeneratorError> {
        let height = df.height();

        let mut rng = StdRng::seed_from_u64(self.cost_seed);
        let cost_rows = sample_rows(&mut rng, height, fraction_count(self.cost_fraction, height));
        let sentinels = choose_uniform(&mut rng, &self.sentinels, cost_rows.len())?;
        overwrite_text(df, "product_cost", &cost_rows, sentinels)?;

        let mut rng = StdRng::seed_from_u64(self.competitor_seed);
        let competitor_rows = sample_rows(
            &mut rng,
            height,
            fraction_count(self.competitor_fraction, height),
        );
        let phrase = vec![Some(self.competitor_text.clone()); competitor_rows.len()];
        overwrite_text(df, "competitor_price", &competitor_rows, phrase)?;

        Ok(vec![
            RuleOutcome::new(
                self.name(),
                "product_cost",
                cost_rows.len(),
                "placeholder text or empty cell instead of a cost",
            ),
            RuleOutcome::new(
                self.name(),
                "competitor_price",
                competitor_rows.len(),
                format!("'{}' instead of a price", self.competitor_text),
            ),
        ])
    }
}
