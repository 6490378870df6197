use super::{CorruptionRule, RuleOutcome};
use crate::config::CorruptionConfig;
use crate::math::sampling::sample_rows_exact;
use crate::GeneratorError;
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Exact copies of existing rows, appended to the end of the table with whatever
/// (possibly already corrupted) values they hold.
#[derive(Debug, Clone)]
pub struct DuplicateRows {
    rows: usize,
    seed: u64,
}

impl DuplicateRows {
    pub fn from_config(config: &CorruptionConfig) -> Self {
        Self {
            rows: config.duplicate_rows,
            seed: config.duplicate_seed,
        }
    }
}

impl CorruptionRule for DuplicateRows {
    fn name(&self) -> &'static str {
        "duplicate_rows"
    }

    fn apply(&self, df: &mut DataFrame) -> Result<Vec<RuleOutcome>, GeneratorError> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let picked: Vec<IdxSize> = sample_rows_exact(&mut rng, df.height(), self.rows)
            .into_iter()
            .map(|row| row as IdxSize)
            .collect();
        let copies = df.take(&IdxCa::from_vec("row".into(), picked))?;
        df.vstack_mut(&copies)?;
        Ok(vec![RuleOutcome::new(
            self.name(),
            "*",
            copies.height(),
            "rows copied to the end of the table",
        )])
    }

    fn runs_last(&self) -> bool {
        true
    }
}
