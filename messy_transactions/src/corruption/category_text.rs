use super::{CorruptionRule, RuleOutcome};
use crate::config::{CategoryVariants, CorruptionConfig};
use crate::math::sampling::choose_weighted;
use crate::GeneratorError;
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
use tracing::debug;

/// Inconsistent category labels.
///
/// One replacement is chosen per canonical category for the whole run, so every
/// row of that category carries the same variant text.
#[derive(Debug, Clone)]
pub struct CategoryText {
    seed: u64,
    variants: Vec<CategoryVariants>,
}

impl CategoryText {
    pub fn from_config(config: &CorruptionConfig) -> Self {
        Self {
            seed: config.category_seed,
            variants: config.category_variants.clone(),
        }
    }

    /// The canonical → replacement mapping this rule applies, in table order.
    pub fn replacements(&self) -> Result<Vec<(String, String)>, GeneratorError> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        self.variants
            .iter()
            .map(|entry| -> Result<(String, String), GeneratorError> {
                let picked = choose_weighted(&mut rng, &entry.variants, 1)?;
                let text = picked.into_iter().next().ok_or_else(|| {
                    GeneratorError::InvalidConfig(format!(
                        "no variants configured for '{}'",
                        entry.canonical
                    ))
                })?;
                Ok((entry.canonical.clone(), text))
            })
            .collect()
    }
}

impl CorruptionRule for CategoryText {
    fn name(&self) -> &'static str {
        "category_text"
    }

    fn apply(&self, df: &mut DataFrame) -> Result<Vec<RuleOutcome>, GeneratorError> {
        let replacements = self.replacements()?;
        for (canonical, text) in &replacements {
            debug!(canonical = canonical.as_str(), replacement = text.as_str(), "category relabelled");
        }
        let lookup: HashMap<&str, &str> = replacements
            .iter()
            .map(|(c, t)| (c.as_str(), t.as_str()))
            .collect();

        let mut relabelled = 0;
        let labels: Vec<Option<String>> = df
            .column("category")?
            .str()?
            .into_iter()
            .map(|label| {
                label.map(|l| match lookup.get(l) {
                    Some(text) => {
                        relabelled += 1;
                        text.to_string()
                    }
                    None => l.to_string(),
                })
            })
            .collect();
        df.with_column(Series::new("category".into(), labels))?;

        let mapping = replacements
            .iter()
            .map(|(c, t)| format!("{} -> '{}'", c, t))
            .collect::<Vec<_>>()
            .join(", ");
        Ok(vec![RuleOutcome::new(self.name(), "category", relabelled, mapping)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replacements_come_from_the_variant_lists() {
        let config = CorruptionConfig::default();
        let rule = CategoryText::from_config(&config);
        let replacements = rule.replacements().unwrap();
        assert_eq!(replacements.len(), config.category_variants.len());
        for ((canonical, text), entry) in replacements.iter().zip(&config.category_variants) {
            assert_eq!(canonical, &entry.canonical);
            assert!(entry.variants.iter().any(|(v, _)| v == text));
        }
        assert_eq!(replacements, rule.replacements().unwrap());
    }

    #[test]
    fn unlisted_categories_are_left_alone() {
        let rule = CategoryText::from_config(&CorruptionConfig::default());
        let mut df = df!("category" => &["Books", "Apparel", "Books"]).unwrap();
        let outcome = rule.apply(&mut df).unwrap();
        let labels = df.column("category").unwrap().str().unwrap();
        assert_eq!(labels.get(0), Some("Books"));
        assert_eq!(labels.get(1), Some("Apparel "));
        assert_eq!(*outcome[0].rows_affected(), 1);
    }
}
