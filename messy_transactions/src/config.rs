//! Run parameters for generation and corruption.
//!
//! Every value here is a fixed constant of the dataset. The structs exist so that
//! tests and library callers can run smaller scenarios with the same code path.

use chrono::NaiveDate;
use std::path::PathBuf;

/// First `order_id` assigned to the pristine table.
pub const ORDER_ID_BASE: i64 = 50_000;

/// Maximum number of days a non-Q4 order date is pushed back.
pub const SEASONAL_SHIFT_DAYS: i32 = 180;

/// Final prices below this threshold may be bought in multiples.
pub const MULTI_QUANTITY_PRICE_THRESHOLD: f64 = 50.0;

/// Which rows of the product sample a discount rule applies to.
#[derive(Debug, Clone, PartialEq)]
pub enum DiscountSegment {
    /// Rows whose product belongs to the named category.
    Category(String),
    /// Rows not claimed by any `Category` segment in the same rule set.
    Remaining,
}

/// A category-conditioned promotion: with `probability`, a row in `segment`
/// receives one of `choices`, drawn uniformly.
#[derive(Debug, Clone)]
pub struct DiscountRule {
    pub segment: DiscountSegment,
    pub probability: f64,
    pub choices: Vec<f64>,
}

/// Parameters of the pristine transaction sampler.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// Number of pristine transactions to draw.
    pub transactions: usize,
    /// Inclusive start of the order-date range.
    pub start_date: NaiveDate,
    /// Exclusive end of the order-date range (before seasonal shifting).
    pub end_date: NaiveDate,
    /// Seed for the sampler's random stream.
    pub seed: u64,
    /// Discount rules, applied in order with non-overlapping segments.
    pub discount_rules: Vec<DiscountRule>,
    /// Quantities offered to cheap rows and their probabilities.
    pub cheap_quantities: Vec<(i64, f64)>,
    /// Competitor price is `list_price` times a uniform factor in this range.
    pub competitor_spread: (f64, f64),
    /// Where the binary writes the dirty table.
    pub output_path: PathBuf,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            transactions: 2_000_000,
            start_date: NaiveDate::from_ymd_opt(2022, 1, 1).expect("valid start date"),
            end_date: NaiveDate::from_ymd_opt(2023, 12, 31).expect("valid end date"),
            seed: 69,
            discount_rules: vec![
                DiscountRule {
                    segment: DiscountSegment::Category("Apparel".to_string()),
                    probability: 0.4,
                    choices: vec![0.10, 0.15, 0.20, 0.25, 0.30, 0.50],
                },
                DiscountRule {
                    segment: DiscountSegment::Category("Electronics".to_string()),
                    probability: 0.2,
                    choices: vec![0.05, 0.10, 0.15, 0.20],
                },
                DiscountRule {
                    segment: DiscountSegment::Remaining,
                    probability: 0.1,
                    choices: vec![0.05, 0.10],
                },
            ],
            cheap_quantities: vec![(1, 0.8), (2, 0.15), (3, 0.05)],
            competitor_spread: (0.92, 1.08),
            output_path: PathBuf::from("transactions_data.csv"),
        }
    }
}

/// Replacement text candidates for one canonical category label.
#[derive(Debug, Clone)]
pub struct CategoryVariants {
    pub canonical: String,
    /// `(replacement, weight)` pairs; one is picked per run.
    pub variants: Vec<(String, f64)>,
}

impl CategoryVariants {
    fn new(canonical: &str, variants: &[(&str, f64)]) -> Self {
        Self {
            canonical: canonical.to_string(),
            variants: variants
                .iter()
                .map(|(text, weight)| (text.to_string(), *weight))
                .collect(),
        }
    }
}

/// Rates, counts and seeds of the corruption battery.
#[derive(Debug, Clone)]
pub struct CorruptionConfig {
    pub missing_cost_fraction: f64,
    pub missing_cost_seed: u64,
    /// Sentinels for `product_cost`; `None` is the absent-value marker.
    pub missing_cost_sentinels: Vec<Option<String>>,
    pub missing_competitor_fraction: f64,
    pub missing_competitor_seed: u64,
    pub missing_competitor_text: String,

    pub currency_price_fraction: f64,
    pub currency_price_seed: u64,
    pub unit_quantity_fraction: f64,
    pub unit_quantity_seed: u64,

    pub category_seed: u64,
    pub category_variants: Vec<CategoryVariants>,

    pub inflated_price_rows: usize,
    pub inflated_price_factor: f64,
    pub inflated_price_seed: u64,
    pub negative_discount_rows: usize,
    pub negative_discount_value: f64,
    pub negative_discount_seed: u64,

    pub duplicate_rows: usize,
    pub duplicate_seed: u64,
}

impl Default for CorruptionConfig {
    fn default() -> Self {
        Self {
            missing_cost_fraction: 0.03,
            missing_cost_seed: 1,
            missing_cost_sentinels: vec![
                Some("missing".to_string()),
                Some("-".to_string()),
                Some("N/A".to_string()),
                None,
            ],
            missing_competitor_fraction: 0.02,
            missing_competitor_seed: 2,
            missing_competitor_text: "not available".to_string(),

            currency_price_fraction: 0.05,
            currency_price_seed: 3,
            unit_quantity_fraction: 0.01,
            unit_quantity_seed: 4,

            category_seed: 8,
            category_variants: vec![
                CategoryVariants::new(
                    "Electronics",
                    &[(" electronics ", 0.5), ("Elec.", 0.3), ("ELECTRONICS", 0.2)],
                ),
                CategoryVariants::new(
                    "Home Goods",
                    &[("Home Goods", 0.7), ("HOME GOODS", 0.2), ("Home & Garden", 0.1)],
                ),
                CategoryVariants::new("Apparel", &[("Apparel ", 1.0)]),
            ],

            inflated_price_rows: 500,
            inflated_price_factor: 1.1,
            inflated_price_seed: 5,
            negative_discount_rows: 200,
            negative_discount_value: -0.1,
            negative_discount_seed: 6,

            duplicate_rows: 1000,
            duplicate_seed: 7,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_discount_segments_do_not_overlap() {
        let config = GenerationConfig::default();
        let named: Vec<_> = config
            .discount_rules
            .iter()
            .filter_map(|r| match &r.segment {
                DiscountSegment::Category(c) => Some(c.clone()),
                DiscountSegment::Remaining => None,
            })
            .collect();
        assert_eq!(named, vec!["Apparel", "Electronics"]);
        assert!(config
            .discount_rules
            .iter()
            .all(|r| r.choices.iter().all(|&d| (0.0..1.0).contains(&d))));
    }

    #[test]
    fn quantity_probabilities_sum_to_one() {
        let total: f64 = GenerationConfig::default()
            .cheap_quantities
            .iter()
            .map(|(_, p)| p)
            .sum();
        assert!((total - 1.0).abs() < 1e-12);
    }
}
