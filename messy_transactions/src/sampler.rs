//! Draws the pristine transaction table in one batch.
//!
//! Every column is produced as a whole array: random draws for all rows first,
//! then masks and element-wise arithmetic. The order of draws from the single
//! seeded generator is fixed, so a seed fully determines the table.

use crate::catalog::Catalog;
use crate::config::{
    DiscountRule, DiscountSegment, GenerationConfig, MULTI_QUANTITY_PRICE_THRESHOLD,
    ORDER_ID_BASE, SEASONAL_SHIFT_DAYS,
};
use crate::math::sampling::{choose_uniform, choose_weighted, weighted_indices};
use crate::GeneratorError;
use chrono::{Datelike, NaiveDate};
use ndarray::{Array1, Zip};
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

/// Days from 0001-01-01 (CE day 1) to the Unix epoch.
const UNIX_EPOCH_FROM_CE: i32 = 719_163;

/// Column order of both the pristine and the dirty table.
pub const TRANSACTION_COLUMNS: [&str; 11] = [
    "order_id",
    "order_date",
    "product_id",
    "product_name",
    "category",
    "list_price",
    "discount_applied",
    "final_price",
    "quantity",
    "product_cost",
    "competitor_price",
];

pub(crate) fn epoch_days(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_FROM_CE
}

pub(crate) fn date_from_epoch_days(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days + UNIX_EPOCH_FROM_CE)
}

fn is_holiday_quarter(days: i32) -> bool {
    date_from_epoch_days(days)
        .map(|d| d.month() >= 10)
        .unwrap_or(false)
}

/// Builder for the pristine transaction table.
#[derive(Debug, Clone)]
pub struct TransactionSampler<'a> {
    catalog: &'a Catalog,
    config: GenerationConfig,
}

impl<'a> TransactionSampler<'a> {
    /// Creates a sampler over `catalog` with the default dataset parameters.
    pub fn new(catalog: &'a Catalog) -> Self {
        Self::with_config(catalog, GenerationConfig::default())
    }

    pub fn with_config(catalog: &'a Catalog, config: GenerationConfig) -> Self {
        Self { catalog, config }
    }

    /// Sets the number of transactions to draw.
    pub fn transactions(&mut self, n: usize) -> &mut Self {
        self.config.transactions = n;
        self
    }

    /// Sets the order-date range. `end` is exclusive.
    pub fn date_range(&mut self, start: NaiveDate, end: NaiveDate) -> &mut Self {
        self.config.start_date = start;
        self.config.end_date = end;
        self
    }

    /// Sets the seed of the random stream.
    pub fn seed(&mut self, seed: u64) -> &mut Self {
        self.config.seed = seed;
        self
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Draws the pristine table.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::InvalidConfig`] when no transactions are requested,
    /// the date range is empty, or a probability table is unusable.
    pub fn run(&self) -> Result<DataFrame, GeneratorError> {
        let n = self.config.transactions;
        if n == 0 {
            return Err(GeneratorError::InvalidConfig(
                "at least one transaction is required".to_string(),
            ));
        }
        let span = (self.config.end_date - self.config.start_date).num_days();
        if span <= 0 {
            return Err(GeneratorError::InvalidConfig(format!(
                "empty date range {} .. {}",
                self.config.start_date, self.config.end_date
            )));
        }
        let span = i32::try_from(span).map_err(|_| {
            GeneratorError::InvalidConfig(format!("date range of {} days is too long", span))
        })?;

        let mut rng = StdRng::seed_from_u64(self.config.seed);
        info!(transactions = n, seed = self.config.seed, "sampling pristine transactions");

        let order_days = self.sample_order_days(&mut rng, n, span);

        let products = self.catalog.products();
        let weights: Vec<f64> = products
            .iter()
            .map(|p| 1.0 / p.list_price().sqrt())
            .collect();
        let picks = weighted_indices(&mut rng, &weights, n)?;

        let list_price: Array1<f64> = picks.iter().map(|&i| *products[i].list_price()).collect();
        let cost_factor: Array1<f64> = picks.iter().map(|&i| *products[i].cost_factor()).collect();
        let categories: Vec<&str> = picks
            .iter()
            .map(|&i| products[i].category().as_str())
            .collect();

        let discounts = self.sample_discounts(&mut rng, &categories)?;

        let final_price = &list_price * &discounts.mapv(|d| 1.0 - d);
        let quantity = self.sample_quantities(&mut rng, &final_price)?;
        let product_cost = &list_price * &cost_factor;

        let (low, high) = self.config.competitor_spread;
        let spread: Array1<f64> = Array1::from_shape_fn(n, |_| rng.gen_range(low..high));
        let competitor_price = &list_price * &spread;

        let order_ids: Vec<i64> = (0..n as i64).map(|i| ORDER_ID_BASE + i).collect();
        let order_date = Series::new("order_date".into(), order_days.to_vec())
            .cast(&DataType::Date)?;

        let columns: Vec<Column> = vec![
            Series::new("order_id".into(), order_ids).into(),
            order_date.into(),
            Series::new(
                "product_id".into(),
                picks.iter().map(|&i| *products[i].product_id()).collect::<Vec<i64>>(),
            )
            .into(),
            Series::new(
                "product_name".into(),
                picks
                    .iter()
                    .map(|&i| products[i].product_name().as_str())
                    .collect::<Vec<&str>>(),
            )
            .into(),
            Series::new("category".into(), categories).into(),
            Series::new("list_price".into(), list_price.to_vec()).into(),
            Series::new("discount_applied".into(), discounts.to_vec()).into(),
            Series::new("final_price".into(), final_price.to_vec()).into(),
            Series::new("quantity".into(), quantity.to_vec()).into(),
            Series::new("product_cost".into(), product_cost.to_vec()).into(),
            Series::new("competitor_price".into(), competitor_price.to_vec()).into(),
        ];
        let df = DataFrame::new(columns)?;
        info!(rows = df.height(), "pristine transactions generated");
        Ok(df)
    }

    /// Uniform days in the range, then every date outside Oct-Dec is pulled earlier
    /// by up to [`SEASONAL_SHIFT_DAYS`]. Shifted dates may precede the range start.
    fn sample_order_days(&self, rng: &mut StdRng, n: usize, span: i32) -> Array1<i32> {
        let start = epoch_days(self.config.start_date);
        let initial: Array1<i32> = Array1::from_shape_fn(n, |_| start + rng.gen_range(0..span));
        let shifts: Array1<i32> =
            Array1::from_shape_fn(n, |_| rng.gen_range(0..SEASONAL_SHIFT_DAYS));
        let holiday = initial.mapv(is_holiday_quarter);
        debug!(
            kept = holiday.iter().filter(|&&q| q).count(),
            "order dates already in the holiday quarter"
        );
        Zip::from(&initial)
            .and(&holiday)
            .and(&shifts)
            .map_collect(|&day, &keep, &shift| if keep { day } else { day - shift })
    }

    fn sample_discounts(
        &self,
        rng: &mut StdRng,
        categories: &[&str],
    ) -> Result<Array1<f64>, GeneratorError> {
        let n = categories.len();
        let named: Vec<&str> = self
            .config
            .discount_rules
            .iter()
            .filter_map(|rule| match &rule.segment {
                DiscountSegment::Category(c) => Some(c.as_str()),
                DiscountSegment::Remaining => None,
            })
            .collect();

        let mut discounts = Array1::<f64>::zeros(n);
        for rule in &self.config.discount_rules {
            let draws: Array1<f64> = Array1::from_shape_fn(n, |_| rng.gen::<f64>());
            let selected: Vec<usize> = (0..n)
                .filter(|&i| in_segment(rule, categories[i], &named) && draws[i] < rule.probability)
                .collect();
            let amounts = choose_uniform(rng, &rule.choices, selected.len())?;
            for (&row, amount) in selected.iter().zip(amounts) {
                discounts[row] = amount;
            }
            debug!(segment = ?rule.segment, rows = selected.len(), "discounts applied");
        }
        Ok(discounts)
    }

    /// Quantity is 1, except rows priced under the threshold redraw from the
    /// configured multi-buy distribution.
    fn sample_quantities(
        &self,
        rng: &mut StdRng,
        final_price: &Array1<f64>,
    ) -> Result<Array1<i64>, GeneratorError> {
        let mut quantity = Array1::<i64>::ones(final_price.len());
        let cheap: Vec<usize> = final_price
            .indexed_iter()
            .filter(|(_, &price)| price < MULTI_QUANTITY_PRICE_THRESHOLD)
            .map(|(i, _)| i)
            .collect();
        let drawn = choose_weighted(rng, &self.config.cheap_quantities, cheap.len())?;
        for (&row, q) in cheap.iter().zip(drawn) {
            quantity[row] = q;
        }
        Ok(quantity)
    }
}

fn in_segment(rule: &DiscountRule, category: &str, named: &[&str]) -> bool {
    match &rule.segment {
        DiscountSegment::Category(c) => c == category,
        DiscountSegment::Remaining => !named.contains(&category),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_day_conversion_round_trips() {
        let date = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
        assert_eq!(epoch_days(NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()), 0);
        assert_eq!(epoch_days(date), 18_993);
        assert_eq!(date_from_epoch_days(epoch_days(date)), Some(date));
    }

    #[test]
    fn holiday_quarter_is_october_to_december() {
        let day = |y, m, d| epoch_days(NaiveDate::from_ymd_opt(y, m, d).unwrap());
        assert!(is_holiday_quarter(day(2022, 10, 1)));
        assert!(is_holiday_quarter(day(2023, 12, 31)));
        assert!(!is_holiday_quarter(day(2022, 9, 30)));
        assert!(!is_holiday_quarter(day(2022, 1, 1)));
    }

    #[test]
    fn remaining_segment_excludes_named_categories() {
        let rule = DiscountRule {
            segment: DiscountSegment::Remaining,
            probability: 0.1,
            choices: vec![0.05],
        };
        let named = ["Apparel", "Electronics"];
        assert!(in_segment(&rule, "Books", &named));
        assert!(!in_segment(&rule, "Apparel", &named));
    }

    #[test]
    fn rejects_empty_requests() {
        let catalog = Catalog::standard().unwrap();
        let day = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
        assert!(TransactionSampler::new(&catalog).transactions(0).run().is_err());
        assert!(TransactionSampler::new(&catalog)
            .transactions(5)
            .date_range(day, day)
            .run()
            .is_err());
    }
}
