use chrono::{Datelike, NaiveDate};
use messy_transactions::{Catalog, TransactionSampler, TRANSACTION_COLUMNS};
use polars::prelude::*;
use std::collections::HashMap;

const APPAREL_DISCOUNTS: [f64; 7] = [0.0, 0.10, 0.15, 0.20, 0.25, 0.30, 0.50];
const ELECTRONICS_DISCOUNTS: [f64; 5] = [0.0, 0.05, 0.10, 0.15, 0.20];
const OTHER_DISCOUNTS: [f64; 3] = [0.0, 0.05, 0.10];

fn order_months(df: &DataFrame) -> Result<Vec<u32>, Box<dyn std::error::Error>> {
    let days = df
        .column("order_date")?
        .as_materialized_series()
        .cast(&DataType::Int32)?;
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
    Ok(days
        .i32()?
        .into_no_null_iter()
        .map(|d| (epoch + chrono::Duration::days(d as i64)).month())
        .collect())
}

#[test]
fn test_pristine_invariants() -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Catalog::standard()?;
    let df = TransactionSampler::new(&catalog).transactions(20_000).run()?;

    assert_eq!(df.height(), 20_000);
    let names: Vec<&str> = df.get_column_names().iter().map(|s| s.as_str()).collect();
    assert_eq!(names, TRANSACTION_COLUMNS.to_vec());

    let order_id = df.column("order_id")?.i64()?;
    let product_id = df.column("product_id")?.i64()?;
    let category = df.column("category")?.str()?;
    let list_price = df.column("list_price")?.f64()?;
    let discount = df.column("discount_applied")?.f64()?;
    let final_price = df.column("final_price")?.f64()?;
    let quantity = df.column("quantity")?.i64()?;
    let product_cost = df.column("product_cost")?.f64()?;
    let competitor = df.column("competitor_price")?.f64()?;

    for i in 0..df.height() {
        assert_eq!(order_id.get(i), Some(50_000 + i as i64));

        let product = catalog.get(product_id.get(i).unwrap()).unwrap();
        let list = list_price.get(i).unwrap();
        let d = discount.get(i).unwrap();
        let price = final_price.get(i).unwrap();
        let q = quantity.get(i).unwrap();

        assert_eq!(category.get(i), Some(product.category().as_str()));
        assert_eq!(list, *product.list_price());
        assert!((0.0..1.0).contains(&d), "discount {} out of range", d);
        assert!((price - list * (1.0 - d)).abs() < 1e-9);
        assert!((1..=3).contains(&q));
        if price >= 50.0 {
            assert_eq!(q, 1, "expensive rows are bought singly");
        }
        assert!((product_cost.get(i).unwrap() - list * product.cost_factor()).abs() < 1e-9);

        let ratio = competitor.get(i).unwrap() / list;
        assert!((0.92..=1.08).contains(&ratio), "competitor ratio {}", ratio);
    }
    Ok(())
}

#[test]
fn test_discounts_follow_category_rules() -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Catalog::standard()?;
    let df = TransactionSampler::new(&catalog).transactions(20_000).run()?;
    let category = df.column("category")?.str()?;
    let discount = df.column("discount_applied")?.f64()?;

    let mut discounted: HashMap<&str, (usize, usize)> = HashMap::new();
    for (cat, d) in category.into_no_null_iter().zip(discount.into_no_null_iter()) {
        let allowed: &[f64] = match cat {
            "Apparel" => &APPAREL_DISCOUNTS,
            "Electronics" => &ELECTRONICS_DISCOUNTS,
            _ => &OTHER_DISCOUNTS,
        };
        assert!(
            allowed.iter().any(|a| (a - d).abs() < 1e-12),
            "{} got discount {}",
            cat,
            d
        );
        let key = match cat {
            "Apparel" | "Electronics" => cat,
            _ => "other",
        };
        let entry = discounted.entry(key).or_default();
        entry.0 += 1;
        if d > 0.0 {
            entry.1 += 1;
        }
    }

    let share = |key: &str| {
        let (rows, hits) = discounted[key];
        hits as f64 / rows as f64
    };
    assert!((share("Apparel") - 0.4).abs() < 0.05);
    assert!((share("Electronics") - 0.2).abs() < 0.05);
    assert!((share("other") - 0.1).abs() < 0.03);
    Ok(())
}

#[test]
fn test_cheaper_products_sell_more_often() -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Catalog::standard()?;
    let df = TransactionSampler::new(&catalog).transactions(50_000).run()?;
    let product_id = df.column("product_id")?.i64()?;

    let mut counts: HashMap<i64, usize> = HashMap::new();
    for id in product_id.into_no_null_iter() {
        *counts.entry(id).or_default() += 1;
    }
    // Children's Picture Book ($12.99) against the laptop ($2399.99).
    let book = catalog
        .products()
        .iter()
        .find(|p| p.product_name() == "Children's Picture Book")
        .unwrap();
    let laptop = catalog
        .products()
        .iter()
        .find(|p| p.product_name() == "High-End Laptop (16-inch)")
        .unwrap();
    assert!(counts[book.product_id()] > 5 * counts[laptop.product_id()]);
    Ok(())
}

#[test]
fn test_holiday_quarter_is_overrepresented() -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Catalog::standard()?;
    let mut sampler = TransactionSampler::new(&catalog);
    sampler.transactions(50_000);
    let (start, end) = (sampler.config().start_date, sampler.config().end_date);
    let df = sampler.run()?;

    let range_days = (end - start).num_days();
    let q4_days = start
        .iter_days()
        .take(range_days as usize)
        .filter(|d| d.month() >= 10)
        .count();
    let uniform_share = q4_days as f64 / range_days as f64;

    let months = order_months(&df)?;
    let observed_share = months.iter().filter(|&&m| m >= 10).count() as f64 / months.len() as f64;
    assert!(
        observed_share > uniform_share + 0.03,
        "holiday share {} not above uniform {}",
        observed_share,
        uniform_share
    );
    Ok(())
}

#[test]
fn test_shifted_dates_may_precede_the_range() -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Catalog::standard()?;
    let start = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2022, 1, 3).unwrap();
    let df = TransactionSampler::new(&catalog)
        .transactions(500)
        .date_range(start, end)
        .run()?;

    let days = df
        .column("order_date")?
        .as_materialized_series()
        .cast(&DataType::Int32)?;
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
    let earliest = start - chrono::Duration::days(179);
    for d in days.i32()?.into_no_null_iter() {
        let date = epoch + chrono::Duration::days(d as i64);
        assert!(date >= earliest && date < end, "date {} out of bounds", date);
    }
    Ok(())
}

#[test]
fn test_seed_determines_table() -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Catalog::standard()?;
    let a = TransactionSampler::new(&catalog).transactions(2_000).seed(69).run()?;
    let b = TransactionSampler::new(&catalog).transactions(2_000).seed(69).run()?;
    let c = TransactionSampler::new(&catalog).transactions(2_000).seed(70).run()?;
    assert!(a.equals(&b));
    assert!(!a.equals(&c));
    Ok(())
}
