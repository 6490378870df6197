use chrono::NaiveDate;
use messy_transactions::DatasetBuilder;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let n_rows = 10_000;

    let mut builder = DatasetBuilder::new()?;
    builder.transactions(n_rows).seed(42).date_range(
        NaiveDate::from_ymd_opt(2023, 1, 1).ok_or("invalid start date")?,
        NaiveDate::from_ymd_opt(2023, 12, 31).ok_or("invalid end date")?,
    );
    let mut dataset = builder.run()?;

    println!("Pristine sample:");
    println!("{}", dataset.pristine().head(Some(5)));
    println!("Dirty sample:");
    println!("{}", dataset.dirty().tail(Some(5)));

    dataset.write_csv("sample_10k.csv")?;
    println!("Generated sample_10k.csv with {} rows.", dataset.dirty().height());
    println!("{}", dataset.report().to_markdown());
    Ok(())
}
