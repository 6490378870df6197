use crate::GeneratorError;
use polars::prelude::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Writes `df` as a comma-separated file with a header row.
///
/// Columns keep their order, dates render as `YYYY-MM-DD` and null cells as empty
/// fields. The file is open only for the duration of the write.
pub fn write_csv(df: &mut DataFrame, path: impl AsRef<Path>) -> Result<(), GeneratorError> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    CsvWriter::new(&mut writer)
        .include_header(true)
        .finish(df)?;
    writer.flush()?;
    info!(path = %path.display(), rows = df.height(), "dataset written");
    Ok(())
}
