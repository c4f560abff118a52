use std::fs;
use std::path::Path;

use csv::StringRecord;
use miette::Diagnostic;
use thiserror::Error;

use crate::country::Country;
use crate::history::HistoricalWeather;
use crate::parse::parse_rows;

/// Transport-level failures while reading sources. Rows that do not parse
/// are not errors; they are dropped inside [`parse_rows`].
#[derive(Debug, Error, Diagnostic)]
pub enum LoadError {
    #[error("could not list the data folder")]
    Io(#[from] std::io::Error),
    #[error("could not read csv records")]
    Csv(#[from] csv::Error),
}

/// Reads one station's CSV file. Returns `None` when the file holds no
/// usable rows, for example when there is nothing past the header.
pub fn load_data(path: impl AsRef<Path>) -> Result<Option<HistoricalWeather>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        // The header is filtered out like any other unusable row.
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    let mut record = StringRecord::new();
    while reader.read_record(&mut record)? {
        rows.push(record.clone());
    }
    Ok(parse_rows(rows))
}

/// Loads every data file directly under `folder` into one country, one
/// location per file. Dot-files and subdirectories are skipped, and files
/// with no usable rows contribute no location.
pub fn load_country(folder: impl AsRef<Path>, name: impl Into<String>) -> Result<Country, LoadError> {
    let mut country = Country::new(name);
    for entry in fs::read_dir(folder)? {
        let entry = entry?;
        if !entry.path().is_file() {
            continue;
        }
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        if let Some(history) = load_data(entry.path())? {
            country.add_history(history);
        }
    }
    Ok(country)
}
