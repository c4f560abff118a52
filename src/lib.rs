//! In-memory archive of daily weather observations, grouped per location
//! and per country, with the aggregate queries a climate summary needs and
//! a loader for the daily climate CSV layout.

mod country;
mod daily;
mod history;
mod load;
mod parse;

pub use country::Country;
pub use daily::{DailyWeather, TRACE};
pub use history::{HistoricalWeather, QueryError};
pub use load::{load_country, load_data, LoadError};
pub use parse::{columns, parse_row, parse_rows, ParsedRow, RowError};
