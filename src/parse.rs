use std::str::FromStr;

use csv::StringRecord;
use miette::Diagnostic;
use thiserror::Error;
use time::{Date, Month};

use crate::daily::{DailyWeather, TRACE};
use crate::history::HistoricalWeather;

/// The column numbers where each kind of information appears in a daily
/// climate row. For example, column 9 holds the maximum temperature.
pub mod columns {
    pub const LONGITUDE: usize = 0;
    pub const LATITUDE: usize = 1;
    pub const STATION_NAME: usize = 2;
    pub const CLIMATE_ID: usize = 3;
    pub const DATE: usize = 4;
    pub const YEAR: usize = 5;
    pub const MONTH: usize = 6;
    pub const DAY: usize = 7;
    pub const DATA_QUALITY: usize = 8;
    pub const MAX_TEMP: usize = 9;
    pub const MAX_TEMP_FLAG: usize = 10;
    pub const MIN_TEMP: usize = 11;
    pub const MIN_TEMP_FLAG: usize = 12;
    pub const MEAN_TEMP: usize = 13;
    pub const MEAN_TEMP_FLAG: usize = 14;
    pub const HEAT_DEG_DAYS: usize = 15;
    pub const HEAT_DEG_DAYS_FLAG: usize = 16;
    pub const COOL_DEG_DAYS: usize = 17;
    pub const COOL_DEG_DAYS_FLAG: usize = 18;
    pub const TOTAL_RAIN: usize = 19;
    pub const TOTAL_RAIN_FLAG: usize = 20;
    pub const TOTAL_SNOW: usize = 21;
    pub const TOTAL_SNOW_FLAG: usize = 22;
    pub const TOTAL_PRECIP: usize = 23;
    pub const TOTAL_PRECIP_FLAG: usize = 24;
    pub const SNOW_ON_GRND: usize = 25;
    pub const SNOW_ON_GRND_FLAG: usize = 26;
    pub const DIR_MAX_GUST: usize = 27;
    pub const DIR_MAX_GUST_FLAG: usize = 28;
    pub const SPD_MAX_GUST: usize = 29;
    pub const SPD_MAX_GUST_FLAG: usize = 30;
}

/// Marker in a flag column for a trace measurement.
const TRACE_FLAG: &str = "T";

/// Why a single row was rejected. Rejected rows are dropped by
/// [`parse_rows`], never surfaced to the caller.
#[derive(Debug, Error, Diagnostic)]
pub enum RowError {
    #[error("missing column {0}")]
    MissingColumn(usize),
    #[error("unparseable number in column {column}: {value:?}")]
    BadNumber { column: usize, value: String },
    #[error("impossible calendar date")]
    BadDate(#[from] time::error::ComponentRange),
}

/// One well-formed row: where it was measured, when, and what fell.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRow {
    pub station: String,
    /// (latitude, longitude), in degrees.
    pub coordinates: (f32, f32),
    pub date: Date,
    pub weather: DailyWeather,
}

fn field(record: &StringRecord, column: usize) -> Result<&str, RowError> {
    record.get(column).ok_or(RowError::MissingColumn(column))
}

fn number<T: FromStr>(record: &StringRecord, column: usize) -> Result<T, RowError> {
    let value = field(record, column)?;
    value.trim().parse().map_err(|_| RowError::BadNumber {
        column,
        value: value.to_string(),
    })
}

/// A precipitation column holds [`TRACE`] when its flag column reads `"T"`,
/// otherwise it must parse as a plain number.
fn precipitation(record: &StringRecord, column: usize, flag: usize) -> Result<f32, RowError> {
    if field(record, flag)? == TRACE_FLAG {
        Ok(TRACE)
    } else {
        number(record, column)
    }
}

/// Parses one row of the daily climate layout. The header row and any
/// damaged row fail here and are dropped by [`parse_rows`].
pub fn parse_row(record: &StringRecord) -> Result<ParsedRow, RowError> {
    let longitude: f32 = number(record, columns::LONGITUDE)?;
    let latitude: f32 = number(record, columns::LATITUDE)?;
    let mean_temp: f32 = number(record, columns::MEAN_TEMP)?;
    let min_temp: f32 = number(record, columns::MIN_TEMP)?;
    let max_temp: f32 = number(record, columns::MAX_TEMP)?;

    let year: i32 = number(record, columns::YEAR)?;
    let month: u8 = number(record, columns::MONTH)?;
    let day: u8 = number(record, columns::DAY)?;

    let total_precip = precipitation(record, columns::TOTAL_PRECIP, columns::TOTAL_PRECIP_FLAG)?;
    let total_snow = precipitation(record, columns::TOTAL_SNOW, columns::TOTAL_SNOW_FLAG)?;
    let total_rain = precipitation(record, columns::TOTAL_RAIN, columns::TOTAL_RAIN_FLAG)?;

    let date = Date::from_calendar_date(year, Month::try_from(month)?, day)?;

    Ok(ParsedRow {
        station: field(record, columns::STATION_NAME)?.to_string(),
        coordinates: (latitude, longitude),
        date,
        weather: DailyWeather {
            avg_temp: mean_temp,
            low_temp: min_temp,
            high_temp: max_temp,
            precipitation: total_precip,
            rainfall: total_rain,
            snowfall: total_snow,
        },
    })
}

/// Builds one location's history from raw rows, dropping every row that
/// does not parse. Returns `None` when no usable row remains, as with a
/// header-only or empty source.
///
/// The first surviving row names the station and fixes its coordinates.
/// When a date repeats, the earliest row wins.
pub fn parse_rows<I>(rows: I) -> Option<HistoricalWeather>
where
    I: IntoIterator<Item = StringRecord>,
{
    let mut history: Option<HistoricalWeather> = None;
    for record in rows {
        let row = match parse_row(&record) {
            Ok(row) => row,
            Err(_) => continue,
        };
        let history = history
            .get_or_insert_with(|| HistoricalWeather::new(row.station.clone(), row.coordinates));
        history.add_weather(row.date, row.weather);
    }
    history
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> StringRecord {
        StringRecord::from(vec![
            "Longitude (x)",
            "Latitude (y)",
            "Station Name",
            "Climate ID",
            "Date/Time",
            "Year",
            "Month",
            "Day",
            "Data Quality",
            "Max Temp (C)",
            "Max Temp Flag",
            "Min Temp (C)",
            "Min Temp Flag",
            "Mean Temp (C)",
            "Mean Temp Flag",
            "Heat Deg Days (C)",
            "Heat Deg Days Flag",
            "Cool Deg Days (C)",
            "Cool Deg Days Flag",
            "Total Rain (mm)",
            "Total Rain Flag",
            "Total Snow (cm)",
            "Total Snow Flag",
            "Total Precip (mm)",
            "Total Precip Flag",
            "Snow on Grnd (cm)",
            "Snow on Grnd Flag",
            "Dir of Max Gust (10s deg)",
            "Dir of Max Gust Flag",
            "Spd of Max Gust (km/h)",
            "Spd of Max Gust Flag",
        ])
    }

    fn row(year: &str, month: &str, day: &str) -> StringRecord {
        let mut fields = vec![String::new(); 31];
        fields[columns::LONGITUDE] = "-89.33".into();
        fields[columns::LATITUDE] = "48.37".into();
        fields[columns::STATION_NAME] = "THUNDER BAY".into();
        fields[columns::CLIMATE_ID] = "4027888".into();
        fields[columns::DATE] = format!("{year}-{month}-{day}");
        fields[columns::YEAR] = year.into();
        fields[columns::MONTH] = month.into();
        fields[columns::DAY] = day.into();
        fields[columns::MAX_TEMP] = "3.1".into();
        fields[columns::MIN_TEMP] = "-8.8".into();
        fields[columns::MEAN_TEMP] = "-2.9".into();
        fields[columns::HEAT_DEG_DAYS] = "20.9".into();
        fields[columns::COOL_DEG_DAYS] = "0.0".into();
        fields[columns::TOTAL_RAIN] = "0.5".into();
        fields[columns::TOTAL_SNOW] = "1.2".into();
        fields[columns::TOTAL_PRECIP] = "1.7".into();
        StringRecord::from(fields)
    }

    fn date(year: i32, month: u8, day: u8) -> Date {
        Date::from_calendar_date(year, Month::try_from(month).unwrap(), day).unwrap()
    }

    #[test]
    fn header_only_source_has_no_data() {
        assert!(parse_rows([header()]).is_none());
    }

    #[test]
    fn empty_source_has_no_data() {
        assert!(parse_rows(std::iter::empty()).is_none());
    }

    #[test]
    fn well_formed_row_round_trips() {
        let history = parse_rows([header(), row("2017", "3", "11")]).unwrap();

        assert_eq!(history.name, "THUNDER BAY");
        assert_eq!(history.coordinates, (48.37, -89.33));
        let weather = history.retrieve_weather(date(2017, 3, 11)).unwrap();
        assert_eq!(weather.avg_temp, -2.9);
        assert_eq!(weather.low_temp, -8.8);
        assert_eq!(weather.high_temp, 3.1);
        assert_eq!(weather.precipitation, 1.7);
        assert_eq!(weather.rainfall, 0.5);
        assert_eq!(weather.snowfall, 1.2);
    }

    #[test]
    fn unparseable_temperature_drops_the_row() {
        let mut bad = row("2017", "3", "11");
        let mut fields: Vec<String> = bad.iter().map(String::from).collect();
        fields[columns::MEAN_TEMP] = "M".into();
        bad = StringRecord::from(fields);

        assert!(parse_rows([header(), bad]).is_none());
    }

    #[test]
    fn short_row_is_dropped() {
        let stub = StringRecord::from(vec!["-89.33", "48.37", "THUNDER BAY"]);
        assert!(parse_rows([stub]).is_none());
    }

    #[test]
    fn impossible_date_drops_the_row() {
        assert!(parse_rows([row("2017", "2", "30")]).is_none());
        assert!(parse_rows([row("2017", "13", "1")]).is_none());
    }

    #[test]
    fn damaged_rows_do_not_take_good_ones_down() {
        let history = parse_rows([
            header(),
            row("2017", "3", "11"),
            row("2017", "2", "30"),
            row("2017", "3", "12"),
        ])
        .unwrap();

        assert_eq!(history.len(), 2);
        assert!(history.retrieve_weather(date(2017, 3, 12)).is_some());
    }

    #[test]
    fn trace_flag_becomes_the_sentinel() {
        let mut fields: Vec<String> = row("2020", "12", "30").iter().map(String::from).collect();
        fields[columns::TOTAL_SNOW] = String::new();
        fields[columns::TOTAL_SNOW_FLAG] = "T".into();
        let history = parse_rows([StringRecord::from(fields)]).unwrap();

        let weather = history.retrieve_weather(date(2020, 12, 30)).unwrap();
        assert_eq!(weather.snowfall, TRACE);
        assert_eq!(weather.rainfall, 0.5);
    }

    #[test]
    fn unflagged_empty_precipitation_drops_the_row() {
        let mut fields: Vec<String> = row("2020", "12", "30").iter().map(String::from).collect();
        fields[columns::TOTAL_SNOW] = String::new();

        assert!(parse_rows([StringRecord::from(fields)]).is_none());
    }

    #[test]
    fn identity_comes_from_the_first_surviving_row() {
        let mut fields: Vec<String> = row("2017", "3", "12").iter().map(String::from).collect();
        fields[columns::STATION_NAME] = "SOMEWHERE ELSE".into();
        let renamed = StringRecord::from(fields);

        let history = parse_rows([header(), row("2017", "3", "11"), renamed]).unwrap();
        assert_eq!(history.name, "THUNDER BAY");
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn repeated_date_keeps_the_first_row() {
        let mut fields: Vec<String> = row("2017", "3", "11").iter().map(String::from).collect();
        fields[columns::MEAN_TEMP] = "5.5".into();
        let repeat = StringRecord::from(fields);

        let history = parse_rows([row("2017", "3", "11"), repeat]).unwrap();
        assert_eq!(
            history.retrieve_weather(date(2017, 3, 11)).unwrap().avg_temp,
            -2.9
        );
    }

    #[test]
    fn parse_row_reports_what_is_wrong() {
        assert!(matches!(
            parse_row(&header()),
            Err(RowError::BadNumber { .. })
        ));
        assert!(matches!(
            parse_row(&StringRecord::from(vec!["1.0"])),
            Err(RowError::MissingColumn(_))
        ));
        assert!(matches!(
            parse_row(&row("2017", "2", "30")),
            Err(RowError::BadDate(_))
        ));
    }
}
