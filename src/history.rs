use std::collections::{BTreeMap, HashMap};
use std::fmt;

use miette::Diagnostic;
use thiserror::Error;
use time::{Date, Month};

use crate::daily::{DailyWeather, TRACE};

const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

fn short_name(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

/// An aggregate query was asked of a store that lacks the data it needs.
#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum QueryError {
    #[error("no weather recorded on {month} {day} in any year")]
    NoSuchDay { month: Month, day: u8 },
    #[error("no weather recorded")]
    Empty,
    #[error("no measurable rainfall or snowfall recorded")]
    NoMeasurablePrecipitation,
}

/// Daily weather records for a fixed place on Earth.
///
/// Records are keyed by date and may have gaps: there can be data for
/// Jan 1 and Jan 5 but not for the days in between.
#[derive(Debug, Clone)]
pub struct HistoricalWeather {
    pub name: String,
    /// (latitude, longitude), in degrees.
    pub coordinates: (f32, f32),
    records: BTreeMap<Date, DailyWeather>,
}

impl HistoricalWeather {
    /// A store with no recorded weather so far.
    pub fn new(name: impl Into<String>, coordinates: (f32, f32)) -> Self {
        Self {
            name: name.into(),
            coordinates,
            records: BTreeMap::new(),
        }
    }

    /// Records that `weather` was the weather on `date`. If that date was
    /// already recorded, the earlier record wins and this is a no-op.
    pub fn add_weather(&mut self, date: Date, weather: DailyWeather) {
        self.records.entry(date).or_insert(weather);
    }

    /// The weather on `date`, if it was recorded.
    pub fn retrieve_weather(&self, date: Date) -> Option<&DailyWeather> {
        self.records.get(&date)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in chronological order.
    pub fn days(&self) -> impl Iterator<Item = (Date, &DailyWeather)> {
        self.records.iter().map(|(date, weather)| (*date, weather))
    }

    /// The highest temperature recorded on the given month and day in any
    /// year.
    pub fn record_high(&self, month: Month, day: u8) -> Result<f32, QueryError> {
        self.records
            .iter()
            .filter(|(date, _)| date.month() == month && date.day() == day)
            .map(|(_, weather)| weather.high_temp)
            .reduce(f32::max)
            .ok_or(QueryError::NoSuchDay { month, day })
    }

    /// For each of the 12 months, the average of the low temperatures over
    /// every recorded date falling in that month, in any year. Months with
    /// no recorded weather map to `None`.
    ///
    /// Keys are the fixed three-letter names `Jan` through `Dec`.
    pub fn monthly_average(&self) -> HashMap<&'static str, Option<f32>> {
        let mut averages = HashMap::new();
        for month in MONTHS {
            let lows: Vec<f32> = self
                .records
                .iter()
                .filter(|(date, _)| date.month() == month)
                .map(|(_, weather)| weather.low_temp)
                .collect();
            let average = if lows.is_empty() {
                None
            } else {
                Some(lows.iter().sum::<f32>() / lows.len() as f32)
            };
            averages.insert(short_name(month), average);
        }
        averages
    }

    /// The start date and length of the longest run of calendar-consecutive
    /// recorded days that all precipitated (see
    /// [`DailyWeather::is_precipitating`]). A single missing or dry day ends
    /// a run. Ties keep the earliest start date.
    pub fn contiguous_precipitation(&self) -> Result<(Date, u32), QueryError> {
        let mut best_start = None;
        let mut best_length = 0;
        for &start in self.records.keys() {
            let mut cursor = start;
            let mut length = 0;
            while self
                .records
                .get(&cursor)
                .is_some_and(|weather| weather.is_precipitating())
            {
                length += 1;
                match cursor.next_day() {
                    Some(next) => cursor = next,
                    None => break,
                }
            }
            if best_start.is_none() || length > best_length {
                best_start = Some(start);
                best_length = length;
            }
        }
        best_start
            .map(|start| (start, best_length))
            .ok_or(QueryError::Empty)
    }

    /// The fraction of all measured snowfall and rainfall that was snow,
    /// computed as `total snow / (total snow + total rain)` with units
    /// ignored (1 mm of rain weighs like 1 cm of snow). Trace amounts are
    /// left out of both totals.
    pub fn percentage_snowfall(&self) -> Result<f32, QueryError> {
        let mut snow = 0.0;
        let mut rain = 0.0;
        for weather in self.records.values() {
            if weather.snowfall != TRACE {
                snow += weather.snowfall;
            }
            if weather.rainfall != TRACE {
                rain += weather.rainfall;
            }
        }
        if snow + rain == 0.0 {
            return Err(QueryError::NoMeasurablePrecipitation);
        }
        Ok(snow / (snow + rain))
    }
}

impl fmt::Display for HistoricalWeather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {}):",
            self.name, self.coordinates.0, self.coordinates.1
        )?;
        for (date, weather) in self.days() {
            write!(f, "\n{date}: {weather}")?;
        }
        Ok(())
    }
}
