use std::collections::BTreeMap;
use std::fmt;

use crate::history::{HistoricalWeather, QueryError};

/// The weather records for the locations of a country, keyed by location
/// name.
#[derive(Debug, Clone)]
pub struct Country {
    pub name: String,
    histories: BTreeMap<String, HistoricalWeather>,
}

impl Country {
    /// A country with no weather history so far.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            histories: BTreeMap::new(),
        }
    }

    /// Adds a location's history, keyed by its own name. If that name is
    /// already present, the existing history wins and this is a no-op.
    pub fn add_history(&mut self, history: HistoricalWeather) {
        self.histories.entry(history.name.clone()).or_insert(history);
    }

    /// The history for the location called `name`, if one was added.
    pub fn retrieve_history(&self, name: &str) -> Option<&HistoricalWeather> {
        self.histories.get(name)
    }

    pub fn len(&self) -> usize {
        self.histories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.histories.is_empty()
    }

    /// All locations in name order.
    pub fn locations(&self) -> impl Iterator<Item = &HistoricalWeather> {
        self.histories.values()
    }

    /// The location with the highest [`HistoricalWeather::percentage_snowfall`],
    /// together with that share. `Ok(None)` when the country holds no
    /// locations. Ties keep the first location in name order.
    ///
    /// A location with no measurable rainfall or snowfall fails the whole
    /// query; a winner is never computed from partial data.
    pub fn snowiest_location(&self) -> Result<Option<(&str, f32)>, QueryError> {
        let mut snowiest: Option<(&str, f32)> = None;
        for history in self.histories.values() {
            let share = history.percentage_snowfall()?;
            let beats = match snowiest {
                Some((_, best)) => share > best,
                None => true,
            };
            if beats {
                snowiest = Some((history.name.as_str(), share));
            }
        }
        Ok(snowiest)
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.name)?;
        for history in self.locations() {
            write!(f, "\n{history}")?;
        }
        Ok(())
    }
}
