use std::fmt;

/// Sentinel recorded when a measurement was present but too small to
/// measure ("trace amounts").
pub const TRACE: f32 = -1.0;

/// Weather facts for a single day.
///
/// Temperatures are in degrees Celsius, with
/// `low_temp <= avg_temp <= high_temp`. Precipitation and rainfall are in
/// mm, snowfall in cm; each of the three is either a non-negative total or
/// [`TRACE`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyWeather {
    pub avg_temp: f32,
    pub low_temp: f32,
    pub high_temp: f32,
    pub precipitation: f32,
    pub rainfall: f32,
    pub snowfall: f32,
}

impl DailyWeather {
    /// A day counts as precipitating when anything at all fell, even a
    /// trace.
    pub fn is_precipitating(&self) -> bool {
        self.precipitation > 0.0 || self.precipitation == TRACE
    }
}

impl fmt::Display for DailyWeather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Average: {} Low: {} High: {} Precipitation: {} Snow: {} Rain: {}",
            self.avg_temp,
            self.low_temp,
            self.high_temp,
            self.precipitation,
            self.snowfall,
            self.rainfall
        )
    }
}
