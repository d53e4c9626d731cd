//! Display values derived from raw API fields
//!
//! Everything here is pure. Inputs are what the weather endpoint returns
//! with `units=metric`: Celsius, percent, metres, m/s, compass degrees and
//! Unix seconds.

use std::fmt;

use chrono::{DateTime, FixedOffset};

use crate::api::WeatherSnapshot;

/// Placeholder for values the payload did not include.
pub const MISSING: &str = "--";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum TempUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TempUnit {
    pub fn toggle(self) -> Self {
        match self {
            TempUnit::Celsius => TempUnit::Fahrenheit,
            TempUnit::Fahrenheit => TempUnit::Celsius,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            TempUnit::Celsius => "C",
            TempUnit::Fahrenheit => "F",
        }
    }

    /// Whole degrees in this unit for a Celsius reading.
    pub fn degrees(self, celsius: f64) -> i64 {
        match self {
            TempUnit::Celsius => round_degrees(celsius),
            TempUnit::Fahrenheit => round_degrees(celsius_to_fahrenheit(celsius)),
        }
    }

    /// `"21°C"`
    pub fn format(self, celsius: f64) -> String {
        format!("{}°{}", self.degrees(celsius), self.symbol())
    }
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

/// Nearest whole degree, halves away from zero.
pub fn round_degrees(value: f64) -> i64 {
    value.round() as i64
}

/// How the air feels, ordered dry to humid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum HumidityLevel {
    Dry,
    Comfortable,
    Humid,
}

impl HumidityLevel {
    /// Below 30 % is dry, above 60 % humid. Values over 100 count as humid.
    pub fn from_percent(percent: u8) -> Self {
        match percent {
            0..=29 => HumidityLevel::Dry,
            30..=60 => HumidityLevel::Comfortable,
            _ => HumidityLevel::Humid,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HumidityLevel::Dry => "Dry",
            HumidityLevel::Comfortable => "Comfortable",
            HumidityLevel::Humid => "Humid",
        }
    }
}

impl fmt::Display for HumidityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Visibility quality, ordered worst to best.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum VisibilityBand {
    Poor,
    Moderate,
    Good,
    Excellent,
}

impl VisibilityBand {
    pub fn from_meters(meters: u32) -> Self {
        match meters {
            0..=999 => VisibilityBand::Poor,
            1_000..=3_999 => VisibilityBand::Moderate,
            4_000..=9_999 => VisibilityBand::Good,
            _ => VisibilityBand::Excellent,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VisibilityBand::Poor => "Poor",
            VisibilityBand::Moderate => "Moderate",
            VisibilityBand::Good => "Good",
            VisibilityBand::Excellent => "Excellent",
        }
    }
}

impl fmt::Display for VisibilityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// `"850 m"` under a kilometre, `"6.2 km"` from there on.
pub fn visibility_distance(meters: u32) -> String {
    if meters < 1_000 {
        format!("{meters} m")
    } else {
        format!("{:.1} km", f64::from(meters) / 1_000.0)
    }
}

const COMPASS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Nearest of the 16 compass points. Any finite bearing is accepted and
/// normalised into `[0, 360)`; non-finite input reads as north.
pub fn compass_point(degrees: f64) -> &'static str {
    if !degrees.is_finite() {
        return COMPASS[0];
    }
    let normalised = degrees.rem_euclid(360.0);
    let sector = (normalised / 22.5 + 0.5).floor() as usize % COMPASS.len();
    COMPASS[sector]
}

/// Strictly between sunrise and sunset. Both boundaries count as night.
pub fn is_day(now: i64, sunrise: i64, sunset: i64) -> bool {
    sunrise < now && now < sunset
}

/// `HH:MM` at the given UTC offset in seconds. Offsets outside ±24 h fall
/// back to UTC.
pub fn clock_time(epoch_secs: i64, utc_offset_secs: i32) -> String {
    let offset = FixedOffset::east_opt(utc_offset_secs)
        .or_else(|| FixedOffset::east_opt(0))
        .map(|offset| {
            DateTime::from_timestamp(epoch_secs, 0)
                .map(|utc| utc.with_timezone(&offset).format("%H:%M").to_string())
        });
    offset.flatten().unwrap_or_else(|| MISSING.to_string())
}

/// Every string the result view shows, derived in one place.
#[derive(Debug, Clone, PartialEq)]
pub struct Readout {
    pub temperature: String,
    pub feels_like: String,
    pub temp_min: String,
    pub temp_max: String,
    pub condition: String,
    pub description: String,
    pub humidity: String,
    pub humidity_label: &'static str,
    pub wind_speed: String,
    pub wind_direction: String,
    pub visibility: String,
    pub visibility_label: &'static str,
    pub pressure: String,
    pub cloudiness: String,
    pub sunrise: String,
    pub sunset: String,
    pub is_day: bool,
}

impl Readout {
    pub fn new(snapshot: &WeatherSnapshot, unit: TempUnit, now: i64) -> Self {
        let main = &snapshot.main;
        let condition = snapshot.condition();
        let tz = snapshot.timezone;

        Self {
            temperature: unit.format(main.temp),
            feels_like: unit.format(main.feels_like),
            temp_min: unit.format(main.temp_min),
            temp_max: unit.format(main.temp_max),
            condition: condition
                .map(|c| c.main.clone())
                .unwrap_or_else(|| MISSING.to_string()),
            description: condition
                .map(|c| c.description.clone())
                .unwrap_or_default(),
            humidity: format!("{}%", main.humidity),
            humidity_label: HumidityLevel::from_percent(main.humidity).label(),
            wind_speed: format!("{} m/s", snapshot.wind.speed),
            wind_direction: snapshot
                .wind
                .deg
                .map(compass_point)
                .unwrap_or(MISSING)
                .to_string(),
            visibility: snapshot
                .visibility
                .map(visibility_distance)
                .unwrap_or_else(|| MISSING.to_string()),
            visibility_label: snapshot
                .visibility
                .map(|m| VisibilityBand::from_meters(m).label())
                .unwrap_or(MISSING),
            pressure: format!("{} hPa", main.pressure),
            cloudiness: format!("{}%", snapshot.clouds.all),
            sunrise: clock_time(snapshot.sys.sunrise, tz),
            sunset: clock_time(snapshot.sys.sunset, tz),
            is_day: is_day(now, snapshot.sys.sunrise, snapshot.sys.sunset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fahrenheit_conversion() {
        assert_eq!(celsius_to_fahrenheit(0.0), 32.0);
        assert_eq!(celsius_to_fahrenheit(100.0), 212.0);
        assert_eq!(celsius_to_fahrenheit(-40.0), -40.0);
        assert_eq!(fahrenheit_to_celsius(212.0), 100.0);
    }

    #[test]
    fn test_display_degrees_match_rounded_formula() {
        for tenth in -600..=600 {
            let c = f64::from(tenth) / 10.0;
            assert_eq!(
                TempUnit::Fahrenheit.degrees(c),
                (c * 9.0 / 5.0 + 32.0).round() as i64,
                "at {c}°C"
            );
            assert_eq!(TempUnit::Celsius.degrees(c), c.round() as i64);
        }
    }

    #[test]
    fn test_round_trip_within_one_degree() {
        for t in -80..=60 {
            let f = TempUnit::Fahrenheit.degrees(f64::from(t));
            let back = round_degrees(fahrenheit_to_celsius(f as f64));
            assert!((back - i64::from(t)).abs() <= 1, "{t} -> {f} -> {back}");
        }
    }

    #[test]
    fn test_unit_format_and_toggle() {
        assert_eq!(TempUnit::Celsius.format(21.6), "22°C");
        assert_eq!(TempUnit::Fahrenheit.format(0.0), "32°F");
        assert_eq!(TempUnit::Celsius.toggle(), TempUnit::Fahrenheit);
        assert_eq!(TempUnit::Fahrenheit.toggle(), TempUnit::Celsius);
    }

    #[test]
    fn test_humidity_bands_total_and_monotonic() {
        assert_eq!(HumidityLevel::from_percent(0), HumidityLevel::Dry);
        assert_eq!(HumidityLevel::from_percent(29), HumidityLevel::Dry);
        assert_eq!(HumidityLevel::from_percent(30), HumidityLevel::Comfortable);
        assert_eq!(HumidityLevel::from_percent(60), HumidityLevel::Comfortable);
        assert_eq!(HumidityLevel::from_percent(61), HumidityLevel::Humid);
        assert_eq!(HumidityLevel::from_percent(100), HumidityLevel::Humid);

        let levels: Vec<_> = (0..=u8::MAX).map(HumidityLevel::from_percent).collect();
        assert!(levels.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_visibility_bands_total_and_monotonic() {
        assert_eq!(VisibilityBand::from_meters(0), VisibilityBand::Poor);
        assert_eq!(VisibilityBand::from_meters(999), VisibilityBand::Poor);
        assert_eq!(VisibilityBand::from_meters(1_000), VisibilityBand::Moderate);
        assert_eq!(VisibilityBand::from_meters(4_000), VisibilityBand::Good);
        assert_eq!(VisibilityBand::from_meters(10_000), VisibilityBand::Excellent);
        assert_eq!(VisibilityBand::from_meters(u32::MAX), VisibilityBand::Excellent);

        let mut previous = VisibilityBand::Poor;
        for meters in (0..=20_000).step_by(50) {
            let band = VisibilityBand::from_meters(meters);
            assert!(band >= previous, "band went down at {meters} m");
            previous = band;
        }
    }

    #[test]
    fn test_visibility_distance() {
        assert_eq!(visibility_distance(0), "0 m");
        assert_eq!(visibility_distance(850), "850 m");
        assert_eq!(visibility_distance(1_000), "1.0 km");
        assert_eq!(visibility_distance(10_000), "10.0 km");
    }

    #[test]
    fn test_compass_points() {
        assert_eq!(compass_point(0.0), "N");
        assert_eq!(compass_point(90.0), "E");
        assert_eq!(compass_point(180.0), "S");
        assert_eq!(compass_point(270.0), "W");
        assert_eq!(compass_point(45.0), "NE");
        assert_eq!(compass_point(200.0), "SSW");
    }

    #[test]
    fn test_compass_wraps_at_north() {
        assert_eq!(compass_point(0.0), compass_point(360.0));
        assert_eq!(compass_point(359.0), "N");
        assert_eq!(compass_point(348.75), "N");
        assert_eq!(compass_point(348.7), "NNW");
        assert_eq!(compass_point(-90.0), "W");
        assert_eq!(compass_point(720.0 + 90.0), "E");
        assert_eq!(compass_point(f64::NAN), "N");
    }

    #[test]
    fn test_compass_total_over_circle() {
        for tenth in 0..3600 {
            let label = compass_point(f64::from(tenth) / 10.0);
            assert!(COMPASS.contains(&label));
        }
    }

    #[test]
    fn test_is_day_strict_boundaries() {
        let (sunrise, sunset) = (1_000, 2_000);
        assert!(is_day(1_500, sunrise, sunset));
        assert!(!is_day(1_000, sunrise, sunset));
        assert!(!is_day(2_000, sunrise, sunset));
        assert!(!is_day(999, sunrise, sunset));
        assert!(!is_day(2_001, sunrise, sunset));
    }

    #[test]
    fn test_clock_time_uses_offset() {
        // 2024-06-21 04:30:00 UTC
        let t = 1_718_944_200;
        assert_eq!(clock_time(t, 0), "04:30");
        assert_eq!(clock_time(t, 7_200), "06:30");
        assert_eq!(clock_time(t, -18_000), "23:30");
        assert_eq!(clock_time(t, 200_000), "04:30");
    }
}
