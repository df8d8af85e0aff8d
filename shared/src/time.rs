use chrono::{NaiveDateTime, NaiveTime, Timelike};
use std::fmt;
use std::str::FromStr;

/// Minute choices offered by the time picker
pub const MINUTE_OPTIONS: [u32; 4] = [0, 15, 30, 45];

pub const DEFAULT_START_TIME: &str = "09:00";
pub const DEFAULT_END_TIME: &str = "17:00";

/// A wall-clock time with minute precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(TimeOfDay)
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn with_hour(&self, hour: u32) -> Option<Self> {
        Self::new(hour, self.minute())
    }

    pub fn with_minute(&self, minute: u32) -> Option<Self> {
        Self::new(self.hour(), minute)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Hora inválida: '{0}' (formato HH:MM)")]
pub struct TimeParseError(pub String);

impl FromStr for TimeOfDay {
    type Err = TimeParseError;

    /// Accepts `HH:MM` and the backend's `HH:MM:SS`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        NaiveTime::parse_from_str(trimmed, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
            .map(|t| TimeOfDay(t.with_second(0).unwrap_or(t)))
            .map_err(|_| TimeParseError(s.to_string()))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Render a stored time as `HH:MM`, falling back to the raw value
pub fn short_time(value: &str) -> String {
    value
        .parse::<TimeOfDay>()
        .map(|t| t.to_string())
        .unwrap_or_else(|_| value.to_string())
}

/// Format a backend timestamp as `dd/mm/yyyy HH:MM:SS`
pub fn format_timestamp(value: &str) -> String {
    parse_timestamp(value)
        .map(|dt| dt.format("%d/%m/%Y %H:%M:%S").to_string())
        .unwrap_or_else(|| value.to_string())
}

/// Format only the date part of a backend timestamp or date as `dd/mm/yyyy`
pub fn format_date_short(value: &str) -> String {
    if let Some(dt) = parse_timestamp(value) {
        return dt.format("%d/%m/%Y").to_string();
    }
    chrono::NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|_| value.to_string())
}

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|dt| dt.naive_local())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_both_formats() {
        let a: TimeOfDay = "09:30".parse().unwrap();
        let b: TimeOfDay = "09:30:45".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "09:30");
        assert!("25:00".parse::<TimeOfDay>().is_err());
        assert!("nueve".parse::<TimeOfDay>().is_err());
    }

    #[test]
    fn test_with_hour_and_minute() {
        let t = TimeOfDay::new(9, 0).unwrap();
        assert_eq!(t.with_hour(14).unwrap().to_string(), "14:00");
        assert_eq!(t.with_minute(45).unwrap().to_string(), "09:45");
        assert!(t.with_hour(24).is_none());
    }

    #[test]
    fn test_ordering() {
        let start: TimeOfDay = "08:00".parse().unwrap();
        let end: TimeOfDay = "17:15".parse().unwrap();
        assert!(start < end);
    }

    #[test]
    fn test_short_time() {
        assert_eq!(short_time("13:00:00"), "13:00");
        assert_eq!(short_time("n/a"), "n/a");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp("2025-03-01T08:05:09"), "01/03/2025 08:05:09");
        assert_eq!(format_timestamp("2025-03-01T08:05:09.123456"), "01/03/2025 08:05:09");
        assert_eq!(format_timestamp("bogus"), "bogus");
        assert_eq!(format_date_short("2025-03-01"), "01/03/2025");
        assert_eq!(format_date_short("2025-03-01T23:59:00"), "01/03/2025");
    }
}
