// * Arrival date/time parser
// * Source text is Portuguese-locale wall-clock time at UTC-3 (no daylight saving):
// * "16/09/2025 00:54", "07/09 8h", "7-9-25 14:30", "16/09".

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, TimeZone, Utc};
use regex::Regex;
use std::sync::LazyLock;

use crate::config::constants::SOURCE_UTC_OFFSET_SECS;

static PATTERN_ARRIVAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(\d{1,2})[/-](\d{1,2})(?:[/-](\d{4}|\d{2}))?(?:\s+(\d{1,2})(?:[:h](\d{2}))?\s*h?)?\s*$",
    )
    .expect("Invalid arrival regex")
});

/// A successfully parsed arrival; both views come from the same instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrival {
    instant: DateTime<FixedOffset>,
}

impl Arrival {
    /// ISO-8601 with the fixed `-03:00` offset, e.g. `2025-09-16T00:54:00-03:00`
    pub fn iso(&self) -> String {
        self.instant.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
    }

    /// Milliseconds since the Unix epoch
    pub fn epoch_millis(&self) -> i64 {
        self.instant.timestamp_millis()
    }

    pub fn instant(&self) -> DateTime<FixedOffset> {
        self.instant
    }
}

/// Offset the listing is published in
pub fn source_offset() -> FixedOffset {
    FixedOffset::east_opt(SOURCE_UTC_OFFSET_SECS).expect("! CRITICAL: source offset out of range")
}

/// Current calendar year at the source offset; used for dates without a year
pub fn current_source_year() -> i32 {
    Utc::now().with_timezone(&source_offset()).year()
}

/// Parses `dd/mm[/yyyy] [hh[:mm]][h]`.
///
/// A missing year defaults to `default_year`, a missing time to midnight.
/// Out-of-range fields or text outside the pattern yield `None`.
pub fn parse_arrival(input: &str, default_year: i32) -> Option<Arrival> {
    let caps = PATTERN_ARRIVAL.captures(input)?;

    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let year = match caps.get(3) {
        Some(m) if m.as_str().len() == 2 => 2000 + m.as_str().parse::<i32>().ok()?,
        Some(m) => m.as_str().parse::<i32>().ok()?,
        None => default_year,
    };
    let hour: u32 = match caps.get(4) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };
    let minute: u32 = match caps.get(5) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };

    let naive = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, 0)?;
    let instant = source_offset().from_local_datetime(&naive).single()?;

    Some(Arrival { instant })
}
