//! Calendar-date helpers used when presenting task timestamps.
//!
//! Dates are rendered in UTC with `chrono` strftime patterns; the default
//! pattern is day-month-year (`25-10-2023`).

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use std::fmt::Write as _;
use thiserror::Error;

/// Default calendar-date pattern: `dd-MM-yyyy`.
pub const DEFAULT_DATE_FORMAT: &str = "%d-%m-%Y";

/// A strftime pattern that `chrono` cannot interpret.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid date format pattern '{0}'")]
pub struct InvalidDateFormat(pub String);

/// Checks that `pattern` only contains recognised strftime specifiers.
///
/// # Errors
///
/// Returns [`InvalidDateFormat`] when the pattern has an unknown specifier.
pub fn validate_format(pattern: &str) -> Result<(), InvalidDateFormat> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(InvalidDateFormat(pattern.to_owned()));
    }
    Ok(())
}

/// Formats a timestamp with `pattern`.
///
/// # Errors
///
/// Returns [`InvalidDateFormat`] when the pattern is invalid.
pub fn format_date(timestamp: DateTime<Utc>, pattern: &str) -> Result<String, InvalidDateFormat> {
    validate_format(pattern)?;
    let mut rendered = String::new();
    write!(rendered, "{}", timestamp.format(pattern))
        .map_err(|_| InvalidDateFormat(pattern.to_owned()))?;
    Ok(rendered)
}

/// Returns today's date according to `clock`, formatted with `pattern`.
///
/// # Errors
///
/// Returns [`InvalidDateFormat`] when the pattern is invalid.
pub fn current_date(clock: &impl Clock, pattern: &str) -> Result<String, InvalidDateFormat> {
    format_date(clock.utc(), pattern)
}

/// Returns `true` when `value` is a real calendar date written with
/// `pattern`.
#[must_use]
pub fn is_valid_date(value: &str, pattern: &str) -> bool {
    NaiveDate::parse_from_str(value, pattern).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use rstest::rstest;

    struct StoppedClock(DateTime<Utc>);

    impl Clock for StoppedClock {
        fn local(&self) -> DateTime<Local> {
            self.0.with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            self.0
        }
    }

    #[rstest]
    #[case(DEFAULT_DATE_FORMAT, "07-03-2024")]
    #[case("%Y-%m-%d", "2024-03-07")]
    #[case("%d/%m/%y %H:%M", "07/03/24 23:30")]
    fn formats_in_utc(#[case] pattern: &str, #[case] expected: &str) {
        let timestamp = Utc
            .with_ymd_and_hms(2024, 3, 7, 23, 30, 0)
            .single()
            .expect("valid timestamp");

        assert_eq!(format_date(timestamp, pattern).as_deref(), Ok(expected));
    }

    #[rstest]
    fn current_date_reads_the_clock() {
        let clock = StoppedClock(
            Utc.with_ymd_and_hms(2023, 10, 25, 9, 0, 0)
                .single()
                .expect("valid timestamp"),
        );

        assert_eq!(
            current_date(&clock, DEFAULT_DATE_FORMAT),
            Ok("25-10-2023".to_owned())
        );
    }

    #[rstest]
    #[case("%Q")]
    #[case("%")]
    fn rejects_unknown_specifiers(#[case] pattern: &str) {
        assert_eq!(
            validate_format(pattern),
            Err(InvalidDateFormat(pattern.to_owned()))
        );
    }

    #[rstest]
    #[case("29-02-2024", true)]
    #[case("29-02-2023", false)]
    #[case("31-04-2024", false)]
    #[case("2024-02-29", false)]
    #[case("", false)]
    fn validates_calendar_dates(#[case] value: &str, #[case] valid: bool) {
        assert_eq!(is_valid_date(value, DEFAULT_DATE_FORMAT), valid);
    }
}
