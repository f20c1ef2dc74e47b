//! Scheduled delivery times

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

use super::errors::MessageError;

/// The timezone used when none is given
pub const DEFAULT_DELIVERY_TIMEZONE: &str = "UTC";

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// A point in time at which a message should be delivered
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeliveryTime {
    /// An instant carrying its own offset
    At(DateTime<FixedOffset>),

    /// A textual date, parsed when the delivery time is formatted
    Text(String),
}

impl From<DateTime<Utc>> for DeliveryTime {
    fn from(value: DateTime<Utc>) -> Self {
        Self::At(value.fixed_offset())
    }
}

impl From<DateTime<FixedOffset>> for DeliveryTime {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self::At(value)
    }
}

impl From<DateTime<Tz>> for DeliveryTime {
    fn from(value: DateTime<Tz>) -> Self {
        Self::At(value.fixed_offset())
    }
}

impl From<&str> for DeliveryTime {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for DeliveryTime {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Parses an IANA timezone name, defaulting to UTC.
pub fn parse_timezone(timezone: Option<&str>) -> Result<Tz, MessageError> {
    let name = timezone.unwrap_or(DEFAULT_DELIVERY_TIMEZONE);

    name.parse::<Tz>()
        .map_err(|_| MessageError::DateConstruction(format!("unknown timezone {name:?}")))
}

/// Formats a delivery time as RFC 2822 in the given timezone.
///
/// Instants and offset-carrying strings are converted into `timezone`, naive
/// strings are interpreted in it.
pub fn format_rfc2822(time: &DeliveryTime, timezone: Option<&str>) -> Result<String, MessageError> {
    let tz = parse_timezone(timezone)?;

    let local = match time {
        DeliveryTime::At(instant) => instant.with_timezone(&tz),
        DeliveryTime::Text(text) => parse_in(text, &tz)?,
    };

    Ok(local.with_timezone(&local.offset().fix()).to_rfc2822())
}

fn parse_in(text: &str, tz: &Tz) -> Result<DateTime<Tz>, MessageError> {
    let text = text.trim();

    if text.eq_ignore_ascii_case("now") {
        return Ok(Utc::now().with_timezone(tz));
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Ok(instant.with_timezone(tz));
    }

    if let Ok(instant) = DateTime::parse_from_rfc2822(text) {
        return Ok(instant.with_timezone(tz));
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| MessageError::DateConstruction(format!("unparseable date {text:?}")))?;

    tz.from_local_datetime(&naive).earliest().ok_or_else(|| {
        MessageError::DateConstruction(format!("{text:?} does not exist in the timezone"))
    })
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn test_formats_utc_instant() -> TestResult {
        let instant = Utc.with_ymd_and_hms(2022, 7, 13, 10, 27, 13).unwrap();

        let formatted = format_rfc2822(&instant.into(), None)?;

        assert_eq!(formatted, "Wed, 13 Jul 2022 10:27:13 +0000");

        Ok(())
    }

    #[test]
    fn test_converts_instant_into_timezone() -> TestResult {
        let instant = Utc.with_ymd_and_hms(2022, 7, 13, 10, 27, 13).unwrap();

        let formatted = format_rfc2822(&instant.into(), Some("America/Anguilla"))?;

        assert_eq!(formatted, "Wed, 13 Jul 2022 06:27:13 -0400");

        Ok(())
    }

    #[test]
    fn test_interprets_naive_string_in_timezone() -> TestResult {
        let formatted = format_rfc2822(&"2022-07-13T10:27:13".into(), Some("Europe/Berlin"))?;

        assert_eq!(formatted, "Wed, 13 Jul 2022 10:27:13 +0200");

        Ok(())
    }

    #[test]
    fn test_parses_date_only_string() -> TestResult {
        let formatted = format_rfc2822(&"2026-10-15".into(), None)?;

        assert_eq!(formatted, "Thu, 15 Oct 2026 00:00:00 +0000");

        Ok(())
    }

    #[test]
    fn test_converts_offset_string_into_timezone() -> TestResult {
        let formatted = format_rfc2822(&"2022-07-13T10:27:13+02:00".into(), None)?;

        assert_eq!(formatted, "Wed, 13 Jul 2022 08:27:13 +0000");

        Ok(())
    }

    #[test]
    fn test_formats_zoned_instant() -> TestResult {
        let instant = chrono_tz::America::Anguilla
            .with_ymd_and_hms(2022, 7, 13, 6, 27, 13)
            .unwrap();

        assert_eq!(
            format_rfc2822(&instant.into(), None)?,
            "Wed, 13 Jul 2022 10:27:13 +0000"
        );
        assert_eq!(
            format_rfc2822(&instant.into(), Some("America/Anguilla"))?,
            "Wed, 13 Jul 2022 06:27:13 -0400"
        );

        Ok(())
    }

    #[test]
    fn test_rejects_local_time_skipped_by_dst() {
        let result = format_rfc2822(&"2022-03-13 02:30".into(), Some("America/New_York"));

        assert!(matches!(result, Err(MessageError::DateConstruction(_))));
    }

    #[test]
    fn test_rejects_unparseable_string() {
        let result = format_rfc2822(&"next blue moon".into(), None);

        assert!(matches!(result, Err(MessageError::DateConstruction(_))));
    }

    #[test]
    fn test_rejects_unknown_timezone() {
        let result = format_rfc2822(&"2022-07-13".into(), Some("Mars/Olympus_Mons"));

        assert!(matches!(result, Err(MessageError::DateConstruction(_))));
    }
}
