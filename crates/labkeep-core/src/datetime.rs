use crate::error::{LabError, Result};
use chrono::{Datelike, NaiveDateTime};
use regex::Regex;
use std::sync::OnceLock;

/// chrono pattern for appointment times: `2024-03-15 09:30`.
pub const APPOINTMENT_FORMAT: &str = "%Y-%m-%d %H:%M";

// ---------------------------------------------------------------------------
// Appointment time validation
// ---------------------------------------------------------------------------

static SHAPE_RE: OnceLock<Regex> = OnceLock::new();

fn shape_re() -> &'static Regex {
    SHAPE_RE.get_or_init(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}$").unwrap())
}

/// Parse `YYYY-MM-DD HH:MM` into a calendar date-time.
///
/// chrono alone accepts unpadded fields (`2024-3-5 9:30`), so the exact
/// shape is checked first; chrono then rejects impossible dates and times.
pub fn parse_appointment_time(input: &str) -> Result<NaiveDateTime> {
    if !shape_re().is_match(input) {
        return Err(LabError::InvalidDateTime(input.to_string()));
    }
    let at = NaiveDateTime::parse_from_str(input, APPOINTMENT_FORMAT)
        .map_err(|_| LabError::InvalidDateTime(input.to_string()))?;
    // The calendar starts at year 1; chrono's proleptic year 0 is not a valid input.
    if at.year() < 1 {
        return Err(LabError::InvalidDateTime(input.to_string()));
    }
    Ok(at)
}

pub fn format_appointment_time(at: &NaiveDateTime) -> String {
    at.format(APPOINTMENT_FORMAT).to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn parses_canonical_input() {
        let at = parse_appointment_time("2024-03-15 09:30").unwrap();
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        assert_eq!(at, expected);
        assert_eq!(format_appointment_time(&at), "2024-03-15 09:30");
    }

    #[test]
    fn accepts_leap_day() {
        parse_appointment_time("2024-02-29 23:59").unwrap();
    }

    #[test]
    fn rejects_wrong_shapes() {
        for input in [
            "15/03/2024 9:30",
            "2024-3-15 09:30",
            "2024-03-15 9:30",
            "2024-03-15T09:30",
            "2024-03-15 09:30:00",
            " 2024-03-15 09:30",
            "2024-03-15 09:30 ",
            "24-03-15 09:30",
            "",
        ] {
            let err = parse_appointment_time(input).unwrap_err();
            assert!(
                matches!(err, LabError::InvalidDateTime(ref s) if s == input),
                "expected InvalidDateTime for {input:?}"
            );
        }
    }

    #[test]
    fn rejects_impossible_calendar_values() {
        for input in [
            "2023-02-29 10:00",
            "2024-13-01 10:00",
            "2024-04-31 10:00",
            "2024-03-15 24:00",
            "2024-03-15 12:60",
            "2024-00-10 10:00",
            "0000-01-01 10:00",
        ] {
            assert!(parse_appointment_time(input).is_err(), "expected error for {input:?}");
        }
    }
}
