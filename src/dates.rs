// 📅 Date Parser/Validator - Strict DD/MM/YYYY parsing
// Calendar-invalid dates (31/04, 29/02 on non-leap years) are rejected, never rolled over

use chrono::NaiveDate;

/// Display/parse format for every date in this crate
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Earliest accepted year
const MIN_YEAR: u32 = 100;

/// Parse a fixed-width, zero-padded `DD/MM/YYYY` date.
///
/// Returns `None` for any other shape (wrong separator, missing component,
/// non-digit characters, surrounding whitespace) and for dates that do not
/// exist on the calendar.
pub fn parse_strict_date(text: &str) -> Option<NaiveDate> {
    let bytes = text.as_bytes();
    if !text.is_ascii() || bytes.len() != 10 || bytes[2] != b'/' || bytes[5] != b'/' {
        return None;
    }

    let day = parse_digits(&text[0..2])?;
    let month = parse_digits(&text[3..5])?;
    let year = parse_digits(&text[6..10])?;

    // Two-digit-era years (0000-0099) never round-trip to the year as written
    if year < MIN_YEAR {
        return None;
    }

    // from_ymd_opt refuses out-of-calendar components instead of rolling them over
    NaiveDate::from_ymd_opt(year as i32, month, day)
}

/// True when `text` is a valid strict date.
pub fn is_valid_date(text: &str) -> bool {
    parse_strict_date(text).is_some()
}

/// Render a date back into `DD/MM/YYYY`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn parse_digits(part: &str) -> Option<u32> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

// ============================================================================
// TESTS
// ============================================================================
