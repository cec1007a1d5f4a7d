use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};

use super::model::CellValue;

/// Day-first formats tried before ISO ones. The two-digit year goes first:
/// `%Y` would read `24` as the year 24.
const DAY_FIRST_FORMATS: [&str; 4] = ["%d/%m/%y", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y"];
const ISO_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];
const DATETIME_FORMATS: [&str; 6] = [
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

/// Largest serial Excel can represent (9999-12-31).
const MAX_EXCEL_SERIAL: f64 = 2_958_465.0;

/// Convert Unix epoch milliseconds to a date (UTC).
pub fn epoch_millis_to_date(millis: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp_millis(millis).map(|dt| dt.date_naive())
}

/// Convert an Excel serial day number to a date (1900 date system).
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 || serial > MAX_EXCEL_SERIAL {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::days(serial.floor() as i64))
}

/// Parse date text, day first.
///
/// `03/04/2024` is the 3rd of April. A trailing time part is accepted and
/// discarded, as are fractional seconds after it.
pub fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    for fmt in DAY_FIRST_FORMATS.iter().chain(ISO_FORMATS.iter()) {
        if let Ok(d) = NaiveDate::parse_from_str(text, fmt) {
            return Some(d);
        }
    }
    // Only a dot after the time part starts a fraction; `15.03.2024` has none.
    let without_fraction = match text.rsplit_once('.') {
        Some((head, frac)) if head.contains(':') && frac.bytes().all(|b| b.is_ascii_digit()) => {
            head
        }
        _ => text,
    };
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(without_fraction, fmt) {
            return Some(dt.date());
        }
    }
    None
}

/// Numbers in a date column: Excel serials first, then epoch milliseconds
/// (what `to_json` writes for datetime columns).
fn number_to_date(n: f64) -> Option<NaiveDate> {
    if n > MAX_EXCEL_SERIAL && n.fract() == 0.0 && n <= i64::MAX as f64 {
        epoch_millis_to_date(n as i64)
    } else {
        excel_serial_to_date(n)
    }
}

/// Coerce a cell to a date cell. Anything that does not read as a date
/// becomes [`CellValue::Null`].
pub fn coerce_date(cell: &CellValue) -> CellValue {
    let date = match cell {
        CellValue::Date(d) => Some(*d),
        CellValue::String(s) => parse_date_text(s),
        CellValue::Integer(i) if *i as f64 > MAX_EXCEL_SERIAL => epoch_millis_to_date(*i),
        CellValue::Integer(i) => excel_serial_to_date(*i as f64),
        CellValue::Float(f) => number_to_date(*f),
        CellValue::Bool(_) | CellValue::Null => None,
    };
    date.map(CellValue::Date).unwrap_or(CellValue::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn day_comes_first() {
        assert_eq!(parse_date_text("03/04/2024"), Some(ymd(2024, 4, 3)));
        assert_eq!(parse_date_text("15-03-2024"), Some(ymd(2024, 3, 15)));
        assert_eq!(parse_date_text("15.03.2024"), Some(ymd(2024, 3, 15)));
        assert_eq!(parse_date_text("15/03/24"), Some(ymd(2024, 3, 15)));
    }

    #[test]
    fn iso_and_datetime_text() {
        assert_eq!(parse_date_text("2024-03-15"), Some(ymd(2024, 3, 15)));
        assert_eq!(parse_date_text("2024-03-15 08:30:00"), Some(ymd(2024, 3, 15)));
        assert_eq!(parse_date_text("2024-03-15T08:30:00.250"), Some(ymd(2024, 3, 15)));
        assert_eq!(parse_date_text("15/03/2024 17:05"), Some(ymd(2024, 3, 15)));
    }

    #[test]
    fn dotted_dates_keep_their_year() {
        assert_eq!(parse_date_text("15.03.2024 10:00"), Some(ymd(2024, 3, 15)));
        assert_eq!(parse_date_text("15.03.2024 10:00:30"), Some(ymd(2024, 3, 15)));
        assert_eq!(parse_date_text("15.03.2024 10:00:30.5"), Some(ymd(2024, 3, 15)));
        assert_eq!(parse_date_text("15.03.2024 manhã"), None);
    }

    #[test]
    fn garbage_is_none() {
        assert_eq!(parse_date_text(""), None);
        assert_eq!(parse_date_text("a definir"), None);
        assert_eq!(parse_date_text("31/02/2024"), None);
    }

    #[test]
    fn excel_serials() {
        assert_eq!(excel_serial_to_date(45366.0), Some(ymd(2024, 3, 15)));
        assert_eq!(excel_serial_to_date(45366.75), Some(ymd(2024, 3, 15)));
        assert_eq!(excel_serial_to_date(0.0), None);
        assert_eq!(excel_serial_to_date(f64::NAN), None);
    }

    #[test]
    fn coerce_never_fails() {
        assert_eq!(
            coerce_date(&CellValue::String("15/03/2024".into())),
            CellValue::Date(ymd(2024, 3, 15))
        );
        assert_eq!(coerce_date(&CellValue::String("n/a".into())), CellValue::Null);
        assert_eq!(coerce_date(&CellValue::Bool(true)), CellValue::Null);
        assert_eq!(coerce_date(&CellValue::Null), CellValue::Null);
        assert_eq!(
            coerce_date(&CellValue::Integer(45366)),
            CellValue::Date(ymd(2024, 3, 15))
        );
    }

    #[test]
    fn epoch_millis_are_dates() {
        assert_eq!(epoch_millis_to_date(1_710_460_800_000), Some(ymd(2024, 3, 15)));
        assert_eq!(
            coerce_date(&CellValue::Integer(1_710_460_800_000)),
            CellValue::Date(ymd(2024, 3, 15))
        );
        assert_eq!(
            coerce_date(&CellValue::Float(1_710_500_000_000.0)),
            CellValue::Date(ymd(2024, 3, 15))
        );
        // Excel serials still win below the serial ceiling.
        assert_eq!(
            coerce_date(&CellValue::Float(45366.0)),
            CellValue::Date(ymd(2024, 3, 15))
        );
    }
}
