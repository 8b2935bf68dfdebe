//! Row formatting: meridiem marker plus 12-hour `hh:mm` clock time.

use crate::core::{Locale, Strings};
use chrono::{NaiveTime, Timelike};

/// AM/PM marker in the given locale
pub fn meridiem(time: NaiveTime, locale: Locale) -> &'static str {
    let strings = Strings::for_locale(locale);
    if time.hour12().0 {
        strings.pm
    } else {
        strings.am
    }
}

/// Zero-padded 12-hour clock time, e.g. `07:05`
pub fn clock_time(time: NaiveTime) -> String {
    time.format("%I:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_clock_time_is_twelve_hour_padded() {
        assert_eq!(clock_time(t(8, 0)), "08:00");
        assert_eq!(clock_time(t(19, 30)), "07:30");
        assert_eq!(clock_time(t(0, 5)), "12:05");
        assert_eq!(clock_time(t(12, 45)), "12:45");
    }

    #[test]
    fn test_meridiem_markers() {
        assert_eq!(meridiem(t(8, 0), Locale::En), "AM");
        assert_eq!(meridiem(t(19, 7), Locale::En), "PM");
        assert_eq!(meridiem(t(0, 0), Locale::Ko), "오전");
        assert_eq!(meridiem(t(12, 0), Locale::Ko), "오후");
    }
}
