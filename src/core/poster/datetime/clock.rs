use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// 解析时钟时间：小时 (1-12 或 0-23)、可选分钟、可选 am/pm
///
/// `pm` adds 12 to hours below 12, `12am` becomes 0. Out-of-range results are rejected.
pub fn parse_clock(hour: &str, minute: Option<&str>, meridiem: Option<&str>) -> Option<NaiveTime> {
    let mut hour: u32 = hour.parse().ok()?;
    let minute: u32 = match minute {
        Some(m) => m.parse().ok()?,
        None => 0,
    };

    match meridiem.map(|m| m.to_ascii_lowercase()).as_deref() {
        Some("pm") if hour < 12 => hour += 12,
        Some("am") if hour == 12 => hour = 0,
        _ => {}
    }

    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Places `time` on `date`; seconds are always zero.
pub fn apply_time(date: NaiveDate, time: NaiveTime) -> NaiveDateTime {
    date.and_time(time)
}

/// 未识别到时间时的默认值：当前小时 + 1，分钟为 0（23 点时顺延到次日 0 点）
pub fn default_time(date: NaiveDate, now: NaiveDateTime) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN) + Duration::hours(now.hour() as i64 + 1)
}

pub const ISO_MINUTE_FORMAT: &str = "%Y-%m-%dT%H:%M";

pub fn format_iso_minute(value: NaiveDateTime) -> String {
    value.format(ISO_MINUTE_FORMAT).to_string()
}

pub fn parse_iso_minute(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, ISO_MINUTE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_meridiem_rules() {
        assert_eq!(parse_clock("3", None, Some("pm")), NaiveTime::from_hms_opt(15, 0, 0));
        assert_eq!(parse_clock("12", Some("15"), Some("PM")), NaiveTime::from_hms_opt(12, 15, 0));
        assert_eq!(parse_clock("12", Some("05"), Some("am")), NaiveTime::from_hms_opt(0, 5, 0));
        assert_eq!(parse_clock("9", Some("30"), Some("am")), NaiveTime::from_hms_opt(9, 30, 0));
        assert_eq!(parse_clock("18", Some("00"), None), NaiveTime::from_hms_opt(18, 0, 0));
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert_eq!(parse_clock("25", Some("00"), None), None);
        assert_eq!(parse_clock("10", Some("75"), None), None);
    }

    #[test]
    fn test_default_time() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
        assert_eq!(default_time(date, at(2024, 6, 1, 9, 42)), at(2025, 3, 5, 10, 0));
        assert_eq!(default_time(date, at(2024, 6, 1, 23, 10)), at(2025, 3, 6, 0, 0));
    }

    #[test]
    fn test_iso_format() {
        assert_eq!(format_iso_minute(at(2024, 1, 5, 7, 3)), "2024-01-05T07:03");
        assert_eq!(parse_iso_minute("2024-01-05T07:03"), Some(at(2024, 1, 5, 7, 3)));
        assert_eq!(parse_iso_minute("2024-13-05T07:03"), None);
    }
}
