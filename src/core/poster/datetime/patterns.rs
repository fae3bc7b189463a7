//! 日期/时间正则（命名捕获组：year / month / month_name / day / hour / minute / meridiem）

use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::clock;

const FULL_MONTHS: &str =
    "january|february|march|april|may|june|july|august|september|october|november|december";
const SHORT_MONTHS: &str = "jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec";

const MONTH_NUM: &str = r"0?[1-9]|1[0-2]";
const DAY_NUM: &str = r"0?[1-9]|[12][0-9]|3[01]";
const CLOCK_SUFFIX: &str = r"(?P<hour>\d{1,2}):(?P<minute>\d{2})\s*(?P<meridiem>am|pm)?\b";

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("invalid date/time pattern")
}

fn mdy() -> String {
    format!(r"(?P<month>{MONTH_NUM})[/-](?P<day>{DAY_NUM})[/-](?P<year>\d{{4}})")
}

fn dmy() -> String {
    format!(r"(?P<day>{DAY_NUM})[/-](?P<month>{MONTH_NUM})[/-](?P<year>\d{{4}})")
}

fn full_month_day_year() -> String {
    format!(r"(?P<month_name>{FULL_MONTHS})\s+(?P<day>\d{{1,2}}),?\s+(?P<year>\d{{4}})")
}

/// Date plus clock time in a single match.
pub static COMPLETE_DATE_TIME: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        compile(r"\b(?P<year>\d{4})-(?P<month>\d{2})-(?P<day>\d{2})T(?P<hour>\d{2}):(?P<minute>\d{2})\b"),
        compile(&format!(r"(?i)\b{}\s+{CLOCK_SUFFIX}", mdy())),
        compile(&format!(r"(?i)\b{}\s+at\s+{CLOCK_SUFFIX}", full_month_day_year())),
        compile(&format!(r"(?i)\b{}\s+{CLOCK_SUFFIX}", dmy())),
    ]
});

/// Date-only forms searched before looking for a separate time.
pub static DATE_ONLY: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        compile(&format!(r"\b{}\b", mdy())),
        compile(&format!(r"\b{}\b", dmy())),
        compile(&format!(r"(?i)\b{}\b", full_month_day_year())),
        compile(&format!(
            r"(?i)\b(?P<month_name>{SHORT_MONTHS})[a-z]*\s+(?P<day>\d{{1,2}}),?\s+(?P<year>\d{{4}})\b"
        )),
    ]
});

/// Year-first numeric date; only the date-only tier accepts it.
pub static YEAR_FIRST: Lazy<Regex> = Lazy::new(|| {
    compile(&format!(
        r"\b(?P<year>\d{{4}})[/-](?P<month>{MONTH_NUM})[/-](?P<day>{DAY_NUM})\b"
    ))
});

pub static CLOCK_TIME: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        compile(&format!(r"(?i)\b{CLOCK_SUFFIX}")),
        compile(r"(?i)\b(?P<hour>\d{1,2})\.(?P<minute>\d{2})\s*(?P<meridiem>am|pm)\b"),
        // 裸小时不能紧跟在数字、点或冒号之后（"8.15pm" 不是 15 点）
        compile(r"(?i)(?:^|[^\d.:])\b(?P<hour>\d{1,2})\s*(?P<meridiem>am|pm)\b"),
    ]
});

pub fn month_from_name(name: &str) -> Option<u32> {
    let prefix: String = name.chars().take(3).collect::<String>().to_lowercase();
    SHORT_MONTHS
        .split('|')
        .position(|m| m == prefix)
        .map(|idx| idx as u32 + 1)
}

/// Builds the calendar date from a match; `None` for impossible dates such as 02/30.
pub fn date_from_captures(caps: &Captures) -> Option<NaiveDate> {
    let year: i32 = caps.name("year")?.as_str().parse().ok()?;
    let day: u32 = caps.name("day")?.as_str().parse().ok()?;
    let month = match caps.name("month") {
        Some(m) => m.as_str().parse().ok()?,
        None => month_from_name(caps.name("month_name")?.as_str())?,
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

pub fn time_from_captures(caps: &Captures) -> Option<NaiveTime> {
    clock::parse_clock(
        caps.name("hour")?.as_str(),
        caps.name("minute").map(|m| m.as_str()),
        caps.name("meridiem").map(|m| m.as_str()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_compile() {
        assert_eq!(COMPLETE_DATE_TIME.len(), 4);
        assert_eq!(DATE_ONLY.len(), 4);
        assert_eq!(CLOCK_TIME.len(), 3);
        assert!(YEAR_FIRST.is_match("2025/3/5"));
    }

    #[test]
    fn test_month_from_name() {
        assert_eq!(month_from_name("January"), Some(1));
        assert_eq!(month_from_name("sept"), Some(9));
        assert_eq!(month_from_name("DEC"), Some(12));
        assert_eq!(month_from_name("Smarch"), None);
    }

    #[test]
    fn test_mdy_captures() {
        let caps = DATE_ONLY[0].captures("due 12/25/2024!").unwrap();
        assert_eq!(date_from_captures(&caps), NaiveDate::from_ymd_opt(2024, 12, 25));
    }

    #[test]
    fn test_impossible_date_rejected() {
        let caps = DATE_ONLY[0].captures("02/30/2024").unwrap();
        assert_eq!(date_from_captures(&caps), None);
    }

    #[test]
    fn test_abbreviated_month() {
        let caps = DATE_ONLY[3].captures("Sept 14 2025").unwrap();
        assert_eq!(date_from_captures(&caps), NaiveDate::from_ymd_opt(2025, 9, 14));
    }

    #[test]
    fn test_clock_time_forms() {
        let caps = CLOCK_TIME[0].captures("doors 7:45 PM").unwrap();
        assert_eq!(time_from_captures(&caps), NaiveTime::from_hms_opt(19, 45, 0));

        let caps = CLOCK_TIME[2].captures("starts 11 am").unwrap();
        assert_eq!(time_from_captures(&caps), NaiveTime::from_hms_opt(11, 0, 0));

        assert!(CLOCK_TIME[2].captures("room 12").is_none());
    }

    #[test]
    fn test_dotted_clock_time() {
        let caps = CLOCK_TIME[1].captures("Doors 8.15pm").unwrap();
        assert_eq!(time_from_captures(&caps), NaiveTime::from_hms_opt(20, 15, 0));

        let caps = CLOCK_TIME[1].captures("7.05 PM").unwrap();
        assert_eq!(time_from_captures(&caps), NaiveTime::from_hms_opt(19, 5, 0));

        // 价格等小数不带 am/pm，不算时间
        assert!(CLOCK_TIME[1].captures("tickets 12.50").is_none());
        // 裸小时形式不能从小数点后的分钟开始
        assert!(CLOCK_TIME[2].captures("Doors 8.15pm").is_none());
        assert!(CLOCK_TIME[2].captures("at 10:30pm").is_none());
    }
}
