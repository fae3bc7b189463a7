//! 日期时间提取 - 从海报 OCR 文本中识别活动时间
//!
//! 按优先级依次尝试，命中即返回（不跨层打分）：
//! 1. 完整日期 + 时间（单个正则同时匹配）
//! 2. 日期 + 文本中任意位置的时间
//! 3. 仅日期（默认时间：当前小时 + 1）
//! 4. 相对日期关键字（today / tomorrow / next week ...）

pub mod clock;
pub mod patterns;

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use log::debug;

pub use clock::{format_iso_minute, parse_iso_minute};

/// Keyword to day offset. Longer phrases come first so "day after tomorrow" is not read as "tomorrow".
pub const RELATIVE_DAYS: [(&str, u64); 7] = [
    ("day after tomorrow", 2),
    ("in 1 day", 1),
    ("in 2 day", 2),
    ("in 3 day", 3),
    ("next week", 7),
    ("tomorrow", 1),
    ("today", 0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyTier {
    CompleteDateTime,
    DateWithSeparateTime,
    DateOnly,
    RelativeKeyword,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTimeCandidate {
    pub value: NaiveDateTime,
    pub tier: StrategyTier,
}

impl DateTimeCandidate {
    pub fn iso_minute(&self) -> String {
        format_iso_minute(self.value)
    }
}

type Strategy = fn(&str, NaiveDateTime) -> Option<NaiveDateTime>;

const STRATEGIES: [(StrategyTier, Strategy); 4] = [
    (StrategyTier::CompleteDateTime, complete_date_time),
    (StrategyTier::DateWithSeparateTime, date_with_separate_time),
    (StrategyTier::DateOnly, date_only),
    (StrategyTier::RelativeKeyword, relative_keyword),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct DateTimeExtractor;

impl DateTimeExtractor {
    pub fn new() -> Self {
        Self
    }

    /// `YYYY-MM-DDTHH:MM` in the same local reference as `now`, or `None` when nothing matched.
    pub fn extract(&self, text: &str, now: NaiveDateTime) -> Option<String> {
        self.extract_candidate(text, now).map(|c| c.iso_minute())
    }

    pub fn extract_candidate(&self, text: &str, now: NaiveDateTime) -> Option<DateTimeCandidate> {
        for (tier, strategy) in STRATEGIES {
            if let Some(value) = strategy(text, now) {
                debug!("{:?} matched: {}", tier, value);
                return Some(DateTimeCandidate { value, tier });
            }
        }
        debug!("No date/time found in text");
        None
    }
}

fn complete_date_time(text: &str, _now: NaiveDateTime) -> Option<NaiveDateTime> {
    patterns::COMPLETE_DATE_TIME.iter().find_map(|re| {
        re.captures_iter(text).find_map(|caps| {
            let date = patterns::date_from_captures(&caps)?;
            let time = patterns::time_from_captures(&caps)?;
            Some(clock::apply_time(date, time))
        })
    })
}

fn find_date(text: &str) -> Option<NaiveDate> {
    patterns::DATE_ONLY.iter().find_map(|re| {
        re.captures_iter(text)
            .find_map(|caps| patterns::date_from_captures(&caps))
    })
}

fn find_clock_time(text: &str) -> Option<NaiveTime> {
    patterns::CLOCK_TIME.iter().find_map(|re| {
        re.captures_iter(text)
            .find_map(|caps| patterns::time_from_captures(&caps))
    })
}

fn date_with_separate_time(text: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let date = find_date(text)?;
    Some(match find_clock_time(text) {
        Some(time) => clock::apply_time(date, time),
        None => clock::default_time(date, now),
    })
}

fn date_only(text: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let date = find_date(text).or_else(|| {
        patterns::YEAR_FIRST
            .captures_iter(text)
            .find_map(|caps| patterns::date_from_captures(&caps))
    })?;
    Some(clock::default_time(date, now))
}

fn relative_keyword(text: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let lower = text.to_lowercase();
    let (keyword, offset) = RELATIVE_DAYS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))?;

    debug!("Relative date keyword: {}", keyword);
    let date = now.date().checked_add_days(Days::new(*offset))?;

    Some(match find_clock_time(text) {
        Some(time) => clock::apply_time(date, time),
        None => clock::default_time(date, now),
    })
}
