use once_cell::sync::Lazy;
use regex::Regex;

pub const TITLE_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 500;

static DATE_OR_TIME_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\b\d{1,2}[:.]\d{2}\s*(am|pm)?\b",
        r"(?i)\b(january|february|march|april|may|june|july|august|september|october|november|december)\b",
        r"(?i)\b(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)\b",
        r"\b\d{1,2}[/-]\d{1,2}[/-]\d{2,4}\b",
        r"\b\d{4}[/-]\d{1,2}[/-]\d{1,2}\b",
        r"(?i)\b(today|tomorrow|yesterday|tonight)\b",
        r"(?i)\b(at|on)\s+\d",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("invalid date/time pattern"))
    .collect()
});

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SplitFields {
    pub title: String,
    pub description_lines: Vec<String>,
}

impl SplitFields {
    pub fn description(&self, max_chars: usize) -> String {
        truncate_chars(&self.description_lines.join("\n"), max_chars)
    }
}

/// 标题/描述拆分，描述中剔除疑似日期时间的行
pub struct FieldSplitter {
    title_max_chars: usize,
}

impl FieldSplitter {
    pub fn new() -> Self {
        Self::with_title_limit(TITLE_MAX_CHARS)
    }

    pub fn with_title_limit(title_max_chars: usize) -> Self {
        Self { title_max_chars }
    }

    pub fn split(&self, text: &str) -> SplitFields {
        let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());

        let title = match lines.next() {
            Some(first) => truncate_chars(first, self.title_max_chars),
            None => return SplitFields::default(),
        };

        let description_lines = lines
            .filter(|line| !looks_like_date_or_time(line))
            .map(str::to_string)
            .collect();

        SplitFields {
            title,
            description_lines,
        }
    }
}

impl Default for FieldSplitter {
    fn default() -> Self {
        Self::new()
    }
}

pub fn looks_like_date_or_time(line: &str) -> bool {
    DATE_OR_TIME_PATTERNS.iter().any(|p| p.is_match(line))
}

pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}
