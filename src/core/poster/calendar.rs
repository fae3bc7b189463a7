use chrono::{Duration, NaiveDateTime};

const GOOGLE_CALENDAR_RENDER: &str = "https://calendar.google.com/calendar/render";
const CALENDAR_STAMP_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Google Calendar "add event" link; the event lasts one hour and times are left floating (no `Z`),
/// so the calendar reads them in the user's own zone.
pub fn google_calendar_url(title: &str, start: NaiveDateTime, description: &str) -> String {
    let end = start + Duration::hours(1);
    format!(
        "{}?action=TEMPLATE&text={}&dates={}/{}&details={}",
        GOOGLE_CALENDAR_RENDER,
        encode_component(title),
        start.format(CALENDAR_STAMP_FORMAT),
        end.format(CALENDAR_STAMP_FORMAT),
        encode_component(description)
    )
}

/// Same unreserved set as JavaScript's `encodeURIComponent`.
fn encode_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_google_calendar_url() {
        let start = NaiveDate::from_ymd_opt(2024, 12, 31)
            .unwrap()
            .and_hms_opt(23, 30, 0)
            .unwrap();
        let url = google_calendar_url("New Year's Party", start, "Bring snacks & drinks");

        assert_eq!(
            url,
            "https://calendar.google.com/calendar/render?action=TEMPLATE\
             &text=New%20Year's%20Party\
             &dates=20241231T233000/20250101T003000\
             &details=Bring%20snacks%20%26%20drinks"
        );
    }

    #[test]
    fn test_encode_component() {
        assert_eq!(encode_component("a/b?c=d"), "a%2Fb%3Fc%3Dd");
        assert_eq!(encode_component("café"), "caf%C3%A9");
        assert_eq!(encode_component("line1\nline2"), "line1%0Aline2");
        assert_eq!(encode_component(""), "");
    }
}
