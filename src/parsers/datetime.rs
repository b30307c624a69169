use chrono::format::{Locale, StrftimeItems};
use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

static DT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4})-(\d{2})-(\d{2})(?:[ T](\d{2}):(\d{2})(?::(\d{2}))?)?$")
        .expect("Invalid timestamp regex")
});

static PERIOD_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4}-\d{2}-\d{2})\s*-\s*(\d{4}-\d{2}-\d{2})$")
        .expect("Invalid period regex")
});

static HMS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+):(\d{2}):(\d{2})").expect("Invalid duration regex")
});

/// Locale for date rendering, resolved once from the environment. `None`
/// selects the fixed DD/MM/YYYY fallback format.
static LOCALE: Lazy<Option<Locale>> = Lazy::new(|| {
    let name = ["LC_ALL", "LC_TIME", "LANG"]
        .iter()
        .find_map(|var| std::env::var(var).ok().filter(|v| !v.is_empty()))?;
    // "en_US.UTF-8" -> "en_US"
    let name = name.split('.').next().unwrap_or(&name).replace('-', "_");
    Locale::try_from(name.as_str()).ok()
});

/// Parse `YYYY-MM-DD` or `YYYY-MM-DD[ T]HH:MM[:SS]`. Seconds default to 0
/// when minutes are present. Any other shape is no match; callers leave the
/// original value unchanged rather than inventing a fallback.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let caps = DT_REGEX.captures(s.trim())?;
    let year: i32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    match caps.get(4) {
        None => date.and_hms_opt(0, 0, 0),
        Some(hour) => {
            let hour: u32 = hour.as_str().parse().ok()?;
            let minute: u32 = caps[5].parse().ok()?;
            let second: u32 = caps.get(6).map_or(Ok(0), |m| m.as_str().parse()).ok()?;
            date.and_hms_opt(hour, minute, second)
        }
    }
}

/// Split a `DATE1 - DATE2` period into its two ISO date strings.
pub fn split_period(s: &str) -> Option<(String, String)> {
    let caps = PERIOD_REGEX.captures(s.trim())?;
    Some((caps[1].to_string(), caps[2].to_string()))
}

/// Sort key for a period cell: the period's end date, or the whole value
/// parsed as a single date when it is not a period.
pub fn period_sort_key(s: &str) -> Option<NaiveDateTime> {
    match split_period(s) {
        Some((_, end)) => parse_timestamp(&end),
        None => parse_timestamp(s),
    }
}

/// Locale short date, falling back to DD/MM/YYYY.
pub fn format_date_local(dt: &NaiveDateTime) -> String {
    match *LOCALE {
        Some(locale) => dt.date().format_localized("%x", locale).to_string(),
        None => dt.date().format("%d/%m/%Y").to_string(),
    }
}

/// Locale short date and time, falling back to DD/MM/YYYY HH:MM:SS.
pub fn format_datetime_local(dt: &NaiveDateTime) -> String {
    match *LOCALE {
        Some(locale) => dt
            .format_with_items(StrftimeItems::new_with_locale("%x %X", locale))
            .to_string(),
        None => dt.format("%d/%m/%Y %H:%M:%S").to_string(),
    }
}

/// Localize a cell value according to its column's semantic label: period
/// columns render their endpoints as dates only, timestamp columns render
/// as date plus time. Values that do not parse pass through unchanged.
pub fn localize_cell(label: &str, value: &str) -> String {
    if value.is_empty() {
        return value.to_string();
    }
    let label = label.trim().to_uppercase();
    if label == "PERIOD" {
        if let Some((start, end)) = split_period(value) {
            let start = parse_timestamp(&start).map(|d| format_date_local(&d)).unwrap_or(start);
            let end = parse_timestamp(&end).map(|d| format_date_local(&d)).unwrap_or(end);
            return format!("{} - {}", start, end);
        }
        return match parse_timestamp(value) {
            Some(dt) => format_date_local(&dt),
            None => value.to_string(),
        };
    }
    match parse_timestamp(value) {
        Some(dt) => format_datetime_local(&dt),
        None => value.to_string(),
    }
}

/// Parse an `H:MM:SS` duration to seconds, anywhere in the string.
pub fn parse_hms_secs(s: &str) -> Option<u64> {
    let caps = HMS_REGEX.captures(s)?;
    let hours: u64 = caps[1].parse().ok()?;
    let minutes: u64 = caps[2].parse().ok()?;
    let seconds: u64 = caps[3].parse().ok()?;
    Some(hours * 3600 + minutes * 60 + seconds)
}

/// Render seconds as `H:MM:SS`.
pub fn format_hms(secs: u64) -> String {
    format!("{}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}
