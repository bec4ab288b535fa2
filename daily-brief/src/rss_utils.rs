/// Feed-entry helpers shared by every source

/// Timestamp normalization and display projection
pub mod time {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
    use chrono_tz::Tz;

    /// Display format for `Item::published`. Fixed width, so string order is time order.
    pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

    const OFFSET_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f%z",
        "%Y-%m-%dT%H:%M:%S%z",
        "%Y-%m-%d %H:%M:%S%.f%z",
        "%Y-%m-%d %H:%M:%S %z",
        "%a, %d %b %Y %H:%M:%S %z",
        "%a, %d %b %Y %H:%M %z",
        "%d %b %Y %H:%M:%S %z",
    ];

    const NAIVE_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
        "%a, %d %b %Y %H:%M:%S",
    ];

    /// Parse a free-text date. Offsets are honored; values without one are taken as UTC.
    ///
    /// Returns `None` rather than an error: an unparsable date is a normal outcome.
    pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
            return Some(dt.with_timezone(&Utc));
        }
        for fmt in OFFSET_FORMATS {
            if let Ok(dt) = DateTime::parse_from_str(text, fmt) {
                return Some(dt.with_timezone(&Utc));
            }
        }
        // "Z" suffix on an otherwise naive value
        let bare = text.strip_suffix('Z').unwrap_or(text);
        for fmt in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(bare, fmt) {
                return Some(Utc.from_utc_datetime(&naive));
            }
        }
        NaiveDate::parse_from_str(bare, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| Utc.from_utc_datetime(&naive))
    }

    /// Pick the entry's timestamp: the first candidate in priority order that resolved.
    pub fn resolve<I>(candidates: I) -> Option<DateTime<Utc>>
    where
        I: IntoIterator<Item = Option<DateTime<Utc>>>,
    {
        candidates.into_iter().flatten().next()
    }

    /// Render a timestamp in the display zone, or an empty string when there is none.
    pub fn format_local(timestamp: Option<DateTime<Utc>>, tz: &Tz) -> String {
        match timestamp {
            Some(ts) => ts.with_timezone(tz).format(DISPLAY_FORMAT).to_string(),
            None => String::new(),
        }
    }

}

/// Summary and title cleanup
pub mod text {
    use once_cell::sync::Lazy;
    use regex::Regex;

    pub const DEFAULT_SUMMARY_LIMIT: usize = 300;
    pub const ELLIPSIS: char = '…';

    static RE_TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));
    static RE_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

    /// Strip markup, collapse whitespace and bound the length to `limit` characters.
    pub fn sanitize(raw: &str, limit: usize) -> String {
        if raw.is_empty() {
            return String::new();
        }
        let stripped = RE_TAGS.replace_all(raw, "");
        let collapsed = collapse_whitespace(&stripped);

        if collapsed.chars().count() > limit {
            let mut out: String = collapsed.chars().take(limit).collect();
            out.push(ELLIPSIS);
            out
        } else {
            collapsed
        }
    }

    /// [`sanitize`] with the default 300-character bound.
    pub fn sanitize_summary(raw: &str) -> String {
        sanitize(raw, DEFAULT_SUMMARY_LIMIT)
    }

    /// Titles keep their markup but lose line breaks and surrounding space.
    pub fn clean_title(raw: &str) -> String {
        collapse_whitespace(raw)
    }

    fn collapse_whitespace(s: &str) -> String {
        RE_WS.replace_all(s, " ").trim().to_string()
    }

}
