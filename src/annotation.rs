use std::sync::OnceLock;

use regex::Regex;

const MINUTES_PER_HOUR: u32 = 60;

/// Task text after an inline `(30 min)` / `(2 hours)` annotation was consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedText {
    pub text: String,
    pub time_estimate: Option<u32>,
}

fn annotation_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // ASCII digits only; `\d` would also take other scripts' digits.
        // Longer unit spellings first so `minutes` is not cut short at `min`.
        Regex::new(r"(?i)\((?P<num>[0-9]+)\s*(?P<unit>minutes|minute|min|hours|hour|hrs|hr)\)")
            .expect("valid time annotation regex")
    })
}

fn unit_minutes(unit: &str) -> u32 {
    let unit = unit.to_ascii_lowercase();
    if unit.starts_with("hour") || unit.starts_with("hr") {
        MINUTES_PER_HOUR
    } else {
        1
    }
}

/// Splits the first usable time annotation out of `raw`.
///
/// Text without a well-formed annotation comes back trimmed and unchanged.
/// Annotations whose value overflows are skipped in favour of a later one. If
/// removing the annotation would leave no text, it stays and yields no estimate.
pub fn parse_time_annotation(raw: &str) -> AnnotatedText {
    let trimmed = raw.trim();
    let untouched = || AnnotatedText {
        text: trimmed.to_string(),
        time_estimate: None,
    };

    let found = annotation_regex().captures_iter(trimmed).find_map(|caps| {
        let whole = caps.get(0)?;
        let minutes = caps
            .name("num")?
            .as_str()
            .parse::<u32>()
            .ok()
            .and_then(|value| value.checked_mul(unit_minutes(&caps["unit"])));
        if minutes.is_none() {
            log::debug!("time annotation out of range: {}", whole.as_str());
        }
        minutes.map(|minutes| (whole.start(), whole.end(), minutes))
    });
    let Some((start, end, minutes)) = found else {
        return untouched();
    };

    let before = trimmed[..start].trim_end();
    let after = trimmed[end..].trim_start();
    let text = match (before.is_empty(), after.is_empty()) {
        (true, true) => return untouched(),
        (false, true) => before.to_string(),
        (true, false) => after.to_string(),
        (false, false) => format!("{before} {after}"),
    };

    AnnotatedText {
        text,
        time_estimate: Some(minutes),
    }
}
