//! Daily-note templates.
//!
//! New daily notes are seeded from the configured template with these
//! variables substituted:
//!
//! - `{{title}}`: the note's file name without extension
//! - `{{date}}`: the date in the daily-note format
//! - `{{time}}`: the time as `HH:mm`
//! - `{{date:FORMAT}}` / `{{time:FORMAT}}`: the moment formatted with `FORMAT`

use crate::date_format;
use chrono::NaiveDateTime;

const DEFAULT_TIME_FORMAT: &str = "HH:mm";

/// Substitutes template variables. Unknown `{{...}}` blocks are left alone.
pub fn render(template: &str, title: &str, date_format: &str, now: NaiveDateTime) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];
        let Some(end) = after_open.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };

        let variable = after_open[..end].trim();
        match expand(variable, title, date_format, now) {
            Some(value) => out.push_str(&value),
            None => out.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after_open[end + 2..];
    }

    out.push_str(rest);
    out
}

fn expand(variable: &str, title: &str, date_format: &str, now: NaiveDateTime) -> Option<String> {
    let (name, format) = match variable.split_once(':') {
        Some((name, format)) => (name.trim(), Some(format.trim())),
        None => (variable, None),
    };

    match (name.to_ascii_lowercase().as_str(), format) {
        ("title", None) => Some(title.to_string()),
        ("date", None) => Some(date_format::format(&now, date_format)),
        ("time", None) => Some(date_format::format(&now, DEFAULT_TIME_FORMAT)),
        ("date", Some(custom)) | ("time", Some(custom)) => {
            Some(date_format::format(&now, custom))
        }
        _ => None,
    }
}
