//! Moment-style date formats.
//!
//! Daily-note file names are configured with the token syntax used by the
//! note-taking host (`YYYY-MM-DD`, `dddd, MMMM Do YYYY`, ...), not with
//! `strftime` specifiers. This module formats dates with those tokens and parses
//! file names back in strict mode: every token must match its exact shape and
//! the whole input must be consumed.
//!
//! # Supported tokens
//!
//! | Token | Meaning | Strict shape |
//! |-------|---------|--------------|
//! | `YYYY` | year | 4 digits |
//! | `YY` | two-digit year (69-99 → 19xx, 00-68 → 20xx) | 2 digits |
//! | `Q` | quarter | 1 digit |
//! | `MMMM` / `MMM` | month name / short name | English, any case |
//! | `MM` / `M` | month | 2 digits / 1-2 digits, no leading zero |
//! | `Do` | day of month with ordinal | `1st`, `22nd`, ... |
//! | `DDDD` / `DDD` | day of year | 3 digits / 1-3 digits |
//! | `DD` / `D` | day of month | 2 digits / 1-2 digits, no leading zero |
//! | `dddd` / `ddd` / `dd` / `d` | weekday name / short / min / number (0 = Sunday) | must agree with the date |
//! | `Mo` / `DDDo` / `do` | month / day of year / weekday with ordinal | unpadded number plus suffix |
//! | `GGGG` `WW` `W` `E` | ISO week year, week, weekday (1 = Monday) | 4 digits, 2 digits, 1-2 digits, 1 digit |
//! | `gggg` `ww` `w` `e` | Sunday-based week year, week, weekday (0 = Sunday) | as for the ISO tokens |
//! | `HH` `H` `mm` `m` `ss` `s` | time of day | as for `DD` / `D` |
//! | `hh` / `h` | hour on a 12-hour clock | 1-12 |
//! | `kk` / `k` | hour 1-24, with 24 meaning midnight | 1-24 |
//! | `A` / `a` | `AM`/`PM` or `am`/`pm` | any case |
//!
//! Sunday-based week 1 is the week (Sunday to Saturday) containing January 1st.
//! When a format has week tokens but no month, day or day of year, the date is
//! built from the week fields; otherwise every parsed week field must agree
//! with the date.
//!
//! Text inside `[...]` is literal, as is every character that is not a token.
//! A backslash makes the token (or character) after it literal: `\W` is `W`.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, Timelike, Weekday};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Format tokens, longest first so that `YYYY` wins over `YY`.
const TOKEN_TABLE: &[(&str, Token)] = &[
    ("YYYY", Token::Year4),
    ("YY", Token::Year2),
    ("GGGG", Token::IsoWeekYear),
    ("gggg", Token::WeekYear),
    ("Q", Token::Quarter),
    ("MMMM", Token::MonthName),
    ("MMM", Token::MonthShort),
    ("MM", Token::Month2),
    ("Mo", Token::MonthOrdinal),
    ("M", Token::Month),
    ("Do", Token::DayOrdinal),
    ("DDDD", Token::DayOfYear3),
    ("DDDo", Token::DayOfYearOrdinal),
    ("DDD", Token::DayOfYear),
    ("DD", Token::Day2),
    ("D", Token::Day),
    ("dddd", Token::WeekdayName),
    ("ddd", Token::WeekdayShort),
    ("dd", Token::WeekdayMin),
    ("do", Token::WeekdayOrdinal),
    ("d", Token::Weekday),
    ("WW", Token::IsoWeek2),
    ("W", Token::IsoWeek),
    ("ww", Token::Week2),
    ("w", Token::Week),
    ("E", Token::IsoWeekday),
    ("e", Token::LocaleWeekday),
    ("HH", Token::Hour2),
    ("H", Token::Hour),
    ("hh", Token::TwelveHour2),
    ("h", Token::TwelveHour),
    ("kk", Token::ClockHour2),
    ("k", Token::ClockHour),
    ("A", Token::MeridiemUpper),
    ("a", Token::MeridiemLower),
    ("mm", Token::Minute2),
    ("m", Token::Minute),
    ("ss", Token::Second2),
    ("s", Token::Second),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Year4,
    Year2,
    IsoWeekYear,
    WeekYear,
    Quarter,
    MonthName,
    MonthShort,
    Month2,
    MonthOrdinal,
    Month,
    DayOrdinal,
    DayOfYear3,
    DayOfYearOrdinal,
    DayOfYear,
    Day2,
    Day,
    WeekdayName,
    WeekdayShort,
    WeekdayMin,
    WeekdayOrdinal,
    Weekday,
    IsoWeek2,
    IsoWeek,
    Week2,
    Week,
    IsoWeekday,
    LocaleWeekday,
    Hour2,
    Hour,
    TwelveHour2,
    TwelveHour,
    ClockHour2,
    ClockHour,
    MeridiemUpper,
    MeridiemLower,
    Minute2,
    Minute,
    Second2,
    Second,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Literal(String),
    Token(Token),
}

/// A compiled date format.
///
/// ```
/// use chrono::NaiveDate;
/// use daily_notes_tweaks::date_format::DateFormat;
///
/// let fmt = DateFormat::new("YYYY-MM-DD");
/// let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
/// assert_eq!(fmt.format(&date.and_hms_opt(9, 0, 0).unwrap()), "2024-01-05");
///
/// assert!(fmt.parse_strict("2024-01-05", date).is_some());
/// assert!(fmt.parse_strict("2024-1-5", date).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    parts: Vec<Part>,
}

impl DateFormat {
    /// Compiles a format string. Never fails: unknown characters are literals.
    pub fn new(format: &str) -> Self {
        Self {
            parts: tokenize(format),
        }
    }

    /// Number of `/`-separated path segments a formatted value spans.
    pub fn segment_count(&self) -> usize {
        let separators: usize = self
            .parts
            .iter()
            .map(|part| match part {
                Part::Literal(text) => text.matches('/').count(),
                Part::Token(_) => 0,
            })
            .sum();
        separators + 1
    }

    /// Formats a date and time.
    pub fn format(&self, value: &NaiveDateTime) -> String {
        let mut out = String::new();
        for part in &self.parts {
            match part {
                Part::Literal(text) => out.push_str(text),
                Part::Token(token) => out.push_str(&format_token(*token, value)),
            }
        }
        out
    }

    /// Parses `input` in strict mode.
    ///
    /// `reference` supplies fields the format does not carry (see the module
    /// docs). Returns `None` when the input does not match the format exactly or
    /// does not name a real calendar date and time.
    pub fn parse_strict(&self, input: &str, reference: NaiveDate) -> Option<NaiveDateTime> {
        let mut fields = ParsedFields::default();
        let mut rest = input;

        for part in &self.parts {
            rest = match part {
                Part::Literal(text) => rest.strip_prefix(text.as_str())?,
                Part::Token(token) => parse_token(*token, rest, &mut fields)?,
            };
        }

        if !rest.is_empty() {
            return None;
        }

        fields.resolve(reference)
    }
}

/// Formats `value` with a moment-style format string.
pub fn format(value: &NaiveDateTime, format: &str) -> String {
    DateFormat::new(format).format(value)
}

/// Strictly parses `input` against a moment-style format string.
pub fn parse_strict(input: &str, format: &str, reference: NaiveDate) -> Option<NaiveDateTime> {
    DateFormat::new(format).parse_strict(input, reference)
}

fn tokenize(format: &str) -> Vec<Part> {
    fn push_literal(parts: &mut Vec<Part>, text: &str) {
        if let Some(Part::Literal(existing)) = parts.last_mut() {
            existing.push_str(text);
        } else {
            parts.push(Part::Literal(text.to_string()));
        }
    }

    let mut parts: Vec<Part> = Vec::new();
    let mut rest = format;

    while !rest.is_empty() {
        if let Some(inner) = rest.strip_prefix('[') {
            if let Some(close) = inner.find(']') {
                push_literal(&mut parts, &inner[..close]);
                rest = &inner[close + 1..];
                continue;
            }
        }

        if let Some(escaped) = rest.strip_prefix('\\') {
            let len = match_token(escaped)
                .map(|(pattern, _)| pattern.len())
                .or_else(|| escaped.chars().next().map(char::len_utf8));
            match len {
                Some(len) => {
                    push_literal(&mut parts, &escaped[..len]);
                    rest = &escaped[len..];
                }
                // A trailing backslash stays as it is.
                None => {
                    push_literal(&mut parts, "\\");
                    rest = escaped;
                }
            }
            continue;
        }

        if let Some((pattern, token)) = match_token(rest) {
            parts.push(Part::Token(token));
            rest = &rest[pattern.len()..];
            continue;
        }

        let ch_len = rest.chars().next().map(char::len_utf8).unwrap_or(1);
        push_literal(&mut parts, &rest[..ch_len]);
        rest = &rest[ch_len..];
    }

    parts
}

fn match_token(input: &str) -> Option<(&'static str, Token)> {
    TOKEN_TABLE
        .iter()
        .find(|(pattern, _)| input.starts_with(pattern))
        .copied()
}

fn days_in_year(year: i32) -> u32 {
    if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
        366
    } else {
        365
    }
}

/// Sunday-based week year and week number of `date`.
///
/// Week 1 starts on the Sunday on or before January 1st, so the last days of
/// December can fall into week 1 of the following year.
fn locale_week(date: NaiveDate) -> (i32, u32) {
    let ordinal0 = date.ordinal0();
    let jan1 = (date.weekday().num_days_from_sunday() + 7 - ordinal0 % 7) % 7;
    let length = days_in_year(date.year());
    let next_jan1 = (jan1 + length) % 7;
    if next_jan1 != 0 && ordinal0 >= length - next_jan1 {
        return (date.year() + 1, 1);
    }
    (date.year(), (ordinal0 + jan1) / 7 + 1)
}

/// First day of Sunday-based week 1 of `year`.
fn locale_week_start(year: i32) -> Option<NaiveDate> {
    let jan1 = NaiveDate::from_ymd_opt(year, 1, 1)?;
    jan1.checked_sub_days(Days::new(u64::from(jan1.weekday().num_days_from_sunday())))
}

fn ordinal_suffix(n: u32) -> &'static str {
    if (n % 100) / 10 == 1 {
        return "th";
    }
    match n % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

fn with_ordinal(n: u32) -> String {
    format!("{}{}", n, ordinal_suffix(n))
}

fn format_token(token: Token, value: &NaiveDateTime) -> String {
    let weekday = value.weekday().num_days_from_sunday() as usize;
    let twelve_hour = match value.hour() % 12 {
        0 => 12,
        hour => hour,
    };
    let clock_hour = match value.hour() {
        0 => 24,
        hour => hour,
    };
    match token {
        Token::Year4 => format!("{:04}", value.year()),
        Token::Year2 => format!("{:02}", value.year().rem_euclid(100)),
        Token::IsoWeekYear => format!("{:04}", value.iso_week().year()),
        Token::WeekYear => format!("{:04}", locale_week(value.date()).0),
        Token::Quarter => (value.month0() / 3 + 1).to_string(),
        Token::MonthName => MONTH_NAMES[value.month0() as usize].to_string(),
        Token::MonthShort => MONTH_NAMES[value.month0() as usize][..3].to_string(),
        Token::Month2 => format!("{:02}", value.month()),
        Token::MonthOrdinal => with_ordinal(value.month()),
        Token::Month => value.month().to_string(),
        Token::DayOrdinal => with_ordinal(value.day()),
        Token::DayOfYear3 => format!("{:03}", value.ordinal()),
        Token::DayOfYearOrdinal => with_ordinal(value.ordinal()),
        Token::DayOfYear => value.ordinal().to_string(),
        Token::Day2 => format!("{:02}", value.day()),
        Token::Day => value.day().to_string(),
        Token::WeekdayName => WEEKDAY_NAMES[weekday].to_string(),
        Token::WeekdayShort => WEEKDAY_NAMES[weekday][..3].to_string(),
        Token::WeekdayMin => WEEKDAY_NAMES[weekday][..2].to_string(),
        Token::WeekdayOrdinal => with_ordinal(weekday as u32),
        Token::Weekday | Token::LocaleWeekday => weekday.to_string(),
        Token::IsoWeek2 => format!("{:02}", value.iso_week().week()),
        Token::IsoWeek => value.iso_week().week().to_string(),
        Token::Week2 => format!("{:02}", locale_week(value.date()).1),
        Token::Week => locale_week(value.date()).1.to_string(),
        Token::IsoWeekday => value.weekday().number_from_monday().to_string(),
        Token::Hour2 => format!("{:02}", value.hour()),
        Token::Hour => value.hour().to_string(),
        Token::TwelveHour2 => format!("{:02}", twelve_hour),
        Token::TwelveHour => twelve_hour.to_string(),
        Token::ClockHour2 => format!("{:02}", clock_hour),
        Token::ClockHour => clock_hour.to_string(),
        Token::MeridiemUpper => String::from(if value.hour() < 12 { "AM" } else { "PM" }),
        Token::MeridiemLower => String::from(if value.hour() < 12 { "am" } else { "pm" }),
        Token::Minute2 => format!("{:02}", value.minute()),
        Token::Minute => value.minute().to_string(),
        Token::Second2 => format!("{:02}", value.second()),
        Token::Second => value.second().to_string(),
    }
}

#[derive(Debug, Default)]
struct ParsedFields {
    year: Option<i32>,
    quarter: Option<u32>,
    month: Option<u32>,
    day: Option<u32>,
    day_of_year: Option<u32>,
    /// Sunday-based weekday from `d`/`ddd`/`dddd`/`do`.
    weekday: Option<u32>,
    iso_week_year: Option<i32>,
    iso_week: Option<u32>,
    iso_weekday: Option<u32>,
    week_year: Option<i32>,
    week: Option<u32>,
    locale_weekday: Option<u32>,
    hour: Option<u32>,
    twelve_hour: Option<u32>,
    pm: Option<bool>,
    minute: Option<u32>,
    second: Option<u32>,
}

impl ParsedFields {
    fn resolve(self, reference: NaiveDate) -> Option<NaiveDateTime> {
        let month = self
            .month
            .or_else(|| self.quarter.map(|q| (q - 1) * 3 + 1));
        let has_calendar_day = month.is_some() || self.day.is_some() || self.day_of_year.is_some();
        let has_iso_week =
            self.iso_week_year.is_some() || self.iso_week.is_some() || self.iso_weekday.is_some();
        let has_locale_week =
            self.week_year.is_some() || self.week.is_some() || self.locale_weekday.is_some();

        // Fill from the reference date downwards until the first parsed field;
        // anything after that defaults to its minimum.
        let date = if !has_calendar_day && has_iso_week {
            self.iso_week_date(reference)?
        } else if !has_calendar_day && has_locale_week {
            self.locale_week_date(reference)?
        } else if let Some(ordinal) = self.day_of_year {
            let year = self.year.unwrap_or_else(|| reference.year());
            let date = NaiveDate::from_yo_opt(year, ordinal)?;
            if month.is_some_and(|m| m != date.month()) || self.day.is_some_and(|d| d != date.day())
            {
                return None;
            }
            date
        } else {
            let (year, month, day) = match (self.year, month, self.day) {
                (Some(year), month, day) => (year, month.unwrap_or(1), day.unwrap_or(1)),
                (None, Some(month), day) => (reference.year(), month, day.unwrap_or(1)),
                (None, None, Some(day)) => (reference.year(), reference.month(), day),
                (None, None, None) => (reference.year(), reference.month(), reference.day()),
            };
            NaiveDate::from_ymd_opt(year, month, day)?
        };

        if !self.agrees_with(date) {
            return None;
        }

        date.and_hms_opt(
            self.hour_of_day()?,
            self.minute.unwrap_or(0),
            self.second.unwrap_or(0),
        )
    }

    /// Date from ISO week fields. `YYYY` stands in for a missing `GGGG`.
    fn iso_week_date(&self, reference: NaiveDate) -> Option<NaiveDate> {
        let current = reference.iso_week();
        let (year, week) = match (self.iso_week_year.or(self.year), self.iso_week) {
            (Some(year), week) => (year, week.unwrap_or(1)),
            (None, Some(week)) => (current.year(), week),
            (None, None) => (current.year(), current.week()),
        };
        let weekday = self
            .iso_weekday
            .or_else(|| self.weekday.map(|d| if d == 0 { 7 } else { d }))
            .unwrap_or(1);

        let date = NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)?
            .checked_add_days(Days::new(u64::from(weekday - 1)))?;
        if self.iso_week_year.is_some() && self.year.is_some_and(|y| y != date.year()) {
            return None;
        }
        Some(date)
    }

    /// Date from Sunday-based week fields. `YYYY` stands in for a missing `gggg`.
    fn locale_week_date(&self, reference: NaiveDate) -> Option<NaiveDate> {
        let (year, week) = match (self.week_year.or(self.year), self.week) {
            (Some(year), week) => (year, week.unwrap_or(1)),
            (None, Some(week)) => (locale_week(reference).0, week),
            (None, None) => locale_week(reference),
        };
        let weekday = self.locale_weekday.or(self.weekday).unwrap_or(0);

        let offset = week.checked_sub(1)? * 7 + weekday;
        let date = locale_week_start(year)?.checked_add_days(Days::new(u64::from(offset)))?;
        // Rejects week numbers past the end of the week year.
        if locale_week(date) != (year, week) {
            return None;
        }
        if self.week_year.is_some() && self.year.is_some_and(|y| y != date.year()) {
            return None;
        }
        Some(date)
    }

    fn agrees_with(&self, date: NaiveDate) -> bool {
        let iso = date.iso_week();
        let (week_year, week) = locale_week(date);
        let from_sunday = date.weekday().num_days_from_sunday();

        self.weekday.map_or(true, |d| d == from_sunday)
            && self.locale_weekday.map_or(true, |e| e == from_sunday)
            && self
                .iso_weekday
                .map_or(true, |e| e == date.weekday().number_from_monday())
            && self.iso_week_year.map_or(true, |y| y == iso.year())
            && self.iso_week.map_or(true, |w| w == iso.week())
            && self.week_year.map_or(true, |y| y == week_year)
            && self.week.map_or(true, |w| w == week)
    }

    /// Combines the 24-hour, 12-hour and meridiem fields; they must agree.
    fn hour_of_day(&self) -> Option<u32> {
        let from_twelve = self.twelve_hour.map(|hour| match self.pm {
            Some(true) => hour % 12 + 12,
            Some(false) => hour % 12,
            None => hour,
        });
        match (self.hour, from_twelve) {
            (Some(hour), Some(twelve)) if hour != twelve => None,
            (Some(hour), _) => match self.pm {
                Some(pm) if pm != (hour >= 12) => None,
                _ => Some(hour),
            },
            (None, Some(twelve)) => Some(twelve),
            (None, None) => Some(if self.pm == Some(true) { 12 } else { 0 }),
        }
    }
}

/// Reads between `min` and `max` ASCII digits, greedily.
fn take_digits(input: &str, min: usize, max: usize) -> Option<(u32, &str)> {
    let len = input
        .bytes()
        .take(max)
        .take_while(|b| b.is_ascii_digit())
        .count();
    if len < min {
        return None;
    }
    let value = input[..len].parse().ok()?;
    Some((value, &input[len..]))
}

/// Up to `max` digits without a leading zero (`M`, `D`, `DDD`, `H`, ...).
fn take_unpadded(input: &str, max: usize) -> Option<(u32, &str)> {
    let (value, rest) = take_digits(input, 1, max)?;
    let consumed = input.len() - rest.len();
    if consumed > 1 && input.starts_with('0') {
        return None;
    }
    Some((value, rest))
}

/// A digit string in `range`, `width` digits wide (or unpadded when `None`).
fn take_in_range(
    input: &str,
    width: Option<usize>,
    range: std::ops::RangeInclusive<u32>,
) -> Option<(u32, &str)> {
    let (value, rest) = match width {
        Some(width) => take_digits(input, width, width)?,
        None => take_unpadded(input, 2)?,
    };
    range.contains(&value).then_some((value, rest))
}

fn take_ordinal(input: &str, max: usize) -> Option<(u32, &str)> {
    let (value, rest) = take_unpadded(input, max)?;
    Some((value, rest.strip_prefix(ordinal_suffix(value))?))
}

/// Case-insensitive prefix match against a list of names; returns the index.
fn take_name<'a>(input: &'a str, names: &[&str]) -> Option<(u32, &'a str)> {
    names.iter().enumerate().find_map(|(index, name)| {
        let candidate = input.get(..name.len())?;
        candidate
            .eq_ignore_ascii_case(name)
            .then(|| (index as u32, &input[name.len()..]))
    })
}

fn parse_token<'a>(token: Token, input: &'a str, fields: &mut ParsedFields) -> Option<&'a str> {
    match token {
        Token::Year4 => {
            let (value, rest) = take_digits(input, 4, 4)?;
            fields.year = Some(value as i32);
            Some(rest)
        }
        Token::Year2 => {
            let (value, rest) = take_digits(input, 2, 2)?;
            let century = if value > 68 { 1900 } else { 2000 };
            fields.year = Some(century + value as i32);
            Some(rest)
        }
        Token::Quarter => {
            let (value, rest) = take_digits(input, 1, 1)?;
            if !(1..=4).contains(&value) {
                return None;
            }
            fields.quarter = Some(value);
            Some(rest)
        }
        Token::MonthName => {
            let (index, rest) = take_name(input, &MONTH_NAMES)?;
            fields.month = Some(index + 1);
            Some(rest)
        }
        Token::MonthShort => {
            let short: Vec<&str> = MONTH_NAMES.iter().map(|name| &name[..3]).collect();
            let (index, rest) = take_name(input, &short)?;
            fields.month = Some(index + 1);
            Some(rest)
        }
        Token::Month2 => {
            let (value, rest) = take_digits(input, 2, 2)?;
            fields.month = Some(value);
            Some(rest)
        }
        Token::Month => {
            let (value, rest) = take_unpadded(input, 2)?;
            fields.month = Some(value);
            Some(rest)
        }
        Token::MonthOrdinal => {
            let (value, rest) = take_ordinal(input, 2)?;
            fields.month = Some(value);
            Some(rest)
        }
        Token::DayOrdinal => {
            let (value, rest) = take_ordinal(input, 2)?;
            fields.day = Some(value);
            Some(rest)
        }
        Token::DayOfYearOrdinal => {
            let (value, rest) = take_ordinal(input, 3)?;
            fields.day_of_year = Some(value);
            Some(rest)
        }
        Token::DayOfYear3 => {
            let (value, rest) = take_digits(input, 3, 3)?;
            fields.day_of_year = Some(value);
            Some(rest)
        }
        Token::DayOfYear => {
            let (value, rest) = take_unpadded(input, 3)?;
            fields.day_of_year = Some(value);
            Some(rest)
        }
        Token::Day2 => {
            let (value, rest) = take_digits(input, 2, 2)?;
            fields.day = Some(value);
            Some(rest)
        }
        Token::Day => {
            let (value, rest) = take_unpadded(input, 2)?;
            fields.day = Some(value);
            Some(rest)
        }
        Token::WeekdayName => {
            let (index, rest) = take_name(input, &WEEKDAY_NAMES)?;
            fields.weekday = Some(index);
            Some(rest)
        }
        Token::WeekdayShort => {
            let short: Vec<&str> = WEEKDAY_NAMES.iter().map(|name| &name[..3]).collect();
            let (index, rest) = take_name(input, &short)?;
            fields.weekday = Some(index);
            Some(rest)
        }
        Token::WeekdayMin => {
            let min: Vec<&str> = WEEKDAY_NAMES.iter().map(|name| &name[..2]).collect();
            let (index, rest) = take_name(input, &min)?;
            fields.weekday = Some(index);
            Some(rest)
        }
        Token::WeekdayOrdinal => {
            let (value, rest) = take_ordinal(input, 1)?;
            if value > 6 {
                return None;
            }
            fields.weekday = Some(value);
            Some(rest)
        }
        Token::Weekday => {
            let (value, rest) = take_in_range(input, Some(1), 0..=6)?;
            fields.weekday = Some(value);
            Some(rest)
        }
        Token::IsoWeekYear => {
            let (value, rest) = take_digits(input, 4, 4)?;
            fields.iso_week_year = Some(value as i32);
            Some(rest)
        }
        Token::WeekYear => {
            let (value, rest) = take_digits(input, 4, 4)?;
            fields.week_year = Some(value as i32);
            Some(rest)
        }
        Token::IsoWeek2 | Token::IsoWeek => {
            let width = (token == Token::IsoWeek2).then_some(2);
            let (value, rest) = take_in_range(input, width, 1..=53)?;
            fields.iso_week = Some(value);
            Some(rest)
        }
        Token::Week2 | Token::Week => {
            let width = (token == Token::Week2).then_some(2);
            let (value, rest) = take_in_range(input, width, 1..=53)?;
            fields.week = Some(value);
            Some(rest)
        }
        Token::IsoWeekday => {
            let (value, rest) = take_in_range(input, Some(1), 1..=7)?;
            fields.iso_weekday = Some(value);
            Some(rest)
        }
        Token::LocaleWeekday => {
            let (value, rest) = take_in_range(input, Some(1), 0..=6)?;
            fields.locale_weekday = Some(value);
            Some(rest)
        }
        Token::TwelveHour2 | Token::TwelveHour => {
            let width = (token == Token::TwelveHour2).then_some(2);
            let (value, rest) = take_in_range(input, width, 1..=12)?;
            fields.twelve_hour = Some(value);
            Some(rest)
        }
        Token::ClockHour2 | Token::ClockHour => {
            let width = (token == Token::ClockHour2).then_some(2);
            let (value, rest) = take_in_range(input, width, 1..=24)?;
            fields.hour = Some(value % 24);
            Some(rest)
        }
        Token::MeridiemUpper | Token::MeridiemLower => {
            let (index, rest) = take_name(input, &["am", "pm"])?;
            fields.pm = Some(index == 1);
            Some(rest)
        }
        Token::Hour2 => {
            let (value, rest) = take_digits(input, 2, 2)?;
            fields.hour = Some(value);
            Some(rest)
        }
        Token::Hour => {
            let (value, rest) = take_unpadded(input, 2)?;
            fields.hour = Some(value);
            Some(rest)
        }
        Token::Minute2 => {
            let (value, rest) = take_digits(input, 2, 2)?;
            fields.minute = Some(value);
            Some(rest)
        }
        Token::Minute => {
            let (value, rest) = take_unpadded(input, 2)?;
            fields.minute = Some(value);
            Some(rest)
        }
        Token::Second2 => {
            let (value, rest) = take_digits(input, 2, 2)?;
            fields.second = Some(value);
            Some(rest)
        }
        Token::Second => {
            let (value, rest) = take_unpadded(input, 2)?;
            fields.second = Some(value);
            Some(rest)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_format_common_patterns() {
        let value = NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(7, 4, 9)
            .unwrap();

        assert_eq!(format(&value, "YYYY-MM-DD"), "2024-01-05");
        assert_eq!(format(&value, "YYYYMMDD"), "20240105");
        assert_eq!(format(&value, "D.M.YY"), "5.1.24");
        assert_eq!(format(&value, "dddd, MMMM Do YYYY"), "Friday, January 5th 2024");
        assert_eq!(format(&value, "ddd MMM DD"), "Fri Jan 05");
        assert_eq!(format(&value, "YYYY/MM/YYYY-MM-DD"), "2024/01/2024-01-05");
        assert_eq!(format(&value, "[Week of] YYYY-[Q]Q"), "Week of 2024-Q1");
        assert_eq!(format(&value, "DDDD HH:mm:ss"), "005 07:04:09");
        assert_eq!(format(&value, "dd d H m s"), "Fr 5 7 4 9");
    }

    #[test]
    fn test_ordinal_suffixes() {
        assert_eq!(ordinal_suffix(1), "st");
        assert_eq!(ordinal_suffix(2), "nd");
        assert_eq!(ordinal_suffix(3), "rd");
        assert_eq!(ordinal_suffix(4), "th");
        assert_eq!(ordinal_suffix(11), "th");
        assert_eq!(ordinal_suffix(12), "th");
        assert_eq!(ordinal_suffix(13), "th");
        assert_eq!(ordinal_suffix(21), "st");
        assert_eq!(ordinal_suffix(22), "nd");
        assert_eq!(ordinal_suffix(31), "st");
    }

    #[test]
    fn test_parse_strict_accepts_exact_match() {
        assert_eq!(
            parse_strict("2024-01-05", "YYYY-MM-DD", reference()),
            Some(at(2024, 1, 5))
        );
        assert_eq!(
            parse_strict("20240105", "YYYYMMDD", reference()),
            Some(at(2024, 1, 5))
        );
        assert_eq!(
            parse_strict("Friday, January 5th 2024", "dddd, MMMM Do YYYY", reference()),
            Some(at(2024, 1, 5))
        );
        assert_eq!(
            parse_strict("5.1.24", "D.M.YY", reference()),
            Some(at(2024, 1, 5))
        );
    }

    #[test]
    fn test_parse_strict_rejects_missing_padding() {
        assert!(parse_strict("2024-1-5", "YYYY-MM-DD", reference()).is_none());
        assert!(parse_strict("24-01-05", "YYYY-MM-DD", reference()).is_none());
    }

    #[test]
    fn test_parse_strict_rejects_extra_padding_for_unpadded_tokens() {
        assert!(parse_strict("05.01.24", "D.M.YY", reference()).is_none());
    }

    #[test]
    fn test_parse_strict_rejects_trailing_and_wrong_separators() {
        assert!(parse_strict("2024-01-05 copy", "YYYY-MM-DD", reference()).is_none());
        assert!(parse_strict("2024/01/05", "YYYY-MM-DD", reference()).is_none());
        assert!(parse_strict("202401050", "YYYYMMDD", reference()).is_none());
        assert!(parse_strict("", "YYYY-MM-DD", reference()).is_none());
    }

    #[test]
    fn test_parse_strict_rejects_invalid_calendar_dates() {
        assert!(parse_strict("2023-02-29", "YYYY-MM-DD", reference()).is_none());
        assert!(parse_strict("2024-13-01", "YYYY-MM-DD", reference()).is_none());
        assert!(parse_strict("2024-04-31", "YYYY-MM-DD", reference()).is_none());
        assert!(parse_strict("2024-00-10", "YYYY-MM-DD", reference()).is_none());
        assert!(parse_strict("2024-02-29", "YYYY-MM-DD", reference()).is_some());
    }

    #[test]
    fn test_parse_strict_checks_weekday_agreement() {
        assert!(parse_strict("Fri 2024-01-05", "ddd YYYY-MM-DD", reference()).is_some());
        assert!(parse_strict("Mon 2024-01-05", "ddd YYYY-MM-DD", reference()).is_none());
        assert!(parse_strict("fri 2024-01-05", "ddd YYYY-MM-DD", reference()).is_some());
    }

    #[test]
    fn test_parse_strict_checks_ordinal_suffix() {
        assert!(parse_strict("January 1st 2024", "MMMM Do YYYY", reference()).is_some());
        assert!(parse_strict("January 1th 2024", "MMMM Do YYYY", reference()).is_none());
        assert!(parse_strict("January 1 2024", "MMMM Do YYYY", reference()).is_none());
    }

    #[test]
    fn test_parse_strict_month_names_are_not_interchangeable() {
        assert!(parse_strict("Jan 2024", "MMMM YYYY", reference()).is_none());
        assert!(parse_strict("January 2024", "MMM YYYY", reference()).is_none());
        assert_eq!(
            parse_strict("Jan 2024", "MMM YYYY", reference()),
            Some(at(2024, 1, 1))
        );
    }

    #[test]
    fn test_parse_strict_defaults_missing_fields() {
        // Year only: January 1st.
        assert_eq!(parse_strict("2021", "YYYY", reference()), Some(at(2021, 1, 1)));
        // Month only: reference year.
        assert_eq!(parse_strict("07", "MM", reference()), Some(at(2024, 7, 1)));
        // Day only: reference year and month.
        assert_eq!(parse_strict("15", "DD", reference()), Some(at(2024, 3, 15)));
        // Nothing but literals: the reference date itself.
        assert_eq!(parse_strict("[journal]", "[journal]", reference()), None);
        assert_eq!(parse_strict("journal", "[journal]", reference()), Some(at(2024, 3, 10)));
    }

    #[test]
    fn test_parse_strict_day_of_year_and_quarter() {
        assert_eq!(parse_strict("2024-060", "YYYY-DDDD", reference()), Some(at(2024, 2, 29)));
        assert!(parse_strict("2024-02-060", "YYYY-MM-DDDD", reference()).is_some());
        assert!(parse_strict("2024-03-060", "YYYY-MM-DDDD", reference()).is_none());
        assert!(parse_strict("2023-366", "YYYY-DDDD", reference()).is_none());
        assert_eq!(parse_strict("2024-Q3", "YYYY-[Q]Q", reference()), Some(at(2024, 7, 1)));
        assert!(parse_strict("2024-Q5", "YYYY-[Q]Q", reference()).is_none());
    }

    #[test]
    fn test_parse_strict_time_tokens() {
        let parsed = parse_strict("2024-01-05 2330", "YYYY-MM-DD HHmm", reference()).unwrap();
        assert_eq!(parsed.hour(), 23);
        assert_eq!(parsed.minute(), 30);
        assert!(parse_strict("2024-01-05 2460", "YYYY-MM-DD HHmm", reference()).is_none());
    }

    #[test]
    fn test_escaped_literals_are_not_tokens() {
        let fmt = DateFormat::new("[Daily] YYYY-MM-DD");
        let value = at(2024, 1, 5);
        assert_eq!(fmt.format(&value), "Daily 2024-01-05");
        assert_eq!(fmt.parse_strict("Daily 2024-01-05", reference()), Some(value));
    }

    #[test]
    fn test_unclosed_bracket_is_literal() {
        let value = at(2024, 1, 5);
        assert_eq!(format(&value, "[YYYY"), "[2024");
        assert_eq!(parse_strict("[2024", "[YYYY", reference()), Some(value));
    }

    #[test]
    fn test_segment_count() {
        assert_eq!(DateFormat::new("YYYY-MM-DD").segment_count(), 1);
        assert_eq!(DateFormat::new("YYYY/MM/YYYY-MM-DD").segment_count(), 3);
        assert_eq!(DateFormat::new("[a/b] YYYY").segment_count(), 2);
    }

    #[test]
    fn test_format_then_parse_returns_same_date() {
        let formats = [
            "YYYY-MM-DD",
            "DD.MM.YYYY",
            "dddd, MMMM Do YYYY",
            "YYYY/MM/YYYY-MM-DD",
            "YY-M-D ddd",
            "YYYY-DDDD",
            "GGGG-[W]WW-E",
            "gggg-[w]ww-e",
            "YYYY-MM-DD [W]W",
            "Mo [month], Do, YYYY",
            "YYYY DDDo",
            "do [day of] YYYY-MM-DD",
            "\\Y\\e\\a\\r YYYY-MM-DD",
            "YYYY-MM-DD hh:mm A",
            "YYYY-MM-DD kk:mm",
        ];
        // 2025-12-31 falls in week 1 of 2026 on both week systems.
        let date = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        for value in [
            date.and_hms_opt(0, 0, 0).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 6)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        ] {
            for fmt in formats {
                let formatted = format(&value, fmt);
                assert_eq!(
                    parse_strict(&formatted, fmt, reference()),
                    Some(value),
                    "format {} produced {}",
                    fmt,
                    formatted
                );
            }
        }
    }

    #[test]
    fn test_format_then_parse_keeps_time_of_day() {
        let value = NaiveDate::from_ymd_opt(2024, 1, 6)
            .unwrap()
            .and_hms_opt(21, 15, 0)
            .unwrap();
        for fmt in [
            "YYYY-MM-DD hh-mm A",
            "YYYY-MM-DD h:mm a",
            "YYYY-MM-DD k.mm",
            "YYYY-MM-DD HH:mm:ss",
        ] {
            let formatted = format(&value, fmt);
            assert_eq!(
                parse_strict(&formatted, fmt, reference()),
                Some(value),
                "format {} produced {}",
                fmt,
                formatted
            );
        }
    }

    #[test]
    fn test_format_week_tokens() {
        let saturday = at(2024, 1, 6);
        assert_eq!(format(&saturday, "gggg-[W]ww"), "2024-W01");
        assert_eq!(format(&saturday, "YYYY-[W]WW"), "2024-W01");
        assert_eq!(format(&saturday, "GGGG W E e"), "2024 1 6 6");

        // Sunday starts the locale week, Monday the ISO week.
        let sunday = at(2024, 1, 7);
        assert_eq!(format(&sunday, "gggg-ww-e"), "2024-02-0");
        assert_eq!(format(&sunday, "GGGG-WW-E"), "2024-01-7");

        let new_years_eve = at(2025, 12, 31);
        assert_eq!(format(&new_years_eve, "GGGG-[W]WW-E"), "2026-W01-3");
        assert_eq!(format(&new_years_eve, "gggg-[w]ww-e"), "2026-w01-3");

        // 2021-01-01 still belongs to ISO week 53 of 2020.
        assert_eq!(format(&at(2021, 1, 1), "GGGG-[W]WW"), "2020-W53");
        assert_eq!(format(&at(2021, 1, 1), "gggg-[w]ww"), "2021-w01");
    }

    #[test]
    fn test_parse_strict_week_dates() {
        let parse = |input, fmt| parse_strict(input, fmt, reference());

        // Without a weekday the week starts on Monday (ISO) or Sunday (locale).
        assert_eq!(parse("2024-W01", "GGGG-[W]WW"), Some(at(2024, 1, 1)));
        assert_eq!(parse("2023-W52", "GGGG-[W]WW"), Some(at(2023, 12, 25)));
        assert_eq!(parse("2024-W01", "YYYY-[W]WW"), Some(at(2024, 1, 1)));
        assert_eq!(parse("2024-W01", "gggg-[W]ww"), Some(at(2023, 12, 31)));
        assert_eq!(parse("2024-W01-7", "GGGG-[W]WW-E"), Some(at(2024, 1, 7)));
        assert_eq!(parse("2020-W53", "GGGG-[W]WW"), Some(at(2020, 12, 28)));

        // Weeks past the end of the week year do not exist.
        assert!(parse("2023-W53", "GGGG-[W]WW").is_none());
        assert!(parse("2025-w53", "gggg-[w]ww").is_none());
        assert!(parse("2024-W00", "GGGG-[W]WW").is_none());
        assert!(parse("2024-W1", "GGGG-[W]WW").is_none());
        assert!(parse("2024-W01-8", "GGGG-[W]WW-E").is_none());
        assert!(parse("2024-W01-7", "gggg-[W]ww-e").is_none());
    }

    #[test]
    fn test_parse_strict_week_must_agree_with_calendar_date() {
        let parse = |input, fmt| parse_strict(input, fmt, reference());
        assert!(parse("2024-01-05 W1", "YYYY-MM-DD [W]W").is_some());
        assert!(parse("2024-01-05 W2", "YYYY-MM-DD [W]W").is_none());
        assert!(parse("2024-01-05 5", "YYYY-MM-DD E").is_some());
        assert!(parse("2024-01-05 4", "YYYY-MM-DD E").is_none());
        assert!(parse("2024-01-05 w1 5", "YYYY-MM-DD [w]w e").is_some());
        assert!(parse("2024-01-05 w1 6", "YYYY-MM-DD [w]w e").is_none());
    }

    #[test]
    fn test_twelve_and_twenty_four_hour_clocks() {
        let evening = NaiveDate::from_ymd_opt(2024, 1, 6)
            .unwrap()
            .and_hms_opt(21, 15, 0)
            .unwrap();
        assert_eq!(format(&evening, "YYYY-MM-DD hh-mm A"), "2024-01-06 09-15 PM");
        assert_eq!(format(&evening, "h:mm a"), "9:15 pm");
        assert_eq!(format(&evening, "kk"), "21");

        let midnight = at(2024, 1, 6);
        assert_eq!(format(&midnight, "hh A"), "12 AM");
        assert_eq!(format(&midnight, "k"), "24");

        let time = |input, fmt| parse_strict(input, fmt, reference()).map(|v| v.hour());
        assert_eq!(time("09 PM", "hh A"), Some(21));
        assert_eq!(time("12 am", "hh a"), Some(0));
        assert_eq!(time("12 PM", "hh A"), Some(12));
        assert_eq!(time("24", "kk"), Some(0));
        assert_eq!(time("21 PM", "HH A"), Some(21));
        assert_eq!(time("13 PM", "hh A"), None);
        assert_eq!(time("00 AM", "hh A"), None);
        assert_eq!(time("9 PM", "hh A"), None);
        assert_eq!(time("21 AM", "HH A"), None);
        assert_eq!(time("00", "kk"), None);
    }

    #[test]
    fn test_ordinal_tokens() {
        let value = at(2024, 1, 5);
        assert_eq!(format(&value, "Mo DDDo do"), "1st 5th 5th");
        assert_eq!(format(&at(2024, 12, 22), "Mo DDDo do"), "12th 357th 0th");

        let parse = |input, fmt| parse_strict(input, fmt, reference());
        assert_eq!(parse("3rd of 2024", "Mo [of] YYYY"), Some(at(2024, 3, 1)));
        assert!(parse("3th of 2024", "Mo [of] YYYY").is_none());
        assert_eq!(parse("60th 2024", "DDDo YYYY"), Some(at(2024, 2, 29)));
        assert!(parse("060th 2024", "DDDo YYYY").is_none());
        assert!(parse("5th 2024-01-05", "do YYYY-MM-DD").is_some());
        assert!(parse("4th 2024-01-05", "do YYYY-MM-DD").is_none());
    }

    #[test]
    fn test_backslash_escapes_next_token() {
        let value = at(2024, 1, 5);
        assert_eq!(format(&value, "\\YYYY YYYY"), "YYYY 2024");
        assert_eq!(format(&value, "\\Y\\e\\a\\r YYYY"), "Year 2024");
        assert_eq!(format(&value, "YYYY-\\WWW"), "2024-WW1");
        assert_eq!(format(&value, "YYYY\\"), "2024\\");
        assert_eq!(
            parse_strict("Year 2024", "\\Y\\e\\a\\r YYYY", reference()),
            Some(at(2024, 1, 1))
        );
    }
}
