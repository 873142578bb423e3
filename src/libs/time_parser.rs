//! Natural-language due dates embedded in task titles.
//!
//! [`parse_time_from_text`] scans free text such as `"call mom tomorrow 3pm"`
//! for a date/time phrase and reports both the resolved date-time and the
//! character span of the phrase, so that callers can highlight it or strip
//! it from the title.
//!
//! ## Recognized phrases
//!
//! - **Relative days**: `today`, `tonight`, `tomorrow` (`tmr`, `tmrw`), `yesterday`
//! - **Weekdays**: `friday`, `on friday`, `this fri`, `next friday`
//! - **Periods**: `next week`, `next month`, `next year`
//! - **Offsets**: `in 3 days`, `in an hour`, `in 20 min`
//! - **Absolute dates**: `2026-10-20`, `oct 20`, `20th october`, `10/20`
//! - **Times**: `3pm`, `3:30 pm`, `15:00`, `at noon`, `@3pm`, `@ midnight`
//!
//! A date phrase directly followed by a time phrase (or the other way round)
//! is a single match: `next friday at 5pm`, `9am tomorrow`.
//!
//! ## Resolution
//!
//! - A date without a time resolves to 12:00 (`tonight` to 20:00).
//! - A time without a date is today, or tomorrow once that time has passed.
//! - Bare and `this` weekdays are the soonest such day on or after today;
//!   `next` weekdays are the soonest such day strictly after today.
//! - Month/day without a year rolls over to next year when already past.
//!
//! Forms that also read as ordinary words need a date cue (`on`, `by`,
//! `due`, `until`, `before`) in free text: `may 5` only counts at the start
//! of the text or after a cue, and fraction-like `1/2` or `3/4` only after a
//! cue. Option values ([`parse_date_input`], [`parse_range_bound`]) are
//! dates by definition and need no cue, but the phrase must be the whole
//! value.
//!
//! Offsets are character offsets (not bytes), end exclusive. The leftmost
//! phrase wins; at one position the longest phrase wins.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use tasknest::libs::time_parser::parse_time_from_text;
//!
//! let now = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap().and_hms_opt(10, 0, 0).unwrap();
//! let parsed = parse_time_from_text("call mom tomorrow 3pm", now);
//! let span = parsed.match_info.unwrap();
//! assert_eq!((span.start, span.end), (9, 21));
//! assert_eq!(parsed.time.unwrap().to_string(), "2026-10-16 15:00:00");
//! ```

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// Time used when a phrase names a day but no time.
pub const DEFAULT_HOUR: u32 = 12;
/// Time used for `tonight`.
pub const TONIGHT_HOUR: u32 = 20;

/// Character span of the recognized phrase, end exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchInfo {
    pub start: usize,
    pub end: usize,
}

impl MatchInfo {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParsedTime {
    pub time: Option<NaiveDateTime>,
    pub match_info: Option<MatchInfo>,
}

/// Words that announce a date in free text.
const DATE_CUES: &[&str] = &["on", "by", "due", "until", "before"];

/// Where the text being parsed comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    /// Free text such as a task title.
    Text,
    /// The value of a date option. `roll_forward` moves a past month/day to
    /// next year.
    Value { roll_forward: bool },
}

/// Finds the first date/time phrase in `text`, resolved relative to `now`.
pub fn parse_time_from_text(text: &str, now: NaiveDateTime) -> ParsedTime {
    scan(text, now, Source::Text)
}

/// Parses the value of a due-date option such as `--due`.
///
/// The phrase has to make up the whole value: `"zzz tomorrow"` is rejected.
pub fn parse_date_input(input: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    parse_value(input, now, true)
}

/// Parses a calendar range bound such as `--from "oct 1"`.
///
/// Like [`parse_date_input`], except that a month/day without a year stays
/// in the current year, so `oct 1` is the start of this month's range.
pub fn parse_range_bound(input: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    parse_value(input, now, false)
}

fn parse_value(input: &str, now: NaiveDateTime, roll_forward: bool) -> Option<NaiveDateTime> {
    let parsed = scan(input, now, Source::Value { roll_forward });
    let span = parsed.match_info?;
    if strip_match(input, &span).chars().any(char::is_alphanumeric) {
        return None;
    }
    parsed.time
}

fn scan(text: &str, now: NaiveDateTime, source: Source) -> ParsedTime {
    if text.trim().is_empty() {
        return ParsedTime::default();
    }

    let tokens = tokenize(text);
    let parser = PhraseParser {
        tokens: &tokens,
        now,
        source,
    };

    for start in 0..tokens.len() {
        if let Some((next, time)) = parser.phrase_at(start) {
            return ParsedTime {
                time: Some(time),
                match_info: Some(MatchInfo {
                    start: tokens[start].start,
                    end: tokens[next - 1].end,
                }),
            };
        }
    }

    ParsedTime::default()
}

/// Removes the matched phrase from `text` and normalizes whitespace.
///
/// Returns the trimmed original when the span is out of range.
pub fn strip_match(text: &str, match_info: &MatchInfo) -> String {
    let chars: Vec<char> = text.chars().collect();
    if match_info.is_empty() || match_info.end > chars.len() {
        return text.trim().to_string();
    }

    let remaining: String = chars[..match_info.start].iter().chain(chars[match_info.end..].iter()).collect();
    let collapsed = remaining.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .trim_end_matches([',', ';', ':', '-'])
        .trim()
        .to_string()
}

#[derive(Debug, Clone)]
struct Token {
    word: String,
    start: usize,
    end: usize,
}

/// Splits on whitespace, lowercases and drops surrounding punctuation while
/// keeping character offsets into the original text.
fn tokenize(text: &str) -> Vec<Token> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        if chars[i].is_whitespace() {
            i += 1;
            continue;
        }
        let mut start = i;
        while i < chars.len() && !chars[i].is_whitespace() {
            i += 1;
        }
        let mut end = i;

        while start < end && matches!(chars[start], '(' | '"' | '\'') {
            start += 1;
        }
        while end > start && matches!(chars[end - 1], ',' | '.' | '!' | '?' | ';' | ')' | '"' | '\'') {
            end -= 1;
        }
        if start < end {
            let word: String = chars[start..end].iter().collect::<String>().to_lowercase();
            tokens.push(Token { word, start, end });
        }
    }

    tokens
}

#[derive(Debug, Clone, Copy)]
struct DatePhrase {
    date: NaiveDate,
    default_time: NaiveTime,
}

impl DatePhrase {
    fn on(date: NaiveDate) -> Self {
        Self {
            date,
            default_time: hour(DEFAULT_HOUR),
        }
    }

    fn at(self, time: Option<NaiveTime>) -> NaiveDateTime {
        self.date.and_time(time.unwrap_or(self.default_time))
    }
}

struct PhraseParser<'a> {
    tokens: &'a [Token],
    now: NaiveDateTime,
    source: Source,
}

impl PhraseParser<'_> {
    fn word(&self, i: usize) -> Option<&str> {
        self.tokens.get(i).map(|t| t.word.as_str())
    }

    fn today(&self) -> NaiveDate {
        self.now.date()
    }

    /// Whether token `i` is introduced as a date.
    fn cued(&self, i: usize) -> bool {
        if let Source::Value { .. } = self.source {
            return true;
        }
        i.checked_sub(1)
            .and_then(|prev| self.word(prev))
            .is_some_and(|prev| DATE_CUES.contains(&prev))
    }

    /// This year's date, or next year's once it has passed (unless parsing a
    /// range bound).
    fn month_day(&self, month: u32, day: u32) -> Option<NaiveDate> {
        let today = self.today();
        let date = NaiveDate::from_ymd_opt(today.year(), month, day)?;
        let roll_forward = !matches!(self.source, Source::Value { roll_forward: false });
        if roll_forward && date < today {
            NaiveDate::from_ymd_opt(today.year() + 1, month, day)
        } else {
            Some(date)
        }
    }

    /// Longest phrase starting at token `i`: returns the index after it.
    fn phrase_at(&self, i: usize) -> Option<(usize, NaiveDateTime)> {
        if let Some((next, date)) = self.date_expr(i) {
            return Some(match self.time_expr(next) {
                Some((after, time)) => (after, date.at(Some(time))),
                None => (next, date.at(None)),
            });
        }
        if let Some((next, time)) = self.time_expr(i) {
            return Some(match self.date_expr(next) {
                Some((after, date)) => (after, date.at(Some(time))),
                None => (next, self.time_only(time)),
            });
        }
        self.offset_expr(i)
    }

    fn time_only(&self, time: NaiveTime) -> NaiveDateTime {
        let candidate = self.today().and_time(time);
        if candidate < self.now {
            candidate + Duration::days(1)
        } else {
            candidate
        }
    }

    fn date_expr(&self, i: usize) -> Option<(usize, DatePhrase)> {
        let today = self.today();
        let word = self.word(i)?;

        match word {
            "today" => Some((i + 1, DatePhrase::on(today))),
            "tonight" => Some((
                i + 1,
                DatePhrase {
                    date: today,
                    default_time: hour(TONIGHT_HOUR),
                },
            )),
            "tomorrow" | "tmr" | "tmrw" => Some((i + 1, DatePhrase::on(today.succ_opt()?))),
            "yesterday" => Some((i + 1, DatePhrase::on(today.pred_opt()?))),
            "on" => {
                if let Some(weekday) = self.word(i + 1).and_then(parse_weekday) {
                    return Some((i + 2, DatePhrase::on(on_or_after(today, weekday))));
                }
                self.absolute_date(i + 1)
            }
            "this" => {
                let weekday = self.word(i + 1).and_then(parse_weekday)?;
                Some((i + 2, DatePhrase::on(on_or_after(today, weekday))))
            }
            "next" => {
                let target = self.word(i + 1)?;
                if let Some(weekday) = parse_weekday(target) {
                    return Some((i + 2, DatePhrase::on(strictly_after(today, weekday))));
                }
                let date = match target {
                    "week" => today + Duration::days(7),
                    "month" => today.checked_add_months(Months::new(1))?,
                    "year" => today.checked_add_months(Months::new(12))?,
                    _ => return None,
                };
                Some((i + 2, DatePhrase::on(date)))
            }
            _ => match parse_full_weekday(word) {
                Some(weekday) => Some((i + 1, DatePhrase::on(on_or_after(today, weekday)))),
                None => self.absolute_date(i),
            },
        }
    }

    fn absolute_date(&self, i: usize) -> Option<(usize, DatePhrase)> {
        let word = self.word(i)?;

        if let Ok(date) = NaiveDate::parse_from_str(word, "%Y-%m-%d") {
            return Some((i + 1, DatePhrase::on(date)));
        }

        if word.contains('/') {
            return self.slash_date(i, word).map(|date| (i + 1, DatePhrase::on(date)));
        }

        // "oct 20", "october 20th"; "may" is also a verb
        if let Some(month) = parse_month(word) {
            if word == "may" && i > 0 && !self.cued(i) {
                return None;
            }
            let day = self.word(i + 1).and_then(parse_day)?;
            return Some((i + 2, DatePhrase::on(self.month_day(month, day)?)));
        }

        // "20 oct", "20th of october"
        let day = parse_day(word)?;
        let (month_index, consumed) = match self.word(i + 1)? {
            "of" => (i + 2, 3),
            _ => (i + 1, 2),
        };
        let month = self.word(month_index).and_then(parse_month)?;
        Some((i + consumed, DatePhrase::on(self.month_day(month, day)?)))
    }

    /// `M/D` or `M/D/YYYY`. A small `M/D` such as `1/2` reads as a fraction
    /// unless cued.
    fn slash_date(&self, i: usize, word: &str) -> Option<NaiveDate> {
        let parts: Vec<&str> = word.split('/').collect();
        match parts.as_slice() {
            [m, d] => {
                let (month, day): (u32, u32) = (m.parse().ok()?, d.parse().ok()?);
                if month < day && day < 10 && !self.cued(i) {
                    return None;
                }
                self.month_day(month, day)
            }
            [m, d, y] if y.len() == 4 => NaiveDate::from_ymd_opt(y.parse().ok()?, m.parse().ok()?, d.parse().ok()?),
            _ => None,
        }
    }

    fn time_expr(&self, i: usize) -> Option<(usize, NaiveTime)> {
        match self.word(i)? {
            "at" | "@" => self.clock(i + 1),
            _ => self.clock(i),
        }
    }

    fn clock(&self, i: usize) -> Option<(usize, NaiveTime)> {
        let word = self.word(i)?;
        // "@3pm"
        let word = word.strip_prefix('@').unwrap_or(word);
        match word {
            "noon" | "midday" => return Some((i + 1, hour(12))),
            "midnight" => return Some((i + 1, hour(0))),
            _ => {}
        }

        let clock = parse_clock(word)?;
        if clock.meridiem.is_some() {
            return Some((i + 1, clock.resolve()?));
        }

        // "3 pm", "3:30 am"
        if let Some(meridiem) = self.word(i + 1).and_then(parse_meridiem) {
            let clock = Clock {
                meridiem: Some(meridiem),
                ..clock
            };
            return Some((i + 2, clock.resolve()?));
        }

        // A bare number is not a time; "15:00" is.
        if clock.has_minutes {
            return Some((i + 1, clock.resolve()?));
        }
        None
    }

    fn offset_expr(&self, i: usize) -> Option<(usize, NaiveDateTime)> {
        if self.word(i)? != "in" {
            return None;
        }
        let amount: i64 = match self.word(i + 1)? {
            "a" | "an" => 1,
            n => n.parse().ok().filter(|n| *n > 0 && *n <= 1000)?,
        };
        let unit = self.word(i + 2)?;
        let next = i + 3;

        let shifted = match unit {
            "minute" | "minutes" | "min" | "mins" => return Some((next, self.now + Duration::minutes(amount))),
            "hour" | "hours" | "hr" | "hrs" => return Some((next, self.now + Duration::hours(amount))),
            "day" | "days" => self.now + Duration::days(amount),
            "week" | "weeks" => self.now + Duration::weeks(amount),
            "month" | "months" => self.now.checked_add_months(Months::new(amount as u32))?,
            _ => return None,
        };

        // "in 2 days at 9am" keeps the shifted day but takes the named time.
        match self.time_expr(next) {
            Some((after, time)) => Some((after, shifted.date().and_time(time))),
            None => Some((next, shifted)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

#[derive(Debug, Clone, Copy)]
struct Clock {
    hour: u32,
    minute: u32,
    has_minutes: bool,
    meridiem: Option<Meridiem>,
}

impl Clock {
    fn resolve(self) -> Option<NaiveTime> {
        let hour = match self.meridiem {
            Some(meridiem) => {
                if !(1..=12).contains(&self.hour) {
                    return None;
                }
                match (meridiem, self.hour) {
                    (Meridiem::Am, 12) => 0,
                    (Meridiem::Am, h) => h,
                    (Meridiem::Pm, 12) => 12,
                    (Meridiem::Pm, h) => h + 12,
                }
            }
            None => self.hour,
        };
        NaiveTime::from_hms_opt(hour, self.minute, 0)
    }
}

fn parse_meridiem(word: &str) -> Option<Meridiem> {
    match word {
        "am" | "a.m" => Some(Meridiem::Am),
        "pm" | "p.m" => Some(Meridiem::Pm),
        _ => None,
    }
}

/// Parses `3`, `3pm`, `3:30pm`, `15:00`. Range checks happen in `resolve`.
fn parse_clock(word: &str) -> Option<Clock> {
    let (digits, meridiem) = if let Some(rest) = word.strip_suffix("am") {
        (rest, Some(Meridiem::Am))
    } else if let Some(rest) = word.strip_suffix("pm") {
        (rest, Some(Meridiem::Pm))
    } else {
        (word, None)
    };

    let (hour_part, minute_part) = match digits.split_once(':') {
        Some((h, m)) => (h, Some(m)),
        None => (digits, None),
    };

    if hour_part.is_empty() || hour_part.len() > 2 || !hour_part.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let hour: u32 = hour_part.parse().ok()?;

    let minute = match minute_part {
        Some(m) if m.len() == 2 && m.chars().all(|c| c.is_ascii_digit()) => m.parse().ok()?,
        Some(_) => return None,
        None => 0,
    };
    if hour > 23 || minute > 59 {
        return None;
    }

    Some(Clock {
        hour,
        minute,
        has_minutes: minute_part.is_some(),
        meridiem,
    })
}

fn parse_full_weekday(word: &str) -> Option<Weekday> {
    match word {
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Full names and abbreviations; abbreviations only count after on/this/next.
fn parse_weekday(word: &str) -> Option<Weekday> {
    parse_full_weekday(word).or(match word {
        "mon" => Some(Weekday::Mon),
        "tue" | "tues" => Some(Weekday::Tue),
        "wed" => Some(Weekday::Wed),
        "thu" | "thur" | "thurs" => Some(Weekday::Thu),
        "fri" => Some(Weekday::Fri),
        "sat" => Some(Weekday::Sat),
        "sun" => Some(Weekday::Sun),
        _ => None,
    })
}

fn parse_month(word: &str) -> Option<u32> {
    let month = match word {
        "jan" | "january" => 1,
        "feb" | "february" => 2,
        "mar" | "march" => 3,
        "apr" | "april" => 4,
        "may" => 5,
        "jun" | "june" => 6,
        "jul" | "july" => 7,
        "aug" | "august" => 8,
        "sep" | "sept" | "september" => 9,
        "oct" | "october" => 10,
        "nov" | "november" => 11,
        "dec" | "december" => 12,
        _ => return None,
    };
    Some(month)
}

/// Day of month with an optional ordinal suffix: `5`, `5th`, `21st`.
fn parse_day(word: &str) -> Option<u32> {
    let digits = ["st", "nd", "rd", "th"]
        .iter()
        .find_map(|suffix| word.strip_suffix(suffix))
        .unwrap_or(word);
    if digits.is_empty() || digits.len() > 2 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().filter(|d| (1..=31).contains(d))
}

fn on_or_after(today: NaiveDate, weekday: Weekday) -> NaiveDate {
    let diff = (weekday.num_days_from_monday() + 7 - today.weekday().num_days_from_monday()) % 7;
    today + Duration::days(diff as i64)
}

fn strictly_after(today: NaiveDate, weekday: Weekday) -> NaiveDate {
    let date = on_or_after(today, weekday);
    if date == today {
        date + Duration::days(7)
    } else {
        date
    }
}

fn hour(h: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, 0, 0).unwrap_or(NaiveTime::MIN)
}
