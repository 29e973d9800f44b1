use chrono::{Datelike, Days, Duration, NaiveDate, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;

// Relative day count: "3日後", "10 days later"
static DAYS_LATER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+)\s*(?:日後|days? later)$").expect("Invalid DAYS_LATER_RE regex")
});

// Full date: 2025-12-25 or 2025/12/25. The separator must be consistent
// within one form, so mixed text like "2025-12/25" matches neither.
static FULL_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{4})-(\d{1,2})-(\d{1,2})").expect("Invalid FULL_DATE_RE regex")
});

static FULL_DATE_SLASH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{4})/(\d{1,2})/(\d{1,2})").expect("Invalid FULL_DATE_SLASH_RE regex")
});

// Month-day only: 12-25 or 12/25; year is inferred
static MONTH_DAY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2})[-/](\d{1,2})").expect("Invalid MONTH_DAY_RE regex"));

const TODAY_WORDS: &[&str] = &["今日", "きょう", "today"];
const TOMORROW_WORDS: &[&str] = &["明日", "あした", "あす", "tomorrow"];
const DAY_AFTER_TOMORROW_WORDS: &[&str] = &["明後日", "あさって", "day after tomorrow"];
const NEXT_WEEK_WORDS: &[&str] = &["来週", "next week"];
const WEEK_AFTER_NEXT_WORDS: &[&str] = &["再来週", "week after next"];
const NEXT_MONTH_WORDS: &[&str] = &["来月", "next month"];

// Weekday vocabulary: bare kanji, kanji + 曜 / 曜日, full English names.
// Matched against the whole token, never as a substring, so "3日後" cannot
// be read as Sunday and "来月" cannot be read as Monday.
const WEEKDAY_NAMES: &[(&str, Weekday)] = &[
    ("月", Weekday::Mon),
    ("月曜", Weekday::Mon),
    ("月曜日", Weekday::Mon),
    ("monday", Weekday::Mon),
    ("火", Weekday::Tue),
    ("火曜", Weekday::Tue),
    ("火曜日", Weekday::Tue),
    ("tuesday", Weekday::Tue),
    ("水", Weekday::Wed),
    ("水曜", Weekday::Wed),
    ("水曜日", Weekday::Wed),
    ("wednesday", Weekday::Wed),
    ("木", Weekday::Thu),
    ("木曜", Weekday::Thu),
    ("木曜日", Weekday::Thu),
    ("thursday", Weekday::Thu),
    ("金", Weekday::Fri),
    ("金曜", Weekday::Fri),
    ("金曜日", Weekday::Fri),
    ("friday", Weekday::Fri),
    ("土", Weekday::Sat),
    ("土曜", Weekday::Sat),
    ("土曜日", Weekday::Sat),
    ("saturday", Weekday::Sat),
    ("日", Weekday::Sun),
    ("日曜", Weekday::Sun),
    ("日曜日", Weekday::Sun),
    ("sunday", Weekday::Sun),
];

/// One resolution rule: a named predicate+transform over the folded text
struct Rule {
    name: &'static str,
    apply: fn(&str, NaiveDate) -> Option<NaiveDate>,
}

/// Resolution rules in precedence order. Evaluation stops at the first rule
/// that matches; a later rule never overrides an earlier one. The literal
/// today/tomorrow checks must precede weekday matching, and the bare-weekday
/// rule must refuse text carrying a next-week qualifier so the qualifier
/// rules behind it can see it.
const RULES: &[Rule] = &[
    Rule {
        name: "literal-day",
        apply: literal_day,
    },
    Rule {
        name: "bare-weekday",
        apply: bare_weekday,
    },
    Rule {
        name: "next-week-weekday",
        apply: next_week_weekday,
    },
    Rule {
        name: "bare-next-week",
        apply: bare_next_week,
    },
    Rule {
        name: "days-later",
        apply: days_later,
    },
    Rule {
        name: "week-month-keyword",
        apply: week_month_keyword,
    },
    Rule {
        name: "explicit-date",
        apply: explicit_date,
    },
];

/// Resolve a free-form due-date expression against today.
///
/// Returns `None` when the text matches no rule; that is a routine outcome
/// for the caller to re-prompt on, not an error.
pub fn resolve(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    let folded = text.trim().to_lowercase();
    if folded.is_empty() {
        return None;
    }
    RULES.iter().find_map(|rule| {
        let resolved = (rule.apply)(&folded, today)?;
        tracing::debug!("resolved '{folded}' to {resolved} via {} rule", rule.name);
        Some(resolved)
    })
}

fn literal_day(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    if TODAY_WORDS.contains(&text) {
        return Some(today);
    }
    if TOMORROW_WORDS.contains(&text) {
        return Some(today + Duration::days(1));
    }
    if DAY_AFTER_TOMORROW_WORDS.contains(&text) {
        return Some(today + Duration::days(2));
    }
    None
}

fn bare_weekday(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    if has_next_week_qualifier(text) {
        return None;
    }
    let target = weekday_token(text)?;
    let ahead = days_ahead(target, today);
    // Today's own weekday always means next week, never today itself
    let ahead = if ahead == 0 { 7 } else { ahead };
    Some(today + Duration::days(ahead))
}

fn next_week_weekday(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    let rest = strip_next_week_qualifier(text)?;
    let target = weekday_token(rest)?;
    Some(today + Duration::days(7 + days_ahead(target, today)))
}

fn bare_next_week(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    let rest = strip_next_week_qualifier(text)?;
    if !rest.is_empty() {
        return None;
    }
    Some(today + Duration::days(7 + days_ahead(Weekday::Mon, today)))
}

fn days_later(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    let caps = DAYS_LATER_RE.captures(text)?;
    let days: u64 = caps[1].parse().ok()?;
    // A count past the calendar's range is unrecognized, not a panic
    today.checked_add_days(Days::new(days))
}

// A "next week -> +7" arm here would be unreachable: the bare-next-week
// rule always wins first. Only the reachable keywords remain.
fn week_month_keyword(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    if WEEK_AFTER_NEXT_WORDS.contains(&text) {
        return Some(today + Duration::days(14));
    }
    if NEXT_MONTH_WORDS.contains(&text) {
        return add_months(today, 1);
    }
    None
}

fn explicit_date(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    for re in [&FULL_DATE_RE, &FULL_DATE_SLASH_RE] {
        if let Some(caps) = re.captures(text) {
            let year: i32 = caps[1].parse().ok()?;
            let month: u32 = caps[2].parse().ok()?;
            let day: u32 = caps[3].parse().ok()?;
            return NaiveDate::from_ymd_opt(year, month, day);
        }
    }

    if let Some(caps) = MONTH_DAY_RE.captures(text) {
        let month: u32 = caps[1].parse().ok()?;
        let day: u32 = caps[2].parse().ok()?;
        // Year defaults to the current one; a month-day already past rolls
        // forward to next year, never backwards.
        let this_year = NaiveDate::from_ymd_opt(today.year(), month, day);
        return match this_year {
            Some(date) if date >= today => Some(date),
            _ => NaiveDate::from_ymd_opt(today.year() + 1, month, day),
        };
    }

    None
}

fn weekday_token(text: &str) -> Option<Weekday> {
    WEEKDAY_NAMES
        .iter()
        .find(|(name, _)| *name == text)
        .map(|&(_, weekday)| weekday)
}

/// Days until the next occurrence of `target`, 0 when today already is it
fn days_ahead(target: Weekday, today: NaiveDate) -> i64 {
    let target = target.num_days_from_monday() as i64;
    let current = today.weekday().num_days_from_monday() as i64;
    (target - current).rem_euclid(7)
}

fn has_next_week_qualifier(text: &str) -> bool {
    NEXT_WEEK_WORDS.iter().any(|word| text.contains(word))
}

/// Strip a leading next-week qualifier, plus the connective の and spaces,
/// from expressions like "来週の金曜" or "next week friday"
fn strip_next_week_qualifier(text: &str) -> Option<&str> {
    NEXT_WEEK_WORDS
        .iter()
        .find_map(|word| text.strip_prefix(word))
        .map(|rest| rest.trim_start_matches(['の', ' ']))
}

fn add_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;

    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }

    let day = date.day().min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) {
                29
            } else {
                28
            }
        }
        _ => 30,
    }
}
