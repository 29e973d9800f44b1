use chrono::NaiveDate;
use serde::Serialize;

/// Sort rank for tasks without a due date.
///
/// Must exceed the day offset of every representable due date, so undated
/// tasks can never sort ahead of a dated one however far out it is.
pub const NO_DUE_RANK: i64 = i64::MAX;

/// Discrete attention tier for a due date relative to today
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Overdue,
    Today,
    Tomorrow,
    Soon,
    Upcoming,
    Later,
    None,
}

/// Classification of one due date: an ordering rank plus its bucket.
///
/// The rank is the signed whole-calendar-day distance from today (negative
/// when overdue), so ordering by rank is ordering by due date with absent
/// dates last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Urgency {
    pub rank: i64,
    pub bucket: Bucket,
}

/// Classify a possibly-absent due date against today
pub fn classify(due: Option<NaiveDate>, today: NaiveDate) -> Urgency {
    let Some(due) = due else {
        return Urgency {
            rank: NO_DUE_RANK,
            bucket: Bucket::None,
        };
    };
    // Whole-day difference on civil dates; never elapsed time, so DST and
    // sub-day drift cannot shift the result.
    let rank = (due - today).num_days();
    let bucket = match rank {
        i64::MIN..=-1 => Bucket::Overdue,
        0 => Bucket::Today,
        1 => Bucket::Tomorrow,
        2..=3 => Bucket::Soon,
        4..=7 => Bucket::Upcoming,
        _ => Bucket::Later,
    };
    Urgency { rank, bucket }
}
