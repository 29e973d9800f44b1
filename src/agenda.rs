use chrono::{Duration, NaiveDate};

use crate::types::Task;
use crate::urgency::classify;

/// Default reminder horizon used across the system
pub const DEFAULT_HORIZON_DAYS: i64 = 7;

/// Sort tasks ascending by urgency rank.
///
/// The sort is stable: tasks with equal rank (including two tasks that both
/// lack a due date) keep their relative input order, so a user's manual or
/// creation-time ordering survives within a rank tier.
pub fn order_by_urgency(mut tasks: Vec<Task>, today: NaiveDate) -> Vec<Task> {
    tasks.sort_by_key(|t| classify(t.due_date, today).rank);
    tasks
}

/// Select the tasks that belong in a reminder digest.
///
/// A dated task is included when it is due within `horizon_days` of today,
/// inclusive; overdue tasks always qualify. An undated task is included only
/// while it is at most `horizon_days` old, so it does not surface forever.
/// The result is ordered by urgency.
pub fn reminder_window(tasks: Vec<Task>, today: NaiveDate, horizon_days: i64) -> Vec<Task> {
    // A horizon past the calendar's range saturates instead of panicking
    let cutoff = Duration::try_days(horizon_days)
        .and_then(|days| today.checked_add_signed(days))
        .unwrap_or(if horizon_days >= 0 {
            NaiveDate::MAX
        } else {
            NaiveDate::MIN
        });
    let mut tasks = tasks;
    tasks.retain(|t| match t.due_date {
        Some(due) => due <= cutoff,
        None => (today - t.created_at).num_days() <= horizon_days,
    });
    order_by_urgency(tasks, today)
}

/// Tasks due within three days, overdue included
pub fn urgent_tasks(tasks: Vec<Task>, today: NaiveDate) -> Vec<Task> {
    let mut tasks = tasks;
    tasks.retain(|t| {
        t.due_date
            .is_some_and(|due| classify(Some(due), today).rank <= 3)
    });
    order_by_urgency(tasks, today)
}

/// Tasks due exactly today
pub fn due_today(tasks: Vec<Task>, today: NaiveDate) -> Vec<Task> {
    let mut tasks = tasks;
    tasks.retain(|t| t.due_date == Some(today));
    tasks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::sample_task;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        ymd(2025, 6, 1)
    }

    #[test]
    fn test_order_is_stable_for_equal_ranks() {
        let tasks = vec![
            sample_task("a", None, today()),
            sample_task("b", None, today()),
            sample_task("c", Some(today()), today()),
        ];
        let ordered = order_by_urgency(tasks, today());
        let ids: Vec<&str> = ordered.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_order_overdue_first_absent_last() {
        let tasks = vec![
            sample_task("later", Some(ymd(2025, 6, 20)), today()),
            sample_task("none", None, today()),
            sample_task("overdue", Some(ymd(2025, 5, 20)), today()),
            sample_task("tomorrow", Some(ymd(2025, 6, 2)), today()),
        ];
        let ordered = order_by_urgency(tasks, today());
        let ids: Vec<&str> = ordered.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["overdue", "tomorrow", "later", "none"]);
    }

    #[test]
    fn test_order_undated_last_even_against_far_future_due() {
        let tasks = vec![
            sample_task("undated", None, today()),
            sample_task("far", Some(ymd(2030, 1, 1)), today()),
        ];
        let ordered = order_by_urgency(tasks, today());
        let ids: Vec<&str> = ordered.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["far", "undated"]);
    }

    #[test]
    fn test_order_handles_empty_and_single() {
        assert!(order_by_urgency(Vec::new(), today()).is_empty());
        let one = order_by_urgency(vec![sample_task("x", None, today())], today());
        assert_eq!(one.len(), 1);
    }

    #[test]
    fn test_reminder_inclusion_boundary() {
        let tasks = vec![
            sample_task("at-horizon", Some(ymd(2025, 6, 8)), today()),
            sample_task("past-horizon", Some(ymd(2025, 6, 9)), today()),
            sample_task("overdue", Some(ymd(2025, 5, 20)), today()),
        ];
        let selected = reminder_window(tasks, today(), DEFAULT_HORIZON_DAYS);
        let ids: Vec<&str> = selected.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["overdue", "at-horizon"]);
    }

    #[test]
    fn test_reminder_extreme_horizon_saturates() {
        let tasks = vec![
            sample_task("dated", Some(ymd(2030, 1, 1)), today()),
            sample_task("undated", None, today()),
        ];
        let selected = reminder_window(tasks, today(), i64::MAX);
        assert_eq!(selected.len(), 2);
    }

    #[test]
    fn test_reminder_undated_grace_window() {
        let tasks = vec![
            sample_task("fresh", None, ymd(2025, 5, 25)),
            sample_task("stale", None, ymd(2025, 5, 24)),
        ];
        let selected = reminder_window(tasks, today(), DEFAULT_HORIZON_DAYS);
        let ids: Vec<&str> = selected.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["fresh"]);
    }

    #[test]
    fn test_reminder_output_is_urgency_ordered() {
        let tasks = vec![
            sample_task("soon", Some(ymd(2025, 6, 4)), today()),
            sample_task("overdue", Some(ymd(2025, 5, 30)), today()),
            sample_task("undated", None, today()),
        ];
        let selected = reminder_window(tasks, today(), DEFAULT_HORIZON_DAYS);
        let ids: Vec<&str> = selected.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["overdue", "soon", "undated"]);
    }

    #[test]
    fn test_urgent_includes_overdue_excludes_undated() {
        let tasks = vec![
            sample_task("overdue", Some(ymd(2025, 5, 1)), today()),
            sample_task("in3", Some(ymd(2025, 6, 4)), today()),
            sample_task("in4", Some(ymd(2025, 6, 5)), today()),
            sample_task("undated", None, today()),
        ];
        let urgent = urgent_tasks(tasks, today());
        let ids: Vec<&str> = urgent.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["overdue", "in3"]);
    }

    #[test]
    fn test_due_today_exact_match_only() {
        let tasks = vec![
            sample_task("today", Some(today()), today()),
            sample_task("tomorrow", Some(ymd(2025, 6, 2)), today()),
            sample_task("undated", None, today()),
        ];
        let hits = due_today(tasks, today());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "today");
    }
}
