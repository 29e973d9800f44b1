use chrono::{Datelike, NaiveDate};

use crate::agenda::order_by_urgency;
use crate::types::Task;
use crate::urgency::{classify, Bucket};

/// Tasks shown per user in a digest before the overflow line
const DIGEST_TASKS_PER_USER: usize = 5;

/// Canonical human-readable due label, e.g. "期限切れ (5/20)" or "期限なし"
pub fn due_label(due: Option<NaiveDate>, today: NaiveDate) -> String {
    let Some(due) = due else {
        return "期限なし".to_string();
    };
    let date_str = format!("{}/{}", due.month(), due.day());
    let urgency = classify(Some(due), today);
    match urgency.bucket {
        Bucket::Overdue => format!("期限切れ ({date_str})"),
        Bucket::Today => format!("今日まで ({date_str})"),
        Bucket::Tomorrow => format!("明日まで ({date_str})"),
        Bucket::Soon | Bucket::Upcoming => format!("{}日後 ({date_str})", urgency.rank),
        Bucket::Later | Bucket::None => date_str,
    }
}

/// Visual urgency marker for a due date
pub fn due_marker(due: Option<NaiveDate>, today: NaiveDate) -> &'static str {
    match classify(due, today).bucket {
        Bucket::Overdue | Bucket::Today => "🔴",
        Bucket::Tomorrow => "🟠",
        Bucket::Soon => "🟡",
        Bucket::Upcoming => "🟢",
        Bucket::Later | Bucket::None => "⚪",
    }
}

/// Render an urgency-ordered task list as Markdown
pub fn render_tasks_markdown(tasks: &[Task], today: NaiveDate) -> String {
    let mut output = String::from("# Tasks\n\n");
    for (index, task) in tasks.iter().enumerate() {
        output.push_str(&format!(
            "{}. {} - {} {}\n",
            index + 1,
            task.name,
            due_marker(task.due_date, today),
            due_label(task.due_date, today),
        ));
    }
    output
}

/// Render a per-user reminder digest as Markdown.
///
/// Tasks are grouped by user in first-seen order, each group is ordered by
/// urgency, capped at five entries with an overflow line, and headed by
/// overdue / due-today / urgent counts.
pub fn render_digest_markdown(tasks: &[Task], today: NaiveDate) -> String {
    let groups = group_by_user(tasks);

    if groups.is_empty() {
        return String::from("# 今週のタスク\n\n一週間以内の未完了タスクはありません\n");
    }

    let mut output = String::from("# 今週のタスク\n\n");
    for (_, user_tasks) in groups {
        let user_tasks = order_by_urgency(user_tasks, today);
        output.push_str(&format!(
            "## {}さん ({})\n\n",
            user_tasks[0].user_name,
            group_summary(&user_tasks, today)
        ));

        for task in user_tasks.iter().take(DIGEST_TASKS_PER_USER) {
            output.push_str(&format!(
                "- {} - {} {}\n",
                task.name,
                due_marker(task.due_date, today),
                due_label(task.due_date, today),
            ));
        }
        if user_tasks.len() > DIGEST_TASKS_PER_USER {
            output.push_str(&format!(
                "- ... 他{}件\n",
                user_tasks.len() - DIGEST_TASKS_PER_USER
            ));
        }
        output.push('\n');
    }
    output
}

// Groups are keyed by user id; the display name is only presentation and
// two users may share one
fn group_by_user(tasks: &[Task]) -> Vec<(String, Vec<Task>)> {
    let mut groups: Vec<(String, Vec<Task>)> = Vec::new();
    for task in tasks {
        match groups.iter_mut().find(|(id, _)| *id == task.user_id) {
            Some((_, list)) => list.push(task.clone()),
            None => groups.push((task.user_id.clone(), vec![task.clone()])),
        }
    }
    groups
}

fn group_summary(tasks: &[Task], today: NaiveDate) -> String {
    let mut overdue = 0;
    let mut due_today = 0;
    let mut urgent = 0;
    for task in tasks {
        if task.due_date.is_none() {
            continue;
        }
        match classify(task.due_date, today).rank {
            rank if rank < 0 => overdue += 1,
            0 => due_today += 1,
            1..=3 => urgent += 1,
            _ => {}
        }
    }

    let mut summary = format!("{}件", tasks.len());
    if overdue > 0 {
        summary.push_str(&format!(", 🔴{overdue}件期限切れ"));
    }
    if due_today > 0 {
        summary.push_str(&format!(", ⚡{due_today}件今日まで"));
    } else if urgent > 0 {
        summary.push_str(&format!(", 🟡{urgent}件緊急"));
    }
    summary
}
