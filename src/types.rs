use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A stored task, as the core sees it.
///
/// Only the fields the due-date engine touches are modeled; the storage
/// layer may carry more. `completed` is carried through for callers but the
/// engine itself never filters on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub name: String,
    pub user_id: String,
    pub user_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub created_at: NaiveDate,
    #[serde(default)]
    pub completed: bool,
}

/// A raw stored row, as the persistence layer hands it over.
///
/// The due cell carries the codec's canonical string, empty when the task
/// has no due date. Conversion into [`Task`] is the single point where
/// stored strings become calendar dates.
#[derive(Debug, Clone, Deserialize)]
pub struct StoredTask {
    pub id: String,
    pub name: String,
    pub user_id: String,
    pub user_name: String,
    #[serde(default)]
    pub due_date: String,
    pub created_at: NaiveDate,
    #[serde(default)]
    pub completed: bool,
}

impl From<StoredTask> for Task {
    fn from(row: StoredTask) -> Self {
        Task {
            id: row.id,
            name: row.name,
            user_id: row.user_id,
            user_name: row.user_name,
            due_date: crate::codec::decode_stored(&row.due_date),
            created_at: row.created_at,
            completed: row.completed,
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_task(id: &str, due: Option<NaiveDate>, created: NaiveDate) -> Task {
    Task {
        id: id.to_string(),
        name: format!("task {id}"),
        user_id: "u1".to_string(),
        user_name: "tester".to_string(),
        due_date: due,
        created_at: created,
        completed: false,
    }
}
