//! Pure projections over the task collection.
//!
//! Nothing in this module touches the Store or storage; every function
//! recomputes its result from the slice it is given, so presentation code can
//! call these as often as it re-renders.

use std::cmp::Ordering;

use crate::models::Task;
use crate::utils::day_start;

pub const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    Created,
    Alpha,
}

impl SortMode {
    pub fn label(self) -> &'static str {
        match self {
            SortMode::Created => "created",
            SortMode::Alpha => "alpha",
        }
    }

    pub fn toggled(self) -> SortMode {
        match self {
            SortMode::Created => SortMode::Alpha,
            SortMode::Alpha => SortMode::Created,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn label(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn toggled(self) -> SortDirection {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Fold a character to its base letter, lowercased, for Portuguese-style
/// collation (case- and diacritic-insensitive at the primary level).
fn fold_char(c: char) -> char {
    match c.to_lowercase().next().unwrap_or(c) {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        other => other,
    }
}

/// Locale-aware title comparison: primary key ignores case and diacritics,
/// raw strings break the tie so the order stays deterministic.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    let folded = a.chars().map(fold_char).cmp(b.chars().map(fold_char));
    folded.then_with(|| a.cmp(b))
}

/// Sort tasks by the given mode; `Desc` reverses the result. The underlying
/// sort is stable, so `Created` ties keep their incoming order.
pub fn sort_tasks(tasks: &[Task], mode: SortMode, direction: SortDirection) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    match mode {
        SortMode::Created => sorted.sort_by_key(|task| task.created_at),
        SortMode::Alpha => sorted.sort_by(|a, b| compare_titles(&a.title, &b.title)),
    }
    if direction == SortDirection::Desc {
        sorted.reverse();
    }
    sorted
}

/// Sort completed tasks by completion time, oldest finish first. A missing
/// `completed_at` sorts as the earliest possible value.
pub fn sort_completed_by_finish_time(tasks: &[Task]) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    sorted.sort_by_key(|task| task.completed_at.unwrap_or(0));
    sorted
}

/// The per-list projection: active tasks sorted per mode/direction, completed
/// tasks appended after them (by finish time) when `show_completed`, never
/// interleaved.
pub fn compose_list_view(
    tasks: &[Task],
    mode: SortMode,
    direction: SortDirection,
    show_completed: bool,
) -> Vec<Task> {
    let active: Vec<Task> = tasks.iter().filter(|t| !t.completed).cloned().collect();
    let mut view = sort_tasks(&active, mode, direction);

    if show_completed {
        let completed: Vec<Task> = tasks.iter().filter(|t| t.completed).cloned().collect();
        view.extend(sort_completed_by_finish_time(&completed));
    }
    view
}

/// The "Today" projection: incomplete tasks with a due date, bucketed against
/// local midnight of `now`.
#[derive(Debug, Clone, Default)]
pub struct TodayView {
    pub overdue: Vec<Task>,
    pub today: Vec<Task>,
}

impl TodayView {
    pub fn total(&self) -> usize {
        self.overdue.len() + self.today.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overdue.is_empty() && self.today.is_empty()
    }
}

/// Bucket tasks due before today (overdue) and due today, both sorted by due
/// date ascending. Tasks due tomorrow or later land in neither bucket.
pub fn compose_today_view(tasks: &[Task], now: i64) -> TodayView {
    let today_start = day_start(now);
    let tomorrow_start = today_start + MILLIS_PER_DAY;

    let mut overdue = Vec::new();
    let mut today = Vec::new();
    for task in tasks {
        if task.completed {
            continue;
        }
        let Some(due) = task.due_date else { continue };
        if due < today_start {
            overdue.push(task.clone());
        } else if due < tomorrow_start {
            today.push(task.clone());
        }
    }

    overdue.sort_by_key(|task| task.due_date.unwrap_or(0));
    today.sort_by_key(|task| task.due_date.unwrap_or(0));
    TodayView { overdue, today }
}

/// Tone for a due-date badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueStatus {
    Completed,
    Overdue,
    Today,
    /// Due within the next three days
    Soon,
    Later,
}

/// Classify a due date against `now` for display purposes. Completed tasks
/// are never flagged as overdue.
pub fn due_status(due_date: i64, now: i64, completed: bool) -> DueStatus {
    if completed {
        return DueStatus::Completed;
    }
    let today = day_start(now);
    let due_day = day_start(due_date);
    if due_day < today {
        DueStatus::Overdue
    } else if due_day == today {
        DueStatus::Today
    } else if due_day <= today + 3 * MILLIS_PER_DAY {
        DueStatus::Soon
    } else {
        DueStatus::Later
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{date_to_millis, now_millis};
    use chrono::NaiveDate;

    fn task(title: &str, created_at: i64) -> Task {
        let mut t = Task::new(title.to_string(), "list-1".to_string());
        t.created_at = created_at;
        t
    }

    fn completed_task(title: &str, created_at: i64, completed_at: Option<i64>) -> Task {
        let mut t = task(title, created_at);
        t.completed = true;
        t.completed_at = completed_at;
        t
    }

    fn titles(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.title.as_str()).collect()
    }

    fn day(y: i32, m: u32, d: u32) -> i64 {
        date_to_millis(NaiveDate::from_ymd_opt(y, m, d).unwrap()).unwrap()
    }

    #[test]
    fn alpha_and_created_modes_order_as_expected() {
        // "Zebra" created first, "Apple" second
        let tasks = vec![task("Zebra", 100), task("Apple", 200)];

        let alpha = compose_list_view(&tasks, SortMode::Alpha, SortDirection::Asc, true);
        assert_eq!(titles(&alpha), ["Apple", "Zebra"]);

        let alpha_desc = compose_list_view(&tasks, SortMode::Alpha, SortDirection::Desc, true);
        assert_eq!(titles(&alpha_desc), ["Zebra", "Apple"]);

        let created = compose_list_view(&tasks, SortMode::Created, SortDirection::Asc, true);
        assert_eq!(titles(&created), ["Zebra", "Apple"]);
    }

    #[test]
    fn alpha_sort_folds_case_and_diacritics() {
        let tasks = vec![task("Zebra", 1), task("Ébano", 2), task("água", 3)];
        let sorted = sort_tasks(&tasks, SortMode::Alpha, SortDirection::Asc);
        assert_eq!(titles(&sorted), ["água", "Ébano", "Zebra"]);
    }

    #[test]
    fn created_sort_is_stable_for_equal_timestamps() {
        let tasks = vec![task("first", 5), task("second", 5), task("third", 5)];
        let sorted = sort_tasks(&tasks, SortMode::Created, SortDirection::Asc);
        assert_eq!(titles(&sorted), ["first", "second", "third"]);
    }

    #[test]
    fn completed_tasks_always_come_last() {
        let tasks = vec![
            completed_task("Aardvark done", 1, Some(50)),
            task("Zebra open", 2),
            completed_task("Beta done", 3, None),
        ];

        let view = compose_list_view(&tasks, SortMode::Alpha, SortDirection::Asc, true);
        // Missing completed_at sorts as 0, before the task finished at 50.
        assert_eq!(titles(&view), ["Zebra open", "Beta done", "Aardvark done"]);

        let desc = compose_list_view(&tasks, SortMode::Alpha, SortDirection::Desc, true);
        assert_eq!(titles(&desc), ["Zebra open", "Beta done", "Aardvark done"]);
    }

    #[test]
    fn hiding_completed_drops_them_entirely() {
        let tasks = vec![task("open", 1), completed_task("done", 2, Some(10))];
        let view = compose_list_view(&tasks, SortMode::Created, SortDirection::Asc, false);
        assert_eq!(titles(&view), ["open"]);
    }

    #[test]
    fn sort_completed_by_finish_time_treats_missing_as_zero() {
        let tasks = vec![
            completed_task("late", 1, Some(300)),
            completed_task("unknown", 2, None),
            completed_task("early", 3, Some(100)),
        ];
        let sorted = sort_completed_by_finish_time(&tasks);
        assert_eq!(titles(&sorted), ["unknown", "early", "late"]);
    }

    #[test]
    fn today_view_buckets_by_local_day() {
        let today = day(2025, 6, 15);
        let noon = today + MILLIS_PER_DAY / 2;

        let mut overdue = task("yesterday", 1);
        overdue.due_date = Some(day(2025, 6, 14));
        let mut due_today = task("today", 2);
        due_today.due_date = Some(today);
        let mut future = task("tomorrow", 3);
        future.due_date = Some(day(2025, 6, 16));
        let mut no_due = task("undated", 4);
        no_due.due_date = None;
        let mut finished = task("finished", 5);
        finished.due_date = Some(today);
        finished.completed = true;
        finished.completed_at = Some(noon);

        let view = compose_today_view(&[overdue, due_today, future, no_due, finished], noon);
        assert_eq!(titles(&view.overdue), ["yesterday"]);
        assert_eq!(titles(&view.today), ["today"]);
        assert_eq!(view.total(), 2);
    }

    #[test]
    fn today_buckets_sort_by_due_date() {
        let today = day(2025, 6, 15);
        let noon = today + MILLIS_PER_DAY / 2;

        let mut older = task("older", 1);
        older.due_date = Some(day(2025, 6, 1));
        let mut newer = task("newer", 2);
        newer.due_date = Some(day(2025, 6, 10));

        let view = compose_today_view(&[newer, older], noon);
        assert_eq!(titles(&view.overdue), ["older", "newer"]);
    }

    #[test]
    fn due_status_classifies_against_today() {
        let now = now_millis();
        let today = day_start(now);

        assert_eq!(due_status(today - MILLIS_PER_DAY, now, false), DueStatus::Overdue);
        assert_eq!(due_status(now, now, false), DueStatus::Today);
        assert_eq!(due_status(today + 2 * MILLIS_PER_DAY, now, false), DueStatus::Soon);
        assert_eq!(due_status(today + 10 * MILLIS_PER_DAY, now, false), DueStatus::Later);
        assert_eq!(due_status(today - MILLIS_PER_DAY, now, true), DueStatus::Completed);
    }
}
