//! Grouping, ordering and selection of todos for display.

use std::cmp::Ordering;

use crate::{Todo, TodoId};

pub const NO_DUE_DATE: &str = "No Due Date";

pub const ALL_TODOS_TITLE: &str = "All Todos";
pub const COMPLETED_TITLE: &str = "Completed";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    AllTodos,
    CompletedTodos,
    AllTodosSubgroup(String),
    CompletedTodosSubgroup(String),
}

impl View {
    pub fn title(&self) -> &str {
        match self {
            View::AllTodos => ALL_TODOS_TITLE,
            View::CompletedTodos => COMPLETED_TITLE,
            View::AllTodosSubgroup(key) | View::CompletedTodosSubgroup(key) => key.as_str(),
        }
    }

    /// Same kind of view pointed at another due date key. Top-level views
    /// have no key and are returned unchanged.
    pub fn with_key(&self, key: &str) -> View {
        match self {
            View::AllTodosSubgroup(_) => View::AllTodosSubgroup(key.to_string()),
            View::CompletedTodosSubgroup(_) => View::CompletedTodosSubgroup(key.to_string()),
            other => other.clone(),
        }
    }

    fn includes(&self, todo: &Todo) -> bool {
        match self {
            View::AllTodos => true,
            View::CompletedTodos => todo.completed,
            View::AllTodosSubgroup(key) => todo.due_date == *key,
            View::CompletedTodosSubgroup(key) => todo.completed && todo.due_date == *key,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateBucket {
    pub key: String,
    pub ids: Vec<TodoId>,
}

/// Due date key to member ids. Buckets keep first-seen order until sorted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DateGroup {
    buckets: Vec<DateBucket>,
}

impl DateGroup {
    pub fn insert(&mut self, key: &str, id: TodoId) {
        match self.buckets.iter_mut().find(|bucket| bucket.key == key) {
            Some(bucket) => bucket.ids.push(id),
            None => self.buckets.push(DateBucket {
                key: key.to_string(),
                ids: vec![id],
            }),
        }
    }

    pub fn get(&self, key: &str) -> Option<&[TodoId]> {
        self.buckets
            .iter()
            .find(|bucket| bucket.key == key)
            .map(|bucket| bucket.ids.as_slice())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.buckets.iter().map(|bucket| bucket.key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &DateBucket> {
        self.buckets.iter()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    pub title: String,
    pub count: usize,
    pub selected: Vec<Todo>,
}

pub fn group_by_due_date(todos: &[Todo]) -> DateGroup {
    let mut group = DateGroup::default();
    for todo in todos {
        group.insert(&todo.due_date, todo.id);
    }
    group
}

pub fn group_completed_by_due_date(todos: &[Todo]) -> DateGroup {
    let mut group = DateGroup::default();
    for todo in todos.iter().filter(|todo| todo.completed) {
        group.insert(&todo.due_date, todo.id);
    }
    group
}

/// Undated bucket first, then ascending by (year, month). Keys that do not
/// parse as `month/year` go last; the sort is stable so ties keep their order.
pub fn sort_groups_chronologically(mut group: DateGroup) -> DateGroup {
    group
        .buckets
        .sort_by(|a, b| compare_due_date_keys(&a.key, &b.key));
    group
}

pub fn compare_due_date_keys(a: &str, b: &str) -> Ordering {
    match (a == NO_DUE_DATE, b == NO_DUE_DATE) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        (false, false) => {}
    }

    match (parse_due_date_key(a), parse_due_date_key(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// `"3/24"` -> `(24, 3)`, ordered year first. A blank part counts as zero,
/// so `"3/"` (a one-character year) sorts as year zero.
fn parse_due_date_key(key: &str) -> Option<(u32, u32)> {
    let (month, year) = key.split_once('/')?;
    Some((parse_key_part(year)?, parse_key_part(month)?))
}

fn parse_key_part(part: &str) -> Option<u32> {
    let part = part.trim();
    if part.is_empty() {
        return Some(0);
    }
    part.parse().ok()
}

pub fn select_view(view: &View, todos: &[Todo]) -> ViewState {
    let mut selected: Vec<Todo> = todos
        .iter()
        .filter(|todo| view.includes(todo))
        .cloned()
        .collect();
    sort_selected(&mut selected);

    ViewState {
        title: view.title().to_string(),
        count: selected.len(),
        selected,
    }
}

/// Incomplete before complete, then by id.
pub fn sort_selected(todos: &mut [Todo]) {
    todos.sort_by_key(|todo| (todo.completed, todo.id));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{attach_due_dates, TodoFields};

    fn todo(id: TodoId, month: Option<&str>, year: Option<&str>, completed: bool) -> Todo {
        Todo::from_fields(
            id,
            TodoFields {
                title: format!("todo {}", id),
                month: month.map(String::from),
                year: year.map(String::from),
                completed,
                ..Default::default()
            },
        )
    }

    fn scenario() -> Vec<Todo> {
        attach_due_dates(vec![
            todo(1, Some("3"), Some("2024"), false),
            todo(2, None, None, true),
            todo(3, Some("3"), Some("2024"), true),
        ])
    }

    fn ids(state: &ViewState) -> Vec<TodoId> {
        state.selected.iter().map(|todo| todo.id).collect()
    }

    #[test]
    fn scenario_due_dates_and_views() {
        let todos = scenario();
        let due_dates: Vec<&str> = todos.iter().map(|todo| todo.due_date.as_str()).collect();
        assert_eq!(due_dates, ["3/24", NO_DUE_DATE, "3/24"]);

        let all = select_view(&View::AllTodos, &todos);
        assert_eq!(ids(&all), [1, 2, 3]);
        assert_eq!(all.title, ALL_TODOS_TITLE);
        assert_eq!(all.count, 3);

        let done = select_view(&View::CompletedTodos, &todos);
        assert_eq!(ids(&done), [2, 3]);
        assert_eq!(done.title, COMPLETED_TITLE);
        assert_eq!(done.count, 2);
    }

    #[test]
    fn subgroup_views_filter_by_key() {
        let todos = scenario();

        let march = select_view(&View::AllTodosSubgroup("3/24".into()), &todos);
        assert_eq!(ids(&march), [1, 3]);
        assert_eq!(march.title, "3/24");

        let march_done = select_view(&View::CompletedTodosSubgroup("3/24".into()), &todos);
        assert_eq!(ids(&march_done), [3]);

        let missing = select_view(&View::AllTodosSubgroup("1/99".into()), &todos);
        assert!(missing.selected.is_empty());
        assert_eq!(missing.count, 0);
    }

    #[test]
    fn selection_puts_incomplete_first_then_ids() {
        let todos = attach_due_dates(vec![
            todo(9, None, None, true),
            todo(4, None, None, false),
            todo(7, None, None, true),
            todo(2, None, None, false),
        ]);
        let state = select_view(&View::AllTodos, &todos);
        assert_eq!(ids(&state), [2, 4, 7, 9]);
    }

    #[test]
    fn grouping_keeps_insertion_order_within_key() {
        let todos = attach_due_dates(vec![
            todo(5, Some("1"), Some("2025"), false),
            todo(2, None, None, false),
            todo(3, Some("1"), Some("2025"), true),
        ]);
        let group = group_by_due_date(&todos);
        assert_eq!(group.get("1/25"), Some(&[5, 3][..]));
        assert_eq!(group.get(NO_DUE_DATE), Some(&[2][..]));
        assert_eq!(group, group_by_due_date(&todos));

        let done = group_completed_by_due_date(&todos);
        assert_eq!(done.len(), 1);
        assert_eq!(done.get("1/25"), Some(&[3][..]));
    }

    #[test]
    fn groups_sort_undated_first_then_year_then_month() {
        let todos = attach_due_dates(vec![
            todo(1, Some("12"), Some("2024"), false),
            todo(2, Some("2"), Some("2025"), false),
            todo(3, Some("5"), None, false),
            todo(4, Some("1"), Some("2024"), false),
            todo(5, Some("10"), Some("2024"), false),
        ]);
        let sorted = sort_groups_chronologically(group_by_due_date(&todos));
        let keys: Vec<&str> = sorted.keys().collect();
        assert_eq!(keys, [NO_DUE_DATE, "1/24", "10/24", "12/24", "2/25"]);
    }

    #[test]
    fn unparseable_keys_sort_after_dated_ones() {
        assert_eq!(compare_due_date_keys("x/yy", "1/24"), Ordering::Greater);
        assert_eq!(compare_due_date_keys(NO_DUE_DATE, "x/yy"), Ordering::Less);
        assert_eq!(compare_due_date_keys("3/24", "03/24"), Ordering::Equal);
    }

    #[test]
    fn short_year_sorts_as_year_zero() {
        let todos = attach_due_dates(vec![
            todo(1, Some("1"), Some("2024"), false),
            todo(2, Some("3"), Some("7"), false),
        ]);
        assert_eq!(todos[1].due_date, "3/");

        let sorted = sort_groups_chronologically(group_by_due_date(&todos));
        let keys: Vec<&str> = sorted.keys().collect();
        assert_eq!(keys, ["3/", "1/24"]);

        assert_eq!(compare_due_date_keys("/", "1/00"), Ordering::Less);
        assert_eq!(compare_due_date_keys("x/", "1/24"), Ordering::Greater);
    }

    #[test]
    fn with_key_retargets_only_subgroups() {
        assert_eq!(
            View::CompletedTodosSubgroup("1/24".into()).with_key("2/24"),
            View::CompletedTodosSubgroup("2/24".into())
        );
        assert_eq!(View::AllTodos.with_key("2/24"), View::AllTodos);
    }
}
