//! Rules that sit between a user action and the refetch that settles it.

use std::collections::HashSet;

use shared::{Todo, TodoFields, TodoId, TodoState};

use crate::form::TodoForm;

pub const ESCAPE_KEY: &str = "Escape";

/// What to do with the view once the post-mutation refetch lands.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Created,
    Edited {
        id: TodoId,
        previous_due_date: String,
    },
    Changed(TodoId),
}

impl Outcome {
    pub fn id(&self) -> Option<TodoId> {
        match self {
            Outcome::Created => None,
            Outcome::Edited { id, .. } | Outcome::Changed(id) => Some(*id),
        }
    }

    /// Swaps in the refetched todos and moves the view the way this
    /// mutation asks for.
    pub fn apply(&self, state: &mut TodoState, todos: Vec<Todo>) {
        state.replace_todos(todos);
        match self {
            Outcome::Created => state.after_create(),
            Outcome::Edited {
                previous_due_date, ..
            } => state.after_update(previous_due_date),
            Outcome::Changed(_) => {}
        }
    }
}

/// Todos with a request in flight; their row actions are disabled.
#[derive(Debug, Clone, Default)]
pub struct PendingRequests {
    ids: HashSet<TodoId>,
}

impl PendingRequests {
    pub fn contains(&self, id: TodoId) -> bool {
        self.ids.contains(&id)
    }

    /// Returns `false` when `id` already has a request in flight.
    pub fn begin(&mut self, id: TodoId) -> bool {
        self.ids.insert(id)
    }

    pub fn finish(&mut self, id: Option<TodoId>) {
        if let Some(id) = id {
            self.ids.remove(&id);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Create(TodoFields),
    Update(Todo, TodoFields),
    /// The todo being edited vanished in a refetch.
    Stale(TodoId),
}

impl Submission {
    pub fn from_form(form: &TodoForm, state: &TodoState) -> Self {
        match form.editing {
            Some(id) => match state.find(id) {
                Some(todo) => Submission::Update(todo.clone(), form.to_fields(todo.completed)),
                None => Submission::Stale(id),
            },
            None => Submission::Create(form.to_fields(false)),
        }
    }
}

/// The saved todo behind an open form, or `None` when the form is for a
/// todo that has not been created yet.
pub fn completion_target(form: Option<&TodoForm>, state: &TodoState) -> Option<Todo> {
    form.and_then(|form| form.editing)
        .and_then(|id| state.find(id))
        .cloned()
}

pub fn closes_modal(key: &str) -> bool {
    key == ESCAPE_KEY
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::View;

    fn todo(id: TodoId, month: Option<&str>, completed: bool) -> Todo {
        Todo::from_fields(
            id,
            TodoFields {
                title: format!("todo {}", id),
                month: month.map(String::from),
                year: month.map(|_| "2024".to_string()),
                completed,
                ..Default::default()
            },
        )
    }

    fn loaded(todos: Vec<Todo>) -> TodoState {
        let mut state = TodoState::new();
        state.replace_todos(todos);
        state
    }

    #[test]
    fn second_action_on_a_row_waits_for_the_first() {
        let mut pending = PendingRequests::default();
        assert!(pending.begin(4));
        assert!(!pending.begin(4));
        assert!(pending.begin(5));

        pending.finish(Some(4));
        assert!(!pending.contains(4));
        assert!(pending.contains(5));
        assert!(pending.begin(4));

        pending.finish(None);
        assert!(pending.contains(4));
    }

    #[test]
    fn create_returns_to_all_todos() {
        let mut state = loaded(vec![todo(1, Some("3"), true)]);
        state.navigate(View::CompletedTodosSubgroup("3/24".into()));

        Outcome::Created.apply(&mut state, vec![todo(1, Some("3"), true), todo(2, None, false)]);
        assert_eq!(state.view(), &View::AllTodos);
        assert_eq!(state.all_count(), 2);
    }

    #[test]
    fn edit_in_subgroup_follows_previous_due_date() {
        let mut state = loaded(vec![todo(1, Some("3"), false), todo(2, Some("4"), false)]);
        state.navigate(View::AllTodosSubgroup("4/24".into()));

        let outcome = Outcome::Edited {
            id: 1,
            previous_due_date: "3/24".into(),
        };
        outcome.apply(&mut state, vec![todo(1, Some("5"), false), todo(2, Some("4"), false)]);
        assert_eq!(state.view(), &View::AllTodosSubgroup("3/24".into()));
    }

    #[test]
    fn edit_in_top_level_view_stays_put() {
        let mut state = loaded(vec![todo(1, Some("3"), true)]);
        state.navigate(View::CompletedTodos);

        let outcome = Outcome::Edited {
            id: 1,
            previous_due_date: "3/24".into(),
        };
        outcome.apply(&mut state, vec![todo(1, None, true)]);
        assert_eq!(state.view(), &View::CompletedTodos);
    }

    #[test]
    fn toggle_and_delete_keep_the_current_view() {
        let mut state = loaded(vec![todo(1, Some("3"), false), todo(2, Some("3"), false)]);
        state.navigate(View::AllTodosSubgroup("3/24".into()));

        Outcome::Changed(2).apply(&mut state, vec![todo(1, Some("3"), false)]);
        assert_eq!(state.view(), &View::AllTodosSubgroup("3/24".into()));
        assert_eq!(state.current().count, 1);
        assert_eq!(Outcome::Changed(2).id(), Some(2));
        assert_eq!(Outcome::Created.id(), None);
    }

    #[test]
    fn new_form_has_nothing_to_complete() {
        let state = loaded(vec![todo(1, None, false)]);
        assert_eq!(completion_target(Some(&TodoForm::default()), &state), None);
        assert_eq!(completion_target(None, &state), None);

        let form = TodoForm::for_todo(&todo(1, None, false));
        assert_eq!(completion_target(Some(&form), &state).map(|todo| todo.id), Some(1));
    }

    #[test]
    fn submission_keeps_completed_flag_of_edited_todo() {
        let done = todo(1, None, true);
        let state = loaded(vec![done.clone()]);

        let mut form = TodoForm::for_todo(&done);
        form.title = "renamed".into();
        match Submission::from_form(&form, &state) {
            Submission::Update(todo, fields) => {
                assert_eq!(todo.id, 1);
                assert!(fields.completed);
                assert_eq!(fields.title, "renamed");
            }
            other => panic!("expected an update, got {:?}", other),
        }
    }

    #[test]
    fn submission_for_missing_todo_is_stale() {
        let state = loaded(vec![todo(1, None, false)]);
        let form = TodoForm {
            editing: Some(9),
            title: "ghost".into(),
            ..Default::default()
        };
        assert_eq!(Submission::from_form(&form, &state), Submission::Stale(9));

        let fresh = TodoForm {
            title: "fresh".into(),
            ..Default::default()
        };
        match Submission::from_form(&fresh, &state) {
            Submission::Create(fields) => assert!(!fields.completed),
            other => panic!("expected a create, got {:?}", other),
        }
    }

    #[test]
    fn only_escape_closes_the_modal() {
        assert!(closes_modal("Escape"));
        assert!(!closes_modal("Enter"));
        assert!(!closes_modal("Esc"));
    }
}
