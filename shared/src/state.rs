use crate::view::{
    group_by_due_date, group_completed_by_due_date, select_view, sort_groups_chronologically,
    DateGroup, View, ViewState,
};
use crate::{attach_due_dates, Todo, TodoId};

/// Client-side snapshot of the server's todo list plus what is on screen.
///
/// The todo list is only ever replaced wholesale with a fresh fetch; groups and
/// the current selection are recomputed from it every time.
#[derive(Debug, Clone, Default)]
pub struct TodoState {
    todos: Vec<Todo>,
    todos_by_date: DateGroup,
    done_todos_by_date: DateGroup,
    view: View,
    current: ViewState,
}

impl TodoState {
    pub fn new() -> Self {
        let mut state = Self::default();
        state.refresh_view();
        state
    }

    pub fn replace_todos(&mut self, todos: Vec<Todo>) {
        self.todos = attach_due_dates(todos);
        self.todos_by_date = sort_groups_chronologically(group_by_due_date(&self.todos));
        self.done_todos_by_date =
            sort_groups_chronologically(group_completed_by_due_date(&self.todos));
        self.refresh_view();
    }

    pub fn navigate(&mut self, view: View) {
        log::debug!("navigating to {:?}", view);
        self.view = view;
        self.refresh_view();
    }

    /// A freshly created todo is always shown in the full list.
    pub fn after_create(&mut self) {
        self.navigate(View::AllTodos);
    }

    /// After saving the edit form a subgroup view follows the due date the
    /// todo had *before* the edit, even if the edit moved it elsewhere.
    pub fn after_update(&mut self, previous_due_date: &str) {
        let view = self.view.with_key(previous_due_date);
        self.navigate(view);
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn find(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    pub fn todos_by_date(&self) -> &DateGroup {
        &self.todos_by_date
    }

    pub fn done_todos_by_date(&self) -> &DateGroup {
        &self.done_todos_by_date
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn current(&self) -> &ViewState {
        &self.current
    }

    pub fn all_count(&self) -> usize {
        self.todos.len()
    }

    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|todo| todo.completed).count()
    }

    fn refresh_view(&mut self) {
        self.current = select_view(&self.view, &self.todos);
    }
}
