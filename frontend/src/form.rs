use shared::{Todo, TodoFields, TodoId};

pub const DAY_PLACEHOLDER: &str = "Day";
pub const MONTH_PLACEHOLDER: &str = "Month";
pub const YEAR_PLACEHOLDER: &str = "Year";

pub const FIRST_YEAR: u32 = 2020;
pub const LAST_YEAR: u32 = 2035;

/// Contents of the new/edit modal. `editing` is set when the form was opened
/// from an existing todo.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoForm {
    pub editing: Option<TodoId>,
    pub title: String,
    pub description: String,
    pub day: String,
    pub month: String,
    pub year: String,
}

impl TodoForm {
    pub fn for_todo(todo: &Todo) -> Self {
        Self {
            editing: Some(todo.id),
            title: todo.title.clone(),
            description: todo.description.clone().unwrap_or_default(),
            day: todo.day.clone().unwrap_or_default(),
            month: todo.month.clone().unwrap_or_default(),
            year: todo.year.clone().unwrap_or_default(),
        }
    }

    pub fn to_fields(&self, completed: bool) -> TodoFields {
        TodoFields {
            title: self.title.clone(),
            description: Some(self.description.clone()).filter(|text| !text.is_empty()),
            day: select_value(&self.day, DAY_PLACEHOLDER),
            month: select_value(&self.month, MONTH_PLACEHOLDER),
            year: select_value(&self.year, YEAR_PLACEHOLDER),
            completed,
        }
    }
}

fn select_value(value: &str, placeholder: &str) -> Option<String> {
    if value.is_empty() || value == placeholder {
        None
    } else {
        Some(value.to_string())
    }
}

/// Pairs each option with whether it shows `current`. Parts compare as
/// numbers, so a stored `"3"` selects `"03"`. A stored value missing from
/// the list (a year before the range, say) is appended so editing keeps it.
pub fn date_choices(
    choices: Vec<String>,
    current: &str,
    placeholder: &str,
) -> Vec<(String, bool)> {
    let Some(current) = select_value(current, placeholder) else {
        return choices.into_iter().map(|choice| (choice, false)).collect();
    };

    let mut found = false;
    let mut options: Vec<(String, bool)> = choices
        .into_iter()
        .map(|choice| {
            let is_current = !found && same_date_part(&choice, &current);
            found |= is_current;
            (choice, is_current)
        })
        .collect();
    if !found {
        options.push((current, true));
    }
    options
}

fn same_date_part(a: &str, b: &str) -> bool {
    match (a.trim().parse::<u32>(), b.trim().parse::<u32>()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

pub fn day_options() -> Vec<String> {
    (1..=31).map(|day| format!("{:02}", day)).collect()
}

pub fn month_options() -> Vec<String> {
    (1..=12).map(|month| format!("{:02}", month)).collect()
}

pub fn year_options() -> Vec<String> {
    (FIRST_YEAR..=LAST_YEAR).map(|year| year.to_string()).collect()
}
