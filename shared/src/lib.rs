use serde::{Deserialize, Deserializer, Serialize};

pub mod error;
pub mod repository;
pub mod state;
pub mod view;

pub use error::TodoError;
pub use repository::{attach_due_dates, ApiRequest, RawResponse, RemoteStore, TodoRepository};
pub use state::TodoState;
pub use view::{DateBucket, DateGroup, View, ViewState, NO_DUE_DATE};

pub type TodoId = u32;

pub const TITLE_MIN_CHARS: usize = 3;
pub const TITLE_MAX_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "date_component")]
    pub day: Option<String>,
    #[serde(default, deserialize_with = "date_component")]
    pub month: Option<String>,
    #[serde(default, deserialize_with = "date_component")]
    pub year: Option<String>,
    #[serde(default)]
    pub completed: bool,
    /// Display key derived on the client, never sent over the wire.
    #[serde(default, skip_serializing)]
    pub due_date: String,
}

/// Everything a client may set on a todo: the record minus `id` and `due_date`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoFields {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "date_component")]
    pub day: Option<String>,
    #[serde(default, deserialize_with = "date_component")]
    pub month: Option<String>,
    #[serde(default, deserialize_with = "date_component")]
    pub year: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

impl Todo {
    pub fn from_fields(id: TodoId, fields: TodoFields) -> Self {
        let mut todo = Self {
            id,
            title: fields.title,
            description: fields.description,
            day: fields.day,
            month: fields.month,
            year: fields.year,
            completed: fields.completed,
            due_date: String::new(),
        };
        todo.due_date = todo.due_date_key();
        todo
    }

    pub fn fields(&self) -> TodoFields {
        TodoFields {
            title: self.title.clone(),
            description: self.description.clone(),
            day: self.day.clone(),
            month: self.month.clone(),
            year: self.year.clone(),
            completed: self.completed,
        }
    }

    /// `"{month}/{yy}"` when both month and year are present, otherwise
    /// [`NO_DUE_DATE`]. A month without a year (or the reverse) is undated.
    pub fn due_date_key(&self) -> String {
        match (&self.month, &self.year) {
            (Some(month), Some(year)) => {
                let short_year: String = year.chars().skip(2).collect();
                format!("{}/{}", month, short_year)
            }
            _ => NO_DUE_DATE.to_string(),
        }
    }
}

/// Checks the trimmed title is between 3 and 100 characters.
pub fn validate_title(title: &str) -> Result<(), TodoError> {
    let length = title.trim().chars().count();
    if (TITLE_MIN_CHARS..=TITLE_MAX_CHARS).contains(&length) {
        Ok(())
    } else {
        Err(TodoError::Validation { length })
    }
}

// Due date parts arrive as strings from form posts and as numbers from some
// clients; an empty string means the part was left unset.
fn date_component<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Text(text)) if !text.is_empty() => Some(text),
        Some(Raw::Number(number)) => Some(number.to_string()),
        _ => None,
    })
}
