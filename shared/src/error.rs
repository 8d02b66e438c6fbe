use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TodoError {
    /// Title length out of bounds; raised before any request is sent.
    #[error("You must enter a title between 3 and 100 characters long.")]
    Validation { length: usize },
    #[error("request failed with status {status}")]
    Fetch { status: u16 },
    #[error("network error: {0}")]
    Network(String),
    #[error("invalid JSON payload: {0}")]
    Json(String),
}

impl TodoError {
    /// Validation failures block with an alert; everything else only goes to the log.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, TodoError::Validation { .. })
    }
}

impl From<serde_json::Error> for TodoError {
    fn from(error: serde_json::Error) -> Self {
        TodoError::Json(error.to_string())
    }
}
