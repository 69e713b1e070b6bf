use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnowNotesError {
    #[error("Note not found: {0}")]
    NoteNotFound(String),

    #[error("Code already exists: {0}")]
    DuplicateCode(String),

    #[error("Missing required fields")]
    MissingFields,

    #[error("Reply text required")]
    MissingReplyText,

    #[error("Unsupported value for field '{0}'")]
    UnsupportedValue(String),

    #[error("{0}")]
    Storage(rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rusqlite::Error> for SnowNotesError {
    fn from(e: rusqlite::Error) -> Self {
        SnowNotesError::Storage(e)
    }
}

pub type Result<T> = std::result::Result<T, SnowNotesError>;
