// src/entity/note.rs
use serde::Serialize;

use super::Reply;

/// A stored note with its replies embedded.
///
/// `replies` is empty when the note is read straight from the notes table;
/// the HTTP layer fills it before responding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    pub id: i64,
    pub code: String,
    pub title: String,
    pub text: String,
    pub public: bool,
    pub owner: String,
    pub image: Option<String>,
    /// Epoch milliseconds
    pub created: i64,
    /// Epoch milliseconds, equal to `created`; notes are never edited.
    pub updated: i64,
    pub replies: Vec<Reply>,
}

/// Fields needed to insert a note. Server-assigned fields are not included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub code: String,
    pub title: String,
    pub text: String,
    pub public: bool,
    pub owner: String,
    pub image: Option<String>,
}

impl NewNote {
    pub fn new(code: impl Into<String>, text: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            title: String::new(),
            text: text.into(),
            public: true,
            owner: owner.into(),
            image: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_public(mut self, public: bool) -> Self {
        self.public = public;
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}
