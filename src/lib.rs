pub mod cli;
pub mod entity;
pub mod error;
pub mod http;
pub mod logging;
pub mod storage;

pub use error::{Result, SnowNotesError};
pub use storage::NoteStore;
