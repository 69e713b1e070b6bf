// src/entity/reply.rs
use serde::Serialize;

/// A reply attached to a note, as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub text: String,
    /// Epoch milliseconds
    pub time: i64,
}
