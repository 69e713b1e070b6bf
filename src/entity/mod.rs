mod note;
mod reply;

pub use note::{NewNote, Note};
pub use reply::Reply;

use chrono::Utc;

/// Current wall-clock time in epoch milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
