//! HTTP service for Snow Notes.
//!
//! # Endpoints
//!
//! All API routes live under `/api`; anything else is looked up as a static
//! file in the service root.
//!
//! - `GET /api/notes` - public notes with replies
//! - `GET /api/notes/admin/all` - every note with replies
//! - `GET /api/notes/{code}` - one note with replies
//! - `GET /api/notes/owner/{clientId}` - notes of one client
//! - `POST /api/notes` - create a note
//! - `POST /api/notes/{code}/replies` - append a reply
//! - `DELETE /api/notes/{code}` - delete a note and its replies

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod server;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use routes::AppState;
pub use server::{build_router, serve};
