use std::path::Path;

use rusqlite::{ffi, params, Connection, ErrorCode, OptionalExtension, Row};

use crate::entity::{NewNote, Note, Reply};
use crate::error::{Result, SnowNotesError};

/// Default database file name, created next to the executable.
pub const NOTES_DB: &str = "notes.db";

const NOTE_COLUMNS: &str = "id, code, title, text, public, owner, image, created, updated";

/// SQLite-backed store for notes and their replies
pub struct NoteStore {
    conn: Connection,
}

impl NoteStore {
    /// Open or create the database file at `path`
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS notes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                code TEXT UNIQUE NOT NULL,
                title TEXT,
                text TEXT NOT NULL,
                public INTEGER DEFAULT 1,
                owner TEXT NOT NULL,
                image TEXT,
                created INTEGER NOT NULL,
                updated INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS replies (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                noteCode TEXT NOT NULL,
                text TEXT NOT NULL,
                time INTEGER NOT NULL,
                FOREIGN KEY(noteCode) REFERENCES notes(code) ON DELETE CASCADE
            );

            CREATE INDEX IF NOT EXISTS idx_notes_public ON notes(public);
            CREATE INDEX IF NOT EXISTS idx_replies_noteCode ON replies(noteCode);
            ",
        )?;
        Ok(())
    }

    /// Insert a note. Fails with `DuplicateCode` if the code is taken.
    pub fn insert_note(&self, note: &NewNote, created: i64, updated: i64) -> Result<()> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO notes (code, title, text, public, owner, image, created, updated)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )?;

        stmt.execute(params![
            note.code,
            note.title,
            note.text,
            i64::from(note.public),
            note.owner,
            note.image,
            created,
            updated,
        ])
        .map_err(|e| match constraint_code(&e) {
            Some(ffi::SQLITE_CONSTRAINT_UNIQUE) => SnowNotesError::DuplicateCode(note.code.clone()),
            _ => e.into(),
        })?;

        Ok(())
    }

    /// Fetch a single note by code, without replies
    pub fn get_note(&self, code: &str) -> Result<Option<Note>> {
        let mut stmt = self
            .conn
            .prepare_cached(&format!("SELECT {NOTE_COLUMNS} FROM notes WHERE code = ?1"))?;
        let note = stmt.query_row([code], note_from_row).optional()?;
        Ok(note)
    }

    /// Public notes, newest first
    pub fn get_all_notes(&self) -> Result<Vec<Note>> {
        self.query_notes(
            &format!("SELECT {NOTE_COLUMNS} FROM notes WHERE public = 1 ORDER BY created DESC, id DESC"),
            [],
        )
    }

    /// Every note belonging to `owner`, private ones included, newest first
    pub fn get_notes_by_owner(&self, owner: &str) -> Result<Vec<Note>> {
        self.query_notes(
            &format!("SELECT {NOTE_COLUMNS} FROM notes WHERE owner = ?1 ORDER BY created DESC, id DESC"),
            [owner],
        )
    }

    /// Every note regardless of visibility, newest first
    pub fn get_all_notes_admin(&self) -> Result<Vec<Note>> {
        self.query_notes(
            &format!("SELECT {NOTE_COLUMNS} FROM notes ORDER BY created DESC, id DESC"),
            [],
        )
    }

    /// Remove the note row. Returns the number of rows deleted.
    pub fn delete_note(&self, code: &str) -> Result<usize> {
        let mut stmt = self.conn.prepare_cached("DELETE FROM notes WHERE code = ?1")?;
        Ok(stmt.execute([code])?)
    }

    /// Append a reply to the note identified by `code`
    pub fn insert_reply(&self, code: &str, text: &str, time: i64) -> Result<()> {
        let mut stmt = self
            .conn
            .prepare_cached("INSERT INTO replies (noteCode, text, time) VALUES (?1, ?2, ?3)")?;

        stmt.execute(params![code, text, time])
            .map_err(|e| match constraint_code(&e) {
                Some(ffi::SQLITE_CONSTRAINT_FOREIGNKEY) => {
                    SnowNotesError::NoteNotFound(code.to_string())
                }
                _ => e.into(),
            })?;

        Ok(())
    }

    /// Replies for a note, oldest first
    pub fn get_replies(&self, code: &str) -> Result<Vec<Reply>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT text, time FROM replies WHERE noteCode = ?1 ORDER BY time ASC, id ASC",
        )?;

        let replies = stmt
            .query_map([code], |row| {
                Ok(Reply {
                    text: row.get(0)?,
                    time: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(replies)
    }

    /// Remove every reply attached to `code`. Returns the number removed.
    pub fn delete_replies_by_code(&self, code: &str) -> Result<usize> {
        let mut stmt = self
            .conn
            .prepare_cached("DELETE FROM replies WHERE noteCode = ?1")?;
        Ok(stmt.execute([code])?)
    }

    /// Delete the replies, then the note, in one transaction.
    ///
    /// The replies are removed explicitly even though the foreign key cascades,
    /// so the outcome does not depend on `PRAGMA foreign_keys`.
    pub fn delete_note_with_replies(&self, code: &str) -> Result<usize> {
        let tx = self.conn.unchecked_transaction()?;
        self.delete_replies_by_code(code)?;
        let deleted = self.delete_note(code)?;
        tx.commit()?;
        Ok(deleted)
    }

    fn query_notes<P: rusqlite::Params>(&self, sql: &str, params: P) -> Result<Vec<Note>> {
        let mut stmt = self.conn.prepare_cached(sql)?;
        let notes = stmt
            .query_map(params, note_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(notes)
    }
}

fn note_from_row(row: &Row<'_>) -> rusqlite::Result<Note> {
    let public: Option<i64> = row.get("public")?;
    Ok(Note {
        id: row.get("id")?,
        code: row.get("code")?,
        title: row.get::<_, Option<String>>("title")?.unwrap_or_default(),
        text: row.get("text")?,
        public: public.unwrap_or(1) != 0,
        owner: row.get("owner")?,
        image: row.get("image")?,
        created: row.get("created")?,
        updated: row.get("updated")?,
        replies: Vec::new(),
    })
}

/// Extended result code of a constraint violation, if `e` is one.
fn constraint_code(e: &rusqlite::Error) -> Option<i32> {
    match e {
        rusqlite::Error::SqliteFailure(err, _) if err.code == ErrorCode::ConstraintViolation => {
            Some(err.extended_code)
        }
        _ => None,
    }
}
