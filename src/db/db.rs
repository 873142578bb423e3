use super::migrations::init_with_migrations;
use crate::libs::data_storage::DataStorage;
use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;

pub const DB_FILE_NAME: &str = "tasknest.db";

/// Owns the SQLite connection shared by every repository in a command run.
pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens the database in the application data directory.
    pub fn new() -> Result<Db> {
        let db_file_path = DataStorage::new().get_path(DB_FILE_NAME)?;
        Self::open(db_file_path)
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Db> {
        let conn = Connection::open(path)?;
        Self::prepare(conn)
    }

    pub fn in_memory() -> Result<Db> {
        let conn = Connection::open_in_memory()?;
        Self::prepare(conn)
    }

    /// Opens a connection without applying migrations.
    pub fn new_without_migrations(path: impl AsRef<Path>) -> Result<Connection> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(conn)
    }

    fn prepare(mut conn: Connection) -> Result<Db> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        init_with_migrations(&mut conn)?;
        Ok(Db { conn })
    }
}
