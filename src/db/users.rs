//! Accounts. Emails are unique regardless of ASCII case (`COLLATE NOCASE`);
//! the password hash never leaves this module except inside [`UserRecord`].

use anyhow::Result;
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

const INSERT_USER: &str = "INSERT INTO users (email, password_hash, display_name) VALUES (?1, ?2, ?3)";
const SELECT_USER_BY_EMAIL: &str = "SELECT id, email, password_hash, display_name, created_at FROM users WHERE email = ?1";
const SELECT_USER_BY_ID: &str = "SELECT id, email, password_hash, display_name, created_at FROM users WHERE id = ?1";

/// Public part of an account, safe to hand to commands and views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub display_name: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

/// A user row together with its stored credential.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub user: User,
    pub password_hash: String,
}

/// Account repository. Unlike the other repositories it is not scoped to a
/// user, since it is what resolves one.
pub struct Users<'a> {
    conn: &'a Connection,
}

impl<'a> Users<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Stores a new account and returns it as read back.
    ///
    /// Fails on a duplicate email; callers check first to report it nicely.
    pub fn insert(&self, email: &str, password_hash: &str, display_name: Option<&str>) -> Result<User> {
        self.conn.execute(INSERT_USER, params![email, password_hash, display_name])?;
        let id = self.conn.last_insert_rowid() as i32;
        self.get_by_id(id)?
            .ok_or_else(|| anyhow::anyhow!("user {} vanished after insert", id))
    }

    /// Looks up by email, ignoring case.
    pub fn get_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        self.conn
            .query_row(SELECT_USER_BY_EMAIL, params![email], Self::map_record)
            .optional()
            .map_err(Into::into)
    }

    pub fn get_by_id(&self, id: i32) -> Result<Option<User>> {
        let record = self.conn.query_row(SELECT_USER_BY_ID, params![id], Self::map_record).optional()?;
        Ok(record.map(|r| r.user))
    }

    fn map_record(row: &Row) -> rusqlite::Result<UserRecord> {
        Ok(UserRecord {
            user: User {
                id: row.get(0)?,
                email: row.get(1)?,
                display_name: row.get(3)?,
                created_at: row.get(4)?,
            },
            password_hash: row.get(2)?,
        })
    }
}
