//! Email/password accounts and the persisted session.
//!
//! The session lives in `session.json` next to the database and records the
//! signed-in user plus the page a signed-out visitor was redirected away
//! from, so that the next successful login can continue there.

use super::data_storage::DataStorage;
use super::error::AuthError;
use super::secret::{hash_password, verify_password};
use crate::db::users::{User, Users};
use crate::msg_debug;
use anyhow::Result;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

pub const SESSION_FILE_NAME: &str = "session.json";
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    pub user_id: Option<i32>,
    pub redirect_after_login: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(storage: &DataStorage) -> Result<Self> {
        Ok(Self {
            path: storage.get_path(SESSION_FILE_NAME)?,
        })
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing or unreadable file is an empty session.
    pub fn load(&self) -> Session {
        if !self.path.exists() {
            return Session::default();
        }
        match fs::read_to_string(&self.path).map(|s| serde_json::from_str::<Session>(&s)) {
            Ok(Ok(session)) => session,
            Ok(Err(e)) => {
                msg_debug!(format!("ignoring malformed session file: {}", e));
                Session::default()
            }
            Err(e) => {
                msg_debug!(format!("cannot read session file: {}", e));
                Session::default()
            }
        }
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(&self.path)?;
        serde_json::to_writer_pretty(&file, session)?;
        Ok(())
    }

    pub fn remember_redirect(&self, path: &str) -> Result<()> {
        let mut session = self.load();
        session.redirect_after_login = Some(path.to_string());
        self.save(&session)
    }

    /// Returns and forgets the remembered page.
    pub fn take_redirect(&self) -> Result<Option<String>> {
        let mut session = self.load();
        let redirect = session.redirect_after_login.take();
        if redirect.is_some() {
            self.save(&session)?;
        }
        Ok(redirect)
    }
}

pub fn validate_email(email: &str) -> Result<(), AuthError> {
    let email = email.trim();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(AuthError::InvalidEmail)
    }
}

pub fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::WeakPassword(MIN_PASSWORD_LEN));
    }
    Ok(())
}

pub struct Auth<'a> {
    users: Users<'a>,
    sessions: SessionStore,
}

impl<'a> Auth<'a> {
    pub fn new(conn: &'a Connection, sessions: SessionStore) -> Self {
        Self {
            users: Users::new(conn),
            sessions,
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Creates the account and signs it in.
    pub fn sign_up(&self, email: &str, password: &str, display_name: Option<&str>) -> Result<User> {
        let email = email.trim();
        validate_email(email)?;
        validate_password(password)?;
        if self.users.get_by_email(email)?.is_some() {
            return Err(AuthError::EmailInUse.into());
        }

        let user = self.users.insert(email, &hash_password(password), display_name)?;
        self.start_session(user.id)?;
        Ok(user)
    }

    /// Unknown email and wrong password fail the same way.
    pub fn sign_in(&self, email: &str, password: &str) -> Result<User> {
        let record = self
            .users
            .get_by_email(email.trim())?
            .filter(|record| verify_password(password, &record.password_hash))
            .ok_or(AuthError::InvalidCredentials)?;

        self.start_session(record.user.id)?;
        Ok(record.user)
    }

    pub fn sign_out(&self) -> Result<()> {
        let mut session = self.sessions.load();
        session.user_id = None;
        self.sessions.save(&session)
    }

    /// The signed-in user; a session pointing at a removed account is empty.
    pub fn current_user(&self) -> Result<Option<User>> {
        match self.sessions.load().user_id {
            Some(id) => self.users.get_by_id(id),
            None => Ok(None),
        }
    }

    pub fn require_user(&self) -> Result<User> {
        self.current_user()?.ok_or_else(|| AuthError::NotSignedIn.into())
    }

    fn start_session(&self, user_id: i32) -> Result<()> {
        let mut session = self.sessions.load();
        session.user_id = Some(user_id);
        self.sessions.save(&session)
    }
}
