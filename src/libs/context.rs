//! Per-invocation application state handed to every command.

use super::auth::{Auth, SessionStore};
use super::config::{Config, CONFIG_FILE_NAME};
use super::data_storage::DataStorage;
use super::error::AuthError;
use super::messages::Message;
use super::route::{resolve, Resolution, Route};
use super::view::ViewOptions;
use crate::db::db::{Db, DB_FILE_NAME};
use crate::db::users::User;
use crate::{msg_debug, msg_info};
use anyhow::Result;
use chrono::{Local, NaiveDateTime};

pub struct AppContext {
    pub storage: DataStorage,
    pub db: Db,
    pub config: Config,
    sessions: SessionStore,
    now: Option<NaiveDateTime>,
}

impl AppContext {
    /// Opens the database and preferences in the default data directory.
    pub fn open() -> Result<Self> {
        Self::with_storage(DataStorage::new())
    }

    pub fn with_storage(storage: DataStorage) -> Result<Self> {
        let db = Db::open(storage.get_path(DB_FILE_NAME)?)?;
        let config = Config::read_from(&storage.get_path(CONFIG_FILE_NAME)?)?;
        let sessions = SessionStore::new(&storage)?;
        Ok(Self {
            storage,
            db,
            config,
            sessions,
            now: None,
        })
    }

    /// Pins the clock; used by tests and by commands that need one
    /// consistent "now" across several steps.
    pub fn with_now(mut self, now: NaiveDateTime) -> Self {
        self.now = Some(now);
        self
    }

    pub fn now(&self) -> NaiveDateTime {
        self.now.unwrap_or_else(|| Local::now().naive_local())
    }

    pub fn auth(&self) -> Auth<'_> {
        Auth::new(&self.db.conn, self.sessions.clone())
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn current_user(&self) -> Result<Option<User>> {
        self.auth().current_user()
    }

    pub fn require_user(&self) -> Result<User> {
        match self.current_user()? {
            Some(user) => Ok(user),
            None => Err(AuthError::NotSignedIn.into()),
        }
    }

    pub fn save_config(&self) -> Result<()> {
        self.config.save_to(&self.storage.get_path(CONFIG_FILE_NAME)?)
    }

    pub fn view_options(&self) -> ViewOptions {
        ViewOptions::from_config(&self.config)
    }

    /// Resolves `path` through the guard.
    ///
    /// Returns the page to render. Signed-out visits to protected pages
    /// remember the path for the next login and return `Route::Login`.
    pub fn navigate(&mut self, path: &str) -> Result<Route> {
        let signed_in = self.current_user()?.is_some();
        let route = match resolve(path, signed_in) {
            Resolution::Render(route) => route,
            Resolution::Redirect { to, remember } => {
                if let Some(requested) = remember {
                    self.sessions.remember_redirect(&requested)?;
                    msg_info!(Message::LoginRequired(requested));
                } else {
                    msg_debug!(Message::RedirectingTo(to.path()));
                }
                to
            }
        };

        if route != Route::Login {
            self.config.push_recent_page(&route.path());
            self.save_config()?;
        }
        Ok(route)
    }
}
