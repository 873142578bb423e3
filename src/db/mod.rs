//! Database layer for tasknest.
//!
//! SQLite stands in for a document store: every repository is bound to one
//! user id at construction and never reads or writes another user's rows.
//! Repositories borrow the connection owned by [`db::Db`], so a command opens
//! the database once and hands it to as many repositories as it needs.
//!
//! ## Usage
//!
//! ```rust
//! use tasknest::db::{db::Db, tasks::Tasks, users::Users};
//! use tasknest::libs::task::{Task, TaskFilter};
//!
//! let db = Db::in_memory()?;
//! let user = Users::new(&db.conn).insert("ada@example.com", "hash", None)?;
//! let tasks = Tasks::new(&db.conn, user.id);
//! tasks.insert(&Task::new("Review notes", "", None))?;
//! assert_eq!(tasks.fetch(TaskFilter::Inbox)?.len(), 1);
//! # Ok::<(), anyhow::Error>(())
//! ```

/// Connection management; opening a database applies pending migrations.
pub mod db;

/// Versioned schema changes tracked in the `migrations` table.
pub mod migrations;

/// Task categories, at most one per task.
pub mod categories;

/// Tags and the many-to-many task/tag relationship.
pub mod tags;

/// Task documents and their dense ordering.
pub mod tasks;

/// Accounts and stored credentials.
pub mod users;
