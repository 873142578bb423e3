//! Domain errors surfaced to users.
//!
//! Command handlers work with `anyhow::Result`; these enums carry the
//! failures that callers need to match on (for example to keep a form open
//! after a rejected tag name).

use thiserror::Error;

/// Rejection reasons for a new tag or category name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("{0} name cannot be empty")]
    Empty(&'static str),
    #[error("{0} already exists")]
    AlreadyExists(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Password should be at least {0} characters")]
    WeakPassword(usize),
    #[error("An account with this email already exists")]
    EmailInUse,
    #[error("You are not signed in")]
    NotSignedIn,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReorderError {
    #[error("Reordering is disabled while tasks are loading")]
    Loading,
    #[error("Task {0} is not in this list")]
    UnknownTask(i32),
}
