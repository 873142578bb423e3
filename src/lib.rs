//! # tasknest
//!
//! A personal task manager for the terminal: capture tasks with due dates
//! written in plain language, organize them with tags and categories, and
//! reorder them by hand.
//!
//! ## Features
//!
//! - **Quick capture**: `tomorrow 3pm`, `next friday`, `in 2 hours` are
//!   detected while typing and highlighted
//! - **Views**: Inbox, today, upcoming, completed, per-tag pages and a calendar
//! - **Accounts**: Email/password sign-in; every list is private to its user
//! - **Accessibility**: High-contrast highlights and screen-reader output
//! - **Export**: CSV and JSON
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tasknest::commands::Cli;
//!
//! fn main() -> anyhow::Result<()> {
//!     Cli::menu()
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
