//! Core library modules for tasknest.
//!
//! ## Features
//!
//! - **Capture**: Natural-language due dates and the highlighted input field
//! - **Organization**: Tasks, tags, categories and drag-style reordering
//! - **Access**: Accounts, sessions and the route guard
//! - **Preferences**: Theme, accessibility, language and recent pages
//! - **Output**: Tables, screen-reader text, calendar and exports
//!
//! ## Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use tasknest::libs::time_parser::{parse_time_from_text, strip_match};
//!
//! let now = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap().and_hms_opt(9, 0, 0).unwrap();
//! let parsed = parse_time_from_text("Pay rent next friday", now);
//! let title = strip_match("Pay rent next friday", &parsed.match_info.unwrap());
//! assert_eq!(title, "Pay rent");
//! ```

pub mod auth;
pub mod config;
pub mod context;
pub mod data_storage;
pub mod date_range;
pub mod editable;
pub mod error;
pub mod export;
pub mod formatter;
pub mod i18n;
pub mod loading;
pub mod messages;
pub mod reorder;
pub mod route;
pub mod secret;
pub mod tag;
pub mod task;
pub mod time_parser;
pub mod view;
