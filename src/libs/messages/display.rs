//! Display implementation for tasknest messages.
//!
//! All user-facing text lives here so that commands only ever deal with
//! structured `Message` values. Translated view titles and table labels are
//! handled separately by [`crate::libs::i18n`].

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter) -> Result {
        let s = match self {
            // === TASK MESSAGES ===
            Message::TaskCreated(title) => format!("Task '{}' created.", title),
            Message::TaskCreatedWithDue(title, due) => format!("Task '{}' created, due {}.", title, due),
            Message::TaskUpdated(title) => format!("Task '{}' updated.", title),
            Message::TaskDeleted(title) => format!("Task '{}' deleted.", title),
            Message::TaskNotFound(id) => format!("Task with ID {} not found.", id),
            Message::TaskCompleted(title) => format!("Task '{}' completed.", title),
            Message::TaskReopened(title) => format!("Task '{}' reopened.", title),
            Message::TaskMoved(title, position) => format!("Task '{}' moved to position {}.", title, position),
            Message::TaskTitleEmpty => "Task title cannot be empty".to_string(),
            Message::NoTasksInView(view) => format!("No tasks in {}.", view),
            Message::ConfirmDeleteTask(title) => format!("Delete task '{}'?", title),
            Message::PromptTaskTitle => "Task title".to_string(),
            Message::PromptTaskDescription => "Description".to_string(),
            Message::PromptTaskDue => "Due (e.g. tomorrow 3pm, leave empty for none)".to_string(),

            // === REORDER MESSAGES ===
            Message::ReorderFailed(error) => format!("Failed to save the new order: {}", error),

            // === TAG MESSAGES ===
            Message::TagCreated(name) => format!("Tag '{}' created successfully.", name),
            Message::TagUpdated(name) => format!("Tag '{}' updated successfully.", name),
            Message::TagDeleted(name) => format!("Tag '{}' deleted successfully.", name),
            Message::TagNotFound(name) => format!("Tag '{}' not found.", name),
            Message::NoTagsFound => "No tags found.".to_string(),
            Message::TagListHeader => "Tags:".to_string(),
            Message::EditingTag(name) => format!("Editing tag: {}", name),
            Message::ConfirmDeleteTag(name) => format!("Delete tag '{}'?", name),
            Message::ConfirmDeleteTagWithTasks(name, count) => {
                format!("Tag '{}' is used by {} task(s). Delete anyway?", name, count)
            }
            Message::PromptTagName => "Tag name".to_string(),
            Message::PromptTagColor => "Tag color (e.g., blue, green, red)".to_string(),
            Message::SelectTagAction => "What would you like to do?".to_string(),
            Message::SelectTagToEdit => "Select tag to edit".to_string(),
            Message::SelectTagToDelete => "Select tag to delete".to_string(),
            Message::TagMoved(name, position) => format!("Tag '{}' moved to position {}.", name, position),

            // === CATEGORY MESSAGES ===
            Message::CategoryCreated(name) => format!("Category '{}' created.", name),
            Message::CategoryUpdated(name) => format!("Category '{}' updated.", name),
            Message::CategoryDeleted(name) => format!("Category '{}' deleted.", name),
            Message::CategoryNotFound(name) => format!("Category '{}' not found.", name),
            Message::NoCategoriesFound => "No categories found.".to_string(),
            Message::CategoryListHeader => "Categories:".to_string(),
            Message::CategoryMoved(name, position) => format!("Category '{}' moved to position {}.", name, position),
            Message::ConfirmDeleteCategory(name, 0) => format!("Delete category '{}'?", name),
            Message::ConfirmDeleteCategory(name, count) => {
                format!("Category '{}' holds {} task(s); they will become uncategorized. Delete?", name, count)
            }

            // === AUTH MESSAGES ===
            Message::SignedUp(email) => format!("Account created for {}.", email),
            Message::SignedIn(email) => format!("Signed in as {}.", email),
            Message::SignedOut => "Signed out.".to_string(),
            Message::NotSignedIn => "You are not signed in. Run `tasknest login` first.".to_string(),
            Message::SignedInAs(email) => format!("Signed in as {}", email),
            Message::LoginRequired(path) => format!("Sign in to open {}.", path),
            Message::PromptEmail => "Email".to_string(),
            Message::PromptPassword => "Password".to_string(),
            Message::PromptPasswordConfirm => "Repeat password".to_string(),
            Message::PasswordsDoNotMatch => "Passwords do not match".to_string(),

            // === ROUTING MESSAGES ===
            Message::RedirectingTo(path) => format!("Redirecting to {}", path),

            // === CALENDAR MESSAGES ===
            Message::CalendarHeader(from, to) => format!("Calendar {} - {}", from, to),
            Message::InvalidDate(input) => format!("Could not understand the date '{}'.", input),

            // === SETTINGS MESSAGES ===
            Message::ConfigSaved => "Settings saved.".to_string(),
            Message::SettingsHeader => "Settings:".to_string(),
            Message::RecentPagesHeader => "Recently viewed:".to_string(),
            Message::NoRecentPages => "Nothing viewed yet.".to_string(),
            Message::PromptTheme => "Theme".to_string(),
            Message::PromptLanguage => "Language".to_string(),
            Message::PromptFontSize => "Font size".to_string(),
            Message::PromptAccessibility => "Accessibility options".to_string(),
            Message::UnsupportedLanguage(code) => format!("Unsupported language '{}'. Use en, es, fr or de.", code),

            // === LOADING MESSAGES ===
            Message::FailedToLoadData => "Failed to load data".to_string(),
            Message::PromptTryAgain => "Try again?".to_string(),
            Message::SomethingWentWrong => "Something went wrong. Please run the command again.".to_string(),

            // === EXPORT MESSAGES ===
            Message::ExportCompleted(path) => format!("Tasks exported to {}", path),
            Message::ExportNoData => "There are no tasks to export.".to_string(),

            // === CAPTURE MESSAGES ===
            Message::CaptureHint => "Type a task, Enter to save, Esc to cancel".to_string(),
            Message::CaptureCancelled => "Capture cancelled.".to_string(),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending migration(s)", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All migrations completed successfully".to_string(),
            Message::DatabaseVersion(current, latest) => format!("Database version: v{} (latest v{})", current, latest),
            Message::DatabaseNeedsUpdate => "Database needs update. It will be migrated on the next command.".to_string(),
            Message::DatabaseUpToDate => "Database is up to date".to_string(),
            Message::MigrationHistory => "Migration history:".to_string(),

            // === GENERAL MESSAGES ===
            Message::OperationCancelled => "Operation cancelled.".to_string(),
        };
        write!(f, "{}", s)
    }
}
