#[derive(Debug, Clone)]
pub enum Message {
    // === TASK MESSAGES ===
    TaskCreated(String),
    TaskCreatedWithDue(String, String), // title, due
    TaskUpdated(String),
    TaskDeleted(String),
    TaskNotFound(i32),
    TaskCompleted(String),
    TaskReopened(String),
    TaskMoved(String, usize), // title, new position
    TaskTitleEmpty,
    NoTasksInView(String),
    ConfirmDeleteTask(String),
    PromptTaskTitle,
    PromptTaskDescription,
    PromptTaskDue,

    // === REORDER MESSAGES ===
    ReorderFailed(String),

    // === TAG MESSAGES ===
    TagCreated(String),
    TagUpdated(String),
    TagDeleted(String),
    TagNotFound(String),
    NoTagsFound,
    TagListHeader,
    EditingTag(String),
    ConfirmDeleteTag(String),
    ConfirmDeleteTagWithTasks(String, usize),
    PromptTagName,
    PromptTagColor,
    SelectTagAction,
    SelectTagToEdit,
    SelectTagToDelete,
    TagMoved(String, usize), // name, new position

    // === CATEGORY MESSAGES ===
    CategoryCreated(String),
    CategoryUpdated(String),
    CategoryDeleted(String),
    CategoryNotFound(String),
    NoCategoriesFound,
    CategoryListHeader,
    CategoryMoved(String, usize),
    ConfirmDeleteCategory(String, usize), // name, task count

    // === AUTH MESSAGES ===
    SignedUp(String),
    SignedIn(String),
    SignedOut,
    NotSignedIn,
    SignedInAs(String),
    LoginRequired(String), // requested path
    PromptEmail,
    PromptPassword,
    PromptPasswordConfirm,
    PasswordsDoNotMatch,

    // === ROUTING MESSAGES ===
    RedirectingTo(String),

    // === CALENDAR MESSAGES ===
    CalendarHeader(String, String), // from, to
    InvalidDate(String),

    // === SETTINGS MESSAGES ===
    ConfigSaved,
    SettingsHeader,
    RecentPagesHeader,
    NoRecentPages,
    PromptTheme,
    PromptLanguage,
    PromptFontSize,
    PromptAccessibility,
    UnsupportedLanguage(String),

    // === LOADING MESSAGES ===
    FailedToLoadData,
    PromptTryAgain,
    SomethingWentWrong,

    // === EXPORT MESSAGES ===
    ExportCompleted(String),
    ExportNoData,

    // === CAPTURE MESSAGES ===
    CaptureHint,
    CaptureCancelled,

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),        // count
    RunningMigration(u32, String), // version, name
    MigrationCompleted(u32),       // version
    MigrationFailed(u32, String),  // version, error
    AllMigrationsCompleted,
    DatabaseVersion(u32, u32), // current, latest
    DatabaseNeedsUpdate,
    DatabaseUpToDate,
    MigrationHistory,

    // === GENERAL MESSAGES ===
    OperationCancelled,
}
