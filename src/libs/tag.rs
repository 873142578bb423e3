//! Name rules shared by tags and categories.
//!
//! A new name is trimmed, must not be empty and must not collide
//! (case-insensitively) with an existing one. Rejected names never reach the
//! store: [`NameForm::submit`] only calls its create callback for valid input.

use super::error::NameError;

/// What kind of entity a name belongs to; used in error text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Tag,
    Category,
}

impl NameKind {
    fn label(self) -> &'static str {
        match self {
            NameKind::Tag => "Tag",
            NameKind::Category => "Category",
        }
    }
}

/// Validates `name` against `existing` and returns the trimmed name.
pub fn validate_name<'a, I>(kind: NameKind, name: &str, existing: I) -> Result<String, NameError>
where
    I: IntoIterator<Item = &'a str>,
{
    let name = name.trim();
    if name.is_empty() {
        return Err(NameError::Empty(kind.label()));
    }
    if existing.into_iter().any(|other| same_name(other, name)) {
        return Err(NameError::AlreadyExists(kind.label()));
    }
    Ok(name.to_string())
}

/// Name equality used for tags and categories: trimmed, Unicode
/// case-insensitive.
///
/// SQLite's `NOCASE` only folds ASCII, so lookups by name compare here
/// instead of in SQL.
pub fn same_name(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Input state of a "new tag" / "new category" field.
///
/// Holds the last validation error so the caller can keep showing it next to
/// the field until the next submit.
#[derive(Debug)]
pub struct NameForm {
    kind: NameKind,
    existing: Vec<String>,
    error: Option<NameError>,
}

impl NameForm {
    pub fn new(kind: NameKind, existing: Vec<String>) -> Self {
        Self {
            kind,
            existing,
            error: None,
        }
    }

    pub fn error(&self) -> Option<&NameError> {
        self.error.as_ref()
    }

    /// Validates `name` and, when valid, passes it to `create`.
    ///
    /// Returns `Ok(None)` when the name was rejected; the reason is kept in
    /// [`NameForm::error`]. Errors from `create` are propagated unchanged.
    pub fn submit<T, E, F>(&mut self, name: &str, create: F) -> Result<Option<T>, E>
    where
        F: FnOnce(&str) -> Result<T, E>,
    {
        match validate_name(self.kind, name, self.existing.iter().map(String::as_str)) {
            Ok(valid) => {
                self.error = None;
                let created = create(&valid)?;
                self.existing.push(valid);
                Ok(Some(created))
            }
            Err(error) => {
                self.error = Some(error);
                Ok(None)
            }
        }
    }
}

/// URL-style slug: lowercase alphanumerics with single dashes between words.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}
