//! Application pages and the sign-in guard in front of them.

use super::i18n::TextKey;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Inbox,
    Today,
    Upcoming,
    Tags,
    /// `/tags/:tagSlug`
    Tag(String),
    Completed,
    Settings,
}

impl Route {
    /// Parses `/today`, `today`, `/tags/work/`. Returns `None` for `/` and
    /// unknown paths.
    pub fn from_path(path: &str) -> Option<Route> {
        let path = path.trim();
        let path = path.split(['?', '#']).next().unwrap_or("");
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [page] => match page.to_lowercase().as_str() {
                "login" => Some(Route::Login),
                "inbox" => Some(Route::Inbox),
                "today" => Some(Route::Today),
                "upcoming" => Some(Route::Upcoming),
                "tags" => Some(Route::Tags),
                "completed" => Some(Route::Completed),
                "settings" => Some(Route::Settings),
                _ => None,
            },
            [tags, slug] if tags.eq_ignore_ascii_case("tags") => Some(Route::Tag(slug.to_string())),
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Inbox => "/inbox".to_string(),
            Route::Today => "/today".to_string(),
            Route::Upcoming => "/upcoming".to_string(),
            Route::Tags => "/tags".to_string(),
            Route::Tag(slug) => format!("/tags/{}", slug),
            Route::Completed => "/completed".to_string(),
            Route::Settings => "/settings".to_string(),
        }
    }

    pub fn requires_auth(&self) -> bool {
        !matches!(self, Route::Login)
    }

    /// Translated page title; tag pages use the tag name instead.
    pub fn title_key(&self) -> Option<TextKey> {
        match self {
            Route::Login => None,
            Route::Inbox => Some(TextKey::Inbox),
            Route::Today => Some(TextKey::Today),
            Route::Upcoming => Some(TextKey::Upcoming),
            Route::Tags => Some(TextKey::Tags),
            Route::Tag(_) => None,
            Route::Completed => Some(TextKey::Completed),
            Route::Settings => Some(TextKey::Settings),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Render(Route),
    Redirect {
        to: Route,
        /// Page to continue with after a successful login.
        remember: Option<String>,
    },
}

/// Applies the sign-in rules to a known route.
pub fn guard(route: &Route, signed_in: bool) -> Resolution {
    if route.requires_auth() && !signed_in {
        return Resolution::Redirect {
            to: Route::Login,
            remember: Some(route.path()),
        };
    }
    if *route == Route::Login && signed_in {
        return Resolution::Redirect {
            to: Route::Inbox,
            remember: None,
        };
    }
    Resolution::Render(route.clone())
}

/// Resolves any path; `/` and unknown paths go to the inbox.
pub fn resolve(path: &str, signed_in: bool) -> Resolution {
    match Route::from_path(path) {
        Some(route) => guard(&route, signed_in),
        None => match guard(&Route::Inbox, signed_in) {
            Resolution::Render(route) => Resolution::Redirect {
                to: route,
                remember: None,
            },
            redirect => redirect,
        },
    }
}
