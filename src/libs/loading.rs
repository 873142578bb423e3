//! Load states, retry prompts and the last-resort panic handler.

use crate::libs::messages::Message;
use crate::msg_error;
use anyhow::Result;
use crossterm::terminal::disable_raw_mode;

/// Attempts after the first failure before giving up.
pub const MAX_RETRY_COUNT: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub enum LoadingState<T> {
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> LoadingState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading)
    }

    pub fn from_result(result: Result<T>, failure: &Message) -> Self {
        match result {
            Ok(value) => LoadingState::Loaded(value),
            Err(e) => {
                tracing::debug!("load failed: {:#}", e);
                LoadingState::Failed(failure.to_string())
            }
        }
    }
}

/// Runs `loader`; on failure shows `failure` and asks `ask_retry` whether to
/// run it again. Returns the last error when the user declines or the
/// retry limit is reached.
pub fn load_with_retry<T, L, R>(failure: &Message, mut loader: L, mut ask_retry: R) -> Result<T>
where
    L: FnMut() -> Result<T>,
    R: FnMut(&str) -> Result<bool>,
{
    let mut attempts = 0;
    loop {
        let text = match LoadingState::from_result(loader(), failure) {
            LoadingState::Loaded(value) => return Ok(value),
            LoadingState::Failed(text) => text,
            LoadingState::Loading => failure.to_string(),
        };

        msg_error!(text);
        if attempts >= MAX_RETRY_COUNT || !ask_retry(&Message::PromptTryAgain.to_string())? {
            anyhow::bail!("{}", text);
        }
        attempts += 1;
    }
}

/// Replaces the default panic output with a short fallback message.
///
/// The terminal is taken out of raw mode first so the message is readable.
pub fn install_error_boundary() {
    std::panic::set_hook(Box::new(|panic_info| {
        let _ = disable_raw_mode();
        tracing::error!("panic: {}", panic_info);
        msg_error!(Message::SomethingWentWrong);
    }));
}
