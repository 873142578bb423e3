//! User preferences persisted as `config.json` in the data directory.
//!
//! A missing file means defaults. The interactive [`Config::init`] wizard
//! walks through every setting with `dialoguer` prompts, pre-filled with the
//! current values.
//!
//! ```rust,no_run
//! use tasknest::libs::config::Config;
//!
//! let mut config = Config::read()?;
//! config.push_recent_page("/today");
//! config.save()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use super::i18n::Language;
use crate::libs::messages::Message;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, MultiSelect, Select};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, File};
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Upper bound of the recently viewed pages list.
pub const MAX_RECENT_PAGES: usize = 8;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Light, Theme::Dark, Theme::System];
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        };
        write!(f, "{}", s)
    }
}

/// Stored with the preferences; the terminal cannot change its font.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl FontSize {
    pub const ALL: [FontSize; 3] = [FontSize::Small, FontSize::Medium, FontSize::Large];
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FontSize::Small => "small",
            FontSize::Medium => "medium",
            FontSize::Large => "large",
        };
        write!(f, "{}", s)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AccessibilityConfig {
    /// Reverse video instead of color for highlights.
    pub high_contrast: bool,
    pub reduced_motion: bool,
    pub font_size: FontSize,
    pub focus_visible: bool,
    /// Linear text output instead of tables.
    pub screen_reader_only: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub theme: Theme,
    pub accessibility: AccessibilityConfig,
    /// Language code, see [`Language::from_code`].
    pub language: String,
    /// Most recent first.
    pub recent_pages: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            theme: Theme::default(),
            accessibility: AccessibilityConfig::default(),
            language: Language::English.code().to_string(),
            recent_pages: Vec::new(),
        }
    }
}

impl Config {
    pub fn read() -> Result<Config> {
        let path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        Self::read_from(&path)
    }

    pub fn save(&self) -> Result<()> {
        let path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        self.save_to(&path)
    }

    pub fn read_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        serde_json::to_writer_pretty(&file, &self)?;
        Ok(())
    }

    pub fn language(&self) -> Language {
        Language::from_code(&self.language)
    }

    /// Moves `page` to the front, dropping an older entry and anything past
    /// [`MAX_RECENT_PAGES`].
    pub fn push_recent_page(&mut self, page: &str) {
        self.recent_pages.retain(|p| p != page);
        self.recent_pages.insert(0, page.to_string());
        self.recent_pages.truncate(MAX_RECENT_PAGES);
    }

    /// Interactive setup starting from `current`.
    pub fn init(current: &Config) -> Result<Config> {
        let mut config = current.clone();
        let theme = ColorfulTheme::default();

        let themes: Vec<String> = Theme::ALL.iter().map(ToString::to_string).collect();
        let selected = Select::with_theme(&theme)
            .with_prompt(Message::PromptTheme.to_string())
            .items(&themes)
            .default(Theme::ALL.iter().position(|t| *t == config.theme).unwrap_or(0))
            .interact()?;
        config.theme = Theme::ALL[selected];

        let languages: Vec<String> = Language::ALL
            .iter()
            .map(|l| format!("{} ({})", l.native_name(), l.code()))
            .collect();
        let selected = Select::with_theme(&theme)
            .with_prompt(Message::PromptLanguage.to_string())
            .items(&languages)
            .default(Language::ALL.iter().position(|l| *l == config.language()).unwrap_or(0))
            .interact()?;
        config.language = Language::ALL[selected].code().to_string();

        let sizes: Vec<String> = FontSize::ALL.iter().map(ToString::to_string).collect();
        let selected = Select::with_theme(&theme)
            .with_prompt(Message::PromptFontSize.to_string())
            .items(&sizes)
            .default(
                FontSize::ALL
                    .iter()
                    .position(|s| *s == config.accessibility.font_size)
                    .unwrap_or(1),
            )
            .interact()?;
        config.accessibility.font_size = FontSize::ALL[selected];

        let a11y = &config.accessibility;
        let options = [
            ("High contrast", a11y.high_contrast),
            ("Reduced motion", a11y.reduced_motion),
            ("Visible focus", a11y.focus_visible),
            ("Screen reader output", a11y.screen_reader_only),
        ];
        let labels: Vec<&str> = options.iter().map(|(label, _)| *label).collect();
        let defaults: Vec<bool> = options.iter().map(|(_, on)| *on).collect();
        let chosen = MultiSelect::with_theme(&theme)
            .with_prompt(Message::PromptAccessibility.to_string())
            .items(&labels)
            .defaults(&defaults)
            .interact()?;

        config.accessibility.high_contrast = chosen.contains(&0);
        config.accessibility.reduced_motion = chosen.contains(&1);
        config.accessibility.focus_visible = chosen.contains(&2);
        config.accessibility.screen_reader_only = chosen.contains(&3);

        Ok(config)
    }
}
