use crate::{
    libs::{
        config::{Config, FontSize, Theme},
        context::AppContext,
        i18n::Language,
        messages::Message,
        view::View,
    },
    msg_error_anyhow, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct SettingsArgs {
    /// Walk through every preference interactively
    #[arg(long)]
    init: bool,
    #[arg(long, value_enum)]
    theme: Option<Theme>,
    /// Language code: en, es, fr or de
    #[arg(long)]
    language: Option<String>,
    #[arg(long, value_enum)]
    font_size: Option<FontSize>,
    #[arg(long)]
    high_contrast: Option<bool>,
    #[arg(long)]
    reduced_motion: Option<bool>,
    #[arg(long)]
    focus_visible: Option<bool>,
    /// Print pages as plain sentences instead of tables
    #[arg(long)]
    screen_reader: Option<bool>,
}

impl SettingsArgs {
    fn has_changes(&self) -> bool {
        self.theme.is_some()
            || self.language.is_some()
            || self.font_size.is_some()
            || self.high_contrast.is_some()
            || self.reduced_motion.is_some()
            || self.focus_visible.is_some()
            || self.screen_reader.is_some()
    }
}

pub fn cmd(ctx: &mut AppContext, args: SettingsArgs) -> Result<()> {
    if args.init {
        ctx.config = Config::init(&ctx.config)?;
        ctx.save_config()?;
        msg_success!(Message::ConfigSaved);
        return Ok(());
    }

    if !args.has_changes() {
        return show(ctx);
    }

    apply(&mut ctx.config, args)?;
    ctx.save_config()?;
    msg_success!(Message::ConfigSaved);
    Ok(())
}

/// Applies the given flags; an unsupported language leaves `config` untouched.
pub fn apply(config: &mut Config, args: SettingsArgs) -> Result<()> {
    let language = match args.language.as_deref() {
        Some(code) => Some(
            code.parse::<Language>()
                .map_err(|_| msg_error_anyhow!(Message::UnsupportedLanguage(code.to_string())))?,
        ),
        None => None,
    };

    if let Some(language) = language {
        config.language = language.code().to_string();
    }
    if let Some(theme) = args.theme {
        config.theme = theme;
    }
    let a11y = &mut config.accessibility;
    if let Some(size) = args.font_size {
        a11y.font_size = size;
    }
    if let Some(on) = args.high_contrast {
        a11y.high_contrast = on;
    }
    if let Some(on) = args.reduced_motion {
        a11y.reduced_motion = on;
    }
    if let Some(on) = args.focus_visible {
        a11y.focus_visible = on;
    }
    if let Some(on) = args.screen_reader {
        a11y.screen_reader_only = on;
    }
    Ok(())
}

pub fn show(ctx: &AppContext) -> Result<()> {
    msg_print!(Message::SettingsHeader, true);
    View::settings(&ctx.config).print();

    msg_print!(Message::RecentPagesHeader, true);
    if ctx.config.recent_pages.is_empty() {
        msg_info!(Message::NoRecentPages);
    } else {
        for page in &ctx.config.recent_pages {
            println!("  {}", page);
        }
    }
    Ok(())
}
