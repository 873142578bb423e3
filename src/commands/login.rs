use super::view;
use crate::{
    db::users::User,
    libs::{context::AppContext, messages::Message, route::Route},
    msg_error, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Input, Password};

#[derive(Debug, Default, Args)]
pub struct LoginArgs {
    #[arg(short, long)]
    email: Option<String>,
    /// Prompted for when omitted
    #[arg(short, long)]
    password: Option<String>,
}

impl LoginArgs {
    pub fn new(email: Option<String>, password: Option<String>) -> Self {
        Self { email, password }
    }
}

#[derive(Debug, Args)]
pub struct SignupArgs {
    #[arg(short, long)]
    email: Option<String>,
    #[arg(short, long)]
    name: Option<String>,
}

/// Signs in and continues to the page that required it, or the inbox.
pub fn cmd(ctx: &mut AppContext, args: LoginArgs) -> Result<()> {
    let route = ctx.navigate(&Route::Login.path())?;
    if route != Route::Login {
        return view::render(ctx, &route);
    }

    let user = sign_in(ctx, args)?;
    msg_success!(Message::SignedIn(user.email));

    let next = ctx.sessions().take_redirect()?.unwrap_or_else(|| Route::Inbox.path());
    view::open(ctx, &next)
}

fn sign_in(ctx: &AppContext, args: LoginArgs) -> Result<User> {
    let email = match args.email {
        Some(email) => email,
        None => Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptEmail.to_string())
            .interact_text()?,
    };
    let password = match args.password {
        Some(password) => password,
        None => Password::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptPassword.to_string())
            .interact()?,
    };

    ctx.auth().sign_in(&email, &password)
}

pub fn signup_cmd(ctx: &mut AppContext, args: SignupArgs) -> Result<()> {
    let theme = ColorfulTheme::default();
    let email = match args.email {
        Some(email) => email,
        None => Input::with_theme(&theme)
            .with_prompt(Message::PromptEmail.to_string())
            .interact_text()?,
    };
    let password = Password::with_theme(&theme)
        .with_prompt(Message::PromptPassword.to_string())
        .with_confirmation(
            Message::PromptPasswordConfirm.to_string(),
            Message::PasswordsDoNotMatch.to_string(),
        )
        .interact()?;

    match ctx.auth().sign_up(&email, &password, args.name.as_deref()) {
        Ok(user) => {
            msg_success!(Message::SignedUp(user.email));
            view::open(ctx, &Route::Inbox.path())
        }
        Err(e) => {
            msg_error!(e);
            Ok(())
        }
    }
}

pub fn whoami_cmd(ctx: &AppContext) -> Result<()> {
    match ctx.current_user()? {
        Some(user) => {
            msg_print!(Message::SignedInAs(user.email.clone()));
            if let Some(name) = user.display_name {
                msg_print!(name);
            }
        }
        None => msg_info!(Message::NotSignedIn),
    }
    Ok(())
}
