pub mod calendar;
pub mod capture;
pub mod category;
pub mod export;
pub mod login;
pub mod logout;
pub mod migrations;
pub mod settings;
pub mod tag;
pub mod task;
pub mod view;

use crate::libs::context::AppContext;
use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Create an account and sign in")]
    Signup(login::SignupArgs),
    #[command(about = "Sign in")]
    Login(login::LoginArgs),
    #[command(about = "Sign out")]
    Logout,
    #[command(about = "Show the signed-in account")]
    Whoami,
    #[command(about = "Add a task; due dates like 'tomorrow 3pm' are detected in the title")]
    Add(task::AddArgs),
    #[command(about = "Type a task with live due-date highlighting")]
    Capture,
    #[command(about = "Open a page: inbox, today, upcoming, tags, tags/<slug>, completed, settings")]
    View(view::ViewArgs),
    #[command(about = "Mark a task as done")]
    Done(task::IdArgs),
    #[command(about = "Mark a task as not done")]
    Undone(task::IdArgs),
    #[command(about = "Edit a task")]
    Edit(task::EditArgs),
    #[command(about = "Delete a task")]
    Delete(task::DeleteArgs),
    #[command(about = "Move a task to another position")]
    Move(task::MoveArgs),
    #[command(about = "Manage tags")]
    Tag(tag::TagArgs),
    #[command(about = "Manage categories")]
    Category(category::CategoryArgs),
    #[command(about = "Tasks by due day within a date range")]
    Calendar(calendar::CalendarArgs),
    #[command(about = "Show or change preferences")]
    Settings(settings::SettingsArgs),
    #[command(about = "Export tasks to CSV or JSON")]
    Export(export::ExportArgs),
    #[command(about = "Database schema version and history")]
    Migrations(migrations::MigrationsArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();
        let mut ctx = AppContext::open()?;

        match cli.command {
            Commands::Signup(args) => login::signup_cmd(&mut ctx, args),
            Commands::Login(args) => login::cmd(&mut ctx, args),
            Commands::Logout => logout::cmd(&mut ctx),
            Commands::Whoami => login::whoami_cmd(&ctx),
            Commands::Add(args) => task::add_cmd(&ctx, args),
            Commands::Capture => capture::cmd(&ctx),
            Commands::View(args) => view::cmd(&mut ctx, args),
            Commands::Done(args) => task::done_cmd(&ctx, args, true),
            Commands::Undone(args) => task::done_cmd(&ctx, args, false),
            Commands::Edit(args) => task::edit_cmd(&ctx, args),
            Commands::Delete(args) => task::delete_cmd(&ctx, args),
            Commands::Move(args) => task::move_cmd(&ctx, args),
            Commands::Tag(args) => tag::cmd(&mut ctx, args),
            Commands::Category(args) => category::cmd(&ctx, args),
            Commands::Calendar(args) => calendar::cmd(&ctx, args),
            Commands::Settings(args) => settings::cmd(&mut ctx, args),
            Commands::Export(args) => export::cmd(&ctx, args),
            Commands::Migrations(args) => migrations::cmd(&ctx, args),
        }
    }
}
