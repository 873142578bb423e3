//! Writes the signed-in user's tasks to a CSV or JSON file.
//!
//! Tag and category ids are resolved to names so the file is readable on
//! its own.

use crate::{
    db::{categories::Categories, tags::Tags, tasks::Tasks},
    libs::{
        context::AppContext,
        export::{ExportFormat, ExportTask, Exporter},
        messages::Message,
        task::TaskFilter,
        view::Names,
    },
    msg_info, msg_success,
};
use anyhow::Result;
use clap::{Args, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportScope {
    All,
    Open,
    Completed,
}

impl ExportScope {
    fn filter(self) -> TaskFilter {
        match self {
            ExportScope::All => TaskFilter::All,
            ExportScope::Open => TaskFilter::Inbox,
            ExportScope::Completed => TaskFilter::Completed,
        }
    }
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Which tasks to include
    #[arg(value_enum, default_value = "all")]
    scope: ExportScope,

    #[arg(short, long, value_enum, default_value = "csv")]
    format: ExportFormat,

    /// Output file; defaults to `tasknest_export_<timestamp>.<ext>` in the
    /// current directory
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn cmd(ctx: &AppContext, args: ExportArgs) -> Result<()> {
    let user = ctx.require_user()?;
    let conn = &ctx.db.conn;

    let tasks = Tasks::new(conn, user.id).fetch(args.scope.filter())?;
    if tasks.is_empty() {
        msg_info!(Message::ExportNoData);
    }

    let names = Names::new(&Tags::new(conn, user.id).list()?, &Categories::new(conn, user.id).list()?);
    let rows: Vec<ExportTask> = tasks.iter().map(|task| ExportTask::from_task(task, &names)).collect();

    let exporter = Exporter::new(args.format, args.output);
    let path = exporter.export(&rows)?;
    msg_success!(Message::ExportCompleted(path.display().to_string()));
    Ok(())
}
