use crate::{
    db::{
        categories::{Categories, Category},
        tags::Tags,
        tasks::Tasks,
    },
    libs::{
        context::AppContext,
        formatter::format_due,
        messages::Message,
        reorder::{DragEvent, DragOutcome, DragSession},
        task::{Priority, Task, TaskFilter},
        time_parser::parse_date_input,
    },
    msg_bail_anyhow, msg_error, msg_error_anyhow, msg_info, msg_success,
};
use anyhow::Result;
use chrono::NaiveDateTime;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use rusqlite::Connection;
use std::cell::RefCell;

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Title; a date phrase inside it becomes the due date
    #[arg(required = true, num_args = 1..)]
    title: Vec<String>,
    #[arg(short, long)]
    description: Option<String>,
    /// Explicit due date, overrides anything found in the title
    #[arg(long)]
    due: Option<String>,
    /// Tag name, created when missing; repeatable
    #[arg(short, long = "tag")]
    tags: Vec<String>,
    /// Category name, created when missing
    #[arg(short, long)]
    category: Option<String>,
    #[arg(short, long, value_enum, default_value = "none")]
    priority: Priority,
    /// Keep the title as typed and skip date detection
    #[arg(long)]
    raw: bool,
}

#[derive(Debug, Args)]
pub struct IdArgs {
    id: i32,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    id: i32,
    #[arg(short, long)]
    title: Option<String>,
    #[arg(short, long)]
    description: Option<String>,
    #[arg(long, conflicts_with = "clear_due")]
    due: Option<String>,
    #[arg(long)]
    clear_due: bool,
    /// Replaces the task's tags; repeatable
    #[arg(long = "tag")]
    tags: Option<Vec<String>>,
    #[arg(short, long, conflicts_with = "no_category")]
    category: Option<String>,
    #[arg(long)]
    no_category: bool,
    #[arg(short, long, value_enum)]
    priority: Option<Priority>,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    id: i32,
    /// Skip confirmation
    #[arg(short, long)]
    yes: bool,
}

#[derive(Debug, Args)]
#[command(group = clap::ArgGroup::new("target").required(true).args(["position", "onto"]))]
pub struct MoveArgs {
    id: i32,
    /// 1-based position in the full list
    position: Option<usize>,
    /// Drop the task onto another task, taking its place
    #[arg(long)]
    onto: Option<i32>,
}

pub fn add_cmd(ctx: &AppContext, args: AddArgs) -> Result<()> {
    let user = ctx.require_user()?;
    let now = ctx.now();
    let text = args.title.join(" ");

    let mut task = if args.raw {
        Task::new(text.trim(), "", None)
    } else {
        Task::from_input(&text, now)
    };
    if task.title.trim().is_empty() {
        msg_bail_anyhow!(Message::TaskTitleEmpty);
    }
    if let Some(due) = args.due.as_deref() {
        task.due_date = Some(parse_due(due, now)?);
    }
    task.description = args.description.unwrap_or_default();
    task.priority = args.priority;

    let conn = &ctx.db.conn;
    task.tags = Tags::new(conn, user.id).get_or_create_tags(&args.tags)?;
    task.category_id = match args.category.as_deref() {
        Some(name) => Some(find_or_create_category(conn, user.id, name)?),
        None => None,
    };

    Tasks::new(conn, user.id).insert(&task)?;

    match task.due_date {
        Some(due) => msg_success!(Message::TaskCreatedWithDue(task.title, format_due(&due, &now))),
        None => msg_success!(Message::TaskCreated(task.title)),
    }
    Ok(())
}

pub fn done_cmd(ctx: &AppContext, args: IdArgs, completed: bool) -> Result<()> {
    let user = ctx.require_user()?;
    let tasks = Tasks::new(&ctx.db.conn, user.id);
    let task = get_task(&tasks, args.id)?;

    tasks.set_completed(args.id, completed)?;
    if completed {
        msg_success!(Message::TaskCompleted(task.title));
    } else {
        msg_success!(Message::TaskReopened(task.title));
    }
    Ok(())
}

pub fn edit_cmd(ctx: &AppContext, args: EditArgs) -> Result<()> {
    let user = ctx.require_user()?;
    let now = ctx.now();
    let conn = &ctx.db.conn;
    let tasks = Tasks::new(conn, user.id);
    let mut task = get_task(&tasks, args.id)?;

    let interactive = args.title.is_none()
        && args.description.is_none()
        && args.due.is_none()
        && !args.clear_due
        && args.tags.is_none()
        && args.category.is_none()
        && !args.no_category
        && args.priority.is_none();

    if interactive {
        edit_interactive(&mut task, now)?;
    } else {
        if let Some(title) = args.title {
            task.title = title.trim().to_string();
        }
        if let Some(description) = args.description {
            task.description = description;
        }
        if let Some(due) = args.due.as_deref() {
            task.due_date = Some(parse_due(due, now)?);
        }
        if args.clear_due {
            task.due_date = None;
        }
        if let Some(names) = args.tags {
            task.tags = Tags::new(conn, user.id).get_or_create_tags(&names)?;
        }
        if let Some(name) = args.category.as_deref() {
            task.category_id = Some(find_or_create_category(conn, user.id, name)?);
        }
        if args.no_category {
            task.category_id = None;
        }
        if let Some(priority) = args.priority {
            task.priority = priority;
        }
    }

    if task.title.is_empty() {
        msg_bail_anyhow!(Message::TaskTitleEmpty);
    }

    tasks.update(&task)?;
    msg_success!(Message::TaskUpdated(task.title));
    Ok(())
}

fn edit_interactive(task: &mut Task, now: NaiveDateTime) -> Result<()> {
    let theme = ColorfulTheme::default();

    task.title = Input::with_theme(&theme)
        .with_prompt(Message::PromptTaskTitle.to_string())
        .default(task.title.clone())
        .interact_text()?;

    task.description = Input::with_theme(&theme)
        .with_prompt(Message::PromptTaskDescription.to_string())
        .default(task.description.clone())
        .allow_empty(true)
        .interact_text()?;

    let due: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptTaskDue.to_string())
        .default(task.due_date.map(|d| d.format("%Y-%m-%d %H:%M").to_string()).unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;
    task.due_date = match due.trim() {
        "" => None,
        value => Some(parse_due(value, now)?),
    };

    Ok(())
}

pub fn delete_cmd(ctx: &AppContext, args: DeleteArgs) -> Result<()> {
    let user = ctx.require_user()?;
    let tasks = Tasks::new(&ctx.db.conn, user.id);
    let task = get_task(&tasks, args.id)?;

    let confirmed = args.yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteTask(task.title.clone()).to_string())
            .default(false)
            .interact()?;

    if confirmed {
        tasks.delete(args.id)?;
        msg_success!(Message::TaskDeleted(task.title));
    } else {
        msg_info!(Message::OperationCancelled);
    }
    Ok(())
}

pub fn move_cmd(ctx: &AppContext, args: MoveArgs) -> Result<()> {
    let user = ctx.require_user()?;
    let tasks_db = Tasks::new(&ctx.db.conn, user.id);
    let tasks = tasks_db.fetch(TaskFilter::All)?;
    let task = get_task(&tasks_db, args.id)?;

    let target = match (args.onto, args.position) {
        (Some(onto), _) => onto,
        (None, Some(position)) => {
            let index = position.clamp(1, tasks.len().max(1)) - 1;
            tasks
                .get(index)
                .and_then(|t| t.id)
                .ok_or_else(|| msg_error_anyhow!(Message::TaskNotFound(args.id)))?
        }
        (None, None) => return Ok(()),
    };

    match drag_and_drop(&tasks_db, tasks, args.id, target) {
        Ok(Some(position)) => msg_success!(Message::TaskMoved(task.title, position + 1)),
        Ok(None) => msg_info!(Message::OperationCancelled),
        Err(e) => {
            msg_error!(Message::ReorderFailed(e.to_string()));
            return Err(e);
        }
    }
    Ok(())
}

/// Plays a full drag gesture over `tasks` and persists the result.
///
/// Returns the new index of the dragged task, or `None` when it was
/// dropped onto itself.
pub fn drag_and_drop(tasks_db: &Tasks, tasks: Vec<Task>, dragged: i32, target: i32) -> Result<Option<usize>> {
    let persisted: RefCell<Result<()>> = RefCell::new(Ok(()));
    let outcome = {
        let mut session = DragSession::new(tasks, |reordered: &[Task]| {
            *persisted.borrow_mut() = tasks_db.update_orders(reordered);
        });
        session.handle(DragEvent::Start(dragged))?;
        session.handle(DragEvent::Move)?;
        session.handle(DragEvent::Over(target))?;
        // No new drag may start until the new order is saved
        session.set_loading(true);
        let outcome = session.handle(DragEvent::Up)?;
        if persisted.borrow().is_ok() {
            session.set_loading(false);
        }
        outcome
    };
    persisted.into_inner()?;

    match outcome {
        DragOutcome::Dropped(reordered) => Ok(reordered.iter().position(|t| t.id == Some(dragged))),
        _ => Ok(None),
    }
}

fn get_task(tasks: &Tasks, id: i32) -> Result<Task> {
    tasks
        .get_by_id(id)?
        .ok_or_else(|| msg_error_anyhow!(Message::TaskNotFound(id)))
}

fn parse_due(input: &str, now: NaiveDateTime) -> Result<NaiveDateTime> {
    parse_date_input(input, now).ok_or_else(|| msg_error_anyhow!(Message::InvalidDate(input.to_string())))
}

fn find_or_create_category(conn: &Connection, user_id: i32, name: &str) -> Result<i32> {
    let categories = Categories::new(conn, user_id);
    match categories.get_by_name(name.trim())? {
        Some(Category { id: Some(id), .. }) => Ok(id),
        _ => categories.create(&Category::new(name.trim().to_string(), None)),
    }
}
