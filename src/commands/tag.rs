use super::view;
use crate::{
    db::tags::{Tag, Tags},
    libs::{
        context::AppContext,
        messages::Message,
        reorder::move_to_position,
        tag::{validate_name, NameForm, NameKind},
        view::View,
    },
    msg_error, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

#[derive(Debug, Args)]
pub struct TagArgs {
    #[command(subcommand)]
    command: Option<TagCommand>,
}

#[derive(Debug, Subcommand)]
enum TagCommand {
    /// Create a new tag
    Create {
        name: String,
        #[arg(short, long)]
        color: Option<String>,
    },
    /// List all tags
    List,
    /// Rename or recolor a tag
    Edit {
        /// Tag name or ID
        tag: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Delete a tag; tasks keep existing without it
    Delete {
        tag: String,
        #[arg(short, long)]
        yes: bool,
    },
    /// Show the tasks carrying a tag
    Tasks { tag: String },
    /// Move a tag to a 1-based position
    Move { tag: String, position: usize },
}

pub fn cmd(ctx: &mut AppContext, args: TagArgs) -> Result<()> {
    match args.command {
        Some(TagCommand::Create { name, color }) => handle_create(ctx, &name, color),
        Some(TagCommand::List) => handle_list(ctx),
        Some(TagCommand::Edit { tag, name, color }) => handle_edit(ctx, &tag, name, color),
        Some(TagCommand::Delete { tag, yes }) => handle_delete(ctx, &tag, yes),
        Some(TagCommand::Tasks { tag }) => handle_show_tasks(ctx, &tag),
        Some(TagCommand::Move { tag, position }) => handle_move(ctx, &tag, position),
        None => handle_interactive(ctx),
    }
}

fn handle_create(ctx: &AppContext, name: &str, color: Option<String>) -> Result<()> {
    let user = ctx.require_user()?;
    let tags_db = Tags::new(&ctx.db.conn, user.id);
    let existing = tags_db.list()?.into_iter().map(|t| t.name).collect();

    let mut form = NameForm::new(NameKind::Tag, existing);
    let created = form.submit(name, |valid| tags_db.create(&Tag::new(valid.to_string(), color)))?;

    match (created, form.error()) {
        (Some(_), _) => msg_success!(Message::TagCreated(name.trim().to_string())),
        (None, Some(error)) => msg_error!(error),
        (None, None) => {}
    }
    Ok(())
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    let user = ctx.require_user()?;
    let tags_db = Tags::new(&ctx.db.conn, user.id);
    let tags = tags_db.list()?;

    if tags.is_empty() {
        msg_info!(Message::NoTagsFound);
        return Ok(());
    }

    let mut with_counts = Vec::with_capacity(tags.len());
    for tag in tags {
        let count = tags_db.get_tasks_with_tag(tag.id.unwrap_or_default())?.len();
        with_counts.push((tag, count));
    }

    msg_print!(Message::TagListHeader, true);
    View::tags(&with_counts, &ctx.view_options()).print();
    Ok(())
}

fn find_tag(tags_db: &Tags, identifier: &str) -> Result<Option<Tag>> {
    let tag = tags_db.find(identifier)?;
    if tag.is_none() {
        msg_error!(Message::TagNotFound(identifier.to_string()));
    }
    Ok(tag)
}

fn handle_edit(ctx: &AppContext, identifier: &str, name: Option<String>, color: Option<String>) -> Result<()> {
    let user = ctx.require_user()?;
    let tags_db = Tags::new(&ctx.db.conn, user.id);
    let Some(tag) = find_tag(&tags_db, identifier)? else {
        return Ok(());
    };

    let (new_name, new_color) = if name.is_none() && color.is_none() {
        msg_print!(Message::EditingTag(tag.name.clone()), true);
        let name: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptTagName.to_string())
            .default(tag.name.clone())
            .interact_text()?;
        let color: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptTagColor.to_string())
            .default(tag.color.clone().unwrap_or_default())
            .allow_empty(true)
            .interact_text()?;
        (name, if color.is_empty() { None } else { Some(color) })
    } else {
        (name.unwrap_or_else(|| tag.name.clone()), color.or(tag.color.clone()))
    };

    let others: Vec<Tag> = tags_db.list()?.into_iter().filter(|t| t.id != tag.id).collect();
    let new_name = match validate_name(NameKind::Tag, &new_name, others.iter().map(|t| t.name.as_str())) {
        Ok(valid) => valid,
        Err(error) => {
            msg_error!(error);
            return Ok(());
        }
    };

    tags_db.update(tag.id.unwrap_or_default(), &new_name, new_color.as_deref())?;
    msg_success!(Message::TagUpdated(new_name));
    Ok(())
}

fn handle_delete(ctx: &AppContext, identifier: &str, yes: bool) -> Result<()> {
    let user = ctx.require_user()?;
    let tags_db = Tags::new(&ctx.db.conn, user.id);
    let Some(tag) = find_tag(&tags_db, identifier)? else {
        return Ok(());
    };
    let tag_id = tag.id.unwrap_or_default();

    let task_count = tags_db.get_tasks_with_tag(tag_id)?.len();
    let prompt = if task_count > 0 {
        Message::ConfirmDeleteTagWithTasks(tag.name.clone(), task_count)
    } else {
        Message::ConfirmDeleteTag(tag.name.clone())
    };

    let confirmed = yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt.to_string())
            .default(false)
            .interact()?;

    if confirmed {
        tags_db.delete(tag_id)?;
        msg_success!(Message::TagDeleted(tag.name));
    } else {
        msg_info!(Message::OperationCancelled);
    }
    Ok(())
}

fn handle_show_tasks(ctx: &mut AppContext, identifier: &str) -> Result<()> {
    let user = ctx.require_user()?;
    let tag = Tags::new(&ctx.db.conn, user.id).find(identifier)?;
    match tag {
        Some(tag) => view::open(ctx, &format!("/tags/{}", tag.slug())),
        None => {
            msg_error!(Message::TagNotFound(identifier.to_string()));
            Ok(())
        }
    }
}

fn handle_move(ctx: &AppContext, identifier: &str, position: usize) -> Result<()> {
    let user = ctx.require_user()?;
    let tags_db = Tags::new(&ctx.db.conn, user.id);
    let Some(tag) = find_tag(&tags_db, identifier)? else {
        return Ok(());
    };

    let reordered = move_to_position(&tags_db.list()?, tag.id.unwrap_or_default(), position.max(1) - 1)?;
    tags_db.update_orders(&reordered)?;

    let index = reordered.iter().position(|t| t.id == tag.id).unwrap_or_default();
    msg_success!(Message::TagMoved(tag.name, index + 1));
    Ok(())
}

fn select_tag(ctx: &AppContext, prompt: Message) -> Result<Option<String>> {
    let user = ctx.require_user()?;
    let tags = Tags::new(&ctx.db.conn, user.id).list()?;
    if tags.is_empty() {
        msg_info!(Message::NoTagsFound);
        return Ok(None);
    }

    let tag_names: Vec<String> = tags.into_iter().map(|t| t.name).collect();
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt.to_string())
        .items(&tag_names)
        .interact()?;
    Ok(Some(tag_names[selection].clone()))
}

fn handle_interactive(ctx: &mut AppContext) -> Result<()> {
    let options = vec!["Create tag", "List tags", "Edit tag", "Delete tag"];
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::SelectTagAction.to_string())
        .items(&options)
        .interact()?;

    match selection {
        0 => {
            let name: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptTagName.to_string())
                .allow_empty(true)
                .interact_text()?;
            let color: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptTagColor.to_string())
                .allow_empty(true)
                .interact_text()?;
            handle_create(ctx, &name, if color.is_empty() { None } else { Some(color) })
        }
        1 => handle_list(ctx),
        2 => match select_tag(ctx, Message::SelectTagToEdit)? {
            Some(name) => handle_edit(ctx, &name, None, None),
            None => Ok(()),
        },
        3 => match select_tag(ctx, Message::SelectTagToDelete)? {
            Some(name) => handle_delete(ctx, &name, false),
            None => Ok(()),
        },
        _ => Ok(()),
    }
}
