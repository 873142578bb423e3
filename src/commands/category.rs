use crate::{
    db::categories::{Categories, Category},
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
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct CategoryArgs {
    #[command(subcommand)]
    command: Option<CategoryCommand>,
}

#[derive(Debug, Subcommand)]
enum CategoryCommand {
    /// Create a new category
    Create {
        name: String,
        #[arg(short, long)]
        color: Option<String>,
    },
    /// List all categories (default)
    List,
    /// Rename or recolor a category
    Edit {
        /// Category name or ID
        category: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Delete a category; its tasks become uncategorized
    Delete {
        category: String,
        #[arg(short, long)]
        yes: bool,
    },
    /// Move a category to a 1-based position
    Move { category: String, position: usize },
}

pub fn cmd(ctx: &AppContext, args: CategoryArgs) -> Result<()> {
    let user = ctx.require_user()?;
    let categories = Categories::new(&ctx.db.conn, user.id);

    match args.command.unwrap_or(CategoryCommand::List) {
        CategoryCommand::Create { name, color } => {
            let existing = categories.list()?.into_iter().map(|c| c.name).collect();
            let mut form = NameForm::new(NameKind::Category, existing);
            let created = form.submit(&name, |valid| categories.create(&Category::new(valid.to_string(), color)))?;
            match (created, form.error()) {
                (Some(_), _) => msg_success!(Message::CategoryCreated(name.trim().to_string())),
                (None, Some(error)) => msg_error!(error),
                (None, None) => {}
            }
        }
        CategoryCommand::List => {
            let list = categories.list()?;
            if list.is_empty() {
                msg_info!(Message::NoCategoriesFound);
                return Ok(());
            }
            let mut with_counts = Vec::with_capacity(list.len());
            for category in list {
                let count = categories.count_tasks(category.id.unwrap_or_default())?;
                with_counts.push((category, count));
            }
            msg_print!(Message::CategoryListHeader, true);
            View::categories(&with_counts, &ctx.view_options()).print();
        }
        CategoryCommand::Edit { category, name, color } => {
            let Some(current) = find_category(&categories, &category)? else {
                return Ok(());
            };
            let others: Vec<Category> = categories.list()?.into_iter().filter(|c| c.id != current.id).collect();
            let name = name.unwrap_or_else(|| current.name.clone());
            let name = match validate_name(NameKind::Category, &name, others.iter().map(|c| c.name.as_str())) {
                Ok(valid) => valid,
                Err(error) => {
                    msg_error!(error);
                    return Ok(());
                }
            };
            let color = color.or(current.color);
            categories.update(current.id.unwrap_or_default(), &name, color.as_deref())?;
            msg_success!(Message::CategoryUpdated(name));
        }
        CategoryCommand::Delete { category, yes } => {
            let Some(current) = find_category(&categories, &category)? else {
                return Ok(());
            };
            let id = current.id.unwrap_or_default();
            let count = categories.count_tasks(id)?;
            let confirmed = yes
                || Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt(Message::ConfirmDeleteCategory(current.name.clone(), count).to_string())
                    .default(false)
                    .interact()?;
            if confirmed {
                categories.delete(id)?;
                msg_success!(Message::CategoryDeleted(current.name));
            } else {
                msg_info!(Message::OperationCancelled);
            }
        }
        CategoryCommand::Move { category, position } => {
            let Some(current) = find_category(&categories, &category)? else {
                return Ok(());
            };
            let reordered = move_to_position(&categories.list()?, current.id.unwrap_or_default(), position.max(1) - 1)?;
            categories.update_orders(&reordered)?;
            let index = reordered.iter().position(|c| c.id == current.id).unwrap_or_default();
            msg_success!(Message::CategoryMoved(current.name, index + 1));
        }
    }
    Ok(())
}

fn find_category(categories: &Categories, identifier: &str) -> Result<Option<Category>> {
    let category = categories.find(identifier)?;
    if category.is_none() {
        msg_error!(Message::CategoryNotFound(identifier.to_string()));
    }
    Ok(category)
}
