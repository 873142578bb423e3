use super::{login, settings};
use crate::{
    db::{
        categories::Categories,
        tags::Tags,
        tasks::Tasks,
    },
    libs::{
        context::AppContext,
        i18n::translate,
        loading::load_with_retry,
        messages::Message,
        route::Route,
        task::{Task, TaskFilter},
        view::{Names, View},
    },
    msg_error_anyhow, msg_info, msg_print,
};
use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};
use rusqlite::Connection;

#[derive(Debug, Args)]
pub struct ViewArgs {
    /// Page path such as /today or tags/work
    #[arg(default_value = "/inbox")]
    page: String,
}

pub fn cmd(ctx: &mut AppContext, args: ViewArgs) -> Result<()> {
    open(ctx, &args.page)
}

/// Navigates to `path` through the guard and renders the result.
pub fn open(ctx: &mut AppContext, path: &str) -> Result<()> {
    let route = ctx.navigate(path)?;
    render(ctx, &route)
}

pub fn render(ctx: &mut AppContext, route: &Route) -> Result<()> {
    match route {
        Route::Login => login::cmd(ctx, login::LoginArgs::default()),
        Route::Settings => settings::show(ctx),
        Route::Tags => render_tags(ctx),
        _ => render_tasks(ctx, route),
    }
}

/// Tasks shown on `route`, in display order. `None` for pages that are not
/// task lists.
pub fn page_tasks(conn: &Connection, user_id: i32, route: &Route, today: NaiveDate) -> Result<Option<Vec<Task>>> {
    let tasks = Tasks::new(conn, user_id);
    let filter = match route {
        Route::Inbox => TaskFilter::Inbox,
        Route::Today => TaskFilter::Today(today),
        Route::Upcoming => TaskFilter::Upcoming(today),
        Route::Completed => TaskFilter::Completed,
        Route::Tag(slug) => {
            let tag = Tags::new(conn, user_id)
                .get_by_slug(slug)?
                .ok_or_else(|| msg_error_anyhow!(Message::TagNotFound(slug.clone())))?;
            TaskFilter::ByTag(tag.id.unwrap_or_default())
        }
        Route::Login | Route::Tags | Route::Settings => return Ok(None),
    };
    Ok(Some(tasks.fetch(filter)?))
}

fn page_title(ctx: &AppContext, route: &Route, user_id: i32) -> Result<String> {
    if let Some(key) = route.title_key() {
        return Ok(translate(ctx.config.language(), key).to_string());
    }
    if let Route::Tag(slug) = route {
        let name = Tags::new(&ctx.db.conn, user_id)
            .get_by_slug(slug)?
            .map(|tag| tag.name)
            .unwrap_or_else(|| slug.clone());
        return Ok(format!("#{}", name));
    }
    Ok(route.path())
}

fn ask_retry(prompt: &str) -> Result<bool> {
    Ok(Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(true)
        .interact()?)
}

fn render_tasks(ctx: &AppContext, route: &Route) -> Result<()> {
    let user = ctx.require_user()?;
    let now = ctx.now();
    let conn = &ctx.db.conn;

    if let Route::Tag(slug) = route {
        if Tags::new(conn, user.id).get_by_slug(slug)?.is_none() {
            msg_info!(Message::TagNotFound(slug.clone()));
            return Ok(());
        }
    }

    let tasks = load_with_retry(
        &Message::FailedToLoadData,
        || page_tasks(conn, user.id, route, now.date()),
        ask_retry,
    )?
    .unwrap_or_default();

    let title = page_title(ctx, route, user.id)?;
    msg_print!(title, true);

    if tasks.is_empty() {
        msg_info!(Message::NoTasksInView(route.path()));
        return Ok(());
    }

    let names = Names::new(
        &Tags::new(conn, user.id).list()?,
        &Categories::new(conn, user.id).list()?,
    );
    View::tasks(&tasks, &names, now, &ctx.view_options()).print();
    Ok(())
}

fn render_tags(ctx: &AppContext) -> Result<()> {
    let user = ctx.require_user()?;
    let tags_db = Tags::new(&ctx.db.conn, user.id);

    let tags = load_with_retry(&Message::FailedToLoadData, || tags_db.list(), ask_retry)?;
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
