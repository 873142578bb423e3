//! Terminal rendering of pages.
//!
//! Every view is either a table or, with screen-reader output enabled, plain
//! sentences that read well linearly. Labels follow the configured language.

use super::config::Config;
use super::date_range::DateRange;
use super::formatter::{format_day, format_due};
use super::i18n::{translate, Language, TextKey};
use super::task::Task;
use crate::db::categories::Category;
use crate::db::tags::Tag;
use chrono::{NaiveDate, NaiveDateTime};
use prettytable::{color, row, Attr, Cell, Row, Table};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

#[derive(Debug, Clone, Copy, Default)]
pub struct ViewOptions {
    pub language: Language,
    pub screen_reader: bool,
    pub high_contrast: bool,
}

impl ViewOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            language: config.language(),
            screen_reader: config.accessibility.screen_reader_only,
            high_contrast: config.accessibility.high_contrast,
        }
    }

    fn t(&self, key: TextKey) -> &'static str {
        translate(self.language, key)
    }
}

/// Tag and category names by id.
#[derive(Debug, Clone, Default)]
pub struct Names {
    pub tags: HashMap<i32, String>,
    pub categories: HashMap<i32, String>,
}

impl Names {
    pub fn new(tags: &[Tag], categories: &[Category]) -> Self {
        Self {
            tags: tags.iter().filter_map(|t| Some((t.id?, t.name.clone()))).collect(),
            categories: categories.iter().filter_map(|c| Some((c.id?, c.name.clone()))).collect(),
        }
    }

    fn tag_list(&self, task: &Task) -> String {
        task.tags
            .iter()
            .filter_map(|id| self.tags.get(id).map(String::as_str))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn category(&self, task: &Task) -> String {
        task.category_id
            .and_then(|id| self.categories.get(&id).cloned())
            .unwrap_or_default()
    }
}

pub enum Rendered {
    Table(Table),
    Text(String),
}

impl Rendered {
    /// Prints with terminal styling where the output supports it.
    pub fn print(&self) {
        match self {
            Rendered::Table(table) => {
                table.printstd();
            }
            Rendered::Text(text) => println!("{}", text),
        }
    }
}

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rendered::Table(table) => write!(f, "{}", table),
            Rendered::Text(text) => write!(f, "{}", text),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Done,
    Overdue,
    Open,
}

impl Status {
    fn of(task: &Task, now: NaiveDateTime) -> Self {
        if task.completed {
            Status::Done
        } else if task.is_overdue(now) {
            Status::Overdue
        } else {
            Status::Open
        }
    }

    fn key(self) -> TextKey {
        match self {
            Status::Done => TextKey::Done,
            Status::Overdue => TextKey::Overdue,
            Status::Open => TextKey::Open,
        }
    }
}

pub struct View {}

impl View {
    pub fn tasks(tasks: &[Task], names: &Names, now: NaiveDateTime, options: &ViewOptions) -> Rendered {
        if options.screen_reader {
            return Rendered::Text(Self::linear_tasks(tasks, names, now, options));
        }

        let mut table = Table::new();
        table.set_titles(Row::new(
            [
                TextKey::Id,
                TextKey::Title,
                TextKey::Due,
                TextKey::Tags,
                TextKey::Category,
                TextKey::Priority,
                TextKey::Status,
            ]
            .iter()
            .map(|key| Cell::new(options.t(*key)))
            .collect(),
        ));

        for task in tasks {
            let status = Status::of(task, now);
            table.add_row(Row::new(vec![
                Cell::new(&task.id.unwrap_or(0).to_string()),
                Cell::new(&task.title),
                Cell::new(&task.due_date.map(|due| format_due(&due, &now)).unwrap_or_default()),
                Cell::new(&names.tag_list(task)),
                Cell::new(&names.category(task)),
                Cell::new(&task.priority.to_string()),
                Self::status_cell(status, options),
            ]));
        }

        Rendered::Table(table)
    }

    fn status_cell(status: Status, options: &ViewOptions) -> Cell {
        let cell = Cell::new(options.t(status.key()));
        match (status, options.high_contrast) {
            (Status::Overdue, true) => cell.with_style(Attr::Reverse),
            (Status::Overdue, false) => cell.with_style(Attr::ForegroundColor(color::RED)),
            (Status::Done, false) => cell.with_style(Attr::ForegroundColor(color::GREEN)),
            _ => cell,
        }
    }

    fn linear_tasks(tasks: &[Task], names: &Names, now: NaiveDateTime, options: &ViewOptions) -> String {
        if tasks.is_empty() {
            return format!("{}.", options.t(TextKey::NoTasks));
        }
        let total = tasks.len();
        tasks
            .iter()
            .enumerate()
            .map(|(index, task)| {
                let mut parts = vec![format!("{} {}/{}: {}", options.t(TextKey::Tasks), index + 1, total, task.title)];
                if let Some(due) = task.due_date {
                    parts.push(format!("{}: {}", options.t(TextKey::Due), format_due(&due, &now)));
                }
                let tags = names.tag_list(task);
                if !tags.is_empty() {
                    parts.push(format!("{}: {}", options.t(TextKey::Tags), tags));
                }
                let category = names.category(task);
                if !category.is_empty() {
                    parts.push(format!("{}: {}", options.t(TextKey::Category), category));
                }
                parts.push(format!("{}: {}", options.t(TextKey::Status), options.t(Status::of(task, now).key())));
                format!("{}.", parts.join(". "))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Named, colored entries with how many tasks use them.
    pub fn labels(entries: &[(i32, String, Option<String>, usize)], options: &ViewOptions) -> Rendered {
        if options.screen_reader {
            let text = entries
                .iter()
                .map(|(id, name, color, count)| {
                    format!(
                        "{}: {} ({}). {}: {}. {}: {}.",
                        options.t(TextKey::Name),
                        name,
                        id,
                        options.t(TextKey::Color),
                        color.as_deref().unwrap_or("-"),
                        options.t(TextKey::Tasks),
                        count
                    )
                })
                .collect::<Vec<_>>()
                .join("\n");
            return Rendered::Text(text);
        }

        let mut table = Table::new();
        table.set_titles(row![
            options.t(TextKey::Id),
            options.t(TextKey::Name),
            options.t(TextKey::Color),
            options.t(TextKey::Tasks)
        ]);
        for (id, name, color, count) in entries {
            table.add_row(row![id, name, color.as_deref().unwrap_or(""), count]);
        }
        Rendered::Table(table)
    }

    pub fn tags(tags: &[(Tag, usize)], options: &ViewOptions) -> Rendered {
        let entries: Vec<_> = tags
            .iter()
            .map(|(tag, count)| (tag.id.unwrap_or(0), tag.name.clone(), tag.color.clone(), *count))
            .collect();
        Self::labels(&entries, options)
    }

    pub fn categories(categories: &[(Category, usize)], options: &ViewOptions) -> Rendered {
        let entries: Vec<_> = categories
            .iter()
            .map(|(category, count)| (category.id.unwrap_or(0), category.name.clone(), category.color.clone(), *count))
            .collect();
        Self::labels(&entries, options)
    }

    /// Days of `range` that have tasks, each followed by its tasks.
    pub fn calendar(range: &DateRange, tasks: &[Task], names: &Names, now: NaiveDateTime, options: &ViewOptions) -> Rendered {
        let grouped = group_by_day(tasks, range);
        let mut out = Vec::new();

        for (day, day_tasks) in grouped {
            out.push(format_day(&day));
            for task in day_tasks {
                let time = task.due_date.map(|d| d.format("%H:%M").to_string()).unwrap_or_default();
                let status = Status::of(task, now);
                let tags = names.tag_list(task);
                let mut line = format!("  {} {} [{}]", time, task.title, options.t(status.key()));
                if !tags.is_empty() {
                    line.push_str(&format!(" ({})", tags));
                }
                out.push(line);
            }
        }

        if out.is_empty() {
            out.push(format!("{}.", options.t(TextKey::NoTasks)));
        }
        Rendered::Text(out.join("\n"))
    }

    pub fn settings(config: &Config) -> Rendered {
        let a11y = &config.accessibility;
        let rows = [
            ("theme", config.theme.to_string()),
            ("language", config.language().code().to_string()),
            ("font_size", a11y.font_size.to_string()),
            ("high_contrast", a11y.high_contrast.to_string()),
            ("reduced_motion", a11y.reduced_motion.to_string()),
            ("focus_visible", a11y.focus_visible.to_string()),
            ("screen_reader_only", a11y.screen_reader_only.to_string()),
        ];

        if a11y.screen_reader_only {
            let text = rows
                .iter()
                .map(|(key, value)| format!("{}: {}.", key, value))
                .collect::<Vec<_>>()
                .join("\n");
            return Rendered::Text(text);
        }

        let mut table = Table::new();
        for (key, value) in rows {
            table.add_row(row![key, value]);
        }
        Rendered::Table(table)
    }
}

/// Tasks with a due date inside `range`, by day, each day sorted by due time.
pub fn group_by_day<'a>(tasks: &'a [Task], range: &DateRange) -> BTreeMap<NaiveDate, Vec<&'a Task>> {
    let mut grouped: BTreeMap<NaiveDate, Vec<&Task>> = BTreeMap::new();
    for task in tasks {
        let Some(due) = task.due_date else { continue };
        let day = due.date();
        if day < range.start_date() || day > range.end_date() {
            continue;
        }
        grouped.entry(day).or_default().push(task);
    }
    for day_tasks in grouped.values_mut() {
        day_tasks.sort_by_key(|task| (task.due_date, task.order));
    }
    grouped
}
