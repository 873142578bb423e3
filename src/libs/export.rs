//! Task export to CSV or JSON files.
//!
//! ```rust,no_run
//! use tasknest::libs::export::{ExportFormat, Exporter};
//!
//! let exporter = Exporter::new(ExportFormat::Csv, None);
//! exporter.export(&[])?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::formatter::format_optional;
use super::task::Task;
use super::view::Names;
use anyhow::Result;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// One exported task with tag and category names resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportTask {
    pub id: i32,
    pub order: i32,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub due_date: String,
    pub priority: String,
    pub category: String,
    pub tags: String,
    pub created_at: String,
}

impl ExportTask {
    pub fn from_task(task: &Task, names: &Names) -> Self {
        let tags = task
            .tags
            .iter()
            .filter_map(|id| names.tags.get(id).cloned())
            .collect::<Vec<_>>()
            .join(";");

        Self {
            id: task.id.unwrap_or(0),
            order: task.order,
            title: task.title.clone(),
            description: task.description.clone(),
            completed: task.completed,
            due_date: format_optional(task.due_date.as_ref()),
            priority: task.priority.to_string(),
            category: task
                .category_id
                .and_then(|id| names.categories.get(&id).cloned())
                .unwrap_or_default(),
            tags,
            created_at: format_optional(task.created_at.as_ref()),
        }
    }
}

pub struct Exporter {
    format: ExportFormat,
    output_path: PathBuf,
}

impl Exporter {
    /// Without a path the file is named after the current time.
    pub fn new(format: ExportFormat, output_path: Option<PathBuf>) -> Self {
        let output_path = output_path.unwrap_or_else(|| {
            PathBuf::from(format!(
                "tasknest_export_{}.{}",
                Local::now().format("%Y%m%d_%H%M%S"),
                format.extension()
            ))
        });
        Self { format, output_path }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn export(&self, tasks: &[ExportTask]) -> Result<&Path> {
        let file = File::create(&self.output_path)?;
        self.write(file, tasks)?;
        Ok(&self.output_path)
    }

    pub fn write<W: Write>(&self, writer: W, tasks: &[ExportTask]) -> Result<()> {
        match self.format {
            ExportFormat::Csv => {
                let mut wtr = csv::Writer::from_writer(writer);
                for task in tasks {
                    wtr.serialize(task)?;
                }
                // serialize() only writes headers with the first record
                if tasks.is_empty() {
                    wtr.write_record([
                        "id",
                        "order",
                        "title",
                        "description",
                        "completed",
                        "due_date",
                        "priority",
                        "category",
                        "tags",
                        "created_at",
                    ])?;
                }
                wtr.flush()?;
            }
            ExportFormat::Json => {
                serde_json::to_writer_pretty(writer, tasks)?;
            }
        }
        Ok(())
    }
}
