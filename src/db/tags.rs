//! Tags owned by a user and the `task_tags` junction.
//!
//! Names are unique per user regardless of case. Deleting a tag removes its
//! junction rows through `ON DELETE CASCADE`, leaving the tasks themselves.

use crate::libs::messages::Message;
use crate::libs::tag::{same_name, slugify};
use crate::msg_error_anyhow;
use anyhow::Result;
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

const INSERT_TAG: &str = "INSERT INTO tags (user_id, name, color, position) VALUES (?1, ?2, ?3, ?4)";
const UPDATE_TAG: &str = "UPDATE tags SET name = ?3, color = ?4 WHERE id = ?1 AND user_id = ?2";
const UPDATE_TAG_POSITION: &str = "UPDATE tags SET position = ?3 WHERE id = ?1 AND user_id = ?2";
const DELETE_TAG: &str = "DELETE FROM tags WHERE id = ?1 AND user_id = ?2";
const SELECT_TAGS: &str = "SELECT id, user_id, name, color, position, created_at FROM tags WHERE user_id = ?1";
const NEXT_POSITION: &str = "SELECT COALESCE(MAX(position), -1) + 1 FROM tags WHERE user_id = ?1";
const SELECT_TAGS_BY_TASK: &str = "
    SELECT t.id, t.user_id, t.name, t.color, t.position, t.created_at FROM tags t
    JOIN task_tags tt ON t.id = tt.tag_id
    WHERE tt.task_id = ?1 AND t.user_id = ?2
    ORDER BY t.position, t.name
";
const SELECT_TASKS_BY_TAG: &str = "SELECT task_id FROM task_tags WHERE tag_id = ?1";

/// Colors handed out to tags and categories created without one.
pub const DEFAULT_COLORS: &[&str] = &["blue", "green", "yellow", "red", "purple", "cyan", "orange"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: Option<i32>,
    pub user_id: i32,
    pub name: String,
    pub color: Option<String>,
    pub order: i32,
    pub created_at: Option<NaiveDateTime>,
}

impl Tag {
    pub fn new(name: String, color: Option<String>) -> Self {
        Self {
            id: None,
            user_id: 0,
            name,
            color,
            order: 0,
            created_at: None,
        }
    }

    pub fn slug(&self) -> String {
        slugify(&self.name)
    }
}

/// Tag repository bound to one user.
pub struct Tags<'a> {
    conn: &'a Connection,
    user_id: i32,
}

impl<'a> Tags<'a> {
    pub fn new(conn: &'a Connection, user_id: i32) -> Self {
        Self { conn, user_id }
    }

    /// Create a new tag at the end of the list
    pub fn create(&self, tag: &Tag) -> Result<i32> {
        let position: i32 = self.conn.query_row(NEXT_POSITION, params![self.user_id], |row| row.get(0))?;
        let color = tag.color.clone().unwrap_or_else(|| default_color(position));
        self.conn.execute(INSERT_TAG, params![self.user_id, tag.name, color, position])?;
        Ok(self.conn.last_insert_rowid() as i32)
    }

    /// Update name and color of an existing tag
    pub fn update(&self, id: i32, name: &str, color: Option<&str>) -> Result<()> {
        let affected = self.conn.execute(UPDATE_TAG, params![id, self.user_id, name, color])?;
        if affected == 0 {
            return Err(msg_error_anyhow!(Message::TagNotFound(id.to_string())));
        }
        Ok(())
    }

    /// Delete a tag, detaching it from every task
    pub fn delete(&self, id: i32) -> Result<()> {
        let affected = self.conn.execute(DELETE_TAG, params![id, self.user_id])?;
        if affected == 0 {
            return Err(msg_error_anyhow!(Message::TagNotFound(id.to_string())));
        }
        Ok(())
    }

    /// All tags of the user in display order
    pub fn list(&self) -> Result<Vec<Tag>> {
        let mut stmt = self.conn.prepare(&format!("{} ORDER BY position, name", SELECT_TAGS))?;
        let tags = stmt
            .query_map(params![self.user_id], map_tag)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tags)
    }

    /// Finds a tag by name, ignoring surrounding whitespace and case.
    ///
    /// Case folding follows [`same_name`], so `Étude` finds `étude` just as
    /// `Work` finds `work`.
    pub fn get_by_name(&self, name: &str) -> Result<Option<Tag>> {
        Ok(self.list()?.into_iter().find(|tag| same_name(&tag.name, name)))
    }

    /// Returns `None` for ids owned by another user.
    pub fn get_by_id(&self, id: i32) -> Result<Option<Tag>> {
        self.conn
            .query_row(&format!("{} AND id = ?2", SELECT_TAGS), params![self.user_id, id], map_tag)
            .optional()
            .map_err(Into::into)
    }

    /// Tag whose [`Tag::slug`] equals `slug`, as used by `/tags/:tagSlug`.
    pub fn get_by_slug(&self, slug: &str) -> Result<Option<Tag>> {
        Ok(self.list()?.into_iter().find(|tag| tag.slug() == slug))
    }

    /// Resolves a tag given either its numeric id or its name
    pub fn find(&self, identifier: &str) -> Result<Option<Tag>> {
        match identifier.parse::<i32>() {
            Ok(id) => self.get_by_id(id),
            Err(_) => self.get_by_name(identifier),
        }
    }

    /// Tags attached to a task, in tag display order.
    pub fn get_task_tags(&self, task_id: i32) -> Result<Vec<Tag>> {
        let mut stmt = self.conn.prepare(SELECT_TAGS_BY_TASK)?;
        let tags = stmt
            .query_map(params![task_id, self.user_id], map_tag)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tags)
    }

    /// Ids of the tasks carrying `tag_id`.
    pub fn get_tasks_with_tag(&self, tag_id: i32) -> Result<Vec<i32>> {
        let mut stmt = self.conn.prepare(SELECT_TASKS_BY_TAG)?;
        let ids = stmt
            .query_map(params![tag_id], |row| row.get(0))?
            .collect::<Result<Vec<i32>, _>>()?;
        Ok(ids)
    }

    /// Resolves tag names to ids, creating the missing ones.
    ///
    /// Blank names are skipped and names that resolve to the same tag yield
    /// one id, so the result keeps first-seen order without duplicates.
    pub fn get_or_create_tags(&self, names: &[String]) -> Result<Vec<i32>> {
        let mut tag_ids = Vec::new();

        for name in names {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            let id = match self.get_by_name(name)? {
                Some(Tag { id: Some(id), .. }) => id,
                _ => self.create(&Tag::new(name.to_string(), None))?,
            };
            if !tag_ids.contains(&id) {
                tag_ids.push(id);
            }
        }

        Ok(tag_ids)
    }

    /// Writes every tag's `order` in one transaction.
    pub fn update_orders(&self, tags: &[Tag]) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        for tag in tags {
            if let Some(id) = tag.id {
                tx.execute(UPDATE_TAG_POSITION, params![id, self.user_id, tag.order])?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}

/// Cycles through [`DEFAULT_COLORS`] by list position.
pub fn default_color(position: i32) -> String {
    DEFAULT_COLORS[position.unsigned_abs() as usize % DEFAULT_COLORS.len()].to_string()
}

fn map_tag(row: &Row) -> rusqlite::Result<Tag> {
    Ok(Tag {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        color: row.get(3)?,
        order: row.get(4)?,
        created_at: row.get(5)?,
    })
}
