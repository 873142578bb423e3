//! Categories owned by a user. A task belongs to at most one.
//!
//! ```rust
//! use tasknest::db::{categories::{Categories, Category}, db::Db, users::Users};
//!
//! let db = Db::in_memory()?;
//! let user = Users::new(&db.conn).insert("ada@example.com", "hash", None)?;
//! let categories = Categories::new(&db.conn, user.id);
//! let id = categories.create(&Category::new("Errands".to_string(), None))?;
//! assert_eq!(categories.find("errands")?.and_then(|c| c.id), Some(id));
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::tags::default_color;
use crate::libs::messages::Message;
use crate::libs::tag::same_name;
use crate::msg_error_anyhow;
use anyhow::Result;
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

const INSERT_CATEGORY: &str = "INSERT INTO categories (user_id, name, color, position) VALUES (?1, ?2, ?3, ?4)";
const UPDATE_CATEGORY: &str = "UPDATE categories SET name = ?3, color = ?4 WHERE id = ?1 AND user_id = ?2";
const UPDATE_CATEGORY_POSITION: &str = "UPDATE categories SET position = ?3 WHERE id = ?1 AND user_id = ?2";
const DELETE_CATEGORY: &str = "DELETE FROM categories WHERE id = ?1 AND user_id = ?2";
const SELECT_CATEGORIES: &str = "SELECT id, user_id, name, color, position, created_at FROM categories WHERE user_id = ?1";
const NEXT_POSITION: &str = "SELECT COALESCE(MAX(position), -1) + 1 FROM categories WHERE user_id = ?1";
const COUNT_TASKS: &str = "SELECT COUNT(*) FROM tasks WHERE category_id = ?1 AND user_id = ?2";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: Option<i32>,
    pub user_id: i32,
    pub name: String,
    pub color: Option<String>,
    pub order: i32,
    pub created_at: Option<NaiveDateTime>,
}

impl Category {
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
}

pub struct Categories<'a> {
    conn: &'a Connection,
    user_id: i32,
}

impl<'a> Categories<'a> {
    pub fn new(conn: &'a Connection, user_id: i32) -> Self {
        Self { conn, user_id }
    }

    /// Appends a category; without a color it gets the next default one.
    pub fn create(&self, category: &Category) -> Result<i32> {
        let position: i32 = self.conn.query_row(NEXT_POSITION, params![self.user_id], |row| row.get(0))?;
        let color = category.color.clone().unwrap_or_else(|| default_color(position));
        self.conn.execute(INSERT_CATEGORY, params![self.user_id, category.name, color, position])?;
        Ok(self.conn.last_insert_rowid() as i32)
    }

    pub fn update(&self, id: i32, name: &str, color: Option<&str>) -> Result<()> {
        let affected = self.conn.execute(UPDATE_CATEGORY, params![id, self.user_id, name, color])?;
        if affected == 0 {
            return Err(msg_error_anyhow!(Message::CategoryNotFound(id.to_string())));
        }
        Ok(())
    }

    /// Removes the category; tasks in it become uncategorized.
    pub fn delete(&self, id: i32) -> Result<()> {
        let affected = self.conn.execute(DELETE_CATEGORY, params![id, self.user_id])?;
        if affected == 0 {
            return Err(msg_error_anyhow!(Message::CategoryNotFound(id.to_string())));
        }
        Ok(())
    }

    /// In display order.
    pub fn list(&self) -> Result<Vec<Category>> {
        let mut stmt = self.conn.prepare(&format!("{} ORDER BY position, name", SELECT_CATEGORIES))?;
        let categories = stmt
            .query_map(params![self.user_id], map_category)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(categories)
    }

    /// Same matching rules as [`crate::db::tags::Tags::get_by_name`].
    pub fn get_by_name(&self, name: &str) -> Result<Option<Category>> {
        Ok(self.list()?.into_iter().find(|category| same_name(&category.name, name)))
    }

    pub fn get_by_id(&self, id: i32) -> Result<Option<Category>> {
        self.conn
            .query_row(&format!("{} AND id = ?2", SELECT_CATEGORIES), params![self.user_id, id], map_category)
            .optional()
            .map_err(Into::into)
    }

    /// Resolves a numeric id or a name.
    pub fn find(&self, identifier: &str) -> Result<Option<Category>> {
        match identifier.parse::<i32>() {
            Ok(id) => self.get_by_id(id),
            Err(_) => self.get_by_name(identifier),
        }
    }

    /// Tasks currently in the category, used by the delete confirmation.
    pub fn count_tasks(&self, id: i32) -> Result<usize> {
        let count: i64 = self.conn.query_row(COUNT_TASKS, params![id, self.user_id], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn update_orders(&self, categories: &[Category]) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        for category in categories {
            if let Some(id) = category.id {
                tx.execute(UPDATE_CATEGORY_POSITION, params![id, self.user_id, category.order])?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}

fn map_category(row: &Row) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        color: row.get(3)?,
        order: row.get(4)?,
        created_at: row.get(5)?,
    })
}
