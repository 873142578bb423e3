use crate::libs::messages::Message;
use crate::libs::task::{Priority, Task, TaskFilter};
use crate::msg_error_anyhow;
use anyhow::Result;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

const SELECT_TASKS: &str = "SELECT id, user_id, title, description, completed, due_date, position, category_id, priority, created_at, updated_at FROM tasks WHERE user_id = ?1";
const ORDER_BY_POSITION: &str = "ORDER BY position, id";
const NEXT_POSITION: &str = "SELECT COALESCE(MAX(position), -1) + 1 FROM tasks WHERE user_id = ?1";
const INSERT_TASK: &str = "INSERT INTO tasks (user_id, title, description, completed, due_date, position, priority, category_id)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, (SELECT id FROM categories WHERE id = ?8 AND user_id = ?1))";
const UPDATE_TASK: &str = "UPDATE tasks SET title = ?3, description = ?4, completed = ?5, due_date = ?6, priority = ?7,
    category_id = (SELECT id FROM categories WHERE id = ?8 AND user_id = ?2), updated_at = CURRENT_TIMESTAMP
    WHERE id = ?1 AND user_id = ?2";
const UPDATE_COMPLETED: &str = "UPDATE tasks SET completed = ?3, updated_at = CURRENT_TIMESTAMP WHERE id = ?1 AND user_id = ?2";
const UPDATE_POSITION: &str = "UPDATE tasks SET position = ?3, updated_at = CURRENT_TIMESTAMP WHERE id = ?1 AND user_id = ?2";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?1 AND user_id = ?2";
const SELECT_TASK_TAG_IDS: &str = "SELECT tag_id FROM task_tags WHERE task_id = ?1 ORDER BY tag_id";
const DELETE_TASK_TAGS: &str = "DELETE FROM task_tags WHERE task_id = ?1";
// Only tags owned by the same user can be attached.
const INSERT_TASK_TAG: &str = "INSERT OR IGNORE INTO task_tags (task_id, tag_id) SELECT ?1, id FROM tags WHERE id = ?2 AND user_id = ?3";

/// Task documents of a single user.
pub struct Tasks<'a> {
    conn: &'a Connection,
    user_id: i32,
}

impl<'a> Tasks<'a> {
    pub fn new(conn: &'a Connection, user_id: i32) -> Self {
        Self { conn, user_id }
    }

    /// Stores a task at the end of the user's list and returns its id.
    pub fn insert(&self, task: &Task) -> Result<i32> {
        let position: i32 = self.conn.query_row(NEXT_POSITION, params![self.user_id], |row| row.get(0))?;
        self.conn.execute(
            INSERT_TASK,
            params![
                self.user_id,
                task.title,
                task.description,
                task.completed,
                task.due_date,
                position,
                task.priority.as_i32(),
                task.category_id
            ],
        )?;
        let id = self.conn.last_insert_rowid() as i32;
        self.write_tags(id, &task.tags)?;

        Ok(id)
    }

    pub fn get_by_id(&self, id: i32) -> Result<Option<Task>> {
        let task = self
            .conn
            .query_row(&format!("{} AND id = ?2", SELECT_TASKS), params![self.user_id, id], map_task)
            .optional()?;

        match task {
            Some(mut task) => {
                task.tags = self.read_tags(id)?;
                Ok(Some(task))
            }
            None => Ok(None),
        }
    }

    pub fn fetch(&self, filter: TaskFilter) -> Result<Vec<Task>> {
        let mut values = vec![Value::Integer(self.user_id as i64)];
        let condition = match filter {
            TaskFilter::All => String::new(),
            TaskFilter::Inbox => "AND completed = 0".to_string(),
            TaskFilter::Today(day) => {
                values.push(Value::Text(day.format("%Y-%m-%d").to_string()));
                "AND completed = 0 AND due_date IS NOT NULL AND DATE(due_date) <= ?2".to_string()
            }
            TaskFilter::Upcoming(day) => {
                values.push(Value::Text(day.format("%Y-%m-%d").to_string()));
                "AND completed = 0 AND due_date IS NOT NULL AND DATE(due_date) > ?2".to_string()
            }
            TaskFilter::Completed => "AND completed = 1".to_string(),
            TaskFilter::ByTag(tag_id) => {
                values.push(Value::Integer(tag_id as i64));
                "AND id IN (SELECT task_id FROM task_tags WHERE tag_id = ?2)".to_string()
            }
            TaskFilter::ByIds(ids) => {
                if ids.is_empty() {
                    return Ok(Vec::new());
                }
                let placeholders: Vec<String> = (0..ids.len()).map(|i| format!("?{}", i + 2)).collect();
                values.extend(ids.iter().map(|id| Value::Integer(*id as i64)));
                format!("AND id IN ({})", placeholders.join(", "))
            }
            TaskFilter::DueBetween(from, to) => {
                values.push(Value::Text(from.format("%Y-%m-%d").to_string()));
                values.push(Value::Text(to.format("%Y-%m-%d").to_string()));
                "AND due_date IS NOT NULL AND DATE(due_date) BETWEEN ?2 AND ?3".to_string()
            }
        };

        let sql = format!("{} {} {}", SELECT_TASKS, condition, ORDER_BY_POSITION);
        let mut stmt = self.conn.prepare(&sql)?;
        let task_iter = stmt.query_map(params_from_iter(values.iter()), map_task)?;

        let mut tasks = Vec::new();
        for task_result in task_iter {
            let mut task = task_result?;
            if let Some(id) = task.id {
                task.tags = self.read_tags(id)?;
            }
            tasks.push(task);
        }

        Ok(tasks)
    }

    /// Writes every editable field of the task, including its tag set.
    pub fn update(&self, task: &Task) -> Result<()> {
        let id = task.id.ok_or_else(|| anyhow::anyhow!("task has no id"))?;
        let affected = self.conn.execute(
            UPDATE_TASK,
            params![
                id,
                self.user_id,
                task.title,
                task.description,
                task.completed,
                task.due_date,
                task.priority.as_i32(),
                task.category_id
            ],
        )?;
        if affected == 0 {
            return Err(msg_error_anyhow!(Message::TaskNotFound(id)));
        }
        self.conn.execute(DELETE_TASK_TAGS, params![id])?;
        self.write_tags(id, &task.tags)?;

        Ok(())
    }

    pub fn set_completed(&self, id: i32, completed: bool) -> Result<()> {
        let affected = self.conn.execute(UPDATE_COMPLETED, params![id, self.user_id, completed])?;
        if affected == 0 {
            return Err(msg_error_anyhow!(Message::TaskNotFound(id)));
        }
        Ok(())
    }

    /// Deletes a task and closes the gap it leaves in the ordering.
    pub fn delete(&self, id: i32) -> Result<usize> {
        let deleted = self.conn.execute(DELETE_TASK, params![id, self.user_id])?;
        if deleted > 0 {
            self.reindex()?;
        }
        Ok(deleted)
    }

    /// Persists the `order` of every task in one transaction.
    ///
    /// Nothing is written if any update fails.
    pub fn update_orders(&self, tasks: &[Task]) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        for task in tasks {
            if let Some(id) = task.id {
                tx.execute(UPDATE_POSITION, params![id, self.user_id, task.order])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// Renumbers positions to 0..n-1 keeping the current relative order.
    pub fn reindex(&self) -> Result<()> {
        let mut tasks = self.fetch(TaskFilter::All)?;
        for (position, task) in tasks.iter_mut().enumerate() {
            task.order = position as i32;
        }
        self.update_orders(&tasks)
    }

    fn read_tags(&self, task_id: i32) -> Result<Vec<i32>> {
        let mut stmt = self.conn.prepare(SELECT_TASK_TAG_IDS)?;
        let ids = stmt
            .query_map(params![task_id], |row| row.get(0))?
            .collect::<Result<Vec<i32>, _>>()?;
        Ok(ids)
    }

    fn write_tags(&self, task_id: i32, tag_ids: &[i32]) -> Result<()> {
        for tag_id in tag_ids {
            self.conn.execute(INSERT_TASK_TAG, params![task_id, tag_id, self.user_id])?;
        }
        Ok(())
    }
}

fn map_task(row: &Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        completed: row.get(4)?,
        due_date: row.get(5)?,
        order: row.get(6)?,
        tags: Vec::new(),
        category_id: row.get(7)?,
        priority: Priority::from_i32(row.get(8)?),
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}
