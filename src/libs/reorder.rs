//! Drag-and-drop style reordering of ordered lists.
//!
//! Ordering is dense: after any reorder the list is renumbered `0..n-1`.
//! [`DragSession`] tracks the pointer-like gesture (start, over, leave, up)
//! while [`reorder_items`] is the pure recomputation behind a drop.

use super::error::ReorderError;
use crate::db::categories::Category;
use crate::db::tags::Tag;
use crate::libs::task::Task;

/// Anything with an id and a dense display position.
pub trait Positioned {
    fn item_id(&self) -> Option<i32>;
    fn order(&self) -> i32;
    fn set_order(&mut self, order: i32);
}

macro_rules! positioned {
    ($($ty:ty),*) => {
        $(impl Positioned for $ty {
            fn item_id(&self) -> Option<i32> {
                self.id
            }

            fn order(&self) -> i32 {
                self.order
            }

            fn set_order(&mut self, order: i32) {
                self.order = order;
            }
        })*
    };
}

positioned!(Task, Tag, Category);

/// Moves `dragged_id` into the slot of `target_id` and renumbers everything.
///
/// Items between the two slots shift by one towards the vacated slot.
/// Dropping an item on itself only renumbers.
pub fn reorder_items<T: Positioned + Clone>(items: &[T], dragged_id: i32, target_id: i32) -> Result<Vec<T>, ReorderError> {
    let from = position_of(items, dragged_id)?;
    let to = position_of(items, target_id)?;

    let mut reordered = items.to_vec();
    let moved = reordered.remove(from);
    reordered.insert(to, moved);
    renumber(&mut reordered);

    Ok(reordered)
}

pub fn reorder_tasks(tasks: &[Task], dragged_id: i32, target_id: i32) -> Result<Vec<Task>, ReorderError> {
    reorder_items(tasks, dragged_id, target_id)
}

/// Moves `id` to index `position` (clamped to the list).
pub fn move_to_position<T: Positioned + Clone>(items: &[T], id: i32, position: usize) -> Result<Vec<T>, ReorderError> {
    if items.is_empty() {
        return Err(ReorderError::UnknownTask(id));
    }
    let target = items[position.min(items.len() - 1)]
        .item_id()
        .ok_or(ReorderError::UnknownTask(id))?;
    reorder_items(items, id, target)
}

/// Assigns `order = index` to every item.
pub fn renumber<T: Positioned>(items: &mut [T]) {
    for (index, item) in items.iter_mut().enumerate() {
        item.set_order(index as i32);
    }
}

fn position_of<T: Positioned>(items: &[T], id: i32) -> Result<usize, ReorderError> {
    items
        .iter()
        .position(|item| item.item_id() == Some(id))
        .ok_or(ReorderError::UnknownTask(id))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEvent {
    /// Press on a row.
    Start(i32),
    /// Pointer moved; no hit-testing involved.
    Move,
    /// Pointer entered a row.
    Over(i32),
    /// Pointer left the row it was over.
    Leave,
    /// Release.
    Up,
}

/// Result of feeding an event to a [`DragSession`].
#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome<T> {
    Idle,
    Dragging { indicator: Option<i32> },
    Dropped(Vec<T>),
    Cancelled,
}

/// One drag gesture over a list. The list is a snapshot taken at start.
pub struct DragSession<T, F>
where
    F: FnMut(&[T]),
{
    items: Vec<T>,
    dragging: Option<i32>,
    over: Option<i32>,
    is_loading: bool,
    on_reorder: F,
}

impl<T, F> DragSession<T, F>
where
    T: Positioned + Clone,
    F: FnMut(&[T]),
{
    pub fn new(items: Vec<T>, on_reorder: F) -> Self {
        Self {
            items,
            dragging: None,
            over: None,
            is_loading: false,
            on_reorder,
        }
    }

    pub fn set_loading(&mut self, is_loading: bool) {
        self.is_loading = is_loading;
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn dragging(&self) -> Option<i32> {
        self.dragging
    }

    /// Row showing the drop indicator, if any.
    pub fn drop_indicator(&self) -> Option<i32> {
        match (self.dragging, self.over) {
            (Some(dragged), Some(over)) if dragged != over => Some(over),
            _ => None,
        }
    }

    pub fn handle(&mut self, event: DragEvent) -> Result<DragOutcome<T>, ReorderError> {
        match event {
            DragEvent::Start(id) => {
                if self.is_loading {
                    return Err(ReorderError::Loading);
                }
                position_of(&self.items, id)?;
                self.dragging = Some(id);
                self.over = None;
                Ok(self.dragging_outcome())
            }
            DragEvent::Move => Ok(self.dragging_outcome()),
            DragEvent::Over(id) => {
                if self.dragging.is_some() && position_of(&self.items, id).is_ok() {
                    self.over = Some(id);
                }
                Ok(self.dragging_outcome())
            }
            DragEvent::Leave => {
                self.over = None;
                Ok(self.dragging_outcome())
            }
            DragEvent::Up => {
                let target = self.drop_indicator();
                let dragged = self.dragging.take();
                self.over = None;

                match (dragged, target) {
                    (Some(dragged), Some(target)) => {
                        let reordered = reorder_items(&self.items, dragged, target)?;
                        (self.on_reorder)(&reordered);
                        self.items = reordered.clone();
                        Ok(DragOutcome::Dropped(reordered))
                    }
                    (Some(_), None) => Ok(DragOutcome::Cancelled),
                    (None, _) => Ok(DragOutcome::Idle),
                }
            }
        }
    }

    fn dragging_outcome(&self) -> DragOutcome<T> {
        match self.dragging {
            Some(_) => DragOutcome::Dragging {
                indicator: self.drop_indicator(),
            },
            None => DragOutcome::Idle,
        }
    }
}
