//! Ordered playlist store
//!
//! Holds the playback order and a cursor into it:
//!
//! ```text
//! Previous items:  [0 .. current)
//! ─────────────────────────────
//! Current item:    current
//! ─────────────────────────────
//! Next items:      (current .. len)
//! ```
//!
//! The cursor is private. Callers ask the store to move and read back the
//! result, so every cursor change goes through the methods below.

use crate::error::QueueError;

/// Outcome of removing an item
#[derive(Debug, Clone, PartialEq)]
pub struct Removal<T> {
    /// The removed item
    pub item: T,

    /// Whether the current item is now a different entry (or gone)
    pub current_changed: bool,
}

/// Ordered queue with a current-item cursor
///
/// Invariant: `current` is `Some(i)` with `i < items.len()` iff `items`
/// is non-empty.
#[derive(Debug, Clone)]
pub struct QueueManager<T> {
    items: Vec<T>,
    current: Option<usize>,
}

impl<T: Clone> QueueManager<T> {
    /// Create new empty queue
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            current: None,
        }
    }

    /// Append an item
    ///
    /// The first item added to an empty queue becomes current.
    pub fn add(&mut self, item: T) {
        self.items.push(item);
        if self.current.is_none() {
            self.current = Some(0);
        }
    }

    /// Append a batch of items
    pub fn add_all(&mut self, items: Vec<T>) {
        if items.is_empty() {
            return;
        }
        self.items.extend(items);
        if self.current.is_none() {
            self.current = Some(0);
        }
    }

    /// Insert a batch at `index` (`0..=len`)
    ///
    /// Inserting at or before the cursor shifts it so the current item
    /// stays current.
    pub fn insert_all(&mut self, items: Vec<T>, index: usize) -> Result<(), QueueError> {
        let len = self.items.len();
        if index > len {
            return Err(QueueError::InvalidInsertion { index, len });
        }
        if items.is_empty() {
            return Ok(());
        }

        let count = items.len();
        self.items.splice(index..index, items);

        self.current = match self.current {
            Some(current) if index <= current => Some(current + count),
            Some(current) => Some(current),
            None => Some(0),
        };
        Ok(())
    }

    /// Move the cursor forward by one
    pub fn next(&mut self) -> Result<&T, QueueError> {
        let current = self.current.ok_or(QueueError::Empty)?;
        if current + 1 >= self.items.len() {
            return Err(QueueError::NoNextItem);
        }
        self.current = Some(current + 1);
        Ok(&self.items[current + 1])
    }

    /// Move the cursor back by one
    pub fn previous(&mut self) -> Result<&T, QueueError> {
        let current = self.current.ok_or(QueueError::Empty)?;
        if current == 0 {
            return Err(QueueError::NoPreviousItem);
        }
        self.current = Some(current - 1);
        Ok(&self.items[current - 1])
    }

    /// Move the cursor to `index`
    pub fn jump(&mut self, index: usize) -> Result<&T, QueueError> {
        self.check_index(index)?;
        self.current = Some(index);
        Ok(&self.items[index])
    }

    /// Replace the current item in place
    ///
    /// Other indices are untouched. On an empty queue the item is added
    /// and becomes current.
    pub fn replace_current(&mut self, item: T) {
        match self.current {
            Some(current) => self.items[current] = item,
            None => self.add(item),
        }
    }

    /// Remove the item at `index`
    ///
    /// Removing the current item selects the item that slides into its
    /// place, or the new last item when the current one was last.
    pub fn remove(&mut self, index: usize) -> Result<Removal<T>, QueueError> {
        self.check_index(index)?;
        let item = self.items.remove(index);
        let len = self.items.len();

        let (current, current_changed) = match self.current {
            _ if len == 0 => (None, true),
            Some(current) if index < current => (Some(current - 1), false),
            Some(current) if index == current => (Some(current.min(len - 1)), true),
            other => (other, false),
        };
        self.current = current;

        Ok(Removal {
            item,
            current_changed,
        })
    }

    /// Move the item at `from` to `to`
    ///
    /// Both indices must address existing items. The cursor follows the
    /// current item.
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<(), QueueError> {
        self.check_index(from)?;
        self.check_index(to)?;
        if from == to {
            return Ok(());
        }

        let item = self.items.remove(from);
        self.items.insert(to, item);

        if let Some(current) = self.current {
            self.current = Some(if current == from {
                to
            } else if from < current && to >= current {
                current - 1
            } else if from > current && to <= current {
                current + 1
            } else {
                current
            });
        }
        Ok(())
    }

    /// Drop every item after the current one
    pub fn remove_upcoming(&mut self) {
        if let Some(current) = self.current {
            self.items.truncate(current + 1);
        }
    }

    /// Drop every item before the current one
    pub fn remove_previous(&mut self) {
        if let Some(current) = self.current {
            self.items.drain(..current);
            self.current = Some(0);
        }
    }

    /// Clear entire queue
    pub fn clear(&mut self) {
        self.items.clear();
        self.current = None;
    }

    /// All items in playback order
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Item at index
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Index of the current item
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// The current item
    pub fn current(&self) -> Option<&T> {
        self.current.and_then(|i| self.items.get(i))
    }

    /// Items before the current one
    pub fn previous_items(&self) -> &[T] {
        match self.current {
            Some(current) => &self.items[..current],
            None => &[],
        }
    }

    /// Items after the current one
    pub fn next_items(&self) -> &[T] {
        match self.current {
            Some(current) => &self.items[current + 1..],
            None => &[],
        }
    }

    /// Total number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if queue is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn check_index(&self, index: usize) -> Result<(), QueueError> {
        let len = self.items.len();
        if len == 0 {
            return Err(QueueError::Empty);
        }
        if index >= len {
            return Err(QueueError::IndexOutOfRange { index, len });
        }
        Ok(())
    }
}

impl<T: Clone> Default for QueueManager<T> {
    fn default() -> Self {
        Self::new()
    }
}
