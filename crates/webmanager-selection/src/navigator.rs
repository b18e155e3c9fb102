//! Previous/next navigation over a selection list.

use webmanager_models::{BlockId, SelectionSummary};

use crate::error::{Result, SelectionError};

/// Cursor over an ordered selection list.
///
/// The cursor starts on the first item. Moving past either end leaves it
/// where it is.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    items: Vec<SelectionSummary>,
    position: Option<usize>,
}

impl Navigator {
    /// Creates a navigator positioned on the first item, if any.
    pub fn new(items: Vec<SelectionSummary>) -> Self {
        let position = if items.is_empty() { None } else { Some(0) };
        Self { items, position }
    }

    /// All items in order.
    pub fn items(&self) -> &[SelectionSummary] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Index of the current item.
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// The current item.
    pub fn current(&self) -> Option<&SelectionSummary> {
        self.position.and_then(|i| self.items.get(i))
    }

    /// Returns true if there is an item after the current one.
    pub fn has_next(&self) -> bool {
        matches!(self.position, Some(i) if i + 1 < self.items.len())
    }

    /// Returns true if there is an item before the current one.
    pub fn has_previous(&self) -> bool {
        matches!(self.position, Some(i) if i > 0)
    }

    /// Moves to the next item and returns it, or `None` at the end.
    pub fn next(&mut self) -> Option<&SelectionSummary> {
        if !self.has_next() {
            return None;
        }
        self.position = self.position.map(|i| i + 1);
        self.current()
    }

    /// Moves to the previous item and returns it, or `None` at the start.
    pub fn previous(&mut self) -> Option<&SelectionSummary> {
        if !self.has_previous() {
            return None;
        }
        self.position = self.position.map(|i| i - 1);
        self.current()
    }

    /// Moves to the item at `index`.
    pub fn select_index(&mut self, index: usize) -> Result<&SelectionSummary> {
        if index >= self.items.len() {
            return Err(SelectionError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        self.position = Some(index);
        Ok(&self.items[index])
    }

    /// Moves to the item with the given id.
    pub fn select_id(&mut self, id: BlockId) -> Result<&SelectionSummary> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or(SelectionError::UnknownId(id))?;
        self.select_index(index)
    }
}
