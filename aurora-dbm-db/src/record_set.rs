//! Ordered in-memory collection of loaded entities.

use aurora_dbm_catalog::Record;

use crate::rows::TableRow;
use crate::statement::{SqlBatch, update_statement};

/// Entities of one table in load order, followed by any added since.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSet<T> {
    items: Vec<T>,
}

impl<T> Default for RecordSet<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Record> RecordSet<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// First entity with this id.
    pub fn get(&self, id: i64) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn get_mut(&mut self, id: i64) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    /// Replace the first entity with the same id. Returns whether one matched.
    pub fn replace(&mut self, item: T) -> bool {
        match self.get_mut(item.id()) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    /// Remove the first entity with this id, keeping the others in order.
    pub fn remove(&mut self, id: i64) -> Option<T> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(index))
    }

    /// Appending is reserved for the store's `add`, which inserts first.
    pub(crate) fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Entities with unsaved setter calls.
    pub fn changed(&self) -> impl Iterator<Item = &T> {
        self.items.iter().filter(|item| item.is_changed())
    }

    pub(crate) fn mark_all_saved(&mut self) {
        for item in self.items.iter_mut().filter(|item| item.is_changed()) {
            item.mark_saved();
        }
    }

    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T: Record<Row: TableRow>> RecordSet<T> {
    /// Queue an UPDATE for every changed entity.
    pub(crate) fn queue_updates(&self, batch: &mut SqlBatch) {
        for item in self.changed() {
            batch.push(update_statement(item.row()));
        }
    }
}

impl<'a, T> IntoIterator for &'a RecordSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
