//! The change-tracking contract shared by every entity type.

/// A typed, change-tracked view over one stored row.
///
/// Entities own their backing row. Every setter writes the row and marks
/// the entity changed, even when the new value equals the old one. The
/// store clears the flag through [`Record::mark_saved`] once the row has
/// been written back.
pub trait Record: Sized {
    /// Human-readable entity name, used in logs and errors.
    const KIND: &'static str;

    /// The plain data row this entity wraps.
    type Row;

    /// Wrap a freshly loaded row. The result is unchanged.
    fn from_row(row: Self::Row) -> Self;

    /// The backing row, read-only.
    fn row(&self) -> &Self::Row;

    /// The store-assigned row id.
    fn id(&self) -> i64;

    /// Whether any setter has been called since the last save.
    fn is_changed(&self) -> bool;

    /// Clear the changed flag after the row has been persisted.
    fn mark_saved(&mut self);
}
