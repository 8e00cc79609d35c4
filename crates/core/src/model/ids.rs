use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque in-memory reference to a logged entry.
///
/// Ids are handed out by the log when an entry is loaded or created and are
/// never reused while the log is open. They are not persisted, so they only
/// identify an entry within one open log; use `EntryKey` across reloads.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntryId(u64);

impl EntryId {
    /// Creates a new `EntryId`
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying u64 value
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntryId({})", self.0)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out monotonically increasing entry ids, starting at 1.
#[derive(Debug, Clone)]
pub struct EntryIdGenerator {
    next: u64,
}

impl Default for EntryIdGenerator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl EntryIdGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> EntryId {
        let id = EntryId::new(self.next);
        self.next = self.next.saturating_add(1);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_id_display() {
        let id = EntryId::new(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(format!("{id:?}"), "EntryId(42)");
    }

    #[test]
    fn generator_never_repeats() {
        let mut ids = EntryIdGenerator::new();
        let first = ids.next_id();
        let second = ids.next_id();
        assert_eq!(first, EntryId::new(1));
        assert_eq!(second, EntryId::new(2));
    }
}
