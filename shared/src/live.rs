//! Local state kept in step with a stream of change notifications

use serde::Serialize;

use crate::types::{ChangeEvent, Identified};

/// Where newly inserted records are placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertOrder {
    /// Oldest first; inserts go to the end
    #[default]
    Append,
    /// Newest first; inserts go to the front
    Prepend,
}

/// A collection merged from change events by identity
///
/// Updates replace the record with the same id and deletes remove it; both
/// are no-ops when the id is not present.
#[derive(Debug, Clone, Serialize)]
pub struct LiveCollection<T> {
    items: Vec<T>,
    #[serde(skip)]
    order: InsertOrder,
}

impl<T> Default for LiveCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LiveCollection<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            order: InsertOrder::Append,
        }
    }

    pub fn newest_first() -> Self {
        Self {
            items: Vec::new(),
            order: InsertOrder::Prepend,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<T: Identified> LiveCollection<T> {
    /// Seed the collection with records already loaded
    pub fn with_items(items: Vec<T>, order: InsertOrder) -> Self {
        Self { items, order }
    }

    /// Merge one change event into the collection
    pub fn apply(&mut self, event: ChangeEvent<T>) {
        match event {
            ChangeEvent::Insert(record) => match self.order {
                InsertOrder::Append => self.items.push(record),
                InsertOrder::Prepend => self.items.insert(0, record),
            },
            ChangeEvent::Update(record) => {
                let id = record.entity_id();
                if let Some(slot) = self.items.iter_mut().find(|item| item.entity_id() == id) {
                    *slot = record;
                }
            }
            ChangeEvent::Delete(record) => {
                let id = record.entity_id();
                self.items.retain(|item| item.entity_id() != id);
            }
        }
    }

    pub fn apply_all(&mut self, events: impl IntoIterator<Item = ChangeEvent<T>>) {
        for event in events {
            self.apply(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[derive(Debug, Clone, PartialEq)]
    struct Note {
        id: Uuid,
        text: &'static str,
    }

    impl Identified for Note {
        fn entity_id(&self) -> Uuid {
            self.id
        }
    }

    fn note(text: &'static str) -> Note {
        Note {
            id: Uuid::new_v4(),
            text,
        }
    }

    #[test]
    fn test_insert_update_delete() {
        let first = note("first");
        let second = note("second");
        let mut live = LiveCollection::new();
        live.apply(ChangeEvent::Insert(first.clone()));
        live.apply(ChangeEvent::Insert(second.clone()));
        assert_eq!(live.items(), &[first.clone(), second.clone()]);

        let edited = Note {
            id: first.id,
            text: "edited",
        };
        live.apply(ChangeEvent::Update(edited.clone()));
        assert_eq!(live.items(), &[edited.clone(), second.clone()]);

        live.apply(ChangeEvent::Delete(edited));
        assert_eq!(live.items(), &[second]);
    }

    #[test]
    fn test_newest_first_prepends() {
        let first = note("first");
        let second = note("second");
        let mut live = LiveCollection::newest_first();
        live.apply_all([
            ChangeEvent::Insert(first.clone()),
            ChangeEvent::Insert(second.clone()),
        ]);
        assert_eq!(live.items(), &[second, first]);
    }

    #[test]
    fn test_unknown_ids_are_ignored() {
        let kept = note("kept");
        let mut live = LiveCollection::with_items(vec![kept.clone()], InsertOrder::Append);
        live.apply(ChangeEvent::Update(note("stranger")));
        live.apply(ChangeEvent::Delete(note("stranger")));
        assert_eq!(live.items(), &[kept]);
    }
}
