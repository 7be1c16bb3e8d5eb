//! Priority bookkeeping for ordered collections.
//!
//! Array order is the source of truth; `priority` mirrors it as a 1-based
//! rank. Every operation that changes order finishes with a renumber, so a
//! collection leaving this module always carries priorities `1..=len`.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::model::category::Category;
use crate::model::task::Task;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PriorityError {
    #[error("index {index} out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },
}

/// An entity with an optional 1-based rank.
pub trait Ranked {
    fn priority(&self) -> Option<u32>;
    fn set_priority(&mut self, priority: u32);
}

/// An entity with a stable identity used for diffing.
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Ranked for Category {
    fn priority(&self) -> Option<u32> {
        self.priority
    }

    fn set_priority(&mut self, priority: u32) {
        self.priority = Some(priority);
    }
}

impl Keyed for Category {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Ranked for Task {
    fn priority(&self) -> Option<u32> {
        self.priority
    }

    fn set_priority(&mut self, priority: u32) {
        self.priority = Some(priority);
    }
}

impl Keyed for Task {
    fn key(&self) -> &str {
        &self.id
    }
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// Overwrite every priority with `index + 1`, in place.
pub fn renumber<T: Ranked>(items: &mut [T]) {
    for (i, item) in items.iter_mut().enumerate() {
        item.set_priority(i as u32 + 1);
    }
}

/// Assign `priority = index + 1` in input order.
pub fn normalize<T: Ranked>(mut items: Vec<T>) -> Vec<T> {
    renumber(&mut items);
    items
}

/// Move the element at `from` to position `to`, shifting the ones between,
/// then normalize.
pub fn reorder<T: Ranked>(mut items: Vec<T>, from: usize, to: usize) -> Result<Vec<T>, PriorityError> {
    move_index(&mut items, from, to)?;
    Ok(items)
}

/// In-place form of [`reorder`].
pub fn move_index<T: Ranked>(items: &mut Vec<T>, from: usize, to: usize) -> Result<(), PriorityError> {
    let len = items.len();
    for index in [from, to] {
        if index >= len {
            return Err(PriorityError::IndexOutOfRange { index, len });
        }
    }
    if from != to {
        let item = items.remove(from);
        items.insert(to, item);
    }
    renumber(items);
    Ok(())
}

/// Move the element at `index` so that its priority becomes `new_priority`,
/// clamped to `1..=len`. Returns `false` without touching anything when the
/// element already sits at that rank in a normalized collection.
pub fn move_to_priority<T: Ranked>(
    items: &mut Vec<T>,
    index: usize,
    new_priority: u32,
) -> Result<bool, PriorityError> {
    let len = items.len();
    if index >= len {
        return Err(PriorityError::IndexOutOfRange { index, len });
    }
    let target = new_priority.clamp(1, len as u32);
    if index == target as usize - 1 && is_normalized(items) {
        return Ok(false);
    }
    let item = items.remove(index);
    items.insert(target as usize - 1, item);
    renumber(items);
    Ok(true)
}

/// Stable sort by priority, ascending. Missing priorities sort as 0.
pub fn sort_by_priority<T: Ranked>(mut items: Vec<T>) -> Vec<T> {
    items.sort_by_key(|item| item.priority().unwrap_or(0));
    items
}

/// True when priorities are exactly `1..=len` in array order.
pub fn is_normalized<T: Ranked>(items: &[T]) -> bool {
    items
        .iter()
        .enumerate()
        .all(|(i, item)| item.priority() == Some(i as u32 + 1))
}

// ---------------------------------------------------------------------------
// Diffing
// ---------------------------------------------------------------------------

/// Entities of `updated` that are new or structurally different from their
/// counterpart in `original`, matched by key. Each key appears at most once,
/// in `updated` order. Entities only in `original` are not reported; see
/// [`removed_keys`].
pub fn diff<T: Keyed + PartialEq + Clone>(original: &[T], updated: &[T]) -> Vec<T> {
    let before: IndexMap<&str, &T> = original.iter().map(|item| (item.key(), item)).collect();
    let mut seen = HashSet::new();
    let mut changed = Vec::new();

    for item in updated {
        if !seen.insert(item.key()) {
            tracing::warn!(key = item.key(), "duplicate key in updated collection");
            continue;
        }
        match before.get(item.key()) {
            Some(prev) if *prev == item => {}
            _ => changed.push(item.clone()),
        }
    }
    changed
}

/// Keys present in `original` but missing from `updated`.
pub fn removed_keys<T: Keyed>(original: &[T], updated: &[T]) -> Vec<String> {
    let after: HashSet<&str> = updated.iter().map(|item| item.key()).collect();
    original
        .iter()
        .map(|item| item.key())
        .filter(|key| !after.contains(key))
        .map(str::to_string)
        .collect()
}
