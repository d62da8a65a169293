//! Core traits and types for modelsort.
//!
//! This module defines:
//! - [`ListModel`]: the sequence capability callers hand to the sorter.
//! - [`Record`]: named-field access used to pull the sort key out of an item.
//! - [`Direction`], [`Strategy`], [`SortOptions`]: sort configuration.
//! - [`SortStats`]: what a sort invocation did to the model.

use crate::error::ModelError;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

/// An externally-owned, indexable, mutable sequence of items.
///
/// The sorter never owns the data; it only reads and rearranges it through these primitives.
/// Every primitive is applied to the model immediately, so observers attached to the model see
/// each step as it happens.
///
/// # Examples
///
/// ```
/// use modelsort::core::ListModel;
/// use modelsort::error::ModelError;
///
/// struct Scores(Vec<u32>);
///
/// impl ListModel for Scores {
///     type Item = u32;
///
///     fn count(&self) -> usize {
///         self.0.len()
///     }
///
///     fn get(&self, index: usize) -> Result<u32, ModelError> {
///         self.0
///             .as_slice()
///             .get(index)
///             .copied()
///             .ok_or(ModelError::IndexOutOfBounds { index, len: self.0.len() })
///     }
///
///     fn set(&mut self, index: usize, item: u32) -> Result<(), ModelError> {
///         self.0.set(index, item)
///     }
///
///     fn move_rows(&mut self, from: usize, to: usize, count: usize) -> Result<(), ModelError> {
///         self.0.move_rows(from, to, count)
///     }
/// }
/// ```
pub trait ListModel {
    /// The record type stored in the model. `get` hands out copies of it.
    type Item: Clone;

    /// Returns the number of items in the model.
    fn count(&self) -> usize;

    /// Returns a copy of the item at `index`.
    fn get(&self, index: usize) -> Result<Self::Item, ModelError>;

    /// Replaces the item at `index`.
    fn set(&mut self, index: usize, item: Self::Item) -> Result<(), ModelError>;

    /// Removes `count` contiguous items starting at `from` and reinserts them starting at `to`.
    ///
    /// `to` is interpreted in the index space *after* the removal, so `to + count` may not
    /// exceed `self.count()`.
    fn move_rows(&mut self, from: usize, to: usize, count: usize) -> Result<(), ModelError>;

    /// Returns `true` if the model holds no items.
    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

// Plain vectors are list models without observers.
impl<T: Clone> ListModel for Vec<T> {
    type Item = T;

    fn count(&self) -> usize {
        self.len()
    }

    fn get(&self, index: usize) -> Result<T, ModelError> {
        self.as_slice()
            .get(index)
            .cloned()
            .ok_or(ModelError::IndexOutOfBounds {
                index,
                len: self.len(),
            })
    }

    fn set(&mut self, index: usize, item: T) -> Result<(), ModelError> {
        let len = self.len();
        match self.get_mut(index) {
            Some(slot) => {
                *slot = item;
                Ok(())
            }
            None => Err(ModelError::IndexOutOfBounds { index, len }),
        }
    }

    fn move_rows(&mut self, from: usize, to: usize, count: usize) -> Result<(), ModelError> {
        move_block(self, from, to, count)
    }
}

/// Moves a block of `count` elements from `from` to `to` (post-removal index) by rotation.
pub(crate) fn move_block<T>(
    data: &mut [T],
    from: usize,
    to: usize,
    count: usize,
) -> Result<(), ModelError> {
    let len = data.len();
    let in_range = from.checked_add(count).is_some_and(|end| end <= len)
        && to.checked_add(count).is_some_and(|end| end <= len);
    if !in_range {
        return Err(ModelError::MoveOutOfRange {
            from,
            to,
            count,
            len,
        });
    }

    match from.cmp(&to) {
        Ordering::Less => data[from..to + count].rotate_left(count),
        Ordering::Greater => data[to..from + count].rotate_right(count),
        Ordering::Equal => {}
    }
    Ok(())
}

/// Named-field access on a record.
///
/// The sorter reads exactly one field (the sort key) from each record and treats the record as
/// an opaque unit otherwise.
pub trait Record {
    /// The type of field values. Only a partial order is required; incomparable pairs are
    /// reported as [`SortError::Incomparable`](crate::error::SortError::Incomparable).
    type Key: PartialOrd;

    /// Returns the value of the field called `name`, if present.
    fn field(&self, name: &str) -> Option<&Self::Key>;
}

impl<K: PartialOrd> Record for BTreeMap<String, K> {
    type Key = K;

    fn field(&self, name: &str) -> Option<&K> {
        self.get(name)
    }
}

impl<K: PartialOrd, S: std::hash::BuildHasher> Record for HashMap<String, K, S> {
    type Key = K;

    fn field(&self, name: &str) -> Option<&K> {
        self.get(name)
    }
}

/// Requested order of the sorted model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    /// Maps the boolean `descending` flag used by list-model sort helpers.
    pub fn from_descending(descending: bool) -> Self {
        if descending {
            Direction::Descending
        } else {
            Direction::Ascending
        }
    }

    /// Orients a key comparison. Equal stays equal, which keeps the sort stable in both directions.
    #[inline(always)]
    pub fn orient(self, ord: Ordering) -> Ordering {
        match self {
            Direction::Ascending => ord,
            Direction::Descending => ord.reverse(),
        }
    }
}

/// How the executor rearranges the model once the target order is known.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Strategy {
    /// Swap whole records through `get`/`set`. Observers see "item changed" notifications.
    #[default]
    CloneSwap,
    /// Relocate single records through `move_rows`, issuing as few moves as possible.
    /// Observers see coherent "item moved" notifications and nothing is copied.
    MinimalMove,
}

impl Strategy {
    /// Maps the boolean `use_move` flag used by list-model sort helpers.
    pub fn from_use_move(use_move: bool) -> Self {
        if use_move {
            Strategy::MinimalMove
        } else {
            Strategy::CloneSwap
        }
    }
}

/// Configuration for [`sort_model`](crate::algo::sort_model).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SortOptions {
    /// Name of the field to sort by.
    pub key: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub direction: Direction,
    #[cfg_attr(feature = "serde", serde(default))]
    pub strategy: Strategy,
}

impl SortOptions {
    /// Ascending, clone-swap sort by `key`.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: Direction::Ascending,
            strategy: Strategy::CloneSwap,
        }
    }

    /// Sorts largest key first.
    pub fn descending(mut self) -> Self {
        self.direction = Direction::Descending;
        self
    }

    /// Sets the sort direction.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Sets how the model is rearranged.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// Physical operations issued by one sort invocation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SortStats {
    /// Number of items in the model.
    pub len: usize,
    /// Number of positions whose occupant had to change.
    pub displaced: usize,
    /// Record swaps performed (clone-swap strategy). Each swap is two `get` and two `set` calls.
    pub swaps: usize,
    /// `move_rows` calls performed (minimal-move strategy).
    pub moves: usize,
}

impl SortStats {
    /// Returns `true` if the model was left untouched.
    pub fn is_noop(&self) -> bool {
        self.swaps == 0 && self.moves == 0
    }
}
