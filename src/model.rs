//! An observable in-memory list model.
//!
//! [`VecModel`] wraps a `Vec<T>` and implements [`ListModel`], notifying subscribers of every
//! mutation the way a UI-bound model would and counting the primitive calls it served.

use crate::core::{ListModel, move_block};
use crate::error::ModelError;
use std::cell::Cell;
use std::fmt;

/// A change notification emitted by [`VecModel`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModelEvent {
    /// The item at `index` was replaced.
    Changed { index: usize },
    /// `count` items were moved from `from` to `to` (post-removal index).
    Moved { from: usize, to: usize, count: usize },
}

/// Primitive calls served by a model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub gets: usize,
    pub sets: usize,
    pub moves: usize,
}

type Listener = Box<dyn FnMut(&ModelEvent)>;

/// A `Vec`-backed list model with change notifications.
///
/// ```
/// use modelsort::model::{ModelEvent, VecModel};
/// use modelsort::prelude::*;
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&seen);
///
/// let mut model = VecModel::from(vec![2, 1]);
/// model.subscribe(move |event| sink.borrow_mut().push(*event));
/// model.move_rows(1, 0, 1).unwrap();
///
/// assert_eq!(model.as_slice(), &[1, 2]);
/// assert_eq!(*seen.borrow(), vec![ModelEvent::Moved { from: 1, to: 0, count: 1 }]);
/// ```
pub struct VecModel<T> {
    items: Vec<T>,
    listeners: Vec<Listener>,
    gets: Cell<usize>,
    sets: usize,
    moves: usize,
}

impl<T> VecModel<T> {
    /// Creates an empty model with no subscribers.
    pub fn new() -> Self {
        Self::from(Vec::new())
    }

    /// Registers a callback invoked after every mutation.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&ModelEvent) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Appends an item. Appends are not reported as events; only reordering is observed.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Current contents, in model order.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Drops the subscribers and returns the items.
    pub fn into_inner(self) -> Vec<T> {
        self.items
    }

    /// Primitive calls served since construction or the last [`reset_counts`](Self::reset_counts).
    pub fn counts(&self) -> CallCounts {
        CallCounts {
            gets: self.gets.get(),
            sets: self.sets,
            moves: self.moves,
        }
    }

    /// Zeroes the call counters. Subscribers are kept.
    pub fn reset_counts(&mut self) {
        self.gets.set(0);
        self.sets = 0;
        self.moves = 0;
    }

    fn notify(&mut self, event: ModelEvent) {
        self.listeners.iter_mut().for_each(|listener| listener(&event));
    }
}

impl<T> Default for VecModel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for VecModel<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            items,
            listeners: Vec::new(),
            gets: Cell::new(0),
            sets: 0,
            moves: 0,
        }
    }
}

impl<T> FromIterator<T> for VecModel<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<T: fmt::Debug> fmt::Debug for VecModel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VecModel")
            .field("items", &self.items)
            .field("listeners", &self.listeners.len())
            .field("counts", &self.counts())
            .finish()
    }
}

impl<T: Clone> ListModel for VecModel<T> {
    type Item = T;

    fn count(&self) -> usize {
        self.items.len()
    }

    fn get(&self, index: usize) -> Result<T, ModelError> {
        self.gets.set(self.gets.get() + 1);
        self.items
            .as_slice()
            .get(index)
            .cloned()
            .ok_or(ModelError::IndexOutOfBounds {
                index,
                len: self.items.len(),
            })
    }

    fn set(&mut self, index: usize, item: T) -> Result<(), ModelError> {
        let len = self.items.len();
        let slot = self
            .items
            .get_mut(index)
            .ok_or(ModelError::IndexOutOfBounds { index, len })?;
        *slot = item;
        self.sets += 1;
        self.notify(ModelEvent::Changed { index });
        Ok(())
    }

    fn move_rows(&mut self, from: usize, to: usize, count: usize) -> Result<(), ModelError> {
        move_block(&mut self.items, from, to, count)?;
        self.moves += 1;
        self.notify(ModelEvent::Moved { from, to, count });
        Ok(())
    }
}
