//! Planning and executing a model sort.
//!
//! A sort runs in two phases:
//! - **Planning** ([`plan`], [`plan_by`]): read every key once and stably sort the indices
//!   `[0, N)` by key. The result `order` says which original item must end up at each position.
//! - **Execution** ([`apply`]): rearrange the model in place so that `order[i]` lands on `i`,
//!   either by swapping records ([`Strategy::CloneSwap`]) or by moving single rows
//!   ([`Strategy::MinimalMove`]).
//!
//! The main entry points are [`sort`] and [`sort_model`].

use crate::core::{Direction, ListModel, Record, SortOptions, SortStats, Strategy};
use crate::error::SortError;
use std::cmp::Ordering;

/// Sorts `model` by the field `key_field`.
///
/// `descending` selects the direction and `use_move` selects [`Strategy::MinimalMove`] over
/// [`Strategy::CloneSwap`]. Items with equal keys keep their relative order.
///
/// # Examples
///
/// ```
/// use modelsort::sort;
/// use modelsort::value::{row, Row, Value};
///
/// let mut people: Vec<Row> = vec![
///     row([("name", Value::from("Carol"))]),
///     row([("name", Value::from("Alice"))]),
///     row([("name", Value::from("Bob"))]),
/// ];
///
/// let stats = sort(&mut people, "name", false, false).unwrap();
///
/// let names: Vec<String> = people.iter().map(|r| r["name"].to_string()).collect();
/// assert_eq!(names, vec!["Alice", "Bob", "Carol"]);
/// assert_eq!(stats.swaps, 2);
/// ```
pub fn sort<M>(
    model: &mut M,
    key_field: &str,
    descending: bool,
    use_move: bool,
) -> Result<SortStats, SortError>
where
    M: ListModel + ?Sized,
    M::Item: Record,
    <M::Item as Record>::Key: Clone,
{
    let order = plan(model, key_field, Direction::from_descending(descending))?;
    apply(model, &order, Strategy::from_use_move(use_move))
}

/// Sorts `model` as described by `options`.
pub fn sort_model<M>(model: &mut M, options: &SortOptions) -> Result<SortStats, SortError>
where
    M: ListModel + ?Sized,
    M::Item: Record,
    <M::Item as Record>::Key: Clone,
{
    let order = plan(model, &options.key, options.direction)?;
    apply(model, &order, options.strategy)
}

/// Sorts `model` by a key computed from each item.
///
/// This is the typed counterpart of [`sort_model`] for items that are not field maps.
///
/// ```
/// use modelsort::{Direction, Strategy, sort_model_by};
///
/// let mut words = vec!["pear", "fig", "banana"];
/// sort_model_by(&mut words, Direction::Ascending, Strategy::MinimalMove, |w| w.len()).unwrap();
/// assert_eq!(words, vec!["fig", "pear", "banana"]);
/// ```
pub fn sort_model_by<M, K, F>(
    model: &mut M,
    direction: Direction,
    strategy: Strategy,
    key_fn: F,
) -> Result<SortStats, SortError>
where
    M: ListModel + ?Sized,
    K: PartialOrd,
    F: FnMut(&M::Item) -> K,
{
    let order = plan_by(model, direction, key_fn)?;
    apply(model, &order, strategy)
}

/// Computes the stable target order of `model` by the field `field`.
///
/// Returns `order` such that the item currently at `order[i]` belongs at position `i`.
/// The model is only read.
///
/// # Errors
///
/// - [`SortError::MissingKey`] if an item has no `field`.
/// - [`SortError::Incomparable`] if two keys cannot be ordered.
/// - [`SortError::Model`] if a `get` fails.
pub fn plan<M>(model: &M, field: &str, direction: Direction) -> Result<Vec<usize>, SortError>
where
    M: ListModel + ?Sized,
    M::Item: Record,
    <M::Item as Record>::Key: Clone,
{
    let keys = (0..model.count())
        .map(|index| {
            let item = model.get(index)?;
            item.field(field)
                .cloned()
                .ok_or_else(|| SortError::MissingKey {
                    index,
                    field: field.to_owned(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    order_keys(&keys, direction)
}

/// Computes the stable target order of `model` using `key_fn` to extract keys.
pub fn plan_by<M, K, F>(model: &M, direction: Direction, mut key_fn: F) -> Result<Vec<usize>, SortError>
where
    M: ListModel + ?Sized,
    K: PartialOrd,
    F: FnMut(&M::Item) -> K,
{
    let keys = (0..model.count())
        .map(|index| model.get(index).map(|item| key_fn(&item)))
        .collect::<Result<Vec<_>, _>>()?;

    order_keys(&keys, direction)
}

/// Stably sorts `[0, keys.len())` by `keys`.
///
/// `slice::sort_by` is a stable merge sort, so equal keys need no index tiebreak.
/// The first incomparable pair aborts the sort; the remaining comparisons are answered with
/// `Equal` so the sort finishes quickly, and the partial result is discarded.
fn order_keys<K: PartialOrd>(keys: &[K], direction: Direction) -> Result<Vec<usize>, SortError> {
    let mut order: Vec<usize> = (0..keys.len()).collect();
    if keys.len() <= 1 {
        return Ok(order);
    }

    let mut incomparable = None;
    order.sort_by(|&a, &b| {
        if incomparable.is_some() {
            return Ordering::Equal;
        }
        match keys[a].partial_cmp(&keys[b]) {
            Some(ord) => direction.orient(ord),
            None => {
                incomparable = Some((a.min(b), a.max(b)));
                Ordering::Equal
            }
        }
    });

    match incomparable {
        Some((left, right)) => Err(SortError::Incomparable { left, right }),
        None => Ok(order),
    }
}

/// Checks whether `model` is already ordered by `field` in `direction`.
///
/// Uses the same key rules as [`plan`]: a missing field or an incomparable adjacent pair is
/// an error rather than `false`.
pub fn is_sorted_by_field<M>(model: &M, field: &str, direction: Direction) -> Result<bool, SortError>
where
    M: ListModel + ?Sized,
    M::Item: Record,
{
    let len = model.count();
    if len <= 1 {
        return Ok(true);
    }

    let missing = |index: usize| SortError::MissingKey {
        index,
        field: field.to_owned(),
    };

    let mut prev = model.get(0)?;
    for index in 1..len {
        let item = model.get(index)?;
        let a = prev.field(field).ok_or_else(|| missing(index - 1))?;
        let b = item.field(field).ok_or_else(|| missing(index))?;
        match a.partial_cmp(b).map(|ord| direction.orient(ord)) {
            Some(Ordering::Greater) => return Ok(false),
            Some(_) => {}
            None => {
                return Err(SortError::Incomparable {
                    left: index - 1,
                    right: index,
                });
            }
        }
        prev = item;
    }
    Ok(true)
}

/// Rearranges `model` in place so the item at `order[i]` ends up at position `i`.
///
/// `order` must be a permutation of `[0, model.count())`; it is validated before any
/// primitive is issued. Positions are settled in ascending order and positions that already
/// hold the right item are skipped, so the identity permutation issues no operations.
///
/// If a primitive fails the error is returned immediately. The model is then partially
/// reordered but still holds every item exactly once.
pub fn apply<M>(model: &mut M, order: &[usize], strategy: Strategy) -> Result<SortStats, SortError>
where
    M: ListModel + ?Sized,
{
    let len = model.count();
    validate_permutation(order, len)?;

    let displaced = order.iter().enumerate().filter(|&(i, &o)| i != o).count();
    let mut stats = SortStats {
        len,
        displaced,
        ..SortStats::default()
    };

    log::debug!("sorting {len} items ({displaced} displaced) with {strategy:?}");
    if displaced == 0 {
        return Ok(stats);
    }

    match strategy {
        Strategy::CloneSwap => apply_swaps(model, order, &mut stats)?,
        Strategy::MinimalMove => apply_moves(model, order, &mut stats)?,
    }

    log::debug!(
        "sort finished: {} swaps, {} moves",
        stats.swaps,
        stats.moves
    );
    Ok(stats)
}

fn validate_permutation(order: &[usize], len: usize) -> Result<(), SortError> {
    let invalid = |reason: String| SortError::InvalidPermutation { len, reason };

    if order.len() != len {
        return Err(invalid(format!("expected {len} entries, got {}", order.len())));
    }

    let mut seen = vec![false; len];
    for &o in order {
        match seen.get_mut(o) {
            None => return Err(invalid(format!("entry {o} out of range"))),
            Some(true) => return Err(invalid(format!("entry {o} repeated"))),
            Some(slot) => *slot = true,
        }
    }
    Ok(())
}

/// Live bookkeeping of where every original item currently sits.
///
/// `at[p]` is the original index of the item at physical position `p` and `pos[o]` is the
/// physical position of original item `o`. Both are updated after every physical operation.
#[derive(Debug)]
struct Tracker {
    at: Vec<usize>,
    pos: Vec<usize>,
}

impl Tracker {
    fn identity(len: usize) -> Self {
        Self {
            at: (0..len).collect(),
            pos: (0..len).collect(),
        }
    }

    #[inline]
    fn position_of(&self, original: usize) -> usize {
        self.pos[original]
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.at.swap(a, b);
        self.pos[self.at[a]] = a;
        self.pos[self.at[b]] = b;
    }
}

/// Clone-swap execution.
///
/// For each position `i` in ascending order, the item that belongs there is found through the
/// tracker and swapped in. This walks every permutation cycle from its lowest index; a cycle of
/// length `k` costs `k - 1` swaps.
fn apply_swaps<M>(model: &mut M, order: &[usize], stats: &mut SortStats) -> Result<(), SortError>
where
    M: ListModel + ?Sized,
{
    let mut tracker = Tracker::identity(order.len());

    for (dest, &wanted) in order.iter().enumerate() {
        let src = tracker.position_of(wanted);
        if src == dest {
            continue;
        }

        log::trace!("swap {src} <-> {dest}");
        swap_records(model, src, dest)?;
        tracker.swap(src, dest);
        stats.swaps += 1;
    }
    Ok(())
}

/// Exchanges two records through `get`/`set`.
///
/// The record at `src` is extracted, the destination's record is written to `src`, then the
/// extracted record is written to `dest`. If the last write fails, `src` is restored so no item
/// is duplicated.
fn swap_records<M>(model: &mut M, src: usize, dest: usize) -> Result<(), SortError>
where
    M: ListModel + ?Sized,
{
    let extracted = model.get(src)?;
    let prior = model.get(dest)?;
    model.set(src, prior)?;

    if let Err(err) = model.set(dest, extracted.clone()) {
        log::warn!("write to {dest} failed ({err}), restoring {src}");
        if let Err(restore) = model.set(src, extracted) {
            log::warn!("restoring {src} failed: {restore}");
        }
        return Err(err.into());
    }
    Ok(())
}

/// Minimal-move execution.
///
/// Items on a longest increasing subsequence of target positions are already in the right
/// relative order and never move. Every other item, taken in ascending target position, is
/// moved to just after the item that precedes it in the final order (or to the front). Once
/// placed, nothing is inserted between an item and its predecessor, so the model ends sorted
/// after exactly `N - LIS` moves, which is the fewest single-row moves that can sort it.
fn apply_moves<M>(model: &mut M, order: &[usize], stats: &mut SortStats) -> Result<(), SortError>
where
    M: ListModel + ?Sized,
{
    let len = order.len();
    let mut target = vec![0; len];
    for (i, &o) in order.iter().enumerate() {
        target[o] = i;
    }

    // Nothing has moved yet, so position and original index coincide here.
    let keep = longest_increasing(&target);
    let mut rows = MoveTracker::new(order, &keep);

    for &original in order {
        if keep[original] {
            continue;
        }

        let (from, to) = rows.relocate(original);
        if from == to {
            continue;
        }

        log::trace!("move {from} -> {to}");
        model.move_rows(from, to, 1)?;
        stats.moves += 1;
    }
    Ok(())
}

/// Live positions for the minimal-move executor.
///
/// Every item owns two fixed slots in one total order: its home slot `(index + 1, 0)` and the
/// slot it is moved to, `(anchor, rank + 1)`, where `anchor` is the home coordinate of the
/// nearest kept item ranked below it (`0` when there is none, i.e. the front). Kept items never
/// move and a moved item sits right after its final predecessor, so sorting the slots
/// reproduces the model's current order at every step. A Fenwick tree counts occupied slots,
/// turning "current position" into a prefix sum: O(log N) per move.
#[derive(Debug)]
struct MoveTracker {
    home: Vec<usize>,
    placed: Vec<usize>,
    occupied: Fenwick,
}

impl MoveTracker {
    fn new(order: &[usize], keep: &[bool]) -> Self {
        let len = order.len();
        let mut slots: Vec<((usize, usize), usize, bool)> = Vec::with_capacity(2 * len);
        slots.extend((0..len).map(|original| ((original + 1, 0), original, false)));

        let mut anchor = 0;
        for (rank, &original) in order.iter().enumerate() {
            if keep[original] {
                anchor = original + 1;
            } else {
                slots.push(((anchor, rank + 1), original, true));
            }
        }
        slots.sort_unstable_by_key(|&(coord, _, _)| coord);

        let mut home = vec![0; len];
        let mut placed = vec![0; len];
        for (slot, &(_, original, is_placed)) in slots.iter().enumerate() {
            if is_placed {
                placed[original] = slot;
            } else {
                home[original] = slot;
            }
        }

        let mut occupied = Fenwick::new(slots.len());
        home.iter().for_each(|&slot| occupied.add(slot, 1));

        Self {
            home,
            placed,
            occupied,
        }
    }

    /// Takes `original` out of its home slot and into its placed slot.
    ///
    /// Returns `(from, to)` in `move_rows` terms: `to` is counted after the removal.
    fn relocate(&mut self, original: usize) -> (usize, usize) {
        let from = self.occupied.before(self.home[original]);
        self.occupied.add(self.home[original], -1);
        let to = self.occupied.before(self.placed[original]);
        self.occupied.add(self.placed[original], 1);
        (from, to)
    }
}

/// Binary indexed tree of slot occupancy.
#[derive(Debug)]
struct Fenwick {
    tree: Vec<isize>,
}

impl Fenwick {
    fn new(len: usize) -> Self {
        Self {
            tree: vec![0; len + 1],
        }
    }

    fn add(&mut self, slot: usize, delta: isize) {
        let mut i = slot + 1;
        while i < self.tree.len() {
            self.tree[i] += delta;
            i += i & i.wrapping_neg();
        }
    }

    /// Number of occupied slots strictly before `slot`.
    fn before(&self, slot: usize) -> usize {
        let mut i = slot;
        let mut sum = 0;
        while i > 0 {
            sum += self.tree[i];
            i -= i & i.wrapping_neg();
        }
        sum as usize
    }
}

/// Marks the members of one longest strictly increasing subsequence of `seq`.
///
/// Patience sorting: `tails[k]` holds the index of the smallest possible tail of an increasing
/// run of length `k + 1`, and `prev` links each element to its predecessor in that run.
fn longest_increasing(seq: &[usize]) -> Vec<bool> {
    let mut tails: Vec<usize> = Vec::new();
    let mut prev: Vec<Option<usize>> = vec![None; seq.len()];

    for (i, &value) in seq.iter().enumerate() {
        let slot = tails.partition_point(|&t| seq[t] < value);
        if slot > 0 {
            prev[i] = Some(tails[slot - 1]);
        }
        if slot == tails.len() {
            tails.push(i);
        } else {
            tails[slot] = i;
        }
    }

    let mut keep = vec![false; seq.len()];
    let mut cursor = tails.last().copied();
    while let Some(i) = cursor {
        keep[i] = true;
        cursor = prev[i];
    }
    keep
}
