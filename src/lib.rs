//! # modelsort
//!
//! `modelsort` sorts list models in place: indexable sequences that are owned by someone else
//! (typically a UI view's data model) and can only be touched through a handful of primitives.
//!
//! The sort never takes the data out of the model. It reads every key once, computes a stable
//! target order, then rearranges the model through its own `set` or `move_rows` primitives so
//! that observers of the model see each step.
//!
//! ## Key Features
//!
//! - **Stable**: items with equal keys keep their relative order, in both directions.
//! - **Two execution strategies**: [`Strategy::CloneSwap`] swaps whole records via `get`/`set`;
//!   [`Strategy::MinimalMove`] relocates rows via `move_rows` and issues the fewest moves
//!   possible, so views receive coherent "row moved" notifications instead of a storm of
//!   "row changed" ones.
//! - **No work on sorted input**: an already-sorted model receives no mutating calls at all.
//! - **Fail fast**: missing or incomparable keys are reported before the model is touched.
//!
//! ## Usage
//!
//! ### Dynamic rows
//!
//! ```rust
//! use modelsort::prelude::*;
//! use modelsort::value::{row, Value};
//!
//! let mut model = VecModel::from(vec![
//!     row([("k", Value::from(3))]),
//!     row([("k", Value::from(1))]),
//!     row([("k", Value::from(2))]),
//! ]);
//!
//! let stats = sort_model(&mut model, &SortOptions::new("k").with_strategy(Strategy::MinimalMove))
//!     .unwrap();
//!
//! let keys: Vec<String> = model.as_slice().iter().map(|r| r["k"].to_string()).collect();
//! assert_eq!(keys, vec!["1", "2", "3"]);
//! assert_eq!(model.counts().sets, 0);
//! assert_eq!(stats.moves, 1);
//! ```
//!
//! ### Custom models
//!
//! Implement [`ListModel`] for your own container and [`Record`] for its items, or use
//! [`sort_model_by`] with a key closure.
//!
//! ## Performance Characteristics
//!
//! - **Planning**: one `get` per item and an O(N log N) stable sort of indices.
//! - **Clone-swap**: at most N - 1 swaps (a cycle of length k costs k - 1).
//! - **Minimal-move**: exactly N - LIS moves, where LIS is the longest run of items already in
//!   the right relative order. Position bookkeeping costs O(log N) per move.

pub mod algo;
pub mod core;
pub mod error;
pub mod model;
pub mod value;

pub use crate::algo::{apply, is_sorted_by_field, plan, plan_by, sort, sort_model, sort_model_by};
pub use crate::core::{Direction, ListModel, Record, SortOptions, SortStats, Strategy};
pub use crate::error::{ModelError, SortError};

pub mod prelude {
    pub use crate::algo::{sort, sort_model, sort_model_by};
    pub use crate::core::{Direction, ListModel, Record, SortOptions, SortStats, Strategy};
    pub use crate::error::{ModelError, SortError};
    pub use crate::model::VecModel;
    pub use crate::value::{Row, Value};
}
