//! SeaORM entities backing the board.
//!
//! A [`collection`] owns zero or more [`task`]s. Both carry the owning
//! principal id in `user_id`, and every mutation filters on it.

pub mod collection;
pub mod task;

pub use collection::CollectionColor;
