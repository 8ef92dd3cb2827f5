//! An ordered set of integers backed by a doubly linked skip list.
//!
//! The purpose of this crate is to provide a small, predictable skip list: the maximum height is
//! fixed up front, node heights come from a seeded [HeightSource], and every search reports how
//! many jumps it took so the logarithmic behaviour can be measured.
//!
//! ```
//! use skipset::SkipList;
//!
//! let mut list = SkipList::new(4).unwrap();
//!
//! for value in [10, 5, 20, 5] {
//!     list.insert(value);
//! }
//!
//! assert_eq!(list.len(), 3);
//! assert_eq!(list.ith(1), Ok(10));
//! assert!(list.search(20).found);
//!
//! list.remove(10);
//! assert_eq!(list.iter().rev().collect::<Vec<_>>(), vec![20, 5]);
//! ```
#![warn(
    // missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
pub mod driver;
mod error;
pub mod height;
mod internal;
pub mod skiplist;

pub use error::{Result, SkipListError};
pub use height::{HeightSource, SeededHeights, DEFAULT_SEED};
pub use skiplist::{Cursor, Direction, Iter, Search, SkipList, DEFAULT_MAX_HEIGHT};
