//! Single-instance lifecycle holders and the singletons built on them.
//!
//! | Holder | Built | Concurrent first access |
//! |---|---|---|
//! | [`UnguardedCell`] | on first `get` | may build more than once |
//! | [`DoubleCheckedCell`] | on first `get` | builds exactly once |
//! | [`EagerCell`] | at compile time | nothing to race on |

pub mod cells;
pub mod instances;

pub use cells::{DoubleCheckedCell, EagerCell, UnguardedCell};
pub use instances::{EagerSingleton, LazySingleton, LazySyncSingleton};
