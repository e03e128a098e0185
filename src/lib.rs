//! Lazily evaluated, memoizing recursive functions.
//!
//! A [`Memo`] models a function as a map from keys to values. Values are
//! computed on first request by a user-supplied [`Rule`], which may request
//! further keys from the same memo, and are cached from then on.
//!
//! ```
//! use recmemo::{CycleDetected, Memo, Resolver, Slot};
//!
//! fn factorial(n: &u64, memo: &mut Resolver<u64, u64>) -> Result<u64, CycleDetected<u64>> {
//!     Ok(if *n == 0 { 1 } else { n * memo.get(n - 1)? })
//! }
//!
//! let mut memo = Memo::from_fn(factorial);
//! assert_eq!(memo.lookup(4), Ok(Slot::Resolved(24)));
//! assert_eq!(memo.peek(&2), Some(&Slot::Resolved(2)));
//! ```
//!
//! A rule that reaches a key whose computation is still running forms a
//! cycle. This fails with [`CycleDetected`] unless the memo was created with
//! [`Options::permit_cycles`], in which case the reentrant lookup yields
//! [`Slot::InProgress`].

mod error;
mod memo;
mod rule;
mod slot;
#[cfg(feature = "testing")]
mod testing;

pub use crate::error::CycleDetected;
pub use crate::memo::{Memo, Options, Resolver, Table};
pub use crate::rule::Rule;
pub use crate::slot::Slot;

/// These are implementation details. Do not rely on them!
#[doc(hidden)]
pub mod internal {
    #[cfg(feature = "testing")]
    pub use crate::testing::last_was_hit;
}
