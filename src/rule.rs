use crate::error::CycleDetected;
use crate::memo::Resolver;

/// The computation behind a memoized recursive function.
///
/// A rule maps a key to its value and may look up other keys, including ones
/// that lead back to `key` itself, through the given [`Resolver`]. Every key
/// is computed at most once per [`Memo`](crate::Memo).
///
/// This is implemented for all functions and closures with a matching
/// signature, so a dedicated type is only needed when the rule carries state.
///
/// ```
/// use recmemo::{CycleDetected, Memo, Resolver};
///
/// fn factorial(n: &u64, memo: &mut Resolver<u64, u64>) -> Result<u64, CycleDetected<u64>> {
///     Ok(if *n == 0 { 1 } else { n * memo.get(n - 1)? })
/// }
///
/// let mut memo = Memo::from_fn(factorial);
/// assert_eq!(memo.get(4), Ok(24));
/// ```
pub trait Rule<K, V, E = CycleDetected<K>> {
    /// Compute the value for `key`.
    ///
    /// Errors are handed back to the caller of the lookup unchanged. The key
    /// then stays in progress for the rest of the memo's lifetime.
    fn compute(&self, key: &K, memo: &mut Resolver<'_, K, V, E>) -> Result<V, E>;
}

impl<K, V, E, F> Rule<K, V, E> for F
where
    F: Fn(&K, &mut Resolver<'_, K, V, E>) -> Result<V, E>,
{
    #[inline]
    fn compute(&self, key: &K, memo: &mut Resolver<'_, K, V, E>) -> Result<V, E> {
        self(key, memo)
    }
}
