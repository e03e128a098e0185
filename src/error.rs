use thiserror::Error;

/// A key was requested again while its own computation was still running.
///
/// Raised by [`lookup`](crate::Memo::lookup) when cycles are not permitted.
/// Rules that can fail in other ways make their error type convertible from
/// this one, so that a cycle deep inside a recursion surfaces through `?` as
/// the rule's own error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cycle detected when computing function: f({key:?}) depends on itself")]
pub struct CycleDetected<K> {
    /// The key that depends on itself.
    pub key: K,
}

impl<K> CycleDetected<K> {
    /// Create the error for a key.
    pub fn new(key: K) -> Self {
        Self { key }
    }

    /// Return the offending key.
    pub fn into_key(self) -> K {
        self.key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_message() {
        let err = CycleDetected::new("alpha");
        assert_eq!(
            err.to_string(),
            "cycle detected when computing function: f(\"alpha\") depends on itself",
        );
        assert_eq!(err.into_key(), "alpha");
    }
}
