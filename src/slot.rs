/// The state of a key that has been requested at least once.
///
/// Keys that were never requested have no slot at all. A slot starts out as
/// [`InProgress`](Slot::InProgress) when its computation begins and becomes
/// [`Resolved`](Slot::Resolved) once the rule returns. It never goes back.
///
/// `InProgress` doubles as the "not yet available" answer that a lookup gives
/// for a reentrant request when cycles are permitted.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Slot<V> {
    /// The key's computation has started but not returned (or failed).
    InProgress,
    /// The key's value has been computed and is cached.
    Resolved(V),
}

impl<V> Slot<V> {
    /// Whether the value is available.
    #[inline]
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// Whether the key is still being computed.
    #[inline]
    pub fn is_in_progress(&self) -> bool {
        matches!(self, Self::InProgress)
    }

    /// The resolved value, if any.
    #[inline]
    pub fn resolved(self) -> Option<V> {
        match self {
            Self::Resolved(value) => Some(value),
            Self::InProgress => None,
        }
    }

    /// Borrow the resolved value.
    #[inline]
    pub fn as_ref(&self) -> Slot<&V> {
        match self {
            Self::Resolved(value) => Slot::Resolved(value),
            Self::InProgress => Slot::InProgress,
        }
    }

    /// Map the resolved value, keeping `InProgress` as is.
    #[inline]
    pub fn map<U>(self, f: impl FnOnce(V) -> U) -> Slot<U> {
        match self {
            Self::Resolved(value) => Slot::Resolved(f(value)),
            Self::InProgress => Slot::InProgress,
        }
    }

    /// The resolved value or a fallback for an in-progress key.
    ///
    /// Handy inside cycle-tolerant rules, which typically treat a reentrant
    /// key as contributing nothing.
    #[inline]
    pub fn unwrap_or(self, default: V) -> V {
        self.resolved().unwrap_or(default)
    }
}

impl<V: Clone> Slot<&V> {
    /// Clone the borrowed value.
    #[inline]
    pub fn cloned(self) -> Slot<V> {
        self.map(Clone::clone)
    }
}

impl<V> From<Option<V>> for Slot<V> {
    fn from(value: Option<V>) -> Self {
        value.map_or(Self::InProgress, Self::Resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_states() {
        let pending: Slot<u32> = Slot::InProgress;
        assert!(pending.is_in_progress());
        assert!(!pending.is_resolved());
        assert_eq!(pending.resolved(), None);
        assert_eq!(pending.unwrap_or(7), 7);

        let done = Slot::Resolved(3);
        assert!(done.is_resolved());
        assert_eq!(done.as_ref().cloned(), Slot::Resolved(3));
        assert_eq!(done.map(|v| v * 2), Slot::Resolved(6));
        assert_eq!(done.resolved(), Some(3));
    }

    #[test]
    fn test_slot_holds_options() {
        // A value that is itself "absent" is still a resolved value.
        let slot: Slot<Option<u8>> = Slot::Resolved(None);
        assert!(slot.is_resolved());
        assert_eq!(slot.resolved(), Some(None));
        assert_eq!(Slot::from(None::<u8>), Slot::InProgress);
    }
}
