use std::cell::Cell;

thread_local! {
    /// Whether the last lookup on this thread was answered without running
    /// a rule.
    static LAST_WAS_HIT: Cell<bool> = const { Cell::new(false) };
}

/// Whether the last lookup was a hit.
///
/// Nested lookups overwrite each other, so after an outer lookup returns this
/// reflects the outer one.
pub fn last_was_hit() -> bool {
    LAST_WAS_HIT.with(|cell| cell.get())
}

/// Marks the last lookup as a cache hit.
pub(crate) fn register_hit() {
    LAST_WAS_HIT.with(|cell| cell.set(true))
}

/// Marks the last lookup as a cache miss.
pub(crate) fn register_miss() {
    LAST_WAS_HIT.with(|cell| cell.set(false))
}
