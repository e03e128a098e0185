use std::borrow::Borrow;
use std::fmt::{self, Debug, Formatter};
use std::hash::Hash;
use std::marker::PhantomData;

use log::{debug, trace};
use rustc_hash::FxHashMap;

use crate::error::CycleDetected;
use crate::rule::Rule;
use crate::slot::Slot;

/// Maps every requested key to its state.
pub type Table<K, V> = FxHashMap<K, Slot<V>>;

/// Construction-time settings of a [`Memo`].
///
/// Options are fixed for the lifetime of the memo.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Options {
    permit_cycles: bool,
}

impl Options {
    /// The default options: cycles are an error.
    pub const fn new() -> Self {
        Self { permit_cycles: false }
    }

    /// Whether a reentrant lookup yields [`Slot::InProgress`] instead of
    /// failing with [`CycleDetected`].
    pub const fn permit_cycles(mut self, permit: bool) -> Self {
        self.permit_cycles = permit;
        self
    }

    /// Whether cycles are permitted.
    pub const fn permits_cycles(&self) -> bool {
        self.permit_cycles
    }
}

/// A lazily evaluated, memoizing recursive function.
///
/// The memo behaves like a map from keys to values whose entries are computed
/// by a [`Rule`] the first time they are requested. The rule may itself look
/// up further keys, so a whole dependency chain is resolved on demand and
/// each key is computed at most once.
///
/// A key that is requested while its own computation is still running forms
/// a cycle. By default, this fails with [`CycleDetected`]. With
/// [`Options::permit_cycles`], the reentrant lookup instead yields
/// [`Slot::InProgress`] and the rule decides how to carry on.
///
/// If the rule fails for a key, the key stays in progress for good: later
/// lookups report a cycle (or `InProgress`) instead of running the rule
/// again.
///
/// The memo is single-threaded. Share it across threads only behind a lock
/// that wraps every lookup.
pub struct Memo<K, V, R, E = CycleDetected<K>> {
    /// The computation rule.
    rule: R,
    /// The state of all requested keys.
    table: Table<K, V>,
    /// Fixed at construction.
    options: Options,
    marker: PhantomData<fn() -> E>,
}

impl<K, V, R, E> Memo<K, V, R, E>
where
    R: Rule<K, V, E>,
{
    /// Create an empty memo that rejects cycles.
    pub fn new(rule: R) -> Self {
        Self::with_options(rule, Options::new())
    }

    /// Create an empty memo with the given options.
    pub fn with_options(rule: R, options: Options) -> Self {
        Self {
            rule,
            table: Table::default(),
            options,
            marker: PhantomData,
        }
    }
}

impl<K, V, E, F> Memo<K, V, F, E>
where
    F: Fn(&K, &mut Resolver<'_, K, V, E>) -> Result<V, E>,
{
    /// Create an empty memo that rejects cycles from a function or closure.
    ///
    /// Unlike [`new`](Self::new), this guides type inference for closures
    /// whose parameters are not annotated.
    pub fn from_fn(f: F) -> Self {
        Self::new(f)
    }
}

impl<K, V, R, E> Memo<K, V, R, E>
where
    K: Debug + Clone + Eq + Hash,
    V: Clone,
    R: Rule<K, V, E>,
    E: From<CycleDetected<K>>,
{
    /// Create a memo and resolve all `keys` right away, in order.
    ///
    /// Fails with the first error of any of the lookups.
    pub fn with_keys<I>(rule: R, keys: I, options: Options) -> Result<Self, E>
    where
        I: IntoIterator<Item = K>,
    {
        let mut memo = Self::with_options(rule, options);
        memo.resolve_all(keys)?;
        Ok(memo)
    }

    /// Look up the value for `key`, computing it on first request.
    ///
    /// - A resolved key returns its cached value.
    /// - A key whose computation is still running returns
    ///   [`Slot::InProgress`] if cycles are permitted and fails with
    ///   [`CycleDetected`] otherwise.
    /// - Any other key is marked in progress, computed by the rule and
    ///   cached. Errors of the rule are returned unchanged.
    pub fn lookup(&mut self, key: K) -> Result<Slot<V>, E> {
        self.resolver().lookup(key)
    }

    /// Look up the value for `key`, treating an in-progress key as a cycle.
    pub fn get(&mut self, key: K) -> Result<V, E> {
        self.resolver().get(key)
    }

    /// Resolve all `keys` in order.
    pub fn resolve_all<I>(&mut self, keys: I) -> Result<(), E>
    where
        I: IntoIterator<Item = K>,
    {
        let mut resolver = self.resolver();
        for key in keys {
            resolver.lookup(key)?;
        }
        Ok(())
    }

    /// A resolver over this memo's table.
    fn resolver(&mut self) -> Resolver<'_, K, V, E> {
        Resolver {
            rule: &self.rule,
            table: &mut self.table,
            options: self.options,
        }
    }
}

impl<K, V, R, E> Memo<K, V, R, E> {
    /// The table of all requested keys.
    ///
    /// This is for inspection only and never triggers a computation.
    pub fn snapshot(&self) -> &Table<K, V> {
        &self.table
    }

    /// The state of a single key, without computing it.
    ///
    /// Returns `None` if the key was never requested.
    pub fn peek<Q>(&self, key: &Q) -> Option<&Slot<V>>
    where
        K: Borrow<Q> + Eq + Hash,
        Q: Hash + Eq + ?Sized,
    {
        self.table.get(key)
    }

    /// Iterate over all resolved keys and their values.
    pub fn resolved(&self) -> impl Iterator<Item = (&K, &V)> {
        self.table.iter().filter_map(|(key, slot)| match slot {
            Slot::Resolved(value) => Some((key, value)),
            Slot::InProgress => None,
        })
    }

    /// The number of keys that were requested so far.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether no key was requested so far.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// The options the memo was created with.
    pub fn options(&self) -> Options {
        self.options
    }

    /// Whether reentrant lookups yield [`Slot::InProgress`].
    pub fn permits_cycles(&self) -> bool {
        self.options.permit_cycles
    }

    /// The computation rule.
    pub fn rule(&self) -> &R {
        &self.rule
    }

    /// Consume the memo and return its table.
    pub fn into_table(self) -> Table<K, V> {
        self.table
    }
}

impl<K, V, R, E> Debug for Memo<K, V, R, E>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("Memo")
            .field("table", &self.table)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Gives a [`Rule`] access to the memo it is computing for.
///
/// The resolver exposes the same lookups as the [`Memo`] itself, so a rule
/// can recurse into other keys.
pub struct Resolver<'a, K, V, E = CycleDetected<K>> {
    rule: &'a dyn Rule<K, V, E>,
    table: &'a mut Table<K, V>,
    options: Options,
}

impl<K, V, E> Resolver<'_, K, V, E>
where
    K: Debug + Clone + Eq + Hash,
    V: Clone,
    E: From<CycleDetected<K>>,
{
    /// Look up the value for `key`, computing it on first request.
    ///
    /// See [`Memo::lookup`].
    pub fn lookup(&mut self, key: K) -> Result<Slot<V>, E> {
        match self.table.get(&key) {
            Some(Slot::Resolved(value)) => {
                trace!("memo hit: f({key:?})");
                #[cfg(feature = "testing")]
                crate::testing::register_hit();
                return Ok(Slot::Resolved(value.clone()));
            }
            Some(Slot::InProgress) if self.options.permit_cycles => {
                debug!("memo: tolerating reentrant lookup of f({key:?})");
                #[cfg(feature = "testing")]
                crate::testing::register_hit();
                return Ok(Slot::InProgress);
            }
            Some(Slot::InProgress) => {
                debug!("memo: f({key:?}) depends on itself");
                return Err(CycleDetected::new(key).into());
            }
            None => {}
        }

        trace!("memo miss: f({key:?})");
        self.table.insert(key.clone(), Slot::InProgress);

        // The rule gets a reborrow of this resolver so that it can recurse.
        let rule = self.rule;
        let value = match rule.compute(&key, self) {
            Ok(value) => value,
            Err(err) => {
                debug!("memo: computing f({key:?}) failed, key stays in progress");
                return Err(err);
            }
        };

        self.table.insert(key, Slot::Resolved(value.clone()));

        #[cfg(feature = "testing")]
        crate::testing::register_miss();

        Ok(Slot::Resolved(value))
    }

    /// Look up the value for `key`, treating an in-progress key as a cycle.
    ///
    /// Useful for rules of memos that reject cycles anyway, where
    /// [`Slot::InProgress`] can't occur.
    pub fn get(&mut self, key: K) -> Result<V, E> {
        match self.lookup(key.clone())? {
            Slot::Resolved(value) => Ok(value),
            Slot::InProgress => Err(CycleDetected::new(key).into()),
        }
    }
}

impl<K, V, E> Resolver<'_, K, V, E> {
    /// The table of all requested keys so far.
    pub fn snapshot(&self) -> &Table<K, V> {
        self.table
    }

    /// The state of a single key, without computing it.
    pub fn peek<Q>(&self, key: &Q) -> Option<&Slot<V>>
    where
        K: Borrow<Q> + Eq + Hash,
        Q: Hash + Eq + ?Sized,
    {
        self.table.get(key)
    }

    /// Whether reentrant lookups yield [`Slot::InProgress`].
    pub fn permits_cycles(&self) -> bool {
        self.options.permit_cycles
    }
}

impl<K, V, E> Debug for Resolver<'_, K, V, E>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("table", &self.table)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
