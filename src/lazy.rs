use super::*;
use indexmap::Equivalent;
use once_cell::unsync::OnceCell;
use std::fmt;

impl<T> MemoSlot<T> for OnceCell<T> {
    fn get(&self) -> Option<&T> {
        OnceCell::get(self)
    }

    fn get_or_try_init<E, F: FnOnce() -> std::result::Result<T, E>>(
        &self,
        init: F,
    ) -> std::result::Result<&T, E> {
        OnceCell::get_or_try_init(self, init)
    }
}

/// A key/value container whose entries are produced on first demand and
/// memoized for the container's lifetime.
///
/// Every operation routes through [`LazyContainer::entries`], so the
/// producer runs at most once per successful resolution. A producer error is
/// handed back to whichever operation triggered it and is not remembered.
///
/// Writes ([`set`](Self::set), [`push`](Self::push), [`unset`](Self::unset))
/// never touch the memo: they return a modified copy and leave the container
/// as it was.
pub struct LazyContainer<P: Producer, S> {
    producer: P,
    memo: S,
}

/// Single-threaded container.
pub type Lazy<P> = LazyContainer<P, OnceCell<Entries<<P as Producer>::Key, <P as Producer>::Value>>>;

impl<P, S> LazyContainer<P, S>
    where P: Producer, S: MemoSlot<Entries<P::Key, P::Value>>
{
    pub fn new(producer: P) -> Self {
        LazyContainer { producer, memo: S::default() }
    }

    /// Resolves the container, invoking the producer if nothing is memoized yet.
    pub fn entries(&self) -> std::result::Result<&Entries<P::Key, P::Value>, P::Error> {
        self.memo.get_or_try_init(|| {
            let entries = self.producer.produce().map_err(|err| {
                debug!("producer failed, container left unresolved");
                err
            })?;
            trace!("materialized lazy container with {} entries", entries.len());
            Ok(entries)
        })
    }

    pub fn is_resolved(&self) -> bool {
        self.memo.get().is_some()
    }

    pub fn len(&self) -> std::result::Result<usize, P::Error> {
        Ok(self.entries()?.len())
    }

    pub fn is_empty(&self) -> std::result::Result<bool, P::Error> {
        Ok(self.entries()?.is_empty())
    }

    pub fn iter(&self) -> std::result::Result<indexmap::map::Iter<'_, P::Key, P::Value>, P::Error> {
        Ok(self.entries()?.iter())
    }

    pub fn get<Q>(&self, key: &Q) -> std::result::Result<Option<&P::Value>, P::Error>
        where Q: ?Sized + Hash + Equivalent<P::Key>
    {
        Ok(self.entries()?.get(key))
    }

    /// True when `key` is present and its value is not null.
    pub fn contains<Q>(&self, key: &Q) -> std::result::Result<bool, P::Error>
        where Q: ?Sized + Hash + Equivalent<P::Key>, P::Value: Nullable
    {
        Ok(self.entries()?.get(key).map_or(false, |value| !value.is_null()))
    }

    /// Returns a copy of the entries with `key` set to `value`.
    pub fn set(&self, key: P::Key, value: P::Value) -> std::result::Result<Entries<P::Key, P::Value>, P::Error>
        where P::Key: Clone, P::Value: Clone
    {
        let mut copy = self.entries()?.clone();
        copy.insert(key, value);
        Ok(copy)
    }

    /// Returns a copy of the entries with `value` appended under the next index.
    pub fn push(&self, value: P::Value) -> std::result::Result<Entries<P::Key, P::Value>, P::Error>
        where P::Key: AppendKey + Clone, P::Value: Clone
    {
        let mut copy = self.entries()?.clone();
        let key = <P::Key as AppendKey>::next_after(copy.keys());
        copy.insert(key, value);
        Ok(copy)
    }

    /// Returns a copy of the entries without `key`.
    pub fn unset<Q>(&self, key: &Q) -> std::result::Result<Entries<P::Key, P::Value>, P::Error>
        where Q: ?Sized + Hash + Equivalent<P::Key>, P::Key: Clone, P::Value: Clone
    {
        let mut copy = self.entries()?.clone();
        copy.shift_remove(key);
        Ok(copy)
    }
}

impl<F, K, V, S> LazyContainer<Always<F>, S>
    where F: Fn() -> Entries<K, V>, K: Hash + Eq, S: MemoSlot<Entries<K, V>>
{
    pub fn infallible(producer: F) -> Self {
        Self::new(Always(producer))
    }
}

impl<P, S> fmt::Debug for LazyContainer<P, S>
    where P: Producer, P::Key: fmt::Debug, P::Value: fmt::Debug, S: MemoSlot<Entries<P::Key, P::Value>>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyContainer")
            .field("memo", &self.memo.get())
            .finish()
    }
}
