use super::*;
use once_cell::sync::OnceCell;

// Racing first demands block on the cell; only one of them runs the producer.
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

/// Container that can be shared across threads.
pub type LazySync<P> = LazyContainer<P, OnceCell<Entries<<P as Producer>::Key, <P as Producer>::Value>>>;
