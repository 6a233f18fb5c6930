//! Lazily materialized key/value containers with convention-driven method
//! dispatch, and a flattener that turns nested values into path-keyed pairs.
//!
//! ```
//! use indexmap::IndexMap;
//! use lazy_iteration::{Lazy, Value};
//!
//! let lazy = Lazy::infallible(|| {
//!     let mut entries = IndexMap::new();
//!     entries.insert("getName".to_string(), Value::callable(|_| "lazy".into()));
//!     entries
//! });
//!
//! assert_eq!(Ok(Some(Value::from("lazy"))), lazy.call("name", &[]));
//! ```

#[macro_use]
extern crate log;

use indexmap::IndexMap;
use std::hash::Hash;

mod dispatch;
#[cfg(feature = "json")]
mod error;
mod flatten;
#[cfg(feature = "json")]
mod json;
mod lazy;
mod sync;
mod value;

pub use dispatch::{candidates, capitalize, dispatch, Invoke};
#[cfg(feature = "json")]
pub use error::{EncodeError, Result};
pub use flatten::{flatten, flatten_with, Associativity, Flatten, FlattenOptions, IsAssociative};
#[cfg(feature = "json")]
pub use json::{encode, EncodeOptions};
pub use lazy::{Lazy, LazyContainer};
pub use sync::LazySync;
pub use value::{AppendKey, Callable, Key, Value};

/// The materialized mapping a container memoizes.
pub type Entries<K, V> = IndexMap<K, V>;

pub trait Producer {
    type Key: Hash + Eq;
    type Value;
    type Error;

    fn produce(&self) -> std::result::Result<Entries<Self::Key, Self::Value>, Self::Error>;
}

impl<K: Hash + Eq, V, E, F: Fn() -> std::result::Result<Entries<K, V>, E>> Producer for F {
    type Key = K;
    type Value = V;
    type Error = E;

    fn produce(&self) -> std::result::Result<Entries<K, V>, E> {
        self()
    }
}

/// Adapts a producer that cannot fail.
pub struct Always<F>(pub F);

impl<K: Hash + Eq, V, F: Fn() -> Entries<K, V>> Producer for Always<F> {
    type Key = K;
    type Value = V;
    type Error = std::convert::Infallible;

    fn produce(&self) -> std::result::Result<Entries<K, V>, Self::Error> {
        Ok((self.0)())
    }
}

/// A write-once slot holding the memoized mapping.
///
/// A failed initialization leaves the slot empty so the next caller retries.
pub trait MemoSlot<T>: Default {
    fn get(&self) -> Option<&T>;

    fn get_or_try_init<E, F: FnOnce() -> std::result::Result<T, E>>(
        &self,
        init: F,
    ) -> std::result::Result<&T, E>;
}

/// Values that can stand for "no value" in existence checks.
pub trait Nullable {
    fn is_null(&self) -> bool;
}

impl<T> Nullable for Option<T> {
    fn is_null(&self) -> bool {
        self.is_none()
    }
}
