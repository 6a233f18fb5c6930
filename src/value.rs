use super::*;
use std::fmt;
use std::sync::Arc;

/// A mapping key: an integer or a string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Int(i64),
    Str(String),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(i) => write!(f, "{}", i),
            Key::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Int(i)
    }
}

impl From<i32> for Key {
    fn from(i: i32) -> Self {
        Key::Int(i64::from(i))
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Str(s.to_owned())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Str(s)
    }
}

/// Keys that can pick the slot for an appended value.
pub trait AppendKey: Sized {
    fn next_after<'a, I>(keys: I) -> Self
        where I: Iterator<Item = &'a Self>, Self: 'a;
}

impl AppendKey for Key {
    /// One past the largest integer key, or 0 when there is none.
    fn next_after<'a, I>(keys: I) -> Self
        where I: Iterator<Item = &'a Self>
    {
        let next = keys
            .filter_map(|key| match key {
                Key::Int(i) => Some(*i),
                Key::Str(_) => None,
            })
            .max()
            .map_or(0, |max| max.saturating_add(1));
        Key::Int(next)
    }
}

impl AppendKey for i64 {
    fn next_after<'a, I>(keys: I) -> Self
        where I: Iterator<Item = &'a Self>
    {
        keys.max().map_or(0, |max| max.saturating_add(1))
    }
}

impl AppendKey for usize {
    fn next_after<'a, I>(keys: I) -> Self
        where I: Iterator<Item = &'a Self>
    {
        keys.max().map_or(0, |max| max.saturating_add(1))
    }
}

/// A value that can be invoked with positional arguments.
#[derive(Clone)]
pub struct Callable(Arc<dyn Fn(&[Value]) -> Value + Send + Sync>);

impl Callable {
    pub fn new<F>(f: F) -> Self
        where F: Fn(&[Value]) -> Value + Send + Sync + 'static
    {
        Callable(Arc::new(f))
    }

    pub fn call(&self, args: &[Value]) -> Value {
        (self.0)(args)
    }
}

impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callable(..)")
    }
}

/// A dynamically typed value, as held by containers and walked by the flattener.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Map(IndexMap<Key, Value>),
    Callable(Callable),
}

impl Value {
    pub fn callable<F>(f: F) -> Self
        where F: Fn(&[Value]) -> Value + Send + Sync + 'static
    {
        Value::Callable(Callable::new(f))
    }

    pub fn map<K: Into<Key>, V: Into<Value>, I: IntoIterator<Item = (K, V)>>(entries: I) -> Self {
        Value::Map(entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    pub fn list<V: Into<Value>, I: IntoIterator<Item = V>>(items: I) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// True for sequential collections: lists, and maps keyed exactly
    /// `0..n` in order (the empty map included).
    pub fn is_list(&self) -> bool {
        match self {
            Value::List(_) => true,
            Value::Map(map) => map
                .keys()
                .zip(0..)
                .all(|(key, index)| *key == Key::Int(index)),
            _ => false,
        }
    }

    pub fn as_callable(&self) -> Option<&Callable> {
        match self {
            Value::Callable(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::Int(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Float(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl Nullable for Value {
    fn is_null(&self) -> bool {
        Value::is_null(self)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(option: Option<T>) -> Self {
        option.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::list(items)
    }
}

impl From<IndexMap<Key, Value>> for Value {
    fn from(map: IndexMap<Key, Value>) -> Self {
        Value::Map(map)
    }
}

impl From<Callable> for Value {
    fn from(f: Callable) -> Self {
        Value::Callable(f)
    }
}
