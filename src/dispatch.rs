//! Method-style access resolved against a mapping of names to invocable values.
//!
//! A name resolves to the first invocable entry among `name`, `getName`,
//! `isName` and `hasName`, in that order. Anything else, including an entry
//! that exists but cannot be invoked, resolves to nothing.

use super::*;

/// Capability of a mapping value to be called with positional arguments.
pub trait Invoke {
    type Args: ?Sized;
    type Output;

    /// Calls the value, or returns `None` if it is not invocable.
    fn invoke(&self, args: &Self::Args) -> Option<Self::Output>;
}

impl Invoke for Value {
    type Args = [Value];
    type Output = Value;

    fn invoke(&self, args: &[Value]) -> Option<Value> {
        self.as_callable().map(|f| f.call(args))
    }
}

impl Invoke for Callable {
    type Args = [Value];
    type Output = Value;

    fn invoke(&self, args: &[Value]) -> Option<Value> {
        Some(self.call(args))
    }
}

/// Uppercases the first character if it is an ASCII letter.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => {
            let mut capitalized = String::with_capacity(name.len());
            capitalized.push(first.to_ascii_uppercase());
            capitalized.push_str(chars.as_str());
            capitalized
        }
        None => String::new(),
    }
}

/// Entry names tried for `name`, highest priority first.
pub fn candidates(name: &str) -> [String; 4] {
    let capitalized = capitalize(name);
    [
        name.to_owned(),
        format!("get{}", capitalized),
        format!("is{}", capitalized),
        format!("has{}", capitalized),
    ]
}

pub fn dispatch<K, V>(entries: &Entries<K, V>, name: &str, args: &V::Args) -> Option<V::Output>
    where K: Hash + Eq + From<String>, V: Invoke
{
    for candidate in candidates(name) {
        let value = match entries.get(&K::from(candidate.clone())) {
            Some(value) => value,
            None => continue,
        };
        if let Some(output) = value.invoke(args) {
            trace!("dispatched `{}` to `{}`", name, candidate);
            return Some(output);
        }
    }
    debug!("no invocable entry for `{}`", name);
    None
}

impl<P, S> LazyContainer<P, S>
    where P: Producer, P::Key: From<String>, P::Value: Invoke, S: MemoSlot<Entries<P::Key, P::Value>>
{
    /// Resolves `name` by the getter/isser/hasser convention and invokes it.
    pub fn call(
        &self,
        name: &str,
        args: &<P::Value as Invoke>::Args,
    ) -> std::result::Result<Option<<P::Value as Invoke>::Output>, P::Error> {
        Ok(dispatch(self.entries()?, name, args))
    }
}
