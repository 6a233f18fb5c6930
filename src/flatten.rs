//! Flattening of nested values into `(path, value)` pairs.
//!
//! Traversal is depth-first over an explicit stack of frames, so the amount
//! of nesting is bounded by memory rather than by the call stack. Values
//! cannot form cycles, but an unbounded `max_depth` over a very deep value
//! still keeps one frame alive per level.

use super::*;
use std::iter::{Enumerate, FusedIterator};
use std::slice;

/// Decides whether a value is descended into or emitted as a leaf.
pub trait Associativity {
    fn is_associative(&self, value: &Value, allow_list: bool) -> bool;
}

impl<F: Fn(&Value, bool) -> bool> Associativity for F {
    fn is_associative(&self, value: &Value, allow_list: bool) -> bool {
        self(value, allow_list)
    }
}

/// Maps are associative unless they are list-shaped; lists only when
/// `allow_list` is set; everything else is a leaf.
#[derive(Clone, Copy, Debug, Default)]
pub struct IsAssociative;

impl Associativity for IsAssociative {
    fn is_associative(&self, value: &Value, allow_list: bool) -> bool {
        match value {
            Value::List(_) => allow_list,
            Value::Map(_) => allow_list || !value.is_list(),
            _ => false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct FlattenOptions {
    /// Path prefix for top level keys.
    pub base: String,
    pub separator: String,
    /// Emit only leaves, never the collections they were found in.
    pub only_deepest: bool,
    /// Depth of the top level.
    pub depth: usize,
    /// Levels deeper than this are not visited.
    pub max_depth: usize,
    /// Descend into list-shaped collections too.
    pub allow_list: bool,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        FlattenOptions {
            base: String::new(),
            separator: ".".to_owned(),
            only_deepest: false,
            depth: 0,
            max_depth: usize::MAX,
            allow_list: false,
        }
    }
}

impl FlattenOptions {
    pub fn base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }

    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn only_deepest(mut self, only_deepest: bool) -> Self {
        self.only_deepest = only_deepest;
        self
    }

    pub fn depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn allow_list(mut self, allow_list: bool) -> Self {
        self.allow_list = allow_list;
        self
    }
}

enum Children<'a> {
    Map(indexmap::map::Iter<'a, Key, Value>),
    List(Enumerate<slice::Iter<'a, Value>>),
    Empty,
}

impl<'a> Children<'a> {
    fn of(value: &'a Value) -> Self {
        match value {
            Value::Map(map) => Children::Map(map.iter()),
            Value::List(items) => Children::List(items.iter().enumerate()),
            _ => Children::Empty,
        }
    }
}

impl<'a> Iterator for Children<'a> {
    type Item = (String, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Children::Map(iter) => iter.next().map(|(key, value)| (key.to_string(), value)),
            Children::List(iter) => iter.next().map(|(index, value)| (index.to_string(), value)),
            Children::Empty => None,
        }
    }
}

struct Frame<'a> {
    children: Children<'a>,
    base: String,
    depth: usize,
    /// The collection this frame descends into, emitted once the frame is done.
    pending: Option<(String, &'a Value)>,
}

/// Lazy iterator over the `(path, value)` pairs of a nested value.
pub struct Flatten<'a, A> {
    stack: Vec<Frame<'a>>,
    separator: String,
    only_deepest: bool,
    max_depth: usize,
    allow_list: bool,
    predicate: A,
}

/// Flattens `source` with the default associativity rule.
pub fn flatten(source: &Value, options: FlattenOptions) -> Flatten<'_, IsAssociative> {
    flatten_with(source, options, IsAssociative)
}

/// Flattens `source`, asking `predicate` which values to descend into.
///
/// Sources that are neither maps nor lists yield nothing.
pub fn flatten_with<A: Associativity>(source: &Value, options: FlattenOptions, predicate: A) -> Flatten<'_, A> {
    let FlattenOptions { base, separator, only_deepest, depth, max_depth, allow_list } = options;
    let mut stack = Vec::new();
    if depth <= max_depth {
        stack.push(Frame { children: Children::of(source), base, depth, pending: None });
    } else {
        trace!("starting depth {} is past max depth {}, nothing to flatten", depth, max_depth);
    }
    Flatten { stack, separator, only_deepest, max_depth, allow_list, predicate }
}

fn join(base: &str, key: &str, separator: &str) -> String {
    let joined = format!("{}{}{}", base, separator, key);
    if separator.is_empty() {
        return joined;
    }
    joined.trim_start_matches(separator).to_owned()
}

impl<'a, A: Associativity> Iterator for Flatten<'a, A> {
    type Item = (String, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            let (key, value) = match frame.children.next() {
                Some(child) => child,
                None => {
                    let done = self.stack.pop();
                    match done.and_then(|frame| frame.pending) {
                        Some(pending) => return Some(pending),
                        None => continue,
                    }
                }
            };
            let path = join(&frame.base, &key, &self.separator);
            let depth = frame.depth;

            if !self.predicate.is_associative(value, self.allow_list) {
                return Some((path, value));
            }

            let pending = if self.only_deepest { None } else { Some((path.clone(), value)) };
            if depth < self.max_depth {
                self.stack.push(Frame { children: Children::of(value), base: path, depth: depth + 1, pending });
                continue;
            }
            trace!("max depth {} reached at `{}`", self.max_depth, path);
            if pending.is_some() {
                return pending;
            }
        }
    }
}

impl<'a, A: Associativity> FusedIterator for Flatten<'a, A> {}
