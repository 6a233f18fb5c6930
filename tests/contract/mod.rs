use super::*;
use indexmap::IndexMap;
use lazy_iteration::{Key, Value};
use std::cell::Cell;

fn returning(s: &'static str) -> Value {
    Value::callable(move |_| Value::from(s))
}

fn methods(pairs: Vec<(&str, Value)>) -> IndexMap<Key, Value> {
    pairs.into_iter().map(|(k, v)| (Key::from(k), v)).collect()
}

#[test]
fn should_call_producer_just_once() {
    let calls = Cell::new(0);

    let p = param(|| {
        calls.set(calls.get() + 1);
        methods(vec![("data", Value::from("test")), ("getData", returning("data"))])
    });

    assert_eq!(Ok(2), p.len());
    p.len().unwrap();
    p.iter().unwrap().count();
    p.get(&Key::from("data")).unwrap();
    p.contains(&Key::from("data")).unwrap();
    p.call("data", &[]).unwrap();
    assert_eq!(1, calls.get());
}

#[test]
fn should_keep_first_result_also_after_backing_value_changed() {
    let seed = Cell::new(42);

    let p = param(|| IndexMap::from([("counter", seed.get())]));

    assert_eq!(Ok(Some(&42)), p.get("counter"));
    seed.set(43);
    assert_eq!(Ok(Some(&42)), p.get("counter"));
}

#[test]
fn count_returns_number_of_entries() {
    assert_eq!(Ok(3), param(|| IndexMap::from([(0, "a"), (1, "b"), (2, "c")])).len());
    assert_eq!(Ok(0), param(IndexMap::<i64, i64>::new).len());
    assert_eq!(Ok(true), param(IndexMap::<i64, i64>::new).is_empty());
}

#[test]
fn iteration_preserves_keys_and_order() {
    let p = param(|| IndexMap::from([(10, "a"), (20, "b"), (30, "c")]));

    let keys = p.iter().unwrap().map(|(k, _)| *k).collect::<Vec<_>>();

    assert_eq!(vec![10, 20, 30], keys);
}

#[test]
fn repeated_iterations_are_identical() {
    let calls = Cell::new(0);
    let p = param(|| {
        calls.set(calls.get() + 1);
        IndexMap::from([("a", 1), ("b", 2)])
    });

    let first = p.iter().unwrap().collect::<Vec<_>>();
    let second = p.iter().unwrap().collect::<Vec<_>>();

    assert_eq!(first, second);
    assert_eq!(vec![(&"a", &1), (&"b", &2)], first);
    assert_eq!(1, calls.get());
}

#[test]
fn get_returns_none_for_missing_key() {
    let p = param(|| IndexMap::from([("key", "expected")]));

    assert_eq!(Ok(Some(&"expected")), p.get("key"));
    assert_eq!(Ok(None), p.get("missing"));
}

#[test]
fn get_works_with_mixed_value_types() {
    let p = param(|| {
        methods(vec![
            ("string", Value::from("text")),
            ("int", Value::from(42)),
            ("float", Value::from(3.14)),
            ("bool", Value::from(true)),
            ("null", Value::Null),
            ("array", Value::list([1, 2, 3])),
        ])
    });

    assert_eq!(Some("text"), p.get(&Key::from("string")).unwrap().and_then(Value::as_str));
    assert_eq!(Some(42), p.get(&Key::from("int")).unwrap().and_then(Value::as_i64));
    assert_eq!(Some(3.14), p.get(&Key::from("float")).unwrap().and_then(Value::as_f64));
    assert_eq!(Some(true), p.get(&Key::from("bool")).unwrap().and_then(Value::as_bool));
    assert_eq!(Ok(Some(&Value::Null)), p.get(&Key::from("null")));
    assert_eq!(Ok(Some(&Value::list([1, 2, 3]))), p.get(&Key::from("array")));
}

#[test]
fn contains_is_false_for_missing_and_null_values() {
    let p = param(|| {
        methods(vec![("exists", Value::from("value")), ("nullKey", Value::Null)])
    });

    assert_eq!(Ok(true), p.contains(&Key::from("exists")));
    assert_eq!(Ok(false), p.contains(&Key::from("missing")));
    assert_eq!(Ok(false), p.contains(&Key::from("nullKey")));
}

#[test]
fn contains_with_integer_keys() {
    let p = param(|| IndexMap::from([(0, Some("zero")), (1, Some("one")), (2, None)]));

    assert_eq!(Ok(true), p.contains(&0));
    assert_eq!(Ok(true), p.contains(&1));
    assert_eq!(Ok(false), p.contains(&2));
    assert_eq!(Ok(false), p.contains(&3));
}

#[test]
fn set_does_not_modify_memoized_entries() {
    let p = param(|| IndexMap::from([("original", "value")]));

    let copy = p.set("new", "added").unwrap();

    assert_eq!(Some(&"added"), copy.get("new"));
    assert_eq!(Ok(None), p.get("new"));
    assert_eq!(Ok(Some(&"value")), p.get("original"));
}

#[test]
fn push_does_not_modify_memoized_entries() {
    let p = param(|| IndexMap::from([(Key::from(0), "existing"), (Key::from("name"), "x")]));

    let copy = p.push("appended").unwrap();

    assert_eq!(Some(&"appended"), copy.get(&Key::Int(1)));
    assert_eq!(Ok(2), p.len());
}

#[test]
fn unset_does_not_modify_memoized_entries() {
    let p = param(|| IndexMap::from([("key", "value"), ("other", "kept")]));

    let copy = p.unset("key").unwrap();

    assert_eq!(vec![(&"other", &"kept")], copy.iter().collect::<Vec<_>>());
    assert_eq!(Ok(Some(&"value")), p.get("key"));
}

#[test]
fn call_passes_arguments_to_callable() {
    let p = param(|| {
        methods(vec![(
            "add",
            Value::callable(|args| {
                Value::from(args.iter().filter_map(Value::as_i64).sum::<i64>())
            }),
        )])
    });

    assert_eq!(Ok(Some(Value::from(7))), p.call("add", &[Value::from(3), Value::from(4)]));
    assert_eq!(
        Ok(Some(Value::from(15))),
        p.call("add", &[1, 2, 3, 4, 5].map(Value::from))
    );
}

#[test]
fn call_passes_arguments_to_getter() {
    let p = param(|| {
        methods(vec![(
            "getValue",
            Value::callable(|args| {
                Value::from(format!("value_{}", args[0].as_str().unwrap_or_default()))
            }),
        )])
    });

    assert_eq!(Ok(Some(Value::from("value_test"))), p.call("value", &[Value::from("test")]));
}

#[test]
fn call_prioritizes_direct_over_getter() {
    let p = param(|| methods(vec![("name", returning("direct")), ("getName", returning("getter"))]));

    assert_eq!(Ok(Some(Value::from("direct"))), p.call("name", &[]));
}

#[test]
fn call_prioritizes_getter_over_isser() {
    let p = param(|| methods(vec![("getActive", returning("getter")), ("isActive", returning("isser"))]));

    assert_eq!(Ok(Some(Value::from("getter"))), p.call("active", &[]));
}

#[test]
fn call_prioritizes_isser_over_hasser() {
    let p = param(|| {
        methods(vec![("isPermission", returning("isser")), ("hasPermission", returning("hasser"))])
    });

    assert_eq!(Ok(Some(Value::from("isser"))), p.call("permission", &[]));
}

#[test]
fn call_falls_back_to_hasser() {
    let p = param(|| methods(vec![("hasPermission", Value::callable(|_| Value::from(false)))]));

    assert_eq!(Ok(Some(Value::from(false))), p.call("permission", &[]));
}

#[test]
fn call_returns_none_for_non_callable_or_unknown() {
    let p = param(|| {
        methods(vec![
            ("getName", Value::from("not a callable")),
            ("notCallable", Value::from("just a string")),
            ("data", Value::from("value")),
        ])
    });

    assert_eq!(Ok(None), p.call("name", &[]));
    assert_eq!(Ok(None), p.call("notCallable", &[]));
    assert_eq!(Ok(None), p.call("nonExistent", &[]));
}

#[test]
fn producer_failure_is_not_cached() {
    let attempts = Cell::new(0);
    let p = fallible(|| {
        attempts.set(attempts.get() + 1);
        if attempts.get() == 1 {
            Err("backend unavailable")
        } else {
            Ok(IndexMap::from([("ready", true)]))
        }
    });

    assert_eq!(Err("backend unavailable"), p.get("ready"));
    assert!(!p.is_resolved());
    assert_eq!(Ok(Some(&true)), p.get("ready"));
    assert_eq!(Ok(1), p.len());
    assert_eq!(2, attempts.get());
}

#[test]
fn use_producer_trait() {
    struct P;

    impl Producer for P {
        type Key = &'static str;
        type Value = i32;
        type Error = String;

        fn produce(&self) -> Result<IndexMap<&'static str, i32>, String> {
            Ok(IndexMap::from([("answer", 42)]))
        }
    }

    let p = container(P);

    assert_eq!(Ok(Some(&42)), p.get("answer"));
}

#[test]
fn use_function_as_producer() {
    fn producer() -> IndexMap<&'static str, i32> {
        IndexMap::from([("answer", 42)])
    }

    let p = param(producer);

    assert_eq!(Ok(Some(&42)), p.get("answer"));
}
