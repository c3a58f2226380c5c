//! The recursive structural differ.
//!
//! The differ walks two structures in lock-step and reports every point at
//! which they diverge to a [`DivergenceHook`].  It works like this:
//!
//! * If both values are structurally equal nothing is reported.
//! * If the values are of different types a type mismatch is reported and
//!   the traversal does not descend any further, even if both sides happen
//!   to be containers.
//! * Maps are compared key by key.  Keys present on both sides are compared
//!   recursively, keys only present on one side are reported once as added
//!   or removed together with their complete subtree.
//! * Lists are compared positionally.  Items beyond the length of the
//!   shorter list are reported as added or removed at their index.
//! * Differing scalars of the same type are reported as value mismatch.
//!
//! Reports are issued in traversal order: keys of the first map in their
//! insertion order followed by the keys that only exist in the second map,
//! list items in ascending index order.
//!
//! Most users will want [`capture_diff`] or the higher level
//! [`compare`](crate::compare()) function instead of a custom hook.

mod capture;
mod hook;

pub use capture::*;
pub use hook::*;

use crate::path::{Path, PathSegment};
use crate::value::{Map, Value};

/// Diffs two values and reports all divergences to the hook.
///
/// The values may be of any kind.  Divergences found directly at the top
/// are reported with the root path.
pub fn diff<'a, D>(d: &mut D, first: &'a Value, second: &'a Value) -> Result<(), D::Error>
where
    D: DivergenceHook<'a>,
{
    if first != second {
        diff_values(d, &mut Path::root(), first, second)?;
    }
    d.finish()
}

/// Diffs two maps and reports all divergences to the hook.
pub fn diff_maps<'a, D>(d: &mut D, first: &'a Map, second: &'a Map) -> Result<(), D::Error>
where
    D: DivergenceHook<'a>,
{
    if first != second {
        diff_map_entries(d, &mut Path::root(), first, second)?;
    }
    d.finish()
}

/// Diffs two values capturing all divergences.
///
/// This is like [`diff`] but instead of using an arbitrary hook this will
/// always use [`Capture`] and return the captured [`Divergence`]s.
pub fn capture_diff<'a>(first: &'a Value, second: &'a Value) -> Vec<Divergence<'a>> {
    let mut d = Capture::new();
    match diff(&mut d, first, second) {
        Ok(()) => {}
        Err(never) => match never {},
    }
    d.into_divergences()
}

/// Diffs two maps capturing all divergences.
pub fn capture_diff_maps<'a>(first: &'a Map, second: &'a Map) -> Vec<Divergence<'a>> {
    let mut d = Capture::new();
    match diff_maps(&mut d, first, second) {
        Ok(()) => {}
        Err(never) => match never {},
    }
    d.into_divergences()
}

fn diff_values<'a, D>(
    d: &mut D,
    path: &mut Path,
    old: &'a Value,
    new: &'a Value,
) -> Result<(), D::Error>
where
    D: DivergenceHook<'a>,
{
    if old == new {
        return Ok(());
    }
    if !old.same_type(new) {
        crate::trace!(path = %path, old = old.type_name(), new = new.type_name(), "type mismatch");
        return d.type_mismatch(path, old, new);
    }
    match (old, new) {
        (Value::Map(old), Value::Map(new)) => diff_map_entries(d, path, old, new),
        (Value::List(old), Value::List(new)) => diff_list_items(d, path, old, new),
        _ => {
            crate::trace!(path = %path, "value mismatch");
            d.value_mismatch(path, old, new)
        }
    }
}

fn diff_map_entries<'a, D>(
    d: &mut D,
    path: &mut Path,
    old: &'a Map,
    new: &'a Map,
) -> Result<(), D::Error>
where
    D: DivergenceHook<'a>,
{
    for (key, old_value) in old {
        path.push(PathSegment::Key(key.clone()));
        let rv = match new.get(key) {
            Some(new_value) => diff_values(d, path, old_value, new_value),
            None => {
                crate::trace!(path = %path, "item removed");
                d.removed(path, old_value)
            }
        };
        path.pop();
        rv?;
    }

    for (key, new_value) in new {
        if old.contains_key(key) {
            continue;
        }
        path.push(PathSegment::Key(key.clone()));
        crate::trace!(path = %path, "item added");
        let rv = d.added(path, new_value);
        path.pop();
        rv?;
    }

    Ok(())
}

fn diff_list_items<'a, D>(
    d: &mut D,
    path: &mut Path,
    old: &'a [Value],
    new: &'a [Value],
) -> Result<(), D::Error>
where
    D: DivergenceHook<'a>,
{
    let common = old.len().min(new.len());
    for (idx, (old_item, new_item)) in old.iter().zip(new).enumerate() {
        path.push(PathSegment::Index(idx));
        let rv = diff_values(d, path, old_item, new_item);
        path.pop();
        rv?;
    }

    for (idx, old_item) in old.iter().enumerate().skip(common) {
        path.push(PathSegment::Index(idx));
        crate::trace!(path = %path, "item removed");
        let rv = d.removed(path, old_item);
        path.pop();
        rv?;
    }

    for (idx, new_item) in new.iter().enumerate().skip(common) {
        path.push(PathSegment::Index(idx));
        crate::trace!(path = %path, "item added");
        let rv = d.added(path, new_item);
        path.pop();
        rv?;
    }

    Ok(())
}

#[cfg(test)]
fn describe(divergences: &[Divergence<'_>]) -> Vec<String> {
    divergences
        .iter()
        .map(|x| format!("{:?} {}", x.kind(), x.path()))
        .collect()
}

#[test]
fn test_equal_structures() {
    let value = crate::dict! {
        "a" => crate::list![1, 2, crate::dict! { "b" => () }],
        "c" => "d",
    };
    assert!(capture_diff(&value, &value.clone()).is_empty());
    assert!(capture_diff(&crate::dict! {}, &crate::dict! {}).is_empty());
}

#[test]
fn test_type_mismatch_stops_descent() {
    let first = crate::dict! { "k" => crate::dict! { "x" => 1 } };
    let second = crate::dict! { "k" => crate::list![crate::dict! { "x" => 2 }] };
    assert_eq!(
        describe(&capture_diff(&first, &second)),
        vec!["TypeMismatch ['k']"]
    );

    let first = crate::dict! { "k" => 1 };
    let second = crate::dict! { "k" => 1.0 };
    assert_eq!(
        describe(&capture_diff(&first, &second)),
        vec!["TypeMismatch ['k']"]
    );
}

#[test]
fn test_nested_paths() {
    let first = crate::dict! {
        "a" => crate::dict! { "b" => crate::dict! { "c" => crate::dict! { "d" => 1 } } },
    };
    let second = crate::dict! {
        "a" => crate::dict! { "b" => crate::dict! { "c" => crate::dict! { "d" => 2 } } },
    };
    assert_eq!(
        describe(&capture_diff(&first, &second)),
        vec!["ValueMismatch ['a']['b']['c']['d']"]
    );
}

#[test]
fn test_list_positions() {
    let first = crate::dict! { "x" => crate::list![0, 1, 2, 3, 4] };
    let second = crate::dict! { "x" => crate::list![0, 1, 2, 30, 4] };
    assert_eq!(
        describe(&capture_diff(&first, &second)),
        vec!["ValueMismatch ['x'][3]"]
    );

    let first = crate::dict! { "x" => crate::list![1, 2, 3] };
    let second = crate::dict! { "x" => crate::list![3, 2, 1] };
    assert_eq!(
        describe(&capture_diff(&first, &second)),
        vec!["ValueMismatch ['x'][0]", "ValueMismatch ['x'][2]"]
    );
}

#[test]
fn test_list_length_changes() {
    let first = crate::dict! { "x" => crate::list!["first", "second", "third"] };
    let second = crate::dict! { "x" => crate::list!["first", "third"] };
    assert_eq!(
        describe(&capture_diff(&first, &second)),
        vec!["ValueMismatch ['x'][1]", "ItemRemovedFromSecond ['x'][2]"]
    );
    assert_eq!(
        describe(&capture_diff(&second, &first)),
        vec!["ValueMismatch ['x'][1]", "ItemAddedInSecond ['x'][2]"]
    );
}

#[test]
fn test_lists_of_maps() {
    let first = crate::dict! { "x" => crate::list![crate::dict! { "simple" => "dictionary" }] };
    let second = crate::dict! { "x" => crate::list![crate::dict! { "simple" => "dictionaries" }] };
    assert_eq!(
        describe(&capture_diff(&first, &second)),
        vec!["ValueMismatch ['x'][0]['simple']"]
    );
}

#[test]
fn test_shallow_added_and_removed() {
    let first = crate::dict! { "a" => 1 };
    let second = crate::dict! {
        "a" => 1,
        "z" => crate::dict! { "deep" => crate::dict! { "deeper" => crate::list![1, 2, 3] } },
    };
    let divergences = capture_diff(&first, &second);
    assert_eq!(describe(&divergences), vec!["ItemAddedInSecond ['z']"]);
    assert_eq!(divergences[0].new_value(), second.as_map().unwrap().get(&"z".into()));
    assert_eq!(
        describe(&capture_diff(&second, &first)),
        vec!["ItemRemovedFromSecond ['z']"]
    );
}

#[test]
fn test_traversal_order() {
    let first = crate::dict! { "a" => 1, "gone" => 2, "c" => 3 };
    let second = crate::dict! { "new" => 0, "c" => 4, "a" => 1 };
    assert_eq!(
        describe(&capture_diff(&first, &second)),
        vec![
            "ItemRemovedFromSecond ['gone']",
            "ValueMismatch ['c']",
            "ItemAddedInSecond ['new']",
        ]
    );
}

#[test]
fn test_scalar_roots() {
    let first = Value::from(1);
    let second = Value::from(2);
    let divergences = capture_diff(&first, &second);
    assert_eq!(describe(&divergences), vec!["ValueMismatch "]);
    assert!(divergences[0].path().is_root());
}

#[test]
fn test_hook_error_aborts() {
    struct FirstOnly(Option<String>);

    impl<'a> DivergenceHook<'a> for FirstOnly {
        type Error = ();

        fn value_mismatch(&mut self, path: &Path, _: &'a Value, _: &'a Value) -> Result<(), ()> {
            self.0 = Some(path.to_string());
            Err(())
        }

        fn finish(&mut self) -> Result<(), ()> {
            panic!("finish must not be reached");
        }
    }

    let first = crate::dict! { "a" => 1, "b" => 2 };
    let second = crate::dict! { "a" => 10, "b" => 20 };
    let mut hook = FirstOnly(None);
    assert_eq!(diff(&mut hook, &first, &second), Err(()));
    assert_eq!(hook.0.as_deref(), Some("['a']"));
}

#[test]
fn test_diff_maps() {
    let first: Map = vec![("a", 1), ("b", 2)].into_iter().collect();
    let second: Map = vec![("a", 1), ("b", 3)].into_iter().collect();
    assert_eq!(
        describe(&capture_diff_maps(&first, &second)),
        vec!["ValueMismatch ['b']"]
    );
}

#[test]
fn test_capture_hook_in_place() {
    let first = crate::dict! { "a" => 1, "gone" => true };
    let second = crate::dict! { "a" => 1.0 };
    let mut capture = Capture::new();
    match diff(&mut capture, &first, &second) {
        Ok(()) => {}
        Err(never) => match never {},
    }
    assert_eq!(
        describe(capture.divergences()),
        vec!["TypeMismatch ['a']", "ItemRemovedFromSecond ['gone']"]
    );
    assert_eq!(capture.into_divergences().len(), 2);
}
