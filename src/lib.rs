//! This crate implements deep comparisons of nested dictionaries for use in
//! tests.  Instead of a plain "not equal" it reports every point at which
//! two structures diverge, annotated with the path leading to it.
//!
//! ```rust
//! use dictdiff::{assert_dicts_equal, dict, list};
//!
//! let first = dict! { "name" => "one", "items" => list![1, 2, 3] };
//! let second = dict! { "name" => 1, "items" => list![1, 5, 3] };
//! let err = assert_dicts_equal(&first, &second).unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "Value in path ['name'] is of type 'str' with value 'one' in first dict \
//!      and it is of type 'int' with value '1' in second dict\n\
//!      Value in path ['items'][1] is '2' in first dict and it is '5' in second dict"
//! );
//! ```
//!
//! The crate is split into a few layers:
//!
//! * [`value`]: the dynamic [`Value`] tree that is compared.
//! * [`diff`]: the recursive differ.  It provides low level access through
//!   the [`DivergenceHook`] trait as well as the captured [`Divergence`]s.
//! * [`render`]: turns divergences into failure messages.
//! * [`assert_dicts_equal`] and [`CompareConfig`]: the entry points that
//!   tie the above together.
//!
//! # Optional Features
//!
//! * `serde`: implements `Serialize` for values, paths and divergences.
//! * `json`: enables conversions from `serde_json` values.
//! * `tracing`: emits `tracing` events while comparing.

/// Builds a [`Value::Map`] from `key => value` pairs.
///
/// Keys are anything convertible into a [`Key`], values anything
/// convertible into a [`Value`].  Later duplicates replace earlier ones.
#[macro_export]
macro_rules! dict {
    () => {
        $crate::Value::Map($crate::Map::new())
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::Map::new();
        $(
            map.insert($key, $value);
        )+
        $crate::Value::Map(map)
    }};
}

/// Builds a [`Value::List`] from items of possibly different types.
#[macro_export]
macro_rules! list {
    ($($item:expr),* $(,)?) => {
        $crate::Value::List(vec![$($crate::Value::from($item)),*])
    };
}

/// Asserts that two maps are equal.
///
/// On failure this panics with the report of all divergences.  This is the
/// panicking counterpart of [`assert_dicts_equal`] meant to be used directly
/// in tests.
///
/// ```rust,should_panic
/// use dictdiff::{assert_dicts_eq, dict};
///
/// assert_dicts_eq!(dict! { "k" => 1 }, dict! { "k" => 2 });
/// ```
#[macro_export]
macro_rules! assert_dicts_eq {
    ($first:expr, $second:expr $(,)?) => ({
        match (&($first), &($second)) {
            (first_val, second_val) => {
                if let Err(err) = $crate::assert_dicts_equal(first_val, second_val) {
                    panic!("assertion failed: `(first == second)`\n\n{}\n", err);
                }
            }
        }
    });
    ($first:expr, $second:expr, $($arg:tt)*) => ({
        match (&($first), &($second)) {
            (first_val, second_val) => {
                if let Err(err) = $crate::assert_dicts_equal(first_val, second_val) {
                    panic!("assertion failed: `(first == second)`: {}\n\n{}\n",
                           format_args!($($arg)*),
                           err);
                }
            }
        }
    });
}

macro_rules! trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        tracing::trace!($($arg)*);
    }};
}

macro_rules! debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        tracing::debug!($($arg)*);
    }};
}

pub(crate) use {debug, trace};

mod compare;
pub mod diff;
mod error;
mod path;
pub mod render;
pub mod value;

pub use self::compare::{assert_dicts_equal, compare, CompareConfig, Comparison};
pub use self::diff::{capture_diff, Divergence, DivergenceHook, DivergenceKind};
pub use self::error::{CompareError, ComparisonFailure, UsageError};
pub use self::path::{Path, PathSegment};
pub use self::render::{render, LineOrder, Report};
pub use self::value::{Key, Map, Value};

#[test]
fn test_assert_macro_passes() {
    assert_dicts_eq!(dict! { "a" => list![1, 2] }, dict! { "a" => list![1, 2] });
}

#[test]
#[should_panic(expected = "Value in path ['a'][1] is '2' in first dict and it is '3' in second dict")]
fn test_assert_macro_panics() {
    assert_dicts_eq!(dict! { "a" => list![1, 2] }, dict! { "a" => list![1, 3] });
}

#[test]
#[should_panic(expected = "Both objects being compared must be instances of dictionaries")]
fn test_assert_macro_usage() {
    assert_dicts_eq!(list![1], list![1], "comparing {}", "lists");
}
