//! Paths locating a value inside a nested structure.
//!
//! A [`Path`] is the route from the root of a structure to one of its nested
//! values: every map level contributes the key that was followed and every
//! list level the index.  It renders as a chain of bracketed segments:
//!
//! ```rust
//! use dictdiff::{Path, PathSegment};
//!
//! let path: Path = vec![
//!     PathSegment::from("a"),
//!     PathSegment::from("b"),
//!     PathSegment::Index(2),
//! ]
//! .into_iter()
//! .collect();
//! assert_eq!(path.to_string(), "['a']['b'][2]");
//! ```
use std::fmt;

use crate::value::Key;

/// A single step of a [`Path`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum PathSegment {
    /// The key followed into a map.
    Key(Key),
    /// The position followed into a list.
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "[{}]", key.repr()),
            PathSegment::Index(idx) => write!(f, "[{}]", idx),
        }
    }
}

impl From<Key> for PathSegment {
    fn from(key: Key) -> PathSegment {
        PathSegment::Key(key)
    }
}

macro_rules! impl_key_segment {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for PathSegment {
                fn from(key: $ty) -> PathSegment {
                    PathSegment::Key(key.into())
                }
            }
        )*
    };
}

impl_key_segment!((), &str, String, bool, i32, i64, f64);

/// The location of a value relative to the root of a structure.
///
/// The root path has no segments and renders as an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    /// Returns the root path.
    pub fn root() -> Path {
        Path::default()
    }

    /// Returns all segments from the root downwards.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Returns the number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Checks if the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Is this the root path?
    pub fn is_root(&self) -> bool {
        self.is_empty()
    }

    /// Returns the last segment unless this is the root.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// Returns a new path extended by one segment.
    pub fn join<S: Into<PathSegment>>(&self, segment: S) -> Path {
        let mut rv = self.clone();
        rv.push(segment.into());
        rv
    }

    pub(crate) fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    pub(crate) fn pop(&mut self) {
        self.segments.pop();
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl FromIterator<PathSegment> for Path {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Path {
        Path {
            segments: iter.into_iter().collect(),
        }
    }
}

#[test]
fn test_display() {
    assert_eq!(Path::root().to_string(), "");
    let path = Path::root().join("a").join("b").join("c").join("d");
    assert_eq!(path.to_string(), "['a']['b']['c']['d']");
    assert_eq!(path.len(), 4);
    assert!(!path.is_empty());
    assert!(Path::root().is_empty());
    assert_eq!(path.segments()[1], PathSegment::from("b"));
    assert_eq!(path.segments().len(), path.len());
    assert_eq!(
        Path::root().join("x").join(PathSegment::Index(3)).to_string(),
        "['x'][3]"
    );
}

#[test]
fn test_key_segments_are_quoted() {
    let path = Path::root().join(1).join(true).join("it's");
    assert_eq!(path.to_string(), "[1][True][\"it's\"]");
    assert_ne!(Path::root().join(1), Path::root().join("1"));
}

#[test]
fn test_none_and_float_segments() {
    let path = Path::root().join(()).join(1.5).join(2.0).join(1e-7);
    assert_eq!(path.to_string(), "[None][1.5][2.0][1e-07]");
    assert_ne!(Path::root().join(1.0), Path::root().join(1));
    assert_eq!(Path::root().join(f64::NAN).to_string(), "[nan]");
}

#[test]
fn test_push_pop() {
    let mut path = Path::root();
    path.push(PathSegment::from("a"));
    path.push(PathSegment::Index(0));
    assert_eq!(path.last(), Some(&PathSegment::Index(0)));
    path.pop();
    path.pop();
    assert!(path.is_root());
}
