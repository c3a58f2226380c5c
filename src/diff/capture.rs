use std::convert::Infallible;

use crate::diff::hook::DivergenceHook;
use crate::path::Path;
use crate::value::Value;

/// The kind of a [`Divergence`].
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Ord, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum DivergenceKind {
    /// The values are of different types.
    TypeMismatch,
    /// The values are of the same type but differ.
    ValueMismatch,
    /// The path only exists in the second structure.
    ItemAddedInSecond,
    /// The path only exists in the first structure.
    ItemRemovedFromSecond,
}

/// A single difference between two compared structures.
///
/// This is what [`Capture`] records.  The values are borrowed from the
/// compared structures.  The [`Display`](std::fmt::Display) implementation
/// renders the failure message line for the divergence.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum Divergence<'a> {
    /// The values at `path` are of different types (see [`DivergenceHook::type_mismatch`])
    TypeMismatch {
        path: Path,
        old: &'a Value,
        new: &'a Value,
    },
    /// The values at `path` differ (see [`DivergenceHook::value_mismatch`])
    ValueMismatch {
        path: Path,
        old: &'a Value,
        new: &'a Value,
    },
    /// The value at `path` only exists in the second structure (see [`DivergenceHook::added`])
    ItemAdded { path: Path, value: &'a Value },
    /// The value at `path` only exists in the first structure (see [`DivergenceHook::removed`])
    ItemRemoved { path: Path, value: &'a Value },
}

impl<'a> Divergence<'a> {
    /// Returns the kind of the divergence.
    pub fn kind(&self) -> DivergenceKind {
        match *self {
            Divergence::TypeMismatch { .. } => DivergenceKind::TypeMismatch,
            Divergence::ValueMismatch { .. } => DivergenceKind::ValueMismatch,
            Divergence::ItemAdded { .. } => DivergenceKind::ItemAddedInSecond,
            Divergence::ItemRemoved { .. } => DivergenceKind::ItemRemovedFromSecond,
        }
    }

    /// Returns the path at which the divergence occurs.
    pub fn path(&self) -> &Path {
        match self {
            Divergence::TypeMismatch { path, .. }
            | Divergence::ValueMismatch { path, .. }
            | Divergence::ItemAdded { path, .. }
            | Divergence::ItemRemoved { path, .. } => path,
        }
    }

    /// Returns the value in the first structure if there is one.
    pub fn old_value(&self) -> Option<&'a Value> {
        match *self {
            Divergence::TypeMismatch { old, .. } | Divergence::ValueMismatch { old, .. } => {
                Some(old)
            }
            Divergence::ItemRemoved { value, .. } => Some(value),
            Divergence::ItemAdded { .. } => None,
        }
    }

    /// Returns the value in the second structure if there is one.
    pub fn new_value(&self) -> Option<&'a Value> {
        match *self {
            Divergence::TypeMismatch { new, .. } | Divergence::ValueMismatch { new, .. } => {
                Some(new)
            }
            Divergence::ItemAdded { value, .. } => Some(value),
            Divergence::ItemRemoved { .. } => None,
        }
    }
}

/// A [`DivergenceHook`] that captures all divergences in traversal order.
#[derive(Default, Clone)]
pub struct Capture<'a>(Vec<Divergence<'a>>);

impl<'a> Capture<'a> {
    /// Creates a new capture hook.
    pub fn new() -> Capture<'a> {
        Capture::default()
    }

    /// Converts the capture hook into a vector of divergences.
    pub fn into_divergences(self) -> Vec<Divergence<'a>> {
        self.0
    }

    /// Accesses the captured divergences.
    pub fn divergences(&self) -> &[Divergence<'a>] {
        &self.0
    }
}

impl<'a> DivergenceHook<'a> for Capture<'a> {
    type Error = Infallible;

    fn type_mismatch(
        &mut self,
        path: &Path,
        old: &'a Value,
        new: &'a Value,
    ) -> Result<(), Self::Error> {
        self.0.push(Divergence::TypeMismatch {
            path: path.clone(),
            old,
            new,
        });
        Ok(())
    }

    fn value_mismatch(
        &mut self,
        path: &Path,
        old: &'a Value,
        new: &'a Value,
    ) -> Result<(), Self::Error> {
        self.0.push(Divergence::ValueMismatch {
            path: path.clone(),
            old,
            new,
        });
        Ok(())
    }

    fn added(&mut self, path: &Path, value: &'a Value) -> Result<(), Self::Error> {
        self.0.push(Divergence::ItemAdded {
            path: path.clone(),
            value,
        });
        Ok(())
    }

    fn removed(&mut self, path: &Path, value: &'a Value) -> Result<(), Self::Error> {
        self.0.push(Divergence::ItemRemoved {
            path: path.clone(),
            value,
        });
        Ok(())
    }
}

#[test]
fn test_accessors() {
    let old = Value::from(1);
    let new = Value::from("one");
    let divergence = Divergence::TypeMismatch {
        path: Path::root().join("k"),
        old: &old,
        new: &new,
    };
    assert_eq!(divergence.kind(), DivergenceKind::TypeMismatch);
    assert_eq!(divergence.path().to_string(), "['k']");
    assert_eq!(divergence.old_value(), Some(&old));
    assert_eq!(divergence.new_value(), Some(&new));

    let removed = Divergence::ItemRemoved {
        path: Path::root().join("gone"),
        value: &old,
    };
    assert_eq!(removed.kind(), DivergenceKind::ItemRemovedFromSecond);
    assert_eq!(removed.old_value(), Some(&old));
    assert_eq!(removed.new_value(), None);
}

#[test]
#[cfg(feature = "serde")]
fn test_serialize() {
    let old = Value::from(1);
    let new = crate::list!["one", ()];
    let divergence = Divergence::TypeMismatch {
        path: Path::root().join("k").join(crate::PathSegment::Index(0)),
        old: &old,
        new: &new,
    };
    assert_eq!(
        serde_json::to_value(&divergence).unwrap(),
        serde_json::json!({
            "kind": "type_mismatch",
            "path": ["k", 0],
            "old": 1,
            "new": ["one", null],
        })
    );
}
