//! Rendering of divergences into failure messages.
//!
//! Every [`Divergence`] renders into one line through its
//! [`Display`](fmt::Display) implementation.  A [`Report`] aggregates the
//! lines of many divergences into a single newline separated message:
//!
//! ```rust
//! use dictdiff::{capture_diff, dict, render};
//!
//! let first = dict! { "k" => 1 };
//! let second = dict! { "k" => 2 };
//! assert_eq!(
//!     render(&capture_diff(&first, &second)),
//!     "Value in path ['k'] is '1' in first dict and it is '2' in second dict"
//! );
//! ```
use std::collections::HashSet;
use std::fmt;

use crate::diff::Divergence;

impl<'a> fmt::Display for Divergence<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Divergence::TypeMismatch { path, old, new } => write!(
                f,
                "Value in path {} is of type '{}' with value '{}' in first dict \
                 and it is of type '{}' with value '{}' in second dict",
                path,
                old.type_name(),
                old,
                new.type_name(),
                new
            ),
            Divergence::ValueMismatch { path, old, new } => write!(
                f,
                "Value in path {} is '{}' in first dict and it is '{}' in second dict",
                path, old, new
            ),
            Divergence::ItemAdded { path, value } => write!(
                f,
                "The following path/value is not present in the first dict \
                 but is present in the second dict: {} -> {}",
                path, value
            ),
            Divergence::ItemRemoved { path, value } => write!(
                f,
                "The following path/value is present in the first dict \
                 but is not present in the second dict: {} -> {}",
                path, value
            ),
        }
    }
}

/// The order of the lines in a [`Report`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum LineOrder {
    /// Lines appear in the order the divergences were found.
    #[default]
    Traversal,
    /// Lines are sorted lexicographically.
    Sorted,
}

/// A failure report formatter.
///
/// The `Display` implementation renders one line per distinct divergence
/// message joined by newlines.  Divergences that render to the same line
/// only show up once.
#[derive(Debug, Clone, Copy)]
pub struct Report<'r, 'a> {
    divergences: &'r [Divergence<'a>],
    line_order: LineOrder,
}

impl<'r, 'a> Report<'r, 'a> {
    /// Creates a report for the given divergences.
    pub fn new(divergences: &'r [Divergence<'a>]) -> Report<'r, 'a> {
        Report {
            divergences,
            line_order: LineOrder::default(),
        }
    }

    /// Changes the line order.  Defaults to [`LineOrder::Traversal`].
    pub fn line_order(mut self, order: LineOrder) -> Self {
        self.line_order = order;
        self
    }

    /// Returns the divergences the report is made of.
    pub fn divergences(&self) -> &'r [Divergence<'a>] {
        self.divergences
    }

    /// Renders all distinct lines in report order.
    pub fn lines(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut lines = self
            .divergences
            .iter()
            .map(|x| x.to_string())
            .filter(|line| seen.insert(line.clone()))
            .collect::<Vec<_>>();
        if self.line_order == LineOrder::Sorted {
            lines.sort();
        }
        lines
    }
}

impl<'r, 'a> fmt::Display for Report<'r, 'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (idx, line) in self.lines().iter().enumerate() {
            if idx > 0 {
                f.write_str("\n")?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}

/// Quick way to render divergences into a failure message.
pub fn render(divergences: &[Divergence<'_>]) -> String {
    Report::new(divergences).to_string()
}

#[cfg(test)]
use crate::{path::Path, value::Value};

#[test]
fn test_type_mismatch_line() {
    let old = Value::from("one");
    let new = Value::from(1);
    let divergence = Divergence::TypeMismatch {
        path: Path::root().join("k"),
        old: &old,
        new: &new,
    };
    insta::assert_snapshot!(divergence.to_string(), @"Value in path ['k'] is of type 'str' with value 'one' in first dict and it is of type 'int' with value '1' in second dict");
}

#[test]
fn test_none_type_name() {
    let old = Value::from("leaf-value");
    let new = Value::Null;
    let divergence = Divergence::TypeMismatch {
        path: Path::root().join("a").join("b"),
        old: &old,
        new: &new,
    };
    assert_eq!(
        divergence.to_string(),
        "Value in path ['a']['b'] is of type 'str' with value 'leaf-value' in first dict \
         and it is of type 'NoneType' with value 'None' in second dict"
    );
}

#[test]
fn test_added_and_removed_lines() {
    let value = crate::list![1, 3, 4, crate::dict! { "simple" => "dictionaries" }];
    let leaf = Value::from("another-leaf");
    let removed = Divergence::ItemRemoved {
        path: Path::root().join("sub").join("second"),
        value: &value,
    };
    let added = Divergence::ItemAdded {
        path: Path::root().join("sub").join("third"),
        value: &leaf,
    };
    insta::assert_snapshot!(removed.to_string(), @"The following path/value is present in the first dict but is not present in the second dict: ['sub']['second'] -> [1, 3, 4, {'simple': 'dictionaries'}]");
    insta::assert_snapshot!(added.to_string(), @"The following path/value is not present in the first dict but is present in the second dict: ['sub']['third'] -> another-leaf");
}

#[test]
fn test_report_dedups_and_orders() {
    let one = Value::from(1);
    let two = Value::from(2);
    let divergences = vec![
        Divergence::ValueMismatch {
            path: Path::root().join("b"),
            old: &one,
            new: &two,
        },
        Divergence::ValueMismatch {
            path: Path::root().join("a"),
            old: &one,
            new: &two,
        },
        Divergence::ValueMismatch {
            path: Path::root().join("b"),
            old: &one,
            new: &two,
        },
    ];

    let report = Report::new(&divergences);
    assert_eq!(report.divergences().len(), 3);
    assert_eq!(LineOrder::default(), LineOrder::Traversal);
    insta::assert_snapshot!(report.to_string(), @r###"
    Value in path ['b'] is '1' in first dict and it is '2' in second dict
    Value in path ['a'] is '1' in first dict and it is '2' in second dict
    "###);

    let sorted = report.line_order(LineOrder::Sorted);
    assert_eq!(
        sorted.lines(),
        vec![
            "Value in path ['a'] is '1' in first dict and it is '2' in second dict",
            "Value in path ['b'] is '1' in first dict and it is '2' in second dict",
        ]
    );
}

#[test]
fn test_empty_report() {
    assert_eq!(render(&[]), "");
}
