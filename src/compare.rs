//! Comparison entry points.
//!
//! [`assert_dicts_equal`] is the function to call from a test: it checks
//! that both arguments are maps and fails with a [`CompareError`] carrying
//! one line per divergence if they are not equal.  For more control a
//! [`CompareConfig`] can be used which also gives access to the individual
//! [`Divergence`]s through a [`Comparison`].
use crate::diff::{capture_diff_maps, Divergence};
use crate::error::{CompareError, ComparisonFailure, UsageError};
use crate::render::{LineOrder, Report};
use crate::value::Value;

/// A builder type config for comparisons.
#[derive(Clone, Debug, Default)]
pub struct CompareConfig {
    line_order: LineOrder,
}

impl CompareConfig {
    /// Changes the order of the lines in failure messages.
    ///
    /// The default is [`LineOrder::Traversal`].
    pub fn line_order(&mut self, order: LineOrder) -> &mut Self {
        self.line_order = order;
        self
    }

    /// Compares two maps.
    ///
    /// Fails with a [`UsageError`] if either value is not a map.
    pub fn compare<'a>(
        &self,
        first: &'a Value,
        second: &'a Value,
    ) -> Result<Comparison<'a>, UsageError> {
        let (first, second) = match (first.as_map(), second.as_map()) {
            (Some(first), Some(second)) => (first, second),
            _ => return Err(UsageError),
        };
        let divergences = capture_diff_maps(first, second);
        crate::debug!(divergences = divergences.len(), "compared maps");
        Ok(Comparison {
            divergences,
            line_order: self.line_order,
        })
    }

    /// Asserts that two maps are equal.
    ///
    /// See [`assert_dicts_equal`] for details.
    pub fn assert_equal(&self, first: &Value, second: &Value) -> Result<(), CompareError> {
        self.compare(first, second)?.into_result()?;
        Ok(())
    }
}

/// The outcome of comparing two maps.
#[derive(Debug, Clone)]
pub struct Comparison<'a> {
    divergences: Vec<Divergence<'a>>,
    line_order: LineOrder,
}

impl<'a> Comparison<'a> {
    /// Returns `true` if no divergences were found.
    pub fn is_equal(&self) -> bool {
        self.divergences.is_empty()
    }

    /// Returns all divergences in traversal order.
    pub fn divergences(&self) -> &[Divergence<'a>] {
        &self.divergences
    }

    /// Returns the failure report for the divergences.
    pub fn report(&self) -> Report<'_, 'a> {
        Report::new(&self.divergences).line_order(self.line_order)
    }

    /// Converts the comparison into a result.
    pub fn into_result(self) -> Result<(), ComparisonFailure> {
        if self.is_equal() {
            Ok(())
        } else {
            Err(ComparisonFailure::new(self.report().to_string()))
        }
    }
}

/// Compares two maps with the default config.
///
/// ```rust
/// use dictdiff::{compare, dict, DivergenceKind};
///
/// let first = dict! { "a" => 1, "b" => 2 };
/// let second = dict! { "a" => 1, "c" => 3 };
/// let comparison = compare(&first, &second).unwrap();
/// let kinds = comparison
///     .divergences()
///     .iter()
///     .map(|x| x.kind())
///     .collect::<Vec<_>>();
/// assert_eq!(
///     kinds,
///     [DivergenceKind::ItemRemovedFromSecond, DivergenceKind::ItemAddedInSecond]
/// );
/// ```
pub fn compare<'a>(first: &'a Value, second: &'a Value) -> Result<Comparison<'a>, UsageError> {
    CompareConfig::default().compare(first, second)
}

/// Asserts that two maps are equal.
///
/// Both values must be maps, otherwise a [`CompareError::Usage`] is
/// returned.  If the maps differ a [`CompareError::Mismatch`] is returned
/// whose message holds one line per divergence.
///
/// ```rust
/// use dictdiff::{assert_dicts_equal, dict};
///
/// let first = dict! { "k" => "one" };
/// let second = dict! { "k" => 1 };
/// let err = assert_dicts_equal(&first, &second).unwrap_err();
/// assert_eq!(
///     err.to_string(),
///     "Value in path ['k'] is of type 'str' with value 'one' in first dict \
///      and it is of type 'int' with value '1' in second dict"
/// );
/// ```
pub fn assert_dicts_equal(first: &Value, second: &Value) -> Result<(), CompareError> {
    CompareConfig::default().assert_equal(first, second)
}

#[cfg(test)]
fn failure_lines(first: &Value, second: &Value) -> Vec<String> {
    match assert_dicts_equal(first, second) {
        Err(CompareError::Mismatch(failure)) => {
            let mut lines = failure.lines().map(str::to_string).collect::<Vec<_>>();
            lines.sort();
            lines
        }
        other => panic!("expected a mismatch, got {:?}", other),
    }
}

#[cfg(test)]
fn complex_dict() -> Value {
    dict! {
        "first-key" => "one",
        "second-key" => dict! {
            "sublevel-1" => dict! {
                "sublevel-2" => dict! {
                    "sublevel-3-first" => "leaf-value",
                    "sublevel-3-second" => list![1, 3, 4, dict! { "simple" => "dictionary" }],
                },
            },
        },
    }
}

#[test]
fn test_usage_error() {
    let obj = list![1, 2, 3, 4, 5];
    let err = assert_dicts_equal(&obj, &obj).unwrap_err();
    assert_eq!(err, CompareError::Usage(UsageError));
    assert_eq!(
        err.to_string(),
        "Both objects being compared must be instances of dictionaries"
    );
    assert!(assert_dicts_equal(&dict! {}, &Value::Null).unwrap_err().is_usage());
    assert!(assert_dicts_equal(&Value::from("a"), &dict! {}).unwrap_err().is_usage());
}

#[test]
fn test_identical_simple_dicts() {
    let obj = dict! {
        "first-key" => "first-value",
        "second-key" => 2,
        "third-key" => list![3, 2, 1],
    };
    assert_eq!(assert_dicts_equal(&obj, &obj), Ok(()));
    assert_eq!(assert_dicts_equal(&obj, &obj.clone()), Ok(()));
}

#[test]
fn test_identical_complex_dicts() {
    assert_eq!(assert_dicts_equal(&complex_dict(), &complex_dict()), Ok(()));
}

#[test]
fn test_simple_type_change() {
    let err = assert_dicts_equal(&dict! { "first-key" => "one" }, &dict! { "first-key" => 1 })
        .unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"Value in path ['first-key'] is of type 'str' with value 'one' in first dict and it is of type 'int' with value '1' in second dict");
}

#[test]
fn test_simple_value_change() {
    let err =
        assert_dicts_equal(&dict! { "first-key" => 1 }, &dict! { "first-key" => 2 }).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"Value in path ['first-key'] is '1' in first dict and it is '2' in second dict");
}

#[test]
fn test_inner_type_change() {
    let second = dict! {
        "first-key" => "one",
        "second-key" => dict! {
            "sublevel-1" => dict! {
                "sublevel-2" => dict! {
                    "sublevel-3-first" => (),
                    "sublevel-3-second" => list![1, 3, 4, dict! { "simple" => "dictionary" }],
                },
            },
        },
    };
    let err = assert_dicts_equal(&complex_dict(), &second).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"Value in path ['second-key']['sublevel-1']['sublevel-2']['sublevel-3-first'] is of type 'str' with value 'leaf-value' in first dict and it is of type 'NoneType' with value 'None' in second dict");
}

#[test]
fn test_inner_value_change() {
    let second = dict! {
        "first-key" => "one",
        "second-key" => dict! {
            "sublevel-1" => dict! {
                "sublevel-2" => dict! {
                    "sublevel-3-first" => "leaf-value",
                    "sublevel-3-second" => list![1, 3, 4, dict! { "simple" => "dictionaries" }],
                },
            },
        },
    };
    let err = assert_dicts_equal(&complex_dict(), &second).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"Value in path ['second-key']['sublevel-1']['sublevel-2']['sublevel-3-second'][3]['simple'] is 'dictionary' in first dict and it is 'dictionaries' in second dict");
}

#[test]
fn test_items_added_and_removed() {
    let short = dict! {
        "first-key" => "one",
        "second-key" => dict! {
            "sublevel-1" => dict! {
                "sublevel-2" => dict! { "sublevel-3-first" => "leaf-value" },
            },
        },
    };
    let long = dict! {
        "first-key" => "one",
        "second-key" => dict! {
            "sublevel-1" => dict! {
                "sublevel-2" => dict! {
                    "sublevel-3-first" => "leaf-value",
                    "sublevel-3-second" => list![1, 3, 4, dict! { "simple" => "dictionaries" }],
                },
            },
        },
    };

    let err = assert_dicts_equal(&short, &long).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"The following path/value is not present in the first dict but is present in the second dict: ['second-key']['sublevel-1']['sublevel-2']['sublevel-3-second'] -> [1, 3, 4, {'simple': 'dictionaries'}]");

    let err = assert_dicts_equal(&long, &short).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"The following path/value is present in the first dict but is not present in the second dict: ['second-key']['sublevel-1']['sublevel-2']['sublevel-3-second'] -> [1, 3, 4, {'simple': 'dictionaries'}]");
}

#[test]
fn test_multiple_differences() {
    let first = dict! {
        "first-key" => "one",
        "second-key" => dict! {
            "sublevel-1" => dict! {
                "sublevel-2" => dict! {
                    "sublevel-3-first" => "leaf-value",
                    "sublevel-3-second" => list![1, 3, 4, dict! { "simple" => "dictionaries" }],
                },
            },
        },
        "third-key" => 3,
        "fourth-key" => list!["first", "second", "third"],
    };
    let second = dict! {
        "first-key" => "one",
        "second-key" => dict! {
            "sublevel-1" => dict! {
                "sublevel-2" => dict! {
                    "sublevel-3-first" => "leaf-value",
                    "sublevel-3-third" => "another-leaf",
                },
            },
        },
        "third-key" => "three",
        "fourth-key" => list!["first", "third"],
    };

    let mut expected = vec![
        "Value in path ['third-key'] is of type 'int' with value '3' in first dict \
         and it is of type 'str' with value 'three' in second dict",
        "The following path/value is present in the first dict but is not present in the \
         second dict: ['second-key']['sublevel-1']['sublevel-2']['sublevel-3-second'] -> \
         [1, 3, 4, {'simple': 'dictionaries'}]",
        "Value in path ['fourth-key'][1] is 'second' in first dict and it is 'third' in second dict",
        "The following path/value is present in the first dict but is not present in the \
         second dict: ['fourth-key'][2] -> third",
        "The following path/value is not present in the first dict but is present in the \
         second dict: ['second-key']['sublevel-1']['sublevel-2']['sublevel-3-third'] -> \
         another-leaf",
    ];
    expected.sort_unstable();
    assert_eq!(failure_lines(&first, &second), expected);

    let err = assert_dicts_equal(&first, &second).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @r###"
    The following path/value is present in the first dict but is not present in the second dict: ['second-key']['sublevel-1']['sublevel-2']['sublevel-3-second'] -> [1, 3, 4, {'simple': 'dictionaries'}]
    The following path/value is not present in the first dict but is present in the second dict: ['second-key']['sublevel-1']['sublevel-2']['sublevel-3-third'] -> another-leaf
    Value in path ['third-key'] is of type 'int' with value '3' in first dict and it is of type 'str' with value 'three' in second dict
    Value in path ['fourth-key'][1] is 'second' in first dict and it is 'third' in second dict
    The following path/value is present in the first dict but is not present in the second dict: ['fourth-key'][2] -> third
    "###);
}

#[test]
fn test_swapped_arguments() {
    let first = dict! { "a" => 1, "b" => "x", "only-first" => true };
    let second = dict! { "a" => 2, "b" => 7, "only-second" => false };

    assert_eq!(
        failure_lines(&second, &first),
        vec![
            "The following path/value is not present in the first dict but is present in the \
             second dict: ['only-first'] -> True",
            "The following path/value is present in the first dict but is not present in the \
             second dict: ['only-second'] -> False",
            "Value in path ['a'] is '2' in first dict and it is '1' in second dict",
            "Value in path ['b'] is of type 'int' with value '7' in first dict and it is of \
             type 'str' with value 'x' in second dict",
        ]
    );
}

#[test]
fn test_repeated_calls_are_identical() {
    let first = dict! { "a" => list![1, 2], "b" => dict! { "c" => 1.5 } };
    let second = dict! { "a" => list![2], "b" => dict! { "c" => 2.5 }, "d" => () };
    let messages = (0..3)
        .map(|_| assert_dicts_equal(&first, &second).unwrap_err().to_string())
        .collect::<Vec<_>>();
    assert_eq!(messages[0], messages[1]);
    assert_eq!(messages[1], messages[2]);
}

#[test]
fn test_sorted_line_order() {
    let first = dict! { "b" => 1, "a" => 1 };
    let second = dict! { "b" => 2, "a" => 2 };
    let err = CompareConfig::default()
        .line_order(LineOrder::Sorted)
        .assert_equal(&first, &second)
        .unwrap_err();
    insta::assert_snapshot!(err.to_string(), @r###"
    Value in path ['a'] is '1' in first dict and it is '2' in second dict
    Value in path ['b'] is '1' in first dict and it is '2' in second dict
    "###);
}

#[test]
fn test_comparison_accessors() {
    let first = dict! { "a" => 1 };
    let second = dict! { "a" => 1 };
    let comparison = compare(&first, &second).unwrap();
    assert!(comparison.is_equal());
    assert!(comparison.divergences().is_empty());
    assert_eq!(comparison.report().to_string(), "");
    assert_eq!(comparison.into_result(), Ok(()));

    let second = dict! { "a" => 2 };
    let comparison = compare(&first, &second).unwrap();
    assert!(!comparison.is_equal());
    assert_eq!(comparison.divergences().len(), 1);
    assert_eq!(comparison.divergences()[0].path().to_string(), "['a']");
}

#[test]
fn test_nan_dicts_equal_themselves() {
    let value = dict! { "k" => f64::NAN, "xs" => list![1.0, f64::NAN] };
    assert_eq!(assert_dicts_equal(&value, &value), Ok(()));
    assert_eq!(assert_dicts_equal(&value, &value.clone()), Ok(()));
    assert_eq!(
        failure_lines(&value, &dict! { "k" => 1.0, "xs" => list![1.0, f64::NAN] }),
        vec!["Value in path ['k'] is 'nan' in first dict and it is '1.0' in second dict"]
    );
}

#[test]
fn test_none_and_float_keys_in_paths() {
    let first = dict! { () => 1, 2.5 => dict! { 0.1 => "a" } };
    let second = dict! { () => "1", 2.5 => dict! { 0.1 => "b" } };
    assert_eq!(
        failure_lines(&first, &second),
        vec![
            "Value in path [2.5][0.1] is 'a' in first dict and it is 'b' in second dict",
            "Value in path [None] is of type 'int' with value '1' in first dict \
             and it is of type 'str' with value '1' in second dict",
        ]
    );
}

#[cfg(all(test, feature = "tracing"))]
mod log_capture {
    use std::collections::HashMap;
    use std::fmt;
    use std::sync::{Arc, Mutex};

    use tracing::field::{Field, Visit};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    /// One recorded event: its level and fields, `message` included.
    pub type Record = (Level, HashMap<String, String>);

    #[derive(Default)]
    struct Fields(HashMap<String, String>);

    impl Visit for Fields {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            self.0.insert(field.name().to_string(), format!("{:?}", value));
        }

        fn record_str(&mut self, field: &Field, value: &str) {
            self.0.insert(field.name().to_string(), value.to_string());
        }
    }

    struct Recorder(Arc<Mutex<Vec<Record>>>);

    impl<S: Subscriber> Layer<S> for Recorder {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut fields = Fields::default();
            event.record(&mut fields);
            if let Ok(mut records) = self.0.lock() {
                records.push((*event.metadata().level(), fields.0));
            }
        }
    }

    /// Runs `f` with a thread local subscriber and returns what it logged.
    pub fn record<F: FnOnce()>(f: F) -> Vec<Record> {
        let records = Arc::new(Mutex::new(Vec::new()));
        let subscriber = tracing_subscriber::registry().with(Recorder(records.clone()));
        tracing::subscriber::with_default(subscriber, f);
        let rv = records.lock().map(|x| x.clone()).unwrap_or_default();
        rv
    }
}

#[test]
#[cfg(feature = "tracing")]
fn test_logs_divergences() {
    use tracing::Level;

    let first = dict! { "a" => 1, "b" => "x", "gone" => true };
    let second = dict! { "a" => 2, "b" => 2, "new" => () };
    let records = log_capture::record(|| {
        assert_eq!(compare(&first, &second).unwrap().divergences().len(), 4);
    });

    let traces = records
        .iter()
        .filter(|(level, _)| *level == Level::TRACE)
        .map(|(_, fields)| format!("{} {}", fields["message"], fields["path"]))
        .collect::<Vec<_>>();
    assert_eq!(
        traces,
        vec![
            "value mismatch ['a']",
            "type mismatch ['b']",
            "item removed ['gone']",
            "item added ['new']",
        ]
    );
    let mismatch = &records[1].1;
    assert_eq!(mismatch["old"], "str");
    assert_eq!(mismatch["new"], "int");

    let debugs = records
        .iter()
        .filter(|(level, _)| *level == Level::DEBUG)
        .map(|(_, fields)| (fields["message"].as_str(), fields["divergences"].as_str()))
        .collect::<Vec<_>>();
    assert_eq!(debugs, vec![("compared maps", "4")]);
}
