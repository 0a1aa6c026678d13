//! Locating and rendering differences between two values
//!
//! Values are projected to JSON with serde so the first differing field can be
//! reported as a path such as `$.spec.dns.imageTag` or `$.files[2].owner`.
//!
//! Copyright (c) 2025 Hubspoke Team
//! Licensed under the Apache-2.0 license

use serde::Serialize;
use serde_json::Value;
use similar::TextDiff;
use std::fmt;

/// Path reported when the difference cannot be pinned to a field
pub const ROOT_PATH: &str = "$";

/// Options for rendering diffs
#[derive(Debug, Clone)]
pub struct DiffOptions {
    /// Context lines to show around changes
    pub context_lines: usize,

    /// Maximum diff lines to show (0 = unlimited)
    pub max_diff_lines: usize,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            context_lines: 3,
            max_diff_lines: 100,
        }
    }
}

/// The first place two JSON values disagree
#[derive(Debug, Clone, PartialEq)]
pub struct Difference {
    pub path: String,
    /// Value on the original side, `None` when the field is missing there
    pub expected: Option<Value>,
    /// Value on the round-tripped side, `None` when the field is missing there
    pub actual: Option<Value>,
}

/// Find the first differing path, walking objects in key order and arrays by
/// index. Returns `None` when the values are equal.
pub fn first_difference(expected: &Value, actual: &Value) -> Option<Difference> {
    let mut path = String::from(ROOT_PATH);
    walk(expected, actual, &mut path)
}

fn walk(expected: &Value, actual: &Value, path: &mut String) -> Option<Difference> {
    match (expected, actual) {
        (Value::Object(exp), Value::Object(act)) => {
            let only_actual = act.keys().filter(|key| !exp.contains_key(*key));
            for key in exp.keys().chain(only_actual) {
                let len = path.len();
                push_key(path, key);
                let found = match (exp.get(key), act.get(key)) {
                    (Some(e), Some(a)) => walk(e, a, path),
                    (e, a) => Some(Difference {
                        path: path.clone(),
                        expected: e.cloned(),
                        actual: a.cloned(),
                    }),
                };
                path.truncate(len);
                if found.is_some() {
                    return found;
                }
            }
            None
        }
        (Value::Array(exp), Value::Array(act)) => {
            for index in 0..exp.len().max(act.len()) {
                let len = path.len();
                path.push_str(&format!("[{}]", index));
                let found = match (exp.get(index), act.get(index)) {
                    (Some(e), Some(a)) => walk(e, a, path),
                    (e, a) => Some(Difference {
                        path: path.clone(),
                        expected: e.cloned(),
                        actual: a.cloned(),
                    }),
                };
                path.truncate(len);
                if found.is_some() {
                    return found;
                }
            }
            None
        }
        (e, a) if e == a => None,
        (e, a) => Some(Difference {
            path: path.clone(),
            expected: Some(e.clone()),
            actual: Some(a.clone()),
        }),
    }
}

fn push_key(path: &mut String, key: &str) {
    let mut chars = key.chars();
    let plain = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if plain {
        path.push('.');
        path.push_str(key);
    } else {
        // Keys with dots or slashes, e.g. annotation names
        path.push_str(&format!("[{:?}]", key));
    }
}

/// Unified diff of two texts, truncated to `max_diff_lines`
pub fn render(expected: &str, actual: &str, options: &DiffOptions) -> String {
    let diff = TextDiff::from_lines(expected, actual);
    let unified = diff
        .unified_diff()
        .context_radius(options.context_lines)
        .header("original", "round-tripped")
        .to_string();

    if options.max_diff_lines == 0 {
        return unified;
    }

    let mut output = String::new();
    for (count, line) in unified.lines().enumerate() {
        if count >= options.max_diff_lines {
            output.push_str("... (diff truncated) ...\n");
            break;
        }
        output.push_str(line);
        output.push('\n');
    }
    output
}

/// A located, rendered difference between an original value and its round trip
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// First differing field, or `$` when it cannot be located
    pub path: String,
    /// Human-readable unified diff
    pub diff: String,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "first difference at {}\n{}", self.path, self.diff)
    }
}

/// Describe how `actual` differs from `expected`.
///
/// Uses the serde projection when both values serialize and the projections
/// differ. Otherwise, e.g. for fields skipped by serde, the report falls back
/// to the `Debug` output and the root path.
pub fn describe<T>(expected: &T, actual: &T, options: &DiffOptions) -> Report
where
    T: Serialize + fmt::Debug,
{
    if let (Ok(exp), Ok(act)) = (serde_json::to_value(expected), serde_json::to_value(actual)) {
        if let Some(difference) = first_difference(&exp, &act) {
            if let (Ok(exp_text), Ok(act_text)) = (
                serde_json::to_string_pretty(&exp),
                serde_json::to_string_pretty(&act),
            ) {
                return Report {
                    path: difference.path,
                    diff: render(&exp_text, &act_text, options),
                };
            }
        }
    }

    Report {
        path: ROOT_PATH.to_string(),
        diff: render(
            &format!("{:#?}\n", expected),
            &format!("{:#?}\n", actual),
            options,
        ),
    }
}
