//! Query-string construction.
//!
//! # Design
//! The backend speaks a small filter language in query values (`field=value`,
//! `field!=value`), so encoding cannot be a blanket percent-escape: a value
//! made entirely of "simple" characters is emitted verbatim, anything else is
//! percent-encoded with `encodeURIComponent` semantics. Array values expand
//! into repeated `key=value` pairs, and params whose scope is already
//! embedded in a custom path are suppressed. Output depends only on the
//! input (params keep insertion order), so identical configurations produce
//! byte-identical strings.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters `encodeURIComponent` leaves unescaped; everything else in a
/// non-simple value is percent-encoded.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// One query parameter value.
///
/// `Absent` is the mapping of a value the caller did not provide; absent
/// entries are dropped silently during serialization, so optional filters can
/// be passed through unconditionally.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Text(String),
    Int(i64),
    Bool(bool),
    /// Expanded into one `key=value` pair per element.
    List(Vec<String>),
    Absent,
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(values: Vec<String>) -> Self {
        ParamValue::List(values)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(values: Vec<&str>) -> Self {
        ParamValue::List(values.into_iter().map(str::to_string).collect())
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => inner.into(),
            None => ParamValue::Absent,
        }
    }
}

/// Options consumed by [`build_query`].
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    pub page: Option<u32>,
    pub search: Option<String>,
    /// Additional parameters, serialized in insertion order.
    pub params: Vec<(String, ParamValue)>,
}

/// Strip any trailing slash from `path` and append the canonical query
/// string for `options`.
pub fn apply_query(path: &str, options: &QueryOptions) -> String {
    let path = path.trim_end_matches('/');
    format!("{path}{}", build_query(path, options))
}

/// Serialize `options` into a query string: `?`-prefixed when any parameter
/// is emitted, empty otherwise. Ordering is `page`, `search`, then params in
/// insertion order. `path` is consulted only for scope suppression.
pub fn build_query(path: &str, options: &QueryOptions) -> String {
    let mut pairs: Vec<(String, String)> = Vec::new();

    if let Some(page) = options.page {
        pairs.push(("page".to_string(), page.to_string()));
    }
    if let Some(search) = &options.search {
        pairs.push(("search".to_string(), encode(search)));
    }

    for (key, value) in &options.params {
        match value {
            ParamValue::Absent => {}
            ParamValue::Text(v) => push_single(&mut pairs, path, key, v),
            ParamValue::Int(v) => push_single(&mut pairs, path, key, &v.to_string()),
            ParamValue::Bool(v) => {
                push_single(&mut pairs, path, key, if *v { "true" } else { "false" })
            }
            ParamValue::List(items) => {
                for item in items {
                    pairs.push((encode(key), encode(item)));
                }
            }
        }
    }

    if pairs.is_empty() {
        return String::new();
    }
    let joined = pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");
    format!("?{joined}")
}

fn push_single(pairs: &mut Vec<(String, String)>, path: &str, key: &str, value: &str) {
    if suppressed_by_path(path, key, value) {
        return;
    }
    pairs.push((encode(key), encode(value)));
}

/// A single-valued param duplicating a scope already embedded in the path is
/// dropped; the path's value wins. `serviceId=5` is suppressed by a
/// `.../service/5/...` path. Matching on the adjacent segment pair keeps
/// unrelated params alive even when their value appears elsewhere in the
/// path.
fn suppressed_by_path(path: &str, key: &str, value: &str) -> bool {
    let scope = key
        .strip_suffix("Id")
        .or_else(|| key.strip_suffix("_id"))
        .or_else(|| key.strip_suffix("-id"))
        .unwrap_or(key);
    if scope.is_empty() {
        return false;
    }
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    segments
        .windows(2)
        .any(|pair| pair[0].eq_ignore_ascii_case(scope) && pair[1] == value)
}

/// Emit verbatim when the whole string matches the simple allow-list,
/// otherwise percent-encode.
fn encode(value: &str) -> String {
    if is_simple(value) {
        value.to_string()
    } else {
        utf8_percent_encode(value, COMPONENT).to_string()
    }
}

/// The allow-list preserving the backend's filter mini-language: letters,
/// digits, `_ - = < > !`.
fn is_simple(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '=' | '<' | '>' | '!'))
}
