//! Cache key generation and invalidation patterns

use regex::Regex;
use serde_json::Value;

/// Builds the cache key for a lookup in `category` with `params`.
///
/// A JSON string is used verbatim. Anything else is serialized with object
/// keys sorted at every depth, so two equal objects built in a different
/// insertion order map to the same key.
pub fn generate_key(category: &str, params: &Value) -> String {
    let mut key = String::with_capacity(category.len() + 16);
    key.push_str(category);
    key.push(':');
    match params {
        Value::String(raw) => key.push_str(raw),
        other => write_canonical(other, &mut key),
    }
    key
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => write_object(map.iter(), out),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}

/// Writes object fields sorted by name, whatever order `fields` yields them in.
pub(super) fn write_object<'a>(fields: impl IntoIterator<Item = (&'a String, &'a Value)>, out: &mut String) {
    let mut fields: Vec<_> = fields.into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));
    out.push('{');
    for (i, (name, field)) in fields.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&Value::String(name.clone()).to_string());
        out.push(':');
        write_canonical(field, out);
    }
    out.push('}');
}

// == Invalidate Pattern ==
/// Selects the keys removed by `invalidate`.
#[derive(Debug, Clone)]
pub enum InvalidatePattern {
    /// Keys starting with this string
    Prefix(String),
    /// Keys the expression matches anywhere
    Regex(Regex),
}

impl InvalidatePattern {
    pub fn matches(&self, key: &str) -> bool {
        match self {
            InvalidatePattern::Prefix(prefix) => key.starts_with(prefix.as_str()),
            InvalidatePattern::Regex(re) => re.is_match(key),
        }
    }
}

impl From<&str> for InvalidatePattern {
    fn from(prefix: &str) -> Self {
        InvalidatePattern::Prefix(prefix.to_string())
    }
}

impl From<String> for InvalidatePattern {
    fn from(prefix: String) -> Self {
        InvalidatePattern::Prefix(prefix)
    }
}

impl From<Regex> for InvalidatePattern {
    fn from(re: Regex) -> Self {
        InvalidatePattern::Regex(re)
    }
}

impl From<&Regex> for InvalidatePattern {
    fn from(re: &Regex) -> Self {
        InvalidatePattern::Regex(re.clone())
    }
}
