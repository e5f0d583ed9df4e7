//! Operator-injection guard for document store input.
//!
//! Keys beginning with `$` are interpreted by the document store as query
//! operators, and dotted keys address nested fields. Client input headed for
//! the store has those characters rewritten in its keys. Values are left
//! alone and no field is ever dropped.

use std::borrow::Cow;

use serde_json::{Map, Value};

const OPERATOR_PREFIX: char = '$';
const ENCODED_OPERATOR_PREFIX: &str = "%24";
const PATH_SEPARATOR: char = '.';
const ENCODED_PATH_SEPARATOR: &str = "%2e";

/// How offending key characters are rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizeOptions {
    /// Character substituted for each offending one.
    pub replace_with: char,
    /// Leave `.` in keys untouched (nested-key addressing stays possible).
    pub allow_dots: bool,
}

impl Default for SanitizeOptions {
    fn default() -> Self {
        Self {
            replace_with: '_',
            allow_dots: true,
        }
    }
}

/// Rewrite a single key. Borrowed when nothing needed changing.
pub fn sanitize_key<'a>(key: &'a str, options: &SanitizeOptions) -> Cow<'a, str> {
    let has_prefix = key.starts_with(OPERATOR_PREFIX);
    let has_dots = !options.allow_dots && key.contains(PATH_SEPARATOR);
    if !has_prefix && !has_dots {
        return Cow::Borrowed(key);
    }

    let mut out = String::with_capacity(key.len());
    for (i, c) in key.char_indices() {
        if (i == 0 && c == OPERATOR_PREFIX) || (!options.allow_dots && c == PATH_SEPARATOR) {
            out.push(options.replace_with);
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

/// Recursively rewrite every object key inside `value`.
///
/// Returns `true` if at least one key was changed.
pub fn sanitize_value(value: &mut Value, options: &SanitizeOptions) -> bool {
    match value {
        Value::Object(map) => {
            let mut changed = false;
            let mut cleaned = Map::with_capacity(map.len());
            for (key, mut inner) in std::mem::take(map) {
                changed |= sanitize_value(&mut inner, options);
                let key = match sanitize_key(&key, options) {
                    Cow::Borrowed(_) => key,
                    Cow::Owned(rewritten) => {
                        changed = true;
                        rewritten
                    }
                };
                cleaned.insert(key, inner);
            }
            *map = cleaned;
            changed
        }
        Value::Array(items) => items
            .iter_mut()
            .fold(false, |changed, item| sanitize_value(item, options) | changed),
        _ => false,
    }
}

/// Rewrite the keys of a raw (still percent-encoded) query string.
///
/// Both literal and percent-encoded forms of the offending characters are
/// recognised. Borrowed when nothing needed changing.
pub fn sanitize_query<'a>(query: &'a str, options: &SanitizeOptions) -> Cow<'a, str> {
    let mut changed = false;
    let pairs: Vec<Cow<'_, str>> = query
        .split('&')
        .map(|pair| {
            let (key, rest) = match pair.find('=') {
                Some(pos) => pair.split_at(pos),
                None => (pair, ""),
            };
            match sanitize_encoded_key(key, options) {
                Some(key) => {
                    changed = true;
                    Cow::Owned(format!("{key}{rest}"))
                }
                None => Cow::Borrowed(pair),
            }
        })
        .collect();

    if changed {
        Cow::Owned(pairs.join("&"))
    } else {
        Cow::Borrowed(query)
    }
}

fn sanitize_encoded_key(key: &str, options: &SanitizeOptions) -> Option<String> {
    let replacement = encode_replacement(options.replace_with);
    let mut out = String::with_capacity(key.len());
    let mut rest = key;
    let mut changed = false;

    if let Some(stripped) = rest.strip_prefix(OPERATOR_PREFIX) {
        out.push_str(&replacement);
        rest = stripped;
        changed = true;
    } else if starts_with_ignore_case(rest, ENCODED_OPERATOR_PREFIX) {
        out.push_str(&replacement);
        rest = &rest[ENCODED_OPERATOR_PREFIX.len()..];
        changed = true;
    }

    if options.allow_dots {
        out.push_str(rest);
        return changed.then_some(out);
    }

    while !rest.is_empty() {
        if let Some(stripped) = rest.strip_prefix(PATH_SEPARATOR) {
            out.push_str(&replacement);
            rest = stripped;
            changed = true;
        } else if starts_with_ignore_case(rest, ENCODED_PATH_SEPARATOR) {
            out.push_str(&replacement);
            rest = &rest[ENCODED_PATH_SEPARATOR.len()..];
            changed = true;
        } else {
            let c = rest.chars().next().unwrap_or_default();
            out.push(c);
            rest = &rest[c.len_utf8()..];
        }
    }
    changed.then_some(out)
}

fn starts_with_ignore_case(haystack: &str, prefix: &str) -> bool {
    haystack
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

fn encode_replacement(c: char) -> String {
    if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~') {
        return c.to_string();
    }
    let mut buf = [0u8; 4];
    c.encode_utf8(&mut buf)
        .bytes()
        .map(|b| format!("%{b:02X}"))
        .collect()
}
