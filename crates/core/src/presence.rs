//! Presence checks for client-supplied fields.
//!
//! A field counts as present only when it is "filled": a non-empty string or
//! a non-zero number. `0` is therefore reported as missing even where zero
//! would otherwise be a legal value; clients rely on that behaviour.

/// `true` if the string field was supplied and is not empty.
pub fn is_filled(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

/// `true` if the numeric field was supplied and is not zero.
pub fn is_nonzero(value: Option<i32>) -> bool {
    value.is_some_and(|v| v != 0)
}
