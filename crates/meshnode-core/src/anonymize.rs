//! Log-safe rendering of identity and location values
//!
//! Debug output of the value objects never carries a raw node id, name or
//! coordinate. Values are passed through [`anonymize`], which keeps only the
//! trailing characters of their textual form.

use core::fmt;

/// Number of trailing characters kept by default
pub const DEFAULT_VISIBLE_CHARS: usize = 3;

/// Render `value` keeping only its last [`DEFAULT_VISIBLE_CHARS`] characters
pub fn anonymize<T: fmt::Display + ?Sized>(value: &T) -> String {
    anonymize_with(value, DEFAULT_VISIBLE_CHARS)
}

/// Render `value` keeping only its last `visible` characters, prefixed by `...`
pub fn anonymize_with<T: fmt::Display + ?Sized>(value: &T, visible: usize) -> String {
    let text = value.to_string();
    let count = text.chars().count();
    let tail: String = text.chars().skip(count.saturating_sub(visible)).collect();
    format!("...{}", tail)
}

/// Render an optional value, `null` when absent
pub fn anonymize_opt<T: fmt::Display>(value: Option<&T>) -> String {
    match value {
        Some(v) => anonymize(v),
        None => "null".to_string(),
    }
}

/// Display adapter that anonymizes its content inside format strings
pub struct Anonymized<'a, T: fmt::Display + ?Sized>(pub &'a T);

impl<T: fmt::Display + ?Sized> fmt::Display for Anonymized<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&anonymize(self.0))
    }
}

impl<T: fmt::Display + ?Sized> fmt::Debug for Anonymized<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&anonymize(self.0))
    }
}
