//! Immutable shared strings.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::{Arc, OnceLock};

use rustc_hash::FxHasher;

/// Backing allocation shared by every clone of a [`Text`].
struct TextInner {
    value: Box<str>,
    /// Computed on first request, then reused by every clone.
    hash: OnceLock<u64>,
}

/// An immutable, cheaply cloned string with a memoized hash.
#[derive(Clone)]
pub struct Text(Arc<TextInner>);

static EMPTY: OnceLock<Text> = OnceLock::new();

impl Text {
    pub fn new(value: impl Into<Box<str>>) -> Self {
        Text(Arc::new(TextInner {
            value: value.into(),
            hash: OnceLock::new(),
        }))
    }

    /// The process-wide empty text; every call shares one allocation.
    pub fn empty() -> Text {
        EMPTY.get_or_init(|| Text::new("")).clone()
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0.value
    }

    pub fn len(&self) -> usize {
        self.0.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.value.is_empty()
    }

    /// Content hash, computed once per allocation.
    pub fn hash_code(&self) -> u64 {
        *self.0.hash.get_or_init(|| {
            let mut hasher = FxHasher::default();
            self.0.value.hash(&mut hasher);
            hasher.finish()
        })
    }

    /// True when both handles share one allocation.
    pub fn ptr_eq(&self, other: &Text) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Concatenation; returns the non-empty operand unchanged when the other
    /// is empty.
    pub fn concat(&self, that: &Text) -> Text {
        if that.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return that.clone();
        }
        let mut joined = String::with_capacity(self.len() + that.len());
        joined.push_str(self.as_str());
        joined.push_str(that.as_str());
        Text::from(joined)
    }

    /// True when the text can be written without quotes: a letter or `_`
    /// followed by letters, digits, `_` or `-`.
    pub fn is_ident(&self) -> bool {
        let mut chars = self.as_str().chars();
        match chars.next() {
            Some(first) if first.is_alphabetic() || first == '_' => {
                chars.all(|c| c.is_alphanumeric() || c == '_' || c == '-')
            }
            _ => false,
        }
    }
}

impl Deref for Text {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for Text {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for Text {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl Default for Text {
    fn default() -> Self {
        Text::empty()
    }
}

impl PartialEq for Text {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.as_str() == other.as_str()
    }
}

impl Eq for Text {}

impl PartialEq<str> for Text {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Text {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialOrd for Text {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Text {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl Hash for Text {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Must agree with `str: Hash` for the `Borrow<str>` impl
        self.as_str().hash(state);
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl From<&str> for Text {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            Text::empty()
        } else {
            Text::new(value)
        }
    }
}

impl From<String> for Text {
    fn from(value: String) -> Self {
        if value.is_empty() {
            Text::empty()
        } else {
            Text::new(value)
        }
    }
}

impl From<&String> for Text {
    fn from(value: &String) -> Self {
        Text::from(value.as_str())
    }
}

impl From<char> for Text {
    fn from(value: char) -> Self {
        Text::from(value.to_string())
    }
}

impl From<&Text> for Text {
    fn from(value: &Text) -> Self {
        value.clone()
    }
}

#[cfg(test)]
mod tests;
