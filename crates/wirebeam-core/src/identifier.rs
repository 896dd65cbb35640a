//! Element identifiers backed by a process-wide string interner.
//!
//! Layout reads happen on every resize and frame, so element references are
//! compared and hashed as [`Id`] symbols instead of strings.

use std::{
    fmt,
    sync::{Mutex, OnceLock, PoisonError},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn with_interner<R>(f: impl FnOnce(&mut DefaultStringInterner) -> R) -> R {
    let mut interner = INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        // The interner is append-only, so a poisoned lock still guards a consistent table.
        .unwrap_or_else(PoisonError::into_inner);
    f(&mut interner)
}

/// Interned identifier of a rendered element.
///
/// # Examples
///
/// ```
/// use wirebeam_core::identifier::Id;
///
/// let container = Id::new("workflow");
/// assert_eq!(container, Id::new("workflow"));
/// assert_eq!(container, "workflow");
/// assert_eq!(container.to_string(), "workflow");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    pub fn new(name: &str) -> Self {
        Self(with_interner(|interner| interner.get_or_intern(name)))
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = with_interner(|interner| interner.resolve(self.0).map(str::to_owned));
        match name {
            Some(name) => f.write_str(&name),
            None => write!(f, "<unknown:{:?}>", self.0),
        }
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        with_interner(|interner| interner.get(other)) == Some(self.0)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
