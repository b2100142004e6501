//! Work URI Value Object
//!
//! A work URI is treated as an opaque identifier with one structured
//! component: the scheme. Everything after the first `:` belongs to the
//! provider. Full URI parsing and validation stay out of scope.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Value Object: Work URI
///
/// Wraps the raw URI string and exposes the scheme split used for provider
/// dispatch. A URI without a `:` has no scheme; its scheme-specific-part is
/// the whole string and doubles as the routing key (so the bare string
/// `hello` dispatches like `hello:...`).
///
/// Equality and hashing are on the raw string - a work is identified by the
/// exact URI that created it.
///
/// # Example
///
/// ```rust
/// use workhub_domain::value_objects::WorkUri;
///
/// let uri = WorkUri::parse("hello:morning?lang=en").unwrap();
/// assert_eq!(uri.scheme(), Some("hello"));
/// assert_eq!(uri.scheme_specific_part(), "morning?lang=en");
/// assert_eq!(uri.routing_key(), "hello");
///
/// let bare = WorkUri::parse("hello").unwrap();
/// assert_eq!(bare.scheme(), None);
/// assert_eq!(bare.routing_key(), "hello");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WorkUri {
    raw: String,
    // byte offset of the ':' separating scheme from the rest, if any
    scheme_end: Option<usize>,
}

impl WorkUri {
    /// Parse a work URI from a string.
    ///
    /// Fails with [`Error::InvalidArgument`] when the input is empty or the
    /// text before the first `:` is not a valid scheme (ASCII letter
    /// followed by letters, digits, `+`, `-` or `.`).
    pub fn parse<S: Into<String>>(input: S) -> Result<Self> {
        let raw = input.into();
        if raw.is_empty() {
            return Err(Error::invalid_argument("work URI must not be empty"));
        }
        let scheme_end = match raw.find(':') {
            Some(idx) => {
                if !is_valid_scheme(&raw[..idx]) {
                    return Err(Error::invalid_argument(format!(
                        "invalid scheme '{}' in work URI '{}'",
                        &raw[..idx],
                        raw
                    )));
                }
                Some(idx)
            }
            None => None,
        };
        Ok(Self { raw, scheme_end })
    }

    /// The URI scheme, if present
    pub fn scheme(&self) -> Option<&str> {
        self.scheme_end.map(|idx| &self.raw[..idx])
    }

    /// Everything after the scheme, or the whole URI when there is none
    pub fn scheme_specific_part(&self) -> &str {
        match self.scheme_end {
            Some(idx) => &self.raw[idx + 1..],
            None => &self.raw,
        }
    }

    /// The key providers are matched against: the scheme, falling back to
    /// the scheme-specific-part when the scheme is absent
    pub fn routing_key(&self) -> &str {
        match self.scheme() {
            Some(scheme) => scheme,
            None => self.scheme_specific_part(),
        }
    }

    /// The raw URI string
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

// RFC 3986: scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
fn is_valid_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        _ => false,
    }
}

impl fmt::Display for WorkUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for WorkUri {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for WorkUri {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<WorkUri> for String {
    fn from(uri: WorkUri) -> Self {
        uri.raw
    }
}
