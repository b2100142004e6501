//! Work Provider Port
//!
//! Port for pluggable work providers. A provider is a factory for one or
//! more [`Work`] instances, each identified by a URI whose scheme matches
//! the provider's [`scheme`](WorkProvider::scheme).
//!
//! Providers are constructed once by discovery and live for the process
//! lifetime behind `Arc`. Whether repeated requests for the same URI reuse
//! one `Work` or construct a fresh one is provider policy; the registry
//! enforces nothing beyond scheme identity.

use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::value_objects::{WorkOptions, WorkUri};

/// A provider-specific resource addressed by a URI.
///
/// A `Work` is owned by the provider that created it; there is no
/// cross-provider sharing. Equality of two works is `Arc` identity.
pub trait Work: Send + Sync {
    /// The URI this work was created or retrieved for
    fn uri(&self) -> &WorkUri;

    /// Name of the provider that owns this work
    fn provider_name(&self) -> &str;

    /// Run the work
    fn execute(&self) -> Result<()>;
}

impl fmt::Debug for dyn Work {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Work")
            .field("uri", &self.uri())
            .field("provider_name", &self.provider_name())
            .finish()
    }
}

/// Contract every work provider implements.
///
/// A provider used from multiple threads must serialize its own cache
/// mutations; the registry shares providers freely across threads and does
/// not constrain their internal discipline.
pub trait WorkProvider: Send + Sync {
    /// The URI scheme that identifies this provider.
    ///
    /// Compared case-insensitively; must be stable for the provider's
    /// lifetime and have no side effects.
    fn scheme(&self) -> &str;

    /// Construct a work identified by `uri`.
    ///
    /// `options` is a map of provider-specific properties and may be empty.
    /// Fails with [`Error::InvalidArgument`](crate::Error::InvalidArgument)
    /// when a required key is missing or a value is invalid. A provider may
    /// return an existing work for an already-seen URI instead of
    /// constructing a new one.
    fn new_work(&self, uri: &WorkUri, options: &WorkOptions) -> Result<Arc<dyn Work>>;

    /// Return an existing work created by this provider.
    ///
    /// A hit must return the same logical work (`Arc` identity) as the
    /// prior `new_work` for that URI. Miss behavior is provider policy:
    /// permissive providers create transparently, strict ones fail with
    /// [`Error::NotFound`](crate::Error::NotFound).
    fn get_work(&self, uri: &WorkUri) -> Result<Arc<dyn Work>>;
}

impl fmt::Debug for dyn WorkProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkProvider").field("scheme", &self.scheme()).finish()
    }
}
