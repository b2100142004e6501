//! Dispatch Facade
//!
//! Factory methods for works. Extracts a URI's routing key (its scheme, or
//! the scheme-specific-part when no scheme is present), scans the installed
//! providers for a case-insensitive match and delegates. An unmatched key
//! fails with [`Error::ProviderNotFound`] carrying the literal key; callers
//! should treat that as an expected, handleable condition.
//!
//! The first invocation of any of these methods triggers the one-time
//! provider discovery described in [`registry`](crate::registry).

use std::sync::Arc;

use tracing::debug;

use workhub_domain::error::{Error, Result};
use workhub_domain::ports::{Work, WorkProvider};
use workhub_domain::value_objects::{WorkOptions, WorkUri};

use crate::registry::{DiscoverySource, installed_providers};

/// Returns a reference to an existing work.
///
/// Scans the installed providers for the URI's routing key and delegates to
/// the matching provider's `get_work`. Whether a miss inside the provider
/// creates transparently or fails is that provider's policy.
pub fn get_work(uri: &WorkUri) -> Result<Arc<dyn Work>> {
    let key = uri.routing_key();
    let installed = installed_providers()?;
    match match_scheme(installed.iter(), key) {
        Some(provider) => {
            debug!(scheme = provider.scheme(), uri = %uri, "dispatching get_work");
            provider.get_work(uri)
        }
        None => Err(Error::provider_not_found(key)),
    }
}

/// Constructs a new work identified by a URI.
///
/// `options` is a map of provider-specific properties and may be empty.
///
/// # Example
///
/// ```ignore
/// let options = WorkOptions::new().with("greeting", "Good morning");
/// let work = new_work(&WorkUri::parse("hello:///?name=logs")?, &options)?;
/// ```
pub fn new_work(uri: &WorkUri, options: &WorkOptions) -> Result<Arc<dyn Work>> {
    let key = uri.routing_key();
    let installed = installed_providers()?;
    match match_scheme(installed.iter(), key) {
        Some(provider) => {
            debug!(scheme = provider.scheme(), uri = %uri, "dispatching new_work");
            provider.new_work(uri, options)
        }
        None => Err(Error::provider_not_found(key)),
    }
}

/// Constructs a new work, consulting a supplemental discovery source when
/// no installed provider matches.
///
/// The two-tier lookup checks the installed snapshot first, exactly as
/// [`new_work`] does, then repeats the scheme scan against providers from
/// `supplemental`. Supplemental providers are discovered per call and never
/// cached into the shared installed snapshot.
pub fn new_work_with(
    uri: &WorkUri,
    options: &WorkOptions,
    supplemental: &dyn DiscoverySource,
) -> Result<Arc<dyn Work>> {
    let key = uri.routing_key();
    let installed = installed_providers()?;
    if let Some(provider) = match_scheme(installed.iter(), key) {
        debug!(scheme = provider.scheme(), uri = %uri, "dispatching new_work");
        return provider.new_work(uri, options);
    }

    let extra = supplemental.discover()?;
    match match_scheme(extra.iter(), key) {
        Some(provider) => {
            debug!(
                scheme = provider.scheme(),
                uri = %uri,
                "dispatching new_work to supplemental provider"
            );
            provider.new_work(uri, options)
        }
        None => Err(Error::provider_not_found(key)),
    }
}

fn match_scheme<'a, I>(providers: I, key: &str) -> Option<&'a Arc<dyn WorkProvider>>
where
    I: IntoIterator<Item = &'a Arc<dyn WorkProvider>>,
{
    providers
        .into_iter()
        .find(|provider| provider.scheme().eq_ignore_ascii_case(key))
}
