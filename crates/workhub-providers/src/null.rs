//! Null work provider for testing and wiring checks
//!
//! Keeps no state and performs no real work. Unlike the hello provider it
//! retrieves strictly: `get_work` never creates, so a URI that was not seen
//! by `new_work` in the same process - which for this stateless provider is
//! every URI - fails with `NotFound`.

use std::sync::Arc;

use tracing::debug;

use workhub_domain::error::{Error, Result};
use workhub_domain::ports::{Work, WorkProvider};
use workhub_domain::value_objects::{WorkOptions, WorkUri};

use workhub_registry::{WORK_PROVIDERS, WorkProviderEntry};

/// URI scheme served by this provider
pub const NULL_SCHEME: &str = "null";

/// Work that does nothing when executed
pub struct NullWork {
    uri: WorkUri,
}

impl Work for NullWork {
    fn uri(&self) -> &WorkUri {
        &self.uri
    }

    fn provider_name(&self) -> &str {
        NULL_SCHEME
    }

    fn execute(&self) -> Result<()> {
        debug!(uri = %self.uri, "null work executed");
        Ok(())
    }
}

/// Null work provider
///
/// Caches nothing: every `new_work` builds a fresh [`NullWork`] and every
/// `get_work` misses. Demonstrates the strict retrieval policy the registry
/// deliberately leaves to providers.
#[derive(Debug, Default)]
pub struct NullWorkProvider;

impl NullWorkProvider {
    /// Create a new null work provider
    pub fn new() -> Self {
        Self
    }
}

impl WorkProvider for NullWorkProvider {
    fn scheme(&self) -> &str {
        NULL_SCHEME
    }

    fn new_work(&self, uri: &WorkUri, _options: &WorkOptions) -> Result<Arc<dyn Work>> {
        Ok(Arc::new(NullWork { uri: uri.clone() }))
    }

    fn get_work(&self, uri: &WorkUri) -> Result<Arc<dyn Work>> {
        Err(Error::not_found(format!("work '{uri}'")))
    }
}

// ============================================================================
// Auto-registration via linkme
// ============================================================================

#[linkme::distributed_slice(WORK_PROVIDERS)]
static NULL_PROVIDER: WorkProviderEntry = WorkProviderEntry {
    name: "null",
    description: "Stateless no-op work provider with strict retrieval",
    constructor: || Ok(Arc::new(NullWorkProvider::new())),
};
