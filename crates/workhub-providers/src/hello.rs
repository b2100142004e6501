//! Hello work provider implementation
//!
//! The canonical in-memory provider: keeps a map from URI to work and hands
//! back the cached entry on repeat requests. Retrieval is permissive - a
//! miss creates the work transparently, as if `new_work` had been called
//! with no options. A stricter provider would fail the miss instead; that
//! policy choice belongs to the provider, not the registry.

use std::sync::Arc;

use dashmap::DashMap;

use tracing::info;

use workhub_domain::error::{Error, Result};
use workhub_domain::ports::{Work, WorkProvider};
use workhub_domain::value_objects::{WorkOptions, WorkUri};

use workhub_registry::{WORK_PROVIDERS, WorkProviderEntry};

/// URI scheme served by this provider
pub const HELLO_SCHEME: &str = "hello";

/// Option key overriding the greeting text
pub const GREETING_OPTION: &str = "greeting";

const DEFAULT_GREETING: &str = "Hello World";

/// Work that greets when executed
pub struct HelloWork {
    uri: WorkUri,
    greeting: String,
}

impl HelloWork {
    /// The greeting this work emits
    pub fn greeting(&self) -> &str {
        &self.greeting
    }
}

impl Work for HelloWork {
    fn uri(&self) -> &WorkUri {
        &self.uri
    }

    fn provider_name(&self) -> &str {
        HELLO_SCHEME
    }

    fn execute(&self) -> Result<()> {
        info!(uri = %self.uri, "{}", self.greeting);
        Ok(())
    }
}

/// Greeting work provider
///
/// Caches one [`HelloWork`] per URI. The first `new_work` for a URI decides
/// the greeting (from the `greeting` option or the default); later calls
/// for the same URI return the cached work unchanged, whatever their
/// options say.
#[derive(Default)]
pub struct HelloWorkProvider {
    works: DashMap<WorkUri, Arc<HelloWork>>,
}

impl HelloWorkProvider {
    /// Create a new hello work provider with an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    fn validate_options(options: &WorkOptions) -> Result<()> {
        for key in options.keys() {
            if key != GREETING_OPTION {
                return Err(Error::invalid_argument(format!(
                    "unknown option '{key}' for the hello work provider"
                )));
            }
        }
        if let Some(value) = options.get(GREETING_OPTION) {
            if !value.is_string() {
                return Err(Error::invalid_argument(format!(
                    "option '{GREETING_OPTION}' must be a string, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl WorkProvider for HelloWorkProvider {
    fn scheme(&self) -> &str {
        HELLO_SCHEME
    }

    fn new_work(&self, uri: &WorkUri, options: &WorkOptions) -> Result<Arc<dyn Work>> {
        Self::validate_options(options)?;
        let greeting = options
            .get_str(GREETING_OPTION)
            .unwrap_or(DEFAULT_GREETING)
            .to_string();
        let work = self
            .works
            .entry(uri.clone())
            .or_insert_with(|| {
                Arc::new(HelloWork {
                    uri: uri.clone(),
                    greeting,
                })
            })
            .clone();
        Ok(work)
    }

    fn get_work(&self, uri: &WorkUri) -> Result<Arc<dyn Work>> {
        match self.works.get(uri) {
            Some(work) => Ok(Arc::clone(&*work) as Arc<dyn Work>),
            // Permissive miss policy: fall through to creation with no options
            None => self.new_work(uri, &WorkOptions::new()),
        }
    }
}

impl std::fmt::Debug for HelloWorkProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HelloWorkProvider")
            .field("works", &self.works.len())
            .finish()
    }
}

// ============================================================================
// Auto-registration via linkme
// ============================================================================

#[linkme::distributed_slice(WORK_PROVIDERS)]
static HELLO_PROVIDER: WorkProviderEntry = WorkProviderEntry {
    name: "hello",
    description: "In-memory greeting work provider",
    constructor: || Ok(Arc::new(HelloWorkProvider::new())),
};
