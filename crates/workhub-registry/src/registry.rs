//! Provider Registry
//!
//! One-time discovery and caching of installed work providers.
//!
//! Providers register a [`WorkProviderEntry`] into the [`WORK_PROVIDERS`]
//! distributed slice at compile time. The first call to
//! [`installed_providers`] constructs every registered provider, discards
//! later duplicates of an already-seen scheme (compared without regard to
//! case, first registered wins) and publishes the result as an immutable
//! snapshot shared by all subsequent callers on any thread.
//!
//! ## Concurrency contract
//!
//! - Only the first call blocks: concurrent first-time callers wait on a
//!   process-wide lock while the single discovery pass runs, then observe
//!   the identical snapshot. Discovery never runs twice for one snapshot.
//! - Publication happens-before every later read (`OnceLock`).
//! - A provider constructor that re-enters the registry would deadlock on
//!   the discovery lock; the registry detects this re-entry on the owning
//!   thread and panics instead. Circular loading is a defect in the
//!   provider's construction path, not a recoverable error.

use std::cell::RefCell;
use std::sync::{Arc, Mutex, OnceLock};

use tracing::debug;

use workhub_domain::error::{Error, Result};
use workhub_domain::ports::WorkProvider;

/// The published, immutable sequence of installed providers
pub type Snapshot = Arc<[Arc<dyn WorkProvider>]>;

/// Registry entry for work providers
///
/// Each provider implementation registers itself with this entry using
/// `#[linkme::distributed_slice(WORK_PROVIDERS)]`. The constructor takes no
/// arguments; a constructor error models a malformed provider declaration
/// and surfaces from discovery as a configuration error.
pub struct WorkProviderEntry {
    /// Unique entry name (e.g., "hello", "null")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Zero-argument constructor for the provider instance
    pub constructor: fn() -> Result<Arc<dyn WorkProvider>>,
}

// Auto-collection via linkme distributed slices - providers submit entries at compile time
#[linkme::distributed_slice]
pub static WORK_PROVIDERS: [WorkProviderEntry] = [..];

/// A source of work provider instances.
///
/// Decouples the registry core from how an environment enumerates
/// implementations: the installed set comes from [`InstalledSource`], tests
/// plug in mocks, and callers may hand a supplemental source to
/// [`new_work_with`](crate::facade::new_work_with) for schemes beyond the
/// installed set. Iteration order is the discovery order used for
/// first-seen-wins deduplication.
pub trait DiscoverySource: Send + Sync {
    /// Produce provider instances in discovery order.
    ///
    /// Fails with [`Error::Configuration`] for a malformed provider
    /// declaration; the error propagates to the caller unretried.
    fn discover(&self) -> Result<Vec<Arc<dyn WorkProvider>>>;
}

/// Discovery source backed by the [`WORK_PROVIDERS`] distributed slice
pub struct InstalledSource;

impl DiscoverySource for InstalledSource {
    fn discover(&self) -> Result<Vec<Arc<dyn WorkProvider>>> {
        let mut providers = Vec::with_capacity(WORK_PROVIDERS.len());
        for entry in WORK_PROVIDERS {
            let provider = (entry.constructor)().map_err(|source| {
                Error::configuration_with_source(
                    format!("work provider '{}' failed to initialize", entry.name),
                    source,
                )
            })?;
            providers.push(provider);
        }
        Ok(providers)
    }
}

thread_local! {
    // Registries currently discovering on this thread, keyed by address.
    // Non-empty only between lock acquisition and publication.
    static DISCOVERING: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
}

// Pops the registry key on scope exit so an error path (`?`) cannot leave
// the re-entrancy marker behind.
struct ReentryGuard {
    key: usize,
}

impl ReentryGuard {
    fn enter(key: usize) -> Self {
        DISCOVERING.with(|stack| stack.borrow_mut().push(key));
        Self { key }
    }
}

impl Drop for ReentryGuard {
    fn drop(&mut self) {
        DISCOVERING.with(|stack| {
            let mut stack = stack.borrow_mut();
            if let Some(pos) = stack.iter().rposition(|key| *key == self.key) {
                stack.remove(pos);
            }
        });
    }
}

/// Lazily-initialized registry of work providers from one discovery source.
///
/// The process-wide installed registry behind [`installed_providers`] is one
/// instance of this type wired to [`InstalledSource`]; tests build their own
/// instances around mock sources.
pub struct ProviderRegistry {
    source: Box<dyn DiscoverySource>,
    snapshot: OnceLock<Snapshot>,
    lock: Mutex<()>,
}

impl ProviderRegistry {
    /// Create a registry over the given discovery source
    pub fn new(source: Box<dyn DiscoverySource>) -> Self {
        Self {
            source,
            snapshot: OnceLock::new(),
            lock: Mutex::new(()),
        }
    }

    /// Return the installed providers, running discovery on first use.
    ///
    /// A discovery error leaves no snapshot published; the registry does
    /// not retry internally, a later first-call starts a fresh attempt.
    ///
    /// # Panics
    ///
    /// Panics when discovery re-enters this registry on the same thread
    /// (circular loading of installed providers).
    pub fn installed(&self) -> Result<Snapshot> {
        if let Some(snapshot) = self.snapshot.get() {
            return Ok(Arc::clone(snapshot));
        }
        self.discover_and_publish()
    }

    fn discover_and_publish(&self) -> Result<Snapshot> {
        let key = std::ptr::from_ref(self) as usize;
        // Checked before touching the lock: re-entry from a provider
        // constructor happens on the thread already holding it.
        if DISCOVERING.with(|stack| stack.borrow().contains(&key)) {
            panic!("circular loading of installed work providers detected");
        }

        let _lock = match self.lock.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        // Double-checked: another thread may have published while we waited
        if let Some(snapshot) = self.snapshot.get() {
            return Ok(Arc::clone(snapshot));
        }

        let _reentry = ReentryGuard::enter(key);
        debug!("discovering installed work providers");
        let discovered = self.source.discover()?;
        let providers = dedup_by_scheme(discovered);
        debug!(count = providers.len(), "installed work providers published");

        let snapshot: Snapshot = providers.into();
        // Cannot race: we hold the discovery lock
        let _ = self.snapshot.set(Arc::clone(&snapshot));
        Ok(snapshot)
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("published", &self.snapshot.get().is_some())
            .finish()
    }
}

// First occurrence per scheme wins; later duplicates are expected in
// environments with multiple candidate implementations and dropped silently.
fn dedup_by_scheme(discovered: Vec<Arc<dyn WorkProvider>>) -> Vec<Arc<dyn WorkProvider>> {
    let mut accepted: Vec<Arc<dyn WorkProvider>> = Vec::with_capacity(discovered.len());
    for provider in discovered {
        let duplicate = accepted
            .iter()
            .any(|seen| seen.scheme().eq_ignore_ascii_case(provider.scheme()));
        if duplicate {
            debug!(
                scheme = provider.scheme(),
                "duplicate work provider scheme discarded"
            );
        } else {
            accepted.push(provider);
        }
    }
    accepted
}

static INSTALLED: OnceLock<ProviderRegistry> = OnceLock::new();

/// Returns the installed work providers.
///
/// The first invocation locates and constructs every provider registered in
/// [`WORK_PROVIDERS`]; all later invocations return the same immutable
/// snapshot. See [`ProviderRegistry::installed`] for failure semantics.
pub fn installed_providers() -> Result<Snapshot> {
    INSTALLED
        .get_or_init(|| ProviderRegistry::new(Box::new(InstalledSource)))
        .installed()
}

/// List all registered work provider entries as (name, description) pairs.
///
/// Reads the registration slice directly, without triggering discovery.
/// Useful for CLI help and diagnostics.
pub fn list_work_providers() -> Vec<(&'static str, &'static str)> {
    WORK_PROVIDERS
        .iter()
        .map(|entry| (entry.name, entry.description))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use workhub_domain::ports::Work;
    use workhub_domain::value_objects::{WorkOptions, WorkUri};

    struct FakeWork {
        uri: WorkUri,
        provider_name: String,
    }

    impl Work for FakeWork {
        fn uri(&self) -> &WorkUri {
            &self.uri
        }

        fn provider_name(&self) -> &str {
            &self.provider_name
        }

        fn execute(&self) -> Result<()> {
            Ok(())
        }
    }

    struct FakeProvider {
        scheme: &'static str,
        // distinguishes duplicate-scheme instances in assertions
        name: String,
    }

    impl FakeProvider {
        fn boxed(scheme: &'static str, id: usize) -> Arc<dyn WorkProvider> {
            Arc::new(Self {
                scheme,
                name: format!("fake-{id}"),
            })
        }
    }

    impl WorkProvider for FakeProvider {
        fn scheme(&self) -> &str {
            self.scheme
        }

        fn new_work(&self, uri: &WorkUri, _options: &WorkOptions) -> Result<Arc<dyn Work>> {
            Ok(Arc::new(FakeWork {
                uri: uri.clone(),
                provider_name: self.name.clone(),
            }))
        }

        fn get_work(&self, uri: &WorkUri) -> Result<Arc<dyn Work>> {
            Ok(Arc::new(FakeWork {
                uri: uri.clone(),
                provider_name: self.name.clone(),
            }))
        }
    }

    struct StaticSource {
        providers: Vec<(&'static str, usize)>,
        discoveries: AtomicUsize,
    }

    impl StaticSource {
        fn new(providers: Vec<(&'static str, usize)>) -> Self {
            Self {
                providers,
                discoveries: AtomicUsize::new(0),
            }
        }
    }

    impl DiscoverySource for StaticSource {
        fn discover(&self) -> Result<Vec<Arc<dyn WorkProvider>>> {
            self.discoveries.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .providers
                .iter()
                .map(|(scheme, id)| FakeProvider::boxed(scheme, *id))
                .collect())
        }
    }

    fn provider_name(provider: &Arc<dyn WorkProvider>) -> String {
        let uri = WorkUri::parse("probe:1").unwrap();
        let work = provider.get_work(&uri).unwrap();
        work.provider_name().to_string()
    }

    #[test]
    fn dedup_keeps_first_instance_per_scheme_case_insensitively() {
        let source = StaticSource::new(vec![("a", 1), ("A", 2), ("b", 3)]);
        let registry = ProviderRegistry::new(Box::new(source));

        let snapshot = registry.installed().unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].scheme(), "a");
        assert_eq!(
            provider_name(&snapshot[0]),
            "fake-1",
            "first instance of 'a' wins"
        );
        assert_eq!(snapshot[1].scheme(), "b");
    }

    #[test]
    fn snapshot_is_published_once_and_shared() {
        let registry = ProviderRegistry::new(Box::new(StaticSource::new(vec![("a", 1)])));

        let first = registry.installed().unwrap();
        let second = registry.installed().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn concurrent_first_use_runs_discovery_exactly_once() {
        let source = Arc::new(StaticSource::new(vec![("a", 1), ("b", 2)]));

        struct Shared(Arc<StaticSource>);
        impl DiscoverySource for Shared {
            fn discover(&self) -> Result<Vec<Arc<dyn WorkProvider>>> {
                // Widen the race window so threads really pile up on the lock
                std::thread::sleep(std::time::Duration::from_millis(20));
                self.0.discover()
            }
        }

        let registry = Arc::new(ProviderRegistry::new(Box::new(Shared(Arc::clone(&source)))));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || registry.installed().unwrap())
            })
            .collect();

        let snapshots: Vec<Snapshot> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(source.discoveries.load(Ordering::SeqCst), 1);
        for snapshot in &snapshots[1..] {
            assert!(Arc::ptr_eq(&snapshots[0], snapshot));
        }
    }

    #[test]
    #[should_panic(expected = "circular loading of installed work providers")]
    fn circular_discovery_panics_instead_of_hanging() {
        #[derive(Clone, Default)]
        struct ReentrantSource {
            registry: Arc<OnceLock<Arc<ProviderRegistry>>>,
        }

        impl DiscoverySource for ReentrantSource {
            fn discover(&self) -> Result<Vec<Arc<dyn WorkProvider>>> {
                // A provider construction path querying the registry it is
                // being loaded into
                let registry = self.registry.get().expect("registry wired");
                let _ = registry.installed()?;
                Ok(Vec::new())
            }
        }

        let source = ReentrantSource::default();
        let registry = Arc::new(ProviderRegistry::new(Box::new(source.clone())));
        source
            .registry
            .set(Arc::clone(&registry))
            .expect("wired once");

        let _ = registry.installed();
    }

    #[test]
    fn discovery_error_propagates_and_next_call_may_retry() {
        struct FailsOnce {
            failed: Mutex<bool>,
        }

        impl DiscoverySource for FailsOnce {
            fn discover(&self) -> Result<Vec<Arc<dyn WorkProvider>>> {
                let mut failed = self.failed.lock().unwrap();
                if !*failed {
                    *failed = true;
                    return Err(Error::configuration("malformed provider declaration"));
                }
                Ok(vec![FakeProvider::boxed("a", 1)])
            }
        }

        let registry = ProviderRegistry::new(Box::new(FailsOnce {
            failed: Mutex::new(false),
        }));

        let err = registry.installed().unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));

        // No snapshot was published, so a later first-call starts over
        let snapshot = registry.installed().unwrap();
        assert_eq!(snapshot.len(), 1);
    }

    #[test]
    fn installed_source_is_empty_without_linked_providers() {
        // Providers register from workhub-providers, which unit tests of
        // this crate do not link; the integration tests cover the populated
        // slice.
        let discovered = InstalledSource.discover().unwrap();
        assert!(discovered.is_empty());
        assert!(list_work_providers().is_empty());
    }
}
