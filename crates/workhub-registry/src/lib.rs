//! # workhub - Provider Registry
//!
//! Discovery and scheme-based dispatch for work providers.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                     Provider Resolution Flow                   │
//! ├────────────────────────────────────────────────────────────────┤
//! │                                                                │
//! │  1. Provider defines:  #[linkme::distributed_slice(WORK_PROVIDERS)]
//! │                        static ENTRY: WorkProviderEntry = ...   │
//! │                              ↓                                 │
//! │  2. Registry declares: #[linkme::distributed_slice]            │
//! │                        pub static WORK_PROVIDERS: [Entry]      │
//! │                              ↓                                 │
//! │  3. First use:         discover once, dedup by scheme,        │
//! │                        publish immutable snapshot              │
//! │                              ↓                                 │
//! │  4. Facade dispatches: "hello:..." → HelloWorkProvider         │
//! │                                                                │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The registry runs discovery at most once per process; every caller after
//! first publication reads the same immutable snapshot without locking.
//! See [`registry`] for the concurrency contract and [`facade`] for the
//! caller-facing `get_work`/`new_work` operations.

/// Provider discovery and the installed-provider snapshot
pub mod registry;

/// Caller-facing dispatch operations
pub mod facade;

pub use facade::{get_work, new_work, new_work_with};
pub use registry::{
    DiscoverySource, InstalledSource, ProviderRegistry, Snapshot, WORK_PROVIDERS,
    WorkProviderEntry, installed_providers, list_work_providers,
};
