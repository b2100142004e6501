//! # workhub - Provider Implementations
//!
//! Concrete work providers. Each implements the
//! [`WorkProvider`](workhub_domain::ports::WorkProvider) port defined in
//! `workhub-domain` and registers itself into the
//! [`WORK_PROVIDERS`](workhub_registry::WORK_PROVIDERS) slice declared in
//! `workhub-registry`.
//!
//! | Scheme | Provider | `get_work` miss policy |
//! |--------|----------|------------------------|
//! | `hello` | [`HelloWorkProvider`] | permissive - creates transparently |
//! | `null` | [`NullWorkProvider`] | strict - fails with `NotFound` |
//!
//! Linking this crate is what makes the providers "installed": binaries and
//! integration tests pull it in (an `extern crate workhub_providers` is
//! enough) so the linkme registrations are present.

// Re-export workhub-domain types commonly used with providers
pub use workhub_domain::error::{Error, Result};
pub use workhub_domain::ports::{Work, WorkProvider};

/// Greeting work provider
///
/// Implements `WorkProvider` with an in-memory URI-to-work cache.
pub mod hello;

/// Null work provider
///
/// Stateless wiring-check provider with a strict retrieval policy.
pub mod null;

pub use hello::{HelloWork, HelloWorkProvider};
pub use null::{NullWork, NullWorkProvider};
