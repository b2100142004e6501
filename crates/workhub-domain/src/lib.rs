//! # workhub - Domain Layer
//!
//! Core contract and types for the work-provider registry. A *work* is a
//! provider-specific resource addressed by a URI; a *provider* is a concrete
//! implementation identified by the URI scheme it understands.
//!
//! This crate has no dependency on the registry or on any provider
//! implementation. It defines:
//!
//! - `ports` - the [`WorkProvider`](ports::WorkProvider) and
//!   [`Work`](ports::Work) traits every provider implements
//! - `value_objects` - [`WorkUri`](value_objects::WorkUri) and
//!   [`WorkOptions`](value_objects::WorkOptions)
//! - `error` - the error taxonomy shared across the workspace

/// Error handling types
pub mod error;

/// Port traits implemented by concrete providers
pub mod ports;

/// Value objects shared across layers
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::{Work, WorkProvider};
pub use value_objects::{WorkOptions, WorkUri};
