//! Remote advisory service plumbing. The primary service answers when
//! reachable; otherwise the local engine supplies a fallback.

pub mod client;
pub mod selector;

pub use client::{AdvisorClient, UpstreamError};
pub use selector::{select, Envelope, ServiceOutcome};
