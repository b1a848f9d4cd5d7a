//! Core components of the `lastfm-rs` client.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The [`Network`] descriptor and its builder.
//! - The primary [`FmError`] type and the service status codes.
//! - The request pipeline: signing, caching, rate limiting, XML parsing and repair.
//! - Pagination and extraction helpers shared by the entity modules.

/// Pluggable response cache (`MemoryCache`, `FileCache`).
pub mod cache;
pub mod entity;
/// The primary error type (`FmError`) for the crate.
pub mod error;
pub mod executor;
pub mod extract;
/// Shared data models used across multiple entity modules (e.g., `TopItem`, `PlayedTrack`).
pub mod models;
/// The network descriptor (`Network`), builder, and session flows.
pub mod network;
pub mod paginator;
pub mod params;
pub mod retry;
pub mod signer;
pub mod status;
pub mod xml;

// convenient re-exports so most code can just `use crate::core::Network`
pub use cache::{CacheBackend, FileCache, MemoryCache};
pub use error::FmError;
pub use executor::Request;
pub use models::{LibraryItem, LovedTrack, Period, PlayedTrack, SimilarItem, TopItem};
pub use network::{Domain, Network, NetworkBuilder, Service, Session, UrlKind};
pub use paginator::{NodeStream, PageSource};
pub use params::{ParamValue, Params};
pub use retry::{Backoff, RetryConfig};
pub use xml::{Document, Element, Node};
