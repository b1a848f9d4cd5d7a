//! lastfm-rs: client for the Last.fm web service and compatible deployments (Libre.fm).
//!
//! Every call goes through one pipeline: parameters are signed when a session exists,
//! responses can be cached, dispatches can be rate limited, and XML bodies are repaired
//! when the server emits characters XML forbids.
//!
//! # Example
//!
//! ```no_run
//! use lastfm_rs::{Artist, Network, Service};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), lastfm_rs::FmError> {
//! let network = Network::builder(Service::LastFm)
//!     .api_key("KEY")
//!     .cache_in_memory()
//!     .rate_limit(true)
//!     .build()?;
//!
//! let cher = Artist::new(&network, "Cher");
//! for similar in cher.similar(Some(5)).await? {
//!     println!("{} ({:.2})", similar.item.name(), similar.score);
//! }
//! # Ok(())
//! # }
//! ```

pub mod core;

pub mod album;
pub mod artist;
pub mod chart;
pub mod country;
pub mod scrobble;
pub mod tag;
pub mod track;
pub mod user;

pub use album::Album;
pub use artist::Artist;
pub use chart::ArtistSearch;
pub use country::Country;
pub use scrobble::{NowPlaying, Scrobble, ScrobbleReport};
pub use tag::Tag;
pub use track::Track;
pub use user::User;

pub use crate::core::status;
pub use crate::core::{
    Backoff, CacheBackend, Document, Domain, Element, FileCache, FmError, LibraryItem, LovedTrack,
    MemoryCache, Network, NetworkBuilder, Period, PlayedTrack, Request, RetryConfig, Service,
    Session, SimilarItem, TopItem, UrlKind,
};
