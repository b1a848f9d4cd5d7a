//! Centralized constants for service endpoints, UA and pipeline defaults.

use std::time::Duration;

use super::UrlKind;

/// Identifies this client to the web service.
pub(crate) const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Minimum spacing between dispatches on one network when rate limiting is on.
pub(crate) const RATE_LIMIT_DELAY: Duration = Duration::from_millis(200);

/// Attempts per page before the paginator gives up.
pub(crate) const PAGE_ATTEMPTS: u32 = 3;

/// Pause between page attempts.
pub(crate) const PAGE_BACKOFF: Duration = Duration::from_secs(1);

/// Last.fm.
pub(crate) const LASTFM_NAME: &str = "Last.fm";
pub(crate) const LASTFM_HOMEPAGE: &str = "https://www.last.fm";
pub(crate) const LASTFM_WS: &str = "https://ws.audioscrobbler.com/2.0/";

/// Libre.fm.
pub(crate) const LIBREFM_NAME: &str = "Libre.fm";
pub(crate) const LIBREFM_HOMEPAGE: &str = "https://libre.fm";
pub(crate) const LIBREFM_WS: &str = "https://libre.fm/2.0/";

pub(crate) const LASTFM_URLS: &[(UrlKind, &str)] = &[
    (UrlKind::Artist, "music/{artist}"),
    (UrlKind::Album, "music/{artist}/{album}"),
    (UrlKind::Track, "music/{artist}/_/{title}"),
    (UrlKind::Tag, "tag/{name}"),
    (UrlKind::User, "user/{name}"),
    (UrlKind::Country, "place/{country_name}"),
];

pub(crate) const LIBREFM_URLS: &[(UrlKind, &str)] = &[
    (UrlKind::Artist, "artist/{artist}"),
    (UrlKind::Album, "artist/{artist}/album/{album}"),
    (UrlKind::Track, "music/{artist}/_/{title}"),
    (UrlKind::Tag, "tag/{name}"),
    (UrlKind::User, "user/{name}"),
    (UrlKind::Country, "place/{country_name}"),
];
