//! A listener's profile, history and library.

use crate::core::entity::Entity;
use crate::core::executor::Request;
use crate::core::models::{LibraryItem, LovedTrack, Period, PlayedTrack, TopItem, timestamp_from_uts};
use crate::core::network::{Domain, UrlKind};
use crate::core::params::Params;
use crate::core::xml::Element;
use crate::core::{FmError, Network, extract};
use crate::{Album, Artist, Track};

#[derive(Debug, Clone)]
pub struct User {
    network: Network,
    name: String,
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.name.to_lowercase() == other.name.to_lowercase()
    }
}

impl Entity for User {
    const WS_PREFIX: &'static str = "user";

    fn network(&self) -> &Network {
        &self.network
    }

    fn identity_params(&self) -> Params {
        Params::new().with("user", self.name.as_str())
    }
}

impl User {
    pub fn new(network: &Network, name: impl Into<String>) -> Self {
        Self {
            network: network.clone(),
            name: name.into(),
        }
    }

    /// The user the network is authenticated as.
    ///
    /// # Errors
    ///
    /// Returns [`FmError::Client`] when the network has no username.
    pub async fn authenticated(network: &Network) -> Result<Self, FmError> {
        let name = network
            .username()
            .await
            .ok_or_else(|| FmError::client("network has no authenticated user"))?;
        Ok(Self::new(network, name))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Total scrobbles.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn playcount(&self) -> Result<u64, FmError> {
        let doc = self.network.execute(&self.request("getInfo").cacheable(true)).await?;
        Ok(extract::number(doc.root(), "playcount").unwrap_or(0))
    }

    /// Listening history, newest first. The track currently playing is not included.
    ///
    /// # Errors
    ///
    /// Returns an error if a page cannot be fetched.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(user = %self.name)))]
    pub async fn recent_tracks(&self, limit: Option<usize>) -> Result<Vec<PlayedTrack>, FmError> {
        // one extra node in case the first is the now-playing entry
        let nodes = self
            .network
            .collect_pages(self.request("getRecentTracks"), limit.map(|l| l.saturating_add(1)))
            .await?;
        let mut played: Vec<PlayedTrack> = nodes
            .iter()
            .filter(|n| !is_now_playing(n))
            .filter_map(|n| self.played_track(n))
            .collect();
        if let Some(l) = limit {
            played.truncate(l);
        }
        Ok(played)
    }

    /// The track being played right now, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn now_playing(&self) -> Result<Option<Track>, FmError> {
        let request = self.request("getRecentTracks").param("limit", 1u32);
        let doc = self.network.execute(&request).await?;
        Ok(doc
            .root()
            .descendants("track")
            .into_iter()
            .find(|n| is_now_playing(n))
            .and_then(|n| extract::track_from(&self.network, n)))
    }

    /// # Errors
    ///
    /// Returns an error if a page cannot be fetched.
    pub async fn loved_tracks(&self, limit: Option<usize>) -> Result<Vec<LovedTrack>, FmError> {
        let nodes = self
            .network
            .collect_pages(self.request("getLovedTracks").cacheable(true), limit)
            .await?;
        Ok(nodes
            .iter()
            .filter_map(|n| {
                Some(LovedTrack {
                    track: extract::track_from(&self.network, n)?,
                    date: n.child("date").and_then(extract::element_text),
                    timestamp: timestamp_from_uts(n.child("date").and_then(|d| d.attr("uts"))),
                })
            })
            .collect())
    }

    /// Most played artists over `period`.
    ///
    /// # Errors
    ///
    /// Returns an error if a page cannot be fetched.
    pub async fn top_artists(&self, period: Period, limit: Option<usize>) -> Result<Vec<TopItem<Artist>>, FmError> {
        let nodes = self.top_nodes("getTopArtists", period, limit).await?;
        Ok(nodes
            .iter()
            .filter_map(|n| {
                Some(TopItem {
                    item: extract::artist_from(&self.network, n)?,
                    weight: extract::number(n, "playcount").unwrap_or(0),
                })
            })
            .collect())
    }

    /// # Errors
    ///
    /// Returns an error if a page cannot be fetched.
    pub async fn top_albums(&self, period: Period, limit: Option<usize>) -> Result<Vec<TopItem<Album>>, FmError> {
        let nodes = self.top_nodes("getTopAlbums", period, limit).await?;
        Ok(nodes
            .iter()
            .filter_map(|n| {
                Some(TopItem {
                    item: extract::album_from(&self.network, n)?,
                    weight: extract::number(n, "playcount").unwrap_or(0),
                })
            })
            .collect())
    }

    /// # Errors
    ///
    /// Returns an error if a page cannot be fetched.
    pub async fn top_tracks(&self, period: Period, limit: Option<usize>) -> Result<Vec<TopItem<Track>>, FmError> {
        let nodes = self.top_nodes("getTopTracks", period, limit).await?;
        Ok(nodes
            .iter()
            .filter_map(|n| {
                Some(TopItem {
                    item: extract::track_from(&self.network, n)?,
                    weight: extract::number(n, "playcount").unwrap_or(0),
                })
            })
            .collect())
    }

    /// Artists in the user's library with play and tag counts (`library.getArtists`).
    ///
    /// # Errors
    ///
    /// Returns an error if a page cannot be fetched.
    pub async fn library_artists(&self, limit: Option<usize>) -> Result<Vec<LibraryItem>, FmError> {
        let request = Request::new("library.getArtists")
            .param("user", self.name.as_str())
            .cacheable(true);
        let nodes = self.network.collect_pages(request, limit).await?;
        Ok(nodes
            .iter()
            .filter_map(|n| {
                Some(LibraryItem {
                    item: extract::artist_from(&self.network, n)?,
                    playcount: extract::number(n, "playcount").unwrap_or(0),
                    tagcount: extract::number(n, "tagcount").unwrap_or(0),
                })
            })
            .collect())
    }

    #[must_use]
    pub fn url(&self, domain: Domain) -> Option<String> {
        self.network
            .entity_url(domain, UrlKind::User, &[("name", &self.name)])
    }

    async fn top_nodes(&self, operation: &str, period: Period, limit: Option<usize>) -> Result<Vec<Element>, FmError> {
        let request = self
            .request(operation)
            .param("period", period.as_str())
            .cacheable(true);
        self.network.collect_pages(request, limit).await
    }

    fn played_track(&self, node: &Element) -> Option<PlayedTrack> {
        let date = node.child("date");
        Some(PlayedTrack {
            track: extract::track_from(&self.network, node)?,
            album: node.child("album").and_then(extract::element_text),
            playback_date: date.and_then(extract::element_text),
            timestamp: timestamp_from_uts(date.and_then(|d| d.attr("uts"))),
        })
    }
}

fn is_now_playing(node: &Element) -> bool {
    node.attr("nowplaying") == Some("true")
}
