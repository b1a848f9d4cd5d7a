use std::time::Duration;

use crate::core::entity::{self, Entity};
use crate::core::models::{SimilarItem, TopItem};
use crate::core::network::{Domain, UrlKind};
use crate::core::params::Params;
use crate::core::{FmError, Network, extract};
use crate::{Album, Artist, Tag};

/// A track, identified by artist and title.
#[derive(Debug, Clone)]
pub struct Track {
    network: Network,
    artist: String,
    title: String,
}

impl PartialEq for Track {
    fn eq(&self, other: &Self) -> bool {
        self.artist.to_lowercase() == other.artist.to_lowercase()
            && self.title.to_lowercase() == other.title.to_lowercase()
    }
}

impl Entity for Track {
    const WS_PREFIX: &'static str = "track";

    fn network(&self) -> &Network {
        &self.network
    }

    fn identity_params(&self) -> Params {
        Params::new()
            .with("artist", self.artist.as_str())
            .with("track", self.title.as_str())
    }
}

impl Track {
    pub fn new(network: &Network, artist: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            network: network.clone(),
            artist: artist.into(),
            title: title.into(),
        }
    }

    #[must_use]
    pub fn artist_name(&self) -> &str {
        &self.artist
    }

    #[must_use]
    pub fn artist(&self) -> Artist {
        Artist::new(&self.network, self.artist.as_str())
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn listener_count(&self) -> Result<u64, FmError> {
        let doc = entity::info(self).await?;
        Ok(extract::number(doc.root(), "listeners").unwrap_or(0))
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn playcount(&self) -> Result<u64, FmError> {
        let doc = entity::info(self).await?;
        Ok(extract::number(doc.root(), "playcount").unwrap_or(0))
    }

    /// Track length; `None` when the service reports none (or zero).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn duration(&self) -> Result<Option<Duration>, FmError> {
        let doc = entity::info(self).await?;
        let ms: u64 = extract::number(doc.root(), "duration").unwrap_or(0);
        Ok((ms > 0).then(|| Duration::from_millis(ms)))
    }

    /// The album this track appears on, when known.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn album(&self) -> Result<Option<Album>, FmError> {
        let doc = entity::info(self).await?;
        let album = doc.root().descendants("album").into_iter().next();
        Ok(album.and_then(|a| {
            let title = extract::text(a, "title", 0)?;
            let artist = extract::text(a, "artist", 0).unwrap_or_else(|| self.artist.clone());
            Some(Album::new(&self.network, artist, title))
        }))
    }

    /// Whether the session user has loved this track (`userloved`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn is_loved(&self) -> Result<bool, FmError> {
        let mut request = self.request("getInfo");
        if let Some(user) = self.network.username().await {
            request = request.param("username", user);
        }
        let doc = self.network.execute(&request).await?;
        Ok(extract::text(doc.root(), "userloved", 0).as_deref() == Some("1"))
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn love(&self) -> Result<(), FmError> {
        self.network.execute(&self.request("love")).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn unlove(&self) -> Result<(), FmError> {
        self.network.execute(&self.request("unlove")).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn similar(&self, limit: Option<usize>) -> Result<Vec<SimilarItem<Track>>, FmError> {
        let mut request = self.request("getSimilar").cacheable(true);
        if let Some(l) = limit {
            request = request.param("limit", l);
        }
        let doc = self.network.execute(&request).await?;
        Ok(extract::similar_tracks(&self.network, doc.root()))
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn top_tags(&self, limit: Option<usize>) -> Result<Vec<TopItem<Tag>>, FmError> {
        entity::top_tags(self, limit).await
    }

    /// # Errors
    ///
    /// Returns an error if a request fails.
    pub async fn add_tags(&self, tags: &[&str]) -> Result<(), FmError> {
        entity::add_tags(self, tags).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn remove_tag(&self, tag: &str) -> Result<(), FmError> {
        entity::remove_tag(self, tag).await
    }

    #[must_use]
    pub fn url(&self, domain: Domain) -> Option<String> {
        self.network.entity_url(
            domain,
            UrlKind::Track,
            &[("artist", &self.artist), ("title", &self.title)],
        )
    }
}
