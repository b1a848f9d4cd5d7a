use crate::core::entity::{self, Entity};
use crate::core::models::TopItem;
use crate::core::network::{Domain, UrlKind};
use crate::core::params::Params;
use crate::core::{FmError, Network, extract};
use crate::{Artist, Tag, Track};

/// An album, identified by artist and title.
#[derive(Debug, Clone)]
pub struct Album {
    network: Network,
    artist: String,
    title: String,
}

impl PartialEq for Album {
    fn eq(&self, other: &Self) -> bool {
        self.artist.to_lowercase() == other.artist.to_lowercase()
            && self.title.to_lowercase() == other.title.to_lowercase()
    }
}

impl Entity for Album {
    const WS_PREFIX: &'static str = "album";

    fn network(&self) -> &Network {
        &self.network
    }

    fn identity_params(&self) -> Params {
        Params::new()
            .with("artist", self.artist.as_str())
            .with("album", self.title.as_str())
    }
}

impl Album {
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

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn mbid(&self) -> Result<Option<String>, FmError> {
        let doc = entity::info(self).await?;
        let album = doc.root().child("album");
        Ok(album.and_then(|a| a.child("mbid")).and_then(extract::element_text))
    }

    /// The album's track listing in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn tracks(&self) -> Result<Vec<Track>, FmError> {
        let doc = entity::info(self).await?;
        let Some(listing) = doc.root().descendants("tracks").into_iter().next() else {
            return Ok(Vec::new());
        };
        Ok(extract::tracks(&self.network, listing))
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
            UrlKind::Album,
            &[("artist", &self.artist), ("album", &self.title)],
        )
    }
}
