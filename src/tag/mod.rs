use crate::core::entity::Entity;
use crate::core::models::TopItem;
use crate::core::network::{Domain, UrlKind};
use crate::core::params::Params;
use crate::core::{FmError, Network, extract};
use crate::{Album, Artist, Track};

/// A free-form tag such as `post-rock`.
#[derive(Debug, Clone)]
pub struct Tag {
    network: Network,
    name: String,
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.name.to_lowercase() == other.name.to_lowercase()
    }
}

impl Entity for Tag {
    const WS_PREFIX: &'static str = "tag";

    fn network(&self) -> &Network {
        &self.network
    }

    fn identity_params(&self) -> Params {
        Params::new().with("tag", self.name.as_str())
    }
}

impl Tag {
    pub fn new(network: &Network, name: impl Into<String>) -> Self {
        Self {
            network: network.clone(),
            name: name.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Artists most tagged with this tag, walking pages until `limit`.
    ///
    /// # Errors
    ///
    /// Returns an error if a page cannot be fetched.
    pub async fn top_artists(&self, limit: Option<usize>) -> Result<Vec<TopItem<Artist>>, FmError> {
        let nodes = self
            .network
            .collect_pages(self.request("getTopArtists").cacheable(true), limit)
            .await?;
        Ok(nodes
            .iter()
            .filter_map(|n| {
                Some(TopItem {
                    item: extract::artist_from(&self.network, n)?,
                    weight: extract::number(n, "count").unwrap_or(0),
                })
            })
            .collect())
    }

    /// # Errors
    ///
    /// Returns an error if a page cannot be fetched.
    pub async fn top_albums(&self, limit: Option<usize>) -> Result<Vec<TopItem<Album>>, FmError> {
        let nodes = self
            .network
            .collect_pages(self.request("getTopAlbums").cacheable(true), limit)
            .await?;
        Ok(nodes
            .iter()
            .filter_map(|n| {
                Some(TopItem {
                    item: extract::album_from(&self.network, n)?,
                    weight: extract::number(n, "count").unwrap_or(0),
                })
            })
            .collect())
    }

    /// # Errors
    ///
    /// Returns an error if a page cannot be fetched.
    pub async fn top_tracks(&self, limit: Option<usize>) -> Result<Vec<TopItem<Track>>, FmError> {
        let nodes = self
            .network
            .collect_pages(self.request("getTopTracks").cacheable(true), limit)
            .await?;
        Ok(nodes
            .iter()
            .filter_map(|n| {
                Some(TopItem {
                    item: extract::track_from(&self.network, n)?,
                    weight: extract::number(n, "count").unwrap_or(0),
                })
            })
            .collect())
    }

    #[must_use]
    pub fn url(&self, domain: Domain) -> Option<String> {
        self.network
            .entity_url(domain, UrlKind::Tag, &[("name", &self.name)])
    }
}
