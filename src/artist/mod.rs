use crate::core::entity::{self, Entity};
use crate::core::models::{SimilarItem, TopItem};
use crate::core::network::{Domain, UrlKind};
use crate::core::params::Params;
use crate::core::{FmError, Network, extract};
use crate::{Album, Tag, Track};

/// An artist on a network.
///
/// # Example
///
/// ```no_run
/// # use lastfm_rs::{Artist, Network, Service};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let network = Network::builder(Service::LastFm).api_key("KEY").build()?;
/// let artist = Artist::new(&network, "Cher");
/// println!("{} listeners", artist.listener_count().await?);
/// for top in artist.top_tracks(Some(5)).await? {
///     println!("{} ({})", top.item.title(), top.weight);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Artist {
    network: Network,
    name: String,
}

impl PartialEq for Artist {
    fn eq(&self, other: &Self) -> bool {
        self.name.to_lowercase() == other.name.to_lowercase()
    }
}

impl Entity for Artist {
    const WS_PREFIX: &'static str = "artist";

    fn network(&self) -> &Network {
        &self.network
    }

    fn identity_params(&self) -> Params {
        Params::new().with("artist", self.name.as_str())
    }
}

impl Artist {
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

    /// The service's spelling correction of this name (`artist.getCorrection`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn correction(&self) -> Result<Option<String>, FmError> {
        let doc = self.network.execute(&self.request("getCorrection")).await?;
        Ok(extract::text(doc.root(), "name", 0))
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn mbid(&self) -> Result<Option<String>, FmError> {
        let doc = entity::info(self).await?;
        Ok(extract::text(doc.root(), "mbid", 0))
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

    /// Short biography, if the artist has one.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn bio_summary(&self) -> Result<Option<String>, FmError> {
        let doc = entity::info(self).await?;
        Ok(extract::text(doc.root(), "summary", 0))
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn bio_content(&self) -> Result<Option<String>, FmError> {
        let doc = entity::info(self).await?;
        Ok(extract::text(doc.root(), "content", 0))
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn similar(&self, limit: Option<usize>) -> Result<Vec<SimilarItem<Artist>>, FmError> {
        let mut request = self.request("getSimilar").cacheable(true);
        if let Some(l) = limit {
            request = request.param("limit", l);
        }
        let doc = self.network.execute(&request).await?;
        Ok(extract::similar_artists(&self.network, doc.root()))
    }

    /// Most played tracks, walking pages until `limit`.
    ///
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
                    weight: extract::number(n, "playcount").unwrap_or(0),
                })
            })
            .collect())
    }

    /// Most played albums, walking pages until `limit`.
    ///
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
                    weight: extract::number(n, "playcount").unwrap_or(0),
                })
            })
            .collect())
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn top_tags(&self, limit: Option<usize>) -> Result<Vec<TopItem<Tag>>, FmError> {
        entity::top_tags(self, limit).await
    }

    /// Tags this artist for the session user.
    ///
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
        self.network
            .entity_url(domain, UrlKind::Artist, &[("artist", &self.name)])
    }
}
