use crate::core::entity::Entity;
use crate::core::models::TopItem;
use crate::core::network::{Domain, UrlKind};
use crate::core::params::Params;
use crate::core::{FmError, Network, extract};
use crate::{Artist, Track};

/// A country as named by ISO 3166-1 (e.g. `Spain`).
#[derive(Debug, Clone)]
pub struct Country {
    network: Network,
    name: String,
}

impl PartialEq for Country {
    fn eq(&self, other: &Self) -> bool {
        self.name.to_lowercase() == other.name.to_lowercase()
    }
}

impl Entity for Country {
    const WS_PREFIX: &'static str = "geo";

    fn network(&self) -> &Network {
        &self.network
    }

    fn identity_params(&self) -> Params {
        Params::new().with("country", self.name.as_str())
    }
}

impl Country {
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
                    weight: extract::number(n, "listeners").unwrap_or(0),
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
                    weight: extract::number(n, "listeners").unwrap_or(0),
                })
            })
            .collect())
    }

    #[must_use]
    pub fn url(&self, domain: Domain) -> Option<String> {
        self.network
            .entity_url(domain, UrlKind::Country, &[("country_name", &self.name)])
    }
}
