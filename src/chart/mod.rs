//! Site-wide charts and artist search.

use crate::core::executor::Request;
use crate::core::models::TopItem;
use crate::core::{FmError, Network, extract};
use crate::{Artist, Track};

impl Network {
    /// Most played artists across the whole site (`chart.getTopArtists`).
    ///
    /// # Errors
    ///
    /// Returns an error if a page cannot be fetched.
    pub async fn top_artists(&self, limit: Option<usize>) -> Result<Vec<TopItem<Artist>>, FmError> {
        let request = Request::new("chart.getTopArtists").cacheable(true);
        let nodes = self.collect_pages(request, limit).await?;
        Ok(nodes
            .iter()
            .filter_map(|n| {
                Some(TopItem {
                    item: extract::artist_from(self, n)?,
                    weight: extract::number(n, "playcount").unwrap_or(0),
                })
            })
            .collect())
    }

    /// Most played tracks across the whole site (`chart.getTopTracks`).
    ///
    /// # Errors
    ///
    /// Returns an error if a page cannot be fetched.
    pub async fn top_tracks(&self, limit: Option<usize>) -> Result<Vec<TopItem<Track>>, FmError> {
        let request = Request::new("chart.getTopTracks").cacheable(true);
        let nodes = self.collect_pages(request, limit).await?;
        Ok(nodes
            .iter()
            .filter_map(|n| {
                Some(TopItem {
                    item: extract::track_from(self, n)?,
                    weight: extract::number(n, "playcount").unwrap_or(0),
                })
            })
            .collect())
    }

    /// Starts an artist search. See [`ArtistSearch`].
    pub fn search_artist(&self, name: impl Into<String>) -> ArtistSearch {
        ArtistSearch::new(self, name)
    }
}

/// A stepping artist search (`artist.search`).
///
/// Each call to [`ArtistSearch::next_page`] fetches the following page of matches.
///
/// # Example
///
/// ```no_run
/// # use lastfm_rs::{Network, Service};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let network = Network::builder(Service::LastFm).api_key("KEY").build()?;
/// let mut search = network.search_artist("cher").limit(10);
/// println!("{} matches", search.total_results().await?);
/// let first = search.next_page().await?;
/// let second = search.next_page().await?;
/// # let _ = (first, second);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ArtistSearch {
    network: Network,
    name: String,
    limit: Option<u32>,
    last_page: u32,
}

impl ArtistSearch {
    pub fn new(network: &Network, name: impl Into<String>) -> Self {
        Self {
            network: network.clone(),
            name: name.into(),
            limit: None,
            last_page: 0,
        }
    }

    /// Matches per page. Default: the service's (30).
    #[must_use]
    pub const fn limit(mut self, n: u32) -> Self {
        self.limit = Some(n);
        self
    }

    /// Number of the last page fetched by [`ArtistSearch::next_page`]; 0 before the first.
    #[must_use]
    pub const fn last_page(&self) -> u32 {
        self.last_page
    }

    /// Total number of matches reported by the service.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn total_results(&self) -> Result<u64, FmError> {
        let doc = self.network.execute(&self.request(1)).await?;
        Ok(extract::number(doc.root(), "totalResults").unwrap_or(0))
    }

    /// Fetches the next page of matching artists. An empty page means the results ran out.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn next_page(&mut self) -> Result<Vec<Artist>, FmError> {
        let page = self.last_page + 1;
        let doc = self.network.execute(&self.request(page)).await?;
        self.last_page = page;
        let Some(matches) = doc.root().descendants("artistmatches").into_iter().next() else {
            return Ok(Vec::new());
        };
        Ok(extract::artists(&self.network, matches))
    }

    fn request(&self, page: u32) -> Request {
        let mut request = Request::new("artist.search")
            .param("artist", self.name.as_str())
            .param("page", page)
            .cacheable(true);
        if let Some(l) = self.limit {
            request = request.param("limit", l);
        }
        request
    }
}
