//! Submitting plays (`track.scrobble`) and now-playing notices (`track.updateNowPlaying`).
//!
//! Both need an authenticated session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::executor::Request;
use crate::core::params::Params;
use crate::core::xml::Document;
use crate::core::{FmError, Network};

/// The service accepts at most this many plays per `track.scrobble` call.
pub const MAX_SCROBBLES_PER_BATCH: usize = 50;

/// One play to submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scrobble {
    pub artist: String,
    pub title: String,
    /// When the track started playing.
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_number: Option<u32>,
    /// Length in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mbid: Option<String>,
}

impl Scrobble {
    pub fn new(artist: impl Into<String>, title: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            artist: artist.into(),
            title: title.into(),
            timestamp,
            album: None,
            album_artist: None,
            track_number: None,
            duration: None,
            mbid: None,
        }
    }

    #[must_use]
    pub fn album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(album.into());
        self
    }

    #[must_use]
    pub fn album_artist(mut self, artist: impl Into<String>) -> Self {
        self.album_artist = Some(artist.into());
        self
    }

    #[must_use]
    pub const fn track_number(mut self, n: u32) -> Self {
        self.track_number = Some(n);
        self
    }

    #[must_use]
    pub const fn duration(mut self, secs: u32) -> Self {
        self.duration = Some(secs);
        self
    }

    #[must_use]
    pub fn mbid(mut self, mbid: impl Into<String>) -> Self {
        self.mbid = Some(mbid.into());
        self
    }

    /// Writes this play as the `i`-th entry of a batch (`artist[i]`, `track[i]`, ...).
    fn write_indexed(&self, params: &mut Params, i: usize) {
        params.insert(format!("artist[{i}]"), self.artist.as_str());
        params.insert(format!("track[{i}]"), self.title.as_str());
        params.insert(format!("timestamp[{i}]"), self.timestamp);
        params.insert_opt(format!("album[{i}]"), self.album.as_deref());
        params.insert_opt(format!("albumArtist[{i}]"), self.album_artist.as_deref());
        params.insert_opt(format!("trackNumber[{i}]"), self.track_number);
        params.insert_opt(format!("duration[{i}]"), self.duration);
        params.insert_opt(format!("mbid[{i}]"), self.mbid.as_deref());
    }
}

/// The track being played, for [`Network::update_now_playing`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NowPlaying {
    pub artist: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mbid: Option<String>,
}

impl NowPlaying {
    pub fn new(artist: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            artist: artist.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    fn params(&self) -> Params {
        let mut params = Params::new()
            .with("artist", self.artist.as_str())
            .with("track", self.title.as_str());
        params.insert_opt("album", self.album.as_deref());
        params.insert_opt("albumArtist", self.album_artist.as_deref());
        params.insert_opt("trackNumber", self.track_number);
        params.insert_opt("duration", self.duration);
        params.insert_opt("mbid", self.mbid.as_deref());
        params
    }
}

/// What the service did with submitted plays, summed over batches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrobbleReport {
    pub accepted: u32,
    pub ignored: u32,
}

impl ScrobbleReport {
    fn from_doc(doc: &Document) -> Self {
        let counts = doc.elements_by_tag("scrobbles").into_iter().next();
        let read = |name: &str| {
            counts
                .and_then(|c| c.attr(name))
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(0)
        };
        Self {
            accepted: read("accepted"),
            ignored: read("ignored"),
        }
    }
}

impl Network {
    /// Submits one play.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    pub async fn scrobble(&self, play: &Scrobble) -> Result<ScrobbleReport, FmError> {
        self.scrobble_many(std::slice::from_ref(play)).await
    }

    /// Submits plays in batches of [`MAX_SCROBBLES_PER_BATCH`], in order.
    ///
    /// Stops at the first failing batch; earlier batches stay submitted.
    ///
    /// # Errors
    ///
    /// Returns an error if any batch fails.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, plays), err, fields(count = plays.len())))]
    pub async fn scrobble_many(&self, plays: &[Scrobble]) -> Result<ScrobbleReport, FmError> {
        let mut report = ScrobbleReport::default();
        for batch in plays.chunks(MAX_SCROBBLES_PER_BATCH) {
            let mut params = Params::new();
            for (i, play) in batch.iter().enumerate() {
                play.write_indexed(&mut params, i);
            }
            let doc = self
                .execute(&Request::new("track.scrobble").params(params))
                .await?;
            let batch_report = ScrobbleReport::from_doc(&doc);
            report.accepted += batch_report.accepted;
            report.ignored += batch_report.ignored;
        }
        Ok(report)
    }

    /// Tells the service what the user is listening to now.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects it.
    pub async fn update_now_playing(&self, track: &NowPlaying) -> Result<(), FmError> {
        let request = Request::new("track.updateNowPlaying").params(track.params());
        self.execute(&request).await?;
        Ok(())
    }
}
