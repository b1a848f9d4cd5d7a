use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Artist, Track};

/* ----- RANKED LISTS (shared by artist/, user/, tag/, country/, chart/) ----- */

/// An entity with a weight from a ranked list (play count, tag count, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct TopItem<T> {
    pub item: T,
    pub weight: u64,
}

/// An entity with a similarity score between 0 and 1.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarItem<T> {
    pub item: T,
    pub score: f64,
}

/* ----- USER HISTORY ----- */

/// One entry of a user's listening history.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayedTrack {
    pub track: Track,
    pub album: Option<String>,
    /// Human-readable date as sent by the server.
    pub playback_date: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

/// One of a user's loved tracks.
#[derive(Debug, Clone, PartialEq)]
pub struct LovedTrack {
    pub track: Track,
    pub date: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

/// An artist in a user's library.
#[derive(Debug, Clone, PartialEq)]
pub struct LibraryItem {
    pub item: Artist,
    pub playcount: u64,
    pub tagcount: u64,
}

/// Time window for user charts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    #[default]
    Overall,
    Week,
    Month,
    ThreeMonths,
    SixMonths,
    TwelveMonths,
}

impl Period {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Period::Overall => "overall",
            Period::Week => "7day",
            Period::Month => "1month",
            Period::ThreeMonths => "3month",
            Period::SixMonths => "6month",
            Period::TwelveMonths => "12month",
        }
    }
}

pub(crate) fn timestamp_from_uts(uts: Option<&str>) -> Option<DateTime<Utc>> {
    uts.and_then(|s| s.trim().parse::<i64>().ok())
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
}
