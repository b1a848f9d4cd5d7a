//! Readers over parsed responses.
//!
//! Text comes back trimmed and HTML-entity-unescaped: the service double-escapes some
//! names, so `AC&amp;amp;DC` on the wire reads as `AC&DC` here.

use std::str::FromStr;

use crate::core::models::{SimilarItem, TopItem};
use crate::core::xml::Element;
use crate::core::Network;
use crate::{Album, Artist, Tag, Track};

/// Decodes named and numeric HTML entities.
#[must_use]
pub fn unescape(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}

/// Text of the `index`-th descendant of `node` named `tag`.
///
/// Returns `None` if there is no such element or it has no text.
#[must_use]
pub fn text(node: &Element, tag: &str, index: usize) -> Option<String> {
    node.descendants(tag).get(index).and_then(|e| element_text(e))
}

/// Texts of every descendant named `tag`, up to `limit`.
#[must_use]
pub fn texts(node: &Element, tag: &str, limit: Option<usize>) -> Vec<String> {
    node.descendants(tag)
        .into_iter()
        .filter_map(element_text)
        .take(limit.unwrap_or(usize::MAX))
        .collect()
}

/// [`text`] parsed as `T`; `None` when absent or unparsable.
#[must_use]
pub fn number<T: FromStr>(node: &Element, tag: &str) -> Option<T> {
    text(node, tag, 0).and_then(|t| t.parse().ok())
}

/// Trimmed, unescaped text of `el` itself.
#[must_use]
pub fn element_text(el: &Element) -> Option<String> {
    let has_text = el
        .children()
        .iter()
        .any(|c| matches!(c, crate::core::xml::Node::Text(_)));
    has_text.then(|| unescape(el.text().trim()))
}

/// Artist name of an item node: `<artist><name>X</name></artist>` or `<artist>X</artist>`.
pub(crate) fn artist_name(node: &Element) -> Option<String> {
    let artist = node.child("artist")?;
    match artist.child("name") {
        Some(name) => element_text(name),
        None => element_text(artist),
    }
}

/// Every `<artist>` descendant as an [`Artist`].
#[must_use]
pub fn artists(network: &Network, node: &Element) -> Vec<Artist> {
    node.descendants("artist")
        .into_iter()
        .filter_map(|a| artist_from(network, a))
        .collect()
}

/// Every `<album>` descendant as an [`Album`].
#[must_use]
pub fn albums(network: &Network, node: &Element) -> Vec<Album> {
    node.descendants("album")
        .into_iter()
        .filter_map(|a| album_from(network, a))
        .collect()
}

/// Every `<track>` descendant as a [`Track`].
#[must_use]
pub fn tracks(network: &Network, node: &Element) -> Vec<Track> {
    node.descendants("track")
        .into_iter()
        .filter_map(|t| track_from(network, t))
        .collect()
}

/// `<artist>` nodes with `playcount` weights.
#[must_use]
pub fn top_artists(network: &Network, node: &Element) -> Vec<TopItem<Artist>> {
    node.descendants("artist")
        .into_iter()
        .filter_map(|a| top_item(a, "playcount", artist_from(network, a)?))
        .collect()
}

/// `<album>` nodes with `playcount` weights.
#[must_use]
pub fn top_albums(network: &Network, node: &Element) -> Vec<TopItem<Album>> {
    node.descendants("album")
        .into_iter()
        .filter_map(|a| top_item(a, "playcount", album_from(network, a)?))
        .collect()
}

/// `<track>` nodes with `playcount` weights.
#[must_use]
pub fn top_tracks(network: &Network, node: &Element) -> Vec<TopItem<Track>> {
    node.descendants("track")
        .into_iter()
        .filter_map(|t| top_item(t, "playcount", track_from(network, t)?))
        .collect()
}

/// `<tag>` nodes with `count` weights.
#[must_use]
pub fn top_tags(network: &Network, node: &Element) -> Vec<TopItem<Tag>> {
    node.descendants("tag")
        .into_iter()
        .filter_map(|t| {
            let name = text(t, "name", 0)?;
            top_item(t, "count", Tag::new(network, name))
        })
        .collect()
}

/// `<artist>` nodes with `match` scores.
#[must_use]
pub fn similar_artists(network: &Network, node: &Element) -> Vec<SimilarItem<Artist>> {
    node.descendants("artist")
        .into_iter()
        .filter_map(|a| {
            Some(SimilarItem {
                item: artist_from(network, a)?,
                score: number(a, "match").unwrap_or(0.0),
            })
        })
        .collect()
}

/// `<track>` nodes with `match` scores.
#[must_use]
pub fn similar_tracks(network: &Network, node: &Element) -> Vec<SimilarItem<Track>> {
    node.descendants("track")
        .into_iter()
        .filter_map(|t| {
            Some(SimilarItem {
                item: track_from(network, t)?,
                score: number(t, "match").unwrap_or(0.0),
            })
        })
        .collect()
}

fn top_item<T>(node: &Element, weight_tag: &str, item: T) -> Option<TopItem<T>> {
    Some(TopItem {
        item,
        weight: number(node, weight_tag).unwrap_or(0),
    })
}

/// An `<artist>` node (its `<name>` child, or its own text) as an [`Artist`].
pub(crate) fn artist_from(network: &Network, node: &Element) -> Option<Artist> {
    let name = match node.child("name") {
        Some(n) => element_text(n)?,
        None => element_text(node)?,
    };
    Some(Artist::new(network, name))
}

/// An `<album>` node: its own `<name>` or `<title>`, plus its artist.
pub(crate) fn album_from(network: &Network, node: &Element) -> Option<Album> {
    let title = node
        .child("name")
        .or_else(|| node.child("title"))
        .and_then(element_text)?;
    let artist = artist_name(node)?;
    Some(Album::new(network, artist, title))
}

/// A `<track>` node: its own `<name>`, plus its artist.
pub(crate) fn track_from(network: &Network, node: &Element) -> Option<Track> {
    let title = node.child("name").and_then(element_text)?;
    let artist = artist_name(node)?;
    Some(Track::new(network, artist, title))
}
