//! Operations shared by every taggable entity (artist, album, track).

use crate::core::executor::Request;
use crate::core::models::TopItem;
use crate::core::params::Params;
use crate::core::{FmError, Network, extract};
use crate::Tag;

/// A remote entity addressed by a method prefix and identifying parameters.
pub trait Entity {
    /// Prefix of remote method names, e.g. `artist` for `artist.getInfo`.
    const WS_PREFIX: &'static str;

    fn network(&self) -> &Network;

    /// Parameters that identify this entity on every call.
    fn identity_params(&self) -> Params;

    /// A request for `<prefix>.<operation>` carrying the identity parameters.
    fn request(&self, operation: &str) -> Request {
        Request::new(format!("{}.{operation}", Self::WS_PREFIX)).params(self.identity_params())
    }
}

/// `<prefix>.getTopTags`.
pub(crate) async fn top_tags<E: Entity + Sync>(entity: &E, limit: Option<usize>) -> Result<Vec<TopItem<Tag>>, FmError> {
    let doc = entity
        .network()
        .execute(&entity.request("getTopTags").cacheable(true))
        .await?;
    let mut tags = extract::top_tags(entity.network(), doc.root());
    if let Some(l) = limit {
        tags.truncate(l);
    }
    Ok(tags)
}

/// `<prefix>.addTags`; the service accepts up to ten comma-separated tags per call.
pub(crate) async fn add_tags<E: Entity + Sync>(entity: &E, tags: &[&str]) -> Result<(), FmError> {
    for chunk in tags.chunks(10) {
        let request = entity.request("addTags").param("tags", chunk.join(","));
        entity.network().execute(&request).await?;
    }
    Ok(())
}

/// `<prefix>.removeTag`.
pub(crate) async fn remove_tag<E: Entity + Sync>(entity: &E, tag: &str) -> Result<(), FmError> {
    let request = entity.request("removeTag").param("tag", tag);
    entity.network().execute(&request).await?;
    Ok(())
}

/// `<prefix>.getInfo`, cacheable.
pub(crate) async fn info<E: Entity + Sync>(entity: &E) -> Result<crate::core::xml::Document, FmError> {
    entity
        .network()
        .execute(&entity.request("getInfo").cacheable(true))
        .await
}
