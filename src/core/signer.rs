//! Request signatures and cache keys.
//!
//! Both digests run over `name || value` for every parameter in ascending key order,
//! without separators. The signature appends the API secret and takes MD5; the cache
//! key drops credential-bearing entries and takes SHA-1, so cached responses are
//! shared across API keys and sessions.

use sha1::{Digest, Sha1};

use crate::core::params::Params;

pub(crate) const API_SIG: &str = "api_sig";
pub(crate) const API_KEY: &str = "api_key";
pub(crate) const SESSION_KEY: &str = "sk";

/// Computes `api_sig` for `params` (any `api_sig` entry already present is ignored).
#[must_use]
pub fn sign(params: &Params, secret: &str) -> String {
    let mut base = String::new();
    for (k, v) in params.iter().filter(|(k, _)| *k != API_SIG) {
        base.push_str(k);
        base.push_str(v);
    }
    base.push_str(secret);
    format!("{:x}", md5::compute(base.as_bytes()))
}

/// Computes the cache key of a call, ignoring `api_sig`, `api_key` and `sk`.
#[must_use]
pub fn cache_key(params: &Params) -> String {
    let mut hasher = Sha1::new();
    for (k, v) in params
        .iter()
        .filter(|(k, _)| !matches!(*k, API_SIG | API_KEY | SESSION_KEY))
    {
        hasher.update(k.as_bytes());
        hasher.update(v.as_bytes());
    }
    hex::encode(hasher.finalize())
}

/// `MD5(text)` as lowercase hex, the form Last.fm expects for password hashes.
#[must_use]
pub fn md5_hex(text: &str) -> String {
    format!("{:x}", md5::compute(text.as_bytes()))
}
