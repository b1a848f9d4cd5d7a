#![allow(dead_code)]

use std::{fs, path::PathBuf};

use httpmock::MockServer;
use lastfm_rs::{Network, NetworkBuilder, Service};
use url::Url;

pub const API_KEY: &str = "test-key";
pub const API_SECRET: &str = "test-secret";

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

pub fn read_fixture(name: &str) -> String {
    fs::read_to_string(fixtures_dir().join(name))
        .unwrap_or_else(|e| panic!("failed to read fixture {name}: {e}"))
}

pub fn ws_url(server: &MockServer) -> Url {
    Url::parse(&format!("{}/2.0/", server.base_url())).unwrap()
}

/// A Last.fm builder pointed at the mock server.
pub fn builder(server: &MockServer) -> NetworkBuilder {
    Network::builder(Service::LastFm)
        .api_key(API_KEY)
        .api_secret(API_SECRET)
        .ws_base(ws_url(server))
}

pub fn network(server: &MockServer) -> Network {
    builder(server).build().unwrap()
}

pub fn ok_body(inner: &str) -> String {
    format!("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<lfm status=\"ok\">{inner}</lfm>")
}

pub fn failed_body(code: u32, detail: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<lfm status=\"failed\"><error code=\"{code}\">{detail}</error></lfm>"
    )
}

/// Routes the crate's spans and events to the test output (`RUST_LOG=lastfm_rs=debug`).
#[cfg(feature = "tracing-subscriber")]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[cfg(not(feature = "tracing-subscriber"))]
pub fn init_tracing() {}
