use httpmock::Method::POST;
use httpmock::MockServer;
use lastfm_rs::{Artist, Request};

use crate::common;

#[tokio::test]
async fn control_characters_are_stripped() {
    common::init_tracing();
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/2.0/");
        then.status(200)
            .body(common::ok_body("<artist><name>AB\u{1}C</name></artist>"));
    });

    let network = common::network(&server);
    let doc = network
        .execute(&Request::new("artist.getInfo").param("artist", "ABC"))
        .await
        .unwrap();
    assert_eq!(lastfm_rs::core::extract::text(doc.root(), "name", 0).as_deref(), Some("ABC"));
}

#[tokio::test]
async fn double_escaped_entities_are_decoded() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/2.0/");
        then.status(200).body(common::read_fixture("artist_getInfo_cher.xml"));
    });

    let network = common::network(&server);
    let summary = Artist::new(&network, "Cher").bio_summary().await.unwrap().unwrap();
    assert!(summary.contains("singer & actress"), "{summary}");
}
