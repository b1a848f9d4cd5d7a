use httpmock::Method::POST;
use httpmock::MockServer;
use lastfm_rs::{Artist, Domain, Track};

use crate::common;

#[tokio::test]
async fn info_fields() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST)
            .path("/2.0/")
            .body_includes("method=artist.getInfo")
            .body_includes("artist=Cher");
        then.status(200).body(common::read_fixture("artist_getInfo_cher.xml"));
    });

    let network = common::network(&server);
    let cher = Artist::new(&network, "Cher");

    assert_eq!(cher.listener_count().await.unwrap(), 1_385_434);
    assert_eq!(
        cher.mbid().await.unwrap().as_deref(),
        Some("bfcc6d75-a6a5-4bc6-8282-47aec8531818")
    );
    let content = cher.bio_content().await.unwrap().unwrap();
    assert!(content.ends_with("Long form."));
}

#[tokio::test]
async fn similar_artists_with_scores() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST)
            .path("/2.0/")
            .body_includes("method=artist.getSimilar")
            .body_includes("limit=2");
        then.status(200).body(common::ok_body(
            r#"<similarartists artist="Cher">
                 <artist><name>Madonna</name><match>1</match></artist>
                 <artist><name>Cyndi Lauper</name><match>0.62</match></artist>
               </similarartists>"#,
        ));
    });

    let network = common::network(&server);
    let similar = Artist::new(&network, "Cher").similar(Some(2)).await.unwrap();

    assert_eq!(similar.len(), 2);
    assert_eq!(similar[0].item, Artist::new(&network, "madonna"));
    assert!((similar[1].score - 0.62).abs() < f64::EPSILON);
}

#[tokio::test]
async fn top_tags_are_truncated() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/2.0/").body_includes("method=track.getTopTags");
        then.status(200).body(common::ok_body(
            r#"<toptags artist="Cher" track="Believe">
                 <tag><name>pop</name><count>100</count></tag>
                 <tag><name>dance</name><count>61</count></tag>
                 <tag><name>90s</name><count>40</count></tag>
               </toptags>"#,
        ));
    });

    let network = common::network(&server);
    let tags = Track::new(&network, "Cher", "Believe").top_tags(Some(2)).await.unwrap();

    assert_eq!(tags.len(), 2);
    assert_eq!(tags[0].item.name(), "pop");
    assert_eq!(tags[1].weight, 61);
}

#[tokio::test]
async fn add_tags_is_sent_in_chunks_of_ten() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/2.0/").body_includes("method=artist.addTags");
        then.status(200).body(common::ok_body(""));
    });

    let network = common::builder(&server).session_key("SK").build().unwrap();
    let tags: Vec<String> = (0..12).map(|i| format!("tag{i}")).collect();
    let refs: Vec<&str> = tags.iter().map(String::as_str).collect();
    Artist::new(&network, "Cher").add_tags(&refs).await.unwrap();

    mock.assert_calls(2);
}

#[tokio::test]
async fn track_duration_is_optional() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/2.0/").body_includes("track=Believe");
        then.status(200)
            .body(common::ok_body("<track><name>Believe</name><duration>239000</duration></track>"));
    });
    server.mock(|when, then| {
        when.method(POST).path("/2.0/").body_includes("track=Unknown");
        then.status(200)
            .body(common::ok_body("<track><name>Unknown</name><duration>0</duration></track>"));
    });

    let network = common::network(&server);
    assert_eq!(
        Track::new(&network, "Cher", "Believe").duration().await.unwrap(),
        Some(std::time::Duration::from_secs(239))
    );
    assert_eq!(Track::new(&network, "Cher", "Unknown").duration().await.unwrap(), None);
}

#[test]
fn website_urls() {
    let network = lastfm_rs::Network::builder(lastfm_rs::Service::LastFm).build().unwrap();
    assert_eq!(
        Artist::new(&network, "AC/DC").url(Domain::German).as_deref(),
        Some("https://www.last.fm/de/music/AC%2FDC")
    );
}
