use chrono::DateTime;
use httpmock::Method::POST;
use httpmock::MockServer;
use lastfm_rs::{NowPlaying, Scrobble};

use crate::common;

#[tokio::test]
async fn single_scrobble_is_indexed_and_signed() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/2.0/")
            .body_includes("method=track.scrobble")
            .body_includes("artist%5B0%5D=Cher")
            .body_includes("timestamp%5B0%5D=1700000000")
            .body_includes("sk=SK")
            .body_includes("api_sig=");
        then.status(200).body(common::read_fixture("track_scrobble.xml"));
    });

    let network = common::builder(&server).session_key("SK").build().unwrap();
    let play = Scrobble::new("Cher", "Believe", DateTime::from_timestamp(1_700_000_000, 0).unwrap());
    let report = network.scrobble(&play).await.unwrap();

    mock.assert();
    assert_eq!(report.accepted, 1);
    assert_eq!(report.ignored, 0);
}

#[tokio::test]
async fn many_scrobbles_are_batched_by_fifty() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/2.0/").body_includes("method=track.scrobble");
        then.status(200).body(common::read_fixture("track_scrobble.xml"));
    });

    let network = common::builder(&server).session_key("SK").build().unwrap();
    let plays: Vec<Scrobble> = (0..120)
        .map(|i| Scrobble::new("Cher", format!("Song {i}"), DateTime::from_timestamp(1_700_000_000 + i, 0).unwrap()))
        .collect();
    let report = network.scrobble_many(&plays).await.unwrap();

    mock.assert_calls(3);
    assert_eq!(report.accepted, 3);
}

#[tokio::test]
async fn now_playing_sends_optional_fields() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/2.0/")
            .body_includes("method=track.updateNowPlaying")
            .body_includes("album=Believe")
            .body_includes("duration=239");
        then.status(200).body(common::ok_body("<nowplaying/>"));
    });

    let network = common::builder(&server).session_key("SK").build().unwrap();
    let mut track = NowPlaying::new("Cher", "Believe");
    track.album = Some("Believe".into());
    track.duration = Some(239);
    network.update_now_playing(&track).await.unwrap();

    mock.assert();
}
