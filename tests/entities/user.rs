use httpmock::Method::POST;
use httpmock::MockServer;
use lastfm_rs::{Period, User};

use crate::common;

fn mock_history(server: &MockServer) -> (httpmock::Mock<'_>, httpmock::Mock<'_>) {
    let first = server.mock(|when, then| {
        when.method(POST)
            .path("/2.0/")
            .body_includes("method=user.getRecentTracks")
            .body_includes("&page=1");
        then.status(200).body(common::read_fixture("user_getRecentTracks_rj_1.xml"));
    });
    let second = server.mock(|when, then| {
        when.method(POST)
            .path("/2.0/")
            .body_includes("method=user.getRecentTracks")
            .body_includes("&page=2");
        then.status(200).body(common::read_fixture("user_getRecentTracks_rj_2.xml"));
    });
    (first, second)
}

#[tokio::test]
async fn recent_tracks_skip_now_playing() {
    let server = MockServer::start();
    let (first, second) = mock_history(&server);

    let network = common::network(&server);
    let played = User::new(&network, "RJ").recent_tracks(None).await.unwrap();

    first.assert();
    second.assert();
    let titles: Vec<&str> = played.iter().map(|p| p.track.title()).collect();
    assert_eq!(titles, vec!["Believe", "Thunderstruck", "Vogue", "Jóga"]);
    assert_eq!(played[1].track.artist_name(), "AC&DC");
    assert_eq!(played[0].album.as_deref(), Some("Believe"));
    assert_eq!(played[1].album, None);
    assert_eq!(played[0].timestamp.unwrap().timestamp(), 1_700_000_000);
    assert_eq!(played[0].playback_date.as_deref(), Some("14 Nov 2023, 22:13"));
}

#[tokio::test]
async fn recent_tracks_limit_counts_played_entries() {
    let server = MockServer::start();
    let (first, second) = mock_history(&server);

    let network = common::network(&server);
    let played = User::new(&network, "RJ").recent_tracks(Some(2)).await.unwrap();

    assert_eq!(played.len(), 2);
    first.assert_calls(1);
    second.assert_calls(0);
}

#[tokio::test]
async fn now_playing_track() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST)
            .path("/2.0/")
            .body_includes("method=user.getRecentTracks")
            .body_includes("limit=1");
        then.status(200).body(common::read_fixture("user_getRecentTracks_rj_1.xml"));
    });

    let network = common::network(&server);
    let track = User::new(&network, "RJ").now_playing().await.unwrap().unwrap();
    assert_eq!(track.artist_name(), "Röyksopp");
    assert_eq!(track.title(), "Eple");
}

#[tokio::test]
async fn top_artists_send_period() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/2.0/")
            .body_includes("method=user.getTopArtists")
            .body_includes("period=7day");
        then.status(200).body(common::ok_body(
            r#"<topartists user="RJ" type="7day" page="1" perPage="50" totalPages="1" total="1">
                 <artist rank="1"><name>Cher</name><playcount>42</playcount></artist>
               </topartists>"#,
        ));
    });

    let network = common::network(&server);
    let top = User::new(&network, "RJ").top_artists(Period::Week, None).await.unwrap();

    mock.assert();
    assert_eq!(top[0].item.name(), "Cher");
    assert_eq!(top[0].weight, 42);
}

#[tokio::test]
async fn library_artists_carry_counts() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST)
            .path("/2.0/")
            .body_includes("method=library.getArtists")
            .body_includes("user=RJ");
        then.status(200).body(common::ok_body(
            r#"<artists user="RJ" page="1" perPage="50" totalPages="1" total="1">
                 <artist><name>Cher</name><playcount>512</playcount><tagcount>3</tagcount></artist>
               </artists>"#,
        ));
    });

    let network = common::network(&server);
    let library = User::new(&network, "RJ").library_artists(None).await.unwrap();

    assert_eq!(library.len(), 1);
    assert_eq!(library[0].item.name(), "Cher");
    assert_eq!(library[0].playcount, 512);
    assert_eq!(library[0].tagcount, 3);
}

#[tokio::test]
async fn authenticated_user_needs_username() {
    let server = MockServer::start();
    let anonymous = common::network(&server);
    assert!(User::authenticated(&anonymous).await.is_err());

    let named = common::builder(&server).username("RJ").build().unwrap();
    assert_eq!(User::authenticated(&named).await.unwrap().name(), "RJ");
}

#[tokio::test]
async fn recent_tracks_with_unbounded_limit() {
    let server = MockServer::start();
    mock_history(&server);

    let network = common::network(&server);
    let played = User::new(&network, "RJ").recent_tracks(Some(usize::MAX)).await.unwrap();
    assert_eq!(played.len(), 4);
}
