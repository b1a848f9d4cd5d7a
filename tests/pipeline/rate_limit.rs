use std::time::{Duration, Instant};

use httpmock::Method::POST;
use httpmock::MockServer;
use lastfm_rs::Request;

use crate::common;

#[tokio::test]
async fn consecutive_calls_are_spaced() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/2.0/");
        then.status(200).body(common::ok_body(""));
    });

    let network = common::builder(&server).rate_limit(true).build().unwrap();
    let request = Request::new("chart.getTopArtists");

    network.execute(&request).await.unwrap();
    let started = Instant::now();
    network.execute(&request).await.unwrap();

    assert!(started.elapsed() >= Duration::from_millis(200));
    mock.assert_calls(2);
}

#[tokio::test]
async fn rate_limit_can_be_switched_off() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/2.0/");
        then.status(200).body(common::ok_body(""));
    });

    let network = common::builder(&server).rate_limit(true).build().unwrap();
    network.disable_rate_limit();
    let request = Request::new("chart.getTopArtists");

    let started = Instant::now();
    for _ in 0..3 {
        network.execute(&request).await.unwrap();
    }
    // Three unthrottled local calls finish well inside two spacing intervals.
    assert!(started.elapsed() < Duration::from_millis(400));
}

#[tokio::test]
async fn cache_hits_are_not_throttled() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/2.0/");
        then.status(200).body(common::ok_body("<artist><name>Cher</name></artist>"));
    });

    let network = common::builder(&server)
        .rate_limit(true)
        .cache_in_memory()
        .build()
        .unwrap();
    let request = Request::new("artist.getInfo").param("artist", "Cher").cacheable(true);

    network.execute(&request).await.unwrap();
    let started = Instant::now();
    network.execute(&request).await.unwrap();

    assert!(started.elapsed() < Duration::from_millis(200));
    mock.assert_calls(1);
}
