use httpmock::Method::POST;
use httpmock::MockServer;
use lastfm_rs::status::{STATUS_API_KEY_SUSPENDED, STATUS_INVALID_SK};
use lastfm_rs::{FmError, Network, Request, Service, Track};
use url::Url;

use crate::common;

#[tokio::test]
async fn suspended_key_maps_to_service_error() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/2.0/");
        then.status(200).body(common::failed_body(26, "Suspended API key"));
    });

    let network = common::network(&server);
    let err = network.execute(&Request::new("artist.getInfo").param("artist", "Cher")).await.unwrap_err();

    mock.assert();
    match err {
        FmError::Service { code, ref detail } => {
            assert_eq!(code, STATUS_API_KEY_SUSPENDED);
            assert_eq!(detail, "Suspended API key");
        }
        other => panic!("expected Service error, got {other:?}"),
    }
}

#[tokio::test]
async fn invalid_session_key_code_is_exposed() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/2.0/").body_includes("method=track.love");
        then.status(200).body(common::failed_body(9, "Invalid session key - Please re-authenticate"));
    });

    let network = common::builder(&server).session_key("stale").build().unwrap();
    let err = Track::new(&network, "Cher", "Believe").love().await.unwrap_err();
    assert_eq!(err.service_code(), Some(STATUS_INVALID_SK));
    match err {
        FmError::Service { ref detail, .. } => {
            assert_eq!(detail, "Invalid session key - Please re-authenticate");
        }
        other => panic!("expected Service error, got {other:?}"),
    }
}

#[tokio::test]
async fn server_error_maps_to_protocol_error() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/2.0/");
        then.status(503).body("Service Unavailable");
    });

    let network = common::network(&server);
    let err = network.execute(&Request::new("chart.getTopArtists")).await.unwrap_err();

    mock.assert();
    assert!(
        matches!(err, FmError::Protocol { status: 503, .. }),
        "expected Protocol error, got {err:?}"
    );
}

#[tokio::test]
async fn client_error_status_with_xml_body_is_parsed() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/2.0/");
        then.status(400).body(common::failed_body(10, "Invalid API key"));
    });

    let network = common::network(&server);
    let err = network.execute(&Request::new("chart.getTopArtists")).await.unwrap_err();
    assert_eq!(err.service_code(), Some(10));
}

#[tokio::test]
async fn garbage_body_maps_to_malformed() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/2.0/");
        then.status(200).body("<html><body>oops");
    });

    let network = common::network(&server);
    let err = network.execute(&Request::new("chart.getTopArtists")).await.unwrap_err();
    assert!(matches!(err, FmError::Malformed(_)), "got {err:?}");
}

#[tokio::test]
async fn refused_connection_maps_to_transport_error() {
    let network = Network::builder(Service::LastFm)
        .api_key(common::API_KEY)
        .ws_base(Url::parse("http://127.0.0.1:1/2.0/").unwrap())
        .build()
        .unwrap();

    let err = network.execute(&Request::new("chart.getTopArtists")).await.unwrap_err();
    assert!(matches!(err, FmError::Transport(_)), "got {err:?}");
}
