use httpmock::Method::POST;
use httpmock::MockServer;

use crate::common;

#[tokio::test]
async fn token_from_builder_is_exchanged_for_session() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/2.0/")
            .body_includes("method=auth.getSession")
            .body_includes("token=AUTHORIZED")
            .body_includes("api_sig=");
        then.status(200).body(common::read_fixture("auth_getMobileSession.xml"));
    });

    let network = common::builder(&server).token("AUTHORIZED").connect().await.unwrap();

    mock.assert();
    assert_eq!(
        network.session_key().await.as_deref(),
        Some("d580d57f32848f5dcf574d1ce18d78b2")
    );
    assert_eq!(network.username().await.as_deref(), Some("rj"));
}

#[tokio::test]
async fn web_flow_returns_token_and_auth_url() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/2.0/").body_includes("method=auth.getToken");
        then.status(200)
            .body(common::ok_body("<token>cf45fe5a3e3cebe168480a086d7fe481</token>"));
    });

    let network = common::network(&server);
    let (token, url) = network.begin_web_auth().await.unwrap();

    assert_eq!(token, "cf45fe5a3e3cebe168480a086d7fe481");
    assert_eq!(
        url,
        format!(
            "https://www.last.fm/api/auth/?api_key={}&token=cf45fe5a3e3cebe168480a086d7fe481",
            common::API_KEY
        )
    );
}

#[tokio::test]
async fn unauthorized_token_is_reported() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/2.0/").body_includes("method=auth.getSession");
        then.status(200).body(common::failed_body(14, "Unauthorized Token - This token has not been authorized"));
    });

    let network = common::network(&server);
    let err = network.web_auth_session("PENDING").await.unwrap_err();
    assert_eq!(err.service_code(), Some(lastfm_rs::status::STATUS_TOKEN_UNAUTHORIZED));
    assert!(network.session_key().await.is_none());
}

#[tokio::test]
async fn failed_token_exchange_can_be_retried() {
    let server = MockServer::start();
    let mut unavailable = server.mock(|when, then| {
        when.method(POST).path("/2.0/").body_includes("method=auth.getSession");
        then.status(503).body("Service Unavailable");
    });

    let network = common::builder(&server).token("AUTHORIZED").build().unwrap();
    let err = network.authenticate().await.unwrap_err();
    assert!(matches!(err, lastfm_rs::FmError::Protocol { status: 503, .. }), "got {err:?}");
    unavailable.assert();
    unavailable.delete();

    let ok = server.mock(|when, then| {
        when.method(POST)
            .path("/2.0/")
            .body_includes("method=auth.getSession")
            .body_includes("token=AUTHORIZED");
        then.status(200).body(common::read_fixture("auth_getMobileSession.xml"));
    });

    network.authenticate().await.unwrap();

    ok.assert();
    assert_eq!(
        network.session_key().await.as_deref(),
        Some("d580d57f32848f5dcf574d1ce18d78b2")
    );

    // the token is spent once exchanged
    network.authenticate().await.unwrap();
    ok.assert_calls(1);
}
