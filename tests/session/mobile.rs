use httpmock::Method::POST;
use httpmock::MockServer;
use lastfm_rs::core::signer::{md5_hex, sign};
use lastfm_rs::core::Params;

use crate::common;

#[tokio::test]
async fn mobile_session_is_signed_and_stored() {
    let server = MockServer::start();
    let auth_token = md5_hex("up");
    let expected_sig = sign(
        &Params::new()
            .with("api_key", common::API_KEY)
            .with("authToken", auth_token.as_str())
            .with("method", "auth.getMobileSession")
            .with("username", "u"),
        common::API_SECRET,
    );

    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/2.0/")
            .body_includes("method=auth.getMobileSession")
            .body_includes(format!("authToken={auth_token}"))
            .body_includes(format!("api_sig={expected_sig}"));
        then.status(200).body(common::read_fixture("auth_getMobileSession.xml"));
    });

    let network = common::builder(&server)
        .username("u")
        .password_hash("p")
        .connect()
        .await
        .unwrap();

    mock.assert();
    assert_eq!(
        network.session_key().await.as_deref(),
        Some("d580d57f32848f5dcf574d1ce18d78b2")
    );
}

#[tokio::test]
async fn existing_session_key_skips_authentication() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/2.0/");
        then.status(200).body(common::read_fixture("auth_getMobileSession.xml"));
    });

    let network = common::builder(&server)
        .session_key("KEEP")
        .username("u")
        .password("secret")
        .connect()
        .await
        .unwrap();

    mock.assert_calls(0);
    assert_eq!(network.session_key().await.as_deref(), Some("KEEP"));
}

#[tokio::test]
async fn rejected_credentials_surface_service_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/2.0/");
        then.status(403).body(common::failed_body(4, "Authentication Failed"));
    });

    let err = common::builder(&server)
        .username("u")
        .password("wrong")
        .connect()
        .await
        .unwrap_err();
    assert_eq!(err.service_code(), Some(lastfm_rs::status::STATUS_AUTH_FAILED));
}

#[tokio::test]
async fn session_requests_carry_sk_and_signature() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/2.0/")
            .body_includes("method=track.love")
            .body_includes("sk=SESSION")
            .body_includes("api_sig=");
        then.status(200).body(common::ok_body(""));
    });

    let network = common::builder(&server).session_key("SESSION").build().unwrap();
    lastfm_rs::Track::new(&network, "Cher", "Believe").love().await.unwrap();
    mock.assert();
}
