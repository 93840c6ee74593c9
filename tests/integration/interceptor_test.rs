//! Integration tests for the request authenticator against the mock API.

mod helpers;

use std::sync::atomic::Ordering;

use campus_core::ErrorKind;
use campus_core::types::ApiRequest;

#[tokio::test]
async fn test_live_token_passes_through() {
    let app = helpers::TestApp::new().await;
    app.seed_session("admin@mail.com", 600);

    let response = app
        .authenticator
        .send(ApiRequest::get("/gestion"))
        .await
        .unwrap();

    let body: serde_json::Value = response.json().unwrap();
    assert_eq!(body[0]["anio"], 2025);
    assert_eq!(app.refresh_calls(), 0);
    assert_eq!(app.resource_calls(), 1);
}

#[tokio::test]
async fn test_expired_token_refreshes_once_and_retries_once() {
    let app = helpers::TestApp::new().await;
    let (stale, _) = app.seed_session("admin@mail.com", -3600);

    let response = app
        .authenticator
        .send(ApiRequest::get("/gestion"))
        .await
        .unwrap();

    assert!(response.is_success());
    assert_eq!(app.refresh_calls(), 1);
    assert_eq!(app.resource_calls(), 2);
    assert_ne!(app.store.get_access().unwrap(), Some(stale));
    assert!(app.session.is_authenticated());
}

#[tokio::test]
async fn test_403_is_surfaced_without_refresh() {
    let app = helpers::TestApp::new().await;
    app.server.forbid_resource.store(true, Ordering::SeqCst);
    app.seed_session("estudiante1@mail.com", 600);

    let err = app
        .authenticator
        .send(ApiRequest::get("/gestion"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Forbidden);
    assert_eq!(err.message, "Acceso denegado");
    assert_eq!(app.refresh_calls(), 0);
    assert_eq!(app.resource_calls(), 1);
    assert!(app.store.get_access().unwrap().is_some());
}

#[tokio::test]
async fn test_rejected_refresh_logs_out_and_keeps_original_error() {
    let app = helpers::TestApp::new().await;
    app.server.reject_refresh.store(true, Ordering::SeqCst);
    app.seed_session("docente1@mail.com", -3600);

    let err = app
        .authenticator
        .send(ApiRequest::get("/gestion"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Unauthorized);
    assert_eq!(err.message, "Token inválido o expirado");
    assert_eq!(app.refresh_calls(), 1);
    assert_eq!(app.resource_calls(), 1);
    assert_eq!(app.store.get_access().unwrap(), None);
    assert_eq!(app.store.get_refresh().unwrap(), None);
    assert!(!app.session.is_authenticated());
    assert_eq!(app.history.current().as_deref(), Some("/login"));
}

#[tokio::test]
async fn test_concurrent_401s_share_one_refresh() {
    let app = helpers::TestApp::new().await;
    app.seed_session("admin@mail.com", -3600);

    let results = futures::future::join_all(
        (0..4).map(|_| app.authenticator.send(ApiRequest::get("/gestion"))),
    )
    .await;

    assert!(results.iter().all(Result::is_ok));
    assert_eq!(app.refresh_calls(), 1);
}

#[tokio::test]
async fn test_unreachable_api_is_transport_error() {
    let mut app = helpers::TestApp::new().await;
    app.config.api.base_url = "http://127.0.0.1:9".to_string();
    let transport = campus_auth::ReqwestTransport::new(&app.config.api).unwrap();
    let authenticator = campus_auth::RequestAuthenticator::new(
        app.session.clone(),
        std::sync::Arc::new(transport),
        &app.config.session,
    );

    let err = authenticator
        .send(ApiRequest::get("/gestion"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Transport);
}
