//! Integration tests for the session lifecycle against the mock API.

mod helpers;

use campus_auth::SessionService;
use campus_core::ErrorKind;
use campus_core::types::Area;

#[tokio::test]
async fn test_login_success_authenticates() {
    let app = helpers::TestApp::new().await;
    let signal = app.session.authenticated();
    assert!(!*signal.borrow());

    let result = app
        .session
        .login("docente1@mail.com", "123456")
        .await
        .unwrap();

    assert!(!SessionService::is_expired(Some(&result.access_token)));
    assert!(*signal.borrow());
    assert_eq!(
        app.store.get_access().unwrap().as_deref(),
        Some(result.access_token.as_str())
    );
    assert_eq!(
        app.store.get_refresh().unwrap().as_deref(),
        Some(result.refresh_token.as_str())
    );
}

#[tokio::test]
async fn test_login_invalid_password_reports_server_message() {
    let app = helpers::TestApp::new().await;

    let err = app
        .session
        .login("docente1@mail.com", "wrongpassword")
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Unauthorized);
    assert_eq!(err.message, "Credenciales inválidas");
    assert!(!app.session.is_authenticated());
    assert_eq!(app.store.get_access().unwrap(), None);
}

#[tokio::test]
async fn test_landing_area_per_role() {
    let app = helpers::TestApp::new().await;
    let cases = [
        ("admin@mail.com", Area::Admin),
        ("docente1@mail.com", Area::Docentes),
        ("estudiante1@mail.com", Area::Estudiante),
        ("director@mail.com", Area::Admin),
        ("guest@mail.com", Area::Login),
    ];

    for (email, expected) in cases {
        let result = app.session.login(email, "123456").await.unwrap();
        let area = app.fallback.landing_area(&result.access_token).await;
        assert_eq!(area, expected, "{email}");
    }
}

#[tokio::test]
async fn test_refresh_rotates_tokens() {
    let app = helpers::TestApp::new().await;
    let (_, old_refresh) = app.seed_session("estudiante1@mail.com", -60);

    let result = app.session.refresh().await.unwrap();

    assert!(result.rotated);
    assert_ne!(result.refresh_token, old_refresh);
    assert!(!SessionService::is_expired(Some(&result.access_token)));
    assert_eq!(app.refresh_calls(), 1);
}

#[tokio::test]
async fn test_refresh_without_rotation_keeps_refresh_token() {
    let app = helpers::TestApp::new().await;
    app.server
        .rotate_refresh
        .store(false, std::sync::atomic::Ordering::SeqCst);
    let (_, refresh) = app.seed_session("estudiante1@mail.com", -60);

    let result = app.session.refresh().await.unwrap();

    assert!(!result.rotated);
    assert_eq!(app.store.get_refresh().unwrap(), Some(refresh));
}

#[tokio::test]
async fn test_me_returns_profile() {
    let app = helpers::TestApp::new().await;
    app.seed_session("director@mail.com", 600);

    let profile = app.session.me().await.unwrap();

    assert_eq!(profile.email.as_deref(), Some("director@mail.com"));
    assert_eq!(profile.authorities().area(), Area::Admin);
}

#[tokio::test]
async fn test_logout_twice_is_idempotent() {
    let app = helpers::TestApp::new().await;
    app.session.login("admin@mail.com", "123456").await.unwrap();

    app.session.logout().unwrap();
    app.session.logout().unwrap();

    assert!(!app.session.is_authenticated());
    assert_eq!(app.store.get_access().unwrap(), None);
    assert_eq!(app.store.get_refresh().unwrap(), None);
    assert_eq!(app.history.entries(), vec!["/login", "/login"]);
}
