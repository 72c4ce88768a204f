//! Interceptor and reconciliation against a mock backend

mod common;

use common::RecordingNavigator;
use serde_json::json;
use taskdesk_core::guard::{AuthGuard, GuardDecision, ProviderState};
use taskdesk_core::reconcile::{BootstrapOutcome, ReconcileOutcome, Reconciler};
use taskdesk_core::{
    CachedIdentity, MemoryStore, ProviderKind, ProviderSession, Redirect, SessionManager,
};
use taskdesk_http::types::TaskQuery;
use taskdesk_http::{ClientError, HttpAuthBackend, PublicClient, SessionClient};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn cached(token: &str) -> CachedIdentity {
    CachedIdentity {
        token: token.to_string(),
        user_id: Some("7".to_string()),
        is_admin: false,
        email: Some("a@b.com".to_string()),
    }
}

fn google(email: &str) -> ProviderSession {
    ProviderSession {
        provider: ProviderKind::Google,
        email: Some(email.to_string()),
        display_name: Some("Test User".to_string()),
        access_token: Some("oauth-token".to_string()),
        expires: None,
    }
}

#[tokio::test]
async fn test_stale_token_is_cleared_on_401() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/login-history/user/7"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Token expired"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = MemoryStore::new();
    let manager = SessionManager::new(&store);
    manager.save(&cached("stale")).unwrap();
    manager
        .save_preferences(&taskdesk_core::Preferences::default().toggle_theme())
        .unwrap();
    let navigator = RecordingNavigator::default();
    let session = SessionClient::new(
        PublicClient::new(mock_server.uri()).unwrap(),
        manager.clone(),
        &navigator,
    );

    let result = session.login_history("7").await;

    assert!(matches!(result, Err(ClientError::AuthenticationFailed(_))));
    assert!(manager.load().is_none());
    assert_eq!(manager.preferences().theme, taskdesk_core::Theme::Dark);
    assert_eq!(navigator.visited(), vec![Redirect::Login]);
}

#[tokio::test]
async fn test_other_errors_keep_session() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/algo/complete-task/3"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let store = MemoryStore::new();
    let manager = SessionManager::new(&store);
    manager.save(&cached("valid")).unwrap();
    let navigator = RecordingNavigator::default();
    let session = SessionClient::new(
        PublicClient::new(mock_server.uri()).unwrap(),
        manager.clone(),
        &navigator,
    );

    let result = session.complete_task(3).await;

    assert!(matches!(result, Err(ClientError::ServerError { status: 500, .. })));
    assert!(manager.load().is_some());
    assert!(navigator.visited().is_empty());
}

#[tokio::test]
async fn test_no_token_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/algo/all_users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let store = MemoryStore::new();
    let navigator = RecordingNavigator::default();
    let session = SessionClient::new(
        PublicClient::new(mock_server.uri()).unwrap(),
        SessionManager::new(&store),
        &navigator,
    );

    let result = session.all_users().await;
    assert!(matches!(result, Err(ClientError::Configuration(_))));
}

#[tokio::test]
async fn test_provider_token_used_without_cache() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/algo/abandon-task/4"))
        .and(header("authorization", "Bearer oauth-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "task_id": 4,
            "user_id": 7,
            "title": "Old chore",
            "created_at": "2024-05-01T09:00:00",
            "is_important": false,
            "status": "Abandoned"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = MemoryStore::new();
    let navigator = RecordingNavigator::default();
    let session = SessionClient::new(
        PublicClient::new(mock_server.uri()).unwrap(),
        SessionManager::new(&store),
        &navigator,
    )
    .with_provider(Some(google("a@b.com")));

    let task = session.abandon_task(4).await.unwrap();
    assert!(task.is_closed());
}

#[tokio::test]
async fn test_no_matching_tasks_is_empty_list() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/algo/get-all-tasks"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"detail": "No tasks match the given filters"})),
        )
        .mount(&mock_server)
        .await;

    let store = MemoryStore::new();
    let manager = SessionManager::new(&store);
    manager.save(&cached("valid")).unwrap();
    let navigator = RecordingNavigator::default();
    let session = SessionClient::new(
        PublicClient::new(mock_server.uri()).unwrap(),
        manager,
        &navigator,
    );

    let tasks = session.list_tasks(&TaskQuery::for_user("7")).await.unwrap();
    assert!(tasks.is_empty());
}

#[tokio::test]
async fn test_guard_rejects_stale_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/protected-route"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = MemoryStore::new();
    let manager = SessionManager::new(&store);
    manager.save(&cached("stale")).unwrap();
    let backend = HttpAuthBackend::new(PublicClient::new(mock_server.uri()).unwrap());

    let decision =
        AuthGuard::default().evaluate(&ProviderState::Resolved(None), manager.load().as_ref());
    let GuardDecision::Validate { token, user } = decision else {
        panic!("expected a validation step, got {decision:?}");
    };

    let decision = AuthGuard::validate(&backend, &manager, &token, user).await;
    assert_eq!(decision, GuardDecision::Redirect(Redirect::Login));
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_guard_reconciles_provider_user_before_render() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/get-user-info/a@b.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "backend-token",
            "user_id": 7,
            "is_admin": false
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/login-history/user/7"))
        .and(header("authorization", "Bearer backend-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = MemoryStore::new();
    let manager = SessionManager::new(&store);
    let navigator = RecordingNavigator::default();
    let backend = HttpAuthBackend::new(PublicClient::new(mock_server.uri()).unwrap());
    let provider = ProviderState::Resolved(Some(google("a@b.com")));

    let decision = AuthGuard::default().evaluate(&provider, manager.load().as_ref());
    let GuardDecision::Reconcile { session, user } = decision else {
        panic!("expected a reconcile step, got {decision:?}");
    };
    assert_eq!(user.user_id, None);

    let decision = AuthGuard::reconcile(
        &Reconciler::new(),
        &backend,
        &manager,
        &navigator,
        &session,
        &CancellationToken::new(),
    )
    .await;
    let GuardDecision::Render(user) = decision else {
        panic!("expected a render, got {decision:?}");
    };
    assert_eq!(user.user_id.as_deref(), Some("7"));
    assert!(navigator.visited().is_empty());

    // Pages now load with the backend token and id
    assert!(matches!(
        AuthGuard::default().evaluate(&provider, manager.load().as_ref()),
        GuardDecision::Render(_)
    ));
    let client = SessionClient::new(
        PublicClient::new(mock_server.uri()).unwrap(),
        manager,
        &navigator,
    )
    .with_provider(provider.session().cloned());
    assert!(client.login_history("7").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_provider_user_goes_to_register() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/get-user-info/new@user.com"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"detail": "User not found"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = MemoryStore::new();
    let manager = SessionManager::new(&store);
    let navigator = RecordingNavigator::default();
    let backend = HttpAuthBackend::new(PublicClient::new(mock_server.uri()).unwrap());

    let outcome = Reconciler::new()
        .reconcile(
            &backend,
            &manager,
            &navigator,
            "new@user.com",
            &CancellationToken::new(),
        )
        .await;

    assert_eq!(outcome, ReconcileOutcome::NeedsRegistration);
    assert_eq!(navigator.visited(), vec![Redirect::Register]);
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_rapid_reconciliations_call_backend_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/get-user-info/a@b.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "backend-token",
            "user_id": 7,
            "is_admin": true
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = MemoryStore::new();
    let manager = SessionManager::new(&store);
    let navigator = RecordingNavigator::default();
    let backend = HttpAuthBackend::new(PublicClient::new(mock_server.uri()).unwrap());
    let reconciler = Reconciler::new();
    let cancel = CancellationToken::new();

    let (first, second) = tokio::join!(
        reconciler.reconcile(&backend, &manager, &navigator, "a@b.com", &cancel),
        reconciler.reconcile(&backend, &manager, &navigator, "a@b.com", &cancel),
    );
    let third = reconciler
        .reconcile(&backend, &manager, &navigator, "a@b.com", &cancel)
        .await;

    assert!(matches!(first, ReconcileOutcome::Reconciled(_)));
    assert_eq!(second, ReconcileOutcome::AlreadyHandled);
    assert_eq!(third, ReconcileOutcome::AlreadyHandled);
    let identity = manager.load().unwrap();
    assert_eq!(identity.token, "backend-token");
    assert_eq!(identity.user_id.as_deref(), Some("7"));
    assert!(identity.is_admin);
}

#[tokio::test]
async fn test_bootstrap_reconciles_stamps_and_goes_home() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/get-user-info/a@b.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "backend-token",
            "user_id": 7,
            "is_admin": false
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/data/login-history-stamp"))
        .and(body_json(json!({"user_id": "7"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = MemoryStore::new();
    let manager = SessionManager::new(&store);
    manager.save(&cached("someone-else")).unwrap();
    let navigator = RecordingNavigator::default();
    let backend = HttpAuthBackend::new(PublicClient::new(mock_server.uri()).unwrap());
    let session = google("a@b.com");

    let outcome = Reconciler::new()
        .bootstrap(
            &backend,
            &manager,
            &navigator,
            Some(&session),
            &CancellationToken::new(),
        )
        .await;

    assert_eq!(outcome, BootstrapOutcome::Completed);
    assert_eq!(navigator.visited(), vec![Redirect::Home]);
    assert_eq!(manager.token().as_deref(), Some("backend-token"));
}

#[tokio::test]
async fn test_cancelled_reconciliation_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/get-user-info/a@b.com"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let store = MemoryStore::new();
    let manager = SessionManager::new(&store);
    let navigator = RecordingNavigator::default();
    let backend = HttpAuthBackend::new(PublicClient::new(mock_server.uri()).unwrap());
    let cancel = CancellationToken::new();
    cancel.cancel();

    let outcome = Reconciler::new()
        .reconcile(&backend, &manager, &navigator, "a@b.com", &cancel)
        .await;

    assert_eq!(outcome, ReconcileOutcome::Cancelled);
    assert!(store.is_empty());
    assert!(navigator.visited().is_empty());
}
