//! End-to-end tests for the running view router
//!
//! These tests drive `ViewRouterService` through the auth handle, the
//! navigation channel and view callbacks, with an in-memory profile store
//! standing in for the hosted backend.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use callsight_client::app::{AppError, RouterHandle, ViewRouterService};
use callsight_client::auth::AuthHandle;
use callsight_client::domain::profile::{OnboardingDetails, UserProfile};
use callsight_client::domain::repositories::{
    ProfileRepository, RepositoryError, RepositoryResult,
};
use callsight_client::domain::router::{RenderedView, RouterError, UserIntent};
use callsight_client::domain::session::Session;
use callsight_client::domain::user::UserId;
use tokio::sync::{watch, Notify};
use uuid::Uuid;

/// In-memory profile store with failure injection and per-user gates
#[derive(Default)]
struct InMemoryProfiles {
    rows: Mutex<HashMap<UserId, UserProfile>>,
    failing: Mutex<HashSet<UserId>>,
    gates: Mutex<HashMap<UserId, Arc<Notify>>>,
    finds: AtomicUsize,
}

impl InMemoryProfiles {
    fn put(&self, profile: UserProfile) {
        self.rows.lock().unwrap().insert(profile.user_id, profile);
    }

    fn fail_for(&self, user_id: UserId) {
        self.failing.lock().unwrap().insert(user_id);
    }

    /// Holds lookups for `user_id` until the returned notify fires
    fn gate(&self, user_id: UserId) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.gates
            .lock()
            .unwrap()
            .insert(user_id, Arc::clone(&notify));
        notify
    }

    fn finds(&self) -> usize {
        self.finds.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfiles {
    async fn find_by_user_id(&self, user_id: UserId) -> RepositoryResult<Option<UserProfile>> {
        self.finds.fetch_add(1, Ordering::SeqCst);

        let gate = self.gates.lock().unwrap().get(&user_id).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if self.failing.lock().unwrap().contains(&user_id) {
            return Err(RepositoryError::AccessDenied(
                "permission denied for table user_profiles".to_string(),
            ));
        }
        Ok(self.rows.lock().unwrap().get(&user_id).cloned())
    }

    async fn upsert(&self, profile: &UserProfile) -> RepositoryResult<UserProfile> {
        self.put(profile.clone());
        Ok(profile.clone())
    }
}

struct Harness {
    profiles: Arc<InMemoryProfiles>,
    auth: AuthHandle,
    nav: watch::Sender<Option<String>>,
    router: RouterHandle,
}

fn start(tab: Option<&str>) -> Harness {
    let profiles = Arc::new(InMemoryProfiles::default());
    let auth = AuthHandle::new();
    let (nav, nav_rx) = watch::channel(tab.map(str::to_string));

    let (router, _task) = ViewRouterService::spawn(
        Arc::clone(&profiles) as Arc<dyn ProfileRepository>,
        auth.subscribe(),
        nav_rx,
    );

    Harness {
        profiles,
        auth,
        nav,
        router,
    }
}

fn session(user_id: UserId) -> Session {
    Session {
        user_id,
        email: Some("jane@acme.io".to_string()),
        access_token: "token".to_string(),
    }
}

fn user() -> UserId {
    UserId::new(Uuid::new_v4())
}

fn complete_profile(user_id: UserId) -> UserProfile {
    let mut profile = UserProfile::empty(user_id, "jane@acme.io");
    profile.onboarding_completed = true;
    profile
}

async fn expect_view(router: &RouterHandle, expected: RenderedView) {
    let mut rx = router.subscribe();
    let reached = tokio::time::timeout(Duration::from_secs(2), async {
        rx.wait_for(|v| *v == expected).await.map(|_| ())
    })
    .await;
    assert!(
        matches!(reached, Ok(Ok(()))),
        "Expected {}, still at {}",
        expected,
        router.view()
    );
}

async fn wait_for_finds(profiles: &InMemoryProfiles, count: usize) {
    let waited = tokio::time::timeout(Duration::from_secs(2), async {
        while profiles.finds() < count {
            tokio::task::yield_now().await;
        }
    })
    .await;
    assert!(waited.is_ok(), "Expected {} profile lookups", count);
}

async fn let_router_run() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn test_loading_until_auth_reports() {
    let h = start(None);
    let_router_run().await;

    assert_eq!(h.router.view(), RenderedView::Loading);
    assert!(h.router.dispatch(UserIntent::GetStarted).await.is_err());
}

#[tokio::test]
async fn test_signed_out_lands_on_landing() {
    let h = start(None);
    h.auth.sign_out();

    expect_view(&h.router, RenderedView::Landing).await;
    assert_eq!(h.profiles.finds(), 0);
}

#[tokio::test]
async fn test_get_started_opens_auth_overlay_and_close_returns() {
    let h = start(None);
    h.auth.sign_out();
    expect_view(&h.router, RenderedView::Landing).await;

    h.router.dispatch(UserIntent::GetStarted).await.unwrap();
    assert_eq!(h.router.view(), RenderedView::LandingWithAuthModal);

    h.router.dispatch(UserIntent::CloseAuth).await.unwrap();
    assert_eq!(h.router.view(), RenderedView::Landing);
}

#[tokio::test]
async fn test_complete_profile_reaches_dashboard_with_one_fetch() {
    let h = start(None);
    let user_id = user();
    h.profiles.put(complete_profile(user_id));

    h.auth.sign_in(session(user_id));

    assert_eq!(h.router.settled().await.unwrap(), RenderedView::Dashboard);
    assert_eq!(h.profiles.finds(), 1);
}

#[tokio::test]
async fn test_fetch_failure_falls_back_to_onboarding() {
    let h = start(None);
    let user_id = user();
    h.profiles.put(complete_profile(user_id));
    h.profiles.fail_for(user_id);

    h.auth.sign_in(session(user_id));

    assert_eq!(h.router.settled().await.unwrap(), RenderedView::Onboarding);
}

#[tokio::test]
async fn test_onboarding_submission_refetches_then_shows_dashboard() {
    let h = start(None);
    let user_id = user();
    h.auth.sign_in(session(user_id));
    expect_view(&h.router, RenderedView::Onboarding).await;

    let details = OnboardingDetails {
        full_name: "Jane Doe".to_string(),
        company_name: "Acme".to_string(),
        position: "VP Sales".to_string(),
        company_email: None,
        company_industry: Some("SaaS".to_string()),
        use_cases: vec!["coaching".to_string()],
    };
    let saved = h.router.submit_onboarding(&details).await.unwrap();

    assert!(saved.onboarding_completed);
    expect_view(&h.router, RenderedView::Dashboard).await;
}

#[tokio::test]
async fn test_onboarding_complete_issues_exactly_one_fetch() {
    let h = start(None);
    let user_id = user();
    h.auth.sign_in(session(user_id));
    expect_view(&h.router, RenderedView::Onboarding).await;
    let before = h.profiles.finds();

    // Nothing was written, so the read-back keeps the user in onboarding
    h.router.dispatch(UserIntent::OnboardingComplete).await.unwrap();
    wait_for_finds(&h.profiles, before + 1).await;
    expect_view(&h.router, RenderedView::Onboarding).await;
    let_router_run().await;

    assert_eq!(h.profiles.finds(), before + 1);
}

#[tokio::test]
async fn test_invalid_onboarding_is_rejected_before_writing() {
    let h = start(None);
    let user_id = user();
    h.auth.sign_in(session(user_id));
    expect_view(&h.router, RenderedView::Onboarding).await;

    let details = OnboardingDetails {
        full_name: "Jane Doe".to_string(),
        company_name: String::new(),
        position: "VP Sales".to_string(),
        company_email: None,
        company_industry: None,
        use_cases: Vec::new(),
    };
    let result = h.router.submit_onboarding(&details).await;

    assert!(matches!(result, Err(AppError::Onboarding(_))));
    assert!(h.profiles.rows.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_onboarding_not_written_when_stored_profile_unreadable() {
    let h = start(None);
    let user_id = user();
    let mut stored = UserProfile::empty(user_id, "jane@acme.io");
    stored.avatar_url = Some("https://cdn.acme.io/jane.png".to_string());
    h.profiles.put(stored.clone());
    h.auth.sign_in(session(user_id));
    expect_view(&h.router, RenderedView::Onboarding).await;
    let finds = h.profiles.finds();

    h.profiles.fail_for(user_id);
    let details = OnboardingDetails {
        full_name: "Jane Doe".to_string(),
        company_name: "Acme".to_string(),
        position: "VP Sales".to_string(),
        company_email: None,
        company_industry: None,
        use_cases: Vec::new(),
    };
    let result = h.router.submit_onboarding(&details).await;

    assert!(matches!(result, Err(AppError::Repository(_))));
    assert_eq!(h.profiles.rows.lock().unwrap().get(&user_id), Some(&stored));
    let_router_run().await;
    assert_eq!(h.profiles.finds(), finds + 1);
    assert_eq!(h.router.view(), RenderedView::Onboarding);
}

#[tokio::test]
async fn test_profile_page_round_trip_is_local() {
    let h = start(None);
    let user_id = user();
    h.profiles.put(complete_profile(user_id));
    h.auth.sign_in(session(user_id));
    expect_view(&h.router, RenderedView::Dashboard).await;

    h.router.dispatch(UserIntent::ShowProfile).await.unwrap();
    assert_eq!(h.router.view(), RenderedView::Profile);
    h.router.dispatch(UserIntent::Back).await.unwrap();
    assert_eq!(h.router.view(), RenderedView::Dashboard);
    let_router_run().await;

    assert_eq!(h.profiles.finds(), 1);
}

#[tokio::test]
async fn test_back_outside_profile_is_rejected() {
    let h = start(None);
    let user_id = user();
    h.profiles.put(complete_profile(user_id));
    h.auth.sign_in(session(user_id));
    expect_view(&h.router, RenderedView::Dashboard).await;

    let result = h.router.dispatch(UserIntent::Back).await;

    assert!(matches!(
        result,
        Err(AppError::Router(RouterError::InvalidTransition { .. }))
    ));
    assert_eq!(h.router.view(), RenderedView::Dashboard);
}

#[tokio::test]
async fn test_sign_out_returns_to_landing() {
    let h = start(None);
    let user_id = user();
    h.profiles.put(complete_profile(user_id));
    h.auth.sign_in(session(user_id));
    expect_view(&h.router, RenderedView::Dashboard).await;

    h.auth.sign_out();

    expect_view(&h.router, RenderedView::Landing).await;
}

#[tokio::test]
async fn test_quick_sign_out_and_back_in_refetches() {
    let h = start(None);
    let user_id = user();
    h.profiles.put(complete_profile(user_id));
    h.auth.sign_in(session(user_id));
    expect_view(&h.router, RenderedView::Dashboard).await;
    h.router.dispatch(UserIntent::ShowProfile).await.unwrap();

    // No yield in between, so the router may only see the final snapshot
    h.auth.sign_out();
    h.auth.sign_in(session(user_id));

    wait_for_finds(&h.profiles, 2).await;
    expect_view(&h.router, RenderedView::Dashboard).await;
    let_router_run().await;
    assert_eq!(h.profiles.finds(), 2);
}

#[tokio::test]
async fn test_superseded_fetch_does_not_overwrite_newer_session() {
    let h = start(None);
    let first = user();
    let second = user();
    let release_first = h.profiles.gate(first);
    h.profiles.put(complete_profile(second));

    h.auth.sign_in(session(first));
    wait_for_finds(&h.profiles, 1).await;
    h.auth.sign_in(session(second));
    expect_view(&h.router, RenderedView::Dashboard).await;

    // The first user has no profile; its late answer must be ignored
    release_first.notify_one();
    let_router_run().await;

    assert_eq!(h.router.view(), RenderedView::Dashboard);
}

#[tokio::test]
async fn test_dashboard_parameter_then_profile_verdict() {
    let h = start(Some("calls"));
    let user_id = user();

    h.auth.sign_in(session(user_id));

    // The parameter commits the dashboard first; the missing profile lands later
    expect_view(&h.router, RenderedView::Onboarding).await;

    h.nav.send_replace(Some("leads".to_string()));
    expect_view(&h.router, RenderedView::Dashboard).await;
}
