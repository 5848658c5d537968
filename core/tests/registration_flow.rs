//! End-to-end tests of the verification-gated registration workflow,
//! driven through the public service APIs with in-memory collaborators.

use std::sync::Arc;

use onbo_core::domain::entities::registration_draft::NewRegistration;
use onbo_core::domain::entities::verification_session::{DeliveryMethod, VerificationPurpose};
use onbo_core::errors::{DomainError, VerificationError};
use onbo_core::repositories::{MockUserRepository, UserRepository};
use onbo_core::services::onboarding::OnboardingService;
use onbo_core::services::verification::mocks::{
    InMemoryTemporaryStore, MockNotifier, MockPasswordHasher,
};
use onbo_core::services::verification::{
    PasswordHasher, VerificationService, VerificationServiceConfig, VerificationStaging,
};

type Onboarding = OnboardingService<
    MockUserRepository,
    MockNotifier,
    InMemoryTemporaryStore,
    MockPasswordHasher,
>;

struct World {
    store: Arc<InMemoryTemporaryStore>,
    notifier: Arc<MockNotifier>,
    users: Arc<MockUserRepository>,
    onboarding: Arc<Onboarding>,
    config: VerificationServiceConfig,
}

fn world() -> World {
    world_with_config(VerificationServiceConfig::default())
}

fn world_with_config(config: VerificationServiceConfig) -> World {
    let store = Arc::new(InMemoryTemporaryStore::new());
    let notifier = Arc::new(MockNotifier::new());
    let users = Arc::new(MockUserRepository::new());
    let verification = Arc::new(VerificationService::new(
        Arc::clone(&notifier),
        Arc::clone(&store),
        Arc::new(MockPasswordHasher),
        config.clone(),
    ));
    let onboarding = Arc::new(OnboardingService::new(Arc::clone(&users), verification));
    World {
        store,
        notifier,
        users,
        onboarding,
        config,
    }
}

fn john() -> NewRegistration {
    NewRegistration {
        full_name: "John".to_string(),
        email: Some("a@b.com".to_string()),
        phone: None,
        password: "p@ss".to_string(),
    }
}

// Scenario A: request a registration code, complete with the correct code.
// The user is committed with a hashed password and both temporary records
// are gone.
#[tokio::test]
async fn scenario_a_happy_path() {
    let w = world();

    let issued = w
        .onboarding
        .request_registration_code("a@b.com", DeliveryMethod::Email, john())
        .await
        .unwrap();
    assert_eq!(issued.expires_in_seconds, 600);
    assert_eq!(w.store.len().await, 2);

    let code = w.notifier.last_delivery().await.unwrap().code;
    let user_id = w
        .onboarding
        .complete_registration("a@b.com", VerificationPurpose::FinishRegistration, &code)
        .await
        .unwrap();

    let user = w
        .users
        .find_by_email("a@b.com")
        .await
        .unwrap()
        .expect("user committed exactly once");
    assert_eq!(user.id, user_id);
    assert_eq!(w.users.user_count().await, 1);

    // The durable password is the hash, never the submitted plaintext
    assert_eq!(
        user.password_hash,
        MockPasswordHasher.hash_password("p@ss").await.unwrap()
    );
    assert_ne!(user.password_hash, "p@ss");
    assert!(MockPasswordHasher
        .verify_password("p@ss", &user.password_hash)
        .await
        .unwrap());

    assert!(w.store.is_empty().await);
}

// Scenario B: completing with a code that was never issued.
#[tokio::test]
async fn scenario_b_unissued_code() {
    let w = world();

    let err = w
        .onboarding
        .complete_registration(
            "a@b.com",
            VerificationPurpose::FinishRegistration,
            "424242",
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Verification(VerificationError::InvalidOrExpiredCode)
    ));
}

// Scenario C: completing twice with the same valid code.
#[tokio::test]
async fn scenario_c_double_completion() {
    let w = world();

    w.onboarding
        .request_registration_code("a@b.com", DeliveryMethod::Email, john())
        .await
        .unwrap();
    let code = w.notifier.last_delivery().await.unwrap().code;

    assert!(w
        .onboarding
        .complete_registration("a@b.com", VerificationPurpose::FinishRegistration, &code)
        .await
        .is_ok());

    let err = w
        .onboarding
        .complete_registration("a@b.com", VerificationPurpose::FinishRegistration, &code)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Verification(VerificationError::InvalidOrExpiredCode)
    ));
    assert_eq!(w.users.user_count().await, 1);
}

// Scenario D: completing after the TTL has elapsed. The in-memory store
// never physically evicts, so this proves the logical expiry check does
// not rely on eviction timing.
#[tokio::test]
async fn scenario_d_expired_code() {
    let w = world_with_config(VerificationServiceConfig {
        code_ttl_seconds: 0,
        ..Default::default()
    });

    w.onboarding
        .request_registration_code("a@b.com", DeliveryMethod::Email, john())
        .await
        .unwrap();
    let code = w.notifier.last_delivery().await.unwrap().code;
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;

    let err = w
        .onboarding
        .complete_registration("a@b.com", VerificationPurpose::FinishRegistration, &code)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Verification(VerificationError::InvalidOrExpiredCode)
    ));
    assert_eq!(w.users.user_count().await, 0);
}

// Concurrency property: N racing completions with the same valid triple
// produce exactly one success and N-1 invalid-code results, and exactly
// one committed user.
#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_completion_commits_exactly_once() {
    const N: usize = 16;
    let w = world();

    w.onboarding
        .request_registration_code("a@b.com", DeliveryMethod::Email, john())
        .await
        .unwrap();
    let code = w.notifier.last_delivery().await.unwrap().code;

    let mut handles = Vec::with_capacity(N);
    for _ in 0..N {
        let onboarding = Arc::clone(&w.onboarding);
        let code = code.clone();
        handles.push(tokio::spawn(async move {
            onboarding
                .complete_registration(
                    "a@b.com",
                    VerificationPurpose::FinishRegistration,
                    &code,
                )
                .await
        }));
    }

    let mut successes = 0;
    let mut invalid = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(DomainError::Verification(VerificationError::InvalidOrExpiredCode)) => {
                invalid += 1
            }
            Err(other) => panic!("unexpected error: {}", other),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(invalid, N - 1);
    assert_eq!(w.users.user_count().await, 1);
    assert!(w.store.is_empty().await);
}

// Property: for any secret, the staged draft holds hash(secret), never the
// secret itself (the mock hash is never the identity).
#[tokio::test]
async fn staged_drafts_never_hold_plaintext() {
    let w = world();
    let staging = VerificationStaging::new(Arc::clone(&w.store), w.config.code_ttl_seconds);

    for (i, secret) in ["p@ss", "hunter2", "correct horse battery staple", "秘密"]
        .iter()
        .enumerate()
    {
        let contact = format!("user{}@example.com", i);
        let registration = NewRegistration {
            full_name: format!("User {}", i),
            email: Some(contact.clone()),
            phone: None,
            password: secret.to_string(),
        };
        w.onboarding
            .request_registration_code(&contact, DeliveryMethod::Email, registration)
            .await
            .unwrap();
        let code = w.notifier.last_delivery().await.unwrap().code;

        let draft = staging
            .get_draft(&contact, &code)
            .await
            .unwrap()
            .expect("draft staged");
        let expected = MockPasswordHasher.hash_password(secret).await.unwrap();
        assert_eq!(draft.payload.password_hash, expected);
        assert_ne!(draft.payload.password_hash, *secret);
    }
}

// A racing re-request does not interfere with an in-flight completion of
// the earlier code: each code owns an independent session key.
#[tokio::test]
async fn re_requested_code_coexists_until_consumed() {
    let w = world();

    w.onboarding
        .request_registration_code("a@b.com", DeliveryMethod::Email, john())
        .await
        .unwrap();
    let first_code = w.notifier.last_delivery().await.unwrap().code;

    w.onboarding
        .request_registration_code("a@b.com", DeliveryMethod::Email, john())
        .await
        .unwrap();
    let second_code = w.notifier.last_delivery().await.unwrap().code;

    // The earlier, superseded code still completes (observed
    // overwrite-on-re-request semantics: independent keys).
    w.onboarding
        .complete_registration(
            "a@b.com",
            VerificationPurpose::FinishRegistration,
            &first_code,
        )
        .await
        .unwrap();

    if first_code != second_code {
        // The second code's session survives, but its draft cannot commit a
        // duplicate account anymore.
        let err = w
            .onboarding
            .complete_registration(
                "a@b.com",
                VerificationPurpose::FinishRegistration,
                &second_code,
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Verification(VerificationError::RegistrationCommitFailed { .. })
        ));
    }
    assert_eq!(w.users.user_count().await, 1);
}
