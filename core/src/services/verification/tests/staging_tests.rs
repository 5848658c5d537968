//! Tests for the typed staging wrapper

use std::sync::Arc;

use crate::domain::entities::registration_draft::{DraftPayload, RegistrationDraft};
use crate::domain::entities::verification_session::{
    DeliveryMethod, VerificationPurpose, VerificationSession,
};
use crate::errors::{DomainError, VerificationError};
use crate::services::verification::mocks::InMemoryTemporaryStore;
use crate::services::verification::VerificationStaging;

fn staging_with_store() -> (Arc<InMemoryTemporaryStore>, VerificationStaging<InMemoryTemporaryStore>) {
    let store = Arc::new(InMemoryTemporaryStore::new());
    let staging = VerificationStaging::new(Arc::clone(&store), 600);
    (store, staging)
}

fn session(ttl_seconds: u64) -> VerificationSession {
    VerificationSession::new(
        "john@example.com".to_string(),
        "123456".to_string(),
        VerificationPurpose::FinishRegistration,
        DeliveryMethod::Email,
        ttl_seconds,
        Some(RegistrationDraft::key_for("john@example.com", "123456")),
    )
}

fn draft_for(session: &VerificationSession) -> RegistrationDraft {
    RegistrationDraft::linked_to(
        session,
        DraftPayload {
            full_name: "John".to_string(),
            email: Some("john@example.com".to_string()),
            phone: None,
            password_hash: "hashed::p@ss".to_string(),
        },
    )
}

#[tokio::test]
async fn session_round_trip() {
    let (_, staging) = staging_with_store();
    let session = session(600);
    staging.put_session(&session).await.unwrap();

    let loaded = staging
        .get_session(
            VerificationPurpose::FinishRegistration,
            "john@example.com",
            "123456",
        )
        .await
        .unwrap();
    assert_eq!(loaded, Some(session));
}

#[tokio::test]
async fn absent_session_is_none() {
    let (_, staging) = staging_with_store();
    let loaded = staging
        .get_session(
            VerificationPurpose::FinishRegistration,
            "john@example.com",
            "123456",
        )
        .await
        .unwrap();
    assert!(loaded.is_none());
}

#[tokio::test]
async fn logically_expired_session_is_absent_before_eviction() {
    // The in-memory store never evicts, so this exercises exactly the
    // logical expiry path.
    let (store, staging) = staging_with_store();
    let session = session(0);
    staging.put_session(&session).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    assert_eq!(store.len().await, 1);
    let loaded = staging
        .get_session(
            VerificationPurpose::FinishRegistration,
            "john@example.com",
            "123456",
        )
        .await
        .unwrap();
    assert!(loaded.is_none());
}

#[tokio::test]
async fn purpose_scopes_session_lookup() {
    let (_, staging) = staging_with_store();
    staging.put_session(&session(600)).await.unwrap();

    let loaded = staging
        .get_session(
            VerificationPurpose::ForgotPassword,
            "john@example.com",
            "123456",
        )
        .await
        .unwrap();
    assert!(loaded.is_none());
}

#[tokio::test]
async fn consume_session_is_single_use() {
    let (_, staging) = staging_with_store();
    staging.put_session(&session(600)).await.unwrap();

    let first = staging
        .consume_session(
            VerificationPurpose::FinishRegistration,
            "john@example.com",
            "123456",
        )
        .await
        .unwrap();
    assert!(first.is_some());

    let second = staging
        .consume_session(
            VerificationPurpose::FinishRegistration,
            "john@example.com",
            "123456",
        )
        .await
        .unwrap();
    assert!(second.is_none());
}

#[tokio::test]
async fn consume_pair_removes_both_or_neither() {
    let (store, staging) = staging_with_store();
    let session = session(600);
    let draft = draft_for(&session);
    staging.put_draft(&draft).await.unwrap();
    staging.put_session(&session).await.unwrap();

    let consumed = staging
        .consume_session_and_draft(
            VerificationPurpose::FinishRegistration,
            "john@example.com",
            "123456",
        )
        .await
        .unwrap();
    let (consumed_session, consumed_draft) = consumed.unwrap();
    assert_eq!(consumed_session, session);
    assert_eq!(consumed_draft, draft);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn consume_pair_without_draft_leaves_session_untouched() {
    let (store, staging) = staging_with_store();
    // Session staged, draft missing: the pair consume must not remove the
    // session on its own.
    staging.put_session(&session(600)).await.unwrap();

    let consumed = staging
        .consume_session_and_draft(
            VerificationPurpose::FinishRegistration,
            "john@example.com",
            "123456",
        )
        .await
        .unwrap();
    assert!(consumed.is_none());
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn expired_pair_is_absent() {
    let (_, staging) = staging_with_store();
    let session = session(0);
    let draft = draft_for(&session);
    staging.put_draft(&draft).await.unwrap();
    staging.put_session(&session).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    let consumed = staging
        .consume_session_and_draft(
            VerificationPurpose::FinishRegistration,
            "john@example.com",
            "123456",
        )
        .await
        .unwrap();
    assert!(consumed.is_none());
}

#[tokio::test]
async fn store_outage_maps_to_store_unavailable() {
    let (store, staging) = staging_with_store();
    store.set_fail_all(true);

    let err = staging
        .get_session(
            VerificationPurpose::FinishRegistration,
            "john@example.com",
            "123456",
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Verification(VerificationError::StoreUnavailable { .. })
    ));
}

#[tokio::test]
async fn put_session_overwrites_existing_key() {
    let (store, staging) = staging_with_store();
    let mut session = session(600);
    staging.put_session(&session).await.unwrap();
    session.delivery_method = DeliveryMethod::Sms;
    staging.put_session(&session).await.unwrap();

    assert_eq!(store.len().await, 1);
    let loaded = staging
        .get_session(
            VerificationPurpose::FinishRegistration,
            "john@example.com",
            "123456",
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(loaded.delivery_method, DeliveryMethod::Sms);
}
