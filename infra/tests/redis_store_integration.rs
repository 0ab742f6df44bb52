//! Integration tests for the Redis verification store
//!
//! These tests require a running Redis instance to execute.
//! Run with: cargo test -p vm_infra --test redis_store_integration -- --ignored

use std::sync::Arc;

use chrono::Duration;
use uuid::Uuid;

use vm_core::errors::{DomainError, VerificationError};
use vm_core::repositories::VerificationRepository;
use vm_core::services::verification::{VerificationService, VerificationServiceConfig};
use vm_core::{VerificationRecord, VerificationStatus};
use vm_infra::cache::{CacheConfig, RedisVerificationRepository};
use vm_infra::mail::ConsoleMailGateway;

fn test_config() -> CacheConfig {
    let mut config = CacheConfig::new(
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
    );
    config.key_prefix = "test:verification".to_string();
    config.retention_seconds = 60;
    config
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_store_round_trip() {
    let config = test_config();
    let store = RedisVerificationRepository::connect(&config).await.unwrap();
    assert!(store.client().health_check().await.unwrap());

    let mut record = VerificationRecord::new(
        "user@example.com".to_string(),
        "482913".to_string(),
        Duration::minutes(10),
    )
    .unwrap();
    store.save(&record).await.unwrap();

    let found = store.find_by_id(record.id).await.unwrap();
    assert_eq!(found.as_ref(), Some(&record));

    record.mark_verified();
    store.update(&record).await.unwrap();
    let found = store.find_by_id(record.id).await.unwrap().unwrap();
    assert_eq!(found.status, VerificationStatus::Verified);
    assert!(found.code.is_empty());

    let key = format!("{}:record:{}", config.key_prefix, record.id);
    let ttl = store.client().ttl(&key).await.unwrap().unwrap();
    assert!(ttl > 60 && ttl <= 600 + 60);

    store.delete(record.id).await.unwrap();
    assert!(store.find_by_id(record.id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_update_if_unchanged_rejects_stale_write() {
    let store = RedisVerificationRepository::connect(&test_config()).await.unwrap();

    let stored = VerificationRecord::new(
        "user@example.com".to_string(),
        "482913".to_string(),
        Duration::minutes(10),
    )
    .unwrap();
    store.save(&stored).await.unwrap();

    let mut verified = stored.clone();
    verified.mark_verified();
    assert!(store.update_if_unchanged(&stored, &verified).await.unwrap());

    let mut failed = stored.clone();
    failed.mark_failed();
    assert!(!store.update_if_unchanged(&stored, &failed).await.unwrap());

    let found = store.find_by_id(stored.id).await.unwrap().unwrap();
    assert_eq!(found.status, VerificationStatus::Verified);

    store.delete(stored.id).await.unwrap();
    assert!(!store.update_if_unchanged(&stored, &verified).await.unwrap());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore] // Requires Redis server
async fn test_two_instances_agree_on_final_status() {
    let config = test_config();
    let service_config = VerificationServiceConfig::default();
    let max_attempts = service_config.max_attempts;

    // Separate connections and separate services, as two server processes would have
    let first = Arc::new(VerificationService::new(
        Arc::new(RedisVerificationRepository::connect(&config).await.unwrap()),
        Arc::new(ConsoleMailGateway::new()),
        service_config.clone(),
    ));
    let second = Arc::new(VerificationService::new(
        Arc::new(RedisVerificationRepository::connect(&config).await.unwrap()),
        Arc::new(ConsoleMailGateway::new()),
        service_config,
    ));
    let store = RedisVerificationRepository::connect(&config).await.unwrap();

    for _ in 0..20 {
        let mut record = VerificationRecord::new(
            "user@example.com".to_string(),
            "482913".to_string(),
            Duration::minutes(10),
        )
        .unwrap();
        record.attempts = max_attempts - 1;
        store.save(&record).await.unwrap();
        let id = record.id;

        let correct = {
            let service = first.clone();
            tokio::spawn(async move { service.confirm_verification(id, "482913").await })
        };
        let wrong = {
            let service = second.clone();
            tokio::spawn(async move { service.confirm_verification(id, "000000").await })
        };
        let correct = correct.await.unwrap();
        let wrong = wrong.await.unwrap();

        let stored = store.find_by_id(id).await.unwrap().unwrap();
        match stored.status {
            VerificationStatus::Verified => {
                assert_eq!(correct.unwrap().status, VerificationStatus::Verified);
                assert_eq!(wrong.unwrap().status, VerificationStatus::Verified);
                assert_eq!(stored.attempts, max_attempts - 1);
            }
            VerificationStatus::Failed => {
                assert_eq!(correct.unwrap().status, VerificationStatus::Failed);
                assert!(matches!(
                    wrong,
                    Err(DomainError::Verification(VerificationError::InvalidCode {
                        remaining_attempts: 0
                    }))
                ));
                assert_eq!(stored.attempts, max_attempts);
            }
            other => panic!("Unexpected final status: {}", other),
        }

        store.delete(id).await.unwrap();
    }
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_service_lifecycle_on_redis() {
    let store = Arc::new(RedisVerificationRepository::connect(&test_config()).await.unwrap());
    let service = VerificationService::new(
        store.clone(),
        Arc::new(ConsoleMailGateway::new()),
        VerificationServiceConfig::default(),
    );

    let request = service.request_verification("user@example.com").await.unwrap();
    let code = request.code.expect("console gateway returns the code");

    let confirmed = service.confirm_verification(request.verification_id, &code).await.unwrap();
    assert_eq!(confirmed.status, VerificationStatus::Verified);

    let missing = service.confirm_verification(Uuid::new_v4(), &code).await;
    assert!(matches!(
        missing,
        Err(DomainError::Verification(VerificationError::NotFound))
    ));

    store.delete(request.verification_id).await.unwrap();
}
