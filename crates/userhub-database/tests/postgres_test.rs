//! PostgreSQL repository tests.
//!
//! These need a reachable database; run them with
//! `DATABASE_URL=postgres://... cargo test -p userhub-database -- --ignored`.

use userhub_core::config::DatabaseConfig;
use userhub_core::error::ErrorKind;
use userhub_core::types::{AccountId, Patch};
use userhub_database::{AccountRepository, DatabasePool, PgAccountRepository};
use userhub_entity::account::{AccountChanges, ImageRef, NewAccount, Role};

async fn repository() -> PgAccountRepository {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for ignored tests");
    let config = DatabaseConfig {
        url,
        ..DatabaseConfig::default()
    };
    let pool = DatabasePool::connect(&config)
        .await
        .expect("Failed to connect to test database");
    PgAccountRepository::new(pool.pool().clone())
}

/// Username unique to this run so reruns against one database don't collide.
fn unique(prefix: &str) -> String {
    format!("{prefix}-{}", AccountId::new())
}

fn new_account(username: &str) -> NewAccount {
    NewAccount {
        id: AccountId::new(),
        username: username.to_string(),
        password_hash: "$argon2id$stub".to_string(),
        role: Role::user(),
        region: Some("north".to_string()),
        image: Some(ImageRef::Path("images/x/a.png".to_string())),
    }
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_partial_update_touches_only_provided_fields() {
    let repo = repository().await;
    let created = repo.create(new_account(&unique("pg-partial"))).await.unwrap();

    let updated = repo
        .update(
            created.id,
            AccountChanges {
                role: Patch::Set(Role::admin()),
                ..AccountChanges::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.role, Role::admin());
    assert_eq!(updated.username, created.username);
    assert_eq!(updated.password_hash, created.password_hash);
    assert_eq!(updated.region, created.region);
    assert_eq!(updated.image, created.image);
    assert!(updated.updated_at >= created.updated_at);

    let cleared = repo
        .update(
            created.id,
            AccountChanges {
                region: Patch::Clear,
                image: Patch::Clear,
                ..AccountChanges::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(cleared.region, None);
    assert_eq!(cleared.image, None);
    assert_eq!(cleared.role, Role::admin());

    let inline = repo
        .update(
            created.id,
            AccountChanges {
                region: Patch::Set("south".to_string()),
                image: Patch::Set(ImageRef::Inline(vec![1, 2, 3])),
                ..AccountChanges::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(inline.region.as_deref(), Some("south"));
    assert_eq!(inline.image, Some(ImageRef::Inline(vec![1, 2, 3])));

    let unchanged = repo
        .update(created.id, AccountChanges::default())
        .await
        .unwrap();
    assert_eq!(unchanged.updated_at, inline.updated_at);

    repo.delete(created.id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_unique_username_maps_to_conflict() {
    let repo = repository().await;
    let taken = unique("pg-taken");
    let first = repo.create(new_account(&taken)).await.unwrap();

    let err = repo.create(new_account(&taken)).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
    assert!(err.message.contains(&taken));

    let other = repo.create(new_account(&unique("pg-other"))).await.unwrap();
    let err = repo
        .update(
            other.id,
            AccountChanges {
                username: Patch::Set(taken.clone()),
                ..AccountChanges::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);

    let stored = repo.find_by_id(other.id).await.unwrap().unwrap();
    assert_eq!(stored.username, other.username);

    repo.delete(first.id).await.unwrap();
    repo.delete(other.id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_missing_account_is_not_found() {
    let repo = repository().await;

    let err = repo
        .update(
            AccountId::new(),
            AccountChanges {
                region: Patch::Set("west".to_string()),
                ..AccountChanges::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);

    let err = repo
        .update(AccountId::new(), AccountChanges::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);

    assert!(repo.delete(AccountId::new()).await.unwrap().is_none());
    assert!(repo.find_by_id(AccountId::new()).await.unwrap().is_none());
}
