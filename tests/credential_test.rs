mod common;

use std::sync::Arc;

use common::{setup_store, test_account, FixedWalletGenerator, SequenceWalletGenerator};
use custody_core::domain::services::credential_hasher;
use custody_core::domain::services::{CredentialError, CredentialService};
use custody_core::domain::services::credential_service::SignupRequest;

fn signup(username: &str, password: &str) -> SignupRequest {
    SignupRequest {
        username: Some(username.to_string()),
        password: Some(password.to_string()),
    }
}

#[tokio::test]
async fn signup_produces_salted_hash_and_wallet() {
    let repositories = setup_store().await;
    let service = CredentialService::new(
        repositories.account.clone(),
        Arc::new(SequenceWalletGenerator::default()),
    );

    let account = service
        .create_account(&signup("alice", "correct horse"))
        .await
        .expect("signup should succeed");

    assert_eq!(account.username, "alice");
    assert!(account.active);
    assert_eq!(account.password_salt.len(), 64, "32 bytes hex-encoded");
    assert!(hex::decode(&account.password_salt).is_ok());
    assert_eq!(
        account.password,
        credential_hasher::hash_password("correct horse", &account.password_salt),
        "stored hash must be SHA-256 over password || salt"
    );
    assert_eq!(account.deposit_wallet_address, "wallet-address-0");

    // The record actually landed in the store
    let stored = repositories
        .account
        .find_by_username("alice")
        .await
        .unwrap()
        .expect("account should be persisted");
    assert_eq!(stored.id, account.id);
}

#[tokio::test]
async fn sanitize_does_not_persist() {
    let repositories = setup_store().await;
    let service = CredentialService::new(
        repositories.account.clone(),
        Arc::new(SequenceWalletGenerator::default()),
    );

    let credentials = service
        .sanitize_signup_credentials(&signup("bob", "hunter22"))
        .await
        .expect("sanitization should succeed");

    assert_eq!(credentials.username, "bob");
    assert!(
        repositories
            .account
            .find_by_username("bob")
            .await
            .unwrap()
            .is_none(),
        "sanitization only probes; the caller persists"
    );
}

#[tokio::test]
async fn signup_validation_bounds() {
    let repositories = setup_store().await;
    let service = CredentialService::new(
        repositories.account.clone(),
        Arc::new(SequenceWalletGenerator::default()),
    );

    let missing = SignupRequest {
        username: None,
        password: Some("hunter22".to_string()),
    };
    assert!(matches!(
        service.create_account(&missing).await,
        Err(CredentialError::NoCredentialsProvided)
    ));

    assert!(matches!(
        service.create_account(&signup("ab", "hunter22")).await,
        Err(CredentialError::InvalidUsername)
    ));
    assert!(matches!(
        service
            .create_account(&signup(&"u".repeat(31), "hunter22"))
            .await,
        Err(CredentialError::InvalidUsername)
    ));

    assert!(matches!(
        service.create_account(&signup("carol", "short")).await,
        Err(CredentialError::InvalidPassword)
    ));
    assert!(matches!(
        service
            .create_account(&signup("carol", &"p".repeat(51)))
            .await,
        Err(CredentialError::InvalidPassword)
    ));
}

#[tokio::test]
async fn signup_rejects_taken_username() {
    let repositories = setup_store().await;
    let service = CredentialService::new(
        repositories.account.clone(),
        Arc::new(SequenceWalletGenerator::default()),
    );

    service
        .create_account(&signup("dave", "hunter22"))
        .await
        .expect("first signup should succeed");

    assert!(matches!(
        service.create_account(&signup("dave", "hunter23")).await,
        Err(CredentialError::UsernameTaken)
    ));
}

#[tokio::test]
async fn wallet_allocation_gives_up_after_bounded_retries() {
    let repositories = setup_store().await;

    // Occupy the only address the generator will ever produce
    repositories
        .account
        .create(&test_account("acct-1", "erin", "stuck-address"))
        .await
        .unwrap();

    let service = CredentialService::new(
        repositories.account.clone(),
        Arc::new(FixedWalletGenerator {
            address: "stuck-address".to_string(),
        }),
    );

    assert!(matches!(
        service.create_account(&signup("frank", "hunter22")).await,
        Err(CredentialError::AccountCreate(_))
    ));
}

#[tokio::test]
async fn store_classifies_duplicate_inserts() {
    // Two concurrent signups can both pass the read-only probes; the
    // unique indices must resolve the race at insert time, and the
    // adapter must report it distinguishably
    let repositories = setup_store().await;

    repositories
        .account
        .create(&test_account("acct-1", "judy", "addr-1"))
        .await
        .unwrap();

    let same_username = repositories
        .account
        .create(&test_account("acct-2", "judy", "addr-2"))
        .await
        .expect_err("duplicate username must be rejected");
    assert!(same_username.is_unique_violation());

    let same_address = repositories
        .account
        .create(&test_account("acct-3", "judy2", "addr-1"))
        .await
        .expect_err("duplicate wallet address must be rejected");
    assert!(same_address.is_unique_violation());
}

#[tokio::test]
async fn login_verifies_password_and_returns_account() {
    let repositories = setup_store().await;
    let service = CredentialService::new(
        repositories.account.clone(),
        Arc::new(SequenceWalletGenerator::default()),
    );

    let created = service
        .create_account(&signup("grace", "hunter22"))
        .await
        .unwrap();

    let logged_in = service
        .verify_login_credentials("grace", "hunter22")
        .await
        .expect("login should succeed");
    assert_eq!(logged_in.id, created.id);

    // Leading/trailing whitespace on the username is trimmed
    let logged_in = service
        .verify_login_credentials("  grace  ", "hunter22")
        .await
        .expect("trimmed login should succeed");
    assert_eq!(logged_in.id, created.id);
}

#[tokio::test]
async fn login_failure_does_not_reveal_which_part_was_wrong() {
    let repositories = setup_store().await;
    let service = CredentialService::new(
        repositories.account.clone(),
        Arc::new(SequenceWalletGenerator::default()),
    );

    service
        .create_account(&signup("heidi", "hunter22"))
        .await
        .unwrap();

    let unknown_user = service
        .verify_login_credentials("nobody", "hunter22")
        .await
        .expect_err("unknown username must fail");
    let wrong_password = service
        .verify_login_credentials("heidi", "wrong-password")
        .await
        .expect_err("wrong password must fail");

    assert!(matches!(unknown_user, CredentialError::InvalidCredentials));
    assert!(matches!(wrong_password, CredentialError::InvalidCredentials));
    assert_eq!(
        unknown_user.to_string(),
        wrong_password.to_string(),
        "identical kind and message; no enumeration oracle"
    );
}

#[tokio::test]
async fn inactive_accounts_cannot_log_in() {
    let repositories = setup_store().await;
    let service = CredentialService::new(
        repositories.account.clone(),
        Arc::new(SequenceWalletGenerator::default()),
    );

    let account = service
        .create_account(&signup("ivan", "hunter22"))
        .await
        .unwrap();

    repositories
        .account
        .set_active(&account.id, false)
        .await
        .unwrap();

    assert!(matches!(
        service.verify_login_credentials("ivan", "hunter22").await,
        Err(CredentialError::AccountInactive)
    ));
}
