use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthConfig;
use auth::AuthError;
use auth::AuthGate;
use auth::DirectoryError;
use auth::ManualClock;
use auth::PasswordHasher;
use auth::PasswordRecord;
use auth::UserDirectory;
use auth::UserRecord;
use chrono::Duration;
use chrono::TimeZone;
use chrono::Utc;

#[derive(Debug, Clone, PartialEq)]
struct Account {
    id: u32,
    email: String,
    username: String,
    password: PasswordRecord,
}

impl UserRecord for Account {
    fn identifier(&self) -> &str {
        &self.email
    }

    fn password_record(&self) -> &PasswordRecord {
        &self.password
    }
}

struct Accounts(HashMap<String, Account>);

#[async_trait]
impl UserDirectory for Accounts {
    type Record = Account;

    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Account>, DirectoryError> {
        Ok(self.0.get(identifier).cloned())
    }
}

fn directory_with(account: Account) -> Arc<Accounts> {
    let mut accounts = HashMap::new();
    accounts.insert(account.email.clone(), account);
    Arc::new(Accounts(accounts))
}

#[tokio::test]
async fn test_login_then_authorize_until_expiry() {
    let account = Account {
        id: 1,
        email: "test@example.com".to_string(),
        username: "testuser".to_string(),
        password: PasswordHasher::new()
            .hash("testpassword")
            .expect("Failed to hash password"),
    };

    let config = AuthConfig::new(
        b"test-secret-key-for-jwt-signing-at-least-32-bytes",
        Duration::minutes(30),
    )
    .expect("Failed to build config");
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap(),
    ));
    let gate = AuthGate::with_clock(directory_with(account.clone()), &config, clock.clone());

    let token = gate
        .login("test@example.com", "testpassword")
        .await
        .expect("Login failed");

    let identity = gate
        .authorize(token.as_str())
        .await
        .expect("Authorize failed");
    assert_eq!(identity, account);

    // Repeating authorization decodes from scratch and gives the same answer.
    let again = gate
        .authorize(token.as_str())
        .await
        .expect("Authorize failed");
    assert_eq!(again.id, 1);
    assert_eq!(again.username, "testuser");

    clock.advance(Duration::minutes(29) + Duration::seconds(59));
    assert!(gate.authorize(token.as_str()).await.is_ok());

    clock.advance(Duration::seconds(1));
    assert_eq!(
        gate.authorize(token.as_str()).await.unwrap_err(),
        AuthError::Unauthorized
    );
}

#[tokio::test]
async fn test_token_from_other_deployment_is_rejected() {
    let account = Account {
        id: 7,
        email: "test@example.com".to_string(),
        username: "testuser".to_string(),
        password: PasswordHasher::new()
            .hash("testpassword")
            .expect("Failed to hash password"),
    };
    let directory = directory_with(account);

    let ours = AuthGate::new(
        Arc::clone(&directory),
        &AuthConfig::new(b"first-deployment-secret-32-bytes-long!", Duration::minutes(30))
            .expect("Failed to build config"),
    );
    let theirs = AuthGate::new(
        directory,
        &AuthConfig::new(b"second-deployment-secret-32-bytes-long", Duration::minutes(30))
            .expect("Failed to build config"),
    );

    let token = theirs
        .login("test@example.com", "testpassword")
        .await
        .expect("Login failed");

    assert_eq!(
        ours.authorize(token.as_str()).await.unwrap_err(),
        AuthError::Unauthorized
    );
}
