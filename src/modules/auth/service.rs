use chrono::Utc;
use tracing::instrument;

use classdesk_core::AppError;
use classdesk_core::password::{hash_password, verify_against_dummy, verify_password};
use classdesk_db::AccountStore;
use classdesk_models::AccountId;

use super::model::{Account, LoginRequest, NewAccount, RegisterRequest};

pub const MISSING_CREDENTIALS_MESSAGE: &str = "Please provide username and password";

pub struct AuthService;

impl AuthService {
    #[instrument(skip(accounts, request))]
    pub async fn register(
        accounts: &dyn AccountStore,
        request: RegisterRequest,
    ) -> Result<Account, AppError> {
        let new_account = request.into_new_account()?;
        Self::create_account(accounts, new_account).await
    }

    /// Hashes the password and persists the account. Uniqueness of username,
    /// student id and faculty id is enforced by the store.
    #[instrument(skip(accounts, new_account), fields(username = %new_account.username))]
    pub async fn create_account(
        accounts: &dyn AccountStore,
        new_account: NewAccount,
    ) -> Result<Account, AppError> {
        if accounts
            .find_by_username(&new_account.username)
            .await?
            .is_some()
        {
            return Err(AppError::validation("Username already exists"));
        }

        let password_hash = hash_password(&new_account.password).await?;

        let account = Account {
            id: AccountId::new(),
            first_name: new_account.first_name,
            last_name: new_account.last_name,
            middle_name: new_account.middle_name,
            username: new_account.username,
            password_hash,
            created_at: Utc::now(),
            profile: new_account.profile,
        };

        let account = accounts.insert(account).await?;
        tracing::info!(account_id = %account.id, role = %account.role(), "account created");
        Ok(account)
    }

    /// Unknown usernames and wrong passwords fail identically, and both pay
    /// for one bcrypt verification.
    #[instrument(skip(accounts, request))]
    pub async fn login(
        accounts: &dyn AccountStore,
        request: LoginRequest,
    ) -> Result<Account, AppError> {
        let (username, password) = match (request.username, request.password) {
            (Some(username), Some(password)) if !password.is_empty() => (username, password),
            _ => return Err(AppError::validation(MISSING_CREDENTIALS_MESSAGE)),
        };

        let Some(account) = accounts.find_by_username(&username).await? else {
            verify_against_dummy(&password).await;
            return Err(AppError::InvalidCredentials);
        };

        if !verify_password(&password, &account.password_hash).await? {
            return Err(AppError::InvalidCredentials);
        }

        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use classdesk_db::memory::MemoryAccountStore;
    use serde_json::json;

    fn admin_request(username: &str) -> RegisterRequest {
        serde_json::from_value(json!({
            "role": "Admin",
            "firstName": "Root",
            "lastName": "User",
            "username": username,
            "password": "pass123"
        }))
        .unwrap()
    }

    fn login_request(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: Some(username.to_string()),
            password: Some(password.to_string()),
        }
    }

    #[tokio::test]
    async fn test_register_stores_hash_only() {
        let store = MemoryAccountStore::default();
        let account = AuthService::register(&store, admin_request("root"))
            .await
            .unwrap();

        assert_ne!(account.password_hash, "pass123");
        assert!(account.password_hash.starts_with("$2"));
    }

    #[tokio::test]
    async fn test_duplicate_username() {
        let store = MemoryAccountStore::default();
        AuthService::register(&store, admin_request("root"))
            .await
            .unwrap();

        let err = AuthService::register(&store, admin_request("root"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Username already exists");
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let store = MemoryAccountStore::default();
        AuthService::register(&store, admin_request("root"))
            .await
            .unwrap();

        let wrong_password = AuthService::login(&store, login_request("root", "nope123"))
            .await
            .unwrap_err();
        let unknown_user = AuthService::login(&store, login_request("ghost", "pass123"))
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, AppError::InvalidCredentials));
        assert!(matches!(unknown_user, AppError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
    }

    #[tokio::test]
    async fn test_login_requires_both_fields() {
        let store = MemoryAccountStore::default();
        let err = AuthService::login(
            &store,
            LoginRequest {
                username: Some("root".into()),
                password: None,
            },
        )
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), MISSING_CREDENTIALS_MESSAGE);
    }
}
