use tracing::instrument;

use classdesk_core::AppError;
use classdesk_db::Stores;
use classdesk_models::AccountId;

use super::model::{Account, MessageResponse, Role};

pub struct AccountService;

impl AccountService {
    #[instrument(skip(stores))]
    pub async fn get_accounts(
        stores: &Stores,
        role: Option<Role>,
    ) -> Result<Vec<Account>, AppError> {
        Ok(stores.accounts.list(role).await?)
    }

    /// Deletes the account, then removes it from every enrollment and every
    /// faculty assignment. Its tokens stop resolving immediately.
    #[instrument(skip(stores, requester), fields(requester_id = %requester.id))]
    pub async fn delete_account(
        stores: &Stores,
        requester: &Account,
        id: AccountId,
    ) -> Result<MessageResponse, AppError> {
        if requester.id == id {
            return Err(AppError::validation("You cannot delete your own account"));
        }

        if !stores.accounts.delete(id).await? {
            return Err(AppError::not_found("Account not found"));
        }

        stores.classrooms.detach_account(id).await?;
        stores.subjects.detach_faculty(id).await?;

        tracing::info!(account_id = %id, "account deleted");
        Ok(MessageResponse::new("Account deleted successfully"))
    }
}
