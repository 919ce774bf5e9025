use axum::{
    Router,
    routing::{delete, get},
};

use super::controller::{delete_account, get_accounts};
use crate::state::AppState;

/// Every route here is Admin-only. The role check is applied as a route layer
/// by the caller.
pub fn init_accounts_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_accounts))
        .route("/{id}", delete(delete_account))
}
