pub use classdesk_models::accounts::{Account, AccountFilterParams, Role};
pub use classdesk_models::auth::MessageResponse;
