pub use classdesk_models::accounts::{Account, NewAccount, RegisterRequest, RoleProfile};
pub use classdesk_models::auth::{AuthResponse, LoginRequest, UserResponse};
