pub use classdesk_models::auth::MessageResponse;
pub use classdesk_models::subjects::*;
pub use classdesk_models::views::{References, SubjectDetail};
