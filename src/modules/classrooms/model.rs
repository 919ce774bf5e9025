pub use classdesk_models::auth::MessageResponse;
pub use classdesk_models::classrooms::*;
pub use classdesk_models::views::{ClassroomDetail, References};
