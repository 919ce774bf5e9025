use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{
    assign_faculty, create_subject, delete_subject, get_subject, get_subjects, update_subject,
};
use crate::state::AppState;

pub fn init_subjects_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_subject).get(get_subjects))
        .route(
            "/{id}",
            get(get_subject).put(update_subject).delete(delete_subject),
        )
        .route("/{id}/assign", post(assign_faculty))
}
