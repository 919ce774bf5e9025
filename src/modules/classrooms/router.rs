use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{
    create_classroom, delete_classroom, enroll_students, get_classroom, get_classrooms,
    update_classroom,
};
use crate::state::AppState;

pub fn init_classrooms_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_classroom).get(get_classrooms))
        .route(
            "/{id}",
            get(get_classroom)
                .put(update_classroom)
                .delete(delete_classroom),
        )
        .route("/{id}/students", post(enroll_students))
}
