pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::interview::handlers as interview;
use crate::space::handlers as space;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Space API
        .route(
            "/api/v1/spaces",
            post(space::handle_create_space).get(space::handle_list_spaces),
        )
        .route("/api/v1/spaces/:id", get(space::handle_get_space))
        .route(
            "/api/v1/spaces/:id/resume",
            get(space::handle_download_resume),
        )
        .route(
            "/api/v1/spaces/:id/rounds/:round_name/start",
            post(space::handle_start_round),
        )
        // Interview API
        .route(
            "/api/v1/spaces/:id/rounds/:round_name/questions",
            post(interview::handle_generate_questions),
        )
        .route(
            "/api/v1/spaces/:id/rounds/:round_name/finish",
            post(interview::handle_finish_round),
        )
        .route(
            "/api/v1/questions/:id/follow-up",
            post(interview::handle_follow_up),
        )
        .route(
            "/api/v1/rounds/:round_id/questions",
            get(interview::handle_round_questions),
        )
        .with_state(state)
}
