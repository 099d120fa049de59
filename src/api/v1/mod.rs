pub mod conversations;
pub mod skills;
pub mod workers;

use crate::common::state::AppState;
use axum::Router;
use axum::routing::{get, post};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/workers", get(workers::search))
        .route("/workers/{user_id}", get(workers::fetch_one))
        .route("/skills", get(skills::fetch_all))
        .route("/conversations", get(conversations::list))
        .route("/conversations/unread/count", get(conversations::unread_total))
        .route("/conversations/{employee_id}", get(conversations::fetch_history))
        .route("/conversations/{employee_id}/read", post(conversations::mark_read))
        .route("/messages", post(conversations::send))
}
