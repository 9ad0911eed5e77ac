use axum::{
    Router,
    routing::{get, patch},
};
use dinho_habit::Habits;
use sqlx::SqlitePool;

use crate::{auth::auth_middleware, error::ApiError};

mod habits;
mod health;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub habits: Habits,
    pub pool: SqlitePool,
}

pub async fn fallback() -> ApiError {
    ApiError(dinho_shared::Error::NotFound("no such route".to_owned()))
}

pub fn router(app_state: AppState) -> Router {
    let habit_routes = Router::new()
        .route("/habits", get(habits::list).post(habits::create))
        .route(
            "/habits/{id}",
            get(habits::get)
                .patch(habits::update)
                .delete(habits::remove),
        )
        .route("/habits/{id}/history", patch(habits::replace_history))
        .route("/habits/{id}/archive", patch(habits::toggle_archive))
        .route_layer(axum::middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ))
        .with_state(app_state.clone());

    Router::new()
        // Health check endpoints (no auth required)
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(app_state.pool.clone())
        .merge(habit_routes)
        .fallback(fallback)
}
