pub mod auth;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod observability;
pub mod routes;

pub use routes::{AppState, router};

/// Build the router over already-migrated pools.
pub fn create_app(config: config::Config, state: &dinho_shared::State) -> axum::Router {
    router(AppState {
        config,
        habits: dinho_habit::Habits::new(state),
        pool: state.read_db.clone(),
    })
}
