use axum::{
    Extension, Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use dinho_habit::{CreateHabitInput, Habit, HabitPatch, HistoryMap};
use serde::Deserialize;

use crate::{auth::AuthUser, error::ApiResult, routes::AppState};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub archived: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryBody {
    pub history: HistoryMap,
}

/// GET /habits?archived=
#[tracing::instrument(skip_all, fields(subject = %user.subject))]
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> ApiResult<Json<Vec<Habit>>> {
    let Query(params) = params?;
    let habits = state.habits.list_filtered(params.archived).await?;

    Ok(Json(habits))
}

/// POST /habits
#[tracing::instrument(skip_all, fields(subject = %user.subject))]
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<CreateHabitInput>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(input) = payload?;
    let habit = state.habits.command.create(input).await?;

    Ok((StatusCode::CREATED, Json(habit)))
}

/// GET /habits/{id}
#[tracing::instrument(skip(state, user), fields(subject = %user.subject))]
pub async fn get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<Habit>> {
    Ok(Json(state.habits.find(&id).await?))
}

/// PATCH /habits/{id}
#[tracing::instrument(skip(state, user, payload), fields(subject = %user.subject))]
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    payload: Result<Json<HabitPatch>, JsonRejection>,
) -> ApiResult<Json<Habit>> {
    let Json(patch) = payload?;

    Ok(Json(state.habits.command.update(id, patch).await?))
}

/// PATCH /habits/{id}/history, replaces the whole map
#[tracing::instrument(skip(state, user, payload), fields(subject = %user.subject))]
pub async fn replace_history(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    payload: Result<Json<HistoryBody>, JsonRejection>,
) -> ApiResult<Json<Habit>> {
    let Json(body) = payload?;

    Ok(Json(state.habits.replace_history(&id, body.history).await?))
}

/// PATCH /habits/{id}/archive
#[tracing::instrument(skip(state, user), fields(subject = %user.subject))]
pub async fn toggle_archive(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<Habit>> {
    Ok(Json(state.habits.toggle_archive(&id).await?))
}

/// DELETE /habits/{id}
#[tracing::instrument(skip(state, user), fields(subject = %user.subject))]
pub async fn remove(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.habits.command.remove(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
