//! Appointment book endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Deserialize;

use chairside_core::models::{Appointment, AppointmentPatch, NewAppointment};

use super::{created, data, message, DataBody, MessageBody};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub(super) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", put(update).delete(delete_one))
}

#[derive(Debug, Deserialize)]
struct ListParams {
    /// Narrow the book to one calendar day (`YYYY-MM-DD`).
    date: Option<String>,
}

async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<DataBody<Vec<Appointment>>>> {
    let db = state.db()?;
    Ok(data(db.list_appointments(params.date.as_deref())?))
}

async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewAppointment>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<DataBody<Appointment>>)> {
    let Json(payload) = payload?;
    let db = state.db()?;
    Ok(created(db.create_appointment(&payload)?))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<AppointmentPatch>, JsonRejection>,
) -> ApiResult<Json<DataBody<Appointment>>> {
    let Json(payload) = payload?;
    let db = state.db()?;
    Ok(data(db.update_appointment(&id, &payload)?))
}

async fn delete_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageBody>> {
    let db = state.db()?;
    if !db.delete_appointment(&id)? {
        return Err(ApiError::NotFound(format!("Not found: appointment {id}")));
    }
    Ok(message("Appointment deleted"))
}
