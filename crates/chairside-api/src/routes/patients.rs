//! Patient endpoints.
//!
//! Patients are always served as profiles, so the latest visit summary
//! rides along with every read. Creating a patient with a description
//! opens their first treatment record inside the same transaction, and
//! updating visit fields rewrites the latest record through the profile.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use chairside_core::models::{NewPatient, PatientPatch, PatientProfile};

use super::{created, data, message, DataBody, MessageBody};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub(super) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(get_one).put(update).delete(delete_one))
}

async fn list(State(state): State<AppState>) -> ApiResult<Json<DataBody<Vec<PatientProfile>>>> {
    let db = state.db()?;
    Ok(data(db.list_patient_profiles()?))
}

async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewPatient>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<DataBody<PatientProfile>>)> {
    let Json(payload) = payload?;
    let mut db = state.db()?;
    Ok(created(db.create_patient(&payload)?))
}

async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DataBody<PatientProfile>>> {
    let db = state.db()?;
    let profile = db
        .get_patient_profile(&id)?
        .ok_or_else(|| ApiError::NotFound(format!("Not found: patient {id}")))?;
    Ok(data(profile))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<PatientPatch>, JsonRejection>,
) -> ApiResult<Json<DataBody<PatientProfile>>> {
    let Json(payload) = payload?;
    let mut db = state.db()?;
    Ok(data(db.update_patient(&id, &payload)?))
}

async fn delete_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageBody>> {
    let db = state.db()?;
    if !db.delete_patient(&id)? {
        return Err(ApiError::NotFound(format!("Not found: patient {id}")));
    }
    Ok(message("Patient deleted"))
}
