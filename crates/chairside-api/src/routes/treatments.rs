//! Treatment record endpoints.
//!
//! Records are read per patient or per date window; there is no
//! single-record fetch because clients always render the full history.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;

use chairside_core::models::{
    NewTreatmentRecord, RecordWithPatient, TreatmentRecord, TreatmentRecordPatch,
};

use super::{created, data, message, DataBody, MessageBody};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub(super) fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create))
        .route("/patient/:id", get(for_patient))
        .route("/date-range", get(in_range))
        .route("/:id", put(update).delete(delete_one))
}

async fn for_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DataBody<Vec<TreatmentRecord>>>> {
    let db = state.db()?;
    Ok(data(db.records_for_patient(&id)?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RangeParams {
    start_date: Option<String>,
    end_date: Option<String>,
}

async fn in_range(
    State(state): State<AppState>,
    Query(params): Query<RangeParams>,
) -> ApiResult<Json<DataBody<Vec<RecordWithPatient>>>> {
    let db = state.db()?;
    let records = db.records_in_range(params.start_date.as_deref(), params.end_date.as_deref())?;
    Ok(data(records))
}

async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewTreatmentRecord>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<DataBody<TreatmentRecord>>)> {
    let Json(payload) = payload?;
    let db = state.db()?;
    Ok(created(db.create_record(&payload)?))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<TreatmentRecordPatch>, JsonRejection>,
) -> ApiResult<Json<DataBody<TreatmentRecord>>> {
    let Json(payload) = payload?;
    let db = state.db()?;
    Ok(data(db.update_record(&id, &payload)?))
}

async fn delete_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageBody>> {
    let db = state.db()?;
    if !db.delete_record(&id)? {
        return Err(ApiError::NotFound(format!("Not found: treatment record {id}")));
    }
    Ok(message("Treatment record deleted"))
}
