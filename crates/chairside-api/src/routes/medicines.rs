//! Medicine inventory endpoints.
//!
//! Expiry status is owned by the storage layer (computed on create and
//! whenever the expiry date changes); handlers only parse the optional
//! status filter and the summary report.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Deserialize;

use chairside_core::models::{Medicine, MedicinePatch, MedicineStatus, NewMedicine};
use chairside_core::InventoryReport;

use super::{created, data, message, DataBody, MessageBody};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub(super) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/summary", get(summary))
        .route("/:id", put(update).delete(delete_one))
}

#[derive(Debug, Deserialize)]
struct ListParams {
    /// `normal`, `warning` or `expired`.
    status: Option<String>,
}

async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<DataBody<Vec<Medicine>>>> {
    let status = params
        .status
        .as_deref()
        .map(|s| {
            MedicineStatus::parse(s)
                .ok_or_else(|| ApiError::Validation(format!("Invalid value: status filter {s}")))
        })
        .transpose()?;
    let db = state.db()?;
    Ok(data(db.list_medicines(status.as_ref())?))
}

async fn summary(State(state): State<AppState>) -> ApiResult<Json<DataBody<InventoryReport>>> {
    let db = state.db()?;
    Ok(data(db.inventory_report()?))
}

async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewMedicine>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<DataBody<Medicine>>)> {
    let Json(payload) = payload?;
    let db = state.db()?;
    Ok(created(db.create_medicine(&payload)?))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<MedicinePatch>, JsonRejection>,
) -> ApiResult<Json<DataBody<Medicine>>> {
    let Json(payload) = payload?;
    let db = state.db()?;
    Ok(data(db.update_medicine(&id, &payload)?))
}

async fn delete_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageBody>> {
    let db = state.db()?;
    if !db.delete_medicine(&id)? {
        return Err(ApiError::NotFound(format!("Not found: medicine {id}")));
    }
    Ok(message("Medicine deleted"))
}
