//! Shopping list endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use chairside_core::models::{NewShoppingItem, ShoppingItem, ShoppingItemPatch};

use super::{created, data, message, DataBody, MessageBody};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub(super) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/batch-bought", post(batch_bought))
        .route("/:id", put(update).delete(delete_one))
        .route("/:id/toggle", post(toggle))
}

#[derive(Debug, Deserialize)]
struct ListParams {
    /// When true, only items not yet bought.
    pending: Option<bool>,
}

async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<DataBody<Vec<ShoppingItem>>>> {
    let db = state.db()?;
    Ok(data(db.list_shopping_items(params.pending.unwrap_or(false))?))
}

async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewShoppingItem>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<DataBody<ShoppingItem>>)> {
    let Json(payload) = payload?;
    let db = state.db()?;
    Ok(created(db.create_shopping_item(&payload)?))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ShoppingItemPatch>, JsonRejection>,
) -> ApiResult<Json<DataBody<ShoppingItem>>> {
    let Json(payload) = payload?;
    let db = state.db()?;
    Ok(data(db.update_shopping_item(&id, &payload)?))
}

async fn toggle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DataBody<ShoppingItem>>> {
    let db = state.db()?;
    Ok(data(db.toggle_shopping_item(&id)?))
}

#[derive(Debug, Deserialize)]
struct BatchBoughtBody {
    ids: Vec<String>,
}

#[derive(Debug, Serialize)]
struct BatchBoughtResult {
    updated: usize,
}

async fn batch_bought(
    State(state): State<AppState>,
    payload: Result<Json<BatchBoughtBody>, JsonRejection>,
) -> ApiResult<Json<DataBody<BatchBoughtResult>>> {
    let Json(payload) = payload?;
    let db = state.db()?;
    let updated = db.mark_shopping_items_bought(&payload.ids)?;
    Ok(data(BatchBoughtResult { updated }))
}

async fn delete_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageBody>> {
    let db = state.db()?;
    if !db.delete_shopping_item(&id)? {
        return Err(ApiError::NotFound(format!("Not found: shopping item {id}")));
    }
    Ok(message("Shopping item deleted"))
}
