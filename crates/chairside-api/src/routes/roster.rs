//! Visit roster endpoint.
//!
//! Serves the day or month worklist. Year and month default to the
//! current calendar month in the clinic's local timezone, mirroring how
//! the desk opens on today's page.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Datelike;
use serde::Deserialize;

use chairside_core::roster::{select_visits, RosterQuery, VisitOccurrence};

use super::{data, DataBody};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub(super) fn router() -> Router<AppState> {
    Router::new().route("/", get(roster))
}

#[derive(Debug, Deserialize)]
struct RosterParams {
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
    /// Substring matched against patient name or phone.
    q: Option<String>,
}

async fn roster(
    State(state): State<AppState>,
    Query(params): Query<RosterParams>,
) -> ApiResult<Json<DataBody<Vec<VisitOccurrence>>>> {
    let today = chrono::Local::now().date_naive();
    let month = params.month.unwrap_or_else(|| today.month());
    if !(1..=12).contains(&month) {
        return Err(ApiError::Validation(format!("Invalid value: month {month}")));
    }
    if let Some(day) = params.day {
        if !(1..=31).contains(&day) {
            return Err(ApiError::Validation(format!("Invalid value: day {day}")));
        }
    }

    let query = RosterQuery {
        year: params.year.unwrap_or_else(|| today.year()),
        month,
        day: params.day,
        search: params.q.unwrap_or_default(),
    };

    let db = state.db()?;
    let profiles = db.list_patient_profiles()?;
    Ok(data(select_visits(&profiles, &query)))
}
