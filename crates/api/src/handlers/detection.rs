//! Handlers for the `/detections` resource.
//!
//! Create, list, fetch, and annotate detection records. Every input is
//! validated before the store is touched; storage errors surface as 500s
//! through [`AppError`].

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use detections_core::detection::DETECTION_ENTITY;
use detections_core::error::CoreError;
use detections_core::pagination::resolve_page;
use detections_core::types::DbId;
use detections_db::models::detection::{CreateDetection, Detection};
use detections_db::repositories::DetectionRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Response header carrying the total number of stored detections.
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

/* --------------------------------------------------------------------------
   Query parameters
   -------------------------------------------------------------------------- */

/// Pagination parameters (`?skip=&limit=`).
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

/// Replacement analysis text (`?analysis=`).
#[derive(Debug, Deserialize)]
pub struct AnalysisParams {
    pub analysis: String,
}

/// Acknowledgement returned by the update endpoint.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

/* --------------------------------------------------------------------------
   Handlers
   -------------------------------------------------------------------------- */

/// POST /detections/
///
/// Store a new detection and return it with its server-assigned `id` and
/// `timestamp`.
pub async fn create_detection(
    State(state): State<AppState>,
    payload: Result<Json<CreateDetection>, JsonRejection>,
) -> AppResult<Json<Detection>> {
    let Json(input) = payload?;
    input.ensure_valid()?;

    let row = DetectionRepo::create(&state.pool, &input).await?;

    tracing::info!(
        detection_id = row.id,
        object_class = %row.object_class,
        object_count = input.objects.as_ref().map_or(0, Vec::len),
        "Detection created"
    );

    Ok(Json(Detection::from(row)))
}

/// GET /detections/?skip=&limit=
///
/// List detections in creation order. The total stored count, read from
/// the same snapshot as the page, is returned in the `x-total-count` header.
pub async fn list_detections(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let Query(params) = params?;
    let page = resolve_page(params.skip, params.limit)?;

    let (rows, total) = DetectionRepo::list_with_total(&state.pool, page).await?;

    let detections: Vec<Detection> = rows.into_iter().map(Detection::from).collect();
    Ok(([(TOTAL_COUNT_HEADER, total.to_string())], Json(detections)))
}

/// GET /detections/{id}
pub async fn get_detection(
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
) -> AppResult<Json<Detection>> {
    let Path(id) = id?;
    let row = DetectionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: DETECTION_ENTITY,
                id,
            })
        })?;
    Ok(Json(Detection::from(row)))
}

/// PUT /detections/{id}/analysis?analysis=
///
/// Replace the analysis text of one detection. Any string is accepted,
/// including the empty one. No other field changes.
pub async fn update_analysis(
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
    params: Result<Query<AnalysisParams>, QueryRejection>,
) -> AppResult<Json<StatusResponse>> {
    let Path(id) = id?;
    let Query(params) = params?;

    let updated = DetectionRepo::update_analysis(&state.pool, id, &params.analysis).await?;
    if !updated {
        return Err(AppError::Core(CoreError::NotFound {
            entity: DETECTION_ENTITY,
            id,
        }));
    }

    tracing::info!(detection_id = id, "Detection analysis updated");

    Ok(Json(StatusResponse { status: "success" }))
}
