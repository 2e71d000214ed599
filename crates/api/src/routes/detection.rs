//! Route definitions for the `/detections` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::detection;
use crate::state::AppState;

/// Routes for detection records.
///
/// Both `/detections` and `/detections/` are registered so clients that
/// post to either form reach the same handlers.
///
/// ```text
/// GET    /detections/                    -> list_detections (?skip, ?limit)
/// POST   /detections/                    -> create_detection
/// GET    /detections/{id}                -> get_detection
/// PUT    /detections/{id}/analysis       -> update_analysis (?analysis)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/detections",
            get(detection::list_detections).post(detection::create_detection),
        )
        .route(
            "/detections/",
            get(detection::list_detections).post(detection::create_detection),
        )
        .route("/detections/{id}", get(detection::get_detection))
        .route(
            "/detections/{id}/analysis",
            put(detection::update_analysis),
        )
}
