pub mod detection;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the API route tree.
///
/// Route hierarchy:
///
/// ```text
/// /detections                    list, create
/// /detections/                   list, create (trailing-slash form)
/// /detections/{id}               get
/// /detections/{id}/analysis      update analysis (PUT, ?analysis=)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(detection::router())
}
