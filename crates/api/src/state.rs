/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (the pool is reference-counted internally).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool. Each handler checks out a connection per
    /// query and returns it on drop.
    pub pool: detections_db::DbPool,
}
