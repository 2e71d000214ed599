//! Repository for the `detections` table.

use detections_core::pagination::Page;
use detections_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::detection::{CreateDetection, DetectionRow};

/// Column list for detections queries.
const COLUMNS: &str = "id, \"timestamp\", object_class, confidence, bbox, objects, \
    gemini_analysis, updated_at";

/// Provides data access for detection records.
pub struct DetectionRepo;

impl DetectionRepo {
    /// Insert a detection, returning the stored row with its server-assigned
    /// `id` and `timestamp`.
    ///
    /// `bbox` and `objects` are bound as text and cast to `json`, so the
    /// column receives exactly the serialized payload.
    ///
    /// The insert runs in its own transaction; any error drops the
    /// transaction uncommitted so nothing is written.
    pub async fn create(
        pool: &PgPool,
        input: &CreateDetection,
    ) -> Result<DetectionRow, sqlx::Error> {
        let bbox = input.bbox_text().map_err(encode_error)?;
        let objects = input.objects_text().map_err(encode_error)?;

        let query = format!(
            "INSERT INTO detections \
                 (object_class, confidence, bbox, objects, gemini_analysis) \
             VALUES ($1, $2, $3::json, $4::json, $5) \
             RETURNING {COLUMNS}"
        );

        let mut tx = pool.begin().await?;
        let row = sqlx::query_as::<_, DetectionRow>(&query)
            .bind(&input.object_class)
            .bind(input.confidence)
            .bind(bbox)
            .bind(objects)
            .bind(&input.gemini_analysis)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(row)
    }

    /// List detections in creation order, skipping `page.skip` rows and
    /// returning at most `page.limit`.
    pub async fn list<'e, E: PgExecutor<'e>>(
        executor: E,
        page: Page,
    ) -> Result<Vec<DetectionRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM detections \
             ORDER BY id ASC \
             OFFSET $1 LIMIT $2"
        );
        sqlx::query_as::<_, DetectionRow>(&query)
            .bind(page.skip)
            .bind(page.limit)
            .fetch_all(executor)
            .await
    }

    /// One page of detections together with the total stored count.
    ///
    /// Both queries read the same snapshot, so the total always agrees with
    /// the page.
    pub async fn list_with_total(
        pool: &PgPool,
        page: Page,
    ) -> Result<(Vec<DetectionRow>, i64), sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;

        let rows = Self::list(&mut *tx, page).await?;
        let total = Self::count(&mut *tx).await?;
        tx.commit().await?;

        Ok((rows, total))
    }

    /// Find a detection by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<DetectionRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM detections WHERE id = $1");
        sqlx::query_as::<_, DetectionRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Replace the analysis text of a detection. No other field changes.
    ///
    /// Returns `true` if a row was updated, `false` if no detection has
    /// this ID.
    pub async fn update_analysis(
        pool: &PgPool,
        id: DbId,
        analysis: &str,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let updated: Option<(DbId,)> = sqlx::query_as(
            "UPDATE detections SET gemini_analysis = $2, updated_at = now() \
             WHERE id = $1 \
             RETURNING id",
        )
        .bind(id)
        .bind(analysis)
        .fetch_optional(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(updated.is_some())
    }

    /// Count stored detections.
    pub async fn count<'e, E: PgExecutor<'e>>(executor: E) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM detections")
            .fetch_one(executor)
            .await?;
        Ok(count)
    }
}

fn encode_error(err: serde_json::Error) -> sqlx::Error {
    sqlx::Error::Encode(Box::new(err))
}
