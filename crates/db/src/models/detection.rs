//! Detection models and DTOs.
//!
//! Three shapes of the same record live here:
//!
//! - [`CreateDetection`]: the request payload, validated before storage.
//! - [`DetectionRow`]: a row from the `detections` table, with `bbox` and
//!   `objects` held as JSON blobs.
//! - [`Detection`]: the response payload, rebuilt from a row.
//!
//! Sub-objects are keyed `class` on the wire ([`ObjectInfo`]) and
//! `class_name` in storage ([`StoredObject`]). The `From` impls below are
//! the only place that mapping is applied.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

use detections_core::detection::{
    element_validation_failure, validate_confidence, validate_not_empty, validation_failure,
};
use detections_core::error::CoreError;
use detections_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Value types
// ---------------------------------------------------------------------------

/// Rectangle locating a detection.
///
/// For `object_class == "scene"` records the same four fields carry the
/// scene dimensions; the store does not distinguish the two uses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A sub-object inside a scene analysis, in wire form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ObjectInfo {
    #[serde(rename = "class", alias = "class_name")]
    #[validate(custom(function = "validate_not_empty"))]
    pub class_name: String,
    /// `[x, y, width, height]`.
    #[validate(length(equal = 4, message = "bbox must have exactly 4 values"))]
    pub bbox: Vec<f64>,
}

/// A sub-object as persisted inside the `objects` JSON column.
///
/// Rows written by older builds keyed the class under `class`; the alias
/// keeps them readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredObject {
    #[serde(alias = "class")]
    pub class_name: String,
    pub bbox: Vec<f64>,
}

impl From<&ObjectInfo> for StoredObject {
    fn from(info: &ObjectInfo) -> Self {
        Self {
            class_name: info.class_name.clone(),
            bbox: info.bbox.clone(),
        }
    }
}

impl From<StoredObject> for ObjectInfo {
    fn from(stored: StoredObject) -> Self {
        Self {
            class_name: stored.class_name,
            bbox: stored.bbox,
        }
    }
}

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `detections` table.
#[derive(Debug, Clone, FromRow)]
pub struct DetectionRow {
    pub id: DbId,
    pub timestamp: Timestamp,
    pub object_class: String,
    pub confidence: f64,
    pub bbox: Json<BoundingBox>,
    pub objects: Option<Json<Vec<StoredObject>>>,
    pub gemini_analysis: String,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Response payloads
// ---------------------------------------------------------------------------

/// A stored detection in wire form.
///
/// `objects` serializes as `null` when the record was created without it,
/// and as `[]` when it was created with an empty list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub id: DbId,
    pub timestamp: Timestamp,
    pub object_class: String,
    pub confidence: f64,
    pub bbox: BoundingBox,
    pub objects: Option<Vec<ObjectInfo>>,
    pub gemini_analysis: String,
}

impl From<DetectionRow> for Detection {
    fn from(row: DetectionRow) -> Self {
        Self {
            id: row.id,
            timestamp: row.timestamp,
            object_class: row.object_class,
            confidence: row.confidence,
            bbox: row.bbox.0,
            objects: row
                .objects
                .map(|Json(objects)| objects.into_iter().map(ObjectInfo::from).collect()),
            gemini_analysis: row.gemini_analysis,
        }
    }
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for creating a detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CreateDetection {
    #[validate(custom(function = "validate_not_empty"))]
    pub object_class: String,
    pub confidence: f64,
    pub bbox: BoundingBox,
    pub objects: Option<Vec<ObjectInfo>>,
    #[validate(custom(function = "validate_not_empty"))]
    pub gemini_analysis: String,
}

impl CreateDetection {
    /// Run every input rule, returning the first failure as a
    /// [`CoreError::Validation`].
    pub fn ensure_valid(&self) -> Result<(), CoreError> {
        self.validate().map_err(|e| validation_failure(&e))?;
        validate_confidence(self.confidence)?;

        if let Some(objects) = &self.objects {
            for (i, object) in objects.iter().enumerate() {
                object
                    .validate()
                    .map_err(|e| element_validation_failure("objects", i, &e))?;
            }
        }

        Ok(())
    }

    /// The `objects` list mapped into its storage form.
    ///
    /// `None` stays `None` so the column is written as SQL `NULL`; an empty
    /// list is written as `[]`.
    pub fn stored_objects(&self) -> Option<Vec<StoredObject>> {
        self.objects
            .as_ref()
            .map(|objects| objects.iter().map(StoredObject::from).collect())
    }

    /// `bbox` as JSON text for the `bbox` column.
    ///
    /// The columns are plain `JSON`, which keeps this text verbatim; `-0.0`
    /// and magnitudes near `f64::MAX` read back unchanged.
    pub fn bbox_text(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.bbox)
    }

    /// [`stored_objects`](Self::stored_objects) as JSON text, or `None`.
    pub fn objects_text(&self) -> serde_json::Result<Option<String>> {
        self.stored_objects()
            .map(|objects| serde_json::to_string(&objects))
            .transpose()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
