//! Submission model and persistence boundary
//!
//! `PgSubmissionStore` writes to the `submissions` table; without a
//! database the service keeps submissions in a `MemorySubmissionStore`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow, PgPool};
use uuid::Uuid;

use pitchguard_core::{BehavioralData, DetectionResult, FormData, RequestMetadata};

use crate::error::AppResult;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Submission {
    pub id: Uuid,
    pub site_key_hash: String,
    pub form_data: Json<FormData>,
    pub metadata: Json<RequestMetadata>,
    pub behavioral_data: Json<BehavioralData>,
    pub detection: Json<DetectionResult>,
    pub reasons: Json<Vec<String>>,
    pub sales_score: f64,
    pub spam_score: f64,
    pub ai_reasoning: Option<String>,
    pub decision: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub site_key_hash: String,
    pub form_data: FormData,
    pub metadata: RequestMetadata,
    pub behavioral_data: BehavioralData,
    pub detection: DetectionResult,
    pub reasons: Vec<String>,
    pub sales_score: f64,
    pub spam_score: f64,
    pub ai_reasoning: Option<String>,
    pub decision: String,
}

#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Persist one evaluated submission, returning its id
    async fn insert(&self, submission: NewSubmission) -> AppResult<Uuid>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Submission>>;

    /// Backend name for the health endpoint
    fn backend(&self) -> &'static str;
}

// ============================================================================
// POSTGRES
// ============================================================================

pub struct PgSubmissionStore {
    pool: PgPool,
}

impl PgSubmissionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubmissionStore for PgSubmissionStore {
    async fn insert(&self, s: NewSubmission) -> AppResult<Uuid> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO submissions (site_key_hash, form_data, metadata, behavioral_data, detection,
                                     reasons, sales_score, spam_score, ai_reasoning, decision)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id
            "#
        )
        .bind(&s.site_key_hash)
        .bind(Json(&s.form_data))
        .bind(Json(&s.metadata))
        .bind(Json(&s.behavioral_data))
        .bind(Json(&s.detection))
        .bind(Json(&s.reasons))
        .bind(s.sales_score)
        .bind(s.spam_score)
        .bind(&s.ai_reasoning)
        .bind(&s.decision)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Submission>> {
        let row = sqlx::query_as::<_, Submission>("SELECT * FROM submissions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}

// ============================================================================
// IN-MEMORY
// ============================================================================

#[derive(Default)]
pub struct MemorySubmissionStore {
    rows: RwLock<Vec<Submission>>,
}

impl MemorySubmissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.rows.read().len()
    }
}

#[async_trait]
impl SubmissionStore for MemorySubmissionStore {
    async fn insert(&self, s: NewSubmission) -> AppResult<Uuid> {
        let row = Submission {
            id: Uuid::new_v4(),
            site_key_hash: s.site_key_hash,
            form_data: Json(s.form_data),
            metadata: Json(s.metadata),
            behavioral_data: Json(s.behavioral_data),
            detection: Json(s.detection),
            reasons: Json(s.reasons),
            sales_score: s.sales_score,
            spam_score: s.spam_score,
            ai_reasoning: s.ai_reasoning,
            decision: s.decision,
            created_at: Utc::now(),
        };
        let id = row.id;

        self.rows.write().push(row);
        Ok(id)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Submission>> {
        Ok(self.rows.read().iter().find(|row| row.id == id).cloned())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
