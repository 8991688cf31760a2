//! Evaluate handler
//!
//! `POST /api/v1/evaluate`: authorize the site key, run the evaluation
//! pipeline, persist the submission and answer with the decision.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use validator::Validate;

use pitchguard_core::{EvaluateResponse, EvaluationResult, Scores};

use crate::config::{fingerprint, short_fingerprint};
use crate::models::{EvaluatePayload, NewSubmission};
use crate::{AppError, AppResult, AppState};

pub async fn evaluate(
    State(state): State<AppState>,
    payload: Result<Json<EvaluatePayload>, JsonRejection>,
) -> AppResult<Json<EvaluateResponse>> {
    let Json(payload) = payload?;
    payload.validate()?;

    if !state.config.accepts(&payload.api_key) {
        tracing::warn!("Rejected evaluation for unknown key {}", short_fingerprint(&payload.api_key));
        return Err(AppError::InvalidApiKey);
    }

    let evaluation = state
        .engine
        .evaluate(&payload.form_data, &payload.behavioral_data)
        .await;

    let outcome = &evaluation.outcome;
    let scores = Scores {
        sales: evaluation.blended.sales,
        spam: evaluation.blended.spam,
    };

    let submission = NewSubmission {
        site_key_hash: fingerprint(&payload.api_key),
        form_data: payload.form_data,
        metadata: payload.metadata,
        behavioral_data: payload.behavioral_data,
        detection: evaluation.detection.clone(),
        reasons: evaluation.blended.reasons.clone(),
        sales_score: scores.sales,
        spam_score: scores.spam,
        ai_reasoning: Some(evaluation.ai.reasoning.clone()).filter(|r| !r.is_empty()),
        decision: outcome.decision.as_str().to_string(),
    };

    // store failures are logged, the decision is still returned
    let submission_id = match state.store.insert(submission).await {
        Ok(id) => Some(id.to_string()),
        Err(e) => {
            tracing::error!("Failed to persist submission: {}", e);
            None
        }
    };

    tracing::info!(
        site = %short_fingerprint(&payload.api_key),
        decision = %outcome.decision,
        sales = scores.sales,
        spam = scores.spam,
        "Submission evaluated"
    );

    let result = EvaluationResult {
        decision: outcome.decision,
        scores,
        reasons: evaluation.blended.reasons,
        message: outcome.message.clone(),
        challenge: outcome.challenge.clone(),
        submission_id,
    };

    Ok(Json(EvaluateResponse::evaluated(&result)))
}
