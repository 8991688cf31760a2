//! Evaluate request body as received by the handler

use serde::Deserialize;
use validator::{Validate, ValidationError};

use pitchguard_core::{BehavioralData, FormData, RequestMetadata};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EvaluatePayload {
    #[validate(length(min = 1, message = "api_key is required"))]
    pub api_key: String,

    #[validate(custom(function = "validate_form_data"))]
    pub form_data: FormData,

    #[serde(default)]
    pub metadata: RequestMetadata,

    #[serde(default)]
    pub behavioral_data: BehavioralData,
}

fn validate_form_data(form_data: &FormData) -> Result<(), ValidationError> {
    if form_data.is_empty() {
        let mut err = ValidationError::new("empty");
        err.message = Some("form_data must contain at least one field".into());
        return Err(err);
    }
    Ok(())
}
