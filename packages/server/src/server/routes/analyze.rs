use axum::{body::Bytes, extract::State, Json};
use pii::{EntityType, RecognizerResult};
use serde::{Deserialize, Serialize};

use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::server::routes::mask::MaskRequest;

/// One detected span, without the text it covers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub entity_type: EntityType,
    pub start: usize,
    pub end: usize,
    pub score: f64,
}

impl From<RecognizerResult> for Finding {
    fn from(result: RecognizerResult) -> Self {
        Self {
            entity_type: result.entity_type,
            start: result.start,
            end: result.end,
            score: result.score,
        }
    }
}

/// Report where PII was found, leaving the text untouched.
pub async fn analyze_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Vec<Finding>>, ApiError> {
    let request = MaskRequest::from_body(&body)?;
    let text = request.text();

    if text.trim().is_empty() {
        return Ok(Json(Vec::new()));
    }

    let options = request.options(&state)?;
    let findings = state.masker.analyze(text, &options).await?;
    tracing::info!(
        text_len = text.len(),
        findings = findings.len(),
        "Analysis complete"
    );

    Ok(Json(findings.into_iter().map(Finding::from).collect()))
}
