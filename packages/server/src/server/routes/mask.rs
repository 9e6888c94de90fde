use axum::{body::Bytes, extract::State, Extension, Json};
use pii::{EntityType, OperatorConfig};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::kernel::MaskOptions;
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::server::middleware::ClientIp;

/// Characters of masked output shown in debug logs
const PREVIEW_CHARS: usize = 50;

/// Body accepted by `/mask` and `/analyze`.
///
/// Only `text` is needed; the rest tunes a single request.
#[derive(Debug, Default, Deserialize)]
pub struct MaskRequest {
    /// `null` or absent is treated as empty text
    #[serde(default)]
    pub text: Option<String>,
    pub language: Option<String>,
    pub entities: Option<Vec<String>>,
    pub score_threshold: Option<f64>,
    pub operators: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MaskResponse {
    pub masked: String,
}

impl MaskRequest {
    /// Parse a raw request body.
    ///
    /// An empty body, invalid JSON, `null`, and `{}` all count as no data.
    pub fn from_body(body: &[u8]) -> Result<Self, ApiError> {
        if body.is_empty() {
            return Err(ApiError::NoJsonData);
        }

        let value: Value = serde_json::from_slice(body).map_err(|_| ApiError::NoJsonData)?;
        match &value {
            Value::Null => return Err(ApiError::NoJsonData),
            Value::Object(map) if map.is_empty() => return Err(ApiError::NoJsonData),
            Value::Object(_) => {}
            _ => {
                return Err(ApiError::BadRequest(
                    "Request body must be a JSON object".to_string(),
                ))
            }
        }

        serde_json::from_value(value)
            .map_err(|e| ApiError::BadRequest(format!("Invalid request: {}", e)))
    }

    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }

    /// Merge per-request settings over the service defaults.
    pub fn options(&self, state: &AppState) -> Result<MaskOptions, ApiError> {
        let score_threshold = self.score_threshold.unwrap_or(state.score_threshold);
        if !(0.0..=1.0).contains(&score_threshold) {
            return Err(ApiError::BadRequest(
                "score_threshold must be between 0.0 and 1.0".to_string(),
            ));
        }

        let entities = self
            .entities
            .as_ref()
            .map(|names| {
                names
                    .iter()
                    .map(|name| name.parse::<EntityType>())
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        let operators = match &self.operators {
            Some(value) => OperatorConfig::from_value(value)?,
            None => OperatorConfig::default(),
        };

        Ok(MaskOptions {
            language: self
                .language
                .clone()
                .unwrap_or_else(|| state.default_language.clone()),
            entities,
            score_threshold,
            operators,
        })
    }
}

/// Mask PII in the posted text.
///
/// Blank text comes back unchanged without touching the engines.
pub async fn mask_handler(
    State(state): State<AppState>,
    client_ip: Option<Extension<ClientIp>>,
    body: Bytes,
) -> Result<Json<MaskResponse>, ApiError> {
    let request = MaskRequest::from_body(&body)?;
    let text = request.text();

    if text.trim().is_empty() {
        return Ok(Json(MaskResponse {
            masked: text.to_string(),
        }));
    }

    let options = request.options(&state)?;
    let request_id = Uuid::new_v4();
    tracing::info!(
        %request_id,
        client_ip = ?client_ip.map(|Extension(ClientIp(ip))| ip),
        text_len = text.len(),
        language = %options.language,
        "Masking text"
    );

    let result = state.masker.mask(text, &options).await?;

    tracing::info!(
        %request_id,
        findings = result.findings.len(),
        masked_len = result.masked.len(),
        "Masking complete"
    );
    tracing::debug!(
        %request_id,
        preview = %result.masked.chars().take(PREVIEW_CHARS).collect::<String>(),
        "Masked text preview"
    );

    Ok(Json(MaskResponse {
        masked: result.masked,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_empty_bodies_have_no_data() {
        let bodies: [&[u8]; 4] = [b"", b"not json", b"null", b"{}"];
        for body in bodies {
            assert!(matches!(
                MaskRequest::from_body(body),
                Err(ApiError::NoJsonData)
            ));
        }
    }

    #[test]
    fn test_non_object_and_bad_text_are_bad_requests() {
        assert!(matches!(
            MaskRequest::from_body(b"[1, 2]"),
            Err(ApiError::BadRequest(_))
        ));
        assert!(matches!(
            MaskRequest::from_body(br#"{"text": 42}"#),
            Err(ApiError::BadRequest(_))
        ));
    }

    #[test]
    fn test_absent_or_null_text_is_empty() {
        let request = MaskRequest::from_body(br#"{"language": "en"}"#).unwrap();
        assert_eq!(request.text(), "");

        let request = MaskRequest::from_body(br#"{"text": null}"#).unwrap();
        assert_eq!(request.text(), "");
    }
}
