use axum::{
    extract::{Query, State},
    Json,
};
use pii::EntityType;
use serde::Deserialize;

use crate::server::app::AppState;
use crate::server::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct EntitiesQuery {
    pub language: Option<String>,
}

/// Entity types the service can detect for a language
pub async fn supported_entities_handler(
    State(state): State<AppState>,
    Query(query): Query<EntitiesQuery>,
) -> Result<Json<Vec<EntityType>>, ApiError> {
    let language = query
        .language
        .unwrap_or_else(|| state.default_language.clone());

    let entities = state.masker.supported_entities(&language)?;
    Ok(Json(entities))
}
