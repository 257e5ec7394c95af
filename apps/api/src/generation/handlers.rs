//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::generator::{build_prompt, generate_professions};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateProfessionsRequest {
    /// Free text, passed through unvalidated. Missing means empty.
    #[serde(default)]
    pub traits: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateProfessionsResponse {
    pub prompt: String,
    pub professions: Vec<String>,
}

/// POST /api/v1/professions/generate
///
/// Returns the prompt that was sent and one suggestion per generated sequence.
/// Empty traits are accepted.
pub async fn handle_generate_professions(
    State(state): State<AppState>,
    Json(request): Json<GenerateProfessionsRequest>,
) -> Result<Json<GenerateProfessionsResponse>, AppError> {
    let professions = generate_professions(state.generator.as_ref(), &request.traits).await?;

    Ok(Json(GenerateProfessionsResponse {
        prompt: build_prompt(&request.traits),
        professions,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults_missing_traits_to_empty() {
        let request: GenerateProfessionsRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.traits, "");
    }

    #[test]
    fn test_request_keeps_traits_verbatim() {
        let request: GenerateProfessionsRequest =
            serde_json::from_value(serde_json::json!({ "traits": " {odd} input " })).unwrap();
        assert_eq!(request.traits, " {odd} input ");
    }
}
