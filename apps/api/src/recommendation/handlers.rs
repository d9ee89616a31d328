//! Axum route handler for the Recommendation API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::recommendation::generator::{generate_recommendations, RecommendationParams};
use crate::state::AppState;

pub const CATEGORY_REQUIRED: &str = "The 'category' parameter is required.";

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub recommendations: Value,
}

/// First value for `key`; repeated keys after the first are ignored.
fn first<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Pulls the three parameters out of the query string.
/// `category` must be present and non-empty; the others default to "".
fn extract_params(pairs: &[(String, String)]) -> Result<RecommendationParams, AppError> {
    let category = first(pairs, "category")
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::Validation(CATEGORY_REQUIRED.to_string()))?;

    Ok(RecommendationParams {
        category: category.to_string(),
        zone: first(pairs, "zone").unwrap_or_default().to_string(),
        age_range: first(pairs, "age_range").unwrap_or_default().to_string(),
    })
}

/// GET /recommend?category=&zone=&age_range=
///
/// Generates three new activities for the given category using the shared
/// knowledge base. Model output that isn't JSON still yields 200, with an
/// error-marker in place of the recommendations.
pub async fn handle_recommend(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<RecommendResponse>, AppError> {
    let params = extract_params(&pairs)?;

    let recommendations = generate_recommendations(
        state.llm.as_ref(),
        &params,
        state.knowledge_base.snippet(),
    )
    .await
    .map_err(|e| AppError::external(e, state.config.debug))?;

    info!(category = %params.category, "Recommendations generated");

    Ok(Json(RecommendResponse { recommendations }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_optional_parameters_default_to_empty() {
        let params = extract_params(&pairs(&[("category", "Memory")])).unwrap();
        assert_eq!(
            params,
            RecommendationParams {
                category: "Memory".to_string(),
                zone: String::new(),
                age_range: String::new(),
            }
        );
    }

    #[test]
    fn test_all_parameters_are_read() {
        let params = extract_params(&pairs(&[
            ("age_range", "7-9"),
            ("zone", "Outdoor"),
            ("category", "Reasoning"),
        ]))
        .unwrap();
        assert_eq!(params.category, "Reasoning");
        assert_eq!(params.zone, "Outdoor");
        assert_eq!(params.age_range, "7-9");
    }

    #[test]
    fn test_missing_category_is_validation_error() {
        let err = extract_params(&pairs(&[("zone", "Indoor")])).unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == CATEGORY_REQUIRED));
    }

    #[test]
    fn test_empty_category_is_validation_error() {
        let err = extract_params(&pairs(&[("category", "")])).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_first_value_wins_for_repeated_keys() {
        let params = extract_params(&pairs(&[
            ("category", "Memory"),
            ("category", "Reasoning"),
        ]))
        .unwrap();
        assert_eq!(params.category, "Memory");
    }
}
