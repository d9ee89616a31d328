//! Recommendation Generator: prompt → one completion call → best-effort parse.
//!
//! The model's reply is a trust boundary. A reply that decodes as JSON is
//! passed through untouched (key order included), whatever its shape; shapes
//! other than an array of three objects are logged, never rejected. A reply
//! that does not decode is replaced by a single error-marker object so the
//! caller still gets a 200 with the usual envelope.

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::llm_client::{CompletionClient, LlmError};
use crate::recommendation::prompts::{build_prompt, RECOMMENDATION_KEYS};

pub const PARSE_FAILURE_MESSAGE: &str = "Failed to parse JSON output";
const EXPECTED_RECOMMENDATIONS: usize = 3;

/// Caller-supplied generation parameters. `zone` and `age_range` may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationParams {
    pub category: String,
    pub zone: String,
    pub age_range: String,
}

/// Error-marker returned in place of recommendations when the reply is not JSON.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ParseFailure {
    pub error: String,
    pub raw_output: String,
    pub exception: String,
}

/// Runs the generation pipeline once.
///
/// Completion failures propagate; parse failures do not.
pub async fn generate_recommendations(
    llm: &dyn CompletionClient,
    params: &RecommendationParams,
    knowledge_base: &str,
) -> Result<Value, LlmError> {
    let prompt = build_prompt(params, knowledge_base);
    info!(
        category = %params.category,
        zone = %params.zone,
        age_range = %params.age_range,
        prompt_chars = prompt.len(),
        "Requesting activity recommendations"
    );

    let raw = llm.complete(&prompt).await?;
    Ok(parse_recommendations(&raw))
}

/// Trims `raw` and decodes it as JSON, falling back to a one-element array
/// holding a `ParseFailure`.
pub fn parse_recommendations(raw: &str) -> Value {
    let raw_output = raw.trim();

    match serde_json::from_str::<Value>(raw_output) {
        Ok(value) => {
            inspect_shape(&value);
            value
        }
        Err(e) => {
            warn!("Model output is not valid JSON: {e}");
            let marker = ParseFailure {
                error: PARSE_FAILURE_MESSAGE.to_string(),
                raw_output: raw_output.to_string(),
                exception: e.to_string(),
            };
            Value::Array(vec![serde_json::json!(marker)])
        }
    }
}

/// Logs replies that decoded but don't look like three recommendation objects.
fn inspect_shape(value: &Value) {
    let Some(items) = value.as_array() else {
        warn!("Model output is JSON but not an array; passing through");
        return;
    };

    if items.len() != EXPECTED_RECOMMENDATIONS {
        warn!(
            "Model returned {} recommendations (expected {})",
            items.len(),
            EXPECTED_RECOMMENDATIONS
        );
    }

    for (i, item) in items.iter().enumerate() {
        let missing: Vec<&str> = RECOMMENDATION_KEYS
            .iter()
            .copied()
            .filter(|k| item.get(k).is_none())
            .collect();
        if !missing.is_empty() {
            warn!("Recommendation {i} is missing keys {:?}", missing);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Records every prompt and answers with a fixed reply.
    struct RecordingClient {
        reply: String,
        prompts: Mutex<Vec<String>>,
    }

    impl RecordingClient {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CompletionClient for RecordingClient {
        async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.reply.clone())
        }
    }

    struct FailingClient;

    #[async_trait]
    impl CompletionClient for FailingClient {
        async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
            Err(LlmError::Api {
                status: 503,
                message: "unavailable".to_string(),
            })
        }
    }

    fn params() -> RecommendationParams {
        RecommendationParams {
            category: "Memory".to_string(),
            zone: "Indoor".to_string(),
            age_range: "4-6".to_string(),
        }
    }

    #[test]
    fn test_valid_array_passes_through_unchanged() {
        let raw = r#"[{"name":"A","zone":"Indoor"},{"name":"B"},{"name":"C"}]"#;
        let value = parse_recommendations(raw);
        assert_eq!(serde_json::to_string(&value).unwrap(), raw);
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed_before_parse() {
        let value = parse_recommendations("\n\n  [1, 2, 3]\n ");
        assert_eq!(value, json!([1, 2, 3]));
    }

    #[test]
    fn test_key_order_is_preserved() {
        let raw = r#"[{"zone":"z","name":"n","objective":"o"}]"#;
        let value = parse_recommendations(raw);
        let keys: Vec<&String> = value[0].as_object().unwrap().keys().collect();
        assert_eq!(keys, ["zone", "name", "objective"]);
    }

    #[test]
    fn test_non_array_json_is_passed_through() {
        let value = parse_recommendations(r#"{"name": "solo"}"#);
        assert_eq!(value, json!({"name": "solo"}));
    }

    #[test]
    fn test_non_json_becomes_error_marker() {
        let value = parse_recommendations("not json");
        let expected_exception = serde_json::from_str::<Value>("not json")
            .unwrap_err()
            .to_string();

        assert_eq!(
            value,
            json!([{
                "error": "Failed to parse JSON output",
                "raw_output": "not json",
                "exception": expected_exception,
            }])
        );
    }

    #[test]
    fn test_error_marker_keeps_trimmed_raw_output() {
        let value = parse_recommendations("  ```json\n[]\n```  ");
        assert_eq!(value[0]["raw_output"], "```json\n[]\n```");
        assert_eq!(value[0]["error"], PARSE_FAILURE_MESSAGE);
    }

    #[test]
    fn test_error_marker_field_order() {
        let value = parse_recommendations("nope");
        let keys: Vec<&String> = value[0].as_object().unwrap().keys().collect();
        assert_eq!(keys, ["error", "raw_output", "exception"]);
    }

    #[tokio::test]
    async fn test_generate_makes_exactly_one_call_with_built_prompt() {
        let client = RecordingClient::new(r#"[{"name":"A"},{"name":"B"},{"name":"C"}]"#);
        let kb = "Title: Shape Hunt\n";

        let value = generate_recommendations(&client, &params(), kb)
            .await
            .unwrap();

        assert_eq!(value.as_array().unwrap().len(), 3);
        let prompts = client.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0], build_prompt(&params(), kb));
    }

    #[tokio::test]
    async fn test_generate_propagates_completion_failure() {
        let result = generate_recommendations(&FailingClient, &params(), "").await;
        assert!(matches!(result, Err(LlmError::Api { status: 503, .. })));
    }
}
