// Prompt text for recommendation generation.

use crate::recommendation::generator::RecommendationParams;

/// Keys every generated recommendation object is asked to carry, in order.
pub const RECOMMENDATION_KEYS: [&str; 7] = [
    "name",
    "description",
    "instructions",
    "materials_required",
    "time_required",
    "zone",
    "objective",
];

const PREAMBLE: &str = "You are a creative expert in designing engaging cognitive activities for children. \
    Using the following knowledge base examples solely for inspiration, generate three completely new, \
    original, and positive cognitive activity recommendations that are engaging and age-appropriate. \
    Output your recommendations as a valid JSON array containing exactly three JSON objects. \
    Each JSON object must have the following keys: ";

const NO_COMMENTARY: &str =
    "Do not include any additional commentary or text; output only the JSON array.";

const RECOMMENDATION_KEY_LIST: &str = "\"name\", \"description\", \"instructions\", \"materials_required\", \"time_required\", \"zone\", and \"objective\"";

/// Builds the single user message sent to the completion API.
///
/// Caller parameters are interpolated as-is; an empty zone or age range
/// leaves its line blank after the label.
pub fn build_prompt(params: &RecommendationParams, knowledge_base: &str) -> String {
    format!(
        "{PREAMBLE}{RECOMMENDATION_KEY_LIST}. {NO_COMMENTARY}\n\n\
         Knowledge Base Examples:\n\
         {knowledge_base}\n\n\
         Parameters:\n\
         Category: {category}\n\
         Zone: {zone}\n\
         Age Range: {age_range}\n\n\
         Now, please generate the JSON array:",
        category = params.category,
        zone = params.zone,
        age_range = params.age_range,
    )
}
