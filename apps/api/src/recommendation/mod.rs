// Activity recommendation: prompt construction, the single completion call,
// and the HTTP handler that wraps them.
// All completion calls go through llm_client::CompletionClient.

pub mod generator;
pub mod handlers;
pub mod prompts;
