// Profession suggestion generation.
// All backend calls go through the TextGenerator trait from llm_client.

pub mod generator;
pub mod handlers;
pub mod prompts;
