// Prompt constants for the Generation module.

/// Profession suggestion prompt. Replace `{traits}` before sending.
/// The text before `{traits}` is always the literal start of the prompt.
pub const PROFESSIONS_PROMPT_TEMPLATE: &str =
    "The best professions for someone with the following traits and/or skills {traits} are:";
