use crate::types::PromptOptions;

/// Drops blank prompts, trims the rest, and appends every enabled option
/// suffix in declaration order.
pub fn compose_prompts(prompts: &[String], options: &PromptOptions) -> Vec<String> {
    prompts
        .iter()
        .map(|prompt| prompt.trim())
        .filter(|prompt| !prompt.is_empty())
        .map(|prompt| compose_prompt(prompt, options))
        .collect()
}

pub fn compose_prompt(prompt: &str, options: &PromptOptions) -> String {
    options
        .enabled_suffixes()
        .fold(prompt.to_string(), |mut composed, suffix| {
            composed.push_str(", ");
            composed.push_str(suffix);
            composed
        })
}

pub fn has_usable_prompt(prompts: &[String]) -> bool {
    prompts.iter().any(|prompt| !prompt.trim().is_empty())
}
