use crate::analysis::Technique;

/// Sampling temperature for explanation requests.
pub const TEMPERATURE: f32 = 0.3;

pub const SYSTEM_PROMPT: &str = "\
You explain how language choices influence perception.
You do NOT verify facts, judge intent, or take positions.
Remain neutral, descriptive, and non-political.";

/// Build the user turn for an explanation request.
pub fn build_user_prompt(text: &str, techniques: &[Technique]) -> String {
    let technique_list = if techniques.is_empty() {
        "no strong techniques".to_string()
    } else {
        techniques
            .iter()
            .map(|t| t.name())
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "Text:\n{text}\n\n\
         Detected language techniques:\n{technique_list}\n\n\
         Explain how these techniques may influence reader perception."
    )
}
