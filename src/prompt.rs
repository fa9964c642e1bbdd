// src/prompt.rs
use crate::form::UserInputs;

pub const SYSTEM_PERSONA: &str = "You are an experienced business consultant specializing in helping entrepreneurs identify viable business opportunities.";

/// Build the user message sent alongside the system persona.
///
/// Time commitment and market preference are collected by the form but are
/// not part of the prompt.
pub fn build_prompt(inputs: &UserInputs) -> String {
    format!(
        r#"Generate 5 business ideas based on:
Budget: {}
Skills: {}
Interests: {}
Location: {}

For each idea, provide:
1. Business concept
2. Setup requirements
3. Potential challenges
4. Estimated ROI timeline
5. Key success factors
6. Marketing strategies
7. Scaling potential

Format each idea clearly with headings and bullet points."#,
        inputs.budget.label(),
        inputs.skills,
        inputs.interests,
        inputs.location
    )
}
