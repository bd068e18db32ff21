//! Prompt text sent to the model.

use super::analyze::items_found;
use super::schema::BrdSchema;
use common::model::upload::UploadedFile;

const SYSTEM_PROMPT: &str = r#"You are an expert Business Analyst with 15+ years of experience in creating comprehensive Business Requirements Documents (BRD).

Your task is to analyze a project description and generate a detailed, professional BRD structure based on the information provided by the user.

IMPORTANT GUIDELINES:
- Analyze the user's project description carefully and extract meaningful information
- For each section, provide realistic and specific content based on the description
- If the description mentions specific features, goals, or requirements, include them
- If information is missing for a section, make reasonable inferences based on the project type
- ALWAYS provide a meaningful project name that reflects the actual project
- Write the executive summary and the conclusion as plain paragraphs of 5-7 lines, without bullet points
- Respond ONLY with valid JSON in the exact format specified below

JSON Structure (respond ONLY with this):
{
    "project_name": "string",
    "executive_summary": "string",
    "stakeholders": ["string"],
    "objectives": ["string"],
    "scope": {
        "in_scope": ["string"],
        "out_scope": ["string"]
    },
    "requirements": {
        "business": ["string"],
        "functional": ["string"],
        "non_functional": ["string"]
    },
    "assumptions": ["string"],
    "constraints": ["string"],
    "success_criteria": ["string"],
    "conclusion": "string"
}

CRITICAL: You MUST generate meaningful content for each section based on the project description. Do not leave sections empty."#;

const DEFAULT_IMPROVEMENT: &str = "Improve the BRD by enhancing clarity, completeness, and \
professional standards while maintaining all existing information.";

pub fn structured(description: &str) -> String {
    format!(
        "{}\n\nUser's Project Description:\n{}\n\nBased on this project description, please generate \
         a comprehensive BRD structure. Respond with valid JSON only:",
        SYSTEM_PROMPT, description
    )
}

/// Shorter retry prompt with a filled-in example object.
pub fn simplified(description: &str) -> String {
    format!(
        r#"You are a business analyst. Create a BRD structure for this project: "{}"

Respond with ONLY this JSON structure:
{{
    "project_name": "Project Name",
    "executive_summary": "One paragraph.",
    "stakeholders": ["User", "Admin"],
    "objectives": ["Goal 1", "Goal 2"],
    "scope": {{"in_scope": ["Feature 1"], "out_scope": ["Feature 2"]}},
    "requirements": {{"business": ["Need 1"], "functional": ["Function 1"], "non_functional": ["Quality 1"]}},
    "assumptions": ["Assumption 1"],
    "constraints": ["Constraint 1"],
    "success_criteria": ["Success 1"],
    "conclusion": "One paragraph."
}}"#,
        description
    )
}

pub fn improvement(analysis: &BrdSchema, instructions: &str, existing: &str) -> String {
    let instructions = match instructions.trim() {
        "" => DEFAULT_IMPROVEMENT,
        given => given,
    };
    let reqs = &analysis.requirements;

    format!(
        "You are an expert Business Analyst reviewing and improving a Business Requirements Document (BRD).\n\n\
         **Current BRD Analysis:**\n\
         - Project: {name}\n\
         - Stakeholders: {stakeholders} identified\n\
         - Objectives: {objectives} identified\n\
         - Scope Items: {in_scope} in-scope, {out_scope} out-of-scope\n\
         - Requirements: {business} business, {functional} functional, {non_functional} non-functional\n\
         - Assumptions: {assumptions} identified\n\
         - Constraints: {constraints} identified\n\
         - Success Criteria: {criteria} identified\n\
         - Total items: {total}\n\n\
         **Improvement Instructions:**\n{instructions}\n\n\
         **Your Task:**\n\
         Analyze the existing BRD content and provide an improved version that:\n\
         1. Maintains all existing information\n\
         2. Enhances clarity and professionalism\n\
         3. Fills in any missing critical sections\n\
         4. Improves formatting and structure\n\
         5. Adds industry best practices where appropriate\n\
         6. Ensures consistency in terminology and style\n\n\
         **Existing BRD Content:**\n```\n{existing}\n```\n\n\
         Respond with the complete improved BRD in Markdown format only.",
        name = analysis.project_name,
        stakeholders = analysis.stakeholders.len(),
        objectives = analysis.objectives.len(),
        in_scope = analysis.scope.in_scope.len(),
        out_scope = analysis.scope.out_scope.len(),
        business = reqs.business.len(),
        functional = reqs.functional.len(),
        non_functional = reqs.non_functional.len(),
        assumptions = analysis.assumptions.len(),
        constraints = analysis.constraints.len(),
        criteria = analysis.success_criteria.len(),
        total = items_found(analysis),
        instructions = instructions,
        existing = existing,
    )
}

/// Adds up to `limit` characters of every file under a `--- name (type) ---`
/// header to the description.
pub fn enhanced_description(description: &str, files: &[UploadedFile], limit: usize) -> String {
    if files.is_empty() {
        return description.to_string();
    }

    let mut out = String::from(description);
    out.push_str("\n\nAdditional context from uploaded files:\n");
    for file in files {
        out.push_str(&format!("\n--- {} ({}) ---\n", file.filename, file.file_type));
        let mut chars = file.content.chars();
        let preview: String = chars.by_ref().take(limit).collect();
        out.push_str(&preview);
        if chars.next().is_some() {
            out.push_str("...");
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, content: &str) -> UploadedFile {
        UploadedFile {
            filename: name.to_string(),
            content: content.to_string(),
            file_type: "text/markdown".to_string(),
        }
    }

    #[test]
    fn structured_prompt_embeds_description() {
        let prompt = structured("A bakery ordering app");
        assert!(prompt.contains("User's Project Description:\nA bakery ordering app"));
        assert!(prompt.contains("\"executive_summary\""));
    }

    #[test]
    fn enhanced_description_caps_each_file() {
        let long = "x".repeat(2_500);
        let out = enhanced_description("Base text", &[file("a.md", "short"), file("b.md", &long)], 2_000);

        assert!(out.starts_with("Base text\n\nAdditional context from uploaded files:\n"));
        assert!(out.contains("\n--- a.md (text/markdown) ---\nshort\n"));
        assert!(out.contains(&format!("{}...\n", "x".repeat(2_000))));
        assert!(!out.contains(&"x".repeat(2_001)));
    }

    #[test]
    fn enhanced_description_without_files_is_unchanged() {
        assert_eq!(enhanced_description("Just this", &[], 2_000), "Just this");
    }

    #[test]
    fn improvement_prompt_defaults_instructions() {
        let analysis = BrdSchema {
            project_name: "Legacy".to_string(),
            stakeholders: vec!["Ops".into()],
            ..Default::default()
        };
        let prompt = improvement(&analysis, "  ", "# Old BRD");

        assert!(prompt.contains("- Project: Legacy"));
        assert!(prompt.contains("- Stakeholders: 1 identified"));
        assert!(prompt.contains(DEFAULT_IMPROVEMENT));
        assert!(prompt.contains("```\n# Old BRD\n```"));
    }
}
