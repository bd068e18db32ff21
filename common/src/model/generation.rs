use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response of both generation endpoints.
///
/// A new `GenerationResult` replaces the previous one in the UI; it is only
/// discarded when the user starts another attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    #[serde(default = "default_success")]
    pub success: bool,
    pub message: String,
    pub project_name: String,
    pub brd_markdown: String,
    pub llm_provider_used: String,
    /// Structured BRD the document was rendered from, or the analysis of an
    /// uploaded BRD in improvement mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brd_schema: Option<Value>,
    /// Data the generator produced before rendering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<GenerationSummary>,
}

fn default_success() -> bool {
    true
}

/// Processing figures attached to a result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationSummary {
    #[serde(default)]
    pub stakeholders_count: usize,
    #[serde(default)]
    pub objectives_count: usize,
    #[serde(default)]
    pub requirements_count: RequirementsCount,
    #[serde(default)]
    pub assumptions_count: usize,
    #[serde(default)]
    pub constraints_count: usize,
    #[serde(default)]
    pub success_criteria_count: usize,
    #[serde(default)]
    pub completeness_score: f64,
    #[serde(default)]
    pub completeness_status: String,
    /// Only set by the files endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files_processed: Option<usize>,
    /// Completeness guidance shown next to a newly generated BRD.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intelligent_prompt: Option<String>,

    // Improvement mode only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_items_found: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_content_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub improved_content_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub improvement_instructions_provided: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementsCount {
    pub business: usize,
    pub functional: usize,
    pub non_functional: usize,
}
