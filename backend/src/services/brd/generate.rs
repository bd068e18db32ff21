//! Shared generation steps of the two endpoints.

use chrono::Local;
use common::model::generation::{GenerationResult, GenerationSummary};
use log::info;

use super::analyze::{analyze_existing_brd, fallback_improvement, items_found};
use super::gemini::BrdGenerator;
use super::markdown;
use super::prompt;
use crate::error::Result;

pub const PROVIDER: &str = "Google Gemini";
pub const PROVIDER_IMPROVEMENT: &str = "Google Gemini (Analysis + Improvement)";
pub const DEFAULT_IMPROVEMENT_INSTRUCTIONS: &str = "Improve the existing BRD document";

/// Asks the model for the structured BRD and renders it.
pub async fn standard(
    generator: &dyn BrdGenerator,
    description: &str,
    model: Option<&str>,
    files_processed: Option<usize>,
    message: &str,
) -> Result<GenerationResult> {
    let schema = generator.generate_schema(description, model).await?;
    let brd_markdown = markdown::render(&schema, Local::now().date_naive());
    info!(
        "Generated BRD '{}' ({} chars, completeness {:.1}%)",
        schema.project_name,
        brd_markdown.len(),
        schema.completeness().percentage
    );

    let summary = GenerationSummary {
        intelligent_prompt: Some(schema.intelligent_prompt()),
        ..schema.summary(files_processed)
    };
    let schema_json = serde_json::to_value(&schema).ok();

    Ok(GenerationResult {
        success: true,
        message: message.to_string(),
        project_name: schema.project_name.clone(),
        brd_markdown,
        llm_provider_used: PROVIDER.to_string(),
        generated_data: schema_json.clone(),
        brd_schema: schema_json,
        summary: Some(summary),
    })
}

/// Analyses an uploaded BRD and asks the model for an improved version.
pub async fn improve(
    generator: &dyn BrdGenerator,
    existing: &str,
    instructions: &str,
    model: Option<&str>,
    files_processed: usize,
) -> Result<GenerationResult> {
    let analysis = analyze_existing_brd(existing);
    info!(
        "Existing BRD '{}' analysed, {} items found",
        analysis.project_name,
        items_found(&analysis)
    );

    let instructions_provided = !instructions.trim().is_empty();
    let instructions = match instructions.trim() {
        "" => DEFAULT_IMPROVEMENT_INSTRUCTIONS,
        given => given,
    };
    let improvement_prompt = prompt::improvement(&analysis, instructions, existing);
    let brd_markdown = match generator.improve_document(&improvement_prompt, model).await? {
        Some(improved) => improved,
        None => fallback_improvement(existing, &analysis),
    };

    let summary = GenerationSummary {
        analysis_items_found: Some(items_found(&analysis)),
        original_content_length: Some(existing.chars().count()),
        improved_content_length: Some(brd_markdown.chars().count()),
        improvement_instructions_provided: Some(instructions_provided),
        ..analysis.summary(Some(files_processed))
    };
    let analysis_json = serde_json::to_value(&analysis).ok();

    Ok(GenerationResult {
        success: true,
        message: "BRD analyzed and improved successfully!".to_string(),
        project_name: analysis.project_name.clone(),
        brd_markdown,
        llm_provider_used: PROVIDER_IMPROVEMENT.to_string(),
        generated_data: analysis_json.clone(),
        brd_schema: analysis_json,
        summary: Some(summary),
    })
}
