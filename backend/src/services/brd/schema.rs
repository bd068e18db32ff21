//! The structured BRD the model is asked to fill in, and what we compute from it.

use common::model::generation::{GenerationSummary, RequirementsCount};
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

pub const DEFAULT_PROJECT_NAME: &str = "Project";

const TOTAL_FIELDS: usize = 10;
const COMPLETE_THRESHOLD: f64 = 50.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scope {
    pub in_scope: Vec<String>,
    pub out_scope: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Requirements {
    pub business: Vec<String>,
    pub functional: Vec<String>,
    pub non_functional: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BrdSchema {
    pub project_name: String,
    pub executive_summary: String,
    pub stakeholders: Vec<String>,
    pub objectives: Vec<String>,
    pub scope: Scope,
    pub requirements: Requirements,
    pub assumptions: Vec<String>,
    pub constraints: Vec<String>,
    pub success_criteria: Vec<String>,
    pub conclusion: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Completeness {
    pub completed_fields: usize,
    pub total_fields: usize,
    pub percentage: f64,
}

impl Completeness {
    pub fn is_complete(&self) -> bool {
        self.percentage >= COMPLETE_THRESHOLD
    }

    pub fn status(&self) -> &'static str {
        if self.is_complete() {
            "Complete"
        } else {
            "Needs Improvement"
        }
    }
}

/// Pulls a JSON object out of a model answer.
///
/// The answer is tried as-is first, then the widest `{...}` span is tried,
/// which covers answers wrapped in markdown fences or prose.
pub fn parse_schema(text: &str) -> Option<BrdSchema> {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(text.trim()) {
        return Some(BrdSchema::from_object(&map));
    }

    let span = Regex::new(r"(?s)\{.*\}").ok()?.find(text)?;
    match serde_json::from_str::<Value>(span.as_str()) {
        Ok(Value::Object(map)) => Some(BrdSchema::from_object(&map)),
        _ => None,
    }
}

fn text_of(map: &Map<String, Value>, key: &str) -> String {
    match map.get(key) {
        Some(Value::String(s)) => s.trim().to_string(),
        _ => String::new(),
    }
}

fn list_of(map: &Map<String, Value>, key: &str) -> Vec<String> {
    let Some(Value::Array(items)) = map.get(key) else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
        .filter(|s| !s.is_empty())
        .collect()
}

fn nested<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Map<String, Value>> {
    match map.get(key) {
        Some(Value::Object(inner)) => Some(inner),
        _ => None,
    }
}

impl BrdSchema {
    /// Reads whatever fields are present and well-typed; everything else stays
    /// empty. A blank project name becomes `Project`.
    pub fn from_object(map: &Map<String, Value>) -> Self {
        let empty = Map::new();
        let scope = nested(map, "scope").unwrap_or(&empty);
        let requirements = nested(map, "requirements").unwrap_or(&empty);

        Self {
            project_name: text_of(map, "project_name"),
            executive_summary: text_of(map, "executive_summary"),
            stakeholders: list_of(map, "stakeholders"),
            objectives: list_of(map, "objectives"),
            scope: Scope {
                in_scope: list_of(scope, "in_scope"),
                out_scope: list_of(scope, "out_scope"),
            },
            requirements: Requirements {
                business: list_of(requirements, "business"),
                functional: list_of(requirements, "functional"),
                non_functional: list_of(requirements, "non_functional"),
            },
            assumptions: list_of(map, "assumptions"),
            constraints: list_of(map, "constraints"),
            success_criteria: list_of(map, "success_criteria"),
            conclusion: text_of(map, "conclusion"),
        }
        .normalized()
    }

    /// What the service answers with when no model is configured.
    pub fn fallback() -> Self {
        Self::default().normalized()
    }

    pub fn normalized(mut self) -> Self {
        if self.project_name.trim().is_empty() {
            self.project_name = DEFAULT_PROJECT_NAME.to_string();
        }
        self
    }

    pub fn completeness(&self) -> Completeness {
        let filled = [
            self.project_name.trim().chars().count() > 3,
            !self.stakeholders.is_empty(),
            !self.objectives.is_empty(),
            !self.scope.in_scope.is_empty(),
            !self.scope.out_scope.is_empty(),
            !self.requirements.business.is_empty(),
            !self.requirements.functional.is_empty(),
            !self.requirements.non_functional.is_empty(),
            !self.assumptions.is_empty(),
            !self.constraints.is_empty(),
        ];
        let completed_fields = filled.iter().filter(|f| **f).count();

        Completeness {
            completed_fields,
            total_fields: TOTAL_FIELDS,
            percentage: completed_fields as f64 / TOTAL_FIELDS as f64 * 100.0,
        }
    }

    pub fn summary(&self, files_processed: Option<usize>) -> GenerationSummary {
        let completeness = self.completeness();
        GenerationSummary {
            stakeholders_count: self.stakeholders.len(),
            objectives_count: self.objectives.len(),
            requirements_count: RequirementsCount {
                business: self.requirements.business.len(),
                functional: self.requirements.functional.len(),
                non_functional: self.requirements.non_functional.len(),
            },
            assumptions_count: self.assumptions.len(),
            constraints_count: self.constraints.len(),
            success_criteria_count: self.success_criteria.len(),
            completeness_score: completeness.percentage,
            completeness_status: completeness.status().to_string(),
            files_processed,
            ..Default::default()
        }
    }

    /// Completeness guidance returned with a newly generated BRD.
    pub fn intelligent_prompt(&self) -> String {
        let completeness = self.completeness();
        let score = format!(
            "**Completeness Score:** {:.1}% ({}/{} fields)",
            completeness.percentage, completeness.completed_fields, completeness.total_fields
        );
        if completeness.is_complete() {
            format!(
                "**BRD Data Analysis Complete**\n\n\
                 Your project description contains sufficient information for a comprehensive BRD.\n\n\
                 {}\n\n**Status:** Ready to generate BRD document",
                score
            )
        } else {
            format!(
                "**BRD Data Analysis - Proceeding with Available Information**\n\n\
                 A BRD will be generated using the available information.\n\n\
                 {}\n\n**Status:** Proceeding with BRD generation\n\n\
                 **Note:** Missing details are filled in from the project description and common \
                 industry practice. The generated BRD can be enhanced later with more specific information.",
                score
            )
        }
    }
}
