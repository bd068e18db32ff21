//! Line-based reading of an existing BRD.
//!
//! Headings switch the current section and bullets under a known section are
//! collected into the matching schema field. The result only feeds the
//! improvement prompt and the summary, so it is a best effort.

use super::schema::{BrdSchema, Requirements};

pub const UNKNOWN_PROJECT: &str = "Unknown Project";

const MAX_NAME_CHARS: usize = 100;
const MIN_ITEM_CHARS: usize = 6;
const MIN_STAKEHOLDER_CHARS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScopeKind {
    In,
    Out,
}

/// Lowercase letters of a heading, e.g. `## 3.1 In-Scope:` -> `inscope`.
fn section_key(heading: &str) -> String {
    heading
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Text of a `•`, `-` or `*` bullet. Bold lead-ins (`**...`) are not bullets.
fn bullet_item(line: &str) -> Option<&str> {
    if line.starts_with("**") {
        return None;
    }
    line.strip_prefix('•')
        .or_else(|| line.strip_prefix('-'))
        .or_else(|| line.strip_prefix('*'))
        .map(str::trim)
}

fn long_enough(item: &str, min: usize) -> bool {
    item.chars().count() >= min
}

/// Named requirement sections decide the bucket; anything else, including a
/// `Business Requirements Document` title, falls back to keywords in the item.
fn classify_requirement<'a>(section: &str, item: &str, reqs: &'a mut Requirements) -> &'a mut Vec<String> {
    match section {
        "businessrequirements" => return &mut reqs.business,
        "functionalrequirements" => return &mut reqs.functional,
        "nonfunctionalrequirements" => return &mut reqs.non_functional,
        _ => {}
    }

    let lower = item.to_lowercase();
    if ["business", "goal", "objective", "value"].iter().any(|w| lower.contains(w)) {
        &mut reqs.business
    } else if ["function", "feature", "capability", "system"].iter().any(|w| lower.contains(w)) {
        &mut reqs.functional
    } else {
        &mut reqs.non_functional
    }
}

pub fn analyze_existing_brd(content: &str) -> BrdSchema {
    let mut schema = BrdSchema::default();
    let mut section = String::new();
    let mut scope_kind: Option<ScopeKind> = None;

    for line in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if line.starts_with('#') {
            section = section_key(line);
            if section.contains("outofscope") || section.contains("outscope") {
                scope_kind = Some(ScopeKind::Out);
            } else if section.contains("inscope") {
                scope_kind = Some(ScopeKind::In);
            }
            continue;
        }

        let item = bullet_item(line);

        if schema.project_name.is_empty() && item.is_none() {
            if section == "projectname" {
                schema.project_name = line.trim_matches('*').trim().to_string();
            } else if matches!(section.as_str(), "" | "executivesummary" | "projectoverview")
                && !line.starts_with('*')
            {
                schema.project_name = line.chars().take(MAX_NAME_CHARS).collect();
            }
        }

        if section.contains("scope") && item.is_none() {
            let lower = line.to_lowercase();
            if lower.contains("out-scope") || lower.contains("out scope") || lower.contains("out of scope") {
                scope_kind = Some(ScopeKind::Out);
            } else if lower.contains("in-scope") || lower.contains("in scope") {
                scope_kind = Some(ScopeKind::In);
            }
        }

        let Some(item) = item.filter(|i| !i.is_empty()) else {
            continue;
        };
        let item_owned = || item.to_string();

        if section.contains("stakeholder") && long_enough(item, MIN_STAKEHOLDER_CHARS) {
            schema.stakeholders.push(item_owned());
        }
        if !long_enough(item, MIN_ITEM_CHARS) {
            continue;
        }
        if section.contains("objective") {
            schema.objectives.push(item_owned());
        }
        if section.contains("scope") {
            match scope_kind {
                Some(ScopeKind::In) => schema.scope.in_scope.push(item_owned()),
                Some(ScopeKind::Out) => schema.scope.out_scope.push(item_owned()),
                None => {}
            }
        }
        if section.contains("requirement") {
            classify_requirement(&section, item, &mut schema.requirements).push(item_owned());
        }
        if section.contains("assumption") {
            schema.assumptions.push(item_owned());
        }
        if section.contains("constraint") {
            schema.constraints.push(item_owned());
        }
        if section.contains("success") || section.contains("criteria") {
            schema.success_criteria.push(item_owned());
        }
    }

    if schema.project_name.trim().is_empty() {
        schema.project_name = UNKNOWN_PROJECT.to_string();
    }
    schema
}

/// Total number of collected items across all list fields.
pub fn items_found(schema: &BrdSchema) -> usize {
    schema.stakeholders.len()
        + schema.objectives.len()
        + schema.scope.in_scope.len()
        + schema.scope.out_scope.len()
        + schema.requirements.business.len()
        + schema.requirements.functional.len()
        + schema.requirements.non_functional.len()
        + schema.assumptions.len()
        + schema.constraints.len()
        + schema.success_criteria.len()
}

/// Document returned in improvement mode when no model is available.
pub fn fallback_improvement(original: &str, analysis: &BrdSchema) -> String {
    let reqs = &analysis.requirements;
    format!(
        "# Improved BRD - {name}\n\n\
         ## Analysis Summary\n\
         This BRD has been analyzed and the following improvements are recommended:\n\n\
         **Items Found:**\n\
         - Stakeholders: {stakeholders}\n\
         - Objectives: {objectives}\n\
         - Requirements: {business} business, {functional} functional, {non_functional} non-functional\n\
         - Assumptions: {assumptions}\n\
         - Constraints: {constraints}\n\
         - Success Criteria: {criteria}\n\n\
         **Original Content:**\n{original}\n\n\
         **Note:** AI improvement service not available. Manual review recommended.\n",
        name = analysis.project_name,
        stakeholders = analysis.stakeholders.len(),
        objectives = analysis.objectives.len(),
        business = reqs.business.len(),
        functional = reqs.functional.len(),
        non_functional = reqs.non_functional.len(),
        assumptions = analysis.assumptions.len(),
        constraints = analysis.constraints.len(),
        criteria = analysis.success_criteria.len(),
        original = original,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEGACY: &str = "\
Inventory Revamp

## Stakeholders
- Warehouse staff
- CFO
* Ops team

## Objectives
• Cut stock-outs by 30%
• Fast

## Scope
In scope:
- Barcode scanning at docks
Out of scope:
- Supplier portal integration

## Requirements
- Business value must be tracked monthly
- System shall export CSV reports
- Response time below one second

### Functional Requirements
- Nightly reconciliation job

## Assumptions & Constraints
- Existing scanners are reused

## Success Criteria
**Measured quarterly:**
- Stock accuracy above 99%
";

    #[test]
    fn collects_items_per_section() {
        let schema = analyze_existing_brd(LEGACY);

        assert_eq!(schema.project_name, "Inventory Revamp");
        assert_eq!(schema.stakeholders, vec!["Warehouse staff", "Ops team"]);
        assert_eq!(schema.objectives, vec!["Cut stock-outs by 30%"]);
        assert_eq!(schema.scope.in_scope, vec!["Barcode scanning at docks"]);
        assert_eq!(schema.scope.out_scope, vec!["Supplier portal integration"]);
        assert_eq!(schema.success_criteria, vec!["Stock accuracy above 99%"]);
        assert_eq!(schema.assumptions, vec!["Existing scanners are reused"]);
        assert_eq!(schema.constraints, vec!["Existing scanners are reused"]);
    }

    #[test]
    fn requirements_are_classified() {
        let reqs = analyze_existing_brd(LEGACY).requirements;

        assert_eq!(reqs.business, vec!["Business value must be tracked monthly"]);
        assert_eq!(
            reqs.functional,
            vec!["System shall export CSV reports", "Nightly reconciliation job"]
        );
        assert_eq!(reqs.non_functional, vec!["Response time below one second"]);
    }

    #[test]
    fn document_title_does_not_force_business_bucket() {
        let doc = "# Business Requirements Document (BRD)\n\
                   - System feature for bulk uploads\n\
                   - Pages load within two seconds\n\
                   - Business goal is fewer support calls\n\
                   ## Business Requirements\n\
                   - Self-service onboarding for tenants\n\
                   ## Non-Functional Requirements\n\
                   - System feature flags stay encrypted\n";
        let reqs = analyze_existing_brd(doc).requirements;

        assert_eq!(
            reqs.business,
            vec!["Business goal is fewer support calls", "Self-service onboarding for tenants"]
        );
        assert_eq!(reqs.functional, vec!["System feature for bulk uploads"]);
        assert_eq!(
            reqs.non_functional,
            vec!["Pages load within two seconds", "System feature flags stay encrypted"]
        );
    }

    #[test]
    fn reads_name_from_generated_layout() {
        let doc = "# Business Requirements Document (BRD)\n\n## Fleet Tracker\n\n\
                   **Document Version:** 1.0.0\n\n## 2. Project Overview\n\n\
                   ### 2.1 Project Name\n**Fleet Tracker**\n";
        assert_eq!(analyze_existing_brd(doc).project_name, "Fleet Tracker");
    }

    #[test]
    fn empty_document_has_default_name_and_no_items() {
        let schema = analyze_existing_brd("   \n\n");
        assert_eq!(schema.project_name, UNKNOWN_PROJECT);
        assert_eq!(items_found(&schema), 0);
    }

    #[test]
    fn fallback_document_lists_counts_and_original() {
        let schema = analyze_existing_brd(LEGACY);
        let doc = fallback_improvement(LEGACY, &schema);

        assert!(doc.starts_with("# Improved BRD - Inventory Revamp"));
        assert!(doc.contains("- Stakeholders: 2"));
        assert!(doc.contains("- Requirements: 1 business, 2 functional, 1 non-functional"));
        assert!(doc.contains(LEGACY));
    }
}
