//! Renders a `BrdSchema` as the ten-section markdown document.

use super::schema::BrdSchema;
use chrono::NaiveDate;
use std::fmt::Write;

const FOOTER: &str = "*This document was generated by the AI-Powered Business Requirement Agent \
using Google Gemini AI and comprehensive business analysis.*";

/// One `• item` line per entry, or the italic placeholder when empty.
/// Trailing double spaces keep each bullet on its own line when rendered.
fn bullets(out: &mut String, items: &[String], placeholder: &str) {
    if items.is_empty() {
        let _ = writeln!(out, "*No {} specified*", placeholder);
        return;
    }
    for item in items {
        let _ = writeln!(out, "• {}  ", item);
    }
}

fn paragraph(out: &mut String, text: &str, placeholder: &str) {
    if text.trim().is_empty() {
        let _ = writeln!(out, "*No {} specified*", placeholder);
    } else {
        let _ = writeln!(out, "{}", text.trim());
    }
}

fn section(out: &mut String, heading: &str, lead: Option<&str>) {
    out.push_str("\n---\n\n");
    let _ = writeln!(out, "## {}\n", heading);
    if let Some(lead) = lead {
        let _ = writeln!(out, "**{}**\n", lead);
    }
}

pub fn render(schema: &BrdSchema, date: NaiveDate) -> String {
    let mut out = String::with_capacity(4096);
    let name = &schema.project_name;

    let _ = writeln!(out, "# Business Requirements Document (BRD)\n");
    let _ = writeln!(out, "## {}\n", name);
    out.push_str("**Document Version:** 1.0.0  \n");
    let _ = writeln!(out, "**Date:** {}  ", date.format("%Y-%m-%d"));
    out.push_str("**Prepared by:** AI-Powered Business Requirement Agent\n");

    section(
        &mut out,
        "1. Executive Summary",
        Some("Strategic Overview and Business Impact:"),
    );
    paragraph(&mut out, &schema.executive_summary, "executive summary");

    section(&mut out, "2. Project Overview", None);
    let _ = writeln!(out, "### 2.1 Project Name\n**{}**\n", name);
    out.push_str("### 2.2 Project Objectives\n");
    bullets(&mut out, &schema.objectives, "objectives");
    out.push_str("\n### 2.3 Target Users\n");
    bullets(&mut out, &schema.stakeholders, "stakeholders");

    section(&mut out, "3. Project Scope", None);
    out.push_str("### 3.1 In Scope\n");
    bullets(&mut out, &schema.scope.in_scope, "in-scope items");
    out.push_str("\n### 3.2 Out of Scope\n");
    bullets(&mut out, &schema.scope.out_scope, "out-of-scope items");

    section(
        &mut out,
        "4. Business Requirements",
        Some("High-Level Business Needs and Strategic Objectives:"),
    );
    bullets(&mut out, &schema.requirements.business, "business requirements");

    section(
        &mut out,
        "5. Functional Requirements",
        Some("Core System Capabilities and Essential Features:"),
    );
    bullets(&mut out, &schema.requirements.functional, "functional requirements");

    section(
        &mut out,
        "6. Non-Functional Requirements",
        Some("Performance, Security, Usability, and Reliability Standards:"),
    );
    bullets(
        &mut out,
        &schema.requirements.non_functional,
        "non-functional requirements",
    );

    section(
        &mut out,
        "7. User Roles & Permissions",
        Some("Comprehensive Access Control and Role Definition:"),
    );
    if schema.stakeholders.is_empty() {
        out.push_str("*No user roles specified*\n");
    } else {
        out.push_str("**Based on the identified stakeholders:**  \n");
        bullets(&mut out, &schema.stakeholders, "user roles");
    }

    section(
        &mut out,
        "8. Success Criteria",
        Some("Measurable Goals and Success Metrics:"),
    );
    bullets(&mut out, &schema.success_criteria, "success criteria");

    section(&mut out, "9. Assumptions & Constraints", None);
    out.push_str("### 9.1 Critical Assumptions\n");
    bullets(&mut out, &schema.assumptions, "assumptions");
    out.push_str("\n### 9.2 Project Constraints\n");
    bullets(&mut out, &schema.constraints, "constraints");

    section(
        &mut out,
        "10. Conclusion",
        Some("Strategic Summary and Implementation Roadmap:"),
    );
    paragraph(&mut out, &schema.conclusion, "conclusion");

    out.push_str("\n---\n\n");
    out.push_str(FOOTER);
    out.push('\n');
    out
}
