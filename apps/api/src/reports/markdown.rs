//! Markdown rendering of an [`AnalysisResult`]. Formatting only.

use match_engine::{AnalysisResult, Category, KeywordMatch};

pub fn render_markdown(result: &AnalysisResult) -> String {
    let mut md = String::new();

    md.push_str("# ATS Resume Match Analysis Report\n\n");
    md.push_str(&format!(
        "## Overall Score: {:.1}/100 - {}\n\n---\n\n",
        result.overall_score,
        result.label.as_str().replace('_', " ")
    ));

    // ──────────────────────────────────────────────────────────────────────
    // Categories
    // ──────────────────────────────────────────────────────────────────────

    md.push_str("## Category Breakdown\n\n");
    for category in Category::ALL {
        let Some(score) = result.category(category) else {
            continue;
        };
        md.push_str(&format!(
            "### {}: {:.1}/100\n\n",
            category.display_name(),
            score.score
        ));
        for evidence in &score.evidence {
            md.push_str(&format!("- {evidence}\n"));
        }
        md.push('\n');
    }

    // ──────────────────────────────────────────────────────────────────────
    // Keywords
    // ──────────────────────────────────────────────────────────────────────

    md.push_str("## Keyword Matching\n\n");
    push_keyword_list(&mut md, "Must-Have Keywords", &result.must_have);
    md.push('\n');
    push_keyword_list(&mut md, "Nice-to-Have Keywords", &result.nice_to_have);

    if !result.red_flags.is_empty() {
        md.push_str("\n## Red Flags\n\n");
        for flag in &result.red_flags {
            md.push_str(&format!("- ⚠️ {flag}\n"));
        }
    }

    // ──────────────────────────────────────────────────────────────────────
    // Recommendations
    // ──────────────────────────────────────────────────────────────────────

    let actions = &result.actions;
    md.push_str("\n## Recommendations\n\n");

    if !actions.good_fit_summary.is_empty() {
        md.push_str("### Good Fit\n");
        for item in &actions.good_fit_summary {
            md.push_str(&format!("- ✓ {item}\n"));
        }
    }
    push_section(&mut md, "Gaps to Address", &actions.gaps);
    push_section(
        &mut md,
        "Resume Tailoring Suggestions",
        &actions.resume_tailoring_suggestions,
    );
    if !actions.ats_keywords_to_add.is_empty() {
        md.push_str("\n### ATS Keywords to Consider Adding\n");
        md.push_str(&actions.ats_keywords_to_add.join(", "));
        md.push('\n');
    }

    md.push_str(&format!(
        "\n---\n\nGenerated: {}\nVersion: {}\n",
        result.metadata.timestamp.to_rfc3339(),
        result.metadata.version
    ));

    md
}

fn push_keyword_list(md: &mut String, heading: &str, keywords: &[KeywordMatch]) {
    let matched = keywords.iter().filter(|kw| kw.matched).count();
    md.push_str(&format!("### {heading}\n"));
    md.push_str(&format!("**Matched: {matched}/{}**\n\n", keywords.len()));
    for kw in keywords {
        let status = if kw.matched { "✓" } else { "✗" };
        md.push_str(&format!("- {status} {}\n", kw.term));
    }
}

fn push_section(md: &mut String, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    md.push_str(&format!("\n### {heading}\n"));
    for item in items {
        md.push_str(&format!("- {item}\n"));
    }
}
