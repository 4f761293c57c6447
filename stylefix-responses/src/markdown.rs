use crate::model::OracleResponse;
use regex::Regex;
use stylefix_types::EditProposal;
use tracing::debug;

struct Patterns {
    heading: Regex,
    violation: Regex,
    field: Regex,
    count: Regex,
}

impl Patterns {
    fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            heading: Regex::new(r"^##\s+(Summary|Issues Found|Violations|Corrected Content)\s*$")?,
            violation: Regex::new(r"^###\s+Violation\s+\d+\s*:\s*(\S+)(?:\s+-\s+(.*))?$")?,
            field: Regex::new(r"^\s*[-*]\s+\*\*([^*]+?):\*\*\s*(.*)$")?,
            count: Regex::new(r"\d+")?,
        })
    }

    fn is_boundary(&self, line: &str) -> bool {
        self.heading.is_match(line) || self.violation.is_match(line) || self.field.is_match(line)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Preamble,
    Summary,
    IssuesFound,
    Violations,
    Corrected,
}

#[derive(Default)]
struct ViolationDraft {
    rule_id: String,
    title: Option<String>,
    fields: Vec<(String, Vec<String>)>,
}

impl ViolationDraft {
    fn field(&self, label: &str) -> Option<String> {
        let (_, lines) = self.fields.iter().find(|(l, _)| l == label)?;
        let value = field_value(lines);
        (!value.is_empty()).then_some(value)
    }

    fn into_proposal(self) -> EditProposal {
        EditProposal {
            current_text: self.field("current text").map(strip_inline_code).unwrap_or_default(),
            suggested_fix: self.field("suggested fix").map(strip_inline_code).unwrap_or_default(),
            description: self.field("description"),
            explanation: self.field("explanation"),
            location: self.field("location"),
            category: self.field("category"),
            severity: self.field("severity"),
            rule_title: self.title,
            rule_id: self.rule_id,
        }
    }
}

/// Where the parser stands inside a fenced field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FencedValue {
    Body,
    /// The last non-blank line was a fence other than the opening one.
    AfterFence,
}

fn is_fence(line: &str) -> bool {
    let t = line.trim_start();
    t.starts_with("```") || t.starts_with("~~~")
}

/// Value of a field from the lines collected after its label.
///
/// When the value opens with a fence it runs to the last fence line, so fences nested
/// inside it survive. A fence that never closes yields an empty value. Otherwise the lines
/// are joined and trimmed.
fn field_value(lines: &[String]) -> String {
    let first = lines.iter().position(|l| !l.trim().is_empty());
    let last_fence = lines.iter().rposition(|l| is_fence(l));
    match (first, last_fence) {
        (Some(open), Some(close)) if is_fence(&lines[open]) && close > open => {
            lines[open + 1..close].join("\n")
        }
        (Some(open), _) if is_fence(&lines[open]) => String::new(),
        _ => lines.join("\n").trim().to_string(),
    }
}

/// `` `x` `` -> `x` for single-line values written as inline code.
fn strip_inline_code(value: String) -> String {
    let inner = value
        .strip_prefix('`')
        .and_then(|v| v.strip_suffix('`'))
        .filter(|v| !v.is_empty() && !v.contains('`') && !v.contains('\n'));
    match inner {
        Some(v) => v.to_string(),
        None => value,
    }
}

/// Parse a Markdown oracle response.
///
/// Anything that does not look like the expected layout is ignored, so malformed
/// text yields an empty response rather than an error.
pub fn parse_markdown_response(text: &str) -> OracleResponse {
    let p = match Patterns::compile() {
        Ok(p) => p,
        Err(err) => {
            debug!(error = %err, "response patterns failed to compile");
            return OracleResponse::default();
        }
    };

    let mut section = Section::Preamble;
    let mut summary: Vec<&str> = Vec::new();
    let mut issues: Vec<&str> = Vec::new();
    let mut corrected: Vec<String> = Vec::new();
    let mut violations: Vec<EditProposal> = Vec::new();
    let mut current: Option<ViolationDraft> = None;
    let mut fenced: Option<FencedValue> = None;

    for line in text.lines() {
        if section == Section::Corrected {
            corrected.push(line.to_string());
            continue;
        }

        // A fenced value may quote headings, violation headers and field labels; it only
        // closes on a fence line followed by one of them.
        if let Some(state) = fenced {
            if state == FencedValue::Body || !p.is_boundary(line) {
                if !line.trim().is_empty() {
                    fenced = Some(if is_fence(line) {
                        FencedValue::AfterFence
                    } else {
                        FencedValue::Body
                    });
                }
                if let Some((_, lines)) = current.as_mut().and_then(|d| d.fields.last_mut()) {
                    lines.push(line.to_string());
                }
                continue;
            }
            fenced = None;
        }

        if let Some(caps) = p.heading.captures(line) {
            if let Some(v) = current.take() {
                violations.push(v.into_proposal());
            }
            section = match &caps[1] {
                "Summary" => Section::Summary,
                "Issues Found" => Section::IssuesFound,
                "Violations" => Section::Violations,
                _ => Section::Corrected,
            };
            continue;
        }

        if let Some(caps) = p.violation.captures(line) {
            if let Some(v) = current.take() {
                violations.push(v.into_proposal());
            }
            current = Some(ViolationDraft {
                rule_id: caps[1].to_string(),
                title: caps
                    .get(2)
                    .map(|m| m.as_str().trim().to_string())
                    .filter(|t| !t.is_empty()),
                fields: Vec::new(),
            });
            section = Section::Violations;
            continue;
        }

        match section {
            Section::Summary => summary.push(line),
            Section::IssuesFound => issues.push(line),
            Section::Violations => {
                let Some(draft) = current.as_mut() else {
                    continue;
                };
                if let Some(caps) = p.field.captures(line) {
                    let mut lines = Vec::new();
                    let inline = caps[2].trim();
                    if !inline.is_empty() {
                        lines.push(inline.to_string());
                        if is_fence(inline) {
                            fenced = Some(FencedValue::Body);
                        }
                    }
                    draft.fields.push((caps[1].trim().to_ascii_lowercase(), lines));
                } else if let Some((_, lines)) = draft.fields.last_mut() {
                    if is_fence(line) && lines.iter().all(|l| l.trim().is_empty()) {
                        fenced = Some(FencedValue::Body);
                    }
                    lines.push(line.to_string());
                }
            }
            Section::Preamble | Section::Corrected => {}
        }
    }
    if let Some(v) = current.take() {
        violations.push(v.into_proposal());
    }

    let issues_found = issues
        .iter()
        .find_map(|l| p.count.find(l))
        .and_then(|m| m.as_str().parse::<usize>().ok());

    let corrected_content = Some(field_value(&corrected)).filter(|c| !c.trim().is_empty());

    debug!(
        violations = violations.len(),
        issues_found = ?issues_found,
        corrected = corrected_content.is_some(),
        "parsed markdown response"
    );

    OracleResponse {
        schema: None,
        summary: summary.join("\n").trim().to_string(),
        issues_found,
        violations,
        corrected_content,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_text_is_empty() {
        let r = parse_markdown_response("This is not a properly formatted response");
        assert!(r.violations.is_empty());
        assert_eq!(r.issues_found(), 0);
        assert!(r.summary.is_empty());
        assert_eq!(r.corrected_content, None);
    }

    #[test]
    fn inline_code_values_are_unwrapped() {
        let text = "### Violation 1: qe-math-001 - Greek letters\n- **Current text:** `$\\alpha$`\n- **Suggested fix:** `α`\n";
        let r = parse_markdown_response(text);
        assert_eq!(r.violations[0].current_text, "$\\alpha$");
        assert_eq!(r.violations[0].suggested_fix, "α");
    }

    #[test]
    fn field_value_keeps_nested_fences() {
        let lines: Vec<String> = ["```", "```python", "x = 1", "```", "```", ""]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(field_value(&lines), "```python\nx = 1\n```");
    }

    #[test]
    fn unclosed_fence_is_an_empty_value() {
        let lines: Vec<String> = ["```", "x = 1"].iter().map(|s| s.to_string()).collect();
        assert_eq!(field_value(&lines), "");
    }

    #[test]
    fn field_label_inside_fence_is_content() {
        let text = "### Violation 1: qe-x-001\n- **Current text:**\n```\n- **Note:** keep me\n```\n- **Severity:** minor\n";
        let r = parse_markdown_response(text);
        assert_eq!(r.violations[0].current_text, "- **Note:** keep me");
        assert_eq!(r.violations[0].severity.as_deref(), Some("minor"));
    }

    #[test]
    fn violation_without_title() {
        let r = parse_markdown_response("### Violation 1: qe-x-001\n- **Severity:** minor\n");
        assert_eq!(r.violations[0].rule_id, "qe-x-001");
        assert_eq!(r.violations[0].rule_title, None);
        assert_eq!(r.violations[0].severity.as_deref(), Some("minor"));
    }
}
