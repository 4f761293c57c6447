use crate::error::RuleDbError;
use crate::model::{RuleDatabase, StyleRule};
use regex::Regex;
use std::collections::BTreeSet;
use stylefix_types::RuleCategory;
use tracing::trace;

const UNKNOWN_VERSION: &str = "unknown";

struct Patterns {
    rule: Regex,
    group: Regex,
    version: Regex,
    field: Regex,
}

impl Patterns {
    fn compile() -> Result<Self, RuleDbError> {
        Ok(Self {
            rule: Regex::new(r"^###\s+Rule:\s*(qe-[\w-]+)\s*$")?,
            group: Regex::new(r"<!--\s*GROUP:(\w+)-(START|END)\s*-->")?,
            version: Regex::new(r"^##\s+Version:\s*(.+?)\s*$")?,
            field: Regex::new(
                r"^\*\*(Category|Title|Description|Check for|Examples|Implementation note|Guidance|Exceptions|Reference[^*:]*):\*\*\s*(.*)$",
            )?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Category,
    Title,
    Description,
    CheckFor,
    Examples,
    ImplementationNote,
    Guidance,
    Exceptions,
    Reference,
}

impl Field {
    fn from_label(label: &str) -> Self {
        match label {
            "Category" => Field::Category,
            "Title" => Field::Title,
            "Description" => Field::Description,
            "Check for" => Field::CheckFor,
            "Examples" => Field::Examples,
            "Implementation note" => Field::ImplementationNote,
            "Guidance" => Field::Guidance,
            "Exceptions" => Field::Exceptions,
            // "Reference", "Reference (QuantEcon)", ...
            _ => Field::Reference,
        }
    }
}

/// A rule whose body is still being collected.
struct RuleDraft {
    rule_id: String,
    group: Option<String>,
    sections: Vec<(Field, Vec<String>)>,
}

impl RuleDraft {
    fn new(rule_id: String, group: Option<String>) -> Self {
        Self {
            rule_id,
            group,
            sections: Vec::new(),
        }
    }

    fn push_line(&mut self, line: &str, field: &Regex) {
        if let Some(caps) = field.captures(line) {
            let mut lines = Vec::new();
            let inline = caps[2].trim();
            if !inline.is_empty() {
                lines.push(inline.to_string());
            }
            self.sections.push((Field::from_label(&caps[1]), lines));
            return;
        }
        self.push_text(line);
    }

    /// Text before the first field label is dropped.
    fn push_text(&mut self, line: &str) {
        if let Some((_, lines)) = self.sections.last_mut() {
            lines.push(line.to_string());
        }
    }

    fn section(&self, field: Field) -> Option<String> {
        let (_, lines) = self.sections.iter().find(|(f, _)| *f == field)?;
        let text = lines.join("\n").trim().to_string();
        (!text.is_empty()).then_some(text)
    }

    fn check_for(&self) -> Vec<String> {
        self.sections
            .iter()
            .find(|(f, _)| *f == Field::CheckFor)
            .map(|(_, lines)| {
                lines
                    .iter()
                    .filter_map(|l| {
                        let l = l.trim_start();
                        l.strip_prefix("- ").or_else(|| l.strip_prefix("* "))
                    })
                    .map(|item| item.trim().to_string())
                    .filter(|item| !item.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn into_rule(self) -> Result<StyleRule, RuleDbError> {
        let label = self
            .section(Field::Category)
            .and_then(|c| c.split_whitespace().next().map(str::to_ascii_lowercase))
            .ok_or_else(|| RuleDbError::MissingCategory {
                rule_id: self.rule_id.clone(),
            })?;

        Ok(StyleRule {
            category: RuleCategory::from_label(&label),
            title: self.section(Field::Title).unwrap_or_default(),
            description: self.section(Field::Description).unwrap_or_default(),
            check_for: self.check_for(),
            examples: self.section(Field::Examples).unwrap_or_default(),
            implementation_note: self.section(Field::ImplementationNote),
            guidance: self.section(Field::Guidance),
            exceptions: self.section(Field::Exceptions),
            reference: self.section(Field::Reference),
            label,
            rule_id: self.rule_id,
            group: self.group,
        })
    }
}

fn is_fence(line: &str) -> bool {
    let t = line.trim_start();
    t.starts_with("```") || t.starts_with("~~~")
}

/// A `#` or `##` heading ends the current rule; `###` and deeper belong to it.
fn is_section_heading(line: &str) -> bool {
    line.starts_with('#') && !line.starts_with("###")
}

fn finish(
    draft: Option<RuleDraft>,
    rules: &mut Vec<StyleRule>,
    seen: &mut BTreeSet<String>,
) -> Result<(), RuleDbError> {
    let Some(draft) = draft else {
        return Ok(());
    };
    let rule = draft.into_rule()?;
    if !seen.insert(rule.rule_id.clone()) {
        return Err(RuleDbError::DuplicateRule {
            rule_id: rule.rule_id,
        });
    }
    trace!(rule_id = %rule.rule_id, label = %rule.label, group = ?rule.group, "parsed rule");
    rules.push(rule);
    Ok(())
}

/// Parse the Markdown rule database.
///
/// Structure is only recognised outside fenced code blocks, so examples may contain
/// headings and group markers of their own. A group marker or a `#`/`##` heading ends
/// the rule before it.
pub fn parse_rule_database(text: &str) -> Result<RuleDatabase, RuleDbError> {
    let p = Patterns::compile()?;

    let mut version: Option<String> = None;
    let mut group: Option<String> = None;
    let mut draft: Option<RuleDraft> = None;
    let mut rules = Vec::new();
    let mut seen = BTreeSet::new();
    let mut in_fence = false;

    for line in text.lines() {
        if is_fence(line) {
            in_fence = !in_fence;
            if let Some(d) = draft.as_mut() {
                d.push_text(line);
            }
            continue;
        }
        if in_fence {
            if let Some(d) = draft.as_mut() {
                d.push_text(line);
            }
            continue;
        }

        if let Some(caps) = p.group.captures(line) {
            finish(draft.take(), &mut rules, &mut seen)?;
            let name = caps[1].to_ascii_uppercase();
            if &caps[2] == "START" {
                group = Some(name);
            } else if group.as_deref() == Some(name.as_str()) {
                group = None;
            }
            continue;
        }

        if let Some(caps) = p.rule.captures(line) {
            finish(draft.take(), &mut rules, &mut seen)?;
            draft = Some(RuleDraft::new(caps[1].to_string(), group.clone()));
            continue;
        }

        if is_section_heading(line) {
            finish(draft.take(), &mut rules, &mut seen)?;
            if version.is_none() {
                version = p.version.captures(line).map(|c| c[1].to_string());
            }
            continue;
        }

        // horizontal rules separate rules visually
        if line.trim() == "---" {
            continue;
        }

        if let Some(d) = draft.as_mut() {
            d.push_line(line, &p.field);
        }
    }
    finish(draft.take(), &mut rules, &mut seen)?;

    Ok(RuleDatabase::new(
        version.unwrap_or_else(|| UNKNOWN_VERSION.to_string()),
        rules,
    ))
}
