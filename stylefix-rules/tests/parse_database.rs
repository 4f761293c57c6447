use camino::Utf8PathBuf;
use pretty_assertions::assert_eq;
use stylefix_rules::{CheckCategory, RuleDbError, load_rule_database, parse_rule_database};
use stylefix_types::RuleCategory;

const DATABASE: &str = r#"# Lecture Style Guide

## Version: 0.4.1

Intro text that belongs to no rule.

<!-- GROUP:WRITING-START -->
## Writing

### Rule: qe-writing-001
**Category:** rule
**Title:** Use one sentence per paragraph

**Description:**
Keep paragraphs short.
Each paragraph carries one idea.

**Check for:**
- Paragraphs with several sentences
- Run-on sentences

**Examples:**
**Example 1:**
```markdown
Bad. Two sentences.
```

---

### Rule: qe-writing-002
**Category:** style
**Title:** Prefer active voice

**Description:**
Write in the active voice.

**Guidance:** Rewrite passive constructions where it reads naturally.
<!-- GROUP:WRITING-END -->

<!-- GROUP:MATH-START -->
### Rule: qe-math-001
**Category:** rule
**Title:** Use unicode for Greek letters

**Description:**
Write α instead of $\alpha$ in prose.

**Implementation note:**
Only outside math blocks.

**Exceptions:**
Inside display math.

### Rule: qe-math-002
**Category:** migrate
**Title:** Replace old macros

**Description:**
Migrate legacy macros.
<!-- GROUP:MATH-END -->

## Appendix

Trailing notes.
"#;

#[test]
fn parses_version_and_rules_in_file_order() {
    let db = parse_rule_database(DATABASE).unwrap();
    assert_eq!(db.version(), "0.4.1");
    let ids: Vec<_> = db.rules().iter().map(|r| r.rule_id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["qe-writing-001", "qe-writing-002", "qe-math-001", "qe-math-002"]
    );
}

#[test]
fn parses_rule_fields() {
    let db = parse_rule_database(DATABASE).unwrap();
    let rule = db.get("qe-writing-001").unwrap();
    assert_eq!(rule.label, "rule");
    assert_eq!(rule.category, RuleCategory::Actionable);
    assert_eq!(rule.title, "Use one sentence per paragraph");
    assert_eq!(
        rule.description,
        "Keep paragraphs short.\nEach paragraph carries one idea."
    );
    assert_eq!(
        rule.check_for,
        vec!["Paragraphs with several sentences", "Run-on sentences"]
    );
    assert!(rule.examples.starts_with("**Example 1:**"));
    assert!(rule.examples.ends_with("```"));
    assert_eq!(rule.group.as_deref(), Some("WRITING"));
    assert_eq!(rule.guidance, None);

    let style = db.get("qe-writing-002").unwrap();
    assert_eq!(style.category, RuleCategory::Advisory);
    assert_eq!(
        style.guidance.as_deref(),
        Some("Rewrite passive constructions where it reads naturally.")
    );

    let math = db.get("qe-math-001").unwrap();
    assert_eq!(
        math.implementation_note.as_deref(),
        Some("Only outside math blocks.")
    );
    assert_eq!(math.exceptions.as_deref(), Some("Inside display math."));
}

#[test]
fn migrate_rules_are_advisory() {
    let db = parse_rule_database(DATABASE).unwrap();
    let rule = db.get("qe-math-002").unwrap();
    assert_eq!(rule.label, "migrate");
    assert!(!rule.is_actionable());
    assert_eq!(rule.description, "Migrate legacy macros.");
}

#[test]
fn groups_and_category_selection() {
    let db = parse_rule_database(DATABASE).unwrap();
    assert_eq!(db.group_names().collect::<Vec<_>>(), vec!["MATH", "WRITING"]);

    let selected: Vec<_> = db
        .rules_for_categories(&[CheckCategory::Math, CheckCategory::Writing])
        .into_iter()
        .map(|r| r.rule_id.as_str())
        .collect();
    assert_eq!(
        selected,
        vec!["qe-writing-001", "qe-writing-002", "qe-math-001", "qe-math-002"]
    );

    let math_only: Vec<_> = db
        .rules_for_categories(&[CheckCategory::Math])
        .into_iter()
        .map(|r| r.rule_id.as_str())
        .collect();
    assert_eq!(math_only, vec!["qe-math-001", "qe-math-002"]);

    assert!(db.rules_for_categories(&[CheckCategory::Links]).is_empty());
}

#[test]
fn actionable_rules_filter_on_label() {
    let db = parse_rule_database(DATABASE).unwrap();
    let ids: Vec<_> = db
        .actionable_rules()
        .into_iter()
        .map(|r| r.rule_id.as_str())
        .collect();
    assert_eq!(ids, vec!["qe-writing-001", "qe-math-001"]);
}

#[test]
fn duplicate_rule_ids_are_rejected() {
    let text = "### Rule: qe-a-001\n**Category:** rule\n**Title:** A\n\n### Rule: qe-a-001\n**Category:** style\n**Title:** A again\n";
    let err = parse_rule_database(text).unwrap_err();
    assert!(matches!(err, RuleDbError::DuplicateRule { ref rule_id } if rule_id == "qe-a-001"));
}

#[test]
fn serializes_for_listing() {
    let db = parse_rule_database(DATABASE).unwrap();
    let value = serde_json::to_value(db.get("qe-math-002").unwrap()).unwrap();
    assert_eq!(value["category"], "advisory");
    assert_eq!(value["group"], "MATH");
    assert!(value.get("guidance").is_none());
}

#[test]
fn load_reads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = Utf8PathBuf::from_path_buf(dir.path().join("style-guide-database.md")).unwrap();
    std::fs::write(&path, DATABASE).unwrap();

    let db = load_rule_database(&path).unwrap();
    assert_eq!(db.rules().len(), 4);
}

#[test]
fn load_reports_missing_file_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = Utf8PathBuf::from_path_buf(dir.path().join("absent.md")).unwrap();

    let err = load_rule_database(&path).unwrap_err();
    assert!(format!("{err:#}").contains("absent.md"));
}
