use crate::model::OracleResponse;
use serde::Deserialize;
use stylefix_types::EditProposal;

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonShape {
    Object(OracleResponse),
    Bare(Vec<EditProposal>),
}

/// Parse a JSON response: either the full object or a bare array of proposals.
pub fn parse_json_response(text: &str) -> Result<OracleResponse, serde_json::Error> {
    Ok(match serde_json::from_str::<JsonShape>(text)? {
        JsonShape::Object(response) => response,
        JsonShape::Bare(violations) => OracleResponse {
            violations,
            ..OracleResponse::default()
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_array_is_accepted() {
        let r = parse_json_response(
            r#"[{"rule_id":"qe-a","current_text":"x","suggested_fix":"y"}]"#,
        )
        .unwrap();
        assert_eq!(r.violations.len(), 1);
        assert_eq!(r.issues_found(), 1);
        assert!(r.summary.is_empty());
    }

    #[test]
    fn object_keeps_claimed_count() {
        let r = parse_json_response(r#"{"summary":"none","issues_found":3,"violations":[]}"#)
            .unwrap();
        assert_eq!(r.issues_found(), 3);
        assert!(r.is_empty());
    }

    #[test]
    fn scalar_is_rejected() {
        assert!(parse_json_response("42").is_err());
    }
}
