//! Response interpretation - raw model text to a typed Itinerary
//!
//! The generation service is asked for bare JSON but may wrap the
//! payload in prose or markdown fencing. The interpreter extracts the
//! outermost balanced object span, parses it, and enforces structural
//! conformance. It never yields a partial itinerary and never attempts
//! semantic correction (URL reachability, distance plausibility).

use thiserror::Error;
use tracing::debug;

use crate::domain::Itinerary;

/// Structural failures while interpreting response text
#[derive(Debug, Error)]
pub enum InterpretError {
    #[error("no JSON object found in response text")]
    NoJson,

    #[error("response does not conform to the itinerary schema: {0}")]
    Schema(#[from] serde_json::Error),

    #[error("itinerary contains no days")]
    EmptyDays,
}

/// Extract the outermost balanced `{...}` span from text
///
/// Scans from the first `{` tracking brace depth, honoring JSON string
/// literals and escapes so braces inside strings don't miscount.
/// Returns None when no balanced object exists.
pub fn extract_json_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Parse raw response text into a validated Itinerary
///
/// Fails with no partial object on any structural violation: absent
/// JSON, schema mismatch (including unknown activity categories), or an
/// empty days sequence. Duplicate day numbers are de-duplicated
/// deterministically, first occurrence wins, because day numbers key
/// the presentation state.
pub fn interpret(raw: &str) -> Result<Itinerary, InterpretError> {
    debug!(raw_len = raw.len(), "interpret: called");

    let span = extract_json_span(raw).ok_or(InterpretError::NoJson)?;
    let mut itinerary: Itinerary = serde_json::from_str(span)?;

    if itinerary.days.is_empty() {
        return Err(InterpretError::EmptyDays);
    }

    let mut seen = Vec::with_capacity(itinerary.days.len());
    itinerary.days.retain(|plan| {
        if seen.contains(&plan.day) {
            debug!(day = plan.day, "interpret: dropping duplicate day");
            false
        } else {
            seen.push(plan.day);
            true
        }
    });

    debug!(days = itinerary.days.len(), "interpret: itinerary validated");
    Ok(itinerary)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{
        "destination": "Kyoto",
        "tripTitle": "Kyoto in Three Days",
        "duration": "3 Days",
        "budgetLevel": "Moderate",
        "overallVibe": "Temples and tea houses",
        "startingLocation": "Kyoto Station",
        "days": [
            {
                "day": 1,
                "title": "Southern Higashiyama",
                "summary": "Classic temples",
                "activities": [
                    {
                        "time": "09:00",
                        "location": "Kiyomizu-dera",
                        "description": "Morning temple visit",
                        "type": "sightseeing",
                        "searchUrl": "https://www.kiyomizudera.or.jp/",
                        "mapsUrl": "https://maps.google.com/?q=Kiyomizu-dera",
                        "distanceFromPrevious": "3km / 15m bus"
                    }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_bare_json_parses() {
        let itinerary = interpret(VALID).expect("bare JSON must parse");
        assert_eq!(itinerary.destination, "Kyoto");
        assert_eq!(itinerary.days.len(), 1);
    }

    #[test]
    fn test_fenced_json_parses_identically() {
        let wrapped = format!("Sure! Here is your itinerary:\n```json\n{}\n```\nEnjoy your trip!", VALID);
        let from_wrapped = interpret(&wrapped).expect("fenced JSON must parse");
        let from_bare = interpret(VALID).expect("bare JSON must parse");
        assert_eq!(from_wrapped, from_bare);
    }

    #[test]
    fn test_braces_inside_strings_do_not_miscount() {
        let tricky = VALID.replace("Temples and tea houses", "Braces {in} \\\"strings\\\" stay put");
        let text = format!("prose {}", tricky);
        assert!(interpret(&text).is_ok());
    }

    #[test]
    fn test_no_json_rejected() {
        let err = interpret("I cannot help with that.").expect_err("prose must fail");
        assert!(matches!(err, InterpretError::NoJson));
    }

    #[test]
    fn test_unbalanced_json_rejected() {
        let truncated = &VALID[..VALID.len() - 10];
        let err = interpret(truncated).expect_err("truncated JSON must fail");
        assert!(matches!(err, InterpretError::NoJson));
    }

    #[test]
    fn test_missing_days_rejected() {
        let json = r#"{"destination": "Kyoto", "tripTitle": "Kyoto"}"#;
        let err = interpret(json).expect_err("missing days must fail");
        assert!(matches!(err, InterpretError::Schema(_)));
    }

    #[test]
    fn test_empty_days_rejected() {
        let json = r#"{"destination": "Kyoto", "tripTitle": "Kyoto", "days": []}"#;
        let err = interpret(json).expect_err("empty days must fail");
        assert!(matches!(err, InterpretError::EmptyDays));
    }

    #[test]
    fn test_unknown_category_rejected_not_defaulted() {
        let json = VALID.replace("\"sightseeing\"", "\"shopping\"");
        let err = interpret(&json).expect_err("unknown category must fail");
        assert!(matches!(err, InterpretError::Schema(_)));
    }

    #[test]
    fn test_duplicate_days_first_occurrence_wins() {
        let json = r#"{
            "destination": "Kyoto",
            "tripTitle": "Kyoto",
            "days": [
                {"day": 1, "title": "First", "activities": []},
                {"day": 1, "title": "Shadowed", "activities": []},
                {"day": 2, "title": "Second", "activities": []}
            ]
        }"#;
        let itinerary = interpret(json).expect("duplicates are de-duplicated, not fatal");
        assert_eq!(itinerary.days.len(), 2);
        assert_eq!(itinerary.days[0].title, "First");
        assert_eq!(itinerary.days[1].title, "Second");
    }

    #[test]
    fn test_extract_span_is_outermost() {
        let text = "noise {\"a\": {\"b\": 1}} trailing {\"c\": 2}";
        assert_eq!(extract_json_span(text), Some("{\"a\": {\"b\": 1}}"));
    }
}
