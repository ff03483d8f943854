use lazy_static::lazy_static;
use regex::Regex;

use super::AdvisoryResult;

lazy_static! {
    static ref CODE_FENCE: Regex = Regex::new(r"```(?:json)?").unwrap();
    static ref LEADING_BULLET: Regex = Regex::new(r"(?m)^[*-] +").unwrap();
    static ref BLANK_RUN: Regex = Regex::new(r"\n\s*\n").unwrap();
}

/// Normalize a raw model reply.
///
/// Code fences are stripped first. If the text holds a `{ ... }` span (first `{`
/// to last `}`) that parses as JSON, the parsed object is returned. If the span
/// does not parse, the fence-stripped text is returned untouched. Without any
/// span the reply is treated as prose and cleaned of bold markers, leading
/// bullet markers and blank-line runs.
pub fn normalize_reply(raw: &str) -> AdvisoryResult {
    let cleaned = CODE_FENCE.replace_all(raw, "").trim().to_string();

    if let (Some(start), Some(end)) = (cleaned.find('{'), cleaned.rfind('}')) {
        if start < end {
            return match serde_json::from_str::<serde_json::Value>(&cleaned[start..=end]) {
                Ok(value) => {
                    log::debug!("Model reply parsed as structured JSON");
                    AdvisoryResult::Structured(value)
                }
                Err(e) => {
                    log::debug!("Model reply braces did not parse as JSON ({}); keeping text", e);
                    AdvisoryResult::Text(cleaned)
                }
            };
        }
    }

    AdvisoryResult::Text(clean_prose(&cleaned))
}

fn clean_prose(text: &str) -> String {
    let without_bold = text.replace("**", "");
    let without_bullets = LEADING_BULLET.replace_all(&without_bold, "");
    BLANK_RUN
        .replace_all(&without_bullets, "\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fenced_json_is_parsed() {
        let result = normalize_reply("```json\n{\"a\":1}\n```");
        assert_eq!(result, AdvisoryResult::Structured(json!({"a": 1})));
    }

    #[test]
    fn test_untagged_fence_is_parsed() {
        let result = normalize_reply("```\n{\"cropName\": \"Rice\"}\n```");
        assert_eq!(
            result,
            AdvisoryResult::Structured(json!({"cropName": "Rice"}))
        );
    }

    #[test]
    fn test_json_with_surrounding_prose() {
        let result = normalize_reply("Here is the plan:\n{\"weeks\": 12}\nGood luck!");
        assert_eq!(result, AdvisoryResult::Structured(json!({"weeks": 12})));
    }

    #[test]
    fn test_bullets_stripped_from_prose() {
        let result = normalize_reply("Summary:\n- item one\n- item two");
        assert_eq!(
            result,
            AdvisoryResult::Text("Summary:\nitem one\nitem two".to_string())
        );
    }

    #[test]
    fn test_bold_and_blank_runs_cleaned() {
        let result = normalize_reply("**Soil** is loamy.\n\n\n* Add compost\n\nWater weekly");
        assert_eq!(
            result,
            AdvisoryResult::Text("Soil is loamy.\nAdd compost\nWater weekly".to_string())
        );
    }

    #[test]
    fn test_unparsable_braces_keep_cleaned_text_verbatim() {
        let raw = "```\n**Note** {not json} - keep\n```";
        let result = normalize_reply(raw);
        // Prose cleanup is skipped on this path.
        assert_eq!(
            result,
            AdvisoryResult::Text("**Note** {not json} - keep".to_string())
        );
    }

    #[test]
    fn test_reversed_braces_are_prose() {
        let result = normalize_reply("} odd {\n- item");
        assert_eq!(result, AdvisoryResult::Text("} odd {\nitem".to_string()));
    }

    #[test]
    fn test_markdown_headings_and_tables_survive() {
        let raw = "# Report\n| Crop | Yield |\n| Rice | 4t |";
        assert_eq!(normalize_reply(raw), AdvisoryResult::Text(raw.to_string()));
    }
}
