//! Extraction and validation of the JSON payload embedded in the model's
//! free-text response.
//!
//! Models wrap JSON in markdown fences or prose despite instructions, so
//! the parser takes the span from the first `{` to the last `}` and
//! validates the required fields explicitly instead of trusting a strict
//! deserialize.

use scamshield_core::analysis::{AnalysisResult, Difference, ToneComparison, MAX_RED_FLAGS};

/// Locate the first top-level `{...}` block in `text`.
///
/// Greedy span: first `{` to last `}`. Nested objects inside the payload
/// stay intact; anything after the closing brace is discarded.
pub fn extract_json_block(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Parse and validate the model's text into an [`AnalysisResult`].
///
/// Validation rules:
/// - `original_message` and `safe_version` must be present non-empty strings.
/// - `differences` must be a list; each entry's string fields default to
///   empty rather than failing the whole payload.
/// - `tone_comparison` must carry both `scam` and `official` strings.
/// - A missing or non-numeric `red_flags_fixed` falls back to the number
///   of differences; the final value is clamped to `0..=10`.
pub fn parse_analysis(text: &str) -> Result<AnalysisResult, String> {
    let block = extract_json_block(text).ok_or("no JSON object found in response text")?;

    let value: serde_json::Value =
        serde_json::from_str(block).map_err(|e| format!("embedded JSON did not parse: {e}"))?;

    let original_message = required_string(&value, "original_message")?;
    let safe_version = required_string(&value, "safe_version")?;

    let differences = match value.get("differences") {
        Some(serde_json::Value::Array(items)) => items.iter().map(difference_from).collect(),
        Some(_) => return Err("field 'differences' is not a list".into()),
        None => Vec::new(),
    };

    let tone = value
        .get("tone_comparison")
        .ok_or("missing field 'tone_comparison'")?;
    let tone_comparison = ToneComparison {
        scam: required_string(tone, "scam").map_err(|e| format!("tone_comparison: {e}"))?,
        official: required_string(tone, "official").map_err(|e| format!("tone_comparison: {e}"))?,
    };

    let red_flags_fixed = match value.get("red_flags_fixed").and_then(|v| v.as_u64()) {
        Some(n) => n.min(MAX_RED_FLAGS as u64) as u32,
        None => (differences.len() as u64).min(MAX_RED_FLAGS as u64) as u32,
    };

    let key_learning = value
        .get("key_learning")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();

    Ok(AnalysisResult {
        original_message,
        safe_version,
        differences,
        red_flags_fixed,
        tone_comparison,
        key_learning,
    })
}

fn required_string(value: &serde_json::Value, field: &str) -> Result<String, String> {
    value
        .get(field)
        .and_then(|v| v.as_str())
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
        .ok_or_else(|| format!("missing field '{field}'"))
}

fn difference_from(item: &serde_json::Value) -> Difference {
    let text = |field: &str| {
        item.get(field)
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string()
    };
    Difference {
        aspect: text("aspect"),
        scam: text("scam"),
        official: text("official"),
        status: text("status"),
    }
}
