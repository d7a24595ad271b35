//! Structured extraction of a symptom analysis from raw model text.
//!
//! The model is asked to return a JSON object, but replies routinely wrap it
//! in prose. The contract here is deliberately crude: take the substring from
//! the first `{` to the last `}` (greedy, not balance-aware) and try to parse
//! it. Anything that doesn't survive that — no braces, broken JSON, missing
//! fields — collapses to the zero-value result. This function never fails.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::analysis::{DEFAULT_RECOMMENDATION, PossibleCondition};

/// Keys a usable extraction must carry. A parsed object missing any of them
/// is treated the same as unparseable output. `recommendedAction` is not
/// among them: when absent it takes the fixed fallback instead.
const REQUIRED_KEYS: [&str; 3] = ["symptoms", "possibleConditions", "specialties"];

/// Raw extraction output, before specialties are resolved to doctors
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedAnalysis {
    #[serde(default)]
    pub symptoms: Vec<String>,

    #[serde(default)]
    pub summary: String,

    #[serde(default)]
    pub possible_conditions: Vec<PossibleCondition>,

    #[serde(default)]
    pub specialties: Vec<String>,

    #[serde(default = "default_recommendation")]
    pub recommended_action: String,
}

fn default_recommendation() -> String {
    DEFAULT_RECOMMENDATION.to_string()
}

impl ExtractedAnalysis {
    /// The fallback returned for any malformed input
    pub fn zero_value() -> Self {
        Self {
            symptoms: Vec::new(),
            summary: String::new(),
            possible_conditions: Vec::new(),
            specialties: Vec::new(),
            recommended_action: DEFAULT_RECOMMENDATION.to_string(),
        }
    }
}

/// Parse an analysis out of raw model text. Total: malformed input of any
/// kind yields [`ExtractedAnalysis::zero_value`].
pub fn parse_analysis(raw: &str) -> ExtractedAnalysis {
    extract_span(raw)
        .and_then(parse_object)
        .unwrap_or_else(ExtractedAnalysis::zero_value)
}

/// The first-`{`-to-last-`}` span. Two separate JSON fragments in one reply
/// produce an invalid merged span here; that is observed behavior we keep.
fn extract_span(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&raw[start..=end])
}

fn parse_object(span: &str) -> Option<ExtractedAnalysis> {
    let value: JsonValue = serde_json::from_str(span).ok()?;
    let object = value.as_object()?;
    if REQUIRED_KEYS.iter().any(|key| !object.contains_key(*key)) {
        return None;
    }
    serde_json::from_value(value).ok()
}
