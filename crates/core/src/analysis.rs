use serde::{Deserialize, Serialize};

use crate::extraction::ExtractedAnalysis;

/// Recommendation used whenever the model did not produce one
pub const DEFAULT_RECOMMENDATION: &str = "Consult a doctor.";

/// A doctor record as returned by the directory lookup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DoctorRecord {
    pub name: String,
    pub specialty: String,
    pub contact: String,
    pub location: String,
}

/// A possible condition suggested by the extraction model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PossibleCondition {
    #[serde(default)]
    pub name: String,

    /// Model-produced probability string, e.g. "60%"
    #[serde(default)]
    pub probability: String,

    #[serde(default)]
    pub description: String,
}

/// The full analysis attached to the summary turn of a conversation.
///
/// Every field has a defined default — downstream consumers never see a
/// partially undefined result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SymptomAnalysisResult {
    #[serde(default)]
    pub identified_symptoms: Vec<String>,

    #[serde(default)]
    pub summary: String,

    #[serde(default)]
    pub possible_conditions: Vec<PossibleCondition>,

    #[serde(default = "default_recommendation")]
    pub recommended_action: String,

    #[serde(default)]
    pub doctors: Vec<DoctorRecord>,
}

fn default_recommendation() -> String {
    DEFAULT_RECOMMENDATION.to_string()
}

impl SymptomAnalysisResult {
    /// Combine the extraction output with the doctors resolved from its
    /// specialty list.
    pub fn from_extracted(extracted: ExtractedAnalysis, doctors: Vec<DoctorRecord>) -> Self {
        Self {
            identified_symptoms: extracted.symptoms,
            summary: extracted.summary,
            possible_conditions: extracted.possible_conditions,
            recommended_action: extracted.recommended_action,
            doctors,
        }
    }
}
