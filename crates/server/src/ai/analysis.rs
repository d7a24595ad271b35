//! Shared symptom analysis pipeline.
//!
//! One plain async function used by both the chat intake orchestrator and the
//! direct `POST /analyze` endpoint: run the structured extraction completion,
//! parse it, normalize the specialty vocabulary, and resolve doctors.

use triage_core::{CompletionError, SymptomAnalysisResult, normalize_specialty, parse_analysis};

use super::{CompletionModel, prompts};
use crate::store::DoctorDirectory;

/// Analyze a symptom narrative into a fully-populated result.
///
/// Only the completion call itself can fail. Parsing is total (malformed
/// model output degrades to the zero-value result) and a directory failure
/// degrades to "no doctors found".
pub async fn analyze_symptoms(
    model: &dyn CompletionModel,
    directory: &dyn DoctorDirectory,
    narrative: &str,
) -> Result<SymptomAnalysisResult, CompletionError> {
    let raw = model.complete(&prompts::extraction_prompt(narrative)).await?;

    let extracted = parse_analysis(&raw);

    let specialties: Vec<String> = extracted
        .specialties
        .iter()
        .map(|s| normalize_specialty(s).to_string())
        .collect();

    let doctors = match directory.find_by_specialties(&specialties).await {
        Ok(doctors) => doctors,
        Err(e) => {
            tracing::warn!(error = %e, "Doctor directory lookup failed");
            Vec::new()
        }
    };

    Ok(SymptomAnalysisResult::from_extracted(extracted, doctors))
}
