//! triage-core: Shared domain types and pure logic for the symptom triage server
//!
//! This crate provides the analysis value objects, the structured extraction
//! parser, and the specialty vocabulary mapping used across the server.

pub mod analysis;
pub mod error;
pub mod extraction;
pub mod specialty;

pub use analysis::{DoctorRecord, PossibleCondition, SymptomAnalysisResult};
pub use error::CompletionError;
pub use extraction::{ExtractedAnalysis, parse_analysis};
pub use specialty::normalize_specialty;
