//! Prompt text and the summary-ready trigger predicate

/// Exact sentinel the intake prompt instructs the model to emit once it has
/// gathered enough information. The trigger check below keys off its prefix.
pub const SUMMARY_SENTINEL: &str =
    "Got it. Based on what you've shared, here's what I understand about your symptoms:";

/// Anchored prefix used by the trigger check, lowercased for the
/// case-insensitive comparison
const SENTINEL_PREFIX: &str = "got it. based on what you've shared";

const INTAKE_SYSTEM_PROMPT: &str = r#"You are a medical intake assistant helping a patient describe their symptoms.

Rules:
- Acknowledge every input from the patient.
- Ask exactly one focused follow-up question per turn, targeting: symptom type, location, duration, severity on a scale of 1-10, associated symptoms, and triggers or relief factors.
- Continue asking until you have complete information about the patient's symptoms.
- Once the information is complete, and only then, begin your reply with exactly: "Got it. Based on what you've shared, here's what I understand about your symptoms:" followed by your summary.
- Never recommend doctors or treatment before that summary.
- If the patient asks for a doctor recommendation before you have enough information, reply: "I want to make sure I fully understand your symptoms before suggesting a doctor. Could you tell me a bit more first?""#;

const EXTRACTION_SYSTEM_PROMPT: &str = r#"You are a medical symptom analyzer. Given a patient's symptom description, return ONLY a JSON object with exactly these keys:
- "symptoms": array of strings naming each identified symptom
- "possibleConditions": array of objects with "name", "probability" (a percentage string like "60%"), and "description"
- "specialties": array of medical specialty names (e.g. "Cardiology", "Dermatology") relevant to the symptoms
- "recommendedAction": a short recommendation string

Return ONLY the JSON object, no other text."#;

/// Detect the summary sentinel: trimmed, case-insensitive, anchored at the
/// start of the reply. A reply merely containing the phrase mid-string must
/// not trigger analysis. Fragile by design — kept behind this predicate so a
/// sturdier classifier can replace it without touching the orchestrator.
pub fn is_summary_ready(text: &str) -> bool {
    text.trim().to_lowercase().starts_with(SENTINEL_PREFIX)
}

/// Compose the intake prompt: persona rules plus the full transcript
pub fn intake_prompt(transcript: &str) -> String {
    format!("{INTAKE_SYSTEM_PROMPT}\n\nConversation so far:\n{transcript}")
}

/// Compose the structured extraction prompt for a symptom narrative
pub fn extraction_prompt(narrative: &str) -> String {
    format!("{EXTRACTION_SYSTEM_PROMPT}\n\nPatient's symptom description:\n{narrative}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_at_start_triggers() {
        assert!(is_summary_ready(SUMMARY_SENTINEL));
        assert!(is_summary_ready(&format!("{SUMMARY_SENTINEL} You reported...")));
    }

    #[test]
    fn leading_whitespace_is_trimmed() {
        assert!(is_summary_ready(&format!("  \n{SUMMARY_SENTINEL}")));
    }

    #[test]
    fn match_is_case_insensitive() {
        assert!(is_summary_ready("GOT IT. BASED ON WHAT YOU'VE SHARED, here it is:"));
        assert!(is_summary_ready("got it. based on what you've shared..."));
    }

    #[test]
    fn mid_string_sentinel_does_not_trigger() {
        assert!(!is_summary_ready(&format!("As I said: {SUMMARY_SENTINEL}")));
    }

    #[test]
    fn ordinary_replies_do_not_trigger() {
        assert!(!is_summary_ready("Where exactly is the pain located?"));
        assert!(!is_summary_ready("Got it, thanks. How long has this lasted?"));
        assert!(!is_summary_ready(""));
    }
}
