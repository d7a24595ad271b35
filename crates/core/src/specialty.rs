//! Mapping from the model's specialty vocabulary to directory titles.
//!
//! The extraction model names fields of medicine ("Cardiology"); the doctor
//! directory stores practitioner titles ("Cardiologist"). Lookup is exact
//! match only — unmapped inputs pass through unchanged and the directory's
//! partial, case-insensitive match picks up the slack.

/// Model vocabulary → directory title
const SPECIALTY_MAP: &[(&str, &str)] = &[
    ("Cardiology", "Cardiologist"),
    ("Dermatology", "Dermatologist"),
    ("Endocrinology", "Endocrinologist"),
    ("ENT", "ENT Specialist"),
    ("Gastroenterology", "Gastroenterologist"),
    ("General Medicine", "General Physician"),
    ("Gynecology", "Gynecologist"),
    ("Neurology", "Neurologist"),
    ("Ophthalmology", "Ophthalmologist"),
    ("Orthopedics", "Orthopedist"),
    ("Pediatrics", "Pediatrician"),
    ("Psychiatry", "Psychiatrist"),
    ("Pulmonology", "Pulmonologist"),
    ("Urology", "Urologist"),
];

/// Map a model-produced specialty to the directory vocabulary.
/// Total: unknown inputs are returned unchanged.
pub fn normalize_specialty(specialty: &str) -> &str {
    SPECIALTY_MAP
        .iter()
        .find(|(from, _)| *from == specialty)
        .map(|(_, to)| *to)
        .unwrap_or(specialty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_specialties() {
        assert_eq!(normalize_specialty("Cardiology"), "Cardiologist");
        assert_eq!(normalize_specialty("General Medicine"), "General Physician");
    }

    #[test]
    fn unknown_input_passes_through() {
        assert_eq!(normalize_specialty("Sports Medicine"), "Sports Medicine");
        assert_eq!(normalize_specialty(""), "");
    }

    #[test]
    fn no_case_folding_on_keys() {
        // Exact match only; the directory's substring match handles the rest
        assert_eq!(normalize_specialty("cardiology"), "cardiology");
    }
}
