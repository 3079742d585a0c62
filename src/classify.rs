//! Completion classification — decides whether an agent run confirmed
//! every required sub-task.
//!
//! The agent is instructed to emit an exact confirmation line after each
//! irreversible step (labeling the email, storing the candidate row). The
//! classifier checks that *all* of those lines appear in the raw output.
//! This is conjunctive, case-sensitive substring containment over the full
//! concatenated output — no parsing, no schema.

/// Confirmation the email was labeled.
///
/// The same constant is interpolated into the system prompt, so the text
/// the agent is told to emit and the text scanned for cannot drift apart.
pub const LABEL_CONFIRMED_MARKER: &str =
    r#"Email successfully labeled as "Wellfound Candidate found""#;

/// Confirmation the candidate row was stored.
pub const STORAGE_CONFIRMED_MARKER: &str = "Candidate details successfully stored in Airtable";

/// Markers that must all be present for a run to count as confirmed.
pub const REQUIRED_MARKERS: &[&str] = &[LABEL_CONFIRMED_MARKER, STORAGE_CONFIRMED_MARKER];

/// Outcome of classifying one agent response.
#[derive(Debug, Clone)]
pub struct CompletionResult {
    /// True iff every required marker appeared in the output.
    pub succeeded: bool,
    /// Markers that were not found (empty when `succeeded`).
    pub missing: Vec<&'static str>,
}

/// Scans agent output for the required confirmation markers.
#[derive(Debug, Clone)]
pub struct CompletionClassifier {
    markers: &'static [&'static str],
}

impl CompletionClassifier {
    pub fn new() -> Self {
        Self {
            markers: REQUIRED_MARKERS,
        }
    }

    /// Classify one raw agent response. Empty output never succeeds.
    pub fn classify(&self, raw_output: &str) -> CompletionResult {
        let missing: Vec<&'static str> = self
            .markers
            .iter()
            .filter(|marker| !raw_output.contains(*marker))
            .copied()
            .collect();

        CompletionResult {
            succeeded: missing.is_empty(),
            missing,
        }
    }
}

impl Default for CompletionClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output_with(markers: &[&str]) -> String {
        let mut out = String::from("Extracted candidate details for the message.\n");
        for m in markers {
            out.push_str(m);
            out.push('\n');
        }
        out.push_str("Score: 70/100");
        out
    }

    #[test]
    fn succeeds_when_all_markers_present() {
        let classifier = CompletionClassifier::new();
        let result = classifier.classify(&output_with(REQUIRED_MARKERS));
        assert!(result.succeeded);
        assert!(result.missing.is_empty());
    }

    #[test]
    fn fails_when_label_marker_missing() {
        let classifier = CompletionClassifier::new();
        let result = classifier.classify(&output_with(&[STORAGE_CONFIRMED_MARKER]));
        assert!(!result.succeeded);
        assert_eq!(result.missing, vec![LABEL_CONFIRMED_MARKER]);
    }

    #[test]
    fn fails_when_storage_marker_missing() {
        let classifier = CompletionClassifier::new();
        let result = classifier.classify(&output_with(&[LABEL_CONFIRMED_MARKER]));
        assert!(!result.succeeded);
        assert_eq!(result.missing, vec![STORAGE_CONFIRMED_MARKER]);
    }

    #[test]
    fn fails_on_empty_output() {
        let classifier = CompletionClassifier::new();
        let result = classifier.classify("");
        assert!(!result.succeeded);
        assert_eq!(result.missing.len(), REQUIRED_MARKERS.len());
    }

    #[test]
    fn containment_is_case_sensitive() {
        let classifier = CompletionClassifier::new();
        let lowered = output_with(REQUIRED_MARKERS).to_lowercase();
        assert!(!classifier.classify(&lowered).succeeded);
    }

    #[test]
    fn markers_embedded_in_surrounding_text_still_match() {
        let classifier = CompletionClassifier::new();
        let out = format!(
            "Step 3 done: {LABEL_CONFIRMED_MARKER}. Step 4 done: {STORAGE_CONFIRMED_MARKER}."
        );
        assert!(classifier.classify(&out).succeeded);
    }
}
