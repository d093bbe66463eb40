use crate::core::types::{DiagnosticResult, Severity};
use crate::detect::Detector;
use crate::domain::Domain;
use crate::table::SupportRecord;

#[cfg(feature = "native")]
use tower_lsp::lsp_types::{Diagnostic, DiagnosticSeverity, NumberOrString};

/// `source` field on every diagnostic we publish
pub const DIAGNOSTIC_SOURCE: &str = "baseline";

const DEFAULT_FALLBACK: &str = "May not be supported in all browsers";

/// One warning per occurrence of a non-baseline feature, anchored at the match.
pub fn provide_diagnostics_core(
    detector: &Detector,
    document: &str,
    domain: Domain,
) -> Vec<DiagnosticResult> {
    detector
        .detect_occurrences(document, domain)
        .into_iter()
        .filter_map(|feature| {
            let record = detector.lookup(domain, &feature.feature_id)?;
            if record.is_baseline {
                return None;
            }
            Some(DiagnosticResult {
                range: feature.range?,
                severity: Severity::Warning,
                message: diagnostic_message(&feature.feature_id, record),
                feature_id: feature.feature_id,
            })
        })
        .collect()
}

/// Native-only: diagnostics as tower_lsp types
#[cfg(feature = "native")]
pub fn provide_diagnostics(detector: &Detector, document: &str, domain: Domain) -> Vec<Diagnostic> {
    provide_diagnostics_core(detector, document, domain)
        .into_iter()
        .map(|d| Diagnostic {
            range: d.range.into(),
            severity: Some(DiagnosticSeverity::from(d.severity)),
            code: Some(NumberOrString::String(d.feature_id)),
            source: Some(DIAGNOSTIC_SOURCE.to_string()),
            message: d.message,
            ..Default::default()
        })
        .collect()
}

pub fn diagnostic_message(feature_id: &str, record: &SupportRecord) -> String {
    format!(
        "Non-baseline feature: {}. {}",
        feature_id,
        record.fallback_hint.as_deref().unwrap_or(DEFAULT_FALLBACK)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Range;

    #[test]
    fn test_baseline_feature_produces_no_diagnostics() {
        let detector = Detector::default();
        let diagnostics = provide_diagnostics_core(&detector, "display: grid;", Domain::Css);
        assert!(diagnostics.is_empty(), "Baseline features should not warn");
    }

    #[test]
    fn test_container_query_warns_with_fallback() {
        let detector = Detector::default();
        let diagnostics =
            provide_diagnostics_core(&detector, "@container (min-width: 400px) {}", Domain::Css);

        assert_eq!(diagnostics.len(), 1);
        let d = &diagnostics[0];
        assert_eq!(d.severity, Severity::Warning);
        assert_eq!(d.feature_id, "@container");
        assert_eq!(
            d.message,
            "Non-baseline feature: @container. Use @media queries"
        );
        assert_eq!(d.range, Range::from_coords(0, 0, 0, 10));
    }

    #[test]
    fn test_to_sorted_warns_with_fallback() {
        let detector = Detector::default();
        let diagnostics = provide_diagnostics_core(&detector, "arr.toSorted()", Domain::JavaScript);

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("Use [...array].sort()"));
        assert_eq!(diagnostics[0].range, Range::from_coords(0, 3, 0, 13));
    }

    #[test]
    fn test_upper_case_subgrid_warns() {
        let detector = Detector::default();
        let diagnostics = provide_diagnostics_core(
            &detector,
            ".x { grid-template-rows: SUBGRID; }",
            Domain::Css,
        );

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].feature_id, "subgrid");
        assert_eq!(diagnostics[0].range, Range::from_coords(0, 25, 0, 32));
    }

    #[test]
    fn test_no_patterns_no_diagnostics() {
        let detector = Detector::default();
        assert!(provide_diagnostics_core(&detector, "let x = 1;", Domain::JavaScript).is_empty());
    }

    #[test]
    fn test_one_diagnostic_per_occurrence() {
        let detector = Detector::default();
        let js = "a.toSorted();\nb.toSorted();";
        let diagnostics = provide_diagnostics_core(&detector, js, Domain::JavaScript);
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].range.start.line, 0);
        assert_eq!(diagnostics[1].range.start.line, 1);
    }

    #[test]
    fn test_default_fallback_text() {
        let record = SupportRecord {
            is_baseline: false,
            supported_in: vec![],
            doc_ref: String::new(),
            fallback_hint: None,
        };
        assert_eq!(
            diagnostic_message("x", &record),
            "Non-baseline feature: x. May not be supported in all browsers"
        );
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_lsp_diagnostic_conversion() {
        let detector = Detector::default();
        let diagnostics = provide_diagnostics(&detector, "<div popover=\"auto\">", Domain::Html);

        assert_eq!(diagnostics.len(), 1);
        let d = &diagnostics[0];
        assert_eq!(d.severity, Some(DiagnosticSeverity::WARNING));
        assert_eq!(d.source.as_deref(), Some("baseline"));
        assert_eq!(d.code, Some(NumberOrString::String("popover".to_string())));
        assert_eq!(d.range.start.character, 5);
    }
}
