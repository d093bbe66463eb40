use super::*;

#[test]
fn test_summary_without_non_baseline_is_info() {
    let detector = Detector::default();
    let summary = detector.summarize("display: grid;", Domain::Css);
    assert_eq!(summary.severity(), Severity::Info);
    assert_eq!(
        summary.message(),
        "✅ Detected 1 feature: ✅ 1 baseline, ⚠️ 0 non-baseline"
    );
}

#[test]
fn test_empty_summary_is_info() {
    let detector = Detector::default();
    let summary = detector.summarize("p { color: red }", Domain::Css);
    assert!(summary.features.is_empty());
    assert_eq!(summary.severity(), Severity::Info);
    assert_eq!(
        summary.message(),
        "✅ Detected 0 features: ✅ 0 baseline, ⚠️ 0 non-baseline"
    );
}

#[test]
fn test_summary_with_non_baseline_is_warning() {
    let detector = Detector::default();
    let summary = detector.summarize("a?.b;\nxs.toSorted();\nys.toReversed();", Domain::JavaScript);
    assert_eq!(summary.severity(), Severity::Warning);
    assert_eq!(
        summary.message(),
        "Detected 3 features: ✅ 1 baseline, ⚠️ 2 non-baseline"
    );
}

#[test]
fn test_summary_serializes_camel_case() {
    let detector = Detector::default();
    let summary = detector.summarize("<div popover=\"auto\">", Domain::Html);
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["domain"], "html");
    assert_eq!(json["nonBaselineCount"], 1);
    assert_eq!(json["features"][0], "popover");
}

#[test]
fn test_report_lists_detected_features() {
    let detector = Detector::default();
    let features = detector.detect_unique("<dialog>\n<div popover=x>", Domain::Html);
    let html = render_report_html(&detector, Domain::Html, &features);

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("Detected 2 features in your HTML code"));
    // markup in ids is escaped
    assert!(html.contains("✅ &lt;dialog&gt;"));
    assert!(!html.contains("✅ <dialog>"));
    assert!(html.contains("<span class=\"status status-warning\">Not Baseline</span>"));
    assert!(html.contains("Use JavaScript modal libraries"));
}

#[test]
fn test_quick_reference_groups_by_status() {
    let table = CompatTable::bundled();
    let html = render_quick_reference_html(&table);

    assert!(html.contains("<h2>CSS</h2>"));
    assert!(html.contains("<h2>HTML</h2>"));
    assert!(html.contains("<h2>JavaScript</h2>"));
    assert!(html.contains(
        "⚠️ <strong>Not Baseline:</strong> container-queries, @container, color-mix, subgrid"
    ));
    assert!(html.contains("⚠️ <strong>Not Baseline:</strong> .toSorted(), .toReversed()"));
    assert!(html.contains("loading=&quot;lazy&quot;"));
}

#[test]
fn test_quick_reference_skips_empty_domains() {
    let table = CompatTable::from_json_str(
        r#"{ "css": [ { "id": "gap", "baseline": true, "mdn": "CSS/gap" } ] }"#,
    )
    .unwrap();
    let html = render_quick_reference_html(&table);
    assert!(html.contains("<h2>CSS</h2>"));
    assert!(!html.contains("<h2>HTML</h2>"));
    assert!(!html.contains("Not Baseline"));
}
