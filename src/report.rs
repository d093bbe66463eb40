//! Check summaries and the HTML report panels.

use std::fmt::Write;

use serde::Serialize;

use crate::core::types::Severity;
use crate::detect::{DetectedFeature, Detector};
use crate::domain::Domain;
use crate::table::{CompatTable, Feature};
use crate::utils::escape_html;

#[cfg(test)]
mod tests;

/// Follow-up action offered when a check finds non-baseline features.
pub const VIEW_DETAILS_ACTION: &str = "View Details";

/// Counts for one check of one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckSummary {
    pub domain: Domain,
    pub features: Vec<String>,
    pub baseline_count: usize,
    pub non_baseline_count: usize,
}

impl CheckSummary {
    pub fn new(detector: &Detector, domain: Domain, features: &[DetectedFeature]) -> Self {
        let mut summary = CheckSummary {
            domain,
            features: Vec::with_capacity(features.len()),
            baseline_count: 0,
            non_baseline_count: 0,
        };

        for feature in features {
            let Some(record) = detector.lookup(domain, &feature.feature_id) else {
                continue;
            };
            if record.is_baseline {
                summary.baseline_count += 1;
            } else {
                summary.non_baseline_count += 1;
            }
            summary.features.push(feature.feature_id.clone());
        }

        summary
    }

    pub fn severity(&self) -> Severity {
        if self.non_baseline_count > 0 {
            Severity::Warning
        } else {
            Severity::Info
        }
    }

    /// The user-facing notification text.
    pub fn message(&self) -> String {
        let count = self.features.len();
        let body = format!(
            "Detected {} feature{}: ✅ {} baseline, ⚠️ {} non-baseline",
            count,
            if count == 1 { "" } else { "s" },
            self.baseline_count,
            self.non_baseline_count
        );

        match self.severity() {
            Severity::Info => format!("✅ {body}"),
            Severity::Warning => body,
        }
    }
}

const STYLE: &str = r#"
    body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; padding: 20px; }
    h1 { color: #333; }
    .feature { border: 1px solid #ddd; border-radius: 8px; padding: 15px; margin: 10px 0; }
    .baseline { background: #d4edda; border-color: #c3e6cb; }
    .non-baseline { background: #fff3cd; border-color: #ffeaa7; }
    .feature-name { font-weight: bold; font-size: 16px; margin-bottom: 8px; }
    .status { display: inline-block; padding: 4px 8px; border-radius: 4px; font-size: 12px; margin-bottom: 8px; }
    .status-baseline { background: #28a745; color: white; }
    .status-warning { background: #ffc107; color: black; }
    .support { font-size: 14px; color: #666; margin-top: 5px; }
    .recommendation { margin-top: 10px; padding: 10px; background: #e3f2fd; border-radius: 4px; }
    .section { margin: 20px 0; }
    .baseline-list { color: #155724; }
    .non-baseline-list { color: #856404; }
"#;

fn open_document(out: &mut String, title: &str) {
    let _ = write!(
        out,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>{}</style>\n</head>\n<body>\n",
        escape_html(title),
        STYLE
    );
}

/// Detailed report for the features detected in one document.
pub fn render_report_html(
    detector: &Detector,
    domain: Domain,
    features: &[DetectedFeature],
) -> String {
    let mut html = String::new();
    open_document(&mut html, "Baseline Compatibility Report");

    let _ = writeln!(html, "<h1>🔍 Baseline Compatibility Report</h1>");
    let _ = writeln!(
        html,
        "<p>Detected {} features in your {} code</p>",
        features.len(),
        domain.as_str().to_uppercase()
    );

    for feature in features {
        let Some(record) = detector.lookup(domain, &feature.feature_id) else {
            continue;
        };

        let (class, badge, icon, label) = if record.is_baseline {
            ("baseline", "status-baseline", "✅", "Baseline")
        } else {
            ("non-baseline", "status-warning", "⚠️", "Not Baseline")
        };

        let _ = writeln!(html, "<div class=\"feature {class}\">");
        let _ = writeln!(
            html,
            "  <div class=\"feature-name\">{icon} {}</div>",
            escape_html(&feature.feature_id)
        );
        let _ = writeln!(html, "  <span class=\"status {badge}\">{label}</span>");
        let _ = writeln!(
            html,
            "  <div class=\"support\">Supported in: {}</div>",
            escape_html(&record.supported_in.join(", "))
        );
        if let Some(fallback) = &record.fallback_hint {
            let _ = writeln!(
                html,
                "  <div class=\"recommendation\">💡 <strong>Recommendation:</strong> {}</div>",
                escape_html(fallback)
            );
        }
        let _ = writeln!(html, "</div>");
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn join_ids(features: &[&Feature]) -> String {
    features
        .iter()
        .map(|f| escape_html(&f.id))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Quick reference built from the table, grouped by domain and status.
pub fn render_quick_reference_html(table: &CompatTable) -> String {
    let mut html = String::new();
    open_document(&mut html, "Baseline Quick Reference");
    let _ = writeln!(html, "<h1>🛡️ Baseline Quick Reference</h1>");

    for domain in Domain::ALL {
        let features = table.features(domain);
        if features.is_empty() {
            continue;
        }

        let (baseline, non_baseline): (Vec<_>, Vec<_>) =
            features.iter().partition(|f| f.record.is_baseline);
        let _ = writeln!(html, "<div class=\"section\">");
        let _ = writeln!(html, "  <h2>{}</h2>", domain.display_name());
        if !baseline.is_empty() {
            let _ = writeln!(
                html,
                "  <p class=\"baseline-list\">✅ <strong>Baseline:</strong> {}</p>",
                join_ids(&baseline)
            );
        }
        if !non_baseline.is_empty() {
            let _ = writeln!(
                html,
                "  <p class=\"non-baseline-list\">⚠️ <strong>Not Baseline:</strong> {}</p>",
                join_ids(&non_baseline)
            );
        }
        let _ = writeln!(html, "</div>");
    }

    let _ = writeln!(
        html,
        "<p>💡 <strong>Tip:</strong> Hover over features in your code to see detailed compatibility information!</p>"
    );
    html.push_str("</body>\n</html>\n");
    html
}
