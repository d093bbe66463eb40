use std::fmt::Write;

use crate::core::types::{HoverResult, Position};
use crate::detect::Detector;
use crate::domain::Domain;
use crate::table::SupportRecord;

// Native-only: convert to tower_lsp Hover type
#[cfg(feature = "native")]
use tower_lsp::lsp_types::Hover;


/// Where `doc_ref` paths are resolved unless configured otherwise
pub const DEFAULT_DOCS_BASE_URL: &str = "https://developer.mozilla.org/en-US/docs/Web/";

/// Provide hover information (returns core HoverResult type)
pub fn provide_hover_core(
    detector: &Detector,
    document: &str,
    domain: Domain,
    position: Position,
    docs_base_url: &str,
) -> Option<HoverResult> {
    let feature = detector.feature_at(document, domain, position)?;
    let record = detector.lookup(domain, &feature.feature_id)?;
    let contents = format_feature_hover(&feature.feature_id, record, docs_base_url);

    Some(match feature.range {
        Some(range) => HoverResult::with_range(contents, range),
        None => HoverResult::new(contents),
    })
}

/// Native-only: Provide hover information as a tower_lsp Hover
#[cfg(feature = "native")]
pub fn provide_hover(
    detector: &Detector,
    document: &str,
    domain: Domain,
    position: tower_lsp::lsp_types::Position,
    docs_base_url: &str,
) -> Option<Hover> {
    provide_hover_core(detector, document, domain, position.into(), docs_base_url)
        .map(crate::native::hover_result_to_lsp)
}

/// Markdown card for one feature
pub fn format_feature_hover(feature_id: &str, record: &SupportRecord, docs_base_url: &str) -> String {
    let (icon, status) = if record.is_baseline {
        ("✅", "**Baseline**")
    } else {
        ("⚠️", "**Not Baseline**")
    };

    let mut md = String::new();
    let _ = write!(md, "### {icon} {feature_id}\n\n");
    let _ = write!(md, "{status}\n\n");
    md.push_str("**Browser Support:**\n");
    for browser in &record.supported_in {
        let _ = writeln!(md, "- {browser}");
    }

    if let Some(fallback) = &record.fallback_hint {
        let _ = write!(md, "\n💡 **Recommendation:** {fallback}\n");
    }

    let _ = write!(
        md,
        "\n[📚 View on MDN]({})",
        doc_url(docs_base_url, &record.doc_ref)
    );
    md
}

fn doc_url(base: &str, doc_ref: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        doc_ref.trim_start_matches('/')
    )
}
