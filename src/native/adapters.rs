//! Adapters for converting between core types and tower-lsp types.
//!
//! The From implementations are defined in core::types, but this module
//! provides additional helper functions for common conversions.

use serde::{Deserialize, Serialize};
use tower_lsp::lsp_types as lsp;

use crate::core::types as core;

/// Convert a core HoverResult to an LSP Hover
pub fn hover_result_to_lsp(result: core::HoverResult) -> lsp::Hover {
    lsp::Hover {
        contents: lsp::HoverContents::Markup(lsp::MarkupContent {
            kind: lsp::MarkupKind::Markdown,
            value: result.contents,
        }),
        range: result.range.map(|r| r.into()),
    }
}

/// Payload of the `baseline/report` notification: a rendered HTML panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportParams {
    pub title: String,
    /// Document the report describes; absent for the quick reference
    pub uri: Option<lsp::Url>,
    pub html: String,
}

/// Server -> client notification asking the editor to render a report panel.
pub enum ShowReport {}

impl lsp::notification::Notification for ShowReport {
    type Params = ReportParams;
    const METHOD: &'static str = "baseline/report";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hover_result_to_lsp() {
        let hover = hover_result_to_lsp(core::HoverResult::with_range(
            "### ✅ gap".to_string(),
            core::Range::from_coords(2, 4, 2, 8),
        ));

        match hover.contents {
            lsp::HoverContents::Markup(markup) => {
                assert_eq!(markup.kind, lsp::MarkupKind::Markdown);
                assert_eq!(markup.value, "### ✅ gap");
            }
            _ => panic!("Expected markup contents"),
        }
        assert_eq!(
            hover.range,
            Some(lsp::Range::new(lsp::Position::new(2, 4), lsp::Position::new(2, 8)))
        );
    }

    #[test]
    fn test_report_params_shape() {
        let params = ReportParams {
            title: "Baseline Quick Reference".to_string(),
            uri: None,
            html: "<p></p>".to_string(),
        };
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["title"], "Baseline Quick Reference");
        assert!(json["uri"].is_null());
    }
}
