//! Feature detection: matcher -> normalizer -> table lookup.
//!
//! Two entry points. [`Detector::detect_unique`]
//! answers "which features does this document use" and carries no
//! location. [`Detector::detect_occurrences`] returns every physical hit
//! with its span, which is what diagnostics and hover anchor on.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::core::types::{Position, Range};
use crate::domain::Domain;
use crate::normalize::normalize;
use crate::patterns::match_lines;
use crate::report::CheckSummary;
use crate::table::{CompatTable, SupportRecord};
use crate::utils::get_line_at_position;


/// A feature found in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectedFeature {
    pub feature_id: String,
    /// Source span; `None` for summary results
    pub range: Option<Range>,
}

/// Scans text against one compatibility table.
#[derive(Debug, Clone)]
pub struct Detector {
    table: Arc<CompatTable>,
}

impl Default for Detector {
    fn default() -> Self {
        Self::new(CompatTable::bundled())
    }
}

impl Detector {
    pub fn new(table: Arc<CompatTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &CompatTable {
        &self.table
    }

    pub fn lookup(&self, domain: Domain, feature_id: &str) -> Option<&SupportRecord> {
        self.table.lookup(domain, feature_id)
    }

    /// Unique feature ids in first-seen order (pattern order, then line order).
    pub fn detect_unique(&self, text: &str, domain: Domain) -> Vec<DetectedFeature> {
        let mut seen = HashSet::new();
        let features: Vec<_> = match_lines(text, domain)
            .into_iter()
            .map(|m| normalize(&m.text, domain, &self.table))
            .filter(|id| self.table.contains(domain, id))
            .filter(|id| seen.insert(id.clone()))
            .map(|feature_id| DetectedFeature {
                feature_id,
                range: None,
            })
            .collect();

        debug!(%domain, count = features.len(), "detected unique features");
        features
    }

    /// One entry per match that resolves to a known feature, sorted by position.
    pub fn detect_occurrences(&self, text: &str, domain: Domain) -> Vec<DetectedFeature> {
        let mut features: Vec<_> = match_lines(text, domain)
            .into_iter()
            .filter_map(|m| {
                let id = normalize(&m.text, domain, &self.table);
                self.table.contains(domain, &id).then(|| DetectedFeature {
                    feature_id: id,
                    range: Some(Range::from_coords(m.line, m.start, m.line, m.end)),
                })
            })
            .collect();

        features.sort_by_key(|f| f.range.map(|r| r.start));
        debug!(%domain, count = features.len(), "detected feature occurrences");
        features
    }

    /// The occurrence under `position`, if any.
    ///
    /// Only the line containing the position is scanned.
    pub fn feature_at(
        &self,
        text: &str,
        domain: Domain,
        position: Position,
    ) -> Option<DetectedFeature> {
        let line = get_line_at_position(text, position.line as usize)?;

        self.detect_occurrences(line, domain)
            .into_iter()
            .map(|mut f| {
                if let Some(range) = f.range.as_mut() {
                    range.start.line = position.line;
                    range.end.line = position.line;
                }
                f
            })
            .find(|f| f.range.is_some_and(|r| r.contains(position)))
    }

    /// Baseline / non-baseline counts over the unique features of `text`.
    pub fn summarize(&self, text: &str, domain: Domain) -> CheckSummary {
        CheckSummary::new(self, domain, &self.detect_unique(text, domain))
    }
}
