//! Maps a raw regex hit to the canonical feature id the table understands.
//!
//! Detection regexes are loose (`gap:` also hits `row-gap:`), so each hit
//! is narrowed down with an ordered list of containment rules. First rule
//! wins.

use crate::domain::Domain;
use crate::table::CompatTable;


/// (needle, canonical id)
type Rule = (&'static str, &'static str);

const CSS_RULES: &[Rule] = &[
    ("grid", "display: grid"),
    ("flex", "display: flex"),
    ("@container", "@container"),
    ("color-mix", "color-mix"),
    ("subgrid", "subgrid"),
    ("aspect-ratio", "aspect-ratio"),
    ("gap", "gap"),
    ("backdrop-filter", "backdrop-filter"),
    ("@layer", "@layer"),
    (":has", ":has"),
];

const HTML_RULES: &[Rule] = &[
    ("<dialog", "<dialog>"),
    ("<details", "<details>"),
    ("loading", "loading=\"lazy\""),
    ("popover", "popover"),
    ("<search", "<search>"),
    ("inert", "inert"),
];

const JAVASCRIPT_RULES: &[Rule] = &[
    ("?.", "?."),
    ("??", "??"),
    (".toSorted", ".toSorted()"),
    (".toReversed", ".toReversed()"),
    (".at(", ".at()"),
    ("structuredClone", "structuredClone"),
    ("async", "async/await"),
    ("await", "async/await"),
    ("import.meta", "import.meta"),
    ("Promise", "Promise"),
];

/// Containment rules for a domain, in priority order.
pub fn rules_for(domain: Domain) -> &'static [(&'static str, &'static str)] {
    match domain {
        Domain::Css => CSS_RULES,
        Domain::Html => HTML_RULES,
        Domain::JavaScript => JAVASCRIPT_RULES,
    }
}

/// Normalize `raw` to a feature id.
///
/// Exact keys win over rules. CSS and HTML hits are also tried as exact
/// keys once lowercased. When no rule applies the trimmed input is
/// returned and the lookup that follows simply misses.
pub fn normalize(raw: &str, domain: Domain, table: &CompatTable) -> String {
    let trimmed = raw.trim();

    if table.contains(domain, trimmed) {
        return trimmed.to_string();
    }

    // CSS and HTML hits come from case-insensitive patterns
    let haystack = match domain {
        Domain::Css | Domain::Html => trimmed.to_ascii_lowercase(),
        Domain::JavaScript => trimmed.to_string(),
    };

    if haystack != trimmed && table.contains(domain, &haystack) {
        return haystack;
    }

    rules_for(domain)
        .iter()
        .find(|(needle, _)| haystack.contains(needle))
        .map(|(_, id)| (*id).to_string())
        .unwrap_or_else(|| trimmed.to_string())
}
