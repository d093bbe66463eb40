//! Per-domain detection regexes and the line-by-line matcher.
//!
//! Patterns only find candidate substrings. Turning a candidate into a
//! feature id is the normalizer's job.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use crate::domain::Domain;
use crate::utils::utf16_len;


const CSS_SOURCES: &[&str] = &[
    r"display\s*:\s*grid",
    r"display\s*:\s*flex",
    r"@container",
    r"container-queries",
    r"backdrop-filter",
    r"aspect-ratio",
    r"gap\s*:",
    r"@layer",
    r"color-mix",
    r":has\(",
    r"subgrid",
];

const HTML_SOURCES: &[&str] = &[
    r"<dialog[\s>]",
    r"<details[\s>]",
    r#"loading\s*=\s*["']lazy["']"#,
    r"popover\s*=",
    r"<search[\s>]",
    r"inert\s*=",
];

// Operators and identifiers: match literally, case-sensitive.
const JAVASCRIPT_SOURCES: &[&str] = &[
    r"\?\.",
    r"\?\?",
    r"\.at\(",
    r"structuredClone",
    r"\.toSorted\(",
    r"\.toReversed\(",
    r"async\s+function",
    r"await\s+",
    r"import\.meta",
    r"new\s+Promise",
];

static CSS_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| compile(CSS_SOURCES, true));
static HTML_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| compile(HTML_SOURCES, true));
static JAVASCRIPT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| compile(JAVASCRIPT_SOURCES, false));

fn compile(sources: &[&str], case_insensitive: bool) -> Vec<Regex> {
    sources
        .iter()
        .map(|src| {
            RegexBuilder::new(src)
                .case_insensitive(case_insensitive)
                .build()
                .expect("detection patterns are valid regexes")
        })
        .collect()
}

/// The ordered pattern list for a domain.
pub fn patterns_for(domain: Domain) -> &'static [Regex] {
    match domain {
        Domain::Css => &CSS_PATTERNS,
        Domain::Html => &HTML_PATTERNS,
        Domain::JavaScript => &JAVASCRIPT_PATTERNS,
    }
}

/// One regex hit, located on a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatch {
    /// 0-based line number
    pub line: u32,
    /// UTF-16 column of the first matched character
    pub start: u32,
    /// UTF-16 column one past the last matched character
    pub end: u32,
    pub text: String,
}

/// Run every pattern of `domain` over `text`, one line at a time.
///
/// Output is pattern-major: all hits of the first pattern (top to bottom),
/// then all hits of the second, and so on. Matches never span a newline.
pub fn match_lines(text: &str, domain: Domain) -> Vec<RawMatch> {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut matches = Vec::new();

    for pattern in patterns_for(domain) {
        for (line_num, line) in lines.iter().enumerate() {
            for m in pattern.find_iter(line) {
                let start = utf16_len(&line[..m.start()]);
                matches.push(RawMatch {
                    line: line_num as u32,
                    start,
                    end: start + utf16_len(m.as_str()),
                    text: m.as_str().to_string(),
                });
            }
        }
    }

    matches
}
