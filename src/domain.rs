use std::fmt;

use serde::{Deserialize, Serialize};


/// Content-kind bucket a detection pass runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Css,
    Html,
    #[serde(rename = "javascript")]
    JavaScript,
}

impl Domain {
    pub const ALL: [Domain; 3] = [Domain::Css, Domain::Html, Domain::JavaScript];

    /// Map an editor language id to a domain.
    ///
    /// Stylesheet and markup kinds match exactly. Anything mentioning
    /// `javascript` or `typescript` (including the `*react` variants) folds
    /// into [`Domain::JavaScript`]. Everything else is unsupported.
    pub fn classify(language_id: &str) -> Option<Domain> {
        match language_id {
            "css" | "scss" | "less" => Some(Domain::Css),
            "html" => Some(Domain::Html),
            id if id.contains("javascript") || id.contains("typescript") => {
                Some(Domain::JavaScript)
            }
            _ => None,
        }
    }

    /// Guess a language id from a file extension, for callers without an editor.
    pub fn language_id_for_extension(ext: &str) -> Option<&'static str> {
        match ext.to_ascii_lowercase().as_str() {
            "css" => Some("css"),
            "scss" => Some("scss"),
            "less" => Some("less"),
            "html" | "htm" => Some("html"),
            "js" | "mjs" | "cjs" => Some("javascript"),
            "jsx" => Some("javascriptreact"),
            "ts" | "mts" | "cts" => Some("typescript"),
            "tsx" => Some("typescriptreact"),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Domain::Css => "css",
            Domain::Html => "html",
            Domain::JavaScript => "javascript",
        }
    }

    /// Heading used in rendered reports
    pub fn display_name(self) -> &'static str {
        match self {
            Domain::Css => "CSS",
            Domain::Html => "HTML",
            Domain::JavaScript => "JavaScript",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
