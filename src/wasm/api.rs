//! wasm-bindgen API for browser usage.
//!
//! Provides the BaselineChecker class that can be used from JavaScript.

use std::sync::Arc;

use wasm_bindgen::prelude::*;

use crate::core::types::{DiagnosticResult, HoverResult, Position, Range, Severity};
use crate::detect::Detector;
use crate::diagnostics::{provide_diagnostics_core, DIAGNOSTIC_SOURCE};
use crate::domain::Domain;
use crate::hover::{provide_hover_core, DEFAULT_DOCS_BASE_URL};
use crate::report::{render_quick_reference_html, render_report_html};
use crate::table::CompatTable;

/// Initialize panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Baseline checker for a single in-browser document
#[wasm_bindgen]
pub struct BaselineChecker {
    detector: Detector,
    docs_base_url: String,
    document: String,
    domain: Option<Domain>,
}

#[wasm_bindgen]
impl BaselineChecker {
    /// Create a checker backed by the bundled compatibility table
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            detector: Detector::default(),
            docs_base_url: DEFAULT_DOCS_BASE_URL.to_string(),
            document: String::new(),
            domain: None,
        }
    }

    /// Create a checker from a table given as JSON text
    #[wasm_bindgen(js_name = withTable)]
    pub fn with_table(json: &str) -> Result<BaselineChecker, JsError> {
        let table = CompatTable::from_json_str(json)?;
        Ok(Self {
            detector: Detector::new(Arc::new(table)),
            ..Self::new()
        })
    }

    #[wasm_bindgen(setter = docsBaseUrl)]
    pub fn set_docs_base_url(&mut self, url: String) {
        self.docs_base_url = url;
    }

    /// Language id of the current document is supported
    #[wasm_bindgen(getter)]
    pub fn supported(&self) -> bool {
        self.domain.is_some()
    }

    /// Replace the current document
    pub fn update(&mut self, document: &str, language_id: &str) {
        self.document = document.to_string();
        self.domain = Domain::classify(language_id);
    }

    /// Unique canonical ids found in the document, in detection order
    pub fn detect(&self) -> Result<JsValue, JsError> {
        let Some(domain) = self.domain else {
            return Ok(js_sys::Array::new().into());
        };
        let ids: Vec<String> = self
            .detector
            .detect_unique(&self.document, domain)
            .into_iter()
            .map(|f| f.feature_id)
            .collect();
        Ok(serde_wasm_bindgen::to_value(&ids)?)
    }

    /// Summary of the current document (counts and message)
    pub fn summary(&self) -> Result<JsValue, JsError> {
        let Some(domain) = self.domain else {
            return Ok(JsValue::NULL);
        };
        let summary = self.detector.summarize(&self.document, domain);
        Ok(serde_wasm_bindgen::to_value(&summary)?)
    }

    /// Get diagnostics (non-baseline occurrences) for the current document
    #[wasm_bindgen(js_name = provideDiagnostics)]
    pub fn provide_diagnostics(&self) -> JsValue {
        let js_array = js_sys::Array::new();
        let Some(domain) = self.domain else {
            return js_array.into();
        };
        for diag in provide_diagnostics_core(&self.detector, &self.document, domain) {
            js_array.push(&diagnostic_to_js(&diag));
        }
        js_array.into()
    }

    /// Provide hover information at the given position
    #[wasm_bindgen(js_name = provideHover)]
    pub fn provide_hover(&self, line: u32, col: u32) -> JsValue {
        let Some(domain) = self.domain else {
            return JsValue::NULL;
        };
        match provide_hover_core(
            &self.detector,
            &self.document,
            domain,
            Position::new(line, col),
            &self.docs_base_url,
        ) {
            Some(hover) => hover_to_js(&hover),
            None => JsValue::NULL,
        }
    }

    /// Detailed report of the current document as HTML
    #[wasm_bindgen(js_name = reportHTML)]
    pub fn report_html(&self) -> String {
        let Some(domain) = self.domain else {
            return "<p>Unsupported language</p>".to_string();
        };
        let features = self.detector.detect_unique(&self.document, domain);
        render_report_html(&self.detector, domain, &features)
    }

    /// Quick reference of the whole table as HTML
    #[wasm_bindgen(js_name = quickReferenceHTML)]
    pub fn quick_reference_html(&self) -> String {
        render_quick_reference_html(self.detector.table())
    }
}

impl Default for BaselineChecker {
    fn default() -> Self {
        Self::new()
    }
}

fn hover_to_js(hover: &HoverResult) -> JsValue {
    let obj = js_sys::Object::new();

    let contents = js_sys::Object::new();
    js_sys::Reflect::set(&contents, &"kind".into(), &"markdown".into()).ok();
    js_sys::Reflect::set(&contents, &"value".into(), &hover.contents.clone().into()).ok();
    js_sys::Reflect::set(&obj, &"contents".into(), &contents).ok();

    if let Some(range) = &hover.range {
        js_sys::Reflect::set(&obj, &"range".into(), &range_to_js(range)).ok();
    }

    obj.into()
}

fn range_to_js(range: &Range) -> JsValue {
    let obj = js_sys::Object::new();

    let start = js_sys::Object::new();
    js_sys::Reflect::set(&start, &"line".into(), &range.start.line.into()).ok();
    js_sys::Reflect::set(&start, &"character".into(), &range.start.character.into()).ok();

    let end = js_sys::Object::new();
    js_sys::Reflect::set(&end, &"line".into(), &range.end.line.into()).ok();
    js_sys::Reflect::set(&end, &"character".into(), &range.end.character.into()).ok();

    js_sys::Reflect::set(&obj, &"start".into(), &start).ok();
    js_sys::Reflect::set(&obj, &"end".into(), &end).ok();

    obj.into()
}

fn diagnostic_to_js(diag: &DiagnosticResult) -> JsValue {
    let obj = js_sys::Object::new();
    js_sys::Reflect::set(&obj, &"range".into(), &range_to_js(&diag.range)).ok();
    // 1 = error, 2 = warning, 3 = info, 4 = hint
    let severity: u32 = match diag.severity {
        Severity::Warning => 2,
        Severity::Info => 3,
    };
    js_sys::Reflect::set(&obj, &"severity".into(), &severity.into()).ok();
    js_sys::Reflect::set(&obj, &"code".into(), &diag.feature_id.clone().into()).ok();
    js_sys::Reflect::set(&obj, &"source".into(), &DIAGNOSTIC_SOURCE.into()).ok();
    js_sys::Reflect::set(&obj, &"message".into(), &diag.message.clone().into()).ok();
    obj.into()
}
