//! The LSP backend: document store, debounced checks, hover and commands.

use std::sync::{Arc, PoisonError, RwLock};

use dashmap::DashMap;
use serde_json::Value;
use tower_lsp::jsonrpc::{Error, Result};
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService, Server};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::core::types::Severity;
use crate::detect::Detector;
use crate::diagnostics::provide_diagnostics;
use crate::domain::Domain;
use crate::error::BaselineError;
use crate::hover::provide_hover;
use crate::native::adapters::{ReportParams, ShowReport};
use crate::native::debounce::Debouncer;
use crate::report::{
    render_quick_reference_html, render_report_html, CheckSummary, VIEW_DETAILS_ACTION,
};
use crate::utils;

/// Publish diagnostics and summarize the given (or last active) document
pub const CHECK_FILE_COMMAND: &str = "baseline.checkFile";
/// Render the quick reference of the loaded table
pub const SHOW_STATUS_COMMAND: &str = "baseline.showStatus";

#[derive(Debug, Clone)]
struct Document {
    text: String,
    language_id: String,
    version: i32,
}

impl Document {
    fn domain(&self) -> Option<Domain> {
        Domain::classify(&self.language_id)
    }
}

/// What a check needs besides the document. Replaced wholesale on initialize.
#[derive(Debug)]
struct Settings {
    detector: Detector,
    docs_base_url: String,
}

impl Settings {
    fn from_config(config: &Config) -> Self {
        Self {
            detector: config.load_detector(),
            docs_base_url: config.docs_base_url.clone(),
        }
    }
}

#[derive(Debug)]
struct ServerState {
    documents: DashMap<Url, Document>,
    settings: RwLock<Arc<Settings>>,
    config: Config,
    debouncer: Debouncer<Url>,
    /// Most recently opened, edited or hovered document
    active: RwLock<Option<Url>>,
}

/// The LSP backend for the baseline checker.
#[derive(Debug, Clone)]
pub struct Backend {
    client: Client,
    state: Arc<ServerState>,
}

impl Backend {
    pub fn new(client: Client) -> Self {
        Self::with_config(client, Config::default())
    }

    pub fn with_config(client: Client, config: Config) -> Self {
        Self {
            client,
            state: Arc::new(ServerState {
                documents: DashMap::new(),
                settings: RwLock::new(Arc::new(Settings::from_config(&config))),
                debouncer: Debouncer::new(config.debounce),
                active: RwLock::new(None),
                config,
            }),
        }
    }

    fn settings(&self) -> Arc<Settings> {
        let guard = self
            .state
            .settings
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    fn set_active(&self, uri: Option<&Url>) {
        let mut active = self
            .state
            .active
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *active = uri.cloned();
    }

    fn active(&self) -> Option<Url> {
        self.state
            .active
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn document(&self, uri: &Url) -> Option<Document> {
        self.state.documents.get(uri).map(|doc| doc.clone())
    }

    /// Scan the current text of `uri` and publish its diagnostics.
    ///
    /// Returns `None` for unknown documents and unsupported languages.
    async fn check_document(&self, uri: &Url) -> Option<CheckSummary> {
        let doc = self.document(uri)?;
        let Some(domain) = doc.domain() else {
            debug!("Skipping {} ({} is not checked)", uri, doc.language_id);
            return None;
        };

        let settings = self.settings();
        let diagnostics = provide_diagnostics(&settings.detector, &doc.text, domain);
        let summary = settings.detector.summarize(&doc.text, domain);
        debug!(
            "Checked {}: {} features, {} warnings",
            uri,
            summary.features.len(),
            diagnostics.len()
        );

        self.client
            .publish_diagnostics(uri.clone(), diagnostics, Some(doc.version))
            .await;

        Some(summary)
    }

    fn schedule_check(&self, uri: Url) {
        let backend = self.clone();
        let key = uri.clone();
        self.state.debouncer.schedule(key, move || async move {
            backend.check_document(&uri).await;
        });
    }

    async fn check_file_command(&self, arguments: &[Value]) -> Result<Option<Value>> {
        let uri = match resolve_target(arguments).or_else(|| self.active()) {
            Some(uri) if self.state.documents.contains_key(&uri) => uri,
            _ => {
                self.client
                    .show_message(MessageType::INFO, BaselineError::NoActiveDocument)
                    .await;
                return Ok(None);
            }
        };

        let Some(summary) = self.check_document(&uri).await else {
            return Ok(None);
        };

        match summary.severity() {
            Severity::Info => {
                self.client
                    .show_message(MessageType::INFO, summary.message())
                    .await;
            }
            Severity::Warning => {
                // The command response must not wait on the user's choice
                let backend = self.clone();
                let message = summary.message();
                let report_uri = uri.clone();
                tokio::spawn(async move {
                    backend.offer_report(report_uri, message).await;
                });
            }
        }

        serde_json::to_value(&summary)
            .map(Some)
            .map_err(|e| Error::invalid_params(e.to_string()))
    }

    async fn offer_report(&self, uri: Url, message: String) {
        let action = MessageActionItem {
            title: VIEW_DETAILS_ACTION.to_string(),
            properties: Default::default(),
        };

        let choice = self
            .client
            .show_message_request(MessageType::WARNING, message, Some(vec![action]))
            .await;

        match choice {
            Ok(Some(item)) if item.title == VIEW_DETAILS_ACTION => {
                let Some(doc) = self.document(&uri) else {
                    return;
                };
                let Some(domain) = doc.domain() else {
                    return;
                };
                let settings = self.settings();
                let features = settings.detector.detect_unique(&doc.text, domain);
                let html = render_report_html(&settings.detector, domain, &features);
                self.client
                    .send_notification::<ShowReport>(ReportParams {
                        title: "Baseline Compatibility Report".to_string(),
                        uri: Some(uri),
                        html,
                    })
                    .await;
            }
            Ok(_) => {}
            Err(e) => warn!("Message request failed: {}", e),
        }
    }

    async fn show_status_command(&self) -> Result<Option<Value>> {
        let html = render_quick_reference_html(self.settings().detector.table());
        self.client
            .send_notification::<ShowReport>(ReportParams {
                title: "Baseline Quick Reference".to_string(),
                uri: None,
                html: html.clone(),
            })
            .await;
        Ok(Some(Value::String(html)))
    }
}

/// First command argument, if it is a document URI.
fn resolve_target(arguments: &[Value]) -> Option<Url> {
    arguments
        .first()
        .and_then(Value::as_str)
        .and_then(|s| Url::parse(s).ok())
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        info!("Baseline LSP server initializing...");

        if params.initialization_options.is_some() {
            let mut config = self.state.config.clone();
            config.apply_initialization_options(params.initialization_options);
            let settings = Settings::from_config(&config);
            *self
                .state
                .settings
                .write()
                .unwrap_or_else(PoisonError::into_inner) = Arc::new(settings);
        }

        Ok(InitializeResult {
            server_info: Some(ServerInfo {
                name: "baseline-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::INCREMENTAL,
                )),
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                execute_command_provider: Some(ExecuteCommandOptions {
                    commands: vec![
                        CHECK_FILE_COMMAND.to_string(),
                        SHOW_STATUS_COMMAND.to_string(),
                    ],
                    work_done_progress_options: WorkDoneProgressOptions::default(),
                }),
                ..Default::default()
            },
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "Baseline LSP server initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        info!("Baseline LSP server shutting down...");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        debug!("Document opened: {}", uri);

        self.state.documents.insert(
            uri.clone(),
            Document {
                text: params.text_document.text,
                language_id: params.text_document.language_id,
                version: params.text_document.version,
            },
        );
        self.set_active(Some(&uri));

        self.check_document(&uri).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;

        let checked = {
            let Some(mut doc) = self.state.documents.get_mut(&uri) else {
                warn!("Change for unopened document {}", uri);
                return;
            };

            for change in params.content_changes {
                match change.range {
                    Some(range) => {
                        utils::apply_text_edit(
                            &mut doc.text,
                            range.start.into(),
                            range.end.into(),
                            &change.text,
                        );
                    }
                    // Full document sync fallback
                    None => doc.text = change.text,
                }
            }
            doc.version = params.text_document.version;
            doc.domain().is_some()
        };

        self.set_active(Some(&uri));
        if checked {
            self.schedule_check(uri);
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        debug!("Document closed: {}", uri);

        self.state.debouncer.cancel(&uri);
        self.state.documents.remove(&uri);
        if self.active().as_ref() == Some(&uri) {
            self.set_active(None);
        }

        // Clear diagnostics for the closed document
        self.client.publish_diagnostics(uri, vec![], None).await;
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let uri = params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;

        let Some(doc) = self.document(&uri) else {
            return Ok(None);
        };
        let Some(domain) = doc.domain() else {
            return Ok(None);
        };
        self.set_active(Some(&uri));

        let settings = self.settings();
        Ok(provide_hover(
            &settings.detector,
            &doc.text,
            domain,
            position,
            &settings.docs_base_url,
        ))
    }

    async fn execute_command(&self, params: ExecuteCommandParams) -> Result<Option<Value>> {
        debug!("Execute command: {}", params.command);

        match params.command.as_str() {
            CHECK_FILE_COMMAND => self.check_file_command(&params.arguments).await,
            SHOW_STATUS_COMMAND => self.show_status_command().await,
            other => Err(Error::invalid_params(
                BaselineError::UnsupportedCommand(other.to_string()).to_string(),
            )),
        }
    }
}

/// Serve LSP over stdio until the client disconnects.
pub async fn run(config: Config) {
    info!("Baseline LSP server starting...");

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(move |client| Backend::with_config(client, config));
    Server::new(stdin, stdout, socket).serve(service).await;
}
