use std::collections::VecDeque;
use std::time::Duration;

use baseline_lsp::config::Config;
use baseline_lsp::native::Backend;
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt, DuplexStream, ReadHalf, WriteHalf};
use tokio::task::JoinHandle;
use tower_lsp::{LspService, Server};

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

pub async fn send_msg<W: AsyncWriteExt + Unpin>(writer: &mut W, msg: &str) {
    let content = format!("Content-Length: {}\r\n\r\n{}", msg.len(), msg);
    writer.write_all(content.as_bytes()).await.unwrap();
    writer.flush().await.unwrap();
}

pub async fn recv_msg<R: AsyncReadExt + Unpin>(reader: &mut R) -> Option<String> {
    // Read headers until \r\n\r\n, then a body of Content-Length bytes
    let mut buffer = Vec::new();
    let mut content_length = 0;

    loop {
        let byte = reader.read_u8().await.ok()?;
        buffer.push(byte);
        if buffer.ends_with(b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buffer);
            for line in headers.lines() {
                if line.to_lowercase().starts_with("content-length:") {
                    let parts: Vec<&str> = line.split(':').collect();
                    if parts.len() == 2 {
                        content_length = parts[1].trim().parse().unwrap_or_else(|e| {
                            panic!("Failed to parse Content-Length: {e}, header: {line}")
                        });
                    }
                }
            }
            break;
        }
    }

    if content_length == 0 {
        return None;
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).await.ok()?;

    Some(String::from_utf8(body).unwrap())
}

/// An LSP client talking to an in-process server over a duplex pipe.
///
/// Messages that arrive while waiting for something else are kept, so
/// server requests and notifications can be awaited in any order.
pub struct TestClient {
    reader: ReadHalf<DuplexStream>,
    writer: WriteHalf<DuplexStream>,
    backlog: VecDeque<Value>,
    next_id: i64,
    _server: JoinHandle<()>,
}

impl TestClient {
    pub fn start(config: Config) -> Self {
        let (client_side, server_side) = tokio::io::duplex(1 << 16);
        let (server_read, server_write) = tokio::io::split(server_side);
        let (service, socket) =
            LspService::new(move |client| Backend::with_config(client, config));
        let server = tokio::spawn(Server::new(server_read, server_write, socket).serve(service));

        let (reader, writer) = tokio::io::split(client_side);
        Self {
            reader,
            writer,
            backlog: VecDeque::new(),
            next_id: 1,
            _server: server,
        }
    }

    /// Start a server and complete the initialize handshake.
    pub async fn initialized(config: Config) -> (Self, Value) {
        let mut client = Self::start(config);
        let response = client
            .request("initialize", json!({ "capabilities": {} }))
            .await;
        client.notify("initialized", json!({})).await;
        (client, response)
    }

    pub async fn request(&mut self, method: &str, params: Value) -> Value {
        let id = self.next_id;
        self.next_id += 1;
        let msg = json!({ "jsonrpc": "2.0", "id": id, "method": method, "params": params });
        send_msg(&mut self.writer, &msg.to_string()).await;
        self.recv_until(|m| m["id"] == json!(id) && m.get("method").is_none())
            .await
    }

    pub async fn notify(&mut self, method: &str, params: Value) {
        let msg = json!({ "jsonrpc": "2.0", "method": method, "params": params });
        send_msg(&mut self.writer, &msg.to_string()).await;
    }

    /// Answer a request the server sent to us.
    pub async fn respond(&mut self, id: &Value, result: Value) {
        let msg = json!({ "jsonrpc": "2.0", "id": id, "result": result });
        send_msg(&mut self.writer, &msg.to_string()).await;
    }

    /// Next message (server request or notification) with the given method.
    pub async fn recv_method(&mut self, method: &str) -> Value {
        self.recv_until(|m| m["method"] == method).await
    }

    pub async fn open(&mut self, uri: &str, language_id: &str, text: &str) {
        self.notify(
            "textDocument/didOpen",
            json!({
                "textDocument": {
                    "uri": uri,
                    "languageId": language_id,
                    "version": 1,
                    "text": text,
                }
            }),
        )
        .await;
    }

    pub async fn recv_until(&mut self, pred: impl Fn(&Value) -> bool) -> Value {
        if let Some(index) = self.backlog.iter().position(&pred) {
            return self.backlog.remove(index).unwrap();
        }

        let reader = &mut self.reader;
        let backlog = &mut self.backlog;
        tokio::time::timeout(RECV_TIMEOUT, async move {
            loop {
                let raw = recv_msg(reader).await.expect("server closed the stream");
                let msg: Value = serde_json::from_str(&raw).unwrap();
                if pred(&msg) {
                    return msg;
                }
                backlog.push_back(msg);
            }
        })
        .await
        .expect("timed out waiting for a message from the server")
    }
}
